// src/assets.rs
//! Image assets: naming, downloading and the reference map the
//! post-processor uses to point figures at local files.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::constants::{IMAGE_DOWNLOAD_PACING_MS, NOTION_API_TIMEOUT_SECS};
use crate::error::AppError;
use crate::formatting::block_renderer::url_basename;
use crate::formatting::{ImageReference, ImageSource};
use crate::postprocess::ImageMap;
use crate::types::{BlockId, ValidatedUrl};

/// One image to fetch, and the file name it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub block_id: BlockId,
    pub source: ImageSource,
    pub remote_url: String,
    pub archive_filename: String,
}

impl ImageAsset {
    /// The inclusion argument the converter wrote for this image.
    pub fn markup_reference(&self) -> &str {
        match self.source {
            ImageSource::File => url_basename(&self.remote_url),
            ImageSource::External => &self.remote_url,
        }
    }
}

/// Assign every referenced image a unique file name.
///
/// Names come from the URL's last path segment, reduced to a single safe
/// path component. External images without an extension get a name derived
/// from their block, and collisions get a `_N` suffix before the extension.
pub fn plan_image_assets(references: &[ImageReference]) -> Vec<ImageAsset> {
    let mut taken = HashSet::new();
    let mut assets = Vec::with_capacity(references.len());

    for reference in references {
        let mut filename = sanitize_filename(url_basename(&reference.url));
        if reference.source == ImageSource::External && !filename.contains('.') {
            filename = format!("external_image_{}.jpg", reference.block_id.as_str());
        } else if !filename.is_empty() && filename.chars().all(|c| c == '.') {
            filename = format!("image_{}.jpg", reference.block_id.as_str());
        }

        if reference.url.is_empty() || filename.is_empty() {
            log::warn!(
                "Skipped image block {}: missing URL or filename",
                reference.block_id
            );
            continue;
        }

        let archive_filename = unique_filename(&filename, &taken);
        taken.insert(archive_filename.clone());

        log::debug!("Found image: {} for block {}", archive_filename, reference.block_id);
        assets.push(ImageAsset {
            block_id: reference.block_id.clone(),
            source: reference.source,
            remote_url: reference.url.clone(),
            archive_filename,
        });
    }

    assets
}

/// Keep letters, digits, `.`, `-` and `_`; everything else, including
/// separators and `%`-escapes, becomes `_`.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn unique_filename(filename: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(filename) {
        return filename.to_string();
    }

    let (stem, extension) = match filename.rfind('.') {
        Some(dot) => filename.split_at(dot),
        None => (filename, ""),
    };

    (1..)
        .map(|counter| format!("{}_{}{}", stem, counter, extension))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| filename.to_string())
}

/// Map from inclusion argument to file name.
///
/// Notion-hosted images sharing a basename share one inclusion argument, so
/// only the first of them can be mapped.
pub fn image_map(assets: &[ImageAsset]) -> ImageMap {
    let mut map = ImageMap::with_capacity(assets.len());
    for asset in assets {
        map.entry(asset.markup_reference().to_string())
            .or_insert_with(|| asset.archive_filename.clone());
    }
    map
}

/// Fetch every asset into `dir`, returning the ones that were written.
///
/// Individual failures are logged and skipped; only failing to create the
/// directory or the client is an error.
pub async fn download_image_assets(
    assets: &[ImageAsset],
    dir: &Path,
) -> Result<Vec<ImageAsset>, AppError> {
    tokio::fs::create_dir_all(dir).await?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(NOTION_API_TIMEOUT_SECS))
        .build()?;

    let total = assets.len();
    let mut downloaded = Vec::with_capacity(total);

    for (index, asset) in assets.iter().enumerate() {
        log::info!(
            "Downloading image {}/{}: {}",
            index + 1,
            total,
            asset.archive_filename
        );

        match download_one(&client, asset, dir).await {
            Ok(path) => {
                log::debug!("Saved {}", path.display());
                downloaded.push(asset.clone());
            }
            Err(e) => log::warn!("Failed to download image {}: {}", asset.archive_filename, e),
        }

        if index + 1 < total {
            tokio::time::sleep(Duration::from_millis(IMAGE_DOWNLOAD_PACING_MS)).await;
        }
    }

    log::info!("Downloaded {}/{} images", downloaded.len(), total);
    Ok(downloaded)
}

async fn download_one(
    client: &reqwest::Client,
    asset: &ImageAsset,
    dir: &Path,
) -> Result<PathBuf, AppError> {
    let url = ValidatedUrl::parse(&asset.remote_url)?;
    let response = client.get(url.as_str()).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;

    if bytes.is_empty() {
        return Err(AppError::MalformedResponse(format!(
            "empty body for {}",
            asset.archive_filename
        )));
    }

    let mut components = Path::new(&asset.archive_filename).components();
    let path = match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => dir.join(name),
        _ => {
            return Err(AppError::InternalError {
                message: format!(
                    "refusing to write image outside {}: {}",
                    dir.display(),
                    asset.archive_filename
                ),
                source: None,
            })
        }
    };
    tokio::fs::write(&path, &bytes).await?;
    Ok(path)
}
