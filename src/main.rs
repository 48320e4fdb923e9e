// src/main.rs

// Modules defined in the crate
mod algebras;
mod api;
mod assets;
mod config;
mod constants;
mod error;
mod error_recovery;
mod formatting;
mod model;
mod output;
mod pipeline;
mod postprocess;
mod types;

// Specific imports
use crate::config::{CommandLineInput, PipelineConfig};
use crate::error::AppError;
use crate::formatting::{BlockConverter, ConversionResult, ProgressSink};
use crate::pipeline::{
    compose_document, ComposedDocument, DocumentComposer, DocumentDelivery, PageConversion,
};
use crate::postprocess::ImageMap;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use output::{deliver, DeliveryTarget, OutputPlan, OutputReport, Template};
use std::fs;
use std::io::Write;
use std::sync::Arc;
use types::{PageId, RenderedDocument};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion2tex.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Logs go to stderr so that pipe mode keeps stdout for the document.
    let console_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Shows top-level progress on stderr.
struct TerminalProgress;

impl ProgressSink for TerminalProgress {
    fn on_progress(&self, level: usize, current: usize, total: usize) {
        if level != 1 {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\rConverting block {}/{}", current, total);
        if current == total {
            let _ = writeln!(stderr);
        }
        let _ = stderr.flush();
    }
}

/// Executes the pipeline: convert → fetch images → compose → deliver.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let pipeline = NotionToTex::new(config)?;

    let result = pipeline.convert(&config.page_id).await?;
    pipeline.check_degraded(&result)?;

    let images = pipeline.fetch_images(&result).await?;
    let composed = pipeline.compose(&result, images.as_ref())?;
    let report = pipeline.deliver(composed.document.clone())?;
    pipeline.report_completion(&result, &composed, &report);

    Ok(())
}

/// Orchestrates the conversion, composition, and delivery of one Notion page.
struct NotionToTex<'a> {
    config: &'a PipelineConfig,
    template: Option<Template>,
}

impl<'a> NotionToTex<'a> {
    fn new(config: &'a PipelineConfig) -> Result<Self, AppError> {
        let template = if config.body_only {
            None
        } else {
            Some(match &config.template {
                Some(path) => Template::load(path)?,
                None => Template::bundled(),
            })
        };

        Ok(Self { config, template })
    }

    /// A partial conversion is reported and delivered unless running strict.
    fn check_degraded(&self, result: &ConversionResult) -> Result<(), AppError> {
        let Some(message) = &result.error_message else {
            return Ok(());
        };

        if self.config.strict {
            return Err(AppError::DegradedConversion(message.clone()));
        }

        eprintln!("⚠️  Some blocks could not be converted:");
        for line in message.lines() {
            eprintln!("   {}", line);
        }
        Ok(())
    }

    /// Downloads referenced images when an images directory is configured.
    async fn fetch_images(&self, result: &ConversionResult) -> Result<Option<ImageMap>, AppError> {
        let Some(dir) = &self.config.images_dir else {
            return Ok(None);
        };

        let planned = assets::plan_image_assets(&result.images);
        if planned.is_empty() {
            log::info!("No images to download");
            return Ok(None);
        }

        let downloaded = assets::download_image_assets(&planned, dir).await?;
        if downloaded.len() < planned.len() {
            eprintln!(
                "⚠️  Downloaded {}/{} images; the rest keep their remote references.",
                downloaded.len(),
                planned.len()
            );
        }
        Ok(Some(assets::image_map(&downloaded)))
    }

    fn delivery_plan(&self, document: RenderedDocument) -> OutputPlan {
        let content = document.into_string();
        let mut plan = OutputPlan::new();

        if self.config.pipe {
            return plan.with_target(DeliveryTarget::PrintToStdout { content });
        }

        if let Some(path) = &self.config.output_file {
            plan = plan.with_target(DeliveryTarget::WriteFile {
                path: path.clone(),
                content: content.clone(),
            });
        }
        if self.config.clipboard {
            plan = plan.with_target(DeliveryTarget::CopyToClipboard { content });
        }
        plan
    }

    /// Reports completion to the user with stats and delivery confirmations.
    fn report_completion(
        &self,
        result: &ConversionResult,
        composed: &ComposedDocument,
        report: &OutputReport,
    ) {
        if self.config.pipe {
            return;
        }

        println!(
            "📄 Converted {} blocks ({} fragments, {} images).",
            result.blocks_processed,
            result.fragments.len(),
            result.images.len()
        );
        if composed.flags.has_unsupported_chars {
            eprintln!("⚠️  Some characters could not be converted; search the output for U+.");
        }

        for (target, _) in &report.completed {
            match target {
                DeliveryTarget::WriteFile { path, .. } => {
                    println!("✓ LaTeX saved to {}", path.display());
                }
                DeliveryTarget::CopyToClipboard { .. } => {
                    println!("✓ LaTeX copied to clipboard");
                }
                DeliveryTarget::PrintToStdout { .. } => {}
            }
        }
        if let Some(dir) = &self.config.images_dir {
            println!("✓ Images stored in {}", dir.display());
        }
    }
}

#[async_trait::async_trait]
impl PageConversion for NotionToTex<'_> {
    async fn convert(&self, page_id: &PageId) -> Result<ConversionResult, AppError> {
        log::info!("Converting page {}", page_id);

        let client = Arc::new(api::NotionHttpClient::new(&self.config.api_key)?);
        let mut converter =
            BlockConverter::new(client, page_id.clone()).with_pacing(self.config.pacing);
        if !self.config.pipe {
            converter = converter.with_progress(Arc::new(TerminalProgress));
        }

        converter.convert_page().await
    }
}

impl DocumentComposer for NotionToTex<'_> {
    fn compose(
        &self,
        result: &ConversionResult,
        images: Option<&ImageMap>,
    ) -> Result<ComposedDocument, AppError> {
        Ok(compose_document(result, images, self.template.as_ref()))
    }
}

impl DocumentDelivery for NotionToTex<'_> {
    fn deliver(&self, document: RenderedDocument) -> Result<OutputReport, AppError> {
        let report = deliver(self.delivery_plan(document));

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failure_messages(),
            });
        }

        Ok(report)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
