// src/config.rs
use crate::constants::DEFAULT_PACING_MS;
use crate::error::AppError;
use crate::types::{ApiKey, NotionId, PageId};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// File written when no other destination is requested.
const DEFAULT_OUTPUT_FILE: &str = "output.tex";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "Convert a Notion page into a LaTeX document", long_about = None)]
pub struct CommandLineInput {
    /// Notion page URL or ID (e.g., "https://www.notion.so/...")
    pub notion_input: String,

    /// Output file for the generated LaTeX (defaults to output.tex when no other destination is given)
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Copy the generated LaTeX to the clipboard
    #[arg(short = 'b', long, default_value_t = false)]
    pub clipboard: bool,

    /// Pipe mode - print the document to stdout and nothing else
    #[arg(short = 'p', long, default_value_t = false)]
    pub pipe: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// LaTeX template to wrap the body in (defaults to the bundled preamble)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Emit only the converted body, without preamble or \end{document}
    #[arg(long, default_value_t = false)]
    pub body_only: bool,

    /// Download images into this directory and point figures at the local files
    #[arg(long)]
    pub images_dir: Option<PathBuf>,

    /// Delay before each block, in milliseconds, to stay under the API rate limit
    #[arg(long, default_value_t = DEFAULT_PACING_MS)]
    pub pacing_ms: u64,

    /// Fail instead of delivering a partial document when some blocks could not be converted
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

/// Resolved pipeline configuration, validated and ready to drive every stage.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub page_id: PageId,
    pub api_key: ApiKey,
    pub output_file: Option<PathBuf>,
    pub clipboard: bool,
    pub pipe: bool,
    pub verbose: bool,
    pub template: Option<PathBuf>,
    pub body_only: bool,
    pub images_dir: Option<PathBuf>,
    pub pacing: Duration,
    pub strict: bool,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key_str = std::env::var("NOTION_API_KEY").map_err(|_| {
            AppError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;

        Self::from_parts(cli, ApiKey::new(api_key_str)?)
    }

    fn from_parts(cli: CommandLineInput, api_key: ApiKey) -> Result<Self, AppError> {
        let notion_id = NotionId::parse(&cli.notion_input)?;

        let mut output_file = cli.output_file.map(PathBuf::from);
        if !cli.pipe && !cli.clipboard && output_file.is_none() {
            output_file = Some(PathBuf::from(DEFAULT_OUTPUT_FILE));
        }

        if cli.body_only && cli.template.is_some() {
            log::warn!("--template is ignored together with --body-only");
        }

        Ok(PipelineConfig {
            page_id: PageId::from(&notion_id),
            api_key,
            output_file,
            clipboard: cli.clipboard,
            pipe: cli.pipe,
            verbose: cli.verbose,
            template: cli.template,
            body_only: cli.body_only,
            images_dir: cli.images_dir,
            pacing: Duration::from_millis(cli.pacing_ms),
            strict: cli.strict,
        })
    }
}
