// src/config.rs
use crate::constants::{DEFAULT_REQUEST_TIMEOUT, DEFAULT_REVALIDATE_SECS, FEED_PAGE_SIZE};
use crate::error::AppError;
use crate::pipeline::PageRequest;
use crate::types::{ApiUrl, Uid};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Repository API endpoint or bare repository name
    /// (defaults to the PRISMIC_API_URL environment variable)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Output file for the composed page JSON (optional)
    #[arg(short, long)]
    pub output_file: Option<String>,

    /// Pipe mode - output page JSON directly to stdout for piping
    #[arg(short = 'p', long, default_value_t = false)]
    pub pipe: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Request timeout in seconds for store calls
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Disable the revalidation cache (always fetch fresh detail documents)
    #[arg(long, default_value_t = false)]
    pub no_cache: bool,

    /// How long a fetched detail document stays fresh, in seconds
    #[arg(long, default_value_t = DEFAULT_REVALIDATE_SECS)]
    pub revalidate_secs: u64,

    /// Summaries per feed page
    #[arg(long, default_value_t = FEED_PAGE_SIZE)]
    pub page_size: u32,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the post feed as summaries plus a continuation cursor
    Feed {
        /// Continuation pages to follow after the first (default: none)
        #[arg(long, conflicts_with = "all")]
        pages: Option<u32>,

        /// Follow the feed until it is exhausted
        #[arg(long, default_value_t = false)]
        all: bool,
    },
    /// Fetch a single post by UID, normalized for rendering
    Post {
        /// The post's UID (slug)
        uid: String,
    },
}

/// Resolved pipeline configuration — validated and ready to drive all
/// three stages.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub api_url: ApiUrl,
    pub request: PageRequest,
    pub output_file: Option<PathBuf>,
    pub pipe: bool,
    pub verbose: bool,
    pub timeout: Duration,
    pub no_cache: bool,
    pub revalidate_secs: u64,
    pub page_size: u32,
}

impl PipelineConfig {
    /// Resolves a complete pipeline configuration from CLI input and
    /// environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let endpoint = match cli.api_url {
            Some(flag) => flag,
            None => std::env::var("PRISMIC_API_URL").map_err(|_| {
                AppError::MissingConfiguration(
                    "pass --api-url or set the PRISMIC_API_URL environment variable".to_string(),
                )
            })?,
        };
        let api_url = ApiUrl::parse(&endpoint)?;

        let request = match cli.command {
            Command::Feed { pages, all } => PageRequest::Feed {
                follow_pages: if all { None } else { Some(pages.unwrap_or(0)) },
            },
            Command::Post { uid } => PageRequest::Post {
                uid: Uid::parse(&uid)?,
            },
        };

        Ok(PipelineConfig {
            api_url,
            request,
            output_file: cli.output_file.map(PathBuf::from),
            pipe: cli.pipe,
            verbose: cli.verbose,
            timeout: Duration::from_secs(cli.timeout_secs),
            no_cache: cli.no_cache,
            revalidate_secs: cli.revalidate_secs,
            page_size: cli.page_size,
        })
    }
}
