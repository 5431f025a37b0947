// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;

use prismic2page::error_recovery::{retry_with_backoff, RetryPolicy};
use prismic2page::page_state::PageLifecycle;
use prismic2page::{
    assemble_post_detail, deliver, estimate_reading_time, AppError, CachedPostStore,
    CommandLineInput, ContentSource, DeliveryTarget, DocumentType, FeedPaginator, FeedView,
    LoadOutcome, OutputPlan, OutputReport, PageComposer, PageContent, PageDelivery, PageRequest,
    PageState, PipelineConfig, PostStore, PostView, PrismicHttpClient, QueryOptions, RenderedPage,
    Uid,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("prismic2page.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the three-stage pipeline: fetch → compose → deliver.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let pipeline = PrismicToPage::new(config);

    let content = pipeline.fetch(&config.request).await?;
    let page = pipeline.compose(&content)?;
    let report = pipeline.deliver(page)?;
    pipeline.report_completion(&content, &report);

    Ok(())
}

/// Orchestrates the retrieval, shaping, and delivery of store content as
/// render-ready pages.
struct PrismicToPage<'a> {
    config: &'a PipelineConfig,
}

impl<'a> PrismicToPage<'a> {
    fn new(config: &'a PipelineConfig) -> Self {
        Self { config }
    }

    /// Builds the store stack: HTTP client, optionally wrapped in the
    /// revalidation cache.
    async fn build_store(&self) -> Result<Arc<dyn PostStore>, AppError> {
        let http = PrismicHttpClient::new(self.config.api_url.clone(), self.config.timeout)?;
        if self.config.no_cache {
            log::info!("Revalidation cache disabled — all requests go to the store");
            Ok(Arc::new(http))
        } else {
            log::info!("Revalidation cache enabled (TTL: {}s)", self.config.revalidate_secs);
            Ok(Arc::new(
                CachedPostStore::new(http, self.config.revalidate_secs).await?,
            ))
        }
    }

    /// Fetches the feed: first page, then as many continuations as asked.
    async fn fetch_feed(
        &self,
        store: Arc<dyn PostStore>,
        follow_pages: Option<u32>,
    ) -> Result<FeedView, AppError> {
        let doc_type = DocumentType::parse(prismic2page::constants::FEED_DOCUMENT_TYPE)?;
        let options = QueryOptions::new(
            prismic2page::constants::FEED_FETCH_FIELDS
                .iter()
                .map(|f| f.to_string())
                .collect(),
            self.config.page_size,
        )?;

        let policy = RetryPolicy::default();
        let mut paginator = retry_with_backoff(
            policy,
            || FeedPaginator::bootstrap(store.clone(), &doc_type, &options),
            |_, _| {},
        )
        .await?;

        let mut followed = 0u32;
        loop {
            match follow_pages {
                Some(limit) if followed >= limit => break,
                _ => {}
            }
            match load_more_with_retry(&mut paginator, policy).await? {
                LoadOutcome::Appended(_) => followed += 1,
                LoadOutcome::EndOfFeed => break,
            }
        }

        log::info!(
            "Feed loaded: {} posts over {} continuation page(s)",
            paginator.visible().len(),
            followed
        );

        Ok(FeedView {
            posts: paginator.visible().to_vec(),
            next_page: paginator.cursor().clone(),
        })
    }

    /// Fetches one post's detail, driving the page lifecycle.
    async fn fetch_post(&self, store: Arc<dyn PostStore>, uid: &Uid) -> Result<PostView, AppError> {
        let doc_type = DocumentType::parse(prismic2page::constants::DETAIL_DOCUMENT_TYPE)?;
        let mut lifecycle: PageLifecycle<PostView> = PageLifecycle::new();
        lifecycle.begin_loading()?;

        let fetched = retry_with_backoff(
            RetryPolicy::default(),
            || store.get_by_uid(&doc_type, uid),
            |_, _| {
                // First transient failure moves the navigation into its
                // fallback state; later retries keep it there.
                if matches!(lifecycle.state(), PageState::Loading) {
                    if let Err(e) = lifecycle.enter_fallback() {
                        log::debug!("Fallback transition refused: {}", e);
                    }
                }
            },
        )
        .await;

        match fetched {
            Ok(document) => {
                let post = assemble_post_detail(document)?;
                let reading_minutes = estimate_reading_time(&post.sections);
                let view = PostView {
                    post,
                    reading_minutes,
                };
                lifecycle.resolve_ready(view.clone())?;
                Ok(view)
            }
            Err(e) => {
                lifecycle.fail(e.to_string())?;
                Err(e)
            }
        }
    }

    /// Prints a completion summary and delivery confirmations.
    fn report_completion(&self, content: &PageContent, report: &OutputReport) {
        if self.config.pipe {
            return;
        }

        match content {
            PageContent::Feed(feed) => {
                if feed.next_page.has_more() {
                    println!(
                        "📄 Loaded {} posts; more are available behind the cursor.",
                        feed.posts.len()
                    );
                } else {
                    println!("📄 Loaded all {} posts.", feed.posts.len());
                }
            }
            PageContent::Post(view) => {
                println!(
                    "📄 Post '{}' ({} min read, {} sections).",
                    view.post.title,
                    view.reading_minutes,
                    view.post.sections.len()
                );
            }
        }

        for completed in &report.completed {
            if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
                println!("✓ Page saved to {}", path.display());
            }
        }
    }
}

/// Retries `load_more` on transient failures with the policy's backoff.
///
/// `load_more` needs `&mut` on the paginator, which a closure-based retry
/// combinator can't express; the loop is inlined instead.
async fn load_more_with_retry(
    paginator: &mut FeedPaginator,
    policy: RetryPolicy,
) -> Result<LoadOutcome, AppError> {
    let mut delay = policy.initial_delay;
    let mut attempt = 1;
    loop {
        match paginator.load_more().await {
            Ok(outcome) => return Ok(outcome),
            Err(e) if e.is_transient() && attempt < policy.max_attempts => {
                log::warn!("Attempt {} failed ({}), retrying after {:?}", attempt, e, delay);
                tokio::time::sleep(delay).await;
                delay = std::cmp::min(delay * 2, policy.max_delay);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[async_trait::async_trait]
impl ContentSource for PrismicToPage<'_> {
    async fn fetch(&self, request: &PageRequest) -> Result<PageContent, AppError> {
        let store = self.build_store().await?;
        match request {
            PageRequest::Feed { follow_pages } => {
                log::info!("Retrieving post feed from {}", self.config.api_url);
                Ok(PageContent::Feed(self.fetch_feed(store, *follow_pages).await?))
            }
            PageRequest::Post { uid } => {
                log::info!("Retrieving post '{}' from {}", uid, self.config.api_url);
                Ok(PageContent::Post(self.fetch_post(store, uid).await?))
            }
        }
    }
}

impl PageComposer for PrismicToPage<'_> {
    fn compose(&self, content: &PageContent) -> Result<RenderedPage, AppError> {
        let json = match content {
            PageContent::Feed(feed) => serde_json::to_string_pretty(feed)?,
            PageContent::Post(view) => serde_json::to_string_pretty(view)?,
        };
        Ok(RenderedPage::new(json))
    }
}

impl PageDelivery for PrismicToPage<'_> {
    fn deliver(&self, page: RenderedPage) -> Result<OutputReport, AppError> {
        let content = page.into_string();
        let mut plan = OutputPlan::new();

        if self.config.pipe {
            plan = plan.with_operation(DeliveryTarget::PrintToStdout { content });
        } else if let Some(output_path) = &self.config.output_file {
            plan = plan.with_operation(DeliveryTarget::WriteFile {
                path: output_path.clone(),
                content,
            });
        } else {
            plan = plan.with_operation(DeliveryTarget::PrintToStdout { content });
        }

        let report = deliver(plan)?;

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failed.iter().map(|f| f.error.clone()).collect(),
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
