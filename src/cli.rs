//! CLI argument parsing and the one-shot query mode

use crate::actors::{DisplaySnapshot, WidgetMessage};
use crate::config::{
    WidgetConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_MS,
};
use crate::display::format_row;
use crate::fetcher::PageFetcher;
use crate::widget::SearchWidget;
use anyhow::{anyhow, Context};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Width used for rows printed by the one-shot mode
pub const CLI_ROW_WIDTH: usize = 120;

/// Debounced, paginated search against a remote endpoint
#[derive(Debug, Clone, Parser)]
#[command(name = "searchbox", version, about)]
pub struct Cli {
    /// Base URL of the search service
    #[arg(long, env = "SEARCHBOX_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Items requested per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Quiet window before typed text is searched
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    /// Per-request timeout
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Rows before the end of the list at which the next page is requested
    #[arg(long, default_value_t = 0)]
    pub threshold: usize,

    /// Run a single search, print the results and exit
    #[arg(short, long)]
    pub query: Option<String>,

    /// Pages to load in one-shot mode
    #[arg(long, default_value_t = 1)]
    pub pages: usize,

    /// Print one-shot results as JSON
    #[arg(long)]
    pub json: bool,

    /// Write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn to_config(&self) -> WidgetConfig {
        WidgetConfig {
            endpoint: self.endpoint.clone(),
            page_size: self.page_size,
            debounce_ms: self.debounce_ms,
            timeout_ms: self.timeout_ms,
            load_more_threshold: self.threshold,
            ..WidgetConfig::default()
        }
    }
}

/// Time allowed for a one-shot run of `pages` pages: the quiet window, then
/// one request timeout per page plus one spare. Saturates at `Duration::MAX`.
pub fn wait_budget(config: &WidgetConfig, pages: usize) -> Duration {
    let requests = u32::try_from(pages.max(1))
        .unwrap_or(u32::MAX)
        .saturating_add(1);
    config
        .request_timeout()
        .checked_mul(requests)
        .and_then(|fetching| fetching.checked_add(config.debounce_delay()))
        .unwrap_or(Duration::MAX)
}

/// Type `query` into a fresh widget and keep scrolling to the end until
/// `pages` pages are loaded or the result set is exhausted.
///
/// Returns the last settled snapshot. A blank query settles immediately with
/// no rows.
pub async fn collect_pages(
    fetcher: Arc<dyn PageFetcher>,
    config: &WidgetConfig,
    query: &str,
    pages: usize,
) -> anyhow::Result<DisplaySnapshot> {
    let (widget, mut events) = SearchWidget::spawn(fetcher, config);
    widget.input(query).context("Failed to send query to widget")?;

    let budget = wait_budget(config, pages);
    let wanted = pages.max(1);

    let collected = timeout(budget, async {
        let mut committed: Option<String> = None;
        let mut loaded_pages = 0;

        while let Some(message) = events.recv().await {
            match message.payload {
                WidgetMessage::QueryCommitted(text) => committed = Some(text),
                WidgetMessage::DisplayUpdated(snapshot) => {
                    let Some(current) = committed.as_deref() else {
                        continue;
                    };
                    if snapshot.loading || snapshot.query != current {
                        continue;
                    }
                    if current.is_empty() {
                        return Ok(snapshot);
                    }

                    loaded_pages += 1;
                    log::debug!(
                        "Page {} settled: {} of {} items",
                        loaded_pages,
                        snapshot.rows.len(),
                        snapshot.total
                    );
                    if loaded_pages >= wanted || !snapshot.has_more {
                        return Ok(snapshot);
                    }

                    let last = snapshot.rows.len().saturating_sub(1);
                    widget
                        .viewport_near(last)
                        .context("Failed to request next page")?;
                }
                _ => {}
            }
        }
        Err::<DisplaySnapshot, anyhow::Error>(anyhow!("Widget stopped before results settled"))
    })
    .await;

    widget.shutdown().await;

    match collected {
        Ok(result) => result,
        Err(_) => Err(anyhow!("Timed out after {:?} waiting for results", budget)),
    }
}

/// Print a settled snapshot, one formatted row per line or as JSON
pub fn write_snapshot<W: Write>(
    out: &mut W,
    snapshot: &DisplaySnapshot,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, snapshot)
            .context("Failed to serialize results")?;
        writeln!(out)?;
        return Ok(());
    }

    for row in &snapshot.rows {
        writeln!(out, "{}", format_row(row, CLI_ROW_WIDTH))?;
    }
    Ok(())
}
