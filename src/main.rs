//! searchbox - debounced, paginated search-as-you-type
//!
//! Command-line usage:
//!   searchbox                    - Interactive search in the terminal
//!   searchbox --query <text>     - Print the first page of results and exit
//!   searchbox -q <text> --pages 3 --json

use anyhow::Context;
use clap::Parser;
use searchbox::cli::{collect_pages, write_snapshot, Cli};
use searchbox::fetcher::HttpPageFetcher;
use std::fs::File;
use std::io;
use std::sync::Arc;

/// Logs go to `--log-file` when given. Without one, the one-shot mode logs
/// warnings to stderr and the TUI stays silent so it does not garble the screen.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let default_filter = if cli.query.is_some() || cli.log_file.is_some() {
        "warn"
    } else {
        "off"
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = cli.to_config();
    config.validate().context("Invalid configuration")?;

    match &cli.query {
        Some(query) => {
            log::info!(
                "Searching '{}' against {} ({} page(s) of {})",
                query,
                config.endpoint,
                cli.pages,
                config.page_size
            );
            let fetcher =
                HttpPageFetcher::from_config(&config).context("Failed to build HTTP client")?;
            let snapshot = collect_pages(Arc::new(fetcher), &config, query, cli.pages).await?;
            log::info!(
                "Search completed with {} of {} results",
                snapshot.rows.len(),
                snapshot.total
            );

            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_snapshot(&mut out, &snapshot, cli.json)?;
        }
        None => searchbox::tui::run_tui(config).await?,
    }

    Ok(())
}
