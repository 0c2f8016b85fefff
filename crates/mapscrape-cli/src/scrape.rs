//! Browser lifecycle and the per-query loop.
//!
//! The browser is always closed, even when a query fails, so a failed run
//! does not leave a Chromium process behind.

use anyhow::Context;
use mapscrape_core::{AppConfig, Target};
use mapscrape_export::Exporter;
use mapscrape_scraper::{
    ChromeBrowser, FixedSettle, PageClient, Progress, QueryReport, ScrapeSession, SessionOptions,
};

/// Launch Chromium, run every query in order, export each one, close the
/// browser.
///
/// # Errors
///
/// Returns an error if the browser cannot be launched, the search page
/// cannot be loaded, a query cannot be submitted, or an export fails.
/// Individual listings that fail are logged and skipped.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    queries: &[String],
    target: Target,
) -> anyhow::Result<()> {
    let browser = ChromeBrowser::launch(config.headless, config.chrome_path.as_deref())
        .await
        .context("failed to launch Chromium")?;

    let result = match browser.new_page().await.context("failed to open a tab") {
        Ok(page) => scrape_on(&page, config, queries, target).await.map(|_| ()),
        Err(e) => Err(e),
    };

    if let Err(e) = browser.close().await {
        tracing::warn!(error = %e, "failed to close browser");
    }
    result
}

/// Open the search page on `page` and run every query, writing each
/// query's spreadsheets under `config.output_dir`.
pub(crate) async fn scrape_on<P>(
    page: &P,
    config: &AppConfig,
    queries: &[String],
    target: Target,
) -> anyhow::Result<Vec<QueryReport>>
where
    P: PageClient,
{
    let session = ScrapeSession::new(
        page,
        FixedSettle::new(config.settle),
        SessionOptions::from_config(config, target),
    );
    let exporter = Exporter::new(&config.output_dir);

    session
        .open()
        .await
        .with_context(|| format!("failed to load {}", config.search_url))?;

    let reports = session
        .run_with_progress(queries, &exporter, |event| println!("{}", progress_line(event)))
        .await
        .context("scrape stopped")?;

    println!("{}", summary_line(&reports));
    Ok(reports)
}

fn progress_line(event: Progress<'_>) -> String {
    match event {
        Progress::Started { index, query } => format!("-----\n{index} - {query}"),
        Progress::Finished { report, .. } => {
            let files: String = report
                .files
                .iter()
                .map(|file| format!("\n  wrote {}", file.display()))
                .collect();
            format!(
                "{} records from {} listings ({}), {} skipped{files}",
                report.extracted, report.listings, report.outcome, report.failed
            )
        }
    }
}

fn summary_line(reports: &[QueryReport]) -> String {
    let records: usize = reports.iter().map(|r| r.extracted).sum();
    let skipped: usize = reports.iter().map(|r| r.failed).sum();
    format!(
        "done: {} queries, {records} records, {skipped} listings skipped",
        reports.len()
    )
}

#[cfg(test)]
#[path = "scrape_test.rs"]
mod tests;
