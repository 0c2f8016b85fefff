//! Per-query orchestration: search, collect, extract, hand off for export.

use std::path::PathBuf;
use std::time::Duration;

use mapscrape_core::{AppConfig, ResultSet, Target};

use crate::collector::{CollectOutcome, ListingCollector};
use crate::error::ScraperError;
use crate::extract::FieldExtractor;
use crate::locators::{FieldLocators, LISTING_ANCHOR, SEARCH_BOX};
use crate::page::{Locator, PageClient};
use crate::settle::{SettlePhase, SettlePolicy};

/// Receives each query's finished [`ResultSet`].
///
/// The set is lent read-only and must not be retained.
pub trait ResultSink {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persists `results` and returns the paths written.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the session treats any error as fatal.
    fn write(&self, results: &ResultSet) -> Result<Vec<PathBuf>, Self::Error>;
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub search_url: String,
    pub nav_timeout: Duration,
    pub search_box: Locator,
    pub listing: Locator,
    pub scroll_step_px: f64,
    pub target: Target,
}

impl SessionOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig, target: Target) -> Self {
        Self {
            search_url: config.search_url.clone(),
            nav_timeout: Duration::from_secs(config.nav_timeout_secs),
            search_box: Locator::xpath(SEARCH_BOX),
            listing: Locator::xpath(LISTING_ANCHOR),
            scroll_step_px: config.scroll_step_px,
            target,
        }
    }
}

/// Summary of one query's run.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReport {
    pub query: String,
    /// Listing handles returned by the collector.
    pub listings: usize,
    /// Records successfully extracted.
    pub extracted: usize,
    /// Listings skipped because extraction failed.
    pub failed: usize,
    pub outcome: CollectOutcome,
    /// Files written by the sink; empty until the set is exported.
    pub files: Vec<PathBuf>,
}

/// Per-query events reported by [`ScrapeSession::run_with_progress`].
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    /// About to submit the query at `index`.
    Started { index: usize, query: &'a str },
    /// The query at `index` was scraped and its results written.
    Finished { index: usize, report: &'a QueryReport },
}

/// Drives one page through a sequence of queries.
///
/// Strictly sequential: one query at a time, one listing at a time, and
/// every page call is awaited before the next is issued.
pub struct ScrapeSession<'a, P, S> {
    page: &'a P,
    settle: S,
    collector: ListingCollector,
    extractor: FieldExtractor,
    options: SessionOptions,
}

impl<'a, P, S> ScrapeSession<'a, P, S>
where
    P: PageClient,
    S: SettlePolicy,
{
    #[must_use]
    pub fn new(page: &'a P, settle: S, options: SessionOptions) -> Self {
        let collector = ListingCollector::new(options.listing.clone(), options.scroll_step_px);
        Self {
            page,
            settle,
            collector,
            extractor: FieldExtractor::new(FieldLocators::google_maps()),
            options,
        }
    }

    #[must_use]
    pub fn with_field_locators(mut self, locators: FieldLocators) -> Self {
        self.extractor = FieldExtractor::new(locators);
        self
    }

    /// Loads the search page.
    ///
    /// # Errors
    ///
    /// Returns the page error if navigation fails or exceeds the timeout.
    pub async fn open(&self) -> Result<(), ScraperError> {
        tracing::info!(url = %self.options.search_url, "opening search page");
        self.page
            .goto(&self.options.search_url, self.options.nav_timeout)
            .await?;
        self.settle.settle(SettlePhase::Navigation).await;
        Ok(())
    }

    /// Runs one query and returns its records.
    ///
    /// Listings that fail extraction are logged and skipped; the returned
    /// set only holds complete records.
    ///
    /// # Errors
    ///
    /// Returns an error if submitting the query or collecting listings
    /// fails. Per-listing errors are not propagated.
    pub async fn scrape_query(
        &self,
        query: &str,
    ) -> Result<(ResultSet, QueryReport), ScraperError> {
        let query = query.trim();

        self.page.fill(&self.options.search_box, query).await?;
        self.settle.settle(SettlePhase::QueryFill).await;
        self.page.press_key("Enter").await?;
        self.settle.settle(SettlePhase::QuerySubmit).await;

        let collected = self
            .collector
            .collect(self.page, &self.settle, self.options.target)
            .await?;

        let mut results = ResultSet::new(query);
        let mut failed = 0usize;

        for (index, listing) in collected.listings.iter().enumerate() {
            match self
                .extractor
                .extract_listing(self.page, &self.settle, listing)
                .await
            {
                Ok(business) => {
                    tracing::debug!(query, index, name = %business.name, "extracted listing");
                    results.push(business);
                }
                Err(e) => {
                    failed += 1;
                    tracing::warn!(query, index, error = %e, "skipping listing");
                }
            }
        }

        let report = QueryReport {
            query: query.to_owned(),
            listings: collected.listings.len(),
            extracted: results.len(),
            failed,
            outcome: collected.outcome,
            files: Vec::new(),
        };
        Ok((results, report))
    }

    /// Runs every query in order, exporting each set before the next query
    /// starts.
    ///
    /// # Errors
    ///
    /// Returns the first query-level or export error; queries after it are
    /// not run.
    pub async fn run<K>(&self, queries: &[String], sink: &K) -> Result<Vec<QueryReport>, ScraperError>
    where
        K: ResultSink,
    {
        self.run_with_progress(queries, sink, |_| {}).await
    }

    /// [`Self::run`], calling `on_progress` before each query starts and
    /// after its results are written.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub async fn run_with_progress<K, F>(
        &self,
        queries: &[String],
        sink: &K,
        mut on_progress: F,
    ) -> Result<Vec<QueryReport>, ScraperError>
    where
        K: ResultSink,
        F: FnMut(Progress<'_>),
    {
        let mut reports = Vec::with_capacity(queries.len());

        for (index, query) in queries.iter().enumerate() {
            let trimmed = query.trim();
            tracing::info!(index, query = %trimmed, "starting query");
            on_progress(Progress::Started {
                index,
                query: trimmed,
            });

            let (results, mut report) = self.scrape_query(query).await?;
            report.files = sink.write(&results).map_err(|e| ScraperError::Export {
                query: report.query.clone(),
                source: Box::new(e),
            })?;

            tracing::info!(
                index,
                query = %report.query,
                listings = report.listings,
                extracted = report.extracted,
                failed = report.failed,
                outcome = %report.outcome,
                "query complete"
            );
            on_progress(Progress::Finished {
                index,
                report: &report,
            });
            reports.push(report);
        }

        Ok(reports)
    }
}
