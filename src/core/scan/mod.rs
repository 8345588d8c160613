//! # Scan Module
//!
//! Drives a catalog lister page-by-page through the deduplicator and
//! finalizes the report once pagination is exhausted.
//!
//! One scan is a single logical thread of control: pages are fetched and
//! ingested strictly sequentially, because remote pagination is stateful
//! (continuation token) and grouping needs a globally consistent index.
//! Multiple scans for different accounts run concurrently in separate
//! runner/deduplicator instances with nothing shared.

use crate::core::catalog::{CatalogLister, PageToken, Pages};
use crate::core::dedup::{Deduplicator, FirstSeen, KeeperPolicy};
use crate::core::report::ScanReport;
use crate::error::Result;
use crate::events::{null_sender, Event, EventSender, ListEvent, ScanEvent, ScanSummary};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use uuid::Uuid;

/// Result of a completed scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// The finalized report.
    pub report: ScanReport,
    /// Pages fetched during this run.
    pub pages_fetched: usize,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// The continuation token that fetched the final page, or `None` when
    /// the run began at the first page and never advanced past it.
    ///
    /// Tokens are opaque and stable, so a caller may persist this and hand
    /// it to [`ScanRunnerBuilder::resume_from`] to re-list from the final
    /// page in a later scan.
    pub last_token: Option<PageToken>,
}

/// Builder for scan runners
pub struct ScanRunnerBuilder {
    page_delay: Option<Duration>,
    resume_from: Option<PageToken>,
    policy: Option<Arc<dyn KeeperPolicy>>,
}

impl ScanRunnerBuilder {
    pub fn new() -> Self {
        Self {
            page_delay: None,
            resume_from: None,
            policy: None,
        }
    }

    /// Sleep this long between page fetches. Useful to respect a remote
    /// service's rate limits; the lister itself holds no timer.
    pub fn page_delay(mut self, delay: Duration) -> Self {
        self.page_delay = Some(delay);
        self
    }

    /// Start listing from a previously saved continuation token instead of
    /// the first page.
    pub fn resume_from(mut self, token: PageToken) -> Self {
        self.resume_from = Some(token);
        self
    }

    /// Set the keeper policy (default: first-seen).
    pub fn policy(mut self, policy: Arc<dyn KeeperPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn build(self) -> ScanRunner {
        ScanRunner {
            page_delay: self.page_delay,
            resume_from: self.resume_from,
            policy: self.policy.unwrap_or_else(|| Arc::new(FirstSeen)),
        }
    }
}

impl Default for ScanRunnerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs one scan: fetch, ingest, finalize.
pub struct ScanRunner {
    page_delay: Option<Duration>,
    resume_from: Option<PageToken>,
    policy: Arc<dyn KeeperPolicy>,
}

impl ScanRunner {
    /// Create a new scan runner builder
    pub fn builder() -> ScanRunnerBuilder {
        ScanRunnerBuilder::new()
    }

    /// Run the scan without events
    pub fn run(&self, lister: &mut dyn CatalogLister) -> Result<ScanOutcome> {
        self.run_with_events(lister, &null_sender())
    }

    /// Run the scan with event reporting.
    ///
    /// A fetch error aborts immediately: the error propagates and no
    /// report, partial or otherwise, is produced.
    pub fn run_with_events(
        &self,
        lister: &mut dyn CatalogLister,
        events: &EventSender,
    ) -> Result<ScanOutcome> {
        let scan_id = Uuid::new_v4();
        let start = Instant::now();
        let mut dedup = Deduplicator::with_policy(Arc::clone(&self.policy));

        events.send(Event::Scan(ScanEvent::Started { scan_id }));
        events.send(Event::List(ListEvent::Started {
            resume_token: self.resume_from.as_ref().map(|t| t.as_str().to_string()),
        }));
        info!(%scan_id, "scan started");

        let mut pages_fetched = 0usize;
        // Token that fetched the most recent page / token for the one after it.
        let mut last_token = self.resume_from.clone();
        let mut upcoming = self.resume_from.clone();
        let mut pages = Pages::resume(lister, self.resume_from.clone());

        loop {
            let page = match pages.next() {
                Some(Ok(page)) => page,
                Some(Err(e)) => {
                    events.send(Event::List(ListEvent::Failed {
                        page_index: pages_fetched,
                        message: e.to_string(),
                    }));
                    events.send(Event::Scan(ScanEvent::Failed {
                        scan_id,
                        message: e.to_string(),
                    }));
                    return Err(e.into());
                }
                None => break,
            };

            last_token = upcoming.clone();
            upcoming = page.next_token.clone();

            let more_pages = page.next_token.is_some();
            dedup.ingest(&page.records)?;
            debug!(
                %scan_id,
                page = pages_fetched,
                records = page.records.len(),
                "page ingested"
            );
            events.send(Event::List(ListEvent::PageFetched {
                page_index: pages_fetched,
                records: page.records.len(),
                total_records: dedup.total_files_scanned(),
            }));
            pages_fetched += 1;

            if more_pages {
                if let Some(delay) = self.page_delay {
                    std::thread::sleep(delay);
                }
            }
        }

        events.send(Event::List(ListEvent::Completed {
            pages: pages_fetched,
            total_records: dedup.total_files_scanned(),
        }));

        let report = dedup.finalize();
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            %scan_id,
            total = report.total_files_scanned,
            reapable = report.reapable_file_count,
            bytes = report.reapable_bytes,
            "scan completed"
        );
        events.send(Event::Scan(ScanEvent::Completed {
            scan_id,
            summary: ScanSummary {
                total_files_scanned: report.total_files_scanned,
                duplicate_groups: report.groups.len(),
                reapable_files: report.reapable_file_count,
                reapable_bytes: report.reapable_bytes,
                duration_ms,
            },
        }));

        Ok(ScanOutcome {
            report,
            pages_fetched,
            duration_ms,
            last_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::{FileRecord, StaticCatalog};
    use crate::error::ReaperError;

    fn rec(id: &str, checksum: &str, size: u64) -> FileRecord {
        FileRecord::new(id, format!("{id}.dat"), checksum, size)
    }

    #[test]
    fn scan_over_multiple_pages_matches_single_page() {
        let runner = ScanRunner::builder().build();

        let mut paged = StaticCatalog::new(vec![
            vec![rec("A", "x", 100), rec("B", "x", 100)],
            vec![rec("C", "y", 50)],
        ]);
        let mut single =
            StaticCatalog::single_page(vec![rec("A", "x", 100), rec("B", "x", 100), rec("C", "y", 50)]);

        let from_pages = runner.run(&mut paged).unwrap();
        let from_single = runner.run(&mut single).unwrap();

        assert_eq!(from_pages.report, from_single.report);
        assert_eq!(from_pages.pages_fetched, 2);
        assert_eq!(from_single.pages_fetched, 1);
    }

    #[test]
    fn transport_error_aborts_with_no_report() {
        let runner = ScanRunner::builder().build();
        let mut catalog = StaticCatalog::failing_at(
            vec![vec![rec("A", "x", 100)], vec![rec("B", "x", 100)]],
            1,
        );

        let result = runner.run(&mut catalog);

        assert!(matches!(result, Err(ReaperError::List(_))));
    }

    #[test]
    fn scan_emits_lifecycle_events() {
        use crate::events::EventChannel;

        let runner = ScanRunner::builder().build();
        let mut catalog = StaticCatalog::new(vec![
            vec![rec("A", "x", 100)],
            vec![rec("B", "x", 100)],
        ]);
        let (sender, receiver) = EventChannel::new();

        runner.run_with_events(&mut catalog, &sender).unwrap();
        drop(sender);

        let events: Vec<_> = receiver.iter().collect();

        assert!(matches!(events.first(), Some(Event::Scan(ScanEvent::Started { .. }))));
        assert!(matches!(events.last(), Some(Event::Scan(ScanEvent::Completed { .. }))));

        let pages = events
            .iter()
            .filter(|e| matches!(e, Event::List(ListEvent::PageFetched { .. })))
            .count();
        assert_eq!(pages, 2);
    }

    #[test]
    fn failed_scan_emits_failure_events() {
        use crate::events::EventChannel;

        let runner = ScanRunner::builder().build();
        let mut catalog = StaticCatalog::failing_at(vec![vec![rec("A", "x", 100)]], 0);
        let (sender, receiver) = EventChannel::new();

        let result = runner.run_with_events(&mut catalog, &sender);
        drop(sender);

        assert!(result.is_err());
        let events: Vec<_> = receiver.iter().collect();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::Scan(ScanEvent::Failed { .. }))));
    }

    #[test]
    fn resume_from_token_skips_earlier_pages() {
        let mut catalog = StaticCatalog::new(vec![
            vec![rec("A", "x", 100)],
            vec![rec("B", "x", 100), rec("C", "x", 100)],
        ]);

        let runner = ScanRunner::builder()
            .resume_from(crate::core::catalog::PageToken::new("1"))
            .build();

        let outcome = runner.run(&mut catalog).unwrap();

        // Only the resumed page was scanned: B and C duplicate each other.
        assert_eq!(outcome.report.total_files_scanned, 2);
        assert_eq!(outcome.report.reapable_file_count, 1);
        assert_eq!(outcome.pages_fetched, 1);
    }

    #[test]
    fn last_token_round_trips_into_resume() {
        let pages = vec![
            vec![rec("A", "x", 100)],
            vec![rec("B", "x", 100)],
            vec![rec("C", "x", 100), rec("D", "x", 100)],
        ];
        let runner = ScanRunner::builder().build();

        let mut catalog = StaticCatalog::new(pages.clone());
        let outcome = runner.run(&mut catalog).unwrap();

        // The final page was fetched with token "2"; a single fresh page
        // carries no token at all.
        assert_eq!(outcome.last_token, Some(PageToken::new("2")));
        let mut single = StaticCatalog::single_page(vec![rec("A", "x", 100)]);
        assert_eq!(runner.run(&mut single).unwrap().last_token, None);

        // Persisting the token and resuming re-lists exactly the final page.
        let resumed = ScanRunner::builder()
            .resume_from(outcome.last_token.unwrap())
            .build();
        let mut catalog = StaticCatalog::new(pages);
        let outcome = resumed.run(&mut catalog).unwrap();

        assert_eq!(outcome.pages_fetched, 1);
        assert_eq!(outcome.report.total_files_scanned, 2);
        assert_eq!(outcome.last_token, Some(PageToken::new("2")));
    }

    #[test]
    fn empty_catalog_produces_empty_report() {
        let runner = ScanRunner::builder().build();
        let mut catalog = StaticCatalog::single_page(vec![]);

        let outcome = runner.run(&mut catalog).unwrap();

        assert_eq!(outcome.report.total_files_scanned, 0);
        assert!(!outcome.report.has_duplicates());
    }
}
