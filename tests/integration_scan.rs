//! Integration tests for the scan module.
//!
//! These tests verify end-to-end scan behavior including:
//! - Multi-page catalogs
//! - Snapshot files on disk
//! - Transport failures mid-scan
//! - Report rendering and delivery

use drive_reaper::core::catalog::{FileId, FileRecord, SnapshotCatalog, StaticCatalog};
use drive_reaper::core::scan::ScanRunner;
use drive_reaper::error::ReaperError;
use drive_reaper::notify::{report_message, LoggingNotifier, Notifier};
use tempfile::TempDir;

fn rec(id: &str, title: &str, checksum: &str, size: u64) -> FileRecord {
    FileRecord::new(id, title, checksum, size)
}

#[test]
fn scan_finds_duplicates_across_pages() {
    // The duplicate pair is split across two pages.
    let mut catalog = StaticCatalog::new(vec![
        vec![
            rec("A", "budget.xlsx", "aaa", 4096),
            rec("B", "notes.txt", "bbb", 128),
        ],
        vec![
            rec("C", "budget (copy).xlsx", "aaa", 4096),
            rec("D", "My Folder", "", 0),
        ],
    ]);

    let outcome = ScanRunner::builder().build().run(&mut catalog).unwrap();
    let report = outcome.report;

    assert_eq!(report.total_files_scanned, 4);
    assert_eq!(report.reapable_file_count, 1);
    assert_eq!(report.reapable_bytes, 4096);
    assert_eq!(report.reapable_file_ids, vec![FileId::new("C")]);
    assert_eq!(outcome.pages_fetched, 2);
}

#[test]
fn scan_over_snapshot_file_matches_in_memory_scan() {
    let records = vec![
        rec("A", "a.bin", "x", 100),
        rec("B", "b.bin", "x", 100),
        rec("C", "c.bin", "y", 50),
    ];

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, serde_json::to_vec(&records).unwrap()).unwrap();

    let runner = ScanRunner::builder().build();

    let mut from_disk = SnapshotCatalog::load(&path, 2).unwrap();
    let mut in_memory = StaticCatalog::single_page(records);

    let disk_report = runner.run(&mut from_disk).unwrap().report;
    let memory_report = runner.run(&mut in_memory).unwrap().report;

    assert_eq!(disk_report, memory_report);
    assert_eq!(disk_report.reapable_file_ids, vec![FileId::new("B")]);
}

#[test]
fn transport_failure_aborts_without_report() {
    let mut catalog = StaticCatalog::failing_at(
        vec![
            vec![rec("A", "a.bin", "x", 100)],
            vec![rec("B", "b.bin", "x", 100)],
        ],
        1,
    );

    let result = ScanRunner::builder().build().run(&mut catalog);

    match result {
        Err(ReaperError::List(_)) => {}
        other => panic!("expected a listing error, got {other:?}"),
    }
}

#[test]
fn checksum_less_records_never_reap() {
    // Folders and provider-native documents have no checksum.
    let mut catalog = StaticCatalog::single_page(vec![
        rec("A", "Folder One", "", 0),
        rec("B", "Folder Two", "", 0),
        rec("C", "Shared Doc", "", 0),
    ]);

    let report = ScanRunner::builder()
        .build()
        .run(&mut catalog)
        .unwrap()
        .report;

    assert_eq!(report.total_files_scanned, 3);
    assert_eq!(report.reapable_file_count, 0);
    assert!(report.reapable_file_ids.is_empty());
}

#[test]
fn rendered_report_reaches_the_notifier() {
    let mut catalog = StaticCatalog::single_page(vec![
        rec("A", "video.mp4", "v1", 1_000_000),
        rec("B", "video (1).mp4", "v1", 1_000_000),
    ]);

    let report = ScanRunner::builder()
        .build()
        .run(&mut catalog)
        .unwrap()
        .report;

    let message = report_message(&report, None);

    assert!(message.text_body.contains("video (1).mp4"));
    assert!(message
        .html_body
        .as_deref()
        .is_some_and(|html| html.contains("video (1).mp4")));
    assert!(LoggingNotifier.send("user@example.com", &message).is_ok());
}
