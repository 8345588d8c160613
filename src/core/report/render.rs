//! Text and HTML rendering of scan reports.
//!
//! Produces the message bodies handed to the notification boundary. Both
//! renderers are pure functions of the report (plus optional quota
//! figures); the generation timestamp is the only ambient input.

use super::{ScanReport, StorageQuota};
use humansize::{format_size, DECIMAL};

/// Render a plain-text report body.
pub fn render_text(report: &ScanReport, quota: Option<&StorageQuota>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "You have {} of duplicate files\n\n",
        format_size(report.reapable_bytes, DECIMAL)
    ));
    out.push_str(&format!(
        "Drive Reaper scanned {} files and found {} that are duplicates.\n",
        report.total_files_scanned, report.reapable_file_count
    ));

    if let Some(quota) = quota {
        out.push_str(&format!(
            "You are using {} of your total {} quota.\n",
            format_size(quota.used_bytes, DECIMAL),
            format_size(quota.total_bytes, DECIMAL)
        ));
    }

    if !report.groups.is_empty() {
        out.push_str("\nDuplicate files that would be trashed:\n");
        for group in &report.groups {
            out.push_str(&format!(
                "  {} ({}) - keeping {}\n",
                group.kept.title,
                format_size(group.size, DECIMAL),
                group.kept.id
            ));
            for entry in &group.reapable {
                out.push_str(&format!("    - {} ({})\n", entry.title, entry.id));
            }
        }
    }

    if !report.checksum_size_conflicts.is_empty() {
        out.push_str("\nWarning: these checksums were reported with conflicting sizes\n");
        out.push_str("and were kept in separate groups:\n");
        for checksum in &report.checksum_size_conflicts {
            out.push_str(&format!("  {checksum}\n"));
        }
    }

    out.push_str(&format!(
        "\nGenerated {}\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));

    out
}

/// Render a standalone HTML report body.
pub fn render_html(report: &ScanReport, quota: Option<&StorageQuota>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Drive Reaper Report</title>
<style>
    body {{ font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; padding: 2rem; }}
    .stat {{ font-weight: bold; }}
    .group {{ margin-bottom: 1rem; }}
    .kept {{ color: #22c55e; }}
    .warning {{ color: #f59e0b; }}
    footer {{ color: #a0a0a0; font-size: 0.875rem; margin-top: 2rem; }}
</style>
</head>
<body>
<h1>You have {} of duplicate files</h1>

<p><b>Drive Reaper</b> has scanned <span class="stat">{}</span> files and found
<span class="stat">{}</span> that are duplicates.</p>
"#,
        escape(&format_size(report.reapable_bytes, DECIMAL)),
        report.total_files_scanned,
        report.reapable_file_count
    ));

    if let Some(quota) = quota {
        out.push_str(&format!(
            "<p>You are using <b>{}</b> of your total {} quota.</p>\n",
            escape(&format_size(quota.used_bytes, DECIMAL)),
            escape(&format_size(quota.total_bytes, DECIMAL))
        ));
    }

    if !report.groups.is_empty() {
        out.push_str("<h2>Duplicate files that would be trashed</h2>\n");
        for group in &report.groups {
            out.push_str(&format!(
                "<div class=\"group\"><span class=\"kept\">Keeping</span> {} ({})<ul>\n",
                escape(&group.kept.title),
                escape(&format_size(group.size, DECIMAL))
            ));
            for entry in &group.reapable {
                out.push_str(&format!(
                    "<li>{} <small>{}</small></li>\n",
                    escape(&entry.title),
                    escape(entry.id.as_str())
                ));
            }
            out.push_str("</ul></div>\n");
        }
    }

    if !report.checksum_size_conflicts.is_empty() {
        out.push_str(
            "<p class=\"warning\">Some checksums were reported with conflicting sizes \
             and were kept in separate groups:</p>\n<ul>\n",
        );
        for checksum in &report.checksum_size_conflicts {
            out.push_str(&format!("<li>{}</li>\n", escape(checksum)));
        }
        out.push_str("</ul>\n");
    }

    out.push_str(&format!(
        "<footer>Generated by Drive Reaper, {}</footer>\n</body>\n</html>\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    ));

    out
}

/// Minimal HTML escaping for untrusted file titles.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::FileId;
    use crate::core::report::{FileEntry, GroupSummary};

    fn sample_report() -> ScanReport {
        ScanReport {
            total_files_scanned: 1000,
            reapable_file_count: 3,
            reapable_bytes: 5_000_000,
            reapable_file_ids: vec![FileId::new("B"), FileId::new("C"), FileId::new("E")],
            groups: vec![GroupSummary {
                checksum: "x".to_string(),
                size: 2_500_000,
                kept: FileEntry {
                    id: FileId::new("A"),
                    title: "holiday.mp4".to_string(),
                },
                reapable: vec![
                    FileEntry {
                        id: FileId::new("B"),
                        title: "holiday (1).mp4".to_string(),
                    },
                    FileEntry {
                        id: FileId::new("C"),
                        title: "holiday copy.mp4".to_string(),
                    },
                ],
            }],
            checksum_size_conflicts: Vec::new(),
        }
    }

    #[test]
    fn text_report_includes_counts_and_bytes() {
        let text = render_text(&sample_report(), None);

        assert!(text.contains("1000 files"));
        assert!(text.contains("3 that are duplicates"));
        assert!(text.contains("5 MB"));
    }

    #[test]
    fn text_report_lists_reapable_titles() {
        let text = render_text(&sample_report(), None);

        assert!(text.contains("holiday (1).mp4"));
        assert!(text.contains("holiday copy.mp4"));
    }

    #[test]
    fn text_report_includes_quota_when_present() {
        let quota = StorageQuota {
            used_bytes: 7_000_000_000,
            total_bytes: 15_000_000_000,
        };

        let text = render_text(&sample_report(), Some(&quota));

        assert!(text.contains("7 GB"));
        assert!(text.contains("15 GB"));
    }

    #[test]
    fn text_report_omits_quota_when_absent() {
        let text = render_text(&sample_report(), None);
        assert!(!text.contains("quota"));
    }

    #[test]
    fn html_report_is_a_full_document() {
        let html = render_html(&sample_report(), None);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Drive Reaper"));
    }

    #[test]
    fn html_report_escapes_titles() {
        let mut report = sample_report();
        report.groups[0].kept.title = "<script>alert(1)</script>".to_string();

        let html = render_html(&report, None);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn conflicting_checksums_are_called_out() {
        let mut report = sample_report();
        report.checksum_size_conflicts = vec!["deadbeef".to_string()];

        let text = render_text(&report, None);
        let html = render_html(&report, None);

        assert!(text.contains("deadbeef"));
        assert!(html.contains("deadbeef"));
    }
}
