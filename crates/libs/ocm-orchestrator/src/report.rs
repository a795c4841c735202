//! Compatibility matrix report.
//!
//! The report is Markdown with embedded HTML: headline counters, then one
//! collapsible table per test type with senders as rows and receivers as
//! columns. Rows and columns are sorted so consecutive reports diff cleanly.
//!
//! The job list is embedded as an HTML comment so a snapshot can be fed back
//! as input, see [`jobs_from_snapshot`].

use std::fmt::Write as _;

use ocm_config::{ExpectedFailures, PlatformNames, RunContext};

use crate::{
    group::{ResultGroup, group_results},
    job::{Conclusion, JobResult},
    name::{LOGIN, is_version_token},
    prelude::*,
    summary::Summary,
};

/// Receiver columns per table.
const COLUMNS_PER_TABLE: usize = 5;
const JOBS_MARKER: &str = "<!-- ocm-matrix-jobs:";
const CELL_STYLE: &str = "border: 1px solid #ddd; padding: 4px;";

/// Run metadata and lookup tables used by the report.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub run: &'a RunContext,
    /// Human readable run time.
    pub timestamp: &'a str,
    pub expected_failures: &'a ExpectedFailures,
    pub platforms: &'a PlatformNames,
}

/// How a matrix cell is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Pass,
    AllowedFailure,
    Failure,
    NotExecuted,
}

impl Cell {
    pub fn classify(
        name: &str,
        conclusion: Conclusion,
        expected_failures: &ExpectedFailures,
    ) -> Self {
        if conclusion == Conclusion::Success {
            Cell::Pass
        } else if expected_failures.contains(name) {
            Cell::AllowedFailure
        } else {
            Cell::Failure
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Cell::Pass => "✅",
            Cell::AllowedFailure => "⚠️",
            Cell::Failure => "❌",
            Cell::NotExecuted => "—",
        }
    }

    fn style(&self) -> &'static str {
        match self {
            Cell::AllowedFailure => " background-color: yellow;",
            _ => "",
        }
    }
}

/// A result counts as passing when it succeeded or was allowed to fail.
pub fn is_passing(name: &str, conclusion: Conclusion, expected_failures: &ExpectedFailures) -> bool {
    conclusion == Conclusion::Success || expected_failures.contains(name)
}

/// Overall outcome of a run: every job passed or was allowed to fail.
pub fn all_succeeded(results: &[JobResult], expected_failures: &ExpectedFailures) -> bool {
    results
        .iter()
        .all(|result| is_passing(&result.name, result.conclusion, expected_failures))
}

/// Expand the platform part of a label: `nc sm v27` -> `Nextcloud ScienceMesh v27`.
pub fn pretty_label(label: &str, platforms: &PlatformNames) -> String {
    let tokens: Vec<&str> = label.split(' ').collect();
    let split = tokens
        .iter()
        .position(|token| is_version_token(token))
        .unwrap_or(tokens.len());
    let key = tokens[..split].join(" ");
    let platform = platforms.display_name(&key);
    if split == tokens.len() {
        platform.to_string()
    } else {
        format!("{platform} {}", tokens[split..].join(" "))
    }
}

/// Integer percentage, rounded half up. Zero when `total` is zero.
fn percentage(part: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (part * 200 + total) / (total * 2)
}

/// Render the report for `results`.
///
/// Fails when a job name cannot be parsed, as the matrix would be incomplete.
pub fn render_report(results: &[JobResult], context: &ReportContext<'_>) -> Result<Summary> {
    let groups = group_results(results)?;
    let expected = context.expected_failures;

    let total = results.len();
    let passed = results
        .iter()
        .filter(|result| is_passing(&result.name, result.conclusion, expected))
        .count();
    let failed = total - passed;

    let mut summary = Summary::new();
    summary
        .add_raw("# OCM Compatibility Matrix 🔄\n\n")
        .add_raw(format!(
            "<p><strong>Run&nbsp;time:</strong> <a href=\"{}\">{}</a><br>\
             <strong>Commit:</strong> <a href=\"{}\">{}</a></p>\n\n",
            context.run.run_url(),
            context.timestamp,
            context.run.commit_url(),
            context.run.short_sha()
        ))
        .add_raw("## Overview\n")
        .add_raw(
            "This matrix shows the compatibility status of **login**, **share-with**, \
             **share-link** and **invite-link** flows across all supported platform versions.\n\
             Each cell is the outcome of an automated end-to-end test for a specific \
             **sender to receiver** combination.\n\n",
        )
        .add_raw("## Test Results Legend 🎯\n")
        .add_raw("- ✅ **Green** - all tests passed\n")
        .add_raw("- ⚠️ **Yellow** - expected/allowed failure\n")
        .add_raw("- ❌ **Red** - unexpected failure\n")
        .add_raw("- — **Gray** - test not executed for this pair\n\n")
        .add_raw(format!(
            "<p><strong>{passed}/{total}</strong> passed &nbsp;•&nbsp; \
             <strong>{failed}</strong> failed &nbsp;•&nbsp; \
             <strong>{}%</strong> success rate</p>\n\n",
            percentage(passed, total)
        ));

    for (test_type, group) in &groups {
        render_group(&mut summary, test_type, group, context);
    }

    summary.add_raw(if all_succeeded(results, expected) {
        "🎉 **All groups succeeded!**\n"
    } else {
        "⚠️ **One or more failures detected.**\n"
    });

    let mut jobs: Vec<&str> = results.iter().map(|result| result.name.as_str()).collect();
    jobs.sort_unstable();
    summary.add_raw(format!("\n{JOBS_MARKER} {} -->\n", jobs.join(",")));

    Ok(summary)
}

fn render_group(
    summary: &mut Summary,
    test_type: &str,
    group: &ResultGroup,
    context: &ReportContext<'_>,
) {
    let expected = context.expected_failures;
    let entries = group.entries.len();
    let passed = group
        .entries
        .iter()
        .filter(|entry| is_passing(&entry.name, entry.conclusion, expected))
        .count();

    summary.add_raw(format!(
        "<details>\n<summary><strong>{test_type}</strong> - {passed}/{entries} passed&nbsp;({}%)</summary>\n\n",
        percentage(passed, entries)
    ));

    let login = test_type == LOGIN;
    let receivers: Vec<&String> = group.receivers.iter().collect();
    let rows: Vec<&str> = if login {
        vec!["Result"]
    } else {
        group.senders.iter().map(String::as_str).collect()
    };
    let total_columns = receivers.len();

    for (index, chunk) in receivers.chunks(COLUMNS_PER_TABLE).enumerate() {
        let first = index * COLUMNS_PER_TABLE + 1;
        let last = first + chunk.len() - 1;
        summary.add_raw(format!(
            "<p><em>Columns {first}-{last} of {total_columns}</em></p>"
        ));

        let mut html = String::new();
        let corner = if login {
            "Platform"
        } else {
            "Sender (Row) to Receiver (Column)"
        };
        let _ = write!(
            html,
            "<table style=\"border-collapse: collapse; width: 100%;\">\n  <thead>\n    <tr>\
             <th style=\"{CELL_STYLE}\">{corner}</th>"
        );
        for receiver in chunk {
            let _ = write!(
                html,
                "<th style=\"{CELL_STYLE}\">{}</th>",
                pretty_label(receiver, context.platforms)
            );
        }
        html.push_str("</tr>\n  </thead>\n  <tbody>\n");

        for sender in &rows {
            let _ = write!(
                html,
                "    <tr><td style=\"{CELL_STYLE}\">{}</td>",
                pretty_label(sender, context.platforms)
            );
            for receiver in chunk {
                let entry = if login {
                    group.entries.iter().find(|entry| &entry.receiver == *receiver)
                } else {
                    group.entry(sender, receiver)
                };
                let Some(entry) = entry else {
                    let _ = write!(
                        html,
                        "<td style=\"{CELL_STYLE}\">{}</td>",
                        Cell::NotExecuted.symbol()
                    );
                    continue;
                };
                let cell = Cell::classify(&entry.name, entry.conclusion, expected);
                let symbol = if entry.run_id == 0 {
                    cell.symbol().to_string()
                } else {
                    format!(
                        "<a href=\"{}\">{}</a>",
                        context.run.run_url_for(entry.run_id),
                        cell.symbol()
                    )
                };
                let _ = write!(
                    html,
                    "<td style=\"{CELL_STYLE}{}\">{symbol}</td>",
                    cell.style()
                );
            }
            html.push_str("</tr>\n");
        }
        html.push_str("  </tbody>\n</table>\n");
        summary.add_raw(html);
    }

    summary.add_raw("\n</details>\n");
}

/// Recover the job list embedded in a rendered report, if any.
pub fn jobs_from_snapshot(snapshot: &str) -> Option<Vec<String>> {
    let start = snapshot.rfind(JOBS_MARKER)? + JOBS_MARKER.len();
    let end = start + snapshot[start..].find("-->")?;
    Some(
        snapshot[start..end]
            .split(',')
            .map(str::trim)
            .filter(|job| !job.is_empty())
            .map(str::to_string)
            .collect(),
    )
}
