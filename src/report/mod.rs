//! Rendering check results for the terminal and as JSON.
//!
//! Every function here returns a `String`; printing is left to the caller.

use chrono::Utc;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::aggregate::{group_by_category, CheckSummary};
use crate::classify::{ClassificationResult, Severity};
use crate::registry::ServiceRegistry;

/// Everything produced by one check, as emitted by `--output json`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub target: String,
    /// RFC 3339 timestamp of when the check finished.
    pub checked_at: String,
    pub summary: CheckSummary,
    pub categories: Vec<CategoryCount>,
    pub results: Vec<ClassificationResult>,
}

/// Per-category counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub total: usize,
    pub listed: usize,
    pub not_listed: usize,
}

impl CheckReport {
    pub fn new(target: impl Into<String>, results: Vec<ClassificationResult>) -> Self {
        let categories = group_by_category(&results)
            .iter()
            .map(|group| CategoryCount {
                category: group.category.clone(),
                total: group.total(),
                listed: group.listed(),
                not_listed: group.not_listed(),
            })
            .collect();

        Self {
            target: target.into(),
            checked_at: Utc::now().to_rfc3339(),
            summary: CheckSummary::from_results(&results),
            categories,
            results,
        }
    }

    pub fn any_listed(&self) -> bool {
        self.summary.listed > 0
    }

    /// "Found N out of M services listing the target"
    pub fn overall_line(&self) -> String {
        format!(
            "Found {} out of {} services listing the target",
            self.summary.listed, self.summary.total
        )
    }

    /// Results table, category summary and overall line.
    pub fn render_table(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("DNSBL Check Results for {}\n", self.target));
        let rows: Vec<[String; 4]> = self
            .results
            .iter()
            .map(|r| {
                [
                    r.service_name.clone(),
                    r.description.clone(),
                    r.status.to_string(),
                    display_details(r),
                ]
            })
            .collect();
        let severities: Vec<Severity> = self.results.iter().map(|r| r.display_severity()).collect();
        out.push_str(&render_grid(
            ["Service", "Description", "Status", "Details"],
            &rows,
            |row, col, cell| {
                if col == 2 {
                    paint(cell, severities[row])
                } else if col == 0 {
                    cell.cyan()
                } else {
                    cell.normal()
                }
            },
        ));

        out.push_str("\nCategory Summary\n");
        let rows: Vec<[String; 4]> = self
            .categories
            .iter()
            .map(|c| {
                [
                    c.category.clone(),
                    c.total.to_string(),
                    c.listed.to_string(),
                    c.not_listed.to_string(),
                ]
            })
            .collect();
        out.push_str(&render_grid(
            ["Category", "Total", "Listed", "Not Listed"],
            &rows,
            |_, col, cell| match col {
                0 => cell.cyan(),
                2 => cell.red(),
                3 => cell.green(),
                _ => cell.normal(),
            },
        ));

        let overall = self.overall_line();
        out.push('\n');
        if self.any_listed() {
            out.push_str(&overall.red().bold().to_string());
        } else {
            out.push_str(&overall.green().bold().to_string());
        }
        out.push('\n');
        out
    }

    /// Pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Details column: the matched return-code label when there is one,
/// otherwise the full details sentence.
pub fn display_details(result: &ClassificationResult) -> String {
    result
        .reason
        .clone()
        .unwrap_or_else(|| result.details.clone())
}

fn paint(cell: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Red => cell.red(),
        Severity::Yellow => cell.yellow(),
        Severity::Green => cell.green(),
    }
}

/// Lays out a left-aligned text grid. Padding is computed on the plain text
/// and applied before styling, so escape codes never skew column widths.
fn render_grid<const N: usize>(
    headers: [&str; N],
    rows: &[[String; N]],
    style: impl Fn(usize, usize, &str) -> ColoredString,
) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(col, h)| {
            if col + 1 == N {
                h.bold().to_string()
            } else {
                format!("{:<width$}", h, width = widths[col]).bold().to_string()
            }
        })
        .collect();
    out.push_str(&header.join("  "));
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');

    for (row_idx, row) in rows.iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let padded = if col + 1 == N {
                    cell.clone()
                } else {
                    format!("{:<width$}", cell, width = widths[col])
                };
                style(row_idx, col, &padded).to_string()
            })
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }
    out
}

/// One line per configured service, for `--list-services`.
pub fn render_services(registry: &ServiceRegistry) -> String {
    let rows: Vec<[String; 5]> = registry
        .iter()
        .map(|s| {
            [
                s.name.clone(),
                s.category.clone(),
                s.zone.clone(),
                s.kind.to_string(),
                s.description.clone(),
            ]
        })
        .collect();
    render_grid(
        ["Service", "Category", "Zone", "Handler", "Description"],
        &rows,
        |_, col, cell| if col == 0 { cell.cyan() } else { cell.normal() },
    )
}

#[cfg(test)]
mod tests;
