//! Markdown label-table parsing.
//!
//! Label documents list the standardized labels as a markdown table with the
//! label name in the first column and a `#rrggbb` color in the second. Two
//! parsing strategies exist in the wild and both are supported: a heuristic
//! scan that accepts any pipe row carrying a `#` color cell, and a stricter
//! scan anchored on a literal header line.

use serde::{Deserialize, Serialize};

/// One parsed table row. Ephemeral; discarded once the containing check is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelRow {
    pub name: String,
    pub color: String,
}

/// Strategy for recognizing label rows in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseMode {
    /// Accept any pipe-delimited row whose second cell starts with `#`.
    Heuristic,
    /// Require the configured header line first and stop at the first blank line.
    HeaderAnchored,
}

/// Extract label rows from document text.
///
/// Malformed rows are skipped silently in both modes; a bad table yields an
/// undercount, never an error. `table_header` is only consulted in
/// [`ParseMode::HeaderAnchored`].
pub fn parse_label_table(content: &str, mode: ParseMode, table_header: &str) -> Vec<LabelRow> {
    match mode {
        ParseMode::Heuristic => parse_heuristic(content),
        ParseMode::HeaderAnchored => parse_header_anchored(content, table_header),
    }
}

fn parse_heuristic(content: &str) -> Vec<LabelRow> {
    let mut rows = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if !line.starts_with('|') || !line.contains('#') || line.contains("---") {
            continue;
        }

        let cells = split_row(line);
        if cells.len() >= 2 && !cells[0].is_empty() && cells[1].starts_with('#') {
            rows.push(LabelRow {
                name: cells[0].to_string(),
                color: cells[1].to_string(),
            });
        }
    }

    rows
}

fn parse_header_anchored(content: &str, table_header: &str) -> Vec<LabelRow> {
    let mut rows = Vec::new();
    let mut in_table = false;

    for line in content.lines() {
        if line.contains(table_header) {
            in_table = true;
            continue;
        }
        if !in_table {
            continue;
        }
        if line.trim().is_empty() {
            break;
        }
        if line.starts_with('|') && !line.contains("---") {
            let cells = split_row(line);
            // Rows need at least name, color and description cells.
            if cells.len() >= 3 {
                rows.push(LabelRow {
                    name: cells[0].to_string(),
                    color: cells[1].to_string(),
                });
            }
        }
    }

    rows
}

/// Split a pipe row into trimmed cells, dropping the outer pipes.
fn split_row(line: &str) -> Vec<&str> {
    line.trim()
        .trim_matches('|')
        .split('|')
        .map(str::trim)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "| 标签名称 | 颜色值 | 描述 |";

    #[test]
    fn test_heuristic_parses_basic_row() {
        let rows = parse_label_table("| bug | #d73a4a | desc |", ParseMode::Heuristic, "");
        assert_eq!(
            rows,
            vec![LabelRow {
                name: "bug".to_string(),
                color: "#d73a4a".to_string(),
            }]
        );
    }

    #[test]
    fn test_heuristic_ignores_separator_rows() {
        let content = "| name | color |\n|---|---|\n| bug | #d73a4a |";
        let rows = parse_label_table(content, ParseMode::Heuristic, "");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "bug");
    }

    #[test]
    fn test_heuristic_requires_hash_prefixed_color_cell() {
        let content = "| bug | d73a4a |\n| feature | red #1 |\n| docs | #0075ca |";
        let rows = parse_label_table(content, ParseMode::Heuristic, "");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "docs");
    }

    #[test]
    fn test_heuristic_skips_rows_with_empty_name() {
        let rows = parse_label_table("| | #d73a4a |", ParseMode::Heuristic, "");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_header_anchored_requires_header() {
        let content = "| bug | #d73a4a | red |\n| docs | #0075ca | blue |";
        let rows = parse_label_table(content, ParseMode::HeaderAnchored, HEADER);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_header_anchored_stops_at_blank_line() {
        let content = format!(
            "{HEADER}\n|---|---|---|\n| bug | #d73a4a | red |\n\n| stray | #ffffff | after |"
        );
        let rows = parse_label_table(&content, ParseMode::HeaderAnchored, HEADER);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "bug");
        assert_eq!(rows[0].color, "#d73a4a");
    }

    #[test]
    fn test_header_anchored_requires_three_cells() {
        let content = format!("{HEADER}\n| bug | #d73a4a |\n| docs | #0075ca | blue |");
        let rows = parse_label_table(&content, ParseMode::HeaderAnchored, HEADER);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "docs");
    }

    #[test]
    fn test_twelve_rows_parse_as_twelve() {
        let mut content = String::new();
        for i in 0..12 {
            content.push_str(&format!("| label-{i} | #00000{i:x} | desc |\n"));
        }
        let rows = parse_label_table(&content, ParseMode::Heuristic, "");
        assert_eq!(rows.len(), 12);
    }
}
