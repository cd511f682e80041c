//! Text and JSON rendering of previews and analyses

use benford_io::{ColumnAnalysis, CsvTable, Preview};
use benford_stats::{BenfordAnalysis, Digit, SignificanceLevel};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;

/// Preview plus what was detected while loading the file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport<'a> {
    pub filename: &'a str,
    pub encoding: &'a str,
    pub delimiter: String,
    #[serde(flatten)]
    pub preview: Preview,
}

impl<'a> PreviewReport<'a> {
    pub fn new(table: &'a CsvTable) -> Self {
        Self {
            filename: table.filename(),
            encoding: table.encoding().name(),
            delimiter: table.dialect().delimiter_name(),
            preview: table.preview(),
        }
    }
}

/// Pretty-printed JSON
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(value)
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right(content: impl ToString) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}

pub fn preview_text(report: &PreviewReport<'_>) -> String {
    let preview = &report.preview;
    let mut out = format!(
        "{} ({}, delimiter '{}')\n{} rows, {} discarded\n",
        report.filename, report.encoding, report.delimiter, preview.num_rows, preview.num_discarded
    );

    let viable = &preview.viable_column_indices;
    if viable.is_empty() {
        out.push_str("No numeric columns found\n");
    } else {
        let list: Vec<String> = viable.iter().map(usize::to_string).collect();
        out.push_str(&format!("Numeric columns: {}\n", list.join(", ")));
    }

    if let Some((header, body)) = preview.preview_data.split_first() {
        let mut table = new_table();
        table.set_header(header.iter().enumerate().map(|(i, name)| {
            if viable.contains(&i) {
                format!("{name} [{i}]")
            } else {
                name.clone()
            }
        }));
        for row in body {
            table.add_row(row);
        }
        out.push_str(&table.to_string());
        out.push('\n');
    }

    out
}

/// Digit table and verdicts for one analysis
///
/// `highlight` picks the level named in the summary line; every level is
/// still listed.
pub fn analysis_text(title: &str, analysis: &BenfordAnalysis, highlight: SignificanceLevel) -> String {
    let mut out = format!(
        "{title}\n{} values analysed, {} discarded\n",
        analysis.n, analysis.discarded
    );

    let proportions = analysis.observed_distribution.proportions();
    let mut digits = new_table();
    digits.set_header(vec!["Digit", "Expected", "Observed", "Observed %", "Benford %"]);
    for d in Digit::all() {
        let expected = analysis.expected_distribution.get(d);
        let benford = benford_stats::benford(d);
        digits.add_row(vec![
            right(d),
            right(format!("{expected:.2}")),
            right(analysis.observed_distribution.get(d)),
            right(format!("{:.1}", proportions.get(d) * 100.0)),
            right(format!("{:.1}", benford * 100.0)),
        ]);
    }
    out.push_str(&digits.to_string());
    out.push('\n');

    let mut levels = new_table();
    levels.set_header(vec!["Significance", "Critical value", "Rejected"]);
    for (level, critical) in analysis.critical_values.iter() {
        let rejected = if analysis.rejected_at(level) { "yes" } else { "no" };
        levels.add_row(vec![
            right(level),
            right(format!("{critical:.3}")),
            Cell::new(rejected),
        ]);
    }
    out.push_str(&format!("Chi-square: {:.3}\n", analysis.test_statistic));
    out.push_str(&levels.to_string());
    out.push('\n');

    let verdict = if analysis.rejected_at(highlight) {
        "does not follow"
    } else {
        "is consistent with"
    };
    out.push_str(&format!(
        "At significance {highlight} the data {verdict} Benford's Law\n"
    ));

    out
}

pub fn column_text(column: &ColumnAnalysis, highlight: SignificanceLevel) -> String {
    let title = format!("Column {} ({})", column.index, column.name);
    analysis_text(&title, &column.analysis, highlight)
}
