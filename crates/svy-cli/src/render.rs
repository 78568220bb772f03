//! Terminal rendering of analysis results with `comfy-table`.

use std::fmt::Write as _;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use svy_analysis::{
    Aggregate, ChoiceGroup, ChoiceSummary, ColumnSummary, DatasetProfile, Describe,
    HistogramPanel, NO_CHOICES_MESSAGE, Notice, NoticeLevel, Report, SegmentComparison,
    TTestPanel,
};
use svy_model::{Cell as DataCell, ColumnKind, Dataset, format_number};

/// Widest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

/// Placeholder for undefined statistics.
const UNDEFINED: &str = "-";

pub fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| format!("{v:.2}"))
}

pub fn format_percent(value: Option<f64>) -> String {
    value.map_or_else(|| UNDEFINED.to_string(), |v| format!("{v:.1}%"))
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

/// Column descriptors with the multiple-choice verdict.
pub fn columns_table(profile: &DatasetProfile, choices: &ChoiceGroup) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Filled"),
        header_cell("Fill %"),
        header_cell("Distinct"),
        header_cell("Multiple choice"),
    ]);
    apply_table_style(&mut table);
    for idx in 2..=4 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);

    for descriptor in profile.columns() {
        let verdict = if choices.contains(&descriptor.name) {
            Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            dim_cell(UNDEFINED)
        };
        table.add_row(vec![
            Cell::new(&descriptor.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            kind_cell(descriptor.kind),
            Cell::new(format!("{}/{}", descriptor.non_missing, descriptor.rows)),
            Cell::new(format_percent(Some(descriptor.fill_ratio * 100.0))),
            Cell::new(descriptor.distinct),
            verdict,
        ]);
    }
    table
}

/// The first rows of a dataset.
pub fn preview_table(dataset: &Dataset) -> Table {
    let mut table = Table::new();
    table.set_header(dataset.column_names().into_iter().map(header_cell));
    apply_wide_table_style(&mut table);
    for (idx, column) in dataset.columns().iter().enumerate() {
        if column.is_numeric() {
            align_column(&mut table, idx, CellAlignment::Right);
        }
    }
    for row in 0..dataset.height() {
        table.add_row(dataset.row(row).into_iter().map(|cell| match cell {
            DataCell::Missing => dim_cell(UNDEFINED),
            DataCell::Number(value) => Cell::new(format_number(value)),
            DataCell::Text(value) => Cell::new(value),
        }));
    }
    table
}

/// Summary table with one statistic per row and one dataset column per
/// table column.
pub fn describe_table(describe: &Describe) -> Table {
    const STATS: [&str; 11] = [
        "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
    ];

    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(
        describe
            .columns()
            .iter()
            .map(|description| header_cell(&description.column)),
    );
    table.set_header(header);
    apply_wide_table_style(&mut table);
    for idx in 1..=describe.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }

    for stat in STATS {
        let mut row = vec![Cell::new(stat).add_attribute(Attribute::Bold)];
        row.extend(
            describe
                .columns()
                .iter()
                .map(|description| match statistic(&description.summary, stat) {
                    Some(text) => Cell::new(text),
                    None => dim_cell(UNDEFINED),
                }),
        );
        table.add_row(row);
    }
    table
}

fn statistic(summary: &ColumnSummary, stat: &str) -> Option<String> {
    match summary {
        ColumnSummary::Numeric(numeric) => {
            let value = match stat {
                "count" => return Some(numeric.count.to_string()),
                "mean" => numeric.mean,
                "std" => numeric.std,
                "min" => numeric.min,
                "25%" => numeric.q25,
                "50%" => numeric.median,
                "75%" => numeric.q75,
                "max" => numeric.max,
                _ => None,
            };
            value.map(|v| format_value(Some(v)))
        }
        ColumnSummary::Text(text) => match stat {
            "count" => Some(text.count.to_string()),
            "unique" => Some(text.unique.to_string()),
            "top" => text.top.clone(),
            "freq" => text.freq.map(|freq| freq.to_string()),
            _ => None,
        },
    }
}

/// Two-column table of an aggregate; values shown as percentages when
/// `percent` is set.
pub fn aggregate_table(
    aggregate: &Aggregate,
    key_header: &str,
    value_header: &str,
    percent: bool,
) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(key_header), header_cell(value_header)]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in aggregate.entries() {
        let value = if percent {
            format_percent(entry.value)
        } else {
            format_value(entry.value)
        };
        let value = if entry.value.is_some() {
            Cell::new(value)
        } else {
            dim_cell(value)
        };
        table.add_row(vec![Cell::new(&entry.key), value]);
    }
    table
}

pub fn histogram_table(panel: &HistogramPanel) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(&panel.column),
        header_cell("Count"),
        header_cell(""),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let bins = &panel.histogram.bins;
    let max = panel.histogram.max_count().max(1);
    for (idx, bin) in bins.iter().enumerate() {
        let close = if idx + 1 == bins.len() { ']' } else { ')' };
        let width = (bin.count as usize * BAR_WIDTH).div_ceil(max as usize);
        table.add_row(vec![
            Cell::new(format!(
                "[{}, {}{close}",
                format_value(Some(bin.range.start)),
                format_value(Some(bin.range.end))
            )),
            Cell::new(bin.count),
            Cell::new("█".repeat(width)).fg(Color::Cyan),
        ]);
    }
    table
}

/// Plain-text t-test result with the significance verdict.
pub fn ttest_summary(panel: &TTestPanel) -> String {
    let test = &panel.test;
    let mut out = format!(
        "T-test of {} by {}\n",
        test.value_column, test.group_column
    );
    for group in &test.groups {
        let _ = writeln!(
            out,
            "  {}: n = {}, mean = {:.2}",
            group.label, group.count, group.mean
        );
    }
    let _ = writeln!(
        out,
        "t = {:.4}, df = {}, p-value = {:.4}",
        test.t_statistic, test.degrees_of_freedom, test.p_value
    );
    let _ = write!(out, "{} (alpha = {})", panel.message(), panel.alpha);
    out
}

/// Selection rates of every option per segment.
pub fn comparison_table(comparison: &SegmentComparison) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell(&format!("Option \\ {}", comparison.segment_column))];
    header.extend(comparison.segments.iter().map(|segment| header_cell(segment)));
    table.set_header(header);
    apply_wide_table_style(&mut table);
    for idx in 1..=comparison.segments.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for series in &comparison.series {
        let mut row = vec![Cell::new(&series.option).add_attribute(Attribute::Bold)];
        row.extend(
            series
                .values
                .iter()
                .map(|value| Cell::new(format_percent(Some(*value)))),
        );
        table.add_row(row);
    }
    table
}

pub fn choices_text(summary: &ChoiceSummary) -> String {
    let mut out = String::new();
    if summary.detected.is_empty() {
        let _ = writeln!(out, "{NO_CHOICES_MESSAGE}");
    } else {
        let _ = writeln!(
            out,
            "Detected multiple choice options: {}",
            summary.detected.columns().join(", ")
        );
    }
    if summary.selected.is_empty() {
        return out;
    }
    let _ = writeln!(
        out,
        "{}",
        aggregate_table(&summary.percentages, "Option", "Selected", true)
    );
    if let Some(comparison) = &summary.comparison {
        let _ = writeln!(out, "\nSegment comparison");
        let _ = writeln!(out, "{}", comparison_table(comparison));
    }
    out
}

pub fn notice_line(notice: &Notice) -> String {
    let level = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
    };
    format!("{level} [{}]: {}", notice.panel, notice.message)
}

/// Every panel of a report, in dashboard order.
pub fn report_text(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Data preview ({} rows x {} columns)",
        report.rows, report.columns
    );
    let _ = writeln!(out, "{}", preview_table(&report.preview));
    let _ = writeln!(out, "\nBasic summary");
    let _ = writeln!(out, "{}", describe_table(&report.summary));
    if !report.column_means.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            aggregate_table(&report.column_means, "Column", "Mean", false)
        );
    }
    if let Some(panel) = &report.histogram {
        let _ = writeln!(out, "\nHistogram of {}", panel.column);
        let _ = writeln!(out, "{}", histogram_table(panel));
    }
    if let Some(panel) = &report.ttest {
        let _ = writeln!(out, "\n{}", ttest_summary(panel));
    }
    if let Some(choices) = &report.choices {
        let _ = writeln!(out, "\nMultiple choice analysis");
        let _ = write!(out, "{}", choices_text(choices));
    }
    if !report.notices.is_empty() {
        let _ = writeln!(out);
        for notice in &report.notices {
            let _ = writeln!(out, "{}", notice_line(notice));
        }
    }
    out.trim_end().to_string()
}

fn kind_cell(kind: ColumnKind) -> Cell {
    match kind {
        ColumnKind::Numeric => Cell::new(kind.as_str()).fg(Color::Magenta),
        ColumnKind::Text => Cell::new(kind.as_str()),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
