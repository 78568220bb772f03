//! Subcommand execution. Each command returns its rendered output.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Serialize;
use svy_analysis::{
    Aggregate, AnalysisConfig, ChoiceGroup, ClassifierConfig, ColumnDescriptor, Describe,
    HistogramPanel, NO_CHOICES_MESSAGE, ReportRequest, Session,
};
use svy_model::Dataset;
use tracing::{info, info_span, trace};

use crate::cli::{
    ChoicesArgs, ClassifierArgs, ColumnsArgs, Command, DescribeArgs, HistogramArgs, OutputArg,
    ReportArgs, SegmentsArgs, TtestArgs,
};
use crate::logging::redact_value;
use crate::render;

pub fn run(command: &Command, output: OutputArg) -> Result<String> {
    match command {
        Command::Columns(args) => run_columns(args, output),
        Command::Describe(args) => run_describe(args, output),
        Command::Histogram(args) => run_histogram(args, output),
        Command::Ttest(args) => run_ttest(args, output),
        Command::Choices(args) => run_choices(args, output),
        Command::Segments(args) => run_segments(args, output),
        Command::Report(args) => run_report(args, output),
    }
}

#[derive(Serialize)]
struct ColumnsOutput<'a> {
    rows: usize,
    columns: &'a [ColumnDescriptor],
    detected: &'a ChoiceGroup,
}

pub fn run_columns(args: &ColumnsArgs, output: OutputArg) -> Result<String> {
    let config = AnalysisConfig::new().with_classifier(classifier_config(&args.classifier)?);
    let session = load_session(&args.input.file, config)?;
    let _span = info_span!("columns").entered();

    let profile = session.profile();
    let detected = session.detected_choices();
    if output == OutputArg::Json {
        return to_json(&ColumnsOutput {
            rows: profile.rows(),
            columns: profile.columns(),
            detected,
        });
    }
    let footer = if detected.is_empty() {
        NO_CHOICES_MESSAGE.to_string()
    } else {
        format!(
            "Detected multiple choice options: {}",
            detected.columns().join(", ")
        )
    };
    Ok(format!(
        "{}\n{footer}",
        render::columns_table(profile, detected)
    ))
}

#[derive(Serialize)]
struct DescribeOutput<'a> {
    rows: usize,
    columns: usize,
    preview: Dataset,
    summary: &'a Describe,
    column_means: Aggregate,
}

pub fn run_describe(args: &DescribeArgs, output: OutputArg) -> Result<String> {
    let config = AnalysisConfig::new().with_preview_rows(args.rows);
    let session = load_session(&args.input.file, config)?;
    let _span = info_span!("describe").entered();

    let dataset = session.dataset();
    let preview = session.preview(args.rows);
    let column_means = session.column_means();
    if output == OutputArg::Json {
        return to_json(&DescribeOutput {
            rows: dataset.height(),
            columns: dataset.width(),
            preview,
            summary: session.describe(),
            column_means,
        });
    }

    let mut out = format!(
        "Data preview ({} rows x {} columns)\n{}\n\nBasic summary\n{}",
        dataset.height(),
        dataset.width(),
        render::preview_table(&preview),
        render::describe_table(session.describe()),
    );
    if !column_means.is_empty() {
        out.push_str(&format!(
            "\n{}",
            render::aggregate_table(&column_means, "Column", "Mean", false)
        ));
    }
    Ok(out)
}

pub fn run_histogram(args: &HistogramArgs, output: OutputArg) -> Result<String> {
    let config = AnalysisConfig::new().with_histogram_bins(args.bins);
    let session = load_session(&args.input.file, config)?;
    let _span = info_span!("histogram").entered();

    let column = match &args.column {
        Some(column) => column.clone(),
        None => first(&session.numeric_columns(), "numeric")?,
    };
    let histogram = session
        .histogram(&column)
        .with_context(|| format!("histogram of '{column}'"))?;
    let panel = HistogramPanel { column, histogram };
    if output == OutputArg::Json {
        return to_json(&panel);
    }
    Ok(format!(
        "Histogram of {}\n{}",
        panel.column,
        render::histogram_table(&panel)
    ))
}

pub fn run_ttest(args: &TtestArgs, output: OutputArg) -> Result<String> {
    let config = AnalysisConfig::new().with_alpha(args.alpha)?;
    let session = load_session(&args.input.file, config)?;
    let _span = info_span!("ttest").entered();

    let group = match &args.group {
        Some(group) => group.clone(),
        None => first(&session.categorical_columns(), "categorical")?,
    };
    let value = match &args.value {
        Some(value) => value.clone(),
        None => first(&session.numeric_columns(), "numeric")?,
    };
    let panel = session
        .ttest_panel(&group, &value)
        .with_context(|| format!("t-test of '{value}' by '{group}'"))?;
    info!(
        p_value = panel.test.p_value,
        significant = panel.significant,
        "t-test complete"
    );
    if output == OutputArg::Json {
        return to_json(&panel);
    }
    Ok(render::ttest_summary(&panel))
}

pub fn run_choices(args: &ChoicesArgs, output: OutputArg) -> Result<String> {
    let config = AnalysisConfig::new().with_classifier(classifier_config(&args.classifier)?);
    let session = load_session(&args.input.file, config)?;
    let _span = info_span!("choices").entered();

    let options = (!args.options.is_empty()).then_some(args.options.as_slice());
    let summary = session
        .choice_summary(options, args.segment.as_deref())
        .context("multiple choice summary")?;
    if let Some(comparison) = &summary.comparison {
        trace!(
            segments = redact_value(&comparison.segments.join(", ")),
            "segment labels"
        );
    }
    if output == OutputArg::Json {
        return to_json(&summary);
    }
    Ok(render::choices_text(&summary).trim_end().to_string())
}

pub fn run_segments(args: &SegmentsArgs, output: OutputArg) -> Result<String> {
    let session = load_session(&args.input.file, AnalysisConfig::default())?;
    let _span = info_span!("segments").entered();

    let means = session
        .numeric_by_segment(&args.segment, &args.value)
        .with_context(|| format!("mean of '{}' by '{}'", args.value, args.segment))?;
    if output == OutputArg::Json {
        return to_json(&means);
    }
    let header = format!("Mean {}", args.value);
    Ok(render::aggregate_table(&means, &args.segment, &header, false).to_string())
}

pub fn run_report(args: &ReportArgs, output: OutputArg) -> Result<String> {
    let config = AnalysisConfig::new()
        .with_classifier(classifier_config(&args.classifier)?)
        .with_histogram_bins(args.bins)
        .with_preview_rows(args.rows)
        .with_alpha(args.alpha)?;
    let session = load_session(&args.input.file, config)?;
    let _span = info_span!("report").entered();

    let request = ReportRequest {
        histogram_column: args.histogram.clone(),
        group_column: args.group.clone(),
        value_column: args.value.clone(),
        options: (!args.options.is_empty()).then(|| args.options.clone()),
        segment_column: args.segment.clone(),
    };
    let report = session.report(&request);
    info!(notices = report.notices.len(), "report complete");
    if output == OutputArg::Json {
        return to_json(&report);
    }
    Ok(render::report_text(&report))
}

/// Loads the file and prepares a session.
pub fn load_session(path: &Path, config: AnalysisConfig) -> Result<Session> {
    let _span = info_span!("load", file = %path.display()).entered();
    let dataset =
        svy_ingest::load_path(path).with_context(|| format!("load {}", path.display()))?;
    if dataset.height() > 0 {
        for (name, cell) in dataset.column_names().into_iter().zip(dataset.row(0)) {
            let value = cell.label().unwrap_or_default();
            trace!(column = name, value = redact_value(&value), "first row");
        }
    }
    Ok(Session::new(dataset, config))
}

fn classifier_config(args: &ClassifierArgs) -> Result<ClassifierConfig> {
    Ok(ClassifierConfig::new(args.threshold)?
        .with_max_distinct(args.max_distinct)
        .with_categorical_only(args.categorical_only))
}

fn first(columns: &[&str], kind: &str) -> Result<String> {
    match columns.first() {
        Some(column) => Ok((*column).to_string()),
        None => bail!("dataset has no {kind} columns"),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize output")
}
