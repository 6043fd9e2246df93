use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{
    ColumnSummary, CorrelationMethod, CorrelationResult, Histogram, RawTable, Significance,
};
use crate::pipeline::{Analysis, Normality, Reliability, Visualization};
use crate::strings::Strings;

fn fmt_value(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.decimals$}"),
        _ => "-".to_string(),
    }
}

fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

pub fn missing_columns_section(s: &Strings, missing_x: &[String], missing_y: &[String]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", s.missing_cols_error);
    let _ = writeln!(output, "{}: {:?}", s.missing_x_label, missing_x);
    let _ = writeln!(output, "{}: {:?}", s.missing_y_label, missing_y);
    let _ = writeln!(output, "{}", s.missing_cols_hint);
    output
}

pub fn preview_section(s: &Strings, table: &RawTable, rows: usize) -> String {
    let (headers, records) = crate::ingest::preview(table, rows);
    let mut output = String::new();

    let _ = writeln!(output, "## {}", s.preview_title);
    let _ = writeln!(
        output,
        "| {} |",
        headers.iter().map(|h| cell(h)).collect::<Vec<_>>().join(" | ")
    );
    let _ = writeln!(output, "|{}", " --- |".repeat(headers.len()));
    for record in records {
        let _ = writeln!(
            output,
            "| {} |",
            record.values.iter().map(|v| cell(v)).collect::<Vec<_>>().join(" | ")
        );
    }
    output
}

pub fn respondents_section(s: &Strings, total: usize, valid: usize) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{} {}", s.respondent_before_clean, total);
    let _ = writeln!(output, "{} {}", s.respondent_after_clean, valid);
    output
}

fn summary_table(output: &mut String, summaries: &[ColumnSummary]) {
    let _ = writeln!(
        output,
        "| column | count | mean | std | min | 25% | 50% | 75% | max |"
    );
    let _ = writeln!(output, "| --- | ---: | ---: | ---: | ---: | ---: | ---: | ---: | ---: |");
    for summary in summaries {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} | {} | {} |",
            cell(&summary.column),
            summary.count,
            fmt_value(summary.mean, 4),
            fmt_value(summary.std, 4),
            fmt_value(summary.min, 2),
            fmt_value(summary.q25, 2),
            fmt_value(summary.median, 2),
            fmt_value(summary.q75, 2),
            fmt_value(summary.max, 2),
        );
    }
}

pub fn describe_section(s: &Strings, analysis: &Analysis) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## {}", s.desc_item_title);
    summary_table(&mut output, &analysis.item_summaries);
    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", s.desc_comp_title);
    summary_table(&mut output, &analysis.composite_summaries);
    output
}

fn alpha_text(s: &Strings, alpha: Option<f64>) -> String {
    match alpha {
        Some(value) => format!("**{value:.4}**"),
        None => format!("**{}**", s.undefined),
    }
}

pub fn reliability_section(
    s: &Strings,
    reliability: &Reliability,
    normality: &Normality,
) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## {}", s.reliability_title);
    let _ = writeln!(output, "- {} {}", s.alpha_x_label, alpha_text(s, reliability.alpha_x));
    let _ = writeln!(output, "- {} {}", s.alpha_y_label, alpha_text(s, reliability.alpha_y));
    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", s.normality_title);
    for (label, result) in [
        (s.normality_x_label, &normality.x),
        (s.normality_y_label, &normality.y),
    ] {
        match result {
            Ok(test) => {
                let _ = writeln!(
                    output,
                    "- {} — W = {:.4}, p = {:.6}",
                    label, test.statistic, test.p_value
                );
            }
            Err(err) => {
                let _ = writeln!(output, "- {} — {}: {}", label, s.statistic_failed, err);
            }
        }
    }
    output
}

fn histogram_table(output: &mut String, s: &Strings, title: &str, histogram: &Histogram) {
    let _ = writeln!(output, "### {title}");
    let _ = writeln!(output, "| {} | {} |", s.hist_bin_label, s.hist_ylabel);
    let _ = writeln!(output, "| --- | ---: |");
    let last = histogram.counts.len().saturating_sub(1);
    for (i, count) in histogram.counts.iter().enumerate() {
        let close = if i == last { ']' } else { ')' };
        let _ = writeln!(
            output,
            "| [{:.2}, {:.2}{} | {} |",
            histogram.edges[i],
            histogram.edges[i + 1],
            close,
            count
        );
    }
}

pub fn correlation_section(
    s: &Strings,
    correlation: &crate::error::Result<CorrelationResult>,
    visualization: &Visualization,
) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## {}", s.corr_title);

    match correlation {
        Ok(result) => {
            let method = match result.method {
                CorrelationMethod::Pearson => s.corr_method_pearson,
                CorrelationMethod::Spearman => s.corr_method_spearman,
            };
            let _ = writeln!(output, "{method}");
            let _ = writeln!(output);
            let coefficient = fmt_value(result.coefficient, 4);
            let p_value = fmt_value(result.p_value, 6);
            let _ = writeln!(output, "- {} **{}**", s.corr_coef_label, coefficient);
            let _ = writeln!(output, "- {} **{}**", s.p_value_label, p_value);
            let _ = writeln!(output);
            let verdict = match result.significance {
                Significance::Significant => s.corr_sig,
                Significance::NotSignificant => s.corr_nonsig,
                Significance::Undetermined => s.corr_undetermined,
            };
            let _ = writeln!(output, "{verdict}");
        }
        Err(err) => {
            let _ = writeln!(output, "{}: {}", s.statistic_failed, err);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## {}", s.viz_title);
    histogram_table(&mut output, s, s.hist_x_title, &visualization.x_histogram);
    let _ = writeln!(output);
    histogram_table(&mut output, s, s.hist_y_title, &visualization.y_histogram);
    let _ = writeln!(output);
    let _ = writeln!(output, "### {}", s.scatter_title);
    let _ = writeln!(output, "| {} | {} |", s.scatter_xlabel, s.scatter_ylabel);
    let _ = writeln!(output, "| ---: | ---: |");
    for (x, y) in &visualization.scatter {
        let _ = writeln!(output, "| {x} | {y} |");
    }
    output
}

/// The full markdown report: every page of the analysis in one document.
pub fn build_report(
    s: &Strings,
    source: &str,
    generated_at: DateTime<Utc>,
    table: &RawTable,
    analysis: &Analysis,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {}", s.app_title);
    let _ = writeln!(output, "{}: {}", s.source_label, source);
    let _ = writeln!(
        output,
        "{}: {}",
        s.generated_at,
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    for page in [
        s.page_overview,
        s.page_desc,
        s.page_reliability,
        s.page_corr,
    ] {
        let _ = writeln!(output, "- {page}");
    }
    let _ = writeln!(output);

    let sections = [
        preview_section(s, table, 5),
        respondents_section(s, analysis.total_respondents, analysis.valid_respondents),
        describe_section(s, analysis),
        reliability_section(s, &analysis.reliability, &analysis.normality),
        correlation_section(s, &analysis.correlation, &analysis.visualization),
    ];
    let _ = write!(output, "{}", sections.join("\n"));

    output
}
