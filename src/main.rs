use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

mod error;
mod ingest;
mod items;
mod logging;
mod models;
mod pipeline;
mod report;
mod scoring;
mod stats;
mod strings;

use crate::error::SurveyError;
use crate::strings::{strings, Lang, Strings};

#[derive(Parser)]
#[command(name = "survey-analysis")]
#[command(
    about = "Composite scores, reliability and correlation for the AI tools usage survey",
    long_about = None
)]
struct Cli {
    /// Survey export (CSV with one column per question)
    #[arg(long, env = "SURVEY_INPUT")]
    input: PathBuf,
    /// Output language
    #[arg(long, value_enum, env = "SURVEY_LANG", default_value_t = Lang::Id)]
    lang: Lang,
    /// Field delimiter of the input, also used for the cleaned export
    #[arg(long, default_value_t = ',')]
    delimiter: char,
    /// Log pipeline details to stderr
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Preview the export and count respondents before and after cleaning
    Overview {
        #[arg(long, default_value_t = 5)]
        rows: usize,
        #[arg(long)]
        json: bool,
    },
    /// Item-level and composite descriptive statistics
    Describe {
        #[arg(long)]
        json: bool,
    },
    /// Cronbach's alpha per group and Shapiro-Wilk on both composites
    Reliability {
        #[arg(long)]
        json: bool,
    },
    /// Correlation between X_total and Y_total, with histogram and scatter data
    Correlate {
        #[arg(long)]
        json: bool,
    },
    /// Write the cleaned data with composite scores
    Export {
        #[arg(long, default_value = "cleaned_survey_with_composites.csv")]
        out: PathBuf,
    },
    /// Generate a markdown report covering every section
    Report {
        #[arg(long, default_value = "survey_report.md")]
        out: PathBuf,
    },
}

impl Commands {
    fn wants_json(&self) -> bool {
        match self {
            Commands::Overview { json, .. }
            | Commands::Describe { json }
            | Commands::Reliability { json }
            | Commands::Correlate { json } => *json,
            Commands::Export { .. } | Commands::Report { .. } => false,
        }
    }
}

fn outcome<T: Serialize>(result: &error::Result<T>) -> serde_json::Value {
    match result {
        Ok(value) => json!({ "ok": value }),
        Err(err) => json!({ "error": err.to_string() }),
    }
}

/// Machine-readable body for a pipeline halt, when the halt has one.
fn halt_json(err: &SurveyError) -> Option<serde_json::Value> {
    match err {
        SurveyError::MissingColumns {
            missing_x,
            missing_y,
        } => Some(json!({
            "error": err.to_string(),
            "missing_x": missing_x,
            "missing_y": missing_y,
        })),
        SurveyError::NoValidRespondents { total, .. } => Some(json!({
            "error": err.to_string(),
            "respondents_before": total,
            "respondents_after": 0,
        })),
        _ => None,
    }
}

fn halt_text(s: &Strings, err: &SurveyError) -> String {
    match err {
        SurveyError::MissingColumns {
            missing_x,
            missing_y,
        } => report::missing_columns_section(s, missing_x, missing_y),
        SurveyError::NoValidRespondents { total, .. } => format!(
            "{}{}\n",
            report::respondents_section(s, *total, 0),
            s.no_valid_resp
        ),
        _ => String::new(),
    }
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let s = strings(cli.lang);
    anyhow::ensure!(
        cli.delimiter.is_ascii(),
        "delimiter must be a single ASCII character"
    );
    let delimiter = cli.delimiter as u8;

    let table = ingest::read_table_from_path(&cli.input, delimiter)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;

    if let Commands::Overview { rows, json: false } = cli.command {
        println!("{}", report::preview_section(s, &table, rows));
    }

    let dataset = match pipeline::clean(&table) {
        Ok(dataset) => dataset,
        Err(err) => {
            if cli.command.wants_json() {
                if let Some(body) = halt_json(&err) {
                    print_json(&body)?;
                }
            } else {
                print!("{}", halt_text(s, &err));
            }
            return Err(err.into());
        }
    };

    match cli.command {
        Commands::Overview { rows, json } => {
            if json {
                let (headers, preview) = ingest::preview(&table, rows);
                let preview: Vec<&Vec<String>> = preview.iter().map(|r| &r.values).collect();
                print_json(&json!({
                    "headers": headers,
                    "preview": preview,
                    "respondents_before": dataset.total_respondents,
                    "respondents_after": dataset.len(),
                }))?;
            } else {
                print!(
                    "{}",
                    report::respondents_section(s, dataset.total_respondents, dataset.len())
                );
            }
        }
        Commands::Describe { json } => {
            let analysis = pipeline::analyze(&dataset);
            if json {
                print_json(&json!({
                    "items": analysis.item_summaries,
                    "composites": analysis.composite_summaries,
                }))?;
            } else {
                print!("{}", report::describe_section(s, &analysis));
            }
        }
        Commands::Reliability { json } => {
            let reliability = pipeline::reliability(&dataset);
            let normality = pipeline::normality(&dataset);
            if json {
                print_json(&json!({
                    "alpha_x": reliability.alpha_x,
                    "alpha_y": reliability.alpha_y,
                    "normality_x": outcome(&normality.x),
                    "normality_y": outcome(&normality.y),
                }))?;
            } else {
                print!("{}", report::reliability_section(s, &reliability, &normality));
            }
        }
        Commands::Correlate { json } => {
            let correlation = pipeline::correlation(&dataset);
            let visualization = pipeline::visualization(&dataset);
            if json {
                print_json(&json!({
                    "correlation": outcome(&correlation),
                    "x_histogram": visualization.x_histogram,
                    "y_histogram": visualization.y_histogram,
                    "scatter": visualization.scatter,
                }))?;
            } else {
                print!(
                    "{}",
                    report::correlation_section(s, &correlation, &visualization)
                );
            }
        }
        Commands::Export { out } => {
            ingest::export_to_path(&dataset, &out, delimiter)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("{} {} ({} rows).", s.export_written, out.display(), dataset.len());
        }
        Commands::Report { out } => {
            let analysis = pipeline::analyze(&dataset);
            let source = cli.input.display().to_string();
            let report = report::build_report(s, &source, chrono::Utc::now(), &table, &analysis);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("{} {}.", s.report_written, out.display());
        }
    }

    Ok(())
}
