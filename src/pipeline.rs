use tracing::warn;

use crate::error::Result;
use crate::ingest;
use crate::items::ItemGroup;
use crate::models::{
    ColumnSummary, CorrelationResult, Histogram, NormalityResult, RawTable, ScoredDataset,
};
use crate::scoring;
use crate::stats;

/// Schema check, numeric coercion, respondent filter and composite scoring.
/// Halts on a schema error or when no respondent survives the filter.
pub fn clean(table: &RawTable) -> Result<ScoredDataset> {
    let numeric = ingest::coerce(table)?;
    let valid = scoring::filter_respondents(numeric)?;
    Ok(scoring::score(valid))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reliability {
    pub alpha_x: Option<f64>,
    pub alpha_y: Option<f64>,
}

pub fn reliability(dataset: &ScoredDataset) -> Reliability {
    let alpha_x = stats::cronbach_alpha(&dataset.group_rows(ItemGroup::X));
    let alpha_y = stats::cronbach_alpha(&dataset.group_rows(ItemGroup::Y));
    if alpha_x.is_none() || alpha_y.is_none() {
        warn!(?alpha_x, ?alpha_y, "Cronbach's alpha undefined for at least one group");
    }
    Reliability { alpha_x, alpha_y }
}

#[derive(Debug)]
pub struct Normality {
    pub x: Result<NormalityResult>,
    pub y: Result<NormalityResult>,
}

pub fn normality(dataset: &ScoredDataset) -> Normality {
    Normality {
        x: stats::shapiro_wilk(&dataset.x_totals()),
        y: stats::shapiro_wilk(&dataset.y_totals()),
    }
}

pub fn correlation(dataset: &ScoredDataset) -> Result<CorrelationResult> {
    stats::correlate(&dataset.x_totals(), &dataset.y_totals())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Visualization {
    pub x_histogram: Histogram,
    pub y_histogram: Histogram,
    pub scatter: Vec<(f64, f64)>,
}

pub fn visualization(dataset: &ScoredDataset) -> Visualization {
    Visualization {
        x_histogram: stats::histogram(&dataset.x_totals(), stats::DEFAULT_BINS),
        y_histogram: stats::histogram(&dataset.y_totals(), stats::DEFAULT_BINS),
        scatter: dataset.paired_totals(),
    }
}

/// Every reported value for one cleaned dataset. Each statistic is computed
/// on its own, so a failure in one leaves the others intact.
#[derive(Debug)]
pub struct Analysis {
    pub total_respondents: usize,
    pub valid_respondents: usize,
    pub item_summaries: Vec<ColumnSummary>,
    pub composite_summaries: Vec<ColumnSummary>,
    pub reliability: Reliability,
    pub normality: Normality,
    pub correlation: Result<CorrelationResult>,
    pub visualization: Visualization,
}

pub fn analyze(dataset: &ScoredDataset) -> Analysis {
    Analysis {
        total_respondents: dataset.total_respondents,
        valid_respondents: dataset.len(),
        item_summaries: stats::item_summaries(dataset),
        composite_summaries: stats::composite_summaries(dataset),
        reliability: reliability(dataset),
        normality: normality(dataset),
        correlation: correlation(dataset),
        visualization: visualization(dataset),
    }
}
