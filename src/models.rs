use serde::Serialize;

use crate::items::{ItemGroup, ITEMS_PER_GROUP, TOTAL_ITEMS};

/// One submission as read from the export, cell text aligned with the table headers.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RawTable {
    /// Header names with surrounding whitespace already trimmed.
    pub headers: Vec<String>,
    /// Header names exactly as they appeared in the file.
    pub original_headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

/// Item answers coerced to numbers; passthrough cells are carried untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericRecord {
    pub passthrough: Vec<String>,
    pub answers: [Option<f64>; TOTAL_ITEMS],
}

impl NumericRecord {
    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|value| value.is_some()).count()
    }

    pub fn group(&self, group: ItemGroup) -> &[Option<f64>] {
        let start = group.offset();
        &self.answers[start..start + ITEMS_PER_GROUP]
    }
}

#[derive(Debug, Clone)]
pub struct NumericDataset {
    pub passthrough_columns: Vec<String>,
    pub records: Vec<NumericRecord>,
}

/// A record that answered enough items to be analysed. Only the respondent
/// filter constructs these.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecord(NumericRecord);

impl ValidRecord {
    pub(crate) fn new_unchecked(record: NumericRecord) -> Self {
        Self(record)
    }

    pub fn record(&self) -> &NumericRecord {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct ValidDataset {
    pub passthrough_columns: Vec<String>,
    pub records: Vec<ValidRecord>,
    /// Respondent count before filtering.
    pub total_respondents: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub record: ValidRecord,
    pub x_total: f64,
    pub y_total: f64,
    pub x_mean: f64,
    pub y_mean: f64,
}

impl ScoredRecord {
    pub fn answers(&self) -> &[Option<f64>; TOTAL_ITEMS] {
        &self.record.record().answers
    }

    pub fn passthrough(&self) -> &[String] {
        &self.record.record().passthrough
    }
}

/// The cleaned, scored dataset every statistic consumes.
#[derive(Debug, Clone)]
pub struct ScoredDataset {
    pub passthrough_columns: Vec<String>,
    pub records: Vec<ScoredRecord>,
    pub total_respondents: usize,
}

impl ScoredDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn x_totals(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.x_total).collect()
    }

    pub fn y_totals(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.y_total).collect()
    }

    pub fn x_means(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.x_mean).collect()
    }

    pub fn y_means(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.y_mean).collect()
    }

    /// Column `index` (0..20) of the item answers across all respondents.
    pub fn item_column(&self, index: usize) -> Vec<Option<f64>> {
        self.records
            .iter()
            .map(|record| record.answers()[index])
            .collect()
    }

    /// One row per respondent with that group's ten answers.
    pub fn group_rows(&self, group: ItemGroup) -> Vec<Vec<Option<f64>>> {
        self.records
            .iter()
            .map(|record| record.record.record().group(group).to_vec())
            .collect()
    }

    /// (X_total, Y_total) per respondent, for the scatter plot.
    pub fn paired_totals(&self) -> Vec<(f64, f64)> {
        self.records
            .iter()
            .map(|record| (record.x_total, record.y_total))
            .collect()
    }
}

/// Summary row in the style of a dataframe `describe()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalityResult {
    pub statistic: f64,
    pub p_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMethod {
    Pearson,
    Spearman,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Significance {
    Significant,
    NotSignificant,
    /// The coefficient could not be computed (a series has zero variance).
    Undetermined,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub method: CorrelationMethod,
    pub x_normality: NormalityResult,
    pub y_normality: NormalityResult,
    pub coefficient: Option<f64>,
    pub p_value: Option<f64>,
    pub significance: Significance,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bin edges, one more than the number of bins.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}
