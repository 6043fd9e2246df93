use std::cmp::Ordering;

use crate::items::{all_items, COMPOSITE_COLUMNS, TOTAL_ITEMS};
use crate::models::{ColumnSummary, ScoredDataset};

/// Sample variance (n - 1 divisor). `None` below two values; exactly zero
/// when every value is equal.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    if values.windows(2).all(|pair| pair[0] == pair[1]) {
        return Some(0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let squares: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    Some(squares / (n - 1.0))
}

/// Quantile of already sorted values with linear interpolation between
/// the closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let idx = q * (sorted.len() - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;
    if lo == hi {
        Some(sorted[lo])
    } else {
        let t = idx - lo as f64;
        Some(sorted[lo] * (1.0 - t) + sorted[hi] * t)
    }
}

/// Count, mean, std, min, quartiles and max over the present values.
pub fn summarize(column: &str, values: &[Option<f64>]) -> ColumnSummary {
    let mut present: Vec<f64> = values.iter().flatten().copied().collect();
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let count = present.len();
    let mean = (count > 0).then(|| present.iter().sum::<f64>() / count as f64);

    ColumnSummary {
        column: column.to_string(),
        count,
        mean,
        std: sample_variance(&present).map(f64::sqrt),
        min: present.first().copied(),
        q25: quantile(&present, 0.25),
        median: quantile(&present, 0.5),
        q75: quantile(&present, 0.75),
        max: present.last().copied(),
    }
}

pub fn item_summaries(dataset: &ScoredDataset) -> Vec<ColumnSummary> {
    all_items()
        .zip(0..TOTAL_ITEMS)
        .map(|(item, index)| summarize(item, &dataset.item_column(index)))
        .collect()
}

pub fn composite_summaries(dataset: &ScoredDataset) -> Vec<ColumnSummary> {
    let columns = [
        dataset.x_totals(),
        dataset.y_totals(),
        dataset.x_means(),
        dataset.y_means(),
    ];
    COMPOSITE_COLUMNS
        .iter()
        .zip(columns.iter())
        .map(|(name, values)| {
            let values: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
            summarize(name, &values)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn summary_matches_hand_computation() {
        let values = [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)];
        let summary = summarize("item", &values);

        assert_eq!(
            summary,
            ColumnSummary {
                column: "item".to_string(),
                count: 4,
                mean: Some(2.5),
                std: Some((5.0f64 / 3.0).sqrt()),
                min: Some(1.0),
                q25: Some(1.75),
                median: Some(2.5),
                q75: Some(3.25),
                max: Some(4.0),
            }
        );
    }

    #[test]
    fn single_value_has_no_std() {
        let summary = summarize("item", &[Some(5.0), None]);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, Some(5.0));
        assert_eq!(summary.std, None);
        assert_eq!(summary.q75, Some(5.0));
    }

    #[test]
    fn all_missing_column_is_empty() {
        let summary = summarize("item", &[None, None]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, None);
        assert_eq!(summary.min, None);
    }

    #[test]
    fn variance_of_constant_values_is_exactly_zero() {
        assert_eq!(sample_variance(&[0.1, 0.1, 0.1]), Some(0.0));
        assert_eq!(sample_variance(&[2.0]), None);
        assert_eq!(sample_variance(&[1.0, 3.0]), Some(2.0));
    }
}
