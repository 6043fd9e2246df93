use tracing::debug;

use crate::stats::descriptive::sample_variance;

/// Cronbach's alpha over one item group.
///
/// Only complete-case rows (no missing value among the group's items) take
/// part. Returns `None` when alpha is undefined: fewer than two items, fewer
/// than two complete rows, or zero variance of the row sums.
pub fn cronbach_alpha(rows: &[Vec<Option<f64>>]) -> Option<f64> {
    let complete: Vec<Vec<f64>> = rows
        .iter()
        .filter_map(|row| row.iter().copied().collect::<Option<Vec<f64>>>())
        .collect();

    let k = rows.first().map_or(0, Vec::len);
    if k < 2 || complete.is_empty() {
        debug!(items = k, complete_rows = complete.len(), "alpha undefined");
        return None;
    }

    let item_variance_sum = (0..k)
        .map(|item| {
            let column: Vec<f64> = complete.iter().map(|row| row[item]).collect();
            sample_variance(&column)
        })
        .sum::<Option<f64>>()?;

    let totals: Vec<f64> = complete.iter().map(|row| row.iter().sum()).collect();
    let total_variance = sample_variance(&totals)?;
    if total_variance == 0.0 {
        debug!(complete_rows = complete.len(), "row sums have zero variance; alpha undefined");
        return None;
    }

    let k = k as f64;
    Some((k / (k - 1.0)) * (1.0 - item_variance_sum / total_variance))
}
