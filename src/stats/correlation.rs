use std::cmp::Ordering;

use tracing::{info, warn};

use crate::error::{Result, SurveyError};
use crate::models::{CorrelationMethod, CorrelationResult, NormalityResult, Significance};
use crate::stats::distributions::student_t_two_sided;
use crate::stats::normality::{shapiro_wilk, MIN_OBSERVATIONS};

/// Both composites must exceed this Shapiro–Wilk p-value for Pearson to be used.
pub const NORMALITY_THRESHOLD: f64 = 0.05;
/// A correlation p-value below this is reported as significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub coefficient: f64,
    pub p_value: f64,
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Two-sided p-value for a correlation coefficient under H0: rho = 0,
/// via the t statistic with n - 2 degrees of freedom.
fn coefficient_p_value(r: f64, n: usize) -> f64 {
    if n < 3 {
        return 1.0;
    }
    let df = (n - 2) as f64;
    let denominator = 1.0 - r * r;
    if denominator <= 0.0 {
        return 0.0;
    }
    student_t_two_sided(r * (df / denominator).sqrt(), df)
}

/// Pearson's r with its two-sided p-value. `None` when fewer than two pairs
/// are given or either series is constant.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<Estimate> {
    let n = x.len().min(y.len());
    let (x, y) = (&x[..n], &y[..n]);
    if n < 2 || is_constant(x) || is_constant(y) {
        return None;
    }

    let mean_x = mean(x);
    let mean_y = mean(y);
    let (sxy, sxx, syy) = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| {
            let dx = a - mean_x;
            let dy = b - mean_y;
            (dx * dy, dx * dx, dy * dy)
        })
        .fold((0.0, 0.0, 0.0), |acc, (xy, xx, yy)| {
            (acc.0 + xy, acc.1 + xx, acc.2 + yy)
        });

    let coefficient = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
    Some(Estimate {
        coefficient,
        p_value: coefficient_p_value(coefficient, n),
    })
}

/// 1-based ranks, ties sharing the average of the positions they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].partial_cmp(&values[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &index in &order[start..=end] {
            ranks[index] = rank;
        }
        start = end + 1;
    }
    ranks
}

/// Spearman's rho: Pearson's r over the average ranks.
pub fn spearman(x: &[f64], y: &[f64]) -> Option<Estimate> {
    let n = x.len().min(y.len());
    pearson(&average_ranks(&x[..n]), &average_ranks(&y[..n]))
}

/// Pearson only when both marginals look normal; Spearman otherwise.
pub fn select_method(x: &NormalityResult, y: &NormalityResult) -> CorrelationMethod {
    if x.p_value > NORMALITY_THRESHOLD && y.p_value > NORMALITY_THRESHOLD {
        CorrelationMethod::Pearson
    } else {
        CorrelationMethod::Spearman
    }
}

pub fn significance(p_value: Option<f64>) -> Significance {
    match p_value {
        Some(p) if p < SIGNIFICANCE_LEVEL => Significance::Significant,
        Some(p) if p >= SIGNIFICANCE_LEVEL => Significance::NotSignificant,
        _ => Significance::Undetermined,
    }
}

/// Test both composites for normality, pick the method, and correlate the
/// paired series.
pub fn correlate(x: &[f64], y: &[f64]) -> Result<CorrelationResult> {
    let n = x.len().min(y.len());
    if n < MIN_OBSERVATIONS {
        return Err(SurveyError::InsufficientObservations {
            needed: MIN_OBSERVATIONS,
            found: n,
        });
    }

    let x_normality = shapiro_wilk(&x[..n])?;
    let y_normality = shapiro_wilk(&y[..n])?;
    let method = select_method(&x_normality, &y_normality);

    let estimate = match method {
        CorrelationMethod::Pearson => pearson(&x[..n], &y[..n]),
        CorrelationMethod::Spearman => spearman(&x[..n], &y[..n]),
    };
    if estimate.is_none() {
        warn!(?method, "a composite has zero variance; correlation is undefined");
    }

    let coefficient = estimate.map(|e| e.coefficient);
    let p_value = estimate.map(|e| e.p_value);
    let result = CorrelationResult {
        method,
        x_normality,
        y_normality,
        coefficient,
        p_value,
        significance: significance(p_value),
    };
    info!(?method, ?coefficient, ?p_value, "computed correlation");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::distributions::normal_quantile;
    use proptest::prelude::*;

    fn normal_scores(n: usize) -> Vec<f64> {
        (1..=n)
            .map(|i| 30.0 + 5.0 * normal_quantile((i as f64 - 0.375) / (n as f64 + 0.25)))
            .collect()
    }

    #[test]
    fn perfect_linear_relation_gives_unit_pearson() {
        let x: Vec<f64> = (1..=12).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 5.0).collect();
        let estimate = pearson(&x, &y).unwrap();

        assert!((estimate.coefficient - 1.0).abs() < 1e-12);
        assert!(estimate.p_value < 1e-12);
    }

    #[test]
    fn pearson_reference_value() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let estimate = pearson(&x, &y).unwrap();

        // r = 6 / sqrt(10 * 6)
        assert!((estimate.coefficient - 0.774_596_669).abs() < 1e-8);
        assert!((estimate.p_value - 0.124_027_1).abs() < 1e-5);
    }

    #[test]
    fn constant_series_is_undefined() {
        assert!(pearson(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(spearman(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).is_none());
    }

    #[test]
    fn ranks_average_ties() {
        assert_eq!(
            average_ranks(&[10.0, 20.0, 10.0, 30.0, 20.0]),
            vec![1.5, 3.5, 1.5, 5.0, 3.5]
        );
    }

    #[test]
    fn spearman_sees_monotonic_relations() {
        let x: Vec<f64> = (1..=10).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|v| v.powi(3)).collect();
        let estimate = spearman(&x, &y).unwrap();
        assert!((estimate.coefficient - 1.0).abs() < 1e-12);

        let reversed: Vec<f64> = y.iter().rev().copied().collect();
        let estimate = spearman(&x, &reversed).unwrap();
        assert!((estimate.coefficient + 1.0).abs() < 1e-12);
    }

    #[test]
    fn method_needs_both_marginals_normal() {
        let pass = NormalityResult {
            statistic: 0.98,
            p_value: 0.4,
        };
        let fail = NormalityResult {
            statistic: 0.8,
            p_value: 0.01,
        };
        let boundary = NormalityResult {
            statistic: 0.9,
            p_value: 0.05,
        };

        assert_eq!(select_method(&pass, &pass), CorrelationMethod::Pearson);
        assert_eq!(select_method(&pass, &fail), CorrelationMethod::Spearman);
        assert_eq!(select_method(&fail, &pass), CorrelationMethod::Spearman);
        assert_eq!(select_method(&pass, &boundary), CorrelationMethod::Spearman);
    }

    #[test]
    fn significance_boundary() {
        assert_eq!(significance(Some(0.049)), Significance::Significant);
        assert_eq!(significance(Some(0.05)), Significance::NotSignificant);
        assert_eq!(significance(None), Significance::Undetermined);
    }

    #[test]
    fn correlate_picks_pearson_for_normal_marginals() {
        let x = normal_scores(30);
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 5.0).collect();
        let result = correlate(&x, &y).unwrap();

        assert_eq!(result.method, CorrelationMethod::Pearson);
        assert!((result.coefficient.unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(result.significance, Significance::Significant);
    }

    #[test]
    fn correlate_falls_back_to_spearman_for_skewed_data() {
        let x: Vec<f64> = (0..30).map(|i| (i as f64 / 3.0).exp()).collect();
        let y: Vec<f64> = (0..30).map(f64::from).collect();
        let result = correlate(&x, &y).unwrap();

        assert_eq!(result.method, CorrelationMethod::Spearman);
        assert!((result.coefficient.unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn correlate_with_constant_composites_does_not_fail() {
        let result = correlate(&[30.0; 20], &[30.0; 20]).unwrap();
        assert_eq!(result.method, CorrelationMethod::Pearson);
        assert_eq!(result.coefficient, None);
        assert_eq!(result.significance, Significance::Undetermined);
    }

    #[test]
    fn correlate_requires_three_pairs() {
        assert!(matches!(
            correlate(&[1.0, 2.0], &[2.0, 1.0]),
            Err(SurveyError::InsufficientObservations { found: 2, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_coefficients_are_bounded(
            pairs in proptest::collection::vec((0.0f64..50.0, 0.0f64..50.0), 3..60)
        ) {
            let (x, y): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            for estimate in [pearson(&x, &y), spearman(&x, &y)].into_iter().flatten() {
                prop_assert!((-1.0..=1.0).contains(&estimate.coefficient));
                prop_assert!((0.0..=1.0).contains(&estimate.p_value));
            }
        }
    }
}
