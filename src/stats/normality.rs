//! Shapiro–Wilk normality test using Royston's (1995) approximation for the
//! coefficients and the p-value.

use std::cmp::Ordering;

use tracing::warn;

use crate::error::{Result, SurveyError};
use crate::models::NormalityResult;
use crate::stats::distributions::{normal_quantile, normal_sf};

pub const MIN_OBSERVATIONS: usize = 3;
const MAX_ACCURATE_OBSERVATIONS: usize = 5000;
const SMALL: f64 = 1e-19;

const G: [f64; 2] = [-2.273, 0.459];
const C1: [f64; 6] = [0.0, 0.221_157, -0.147_981, -2.071_19, 4.434_685, -2.706_056];
const C2: [f64; 6] = [0.0, 0.042_981, -0.293_762, -1.752_461, 5.682_633, -3.582_633];
const C3: [f64; 4] = [0.544, -0.399_78, 0.025_054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.778_57, 0.062_767, -0.002_032_2];
const C5: [f64; 4] = [-1.5861, -0.310_82, -0.083_751, 0.003_891_5];
const C6: [f64; 3] = [-0.4803, -0.082_676, 0.003_030_2];

fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, &coefficient| acc * x + coefficient)
}

/// Coefficients for the lower half of the ordered sample; the upper half is
/// the same values with the sign flipped.
fn half_coefficients(n: usize) -> Vec<f64> {
    let half = n / 2;
    if n == 3 {
        return vec![std::f64::consts::FRAC_1_SQRT_2];
    }

    let an = n as f64;
    let m: Vec<f64> = (1..=half)
        .map(|i| normal_quantile((i as f64 - 0.375) / (an + 0.25)))
        .collect();
    let summ2 = 2.0 * m.iter().map(|value| value * value).sum::<f64>();
    let ssumm2 = summ2.sqrt();
    let rsn = 1.0 / an.sqrt();
    let a1 = poly(&C1, rsn) - m[0] / ssumm2;

    let mut a = vec![0.0; half];
    a[0] = a1;
    let (first_scaled, fac) = if n > 5 {
        let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
        a[1] = a2;
        let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
            / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
            .sqrt();
        (2, fac)
    } else {
        let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
        (1, fac)
    };
    for (slot, value) in a.iter_mut().zip(&m).skip(first_scaled) {
        *slot = -value / fac;
    }
    a
}

fn p_value(w: f64, n: usize) -> f64 {
    if n == 3 {
        const PI6: f64 = 1.909_859_317_102_74;
        const STQR: f64 = 1.047_197_551_196_6;
        return (PI6 * (w.sqrt().asin() - STQR)).max(0.0);
    }

    let an = n as f64;
    let mut y = (1.0 - w).ln();
    let (mean, sd) = if n <= 11 {
        let gamma = poly(&G, an);
        if y >= gamma {
            return 1e-99;
        }
        y = -(gamma - y).ln();
        (poly(&C3, an), poly(&C4, an).exp())
    } else {
        let ln_n = an.ln();
        (poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };
    normal_sf((y - mean) / sd)
}

/// Shapiro–Wilk statistic W and its p-value. Needs at least three observations.
pub fn shapiro_wilk(values: &[f64]) -> Result<NormalityResult> {
    let n = values.len();
    if n < MIN_OBSERVATIONS {
        return Err(SurveyError::InsufficientObservations {
            needed: MIN_OBSERVATIONS,
            found: n,
        });
    }
    if n > MAX_ACCURATE_OBSERVATIONS {
        warn!(n, "Shapiro-Wilk p-value may be inaccurate above 5000 observations");
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let range = sorted[n - 1] - sorted[0];
    if range < SMALL {
        warn!(n, "input has zero range; reporting W = 1, p = 1");
        return Ok(NormalityResult {
            statistic: 1.0,
            p_value: 1.0,
        });
    }

    let half = half_coefficients(n);
    let coefficient = |i: usize| -> f64 {
        if i < n / 2 {
            -half[i]
        } else if n % 2 == 1 && i == n / 2 {
            0.0
        } else {
            half[n - 1 - i]
        }
    };

    let scaled: Vec<f64> = sorted.iter().map(|value| value / range).collect();
    let mean_x = scaled.iter().sum::<f64>() / n as f64;
    let mean_a = (0..n).map(coefficient).sum::<f64>() / n as f64;

    let (mut ssa, mut ssx, mut sax) = (0.0, 0.0, 0.0);
    for (i, &x) in scaled.iter().enumerate() {
        let da = coefficient(i) - mean_a;
        let dx = x - mean_x;
        ssa += da * da;
        ssx += dx * dx;
        sax += da * dx;
    }

    let ssassx = (ssa * ssx).sqrt();
    let w1 = ((ssassx - sax) * (ssassx + sax) / (ssa * ssx)).max(0.0);
    let statistic = 1.0 - w1;

    Ok(NormalityResult {
        statistic,
        p_value: p_value(statistic, n),
    })
}
