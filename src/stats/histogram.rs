use crate::models::Histogram;

pub const DEFAULT_BINS: usize = 10;

/// Equal-width histogram over [min, max]; the last bin is closed on the right.
/// A constant series is spread over [value - 0.5, value + 0.5].
pub fn histogram(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    if values.is_empty() {
        lo = 0.0;
        hi = 1.0;
    } else if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| if i == bins { hi } else { lo + width * i as f64 })
        .collect();

    let mut counts = vec![0usize; bins];
    for &value in values {
        let mut index = (((value - lo) / (hi - lo)) * bins as f64).floor() as usize;
        index = index.min(bins - 1);
        // Floating-point rounding can land a value one bin off its edges.
        if index > 0 && value < edges[index] {
            index -= 1;
        } else if index + 1 < bins && value >= edges[index + 1] {
            index += 1;
        }
        counts[index] += 1;
    }

    Histogram { edges, counts }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_equal_bins_with_closed_last_edge() {
        let values: Vec<f64> = (10..=50).map(f64::from).collect();
        let hist = histogram(&values, DEFAULT_BINS);

        assert_eq!(hist.edges.len(), 11);
        assert_eq!(hist.edges[0], 10.0);
        assert_eq!(hist.edges[10], 50.0);
        assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        // 10..=13 in the first bin, 46..=50 in the last.
        assert_eq!(hist.counts[0], 4);
        assert_eq!(hist.counts[9], 5);
    }

    #[test]
    fn constant_values_fall_in_the_middle_bin() {
        let hist = histogram(&[30.0; 20], DEFAULT_BINS);

        assert_eq!(hist.edges[0], 29.5);
        assert_eq!(hist.edges[10], 30.5);
        assert_eq!(hist.counts[5], 20);
        assert_eq!(hist.counts.iter().sum::<usize>(), 20);
    }

    #[test]
    fn empty_input_has_empty_bins() {
        let hist = histogram(&[], DEFAULT_BINS);
        assert_eq!(hist.counts, vec![0; 10]);
    }
}
