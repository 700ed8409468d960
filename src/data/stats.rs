/// Outlier-aware box summary of a numeric sequence.
///
/// Quartiles use linear interpolation between closest ranks. Whiskers reach
/// the most extreme values within 1.5 × IQR of the box; everything beyond is
/// an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxSummary {
    /// `None` for an empty sequence. NaNs are ignored.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let fence = 1.5 * (q3 - q1);
        let (low_fence, high_fence) = (q1 - fence, q3 + fence);

        let inside = || {
            sorted
                .iter()
                .copied()
                .filter(move |v| (low_fence..=high_fence).contains(v))
        };
        let lower_whisker = inside().fold(f64::INFINITY, f64::min);
        let upper_whisker = inside().fold(f64::NEG_INFINITY, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(BoxSummary {
            min: sorted[0],
            q1,
            median,
            q3,
            max: sorted[sorted.len() - 1],
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_summary() {
        assert_eq!(BoxSummary::from_values(&[]), None);
    }

    #[test]
    fn quartiles_and_outliers() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 100.0];
        let s = BoxSummary::from_values(&values).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 100.0);
        assert_eq!(s.median, 5.0);
        assert_eq!(s.q1, 3.0);
        assert_eq!(s.q3, 7.0);
        assert_eq!(s.lower_whisker, 1.0);
        assert_eq!(s.upper_whisker, 8.0);
        assert_eq!(s.outliers, vec![100.0]);
    }

    #[test]
    fn single_value() {
        let s = BoxSummary::from_values(&[42.0]).unwrap();
        assert_eq!(s.q1, 42.0);
        assert_eq!(s.q3, 42.0);
        assert_eq!(s.lower_whisker, 42.0);
        assert!(s.outliers.is_empty());
    }

    #[test]
    fn interpolates_between_ranks() {
        let s = BoxSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.q3, 3.25);
    }
}
