//! Spread of a column's byte histogram.
//!
//! The score is the Bessel-corrected sample variance of the 256 per-byte
//! counts, normalized by the squared entry count and multiplied by
//! [`UNIFORMITY_SCALE`]. It has no fixed upper bound and is kept as a
//! reproducible scoring function rather than a calibrated statistic.

use colscan_stats::variance::OnlineVariance;

use crate::frequency::FrequencyTable;

pub const UNIFORMITY_SCALE: f64 = 250.0;

/// Computes the uniformity score of a histogram holding `entry_count` entries.
///
/// Returns `None` for `entry_count == 0`, where the normalization is
/// undefined.
///
/// # Examples
///
/// ```
/// # use colscan_analysis::{frequency::FrequencyTable, uniformity::uniformity_score};
/// let frequencies = [1, 1, 1].into_iter().collect::<FrequencyTable>();
/// let score = uniformity_score(&frequencies, 3).unwrap();
/// assert!((score - 0.9765625).abs() < 1e-12);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn uniformity_score(frequencies: &FrequencyTable, entry_count: usize) -> Option<f64> {
    if entry_count == 0 {
        return None;
    }
    let variance = frequencies
        .counts()
        .iter()
        .map(|&count| count as f64)
        .collect::<OnlineVariance>()
        .sample_variance()?;
    let n = entry_count as f64;
    Some(variance / (n * n) * UNIFORMITY_SCALE)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_single_value_column() {
        // 255 empty bins and one holding 3: variance 9/256
        let frequencies = [1, 1, 1].into_iter().collect::<FrequencyTable>();
        let score = uniformity_score(&frequencies, 3).unwrap();
        assert!((score - 0.976_562_5).abs() < 1e-12, "score {score}");
        assert!(((score * 100.0).round() / 100.0 - 0.98).abs() < 1e-12);
    }

    #[test]
    fn test_every_byte_once_is_zero() {
        let frequencies = (0..=255).collect::<FrequencyTable>();
        let score = uniformity_score(&frequencies, 256).unwrap();
        assert!(score.abs() < 1e-15);
    }

    #[test]
    fn test_concentrated_beats_spread() {
        let concentrated = [7; 8].into_iter().collect::<FrequencyTable>();
        let spread = (0..8).collect::<FrequencyTable>();
        let a = uniformity_score(&concentrated, 8).unwrap();
        let b = uniformity_score(&spread, 8).unwrap();
        assert!(a > b, "{a} <= {b}");
    }

    #[test]
    fn test_no_entries() {
        assert_eq!(uniformity_score(&FrequencyTable::default(), 0), None);
    }

    proptest! {
        #[test]
        fn prop_order_does_not_matter(
            bytes in proptest::collection::vec(any::<u8>(), 1..64)
                .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
        ) {
            let (original, shuffled) = bytes;
            let a = uniformity_score(&original.iter().copied().collect(), original.len());
            let b = uniformity_score(&shuffled.iter().copied().collect(), shuffled.len());
            prop_assert_eq!(a, b);
        }
    }
}
