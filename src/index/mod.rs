//! Influence index calculation.
//!
//! Two primitives:
//!
//! - `slope`: the average per-step rate of change of a chronologically
//!   ordered series, computed from its first and last values only
//! - `influence_index`: the signed combination of the two cohort slopes
//!
//! Rounding is not part of the calculation: `round1` exists for callers
//! that present one-decimal output, applied after the branching.

/// Average per-step rate of change from the endpoints.
///
/// Defined as `0` for series of length 0 or 1: a single observation carries
/// no trend information, and this also guards the division.
pub fn slope(series: &[f64]) -> f64 {
    if series.len() <= 1 {
        return 0.0;
    }
    (series[series.len() - 1] - series[0]) / (series.len() - 1) as f64
}

/// Signed influence index for a (younger, older) cohort series pair.
///
/// With `m_g = slope(younger)` and `m_o = slope(older)`:
///
/// - `m_o == 0` → `0.0` (no older-cohort trend, nothing to measure)
/// - `m_g == 0` → `m_o` (younger flat: report the older slope un-normalized)
/// - same sign → `m_o / m_g` (aligned trends; > 1 means the older cohort is
///   changing faster in the same direction)
/// - opposite signs → `-|m_o / m_g|` (diverging trends are always reported
///   as non-positive)
///
/// Known sensitivity: the aligned/diverging ratio is unbounded. A very
/// small nonzero younger slope yields an arbitrarily large magnitude; no
/// clamping is applied.
pub fn influence_index(younger: &[f64], older: &[f64]) -> f64 {
    let m_g = slope(younger);
    let m_o = slope(older);

    if m_o == 0.0 {
        return 0.0;
    }
    if m_g == 0.0 {
        return m_o;
    }
    if (m_g > 0.0) == (m_o > 0.0) {
        m_o / m_g
    } else {
        -(m_o / m_g).abs()
    }
}

/// Round to one decimal place (presentation-layer choice).
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slope_of_short_series_is_zero() {
        assert_eq!(slope(&[]), 0.0);
        assert_eq!(slope(&[42.0]), 0.0);
    }

    #[test]
    fn slope_of_two_points_is_their_difference() {
        assert_eq!(slope(&[3.0, 8.5]), 5.5);
        assert_eq!(slope(&[8.5, 3.0]), -5.5);
    }

    #[test]
    fn slope_uses_endpoints_only() {
        // Interior values are irrelevant by definition.
        assert_eq!(slope(&[10.0, 99.0, 20.0]), 5.0);
        assert_eq!(slope(&[10.0, -50.0, 20.0]), 5.0);
    }

    #[test]
    fn flat_older_series_means_zero_index() {
        assert_eq!(influence_index(&[20.0, 30.0, 50.0], &[10.0, 10.0, 10.0]), 0.0);
        assert_eq!(influence_index(&[1.0], &[10.0, 10.0]), 0.0);
    }

    #[test]
    fn flat_younger_series_reports_older_slope() {
        assert_eq!(influence_index(&[80.0, 80.0, 80.0], &[10.0, 35.0, 60.0]), 25.0);
        assert_eq!(
            influence_index(&[80.0, 80.0, 80.0], &[60.0, 40.0, 20.0]),
            -20.0
        );
    }

    #[test]
    fn aligned_trends_yield_positive_ratio() {
        // Both declining at the same rate.
        assert_eq!(
            influence_index(&[70.0, 60.0, 50.0], &[30.0, 20.0, 10.0]),
            1.0
        );
        // Both rising, older twice as fast.
        assert_eq!(influence_index(&[60.0, 65.0, 70.0], &[10.0, 15.0, 20.0]), 1.0);
        assert_eq!(influence_index(&[10.0, 12.0], &[50.0, 54.0]), 2.0);
    }

    #[test]
    fn diverging_trends_are_non_positive() {
        let younger = [23.9, 25.0, 20.98];
        let older = [18.79, 16.56, 22.58];
        let index = influence_index(&younger, &older);
        assert!(index <= 0.0);

        let m_g = slope(&younger);
        let m_o = slope(&older);
        assert!((index + (m_o / m_g).abs()).abs() < 1e-12);
        assert_eq!(round1(index), -1.3);
    }

    #[test]
    fn aligned_ratio_is_exact_before_rounding() {
        let younger = [47.0, 53.0, 57.0];
        let older = [29.0, 32.0, 36.0];
        let expected = slope(&older) / slope(&younger);
        assert_eq!(influence_index(&younger, &older), expected);
        assert!(expected > 0.0);
    }

    #[test]
    fn rounding_is_separate_from_branching() {
        assert_eq!(round1(1.44), 1.4);
        assert_eq!(round1(-1.35), -1.4);
        assert_eq!(round1(25.0), 25.0);
    }
}
