use tracing::warn;

/// Lower edge of the band activations are kept inside when they must be inverted.
pub const BAND_LOW: f64 = 0.01;
/// Upper edge of the band activations are kept inside when they must be inverted.
pub const BAND_HIGH: f64 = 0.99;

/// Logistic squashing function 1 / (1 + e^-x).
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Inverse of [`sigmoid`]: ln(y / (1 - y)). Undefined at 0 and 1.
#[inline]
pub fn logit(y: f64) -> f64 {
    (y / (1.0 - y)).ln()
}

/// σ'(z) written in terms of the activation `a = σ(z)`.
#[inline]
pub fn sigmoid_derivative_from_output(a: f64) -> f64 {
    a * (1.0 - a)
}

pub fn sigmoid_vec(xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| sigmoid(x)).collect()
}

pub fn logit_vec(ys: &[f64]) -> Vec<f64> {
    ys.iter().map(|&y| logit(y)).collect()
}

/// Clamps every value into `[BAND_LOW, BAND_HIGH]` so that [`logit`] stays finite.
pub fn clamp_to_band(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.clamp(BAND_LOW, BAND_HIGH)).collect()
}

/// Affine min–max rescale into `[BAND_LOW, BAND_HIGH]`.
///
/// The minimum maps to `BAND_LOW` and the maximum to `BAND_HIGH`. A finite
/// vector with no spread has no ordering to preserve and is mapped to the band
/// midpoint. Non-finite input is returned unchanged so the caller can see it.
pub fn rescale_to_band(values: &[f64]) -> Vec<f64> {
    if !values.iter().all(|v| v.is_finite()) {
        return values.to_vec();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !(range.is_finite() && range > 0.0) {
        warn!(min, max, "degenerate range while rescaling, using band midpoint");
        return vec![(BAND_LOW + BAND_HIGH) / 2.0; values.len()];
    }

    let span = BAND_HIGH - BAND_LOW;
    values
        .iter()
        .map(|v| ((v - min) / range * span + BAND_LOW).clamp(BAND_LOW, BAND_HIGH))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_centered_and_bounded() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(30.0) < 1.0);
        assert!(sigmoid(-30.0) > 0.0);
    }

    #[test]
    fn logit_inverts_sigmoid() {
        for &x in &[-4.0, -0.3, 0.0, 1.7, 5.0] {
            assert!((logit(sigmoid(x)) - x).abs() < 1e-9);
        }
    }

    #[test]
    fn derivative_peaks_at_half() {
        assert_eq!(sigmoid_derivative_from_output(0.5), 0.25);
        assert!(sigmoid_derivative_from_output(0.9) < 0.25);
    }

    #[test]
    fn clamp_keeps_logit_finite() {
        let clamped = clamp_to_band(&[0.0, 1.0, 0.5, -3.0, 7.0]);
        assert_eq!(clamped, vec![0.01, 0.99, 0.5, 0.01, 0.99]);
        assert!(logit_vec(&clamped).iter().all(|x| x.is_finite()));
    }

    #[test]
    fn rescale_maps_extremes_to_band_edges() {
        let scaled = rescale_to_band(&[-10.0, 0.0, 30.0]);
        assert!((scaled[0] - BAND_LOW).abs() < 1e-12);
        assert!((scaled[1] - (0.01 + 0.98 * 0.25)).abs() < 1e-12);
        assert!((scaled[2] - BAND_HIGH).abs() < 1e-12);
    }

    #[test]
    fn rescale_of_flat_vector_is_midpoint() {
        assert_eq!(rescale_to_band(&[3.0, 3.0, 3.0]), vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn rescale_passes_nan_through() {
        assert!(rescale_to_band(&[f64::NAN, f64::NAN]).iter().all(|v| v.is_nan()));
        let mixed = rescale_to_band(&[0.0, f64::NAN, 2.0]);
        assert!(mixed[1].is_nan());
        assert_eq!(mixed[0], 0.0);
    }
}
