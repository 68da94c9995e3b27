/// Squared-error metrics between network outputs and targets.
///
/// Training itself does not consult these; they report how far `query` is
/// from the targets.
pub struct MseLoss;

impl MseLoss {
    /// Σ (target - output)²
    pub fn sum_squared_error(output: &[f64], target: &[f64]) -> f64 {
        output.iter().zip(target.iter())
            .map(|(o, t)| (t - o).powi(2))
            .sum()
    }

    /// Scalar MSE: mean((target - output)²). Zero for empty slices.
    pub fn loss(output: &[f64], target: &[f64]) -> f64 {
        if output.is_empty() {
            return 0.0;
        }
        Self::sum_squared_error(output, target) / output.len() as f64
    }

    /// Per-output error: target - output.
    pub fn output_error(output: &[f64], target: &[f64]) -> Vec<f64> {
        output.iter().zip(target.iter())
            .map(|(o, t)| t - o)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_point_toward_target() {
        assert_eq!(MseLoss::output_error(&[0.2, 0.9], &[0.99, 0.01]), vec![0.99 - 0.2, 0.01 - 0.9]);
    }

    #[test]
    fn mean_divides_sum_by_length() {
        let (o, t) = ([0.0, 1.0], [1.0, 1.0]);
        assert_eq!(MseLoss::sum_squared_error(&o, &t), 1.0);
        assert_eq!(MseLoss::loss(&o, &t), 0.5);
        assert_eq!(MseLoss::loss(&[], &[]), 0.0);
    }
}
