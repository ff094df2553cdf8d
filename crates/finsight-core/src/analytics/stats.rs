//! Small numeric helpers shared by the analyzers

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by n, not n - 1)
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = mean(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Ordinary least-squares slope of `values` against their index (0..n-1)
///
/// Returns 0 when the slope is undefined (fewer than two points).
pub fn ols_slope(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return 0.0;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

/// Percentage change from `previous` to `current`
///
/// `None` when `previous` is zero. The denominator is `|previous|` so a
/// move from -100 to -50 reads as +50%.
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous.abs() * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), 3.0);
    }

    #[test]
    fn test_population_std_dev() {
        assert_eq!(population_std_dev(&[]), 0.0);
        assert_eq!(population_std_dev(&[5.0, 5.0, 5.0]), 0.0);
        // Classic example: mean 5, population variance 4
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_ols_slope() {
        assert_eq!(ols_slope(&[]), 0.0);
        assert_eq!(ols_slope(&[42.0]), 0.0);
        assert!((ols_slope(&[100.0, 110.0, 120.0]) - 10.0).abs() < 1e-9);
        assert!((ols_slope(&[300.0, 200.0]) + 100.0).abs() < 1e-9);
        assert_eq!(ols_slope(&[50.0, 50.0, 50.0, 50.0]), 0.0);
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(150.0, 100.0), Some(50.0));
        assert_eq!(percent_change(50.0, 100.0), Some(-50.0));
        assert_eq!(percent_change(-50.0, -100.0), Some(50.0));
        assert_eq!(percent_change(10.0, 0.0), None);
    }
}
