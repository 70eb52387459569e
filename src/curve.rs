//! Normalization, the Kneedle difference curve and its thresholds.

/// Whether the curve's y values grow or shrink as x grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increasing,
    Decreasing,
}

/// Which way the curve's tangent turns as x grows.
///
/// `Counterclockwise` is also called positive concavity (bends upward, like
/// `y = x^2`), `Clockwise` negative concavity (bends downward, like `y = ln x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concavity {
    Counterclockwise,
    Clockwise,
}

/// The combination of normalized x and y whose local maxima mark knee
/// candidates, one per direction and concavity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffFormula {
    /// `1 - (x + y)`
    DecreasingCounterclockwise,
    /// `x + y`
    DecreasingClockwise,
    /// `|y - x|`
    IncreasingCounterclockwise,
    /// `y - x`
    IncreasingClockwise,
}

impl DiffFormula {
    /// Picks the formula for a curve shape.
    pub fn select(direction: Direction, concavity: Concavity) -> Self {
        match (direction, concavity) {
            (Direction::Decreasing, Concavity::Counterclockwise) => {
                DiffFormula::DecreasingCounterclockwise
            }
            (Direction::Decreasing, Concavity::Clockwise) => DiffFormula::DecreasingClockwise,
            (Direction::Increasing, Concavity::Counterclockwise) => {
                DiffFormula::IncreasingCounterclockwise
            }
            (Direction::Increasing, Concavity::Clockwise) => DiffFormula::IncreasingClockwise,
        }
    }

    /// Applies the formula to one normalized sample.
    pub fn apply(self, x_norm: f64, y_norm: f64) -> f64 {
        match self {
            DiffFormula::DecreasingCounterclockwise => 1.0 - (x_norm + y_norm),
            DiffFormula::DecreasingClockwise => x_norm + y_norm,
            DiffFormula::IncreasingCounterclockwise => (y_norm - x_norm).abs(),
            DiffFormula::IncreasingClockwise => y_norm - x_norm,
        }
    }
}

/// Min-max normalizes `values` to [0, 1].
///
/// A constant input has no range; every output is then NaN. Callers that
/// need a finite result must not pass constant data.
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    values.iter().map(|&v| (v - min) / range).collect()
}

/// Builds the difference curve over normalized x and y.
pub fn difference_curve(x_norm: &[f64], y_norm: &[f64], formula: DiffFormula) -> Vec<f64> {
    x_norm
        .iter()
        .zip(y_norm)
        .map(|(&x, &y)| formula.apply(x, y))
        .collect()
}

/// Mean of the consecutive differences of `values`, summed explicitly.
///
/// NaN for fewer than two values.
pub fn mean_spacing(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let total: f64 = values.windows(2).map(|w| w[1] - w[0]).sum();
    total / (values.len() - 1) as f64
}

/// One decay threshold per local maximum of `y_diff`:
/// `y_diff[max] - sensitivity * mean_spacing(x_norm)`.
pub fn thresholds(y_diff: &[f64], maxima: &[usize], x_norm: &[f64], sensitivity: f64) -> Vec<f64> {
    let decay = sensitivity * mean_spacing(x_norm);
    maxima.iter().map(|&i| y_diff[i] - decay).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_normalize() {
        let normalized = normalize(&[2.0, 4.0, 10.0]);
        assert_eq!(normalized, vec![0.0, 0.25, 1.0]);

        let normalized = normalize(&[5.0, -5.0, 0.0]);
        assert_eq!(normalized, vec![1.0, 0.0, 0.5]);
    }

    #[test]
    fn test_normalize_constant_is_nan() {
        let normalized = normalize(&[3.0, 3.0, 3.0]);
        assert!(normalized.iter().all(|v| v.is_nan()));
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_formula_selection() {
        use Concavity::*;
        use Direction::*;

        assert_eq!(
            DiffFormula::select(Increasing, Counterclockwise),
            DiffFormula::IncreasingCounterclockwise
        );
        assert_eq!(
            DiffFormula::select(Increasing, Clockwise),
            DiffFormula::IncreasingClockwise
        );
        assert_eq!(
            DiffFormula::select(Decreasing, Counterclockwise),
            DiffFormula::DecreasingCounterclockwise
        );
        assert_eq!(
            DiffFormula::select(Decreasing, Clockwise),
            DiffFormula::DecreasingClockwise
        );
    }

    #[test]
    fn test_formulas() {
        assert_abs_diff_eq!(DiffFormula::DecreasingCounterclockwise.apply(0.25, 0.5), 0.25);
        assert_abs_diff_eq!(DiffFormula::DecreasingClockwise.apply(0.25, 0.5), 0.75);
        assert_abs_diff_eq!(DiffFormula::IncreasingCounterclockwise.apply(0.5, 0.25), 0.25);
        assert_abs_diff_eq!(DiffFormula::IncreasingClockwise.apply(0.5, 0.25), -0.25);
    }

    #[test]
    fn test_difference_curve() {
        let x_norm = vec![0.0, 0.5, 1.0];
        let y_norm = vec![0.0, 0.25, 1.0];
        let diff = difference_curve(&x_norm, &y_norm, DiffFormula::IncreasingCounterclockwise);
        assert_eq!(diff, vec![0.0, 0.25, 0.0]);
    }

    #[test]
    fn test_mean_spacing() {
        assert_abs_diff_eq!(mean_spacing(&[0.0, 0.5, 1.0]), 0.5);
        assert_abs_diff_eq!(mean_spacing(&[0.0, 0.1, 0.4, 1.0]), 1.0 / 3.0, epsilon = 1e-12);
        assert!(mean_spacing(&[1.0]).is_nan());
    }

    #[test]
    fn test_thresholds() {
        let y_diff = vec![0.0, 0.3, 0.1, 0.2, 0.0];
        let x_norm = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let tmx = thresholds(&y_diff, &[1, 3], &x_norm, 1.0);

        assert_eq!(tmx.len(), 2);
        assert_abs_diff_eq!(tmx[0], 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(tmx[1], -0.05, epsilon = 1e-12);

        let strict = thresholds(&y_diff, &[1, 3], &x_norm, 2.0);
        assert!(strict[0] < tmx[0]);
    }
}
