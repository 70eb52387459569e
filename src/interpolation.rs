use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::error::{KneedleError, Result};

/// Minimum number of knots for an Akima spline.
pub const AKIMA_MIN_POINTS: usize = 5;

/// `Auto` switches from linear to Akima interpolation above this many points.
const AUTO_LINEAR_MAX_POINTS: usize = 5;

/// A function of one variable built from sampled data.
pub trait Interpolant {
    /// Evaluates the interpolant at `x`.
    fn value(&self, x: f64) -> f64;
}

impl<F> Interpolant for F
where
    F: Fn(f64) -> f64,
{
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Interpolation strategies used when resampling a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMethod {
    /// Akima spline for more than five points, linear otherwise
    #[default]
    Auto,
    /// Piecewise-linear interpolation
    Linear,
    /// Akima cubic spline (needs at least five points)
    Akima,
    /// Natural cubic spline (needs at least three points)
    CubicSpline,
}

impl InterpolationMethod {
    /// Resolves `Auto` to the concrete method used for `num_points` samples.
    pub fn resolve(self, num_points: usize) -> InterpolationMethod {
        match self {
            InterpolationMethod::Auto if num_points > AUTO_LINEAR_MAX_POINTS => {
                InterpolationMethod::Akima
            }
            InterpolationMethod::Auto => InterpolationMethod::Linear,
            method => method,
        }
    }
}

/// A piecewise cubic polynomial over sorted knots.
///
/// Segment `i` covers `[knots[i], knots[i + 1]]` and is evaluated as
/// `c0 + c1*t + c2*t^2 + c3*t^3` with `t = x - knots[i]`. Points outside the
/// knot range are evaluated on the nearest boundary segment.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewisePolynomial {
    knots: Vec<f64>,
    coefficients: Vec<[f64; 4]>,
}

impl PiecewisePolynomial {
    /// Builds the piecewise-linear interpolant through `(x, y)`.
    pub fn linear(x: &[f64], y: &[f64]) -> Result<Self> {
        check_knots(x, y, 2)?;

        let coefficients = x
            .windows(2)
            .zip(y.windows(2))
            .map(|(xs, ys)| [ys[0], (ys[1] - ys[0]) / (xs[1] - xs[0]), 0.0, 0.0])
            .collect();

        Ok(Self {
            knots: x.to_vec(),
            coefficients,
        })
    }

    /// Builds the Akima spline through `(x, y)`.
    ///
    /// Interior slopes are a weighted average of the neighbouring secants,
    /// weighted by how much the secants on the far side change. This keeps
    /// the curve from overshooting around abrupt bends. Slopes at the first
    /// two and last two knots come from a quadratic through the three
    /// boundary points.
    pub fn akima(x: &[f64], y: &[f64]) -> Result<Self> {
        check_knots(x, y, AKIMA_MIN_POINTS)?;

        let n = x.len();
        let secants: Vec<f64> = (0..n - 1)
            .map(|i| (y[i + 1] - y[i]) / (x[i + 1] - x[i]))
            .collect();

        let mut weights = vec![0.0; n - 1];
        for i in 1..n - 1 {
            weights[i] = (secants[i] - secants[i - 1]).abs();
        }

        let mut slopes = vec![0.0; n];
        for i in 2..n - 2 {
            let w_next = weights[i + 1];
            let w_prev = weights[i - 1];
            slopes[i] = if w_next == 0.0 && w_prev == 0.0 {
                ((x[i + 1] - x[i]) * secants[i - 1] + (x[i] - x[i - 1]) * secants[i])
                    / (x[i + 1] - x[i - 1])
            } else {
                (w_next * secants[i - 1] + w_prev * secants[i]) / (w_next + w_prev)
            };
        }

        slopes[0] = three_point_slope(x, y, 0, [0, 1, 2]);
        slopes[1] = three_point_slope(x, y, 1, [0, 1, 2]);
        slopes[n - 2] = three_point_slope(x, y, n - 2, [n - 3, n - 2, n - 1]);
        slopes[n - 1] = three_point_slope(x, y, n - 1, [n - 3, n - 2, n - 1]);

        Ok(Self::hermite(x, y, &slopes))
    }

    /// Builds the natural cubic spline through `(x, y)`.
    ///
    /// The second derivatives at the knots are found by solving the spline
    /// continuity system densely, so this is meant for curves of up to a few
    /// thousand points.
    pub fn cubic_spline(x: &[f64], y: &[f64]) -> Result<Self> {
        check_knots(x, y, 3)?;

        let n = x.len();
        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();

        // Natural boundary: zero curvature at both ends
        let mut system = DMatrix::<f64>::zeros(n, n);
        let mut rhs = DVector::<f64>::zeros(n);
        system[(0, 0)] = 1.0;
        system[(n - 1, n - 1)] = 1.0;
        for i in 1..n - 1 {
            system[(i, i - 1)] = h[i - 1];
            system[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            system[(i, i + 1)] = h[i];
            rhs[i] = 6.0 * ((y[i + 1] - y[i]) / h[i] - (y[i] - y[i - 1]) / h[i - 1]);
        }

        let curvature = system.lu().solve(&rhs).ok_or_else(|| {
            KneedleError::ComputationError("Failed to solve cubic spline system".to_string())
        })?;

        let coefficients = (0..n - 1)
            .map(|i| {
                let (m0, m1) = (curvature[i], curvature[i + 1]);
                [
                    y[i],
                    (y[i + 1] - y[i]) / h[i] - h[i] * (2.0 * m0 + m1) / 6.0,
                    m0 / 2.0,
                    (m1 - m0) / (6.0 * h[i]),
                ]
            })
            .collect();

        Ok(Self {
            knots: x.to_vec(),
            coefficients,
        })
    }

    /// Builds the cubic Hermite interpolant from knot values and slopes.
    fn hermite(x: &[f64], y: &[f64], slopes: &[f64]) -> Self {
        let coefficients = (0..x.len() - 1)
            .map(|i| {
                let w = x[i + 1] - x[i];
                let (d0, d1) = (slopes[i], slopes[i + 1]);
                [
                    y[i],
                    d0,
                    (3.0 * (y[i + 1] - y[i]) / w - 2.0 * d0 - d1) / w,
                    (2.0 * (y[i] - y[i + 1]) / w + d0 + d1) / (w * w),
                ]
            })
            .collect();

        Self {
            knots: x.to_vec(),
            coefficients,
        }
    }

    /// Returns the knots the polynomial was built on
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    fn segment(&self, x: f64) -> usize {
        let last = self.coefficients.len() - 1;
        self.knots
            .partition_point(|&knot| knot <= x)
            .saturating_sub(1)
            .min(last)
    }
}

impl Interpolant for PiecewisePolynomial {
    fn value(&self, x: f64) -> f64 {
        let i = self.segment(x);
        let t = x - self.knots[i];
        let [c0, c1, c2, c3] = self.coefficients[i];
        c0 + t * (c1 + t * (c2 + t * c3))
    }
}

/// Builds the interpolant for `(x, y)` with the given method.
///
/// `x` must be strictly ascending. `Auto` is resolved against `x.len()`.
pub fn interpolate(
    x: &[f64],
    y: &[f64],
    method: InterpolationMethod,
) -> Result<PiecewisePolynomial> {
    match method.resolve(x.len()) {
        InterpolationMethod::Linear | InterpolationMethod::Auto => {
            PiecewisePolynomial::linear(x, y)
        }
        InterpolationMethod::Akima => PiecewisePolynomial::akima(x, y),
        InterpolationMethod::CubicSpline => PiecewisePolynomial::cubic_spline(x, y),
    }
}

/// Resamples the curve `(x, y)` onto `x.len()` evenly spaced x values
/// spanning `[min(x), max(x)]`.
///
/// Returns `(x_spaced, y_spaced)`.
pub fn resample(
    x: &[f64],
    y: &[f64],
    method: InterpolationMethod,
) -> Result<(Vec<f64>, Vec<f64>)> {
    check_knots(x, y, 2)?;

    let method = method.resolve(x.len());
    debug!(points = x.len(), ?method, "resampling curve");

    let interpolant = interpolate(x, y, method)?;
    let (lo, hi) = x
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    Ok(resample_with(&interpolant, lo, hi, x.len()))
}

/// Evaluates `interpolant` at `num_points` evenly spaced x values over `[lo, hi]`.
pub fn resample_with<I: Interpolant + ?Sized>(
    interpolant: &I,
    lo: f64,
    hi: f64,
    num_points: usize,
) -> (Vec<f64>, Vec<f64>) {
    let x_spaced = linspace(lo, hi, num_points);
    let y_spaced = x_spaced.iter().map(|&v| interpolant.value(v)).collect();
    (x_spaced, y_spaced)
}

/// `num_points` evenly spaced values from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, num_points: usize) -> Vec<f64> {
    match num_points {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (num_points - 1) as f64;
            let mut values: Vec<f64> = (0..num_points).map(|i| lo + i as f64 * step).collect();
            values[num_points - 1] = hi;
            values
        }
    }
}

/// Slope at `x[at]` of the quadratic through the three samples `idx`.
fn three_point_slope(x: &[f64], y: &[f64], at: usize, idx: [usize; 3]) -> f64 {
    let [i0, i1, i2] = idx;
    let (y0, y1, y2) = (y[i0], y[i1], y[i2]);

    let t = x[at] - x[i0];
    let t1 = x[i1] - x[i0];
    let t2 = x[i2] - x[i0];

    let a = (y2 - y0 - (t2 / t1 * (y1 - y0))) / (t2 * t2 - t1 * t2);
    let b = (y1 - y0 - a * t1 * t1) / t1;
    2.0 * a * t + b
}

fn check_knots(x: &[f64], y: &[f64], required: usize) -> Result<()> {
    if x.len() != y.len() {
        return Err(KneedleError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < required {
        return Err(KneedleError::InsufficientData {
            len: x.len(),
            required,
        });
    }
    Ok(())
}
