//! # Kneedle
//!
//! Knee (elbow) detection for discrete curves in Rust, following the
//! Kneedle algorithm.
//!
//! The knee of a curve is the point of maximum curvature, where continuing
//! along the curve stops paying off. It is a common way to pick an operating
//! point automatically: the number of clusters from an inertia curve, a
//! cutoff threshold, a compression level.
//!
//! ## How it works
//!
//! - The curve is resampled onto evenly spaced x values (Akima spline for
//!   more than five points, linear interpolation otherwise)
//! - Both axes are min-max normalized to [0, 1]
//! - A difference curve measures how far the curve departs from the
//!   straight line between its ends; its local maxima are knee candidates
//! - Each candidate gets a threshold, and a left-to-right scan accepts the
//!   candidate whose difference curve drops below it
//!
//! The caller must say whether the curve is increasing or decreasing and
//! which way it bends.
//!
//! ## Example
//!
//! ```rust
//! use kneedle::{calculate_knee_point, Concavity, Direction};
//!
//! let x: Vec<f64> = (0..100).map(|i| i as f64).collect();
//! let y: Vec<f64> = (0..100).map(|i| 1.05_f64.powi(i)).collect();
//!
//! let knee = calculate_knee_point(
//!     &x,
//!     &y,
//!     Direction::Increasing,
//!     Concavity::Counterclockwise,
//!     1.0,
//!     false,
//! );
//! assert_eq!(knee, Some(67.0));
//! ```

mod csv_utils;
mod curve;
mod error;
mod extrema;
mod interpolation;
mod kneedle;
mod scanner;

pub use csv_utils::{read_csv_column, read_csv_series};
pub use curve::{
    difference_curve, mean_spacing, normalize, thresholds, Concavity, DiffFormula, Direction,
};
pub use error::{KneedleError, Result};
pub use extrema::find_local_extrema;
pub use interpolation::{
    interpolate, linspace, resample, resample_with, Interpolant, InterpolationMethod,
    PiecewisePolynomial, AKIMA_MIN_POINTS,
};
pub use kneedle::{Knee, KneeAnalysis, Kneedle, KneedleConfig};
pub use scanner::{KneeScanner, ScanOutcome};

use tracing::debug;

/// Finds the x coordinate of the knee of the curve `(x, y)`.
///
/// `x` must be strictly ascending and `y` must have the same length. The
/// result is always one of the values of `x`. Any input that cannot be
/// analyzed (empty, mismatched lengths, fewer than two points, non-finite
/// or unsorted values, non-finite sensitivity) gives `None`, as does a curve
/// without a knee.
///
/// # Arguments
///
/// * `direction` - Whether y increases or decreases with x
/// * `concavity` - Which way the curve bends
/// * `sensitivity` - How far the curve must fall below a peak before the
///   peak is accepted; 1.0 is the usual choice
/// * `force_linear_interpolation` - Resample with linear interpolation even
///   when there are enough points for a spline
pub fn calculate_knee_point(
    x: &[f64],
    y: &[f64],
    direction: Direction,
    concavity: Concavity,
    sensitivity: f64,
    force_linear_interpolation: bool,
) -> Option<f64> {
    let interpolation = if force_linear_interpolation {
        InterpolationMethod::Linear
    } else {
        InterpolationMethod::Auto
    };
    let config = KneedleConfig::new(direction, concavity)
        .with_sensitivity(sensitivity)
        .with_interpolation(interpolation);

    match Kneedle::new(config).and_then(|kneedle| kneedle.knee(x, y)) {
        Ok(knee) => knee.map(|k| k.x),
        Err(err) => {
            debug!(error = %err, "knee detection rejected input");
            None
        }
    }
}

/// Finds the knee with sensitivity 1.0 and automatic interpolation.
///
/// # Example
///
/// ```rust
/// use kneedle::{knee, Concavity, Direction};
///
/// let x = vec![0.0, 7.0, 100.0];
/// let y = vec![2.0, 4.0, 10.0];
/// assert_eq!(knee(&x, &y, Direction::Increasing, Concavity::Counterclockwise), Some(7.0));
/// ```
pub fn knee(x: &[f64], y: &[f64], direction: Direction, concavity: Concavity) -> Option<f64> {
    calculate_knee_point(x, y, direction, concavity, 1.0, false)
}
