use tracing::debug;

use crate::curve::{self, Concavity, DiffFormula, Direction};
use crate::error::{KneedleError, Result};
use crate::extrema::find_local_extrema;
use crate::interpolation::{resample, InterpolationMethod};
use crate::scanner::KneeScanner;

/// Configuration for the Kneedle detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KneedleConfig {
    /// Whether y grows or shrinks with x
    pub direction: Direction,
    /// Which way the curve bends
    pub concavity: Concavity,
    /// How far below a peak the difference curve must fall before the peak
    /// is accepted, in units of the mean normalized x step
    pub sensitivity: f64,
    /// How the curve is resampled onto even x spacing
    pub interpolation: InterpolationMethod,
}

impl KneedleConfig {
    /// Creates a configuration with sensitivity 1 and automatic interpolation
    pub fn new(direction: Direction, concavity: Concavity) -> Self {
        Self {
            direction,
            concavity,
            sensitivity: 1.0,
            interpolation: InterpolationMethod::Auto,
        }
    }

    /// Sets the sensitivity
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Sets the interpolation method
    pub fn with_interpolation(mut self, interpolation: InterpolationMethod) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Checks that the configuration can be used for detection
    pub fn validate(&self) -> Result<()> {
        if !self.sensitivity.is_finite() {
            return Err(KneedleError::InvalidSensitivity(self.sensitivity));
        }
        Ok(())
    }
}

/// A detected knee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Knee {
    /// Position in the sample series
    pub index: usize,
    /// Original x value at `index`
    pub x: f64,
    /// Original y value at `index`
    pub y: f64,
}

/// Every intermediate series of one detection run.
#[derive(Debug, Clone, PartialEq)]
pub struct KneeAnalysis {
    x_spaced: Vec<f64>,
    y_spaced: Vec<f64>,
    x_norm: Vec<f64>,
    y_norm: Vec<f64>,
    y_diff: Vec<f64>,
    maxima: Vec<usize>,
    minima: Vec<usize>,
    thresholds: Vec<f64>,
    knees: Vec<Knee>,
}

impl KneeAnalysis {
    /// The accepted knee, if any
    pub fn knee(&self) -> Option<Knee> {
        self.knees.last().copied()
    }

    /// Every maximum the scan recorded as the knee, in scan order. The last
    /// one is [`KneeAnalysis::knee`].
    pub fn knees(&self) -> &[Knee] {
        &self.knees
    }

    pub fn x_spaced(&self) -> &[f64] {
        &self.x_spaced
    }

    pub fn y_spaced(&self) -> &[f64] {
        &self.y_spaced
    }

    pub fn x_norm(&self) -> &[f64] {
        &self.x_norm
    }

    pub fn y_norm(&self) -> &[f64] {
        &self.y_norm
    }

    /// The difference curve searched for knees
    pub fn y_diff(&self) -> &[f64] {
        &self.y_diff
    }

    /// Local maxima of the difference curve
    pub fn maxima(&self) -> &[usize] {
        &self.maxima
    }

    /// Local minima of the difference curve
    pub fn minima(&self) -> &[usize] {
        &self.minima
    }

    /// One threshold per maximum, after any plateau resets during the scan
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }
}

/// Kneedle knee detector.
///
/// # Example
///
/// ```rust
/// use kneedle::{Concavity, Direction, Kneedle, KneedleConfig};
///
/// let config = KneedleConfig::new(Direction::Increasing, Concavity::Counterclockwise);
/// let kneedle = Kneedle::new(config).expect("Valid configuration");
///
/// let knee = kneedle.knee(&[0.0, 1.0, 2.0], &[2.0, 4.0, 10.0]).unwrap();
/// assert_eq!(knee.map(|k| k.x), Some(1.0));
/// ```
#[derive(Debug, Clone)]
pub struct Kneedle {
    config: KneedleConfig,
}

impl Kneedle {
    /// Creates a detector, rejecting invalid configurations
    pub fn new(config: KneedleConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the detector configuration
    pub fn config(&self) -> &KneedleConfig {
        &self.config
    }

    /// Finds the knee of the curve `(x, y)`.
    ///
    /// `Ok(None)` means the input was valid but the curve has no knee.
    pub fn knee(&self, x: &[f64], y: &[f64]) -> Result<Option<Knee>> {
        Ok(self.analyze(x, y)?.knee())
    }

    /// Runs the full detection and keeps every intermediate series.
    ///
    /// `x` must be finite and strictly ascending, `y` finite and of the same
    /// length, with at least two samples.
    pub fn analyze(&self, x: &[f64], y: &[f64]) -> Result<KneeAnalysis> {
        validate_samples(x, y)?;

        let (x_spaced, y_spaced) = resample(x, y, self.config.interpolation)?;
        let x_norm = curve::normalize(&x_spaced);
        let y_norm = curve::normalize(&y_spaced);

        let formula = DiffFormula::select(self.config.direction, self.config.concavity);
        let y_diff = curve::difference_curve(&x_norm, &y_norm, formula);

        let maxima = find_local_extrema(&y_diff, true);
        let minima = find_local_extrema(&y_diff, false);
        let thresholds = curve::thresholds(&y_diff, &maxima, &x_norm, self.config.sensitivity);
        debug!(
            ?formula,
            maxima = maxima.len(),
            minima = minima.len(),
            "built difference curve"
        );

        let (thresholds, knees): (Vec<f64>, Vec<Knee>) = if maxima.is_empty() {
            debug!("difference curve has no local maxima");
            (thresholds, Vec::new())
        } else {
            let outcome = KneeScanner::new(&y_diff, &maxima, &minima, thresholds).run();
            let knees = outcome
                .knees
                .iter()
                .map(|&index| Knee {
                    index,
                    x: x[index],
                    y: y[index],
                })
                .collect();
            (outcome.thresholds, knees)
        };

        match knees.last() {
            Some(knee) => debug!(index = knee.index, x = knee.x, "knee found"),
            None => debug!("no knee found"),
        }

        Ok(KneeAnalysis {
            x_spaced,
            y_spaced,
            x_norm,
            y_norm,
            y_diff,
            maxima,
            minima,
            thresholds,
            knees,
        })
    }
}

fn validate_samples(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(KneedleError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(KneedleError::InsufficientData {
            len: x.len(),
            required: 2,
        });
    }
    if let Some(index) = x.iter().chain(y).position(|v| !v.is_finite()) {
        return Err(KneedleError::NonFiniteInput {
            index: index % x.len(),
        });
    }
    if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
        return Err(KneedleError::UnsortedInput { index: index + 1 });
    }
    Ok(())
}
