use tracing::trace;

/// Walks the difference curve left to right and decides which local
/// maximum is accepted as the knee.
///
/// The scan starts just after the first maximum. While it runs, one maximum
/// is "current"; its threshold is what later points are compared against.
///
/// * Reaching the next maximum makes it current, and the point right after
///   it is skipped.
/// * A local minimum followed by a rise resets the current threshold to
///   zero (the curve flattened out after the peak).
/// * A point below the current threshold, or a negative current threshold,
///   records the current maximum as the knee.
///
/// Every record overwrites the previous one, so the knee is the last
/// maximum recorded during the scan.
#[derive(Debug, Clone)]
pub struct KneeScanner<'a> {
    y_diff: &'a [f64],
    maxima: &'a [usize],
    minima: &'a [usize],
    thresholds: Vec<f64>,
    current: usize,
    recorded: Vec<usize>,
}

/// Result of a [`KneeScanner`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// Index into the difference curve of the accepted maximum
    pub knee: Option<usize>,
    /// Every maximum recorded as the knee, in scan order
    pub knees: Vec<usize>,
    /// Thresholds after any plateau resets
    pub thresholds: Vec<f64>,
}

impl<'a> KneeScanner<'a> {
    /// Creates a scanner. `thresholds` holds one value per entry of
    /// `maxima`; `maxima` and `minima` must be ascending indices into
    /// `y_diff`.
    pub fn new(
        y_diff: &'a [f64],
        maxima: &'a [usize],
        minima: &'a [usize],
        thresholds: Vec<f64>,
    ) -> Self {
        debug_assert_eq!(maxima.len(), thresholds.len());
        Self {
            y_diff,
            maxima,
            minima,
            thresholds,
            current: 0,
            recorded: Vec::new(),
        }
    }

    pub fn run(mut self) -> ScanOutcome {
        if let Some(&first) = self.maxima.first() {
            let mut i = first + 1;
            while i < self.y_diff.len() {
                if self.maxima.get(self.current + 1) == Some(&i) {
                    self.advance_maximum();
                    i += 2;
                    continue;
                }

                if self.rises_after_minimum(i) {
                    self.reset_threshold();
                }

                let threshold = self.thresholds[self.current];
                if self.y_diff[i] < threshold || threshold < 0.0 {
                    self.record();
                }
                i += 1;
            }
        }

        ScanOutcome {
            knee: self.recorded.last().copied(),
            knees: self.recorded,
            thresholds: self.thresholds,
        }
    }

    fn advance_maximum(&mut self) {
        self.current += 1;
        trace!(maximum = self.maxima[self.current], "next local maximum");
    }

    fn rises_after_minimum(&self, i: usize) -> bool {
        self.minima.binary_search(&i).is_ok()
            && self
                .y_diff
                .get(i + 1)
                .is_some_and(|&next| next > self.y_diff[i])
    }

    fn reset_threshold(&mut self) {
        trace!(maximum = self.maxima[self.current], "threshold reset after local minimum");
        self.thresholds[self.current] = 0.0;
    }

    fn record(&mut self) {
        let maximum = self.maxima[self.current];
        if self.recorded.last() != Some(&maximum) {
            self.recorded.push(maximum);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(y_diff: &[f64], maxima: &[usize], minima: &[usize], thresholds: &[f64]) -> ScanOutcome {
        KneeScanner::new(y_diff, maxima, minima, thresholds.to_vec()).run()
    }

    #[test]
    fn test_no_maxima() {
        let outcome = scan(&[0.0, 0.0, 0.0], &[], &[], &[]);
        assert_eq!(outcome.knee, None);
        assert!(outcome.knees.is_empty());
    }

    #[test]
    fn test_single_maximum_accepted() {
        let y_diff = vec![0.0, 0.5, 0.4, 0.2, 0.0];
        let outcome = scan(&y_diff, &[1], &[], &[0.3]);
        assert_eq!(outcome.knee, Some(1));
        assert_eq!(outcome.knees, vec![1]);
    }

    #[test]
    fn test_threshold_never_reached() {
        let y_diff = vec![0.0, 0.5, 0.45, 0.42, 0.41];
        let outcome = scan(&y_diff, &[1], &[], &[0.3]);
        assert_eq!(outcome.knee, None);
    }

    #[test]
    fn test_negative_threshold_accepts_immediately() {
        let y_diff = vec![0.0, 0.1, 0.05];
        let outcome = scan(&y_diff, &[1], &[], &[-0.4]);
        assert_eq!(outcome.knee, Some(1));
    }

    #[test]
    fn test_last_recorded_maximum_wins() {
        // Both peaks drop far enough below their thresholds
        let y_diff = vec![0.0, 0.6, 0.1, 0.0, 0.1, 0.0, 0.7, 0.2, 0.0];
        let maxima = vec![1, 4, 6];
        let minima = vec![3, 5];
        let outcome = scan(&y_diff, &maxima, &minima, &[0.5, 0.05, 0.6]);

        assert_eq!(outcome.knees, vec![1, 6]);
        assert_eq!(outcome.knee, Some(6));
    }

    #[test]
    fn test_reaching_next_maximum_skips_following_point() {
        // Index 3 is skipped after reaching the maximum at 2, so the low
        // value there never triggers the second maximum
        let y_diff = vec![0.0, 0.5, 0.6, 0.0, 0.59, 0.58];
        let outcome = scan(&y_diff, &[1, 2], &[], &[0.4, 0.5]);
        assert_eq!(outcome.knee, None);
    }

    #[test]
    fn test_threshold_reset_after_minimum() {
        // The minimum at 3 is followed by a rise, which zeroes the threshold
        let y_diff = vec![0.0, 0.5, 0.45, 0.44, 0.46, 0.47, 0.48];
        let outcome = scan(&y_diff, &[1], &[3], &[0.3]);

        assert_eq!(outcome.thresholds, vec![0.0]);
        assert_eq!(outcome.knee, None);
    }

    #[test]
    fn test_minimum_without_rise_keeps_threshold() {
        let y_diff = vec![0.0, 0.5, 0.45, 0.44, 0.44, 0.1];
        let outcome = scan(&y_diff, &[1], &[], &[0.3]);

        assert_eq!(outcome.thresholds, vec![0.3]);
        assert_eq!(outcome.knee, Some(1));
    }
}
