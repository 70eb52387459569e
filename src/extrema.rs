/// Finds the indices of strict local maxima (`want_maxima = true`) or
/// minima (`want_maxima = false`) of `values`, in ascending order.
///
/// Each value is compared with its left and right neighbour. Neighbour
/// indices are clamped to the array, so the first and last values are
/// compared with themselves on their open side and are never reported.
/// NaN never compares, so a NaN value is never an extremum.
///
/// # Example
///
/// ```rust
/// use kneedle::find_local_extrema;
///
/// let values = [3.0, 1.0, 2.0, 0.5, 4.0];
/// assert_eq!(find_local_extrema(&values, true), vec![2]);
/// assert_eq!(find_local_extrema(&values, false), vec![1, 3]);
/// ```
pub fn find_local_extrema(values: &[f64], want_maxima: bool) -> Vec<usize> {
    let n = values.len();
    (0..n)
        .filter(|&i| {
            let value = values[i];
            let left = values[i.saturating_sub(1)];
            let right = values[(i + 1).min(n - 1)];
            if want_maxima {
                value > left && value > right
            } else {
                value < left && value < right
            }
        })
        .collect()
}
