use num_traits::Float;
use std::fmt::Display;

/// Assert two float values are the same up to `eps`.
#[allow(dead_code)]
pub fn assert_float_eq<T>(left: T, right: T, eps: T)
where
    T: Float + Display,
{
    if left.is_nan() {
        assert!(right.is_nan(), "left is NaN, but right is not");
    } else if left.is_infinite() {
        assert!(left == right, "values {} and {} differ", left, right);
    } else {
        let diff = (left - right).abs();
        assert!(
            diff < eps,
            "values |{} - {}| ≥ {} (diff: {})",
            left,
            right,
            eps,
            diff
        );
    }
}

/// Assert two float slices are the same up to `eps`.
#[allow(dead_code)]
pub fn assert_floats_eq<T>(left: &[T], right: &[T], eps: T)
where
    T: Float + Display,
{
    assert_eq!(left.len(), right.len());
    for (l, r) in left.iter().zip(right.iter()) {
        assert_float_eq(*l, *r, eps)
    }
}

/// The ratio of first differences, `(y[i] - y[i-1]) / (x[i] - x[i-1])`.
///
/// The result has the same length as the input; element 0 has no predecessor
/// and is `None`. A zero step in `x` is not guarded against and yields an
/// infinite or NaN ratio.
pub fn diff_ratio<T: Float>(y: &[T], x: &[T]) -> Vec<Option<T>> {
    debug_assert_eq!(x.len(), y.len());
    let mut ratios = Vec::with_capacity(y.len());
    if !y.is_empty() {
        ratios.push(None);
    }
    ratios.extend(
        y.windows(2)
            .zip(x.windows(2))
            .map(|(dy, dx)| Some((dy[1] - dy[0]) / (dx[1] - dx[0]))),
    );
    ratios
}

/// Backward fill: every `None` takes the nearest following `Some` value.
///
/// Trailing `None`s have nothing to fill from and stay `None`.
pub fn backfill<T: Copy>(values: &[Option<T>]) -> Vec<Option<T>> {
    let mut filled = values.to_vec();
    let mut next = None;
    for value in filled.iter_mut().rev() {
        match value {
            Some(v) => next = Some(*v),
            None => *value = next,
        }
    }
    filled
}

/// The largest finite value, ignoring NaN and infinities.
pub fn max_finite<T: Float>(values: impl IntoIterator<Item = T>) -> Option<T> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some(v),
            Some(m) => Some(m.max(v)),
        })
}
