//! The escape-time evaluator.  Given a point on the complex plane,
//! iterate `z = z² + c` from the origin and report how quickly the
//! orbit leaves the circle of radius two.

use num::Complex;

/// The iteration budget for every point.
pub const MAX_ITERATION: usize = 192;

/// Once the magnitude of an orbit exceeds this, it has escaped.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Returns the loop index at which the orbit of `c` was first seen
/// outside the escape radius, or `None` if it stayed inside for the
/// whole budget.  The magnitude is checked *before* each step, so a
/// point that starts outside the radius reports `Some(1)` and index
/// zero can never be returned.
pub fn escape_time(c: Complex<f64>) -> Option<usize> {
    let mut z: Complex<f64> = Complex { re: 0.0, im: 0.0 };
    for i in 0..MAX_ITERATION {
        if z.norm() > ESCAPE_RADIUS {
            return Some(i);
        }
        z = z * z + c;
    }
    None
}

/// The normalized divergence score of `c`, in `[0, 1)`.
///
/// The score is `(i - 1) / MAX_ITERATION` for an escape detected at
/// index `i`, and exactly zero for a point that never escapes.  That
/// makes "escaped on the first check" and "never escaped" the same
/// value; use `escape_time` when the difference matters.
pub fn divergence(c: Complex<f64>) -> f64 {
    match escape_time(c) {
        Some(i) => (i - 1) as f64 / MAX_ITERATION as f64,
        None => 0.0,
    }
}
