//! Root finding for monotone scalar functions
//!
//! `find_root` is Brent's method: it keeps a sign-changing bracket at every
//! step and mixes bisection with secant and inverse quadratic interpolation
//! steps, so it converges superlinearly on smooth functions and still
//! terminates on functions that are flat near the root (saturated
//! probabilities, step-shaped CDFs).
//!
//! `find_root_expand` first widens a guessed bracket geometrically until it
//! straddles a sign change, then delegates to `find_root`.

use crate::error::{AimError, Result};

/// Iteration cap for the bracketed search
pub const MAX_ITERATIONS: usize = 1000;

/// Geometric growth factor applied when widening a bracket
pub const EXPAND_FACTOR: f64 = 1.6;

/// Expansion cap for the unbounded search
pub const MAX_EXPANSIONS: usize = 100;

/// True when `[f_a, f_b]` contains a root of a continuous function
fn brackets_root(f_a: f64, f_b: f64) -> bool {
    if f_a.is_nan() || f_b.is_nan() {
        return false;
    }
    f_a == 0.0 || f_b == 0.0 || (f_a < 0.0) != (f_b < 0.0)
}

/// Find `x` in `[lower, upper]` with `f(x) ≈ 0` to within `tolerance`
///
/// `f(lower)` and `f(upper)` must have opposite signs (or one of them must be
/// exactly zero).
///
/// # Example
/// ```
/// use aimtp::roots::find_root;
///
/// let root = find_root(|x| x * x - 2.0, 0.0, 2.0, 1e-10).unwrap();
/// assert!((root - 2f64.sqrt()).abs() < 1e-9);
/// ```
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn find_root<F>(mut f: F, lower: f64, upper: f64, tolerance: f64) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    let mut a = lower;
    let mut b = upper;
    let mut f_a = f(a);
    let mut f_b = f(b);

    if !(lower < upper) || !brackets_root(f_a, f_b) {
        return Err(AimError::InvalidBracket {
            lower,
            upper,
            f_lower: f_a,
            f_upper: f_b,
        });
    }

    if f_a == 0.0 {
        return Ok(a);
    }
    if f_b == 0.0 {
        return Ok(b);
    }

    // `c` is the contrapoint: f(b) and f(c) always straddle zero
    let mut c = b;
    let mut f_c = f_b;
    let mut step = b - a;
    let mut prev_step = step;

    for iteration in 0..MAX_ITERATIONS {
        if (f_b < 0.0) == (f_c < 0.0) {
            c = a;
            f_c = f_a;
            step = b - a;
            prev_step = step;
        }

        // Keep b as the best estimate
        if f_c.abs() < f_b.abs() {
            a = b;
            b = c;
            c = a;
            f_a = f_b;
            f_b = f_c;
            f_c = f_a;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * tolerance;
        let half_width = 0.5 * (c - b);

        if half_width.abs() <= tol || f_b == 0.0 {
            tracing::trace!(iteration, root = b, "brent converged");
            return Ok(b);
        }

        if prev_step.abs() >= tol && f_a.abs() > f_b.abs() {
            let s = f_b / f_a;
            let (mut p, mut q) = if a == c {
                // Secant
                (2.0 * half_width * s, 1.0 - s)
            } else {
                // Inverse quadratic interpolation
                let q = f_a / f_c;
                let r = f_b / f_c;
                (
                    s * (2.0 * half_width * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let interpolation_limit = 3.0 * half_width * q - (tol * q).abs();
            let previous_limit = (prev_step * q).abs();
            if 2.0 * p < interpolation_limit.min(previous_limit) {
                prev_step = step;
                step = p / q;
            } else {
                step = half_width;
                prev_step = step;
            }
        } else {
            step = half_width;
            prev_step = step;
        }

        a = b;
        f_a = f_b;
        b += if step.abs() > tol {
            step
        } else {
            tol.copysign(half_width)
        };
        f_b = f(b);
    }

    Err(AimError::NoConvergence {
        iterations: MAX_ITERATIONS,
        estimate: b,
    })
}

/// Widen `[lower, upper]` until it brackets a root of `f`
///
/// Each round moves the endpoint whose function value is closer to zero
/// outward by `EXPAND_FACTOR` times the current width.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn expand_bracket<F>(mut f: F, lower: f64, upper: f64) -> Result<(f64, f64)>
where
    F: FnMut(f64) -> f64,
{
    let mut lower = lower;
    let mut upper = upper;
    let mut f_lower = f(lower);
    let mut f_upper = f(upper);

    if !(lower < upper) {
        return Err(AimError::InvalidBracket {
            lower,
            upper,
            f_lower,
            f_upper,
        });
    }

    for expansion in 0..MAX_EXPANSIONS {
        if brackets_root(f_lower, f_upper) {
            return Ok((lower, upper));
        }

        let width = upper - lower;
        if f_lower.abs() < f_upper.abs() {
            lower -= EXPAND_FACTOR * width;
            f_lower = f(lower);
        } else {
            upper += EXPAND_FACTOR * width;
            f_upper = f(upper);
        }

        tracing::trace!(expansion, lower, upper, "expanded root bracket");
    }

    if brackets_root(f_lower, f_upper) {
        return Ok((lower, upper));
    }

    Err(AimError::BracketNotFound {
        lower,
        upper,
        expansions: MAX_EXPANSIONS,
    })
}

/// Find a root of `f`, widening `[lower, upper]` first if it does not
/// bracket one
///
/// # Example
/// ```
/// use aimtp::roots::find_root_expand;
///
/// let root = find_root_expand(|x| x - 5000.0, -100.0, 1000.0, 1e-8).unwrap();
/// assert!((root - 5000.0).abs() < 1e-6);
/// ```
pub fn find_root_expand<F>(mut f: F, lower: f64, upper: f64, tolerance: f64) -> Result<f64>
where
    F: FnMut(f64) -> f64,
{
    let (lower, upper) = expand_bracket(&mut f, lower, upper)?;
    find_root(f, lower, upper, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_two() {
        let root = find_root(|x| x * x - 2.0, 0.0, 2.0, 1e-12).unwrap();
        assert!((root - std::f64::consts::SQRT_2).abs() < 1e-11);
    }

    #[test]
    fn test_decreasing_function() {
        let root = find_root(|x| 3.0 - x, 0.0, 10.0, 1e-10).unwrap();
        assert!((root - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_function_converges_to_step() {
        let root = find_root(|x| if x < 3.25 { -1.0 } else { 1.0 }, 0.0, 10.0, 1e-8).unwrap();
        assert!((root - 3.25).abs() < 1e-7);
    }

    #[test]
    fn test_flat_near_root() {
        // Saturating shape: almost exactly -0.02 for small x, then climbs
        let f = |x: f64| {
            let p = if x < 50.0 { 0.0 } else { 1.0 - (-(x - 50.0)).exp() };
            p - 0.02
        };
        let root = find_root(f, 0.1, 100.0, 1e-8).unwrap();
        let expected = 50.0 - (0.98f64).ln();
        assert!((root - expected).abs() < 1e-6);
    }

    #[test]
    fn test_root_at_endpoint() {
        assert_eq!(find_root(|x| x, 0.0, 1.0, 1e-8).unwrap(), 0.0);
        assert_eq!(find_root(|x| x - 1.0, 0.0, 1.0, 1e-8).unwrap(), 1.0);
    }

    #[test]
    fn test_invalid_bracket_without_sign_change() {
        let err = find_root(|x| x * x + 1.0, -1.0, 1.0, 1e-8).unwrap_err();
        assert!(matches!(err, AimError::InvalidBracket { .. }));
    }

    #[test]
    fn test_invalid_bracket_reversed() {
        let err = find_root(|x| x, 1.0, -1.0, 1e-8).unwrap_err();
        assert!(matches!(err, AimError::InvalidBracket { .. }));
    }

    #[test]
    fn test_expand_upward() {
        let root = find_root_expand(|x| x - 5000.0, -100.0, 1000.0, 1e-8).unwrap();
        assert!((root - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn test_expand_downward() {
        let root = find_root_expand(|x| x + 700.0, -100.0, 1000.0, 1e-8).unwrap();
        assert!((root + 700.0).abs() < 1e-6);
    }

    #[test]
    fn test_expand_not_needed() {
        let (lower, upper) = expand_bracket(|x| x - 3.0, -100.0, 1000.0).unwrap();
        assert_eq!((lower, upper), (-100.0, 1000.0));
    }

    #[test]
    fn test_expand_exhausted() {
        let err = find_root_expand(|x| x * x + 1.0, -100.0, 1000.0, 1e-8).unwrap_err();
        assert!(matches!(
            err,
            AimError::BracketNotFound {
                expansions: MAX_EXPANSIONS,
                ..
            }
        ));
    }

    #[test]
    fn test_counts_evaluations() {
        let mut calls = 0;
        let root = find_root(
            |x| {
                calls += 1;
                x.powi(3) - 8.0
            },
            0.0,
            100.0,
            1e-10,
        )
        .unwrap();
        assert!((root - 2.0).abs() < 1e-9);
        assert!(calls < 200, "took {calls} evaluations");
    }
}
