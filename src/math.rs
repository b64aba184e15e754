//! Float rounding helpers for std/no_std builds
//!
//! Uses the standard library when available and libm otherwise.

#[cfg(feature = "std")]
#[inline]
fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(not(feature = "std"))]
#[inline]
fn floor(x: f64) -> f64 {
    libm::floor(x)
}

#[cfg(feature = "std")]
#[inline]
fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(not(feature = "std"))]
#[inline]
fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

/// Exact integrality check with no epsilon.
///
/// A position that lands a rounding error away from an integer is treated as
/// fractional.
#[inline]
pub(crate) fn is_integral(x: f64) -> bool {
    x == floor(x)
}

/// Round a sample position up to the next index.
///
/// Positions in `(-1, 0)` round to index 0.
#[inline]
pub(crate) fn ceil_index(x: f64) -> usize {
    let c = ceil(x);
    if c <= 0.0 {
        0
    } else {
        c as usize
    }
}

/// Real-valued index of the `i`-th of `n` quantile boundaries in a sample of `len` values.
#[inline]
pub(crate) fn boundary_position(len: usize, i: usize, n: usize) -> f64 {
    (len as f64 * i as f64) / n as f64 - 1.0
}
