//! Core traits and error types
//!
//! [`Numeric`] is the guard every element passes through before it can join a
//! sample: it decides whether a value is a finite real number. [`QuantileError`]
//! is raised by the dynamically typed entry points when an argument is malformed.

#[cfg(feature = "std")]
use std::{boxed::Box, string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, string::String, vec::Vec};

/// Error raised when an argument does not satisfy the computation's contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantileError {
    /// An argument has the wrong shape or type
    InvalidArgument {
        /// Name of the offending argument (`values`, `n`, `options`, ...)
        argument: &'static str,
        /// Human-readable description of what was expected
        reason: String,
    },
}

impl QuantileError {
    #[cfg(feature = "json")]
    pub(crate) fn invalid(argument: &'static str, reason: impl Into<String>) -> Self {
        QuantileError::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    /// Name of the argument that failed validation
    pub fn argument(&self) -> &'static str {
        match self {
            QuantileError::InvalidArgument { argument, .. } => argument,
        }
    }
}

impl core::fmt::Display for QuantileError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QuantileError::InvalidArgument { argument, reason } => {
                write!(f, "invalid argument `{}`: {}", argument, reason)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QuantileError {}

/// A value that may or may not hold a usable number
///
/// Implementors report `Some(x)` only when they represent a real number and
/// `x` is finite. Missing markers, NaN, infinities, booleans, strings and
/// containers all report `None`; nothing is coerced.
pub trait Numeric {
    /// Extract the finite numeric value, if any
    fn to_finite(&self) -> Option<f64>;

    /// Whether this value would be kept in a filtered sample
    fn is_numeric(&self) -> bool {
        self.to_finite().is_some()
    }
}

#[inline]
fn finite(x: f64) -> Option<f64> {
    if x.is_finite() {
        Some(x)
    } else {
        None
    }
}

impl Numeric for f64 {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        finite(*self)
    }
}

impl Numeric for f32 {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        finite(f64::from(*self))
    }
}

// Integers are always finite. 64- and 128-bit values may round to the
// nearest representable f64.
macro_rules! impl_numeric_int {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn to_finite(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: Numeric> Numeric for Option<T> {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        self.as_ref().and_then(Numeric::to_finite)
    }
}

impl<T: Numeric + ?Sized> Numeric for &T {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        (**self).to_finite()
    }
}

impl<T: Numeric + ?Sized> Numeric for Box<T> {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        (**self).to_finite()
    }
}

impl Numeric for bool {
    /// Booleans are never numbers.
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        None
    }
}

impl Numeric for str {
    /// Strings are never parsed, even when they spell a number.
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        None
    }
}

impl Numeric for String {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        None
    }
}

impl<T> Numeric for Vec<T> {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        None
    }
}

impl<T> Numeric for [T] {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        None
    }
}

impl Numeric for () {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        None
    }
}
