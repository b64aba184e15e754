//! NaN-ignoring quantile boundaries
//!
//! Splits a sample into `n` equal-probability intervals and reports the
//! `n + 1` boundaries between them, the first being the minimum and the last
//! the maximum. Elements that are not finite numbers are skipped.
//!
//! # Interpolation
//!
//! For the `i`-th intermediate boundary of a sorted sample `x[0..len]` the
//! position `p = len * i / n - 1` is computed in floating point:
//!
//! - if `p` is exactly an integer, the boundary is `(x[p] + x[p + 1]) / 2`
//! - otherwise it is `x[ceil(p)]`
//!
//! The integer test has no tolerance. A position that lands a rounding error
//! away from an integer takes the `ceil` branch.
//!
//! Sorting uses `f64::total_cmp`, which orders `-0.0` before `0.0`. The two
//! compare equal as numbers, so only the sign of a zero boundary can differ
//! from a comparator that treats them as ties.

use crate::math;
use crate::traits::Numeric;
use core::marker::PhantomData;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Maps a collection element to a candidate number
///
/// The candidate still has to pass the [`Numeric`] guard, so an accessor may
/// return a missing marker or any other non-numeric value.
pub trait Accessor<T: ?Sized> {
    /// Extract the finite value of `item`, if it has one
    fn extract(&self, item: &T) -> Option<f64>;
}

/// Uses each element as its own candidate value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl<T: Numeric + ?Sized> Accessor<T> for Identity {
    #[inline]
    fn extract(&self, item: &T) -> Option<f64> {
        item.to_finite()
    }
}

/// Accessor backed by a closure or function
#[derive(Clone, Copy)]
pub struct FnAccessor<F> {
    f: F,
}

impl<F> FnAccessor<F> {
    /// Wrap `f`
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> core::fmt::Debug for FnAccessor<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnAccessor(..)")
    }
}

impl<T, F, R> Accessor<T> for FnAccessor<F>
where
    T: ?Sized,
    F: Fn(&T) -> R,
    R: Numeric,
{
    #[inline]
    fn extract(&self, item: &T) -> Option<f64> {
        (self.f)(item).to_finite()
    }
}

/// Options for [`nanquantiles_with`]
///
/// # Example
///
/// ```
/// use nanquantiles::quantiles::{nanquantiles_with, QuantileOptions};
///
/// let rows = [(0, 1.0), (1, 2.0), (2, 3.0), (3, 4.0), (4, 5.0)];
/// let options = QuantileOptions::new()
///     .sorted(true)
///     .accessor(|row: &(i32, f64)| row.1);
///
/// assert_eq!(nanquantiles_with(&rows, 2, &options), Some(vec![1.0, 3.0, 5.0]));
/// ```
#[derive(Clone, Debug)]
pub struct QuantileOptions<A = Identity> {
    sorted: bool,
    accessor: A,
}

impl Default for QuantileOptions<Identity> {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantileOptions<Identity> {
    /// Unsorted input, identity accessor
    pub fn new() -> Self {
        Self {
            sorted: false,
            accessor: Identity,
        }
    }
}

impl<A> QuantileOptions<A> {
    /// Assert that the extracted numeric values are already ascending.
    ///
    /// This is not checked. If the assertion is false the boundaries are
    /// meaningless, but no error is raised.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Extract candidate values with `f`
    pub fn accessor<F>(self, f: F) -> QuantileOptions<FnAccessor<F>> {
        self.with_accessor(FnAccessor::new(f))
    }

    /// Extract candidate values with any [`Accessor`] implementation
    pub fn with_accessor<B>(self, accessor: B) -> QuantileOptions<B> {
        QuantileOptions {
            sorted: self.sorted,
            accessor,
        }
    }

    /// Whether the input is asserted to be ascending
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The configured accessor
    pub fn accessor_ref(&self) -> &A {
        &self.accessor
    }
}

// Only `sorted` is data; the accessor is code. Unknown keys are ignored and
// a missing `sorted` means unsorted.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawOptions {
    #[serde(default)]
    sorted: bool,
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for QuantileOptions<Identity> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawOptions::deserialize(deserializer)?;
        Ok(QuantileOptions::new().sorted(raw.sorted))
    }
}

/// Collect the finite values of `values` in input order.
pub fn filtered_sample<T, A>(values: &[T], accessor: &A) -> Vec<f64>
where
    A: Accessor<T>,
{
    values.iter().filter_map(|v| accessor.extract(v)).collect()
}

/// Quantile boundaries of an ascending sample
///
/// Returns `None` for an empty sample. The sample is trusted to be sorted.
///
/// # Panics
///
/// Panics if `n` is `usize::MAX`, since `n + 1` boundaries cannot be counted.
pub fn quantiles_sorted(sample: &[f64], n: usize) -> Option<Vec<f64>> {
    assert!(
        n < usize::MAX,
        "quantile count must be below usize::MAX, got {}",
        n
    );
    let len = sample.len();
    let (&first, &last) = (sample.first()?, sample.last()?);

    let mut boundaries = vec![0.0; n + 1];
    boundaries[0] = first;
    // With n == 0 this overwrites the minimum.
    boundaries[n] = last;

    for (i, slot) in boundaries.iter_mut().enumerate().take(n).skip(1) {
        let pos = math::boundary_position(len, i, n);
        *slot = if math::is_integral(pos) {
            let lo = pos as usize;
            (sample[lo] + sample[lo + 1]) / 2.0
        } else {
            sample[math::ceil_index(pos)]
        };
    }

    Some(boundaries)
}

/// Quantile boundaries of `values`, ignoring non-numeric elements
///
/// Returns `n + 1` values: the minimum, `n - 1` intermediate boundaries and
/// the maximum. Returns `None` when no element is a finite number.
///
/// # Example
///
/// ```
/// use nanquantiles::quantiles::nanquantiles;
///
/// let values = [Some(5.0), None, Some(1.0), Some(f64::NAN), Some(3.0)];
/// assert_eq!(nanquantiles(&values, 2), Some(vec![1.0, 3.0, 5.0]));
///
/// let empty: [Option<f64>; 2] = [None, None];
/// assert_eq!(nanquantiles(&empty, 4), None);
/// ```
pub fn nanquantiles<T: Numeric>(values: &[T], n: usize) -> Option<Vec<f64>> {
    nanquantiles_with(values, n, &QuantileOptions::new())
}

/// Quantile boundaries of `values` with explicit options
///
/// The caller's slice is never reordered; sorting happens on the filtered copy.
///
/// # Panics
///
/// Panics if `n` is `usize::MAX` and the sample is non-empty.
pub fn nanquantiles_with<T, A>(
    values: &[T],
    n: usize,
    options: &QuantileOptions<A>,
) -> Option<Vec<f64>>
where
    A: Accessor<T>,
{
    let mut sample = filtered_sample(values, &options.accessor);
    log::trace!(
        "nanquantiles: kept {} of {} values, n={}, sorted={}",
        sample.len(),
        values.len(),
        n,
        options.sorted
    );

    if sample.is_empty() {
        log::debug!("nanquantiles: no finite values among {} inputs", values.len());
        return None;
    }
    if n == 0 {
        log::debug!("nanquantiles: n=0, returning the maximum only");
    }

    if !options.sorted {
        sample.sort_by(|a, b| a.total_cmp(b));
    }

    quantiles_sorted(&sample, n)
}

/// [`Accessor`] adapter that reads a field through a projection returning a
/// reference, for element types whose field is itself [`Numeric`].
pub struct Project<T: ?Sized, U: ?Sized, F> {
    f: F,
    _marker: PhantomData<fn(&T) -> &U>,
}

impl<T: ?Sized, U: ?Sized, F> Project<T, U, F>
where
    F: Fn(&T) -> &U,
{
    /// Wrap a projection
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<T, U, F> Accessor<T> for Project<T, U, F>
where
    T: ?Sized,
    U: Numeric + ?Sized,
    F: Fn(&T) -> &U,
{
    #[inline]
    fn extract(&self, item: &T) -> Option<f64> {
        (self.f)(item).to_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Datum;

    fn ascending(len: usize) -> Vec<f64> {
        (1..=len).map(|i| i as f64).collect()
    }

    // ---- Known boundaries ----

    #[test]
    fn test_deciles_of_twenty() {
        let data = ascending(20);
        let expected = vec![1.0, 2.5, 4.5, 6.5, 8.5, 10.5, 12.5, 14.5, 16.5, 18.5, 20.0];
        assert_eq!(nanquantiles(&data, 10), Some(expected));
    }

    #[test]
    fn test_median_of_eleven() {
        let data = ascending(11);
        assert_eq!(nanquantiles(&data, 2), Some(vec![1.0, 6.0, 11.0]));
    }

    #[test]
    fn test_sorted_flag() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let options = QuantileOptions::new().sorted(true);
        assert_eq!(
            nanquantiles_with(&data, 2, &options),
            Some(vec![1.0, 3.0, 5.0])
        );
    }

    #[test]
    fn test_unsorted_input() {
        let data = [5.0, 3.0, 1.0, 4.0, 2.0];
        assert_eq!(nanquantiles(&data, 2), Some(vec![1.0, 3.0, 5.0]));
    }

    #[test]
    fn test_quartiles_average_branch() {
        // len * i / n - 1 = 1, 3, 5
        let data = ascending(8);
        assert_eq!(
            nanquantiles(&data, 4),
            Some(vec![1.0, 2.5, 4.5, 6.5, 8.0])
        );
    }

    // ---- Filtering ----

    #[test]
    fn test_nulls_ignored() {
        let mut data: Vec<Option<f64>> = ascending(20).into_iter().map(Some).collect();
        data.splice(2..2, [None, None, None]);
        let expected = vec![1.0, 2.5, 4.5, 6.5, 8.5, 10.5, 12.5, 14.5, 16.5, 18.5, 20.0];
        assert_eq!(nanquantiles(&data, 10), Some(expected));
    }

    #[test]
    fn test_nan_and_infinity_ignored() {
        let data = [f64::NAN, 3.0, f64::INFINITY, 1.0, f64::NEG_INFINITY, 2.0];
        assert_eq!(nanquantiles(&data, 2), Some(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_all_non_numeric_is_no_data() {
        let data = vec![
            Datum::Null,
            Datum::Undefined,
            Datum::from(""),
            Datum::List(Vec::new()),
            Datum::Object(Default::default()),
            Datum::from(true),
            Datum::Number(f64::NAN),
        ];
        assert_eq!(nanquantiles(&data, 10), None);
    }

    #[test]
    fn test_empty_is_no_data() {
        let data: [f64; 0] = [];
        assert_eq!(nanquantiles(&data, 10), None);
        assert_eq!(quantiles_sorted(&[], 3), None);
    }

    // ---- Degenerate counts and samples ----

    #[test]
    fn test_zero_quantiles_returns_max() {
        let data = [4.0, 9.0, 1.0];
        assert_eq!(nanquantiles(&data, 0), Some(vec![9.0]));
    }

    #[test]
    #[should_panic(expected = "quantile count must be below usize::MAX")]
    fn test_max_count_panics() {
        quantiles_sorted(&[1.0, 2.0], usize::MAX);
    }

    #[test]
    fn test_signed_zeros_sort_first_negative() {
        let data = [0.0, -0.0, 1.0];
        let q = nanquantiles(&data, 1).unwrap();
        assert_eq!(q, vec![0.0, 1.0]);
        assert!(q[0].is_sign_negative());
    }

    #[test]
    fn test_single_quantile_is_min_max() {
        let data = [4.0, 9.0, 1.0];
        assert_eq!(nanquantiles(&data, 1), Some(vec![1.0, 9.0]));
    }

    #[test]
    fn test_single_value() {
        let data = [42.0];
        assert_eq!(nanquantiles(&data, 4), Some(vec![42.0; 5]));
    }

    #[test]
    fn test_more_quantiles_than_values() {
        // Positions below zero round up to the minimum.
        let data = [10.0, 20.0];
        let q = nanquantiles(&data, 5).unwrap();
        assert_eq!(q.len(), 6);
        assert_eq!(q[0], 10.0);
        assert_eq!(q[1], 10.0);
        assert_eq!(q[5], 20.0);
        assert!(q.windows(2).all(|w| w[0] <= w[1]), "{:?}", q);
    }

    // ---- Accessors ----

    #[test]
    fn test_closure_accessor() {
        let rows: Vec<[f64; 2]> = (1..=11).map(|j| [(11 - j) as f64, j as f64]).collect();
        let options = QuantileOptions::new().accessor(|row: &[f64; 2]| row[1]);
        assert_eq!(
            nanquantiles_with(&rows, 2, &options),
            Some(vec![1.0, 6.0, 11.0])
        );
    }

    #[test]
    fn test_accessor_output_is_filtered() {
        let rows = vec![
            Datum::from(vec![Datum::from(0), Datum::from(3.0)]),
            Datum::from(vec![Datum::from(1)]),
            Datum::from(vec![Datum::from(2), Datum::Null]),
            Datum::from(vec![Datum::from(3), Datum::from(1.0)]),
        ];
        let options = QuantileOptions::new().accessor(|row: &Datum| row.get(1).cloned());
        assert_eq!(
            nanquantiles_with(&rows, 1, &options),
            Some(vec![1.0, 3.0])
        );
    }

    #[test]
    fn test_projection_accessor() {
        struct Reading {
            value: Option<f64>,
        }
        let readings = [
            Reading { value: Some(2.0) },
            Reading { value: None },
            Reading { value: Some(1.0) },
        ];
        fn value_of(r: &Reading) -> &Option<f64> {
            &r.value
        }
        let options = QuantileOptions::new().with_accessor(Project::new(value_of));
        assert_eq!(
            nanquantiles_with(&readings, 1, &options),
            Some(vec![1.0, 2.0])
        );
    }

    #[test]
    fn test_input_not_mutated() {
        let data = vec![3.0, 1.0, 2.0];
        let _ = nanquantiles(&data, 2);
        assert_eq!(data, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_options_accessors() {
        let options = QuantileOptions::default();
        assert!(!options.is_sorted());
        assert_eq!(*options.accessor_ref(), Identity);
        assert!(options.sorted(true).is_sorted());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_deserialize_ignores_unknown_keys() {
        let options: QuantileOptions =
            serde_json::from_str(r#"{"sorted": true, "precision": 3}"#).unwrap();
        assert!(options.is_sorted());

        let options: QuantileOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.is_sorted());

        assert!(serde_json::from_str::<QuantileOptions>(r#"{"sorted": "yes"}"#).is_err());
        assert!(serde_json::from_str::<QuantileOptions>(r#"{"sorted": null}"#).is_err());
    }
}
