//! Quantile boundaries over sparse, mixed-type collections
//!
//! This module splits a sample into equal-probability intervals and reports
//! the boundaries between them, skipping every element that is not a finite
//! number.
//!
//! # Entry points
//!
//! - [`nanquantiles`]: identity accessor, unsorted input
//! - [`nanquantiles_with`]: explicit [`QuantileOptions`]
//! - [`quantiles_sorted`]: interpolation step alone, over an already filtered
//!   and sorted sample
//!
//! # Example
//!
//! ```
//! use nanquantiles::quantiles::nanquantiles;
//!
//! let data: Vec<f64> = (1..=20).map(f64::from).collect();
//!
//! let deciles = nanquantiles(&data, 10).unwrap();
//! assert_eq!(deciles.len(), 11);
//! assert_eq!(deciles[0], 1.0);
//! assert_eq!(deciles[1], 2.5);
//! assert_eq!(deciles[10], 20.0);
//! ```

mod nan;

pub use nan::{
    filtered_sample, nanquantiles, nanquantiles_with, quantiles_sorted, Accessor, FnAccessor,
    Identity, Project, QuantileOptions,
};
