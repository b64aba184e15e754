//! # nanquantiles
//!
//! Quantile boundaries over sparse, mixed-type collections.
//!
//! Data pipelines routinely hand over columns with holes in them: nulls,
//! NaN, stray strings, nested records. `nanquantiles` computes equally spaced
//! quantiles over such a column, skipping every element that is not a finite
//! number, and always reports the minimum and maximum as the outer boundaries.
//!
//! ## Quick Start
//!
//! ```rust
//! use nanquantiles::prelude::*;
//!
//! let latencies = [Some(12.0), None, Some(7.0), Some(f64::NAN), Some(30.0), Some(9.0)];
//!
//! // min, median, max
//! let q = nanquantiles(&latencies, 2).unwrap();
//! assert_eq!(q, vec![7.0, 10.5, 30.0]);
//! ```
//!
//! ## Accessors and Pre-sorted Input
//!
//! ```rust
//! use nanquantiles::prelude::*;
//!
//! struct Sample {
//!     at: u64,
//!     value: f64,
//! }
//!
//! let samples: Vec<Sample> = (1..=5).map(|i| Sample { at: i, value: i as f64 }).collect();
//! let options = QuantileOptions::new()
//!     .sorted(true)
//!     .accessor(|s: &Sample| s.value);
//!
//! assert_eq!(
//!     nanquantiles_with(&samples, 2, &options),
//!     Some(vec![1.0, 3.0, 5.0])
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support; without it the crate is
//!   `no_std` + `alloc` and uses `libm`
//! - `serde`: `Deserialize` for [`Datum`](value::Datum) and
//!   [`QuantileOptions`](quantiles::QuantileOptions)
//! - `json`: Validated entry point over `serde_json` values
//! - `full`: Enable everything

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod traits;

pub mod quantiles;

pub mod value;

#[cfg(feature = "json")]
#[cfg_attr(docsrs, doc(cfg(feature = "json")))]
pub mod json;

mod math;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::quantiles::{nanquantiles, nanquantiles_with, QuantileOptions};
    pub use crate::value::Datum;

    #[cfg(feature = "json")]
    pub use crate::json::nanquantiles_json;
}

pub use quantiles::{nanquantiles, nanquantiles_with, QuantileOptions};
pub use traits::{Numeric, QuantileError};
pub use value::Datum;
