//! Dynamically typed entry point over `serde_json` values
//!
//! When the collection, the quantile count and the options all arrive as
//! untyped JSON, nothing about their shape is guaranteed. [`nanquantiles_json`]
//! checks every argument before any element is inspected and reports the first
//! violation as [`QuantileError::InvalidArgument`].
//!
//! The accessor cannot be code here, so it is expressed as a JSON Pointer
//! (RFC 6901) resolved against each element:
//!
//! ```
//! use nanquantiles::json::nanquantiles_json;
//! use serde_json::json;
//!
//! let rows = json!([[10, 1], [9, 2], [8, "x"], [7, 3]]);
//! let options = json!({ "accessor": "/1", "sorted": true });
//!
//! let q = nanquantiles_json(&rows, &json!(1), Some(&options)).unwrap();
//! assert_eq!(q, Some(vec![1.0, 3.0]));
//! ```

use crate::quantiles::{nanquantiles_with, Accessor, QuantileOptions};
use crate::traits::{Numeric, QuantileError};
use serde_json::{Map, Value};

/// Largest count accepted; beyond this, JSON numbers stop being exact integers.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Numeric for Value {
    /// Only JSON numbers are numeric; `serde_json` never stores NaN or ±∞.
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64().and_then(|x| x.to_finite()),
            _ => None,
        }
    }
}

/// Reads the candidate value of each element at a JSON Pointer
///
/// Elements where the pointer does not resolve yield no candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonPointer {
    pointer: String,
}

impl JsonPointer {
    /// Parse an RFC 6901 pointer (`""` or a string starting with `/`)
    pub fn parse(pointer: &str) -> Result<Self, QuantileError> {
        if !pointer.is_empty() && !pointer.starts_with('/') {
            return Err(QuantileError::invalid(
                "options.accessor",
                format!(
                    "`{}` is not a JSON Pointer; expected \"\" or a path starting with '/'",
                    pointer
                ),
            ));
        }
        Ok(Self {
            pointer: pointer.to_owned(),
        })
    }

    /// The pointer text
    pub fn as_str(&self) -> &str {
        &self.pointer
    }
}

impl Accessor<Value> for JsonPointer {
    #[inline]
    fn extract(&self, item: &Value) -> Option<f64> {
        item.pointer(&self.pointer).and_then(Numeric::to_finite)
    }
}

/// Options parsed from a JSON object
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Input asserted ascending
    pub sorted: bool,
    /// Pointer used as accessor, identity when absent
    pub accessor: Option<JsonPointer>,
}

impl JsonOptions {
    /// Validate an options object. Unknown keys are ignored.
    pub fn from_value(options: &Value) -> Result<Self, QuantileError> {
        let map = options.as_object().ok_or_else(|| {
            QuantileError::invalid(
                "options",
                format!("must be an object, got {}", kind(options)),
            )
        })?;
        Self::from_map(map)
    }

    fn from_map(map: &Map<String, Value>) -> Result<Self, QuantileError> {
        let sorted = match map.get("sorted") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(QuantileError::invalid(
                    "options.sorted",
                    format!("must be a boolean, got {}", kind(other)),
                ))
            }
        };

        let accessor = match map.get("accessor") {
            None => None,
            Some(Value::String(s)) => Some(JsonPointer::parse(s)?),
            Some(other) => {
                return Err(QuantileError::invalid(
                    "options.accessor",
                    format!("must be a JSON Pointer string, got {}", kind(other)),
                ))
            }
        };

        Ok(Self { sorted, accessor })
    }
}

/// Validate a quantile count: a nonnegative, exactly representable integer.
pub fn parse_count(n: &Value) -> Result<usize, QuantileError> {
    let reject = || {
        QuantileError::invalid(
            "n",
            format!("must be a nonnegative integer, got {}", n),
        )
    };

    let num = match n {
        Value::Number(num) => num,
        _ => return Err(reject()),
    };
    if let Some(u) = num.as_u64() {
        if u > MAX_EXACT_INTEGER as u64 {
            return Err(reject());
        }
        return usize::try_from(u).map_err(|_| reject());
    }
    match num.as_f64() {
        Some(x) if x >= 0.0 && x <= MAX_EXACT_INTEGER && x.fract() == 0.0 => Ok(x as usize),
        _ => Err(reject()),
    }
}

/// Quantile boundaries of a JSON array, ignoring non-numeric elements
///
/// `options`, when given, must be an object; recognized keys are `sorted`
/// (boolean) and `accessor` (JSON Pointer string). All arguments are checked
/// before the data is read, so an invalid argument is reported even when the
/// array holds no numbers.
///
/// Returns `Ok(None)` when no element yields a finite number.
///
/// # Errors
///
/// [`QuantileError::InvalidArgument`] when `values` is not an array, `n` is
/// not a nonnegative integer, `options` is not an object, `sorted` is not a
/// boolean or `accessor` is not a pointer string.
pub fn nanquantiles_json(
    values: &Value,
    n: &Value,
    options: Option<&Value>,
) -> Result<Option<Vec<f64>>, QuantileError> {
    let validated = validate(values, n, options);
    if let Err(err) = &validated {
        log::debug!("nanquantiles_json: {}", err);
    }
    let (items, n, opts) = validated?;

    let result = match opts.accessor {
        Some(pointer) => nanquantiles_with(
            items,
            n,
            &QuantileOptions::new()
                .sorted(opts.sorted)
                .with_accessor(pointer),
        ),
        None => nanquantiles_with(items, n, &QuantileOptions::new().sorted(opts.sorted)),
    };
    Ok(result)
}

fn validate<'a>(
    values: &'a Value,
    n: &Value,
    options: Option<&Value>,
) -> Result<(&'a [Value], usize, JsonOptions), QuantileError> {
    let items = values.as_array().ok_or_else(|| {
        QuantileError::invalid(
            "values",
            format!("must be an array, got {}", kind(values)),
        )
    })?;
    let n = parse_count(n)?;
    let opts = match options {
        Some(o) => JsonOptions::from_value(o)?,
        None => JsonOptions::default(),
    };
    Ok((items.as_slice(), n, opts))
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
