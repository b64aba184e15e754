//! Heterogeneous sample elements
//!
//! Real-world columns mix numbers with missing markers and stray values of
//! other types. [`Datum`] is a tagged union over those kinds so that such a
//! column can be held in one `Vec` and handed straight to the quantile routines.

use crate::traits::Numeric;

#[cfg(feature = "std")]
use std::{collections::BTreeMap, string::String, vec::Vec};

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, string::String, vec::Vec};

/// A single element of a mixed-type collection
///
/// Only [`Datum::Number`] holding a finite value is numeric.
///
/// # Example
///
/// ```
/// use nanquantiles::value::Datum;
/// use nanquantiles::quantiles::nanquantiles;
///
/// let column = vec![
///     Datum::from(3.0),
///     Datum::Null,
///     Datum::from("n/a"),
///     Datum::from(1.0),
///     Datum::Undefined,
///     Datum::from(2.0),
/// ];
///
/// assert_eq!(nanquantiles(&column, 2), Some(vec![1.0, 2.0, 3.0]));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Datum {
    /// Explicit missing value
    Null,
    /// Absent value (a hole in a sparse collection)
    #[default]
    Undefined,
    /// Boolean; never treated as a number
    Bool(bool),
    /// Number; numeric only when finite
    Number(f64),
    /// Text; never parsed
    Text(String),
    /// Nested list
    List(Vec<Datum>),
    /// Key-value record
    Object(BTreeMap<String, Datum>),
}

impl Datum {
    /// Whether this is `Null` or `Undefined`
    pub fn is_missing(&self) -> bool {
        matches!(self, Datum::Null | Datum::Undefined)
    }

    /// The raw number, including NaN and infinities
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// Element at `index` of a `List`
    pub fn get(&self, index: usize) -> Option<&Datum> {
        match self {
            Datum::List(items) => items.get(index),
            _ => None,
        }
    }

    /// Field `key` of an `Object`
    pub fn field(&self, key: &str) -> Option<&Datum> {
        match self {
            Datum::Object(fields) => fields.get(key),
            _ => None,
        }
    }
}

impl Numeric for Datum {
    #[inline]
    fn to_finite(&self) -> Option<f64> {
        match self {
            Datum::Number(x) => x.to_finite(),
            _ => None,
        }
    }
}

impl From<f64> for Datum {
    fn from(x: f64) -> Self {
        Datum::Number(x)
    }
}

impl From<f32> for Datum {
    fn from(x: f32) -> Self {
        Datum::Number(f64::from(x))
    }
}

impl From<i32> for Datum {
    fn from(x: i32) -> Self {
        Datum::Number(f64::from(x))
    }
}

impl From<i64> for Datum {
    fn from(x: i64) -> Self {
        Datum::Number(x as f64)
    }
}

impl From<u32> for Datum {
    fn from(x: u32) -> Self {
        Datum::Number(f64::from(x))
    }
}

impl From<u64> for Datum {
    fn from(x: u64) -> Self {
        Datum::Number(x as f64)
    }
}

impl From<bool> for Datum {
    fn from(b: bool) -> Self {
        Datum::Bool(b)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Self {
        Datum::Text(s.into())
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Self {
        Datum::Text(s)
    }
}

impl From<Vec<Datum>> for Datum {
    fn from(items: Vec<Datum>) -> Self {
        Datum::List(items)
    }
}

impl From<BTreeMap<String, Datum>> for Datum {
    fn from(fields: BTreeMap<String, Datum>) -> Self {
        Datum::Object(fields)
    }
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(value: Option<T>) -> Self {
        value.map_or(Datum::Null, Into::into)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Datum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(DatumVisitor)
    }
}

#[cfg(feature = "serde")]
struct DatumVisitor;

#[cfg(feature = "serde")]
impl<'de> serde::de::Visitor<'de> for DatumVisitor {
    type Value = Datum;

    fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("any self-describing value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Datum, E>
    where
        E: serde::de::Error,
    {
        Ok(Datum::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Datum, E>
    where
        E: serde::de::Error,
    {
        Ok(Datum::Number(v as f64))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Datum, E>
    where
        E: serde::de::Error,
    {
        Ok(Datum::Number(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Datum, E>
    where
        E: serde::de::Error,
    {
        Ok(Datum::Number(v))
    }

    fn visit_str<E>(self, v: &str) -> Result<Datum, E>
    where
        E: serde::de::Error,
    {
        Ok(Datum::Text(v.into()))
    }

    fn visit_string<E>(self, v: String) -> Result<Datum, E>
    where
        E: serde::de::Error,
    {
        Ok(Datum::Text(v))
    }

    fn visit_none<E>(self) -> Result<Datum, E>
    where
        E: serde::de::Error,
    {
        Ok(Datum::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Datum, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        serde::Deserialize::deserialize(deserializer)
    }

    fn visit_unit<E>(self) -> Result<Datum, E>
    where
        E: serde::de::Error,
    {
        Ok(Datum::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Datum, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Datum::List(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Datum, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut fields = BTreeMap::new();
        while let Some((key, value)) = map.next_entry::<String, Datum>()? {
            fields.insert(key, value);
        }
        Ok(Datum::Object(fields))
    }
}
