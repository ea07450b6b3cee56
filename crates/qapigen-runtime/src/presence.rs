//! Null/absent/payload protocol for nullable alternates
//!
//! A struct field whose type is a nullable alternate has three observable
//! wire states: omitted, explicit `null`, or a payload. The generated struct
//! encoder asks [`is_absent`] whether to omit the field, and decodes it with
//! [`deserialize_present`] so that an explicit `null` is kept instead of being
//! folded into `None`.

use crate::{EncodeError, Value};
use serde::{Deserialize, Deserializer};

/// Implemented by generated alternates that accept JSON `null`.
pub trait AbsentAlternate {
    /// Report the wire value of this alternate and whether it is absent.
    ///
    /// - `is_null` set: `(Value::Null, false)`, present and null
    /// - one variant populated: `(payload, false)`
    /// - nothing set: `(Value::Null, true)`, so a containing struct omits the
    ///   field rather than writing `{}`
    fn to_any_or_absent(&self) -> Result<(Value, bool), EncodeError>;
}

impl<T: AbsentAlternate + ?Sized> AbsentAlternate for Box<T> {
    fn to_any_or_absent(&self) -> Result<(Value, bool), EncodeError> {
        (**self).to_any_or_absent()
    }
}

/// Presence report for a possibly unconstructed alternate.
pub fn to_any_or_absent<T: AbsentAlternate + ?Sized>(
    value: Option<&T>,
) -> Result<(Value, bool), EncodeError> {
    match value {
        None => Ok((Value::Null, true)),
        Some(value) => value.to_any_or_absent(),
    }
}

/// `skip_serializing_if` predicate for optional nullable-alternate fields.
///
/// An encoding failure reports "present" so the serializer surfaces the error.
pub fn is_absent<T: AbsentAlternate>(field: &Option<T>) -> bool {
    matches!(to_any_or_absent(field.as_ref()), Ok((_, true)))
}

/// `deserialize_with` helper that maps any present value, `null` included, to `Some`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
