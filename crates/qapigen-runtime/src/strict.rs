//! Strict decoding and JSON helpers

use crate::{DecodeError, EncodeError, Value};
use serde::{Serialize, de::DeserializeOwned};

/// A type that can be decoded strictly.
///
/// Object types list the member names they accept at the top level of their
/// encoding; decoding an object carrying any other key fails instead of
/// silently dropping it. Non-object types keep the default of `None` and are
/// decoded as usual.
pub trait Strict: DeserializeOwned {
    /// Top-level member names accepted in the object encoding.
    const WIRE_FIELDS: Option<&'static [&'static str]> = None;
}

macro_rules! impl_strict {
    ($($ty:ty),* $(,)?) => {
        $(impl Strict for $ty {})*
    };
}

impl_strict!(
    (),
    bool,
    String,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    Value,
);

impl<T: Strict> Strict for Vec<T> {}

impl<T: Strict> Strict for Option<T> {}

impl<T: Strict> Strict for Box<T> {
    const WIRE_FIELDS: Option<&'static [&'static str]> = T::WIRE_FIELDS;
}

/// Decode `from` into `T`, failing on unknown top-level fields.
///
/// Returns the first undeclared key as [`DecodeError::UnknownField`], or
/// [`DecodeError::Invalid`] when the value does not have the shape of `T`.
pub fn strict_decode<T: Strict>(from: &Value) -> Result<T, DecodeError> {
    if let (Some(fields), Value::Object(map)) = (T::WIRE_FIELDS, from) {
        if let Some(unknown) = map.keys().find(|key| !fields.contains(&key.as_str())) {
            return Err(DecodeError::UnknownField {
                field: unknown.clone(),
            });
        }
    }

    Ok(T::deserialize(from)?)
}

/// Decode `from` into `T`, ignoring unknown fields.
pub fn decode<T: DeserializeOwned>(from: &Value) -> Result<T, DecodeError> {
    Ok(T::deserialize(from)?)
}

/// Encode a value into its JSON wire form.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Value, EncodeError> {
    Ok(serde_json::to_value(value)?)
}
