//! Rust type mappings for schema type references.
//!
//! # Builtins
//!
//! | Schema | Rust |
//! |--------|------|
//! | `str` | `String` |
//! | `null` | `()` |
//! | `bool` | `bool` |
//! | `number` | `f64` |
//! | `int` / `int8..int64` | `i64` / `i8..i64` |
//! | `size` / `uint8..uint64` | `u64` / `u8..u64` |
//! | `any` | `Value` |
//! | `QType` | `QType` |
//! | `FooList` | `Vec<Foo>` |

use super::naming::NameMapper;
use qapigen_core::{NULL_TYPE, Schema, SchemaEntity, SchemaInvariantError};

/// Classification of a mapped type, used to pick field wrappers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Builtin,
    Null,
    Enum,
    Struct,
    Alternate,
    Sequence,
}

/// A Rust type for a schema type reference.
#[derive(Debug, Clone, PartialEq)]
pub struct TargetType {
    /// The Rust type as written in generated code.
    pub name: String,
    pub kind: TypeKind,
}

impl TargetType {
    fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Whether values of this type are generated aggregates that may recurse.
    pub fn is_aggregate(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Alternate)
    }

    /// The type used behind an `Option`: aggregates are boxed.
    pub fn indirect(&self) -> String {
        if self.is_aggregate() {
            format!("Box<{}>", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Map a builtin schema type name to its Rust type.
pub fn map_builtin(name: &str) -> Option<&'static str> {
    let ty = match name {
        "str" => "String",
        "null" => "()",
        "bool" => "bool",
        "number" => "f64",
        "size" => "u64",
        "int" => "i64",
        "int8" => "i8",
        "int16" => "i16",
        "int32" => "i32",
        "int64" => "i64",
        "uint8" => "u8",
        "uint16" => "u16",
        "uint32" => "u32",
        "uint64" => "u64",
        "any" => "Value",
        "QType" => "QType",
        _ => return None,
    };
    Some(ty)
}

/// Resolves type references against a schema.
pub struct TypeMapper<'a> {
    schema: &'a Schema,
    names: &'a NameMapper,
}

impl<'a> TypeMapper<'a> {
    pub fn new(schema: &'a Schema, names: &'a NameMapper) -> Self {
        Self { schema, names }
    }

    /// Map a type reference to its Rust type.
    pub fn map(&self, type_name: &str) -> Result<TargetType, SchemaInvariantError> {
        self.map_in(type_name, &mut Vec::new())
    }

    fn map_in<'n>(
        &self,
        type_name: &'n str,
        arrays: &mut Vec<&'n str>,
    ) -> Result<TargetType, SchemaInvariantError>
    where
        'a: 'n,
    {
        if type_name == NULL_TYPE {
            return Ok(TargetType::new("()", TypeKind::Null));
        }

        match self.schema.lookup(type_name) {
            Some(SchemaEntity::Enum(_)) => Ok(TargetType::new(
                self.names.to_type_name(type_name),
                TypeKind::Enum,
            )),
            Some(SchemaEntity::Struct(_)) => Ok(TargetType::new(
                self.names.to_type_name(type_name),
                TypeKind::Struct,
            )),
            Some(SchemaEntity::Alternate(_)) => Ok(TargetType::new(
                self.names.to_type_name(type_name),
                TypeKind::Alternate,
            )),
            Some(SchemaEntity::Array(array)) => {
                self.sequence_of(type_name, &array.element, arrays)
            }
            Some(SchemaEntity::Command(_) | SchemaEntity::Event(_)) | None => {
                if let Some(builtin) = map_builtin(type_name) {
                    Ok(TargetType::new(builtin, TypeKind::Builtin))
                } else if let Some(element) = type_name.strip_suffix("List") {
                    self.sequence_of(type_name, element, arrays)
                } else {
                    Err(SchemaInvariantError::UnknownType {
                        name: type_name.to_string(),
                    })
                }
            }
        }
    }

    fn sequence_of<'n>(
        &self,
        type_name: &'n str,
        element: &'n str,
        arrays: &mut Vec<&'n str>,
    ) -> Result<TargetType, SchemaInvariantError>
    where
        'a: 'n,
    {
        if arrays.contains(&type_name) {
            return Err(SchemaInvariantError::ArrayCycle {
                name: type_name.to_string(),
            });
        }
        arrays.push(type_name);

        let inner = self.map_in(element, arrays)?;
        Ok(TargetType::new(
            format!("Vec<{}>", inner.name),
            TypeKind::Sequence,
        ))
    }
}

#[cfg(test)]
#[path = "types/types_tests.rs"]
mod types_tests;
