//! Resolved schema IR.
//!
//! The schema front-end hands the generator a flat, declaration-ordered list of
//! entities. Every type reference is a plain type name that resolves either to
//! a builtin or to another entity of the same schema.
//!
//! # JSON form
//!
//! ```json
//! {
//!   "entities": [
//!     { "meta": "enum", "name": "Color", "members": [{ "name": "red" }] },
//!     { "meta": "alternate", "name": "StrOrNull",
//!       "variants": [{ "name": "s", "type": "str" }, { "name": "n", "type": "null" }] },
//!     { "meta": "struct", "name": "Pixel",
//!       "members": [{ "name": "color", "type": "Color", "optional": true }] }
//!   ]
//! }
//! ```

use crate::{GenerateError, SchemaInvariantError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Type name of the wire-level `null` sentinel.
pub const NULL_TYPE: &str = "null";

/// A member of a struct type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    #[serde(default)]
    pub optional: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            optional: true,
            ..Self::new(name, ty)
        }
    }
}

/// One alternative of an alternate, or one branch of a struct's variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,
}

impl Variant {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// Whether this is the `null` sentinel variant.
    pub fn is_null(&self) -> bool {
        self.ty == NULL_TYPE
    }
}

/// Embedded tagged-union layout of a struct, discriminated by one member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructVariants {
    pub discriminator: String,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructType {
    pub name: String,

    #[serde(default)]
    pub base: Option<String>,

    #[serde(default)]
    pub members: Vec<Member>,

    #[serde(default)]
    pub variants: Option<StructVariants>,

    /// Conditional-compilation annotation, carried but never evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifcond: Option<serde_json::Value>,
}

impl StructType {
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            base: None,
            members,
            variants: None,
            ifcond: None,
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn with_variants(mut self, discriminator: impl Into<String>, variants: Vec<Variant>) -> Self {
        self.variants = Some(StructVariants {
            discriminator: discriminator.into(),
            variants,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateType {
    pub name: String,

    pub variants: Vec<Variant>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifcond: Option<serde_json::Value>,
}

impl AlternateType {
    pub fn new(name: impl Into<String>, variants: Vec<Variant>) -> Self {
        Self {
            name: name.into(),
            variants,
            ifcond: None,
        }
    }

    /// Whether the alternate accepts wire-level `null`.
    pub fn is_nullable(&self) -> bool {
        self.variants.iter().any(Variant::is_null)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumType {
    pub name: String,

    pub members: Vec<EnumMember>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifcond: Option<serde_json::Value>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members
                .into_iter()
                .map(|m| EnumMember { name: m.into() })
                .collect(),
            ifcond: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayType {
    pub name: String,
    pub element: String,
}

/// Command declaration; recognized but never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifcond: Option<serde_json::Value>,
}

/// Event declaration; recognized but never emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDecl {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifcond: Option<serde_json::Value>,
}

/// One top-level schema entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "meta", rename_all = "lowercase")]
pub enum SchemaEntity {
    Enum(EnumType),
    Struct(StructType),
    Alternate(AlternateType),
    Array(ArrayType),
    Command(CommandDecl),
    Event(EventDecl),
}

impl SchemaEntity {
    pub fn name(&self) -> &str {
        match self {
            SchemaEntity::Enum(e) => &e.name,
            SchemaEntity::Struct(s) => &s.name,
            SchemaEntity::Alternate(a) => &a.name,
            SchemaEntity::Array(a) => &a.name,
            SchemaEntity::Command(c) => &c.name,
            SchemaEntity::Event(e) => &e.name,
        }
    }

    /// Schema keyword of this entity kind.
    pub fn meta(&self) -> &'static str {
        match self {
            SchemaEntity::Enum(_) => "enum",
            SchemaEntity::Struct(_) => "struct",
            SchemaEntity::Alternate(_) => "alternate",
            SchemaEntity::Array(_) => "array",
            SchemaEntity::Command(_) => "command",
            SchemaEntity::Event(_) => "event",
        }
    }
}

#[derive(Deserialize)]
struct SchemaDocument {
    entities: Vec<SchemaEntity>,
}

/// A resolved schema: entities in declaration order plus a name index.
#[derive(Debug, Clone)]
pub struct Schema {
    entities: Vec<SchemaEntity>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Build a schema, rejecting duplicate entity names.
    pub fn new(entities: Vec<SchemaEntity>) -> Result<Self, SchemaInvariantError> {
        let mut index = HashMap::with_capacity(entities.len());

        for (position, entity) in entities.iter().enumerate() {
            if index.insert(entity.name().to_string(), position).is_some() {
                return Err(SchemaInvariantError::DuplicateEntity {
                    name: entity.name().to_string(),
                });
            }
        }

        Ok(Self { entities, index })
    }

    /// Parse the JSON IR document.
    pub fn from_json_str(text: &str) -> Result<Self, GenerateError> {
        let document: SchemaDocument = serde_json::from_str(text)?;
        Ok(Self::new(document.entities)?)
    }

    /// Read and parse a JSON IR file.
    pub fn from_json_file(path: &Path) -> Result<Self, GenerateError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| GenerateError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Entities in declaration order.
    pub fn entities(&self) -> &[SchemaEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Option<&SchemaEntity> {
        self.index.get(name).map(|&position| &self.entities[position])
    }

    pub fn lookup_struct(&self, name: &str) -> Option<&StructType> {
        match self.lookup(name)? {
            SchemaEntity::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Names of the alternates that accept wire-level `null`.
    pub fn nullable_alternates(&self) -> BTreeSet<String> {
        self.entities
            .iter()
            .filter_map(|entity| match entity {
                SchemaEntity::Alternate(a) if a.is_nullable() => Some(a.name.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "schema/schema_tests.rs"]
mod schema_tests;
