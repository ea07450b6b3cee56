//! Alternate emission and codec synthesis.
//!
//! An alternate's wire form carries no discriminant. The generated decoder
//! tries each non-null variant in declaration order with `strict_decode` and
//! keeps the first payload that fits; `null` is handled up front. Overlapping
//! shapes therefore resolve to the earliest declared variant.
//!
//! For `StrOrNull = {s: str, n: null}` the generated type is:
//!
//! ```text
//! #[derive(Debug, Clone, Default, PartialEq)]
//! pub struct StrOrNull {
//!     pub s: Option<String>,
//!     pub is_null: bool,
//! }
//! ```
//!
//! Encoding writes `null` when `is_null` is set, otherwise the first populated
//! payload. A nullable alternate with nothing set encodes as `{}`; any other
//! alternate with nothing set fails with `EncodeError::EmptyFields`.

use super::naming::{IdentScope, NameMapper};
use super::types::{TargetType, TypeMapper};
use qapigen_core::{AlternateType, Schema, SchemaInvariantError};
use std::collections::BTreeSet;

/// Identifier of the null flag field.
pub const NULL_FLAG: &str = "is_null";

/// One slot of a generated alternate.
#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Payload {
        ident: String,
        ty: TargetType,
    },
    Null,
}

/// Check the variant invariants of an alternate.
pub fn validate_alternate(ty: &AlternateType) -> Result<(), SchemaInvariantError> {
    let nulls = ty.variants.iter().filter(|v| v.is_null()).count();
    if nulls > 1 {
        return Err(SchemaInvariantError::MultipleNullVariants {
            name: ty.name.clone(),
        });
    }
    if nulls == ty.variants.len() {
        return Err(SchemaInvariantError::NoVariants {
            name: ty.name.clone(),
        });
    }

    let mut seen = BTreeSet::new();
    for variant in &ty.variants {
        if !seen.insert(variant.ty.as_str()) {
            return Err(SchemaInvariantError::DuplicateVariantType {
                name: ty.name.clone(),
                ty: variant.ty.clone(),
            });
        }
    }

    Ok(())
}

/// Emits alternates with their wire codecs.
pub struct AlternateEmitter<'a> {
    names: &'a NameMapper,
    types: TypeMapper<'a>,
}

impl<'a> AlternateEmitter<'a> {
    pub fn new(schema: &'a Schema, names: &'a NameMapper) -> Self {
        Self {
            names,
            types: TypeMapper::new(schema, names),
        }
    }

    /// Emit the type, its `to_wire`/`from_wire` codec and the serde adapters.
    pub fn emit(&self, ty: &AlternateType) -> Result<String, SchemaInvariantError> {
        validate_alternate(ty)?;

        let type_name = self.names.to_type_name(&ty.name);
        let nullable = ty.is_nullable();
        let slots = self.slots(ty)?;

        let mut code = String::new();
        push_declaration(&mut code, &type_name, &slots);
        push_codec(&mut code, &type_name, &slots, nullable);
        if nullable {
            push_absent_alternate(&mut code, &type_name, &slots);
        }
        push_serde_adapters(&mut code, &type_name);
        code.push_str(&format!("impl Strict for {type_name} {{}}\n"));

        Ok(code)
    }

    fn slots(&self, ty: &AlternateType) -> Result<Vec<Slot>, SchemaInvariantError> {
        let mut scope = IdentScope::new(format!("alternate {}", ty.name));
        if ty.is_nullable() {
            scope.claim(NULL_FLAG, "<null flag>")?;
        }

        let mut slots = Vec::with_capacity(ty.variants.len());
        for variant in &ty.variants {
            if variant.is_null() {
                slots.push(Slot::Null);
                continue;
            }

            let ident = self.names.to_field_name(&variant.name);
            scope.claim(&ident, &variant.name)?;
            slots.push(Slot::Payload {
                ident,
                ty: self.types.map(&variant.ty)?,
            });
        }

        Ok(slots)
    }
}

fn payloads(slots: &[Slot]) -> impl Iterator<Item = (&str, &TargetType)> {
    slots.iter().filter_map(|slot| match slot {
        Slot::Payload { ident, ty } => Some((ident.as_str(), ty)),
        Slot::Null => None,
    })
}

fn push_declaration(code: &mut String, type_name: &str, slots: &[Slot]) {
    code.push_str("#[derive(Debug, Clone, Default, PartialEq)]\n");
    code.push_str(&format!("pub struct {type_name} {{\n"));
    for slot in slots {
        match slot {
            Slot::Payload { ident, ty } => {
                code.push_str(&format!("    pub {ident}: Option<{}>,\n", ty.indirect()));
            }
            Slot::Null => {
                code.push_str(&format!("    pub {NULL_FLAG}: bool,\n"));
            }
        }
    }
    code.push_str("}\n\n");
}

fn push_codec(code: &mut String, type_name: &str, slots: &[Slot], nullable: bool) {
    code.push_str(&format!("impl {type_name} {{\n"));

    // to_wire
    code.push_str("    /// Encode the populated variant, `null` when the null flag is set.\n");
    code.push_str("    pub fn to_wire(&self) -> Result<Value, EncodeError> {\n");
    if nullable {
        code.push_str(&format!("        if self.{NULL_FLAG} {{\n"));
        code.push_str("            return Ok(Value::Null);\n");
        code.push_str("        }\n");
    }
    for (ident, _) in payloads(slots) {
        code.push_str(&format!("        if let Some(value) = &self.{ident} {{\n"));
        code.push_str("            return encode(value);\n");
        code.push_str("        }\n");
    }
    if nullable {
        code.push_str("        Ok(Value::Object(Default::default()))\n");
    } else {
        code.push_str("        Err(EncodeError::EmptyFields {\n");
        code.push_str(&format!("            name: {type_name:?}.to_string(),\n"));
        code.push_str("        })\n");
    }
    code.push_str("    }\n\n");

    // from_wire
    code.push_str("    /// Decode by trying each variant's shape in declaration order.\n");
    code.push_str("    pub fn from_wire(data: &Value) -> Result<Self, DecodeError> {\n");
    code.push_str("        if data.is_null() {\n");
    if nullable {
        code.push_str("            return Ok(Self {\n");
        code.push_str(&format!("                {NULL_FLAG}: true,\n"));
        code.push_str("                ..Self::default()\n");
        code.push_str("            });\n");
    } else {
        code.push_str("            return Err(DecodeError::NullNotSupported {\n");
        code.push_str(&format!("                name: {type_name:?}.to_string(),\n"));
        code.push_str("            });\n");
    }
    code.push_str("        }\n");
    for (ident, ty) in payloads(slots) {
        let wrapped = if ty.is_aggregate() {
            "Box::new(value)"
        } else {
            "value"
        };
        code.push_str(&format!("        // Check for {}\n", ty.name));
        code.push_str(&format!(
            "        if let Ok(value) = strict_decode::<{}>(data) {{\n",
            ty.name
        ));
        code.push_str("            return Ok(Self {\n");
        code.push_str(&format!("                {ident}: Some({wrapped}),\n"));
        code.push_str("                ..Self::default()\n");
        code.push_str("            });\n");
        code.push_str("        }\n");
    }
    code.push_str("        Err(DecodeError::NoMatch {\n");
    code.push_str(&format!("            name: {type_name:?}.to_string(),\n"));
    code.push_str("            data: data.to_string(),\n");
    code.push_str("        })\n");
    code.push_str("    }\n");

    code.push_str("}\n\n");
}

fn push_absent_alternate(code: &mut String, type_name: &str, slots: &[Slot]) {
    code.push_str(&format!("impl AbsentAlternate for {type_name} {{\n"));
    code.push_str("    fn to_any_or_absent(&self) -> Result<(Value, bool), EncodeError> {\n");
    code.push_str(&format!("        if self.{NULL_FLAG} {{\n"));
    code.push_str("            return Ok((Value::Null, false));\n");
    code.push_str("        }\n");
    for (ident, _) in payloads(slots) {
        code.push_str(&format!("        if let Some(value) = &self.{ident} {{\n"));
        code.push_str("            return Ok((encode(value)?, false));\n");
        code.push_str("        }\n");
    }
    code.push_str("        Ok((Value::Null, true))\n");
    code.push_str("    }\n");
    code.push_str("}\n\n");
}

fn push_serde_adapters(code: &mut String, type_name: &str) {
    code.push_str(&format!("impl Serialize for {type_name} {{\n"));
    code.push_str(
        "    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {\n",
    );
    code.push_str("        self.to_wire()\n");
    code.push_str("            .map_err(<S::Error as serde::ser::Error>::custom)?\n");
    code.push_str("            .serialize(serializer)\n");
    code.push_str("    }\n");
    code.push_str("}\n\n");

    code.push_str(&format!("impl<'de> Deserialize<'de> for {type_name} {{\n"));
    code.push_str(
        "    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {\n",
    );
    code.push_str("        let data = Value::deserialize(deserializer)?;\n");
    code.push_str("        Self::from_wire(&data).map_err(<D::Error as serde::de::Error>::custom)\n");
    code.push_str("    }\n");
    code.push_str("}\n\n");
}
