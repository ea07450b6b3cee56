//! Struct emission and base-chain flattening.
//!
//! A struct's wire object carries the members of every ancestor in its base
//! chain, root first, followed by its own members. Variant payloads of a
//! struct with variants are kept in internal fields that never reach the wire.

use super::naming::{IdentScope, NameMapper, unraw};
use super::types::{TargetType, TypeMapper};
use qapigen_core::{Schema, SchemaInvariantError, StructType};
use std::collections::BTreeSet;

/// One wire field of a flattened struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Rust identifier, possibly raw (`r#type`).
    pub ident: String,
    /// Member name as it appears on the wire.
    pub wire_name: String,
    /// Schema type reference of the member.
    pub type_ref: String,
    pub ty: TargetType,
    pub optional: bool,
    /// Whether the member selects the struct's variant.
    pub discriminator: bool,
    /// Struct that declares the member.
    pub declared_in: String,
}

/// Variant payload holder of a struct with variants.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalField {
    pub ident: String,
    pub variant: String,
    pub ty: TargetType,
}

/// Emits Rust structs for schema struct types.
pub struct StructEmitter<'a> {
    schema: &'a Schema,
    names: &'a NameMapper,
    types: TypeMapper<'a>,
    nullable: &'a BTreeSet<String>,
}

impl<'a> StructEmitter<'a> {
    /// `nullable` holds the names of alternates that accept explicit `null`.
    pub fn new(
        schema: &'a Schema,
        names: &'a NameMapper,
        nullable: &'a BTreeSet<String>,
    ) -> Self {
        Self {
            schema,
            names,
            types: TypeMapper::new(schema, names),
            nullable,
        }
    }

    /// The base chain of `ty`, starting with `ty` itself and ending at the root.
    pub fn base_chain<'s>(
        &'s self,
        ty: &'s StructType,
    ) -> Result<Vec<&'s StructType>, SchemaInvariantError> {
        let mut chain = vec![ty];
        let mut current = ty;

        while let Some(base) = &current.base {
            if chain.iter().any(|level| &level.name == base) {
                let mut names: Vec<String> =
                    chain.iter().map(|level| level.name.clone()).collect();
                names.push(base.clone());
                return Err(SchemaInvariantError::BaseCycle {
                    name: ty.name.clone(),
                    chain: names,
                });
            }

            current = self
                .schema
                .lookup_struct(base)
                .ok_or_else(|| SchemaInvariantError::UnknownBase {
                    name: current.name.clone(),
                    base: base.clone(),
                })?;
            chain.push(current);
        }

        Ok(chain)
    }

    /// Wire fields of `ty`: ancestors' members root first, then its own.
    pub fn flatten(&self, ty: &StructType) -> Result<Vec<Field>, SchemaInvariantError> {
        let chain = self.base_chain(ty)?;
        let own_discriminator = ty.variants.as_ref().map(|v| v.discriminator.as_str());

        let mut scope = IdentScope::new(format!("struct {}", ty.name));
        let mut fields = Vec::new();

        for level in chain.iter().rev() {
            let level_discriminator =
                level.variants.as_ref().map(|v| v.discriminator.as_str());

            for member in &level.members {
                let ident = self.names.to_field_name(&member.name);
                scope.claim(&ident, &member.name)?;

                let name = Some(member.name.as_str());
                fields.push(Field {
                    ident,
                    wire_name: member.name.clone(),
                    type_ref: member.ty.clone(),
                    ty: self.types.map(&member.ty)?,
                    optional: member.optional,
                    discriminator: name == own_discriminator || name == level_discriminator,
                    declared_in: level.name.clone(),
                });
            }
        }

        Ok(fields)
    }

    /// Payload holders for the variants of `ty` whose types are named.
    ///
    /// Variants carried by front-end wrapper types get no holder.
    pub fn internal_fields(
        &self,
        ty: &StructType,
    ) -> Result<Vec<InternalField>, SchemaInvariantError> {
        let Some(variants) = &ty.variants else {
            return Ok(Vec::new());
        };

        variants
            .variants
            .iter()
            .filter(|variant| !self.names.is_implicit(&variant.ty))
            .map(|variant| {
                Ok(InternalField {
                    ident: self.names.to_field_name(&variant.name),
                    variant: variant.name.clone(),
                    ty: self.types.map(&variant.ty)?,
                })
            })
            .collect()
    }

    /// Emit the struct declaration and its `Strict` impl.
    pub fn emit(&self, ty: &StructType) -> Result<String, SchemaInvariantError> {
        let type_name = self.names.to_type_name(&ty.name);
        let fields = self.flatten(ty)?;
        let internal = self.internal_fields(ty)?;

        // Variant holders share the field namespace with wire fields.
        let mut scope = IdentScope::new(format!("struct {}", ty.name));
        for field in &fields {
            scope.claim(&field.ident, &field.wire_name)?;
        }
        for holder in &internal {
            scope.claim(&holder.ident, &holder.variant)?;
        }

        let mut code = String::new();

        code.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
        code.push_str(&format!("pub struct {type_name} {{\n"));

        for field in &fields {
            if field.discriminator {
                code.push_str("    // Discriminator\n");
            }
            self.push_field(&mut code, field);
        }

        if !internal.is_empty() {
            code.push_str("    // Variants fields\n");
            for holder in &internal {
                code.push_str("    #[serde(skip)]\n");
                code.push_str(&format!(
                    "    pub {}: Option<{}>,\n",
                    holder.ident,
                    holder.ty.indirect()
                ));
            }
        }

        code.push_str("}\n\n");

        let wire_fields: Vec<String> = fields
            .iter()
            .map(|field| format!("{:?}", field.wire_name))
            .collect();
        code.push_str(&format!("impl Strict for {type_name} {{\n"));
        code.push_str(&format!(
            "    const WIRE_FIELDS: Option<&'static [&'static str]> = Some(&[{}]);\n",
            wire_fields.join(", ")
        ));
        code.push_str("}\n");

        Ok(code)
    }

    fn push_field(&self, code: &mut String, field: &Field) {
        if unraw(&field.ident) != field.wire_name {
            code.push_str(&format!("    #[serde(rename = {:?})]\n", field.wire_name));
        }

        if !field.optional {
            code.push_str(&format!("    pub {}: {},\n", field.ident, field.ty.name));
            return;
        }

        if self.nullable.contains(&field.type_ref) {
            code.push_str(
                "    #[serde(default, skip_serializing_if = \"is_absent\", deserialize_with = \"deserialize_present\")]\n",
            );
        } else {
            code.push_str("    #[serde(default, skip_serializing_if = \"Option::is_none\")]\n");
        }
        code.push_str(&format!(
            "    pub {}: Option<{}>,\n",
            field.ident,
            field.ty.indirect()
        ));
    }
}

#[cfg(test)]
#[path = "structs/structs_tests.rs"]
mod structs_tests;
