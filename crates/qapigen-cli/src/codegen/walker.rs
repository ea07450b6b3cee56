//! Schema traversal and entity dispatch.

use super::alternates::AlternateEmitter;
use super::enums::emit_enum;
use super::naming::{IdentScope, NameMapper};
use super::output::{Output, Target};
use super::structs::StructEmitter;
use qapigen_core::{Schema, SchemaEntity, SchemaInvariantError, StructType};
use std::collections::{BTreeMap, BTreeSet};

/// Type names generated code already uses: runtime re-exports, serde imports
/// and prelude types.
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "AbsentAlternate",
    "Box",
    "DecodeError",
    "Default",
    "Deserialize",
    "Deserializer",
    "EncodeError",
    "Option",
    "Result",
    "Serialize",
    "Serializer",
    "Strict",
    "String",
    "Value",
    "Vec",
];

/// Run-scoped emission state.
///
/// Records which entities have been emitted and which Rust type identifiers
/// they claimed. One context serves exactly one generation run.
#[derive(Debug, Clone)]
pub struct EmitContext {
    emitted: BTreeSet<String>,
    types: IdentScope,
    counts: BTreeMap<Target, usize>,
}

impl Default for EmitContext {
    fn default() -> Self {
        Self::new()
    }
}

impl EmitContext {
    pub fn new() -> Self {
        Self {
            emitted: BTreeSet::new(),
            types: IdentScope::with_reserved("types", RESERVED_TYPE_NAMES),
            counts: BTreeMap::new(),
        }
    }

    /// Record that entity `name` is emitted as the Rust type `ident`.
    pub fn mark_emitted(
        &mut self,
        name: &str,
        ident: &str,
    ) -> Result<(), SchemaInvariantError> {
        if !self.emitted.insert(name.to_string()) {
            return Err(SchemaInvariantError::DoubleEmission {
                name: name.to_string(),
            });
        }
        self.types.claim(ident, name)
    }

    /// Number of blocks appended to `target`.
    pub fn count(&self, target: Target) -> usize {
        self.counts.get(&target).copied().unwrap_or(0)
    }

    fn record(&mut self, target: Target) {
        *self.counts.entry(target).or_default() += 1;
    }
}

/// Visits schema entities in declaration order and dispatches each to its emitter.
pub struct SchemaWalker<'a> {
    schema: &'a Schema,
    names: &'a NameMapper,
    structs: StructEmitter<'a>,
    alternates: AlternateEmitter<'a>,
}

impl<'a> SchemaWalker<'a> {
    /// `nullable` holds the names of alternates that accept explicit `null`.
    pub fn new(
        schema: &'a Schema,
        names: &'a NameMapper,
        nullable: &'a BTreeSet<String>,
    ) -> Self {
        Self {
            schema,
            names,
            structs: StructEmitter::new(schema, names, nullable),
            alternates: AlternateEmitter::new(schema, names),
        }
    }

    /// Emit every entity of the schema into `output`.
    ///
    /// Stops at the first invariant violation; `output` is then incomplete and
    /// must be discarded.
    pub fn walk(
        &self,
        ctx: &mut EmitContext,
        output: &mut Output,
    ) -> Result<(), SchemaInvariantError> {
        for entity in self.schema.entities() {
            self.visit(entity, ctx, output)?;
        }
        Ok(())
    }

    fn visit(
        &self,
        entity: &SchemaEntity,
        ctx: &mut EmitContext,
        output: &mut Output,
    ) -> Result<(), SchemaInvariantError> {
        match entity {
            SchemaEntity::Enum(ty) => {
                let ident = self.names.to_type_name(&ty.name);
                ctx.mark_emitted(&ty.name, &ident)?;
                output.append(Target::Enum, &emit_enum(ty, self.names)?);
                ctx.record(Target::Enum);
                tracing::debug!(entity = %ty.name, ident = %ident, "emitted enum");
            }
            SchemaEntity::Struct(ty) => {
                if self.names.is_empty_object(&ty.name) {
                    tracing::trace!(entity = %ty.name, "skipping empty object");
                    return Ok(());
                }
                if self.names.is_base_wrapper(&ty.name) {
                    tracing::trace!(entity = %ty.name, "skipping base wrapper");
                    return Ok(());
                }
                self.visit_struct(ty, ctx, output)?;
            }
            SchemaEntity::Alternate(ty) => {
                let ident = self.names.to_type_name(&ty.name);
                ctx.mark_emitted(&ty.name, &ident)?;
                output.append(Target::Alternate, &self.alternates.emit(ty)?);
                ctx.record(Target::Alternate);
                tracing::debug!(
                    entity = %ty.name,
                    ident = %ident,
                    nullable = ty.is_nullable(),
                    "emitted alternate"
                );
            }
            SchemaEntity::Array(_) | SchemaEntity::Command(_) | SchemaEntity::Event(_) => {
                tracing::trace!(entity = %entity.name(), meta = entity.meta(), "nothing to emit");
            }
        }
        Ok(())
    }

    /// Emit `ty` after any base wrapper reached through its variants.
    ///
    /// Base wrappers are skipped at the top level, so a variant payload of
    /// that kind is only ever emitted here.
    fn visit_struct(
        &self,
        ty: &StructType,
        ctx: &mut EmitContext,
        output: &mut Output,
    ) -> Result<(), SchemaInvariantError> {
        let ident = self.names.to_type_name(&ty.name);
        ctx.mark_emitted(&ty.name, &ident)?;

        if let Some(variants) = &ty.variants {
            for variant in &variants.variants {
                match self.schema.lookup_struct(&variant.ty) {
                    Some(payload) if self.names.is_empty_object(&payload.name) => {}
                    Some(payload) if self.names.is_base_wrapper(&payload.name) => {
                        self.visit_struct(payload, ctx, output)?;
                    }
                    // Any other struct gets its own top-level visit.
                    Some(_) => {}
                    None => {
                        tracing::warn!(
                            entity = %ty.name,
                            variant = %variant.name,
                            payload = %variant.ty,
                            "variant payload is not a struct type"
                        );
                    }
                }
            }
        }

        output.append(Target::Struct, &self.structs.emit(ty)?);
        ctx.record(Target::Struct);
        tracing::debug!(entity = %ty.name, ident = %ident, "emitted struct");

        Ok(())
    }
}
