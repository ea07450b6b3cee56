//! Rust code generation from a resolved schema.
//!
//! # Architecture
//!
//! ```text
//! Schema IR
//!     ↓
//!  [SchemaWalker] ── EmitContext (emitted set, type namespace)
//!     ↓
//!  ├─→ [emit_enum]         → enums.rs
//!  ├─→ [StructEmitter]     → structs.rs
//!  └─→ [AlternateEmitter]  → alternates.rs
//!     ↓
//!  [Output] (+ helpers.rs, mod.rs)
//! ```
//!
//! Every emitter names things through [`NameMapper`] and resolves type
//! references through [`TypeMapper`]. Generation performs no I/O; writing the
//! buffers out is left to [`crate::generate::write_output`].
//!
//! # Usage
//!
//! ```rust
//! use qapigen_cli::codegen::{Target, generate};
//! use qapigen_core::{EnumType, GeneratorConfig, Schema, SchemaEntity};
//!
//! let schema = Schema::new(vec![SchemaEntity::Enum(EnumType::new(
//!     "Color",
//!     ["red", "green"],
//! ))])
//! .unwrap();
//!
//! let output = generate(&schema, &GeneratorConfig::default()).unwrap();
//!
//! assert!(output.get(Target::Enum).contains("pub enum Color {"));
//! ```
//!
//! # Generated code
//!
//! The generated module depends on `serde` (with `derive`) and
//! `qapigen-runtime`, which also supplies `serde_json::Value`:
//!
//! - enums derive `Serialize`/`Deserialize` with each member renamed to its
//!   literal wire string
//! - structs carry their flattened base-chain members and list them in
//!   `Strict::WIRE_FIELDS`
//! - alternates get hand-written `to_wire`/`from_wire` codecs that pick the
//!   first variant whose shape strictly decodes

pub mod alternates;
pub mod enums;
pub mod naming;
pub mod output;
pub mod structs;
pub mod types;
pub mod walker;

pub use alternates::AlternateEmitter;
pub use enums::emit_enum;
pub use naming::NameMapper;
pub use output::{Output, Target};
pub use structs::StructEmitter;
pub use types::{TargetType, TypeKind, TypeMapper};
pub use walker::{EmitContext, SchemaWalker};

use qapigen_core::{GeneratorConfig, Schema, SchemaInvariantError};

/// Generate the output buffers for `schema`.
///
/// Either every entity is emitted or an error is returned; partial output is
/// never handed back.
pub fn generate(
    schema: &Schema,
    config: &GeneratorConfig,
) -> Result<Output, SchemaInvariantError> {
    let names = NameMapper::from_config(config);
    let nullable = schema.nullable_alternates();
    let walker = SchemaWalker::new(schema, &names, &nullable);

    let mut ctx = EmitContext::new();
    let mut output = Output::new(&config.runtime_crate);

    walker.walk(&mut ctx, &mut output)?;

    tracing::info!(
        entities = schema.len(),
        enums = ctx.count(Target::Enum),
        structs = ctx.count(Target::Struct),
        alternates = ctx.count(Target::Alternate),
        nullable = nullable.len(),
        "generation complete"
    );

    Ok(output)
}
