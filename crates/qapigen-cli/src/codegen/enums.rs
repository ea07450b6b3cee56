//! Enum emission.

use super::naming::{IdentScope, NameMapper};
use qapigen_core::{EnumType, SchemaInvariantError};

/// Emit the Rust enum for `ty`.
///
/// Each member becomes a unit variant renamed to its literal wire string, in
/// declaration order. The enum also gets an `as_str` accessor and an empty
/// `Strict` impl.
pub fn emit_enum(ty: &EnumType, names: &NameMapper) -> Result<String, SchemaInvariantError> {
    let type_name = names.to_type_name(&ty.name);
    let mut scope = IdentScope::new(format!("enum {}", ty.name));

    let mut variants = Vec::with_capacity(ty.members.len());
    for member in &ty.members {
        let ident = names.to_constant_name(&ty.name, &member.name);
        scope.claim(&ident, &member.name)?;
        variants.push((ident, member.name.as_str()));
    }

    let mut code = String::new();

    code.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]\n");
    code.push_str(&format!("pub enum {type_name} {{\n"));
    for (ident, wire) in &variants {
        code.push_str(&format!("    #[serde(rename = {wire:?})]\n"));
        code.push_str(&format!("    {ident},\n"));
    }
    code.push_str("}\n\n");

    code.push_str(&format!("impl {type_name} {{\n"));
    code.push_str("    /// Wire string of this member.\n");
    code.push_str("    pub const fn as_str(&self) -> &'static str {\n");
    code.push_str("        match *self {\n");
    for (ident, wire) in &variants {
        code.push_str(&format!("            Self::{ident} => {wire:?},\n"));
    }
    code.push_str("        }\n");
    code.push_str("    }\n");
    code.push_str("}\n\n");

    code.push_str(&format!("impl Strict for {type_name} {{}}\n"));

    Ok(code)
}
