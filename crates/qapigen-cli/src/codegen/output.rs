//! Output buffers of one generation run.
//!
//! Generated code is collected into four category buffers, each later written
//! to its own file of the generated module:
//!
//! ```text
//! <module>/
//!   alternates.rs
//!   enums.rs
//!   helpers.rs
//!   structs.rs
//!   mod.rs
//! ```
//!
//! Buffers are only ever appended to, so blocks keep emission order.

use std::collections::BTreeMap;

/// Header written at the top of every generated file.
pub const GENERATED_HEADER: &str = "// @generated by qapigen. Do not edit.\n";

/// Output category of an emitted block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Target {
    Alternate,
    Enum,
    Helper,
    Struct,
}

impl Target {
    pub const ALL: [Target; 4] = [
        Target::Alternate,
        Target::Enum,
        Target::Helper,
        Target::Struct,
    ];

    /// Name of the generated submodule holding this category.
    pub fn module_name(self) -> &'static str {
        match self {
            Target::Alternate => "alternates",
            Target::Enum => "enums",
            Target::Helper => "helpers",
            Target::Struct => "structs",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.rs", self.module_name())
    }
}

/// Per-category text buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    buffers: BTreeMap<Target, String>,
}

impl Output {
    /// Empty buffers, each starting with its file header.
    ///
    /// The helpers buffer re-exports the runtime items generated code relies
    /// on from `runtime_crate`; the other buffers import them through
    /// `super::*`.
    pub fn new(runtime_crate: &str) -> Self {
        let mut buffers = BTreeMap::new();

        for target in Target::ALL {
            let mut code = String::from(GENERATED_HEADER);
            code.push('\n');

            match target {
                Target::Helper => {
                    code.push_str(&format!(
                        "pub use {runtime_crate}::{{\n    AbsentAlternate, DecodeError, EncodeError, Strict, Value, deserialize_present,\n    encode, is_absent, strict_decode,\n}};\n"
                    ));
                }
                _ => {
                    code.push_str("#[allow(unused_imports)]\nuse super::*;\n");
                    code.push_str("#[allow(unused_imports)]\n");
                    code.push_str("use serde::{Deserialize, Deserializer, Serialize, Serializer};\n");
                }
            }

            buffers.insert(target, code);
        }

        Self { buffers }
    }

    /// Append a block to a buffer, separated from the previous one by a blank line.
    pub fn append(&mut self, target: Target, block: &str) {
        let buffer = self.buffers.entry(target).or_default();
        buffer.push('\n');
        buffer.push_str(block);
        if !block.ends_with('\n') {
            buffer.push('\n');
        }
    }

    pub fn get(&self, target: Target) -> &str {
        self.buffers.get(&target).map(String::as_str).unwrap_or("")
    }

    /// Buffers in file-name order.
    pub fn buffers(&self) -> impl Iterator<Item = (Target, &str)> {
        self.buffers.iter().map(|(target, code)| (*target, code.as_str()))
    }

    /// Contents of the `mod.rs` tying the category files together.
    pub fn module_index(&self) -> String {
        let mut code = String::from(GENERATED_HEADER);
        code.push('\n');

        for target in Target::ALL {
            code.push_str(&format!("pub mod {};\n", target.module_name()));
        }
        code.push('\n');
        for target in Target::ALL {
            code.push_str(&format!("pub use {}::*;\n", target.module_name()));
        }

        code
    }
}
