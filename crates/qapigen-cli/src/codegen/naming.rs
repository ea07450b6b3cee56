//! Naming convention utilities for code generation.
//!
//! This module maps schema identifiers onto Rust identifiers and detects when
//! two schema names would produce the same identifier.
//!
//! # Conversions
//!
//! | Input | Method | Output |
//! |-------|--------|--------|
//! | `q_obj_SocketAddress-base` | [`NameMapper::to_type_name`] | `SocketAddressBase` |
//! | `q_obj_WATCHDOG-arg` | [`NameMapper::to_type_name`] | `WatchdogArg` |
//! | `display-name` | [`NameMapper::to_field_name`] | `display_name` |
//! | `type` | [`NameMapper::to_field_name`] | `r#type` |
//! | `vhost-user` | [`NameMapper::to_constant_name`] | `VhostUser` |

use qapigen_core::{GeneratorConfig, SchemaInvariantError};
use std::collections::BTreeMap;

/// Keywords that can be used as identifiers in raw form (`r#type`).
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const PLAIN_KEYWORDS: &[&str] = &["crate", "self", "super", "Self"];

/// Maps schema names to Rust identifiers.
///
/// Every method is a pure function of its input and the configured prefixes.
///
/// # Examples
///
/// ```
/// use qapigen_cli::codegen::naming::NameMapper;
///
/// let names = NameMapper::default();
///
/// assert_eq!(names.to_type_name("q_obj_SocketAddress-base"), "SocketAddressBase");
/// assert_eq!(names.to_field_name("backing-file"), "backing_file");
/// assert_eq!(names.to_constant_name("NetClientDriver", "vhost-user"), "VhostUser");
/// ```
#[derive(Debug, Clone)]
pub struct NameMapper {
    object_prefix: String,
    base_suffix: String,
    empty_object: String,
}

impl Default for NameMapper {
    fn default() -> Self {
        Self::from_config(&GeneratorConfig::default())
    }
}

impl NameMapper {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            object_prefix: config.object_prefix.clone(),
            base_suffix: config.base_suffix.clone(),
            empty_object: config.empty_object.clone(),
        }
    }

    /// Whether `name` is an object type the front-end synthesized.
    pub fn is_implicit(&self, name: &str) -> bool {
        name.starts_with(&self.object_prefix) || self.is_empty_object(name)
    }

    /// Whether `name` is an anonymous base wrapper, only ever embedded via `base`.
    pub fn is_base_wrapper(&self, name: &str) -> bool {
        name.starts_with(&self.object_prefix) && name.ends_with(&self.base_suffix)
    }

    pub fn is_empty_object(&self, name: &str) -> bool {
        name == self.empty_object
    }

    /// Convert a schema type name to a Rust type identifier.
    pub fn to_type_name(&self, schema_name: &str) -> String {
        let name = schema_name
            .strip_prefix(self.object_prefix.as_str())
            .unwrap_or(schema_name);

        let ident: String = name.split(['_', '-']).map(case_segment).collect();

        escape_type_ident(ident)
    }

    /// Convert a member name to a snake_case Rust field identifier.
    pub fn to_field_name(&self, member_name: &str) -> String {
        let mut ident = split_words(member_name).join("_");

        if !ident.starts_with(|c: char| c.is_alphabetic() || c == '_') {
            ident.insert(0, '_');
        }

        escape_keyword(ident)
    }

    /// Convert an enum member to the identifier of its enum variant.
    ///
    /// Names that would not start with a letter are prefixed with the enum's
    /// type name.
    pub fn to_constant_name(&self, enum_name: &str, member_name: &str) -> String {
        let ident: String = member_name.split(['_', '-']).map(case_segment).collect();

        if ident.starts_with(char::is_alphabetic) {
            escape_type_ident(ident)
        } else {
            format!("{}{}", self.to_type_name(enum_name), ident)
        }
    }
}

/// Title-case a segment unless it is already mixed-case.
fn case_segment(segment: &str) -> String {
    if is_mixed_case(segment) {
        segment.to_string()
    } else {
        title_case(segment)
    }
}

fn is_mixed_case(segment: &str) -> bool {
    segment.chars().any(char::is_uppercase) && segment.chars().any(char::is_lowercase)
}

/// Upper-case letters that start the segment or follow a non-letter, lower-case the rest.
///
/// # Examples
///
/// ```
/// use qapigen_cli::codegen::naming::title_case;
///
/// assert_eq!(title_case("watchdog"), "Watchdog");
/// assert_eq!(title_case("WATCHDOG"), "Watchdog");
/// assert_eq!(title_case("ipv4addr"), "Ipv4Addr");
/// ```
pub fn title_case(segment: &str) -> String {
    let mut result = String::with_capacity(segment.len());
    let mut after_letter = false;

    for c in segment.chars() {
        if c.is_alphabetic() {
            if after_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            after_letter = true;
        } else {
            result.push(c);
            after_letter = false;
        }
    }

    result
}

/// Split on `_`, `-` and lower-to-upper case boundaries, lower-casing each word.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();

    for segment in name.split(['_', '-']).filter(|s| !s.is_empty()) {
        let mut word = String::new();
        let mut prev_lower_or_digit = false;

        for c in segment.chars() {
            if c.is_uppercase() && prev_lower_or_digit && !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            prev_lower_or_digit = c.is_lowercase() || c.is_ascii_digit();
            word.extend(c.to_lowercase());
        }

        if !word.is_empty() {
            words.push(word);
        }
    }

    words
}

fn escape_keyword(ident: String) -> String {
    if RAW_KEYWORDS.contains(&ident.as_str()) {
        format!("r#{ident}")
    } else if PLAIN_KEYWORDS.contains(&ident.as_str()) {
        format!("{ident}_")
    } else {
        ident
    }
}

fn escape_type_ident(mut ident: String) -> String {
    if !ident.starts_with(|c: char| c.is_alphabetic() || c == '_') {
        ident.insert(0, '_');
    }
    if PLAIN_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// The identifier without a raw-identifier prefix.
pub fn unraw(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Identifiers claimed in one emitted scope.
///
/// Claiming an identifier a second time is a collision, whether or not the two
/// schema names are distinct.
#[derive(Debug, Clone)]
pub struct IdentScope {
    scope: String,
    claimed: BTreeMap<String, String>,
}

impl IdentScope {
    pub fn new(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            claimed: BTreeMap::new(),
        }
    }

    /// A scope where `reserved` identifiers are already taken.
    pub fn with_reserved(scope: impl Into<String>, reserved: &[&str]) -> Self {
        let mut this = Self::new(scope);
        for ident in reserved {
            this.claimed
                .insert((*ident).to_string(), format!("<reserved {ident}>"));
        }
        this
    }

    /// Claim `ident` on behalf of the schema name `source`.
    ///
    /// A bare `_`, which is what an empty or separator-only name maps to, is
    /// rejected before any collision check.
    pub fn claim(&mut self, ident: &str, source: &str) -> Result<(), SchemaInvariantError> {
        if matches!(unraw(ident), "" | "_") {
            return Err(SchemaInvariantError::InvalidIdentifier {
                scope: self.scope.clone(),
                name: source.to_string(),
                ident: ident.to_string(),
            });
        }
        if let Some(first) = self.claimed.get(ident) {
            return Err(SchemaInvariantError::IdentifierCollision {
                scope: self.scope.clone(),
                ident: ident.to_string(),
                first: first.clone(),
                second: source.to_string(),
            });
        }
        self.claimed.insert(ident.to_string(), source.to_string());
        Ok(())
    }
}
