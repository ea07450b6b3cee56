//! Error types for schema generation

use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// A schema property the generator relies on does not hold.
///
/// Every variant is fatal: the whole generation run is aborted and no output
/// buffer reaches the sink.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaInvariantError {
    /// Two entities share a name
    #[error("duplicate entity name: {name}")]
    DuplicateEntity { name: String },

    /// An entity was emitted twice in one run
    #[error("entity emitted twice: {name}")]
    DoubleEmission { name: String },

    /// An alternate without any non-null variant
    #[error("alternate {name} has no non-null variants")]
    NoVariants { name: String },

    /// An alternate with more than one `null` variant
    #[error("alternate {name} has more than one null variant")]
    MultipleNullVariants { name: String },

    /// Two variants of one alternate share a payload type
    #[error("alternate {name} has more than one variant of type {ty}")]
    DuplicateVariantType { name: String, ty: String },

    /// A base chain loops back onto itself
    #[error("base cycle in {name}: {}", chain.join(" -> "))]
    BaseCycle { name: String, chain: Vec<String> },

    /// A base reference that does not name a struct
    #[error("base {base} of {name} is not a struct type")]
    UnknownBase { name: String, base: String },

    /// A type reference that resolves to nothing
    #[error("unknown type: {name}")]
    UnknownType { name: String },

    /// An array whose element chain leads back to itself
    #[error("array type cycle at {name}")]
    ArrayCycle { name: String },

    /// A schema name that maps to no usable identifier, such as `""` or `"-"`
    #[error("`{name}` in {scope} does not form an identifier (got `{ident}`)")]
    InvalidIdentifier {
        scope: String,
        name: String,
        ident: String,
    },

    /// Two schema names map to the same identifier in one scope
    #[error("identifier `{ident}` in {scope} is produced by both `{first}` and `{second}`")]
    IdentifierCollision {
        scope: String,
        ident: String,
        first: String,
        second: String,
    },
}

/// Error type for generator operations
#[derive(Error, Debug)]
pub enum GenerateError {
    /// The schema violates an invariant required by generation
    #[error(transparent)]
    Invariant(#[from] SchemaInvariantError),

    /// The schema IR document could not be parsed
    #[error("schema parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading inputs
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for GenerateError {
    fn from(err: serde_json::Error) -> Self {
        GenerateError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for GenerateError {
    fn from(err: toml::de::Error) -> Self {
        GenerateError::Config(err.to_string())
    }
}

impl From<std::io::Error> for GenerateError {
    fn from(err: std::io::Error) -> Self {
        GenerateError::Io(err.to_string())
    }
}
