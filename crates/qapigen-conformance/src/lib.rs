//! qapigen-conformance - Generated code under test
//!
//! The build script runs the generator over `schema/conformance.json` and this
//! crate compiles the result, so a generator change that emits invalid Rust
//! fails the build. The tests under `tests/` exercise the generated codecs on
//! the wire.

/// The generated module, one submodule per output category.
pub mod qapi {
    pub mod alternates {
        include!(concat!(env!("OUT_DIR"), "/qapi/alternates.rs"));
    }

    pub mod enums {
        include!(concat!(env!("OUT_DIR"), "/qapi/enums.rs"));
    }

    pub mod helpers {
        include!(concat!(env!("OUT_DIR"), "/qapi/helpers.rs"));
    }

    pub mod structs {
        include!(concat!(env!("OUT_DIR"), "/qapi/structs.rs"));
    }

    pub use alternates::*;
    pub use enums::*;
    pub use helpers::*;
    pub use structs::*;
}
