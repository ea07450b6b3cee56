//! Generates the `qapi` module from the fixture schema into `OUT_DIR`.

use anyhow::{Context, Result};
use qapigen_cli::codegen::generate;
use qapigen_cli::generate::write_output;
use qapigen_core::{GeneratorConfig, Schema};
use std::path::{Path, PathBuf};

const SCHEMA: &str = "schema/conformance.json";

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed={SCHEMA}");
    println!("cargo:rerun-if-changed=build.rs");

    let schema = Schema::from_json_file(Path::new(SCHEMA))
        .with_context(|| format!("Failed to load {SCHEMA}"))?;

    let config = GeneratorConfig::default();
    let output = generate(&schema, &config).context("Fixture schema does not generate")?;

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").context("OUT_DIR not set")?);
    write_output(&output, &out_dir.join(&config.module_name))?;

    Ok(())
}
