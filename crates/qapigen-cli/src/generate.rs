//! Loading inputs and writing the generated module

use crate::codegen::{self, Output, Target};
use anyhow::{Context, Result};
use qapigen_core::{GeneratorConfig, Schema};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the index file written next to the category files.
pub const MODULE_INDEX_FILE: &str = "mod.rs";

/// Load the generator configuration, falling back to defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => GeneratorConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {path:?}")),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Load a schema IR document.
pub fn load_schema(path: &Path) -> Result<Schema> {
    Schema::from_json_file(path).with_context(|| format!("Failed to load schema: {path:?}"))
}

/// Write every buffer of `output` plus the module index into `dir`.
///
/// Creates `dir` if needed and overwrites existing files, so writing the same
/// output twice leaves the same tree. Returns the written paths.
pub fn write_output(output: &Output, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {dir:?}"))?;

    let mut written = Vec::new();

    for (target, code) in output.buffers() {
        let path = dir.join(target.file_name());
        fs::write(&path, code).with_context(|| format!("Failed to write {path:?}"))?;
        written.push(path);
    }

    let index = dir.join(MODULE_INDEX_FILE);
    fs::write(&index, output.module_index())
        .with_context(|| format!("Failed to write {index:?}"))?;
    written.push(index);

    Ok(written)
}

/// Generate the module for `schema_path` under `output_dir/<module_name>`.
///
/// Nothing is written when generation fails.
pub fn run(
    schema_path: &Path,
    output_dir: &Path,
    config: &GeneratorConfig,
) -> Result<Vec<PathBuf>> {
    let schema = load_schema(schema_path)?;
    tracing::info!(schema = ?schema_path, entities = schema.len(), "loaded schema");

    let output = codegen::generate(&schema, config)
        .with_context(|| format!("Failed to generate code for {schema_path:?}"))?;

    let module_dir = output_dir.join(&config.module_name);
    let written = write_output(&output, &module_dir)?;
    tracing::info!(dir = ?module_dir, files = written.len(), "wrote generated module");

    Ok(written)
}

/// Outcome of a generation dry run.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSummary {
    /// Entity count per schema keyword.
    pub entities: BTreeMap<&'static str, usize>,
    /// Generated text length per output category.
    pub bytes: BTreeMap<Target, usize>,
}

/// Run generation for `schema_path` without writing anything.
pub fn check(schema_path: &Path, config: &GeneratorConfig) -> Result<CheckSummary> {
    let schema = load_schema(schema_path)?;

    let output = codegen::generate(&schema, config)
        .with_context(|| format!("Schema {schema_path:?} cannot be generated"))?;

    let mut entities = BTreeMap::new();
    for entity in schema.entities() {
        *entities.entry(entity.meta()).or_default() += 1;
    }

    let bytes = output
        .buffers()
        .map(|(target, code)| (target, code.len()))
        .collect();

    Ok(CheckSummary { entities, bytes })
}
