//! qapigen CLI - Rust code generator for QAPI-style schemas
//!
//! Commands:
//! - `qapigen generate` - Generate the Rust module for a schema
//! - `qapigen check` - Run generation without writing, reporting what would be emitted

use anyhow::Result;
use clap::{Parser, Subcommand};
use qapigen_cli::generate::{self, load_config};
use qapigen_cli::logging::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qapigen")]
#[command(author, version, about = "Generate Rust types and JSON codecs from a resolved schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the Rust module for a schema
    Generate {
        /// Path to the schema IR (JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Directory the module directory is created in
        #[arg(short, long)]
        output: PathBuf,

        /// Path to qapigen.toml
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Name of the generated module (overrides the config file)
        #[arg(short, long)]
        module: Option<String>,
    },

    /// Check that a schema generates cleanly, without writing files
    Check {
        /// Path to the schema IR (JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Path to qapigen.toml
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            schema,
            output,
            config,
            module,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(module) = module {
                config = config.with_module_name(module);
                config.validate()?;
            }
            init_logging(config.log_level);

            let written = generate::run(&schema, &output, &config)?;

            println!("Generated module '{}':", config.module_name);
            for path in written {
                println!("  {}", path.display());
            }
        }
        Commands::Check { schema, config } => {
            let config = load_config(config.as_deref())?;
            init_logging(config.log_level);

            println!("Checking schema: {}", schema.display());
            let summary = generate::check(&schema, &config)?;

            for (meta, count) in &summary.entities {
                println!("✓ {meta}: {count}");
            }
            for (target, bytes) in &summary.bytes {
                println!("  {}: {bytes} bytes", target.file_name());
            }
            println!("\nSchema generates cleanly!");
        }
    }

    Ok(())
}
