//! Ontology Validator CLI
//!
//! Runs the validation rules against an exported schema document.

use std::path::PathBuf;

use ats_ontology::{GraphView, SchemaDocument, ValidationEngine, ValidationLevel};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ontology-validate")]
#[command(about = "Validate an ATS ontology schema")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all validation rules against a schema file
    Check {
        /// Exported schema document (JSON)
        schema: PathBuf,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the registered validation rules
    Rules,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check { schema, json } => {
            let document = SchemaDocument::load(&schema)?;
            let schema = document.into_schema()?;
            let view = GraphView::from_schema(&schema);

            let engine = ValidationEngine::with_default_rules();
            let result = engine.validate(&view.nodes, &view.edges);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for issue in &result.issues {
                    let icon = match issue.level {
                        ValidationLevel::Error => "❌",
                        ValidationLevel::Warning => "⚠️ ",
                        ValidationLevel::Info => "ℹ️ ",
                    };
                    println!("{} [{}] {}", icon, issue.validator_name, issue.message);
                    if let Some(description) = &issue.description {
                        println!("   {}", description);
                    }
                }

                println!();
                println!(
                    "{} errors, {} warnings, {} info",
                    result.summary.error_count,
                    result.summary.warning_count,
                    result.summary.info_count
                );
                if result.is_valid {
                    println!("✅ Schema is valid");
                } else {
                    println!("❌ Schema has errors");
                }
            }

            if !result.is_valid {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Rules => {
            let engine = ValidationEngine::with_default_rules();
            for validator in engine.validators() {
                println!("{} - {}", validator.name(), validator.description());
            }
            Ok(())
        }
    }
}
