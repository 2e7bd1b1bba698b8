//! Ontology Simulator CLI
//!
//! Asks a natural-language recruiting question against an exported schema
//! and reports whether the schema can answer it.

use std::path::PathBuf;

use ats_ontology::simulate::{SimulationStatus, QUERY_PATTERNS};
use ats_ontology::{GraphView, OntologyConfig, SchemaDocument, Simulator};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ontology-simulate")]
#[command(about = "Simulate recruiting questions against an ATS ontology schema")]
struct Cli {
    /// Path to a config file (ontology.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question against a schema file
    Ask {
        /// Exported schema document (JSON)
        schema: PathBuf,

        /// The question, in Korean or English
        question: String,

        /// Print the full outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the supported use-case patterns
    Patterns,
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
    let config = OntologyConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Ask {
            schema,
            question,
            json,
        } => {
            let document = SchemaDocument::load(&schema)?;
            let schema = document.into_schema()?;
            let view = GraphView::from_schema(&schema);

            let simulator = Simulator::new(config.simulator.min_match_score);
            let outcome = simulator.analyze(&question, &view)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                let icon = match outcome.status {
                    SimulationStatus::Success => "✅",
                    SimulationStatus::Partial => "⚠️ ",
                    SimulationStatus::Fail => "❌",
                };
                println!("{} {}", icon, outcome.feedback);

                for report in outcome.gap_reports() {
                    println!();
                    println!("{}:", report.title);
                    for item in &report.items {
                        println!("  - {}", item);
                    }
                    println!("  {}", report.suggestion);
                }

                if let Some(query) = &outcome.generated_query {
                    println!();
                    println!("Generated query:");
                    println!("{}", query);
                }

                if let Some(table) = &outcome.table {
                    println!();
                    println!("{}", table.columns.join(" | "));
                    for row in &table.rows {
                        println!("{}", row.join(" | "));
                    }
                    println!("({})", table.summary);
                }

                if let Some(suggestion) = &outcome.suggestion {
                    println!();
                    println!("💡 {}", suggestion);
                }
            }

            if outcome.status == SimulationStatus::Fail {
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Patterns => {
            for pattern in QUERY_PATTERNS {
                println!("{} - {}", pattern.id, pattern.name);
                for example in pattern.example_questions {
                    println!("    e.g. {}", example);
                }
            }
            Ok(())
        }
    }
}
