//! Leadport CLI - bulk lead import/export for real-estate CRM
//!
//! # Main Commands
//!
//! ```bash
//! leadport serve                          # Start HTTP server (port 3000)
//! leadport import leads.csv --user u1     # Import a lead file
//! leadport export --user u1 -o out.csv    # Export a user's leads
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! leadport validate leads.csv             # Dry-run validation, no writes
//! ```

use clap::{Parser, Subcommand};
use leadport::{
    export_batch, import_batch, validate, Format, FormatAdapter, SqliteLeadStore,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "leadport")]
#[command(about = "Bulk lead import/export with validation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on (overrides PORT env)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Import a lead file into the database
    Import {
        /// Input file (.csv or .xlsx)
        input: PathBuf,

        /// Owning user id
        #[arg(short, long)]
        user: String,

        /// Input format (inferred from extension if not given)
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Export a user's leads to a file
    Export {
        /// Owning user id
        #[arg(short, long)]
        user: String,

        /// Output format: csv or excel
        #[arg(short, long, default_value = "csv")]
        format: String,

        /// Output file (default: the suggested export filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a lead file without writing anything
    Validate {
        /// Input file (.csv or .xlsx)
        input: PathBuf,

        /// Input format (inferred from extension if not given)
        #[arg(short, long)]
        format: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Serve { port } => {
            let port = port
                .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
                .unwrap_or(3000);
            let store = SqliteLeadStore::connect(&database_url()).await?;
            leadport::server::start_server(port, store).await?;
        }

        Commands::Import { input, user, format } => {
            let format = resolve_format(format.as_deref(), &input)?;
            let payload = tokio::fs::read(&input).await?;
            let store = SqliteLeadStore::connect(&database_url()).await?;

            let report = import_batch(&store, &payload, format, &user).await?;

            println!();
            println!("Imported: {}", report.imported);
            println!("Failed:   {}", report.failed);
            for err in &report.row_errors {
                println!("  row {}: {}", err.row, err.errors.join(", "));
            }
        }

        Commands::Export { user, format, output } => {
            let format = Format::from_str(&format)?;
            let store = SqliteLeadStore::connect(&database_url()).await?;

            let payload = export_batch(&store, &user, format).await?;
            let path = output.unwrap_or_else(|| PathBuf::from(&payload.filename));
            tokio::fs::write(&path, &payload.bytes).await?;
            println!("Wrote {} ({} bytes)", path.display(), payload.bytes.len());
        }

        Commands::Validate { input, format } => {
            let format = resolve_format(format.as_deref(), &input)?;
            let payload = tokio::fs::read(&input).await?;

            let rows = format.adapter().decode(&payload)?;
            let mut invalid = 0;
            for (idx, row) in rows.iter().enumerate() {
                let verdict = validate(row);
                if !verdict.valid {
                    invalid += 1;
                    println!("row {}: {}", idx + 1, verdict.errors.join(", "));
                }
            }
            println!();
            println!("{} rows, {} valid, {} invalid", rows.len(), rows.len() - invalid, invalid);
        }
    }

    Ok(())
}

fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://leads.db?mode=rwc".to_string())
}

/// Explicit format flag wins; otherwise infer from the file extension.
fn resolve_format(flag: Option<&str>, path: &Path) -> Result<Format, leadport::UnknownFormat> {
    match flag {
        Some(f) => Format::from_str(f),
        None => match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => Format::from_str(ext),
            None => Err(leadport::UnknownFormat),
        },
    }
}
