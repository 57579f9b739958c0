mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "fraktura",
    version,
    about = "Parse carrier shipment invoices and sync the records to Airtable"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a shipment-invoice PDF into structured records (without syncing)
    Parse {
        /// Path to the invoice PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write parsed output to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Dump every table found in the PDF through the generic normalizer
    Tables {
        /// Path to the PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Parse a PDF and upsert the records into the configured store
    Push {
        /// Path to the invoice PDF
        input_file: PathBuf,

        /// TOML config with api_key/base_id/table (default: AIRTABLE_* env vars)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the batches without sending anything
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            out,
        } => commands::parse::run(input_file, &output, out),
        Commands::Tables { input_file, output } => commands::tables::run(input_file, &output),
        Commands::Push {
            input_file,
            config,
            dry_run,
        } => commands::push::run(input_file, config, dry_run),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
