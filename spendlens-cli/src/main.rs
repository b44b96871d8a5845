//! Spendlens CLI - bank statement analytics in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{analyze, categorize, ingest, rules};

/// Spendlens - bank statement analytics in your terminal
#[derive(Parser)]
#[command(name = "spendlens", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one statement file and show its transactions
    Ingest {
        /// Path to a CSV, Excel or PDF statement
        file: PathBuf,
        /// Declared file type (csv, xls, xlsx, pdf); defaults to the file extension
        #[arg(long = "type", value_name = "TYPE")]
        file_type: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload statements and show the spending dashboard
    Analyze {
        /// Statement files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Account the statements belong to
        #[arg(long, default_value = "default")]
        account: String,
        /// Restrict the dashboard to one statement (by file name)
        #[arg(long)]
        statement: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the category a description would get
    Categorize {
        /// Transaction descriptions
        #[arg(required = true)]
        descriptions: Vec<String>,
    },

    /// List the active category rules in match order
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ingest { file, file_type, json } => ingest::run(&file, file_type.as_deref(), json),
        Commands::Analyze { files, account, statement, json } => {
            analyze::run(&files, &account, statement.as_deref(), json)
        }
        Commands::Categorize { descriptions } => categorize::run(&descriptions),
        Commands::Rules { json } => rules::run(json),
    }
}
