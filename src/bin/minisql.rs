//! Mini SQL CLI
//!
//! Command-line interface and REPL for querying CSV files.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use mini_sql::render::{format_table, to_json};
use mini_sql::session::{Response, Session};
use mini_sql::telemetry::init_tracing;
use mini_sql::{parse, Config, CsvLoader, Executor};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Mini SQL - query CSV files with SELECT / WHERE / COUNT
#[derive(Parser)]
#[command(name = "minisql")]
#[command(about = "Single-table SQL queries over CSV files", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(long, env = "MINISQL_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding table files (overrides config)
    #[arg(long, env = "MINISQL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Field delimiter (overrides config)
    #[arg(long)]
    delimiter: Option<char>,

    /// Log level when RUST_LOG is unset
    #[arg(long, env = "MINISQL_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute one SQL query
    Query {
        /// SQL query string
        sql: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Parse a query and print its structure as JSON
    Parse {
        /// SQL query string
        sql: String,
    },

    /// Interactive prompt (default)
    Repl {
        /// CSV file to load as the default table
        #[arg(long)]
        load: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(delimiter) = cli.delimiter {
        config.delimiter = delimiter;
        config.delimiter_byte()?;
    }

    match cli.command.unwrap_or(Commands::Repl { load: None }) {
        Commands::Query { sql, format } => {
            let executor = Executor::new(CsvLoader::new(config));
            let result = executor.execute_sql(&sql)?;
            match format {
                OutputFormat::Table => println!("{}", format_table(&result.columns, &result.rows)),
                OutputFormat::Json => println!("{}", to_json(&result)?),
            }
        }

        Commands::Parse { sql } => {
            let query = parse(&sql)?;
            println!("{}", serde_json::to_string_pretty(&query)?);
        }

        Commands::Repl { load } => {
            let extension = config.extension.clone();
            let session = Session::new(CsvLoader::new(config)).with_extension(extension);
            repl(session, load)?;
        }
    }

    Ok(())
}

fn repl(mut session: Session<CsvLoader>, load: Option<String>) -> anyhow::Result<()> {
    println!("{}", "Mini SQL Engine - REPL".cyan().bold());
    println!("Commands:");
    println!("  LOAD <csv-path>     -> load a CSV as the default table");
    println!("  Type SQL queries (SELECT...) and press Enter.");
    println!("  exit or quit to leave.");

    if let Some(path) = load {
        match session.load(&path) {
            Ok(rows) => println!("{} Loaded {} ({} rows).", "✓".green(), path, rows),
            Err(e) => println!("{} Could not load default CSV {}: {}", "✗".red(), path, e),
        }
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\n{} ", "sql>".bright_white());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!("\nExiting.");
            return Ok(());
        };

        match session.handle(&line?) {
            Response::Empty => {}
            Response::Exit => {
                println!("Goodbye.");
                return Ok(());
            }
            Response::Loaded { path, rows } => {
                println!("{} Loaded: {} ({} rows).", "✓".green(), path, rows)
            }
            Response::Rows(result) => println!("{}", format_table(&result.columns, &result.rows)),
            Response::Failed(e) => println!("{} [{}] {}", "Error:".red(), e.kind(), e),
        }
    }
}
