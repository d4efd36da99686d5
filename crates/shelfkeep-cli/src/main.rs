use anyhow::{Context, Result};
use clap::Parser;
use shelfkeep_core::Database;
use std::path::{Path, PathBuf};

mod commands;
mod config;

use commands::{BookCommand, ConfigCommand, CustomerCommand, LoanCommand, ProductCommand};
use config::Config;

#[derive(Debug, Parser)]
#[command(name = "shelfkeep", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/shelfkeep/shelfkeep.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Manage books
    ///
    /// Authors, publishers, genres and languages are given by name and
    /// created on first use.
    #[command(subcommand)]
    Book(BookCommand),
    /// Manage library customers
    #[command(subcommand)]
    Customer(CustomerCommand),
    /// Lend and return books
    ///
    /// Loans are addressed by book id. A book can be on loan to one
    /// customer at a time.
    #[command(subcommand)]
    Loan(LoanCommand),
    /// Manage products
    #[command(subcommand)]
    Product(ProductCommand),
    /// Show a category and its products (name is matched ignoring case)
    Category {
        name: String,
    },
    /// Show a manufacturer and its products (name is matched ignoring case)
    Manufacturer {
        name: String,
    },
    /// Show row counts for every collection
    Status,
    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.db {
        Some(db_path) => Config::load_with_db_path(db_path)?,
        None => Config::load()?,
    };

    let _logger = twyg::setup(config.logging.clone())
        .map_err(|e| anyhow::anyhow!("Failed to set up logging: {e:?}"))?;

    let json = cli.json;
    let db_path = &config.database_path;
    match cli.command {
        Commands::Book(command) => commands::book::run(command, &open_database(db_path)?, json),
        Commands::Customer(command) => {
            commands::customer::run(command, &open_database(db_path)?, json)
        }
        Commands::Loan(command) => commands::loan::run(command, &open_database(db_path)?, json),
        Commands::Product(command) => {
            commands::product::run(command, &open_database(db_path)?, json)
        }
        Commands::Category { name } => {
            commands::product::show_category(&name, &open_database(db_path)?, json)
        }
        Commands::Manufacturer { name } => {
            commands::product::show_manufacturer(&name, &open_database(db_path)?, json)
        }
        Commands::Status => commands::status::show_status(&open_database(db_path)?, db_path, json),
        Commands::Config(command) => commands::config::run(command, &config),
    }
}

fn open_database(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    let db = Database::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    log::debug!("Opened database {}", db_path.display());
    Ok(db)
}
