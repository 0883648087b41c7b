use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlx::Connection;

mod database;
mod env;
mod error;
mod import;
mod models;

use crate::error::ServiceResult;
use crate::import::bootstrap::{bootstrap, BootstrapConfig, ScriptSource};
use crate::import::import_csv_tables;
use crate::models::TableImport;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Insert the rows of the north csv files into their tables
    LoadCsv {
        /// Target database, defaults to `DATABASE_NAME`
        #[arg(long)]
        database: Option<String>,

        /// Csv file to load as `<table>=<path>`, may be repeated. Defaults to the
        /// customers, employees and orders files in `NORTH_DATA_DIR`.
        #[arg(long = "table", value_parser = TableImport::parse)]
        tables: Vec<TableImport>,
    },
    /// Create a new database, fill it and link the products to their suppliers
    Bootstrap {
        /// Database to create, defaults to `BOOTSTRAP_DATABASE`
        #[arg(long)]
        database: Option<String>,

        /// Supplier list, defaults to `SUPPLIERS_JSON`
        #[arg(long)]
        suppliers: Option<String>,

        /// Schema and seed script to run instead of the bundled one
        #[arg(long)]
        script: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let result = init().await;

    let exit_code = match result {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn init() -> ServiceResult<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::LoadCsv { database, tables } => {
            let db_name = database.unwrap_or_else(|| env::DATABASE_NAME.clone());
            let tables = if tables.is_empty() {
                TableImport::north_defaults(env::NORTH_DATA_DIR.as_str())
            } else {
                tables
            };

            let mut connection = database::connect(&database::connect_options(&db_name)).await?;
            let result = import_csv_tables(&mut connection, &tables).await;
            connection.close().await?;
            result?;
        }
        Command::Bootstrap {
            database,
            suppliers,
            script,
        } => {
            let script = match script {
                Some(path) => ScriptSource::File(path),
                None => ScriptSource::Bundled,
            };

            let config = BootstrapConfig {
                admin_options: database::connect_options(env::ADMIN_DATABASE.as_str()),
                db_name: database.unwrap_or_else(|| env::BOOTSTRAP_DATABASE.clone()),
                script,
                suppliers_path: suppliers.unwrap_or_else(|| env::SUPPLIERS_JSON.clone()),
            };
            bootstrap(&config).await?;
        }
    }

    Ok(())
}
