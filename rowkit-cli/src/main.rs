// SPDX-FileCopyrightText: 2026 rowkit contributors
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{debug, info};
use rowkit_db::{Columns, Database, SelectQuery};
use rowkit_cli::commands;
use rowkit_cli::config::Config;
use rowkit_cli::error::CliError;

#[derive(Parser)]
#[command(name = "rowkit")]
#[command(author, version, about = "Build rows and run queries against a SQLite database", long_about = None)]
struct Cli {
    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Config file (defaults to $ROWKIT_CONFIG, then ./rowkit.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a `test` table, insert two rows and print them
    Demo,

    /// Execute raw SQL
    Exec {
        /// One or more statements
        sql: String,
    },

    /// Select rows from a table
    Query {
        table: String,

        /// Comma-separated projection (default: all columns)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        #[arg(long = "where")]
        filter: Option<String>,

        #[arg(long)]
        group_by: Option<String>,

        #[arg(long)]
        having: Option<String>,

        #[arg(long)]
        order_by: Option<String>,

        #[arg(long)]
        limit: Option<String>,

        #[arg(long)]
        distinct: bool,
    },

    /// Insert one row given as key=value pairs
    Insert {
        table: String,

        #[arg(required = true)]
        values: Vec<String>,
    },

    /// List the columns of a table
    Columns { table: String },
}

fn main() -> Result<(), CliError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_from_env()?,
    };
    if let Some(database) = cli.database {
        config.database = database;
    }
    let db_config = config.to_db_config()?;
    debug!("Using database {}", db_config.path.display());

    let db = Database::open_with(&db_config)?;
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Demo => commands::demo(&db, &mut stdout)?,
        Commands::Exec { sql } => commands::exec(&db, &sql)?,
        Commands::Query {
            table,
            columns,
            filter,
            group_by,
            having,
            order_by,
            limit,
            distinct,
        } => {
            let mut query = SelectQuery::new(table)
                .distinct(distinct)
                .columns(Columns::with_names(columns));
            if let Some(filter) = filter {
                query = query.filter(filter);
            }
            if let Some(group_by) = group_by {
                query = query.group_by(group_by);
            }
            if let Some(having) = having {
                query = query.having(having);
            }
            if let Some(order_by) = order_by {
                query = query.order_by(order_by);
            }
            if let Some(limit) = limit {
                query = query.limit(limit);
            }
            let rows = commands::query(&db, &query, &mut stdout)?;
            info!("{rows} row(s)");
        }
        Commands::Insert { table, values } => {
            let rowid = commands::insert(&db, &table, &values)?;
            info!("Inserted row {rowid} into {table}");
        }
        Commands::Columns { table } => commands::columns(&db, &table, &mut stdout)?,
    }

    db.close()?;
    Ok(())
}
