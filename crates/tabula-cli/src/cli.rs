//! `tabula`: render CREATE TABLE and SELECT statements from a table catalog
//!
//! Rendered SQL goes to stdout. Diagnostics collected by the schema and
//! query builders are printed to stderr as warnings; they never change the
//! exit status.

mod args;
mod catalog;
mod demo;
mod logging;
mod settings;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tabula_query::{ColumnSelector, Condition, OrderBySelector, QueryBuilder};
use tabula_schema::{Diagnostic, Table};

use catalog::Catalog;
use logging::LoggingConfig;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(
    name = "tabula",
    version,
    about = "Table schemas and SELECT statements from the command line"
)]
struct Cli {
    /// Settings file (defaults to <config_dir>/tabula/settings.json)
    #[arg(long, global = true, env = "TABULA_SETTINGS")]
    settings: Option<PathBuf>,

    /// Catalog file with table definitions and rows
    #[arg(long, global = true, env = "TABULA_CATALOG")]
    catalog: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print CREATE TABLE statements
    Ddl {
        /// Only this table
        table: Option<String>,
    },
    /// Build and print a SELECT statement
    Query(QueryArgs),
    /// Show the rows stored in a table
    Rows {
        table: String,
    },
    /// Print the built-in showcase queries
    Demo,
}

#[derive(Args, Debug, Default)]
struct QueryArgs {
    /// Table to query
    table: String,

    /// Column to select, `column` or `column:alias`
    #[arg(long, value_parser = args::parse_selector)]
    select: Vec<ColumnSelector>,

    /// Column to average, `column` or `column:alias`
    #[arg(long, value_parser = args::parse_selector)]
    avg: Vec<ColumnSelector>,

    /// Column to sum, `column` or `column:alias`
    #[arg(long, value_parser = args::parse_selector)]
    sum: Vec<ColumnSelector>,

    /// SELECT DISTINCT
    #[arg(long)]
    distinct: bool,

    /// Condition, `field=value` or `field__op=value`
    #[arg(long = "where", value_parser = args::parse_condition)]
    conditions: Vec<Condition>,

    #[arg(long = "group-by")]
    group_by: Vec<String>,

    /// Sort key, `column`, `column:asc` or `column:desc`
    #[arg(long = "order-by", value_parser = args::parse_order)]
    order_by: Vec<OrderBySelector>,

    #[arg(long)]
    limit: Option<u64>,

    #[arg(long)]
    offset: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.settings.as_deref())?;
    logging::init(LoggingConfig::from_settings(&settings.logging, cli.verbose))?;

    match cli.command {
        Command::Demo => run_demo(),
        Command::Ddl { ref table } => {
            let catalog = load_catalog(&cli, &settings)?;
            match table {
                Some(name) => println!("{}", catalog.require(name)?),
                None => {
                    let statements: Vec<String> =
                        catalog.tables().iter().map(Table::to_create_statement).collect();
                    println!("{}", statements.join("\n\n"));
                }
            }
        }
        Command::Query(ref query_args) => {
            let catalog = load_catalog(&cli, &settings)?;
            let query = build_query(catalog.require(&query_args.table)?, query_args);
            report(query.diagnostics());
            println!("{}", query);
        }
        Command::Rows { ref table } => {
            let catalog = load_catalog(&cli, &settings)?;
            println!("{}", rows_table(catalog.require(table)?));
        }
    }

    Ok(())
}

/// `--catalog` wins over the settings file; without either the demo tables are used
fn load_catalog(cli: &Cli, settings: &Settings) -> Result<Catalog> {
    let catalog = match cli.catalog.as_deref().or(settings.catalog.as_deref()) {
        Some(path) => Catalog::load(path)?,
        None => {
            tracing::debug!("No catalog configured, using demo tables");
            demo::catalog()
        }
    };
    report(catalog.diagnostics());
    Ok(catalog)
}

fn build_query<'a>(table: &'a Table, args: &QueryArgs) -> QueryBuilder<'a> {
    let mut query = QueryBuilder::new(table)
        .select(args.select.clone())
        .avg(args.avg.clone())
        .sum(args.sum.clone())
        .distinct(args.distinct)
        .filter(args.conditions.clone())
        .group_by(args.group_by.clone())
        .order_by(args.order_by.clone());

    if let Some(limit) = args.limit {
        query = query.limit(limit);
    }
    if let Some(offset) = args.offset {
        query = query.offset(offset);
    }
    query
}

fn rows_table(table: &Table) -> comfy_table::Table {
    let fields = table.column_repository().field_names();

    let mut grid = comfy_table::Table::new();
    grid.set_header(fields.clone());
    for row in table.rows() {
        grid.add_row(
            fields
                .iter()
                .map(|field| row.get(field).map(ToString::to_string).unwrap_or_default()),
        );
    }
    grid
}

fn run_demo() {
    let users = demo::users();
    let orders = demo::orders(&users);
    let products = demo::products();

    for table in [&users, &orders, &products] {
        println!("{};\n", table);
    }

    for (title, query) in demo::showcase(&users, &orders, &products) {
        println!("-- {}", title);
        report(query.diagnostics());
        println!("{};\n", query);
    }
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("warning: {}", diagnostic);
    }
}
