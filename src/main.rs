use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use rowgen::codegen::{CodeGenerator, GenOptions, GoGenerator};
use rowgen::config::DbConfig;
use rowgen::introspect::SchemaReader;

#[derive(Debug, Clone, ValueEnum)]
enum Driver {
    Postgres,
    Mysql,
}

#[derive(Parser, Debug)]
#[command(name = "rowgen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Database driver
    #[arg(long, value_enum)]
    driver: Driver,

    /// Database connection string (falls back to DATABASE_URL)
    #[arg(long)]
    dbconnect: Option<String>,

    /// Database name
    #[arg(long)]
    database: String,

    /// Comma-delimited list of tables to include (default: all)
    #[arg(long)]
    tables: Option<String>,

    /// Package name for the generated file
    #[arg(long, default_value = "models")]
    pkg: String,

    /// Output file path (default: stdout)
    #[arg(long)]
    outfile: Option<PathBuf>,

    /// Capitalize the first letter of generated field names
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    exportfields: bool,

    /// Generate Rows/DB interfaces instead of referencing the concrete
    /// driver cursor
    #[arg(long)]
    dbinterface: bool,

    /// Path to .env file for connection config
    #[arg(long, default_value = "./.env")]
    env_file: PathBuf,

    /// Verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    if let Err(e) = run() {
        error!(error = ?e, "Fatal error");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("rowgen v{}", env!("CARGO_PKG_VERSION"));
    info!(
        driver = ?cli.driver,
        database = ?cli.database,
        tables = ?cli.tables,
        pkg = ?cli.pkg,
        outfile = ?cli.outfile,
        "Starting code generation"
    );

    let config = DbConfig::resolve(cli.dbconnect.clone(), &cli.env_file)
        .context("Failed to resolve database connection")?;
    debug!(connection = ?config.redacted(), "Resolved connection string");

    let opts = GenOptions::new(cli.pkg.clone())
        .with_export_fields(cli.exportfields)
        .with_interface(cli.dbinterface);
    debug!(options = ?opts, "Generation options");

    let mut reader = build_reader(&cli.driver, &config, &opts)?;
    let tables = reader
        .read_tables_schema(&cli.database, cli.tables.as_deref())
        .context("Failed to read tables schema")?;

    if tables.is_empty() {
        warn!("No tables found after filtering");
    }

    for table in &tables {
        debug!(table = ?table.name, columns = table.columns.len(), "Table");
    }

    let mut out: Box<dyn Write> = match &cli.outfile {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open output file {}", path.display()))?;
            Box::new(file)
        }
        None => Box::new(io::stdout().lock()),
    };

    GoGenerator
        .generate(&tables, &opts, &mut out)
        .context("Failed to generate code")?;
    out.flush().context("Failed to flush output")?;

    info!(tables = tables.len(), "Code generation complete");
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn build_reader(
    driver: &Driver,
    config: &DbConfig,
    opts: &GenOptions,
) -> Result<Box<dyn SchemaReader>> {
    match driver {
        Driver::Postgres => postgres_reader(config, opts),
        Driver::Mysql => mysql_reader(config, opts),
    }
}

#[cfg(feature = "postgres")]
fn postgres_reader(config: &DbConfig, opts: &GenOptions) -> Result<Box<dyn SchemaReader>> {
    use rowgen::PostgresSchemaReader;

    info!(connection = ?config.redacted(), "Using PostgreSQL schema reader");
    Ok(Box::new(PostgresSchemaReader::new(
        config.connect.clone(),
        opts.export_fields,
        opts.row_type(),
    )))
}

#[cfg(not(feature = "postgres"))]
fn postgres_reader(_config: &DbConfig, _opts: &GenOptions) -> Result<Box<dyn SchemaReader>> {
    anyhow::bail!("PostgreSQL support not enabled. Rebuild with --features postgres")
}

#[cfg(feature = "mysql")]
fn mysql_reader(config: &DbConfig, opts: &GenOptions) -> Result<Box<dyn SchemaReader>> {
    use rowgen::MysqlSchemaReader;

    info!(connection = ?config.redacted(), "Using MySQL schema reader");
    Ok(Box::new(MysqlSchemaReader::new(
        config.connect.clone(),
        opts.export_fields,
        opts.row_type(),
    )))
}

#[cfg(not(feature = "mysql"))]
fn mysql_reader(_config: &DbConfig, _opts: &GenOptions) -> Result<Box<dyn SchemaReader>> {
    anyhow::bail!("MySQL support not enabled. Rebuild with --features mysql")
}
