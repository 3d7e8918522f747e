use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use gestion_sol::cli::{
    handle_catalog_command, handle_expense_command, handle_sale_command, handle_upload_command,
};
use gestion_sol::config::{paths::GestionPaths, settings::Settings};
use gestion_sol::storage::{needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "gestion",
    version,
    about = "Sales and expense bookkeeping for a small business",
    long_about = "gestion records sales and expenses into CSV files, keeps the \
                  expense-type and provider catalogs, and prints accumulated \
                  totals and due-date reports."
)]
struct Cli {
    /// Log verbosity (ignored when RUST_LOG is set)
    #[arg(long, value_enum, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Record and report sales
    #[command(subcommand, alias = "venta")]
    Sale(gestion_sol::cli::SaleCommands),

    /// Record and report expenses
    #[command(subcommand, alias = "egreso")]
    Expense(gestion_sol::cli::ExpenseCommands),

    /// Manage expense types, providers and their associations
    #[command(subcommand)]
    Catalog(gestion_sol::cli::CatalogCommands),

    /// Bulk-load sales from a CSV named with a DD-MM-YY date
    Upload(gestion_sol::cli::UploadArgs),

    /// Create the data files and seed the catalogs
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.log_level.into());

    let paths = GestionPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!("Using data directory {}", paths.data_dir().display());

    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Sale(cmd)) => {
            handle_sale_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Catalog(cmd)) => {
            handle_catalog_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Upload(args)) => {
            handle_upload_command(&storage, &settings, args)?;
        }
        Some(Commands::Init) => {
            println!("Initializing gestion-sol at: {}", paths.base_dir().display());
            gestion_sol::storage::initialize_storage(&paths, &settings)?;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("Expense types: {}", settings.default_expense_types.join(", "));
            println!("Providers:     {}", settings.default_providers.join(", "));
            println!();
            println!("Run 'gestion sale add <amount>' to record a sale.");
        }
        Some(Commands::Config) => {
            println!("gestion-sol Configuration");
            println!("=========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Initialized:     {}", storage.is_initialized());
            println!(
                "History files:   {}",
                if needs_initialization(&paths) { "missing" } else { "present" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Due date format:  {}", settings.due_date_format);
            println!("  Recent sales:     {}", settings.recent_rows);
        }
        None => {
            println!("gestion - sales and expense bookkeeping");
            println!();
            println!("Run 'gestion --help' for usage information.");
            if needs_initialization(&paths) {
                println!("Run 'gestion init' to create the data files.");
            }
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` takes precedence over `--log-level`
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "gestion_sol={},{}={}",
            level,
            env!("CARGO_CRATE_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
