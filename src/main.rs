use std::fs::OpenOptions;
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::api::{ExpenseApi, HttpExpenseApi};
use expense_tracker::cli::{handle_expense_command, ExpenseCommands};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::controller::ViewController;

/// Environment variable holding the log filter
const LOG_ENV_VAR: &str = "EXPENSES_LOG";

#[derive(Parser)]
#[command(
    name = "expenses",
    author = "Kaylee Beyene",
    version,
    about = "Terminal expense tracker for a remote expense API",
    long_about = "Track expenses from the terminal. Records live on a remote \
                  REST API; this client lists, searches, adds, edits and \
                  deletes them and keeps a running total."
)]
struct Cli {
    /// Base URL of the expense API (overrides config.json)
    #[arg(long, global = true, env = "EXPENSES_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI (default)
    #[command(alias = "ui")]
    Tui,

    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Write the default settings file if it does not exist yet
    Init,

    /// Show current configuration and paths
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    init_logging(&paths);

    if let Some(url) = cli.api_url {
        settings.api_base_url = url;
    }

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let api = build_api(&settings)?;
            expense_tracker::tui::run_tui(api, &settings).await?;
        }
        Commands::Expense(cmd) => {
            let api = build_api(&settings)?;
            let mut controller = ViewController::with_shared_api(api);
            handle_expense_command(&mut controller, &settings, cmd, &mut io::stdout()).await?;
        }
        Commands::Init => {
            if paths.settings_file().exists() {
                println!(
                    "Settings already exist at: {}",
                    paths.settings_file().display()
                );
            } else {
                // Defaults only; a one-off --api-url is not persisted
                Settings::default().save(&paths)?;
                println!("Wrote default settings to: {}", paths.settings_file().display());
            }
        }
        Commands::Config => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Log file:       {}", paths.log_file().display());
            println!();
            println!("Settings:");
            println!("  API base URL:    {}", settings.api_base_url);
            println!("  Request timeout: {}s", settings.request_timeout().as_secs());
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
    }

    Ok(())
}

fn build_api(settings: &Settings) -> Result<Arc<dyn ExpenseApi>> {
    let api = HttpExpenseApi::from_settings(settings)
        .context("could not set up the expense API client")?;
    Ok(Arc::new(api))
}

/// Send tracing output to the log file so the TUI screen stays clean.
/// Logging is skipped when the file cannot be opened.
fn init_logging(paths: &ExpensePaths) {
    if paths.ensure_directories().is_err() {
        return;
    }
    let Ok(file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths.log_file())
    else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
