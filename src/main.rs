use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_manager::cli::Session;
use expense_manager::config::{ExpensePaths, Settings};

#[derive(Parser)]
#[command(
    name = "expenses",
    author = "Kaylee Beyene",
    version,
    about = "Personal expense tracker",
    long_about = "Record expenses with a name, amount and date, then review them \
                  grouped by month with subtotals. Expenses live only for the \
                  duration of a session."
)]
struct Cli {
    /// Locale for month names (e.g. en_US, fr_FR)
    #[arg(long, global = true, env = "EXPENSES_LOCALE")]
    locale: Option<String>,

    /// Currency symbol shown before amounts
    #[arg(long, global = true)]
    currency: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Session,

    /// Write a default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    expense_manager::init_tracing();

    let cli = Cli::parse();

    let paths = ExpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    if let Some(locale) = cli.locale {
        settings.locale = locale;
    }
    if let Some(currency) = cli.currency {
        settings.currency_symbol = currency;
    }

    match cli.command.unwrap_or(Commands::Session) {
        Commands::Session => {
            let mut session = Session::new(&settings)?;
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            session.run(stdin.lock(), &mut io::stdout().lock(), prompt)?;
        }
        Commands::Init => {
            settings.labeler()?;
            settings.save(&paths)?;
            println!("Settings written to: {}", paths.settings_file().display());
        }
        Commands::Config => {
            println!("Expense Manager Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            if paths.is_initialized() {
                println!("Settings status:  saved");
            } else {
                println!("Settings status:  not saved (run 'expenses init'; defaults in use)");
            }
            println!();
            println!("Settings:");
            println!("  Locale:          {}", settings.locale);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
    }

    Ok(())
}
