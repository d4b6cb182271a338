use anyhow::Result;
use clap::{Parser, Subcommand};

use hoa_ledger::cli::{
    handle_audit_command, handle_duplicates_command, handle_invoice_command, DuplicateCommands,
    InvoiceCommands,
};
use hoa_ledger::config::{paths::HoaPaths, settings::Settings};
use hoa_ledger::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "hoa",
    version,
    about = "Invoice line balancing and duplicate detection for HOA bookkeeping",
    long_about = "hoa-ledger keeps an invoice's expense allocation lines summing to its \
                  total by recomputing the first (balancing) line after every edit, and \
                  scans CSV files for duplicate records."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoice and line management commands
    #[command(subcommand, alias = "inv")]
    Invoice(InvoiceCommands),

    /// Duplicate detection commands
    #[command(subcommand, alias = "dup")]
    Duplicates(DuplicateCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize data directories and settings
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = HoaPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Invoice(cmd)) => {
            handle_invoice_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Duplicates(cmd)) => {
            handle_duplicates_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Audit { limit }) => {
            handle_audit_command(&storage, limit)?;
        }
        Some(Commands::Init) => {
            println!("Initializing hoa-ledger at: {}", paths.base_dir().display());
            if initialize_storage(&paths, &settings)? {
                println!("Initialization complete!");
            } else {
                println!("Already initialized; existing data left unchanged.");
            }
            println!();
            println!("Run 'hoa invoice create <vendor> --total <amount>' to open an invoice.");
        }
        Some(Commands::Config) => {
            println!("hoa-ledger Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Export directory: {}", paths.export_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:      {}", settings.currency_symbol);
            println!("  Date format:          {}", settings.date_format);
            println!("  Default fund:         {}", settings.default_fund);
            println!("  Default bank account: {}", settings.default_bank_account);
            let detection = &settings.duplicate_detection;
            println!(
                "  Duplicate scan:       strict={} fuzzy={} threshold={:.2} semantic={}",
                detection.strict_mode,
                detection.fuzzy_matching,
                detection.confidence_threshold,
                detection.semantic_analysis
            );
        }
        None => {
            println!("hoa-ledger - invoice line balancing for HOA bookkeeping");
            println!();
            println!("Run 'hoa --help' for usage information.");
        }
    }

    Ok(())
}
