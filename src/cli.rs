use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// up-desk — browse Up accounts and transactions from the terminal.
#[derive(Parser, Debug)]
#[command(name = "up-desk", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Override the API base URL
    #[arg(long, env = "UP_API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List accounts with their balances
    Accounts(AccountsArgs),

    /// List transactions of one account
    Transactions(TransactionsArgs),

    /// Write the transactions of one account to a CSV file
    Export(ExportArgs),
}

/// Arguments for the `accounts` subcommand.
#[derive(Args, Debug)]
pub struct AccountsArgs {
    /// Output as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `transactions` subcommand.
#[derive(Args, Debug)]
pub struct TransactionsArgs {
    /// Account ID (see `up-desk accounts`)
    pub account_id: String,

    /// Number of pages to load
    #[arg(long, default_value_t = 1, conflicts_with = "all")]
    pub pages: u32,

    /// Load every page
    #[arg(long)]
    pub all: bool,

    /// Output as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Account ID (see `up-desk accounts`)
    pub account_id: String,

    /// Destination CSV file
    pub file: PathBuf,

    /// Load every page before exporting
    #[arg(long)]
    pub all: bool,
}
