mod cli;
mod error;
mod output;

use std::fs::File;
use std::io;

use clap::Parser;
use cli::{Command, ExportArgs, TransactionsArgs};
use error::CliError;
use tracing::info;
use tracing_subscriber::EnvFilter;
use upbank::{Account, EnvToken, Loaded, Transaction, UpClient, UpConfig};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv(); // load .env if present

    let cli = cli::Cli::parse();

    // Initialize tracing; RUST_LOG wins over --log-level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "up-desk failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> Result<(), CliError> {
    let mut config = UpConfig::default();
    if let Some(url) = cli.base_url {
        config = config.with_base_url(url);
    }
    let client = UpClient::new(config, EnvToken::default())?;

    match cli.command {
        Command::Accounts(args) => {
            let accounts = client.load_all_accounts().await?;
            info!(accounts = accounts.records.len(), "accounts loaded");
            output::write_accounts(&accounts.records, args.json, &mut io::stdout().lock())
        }

        Command::Transactions(args) => {
            let account = resolve_account(&client, &args.account_id).await?;
            let loaded = load_transactions(&client, &account, &args).await?;
            output::write_transactions(&loaded.records, args.json, &mut io::stdout().lock())
        }

        Command::Export(args) => export(&client, &args).await,
    }
}

async fn resolve_account(client: &UpClient, account_id: &str) -> Result<Account, CliError> {
    client.load_all_accounts().await?;
    client
        .find_account(account_id)
        .ok_or_else(|| CliError::UnknownAccount(account_id.to_string()))
}

async fn load_transactions(
    client: &UpClient,
    account: &Account,
    args: &TransactionsArgs,
) -> Result<Loaded<Transaction>, CliError> {
    if args.all {
        return Ok(client.load_all_transactions(account).await?);
    }

    let mut loaded = client.load_transactions_for(account).await?;
    for _ in 1..args.pages.max(1) {
        let Some(cursor) = loaded.next.clone() else {
            break;
        };
        loaded = client
            .load_next_transactions(account, Some(&cursor))
            .await?;
    }
    info!(
        account = %account.id,
        transactions = loaded.records.len(),
        exhausted = loaded.is_exhausted(),
        "transactions loaded"
    );
    Ok(loaded)
}

/// Load the account's transactions, then write whatever the cache holds.
async fn export(client: &UpClient, args: &ExportArgs) -> Result<(), CliError> {
    let account = resolve_account(client, &args.account_id).await?;
    if args.all {
        client.load_all_transactions(&account).await?;
    } else {
        client.load_transactions_for(&account).await?;
    }

    let transactions = client
        .cached_transactions(&account)
        .ok_or_else(|| CliError::NothingToExport(account.id.clone()))?;

    let file = File::create(&args.file)?;
    output::write_transactions_csv(&transactions, file)?;
    info!(
        account = %account.id,
        rows = transactions.len(),
        file = %args.file.display(),
        "export written"
    );
    Ok(())
}
