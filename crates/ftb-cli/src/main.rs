use std::io::Write;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ftb_config::Config;
use ftb_exchange::{FtxClient, MarketRegistry};
use ftb_import::{fetch_all_fills, AccountEvent, EntryBuilder};
use ftb_ledger::{render, Ledger};

#[derive(Parser)]
#[command(name = "ftb")]
#[command(about = "FTX US account history -> beancount journal", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the full account history and print a beancount journal on stdout.
    Export {
        /// Restrict trade history to one market (e.g. BTC/USD).
        #[arg(long)]
        symbol: Option<String>,

        /// Fills requested per pagination window.
        #[arg(long, default_value_t = 200)]
        page_limit: u32,

        /// Attach the fill's quote price as cost basis on fee postings
        /// charged in a non-quote currency.
        #[arg(long, default_value_t = false)]
        precise_fee_basis: bool,

        /// Leave deposits out of the journal.
        #[arg(long, default_value_t = false)]
        skip_deposits: bool,

        /// Leave lending/borrow interest out of the journal.
        #[arg(long, default_value_t = false)]
        skip_funding: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Dev-time .env bootstrap; a missing file is fine.
    dotenvy::dotenv().ok();

    // The journal owns stdout; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Export {
            symbol,
            page_limit,
            precise_fee_basis,
            skip_deposits,
            skip_funding,
        } => {
            run_export(
                symbol.as_deref(),
                page_limit,
                precise_fee_basis,
                skip_deposits,
                skip_funding,
            )
            .await
        }
    }
}

async fn run_export(
    symbol: Option<&str>,
    page_limit: u32,
    precise_fee_basis: bool,
    skip_deposits: bool,
    skip_funding: bool,
) -> Result<()> {
    let config = Config::from_env().context("resolving exchange credentials")?;
    let client = FtxClient::new(
        config.api_key.clone(),
        config.api_secret.clone(),
        config.subaccount.clone(),
    )?;

    let markets = client
        .markets()
        .await
        .context("loading market precision rules")?;
    let registry = MarketRegistry::from_markets(&markets);

    let fills = fetch_all_fills(&client, symbol, page_limit)
        .await
        .context("fetching trade history")?;
    tracing::info!(fills = fills.len(), "trade history fetched");

    let builder = EntryBuilder::new(registry).with_precise_fee_basis(precise_fee_basis);
    let mut ledger = Ledger::new();

    for fill in fills {
        builder.append(&mut ledger, &AccountEvent::Trade(fill))?;
    }

    if !skip_deposits {
        let deposits = client
            .deposits()
            .await
            .context("fetching deposit history")?;
        tracing::info!(deposits = deposits.len(), "deposit history fetched");
        for deposit in deposits {
            builder.append(&mut ledger, &AccountEvent::Deposit(deposit))?;
        }
    }

    if !skip_funding {
        let lending = client
            .lending_history()
            .await
            .context("fetching lending history")?;
        for payment in lending {
            builder.append(&mut ledger, &AccountEvent::LendingInterest(payment))?;
        }

        let borrows = client
            .borrow_history()
            .await
            .context("fetching borrow history")?;
        for payment in borrows {
            builder.append(&mut ledger, &AccountEvent::BorrowInterest(payment))?;
        }
        tracing::info!("funding history fetched");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render(&ledger, &mut out).context("writing journal")?;
    out.flush().context("flushing journal")?;
    Ok(())
}
