mod cli;
mod error;
mod output;

use std::path::Path;
use std::sync::Arc;

use cli::{AmountArgs, Command, SignArgs, WalletArgs};
use custody::deposit::deposit_unavailable_reason;
use custody::utils::abbreviate_address;
use custody::wire::{decode_transaction, encode_transaction};
use custody::{
    ActiveWallet, ConnectorConfig, DepositForm, KeypairWallet, SessionStore, SocialConnector,
    TracingNotifier, WalletAdapter,
};
use error::CliError;
use output::{AmountReport, WalletReport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    // Fails only when a provider is already installed.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = cli::parse_with_env(None, std::env::args_os()).unwrap_or_else(|e| e.exit());

    // Initialize tracing
    let filter = cli
        .log_level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .unwrap_or(tracing_subscriber::filter::LevelFilter::INFO);

    tracing_subscriber::fmt()
        .with_max_level(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = tokio::select! {
        result = run(cli) => result,
        _ = shutdown_signal() => {
            info!("interrupted, shutting down");
            std::process::exit(130);
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "scwallet failed");
        std::process::exit(1);
    }
}

async fn run(cli: cli::Cli) -> Result<(), CliError> {
    let cli::Cli {
        data_dir,
        base_url,
        json,
        command,
        ..
    } = cli;

    match command {
        Command::Amount(args) => amount(&args, json),
        Command::Login(args) => {
            let mut connector = connector(&data_dir, base_url.as_deref())?;
            let session = connector.login(&args.email, &args.password).await?;
            info!(address = %abbreviate_address(&session.address), "session stored");
            Ok(())
        }
        Command::Logout => {
            let mut connector = connector(&data_dir, base_url.as_deref())?;
            connector.logout()?;
            info!("logged out");
            Ok(())
        }
        Command::Whoami(args) => {
            let connector = connector(&data_dir, base_url.as_deref())?;
            whoami(&connector, &args, json)
        }
        Command::Sign(args) => {
            let connector = connector(&data_dir, base_url.as_deref())?;
            sign(&connector, args, json).await
        }
    }
}

fn connector(data_dir: &Path, base_url: Option<&str>) -> Result<SocialConnector, CliError> {
    let config = match base_url {
        Some(url) => ConnectorConfig::with_base_url(url)?,
        None => ConnectorConfig::from_env()?,
    };
    info!(base_url = %config.base_url, data_dir = %data_dir.display(), "connector ready");
    Ok(SocialConnector::new(
        config,
        SessionStore::open(data_dir),
        Arc::new(TracingNotifier),
    )?)
}

/// Resolve the wallet to use: custodial session, `--view-as`, then the
/// local `PRIVATE_KEY` wallet.
fn active_wallet(connector: &SocialConnector, args: &WalletArgs) -> Result<ActiveWallet, CliError> {
    let local: Option<Box<dyn WalletAdapter>> = match std::env::var("PRIVATE_KEY") {
        Ok(key) => Some(Box::new(KeypairWallet::from_private_key(&key)?)),
        Err(_) => None,
    };
    connector
        .active_wallet(args.view_as.as_deref(), local)?
        .ok_or(CliError::NoWallet)
}

fn whoami(connector: &SocialConnector, args: &WalletArgs, json: bool) -> Result<(), CliError> {
    let wallet = active_wallet(connector, args)?;
    let address = wallet.public_key().map(|pk| pk.to_string());
    let report = WalletReport {
        wallet: wallet.info().name.clone(),
        custodial: wallet.is_custodial(),
        connected: wallet.connected(),
        short_address: address.as_deref().map(abbreviate_address),
        address,
        profile: if wallet.is_custodial() {
            connector.profile()
        } else {
            None
        },
    };
    output::write_report(&mut std::io::stdout().lock(), &report, json)
}

async fn sign(connector: &SocialConnector, args: SignArgs, json: bool) -> Result<(), CliError> {
    let encoded = if args.transactions.is_empty() {
        read_stdin_lines().await?
    } else {
        args.transactions
    };
    let transactions = encoded
        .iter()
        .map(|tx| decode_transaction(tx))
        .collect::<Result<Vec<_>, _>>()?;

    let wallet = active_wallet(connector, &args.wallet)?;
    info!(
        wallet = %wallet.info().name,
        count = transactions.len(),
        "signing transactions"
    );
    let batch = wallet.sign_all_transactions(&transactions).await?;
    for failure in &batch.failures {
        warn!(index = failure.index, reason = %failure.reason, "transaction not signed");
    }

    let complete = batch.is_complete();
    let signed = batch
        .into_transactions()
        .iter()
        .map(encode_transaction)
        .collect::<Result<Vec<_>, _>>()?;
    output::write_transactions(&mut std::io::stdout().lock(), &signed, json)?;

    if complete {
        Ok(())
    } else {
        Err(CliError::PartialSign {
            signed: signed.len(),
            total: transactions.len(),
        })
    }
}

fn amount(args: &AmountArgs, json: bool) -> Result<(), CliError> {
    let mut form = DepositForm::open(args.balance, args.decimals);
    form.set_amount(args.amount.as_str());
    let quantity = form.quantity()?;
    let report = AmountReport {
        input: form.amount().to_string(),
        placeholder: form.placeholder(),
        native_amount: quantity.native_amount,
        display_amount: custody::amount::to_display(quantity.native_amount, args.decimals)?,
        max_native: quantity.max_native,
        can_submit: form.can_submit(),
        unavailable: deposit_unavailable_reason(true, args.balance),
    };
    output::write_report(&mut std::io::stdout().lock(), &report, json)
}

async fn read_stdin_lines() -> Result<Vec<String>, CliError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if !line.is_empty() {
            out.push(line.to_string());
        }
    }
    Ok(out)
}

/// Resolves on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
