use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

/// scwallet: Social Connector custodial wallet from the command line.
#[derive(Parser, Debug)]
#[command(name = "scwallet", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Directory holding cookies.json and local_storage.json
    #[arg(long, default_value = ".scwallet", global = true)]
    pub data_dir: PathBuf,

    /// Gateway base URL (overrides BASE_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in with email and password and store the session
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the wallet that would sign right now
    Whoami(WalletArgs),

    /// Sign base64 transactions with the active wallet
    Sign(SignArgs),

    /// Convert a deposit amount to native units and check it against a balance
    Amount(AmountArgs),
}

/// Arguments for the `login` subcommand.
#[derive(Parser, Debug)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    /// Password (read from SC_PASSWORD when omitted)
    #[arg(long, env = "SC_PASSWORD", hide_env_values = true, default_value = "")]
    pub password: String,
}

/// Wallet selection shared by the commands that need a wallet.
#[derive(Parser, Debug)]
pub struct WalletArgs {
    /// Act as this address, read-only, when no custodial session exists
    #[arg(long)]
    pub view_as: Option<String>,
}

/// Arguments for the `sign` subcommand.
#[derive(Parser, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub wallet: WalletArgs,

    /// Base64 wire transactions; read one per line from stdin when empty
    pub transactions: Vec<String>,
}

/// Arguments for the `amount` subcommand.
#[derive(Parser, Debug)]
pub struct AmountArgs {
    /// Mint decimals
    #[arg(long)]
    pub decimals: u8,

    /// Wallet balance in native units
    #[arg(long)]
    pub balance: u64,

    /// Amount as typed; empty means the whole balance
    #[arg(default_value = "")]
    pub amount: String,
}

/// Load `.env` (from `env_file`, or searched upward from the working
/// directory) and then parse `args`. The order matters: clap reads env-backed
/// arguments such as `SC_PASSWORD` while parsing.
pub fn parse_with_env<I, T>(env_file: Option<&Path>, args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    // A missing .env is fine.
    let _ = match env_file {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    Cli::try_parse_from(args)
}
