//! CLI wallet and uploader for the weave client.

use colored::Colorize;
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use weave_cli::commands::{balance, create_wallet, send, upload};
use weave_cli::{ClientConfig, WalletError};

/// Command line arguments for the CLI wallet.
#[derive(Debug, StructOpt)]
#[structopt(name = "weave", about = "Wallet, payments and data uploads for a permanent-storage network")]
struct Opt {
    /// Path to the configuration file
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Gateway to connect to, overriding the configuration
    #[structopt(short, long)]
    gateway: Option<String>,

    /// Subcommand to run
    #[structopt(subcommand)]
    cmd: Command,
}

/// Subcommands for the CLI wallet.
#[derive(Debug, StructOpt)]
enum Command {
    /// Generate a new wallet and print its key file
    #[structopt(name = "create-wallet")]
    CreateWallet {
        /// Also save the key file here
        #[structopt(long, parse(from_os_str))]
        out: Option<PathBuf>,
    },

    /// Print the address and balance of a wallet
    #[structopt(name = "balance")]
    Balance {
        /// Path to the wallet key file
        #[structopt(parse(from_os_str))]
        wallet: PathBuf,
    },

    /// Send tokens to another address
    #[structopt(name = "send")]
    Send {
        /// Path to the wallet key file
        #[structopt(parse(from_os_str))]
        wallet: PathBuf,

        /// Recipient address
        address: String,

        /// Amount to send, in display units
        amount: String,
    },

    /// Upload a file as a data transaction
    #[structopt(name = "upload")]
    Upload {
        /// Path to the wallet key file
        #[structopt(parse(from_os_str))]
        wallet: PathBuf,

        /// File to upload
        #[structopt(parse(from_os_str))]
        file: PathBuf,

        /// Content type tag, guessed from the file extension if omitted
        #[structopt(long)]
        content_type: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging; stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("{} {}", "Warning:".yellow(), e);
    }

    // Parse command line arguments
    let opt = Opt::from_args();

    if let Err(e) = run(opt).await {
        error!("{}", e);
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

async fn run(opt: Opt) -> Result<(), WalletError> {
    // Load configuration
    let mut config = ClientConfig::load(opt.config.as_deref())
        .map_err(|e| WalletError::ConfigError(e.to_string()))?;

    // Override gateway if specified
    if let Some(gateway) = opt.gateway {
        config.gateway = gateway;
    }

    match opt.cmd {
        Command::CreateWallet { out } => {
            let (wallet, address) = create_wallet::run(out.as_deref()).await?;
            println!("{}", wallet.to_json()?);
            eprintln!("{} {}", "Wallet address:".green(), address);
            if let Some(path) = out {
                eprintln!("{} {}", "Saved to:".green(), path.display());
            }
        }
        Command::Balance { wallet } => {
            println!("{} {}", "Loading key from".green(), wallet.display());
            let report = balance::run(&config, &wallet).await?;
            println!("{} {}", "Wallet address:".green(), report.address);
            println!("{} {}", "Base units:".green(), report.base);
            println!("{} {}", "Display units:".green(), report.display);
        }
        Command::Send {
            wallet,
            address,
            amount,
        } => {
            let id = send::run(&config, &wallet, &address, &amount).await?;
            println!("{} {}", "Transaction id:".green(), id);
        }
        Command::Upload {
            wallet,
            file,
            content_type,
        } => {
            let report = upload::run(&config, &wallet, &file, content_type.as_deref()).await?;
            println!("{}", "Upload complete".green());
            println!("{} {}", "Transaction id:".green(), report.id);
            println!("{} {}", "View:".green(), report.url);
        }
    }

    Ok(())
}
