use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tokenswap::core::log::init_logging;
use tokenswap::core::{SwapError, SwapRequest};

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List current token prices
    Prices,
    /// Compute the amount received for a swap
    Swap {
        /// Currency to swap from, e.g. ETH
        from: String,
        /// Currency to swap to, e.g. USDC
        to: String,
        /// Amount of the source currency
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },
}

impl From<Commands> for tokenswap::AppCommand {
    fn from(cmd: Commands) -> tokenswap::AppCommand {
        match cmd {
            Commands::Prices => tokenswap::AppCommand::Prices,
            Commands::Swap { from, to, amount } => {
                tokenswap::AppCommand::Swap(SwapRequest::new(&from, &to, amount))
            }
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tokenswap::cli::setup::setup(),
        Some(cmd) => tokenswap::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
        // Swap errors have already been shown to the user
        if e.downcast_ref::<SwapError>().is_some() {
            std::process::exit(1);
        }
    }
    result
}
