//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use rocketshoes_core::ProductId;
use rocketshoes_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "rocketshoes", about = "RocketShoes shopping cart", version)]
pub struct Cli {
    /// Storefront API base URL (overrides ROCKETSHOES_API_URL).
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// SQLite file holding the cart (overrides ROCKETSHOES_DB_PATH).
    #[arg(long, global = true, conflicts_with = "ephemeral")]
    pub db_path: Option<PathBuf>,

    /// Keep the cart in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log output format (logs go to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogArg::Json)]
    pub log_format: LogArg,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart.
    Show,
    /// Add one unit of a product.
    Add { product_id: ProductId },
    /// Remove a product from the cart.
    Remove { product_id: ProductId },
    /// Set the amount of a product already in the cart.
    Update {
        product_id: ProductId,
        /// Values <= 0 are ignored.
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogArg {
    Json,
    Pretty,
}

impl From<LogArg> for LogFormat {
    fn from(value: LogArg) -> Self {
        match value {
            LogArg::Json => LogFormat::Json,
            LogArg::Pretty => LogFormat::Pretty,
        }
    }
}
