//! `rocketshoes` — command-line front end for the cart.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use rocketshoes_cart::{
    AmountUpdate, AmountUpdateOutcome, Cart, CartError, CartOperation, CartStorage, CartStore,
};
use rocketshoes_infra::{ClientConfig, HttpStorefront, MemoryStorage, SqliteStorage};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    rocketshoes_observability::tracing::init(cli.log_format.into());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }
    if let Some(path) = cli.db_path {
        config.db_path = Some(path);
    }

    let storage: Arc<dyn CartStorage> = if cli.ephemeral {
        Arc::new(MemoryStorage::new())
    } else {
        let path = config.resolved_db_path()?;
        tracing::debug!(path = %path.display(), "opening cart storage");
        Arc::new(SqliteStorage::open(&path).await?)
    };

    let storefront = Arc::new(
        HttpStorefront::from_config(&config).context("failed to build storefront client")?,
    );
    let store = CartStore::builder(storefront.clone(), storefront, storage)
        .open()
        .await
        .context("failed to load cart")?;

    match cli.command {
        Command::Show => {}
        Command::Add { product_id } => {
            let item = store
                .add_product(product_id)
                .await
                .map_err(|err| rejected(CartOperation::Add, err))?;
            println!("added {} (now {})", item.product.title, item.amount);
        }
        Command::Remove { product_id } => {
            let item = store
                .remove_product(product_id)
                .await
                .map_err(|err| rejected(CartOperation::Remove, err))?;
            println!("removed {}", item.product.title);
        }
        Command::Update { product_id, amount } => {
            let outcome = store
                .update_product_amount(AmountUpdate::new(product_id, amount))
                .await
                .map_err(|err| rejected(CartOperation::UpdateAmount, err))?;
            match outcome {
                AmountUpdateOutcome::Updated(item) => {
                    println!("{} set to {}", item.product.title, item.amount)
                }
                AmountUpdateOutcome::Ignored => println!("amount {amount} ignored"),
            }
        }
    }

    print_cart(&store.cart());
    Ok(())
}

fn rejected(operation: CartOperation, err: CartError) -> anyhow::Error {
    let notice = err.notice(operation);
    anyhow::Error::new(err).context(notice.message())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }

    println!("{:>5}  {:<40} {:>6} {:>10} {:>11}", "id", "product", "amount", "price", "subtotal");
    for item in cart {
        println!(
            "{:>5}  {:<40} {:>6} {:>10.2} {:>11.2}",
            item.product_id(),
            item.product.title,
            item.amount,
            item.product.price,
            item.subtotal()
        );
    }
    println!("{} item(s), total {:.2}", cart.len(), cart.total());
}
