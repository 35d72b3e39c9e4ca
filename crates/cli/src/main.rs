//! RocketShoes CLI - browse the catalog and manage the cart.
//!
//! # Usage
//!
//! ```bash
//! # List products with price and stock
//! rs-cli products
//!
//! # Show the cart
//! rs-cli cart show
//!
//! # Add one unit of product 3
//! rs-cli cart add 3
//!
//! # Set product 3 to 2 units
//! rs-cli cart update 3 2
//!
//! # Remove product 3
//! rs-cli cart remove 3
//!
//! # Empty the cart
//! rs-cli cart clear
//! ```
//!
//! Configuration comes from the environment; see
//! `rocketshoes_storefront::config` for the variables.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rocketshoes_core::ProductId;
use rocketshoes_storefront::StorefrontConfig;

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "rs-cli")]
#[command(author, version, about = "RocketShoes cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog products with price and stock
    Products,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove every product from the cart
    Clear,
    /// Set the quantity of a product already in the cart
    Update {
        /// Product ID
        product_id: ProductId,

        /// New quantity (values below 1 are ignored)
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    Some(sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rs_cli=info,rocketshoes_storefront=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let _sentry_guard = init_sentry(&config);

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CommandError> {
    match cli.command {
        Commands::Products => {
            let api = commands::api_client(config)?;
            commands::products::list(&api).await?;
        }
        Commands::Cart { action } => {
            let manager = commands::open_cart(config)?;
            match action {
                CartAction::Show => commands::cart::show(&manager.cart()),
                CartAction::Add { product_id } => {
                    commands::cart::add(&manager, product_id).await?;
                }
                CartAction::Remove { product_id } => {
                    commands::cart::remove(&manager, product_id)?;
                }
                CartAction::Clear => commands::cart::clear(&manager)?,
                CartAction::Update { product_id, amount } => {
                    commands::cart::update(&manager, product_id, amount).await?;
                }
            }
        }
    }
    Ok(())
}
