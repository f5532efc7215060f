//! WishShop CLI - drive the storefront state layer from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! ws-cli products list
//! ws-cli products category Electronics
//!
//! # Fill the cart
//! ws-cli cart add 3f2a... --quantity 2 --color black
//! ws-cli cart show
//!
//! # Log in (any password of 6+ characters is accepted)
//! ws-cli auth login -e shopper@example.com -p hunter22
//!
//! # Add a product from a JSON file
//! ws-cli admin add product.json
//! ```
//!
//! # Commands
//!
//! - `products` - Browse the catalog
//! - `cart` - Manage the cart
//! - `wishlist` - Manage the wishlist
//! - `auth` - Log in, register, log out
//! - `admin` - Add, update and delete catalog products
//!
//! State lives under `WISHSHOP_DATA_DIR` and survives between invocations.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wishshop_storefront::{StoreContext, StorefrontConfig};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "ws-cli")]
#[command(author, version, about = "WishShop storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Log in, register or log out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Manage catalog products
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List every product, newest first
    List,
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// List products in a category (exact, case-sensitive)
    Category {
        /// Category name
        name: String,
    },
    /// List categories with product counts
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Color variant
        #[arg(short, long)]
        color: Option<String>,
    },
    /// Set the quantity of a product (0 or less removes it)
    Update {
        /// Product id
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product, every color
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Show saved products
    Show,
    /// Save a product
    Add {
        /// Product id
        id: String,
    },
    /// Remove a saved product
    Remove {
        /// Product id
        id: String,
    },
    /// Save if absent, remove if present
    Toggle {
        /// Product id
        id: String,
    },
    /// Remove every saved product
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Log in with email and password
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long, env = "WISHSHOP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(short, long, env = "WISHSHOP_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show the logged-in user
    Whoami,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add a product from a JSON file
    Add {
        /// Path to a product JSON file
        file: PathBuf,
    },
    /// Replace a product's fields from a JSON file
    Update {
        /// Product id
        id: String,

        /// Path to a product JSON file
        file: PathBuf,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some(config.sentry_environment.clone().into()),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Warnings and errors become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

type CommandResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = StorefrontConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wishshop_storefront=info,wishshop_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    // The Sentry guard has to drop, flushing queued events, before exit.
    ExitCode::from(exit_status(&result))
}

/// Log a failed command and map the outcome to a process exit status.
fn exit_status(result: &CommandResult) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            1
        }
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> CommandResult {
    let mut ctx = StoreContext::open(config).await?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list(&ctx).await,
            ProductsAction::Show { id } => commands::products::show(&ctx, &id.into()).await?,
            ProductsAction::Category { name } => commands::products::category(&ctx, &name).await,
            ProductsAction::Categories => commands::products::categories(&ctx).await,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add {
                id,
                quantity,
                color,
            } => {
                commands::cart::add(&mut ctx, &id.into(), quantity, color.as_deref()).await?;
            }
            CartAction::Update { id, quantity } => {
                commands::cart::update(&mut ctx, &id.into(), quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id.into()),
            CartAction::Clear => commands::cart::clear(&mut ctx),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::wishlist::show(&ctx),
            WishlistAction::Add { id } => commands::wishlist::add(&mut ctx, &id.into()).await?,
            WishlistAction::Remove { id } => commands::wishlist::remove(&mut ctx, &id.into()),
            WishlistAction::Toggle { id } => {
                commands::wishlist::toggle(&mut ctx, &id.into()).await?;
            }
            WishlistAction::Clear => commands::wishlist::clear(&mut ctx),
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&mut ctx, &email, password.into()).await?;
            }
            AuthAction::Register {
                name,
                email,
                password,
            } => commands::auth::register(&mut ctx, &name, &email, password.into()).await?,
            AuthAction::Logout => commands::auth::logout(&mut ctx),
            AuthAction::Whoami => commands::auth::whoami(&ctx),
        },
        Commands::Admin { action } => match action {
            AdminAction::Add { file } => commands::admin::add(&ctx, &file).await?,
            AdminAction::Update { id, file } => {
                commands::admin::update(&ctx, &id.into(), &file).await?;
            }
            AdminAction::Delete { id } => commands::admin::delete(&ctx, &id.into()).await?,
        },
    }
    Ok(())
}
