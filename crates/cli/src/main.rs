//! Shopfront CLI - drive the storefront client from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the token pair is kept in SHOPFRONT_TOKEN_FILE)
//! SHOPFRONT_PASSWORD=... shopfront login -e ada@example.com
//!
//! # Browse and shop
//! shopfront products list --category electronics --available true
//! shopfront cart add 42 --quantity 2
//! shopfront orders status pending
//!
//! # Where would the router send me?
//! shopfront route /cart
//! ```
//!
//! # Commands
//!
//! - `login`, `logout`, `register`, `whoami`, `verify-email`, `change-password`
//! - `products list|show|create|update|delete`
//! - `cart list|add|update|remove`
//! - `orders list|show|status|cancel`
//! - `route` - Evaluate the navigation guard for a path

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_client::{AppState, FileStore, TracingNotifier};
use shopfront_core::Email;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::account::RegisterArgs;
use commands::cart::CartAction;
use commands::orders::OrdersAction;
use commands::products::ProductsAction;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the token pair
    Login {
        #[arg(short, long)]
        email: Email,
        #[arg(short, long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log out and forget the token pair
    Logout,
    /// Create an account
    Register(RegisterArgs),
    /// Show the logged-in user
    Whoami,
    /// Confirm an email address
    VerifyEmail { token: String },
    /// Change the account password
    ChangePassword {
        #[arg(long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long)]
        new: String,
    },
    /// Browse and manage the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Inspect and cancel orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Evaluate the navigation guard for a path
    Route { path: String },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CliConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Errors and warnings become Sentry events; info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt::init();
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store = FileStore::open(&config.token_file)?;
    let state = AppState::new(config.client, Arc::new(store), Arc::new(TracingNotifier))?;

    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(&state, email, password).await?;
        }
        Commands::Logout => commands::account::logout(&state).await?,
        Commands::Register(args) => commands::account::register(&state, args).await?,
        Commands::Whoami => commands::account::whoami(&state).await?,
        Commands::VerifyEmail { token } => commands::account::verify_email(&state, &token).await?,
        Commands::ChangePassword { current, new } => {
            commands::account::change_password(&state, current, new).await?;
        }
        Commands::Products { action } => commands::products::run(&state, action).await?,
        Commands::Cart { action } => commands::cart::run(&state, action).await?,
        Commands::Orders { action } => commands::orders::run(&state, action).await?,
        Commands::Route { path } => commands::route::run(&state, &path)?,
    }
    Ok(())
}
