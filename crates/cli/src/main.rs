//! Uniformes CLI - Drive the storefront stores from the command line.
//!
//! # Usage
//!
//! ```bash
//! # List client organizations
//! uf-cli clients
//!
//! # Remember a client selection (persisted to STOREFRONT_STATE_PATH)
//! uf-cli select 7
//!
//! # List the selected client's products, optionally filtered
//! uf-cli products --category Escolares
//!
//! # Resolve a storefront path
//! uf-cli route /productos
//!
//! # Build a cart from a JSON file and check it out
//! uf-cli checkout cart.json --client 7
//! ```
//!
//! # Commands
//!
//! - `clients` - Fetch and list client organizations
//! - `select` - Persist the selected client
//! - `products` - Fetch and list a client's products
//! - `routes` - Print the navigation table
//! - `route` - Resolve one path
//! - `checkout` - Submit a cart file

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uniformes_core::ClientId;
use uniformes_storefront::config::StorefrontConfig;
use uniformes_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "uf-cli")]
#[command(author, version, about = "Uniformes storefront CLI")]
struct Cli {
    /// Override the shop API base URL
    #[arg(long, global = true, env = "STOREFRONT_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and list client organizations
    Clients,
    /// Persist the selected client
    Select {
        /// Client ID
        client_id: i32,
    },
    /// Fetch and list a client's products
    Products {
        /// Client ID (defaults to the persisted selection)
        #[arg(short, long)]
        client: Option<i32>,

        /// Category filter
        #[arg(short = 'k', long, default_value = "Todos")]
        category: String,
    },
    /// Print the navigation table
    Routes,
    /// Resolve a storefront path
    Route {
        /// Path, e.g. /productos
        path: String,
    },
    /// Build a cart from a JSON file and check it out
    Checkout {
        /// JSON array of { "product_id", "size", "quantity", "customization" }
        file: String,

        /// Client ID (defaults to the persisted selection)
        #[arg(short, long)]
        client: Option<i32>,

        /// Print the cart without submitting it
        #[arg(long)]
        dry_run: bool,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.api_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Configuration error: {e}");
            }
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "uniformes_storefront=info,uniformes_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli.command, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn load_config(api_url: Option<&str>) -> Result<StorefrontConfig, Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    Ok(match api_url {
        Some(url) => config.with_api_url(url)?,
        None => config,
    })
}

async fn run(command: Commands, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(config)?;

    match command {
        Commands::Clients => commands::catalog::list_clients(&state).await?,
        Commands::Select { client_id } => {
            commands::catalog::select_client(&state, ClientId::new(client_id))?;
        }
        Commands::Products { client, category } => {
            commands::catalog::list_products(&state, client.map(ClientId::new), &category).await?;
        }
        Commands::Routes => commands::navigation::print_routes(),
        Commands::Route { path } => commands::navigation::resolve_path(&path)?,
        Commands::Checkout {
            file,
            client,
            dry_run,
        } => {
            commands::checkout::run(&state, &file, client.map(ClientId::new), dry_run).await?;
        }
    }
    Ok(())
}
