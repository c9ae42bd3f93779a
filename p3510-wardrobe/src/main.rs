//! p3510-wardrobe - per-user clothing catalogue web app
//!
//! Talks to the hosted backend when `WARDROBE_API_URL` is set; otherwise
//! keeps everything in memory for the life of the process.

use anyhow::Result;
use clap::Parser;
use p3510_common::config::{ServerArgs, ServerSettings, TomlConfig};
use p3510_wardrobe::store::{MemoryStore, RestStore, WardrobeStore};
use p3510_wardrobe::{build_router, AppState};
use std::sync::Arc;
use tracing::{error, info, warn};

const DEFAULT_PORT: u16 = 5002;

/// Command-line arguments for p3510-wardrobe
#[derive(Parser, Debug)]
#[command(name = "p3510-wardrobe")]
#[command(about = "Wardrobe catalogue over a hosted backend")]
#[command(version)]
struct Args {
    #[command(flatten)]
    server: ServerArgs,

    /// Base URL of the hosted backend project
    #[arg(long, env = "WARDROBE_API_URL")]
    api_url: Option<String>,

    /// Project API key sent with every backend request
    #[arg(long, env = "WARDROBE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Id of the user whose slots and attributes new users receive
    #[arg(long, env = "WARDROBE_TEMPLATE_USER")]
    template_user: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let file = TomlConfig::load_optional(args.server.config.as_deref())?;
    let settings = ServerSettings::resolve(&args.server, &file, DEFAULT_PORT);

    p3510_common::logging::init_tracing(&settings.log_level);

    info!(
        "Starting p3510-wardrobe v{} (debug: {})",
        env!("CARGO_PKG_VERSION"),
        settings.debug
    );

    let api_url = args.api_url.or(file.wardrobe.api_url);
    let api_key = args.api_key.or(file.wardrobe.api_key);
    let template_user = args.template_user.or(file.wardrobe.template_user);

    let store: Arc<dyn WardrobeStore> = match api_url {
        Some(url) => {
            if api_key.as_deref().map_or(true, str::is_empty) {
                warn!("WARDROBE_API_KEY is not set; backend requests will be anonymous");
            }
            match RestStore::new(&url, api_key.as_deref()) {
                Ok(store) => {
                    info!("Using hosted backend at {}", url);
                    Arc::new(store)
                }
                Err(e) => {
                    error!("Failed to set up backend client: {}", e);
                    return Err(e.into());
                }
            }
        }
        None => {
            warn!("WARDROBE_API_URL is not set; records are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    match &template_user {
        Some(id) => info!("New users copy defaults from {}", id),
        None => info!("No template user; new users start empty"),
    }

    let app = build_router(AppState::new(store, template_user));

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("p3510-wardrobe listening on http://{}", address);
    info!("Health check: http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
