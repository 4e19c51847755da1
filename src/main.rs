use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use tobacco_wishlist::{
    config::Config,
    routes,
    storage::{open_store, StorageBackend},
    AppState,
};

#[derive(Parser)]
#[command(
    name = "tobacco-wishlist",
    about = "Tobacco catalog search and wishlists for a Telegram Mini App"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Overrides SERVER_ADDRESS
        #[arg(long)]
        address: Option<String>,
        /// Overrides STORAGE_BACKEND
        #[arg(long, value_enum)]
        storage: Option<StorageBackend>,
        /// Overrides STORAGE_PATH
        #[arg(long)]
        storage_path: Option<PathBuf>,
    },
    /// Load configuration, print it with secrets redacted, and exit
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    match cli.command {
        Some(Command::CheckConfig) => {
            for line in config.redacted_summary() {
                println!("{}", line);
            }
            Ok(())
        }
        Some(Command::Serve {
            address,
            storage,
            storage_path,
        }) => {
            if let Some(address) = address {
                config.server_address = address;
            }
            if let Some(backend) = storage {
                config.storage_backend = backend;
                config.storage_path = backend.default_path();
            }
            if let Some(path) = storage_path {
                config.storage_path = path;
            }
            serve(config).await
        }
        None => serve(config).await,
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tobacco_wishlist=info,tower_http=info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if config.telegram_bot_token.is_none() {
        tracing::warn!(
            "TELEGRAM_BOT_TOKEN is not set; Mini App routes and the bot webhook will answer MISSING_BOT_TOKEN"
        );
    }

    let store = open_store(config.storage_backend, &config.storage_path).await?;
    let addr: SocketAddr = config.server_address.parse()?;
    let app_state = AppState::new(config, store)?;
    let app = routes::router(app_state);

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
