use anyhow::Result;
use clap::{Parser, Subcommand};
use job_board::admin_cli::{handle_admin_command, AdminCli};
use job_board::environment::EnvironmentConfig;
use job_board::start_web_server;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jobalert")]
#[command(about = "Job board API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server (the default)
    Serve,
    /// Database maintenance commands
    Admin(AdminCli),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging first
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Admin(admin)) => handle_admin_command(admin).await,
        Some(Command::Serve) | None => serve().await,
    }
}

async fn serve() -> Result<()> {
    let port = std::env::var("ROCKET_PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .map_err(|_| anyhow::anyhow!("ROCKET_PORT must be a valid port number"))?;

    let config = EnvironmentConfig::load()?;
    config.ensure_directories().await?;

    info!("Starting JobAlert API server");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Database: {}", config.database_path.display());
    info!("Identity provider: {}", config.identity_base_url);
    info!("Server: http://0.0.0.0:{}", port);

    start_web_server(config, port).await
}
