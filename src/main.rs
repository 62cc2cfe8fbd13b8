// Main entry point
use clap::Parser;
use colored::Colorize;
use std::net::SocketAddr;
use translator_service::infrastructure::config::{self, Config, Logging};
use translator_service::infrastructure::network::http::create_client;
use translator_service::infrastructure::providers::build_registry;
use translator_service::interfaces::cli::Cli;
use translator_service::interfaces::http::{build_router, serve};
use translator_service::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.generate_config {
        let path = config::generate_config_sample(cli.config.as_deref())?;
        println!("Generated config file at: {}", path.display());
        return Ok(());
    }

    let mut config = config::load_config(cli.config.as_deref())?;
    config.apply_env();
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging, config.log_level())?;
    }

    let client = create_client()?;
    let registry = build_registry(&config, &client);

    if cli.list_models {
        println!("{}", "Supported models".green().bold());
        for id in registry.list_ids() {
            println!("  {}", id.cyan());
        }
        return Ok(());
    }

    tracing::info!(
        models = ?registry.list_ids(),
        timeout_secs = config.llm.timeout,
        "translation service starting"
    );

    let addr = listen_addr(&config)?;
    let state = AppState::new(registry, config.request_timeout());
    let router = build_router(state, &config.server.static_dir);

    serve(addr, router).await?;

    Ok(())
}

fn listen_addr(config: &Config) -> anyhow::Result<SocketAddr> {
    let raw = format!("{}:{}", config.server.host, config.server.port);
    raw.parse()
        .map_err(|e| anyhow::anyhow!("Invalid listen address {}: {}", raw, e))
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging, level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match level {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "info",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
