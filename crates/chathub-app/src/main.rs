use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::net::SocketAddr;

use chathub::cli::Cli;
use chathub::config::{normalize_api_url, ClientConfig, OPENROUTER_API_KEY_VAR};
use chathub::web::{WebServer, WebServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().with_verbose(cli.verbose);
    if let Some(ref api_url) = cli.api_url {
        config = config.with_api_url(normalize_api_url(api_url));
    }

    println!(
        "{} {}",
        "🤖".blue(),
        "ChatHub - one chat UI for many hosted models".bold()
    );

    if config.api_key.is_none() {
        eprintln!(
            "{} {} is not set; completions will fail with a configuration error until it is provided",
            "⚠️".yellow(),
            OPENROUTER_API_KEY_VAR
        );
    }

    let bind_addr: SocketAddr = cli
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", cli.bind))?;

    let server = WebServer::new(WebServerConfig {
        bind_addr,
        client_config: config,
        web_dir: cli.web_dir,
    });

    server.start().await
}
