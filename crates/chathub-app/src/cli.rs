use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for chathub
#[derive(Parser)]
#[command(name = "chathub")]
#[command(about = "ChatHub - one browser chat UI for many hosted models, one key")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Address to bind the web server to
    #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:3000")]
    pub bind: String,

    /// Override the chat-completions endpoint URL (e.g. a local proxy)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Directory of extra static assets to serve under /static
    #[arg(long, value_name = "PATH")]
    pub web_dir: Option<PathBuf>,

    /// Enable verbose debug output (shows HTTP requests, responses, headers, etc.)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
