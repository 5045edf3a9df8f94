mod assistant;
mod config;
mod content;
mod email;
mod error;
mod server;

use std::path::PathBuf;

use tokio::sync::broadcast;
use tracing::{error, info};

use crate::config::Config;

#[tokio::main]
async fn main() {
    // Load .env file (if present) before anything reads env vars
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    if args.iter().any(|a| a == "--default-config") {
        print!("{}", Config::default_config_contents());
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from);

    let config = match Config::load(config_path.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            error!("failed to load config: {e}");
            return;
        }
    };

    if args.iter().any(|a| a == "--check") {
        run_checks(&config);
        return;
    }

    info!(
        bind = %config.bind,
        base_url = %config.base_url,
        content_dir = %config.content_dir.display(),
        "portfolio server starting"
    );

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let server_handle = {
        let shutdown_rx = shutdown_tx.subscribe();
        tokio::spawn(async move {
            if let Err(e) = server::serve(config, shutdown_rx).await {
                error!("server error: {e}");
                std::process::exit(1);
            }
        })
    };

    info!("portfolio server is running — press Ctrl+C to stop");

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl+c");

    info!("shutdown signal received, stopping...");
    let _ = shutdown_tx.send(());

    let _ = server_handle.await;
    info!("portfolio server stopped");
}

fn env_set(key: &str) -> bool {
    std::env::var(key).map(|v| !v.is_empty()).unwrap_or(false)
}

fn run_checks(config: &Config) {
    info!("running pre-flight checks...");

    info!("config: OK");
    info!("  bind: {}", config.bind);
    info!("  base_url: {}", config.base_url);
    info!("  owner: {}", config.owner.name);

    if config.content_dir.is_dir() {
        let posts = content::blog::list_posts(&config.content_dir);
        info!(
            "blog content: OK ({}, {} posts)",
            config.content_dir.display(),
            posts.len()
        );
    } else {
        info!(
            "blog content: directory {} not found (blog will list no posts)",
            config.content_dir.display()
        );
    }

    if env_set("OPENAI_API_KEY") {
        info!("OPENAI_API_KEY: set (OpenAI provider enabled)");
    } else {
        info!("OPENAI_API_KEY: not set (OpenAI provider disabled)");
    }

    let azure_vars = [
        "AZURE_OPENAI_ENDPOINT",
        "AZURE_OPENAI_API_KEY",
        "AZURE_OPENAI_API_VERSION",
        "AZURE_OPENAI_DEPLOYMENT",
    ];
    let azure_set = azure_vars.iter().filter(|v| env_set(v)).count();
    match azure_set {
        0 => info!("Azure OpenAI: not configured (provider disabled)"),
        4 => info!("Azure OpenAI: all four variables set (provider enabled)"),
        n => {
            for var in azure_vars {
                if !env_set(var) {
                    error!("{var}: NOT SET");
                }
            }
            error!("Azure OpenAI: only {n}/4 variables set — provider will be skipped");
        }
    }

    if env_set("OPENAI_API_KEY") || azure_set == 4 {
        info!("assistant: live provider available");
    } else {
        info!("assistant: no provider configured, replies will use the local fallback");
    }

    if env_set("RESEND_API_KEY") {
        info!("RESEND_API_KEY: set (contact relay enabled)");
    } else {
        info!("RESEND_API_KEY: not set (contact endpoint in mock mode)");
    }
}

fn print_usage() {
    println!(
        "portfolio-server — personal portfolio site with an LLM-backed assistant

USAGE:
    portfolio-server [OPTIONS]

OPTIONS:
    --config <PATH>     Path to config file (default: ~/.config/portfolio-server/config.toml)
    --default-config    Print default config to stdout and exit
    --check             Validate config and provider credentials, then exit
    -h, --help          Print this help message

ASSISTANT PROVIDERS:
    OPENAI_API_KEY              Enables the OpenAI provider (tried first)
    OPENAI_MODEL                Model override (default: gpt-4o-mini)
    OPENAI_BASE_URL             Endpoint override, mainly for testing
    AZURE_OPENAI_ENDPOINT       Azure resource endpoint
    AZURE_OPENAI_API_KEY        Azure API key
    AZURE_OPENAI_API_VERSION    Azure API version string
    AZURE_OPENAI_DEPLOYMENT     Azure deployment name
                                (all four required to enable the Azure provider)
    AZURE_OPENAI_USE_RESPONSES  \"true\" forces the responses-style request shape

    With no provider configured the assistant answers from local templates.

ENVIRONMENT:
    RESEND_API_KEY        Enables the contact-form email relay (optional).
    SITE_BASE_URL         Override the configured public base URL.
    SITE_BIND             Override the configured bind address.
    RUST_LOG              Optional. Tracing filter (default: info).
"
    );
}
