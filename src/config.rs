use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{PortfolioError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Public base URL used for absolute links (sitemap, email footers).
    /// Can be overridden with the `SITE_BASE_URL` env var.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory holding blog posts as markdown files with frontmatter.
    /// A missing directory is not an error; the blog just lists no posts.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    #[serde(default)]
    pub owner: OwnerConfig,

    #[serde(default)]
    pub contact: ContactConfig,
}

// -- Owner ---------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OwnerConfig {
    #[serde(default = "default_owner_name")]
    pub name: String,

    #[serde(default = "default_owner_title")]
    pub title: String,

    #[serde(default = "default_github_url")]
    pub github_url: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            name: default_owner_name(),
            title: default_owner_title(),
            github_url: default_github_url(),
        }
    }
}

// -- Contact -------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ContactConfig {
    /// Where contact-form notifications are delivered.
    #[serde(default = "default_contact_to")]
    pub to_email: String,

    /// Sender used for outbound mail. Resend requires a verified domain
    /// (or its onboarding sender) here.
    #[serde(default = "default_contact_from")]
    pub from_address: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            to_email: default_contact_to(),
            from_address: default_contact_from(),
        }
    }
}

// -- Defaults ------------------------------------------------------------

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}
fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_content_dir() -> PathBuf {
    PathBuf::from("content/blog")
}
fn default_owner_name() -> String {
    "Prabhakar Elavala".to_string()
}
fn default_owner_title() -> String {
    "AI/ML Engineer & MS Informatics Student".to_string()
}
fn default_github_url() -> String {
    "https://github.com/prabhakar1234pr".to_string()
}
fn default_contact_to() -> String {
    "prabhakarpr554@gmail.com".to_string()
}
fn default_contact_from() -> String {
    "Portfolio Contact <onboarding@resend.dev>".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            base_url: default_base_url(),
            content_dir: default_content_dir(),
            owner: OwnerConfig::default(),
            contact: ContactConfig::default(),
        }
    }
}

// -- Config impl ---------------------------------------------------------

impl Config {
    /// Load config from the given path, or the default XDG config location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path(),
        };

        let mut config: Config = if config_path.exists() {
            info!("loading config from {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path).map_err(PortfolioError::Io)?;
            toml::from_str(&contents)
                .map_err(|e| PortfolioError::Config(format!("parse error: {e}")))?
        } else {
            info!("no config file found, using defaults");
            Config::default()
        };

        if let Ok(base_url) = std::env::var("SITE_BASE_URL") {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        if let Ok(bind) = std::env::var("SITE_BIND") {
            if !bind.is_empty() {
                config.bind = bind;
            }
        }

        Ok(config)
    }

    /// Returns the default config file path:
    /// `$XDG_CONFIG_HOME/portfolio-server/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("portfolio-server")
            .join("config.toml")
    }

    /// Resend API key from the environment. `None` disables the email relay
    /// and the contact endpoint answers in mock mode.
    pub fn resend_api_key() -> Option<String> {
        std::env::var("RESEND_API_KEY").ok().filter(|s| !s.is_empty())
    }

    /// Generate the default config file contents.
    pub fn default_config_contents() -> &'static str {
        include_str!("../config.example.toml")
    }
}
