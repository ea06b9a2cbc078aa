//! Configuration for coursebook
//!
//! Loaded from `~/.coursebook/config.toml` when present, then overridden by
//! environment variables (a `.env` file in the working directory or in
//! `~/.coursebook/` is honoured):
//!
//!   DATABASE_URL                  # PostgreSQL connection string
//!   COURSEBOOK_MAX_CONNECTIONS    # Pool size
//!   COURSEBOOK_SEED               # "true"/"1" to load demonstration data

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/coursebook";

/// Kept low: one process serves one request at a time per connection.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursebookConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Load the demonstration courses and students on startup
    #[serde(default)]
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_max_connections() -> u32 {
    DEFAULT_MAX_CONNECTIONS
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl Default for CoursebookConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            seed_demo_data: false,
        }
    }
}

impl CoursebookConfig {
    /// Load config from the default location plus environment overrides.
    ///
    /// A missing config file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        // Local .env first, then ~/.coursebook/.env; neither is required
        let _ = dotenvy::dotenv();
        if let Some(dir) = Self::config_dir() {
            let _ = dotenvy::from_path(dir.join(".env"));
        }

        let path = Self::config_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a config file without applying environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).context("Failed to parse config file (invalid TOML)")
    }

    /// `~/.coursebook`
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".coursebook"))
    }

    /// `~/.coursebook/config.toml`
    pub fn config_path() -> PathBuf {
        Self::config_dir()
            .unwrap_or_else(|| PathBuf::from(".coursebook"))
            .join("config.toml")
    }

    /// Apply environment-style overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = url;
        }

        if let Some(raw) = lookup("COURSEBOOK_MAX_CONNECTIONS") {
            self.database.max_connections = raw
                .trim()
                .parse()
                .with_context(|| format!("COURSEBOOK_MAX_CONNECTIONS is not a number: {raw}"))?;
        }

        if let Some(raw) = lookup("COURSEBOOK_SEED") {
            self.seed_demo_data = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        Ok(())
    }
}
