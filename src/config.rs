//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::report::cards::DEFAULT_CARD_COLUMNS;
use crate::report::theme::Theme;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub roster: RosterConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the class spreadsheet lives
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_roster_path")]
    pub path: PathBuf,
}

fn default_roster_path() -> PathBuf {
    PathBuf::from("Student Dash-2.xlsx")
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            path: default_roster_path(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Page titles and card layout
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_page_title")]
    pub page_title: String,

    #[serde(default = "default_sidebar_title")]
    pub sidebar_title: String,

    #[serde(default = "default_card_columns")]
    pub card_columns: usize,
}

fn default_page_title() -> String {
    "Class Dashboard".to_string()
}

fn default_sidebar_title() -> String {
    "Class Details".to_string()
}

fn default_card_columns() -> usize {
    DEFAULT_CARD_COLUMNS
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_title: default_page_title(),
            sidebar_title: default_sidebar_title(),
            card_columns: default_card_columns(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive for `tracing_subscriber::EnvFilter`
    ///
    /// A bare level applies to this crate and the HTTP trace layer; anything
    /// containing `=` or `,` is passed through untouched.
    pub fn filter_directive(&self) -> String {
        if self.level.contains('=') || self.level.contains(',') {
            self.level.clone()
        } else {
            format!("classboard={level},tower_http={level}", level = self.level)
        }
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("classboard").join("config.toml")),
            Some(PathBuf::from("/etc/classboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(path) = var("CLASSBOARD_ROSTER_PATH") {
            self.roster.path = PathBuf::from(path);
        }

        if let Some(host) = var("CLASSBOARD_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("CLASSBOARD_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid CLASSBOARD_PORT: {}", port),
            }
        }

        if let Some(level) = var("CLASSBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("CLASSBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Classboard Configuration
#
# Environment variables override these settings:
# - CLASSBOARD_ROSTER_PATH
# - CLASSBOARD_HOST
# - CLASSBOARD_PORT
# - CLASSBOARD_LOG_LEVEL
# - CLASSBOARD_LOG_FORMAT

[roster]
# Spreadsheet to read on every page load (.xlsx, .xls, .ods or .csv)
path = "Student Dash-2.xlsx"

[server]
# Dashboard server host
host = "127.0.0.1"

# Dashboard server port
port = 8501

[dashboard]
page_title = "Class Dashboard"
sidebar_title = "Class Details"

# Student cards per row
card_columns = 4

[theme]
font_family = "Arial, sans-serif"
page_background = "#f9f9f9"
heading_color = "#000000"
card_background = "#000000"
card_text = "#ffffff"
card_padding_px = 15
card_radius_px = 10
card_margin_px = 15
card_shadow = "5px 5px 10px rgba(0, 0, 0, 0.3)"
card_image_width_px = 120

[theme.chart]
width = 800
height = 450
title_font_size = 22
tick_font_size = 12
plot_background = "#ffffff"
paper_background = "#f9f9f9"
margin = { left = 40, right = 40, top = 40, bottom = 40 }

[logging]
# Log level: trace, debug, info, warn, error (or a full filter directive)
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
