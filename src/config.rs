use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::CostError;
use crate::limits::InputLimits;
use crate::pricing::{load_catalog_file, CatalogEntry, PriceCatalog, UsageProfile, UserRange};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub defaults: UsageDefaults,
    #[serde(default)]
    pub limits: InputLimits,
    #[serde(default)]
    pub sweep: UserRange,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Values used when a usage field is not given on the command line or in a request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UsageDefaults {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_num_users")]
    pub num_users: u32,
    #[serde(default = "default_requests_per_month")]
    pub requests_per_month: f64,
    #[serde(default = "default_avg_tokens_input")]
    pub avg_tokens_input: f64,
    #[serde(default = "default_avg_tokens_output")]
    pub avg_tokens_output: f64,
}

impl Default for UsageDefaults {
    fn default() -> Self {
        Self {
            model: default_model(),
            num_users: default_num_users(),
            requests_per_month: default_requests_per_month(),
            avg_tokens_input: default_avg_tokens_input(),
            avg_tokens_output: default_avg_tokens_output(),
        }
    }
}

impl UsageDefaults {
    pub fn profile(&self) -> UsageProfile {
        UsageProfile {
            num_users: self.num_users,
            requests_per_month: self.requests_per_month,
            avg_tokens_input: self.avg_tokens_input,
            avg_tokens_output: self.avg_tokens_output,
        }
    }
}

/// Per-call usage values; missing fields fall back to [`UsageDefaults`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct UsageOverrides {
    #[serde(default)]
    pub num_users: Option<u32>,
    #[serde(default)]
    pub requests_per_month: Option<f64>,
    #[serde(default)]
    pub avg_tokens_input: Option<f64>,
    #[serde(default)]
    pub avg_tokens_output: Option<f64>,
}

impl Config {
    /// Resolve overrides against the defaults, then clamp into limits
    pub fn usage(&self, overrides: &UsageOverrides) -> UsageProfile {
        let defaults = &self.defaults;
        let usage = UsageProfile {
            num_users: overrides.num_users.unwrap_or(defaults.num_users),
            requests_per_month: overrides
                .requests_per_month
                .unwrap_or(defaults.requests_per_month),
            avg_tokens_input: overrides
                .avg_tokens_input
                .unwrap_or(defaults.avg_tokens_input),
            avg_tokens_output: overrides
                .avg_tokens_output
                .unwrap_or(defaults.avg_tokens_output),
        };
        self.limits.apply(usage)
    }

    /// Resolve a requested sweep range (or the configured one) against the limits
    pub fn sweep_range(&self, requested: Option<UserRange>) -> Result<UserRange, CostError> {
        self.limits.sweep_range(&requested.unwrap_or(self.sweep))
    }
}

fn default_model() -> String {
    "Mistral AI".to_string()
}

fn default_num_users() -> u32 {
    2000
}

fn default_requests_per_month() -> f64 {
    150.0
}

fn default_avg_tokens_input() -> f64 {
    500.0
}

fn default_avg_tokens_output() -> f64 {
    200.0
}

/// Price catalog sources
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Start from the builtin reference prices (default: true)
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,

    /// Optional `.toml` / `.json` catalog file
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Inline entries, applied after the file
    #[serde(default)]
    pub models: Vec<CatalogEntry>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            include_builtin: default_include_builtin(),
            path: None,
            models: Vec::new(),
        }
    }
}

fn default_include_builtin() -> bool {
    true
}

impl CatalogConfig {
    /// Assemble the price catalog: builtin, then file entries, then inline entries
    pub fn build(&self) -> anyhow::Result<PriceCatalog> {
        let base = if self.include_builtin {
            PriceCatalog::builtin()
        } else {
            PriceCatalog::from_entries(Vec::new())?
        };

        let mut overrides = Vec::new();
        if let Some(path) = &self.path {
            overrides.extend(load_catalog_file(path)?);
        }
        overrides.extend(self.models.iter().cloned().map(CatalogEntry::into_model_price));

        let catalog = PriceCatalog::merged(&base, overrides)?;
        if catalog.is_empty() {
            anyhow::bail!("Price catalog is empty: enable include_builtin or list models");
        }
        Ok(catalog)
    }
}

/// Load configuration from an optional TOML file plus `LLM_COST__*` environment overrides
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("LLM_COST").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;
    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if !matches!(cfg.server.log_format.as_str(), "text" | "json") {
        anyhow::bail!(
            "Unsupported log format '{}', expected 'text' or 'json'",
            cfg.server.log_format
        );
    }

    let limits = &cfg.limits;
    if !limits.num_users.is_valid()
        || !limits.requests_per_month.is_valid()
        || !limits.avg_tokens_input.is_valid()
        || !limits.avg_tokens_output.is_valid()
    {
        anyhow::bail!("Every limit must have min <= max");
    }
    if limits.num_users.min == 0 {
        anyhow::bail!("limits.num_users.min must be at least 1");
    }

    if !limits.admits(&cfg.defaults.profile()) {
        anyhow::bail!("Default usage values fall outside the configured limits");
    }

    if limits.max_sweep_points == 0 || limits.max_sweep_points > UserRange::MAX_POINTS {
        anyhow::bail!(
            "limits.max_sweep_points must be between 1 and {}",
            UserRange::MAX_POINTS
        );
    }
    cfg.sweep_range(None)?;

    if cfg.defaults.model.is_empty() {
        anyhow::bail!("Default model name cannot be empty");
    }

    Ok(())
}
