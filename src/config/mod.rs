use config::{Config, File};
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::cli::Cli;

pub const DEFAULT_ARRAY_SIZE: usize = 3;
pub const DEFAULT_OPTIONAL_OMIT_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub projects: ProjectSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Knobs for mock data generation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Upper bound for generated array lengths (lower bound is always 1)
    #[serde(default = "default_array_size")]
    pub max_array_size: usize,
    /// Chance that an optional field is left out of a generated object
    #[serde(default = "default_omit_probability")]
    pub optional_omit_probability: f64,
}

impl GeneratorConfig {
    /// Omit probability clamped into `[0, 1]`, falling back to the default for NaN.
    pub fn omit_probability(&self) -> f64 {
        if self.optional_omit_probability.is_nan() {
            DEFAULT_OPTIONAL_OMIT_PROBABILITY
        } else {
            self.optional_omit_probability.clamp(0.0, 1.0)
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_array_size: DEFAULT_ARRAY_SIZE,
            optional_omit_probability: DEFAULT_OPTIONAL_OMIT_PROBABILITY,
        }
    }
}

fn default_array_size() -> usize {
    DEFAULT_ARRAY_SIZE
}

fn default_omit_probability() -> f64 {
    DEFAULT_OPTIONAL_OMIT_PROBABILITY
}

/// In-memory project registry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectSettings {
    #[serde(default = "default_expiration_hours")]
    pub default_expiration_hours: u64,
    /// Maximum number of live projects held at once
    #[serde(default = "default_max_projects")]
    pub max_projects: usize,
    /// How often expired projects are purged
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,
    /// Prefix for the absolute mock URL handed back to clients
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            default_expiration_hours: default_expiration_hours(),
            max_projects: default_max_projects(),
            cleanup_interval_seconds: default_cleanup_interval(),
            base_url: default_base_url(),
        }
    }
}

fn default_expiration_hours() -> u64 {
    24
}

fn default_max_projects() -> usize {
    50
}

fn default_cleanup_interval() -> u64 {
    60
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

impl Settings {
    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Self::builder(File::from(cli.config.clone()).required(false))?.build()?;
        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);
        settings.validate()?;

        Ok(settings)
    }

    /// Load `dupi.{toml,yaml,json}` from `root`, if present.
    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("dupi");
        let s = Self::builder(File::from(config_path).required(false))?.build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;

        Ok(settings)
    }

    fn builder<S>(source: S) -> Result<config::ConfigBuilder<config::builder::DefaultState>, anyhow::Error>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Ok(Config::builder()
            .add_source(source)
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(base_url) = &cli.base_url {
            self.projects.base_url = base_url.clone();
        }
        if let Some(max_array_size) = cli.max_array_size {
            self.generator.max_array_size = max_array_size;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            generator: GeneratorConfig::default(),
            projects: ProjectSettings::default(),
        }
    }
}
