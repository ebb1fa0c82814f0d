//! Runtime settings.
//!
//! [`Settings`] is loaded once at startup and used to wire the services.
//! The core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. Environment variables (`SERIGEN__GENERATOR__MAX_COMMIT_ATTEMPTS=8`)
//! 2. Settings file (TOML)
//! 3. Built-in defaults (always present)
//!
//! ```toml
//! [generator]
//! allowed_types = ["ProjectCode", "Invoice"]
//! max_commit_attempts = 8
//!
//! [generator.week_numbering.calendar]
//! rule = "first-four-day-week"
//! first_day = "Mon"
//!
//! [logging]
//! level = "info"
//! json = true
//! ```

use std::{path::Path, sync::Arc};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use serigen_core::{
    application::{DEFAULT_COMMIT_ATTEMPTS, NumberingService, SeriesGenerator, ports::SeriesStore},
    domain::{FormatRenderer, WeekNumbering},
};

use crate::validator::{PROJECT_CODE, StandardRequestValidator};

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "SERIGEN";

const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Runtime settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub generator: GeneratorSettings,
    pub logging: LoggingSettings,
}

/// How numbers are generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Convention for `{WW}`.
    pub week_numbering: WeekNumbering,
    /// Series types requests may name.
    pub allowed_types: Vec<String>,
    /// Optimistic commit rounds before a conflict is reported.
    pub max_commit_attempts: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            week_numbering: WeekNumbering::default(),
            allowed_types: vec![PROJECT_CODE.to_string()],
            max_commit_attempts: DEFAULT_COMMIT_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from defaults, an optional TOML file and the process
    /// environment.
    ///
    /// A file that is named but missing is an error.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_from(config_file, Self::environment())
    }

    /// Like [`Settings::load`] with an explicit environment source.
    pub fn load_from(config_file: Option<&Path>, env: Environment) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }

        let settings: Self = builder
            .add_source(env)
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        settings.validate()?;
        Ok(settings)
    }

    /// The `SERIGEN__SECTION__KEY` environment source.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("generator.allowed_types")
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.generator.max_commit_attempts >= 1,
            "generator.max_commit_attempts must be at least 1"
        );
        anyhow::ensure!(
            !self.generator.allowed_types.is_empty(),
            "generator.allowed_types must name at least one series type"
        );
        anyhow::ensure!(
            LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()),
            "logging.level must be one of {}, got '{}'",
            LEVELS.join(", "),
            self.logging.level
        );
        Ok(())
    }

    pub fn renderer(&self) -> FormatRenderer {
        FormatRenderer::new(self.generator.week_numbering)
    }

    pub fn request_validator(&self) -> StandardRequestValidator {
        StandardRequestValidator::new(self.generator.allowed_types.iter().cloned())
    }

    /// Generator with the configured week rule and request validation.
    pub fn generator(&self) -> SeriesGenerator {
        SeriesGenerator::new(self.renderer()).with_validator(Arc::new(self.request_validator()))
    }

    /// Numbering service over `store`, wired from these settings.
    pub fn numbering_service(&self, store: Arc<dyn SeriesStore>) -> NumberingService {
        NumberingService::new(store, self.generator())
            .with_max_commit_attempts(self.generator.max_commit_attempts)
    }
}
