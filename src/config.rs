use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use log::debug;
use serde::Deserialize;

use crate::pdf::{DEFAULT_CONVERTER, DEFAULT_PDF_TITLE};
use crate::structure::{DEFAULT_MODEL, Provider};
use crate::text::DEFAULT_MAX_WORDS;

/// Optional settings read from `~/.config/yt2notes/config.toml`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_words: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub pdf_title: Option<String>,
    pub lang: Option<String>,
    pub converter: Option<String>,
}

impl Config {
    /// Load config from the default location if it exists
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("yt2notes")
        .join("config.toml")
}

/// Per-run values given on the command line; these win over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub max_words: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub pdf_title: Option<String>,
    pub lang: Option<String>,
    pub attempts: Option<u32>,
    pub no_pdf: bool,
}

/// Fully resolved, validated settings for one pipeline run
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub model: String,
    pub max_words: usize,
    pub output_dir: PathBuf,
    pub pdf_title: String,
    pub lang: String,
    pub converter: String,
    pub attempts: u32,
    pub pdf: bool,
}

impl Settings {
    /// Merge CLI overrides, config file and environment, then validate
    pub fn resolve(config: Config, overrides: Overrides) -> Result<Self> {
        Self::resolve_with_env(config, overrides, |name| std::env::var(name).ok())
    }

    pub fn resolve_with_env<F>(config: Config, overrides: Overrides, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let model = overrides
            .model
            .or(config.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let provider = Provider::for_model(&model);
        let api_key = overrides
            .api_key
            .or(config.api_key)
            .or_else(|| env(provider.api_key_env()))
            .unwrap_or_default();

        let settings = Settings {
            api_key,
            model,
            max_words: overrides.max_words.or(config.max_words).unwrap_or(DEFAULT_MAX_WORDS),
            output_dir: overrides
                .output_dir
                .or(config.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            pdf_title: overrides
                .pdf_title
                .or(config.pdf_title)
                .unwrap_or_else(|| DEFAULT_PDF_TITLE.to_string()),
            lang: overrides.lang.or(config.lang).unwrap_or_else(|| "en".to_string()),
            converter: config.converter.unwrap_or_else(|| DEFAULT_CONVERTER.to_string()),
            attempts: overrides.attempts.unwrap_or(1),
            pdf: !overrides.no_pdf,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn provider(&self) -> Provider {
        Provider::for_model(&self.model)
    }

    fn validate(&self) -> Result<()> {
        if self.max_words == 0 {
            bail!("max_words must be a positive integer");
        }
        if self.attempts == 0 {
            bail!("attempts must be at least 1");
        }
        if self.api_key.trim().is_empty() {
            let provider = self.provider();
            bail!(
                "no API key for {provider} (model {}): set api_key in {}, pass --api-key, or export {}",
                self.model,
                config_path().display(),
                provider.api_key_env()
            );
        }
        Ok(())
    }
}
