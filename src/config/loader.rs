//! Loading the configuration file and layering command-line overrides
//!
//! The file is read once; the same bytes are parsed and hashed, so the
//! logged hash always describes the configuration that was used.

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// A configuration file after parsing and validation
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,

    /// Hex-encoded SHA-256 of the file content
    pub hash: String,
}

/// Values given on the command line that replace file settings
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub fetchers: Option<usize>,
    pub summary_path: Option<String>,
}

impl Config {
    /// Applies overrides on top of this configuration and validates the result
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> ConfigResult<Self> {
        if let Some(fetchers) = overrides.fetchers {
            self.crawler.fetchers = fetchers;
        }
        if let Some(path) = &overrides.summary_path {
            self.output.summary_path = Some(path.clone());
        }

        validate(&self)?;
        Ok(self)
    }
}

/// Parses and validates TOML configuration text
pub fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// SHA-256 of configuration text, hex-encoded
pub fn hash_config(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Reads a configuration file, then parses, validates and hashes it
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use webcrawler::config::load_config;
///
/// let loaded = load_config(Path::new("crawler.toml")).unwrap();
/// println!("{} fetchers (config {})", loaded.config.crawler.fetchers, loaded.hash);
/// ```
pub fn load_config(path: &Path) -> ConfigResult<LoadedConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = parse_config(&content)?;

    Ok(LoadedConfig {
        config,
        hash: hash_config(&content),
    })
}
