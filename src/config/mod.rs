//! Configuration module for the crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key is optional, so a crawl can also run from `Config::default()`.
//!
//! # Example
//!
//! ```no_run
//! use webcrawler::config::load_config;
//! use std::path::Path;
//!
//! let loaded = load_config(Path::new("crawler.toml")).unwrap();
//! println!("Crawler will use {} fetchers", loaded.config.crawler.fetchers);
//! ```

mod loader;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};

// Re-export loading functions
pub use loader::{hash_config, load_config, parse_config, ConfigOverrides, LoadedConfig};
pub use validation::validate;
