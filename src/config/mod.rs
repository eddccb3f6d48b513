//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, ChainSection, ScannerSection, SourcesSection, OutputSection,
    LoggingSection, load_config, parse_config,
};
