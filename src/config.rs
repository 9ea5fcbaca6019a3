//! Configuration management for the metadata refiner

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

/// Location and caching of the DSC reference table
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReferenceTableConfig {
    pub path: String,
    pub delimiter: char,
    /// Load once per process instead of once per CBS request
    pub cache: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CbsConfig {
    /// DOI prefix registered for CBS datasets
    pub doi_prefix: String,
    /// Field of the `CBSMetadata` block holding the dataset identifier
    pub identifier_field: String,
}

/// Contact addresses injected into `datasetContact`
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ContactConfig {
    pub dataverse_nl: String,
    pub sicada: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefinementConfig {
    pub dab_base_url: String,
    pub reference_table: ReferenceTableConfig,
    pub cbs: CbsConfig,
    pub contacts: ContactConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub refinement: RefinementConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix REFINER_, sections split on __)
            .add_source(
                Environment::with_prefix("REFINER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override the reference table location from DSC_TABLE_PATH if present
            .set_override_option(
                "refinement.reference_table.path",
                env::var("DSC_TABLE_PATH").ok(),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ReferenceTableConfig {
    fn default() -> Self {
        Self {
            path: "data/dsc_table.csv".to_string(),
            delimiter: ',',
            cache: true,
        }
    }
}

impl ReferenceTableConfig {
    /// Delimiter as the single byte the CSV reader expects, `,` for anything
    /// outside ASCII
    pub fn delimiter_byte(&self) -> u8 {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .unwrap_or(b',')
    }
}

impl Default for CbsConfig {
    fn default() -> Self {
        Self {
            doi_prefix: "10.57934".to_string(),
            identifier_field: "cbsIdentifier".to_string(),
        }
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            dataverse_nl: "portal@odissei.nl".to_string(),
            sicada: "info@sicada.nl".to_string(),
        }
    }
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            dab_base_url: "https://dab.surf.nl/dataset?pid=".to_string(),
            reference_table: ReferenceTableConfig::default(),
            cbs: CbsConfig::default(),
            contacts: ContactConfig::default(),
        }
    }
}
