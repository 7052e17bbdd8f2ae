//! API configuration

use serde::Deserialize;

use core_kernel::{CacheSettings, CanonicalZone, CoreError};

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// IANA name of the zone every timestamp is displayed in
    ///
    /// Required. There is no default: naive stored timestamps are read as
    /// this zone, and guessing it would silently shift them.
    pub display_timezone: Option<String>,
    /// Log level
    pub log_level: String,
    /// Seconds a cached province/ward lookup stays valid
    pub region_cache_ttl_secs: u64,
    /// Maximum cached province/ward lookups
    pub region_cache_capacity: u64,
    /// JSON file holding the province/ward reference table
    pub regions_file: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            display_timezone: None,
            log_level: "info".to_string(),
            region_cache_ttl_secs: 3600,
            region_cache_capacity: 10_000,
            regions_file: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port)?
            .set_default("log_level", defaults.log_level)?
            .set_default("region_cache_ttl_secs", defaults.region_cache_ttl_secs)?
            .set_default("region_cache_capacity", defaults.region_cache_capacity)?
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Sets the display timezone
    pub fn with_display_timezone(mut self, name: impl Into<String>) -> Self {
        self.display_timezone = Some(name.into());
        self
    }

    /// Resolves the canonical display zone
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if the zone is missing or unknown.
    pub fn canonical_zone(&self) -> Result<CanonicalZone, CoreError> {
        CanonicalZone::from_config(self.display_timezone.as_deref())
    }

    /// Cache bounds for region lookups
    pub fn region_cache(&self) -> CacheSettings {
        CacheSettings {
            ttl_secs: self.region_cache_ttl_secs,
            max_capacity: self.region_cache_capacity,
        }
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_zone_is_configuration_error() {
        let config = ApiConfig::default();
        assert!(matches!(config.canonical_zone(), Err(CoreError::Configuration(_))));
    }

    #[test]
    fn test_configured_zone() {
        let config = ApiConfig::default().with_display_timezone("Asia/Ho_Chi_Minh");
        assert_eq!(config.canonical_zone().unwrap().name(), "Asia/Ho_Chi_Minh");
    }

    #[test]
    fn test_server_addr() {
        assert_eq!(ApiConfig::default().server_addr(), "0.0.0.0:8080");
    }
}
