//! API configuration

use serde::Deserialize;
use std::fmt;

use core_kernel::{CoreError, Timezone};
use domain_export::{ReportOptions, ZeroAmountDisplay};
use infra_extraction::GeminiConfig;

/// Environment variable prefix, e.g. `SMARTCLAIM_PORT`
pub const ENV_PREFIX: &str = "SMARTCLAIM";

/// API configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Gemini API key; empty means receipts are entered manually
    pub gemini_api_key: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Gemini REST base URL
    pub gemini_base_url: String,
    /// Gemini request timeout in seconds
    pub gemini_timeout_secs: u64,
    /// Organization name printed on the report
    pub organization_name: String,
    /// IANA timezone that decides "today"
    pub timezone: String,
    /// How zero amounts appear on claim rows
    pub zero_amount_display: ZeroAmountDisplay,
    /// Largest accepted receipt upload
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        let gemini = GeminiConfig::default();
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            gemini_api_key: gemini.api_key,
            gemini_model: gemini.model,
            gemini_base_url: gemini.base_url,
            gemini_timeout_secs: gemini.timeout_secs,
            organization_name: ReportOptions::default().organization_name,
            timezone: Timezone::default().to_string(),
            zero_amount_display: ZeroAmountDisplay::default(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `SMARTCLAIM_*` environment variables over defaults
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Business timezone
    pub fn timezone(&self) -> Result<Timezone, CoreError> {
        Ok(self.timezone.parse::<Timezone>()?)
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini_api_key.clone(),
            model: self.gemini_model.clone(),
            base_url: self.gemini_base_url.clone(),
            timeout_secs: self.gemini_timeout_secs,
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            organization_name: self.organization_name.clone(),
            zero_amount_display: self.zero_amount_display,
            ..ReportOptions::default()
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("gemini", &self.gemini())
            .field("organization_name", &self.organization_name)
            .field("timezone", &self.timezone)
            .field("zero_amount_display", &self.zero_amount_display)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.timezone().unwrap().to_string(), "Asia/Kuala_Lumpur");
        assert_eq!(config.report_options().organization_name, "SER ENTERPRISE SDN. BHD.");
        assert_eq!(config.gemini().model, "gemini-2.5-flash-image");
        assert_eq!(config.max_upload_bytes, 10_485_760);
    }

    #[test]
    fn test_unknown_timezone() {
        let config = ApiConfig {
            timezone: "Atlantis/Capital".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.timezone(), Err(CoreError::Temporal(_))));
    }

    #[test]
    fn test_zero_amount_display_ignores_case() {
        let config: ApiConfig = config::Config::builder()
            .set_override("zero_amount_display", "NUMERIC")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.report_options().zero_amount_display, ZeroAmountDisplay::Numeric);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = ApiConfig {
            gemini_api_key: "very-secret".to_string(),
            ..Default::default()
        };
        assert!(!format!("{config:?}").contains("very-secret"));
    }
}
