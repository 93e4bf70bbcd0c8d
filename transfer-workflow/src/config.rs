//! Configuration for the transfer workflow

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Workflow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowConfig {
    /// Channel tag stamped on every submission
    pub channel: String,

    /// Fee estimation configuration
    pub fee: FeeConfig,

    /// Destination lookup configuration
    pub lookup: LookupConfig,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            channel: "mobile".to_string(),
            fee: FeeConfig::default(),
            lookup: LookupConfig::default(),
        }
    }
}

/// Fee estimation configuration
///
/// The backend remains authoritative for the fee actually charged; these
/// values only drive balance pre-checks and the confirmation summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfig {
    /// Flat fee applied to third-party transfers
    pub third_party_flat_fee: Decimal,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            third_party_flat_fee: Decimal::from(50),
        }
    }
}

/// Destination lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Quiet interval before a lookup fires (milliseconds)
    pub debounce_ms: u64,

    /// Minimum destination number length before any lookup is scheduled
    pub min_number_len: usize,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            min_number_len: 10,
        }
    }
}

impl WorkflowConfig {
    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: WorkflowConfig = toml::from_str(&content)
            .map_err(|e| crate::Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> crate::Result<Self> {
        let mut config = WorkflowConfig::default();

        if let Ok(channel) = std::env::var("MOBANK_CHANNEL") {
            config.channel = channel;
        }

        if let Ok(fee) = std::env::var("MOBANK_THIRD_PARTY_FEE") {
            config.fee.third_party_flat_fee = fee
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid MOBANK_THIRD_PARTY_FEE: {}", e)))?;
        }

        if let Ok(debounce) = std::env::var("MOBANK_LOOKUP_DEBOUNCE_MS") {
            config.lookup.debounce_ms = debounce
                .parse()
                .map_err(|e| crate::Error::Config(format!("Invalid MOBANK_LOOKUP_DEBOUNCE_MS: {}", e)))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WorkflowConfig::default();
        assert_eq!(config.channel, "mobile");
        assert_eq!(config.fee.third_party_flat_fee, Decimal::from(50));
        assert_eq!(config.lookup.debounce_ms, 500);
        assert_eq!(config.lookup.min_number_len, 10);
    }

    #[test]
    fn test_parse_toml() {
        let config: WorkflowConfig = toml::from_str(
            r#"
            channel = "web"

            [fee]
            third_party_flat_fee = "75"

            [lookup]
            debounce_ms = 250
            min_number_len = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.channel, "web");
        assert_eq!(config.fee.third_party_flat_fee, Decimal::from(75));
        assert_eq!(config.lookup.min_number_len, 12);
    }
}
