//! Client-side fee estimation

use rust_decimal::Decimal;

use crate::config::FeeConfig;
use crate::types::TransferClass;

/// Fee policy
///
/// Own-account transfers are free; third-party transfers carry a flat fee.
/// The figure mirrors the backend's tariff and is an estimate only, used
/// for balance pre-checks and display.
#[derive(Debug, Clone)]
pub struct FeePolicy {
    config: FeeConfig,
}

impl FeePolicy {
    /// Create a policy from configuration
    pub fn new(config: FeeConfig) -> Self {
        Self { config }
    }

    /// Compute the estimated fee for a transfer
    pub fn compute(&self, class: TransferClass, _amount: Decimal) -> Decimal {
        match class {
            TransferClass::Own => Decimal::ZERO,
            TransferClass::Other => self.config.third_party_flat_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_transfers_are_free() {
        let policy = FeePolicy::new(FeeConfig::default());
        assert_eq!(
            policy.compute(TransferClass::Own, Decimal::from(1_000_000)),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_third_party_flat_fee() {
        let policy = FeePolicy::new(FeeConfig::default());
        assert_eq!(
            policy.compute(TransferClass::Other, Decimal::from(10)),
            Decimal::from(50)
        );
        assert_eq!(
            policy.compute(TransferClass::Other, Decimal::from(1_000_000)),
            Decimal::from(50)
        );
    }
}
