//! Wire DTOs for the banking backend contracts

use banking_types::{AccountId, AccountType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable code for a daily-limit rejection
pub const DAILY_LIMIT_EXCEEDED: &str = "DAILY_LIMIT_EXCEEDED";

/// Result of `GET /accounts/lookup/{number}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAccount {
    /// Registered account title
    pub account_title: String,

    /// Product type, when disclosed
    #[serde(default)]
    pub account_type: Option<AccountType>,

    /// Holding branch code, when disclosed
    #[serde(default)]
    pub branch_code: Option<String>,
}

/// Third-party destination details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThirdPartyDestination {
    /// Destination account number
    pub account_number: String,

    /// Destination account title as entered or verified
    pub account_title: String,
}

/// Body of `POST /transactions`
///
/// `to_account_id` and `third_party` are mutually exclusive; exactly one is
/// present depending on the transfer class.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransferRequest {
    /// Transaction type tag, always `"transfer"`
    #[serde(rename = "type")]
    pub transaction_type: String,

    /// Debited account
    pub from_account_id: AccountId,

    /// Transfer amount
    pub amount: Decimal,

    /// User-supplied description
    pub description: String,

    /// Originating channel tag
    pub channel: String,

    /// Own-account destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account_id: Option<AccountId>,

    /// Third-party destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_party: Option<ThirdPartyDestination>,
}

impl SubmitTransferRequest {
    /// Build an own-account transfer payload
    pub fn own(
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Decimal,
        description: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            transaction_type: "transfer".to_string(),
            from_account_id,
            amount,
            description: description.into(),
            channel: channel.into(),
            to_account_id: Some(to_account_id),
            third_party: None,
        }
    }

    /// Build a third-party transfer payload
    pub fn third_party(
        from_account_id: AccountId,
        destination: ThirdPartyDestination,
        amount: Decimal,
        description: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            transaction_type: "transfer".to_string(),
            from_account_id,
            amount,
            description: description.into(),
            channel: channel.into(),
            to_account_id: None,
            third_party: Some(destination),
        }
    }
}

/// Error envelope returned by the backend on business rejections
///
/// The daily-limit fields are populated only when `code` is
/// [`DAILY_LIMIT_EXCEEDED`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Machine-readable rejection code
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,

    /// Amount already transferred today
    #[serde(default)]
    pub daily_total: Option<Decimal>,

    /// Daily ceiling for the account
    #[serde(default)]
    pub daily_limit: Option<Decimal>,

    /// Remaining headroom under the ceiling
    #[serde(default)]
    pub remaining_limit: Option<Decimal>,

    /// Amount by which the request exceeds the ceiling
    #[serde(default)]
    pub exceeds_by: Option<Decimal>,

    /// Source account type, when relevant to the rejection
    #[serde(default)]
    pub account_type: Option<AccountType>,
}

impl ErrorEnvelope {
    /// Extract the daily-limit detail when the code matches and every
    /// figure is present
    pub fn daily_limit_exceeded(&self) -> Option<DailyLimitExceeded> {
        if self.code.as_deref() != Some(DAILY_LIMIT_EXCEEDED) {
            return None;
        }
        Some(DailyLimitExceeded {
            daily_total: self.daily_total?,
            daily_limit: self.daily_limit?,
            remaining_limit: self.remaining_limit?,
            exceeds_by: self.exceeds_by?,
            account_type: self.account_type,
        })
    }
}

impl fmt::Display for ErrorEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.message) {
            (Some(code), Some(message)) => write!(f, "{}: {}", code, message),
            (Some(code), None) => write!(f, "{}", code),
            (None, Some(message)) => write!(f, "{}", message),
            (None, None) => write!(f, "unspecified backend error"),
        }
    }
}

/// Fully-populated daily-limit rejection detail
#[derive(Debug, Clone, Copy)]
pub struct DailyLimitExceeded {
    /// Amount already transferred today
    pub daily_total: Decimal,

    /// Daily ceiling for the account
    pub daily_limit: Decimal,

    /// Remaining headroom under the ceiling
    pub remaining_limit: Decimal,

    /// Amount by which the request exceeds the ceiling
    pub exceeds_by: Decimal,

    /// Source account type, when relevant
    pub account_type: Option<AccountType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shapes_are_exclusive() {
        let own = SubmitTransferRequest::own(
            AccountId::new("a1"),
            AccountId::new("a2"),
            Decimal::from(500),
            "rent",
            "mobile",
        );
        let json = serde_json::to_value(&own).unwrap();
        assert_eq!(json["type"], "transfer");
        assert_eq!(json["toAccountId"], "a2");
        assert!(json.get("thirdParty").is_none());

        let other = SubmitTransferRequest::third_party(
            AccountId::new("a1"),
            ThirdPartyDestination {
                account_number: "0101123456789".to_string(),
                account_title: "Ali Raza".to_string(),
            },
            Decimal::from(500),
            "gift",
            "mobile",
        );
        let json = serde_json::to_value(&other).unwrap();
        assert!(json.get("toAccountId").is_none());
        assert_eq!(json["thirdParty"]["accountNumber"], "0101123456789");
    }

    #[test]
    fn test_daily_limit_detail_extraction() {
        let envelope: ErrorEnvelope = serde_json::from_value(serde_json::json!({
            "code": "DAILY_LIMIT_EXCEEDED",
            "message": "Daily limit exceeded",
            "dailyTotal": "480000",
            "dailyLimit": "500000",
            "remainingLimit": "20000",
            "exceedsBy": "30000",
            "accountType": "savings"
        }))
        .unwrap();

        let detail = envelope.daily_limit_exceeded().expect("detail");
        assert_eq!(detail.daily_total, Decimal::from(480_000));
        assert_eq!(detail.exceeds_by, Decimal::from(30_000));
        assert_eq!(detail.account_type, Some(AccountType::Savings));
    }

    #[test]
    fn test_detail_requires_matching_code() {
        let envelope: ErrorEnvelope = serde_json::from_value(serde_json::json!({
            "code": "SOMETHING_ELSE",
            "dailyTotal": "1",
            "dailyLimit": "2",
            "remainingLimit": "1",
            "exceedsBy": "0"
        }))
        .unwrap();
        assert!(envelope.daily_limit_exceeded().is_none());
    }
}
