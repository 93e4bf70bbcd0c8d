//! Account and transaction types as served by the banking backend
//!
//! All money fields use `Decimal` for exact arithmetic; wire names are
//! camelCase to match the backend contracts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::currency::Currency;

/// Account identifier assigned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(String);

impl AccountId {
    /// Create new account ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account product type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// Regular savings account
    Savings,
    /// Current (checking) account
    Current,
    /// Fixed-term deposit; never a valid transfer source
    FixedDeposit,
    /// Shariah-compliant savings account
    IslamicSavings,
    /// Salary disbursement account
    Salary,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountType::Savings => "Savings",
            AccountType::Current => "Current",
            AccountType::FixedDeposit => "Fixed Deposit",
            AccountType::IslamicSavings => "Islamic Savings",
            AccountType::Salary => "Salary",
        };
        write!(f, "{}", name)
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Fully operational
    Active,
    /// Dormant; visible but not transactable
    Inactive,
    /// Blocked by the bank
    Frozen,
    /// Closed permanently
    Closed,
}

/// Customer account as returned by `GET /accounts`
///
/// Read-only on the client; all balances and limits are authoritative on
/// the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Backend identifier
    pub id: AccountId,

    /// Display title (holder or product name)
    pub title: String,

    /// Printable account number
    pub number: String,

    /// Product type
    pub account_type: AccountType,

    /// Lifecycle status
    pub status: AccountStatus,

    /// Denominating currency
    #[serde(default)]
    pub currency: Currency,

    /// Ledger balance
    pub balance: Decimal,

    /// Balance available for withdrawal
    pub available_balance: Decimal,

    /// Balance floor that must remain after any debit
    pub minimum_balance: Decimal,

    /// Daily cumulative transfer ceiling
    pub daily_limit: Decimal,

    /// Monthly cumulative transfer ceiling
    pub monthly_limit: Decimal,
}

impl Account {
    /// Whether the account is operational
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Whether the account may be debited by a transfer
    ///
    /// Only active accounts qualify, and fixed deposits never do.
    pub fn can_be_source(&self) -> bool {
        self.is_active() && self.account_type != AccountType::FixedDeposit
    }

    /// Whether the account may receive an own-account transfer
    pub fn can_receive_own_transfer(&self) -> bool {
        self.is_active()
    }
}

/// Processing status of a created transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Booked on the ledger
    Completed,
    /// Accepted, awaiting processing
    Pending,
    /// Rejected during processing
    Failed,
    /// Status the client does not recognize
    #[serde(other)]
    Unknown,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionStatus::Completed => "completed",
            TransactionStatus::Pending => "pending",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Transaction record returned by `POST /transactions`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Backend transaction identifier
    pub transaction_id: String,

    /// Processing status
    pub status: TransactionStatus,

    /// Transferred amount
    pub amount: Decimal,
}

/// Receipt detail returned by `GET /transactions/{id}/receipt`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Backend transaction identifier
    pub transaction_id: String,

    /// Processing status
    pub status: TransactionStatus,

    /// Transferred amount
    pub amount: Decimal,

    /// Fee actually charged by the backend
    pub fee: Decimal,

    /// Denominating currency
    #[serde(default)]
    pub currency: Currency,

    /// Source account display string
    pub from_account: String,

    /// Destination display string
    pub to_account: String,

    /// User-supplied description
    pub description: String,

    /// Booking timestamp
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(account_type: AccountType, status: AccountStatus) -> Account {
        Account {
            id: AccountId::new("acc-1"),
            title: "Main Savings".to_string(),
            number: "0101123456789".to_string(),
            account_type,
            status,
            currency: Currency::PKR,
            balance: Decimal::from(10_000),
            available_balance: Decimal::from(9_000),
            minimum_balance: Decimal::from(1_000),
            daily_limit: Decimal::from(500_000),
            monthly_limit: Decimal::from(5_000_000),
        }
    }

    #[test]
    fn test_source_eligibility() {
        assert!(account(AccountType::Savings, AccountStatus::Active).can_be_source());
        assert!(!account(AccountType::FixedDeposit, AccountStatus::Active).can_be_source());
        assert!(!account(AccountType::Savings, AccountStatus::Frozen).can_be_source());
        assert!(!account(AccountType::Current, AccountStatus::Closed).can_be_source());
    }

    #[test]
    fn test_account_wire_names() {
        let json = serde_json::to_value(account(AccountType::Current, AccountStatus::Active))
            .unwrap();
        assert!(json.get("accountType").is_some());
        assert!(json.get("availableBalance").is_some());
        assert_eq!(json["status"], "active");
        assert_eq!(json["accountType"], "current");
    }

    #[test]
    fn test_unknown_transaction_status() {
        let status: TransactionStatus = serde_json::from_str("\"reversed\"").unwrap();
        assert_eq!(status, TransactionStatus::Unknown);
    }
}
