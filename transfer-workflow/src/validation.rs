//! Form validation
//!
//! Pure, deterministic, fail-fast: checks run in a fixed order and the
//! first violated rule is returned. The `Display` strings are the messages
//! surfaced to the user.

use banking_types::{format_amount, Account};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{Destination, TransferForm};

/// First violated validation rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No source account selected
    #[error("Please select a source account")]
    SourceMissing,

    /// Own transfer without a destination account
    #[error("Please select a destination account")]
    DestinationMissing,

    /// Third-party transfer without a destination number
    #[error("Please enter the destination account number")]
    DestinationNumberMissing,

    /// Third-party transfer without a destination title
    #[error("Please enter the destination account title")]
    DestinationTitleMissing,

    /// Amount absent or not strictly positive
    #[error("Please enter an amount greater than zero")]
    AmountNotPositive,

    /// Description absent
    #[error("Please enter a description")]
    DescriptionMissing,

    /// Own transfer between the same account
    #[error("Source and destination accounts must be different")]
    SameAccount,

    /// Amount plus fee exceeds the available balance
    #[error("Insufficient balance including fees")]
    InsufficientBalance,

    /// Debit would breach the account's minimum balance (formatted figure)
    #[error("This transfer would take the account below its minimum balance of {0}")]
    BelowMinimumBalance(String),
}

/// Validate the form against the selected source account
///
/// `source` is the resolved source account when the selected id is known;
/// the balance checks (rules 7 and 8) run only in that case. `fee` is the
/// estimated fee for the current class and amount.
pub fn validate(
    form: &TransferForm,
    source: Option<&Account>,
    fee: Decimal,
) -> Result<(), ValidationError> {
    // 1. Source selected
    let source_id = form
        .source_account_id
        .as_ref()
        .ok_or(ValidationError::SourceMissing)?;

    // 2/3. Destination shape complete
    match &form.destination {
        Destination::OwnAccount(None) => return Err(ValidationError::DestinationMissing),
        Destination::OwnAccount(Some(_)) => {}
        Destination::ThirdParty {
            account_number,
            account_title,
        } => {
            if account_number.trim().is_empty() {
                return Err(ValidationError::DestinationNumberMissing);
            }
            if account_title.trim().is_empty() {
                return Err(ValidationError::DestinationTitleMissing);
            }
        }
    }

    // 4. Amount strictly positive
    let amount = match form.amount {
        Some(amount) if amount > Decimal::ZERO => amount,
        _ => return Err(ValidationError::AmountNotPositive),
    };

    // 5. Description present
    if form.description.trim().is_empty() {
        return Err(ValidationError::DescriptionMissing);
    }

    // 6. Own transfer must move between distinct accounts
    if let Destination::OwnAccount(Some(destination_id)) = &form.destination {
        if destination_id == source_id {
            return Err(ValidationError::SameAccount);
        }
    }

    // 7/8. Balance checks, only when the source account is known
    if let Some(account) = source {
        let debit = amount + fee;

        if debit > account.available_balance {
            return Err(ValidationError::InsufficientBalance);
        }

        if account.balance - debit < account.minimum_balance {
            return Err(ValidationError::BelowMinimumBalance(format_amount(
                account.minimum_balance,
                account.currency,
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use banking_types::{AccountId, AccountStatus, AccountType, Currency};
    use proptest::prelude::*;

    fn source_account(balance: i64, available: i64, minimum: i64) -> Account {
        Account {
            id: AccountId::new("src"),
            title: "Main Savings".to_string(),
            number: "0101123456789".to_string(),
            account_type: AccountType::Savings,
            status: AccountStatus::Active,
            currency: Currency::PKR,
            balance: Decimal::from(balance),
            available_balance: Decimal::from(available),
            minimum_balance: Decimal::from(minimum),
            daily_limit: Decimal::from(500_000),
            monthly_limit: Decimal::from(5_000_000),
        }
    }

    fn own_form(amount: i64) -> TransferForm {
        TransferForm {
            source_account_id: Some(AccountId::new("src")),
            destination: Destination::OwnAccount(Some(AccountId::new("dst"))),
            amount: Some(Decimal::from(amount)),
            description: "monthly savings".to_string(),
            channel: "mobile".to_string(),
        }
    }

    #[test]
    fn test_rules_fire_in_order() {
        let mut form = own_form(100);

        form.source_account_id = None;
        assert_eq!(
            validate(&form, None, Decimal::ZERO),
            Err(ValidationError::SourceMissing)
        );

        form.source_account_id = Some(AccountId::new("src"));
        form.destination = Destination::OwnAccount(None);
        assert_eq!(
            validate(&form, None, Decimal::ZERO),
            Err(ValidationError::DestinationMissing)
        );

        form.destination = Destination::ThirdParty {
            account_number: String::new(),
            account_title: String::new(),
        };
        assert_eq!(
            validate(&form, None, Decimal::ZERO),
            Err(ValidationError::DestinationNumberMissing)
        );

        form.destination = Destination::ThirdParty {
            account_number: "0101123456789".to_string(),
            account_title: "  ".to_string(),
        };
        assert_eq!(
            validate(&form, None, Decimal::ZERO),
            Err(ValidationError::DestinationTitleMissing)
        );

        form.destination = Destination::ThirdParty {
            account_number: "0101123456789".to_string(),
            account_title: "Ali Raza".to_string(),
        };
        form.amount = Some(Decimal::ZERO);
        assert_eq!(
            validate(&form, None, Decimal::ZERO),
            Err(ValidationError::AmountNotPositive)
        );

        form.amount = Some(Decimal::from(100));
        form.description = String::new();
        assert_eq!(
            validate(&form, None, Decimal::ZERO),
            Err(ValidationError::DescriptionMissing)
        );
    }

    #[test]
    fn test_scenario_own_transfer_valid() {
        // amount 5000, balance 10000, minimum 1000, fee 0
        let form = own_form(5_000);
        let account = source_account(10_000, 10_000, 1_000);
        assert_eq!(validate(&form, Some(&account), Decimal::ZERO), Ok(()));
    }

    #[test]
    fn test_scenario_insufficient_including_fee() {
        // amount 1000, fee 50, available 1000
        let mut form = own_form(1_000);
        form.destination = Destination::ThirdParty {
            account_number: "0101123456789".to_string(),
            account_title: "Ali Raza".to_string(),
        };
        let account = source_account(5_000, 1_000, 0);
        let result = validate(&form, Some(&account), Decimal::from(50));
        assert_eq!(result, Err(ValidationError::InsufficientBalance));
        assert_eq!(
            result.unwrap_err().to_string(),
            "Insufficient balance including fees"
        );
    }

    #[test]
    fn test_minimum_balance_message_carries_figure() {
        let form = own_form(8_500);
        let account = source_account(10_000, 10_000, 2_000);
        let err = validate(&form, Some(&account), Decimal::ZERO).unwrap_err();
        assert_eq!(
            err.to_string(),
            "This transfer would take the account below its minimum balance of PKR 2,000.00"
        );
    }

    #[test]
    fn test_balance_checks_skipped_without_account() {
        // No source snapshot: rules 7/8 cannot run
        let form = own_form(1_000_000);
        assert_eq!(validate(&form, None, Decimal::ZERO), Ok(()));
    }

    proptest! {
        /// Same-account rule fires for every amount and description
        #[test]
        fn prop_same_account_always_fails(amount in 1i64..1_000_000, description in "[a-z][a-z ]{0,39}") {
            let form = TransferForm {
                source_account_id: Some(AccountId::new("src")),
                destination: Destination::OwnAccount(Some(AccountId::new("src"))),
                amount: Some(Decimal::from(amount)),
                description,
                channel: "mobile".to_string(),
            };
            let account = source_account(i64::MAX / 2, i64::MAX / 2, 0);
            prop_assert_eq!(
                validate(&form, Some(&account), Decimal::ZERO),
                Err(ValidationError::SameAccount)
            );
        }

        /// Balance pre-check rejects before anything reaches the network
        #[test]
        fn prop_over_available_always_fails(amount in 1i64..1_000_000, fee in 0i64..1_000) {
            let available = amount + fee - 1;
            let form = own_form(amount);
            let account = source_account(available, available, 0);
            prop_assert_eq!(
                validate(&form, Some(&account), Decimal::from(fee)),
                Err(ValidationError::InsufficientBalance)
            );
        }
    }
}
