//! Form and state-machine types owned by the workflow controller

use banking_types::{AccountId, Currency};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transfer class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferClass {
    /// Between two accounts of the same customer
    Own,
    /// To another account holder, addressed by number
    Other,
}

impl fmt::Display for TransferClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferClass::Own => write!(f, "own"),
            TransferClass::Other => write!(f, "other"),
        }
    }
}

/// Destination of a transfer
///
/// The shape is exclusive by class: switching class replaces the variant,
/// which discards the other shape's fields by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Destination {
    /// Another account of the same customer
    OwnAccount(Option<AccountId>),
    /// A third-party account addressed by free-text number and title
    ThirdParty {
        /// Destination account number as typed
        account_number: String,
        /// Destination account title, typed or auto-verified
        account_title: String,
    },
}

impl Destination {
    /// Empty destination shape for the given class
    pub fn for_class(class: TransferClass) -> Self {
        match class {
            TransferClass::Own => Destination::OwnAccount(None),
            TransferClass::Other => Destination::ThirdParty {
                account_number: String::new(),
                account_title: String::new(),
            },
        }
    }

    /// Transfer class this shape belongs to
    pub fn class(&self) -> TransferClass {
        match self {
            Destination::OwnAccount(_) => TransferClass::Own,
            Destination::ThirdParty { .. } => TransferClass::Other,
        }
    }
}

/// Transfer form state
///
/// Owned exclusively by the controller; the presentation layer reads it
/// through a shared reference and mutates it only through named controller
/// operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferForm {
    /// Selected source account
    pub source_account_id: Option<AccountId>,

    /// Destination, shaped by transfer class
    pub destination: Destination,

    /// Transfer amount in major units
    pub amount: Option<Decimal>,

    /// Free-text description
    pub description: String,

    /// Originating channel tag
    pub channel: String,
}

impl TransferForm {
    /// Fresh own-transfer form with the given channel tag
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            source_account_id: None,
            destination: Destination::OwnAccount(None),
            amount: None,
            description: String::new(),
            channel: channel.into(),
        }
    }

    /// Current transfer class, derived from the destination shape
    pub fn class(&self) -> TransferClass {
        self.destination.class()
    }
}

/// Workflow step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowState {
    /// Free editing
    Form,
    /// Read-only review of the pending transfer
    Confirm,
    /// Immutable receipt view; terminal until a new transfer starts
    Success,
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowState::Form => write!(f, "form"),
            WorkflowState::Confirm => write!(f, "confirm"),
            WorkflowState::Success => write!(f, "success"),
        }
    }
}

/// Read-only summary shown on the confirmation step
///
/// Recomputed deterministically from the form; repeated back-and-confirm
/// cycles over unchanged inputs yield identical summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationSummary {
    /// Source account title
    pub source_title: String,

    /// Source account number
    pub source_number: String,

    /// Destination display string
    pub destination: String,

    /// Transfer amount
    pub amount: Decimal,

    /// Estimated fee
    pub fee: Decimal,

    /// Amount plus fee
    pub total: Decimal,

    /// User-supplied description
    pub description: String,

    /// Denominating currency
    pub currency: Currency,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_derived_from_destination() {
        let mut form = TransferForm::new("mobile");
        assert_eq!(form.class(), TransferClass::Own);

        form.destination = Destination::for_class(TransferClass::Other);
        assert_eq!(form.class(), TransferClass::Other);
        assert_eq!(
            form.destination,
            Destination::ThirdParty {
                account_number: String::new(),
                account_title: String::new(),
            }
        );
    }
}
