//! Shared domain types for the MoBank client core
//!
//! Accounts, currencies and transaction records as served by the banking
//! backend, plus the pure currency-formatting utility.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod currency;
pub mod types;

pub use currency::{format_amount, format_minor, Currency};
pub use types::*;
