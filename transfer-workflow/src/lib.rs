//! Money-transfer workflow for the MoBank retail client
//!
//! Client-side orchestration of own-account and third-party transfers:
//! form state, the three-step state machine, debounced destination lookup,
//! fee estimation and submission outcome handling.
//!
//! # Invariants
//!
//! - Single writer: all form and state mutation goes through named
//!   [`controller::TransferWorkflow`] methods
//! - No skipped steps: `Form → Confirm → Success` only, with
//!   `Confirm → Form` on edit-back or submission failure
//! - Stale async completions are dropped by explicit generation checks,
//!   never applied out of order
//! - At most one submission in flight per user intent

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod controller;
pub mod error;
pub mod fee;
pub mod lookup;
pub mod types;
pub mod validation;

pub use config::{FeeConfig, LookupConfig, WorkflowConfig};
pub use controller::{SubmissionTicket, TransferWorkflow};
pub use error::{Error, Result};
pub use fee::FeePolicy;
pub use lookup::{LookupOutcome, LookupState, LookupTicket};
pub use types::*;
pub use validation::{validate, ValidationError};
