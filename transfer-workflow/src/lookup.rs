//! Debounced destination lookup machinery
//!
//! Every keystroke on the destination number bumps the controller's
//! generation counter and yields a fresh [`LookupTicket`]. The driver waits
//! out the debounce interval, asks the controller whether the ticket is
//! still current, and only then issues the network call. Results carry the
//! generation back so stale completions are dropped instead of overwriting
//! newer state.

use banking_api::{ApiError, BankingApi, ResolvedAccount};
use tracing::debug;

use crate::config::LookupConfig;

/// Destination lookup state
#[derive(Debug, Clone)]
pub enum LookupState {
    /// No lookup scheduled
    Idle,
    /// A lookup is debouncing or in flight
    Loading,
    /// The backend resolved the account
    Verified(ResolvedAccount),
    /// The lookup failed; advisory only, does not block the transfer
    Failed(String),
}

impl LookupState {
    /// Whether no lookup is scheduled
    pub fn is_idle(&self) -> bool {
        matches!(self, LookupState::Idle)
    }

    /// Whether the destination has been verified
    pub fn is_verified(&self) -> bool {
        matches!(self, LookupState::Verified(_))
    }
}

/// Handle for one scheduled lookup
///
/// The generation identifies the keystroke that scheduled it; a ticket
/// whose generation no longer matches the controller's is superseded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    /// Generation at scheduling time
    pub generation: u64,

    /// Destination number to resolve
    pub account_number: String,
}

impl LookupTicket {
    /// Wait out the debounce interval
    pub async fn wait(&self, config: &LookupConfig) {
        tokio::time::sleep(std::time::Duration::from_millis(config.debounce_ms)).await;
    }
}

/// Completed lookup, tagged with its scheduling generation
#[derive(Debug)]
pub struct LookupOutcome {
    /// Generation of the ticket that issued the call
    pub generation: u64,

    /// Backend resolution result
    pub result: std::result::Result<ResolvedAccount, ApiError>,
}

/// Issue the network call for a ticket that survived its debounce
pub async fn execute_lookup(api: &dyn BankingApi, ticket: &LookupTicket) -> LookupOutcome {
    debug!(
        generation = ticket.generation,
        "Resolving destination account"
    );
    let result = api.lookup_account(&ticket.account_number).await;
    LookupOutcome {
        generation: ticket.generation,
        result,
    }
}
