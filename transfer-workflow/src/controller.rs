//! Transfer workflow controller
//!
//! Owns the form and the `Form → Confirm → Success` state machine. All
//! mutation happens through the named methods below; the presentation layer
//! holds a shared reference and renders whatever the accessors expose.
//!
//! The three awaits (account fetch, debounced lookup, submission) are
//! driven through tickets so their staleness and single-flight guards are
//! explicit and testable.

use std::sync::Arc;

use banking_api::{ApiError, BankingApi, SubmitTransferRequest, ThirdPartyDestination};
use banking_types::{
    format_amount, Account, AccountId, AccountType, TransactionReceipt, TransactionRecord,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::WorkflowConfig;
use crate::error::{Error, Result};
use crate::fee::FeePolicy;
use crate::lookup::{LookupOutcome, LookupState, LookupTicket};
use crate::types::{ConfirmationSummary, Destination, TransferClass, TransferForm, WorkflowState};
use crate::validation::validate;

/// Fallback message for unclassified submission failures
const DEFAULT_SUBMIT_ERROR: &str = "Transfer could not be completed. Please try again.";

/// Special-cased daily-limit message for fixed-deposit sources
const FIXED_DEPOSIT_MESSAGE: &str = "Fixed deposit accounts do not allow transactions at all.";

/// Handle for one in-flight submission
///
/// Produced at most once while a submission is outstanding; a second
/// confirm press yields nothing, so a single user intent can never create
/// two transactions.
#[derive(Debug)]
pub struct SubmissionTicket {
    /// Payload to post to the backend
    pub request: SubmitTransferRequest,
}

/// Money-transfer workflow controller
pub struct TransferWorkflow {
    api: Arc<dyn BankingApi>,
    config: WorkflowConfig,
    fee_policy: FeePolicy,
    accounts: Vec<Account>,
    state: WorkflowState,
    form: TransferForm,
    lookup: LookupState,
    lookup_generation: u64,
    submission_in_flight: bool,
    form_error: Option<String>,
    outcome: Option<TransactionRecord>,
}

impl TransferWorkflow {
    /// Create a workflow over the given backend
    pub fn new(api: Arc<dyn BankingApi>, config: WorkflowConfig) -> Self {
        let form = TransferForm::new(config.channel.clone());
        let fee_policy = FeePolicy::new(config.fee.clone());

        Self {
            api,
            fee_policy,
            form,
            config,
            accounts: Vec::new(),
            state: WorkflowState::Form,
            lookup: LookupState::Idle,
            lookup_generation: 0,
            submission_in_flight: false,
            form_error: None,
            outcome: None,
        }
    }

    /// Fetch the customer's accounts
    ///
    /// The result is applied only while still on the form step; a late
    /// completion arriving mid-confirmation is dropped.
    pub async fn load_accounts(&mut self) -> Result<()> {
        let accounts = self.api.list_accounts().await?;

        if self.state != WorkflowState::Form {
            debug!("Account list arrived outside the form step, dropped");
            return Ok(());
        }

        info!(count = accounts.len(), "Accounts loaded");
        self.accounts = accounts;
        Ok(())
    }

    // ---- accessors -------------------------------------------------------

    /// Current workflow step
    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Current form state (read-only)
    pub fn form(&self) -> &TransferForm {
        &self.form
    }

    /// Workflow configuration
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    /// All loaded accounts
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Accounts eligible as a transfer source
    pub fn source_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|a| a.can_be_source())
    }

    /// Accounts eligible as an own-transfer destination
    pub fn own_destination_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter().filter(|a| a.can_receive_own_transfer())
    }

    /// Resolved source account, when the selected id is loaded
    pub fn source_account(&self) -> Option<&Account> {
        self.form
            .source_account_id
            .as_ref()
            .and_then(|id| self.account(id))
    }

    /// Destination lookup state
    pub fn lookup_state(&self) -> &LookupState {
        &self.lookup
    }

    /// Message from the last validation or submission failure
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Record of the booked transfer, once in the success step
    pub fn outcome(&self) -> Option<&TransactionRecord> {
        self.outcome.as_ref()
    }

    /// Estimated fee for the current class and amount
    pub fn estimated_fee(&self) -> Decimal {
        self.fee_policy
            .compute(self.form.class(), self.form.amount.unwrap_or(Decimal::ZERO))
    }

    fn account(&self, id: &AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.id == id)
    }

    // ---- form editing ----------------------------------------------------

    /// Switch between own and third-party transfer
    ///
    /// Replaces the destination shape, which clears the other class's
    /// fields, and invalidates any pending lookup.
    pub fn set_transfer_class(&mut self, class: TransferClass) {
        if self.state != WorkflowState::Form {
            debug!("Class switch ignored outside the form step");
            return;
        }
        if self.form.class() == class {
            return;
        }

        info!(%class, "Transfer class switched");
        self.form.destination = Destination::for_class(class);
        self.lookup = LookupState::Idle;
        self.lookup_generation += 1;
        self.form_error = None;
    }

    /// Select the source account
    pub fn select_source_account(&mut self, id: &AccountId) -> Result<()> {
        if self.state != WorkflowState::Form {
            return Err(Error::InvalidState(format!(
                "cannot edit the form from {}",
                self.state
            )));
        }

        let account = self
            .account(id)
            .ok_or_else(|| Error::UnknownAccount(id.to_string()))?;
        if !account.can_be_source() {
            return Err(Error::IneligibleSource(format!(
                "{} ({})",
                account.title, account.account_type
            )));
        }

        self.form.source_account_id = Some(id.clone());
        Ok(())
    }

    /// Select the destination account for an own transfer
    pub fn select_destination_account(&mut self, id: &AccountId) -> Result<()> {
        if self.state != WorkflowState::Form {
            return Err(Error::InvalidState(format!(
                "cannot edit the form from {}",
                self.state
            )));
        }
        if self.form.class() != TransferClass::Own {
            return Err(Error::InvalidState(
                "destination account selection applies to own transfers".to_string(),
            ));
        }

        let account = self
            .account(id)
            .ok_or_else(|| Error::UnknownAccount(id.to_string()))?;
        if !account.can_receive_own_transfer() {
            return Err(Error::IneligibleDestination(format!(
                "{} ({})",
                account.title, account.account_type
            )));
        }

        self.form.destination = Destination::OwnAccount(Some(id.clone()));
        Ok(())
    }

    /// Record a keystroke on the destination number field
    ///
    /// Returns a ticket when a lookup should be scheduled: third-party
    /// class and the number at least the configured minimum length. Every
    /// edit supersedes whatever lookup is pending or in flight.
    pub fn destination_number_input(&mut self, value: &str) -> Option<LookupTicket> {
        if self.state != WorkflowState::Form {
            debug!("Destination input ignored outside the form step");
            return None;
        }

        let min_len = self.config.lookup.min_number_len;
        let Destination::ThirdParty { account_number, .. } = &mut self.form.destination else {
            debug!("Destination number input ignored for own transfer");
            return None;
        };

        let trimmed = value.trim();
        *account_number = trimmed.to_string();
        self.lookup_generation += 1;

        if trimmed.chars().count() < min_len {
            self.lookup = LookupState::Idle;
            return None;
        }

        self.lookup = LookupState::Loading;
        Some(LookupTicket {
            generation: self.lookup_generation,
            account_number: trimmed.to_string(),
        })
    }

    /// Set the destination title for a third-party transfer
    pub fn set_destination_title(&mut self, value: &str) {
        if self.state != WorkflowState::Form {
            debug!("Title input ignored outside the form step");
            return;
        }
        if let Destination::ThirdParty { account_title, .. } = &mut self.form.destination {
            *account_title = value.trim().to_string();
        } else {
            debug!("Title input ignored for own transfer");
        }
    }

    /// Set the transfer amount
    pub fn set_amount(&mut self, amount: Option<Decimal>) {
        if self.state != WorkflowState::Form {
            debug!("Amount input ignored outside the form step");
            return;
        }
        self.form.amount = amount;
    }

    /// Set the transfer description
    pub fn set_description(&mut self, value: &str) {
        if self.state != WorkflowState::Form {
            debug!("Description input ignored outside the form step");
            return;
        }
        self.form.description = value.to_string();
    }

    // ---- destination lookup ---------------------------------------------

    /// Whether a ticket survived its debounce un-superseded
    ///
    /// The driver checks this after [`LookupTicket::wait`]; only a current
    /// ticket issues the network call.
    pub fn lookup_is_current(&self, ticket: &LookupTicket) -> bool {
        ticket.generation == self.lookup_generation
            && self.state == WorkflowState::Form
            && matches!(self.form.destination, Destination::ThirdParty { .. })
    }

    /// Apply a completed lookup
    ///
    /// Outcomes from superseded tickets, or arriving after the class or
    /// step changed, are dropped. On success the title is auto-filled only
    /// when the user has not typed one.
    pub fn apply_lookup_result(&mut self, outcome: LookupOutcome) {
        if outcome.generation != self.lookup_generation || self.state != WorkflowState::Form {
            debug!(
                generation = outcome.generation,
                current = self.lookup_generation,
                "Stale lookup result dropped"
            );
            return;
        }

        let Destination::ThirdParty { account_title, .. } = &mut self.form.destination else {
            debug!("Lookup result for non third-party destination dropped");
            return;
        };

        match outcome.result {
            Ok(resolved) => {
                info!(title = %resolved.account_title, "Destination account verified");
                if account_title.trim().is_empty() {
                    *account_title = resolved.account_title.clone();
                }
                self.lookup = LookupState::Verified(resolved);
            }
            Err(ApiError::NotFound) => {
                self.lookup =
                    LookupState::Failed("No account matches this number".to_string());
            }
            Err(err) => {
                warn!(%err, "Destination lookup failed");
                self.lookup =
                    LookupState::Failed("Could not verify the account number".to_string());
            }
        }
    }

    // ---- step transitions ------------------------------------------------

    /// Validate the form and move to the confirmation step
    ///
    /// On a validation failure the message is surfaced through
    /// [`Self::form_error`] and the workflow stays on the form.
    pub fn proceed_to_confirm(&mut self) -> Result<()> {
        if self.state != WorkflowState::Form {
            return Err(Error::InvalidState(format!(
                "cannot confirm from {}",
                self.state
            )));
        }

        let fee = self.estimated_fee();
        match validate(&self.form, self.source_account(), fee) {
            Ok(()) => {
                info!("Form validated, moving to confirmation");
                self.form_error = None;
                self.state = WorkflowState::Confirm;
                Ok(())
            }
            Err(err) => {
                let message = err.to_string();
                debug!(%message, "Validation failed");
                self.form_error = Some(message);
                Err(Error::Validation(err))
            }
        }
    }

    /// Read-only summary for the confirmation step
    pub fn confirmation_summary(&self) -> Option<ConfirmationSummary> {
        if self.state != WorkflowState::Confirm {
            return None;
        }

        let source = self.source_account()?;
        let amount = self.form.amount?;
        let fee = self.estimated_fee();

        let destination = match &self.form.destination {
            Destination::OwnAccount(Some(id)) => self
                .account(id)
                .map(|a| format!("{} ({})", a.title, a.number))
                .unwrap_or_else(|| id.to_string()),
            Destination::OwnAccount(None) => return None,
            Destination::ThirdParty {
                account_number,
                account_title,
            } => format!("{} ({})", account_title, account_number),
        };

        Some(ConfirmationSummary {
            source_title: source.title.clone(),
            source_number: source.number.clone(),
            destination,
            amount,
            fee,
            total: amount + fee,
            description: self.form.description.clone(),
            currency: source.currency,
        })
    }

    /// Return from confirmation to the form, state preserved
    pub fn back(&mut self) {
        if self.state != WorkflowState::Confirm {
            debug!("Back ignored outside the confirmation step");
            return;
        }
        if self.submission_in_flight {
            debug!("Back ignored while a submission is in flight");
            return;
        }
        self.state = WorkflowState::Form;
    }

    // ---- submission ------------------------------------------------------

    /// Begin a submission
    ///
    /// Returns `None` outside the confirmation step or while a submission
    /// is already outstanding.
    pub fn begin_submission(&mut self) -> Option<SubmissionTicket> {
        if self.state != WorkflowState::Confirm {
            debug!("Submission ignored outside the confirmation step");
            return None;
        }
        if self.submission_in_flight {
            debug!("Submission already in flight, repeat confirm ignored");
            return None;
        }

        let request = self.build_request()?;
        self.submission_in_flight = true;
        info!(amount = %request.amount, class = %self.form.class(), "Submitting transfer");
        Some(SubmissionTicket { request })
    }

    /// Post a submission ticket to the backend
    pub async fn execute_submission(
        api: &dyn BankingApi,
        ticket: &SubmissionTicket,
    ) -> std::result::Result<TransactionRecord, ApiError> {
        api.submit_transfer(&ticket.request).await
    }

    /// Apply the submission outcome
    ///
    /// Success moves to the receipt step. Any failure returns to the form
    /// with a classified message: the balance snapshot behind the original
    /// validation may be stale, so the user must re-review.
    pub fn apply_submission_result(
        &mut self,
        result: std::result::Result<TransactionRecord, ApiError>,
    ) {
        self.submission_in_flight = false;

        if self.state != WorkflowState::Confirm {
            debug!("Submission result arrived outside confirmation, dropped");
            return;
        }

        match result {
            Ok(record) => {
                info!(transaction_id = %record.transaction_id, "Transfer booked");
                self.outcome = Some(record);
                self.form_error = None;
                self.state = WorkflowState::Success;
            }
            Err(err) => {
                let message = self.submission_failure_message(&err);
                warn!(%message, "Transfer submission failed");
                self.form_error = Some(message);
                self.state = WorkflowState::Form;
            }
        }
    }

    /// Confirm the pending transfer: begin, execute and apply in one call
    ///
    /// A repeat call while a submission is outstanding is a no-op.
    pub async fn confirm(&mut self) {
        let Some(ticket) = self.begin_submission() else {
            return;
        };

        let api = Arc::clone(&self.api);
        let result = Self::execute_submission(api.as_ref(), &ticket).await;
        self.apply_submission_result(result);
    }

    fn build_request(&self) -> Option<SubmitTransferRequest> {
        let source_id = self.form.source_account_id.clone()?;
        let amount = self.form.amount?;

        match &self.form.destination {
            Destination::OwnAccount(Some(to)) => Some(SubmitTransferRequest::own(
                source_id,
                to.clone(),
                amount,
                self.form.description.clone(),
                self.form.channel.clone(),
            )),
            Destination::OwnAccount(None) => None,
            Destination::ThirdParty {
                account_number,
                account_title,
            } => Some(SubmitTransferRequest::third_party(
                source_id,
                ThirdPartyDestination {
                    account_number: account_number.clone(),
                    account_title: account_title.clone(),
                },
                amount,
                self.form.description.clone(),
                self.form.channel.clone(),
            )),
        }
    }

    fn submission_failure_message(&self, err: &ApiError) -> String {
        match err {
            ApiError::Business(envelope) => {
                if let Some(detail) = envelope.daily_limit_exceeded() {
                    let account_type = detail
                        .account_type
                        .or_else(|| self.source_account().map(|a| a.account_type));
                    if account_type == Some(AccountType::FixedDeposit) {
                        return FIXED_DEPOSIT_MESSAGE.to_string();
                    }

                    let currency = self
                        .source_account()
                        .map(|a| a.currency)
                        .unwrap_or_default();
                    return format!(
                        "Daily transfer limit exceeded: used {} of {}, {} remaining. This transfer exceeds the limit by {}.",
                        format_amount(detail.daily_total, currency),
                        format_amount(detail.daily_limit, currency),
                        format_amount(detail.remaining_limit, currency),
                        format_amount(detail.exceeds_by, currency),
                    );
                }

                envelope
                    .message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUBMIT_ERROR.to_string())
            }
            _ => DEFAULT_SUBMIT_ERROR.to_string(),
        }
    }

    // ---- success step ----------------------------------------------------

    /// Start a new transfer, keeping the previous source account
    pub fn new_transfer(&mut self) {
        if self.state != WorkflowState::Success {
            debug!("New-transfer reset ignored outside the success step");
            return;
        }

        let source = self.form.source_account_id.take();
        self.form = TransferForm::new(self.config.channel.clone());
        self.form.source_account_id = source;
        self.lookup = LookupState::Idle;
        self.lookup_generation += 1;
        self.outcome = None;
        self.form_error = None;
        self.state = WorkflowState::Form;
        info!("Workflow reset for a new transfer");
    }

    /// Fetch the receipt for the booked transfer (read-only side query)
    pub async fn view_receipt(&self) -> Result<TransactionReceipt> {
        let record = self.outcome.as_ref().ok_or_else(|| {
            Error::InvalidState("no completed transfer to fetch a receipt for".to_string())
        })?;
        Ok(self.api.fetch_receipt(&record.transaction_id).await?)
    }
}
