//! Deterministic in-memory backend for tests and demos

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use banking_types::{Account, TransactionReceipt, TransactionRecord, TransactionStatus};
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::BankingApi;
use crate::error::{ApiError, Result};
use crate::types::{ErrorEnvelope, ResolvedAccount, SubmitTransferRequest};

#[derive(Default)]
struct MockState {
    accounts: Vec<Account>,
    directory: HashMap<String, ResolvedAccount>,
    scripted_failures: VecDeque<ErrorEnvelope>,
    receipts: HashMap<String, TransactionReceipt>,
}

/// In-memory banking backend
///
/// Seeded with accounts and a third-party directory; every submission
/// succeeds unless a failure has been scripted. Call counters back the
/// workflow's call-count guarantees in tests.
pub struct MockBankingApi {
    latency: Duration,
    state: Arc<RwLock<MockState>>,
    lookup_calls: AtomicUsize,
    submit_calls: AtomicUsize,
}

impl MockBankingApi {
    /// Create an empty mock with no simulated latency
    pub fn new() -> Self {
        Self {
            latency: Duration::ZERO,
            state: Arc::new(RwLock::new(MockState::default())),
            lookup_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
        }
    }

    /// Simulate per-call network latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Seed a customer account
    pub async fn add_account(&self, account: Account) {
        self.state.write().await.accounts.push(account);
    }

    /// Register a resolvable third-party account number
    pub async fn register_third_party(&self, number: impl Into<String>, resolved: ResolvedAccount) {
        self.state.write().await.directory.insert(number.into(), resolved);
    }

    /// Script the next submission to fail with the given envelope
    pub async fn fail_next_submit(&self, envelope: ErrorEnvelope) {
        self.state.write().await.scripted_failures.push_back(envelope);
    }

    /// Number of lookup calls that reached the backend
    pub fn lookup_call_count(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    /// Number of submission calls that reached the backend
    pub fn submit_call_count(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockBankingApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BankingApi for MockBankingApi {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.simulate_latency().await;
        Ok(self.state.read().await.accounts.clone())
    }

    async fn lookup_account(&self, number: &str) -> Result<ResolvedAccount> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        match self.state.read().await.directory.get(number) {
            Some(resolved) => Ok(resolved.clone()),
            None => Err(ApiError::NotFound),
        }
    }

    async fn submit_transfer(&self, request: &SubmitTransferRequest) -> Result<TransactionRecord> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        let mut state = self.state.write().await;
        if let Some(envelope) = state.scripted_failures.pop_front() {
            warn!("Mock backend: scripted submission failure");
            return Err(ApiError::Business(envelope));
        }

        let transaction_id = format!("TXN-{}", Uuid::new_v4());
        info!(
            "Mock backend: booked transfer {} of {}",
            transaction_id, request.amount
        );

        let to_account = match (&request.to_account_id, &request.third_party) {
            (Some(id), _) => id.to_string(),
            (None, Some(third_party)) => third_party.account_number.clone(),
            (None, None) => String::new(),
        };

        state.receipts.insert(
            transaction_id.clone(),
            TransactionReceipt {
                transaction_id: transaction_id.clone(),
                status: TransactionStatus::Completed,
                amount: request.amount,
                fee: Decimal::ZERO,
                currency: Default::default(),
                from_account: request.from_account_id.to_string(),
                to_account,
                description: request.description.clone(),
                created_at: Utc::now(),
            },
        );

        Ok(TransactionRecord {
            transaction_id,
            status: TransactionStatus::Completed,
            amount: request.amount,
        })
    }

    async fn fetch_receipt(&self, transaction_id: &str) -> Result<TransactionReceipt> {
        self.simulate_latency().await;

        match self.state.read().await.receipts.get(transaction_id) {
            Some(receipt) => Ok(receipt.clone()),
            None => Err(ApiError::NotFound),
        }
    }
}
