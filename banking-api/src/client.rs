//! Banking API trait and HTTP implementation

use async_trait::async_trait;
use banking_types::{Account, TransactionReceipt, TransactionRecord};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::types::{ErrorEnvelope, ResolvedAccount, SubmitTransferRequest};

/// Remote banking backend boundary
///
/// One method per contract the transfer workflow consumes. Implementations
/// must be safe to share behind an `Arc`.
#[async_trait]
pub trait BankingApi: Send + Sync {
    /// Fetch the customer's accounts (`GET /accounts`)
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Resolve a third-party account by number
    /// (`GET /accounts/lookup/{number}`); fails with [`ApiError::NotFound`]
    /// when the backend reports no match
    async fn lookup_account(&self, number: &str) -> Result<ResolvedAccount>;

    /// Create a transfer transaction (`POST /transactions`)
    async fn submit_transfer(&self, request: &SubmitTransferRequest) -> Result<TransactionRecord>;

    /// Fetch the receipt for a booked transaction
    /// (`GET /transactions/{id}/receipt`)
    async fn fetch_receipt(&self, transaction_id: &str) -> Result<TransactionReceipt>;
}

/// HTTP implementation over the bank's REST API
///
/// The bearer credential is opaque to this client; refresh and 401 handling
/// belong to the surrounding session layer.
pub struct HttpBankingApi {
    base_url: String,
    bearer_token: String,
    http: Client,
}

impl HttpBankingApi {
    /// Create a client against the given base URL
    pub fn new(base_url: impl Into<String>, bearer_token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            bearer_token: bearer_token.into(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Map a response to a typed body or a classified error
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            debug!("Backend reported not found");
            return Err(ApiError::NotFound);
        }

        if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
            if envelope.code.is_some() || envelope.message.is_some() {
                warn!(code = ?envelope.code, "Backend rejected request");
                return Err(ApiError::Business(envelope));
            }
        }

        warn!(status = status.as_u16(), "Backend returned error status");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl BankingApi for HttpBankingApi {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        self.get("/accounts").await
    }

    async fn lookup_account(&self, number: &str) -> Result<ResolvedAccount> {
        self.get(&format!("/accounts/lookup/{}", number)).await
    }

    async fn submit_transfer(&self, request: &SubmitTransferRequest) -> Result<TransactionRecord> {
        let response = self
            .http
            .post(self.url("/transactions"))
            .header("Authorization", format!("Bearer {}", self.bearer_token))
            .json(request)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn fetch_receipt(&self, transaction_id: &str) -> Result<TransactionReceipt> {
        self.get(&format!("/transactions/{}/receipt", transaction_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DAILY_LIMIT_EXCEEDED;

    fn response(status: u16, body: &'static str) -> Response {
        Response::from(http::Response::builder().status(status).body(body).unwrap())
    }

    #[tokio::test]
    async fn test_decode_success_body() {
        let resolved: ResolvedAccount = HttpBankingApi::decode(response(
            200,
            r#"{"accountTitle":"Ali Raza","accountType":"current","branchCode":"KHI-014"}"#,
        ))
        .await
        .unwrap();

        assert_eq!(resolved.account_title, "Ali Raza");
        assert_eq!(resolved.branch_code.as_deref(), Some("KHI-014"));
    }

    #[tokio::test]
    async fn test_decode_maps_404_to_not_found() {
        let err = HttpBankingApi::decode::<ResolvedAccount>(response(404, ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn test_decode_maps_envelope_to_business() {
        let body = r#"{
            "code": "DAILY_LIMIT_EXCEEDED",
            "message": "Daily limit exceeded",
            "dailyTotal": "480000",
            "dailyLimit": "500000",
            "remainingLimit": "20000",
            "exceedsBy": "30000"
        }"#;
        let err = HttpBankingApi::decode::<TransactionRecord>(response(422, body))
            .await
            .unwrap_err();

        match err {
            ApiError::Business(envelope) => {
                assert_eq!(envelope.code.as_deref(), Some(DAILY_LIMIT_EXCEEDED));
                let detail = envelope.daily_limit_exceeded().expect("detail");
                assert_eq!(detail.exceeds_by, rust_decimal::Decimal::from(30_000));
            }
            other => panic!("expected business error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_decode_ignores_empty_envelope() {
        // A parseable body with neither code nor message is not a business
        // rejection
        let err = HttpBankingApi::decode::<TransactionRecord>(response(422, "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 422, .. }));
    }

    #[tokio::test]
    async fn test_decode_falls_back_to_status_error() {
        let err = HttpBankingApi::decode::<TransactionRecord>(response(500, "upstream timeout"))
            .await
            .unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream timeout");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }
}
