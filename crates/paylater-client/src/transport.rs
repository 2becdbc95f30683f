//! Uniform backend access with authentication and error normalization.
//!
//! One method per endpoint; authenticated calls attach
//! `Authorization: Bearer <token>` when a token is present. Every call is a
//! single attempt: no retry, no backoff. Non-2xx responses always fail with
//! a normalized human-readable message, never a partial success.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use paylater_backend_mock::{MockBackend, Rejection};
use paylater_types::{
    CommissionUpdate, Customer, CustomerProfile, Merchant, MerchantCreate, SignupRequest,
    TokenResponse, Transaction, TransactionCreate, TransactionRepay,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Backend base address for this build.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Fallback when the backend returns no recognizable error shape.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred";

/// Transport configuration shared by backend clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 3_000,
        }
    }
}

/// Error model for gateway operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx response; `message` is the normalized backend message.
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Extract a human-readable message from the backend's error shapes:
/// `detail` as a string, `detail` as a list of validation objects joined by
/// comma, then `message`, then `error`, then the generic fallback.
pub fn normalize_error_message(body: &Value) -> String {
    if let Some(detail) = body.get("detail") {
        if let Some(text) = detail.as_str() {
            return text.to_string();
        }
        if let Some(items) = detail.as_array() {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| {
                    item.get("msg")
                        .and_then(Value::as_str)
                        .or_else(|| item.get("message").and_then(Value::as_str))
                        .or_else(|| item.as_str())
                })
                .collect();
            if !messages.is_empty() {
                return messages.join(", ");
            }
        }
    }
    if let Some(message) = body.get("message").and_then(Value::as_str) {
        return message.to_string();
    }
    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return error.to_string();
    }
    GENERIC_ERROR_MESSAGE.to_string()
}

/// Backend gateway interface. Implementations may use HTTP or the in-memory
/// mock backend.
#[async_trait]
pub trait BackendTransport {
    async fn customer_signup(&self, req: &SignupRequest) -> Result<Customer, ApiError>;

    /// Password-grant login; the only form-url-encoded call.
    async fn customer_login(&self, email: &str, password: &str)
        -> Result<TokenResponse, ApiError>;

    async fn customer_profile(&self, token: Option<&str>) -> Result<CustomerProfile, ApiError>;

    async fn list_customers(&self, token: Option<&str>) -> Result<Vec<Customer>, ApiError>;

    async fn create_merchant(
        &self,
        req: &MerchantCreate,
        token: Option<&str>,
    ) -> Result<Merchant, ApiError>;

    async fn list_merchants(&self, token: Option<&str>) -> Result<Vec<Merchant>, ApiError>;

    async fn update_commission(
        &self,
        merchant_id: i64,
        update: CommissionUpdate,
        token: Option<&str>,
    ) -> Result<Merchant, ApiError>;

    async fn create_transaction(
        &self,
        req: &TransactionCreate,
        token: Option<&str>,
    ) -> Result<Transaction, ApiError>;

    async fn repay_transaction(
        &self,
        req: &TransactionRepay,
        token: Option<&str>,
    ) -> Result<Transaction, ApiError>;

    async fn list_transactions(&self, token: Option<&str>) -> Result<Vec<Transaction>, ApiError>;
}

/// HTTP gateway backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    config: TransportConfig,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn with_auth(builder: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .map(|body| normalize_error_message(&body))
                .unwrap_or_else(|_| GENERIC_ERROR_MESSAGE.to_string());
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl BackendTransport for HttpTransport {
    async fn customer_signup(&self, req: &SignupRequest) -> Result<Customer, ApiError> {
        self.execute(self.http.post(self.url("/customer/signup")).json(req))
            .await
    }

    async fn customer_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let form = [("username", email), ("password", password)];
        self.execute(self.http.post(self.url("/customer/login")).form(&form))
            .await
    }

    async fn customer_profile(&self, token: Option<&str>) -> Result<CustomerProfile, ApiError> {
        self.execute(Self::with_auth(
            self.http.get(self.url("/customer/protected")),
            token,
        ))
        .await
    }

    async fn list_customers(&self, token: Option<&str>) -> Result<Vec<Customer>, ApiError> {
        self.execute(Self::with_auth(self.http.get(self.url("/customer/")), token))
            .await
    }

    async fn create_merchant(
        &self,
        req: &MerchantCreate,
        token: Option<&str>,
    ) -> Result<Merchant, ApiError> {
        self.execute(Self::with_auth(
            self.http.post(self.url("/merchant/")).json(req),
            token,
        ))
        .await
    }

    async fn list_merchants(&self, token: Option<&str>) -> Result<Vec<Merchant>, ApiError> {
        self.execute(Self::with_auth(self.http.get(self.url("/merchant/")), token))
            .await
    }

    async fn update_commission(
        &self,
        merchant_id: i64,
        update: CommissionUpdate,
        token: Option<&str>,
    ) -> Result<Merchant, ApiError> {
        let path = format!("/merchant/{merchant_id}/commision");
        self.execute(Self::with_auth(
            self.http.patch(self.url(&path)).json(&update),
            token,
        ))
        .await
    }

    async fn create_transaction(
        &self,
        req: &TransactionCreate,
        token: Option<&str>,
    ) -> Result<Transaction, ApiError> {
        self.execute(Self::with_auth(
            self.http.post(self.url("/transaction/pay")).json(req),
            token,
        ))
        .await
    }

    async fn repay_transaction(
        &self,
        req: &TransactionRepay,
        token: Option<&str>,
    ) -> Result<Transaction, ApiError> {
        self.execute(Self::with_auth(
            self.http.post(self.url("/transaction/repay")).json(req),
            token,
        ))
        .await
    }

    async fn list_transactions(&self, token: Option<&str>) -> Result<Vec<Transaction>, ApiError> {
        self.execute(Self::with_auth(
            self.http.get(self.url("/transaction/")),
            token,
        ))
        .await
    }
}

/// In-memory gateway backed by `MockBackend`, used for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    backend: Arc<Mutex<MockBackend>>,
}

impl MockTransport {
    pub fn new(backend: MockBackend) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
        }
    }

    fn with_backend<R>(&self, f: impl FnOnce(&mut MockBackend) -> R) -> Result<R, ApiError> {
        let mut lock = self
            .backend
            .lock()
            .map_err(|_| ApiError::Transport("mutex poisoned".to_string()))?;
        Ok(f(&mut lock))
    }

    fn map_rejection(rejection: Rejection) -> ApiError {
        // Rejection bodies go through the same normalizer as HTTP responses.
        ApiError::Backend {
            status: rejection.status,
            message: normalize_error_message(&rejection.body()),
        }
    }
}

#[async_trait]
impl BackendTransport for MockTransport {
    async fn customer_signup(&self, req: &SignupRequest) -> Result<Customer, ApiError> {
        self.with_backend(|backend| backend.customer_signup(req.clone()))?
            .map_err(Self::map_rejection)
    }

    async fn customer_login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        self.with_backend(|backend| backend.customer_login(email, password))?
            .map_err(Self::map_rejection)
    }

    async fn customer_profile(&self, token: Option<&str>) -> Result<CustomerProfile, ApiError> {
        self.with_backend(|backend| backend.customer_profile(token))?
            .map_err(Self::map_rejection)
    }

    async fn list_customers(&self, _token: Option<&str>) -> Result<Vec<Customer>, ApiError> {
        self.with_backend(|backend| backend.list_customers())
    }

    async fn create_merchant(
        &self,
        req: &MerchantCreate,
        _token: Option<&str>,
    ) -> Result<Merchant, ApiError> {
        self.with_backend(|backend| backend.create_merchant(req.clone()))?
            .map_err(Self::map_rejection)
    }

    async fn list_merchants(&self, _token: Option<&str>) -> Result<Vec<Merchant>, ApiError> {
        self.with_backend(|backend| backend.list_merchants())
    }

    async fn update_commission(
        &self,
        merchant_id: i64,
        update: CommissionUpdate,
        _token: Option<&str>,
    ) -> Result<Merchant, ApiError> {
        self.with_backend(|backend| backend.update_commission(merchant_id, update))?
            .map_err(Self::map_rejection)
    }

    async fn create_transaction(
        &self,
        req: &TransactionCreate,
        _token: Option<&str>,
    ) -> Result<Transaction, ApiError> {
        self.with_backend(|backend| backend.create_transaction(*req))?
            .map_err(Self::map_rejection)
    }

    async fn repay_transaction(
        &self,
        req: &TransactionRepay,
        _token: Option<&str>,
    ) -> Result<Transaction, ApiError> {
        self.with_backend(|backend| backend.repay_transaction(*req))?
            .map_err(Self::map_rejection)
    }

    async fn list_transactions(&self, _token: Option<&str>) -> Result<Vec<Transaction>, ApiError> {
        self.with_backend(|backend| backend.list_transactions())
    }
}
