use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::editor::Submission;
use shared::models::{
    ErrorResponse, LoginRequest, LoginResponse, NewTransaction, RegisterRequest, Transaction,
    TransactionId, TransactionUpdate,
};
use tracing::{debug, error, info, warn};
use yew::Callback;

use crate::config::ClientConfig;
use crate::session::SessionStore;

/// Failures surfaced by [`ExpenseClient`].
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),
    /// The backend rejected the session. The session has already been
    /// cleared and the app sent to the auth view.
    #[error("not authorized")]
    Unauthorized,
    /// Any other non-2xx response.
    #[error("request failed with {status}: {message}")]
    Status { status: StatusCode, message: String },
    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// The owning view went away before the response arrived.
    #[error("request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Status { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            Self::Decode(_) | Self::Cancelled => None,
        }
    }

    /// Message to show inline: the server's own wording when it sent one,
    /// `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Client for the expense backend.
///
/// Every call is a single attempt: no retries, no backoff. Calls that need
/// a session carry it as a bearer token; a 401 on those clears the session
/// and fires `on_unauthorized`.
#[derive(Clone)]
pub struct ExpenseClient {
    base_url: String,
    client: Client,
    session: SessionStore,
    on_unauthorized: Callback<()>,
}

impl std::fmt::Debug for ExpenseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ExpenseClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && self.session == other.session
            && self.on_unauthorized == other.on_unauthorized
    }
}

impl ExpenseClient {
    pub fn new(config: &ClientConfig, session: SessionStore, on_unauthorized: Callback<()>) -> Self {
        Self {
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            client: Client::new(),
            session,
            on_unauthorized,
        }
    }

    #[cfg(test)]
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn build<B>(&self, method: Method, path: &str, body: Option<&B>) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let request = self.client.request(method, self.api_url(path));
        match body {
            Some(body) => request.json(body),
            None => request,
        }
    }

    /// Sends an authenticated request and returns the raw 2xx response.
    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.build(method.clone(), path, body);
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        debug!(%method, path, "sending request");
        let response = request.send().await.map_err(|err| {
            error!(%method, path, error = %err, "request failed to send");
            ApiError::Network(err)
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(%method, path, "backend rejected the session");
            self.session.clear();
            self.on_unauthorized.emit(());
            return Err(ApiError::Unauthorized);
        }

        Self::ensure_success(response).await
    }

    /// Sends a request that must not carry the session, such as login.
    async fn request_public<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .build(method, path, Some(body))
            .send()
            .await
            .map_err(ApiError::Network)?;
        Self::ensure_success(response).await
    }

    async fn ensure_success(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = ErrorResponse::describe(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or_default().to_string());
        Err(ApiError::Status { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response
            .text()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| {
            error!(error = %err, "response body did not match the expected shape");
            ApiError::Decode(err.to_string())
        })
    }

    /// Authenticates and starts a session from the response.
    pub async fn login(&self, payload: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response = self
            .request_public(Method::POST, "users/login", payload)
            .await?;
        let body: LoginResponse = Self::decode(response).await?;
        self.session
            .set_session(Some(body.token.clone()), Some(body.username.clone()));
        Ok(body)
    }

    /// Registers an account. Returns whatever text the backend answered with.
    pub async fn register(&self, payload: &RegisterRequest) -> Result<String, ApiError> {
        let response = self
            .request_public(Method::POST, "users/register", payload)
            .await?;
        info!(username = %payload.username, "account registered");
        response
            .text()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Ends the session locally. The backend keeps no session state to
    /// revoke.
    pub fn logout(&self) {
        self.session.clear();
    }

    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .request::<()>(Method::GET, "expense/all", None)
            .await?;
        Self::decode(response).await
    }

    pub async fn create_transaction(&self, payload: &NewTransaction) -> Result<(), ApiError> {
        self.request(Method::POST, "expense/create", Some(payload))
            .await?;
        Ok(())
    }

    pub async fn update_transaction(
        &self,
        id: TransactionId,
        payload: &TransactionUpdate,
    ) -> Result<(), ApiError> {
        self.request(Method::PUT, &format!("expense/update/{id}"), Some(payload))
            .await?;
        Ok(())
    }

    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), ApiError> {
        self.request::<()>(Method::DELETE, &format!("expense/delete/{id}"), None)
            .await?;
        Ok(())
    }

    /// Sends whatever the editor produced.
    pub async fn submit(&self, submission: &Submission) -> Result<(), ApiError> {
        match submission {
            Submission::Create(payload) => self.create_transaction(payload).await,
            Submission::Update(id, payload) => self.update_transaction(*id, payload).await,
        }
    }
}
