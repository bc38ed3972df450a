use async_trait::async_trait;
use serde::Deserialize;

use config::FirebaseConfig;
use services::auth::{AuthError, AuthGateway, AuthUser, UserId};

const DEFAULT_AUTH_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Email/password gateway over the Identity Toolkit REST API.
pub struct FirebaseAuthGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityResponse {
    local_id: String,
    email: String,
    id_token: String,
    refresh_token: String,
}

impl FirebaseAuthGateway {
    pub fn new(config: &FirebaseConfig) -> Result<Self, AuthError> {
        let client = crate::http_client(REQUEST_TIMEOUT_SECS)
            .map_err(|e| AuthError::InternalError(format!("Failed to build HTTP client: {e}")))?;

        let base_url = config
            .auth_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AUTH_BASE_URL.to_string());

        tracing::info!(base_url = %base_url, "Identity Toolkit gateway initialized");

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    async fn post_credentials(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AuthError> {
        let url = format!("{}/accounts:{}?key={}", self.base_url, endpoint, self.api_key);
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "returnSecureToken": true,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::remote_error(response).await);
        }

        let identity: IdentityResponse = response
            .json()
            .await
            .map_err(|e| AuthError::InternalError(format!("Malformed identity response: {e}")))?;

        Ok(AuthUser {
            id: UserId(identity.local_id),
            email: identity.email,
            id_token: identity.id_token,
            refresh_token: identity.refresh_token,
        })
    }

    /// Turn a non-success response into the provider's code/message pair.
    ///
    /// Identity Toolkit carries the code in `error.message` (for example
    /// `EMAIL_NOT_FOUND` or `INVALID_PASSWORD`).
    async fn remote_error(response: reqwest::Response) -> AuthError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let parsed: Option<serde_json::Value> = serde_json::from_str(&body).ok();
        let code = parsed
            .as_ref()
            .and_then(|v| v["error"]["message"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));
        let message = parsed
            .as_ref()
            .and_then(|v| v["error"]["errors"][0]["message"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| code.clone());

        AuthError::Remote { code, message }
    }
}

#[async_trait]
impl AuthGateway for FirebaseAuthGateway {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        self.post_credentials("signInWithPassword", email, password)
            .await
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        self.post_credentials("signUp", email, password).await
    }
}
