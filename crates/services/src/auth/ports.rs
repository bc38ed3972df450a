use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// Domain ID types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl From<String> for UserId {
    fn from(id: String) -> Self {
        UserId(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId(id.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity record returned by the remote authentication service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Provider-defined error code and message, propagated unchanged.
    /// The UI layer owns translating the code into user-facing text.
    #[error("Authentication failed: {code}: {message}")]
    Remote { code: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Remote sign-in/sign-up surface of the authentication backend.
///
/// No local credential validation happens behind this trait; the remote
/// service owns format checks and rejections.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;
}

/// Resolves the currently authenticated user, if any.
///
/// Injected wherever an operation needs "who am I" so call sites never reach
/// for ambient SDK state.
pub trait SessionProvider: Send + Sync {
    fn current_user(&self) -> Option<UserId>;
}
