pub mod ports;

pub use ports::*;

use std::sync::Arc;
use tracing::{debug, error};

/// Thin bridge over the remote authentication service.
///
/// Forwards credentials, logs the outcome, and re-throws remote failures
/// unchanged. Interpreting provider error codes into user-facing text is the
/// caller's job.
pub struct AuthBridge {
    gateway: Arc<dyn AuthGateway>,
}

impl AuthBridge {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self { gateway }
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        match self.gateway.sign_in(email, password).await {
            Ok(user) => {
                debug!("Signed in user: {}", user.id);
                Ok(user)
            }
            Err(e) => {
                error!("Sign-in failed for {email}: {e}");
                Err(e)
            }
        }
    }

    /// Create an account with email and password.
    pub async fn signup(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        match self.gateway.sign_up(email, password).await {
            Ok(user) => {
                debug!("Created account for user: {}", user.id);
                Ok(user)
            }
            Err(e) => {
                error!("Sign-up failed for {email}: {e}");
                Err(e)
            }
        }
    }
}
