// Firebase REST gateways
//
// Concrete implementations of the services-crate ports against the Firebase
// backend: Identity Toolkit for email/password auth and Firestore for the
// conversation collection. Only the two REST surfaces the client core
// actually calls are covered; everything else belongs to the hosted SDK.

pub mod auth;
pub mod firestore;

pub use auth::FirebaseAuthGateway;
pub use firestore::FirestoreConversationStore;

use std::time::Duration;

/// Shared HTTP client settings for both gateways.
pub(crate) fn http_client(timeout_secs: u64) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
}
