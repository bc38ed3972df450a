use async_trait::async_trait;

/// Host notification permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// The user has not been asked yet
    Default,
    Granted,
    Denied,
}

/// The host's notification facility. Treated as optional: an unsupported
/// environment is a normal condition, not an error.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    fn supported(&self) -> bool;

    fn permission(&self) -> PermissionState;

    /// Prompt the user; resolves with the state they chose.
    async fn request_permission(&self) -> anyhow::Result<PermissionState>;
}
