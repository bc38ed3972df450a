pub mod ports;

pub use ports::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Deferred, best-effort notification permission request.
///
/// Prompts at most once per process, only while the permission state is
/// still undecided. Failures and unsupported environments are absorbed
/// silently; nothing here may ever block the application flow.
pub struct NotificationPrompter {
    gateway: Arc<dyn NotificationGateway>,
    prompt_delay: Duration,
    prompted: AtomicBool,
}

impl NotificationPrompter {
    pub fn new(gateway: Arc<dyn NotificationGateway>, config: &config::NotificationConfig) -> Self {
        Self {
            gateway,
            prompt_delay: Duration::from_secs(config.prompt_delay_secs),
            prompted: AtomicBool::new(false),
        }
    }

    /// Prompt for permission if the user has not decided yet.
    pub async fn request_if_undecided(&self) {
        if !self.gateway.supported() {
            debug!("Notifications unsupported in this environment");
            return;
        }
        if self.gateway.permission() != PermissionState::Default {
            return;
        }
        if self.prompted.swap(true, Ordering::SeqCst) {
            return;
        }

        tokio::time::sleep(self.prompt_delay).await;

        match self.gateway.request_permission().await {
            Ok(state) => debug!("Notification permission resolved: {state:?}"),
            Err(e) => debug!("Notification permission request failed: {e}"),
        }
    }
}
