pub mod auth;
pub mod conversations;
pub mod maintenance;
pub mod notifications;
pub mod tiers;

pub use auth::{AuthBridge, UserId};
pub use conversations::ChatService;
pub use maintenance::MaintenanceService;
pub use notifications::NotificationPrompter;
pub use tiers::{Tier, TierLimits};

#[cfg(test)]
mod test_utils;
