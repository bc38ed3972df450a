use serde::{Deserialize, Serialize};

/// Subscription tier of a user account.
///
/// Stored as a field value on the user record; never persisted on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Vip,
}

/// Per-tier content limits for the chat composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Maximum message text length, in characters
    pub max_text_len: usize,
    /// Maximum photo attachments per message
    pub max_photos: usize,
    /// Maximum video attachments per message
    pub max_videos: usize,
    /// Maximum audio clip duration, in seconds
    pub max_audio_secs: u32,
}

impl Tier {
    /// Look up the content limits for this tier.
    ///
    /// The table is exhaustive over the enum, so this never fails.
    pub const fn limits(self) -> TierLimits {
        match self {
            Tier::Basic => TierLimits {
                max_text_len: 100,
                max_photos: 1,
                max_videos: 1,
                max_audio_secs: 60,
            },
            Tier::Vip => TierLimits {
                max_text_len: 5000,
                max_photos: 3,
                max_videos: 2,
                max_audio_secs: 180,
            },
        }
    }
}
