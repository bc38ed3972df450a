use serde::Deserialize;

/// Top-level configuration for the client core.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub maintenance: MaintenanceConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Firebase project settings shared by the auth and Firestore gateways.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project
    #[serde(default)]
    pub api_key: String,
    /// Firebase project id (e.g. "agarch-ar")
    #[serde(default)]
    pub project_id: String,
    /// Override for the Identity Toolkit base URL (emulator/testing)
    #[serde(default)]
    pub auth_base_url: Option<String>,
    /// Override for the Firestore base URL (emulator/testing)
    #[serde(default)]
    pub firestore_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Firestore collection the conversation documents live in
    #[serde(default = "default_conversations_collection")]
    pub conversations_collection: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            conversations_collection: default_conversations_collection(),
        }
    }
}

fn default_conversations_collection() -> String {
    "conversations".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MaintenanceConfig {
    /// Delay between finishing teardown and forcing the page reload.
    /// Gives in-flight teardown a chance to settle; teardown is never awaited.
    #[serde(default = "default_reload_delay_secs")]
    pub reload_delay_secs: u64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            reload_delay_secs: default_reload_delay_secs(),
        }
    }
}

fn default_reload_delay_secs() -> u64 {
    2
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    /// Delay before prompting for notification permission after startup
    #[serde(default = "default_prompt_delay_secs")]
    pub prompt_delay_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            prompt_delay_secs: default_prompt_delay_secs(),
        }
    }
}

fn default_prompt_delay_secs() -> u64 {
    1
}

/// Logging Configuration
///
/// Carried as data; the host application installs the subscriber.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}
