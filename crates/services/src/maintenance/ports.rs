use async_trait::async_trait;
use std::sync::Arc;

/// Named response caches owned by the host environment (the browser's
/// Cache API behind a binding, a fake in tests).
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn names(&self) -> anyhow::Result<Vec<String>>;

    /// Delete a named cache; `false` means no cache by that name existed.
    async fn delete(&self, name: &str) -> anyhow::Result<bool>;
}

/// One active service-worker registration.
#[async_trait]
pub trait WorkerRegistration: Send + Sync {
    fn scope(&self) -> String;

    /// Unregister; `false` means the registration was already gone.
    async fn unregister(&self) -> anyhow::Result<bool>;
}

/// The host's service-worker registry.
#[async_trait]
pub trait WorkerRegistry: Send + Sync {
    async fn registrations(&self) -> anyhow::Result<Vec<Arc<dyn WorkerRegistration>>>;
}

/// A key-value store the host persists across loads (localStorage or
/// sessionStorage).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn clear(&self) -> anyhow::Result<()>;
}

/// Handle on the hosting page itself.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// Full, cache-bypassing reload.
    async fn force_reload(&self) -> anyhow::Result<()>;
}
