pub mod ports;

pub use ports::*;

use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Best-effort teardown of host-level caches and service-worker state.
///
/// Every step is independently best-effort: a failure is logged and the
/// remaining steps still run. The only ordering guarantee is that the forced
/// page reload happens last, after a fixed delay.
pub struct MaintenanceService {
    caches: Arc<dyn CacheStore>,
    workers: Arc<dyn WorkerRegistry>,
    local_storage: Arc<dyn KeyValueStore>,
    session_storage: Arc<dyn KeyValueStore>,
    page: Arc<dyn PageHandle>,
    reload_delay: Duration,
}

impl MaintenanceService {
    pub fn new(
        caches: Arc<dyn CacheStore>,
        workers: Arc<dyn WorkerRegistry>,
        local_storage: Arc<dyn KeyValueStore>,
        session_storage: Arc<dyn KeyValueStore>,
        page: Arc<dyn PageHandle>,
        config: &config::MaintenanceConfig,
    ) -> Self {
        Self {
            caches,
            workers,
            local_storage,
            session_storage,
            page,
            reload_delay: Duration::from_secs(config.reload_delay_secs),
        }
    }

    /// Full reset: unregister workers, drop caches, clear storage, then
    /// force a reload after the configured delay. Never fails.
    pub async fn full_reset(&self) {
        info!("Starting full cache and service-worker reset");

        self.unregister_all_workers().await;
        self.delete_all_caches().await;

        if let Err(e) = self.local_storage.clear().await {
            warn!("Failed to clear local storage: {e}");
        }
        if let Err(e) = self.session_storage.clear().await {
            warn!("Failed to clear session storage: {e}");
        }

        // Give in-flight teardown a chance to settle; there is no explicit
        // wait for completion, only the timer.
        tokio::time::sleep(self.reload_delay).await;

        info!("Forcing full page reload");
        if let Err(e) = self.page.force_reload().await {
            warn!("Forced reload failed: {e}");
        }
    }

    /// One-time startup cleanup: fire-and-forget unregistration of every
    /// existing service-worker registration. All errors are swallowed.
    pub fn startup_cleanup(&self) -> JoinHandle<()> {
        let workers = Arc::clone(&self.workers);
        tokio::spawn(async move {
            let registrations = match workers.registrations().await {
                Ok(registrations) => registrations,
                Err(e) => {
                    debug!("Service-worker cleanup skipped: {e}");
                    return;
                }
            };
            for registration in registrations {
                match registration.unregister().await {
                    Ok(_) => debug!("Cleaned up service worker: {}", registration.scope()),
                    Err(e) => debug!(
                        "Failed to clean up service worker {}: {e}",
                        registration.scope()
                    ),
                }
            }
        })
    }

    async fn unregister_all_workers(&self) {
        let registrations = match self.workers.registrations().await {
            Ok(registrations) => registrations,
            Err(e) => {
                warn!("Could not enumerate service-worker registrations: {e}");
                return;
            }
        };

        for registration in registrations {
            match registration.unregister().await {
                Ok(true) => info!("Unregistered service worker: {}", registration.scope()),
                Ok(false) => debug!("Service worker already gone: {}", registration.scope()),
                Err(e) => warn!(
                    "Failed to unregister service worker {}: {e}",
                    registration.scope()
                ),
            }
        }
    }

    async fn delete_all_caches(&self) {
        let names = match self.caches.names().await {
            Ok(names) => names,
            Err(e) => {
                warn!("Could not enumerate caches: {e}");
                return;
            }
        };

        // All deletions are issued together; the aggregate is awaited and
        // each per-item outcome is logged on its own.
        let deletions = names.iter().map(|name| {
            let caches = Arc::clone(&self.caches);
            async move { (name.clone(), caches.delete(name).await) }
        });

        for (name, result) in join_all(deletions).await {
            match result {
                Ok(true) => info!("Deleted cache: {name}"),
                Ok(false) => debug!("Cache already gone: {name}"),
                Err(e) => warn!("Failed to delete cache {name}: {e}"),
            }
        }

        info!("Cache teardown complete");
    }
}

/// A worker that removes itself upon activation: unregister the given
/// registration immediately, best-effort.
pub async fn unregister_self(registration: Arc<dyn WorkerRegistration>) {
    match registration.unregister().await {
        Ok(_) => debug!("Service worker unregistered itself: {}", registration.scope()),
        Err(e) => debug!(
            "Self-unregistration failed for {}: {e}",
            registration.scope()
        ),
    }
}
