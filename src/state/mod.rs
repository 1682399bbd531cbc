use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{config::AppConfig, dao::league_store::LeagueStore, error::ServiceError};

pub type SharedState = Arc<AppState>;

/// Central application state: configuration and the installed league store.
pub struct AppState {
    config: AppConfig,
    league_store: RwLock<Option<Arc<dyn LeagueStore>>>,
    degraded: watch::Sender<bool>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a storage backend is installed.
    pub fn new(config: AppConfig) -> SharedState {
        let (degraded_tx, _rx) = watch::channel(true);
        Arc::new(Self {
            config,
            league_store: RwLock::new(None),
            degraded: degraded_tx,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current league store, if one is installed.
    pub async fn league_store(&self) -> Option<Arc<dyn LeagueStore>> {
        let guard = self.league_store.read().await;
        guard.as_ref().cloned()
    }

    /// Like [`Self::league_store`], failing with [`ServiceError::Degraded`] when
    /// storage is unavailable.
    pub async fn require_league_store(&self) -> Result<Arc<dyn LeagueStore>, ServiceError> {
        if self.is_degraded() {
            return Err(ServiceError::Degraded);
        }
        self.league_store().await.ok_or(ServiceError::Degraded)
    }

    /// Install a new league store implementation and leave degraded mode.
    pub async fn set_league_store(&self, store: Arc<dyn LeagueStore>) {
        {
            let mut guard = self.league_store.write().await;
            *guard = Some(store);
        }
        self.update_degraded(false);
    }

    /// Remove the current league store and enter degraded mode.
    pub async fn clear_league_store(&self) {
        {
            let mut guard = self.league_store.write().await;
            guard.take();
        }
        self.update_degraded(true);
    }

    /// Current degraded flag.
    pub fn is_degraded(&self) -> bool {
        *self.degraded.borrow()
    }

    /// Subscribe to degraded mode updates.
    pub fn degraded_watcher(&self) -> watch::Receiver<bool> {
        self.degraded.subscribe()
    }

    /// Update the degraded flag, notifying watchers only when it changes.
    pub fn update_degraded(&self, value: bool) {
        self.degraded.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value;
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dao::league_store::memory::MemoryLeagueStore;

    #[tokio::test]
    async fn starts_degraded_until_a_store_is_installed() {
        let state = AppState::new(AppConfig::default());
        assert!(state.is_degraded());
        assert!(matches!(
            state.require_league_store().await,
            Err(ServiceError::Degraded)
        ));

        state
            .set_league_store(Arc::new(MemoryLeagueStore::new()))
            .await;
        assert!(!state.is_degraded());
        assert!(state.require_league_store().await.is_ok());

        state.clear_league_store().await;
        assert!(state.is_degraded());
        assert!(state.league_store().await.is_none());
    }

    #[tokio::test]
    async fn watchers_see_degraded_changes() {
        let state = AppState::new(AppConfig::default());
        let mut watcher = state.degraded_watcher();

        state
            .set_league_store(Arc::new(MemoryLeagueStore::new()))
            .await;
        watcher.changed().await.unwrap();
        assert!(!*watcher.borrow_and_update());

        state.update_degraded(true);
        watcher.changed().await.unwrap();
        assert!(*watcher.borrow_and_update());
    }
}
