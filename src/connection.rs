//! Connection Manager
//!
//! Owns the process-wide database connection with an explicit lifecycle:
//! [`open`](ConnectionManager::open) performs the single startup attempt,
//! [`is_open`](ConnectionManager::is_open) reports the result, and `close`
//! releases the connection on exit.
//!
//! A failed startup attempt is captured rather than propagated: the manager
//! enters a degraded state in which every store operation reports
//! [`CatequesisError::NoConnection`] instead of crashing the process. There is
//! no reconnection and no retry.
//!
//! The manager itself implements [`CatequizandoStore`] by delegation, so the
//! Record Gateway receives it like any other store and stays free of
//! degraded-mode logic.

use tracing::{info, warn};

use crate::config::DbConfig;
use crate::error::{CatequesisError, Result};
use crate::record::{Catequizando, CatequizandoRecord};
use crate::store::mysql::MySqlStore;
use crate::store::CatequizandoStore;

/// Holder of the single database connection (or of its absence)
pub struct ConnectionManager<S> {
    store: Option<S>,
    startup_error: Option<String>,
}

impl ConnectionManager<MySqlStore> {
    /// Attempt the single startup connection
    ///
    /// Never fails: a connection error is logged and captured, leaving the
    /// manager degraded.
    pub async fn open(config: &DbConfig) -> Self {
        match MySqlStore::connect(config).await {
            Ok(store) => {
                info!(
                    server = %config.server,
                    database = %config.database,
                    "database connection established"
                );
                Self { store: Some(store), startup_error: None }
            }
            Err(err) => {
                warn!(code = err.error_code(), "database connection failed: {}", err.message());
                Self { store: None, startup_error: Some(err.message()) }
            }
        }
    }
}

impl<S: CatequizandoStore> ConnectionManager<S> {
    /// Wrap an already-open store
    pub fn with_store(store: S) -> Self {
        Self { store: Some(store), startup_error: None }
    }

    /// Build a manager with no backing connection; every operation reports
    /// the no-connection error
    pub fn degraded(message: impl Into<String>) -> Self {
        Self { store: None, startup_error: Some(message.into()) }
    }

    /// Whether the startup attempt produced a live connection
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// The captured startup failure, if any
    #[must_use]
    pub fn startup_error(&self) -> Option<&str> {
        self.startup_error.as_deref()
    }
}

impl<S: CatequizandoStore + Send> CatequizandoStore for ConnectionManager<S> {
    async fn insert(&mut self, record: &CatequizandoRecord) -> Result<i64> {
        match &mut self.store {
            Some(store) => store.insert(record).await,
            None => Err(CatequesisError::NoConnection),
        }
    }

    async fn get_by_id(&mut self, id: i64) -> Result<Option<Catequizando>> {
        match &mut self.store {
            Some(store) => store.get_by_id(id).await,
            None => Err(CatequesisError::NoConnection),
        }
    }

    async fn get_all(&mut self) -> Result<Vec<Catequizando>> {
        match &mut self.store {
            Some(store) => store.get_all().await,
            None => Err(CatequesisError::NoConnection),
        }
    }

    async fn update(&mut self, id: i64, record: &CatequizandoRecord) -> Result<u64> {
        match &mut self.store {
            Some(store) => store.update(id, record).await,
            None => Err(CatequesisError::NoConnection),
        }
    }

    async fn delete(&mut self, id: i64) -> Result<u64> {
        match &mut self.store {
            Some(store) => store.delete(id).await,
            None => Err(CatequesisError::NoConnection),
        }
    }

    async fn close(mut self) -> Result<()> {
        match self.store.take() {
            Some(store) => store.close().await,
            None => Ok(()),
        }
    }
}
