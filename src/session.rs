// src/session.rs
//
// Library session: the single-writer cell holding the current `State`
// snapshot, wired to a store and the coalescing persister.
//
// Reads always see either a fully decoded snapshot or the previous one;
// a decode in progress is never partially exposed. Persistence failures
// never roll back the in-memory state.

use std::sync::{Arc, RwLock};

use crate::decode;
use crate::domain::State;
use crate::error::{AppError, AppResult};
use crate::persistence::{Persister, Store, STATE_FILE};
use crate::views::Snapshot;

pub struct LibrarySession {
    store: Arc<dyn Store>,
    persister: Persister,
    current: RwLock<Option<Arc<State>>>,
}

impl LibrarySession {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            persister: Persister::new(store.clone()),
            store,
            current: RwLock::new(None),
        }
    }

    /// Load the persisted state from the session's store. A missing
    /// document bootstraps a fresh empty state; a decode failure returns
    /// the error and leaves any previously loaded state in place.
    pub async fn load(&self) -> AppResult<Arc<State>> {
        let state = Arc::new(Self::load_from(&*self.store).await?);
        *self.current.write().unwrap() = Some(state.clone());
        Ok(state)
    }

    /// Switch to a different store and load from it. The new store is
    /// validated and its document decoded before anything is swapped, so
    /// a failure leaves the running session on its previous store and
    /// state.
    pub async fn select_store(&mut self, store: Arc<dyn Store>) -> AppResult<Arc<State>> {
        Self::validate_store(&*store).await?;
        let state = Arc::new(Self::load_from(&*store).await?);
        self.persister = Persister::new(store.clone());
        self.store = store;
        *self.current.write().unwrap() = Some(state.clone());
        Ok(state)
    }

    /// A usable store root exists and is a directory.
    pub async fn validate_store(store: &dyn Store) -> AppResult<()> {
        let info = store.get_info(&store.path("")).await.map_err(|e| {
            AppError::StoreSelection(format!("store root is not accessible: {}", e))
        })?;
        if !info.exists {
            return Err(AppError::StoreSelection("store root does not exist".to_string()));
        }
        if !info.is_directory {
            return Err(AppError::StoreSelection("store root is not a directory".to_string()));
        }
        Ok(())
    }

    async fn load_from(store: &dyn Store) -> AppResult<State> {
        let uri = store.path(STATE_FILE);
        let info = store.get_info(&uri).await?;
        if !info.exists {
            log::debug!("no persisted state at {}, starting fresh", uri);
            return Ok(State::new());
        }
        let raw = store.read_file(&uri).await?;
        Ok(decode::decode(&raw)?)
    }

    /// The current snapshot's state, if one has been loaded.
    pub fn current(&self) -> Option<Arc<State>> {
        self.current.read().unwrap().clone()
    }

    /// A fresh indexed snapshot of the current state.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.current().map(Snapshot::new)
    }

    /// Apply a pure mutation to the current state, swap in the result,
    /// and schedule persistence of the new snapshot. Never blocks on I/O.
    pub fn update<F>(&self, f: F) -> AppResult<Arc<State>>
    where
        F: FnOnce(&State) -> AppResult<State>,
    {
        let new = {
            let mut cell = self.current.write().unwrap();
            let old = cell.as_ref().ok_or(AppError::NotLoaded)?;
            let new = Arc::new(f(old.as_ref())?);
            *cell = Some(new.clone());
            new
        };
        self.persister.persist(new.clone());
        Ok(new)
    }

    pub fn is_persisting(&self) -> bool {
        self.persister.is_persisting()
    }
}
