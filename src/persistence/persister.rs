// src/persistence/persister.rs
//
// Single-flight, latest-wins persistence of `State` snapshots.
//
// `persist` never blocks and never queues more than one pending value:
// while a write is in flight, the newest requested snapshot parks in a
// slot and superseded intermediates are dropped. When the in-flight
// write finishes, the loop compares written vs pending by reference and
// immediately starts another write if they differ, until the persisted
// reference equals the latest requested one.

use std::sync::{Arc, Mutex};

use crate::decode;
use crate::domain::State;
use crate::error::AppResult;
use crate::persistence::store::Store;

/// Name of the persisted document inside the storage root.
pub const STATE_FILE: &str = ".mediahub.json";

pub struct Persister {
    store: Arc<dyn Store>,
    inner: Arc<Mutex<PersistInner>>,
}

#[derive(Default)]
struct PersistInner {
    writing: bool,
    pending: Option<Arc<State>>,
}

impl Persister {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            inner: Arc::new(Mutex::new(PersistInner::default())),
        }
    }

    /// True while a write is in flight.
    pub fn is_persisting(&self) -> bool {
        self.inner.lock().unwrap().writing
    }

    /// Request that `state` be persisted. Returns immediately; if a write
    /// is already in flight the request coalesces into the pending slot.
    pub fn persist(&self, state: Arc<State>) {
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.writing {
                inner.pending = Some(state);
                return;
            }
            inner.writing = true;
            // A pending value left behind by a failed run is stale now.
            inner.pending = None;
        }
        let store = self.store.clone();
        let slot = self.inner.clone();
        tokio::spawn(async move {
            write_loop(store, slot, state).await;
        });
    }
}

async fn write_loop(store: Arc<dyn Store>, slot: Arc<Mutex<PersistInner>>, mut current: Arc<State>) {
    loop {
        if let Err(e) = write_snapshot(&*store, &current).await {
            // The in-memory state stays authoritative; the next mutation
            // retries persistence.
            log::warn!("failed to persist state: {}", e);
            slot.lock().unwrap().writing = false;
            return;
        }

        let next = {
            let mut inner = slot.lock().unwrap();
            match inner.pending.take() {
                Some(next) if !Arc::ptr_eq(&next, &current) => next,
                _ => {
                    inner.writing = false;
                    return;
                }
            }
        };
        current = next;
    }
}

async fn write_snapshot(store: &dyn Store, state: &State) -> AppResult<()> {
    // Serialize before touching the old file, so a serialization failure
    // leaves the previous durable copy intact.
    let payload = decode::serialize(state)?;
    let uri = store.path(STATE_FILE);
    store.delete_file(&uri).await?;
    store.write_file(&uri, &payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::sample_state;
    use crate::domain::{PlaybackState, ServerId, VideoId};
    use crate::error::AppError;
    use crate::persistence::store::{MemoryStore, StoreInfo};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Store whose first write blocks until released, recording every
    /// completed write payload.
    #[derive(Default)]
    struct GatedStore {
        inner: MemoryStore,
        gate: Notify,
        block_first: AtomicBool,
        writes: Mutex<Vec<String>>,
    }

    impl GatedStore {
        fn blocking_first() -> Self {
            let store = Self::default();
            store.block_first.store(true, Ordering::SeqCst);
            store
        }

        fn release(&self) {
            self.gate.notify_one();
        }

        fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Store for GatedStore {
        async fn read_file(&self, uri: &str) -> AppResult<String> {
            self.inner.read_file(uri).await
        }

        async fn write_file(&self, uri: &str, contents: &str) -> AppResult<()> {
            if self.block_first.swap(false, Ordering::SeqCst) {
                self.gate.notified().await;
            }
            self.writes.lock().unwrap().push(contents.to_string());
            self.inner.write_file(uri, contents).await
        }

        async fn delete_file(&self, uri: &str) -> AppResult<()> {
            self.inner.delete_file(uri).await
        }

        async fn get_info(&self, uri: &str) -> AppResult<StoreInfo> {
            self.inner.get_info(uri).await
        }

        fn path(&self, relative: &str) -> String {
            self.inner.path(relative)
        }
    }

    /// Store that fails a configurable number of writes before working.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        failures_left: AtomicUsize,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl Store for FlakyStore {
        async fn read_file(&self, uri: &str) -> AppResult<String> {
            self.inner.read_file(uri).await
        }

        async fn write_file(&self, uri: &str, contents: &str) -> AppResult<()> {
            if self.failures_left.load(Ordering::SeqCst) > 0 {
                self.failures_left.fetch_sub(1, Ordering::SeqCst);
                return Err(AppError::Persistence("disk on fire".to_string()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.write_file(uri, contents).await
        }

        async fn delete_file(&self, uri: &str) -> AppResult<()> {
            self.inner.delete_file(uri).await
        }

        async fn get_info(&self, uri: &str) -> AppResult<StoreInfo> {
            self.inner.get_info(uri).await
        }

        fn path(&self, relative: &str) -> String {
            self.inner.path(relative)
        }
    }

    async fn settle(persister: &Persister) {
        while persister.is_persisting() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
    }

    fn mutated(state: &State, position: u64) -> Arc<State> {
        Arc::new(
            state
                .with_play_position(&ServerId::from("srv"), &VideoId::from("ep1"), position)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_writes_latest_state() {
        let store = Arc::new(GatedStore::default());
        let persister = Persister::new(store.clone());
        let state = Arc::new(sample_state());

        persister.persist(state.clone());
        settle(&persister).await;

        let writes = store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0], decode::serialize(&state).unwrap());
        assert!(store.inner.contents(STATE_FILE).is_some());
    }

    #[tokio::test]
    async fn test_rapid_mutations_coalesce_into_one_follow_up_write() {
        let store = Arc::new(GatedStore::blocking_first());
        let persister = Persister::new(store.clone());
        let base = sample_state();

        let first = Arc::new(base.clone());
        let second = mutated(&base, 1_000);
        let third = mutated(&base, 2_000);

        persister.persist(first);
        // Give the write task a chance to enter the gated write call.
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        persister.persist(second);
        persister.persist(third.clone());

        store.release();
        settle(&persister).await;

        // Exactly one follow-up write, containing the third state.
        let writes = store.writes();
        assert_eq!(writes.len(), 2);
        assert_eq!(writes[1], decode::serialize(&third).unwrap());
    }

    #[tokio::test]
    async fn test_persisting_same_reference_settles_without_rewrite() {
        let store = Arc::new(GatedStore::blocking_first());
        let persister = Persister::new(store.clone());
        let state = Arc::new(sample_state());

        persister.persist(state.clone());
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        // The same reference lands in the pending slot; no second write.
        persister.persist(state);

        store.release();
        settle(&persister).await;
        assert_eq!(store.writes().len(), 1);
    }

    #[tokio::test]
    async fn test_write_failure_clears_flag_and_next_mutation_retries() {
        let store = Arc::new(FlakyStore::default());
        store.failures_left.store(1, Ordering::SeqCst);
        let persister = Persister::new(store.clone());
        let base = sample_state();

        persister.persist(Arc::new(base.clone()));
        settle(&persister).await;
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);
        assert!(!persister.is_persisting());

        // A later mutation persists successfully.
        let next = Arc::new(
            base.with_playback_state(
                &ServerId::from("srv"),
                &VideoId::from("ep1"),
                PlaybackState::Played,
            )
            .unwrap(),
        );
        persister.persist(next.clone());
        settle(&persister).await;
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
        assert_eq!(
            store.inner.contents(STATE_FILE).unwrap(),
            decode::serialize(&next).unwrap()
        );
    }
}
