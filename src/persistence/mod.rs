// src/persistence/mod.rs

pub mod persister;
pub mod store;

pub use persister::{Persister, STATE_FILE};
pub use store::{FsStore, MemoryStore, Store, StoreInfo};
