// src/domain/library.rs
use serde::{Deserialize, Serialize};

use crate::domain::ids::LibraryId;

/// One library on a remote server.
///
/// A library's contents are not stored on the library itself: shows and
/// movies carry a back-reference to their owning library, and the snapshot
/// index derives the contents by scanning those references. Libraries are
/// created by the decoder and never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub id: LibraryId,
    pub title: String,
    /// Determines which content kind the library may hold.
    pub kind: LibraryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryKind {
    Movie,
    Show,
}

impl std::fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryKind::Movie => write!(f, "movie"),
            LibraryKind::Show => write!(f, "show"),
        }
    }
}
