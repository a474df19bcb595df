// src/domain/collection.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{CollectionId, LibraryId};
use crate::domain::video::ThumbnailState;

/// A curated, ordered collection within one library.
///
/// Items reference movies when the owning library is a movie-library and
/// shows when it is a show-library, so the item ids stay untyped here and
/// are validated against the right mapping at decode time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub title: String,
    pub thumbnail: ThumbnailState,
    pub updated_at: DateTime<Utc>,
    pub library: LibraryId,
    #[serde(default)]
    pub items: Vec<String>,
}
