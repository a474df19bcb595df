// src/domain/show.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{LibraryId, ShowId};
use crate::domain::video::ThumbnailState;

/// A television show. Seasons are derived by scanning the server's seasons
/// mapping for entries referencing this show, not stored inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: ShowId,
    pub title: String,
    pub year: u16,
    pub thumbnail: ThumbnailState,
    pub updated_at: DateTime<Utc>,
    /// Owning library; must be a show-library (checked at decode time).
    pub library: LibraryId,
}
