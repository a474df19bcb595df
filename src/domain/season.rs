// src/domain/season.rs
use serde::{Deserialize, Serialize};

use crate::domain::ids::{SeasonId, ShowId};

/// One season of a show. Episodes are derived by scanning the server's
/// videos mapping for episodes referencing this season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub title: String,
    /// Ordinal within the show.
    pub index: u32,
    pub show: ShowId,
}
