// src/views/show.rs
use chrono::{DateTime, Utc};

use crate::domain::{Season, SeasonId, Show, ShowId, ThumbnailState};
use crate::ordering::Titled;
use crate::views::library::LibraryView;
use crate::views::server::ServerView;
use crate::views::video::VideoView;

#[derive(Clone, Copy)]
pub struct ShowView<'a> {
    pub(crate) srv: ServerView<'a>,
    pub(crate) show: &'a Show,
}

impl PartialEq for ShowView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.srv == other.srv && self.show.id == other.show.id
    }
}

impl std::fmt::Debug for ShowView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShowView")
            .field("server", self.srv.id())
            .field("id", &self.show.id)
            .finish()
    }
}

impl<'a> ShowView<'a> {
    pub fn id(&self) -> &'a ShowId {
        &self.show.id
    }

    pub fn title(&self) -> &'a str {
        &self.show.title
    }

    pub fn year(&self) -> u16 {
        self.show.year
    }

    pub fn thumbnail(&self) -> &'a ThumbnailState {
        &self.show.thumbnail
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.show.updated_at
    }

    pub fn library(&self) -> LibraryView<'a> {
        self.srv.expect_library(&self.show.library)
    }

    /// Seasons of this show, ordered by season index.
    pub fn seasons(&self) -> Vec<SeasonView<'a>> {
        self.srv
            .index
            .seasons_by_show
            .get(&self.show.id)
            .map(|ids| ids.iter().map(|id| self.srv.expect_season(id)).collect())
            .unwrap_or_default()
    }

    /// Seasons with at least one downloaded episode.
    pub fn available_seasons(&self) -> Vec<SeasonView<'a>> {
        self.seasons()
            .into_iter()
            .filter(|season| season.is_available())
            .collect()
    }

    /// A show is visible to an offline client iff at least one season is.
    pub fn is_available(&self) -> bool {
        self.seasons().iter().any(|season| season.is_available())
    }

    /// Total duration in milliseconds over all seasons.
    pub fn duration_ms(&self) -> u64 {
        self.seasons().iter().map(|season| season.duration_ms()).sum()
    }
}

impl Titled for ShowView<'_> {
    fn title(&self) -> &str {
        &self.show.title
    }
}

#[derive(Clone, Copy)]
pub struct SeasonView<'a> {
    pub(crate) srv: ServerView<'a>,
    pub(crate) season: &'a Season,
}

impl PartialEq for SeasonView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.srv == other.srv && self.season.id == other.season.id
    }
}

impl std::fmt::Debug for SeasonView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeasonView")
            .field("server", self.srv.id())
            .field("id", &self.season.id)
            .finish()
    }
}

impl<'a> SeasonView<'a> {
    pub fn id(&self) -> &'a SeasonId {
        &self.season.id
    }

    pub fn title(&self) -> &'a str {
        &self.season.title
    }

    pub fn index(&self) -> u32 {
        self.season.index
    }

    pub fn show(&self) -> ShowView<'a> {
        self.srv.expect_show(&self.season.show)
    }

    /// Episodes of this season, ordered by episode index.
    pub fn episodes(&self) -> Vec<VideoView<'a>> {
        self.srv
            .index
            .episodes_by_season
            .get(&self.season.id)
            .map(|ids| ids.iter().map(|id| self.srv.expect_video(id)).collect())
            .unwrap_or_default()
    }

    /// The downloaded subset of this season's episodes, order preserved.
    pub fn available_episodes(&self) -> Vec<VideoView<'a>> {
        self.episodes()
            .into_iter()
            .filter(|episode| episode.is_downloaded())
            .collect()
    }

    /// A season is visible to an offline client iff at least one episode
    /// is fully downloaded.
    pub fn is_available(&self) -> bool {
        self.episodes().iter().any(|episode| episode.is_downloaded())
    }

    /// Total duration in milliseconds over all episodes.
    pub fn duration_ms(&self) -> u64 {
        self.episodes().iter().map(|episode| episode.duration_ms()).sum()
    }
}

impl Titled for SeasonView<'_> {
    fn title(&self) -> &str {
        &self.season.title
    }
}
