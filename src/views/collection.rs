// src/views/collection.rs
use chrono::{DateTime, Utc};

use crate::domain::{
    Collection, CollectionId, LibraryKind, Playlist, PlaylistId, ShowId, ThumbnailState, VideoId,
};
use crate::ordering::Titled;
use crate::views::library::LibraryView;
use crate::views::server::ServerView;
use crate::views::show::ShowView;
use crate::views::video::VideoView;

#[derive(Clone, Copy)]
pub struct CollectionView<'a> {
    pub(crate) srv: ServerView<'a>,
    pub(crate) collection: &'a Collection,
}

impl PartialEq for CollectionView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.srv == other.srv && self.collection.id == other.collection.id
    }
}

impl std::fmt::Debug for CollectionView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionView")
            .field("server", self.srv.id())
            .field("id", &self.collection.id)
            .finish()
    }
}

/// One resolved item of a collection: a show in a show-library collection,
/// a movie in a movie-library one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollectionItemView<'a> {
    Show(ShowView<'a>),
    Movie(VideoView<'a>),
}

impl<'a> CollectionItemView<'a> {
    pub fn title(&self) -> &'a str {
        match self {
            CollectionItemView::Show(show) => show.title(),
            CollectionItemView::Movie(movie) => movie.title(),
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            CollectionItemView::Show(show) => show.is_available(),
            CollectionItemView::Movie(movie) => movie.is_downloaded(),
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            CollectionItemView::Show(show) => show.duration_ms(),
            CollectionItemView::Movie(movie) => movie.duration_ms(),
        }
    }
}

impl<'a> CollectionView<'a> {
    pub fn id(&self) -> &'a CollectionId {
        &self.collection.id
    }

    pub fn title(&self) -> &'a str {
        &self.collection.title
    }

    pub fn thumbnail(&self) -> &'a ThumbnailState {
        &self.collection.thumbnail
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.collection.updated_at
    }

    pub fn library(&self) -> LibraryView<'a> {
        self.srv.expect_library(&self.collection.library)
    }

    /// Items in their curated order. Item ids were validated against the
    /// owning library's kind at decode time.
    pub fn items(&self) -> Vec<CollectionItemView<'a>> {
        let kind = self.library().kind();
        self.collection
            .items
            .iter()
            .map(|item| match kind {
                LibraryKind::Show => {
                    CollectionItemView::Show(self.srv.expect_show(&ShowId::new(item.clone())))
                }
                LibraryKind::Movie => {
                    CollectionItemView::Movie(self.srv.expect_video(&VideoId::new(item.clone())))
                }
            })
            .collect()
    }

    /// The available subset of items, curated order preserved.
    pub fn available_items(&self) -> Vec<CollectionItemView<'a>> {
        self.items()
            .into_iter()
            .filter(|item| item.is_available())
            .collect()
    }

    /// A collection is visible to an offline client iff at least one item
    /// is available.
    pub fn is_available(&self) -> bool {
        self.items().iter().any(|item| item.is_available())
    }

    pub fn duration_ms(&self) -> u64 {
        self.items().iter().map(|item| item.duration_ms()).sum()
    }
}

impl Titled for CollectionView<'_> {
    fn title(&self) -> &str {
        &self.collection.title
    }
}

#[derive(Clone, Copy)]
pub struct PlaylistView<'a> {
    pub(crate) srv: ServerView<'a>,
    pub(crate) playlist: &'a Playlist,
}

impl PartialEq for PlaylistView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.srv == other.srv && self.playlist.id == other.playlist.id
    }
}

impl std::fmt::Debug for PlaylistView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaylistView")
            .field("server", self.srv.id())
            .field("id", &self.playlist.id)
            .finish()
    }
}

impl<'a> PlaylistView<'a> {
    pub fn id(&self) -> &'a PlaylistId {
        &self.playlist.id
    }

    pub fn title(&self) -> &'a str {
        &self.playlist.title
    }

    /// Videos in stored order. Playlists are never re-sorted by default.
    pub fn videos(&self) -> Vec<VideoView<'a>> {
        self.playlist
            .videos
            .iter()
            .map(|id| self.srv.expect_video(id))
            .collect()
    }

    /// The downloaded subset, stored order preserved.
    pub fn available_videos(&self) -> Vec<VideoView<'a>> {
        self.videos()
            .into_iter()
            .filter(|video| video.is_downloaded())
            .collect()
    }

    /// A playlist is visible to an offline client iff at least one of its
    /// videos is downloaded.
    pub fn is_available(&self) -> bool {
        self.videos().iter().any(|video| video.is_downloaded())
    }

    pub fn duration_ms(&self) -> u64 {
        self.videos().iter().map(|video| video.duration_ms()).sum()
    }
}

impl Titled for PlaylistView<'_> {
    fn title(&self) -> &str {
        &self.playlist.title
    }
}
