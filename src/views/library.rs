// src/views/library.rs
use crate::domain::{Library, LibraryId, LibraryKind};
use crate::ordering::Titled;
use crate::views::collection::CollectionView;
use crate::views::server::ServerView;
use crate::views::show::ShowView;
use crate::views::video::VideoView;

/// View over one library. Contents and collections are derived from the
/// snapshot index, never stored on the library itself.
#[derive(Clone, Copy)]
pub struct LibraryView<'a> {
    pub(crate) srv: ServerView<'a>,
    pub(crate) library: &'a Library,
}

impl PartialEq for LibraryView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.srv == other.srv && self.library.id == other.library.id
    }
}

impl std::fmt::Debug for LibraryView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryView")
            .field("server", self.srv.id())
            .field("id", &self.library.id)
            .finish()
    }
}

impl<'a> LibraryView<'a> {
    pub fn id(&self) -> &'a LibraryId {
        &self.library.id
    }

    pub fn title(&self) -> &'a str {
        &self.library.title
    }

    pub fn kind(&self) -> LibraryKind {
        self.library.kind
    }

    /// Shows owned by this library, by normalized title. Empty for a
    /// movie-library.
    pub fn shows(&self) -> Vec<ShowView<'a>> {
        self.srv
            .index
            .shows_by_library
            .get(&self.library.id)
            .map(|ids| ids.iter().map(|id| self.srv.expect_show(id)).collect())
            .unwrap_or_default()
    }

    /// Movies owned by this library, by normalized title. Empty for a
    /// show-library.
    pub fn movies(&self) -> Vec<VideoView<'a>> {
        self.srv
            .index
            .movies_by_library
            .get(&self.library.id)
            .map(|ids| ids.iter().map(|id| self.srv.expect_video(id)).collect())
            .unwrap_or_default()
    }

    pub fn collections(&self) -> Vec<CollectionView<'a>> {
        self.srv
            .index
            .collections_by_library
            .get(&self.library.id)
            .map(|ids| ids.iter().map(|id| self.srv.expect_collection(id)).collect())
            .unwrap_or_default()
    }

    /// Shows with at least one available season.
    pub fn available_shows(&self) -> Vec<ShowView<'a>> {
        self.shows()
            .into_iter()
            .filter(|show| show.is_available())
            .collect()
    }

    /// Movies that are fully downloaded locally.
    pub fn available_movies(&self) -> Vec<VideoView<'a>> {
        self.movies()
            .into_iter()
            .filter(|movie| movie.is_downloaded())
            .collect()
    }

    /// Collections that still contain at least one available item.
    pub fn available_collections(&self) -> Vec<CollectionView<'a>> {
        self.collections()
            .into_iter()
            .filter(|collection| collection.is_available())
            .collect()
    }

    /// A library is visible to an offline client iff it has at least one
    /// available show or movie.
    pub fn is_available(&self) -> bool {
        match self.library.kind {
            LibraryKind::Show => self.shows().iter().any(|show| show.is_available()),
            LibraryKind::Movie => self.movies().iter().any(|movie| movie.is_downloaded()),
        }
    }
}

impl Titled for LibraryView<'_> {
    fn title(&self) -> &str {
        &self.library.title
    }
}
