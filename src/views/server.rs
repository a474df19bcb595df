// src/views/server.rs
use crate::domain::{
    CollectionId, LibraryId, PlaylistId, SeasonId, ServerId, ServerState, ShowId, State, VideoId,
};
use crate::ordering::title_sort_key;
use crate::views::collection::{CollectionView, PlaylistView};
use crate::views::library::LibraryView;
use crate::views::show::{SeasonView, ShowView};
use crate::views::snapshot::ServerIndex;
use crate::views::video::VideoView;

/// Read-only view over one server within a snapshot. Copies are cheap;
/// equality compares server identity within the snapshot.
#[derive(Clone, Copy)]
pub struct ServerView<'a> {
    pub(crate) state: &'a State,
    pub(crate) server: &'a ServerState,
    pub(crate) index: &'a ServerIndex,
}

impl PartialEq for ServerView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.server.id == other.server.id
    }
}

impl std::fmt::Debug for ServerView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerView").field("id", &self.server.id).finish()
    }
}

impl<'a> ServerView<'a> {
    pub fn id(&self) -> &'a ServerId {
        &self.server.id
    }

    pub fn name(&self) -> &'a str {
        &self.server.name
    }

    pub fn token(&self) -> Option<&'a str> {
        self.server.token.as_deref()
    }

    /// All libraries, ordered by normalized title.
    pub fn libraries(&self) -> Vec<LibraryView<'a>> {
        let mut libraries: Vec<LibraryView<'a>> = self
            .server
            .libraries
            .values()
            .map(|library| LibraryView { srv: *self, library })
            .collect();
        libraries.sort_by_key(|library| {
            (title_sort_key(library.title()), library.id().clone())
        });
        libraries
    }

    /// Libraries with at least one locally available item.
    pub fn available_libraries(&self) -> Vec<LibraryView<'a>> {
        self.libraries()
            .into_iter()
            .filter(|library| library.is_available())
            .collect()
    }

    /// All playlists, ordered by normalized title. Videos inside each
    /// playlist keep their stored order.
    pub fn playlists(&self) -> Vec<PlaylistView<'a>> {
        let mut playlists: Vec<PlaylistView<'a>> = self
            .server
            .playlists
            .values()
            .map(|playlist| PlaylistView { srv: *self, playlist })
            .collect();
        playlists.sort_by_key(|playlist| {
            (title_sort_key(playlist.title()), playlist.id().clone())
        });
        playlists
    }

    /// Playlists with at least one downloaded video.
    pub fn available_playlists(&self) -> Vec<PlaylistView<'a>> {
        self.playlists()
            .into_iter()
            .filter(|playlist| playlist.is_available())
            .collect()
    }

    pub fn library(&self, id: &LibraryId) -> Option<LibraryView<'a>> {
        self.server
            .libraries
            .get(id)
            .map(|library| LibraryView { srv: *self, library })
    }

    pub fn show(&self, id: &ShowId) -> Option<ShowView<'a>> {
        self.server.shows.get(id).map(|show| ShowView { srv: *self, show })
    }

    pub fn season(&self, id: &SeasonId) -> Option<SeasonView<'a>> {
        self.server
            .seasons
            .get(id)
            .map(|season| SeasonView { srv: *self, season })
    }

    pub fn video(&self, id: &VideoId) -> Option<VideoView<'a>> {
        self.server.videos.get(id).map(|video| VideoView { srv: *self, video })
    }

    pub fn collection(&self, id: &CollectionId) -> Option<CollectionView<'a>> {
        self.server
            .collections
            .get(id)
            .map(|collection| CollectionView { srv: *self, collection })
    }

    pub fn playlist(&self, id: &PlaylistId) -> Option<PlaylistView<'a>> {
        self.server
            .playlists
            .get(id)
            .map(|playlist| PlaylistView { srv: *self, playlist })
    }

    // Resolvers for ids produced by the snapshot index or validated at
    // decode time. A miss here is a snapshot-construction bug and crashes
    // loudly rather than being silently skipped.

    pub(crate) fn expect_library(&self, id: &LibraryId) -> LibraryView<'a> {
        self.library(id).unwrap_or_else(|| {
            panic!("snapshot references unknown library {} on server {}", id, self.server.id)
        })
    }

    pub(crate) fn expect_show(&self, id: &ShowId) -> ShowView<'a> {
        self.show(id).unwrap_or_else(|| {
            panic!("snapshot references unknown show {} on server {}", id, self.server.id)
        })
    }

    pub(crate) fn expect_season(&self, id: &SeasonId) -> SeasonView<'a> {
        self.season(id).unwrap_or_else(|| {
            panic!("snapshot references unknown season {} on server {}", id, self.server.id)
        })
    }

    pub(crate) fn expect_video(&self, id: &VideoId) -> VideoView<'a> {
        self.video(id).unwrap_or_else(|| {
            panic!("snapshot references unknown video {} on server {}", id, self.server.id)
        })
    }

    pub(crate) fn expect_collection(&self, id: &CollectionId) -> CollectionView<'a> {
        self.collection(id).unwrap_or_else(|| {
            panic!("snapshot references unknown collection {} on server {}", id, self.server.id)
        })
    }

    pub(crate) fn is_downloaded(&self, id: &VideoId) -> bool {
        self.index.downloaded.contains(id)
    }
}
