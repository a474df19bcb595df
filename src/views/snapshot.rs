// src/views/snapshot.rs
//
// Per-snapshot secondary index over one `State`.
//
// Derived relationships (a show's seasons, a season's episodes, a
// library's contents) are rebuilt once per snapshot instead of rescanned
// on every access; a new `State` gets a fresh `Snapshot` with fresh
// indices, so nothing memoized here can outlive the state it was
// computed from.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::domain::{
    CollectionId, LibraryId, SeasonId, ServerId, ServerState, ShowId, State, VideoId,
};
use crate::ordering::title_sort_key;
use crate::views::server::ServerView;

pub struct Snapshot {
    state: Arc<State>,
    servers: HashMap<ServerId, ServerIndex>,
}

/// Secondary index for one server. Child lists carry a deterministic
/// order: seasons and episodes by their ordinal, library contents and
/// collections by normalized title.
pub(crate) struct ServerIndex {
    pub seasons_by_show: HashMap<ShowId, Vec<SeasonId>>,
    pub episodes_by_season: HashMap<SeasonId, Vec<VideoId>>,
    pub shows_by_library: HashMap<LibraryId, Vec<ShowId>>,
    pub movies_by_library: HashMap<LibraryId, Vec<VideoId>>,
    pub collections_by_library: HashMap<LibraryId, Vec<CollectionId>>,
    /// Videos whose every part is downloaded or transcoded.
    pub downloaded: HashSet<VideoId>,
}

impl Snapshot {
    pub fn new(state: Arc<State>) -> Self {
        let servers = state
            .servers
            .iter()
            .map(|(id, server)| (id.clone(), ServerIndex::build(server)))
            .collect();
        Self { state, servers }
    }

    pub fn state(&self) -> &Arc<State> {
        &self.state
    }

    pub fn server(&self, id: &ServerId) -> Option<ServerView<'_>> {
        let server = self.state.servers.get(id)?;
        let index = self.servers.get(id)?;
        Some(ServerView {
            state: self.state.as_ref(),
            server,
            index,
        })
    }

    /// All servers, ordered by display name then id.
    pub fn servers(&self) -> Vec<ServerView<'_>> {
        let mut servers: Vec<ServerView<'_>> = self
            .state
            .servers
            .keys()
            .filter_map(|id| self.server(id))
            .collect();
        servers.sort_by(|a, b| {
            (a.name(), a.id().as_str()).cmp(&(b.name(), b.id().as_str()))
        });
        servers
    }
}

impl ServerIndex {
    fn build(server: &ServerState) -> Self {
        let mut seasons_by_show: HashMap<ShowId, Vec<SeasonId>> = HashMap::new();
        for season in server.seasons.values() {
            seasons_by_show
                .entry(season.show.clone())
                .or_default()
                .push(season.id.clone());
        }
        for ids in seasons_by_show.values_mut() {
            ids.sort_by_key(|id| (server.seasons[id].index, id.clone()));
        }

        let mut episodes_by_season: HashMap<SeasonId, Vec<VideoId>> = HashMap::new();
        let mut movies_by_library: HashMap<LibraryId, Vec<VideoId>> = HashMap::new();
        let mut downloaded = HashSet::new();
        for video in server.videos.values() {
            match &video.detail {
                crate::domain::VideoDetail::Episode(detail) => {
                    episodes_by_season
                        .entry(detail.season.clone())
                        .or_default()
                        .push(video.id.clone());
                }
                crate::domain::VideoDetail::Movie(detail) => {
                    movies_by_library
                        .entry(detail.library.clone())
                        .or_default()
                        .push(video.id.clone());
                }
            }
            if video.is_downloaded() {
                downloaded.insert(video.id.clone());
            }
        }
        for ids in episodes_by_season.values_mut() {
            ids.sort_by_key(|id| {
                let index = match &server.videos[id].detail {
                    crate::domain::VideoDetail::Episode(detail) => detail.index,
                    crate::domain::VideoDetail::Movie(_) => 0,
                };
                (index, id.clone())
            });
        }
        for ids in movies_by_library.values_mut() {
            ids.sort_by_key(|id| (title_sort_key(&server.videos[id].title), id.clone()));
        }

        let mut shows_by_library: HashMap<LibraryId, Vec<ShowId>> = HashMap::new();
        for show in server.shows.values() {
            shows_by_library
                .entry(show.library.clone())
                .or_default()
                .push(show.id.clone());
        }
        for ids in shows_by_library.values_mut() {
            ids.sort_by_key(|id| (title_sort_key(&server.shows[id].title), id.clone()));
        }

        let mut collections_by_library: HashMap<LibraryId, Vec<CollectionId>> = HashMap::new();
        for collection in server.collections.values() {
            collections_by_library
                .entry(collection.library.clone())
                .or_default()
                .push(collection.id.clone());
        }
        for ids in collections_by_library.values_mut() {
            ids.sort_by_key(|id| (title_sort_key(&server.collections[id].title), id.clone()));
        }

        Self {
            seasons_by_show,
            episodes_by_season,
            shows_by_library,
            movies_by_library,
            collections_by_library,
            downloaded,
        }
    }
}
