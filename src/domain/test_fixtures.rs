// src/domain/test_fixtures.rs
//
// Shared catalog fixture used across module tests. One server, two
// libraries, two shows, three seasons, a handful of videos in assorted
// download states, plus a collection per library and a playlist.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};

use crate::domain::collection::Collection;
use crate::domain::ids::{CollectionId, LibraryId, PlaylistId, SeasonId, ServerId, ShowId, VideoId};
use crate::domain::library::{Library, LibraryKind};
use crate::domain::playlist::Playlist;
use crate::domain::season::Season;
use crate::domain::show::Show;
use crate::domain::state::{ServerState, State, SCHEMA_VERSION};
use crate::domain::video::{
    DownloadState, EpisodeDetail, MovieDetail, PlaybackState, ThumbnailState, Video, VideoDetail,
    VideoPart,
};

pub fn library(id: &str, title: &str, kind: LibraryKind) -> Library {
    Library {
        id: LibraryId::from(id),
        title: title.to_string(),
        kind,
    }
}

pub fn show(id: &str, title: &str, year: u16, library: &str) -> Show {
    Show {
        id: ShowId::from(id),
        title: title.to_string(),
        year,
        thumbnail: ThumbnailState::None,
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        library: LibraryId::from(library),
    }
}

pub fn season(id: &str, title: &str, index: u32, show: &str) -> Season {
    Season {
        id: SeasonId::from(id),
        title: title.to_string(),
        index,
        show: ShowId::from(show),
    }
}

pub fn part(id: &str, duration: u64, download: DownloadState) -> VideoPart {
    VideoPart {
        id: id.to_string(),
        key: format!("/parts/{}", id),
        size: 4096,
        duration,
        download,
    }
}

pub fn downloaded(path: &str) -> DownloadState {
    DownloadState::Downloaded {
        path: path.to_string(),
    }
}

fn video(id: &str, title: &str, parts: Vec<VideoPart>, detail: VideoDetail) -> Video {
    Video {
        id: VideoId::from(id),
        title: title.to_string(),
        air_date: NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(),
        thumbnail: ThumbnailState::None,
        media_id: format!("media-{}", id),
        parts,
        transcode_profile: None,
        playback: PlaybackState::Unplayed,
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        detail,
    }
}

pub fn episode(id: &str, title: &str, season: &str, index: u32, parts: Vec<VideoPart>) -> Video {
    video(
        id,
        title,
        parts,
        VideoDetail::Episode(EpisodeDetail {
            season: SeasonId::from(season),
            index,
        }),
    )
}

pub fn movie(id: &str, title: &str, year: u16, library: &str, parts: Vec<VideoPart>) -> Video {
    video(
        id,
        title,
        parts,
        VideoDetail::Movie(MovieDetail {
            library: LibraryId::from(library),
            year,
        }),
    )
}

pub fn collection(id: &str, title: &str, library: &str, items: &[&str]) -> Collection {
    Collection {
        id: CollectionId::from(id),
        title: title.to_string(),
        thumbnail: ThumbnailState::None,
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        library: LibraryId::from(library),
        items: items.iter().map(|item| item.to_string()).collect(),
    }
}

pub fn playlist(id: &str, title: &str, videos: &[&str]) -> Playlist {
    Playlist {
        id: PlaylistId::from(id),
        title: title.to_string(),
        videos: videos.iter().map(|v| VideoId::from(*v)).collect(),
    }
}

fn map<K: std::hash::Hash + Eq, V>(entries: Vec<(K, V)>) -> Arc<HashMap<K, V>> {
    Arc::new(entries.into_iter().collect())
}

/// Catalog layout:
///
/// - `lib-shows` (show-library)
///   - `show1` "The Long Voyage": `s1` (ep1, downloaded, 1000ms),
///     `s2` (ep2, not downloaded, 2000ms)
///   - `show2` "Apple Days": `s3` (ep3, not downloaded, 500ms)
/// - `lib-movies` (movie-library)
///   - `mv1` "The Matrix": two parts, one still downloading
///   - `mv2` "Alien": one part, downloaded
/// - `col-movies` [mv1, mv2], `col-shows` [show1, show2]
/// - `pl1` [ep2, mv2, ep1]
pub fn sample_server() -> ServerState {
    ServerState {
        id: ServerId::from("srv"),
        name: "Home NAS".to_string(),
        token: Some("secret-token".to_string()),
        libraries: map(vec![
            (
                LibraryId::from("lib-shows"),
                library("lib-shows", "TV Shows", LibraryKind::Show),
            ),
            (
                LibraryId::from("lib-movies"),
                library("lib-movies", "Movies", LibraryKind::Movie),
            ),
        ]),
        collections: map(vec![
            (
                CollectionId::from("col-movies"),
                collection("col-movies", "Favorites", "lib-movies", &["mv1", "mv2"]),
            ),
            (
                CollectionId::from("col-shows"),
                collection("col-shows", "Binge List", "lib-shows", &["show1", "show2"]),
            ),
        ]),
        shows: map(vec![
            (
                ShowId::from("show1"),
                show("show1", "The Long Voyage", 2018, "lib-shows"),
            ),
            (
                ShowId::from("show2"),
                show("show2", "Apple Days", 2021, "lib-shows"),
            ),
        ]),
        seasons: map(vec![
            (SeasonId::from("s1"), season("s1", "Season 1", 1, "show1")),
            (SeasonId::from("s2"), season("s2", "Season 2", 2, "show1")),
            (SeasonId::from("s3"), season("s3", "Season 1", 1, "show2")),
        ]),
        videos: map(vec![
            (
                VideoId::from("ep1"),
                episode(
                    "ep1",
                    "Landfall",
                    "s1",
                    1,
                    vec![part("ep1-p1", 1000, downloaded("dl/ep1.mp4"))],
                ),
            ),
            (
                VideoId::from("ep2"),
                episode(
                    "ep2",
                    "Open Water",
                    "s2",
                    1,
                    vec![part("ep2-p1", 2000, DownloadState::None)],
                ),
            ),
            (
                VideoId::from("ep3"),
                episode(
                    "ep3",
                    "Harvest",
                    "s3",
                    1,
                    vec![part("ep3-p1", 500, DownloadState::None)],
                ),
            ),
            (
                VideoId::from("mv1"),
                movie(
                    "mv1",
                    "The Matrix",
                    1999,
                    "lib-movies",
                    vec![
                        part("mv1-p1", 4000, downloaded("dl/mv1-p1.mp4")),
                        part(
                            "mv1-p2",
                            3000,
                            DownloadState::Downloading {
                                path: "dl/mv1-p2.mp4".to_string(),
                            },
                        ),
                    ],
                ),
            ),
            (
                VideoId::from("mv2"),
                movie(
                    "mv2",
                    "Alien",
                    1979,
                    "lib-movies",
                    vec![part("mv2-p1", 5400, downloaded("dl/mv2.mp4"))],
                ),
            ),
        ]),
        playlists: map(vec![(
            PlaylistId::from("pl1"),
            playlist("pl1", "Evening Queue", &["ep2", "mv2", "ep1"]),
        )]),
    }
}

pub fn sample_state() -> State {
    State {
        version: SCHEMA_VERSION,
        client_id: "test-client".to_string(),
        settings: Default::default(),
        servers: HashMap::from([(ServerId::from("srv"), sample_server())]),
    }
}
