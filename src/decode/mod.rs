// src/decode/mod.rs
//
// Staged, reference-validating decoder for the persisted catalog document.
//
// Decoding is fail-fast: a single malformed field or dangling reference
// anywhere fails the whole document and no partial state is ever
// returned. Every error carries a path into the document, e.g.
// `servers[nas].seasons[s9].show: unknown show sh7`.
//
// Within one server, entity kinds decode in dependency order — libraries,
// shows, seasons, videos, collections, playlists — so each stage can
// resolve its references against the mappings already built by earlier
// stages and forward references are impossible.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::{
    ClientSettings, Collection, EpisodeDetail, Library, LibraryId, LibraryKind, MovieDetail,
    PlaybackState, Playlist, Season, SeasonId, ServerId, ServerState, Show, ShowId, State,
    ThumbnailState, Video, VideoDetail, VideoId, VideoPart, SCHEMA_VERSION,
};
use crate::error::DecodeError;

/// Decode a raw JSON document into a fully cross-referenced `State`.
pub fn decode(raw: &str) -> Result<State, DecodeError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::new("$", e.to_string()))?;
    decode_value(value)
}

/// Serialize a state back to the persisted document format. Round-trips
/// through `decode`.
pub fn serialize(state: &State) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

#[derive(Deserialize)]
struct RawState {
    version: u32,
    client_id: String,
    #[serde(default)]
    settings: ClientSettings,
    #[serde(default)]
    servers: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct RawServer {
    id: String,
    name: String,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    libraries: BTreeMap<String, Value>,
    #[serde(default)]
    collections: BTreeMap<String, Value>,
    #[serde(default)]
    shows: BTreeMap<String, Value>,
    #[serde(default)]
    seasons: BTreeMap<String, Value>,
    #[serde(default)]
    videos: BTreeMap<String, Value>,
    #[serde(default)]
    playlists: BTreeMap<String, Value>,
}

/// A video before its detail variant has been probed.
#[derive(Deserialize)]
struct RawVideo {
    id: VideoId,
    title: String,
    air_date: NaiveDate,
    thumbnail: ThumbnailState,
    media_id: String,
    #[serde(default)]
    parts: Vec<VideoPart>,
    #[serde(default)]
    transcode_profile: Option<String>,
    playback: PlaybackState,
    updated_at: DateTime<Utc>,
    detail: Value,
}

pub fn decode_value(value: Value) -> Result<State, DecodeError> {
    let raw: RawState = entry(value, "$")?;
    if raw.version > SCHEMA_VERSION {
        return Err(DecodeError::new(
            "version",
            format!(
                "unsupported schema version {} (this build reads up to {})",
                raw.version, SCHEMA_VERSION
            ),
        ));
    }

    let mut servers = HashMap::with_capacity(raw.servers.len());
    for (key, value) in raw.servers {
        let path = format!("servers[{}]", key);
        let server = decode_server(&key, value, &path)?;
        servers.insert(server.id.clone(), server);
    }

    Ok(State {
        version: raw.version,
        client_id: raw.client_id,
        settings: raw.settings,
        servers,
    })
}

fn decode_server(key: &str, value: Value, path: &str) -> Result<ServerState, DecodeError> {
    let raw: RawServer = entry(value, path)?;
    check_key(&format!("{}.id", path), &raw.id, key)?;

    // Stage 1: libraries reference nothing.
    let mut libraries = HashMap::with_capacity(raw.libraries.len());
    for (id, value) in raw.libraries {
        let item_path = format!("{}.libraries[{}]", path, id);
        let library: Library = entry(value, &item_path)?;
        check_key(&format!("{}.id", item_path), library.id.as_str(), &id)?;
        libraries.insert(library.id.clone(), library);
    }

    // Stage 2: shows reference a show-library.
    let mut shows = HashMap::with_capacity(raw.shows.len());
    for (id, value) in raw.shows {
        let item_path = format!("{}.shows[{}]", path, id);
        let show: Show = entry(value, &item_path)?;
        check_key(&format!("{}.id", item_path), show.id.as_str(), &id)?;
        match libraries.get(&show.library) {
            None => {
                return Err(DecodeError::new(
                    format!("{}.library", item_path),
                    format!("unknown library {}", show.library),
                ));
            }
            Some(library) if library.kind != LibraryKind::Show => {
                return Err(DecodeError::new(
                    format!("{}.library", item_path),
                    format!("library {} is not a show library", show.library),
                ));
            }
            Some(_) => {}
        }
        shows.insert(show.id.clone(), show);
    }

    // Stage 3: seasons reference shows.
    let mut seasons = HashMap::with_capacity(raw.seasons.len());
    for (id, value) in raw.seasons {
        let item_path = format!("{}.seasons[{}]", path, id);
        let season: Season = entry(value, &item_path)?;
        check_key(&format!("{}.id", item_path), season.id.as_str(), &id)?;
        if !shows.contains_key(&season.show) {
            return Err(DecodeError::new(
                format!("{}.show", item_path),
                format!("unknown show {}", season.show),
            ));
        }
        seasons.insert(season.id.clone(), season);
    }

    // Stage 4: videos carry a probed detail variant.
    let mut videos = HashMap::with_capacity(raw.videos.len());
    for (id, value) in raw.videos {
        let item_path = format!("{}.videos[{}]", path, id);
        let raw_video: RawVideo = entry(value, &item_path)?;
        check_key(&format!("{}.id", item_path), raw_video.id.as_str(), &id)?;
        let detail = decode_detail(
            raw_video.detail,
            &format!("{}.detail", item_path),
            &libraries,
            &seasons,
        )?;
        let video = Video {
            id: raw_video.id,
            title: raw_video.title,
            air_date: raw_video.air_date,
            thumbnail: raw_video.thumbnail,
            media_id: raw_video.media_id,
            parts: raw_video.parts,
            transcode_profile: raw_video.transcode_profile,
            playback: raw_video.playback,
            updated_at: raw_video.updated_at,
            detail,
        };
        videos.insert(video.id.clone(), video);
    }

    // Stage 5: collections reference a library and content items of the
    // library's kind. An item of the wrong kind or wrong owning library is
    // dropped from the collection; an item absent from the corresponding
    // mapping fails the document.
    let mut collections = HashMap::with_capacity(raw.collections.len());
    for (id, value) in raw.collections {
        let item_path = format!("{}.collections[{}]", path, id);
        let mut collection: Collection = entry(value, &item_path)?;
        check_key(&format!("{}.id", item_path), collection.id.as_str(), &id)?;
        let library = libraries.get(&collection.library).ok_or_else(|| {
            DecodeError::new(
                format!("{}.library", item_path),
                format!("unknown library {}", collection.library),
            )
        })?;
        collection.items =
            decode_collection_items(&collection, library.kind, &item_path, &shows, &videos)?;
        collections.insert(collection.id.clone(), collection);
    }

    // Stage 6: playlists reference videos.
    let mut playlists = HashMap::with_capacity(raw.playlists.len());
    for (id, value) in raw.playlists {
        let item_path = format!("{}.playlists[{}]", path, id);
        let playlist: Playlist = entry(value, &item_path)?;
        check_key(&format!("{}.id", item_path), playlist.id.as_str(), &id)?;
        for (position, video_id) in playlist.videos.iter().enumerate() {
            if !videos.contains_key(video_id) {
                return Err(DecodeError::new(
                    format!("{}.videos[{}]", item_path, position),
                    format!("unknown video {}", video_id),
                ));
            }
        }
        playlists.insert(playlist.id.clone(), playlist);
    }

    Ok(ServerState {
        id: ServerId::new(key),
        name: raw.name,
        token: raw.token,
        libraries: Arc::new(libraries),
        collections: Arc::new(collections),
        shows: Arc::new(shows),
        seasons: Arc::new(seasons),
        videos: Arc::new(videos),
        playlists: Arc::new(playlists),
    })
}

/// Ordered-alternative probe: a detail is a movie detail if it matches
/// `{library, year}`, otherwise an episode detail if it matches
/// `{season, index}`. First match wins.
fn decode_detail(
    value: Value,
    path: &str,
    libraries: &HashMap<LibraryId, Library>,
    seasons: &HashMap<SeasonId, Season>,
) -> Result<VideoDetail, DecodeError> {
    if let Ok(detail) = serde_json::from_value::<MovieDetail>(value.clone()) {
        match libraries.get(&detail.library) {
            None => {
                return Err(DecodeError::new(
                    format!("{}.library", path),
                    format!("unknown library {}", detail.library),
                ));
            }
            Some(library) if library.kind != LibraryKind::Movie => {
                return Err(DecodeError::new(
                    format!("{}.library", path),
                    format!("library {} is not a movie library", detail.library),
                ));
            }
            Some(_) => {}
        }
        return Ok(VideoDetail::Movie(detail));
    }
    if let Ok(detail) = serde_json::from_value::<EpisodeDetail>(value) {
        if !seasons.contains_key(&detail.season) {
            return Err(DecodeError::new(
                format!("{}.season", path),
                format!("unknown season {}", detail.season),
            ));
        }
        return Ok(VideoDetail::Episode(detail));
    }
    Err(DecodeError::new(
        path,
        "matches neither movie detail (library, year) nor episode detail (season, index)",
    ))
}

fn decode_collection_items(
    collection: &Collection,
    kind: LibraryKind,
    path: &str,
    shows: &HashMap<ShowId, Show>,
    videos: &HashMap<VideoId, Video>,
) -> Result<Vec<String>, DecodeError> {
    let mut items = Vec::with_capacity(collection.items.len());
    for (position, item) in collection.items.iter().enumerate() {
        match kind {
            LibraryKind::Movie => {
                let video = videos.get(&VideoId::new(item.clone())).ok_or_else(|| {
                    DecodeError::new(
                        format!("{}.items[{}]", path, position),
                        format!("unknown movie {}", item),
                    )
                })?;
                match video.as_movie() {
                    Some(detail) if detail.library == collection.library => {
                        items.push(item.clone());
                    }
                    _ => {
                        log::warn!(
                            "{}.items[{}]: dropping {}: not a movie in library {}",
                            path,
                            position,
                            item,
                            collection.library
                        );
                    }
                }
            }
            LibraryKind::Show => {
                let show = shows.get(&ShowId::new(item.clone())).ok_or_else(|| {
                    DecodeError::new(
                        format!("{}.items[{}]", path, position),
                        format!("unknown show {}", item),
                    )
                })?;
                if show.library == collection.library {
                    items.push(item.clone());
                } else {
                    log::warn!(
                        "{}.items[{}]: dropping {}: show not in library {}",
                        path,
                        position,
                        item,
                        collection.library
                    );
                }
            }
        }
    }
    Ok(items)
}

fn entry<T: DeserializeOwned>(value: Value, path: &str) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(|e| DecodeError::new(path, e.to_string()))
}

fn check_key(path: &str, id: &str, key: &str) -> Result<(), DecodeError> {
    if id == key {
        Ok(())
    } else {
        Err(DecodeError::new(
            path,
            format!("id '{}' does not match mapping key '{}'", id, key),
        ))
    }
}
