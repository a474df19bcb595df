// src/views/mod.rs
//
// Read-only facade over one immutable `State` snapshot.
//
// A `Snapshot` owns the secondary index for derived relationships; views
// are `Copy` borrows of it. Two views of the same entity within one
// snapshot compare equal, which the relationship accessors rely on. The
// availability filter is part of this layer: `available_*` accessors
// derive the locally-usable subset bottom-up from fully-downloaded
// videos, recomputed per snapshot and never baked into storage.

pub mod collection;
pub mod library;
pub mod server;
pub mod show;
pub mod snapshot;
pub mod video;

pub use collection::{CollectionItemView, CollectionView, PlaylistView};
pub use library::LibraryView;
pub use server::ServerView;
pub use show::{SeasonView, ShowView};
pub use snapshot::Snapshot;
pub use video::VideoView;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::test_fixtures::sample_state;
    use crate::domain::{DownloadState, PlaybackState, ServerId, State, VideoId};

    fn snapshot() -> Snapshot {
        Snapshot::new(Arc::new(sample_state()))
    }

    fn server(snapshot: &Snapshot) -> ServerView<'_> {
        snapshot.server(&ServerId::from("srv")).unwrap()
    }

    #[test]
    fn test_relationship_derivation_by_equality() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        let show = server.show(&"show1".into()).unwrap();

        let seasons = show.seasons();
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].index(), 1);
        assert_eq!(seasons[1].index(), 2);
        // The same entity reached through two paths compares equal.
        assert_eq!(seasons[0].show(), show);
        assert_eq!(seasons[0].show().library(), show.library());
    }

    #[test]
    fn test_episode_library_derived_through_season_chain() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        let episode = server.video(&"ep1".into()).unwrap();
        assert_eq!(episode.library().id().as_str(), "lib-shows");
    }

    #[test]
    fn test_cascade_one_downloaded_season_visible() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        // show1: s1 fully downloaded, s2 not downloaded at all.
        let show = server.show(&"show1".into()).unwrap();
        let available = show.available_seasons();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id().as_str(), "s1");
        assert!(show.is_available());
    }

    #[test]
    fn test_cascade_show_with_nothing_downloaded_invisible() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        let show = server.show(&"show2".into()).unwrap();
        assert!(!show.is_available());

        let library = server.library(&"lib-shows".into()).unwrap();
        let visible: Vec<&str> = library
            .available_shows()
            .iter()
            .map(|show| show.id().as_str())
            .collect();
        assert_eq!(visible, vec!["show1"]);
    }

    #[test]
    fn test_multipart_video_with_pending_part_not_available() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        let movie = server.video(&"mv1".into()).unwrap();
        assert!(!movie.is_downloaded());

        let library = server.library(&"lib-movies".into()).unwrap();
        let available: Vec<&str> = library
            .available_movies()
            .iter()
            .map(|movie| movie.id().as_str())
            .collect();
        assert_eq!(available, vec!["mv2"]);
    }

    #[test]
    fn test_collection_availability_follows_items() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        let collection = server.collection(&"col-movies".into()).unwrap();
        assert!(collection.is_available());
        let available = collection.available_items();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].title(), "Alien");
    }

    #[test]
    fn test_playlist_available_subset_preserves_order() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        let playlist = server.playlist(&"pl1".into()).unwrap();
        // Stored order: ep2 (not downloaded), mv2, ep1.
        let available: Vec<&str> = playlist
            .available_videos()
            .iter()
            .map(|video| video.id().as_str())
            .collect();
        assert_eq!(available, vec!["mv2", "ep1"]);
    }

    #[test]
    fn test_availability_filter_is_idempotent() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        let show = server.show(&"show1".into()).unwrap();

        let once = show.available_seasons();
        let twice: Vec<_> = once
            .iter()
            .filter(|season| season.is_available())
            .copied()
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_duration_aggregates_over_seasons() {
        let snapshot = snapshot();
        let server = server(&snapshot);
        let show = server.show(&"show1".into()).unwrap();
        // s1 episodes: 1000ms; s2 episodes: 2000ms.
        assert_eq!(show.duration_ms(), 3000);
        assert_eq!(server.playlist(&"pl1".into()).unwrap().duration_ms(), 2000 + 5400 + 1000);
    }

    #[test]
    fn test_mutation_leaves_snapshot_untouched() {
        let old_state = Arc::new(sample_state());
        let snapshot = Snapshot::new(old_state.clone());
        let server = snapshot.server(&ServerId::from("srv")).unwrap();
        let video = server.video(&"ep1".into()).unwrap();

        let new_state: State = video.with_play_position(9_000).unwrap();

        assert_eq!(*video.playback(), PlaybackState::Unplayed);
        let old_video = &old_state.servers[&ServerId::from("srv")].videos[&VideoId::from("ep1")];
        assert_eq!(old_video.playback, PlaybackState::Unplayed);
        let new_video = &new_state.servers[&ServerId::from("srv")].videos[&VideoId::from("ep1")];
        assert_eq!(new_video.playback, PlaybackState::InProgress { position: 9_000 });
    }

    #[test]
    fn test_download_completion_shows_up_in_next_snapshot_only() {
        let old_state = Arc::new(sample_state());
        let old_snapshot = Snapshot::new(old_state.clone());
        let old_server = old_snapshot.server(&ServerId::from("srv")).unwrap();
        assert!(!old_server.video(&"ep2".into()).unwrap().is_downloaded());

        let new_state = old_state
            .with_part_download_state(
                &ServerId::from("srv"),
                &VideoId::from("ep2"),
                "ep2-p1",
                DownloadState::Downloaded {
                    path: "dl/ep2.mp4".to_string(),
                },
            )
            .unwrap();
        let new_snapshot = Snapshot::new(Arc::new(new_state));
        let new_server = new_snapshot.server(&ServerId::from("srv")).unwrap();

        assert!(new_server.video(&"ep2".into()).unwrap().is_downloaded());
        // The old snapshot still reports the old availability.
        assert!(!old_server.video(&"ep2".into()).unwrap().is_downloaded());
        // And show1's season 2 becomes visible only in the new snapshot.
        let show = new_server.show(&"show1".into()).unwrap();
        assert_eq!(show.available_seasons().len(), 2);
    }
}
