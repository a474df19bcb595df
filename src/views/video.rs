// src/views/video.rs
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    DownloadState, EpisodeDetail, MovieDetail, PlaybackState, State, ThumbnailState, Video,
    VideoDetail, VideoId, VideoPart,
};
use crate::error::AppResult;
use crate::ordering::Titled;
use crate::views::library::LibraryView;
use crate::views::server::ServerView;
use crate::views::show::SeasonView;

/// View over one video (movie or episode).
///
/// Mutation setters return a brand-new `State` built by structural copy;
/// the snapshot this view was taken from is never modified.
#[derive(Clone, Copy)]
pub struct VideoView<'a> {
    pub(crate) srv: ServerView<'a>,
    pub(crate) video: &'a Video,
}

impl PartialEq for VideoView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.srv == other.srv && self.video.id == other.video.id
    }
}

impl std::fmt::Debug for VideoView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoView")
            .field("server", self.srv.id())
            .field("id", &self.video.id)
            .finish()
    }
}

impl<'a> VideoView<'a> {
    pub fn id(&self) -> &'a VideoId {
        &self.video.id
    }

    pub fn title(&self) -> &'a str {
        &self.video.title
    }

    pub fn air_date(&self) -> NaiveDate {
        self.video.air_date
    }

    pub fn thumbnail(&self) -> &'a ThumbnailState {
        &self.video.thumbnail
    }

    pub fn media_id(&self) -> &'a str {
        &self.video.media_id
    }

    pub fn parts(&self) -> &'a [VideoPart] {
        &self.video.parts
    }

    pub fn transcode_profile(&self) -> Option<&'a str> {
        self.video.transcode_profile.as_deref()
    }

    pub fn playback(&self) -> &'a PlaybackState {
        &self.video.playback
    }

    /// Millisecond offset into the video; zero when unplayed or played.
    pub fn play_position(&self) -> u64 {
        self.video.playback.position()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.video.updated_at
    }

    pub fn as_movie(&self) -> Option<&'a MovieDetail> {
        self.video.as_movie()
    }

    pub fn as_episode(&self) -> Option<&'a EpisodeDetail> {
        self.video.as_episode()
    }

    /// Owning season, for episodes.
    pub fn season(&self) -> Option<SeasonView<'a>> {
        self.video
            .as_episode()
            .map(|detail| self.srv.expect_season(&detail.season))
    }

    /// Owning library: direct for movies, derived through
    /// season -> show -> library for episodes.
    pub fn library(&self) -> LibraryView<'a> {
        match &self.video.detail {
            VideoDetail::Movie(detail) => self.srv.expect_library(&detail.library),
            VideoDetail::Episode(detail) => {
                self.srv.expect_season(&detail.season).show().library()
            }
        }
    }

    /// Total duration in milliseconds, summed over all parts.
    pub fn duration_ms(&self) -> u64 {
        self.video.duration_ms()
    }

    /// True iff every part is downloaded or transcoded locally.
    pub fn is_downloaded(&self) -> bool {
        self.srv.is_downloaded(&self.video.id)
    }

    /// New state with this video's playback position replaced.
    pub fn with_play_position(&self, position_ms: u64) -> AppResult<State> {
        self.srv
            .state
            .with_play_position(&self.srv.server.id, &self.video.id, position_ms)
    }

    /// New state with this video's playback state replaced.
    pub fn with_playback(&self, playback: PlaybackState) -> AppResult<State> {
        self.srv
            .state
            .with_playback_state(&self.srv.server.id, &self.video.id, playback)
    }

    /// New state with one part's download state replaced.
    pub fn with_part_download(&self, part_id: &str, download: DownloadState) -> AppResult<State> {
        self.srv.state.with_part_download_state(
            &self.srv.server.id,
            &self.video.id,
            part_id,
            download,
        )
    }
}

impl Titled for VideoView<'_> {
    fn title(&self) -> &str {
        &self.video.title
    }
}
