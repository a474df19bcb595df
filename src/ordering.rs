// src/ordering.rs
//
// Pure sort-order and derivation helpers used by browsing surfaces.
// All sorts are stable: equal keys keep their encounter order.

use crate::views::{ShowView, VideoView};

/// Anything with a display title that can be title-sorted.
pub trait Titled {
    fn title(&self) -> &str;
}

/// Case-insensitive sort key with a leading article ("the ", "a ")
/// stripped, so "The Matrix" sorts under "M".
pub fn title_sort_key(title: &str) -> String {
    let lower = title.to_lowercase();
    for article in ["the ", "a "] {
        if let Some(rest) = lower.strip_prefix(article) {
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    lower
}

pub fn by_title<T: Titled>(items: &mut [T]) {
    items.sort_by_key(|item| title_sort_key(item.title()));
}

/// Episode order: season ordinal first, episode ordinal second.
pub fn by_index(episodes: &mut [VideoView<'_>]) {
    episodes.sort_by_key(|episode| {
        let season_index = episode.season().map(|season| season.index()).unwrap_or(0);
        let episode_index = episode
            .as_episode()
            .map(|detail| detail.index)
            .unwrap_or(0);
        (season_index, episode_index)
    });
}

pub fn movies_by_year(movies: &mut [VideoView<'_>]) {
    movies.sort_by_key(|movie| movie.as_movie().map(|detail| detail.year));
}

pub fn shows_by_year(shows: &mut [ShowView<'_>]) {
    shows.sort_by_key(|show| show.year());
}

pub fn by_air_date(videos: &mut [VideoView<'_>]) {
    videos.sort_by_key(|video| video.air_date());
}
