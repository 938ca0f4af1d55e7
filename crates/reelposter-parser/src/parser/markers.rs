//! Forced-type marker detection.
//!
//! Only bracketed markers count: `"(Movie)"`, `"[TV]"`, `"( series )"`.
//! A bare word such as `"Movie"` is part of the title.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::MarkerPriority;
use crate::model::ForcedType;

static MOVIE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[(\[]\s*(?:movie|film)\s*[)\]]").expect("valid movie marker regex")
});

static SERIES_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[(\[]\s*(?:tv(?:[\s._-]*(?:series|show))?|series|show)\s*[)\]]")
        .expect("valid series marker regex")
});

/// Detect an explicit type marker.
///
/// When both kinds are present the first kind checked under `priority`
/// wins, regardless of where each marker sits in the string.
pub fn detect(input: &str, priority: MarkerPriority) -> ForcedType {
    let movie = || MOVIE_MARKER.is_match(input);
    let series = || SERIES_MARKER.is_match(input);

    match priority {
        MarkerPriority::MovieFirst if movie() => ForcedType::Movie,
        MarkerPriority::MovieFirst if series() => ForcedType::Series,
        MarkerPriority::SeriesFirst if series() => ForcedType::Series,
        MarkerPriority::SeriesFirst if movie() => ForcedType::Movie,
        _ => ForcedType::Unknown,
    }
}
