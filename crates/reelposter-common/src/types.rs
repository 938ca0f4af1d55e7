//! Catalog result types shared by the client, ranker and resolver.
//!
//! A [`Candidate`] is a fixed-shape record: every field the catalog may
//! omit is an explicit `Option` rather than a sentinel value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which catalog collection a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// A feature film.
    Movie,
    /// An episodic series.
    Series,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

/// One search result returned by the metadata catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Catalog identifier (e.g. the TMDB numeric id).
    pub id: u64,
    /// Collection the result belongs to.
    pub kind: MediaKind,
    /// Movie title or series name.
    pub title: Option<String>,
    /// Release date (movies) or first-air date (series), ISO `YYYY-MM-DD`.
    pub release_date: Option<String>,
    /// Opaque poster path fragment, e.g. `/abc123.jpg`.
    pub poster_path: Option<String>,
    /// Catalog popularity metric, non-negative.
    #[serde(default)]
    pub popularity: f64,
    /// Number of community votes.
    #[serde(default)]
    pub vote_count: u64,
}

impl Candidate {
    /// Create an otherwise empty candidate.
    pub fn new(id: u64, kind: MediaKind) -> Self {
        Self {
            id,
            kind,
            title: None,
            release_date: None,
            poster_path: None,
            popularity: 0.0,
            vote_count: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    pub fn with_poster(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    pub fn with_popularity(mut self, popularity: f64) -> Self {
        self.popularity = popularity;
        self
    }

    pub fn with_vote_count(mut self, vote_count: u64) -> Self {
        self.vote_count = vote_count;
        self
    }

    /// The title to compare against, or `None` if the catalog sent a
    /// missing or blank one.
    pub fn display_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Year parsed from the first four characters of the release date.
    pub fn release_year(&self) -> Option<u16> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .and_then(|y| y.parse::<u16>().ok())
    }

    /// Poster path, ignoring blank values.
    pub fn poster(&self) -> Option<&str> {
        self.poster_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_display() {
        assert_eq!(MediaKind::Movie.to_string(), "movie");
        assert_eq!(MediaKind::Series.to_string(), "series");
    }

    #[test]
    fn test_media_kind_serialization() {
        let json = serde_json::to_string(&MediaKind::Series).unwrap();
        assert_eq!(json, "\"series\"");
        let kind: MediaKind = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(kind, MediaKind::Movie);
    }

    #[test]
    fn test_release_year() {
        let c = Candidate::new(1, MediaKind::Movie).with_release_date("2023-12-01");
        assert_eq!(c.release_year(), Some(2023));

        let c = Candidate::new(1, MediaKind::Movie).with_release_date("");
        assert_eq!(c.release_year(), None);

        let c = Candidate::new(1, MediaKind::Movie).with_release_date("20x3-01-01");
        assert_eq!(c.release_year(), None);

        assert_eq!(Candidate::new(1, MediaKind::Movie).release_year(), None);
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let c = Candidate::new(7, MediaKind::Series)
            .with_title("   ")
            .with_poster("");
        assert_eq!(c.display_title(), None);
        assert_eq!(c.poster(), None);
    }

    #[test]
    fn test_display_title_trimmed() {
        let c = Candidate::new(7, MediaKind::Series).with_title(" Dark ");
        assert_eq!(c.display_title(), Some("Dark"));
    }
}
