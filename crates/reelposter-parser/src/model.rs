//! Data model for parsed titles.

use std::fmt;
use std::str::FromStr;

/// Error type for parsing enum values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Media type stated explicitly in the title, e.g. `"(Movie)"` or `"[TV]"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ForcedType {
    /// An explicit movie marker was present.
    Movie,
    /// An explicit tv / series / show marker was present.
    Series,
    /// No marker; the type has to be auto-detected.
    #[default]
    Unknown,
}

impl fmt::Display for ForcedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForcedType::Movie => write!(f, "movie"),
            ForcedType::Series => write!(f, "series"),
            ForcedType::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for ForcedType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" | "film" => Ok(ForcedType::Movie),
            "tv" | "series" | "show" => Ok(ForcedType::Series),
            "unknown" => Ok(ForcedType::Unknown),
            _ => Err(ParseError(format!("invalid forced type: {}", s))),
        }
    }
}

/// Structured signals extracted from a raw title.
///
/// Created once per input and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedQuery {
    /// The input, trimmed.
    pub raw: String,
    /// Human title with brackets, release tags and symbols removed.
    /// Empty only when `raw` is empty.
    pub clean_title: String,
    /// First `19xx`/`20xx` token in the input.
    pub year: Option<u16>,
    /// Season number from an `S04` / `Season 4` marker.
    pub season: Option<u16>,
    /// Explicit type marker, if any.
    pub forced_type: ForcedType,
    /// `true` when the regular cleanup left nothing and the title was
    /// produced by plain symbol stripping of the input instead.
    pub degraded: bool,
}

impl ParsedQuery {
    /// Whether there is anything worth searching for.
    pub fn is_empty(&self) -> bool {
        self.clean_title.is_empty()
    }

    /// The year to filter and rank catalog results by.
    ///
    /// `None` when the year is a word of the clean title itself
    /// ("Wonder Woman 1984"): it names the work, not its release.
    pub fn search_year(&self) -> Option<u16> {
        self.year.filter(|year| {
            let year = year.to_string();
            !self.clean_title.split_whitespace().any(|word| word == year)
        })
    }
}
