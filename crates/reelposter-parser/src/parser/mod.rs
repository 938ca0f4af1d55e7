//! Regex passes over a raw title.
//!
//! Each pass reads the input independently; none of them consumes text
//! another pass needs, so the order only matters for readability.

mod markers;
mod numbers;
mod title;

pub(crate) use title::compile_extra_tags;

use regex::Regex;

use crate::config::ParserConfig;
use crate::model::ParsedQuery;

/// Parse a raw title with custom configuration.
///
/// `extra_tags` is the compiled form of `config.extra_release_tags`.
pub fn parse_with_config(
    input: &str,
    config: &ParserConfig,
    extra_tags: Option<&Regex>,
) -> ParsedQuery {
    let raw = input.trim();
    if raw.is_empty() {
        return ParsedQuery::default();
    }

    // Underscores are word characters to the regex engine; treat them as
    // separators so "Title_2020_S01" still has its markers found.
    let scan = raw.replace('_', " ");

    let forced_type = markers::detect(&scan, config.marker_priority);
    let year = numbers::extract_year(&scan);
    let season = numbers::extract_season(&scan);
    let (clean_title, degraded) = title::extract(raw, extra_tags);

    ParsedQuery {
        raw: raw.to_string(),
        clean_title,
        year,
        season,
        forced_type,
        degraded,
    }
}
