//! Year and season extraction.
//!
//! Both scans run over the whole input, brackets included, so
//! `"Animal (2023)"` yields 2023 even though the title cleanup later
//! drops the parenthesized span.

use std::sync::LazyLock;

use regex::Regex;

pub(super) static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").expect("valid year regex"));

// "S04", "s4", "S04E05", "S05E01E02", "S05E01-E02" or "Season 4",
// "season.04", "Season04".
pub(super) static SEASON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:s(\d{1,2})(?:[.\-]?e\d{1,4})*|season[\s.\-]*(\d{1,2}))\b")
        .expect("valid season regex")
});

/// First `19xx` / `20xx` token.
pub fn extract_year(input: &str) -> Option<u16> {
    YEAR.find(input).and_then(|m| m.as_str().parse().ok())
}

/// Season number from the left-most season marker.
///
/// Season `0` (specials) is not a positive season and yields `None`.
pub fn extract_season(input: &str) -> Option<u16> {
    let caps = SEASON.captures(input)?;
    let digits = caps.get(1).or_else(|| caps.get(2))?;
    digits.as_str().parse::<u16>().ok().filter(|&s| s > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_extraction() {
        assert_eq!(extract_year("Animal (2023) (Movie)"), Some(2023));
        assert_eq!(extract_year("The.Matrix.1999.1080p"), Some(1999));
        assert_eq!(extract_year("Stranger.Things.S04.2022.1080p"), Some(2022));
    }

    #[test]
    fn test_first_year_wins() {
        assert_eq!(extract_year("Blade Runner 2049 (2017)"), Some(2049));
    }

    #[test]
    fn test_year_out_of_range_or_embedded() {
        assert_eq!(extract_year("Movie 1080p 2160p"), None);
        assert_eq!(extract_year("Movie 1899"), None);
        assert_eq!(extract_year("Movie 2100"), None);
        assert_eq!(extract_year("Movie x2020y"), None);
        assert_eq!(extract_year("Movie 20201"), None);
    }

    #[test]
    fn test_season_token() {
        assert_eq!(extract_season("Stranger Things S04 (2016)"), Some(4));
        assert_eq!(extract_season("Dark.s2.720p"), Some(2));
        assert_eq!(extract_season("Dark.S03E05.720p"), Some(3));
    }

    #[test]
    fn test_multi_episode_token() {
        assert_eq!(extract_season("Friends.S05E01E02.720p"), Some(5));
        assert_eq!(extract_season("Friends.S05E01-E02.720p"), Some(5));
        assert_eq!(extract_season("Friends S05E01.E02.E03"), Some(5));
    }

    #[test]
    fn test_season_spelled_out() {
        assert_eq!(extract_season("Chernobyl Season 1"), Some(1));
        assert_eq!(extract_season("Chernobyl.season.02"), Some(2));
        assert_eq!(extract_season("Chernobyl Season03"), Some(3));
    }

    #[test]
    fn test_leftmost_season_marker_wins() {
        assert_eq!(extract_season("Show Season 2 S05"), Some(2));
        assert_eq!(extract_season("Show S05 Season 2"), Some(5));
    }

    #[test]
    fn test_no_season() {
        assert_eq!(extract_season("Stranger Things"), None);
        assert_eq!(extract_season("Se7en 1995"), None);
        assert_eq!(extract_season("S.W.A.T. 2017"), None);
        assert_eq!(extract_season("Seasons of Love"), None);
        assert_eq!(extract_season("Show S123"), None);
    }

    #[test]
    fn test_season_zero_is_absent() {
        assert_eq!(extract_season("Doctor Who S00E01"), None);
    }
}
