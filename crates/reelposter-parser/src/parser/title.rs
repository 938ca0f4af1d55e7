//! Clean title extraction.
//!
//! The title is the text before the first release marker (season marker,
//! year or quality tag), with bracketed spans, noise words and symbols
//! removed. `"Stranger.Things.S04.2022.1080p.WEB-DL"` becomes
//! `"Stranger Things"`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::numbers::{SEASON, YEAR};

static EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:mkv|mp4|avi|m4v|mov|wmv|flv|webm|ts|m2ts|mpe?g)$")
        .expect("valid extension regex")
});

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]]*\]|\([^)]*\)|\{[^}]*\}").expect("valid bracket regex")
});

/// Quality, source, codec and bit-depth tags. Anything after the first
/// one is release metadata, not title.
static STOP_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"\d{3,4}p|[48]k|uhd|fhd|hd",
        r"|web[\s.\-]?dl|web[\s.\-]?rip|hd[\s.\-]?rip|b[dr][\s.\-]?rip|blu[\s.\-]?ray",
        r"|dvd[\s.\-]?rip|hdtv|hdcam|cam[\s.\-]?rip|remux",
        r"|[xh][\s.]?26[45]|hevc|avc|av1|e?ac3|aac|dd[p+]?[\s.]?[257][\s.][01]|ddp",
        r"|1[02]bit|8bit|hdr(?:10)?|dv",
        r")\b",
    ))
    .expect("valid stop tag regex")
});

/// Audio-language and release-group words. Removed wherever they appear
/// but never cut the title short, so "The English Patient" keeps "Patient".
static NOISE_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?:",
        r"dual[\s.\-]?audio|multi[\s.\-]?audio|hindi|english|tamil|telugu",
        r"|org|nf|amzn|dsnp|hmax|esubs?",
        r")\b",
    ))
    .expect("valid noise tag regex")
});

/// Compile user-supplied release tags into one case-insensitive
/// whole-word pattern. Returns `None` when there is nothing to match.
pub(crate) fn compile_extra_tags(tags: &[String]) -> Option<Regex> {
    let alternatives: Vec<String> = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(regex::escape)
        .collect();
    if alternatives.is_empty() {
        return None;
    }
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|"))).ok()
}

/// Extract the clean title.
///
/// Returns the title and whether the fallback path was taken. The title is
/// empty only for blank input.
pub fn extract(input: &str, extra_tags: Option<&Regex>) -> (String, bool) {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return (String::new(), false);
    }

    let without_ext = EXTENSION.replace(trimmed, "").replace('_', " ");

    // Blank out bracketed spans byte for byte so match offsets line up
    // with `without_ext`.
    let text = BRACKETED.replace_all(&without_ext, |caps: &Captures| " ".repeat(caps[0].len()));
    let last_year = YEAR.find_iter(&without_ext).last().map(|m| m.start());

    let title = truncate_at_first_marker(&text, last_year);
    let title = STOP_TAGS.replace_all(title, " ");
    let title = NOISE_TAGS.replace_all(&title, " ");
    let title = SEASON.replace_all(&title, " ");
    let title = match extra_tags {
        Some(re) => re.replace_all(&title, " ").into_owned(),
        None => title.into_owned(),
    };

    let cleaned = strip_symbols(&title);
    if !cleaned.is_empty() {
        return (cleaned, false);
    }

    // Nothing survived: fall back to the input minus symbols, and keep the
    // raw text itself when even that is empty ("!!!").
    let fallback = strip_symbols(trimmed);
    if !fallback.is_empty() {
        return (fallback, true);
    }
    (collapse_whitespace(trimmed), true)
}

/// Cut `text` at the first marker that has title text in front of it.
///
/// A marker at the very start ("1917", "S01E01 ...") is skipped so that a
/// title made of a number is not cut down to nothing. Only the last year
/// of the input (`last_year`, bracketed ones included) is a release year;
/// earlier ones belong to the title, as in "Blade Runner 2049 (2017)".
fn truncate_at_first_marker(text: &str, last_year: Option<usize>) -> &str {
    let release_year = YEAR
        .find_iter(text)
        .map(|m| m.start())
        .filter(|&pos| Some(pos) == last_year);

    let mut stops: Vec<usize> = STOP_TAGS
        .find_iter(text)
        .chain(SEASON.find_iter(text))
        .map(|m| m.start())
        .chain(release_year)
        .collect();
    stops.sort_unstable();

    stops
        .into_iter()
        .find(|&pos| !strip_symbols(&text[..pos]).is_empty())
        .map_or(text, |pos| &text[..pos])
}

/// Replace every non-alphanumeric character with a space, drop
/// apostrophes so "Marvel's" stays one word, and collapse whitespace.
pub(crate) fn strip_symbols(s: &str) -> String {
    let mapped: String = s
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | '`'))
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    collapse_whitespace(&mapped)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
