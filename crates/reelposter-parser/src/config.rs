//! Parser configuration.

/// Which explicit type marker wins when a title carries both.
///
/// `"Show (Movie) (TV)"` is contradictory; the parser does not try to
/// work out which marker the author meant, it applies a fixed order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MarkerPriority {
    /// Check movie markers first. `"X (Movie) (TV)"` is a movie.
    #[default]
    MovieFirst,
    /// Check series markers first. `"X (Movie) (TV)"` is a series.
    SeriesFirst,
}

/// Configuration for the parser.
///
/// Use the builder pattern to create a configuration:
///
/// ```
/// use reelposter_parser::config::{MarkerPriority, ParserConfig};
///
/// let config = ParserConfig::builder()
///     .marker_priority(MarkerPriority::SeriesFirst)
///     .extra_release_tag("PROPER")
///     .build();
/// assert_eq!(config.extra_release_tags, vec!["PROPER".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Order in which conflicting forced-type markers are checked.
    /// Default: MovieFirst
    pub marker_priority: MarkerPriority,

    /// Additional whole words stripped from titles as release noise,
    /// on top of the built-in vocabulary. Matched case-insensitively.
    pub extra_release_tags: Vec<String>,
}

impl ParserConfig {
    /// Create a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::default()
    }
}

/// Builder for `ParserConfig`.
#[derive(Debug, Clone, Default)]
pub struct ParserConfigBuilder {
    marker_priority: Option<MarkerPriority>,
    extra_release_tags: Vec<String>,
}

impl ParserConfigBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the order in which forced-type markers are checked.
    pub fn marker_priority(mut self, priority: MarkerPriority) -> Self {
        self.marker_priority = Some(priority);
        self
    }

    /// Add one extra release tag.
    pub fn extra_release_tag(mut self, tag: impl Into<String>) -> Self {
        self.extra_release_tags.push(tag.into());
        self
    }

    /// Add several extra release tags.
    pub fn extra_release_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_release_tags
            .extend(tags.into_iter().map(Into::into));
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ParserConfig {
        ParserConfig {
            marker_priority: self.marker_priority.unwrap_or_default(),
            extra_release_tags: self.extra_release_tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParserConfig::default();
        assert_eq!(config.marker_priority, MarkerPriority::MovieFirst);
        assert!(config.extra_release_tags.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::builder()
            .marker_priority(MarkerPriority::SeriesFirst)
            .extra_release_tags(["HQ", "PROPER"])
            .build();
        assert_eq!(config.marker_priority, MarkerPriority::SeriesFirst);
        assert_eq!(config.extra_release_tags, vec!["HQ", "PROPER"]);
    }
}
