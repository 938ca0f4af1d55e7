//! # reelposter-parser
//!
//! Turns a noisy, human-authored media filename into the signals needed to
//! search a metadata catalog: a clean title, the release year, the season
//! number and any explicit movie / series marker.
//!
//! ## Quick Start
//!
//! ```
//! use reelposter_parser::{parse, ForcedType};
//!
//! let query = parse("Stranger Things S04 (2016) (Tv)");
//!
//! assert_eq!(query.clean_title, "Stranger Things");
//! assert_eq!(query.year, Some(2016));
//! assert_eq!(query.season, Some(4));
//! assert_eq!(query.forced_type, ForcedType::Series);
//! ```
//!
//! ## Configurable Parsing
//!
//! ```
//! use reelposter_parser::{ForcedType, Parser};
//! use reelposter_parser::config::{MarkerPriority, ParserConfig};
//!
//! let config = ParserConfig::builder()
//!     .marker_priority(MarkerPriority::SeriesFirst)
//!     .build();
//!
//! let parser = Parser::new(config);
//! assert_eq!(parser.parse("Fargo (Movie) (TV)").forced_type, ForcedType::Series);
//! ```
//!
//! Parsing never fails. Input that cleans down to nothing falls back to a
//! symbol-stripped copy of itself and is flagged with
//! [`ParsedQuery::degraded`].

pub mod config;
pub mod model;

mod parser;

pub use config::{MarkerPriority, ParserConfig};
pub use model::{ForcedType, ParseError, ParsedQuery};

use regex::Regex;

/// Parse a raw title using default settings.
///
/// # Examples
///
/// ```
/// use reelposter_parser::{parse, ForcedType};
///
/// let query = parse("Animal (2023) (Movie)");
/// assert_eq!(query.clean_title, "Animal");
/// assert_eq!(query.year, Some(2023));
/// assert_eq!(query.forced_type, ForcedType::Movie);
/// ```
pub fn parse(input: &str) -> ParsedQuery {
    Parser::default().parse(input)
}

/// A configurable title parser.
///
/// Construction compiles the configured extra release tags once; the
/// parser is then cheap to share and clone.
#[derive(Debug, Clone)]
pub struct Parser {
    config: ParserConfig,
    extra_tags: Option<Regex>,
}

impl Parser {
    /// Create a new parser with the given configuration.
    pub fn new(config: ParserConfig) -> Self {
        let extra_tags = parser::compile_extra_tags(&config.extra_release_tags);
        Self { config, extra_tags }
    }

    /// The configuration this parser was built with.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a raw title into a [`ParsedQuery`].
    pub fn parse(&self, input: &str) -> ParsedQuery {
        parser::parse_with_config(input, &self.config, self.extra_tags.as_ref())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}
