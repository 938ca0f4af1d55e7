//! Failure taxonomy for poster resolution.
//!
//! None of these errors ever reaches a caller of the resolver: each one
//! marks a branch of the fallback chain that produced nothing. They exist
//! so every failure can be logged under a stable label.

/// Why one step of a resolution produced no artwork.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The title parser had to fall back to plain symbol stripping.
    #[error("Title parsing degraded: {0}")]
    ParseDegraded(String),

    /// The catalog could not be reached (connect failure or timeout).
    #[error("Catalog unreachable: {0}")]
    CatalogUnreachable(String),

    /// The catalog answered with a non-2xx status or an undecodable body.
    #[error("Catalog response malformed: {0}")]
    CatalogMalformed(String),

    /// The search returned nothing with a usable title.
    #[error("No candidates for query: {0}")]
    NoCandidates(String),

    /// A candidate was chosen but it has no poster.
    #[error("Candidate {0} has no artwork")]
    NoArtwork(u64),
}

impl Error {
    /// Create a new ParseDegraded error.
    pub fn parse_degraded<S: Into<String>>(msg: S) -> Self {
        Self::ParseDegraded(msg.into())
    }

    /// Create a new CatalogUnreachable error.
    pub fn unreachable<S: Into<String>>(msg: S) -> Self {
        Self::CatalogUnreachable(msg.into())
    }

    /// Create a new CatalogMalformed error.
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::CatalogMalformed(msg.into())
    }

    /// Create a new NoCandidates error.
    pub fn no_candidates<S: Into<String>>(query: S) -> Self {
        Self::NoCandidates(query.into())
    }

    /// Stable snake_case label used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ParseDegraded(_) => "parse_degraded",
            Self::CatalogUnreachable(_) => "catalog_unreachable",
            Self::CatalogMalformed(_) => "catalog_malformed",
            Self::NoCandidates(_) => "no_candidates",
            Self::NoArtwork(_) => "no_artwork",
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
