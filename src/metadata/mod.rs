//! Poster resolution against an external metadata catalog.
//!
//! # Module layout
//!
//! - [`provider`] -- The [`Catalog`] trait the resolver searches through.
//! - [`providers`] -- Concrete catalog implementations (TMDB).
//! - [`ranker`] -- Candidate scoring and best-match selection.
//! - [`resolver`] -- The fallback state machine producing one URL per title.
//! - [`cache`] -- Optional in-memory cache of resolved artwork.

pub mod cache;
pub mod provider;
pub mod providers;
pub mod ranker;
pub mod resolver;

pub use cache::ResolutionCache;
pub use provider::Catalog;
pub use providers::TmdbCatalog;
pub use ranker::{RankedChoice, Ranker, ScoringWeights};
pub use resolver::{ArtworkSource, PosterResolver, Resolution, ResolveState};
