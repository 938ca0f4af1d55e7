//! Trait definition for metadata catalogs.
//!
//! This module defines the [`Catalog`] trait the resolver searches through.
//! A catalog wraps one external service (TMDB today) and answers the three
//! lookups a poster resolution needs.

use async_trait::async_trait;
use reelposter_common::Candidate;

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// Async trait that all metadata catalogs must implement.
///
/// Every method is infallible from the caller's point of view: network,
/// timeout and decode failures are logged by the implementation and come
/// back as an empty result. The resolver treats "no results" and "request
/// failed" the same way.
///
/// Catalogs are shared behind an `Arc` across concurrent resolutions, so
/// implementations must be `Send + Sync` and hold no per-request state.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Short, lowercase identifier for this catalog (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Search movies by title, optionally restricted to a release year.
    ///
    /// Results keep the catalog's own order.
    async fn search_movies(&self, query: &str, year: Option<u16>) -> Vec<Candidate>;

    /// Search series by name, optionally restricted to a first-air year.
    ///
    /// Results keep the catalog's own order.
    async fn search_series(&self, query: &str, first_air_year: Option<u16>) -> Vec<Candidate>;

    /// Poster path of one season of a series, if the catalog has one.
    async fn season_artwork(&self, series_id: u64, season: u16) -> Option<String>;
}
