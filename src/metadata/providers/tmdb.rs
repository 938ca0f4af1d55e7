//! TMDB (The Movie Database) catalog client.
//!
//! Implements [`Catalog`] by querying the TMDB v3 REST API.
//!
//! Features:
//! - Token-bucket rate limiting via [`governor`] (configurable, default 4 requests / second).
//! - Short per-request timeout (default 6 seconds).
//! - No retries: a failed call is logged with its error kind and absorbed
//!   as an empty result, and the resolver moves on to its next fallback.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use reelposter_common::{Candidate, Error, MediaKind, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::CatalogConfig;
use crate::metadata::provider::Catalog;

// ---------------------------------------------------------------------------
// TMDB API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbSearchResponse<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TmdbMovieSearchResult {
    id: u64,
    title: Option<String>,
    release_date: Option<String>,
    poster_path: Option<String>,
    popularity: Option<f64>,
    vote_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TmdbTvSearchResult {
    id: u64,
    name: Option<String>,
    first_air_date: Option<String>,
    poster_path: Option<String>,
    popularity: Option<f64>,
    vote_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TmdbSeasonDetail {
    poster_path: Option<String>,
}

impl From<TmdbMovieSearchResult> for Candidate {
    fn from(r: TmdbMovieSearchResult) -> Self {
        Candidate {
            id: r.id,
            kind: MediaKind::Movie,
            title: r.title,
            release_date: r.release_date,
            poster_path: r.poster_path,
            popularity: r.popularity.unwrap_or_default(),
            vote_count: r.vote_count.unwrap_or_default(),
        }
    }
}

impl From<TmdbTvSearchResult> for Candidate {
    fn from(r: TmdbTvSearchResult) -> Self {
        Candidate {
            id: r.id,
            kind: MediaKind::Series,
            title: r.name,
            release_date: r.first_air_date,
            poster_path: r.poster_path,
            popularity: r.popularity.unwrap_or_default(),
            vote_count: r.vote_count.unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Client implementation
// ---------------------------------------------------------------------------

type DirectRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// TMDB catalog client.
///
/// Built once at startup from [`CatalogConfig`] and shared behind an `Arc`;
/// it holds no mutable state besides the rate limiter.
///
/// # Examples
///
/// ```no_run
/// use reelposter::config::CatalogConfig;
/// use reelposter::metadata::providers::TmdbCatalog;
///
/// let config = CatalogConfig {
///     api_key: "your-api-key".into(),
///     ..CatalogConfig::default()
/// };
/// let catalog = TmdbCatalog::new(&config)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct TmdbCatalog {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
    rate_limiter: DirectRateLimiter,
}

impl TmdbCatalog {
    /// Create a new TMDB client from configuration.
    pub fn new(config: &CatalogConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.api_key.trim().is_empty() {
            warn!("No TMDB API key configured; every title will resolve to the placeholder");
        }

        let per_second = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(per_second));

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            rate_limiter,
        })
    }

    /// Returns `true` when an API key is configured.
    pub fn is_available(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Rate-limited GET returning the decoded JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| classify(e, path))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::malformed(format!("{path} returned HTTP {status}")));
        }

        resp.json::<T>().await.map_err(|e| classify(e, path))
    }

    /// Movie search that reports why it failed.
    pub async fn try_search_movies(&self, query: &str, year: Option<u16>) -> Result<Vec<Candidate>> {
        let mut params = vec![
            ("query", query.to_string()),
            ("include_adult", "false".to_string()),
            ("page", "1".to_string()),
        ];
        if let Some(y) = year {
            params.push(("year", y.to_string()));
        }

        debug!(query, ?year, "TMDB search movie");
        let body: TmdbSearchResponse<TmdbMovieSearchResult> =
            self.get_json("/search/movie", &params).await?;
        Ok(body.results.into_iter().map(Candidate::from).collect())
    }

    /// Series search that reports why it failed.
    pub async fn try_search_series(
        &self,
        query: &str,
        first_air_year: Option<u16>,
    ) -> Result<Vec<Candidate>> {
        let mut params = vec![("query", query.to_string()), ("page", "1".to_string())];
        if let Some(y) = first_air_year {
            params.push(("first_air_date_year", y.to_string()));
        }

        debug!(query, ?first_air_year, "TMDB search TV");
        let body: TmdbSearchResponse<TmdbTvSearchResult> =
            self.get_json("/search/tv", &params).await?;
        Ok(body.results.into_iter().map(Candidate::from).collect())
    }

    /// Season poster lookup that reports why it failed.
    ///
    /// `Ok(None)` means the season exists but has no poster.
    pub async fn try_season_artwork(&self, series_id: u64, season: u16) -> Result<Option<String>> {
        let path = format!("/tv/{series_id}/season/{season}");
        debug!(series_id, season, "TMDB get season");
        let detail: TmdbSeasonDetail = self
            .get_json(&path, &[("language", self.language.clone())])
            .await?;
        Ok(detail
            .poster_path
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty()))
    }
}

/// Sort a transport error into the catalog failure taxonomy.
///
/// The URL is stripped first: it carries the API key as a query parameter.
fn classify(err: reqwest::Error, path: &str) -> Error {
    let err = err.without_url();
    if err.is_decode() || err.is_status() {
        Error::malformed(format!("{path}: {err}"))
    } else {
        Error::unreachable(format!("{path}: {err}"))
    }
}

#[async_trait]
impl Catalog for TmdbCatalog {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    async fn search_movies(&self, query: &str, year: Option<u16>) -> Vec<Candidate> {
        if !self.is_available() {
            debug!("TMDB API key not configured, skipping movie search");
            return Vec::new();
        }
        self.try_search_movies(query, year)
            .await
            .unwrap_or_else(|e| {
                warn!(kind = e.kind(), error = %e, query, "TMDB movie search failed");
                Vec::new()
            })
    }

    async fn search_series(&self, query: &str, first_air_year: Option<u16>) -> Vec<Candidate> {
        if !self.is_available() {
            debug!("TMDB API key not configured, skipping TV search");
            return Vec::new();
        }
        self.try_search_series(query, first_air_year)
            .await
            .unwrap_or_else(|e| {
                warn!(kind = e.kind(), error = %e, query, "TMDB TV search failed");
                Vec::new()
            })
    }

    async fn season_artwork(&self, series_id: u64, season: u16) -> Option<String> {
        if !self.is_available() {
            return None;
        }
        self.try_season_artwork(series_id, season)
            .await
            .unwrap_or_else(|e| {
                warn!(kind = e.kind(), error = %e, series_id, season, "TMDB season lookup failed");
                None
            })
    }
}
