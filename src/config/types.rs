use reelposter_parser::ParserConfig;
use serde::{Deserialize, Serialize};

pub use crate::metadata::ranker::ScoringWeights;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub artwork: ArtworkConfig,

    #[serde(default)]
    pub scoring: ScoringWeights,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Root of the TMDB v3 API
    #[serde(default = "default_catalog_base_url")]
    pub base_url: String,

    /// TMDB API key. Without one every search comes back empty.
    #[serde(default)]
    pub api_key: String,

    /// Per-request timeout in seconds (default: 6)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,

    /// Language sent with season lookups
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_catalog_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            requests_per_second: default_requests_per_second(),
            language: default_language(),
        }
    }
}

fn default_catalog_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_timeout_secs() -> u64 {
    6
}

fn default_requests_per_second() -> u32 {
    4
}

fn default_language() -> String {
    "en-US".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtworkConfig {
    /// Image CDN root; the poster size and path are appended to it
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    #[serde(default = "default_poster_size")]
    pub poster_size: String,

    /// Returned whenever no poster can be found
    #[serde(default = "default_fallback_url")]
    pub fallback_url: String,

    /// Pass the parsed year to series search as a first-air-year filter.
    /// Off by default: a season's year rarely matches the show's premiere.
    #[serde(default)]
    pub filter_series_by_year: bool,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            image_base_url: default_image_base_url(),
            poster_size: default_poster_size(),
            fallback_url: default_fallback_url(),
            filter_series_by_year: false,
        }
    }
}

impl ArtworkConfig {
    /// Full URL for a catalog poster path, with exactly one `/` between
    /// each part.
    pub fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.image_base_url.trim_end_matches('/'),
            self.poster_size.trim_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_poster_size() -> String {
    "w500".to_string()
}

fn default_fallback_url() -> String {
    "https://cdn-icons-png.flaticon.com/512/565/565547.png".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum number of cached resolutions (default: 1024)
    #[serde(default = "default_cache_max_entries")]
    pub max_entries: usize,

    /// Seconds a cached resolution stays valid (default: 3600)
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_entries: default_cache_max_entries(),
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_cache_max_entries() -> usize {
    1024
}

fn default_cache_ttl_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Titles resolved at the same time in batch mode
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

fn default_concurrency() -> usize {
    4
}
