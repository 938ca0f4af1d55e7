//! Poster resolution.
//!
//! [`PosterResolver`] turns a raw filename into one artwork URL. It parses
//! the title, then walks a fixed fallback chain through the catalog:
//!
//! ```text
//! Start ─┬─ forced movie ──► ForcedMovie ──────────────────────┬─► Done
//!        ├─ forced series ─► ForcedSeries ─┬─► SeasonLookup ──┤
//!        └─ otherwise ─────► AutoMovie ─► AutoSeries ─┘        │
//!                                 any dead end ─► Fallback ───┘
//! ```
//!
//! Every failure on the way (unreachable catalog, empty results, missing
//! poster) only moves the machine forward. The caller always gets a URL,
//! at worst the configured placeholder.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use reelposter_common::{Candidate, Error};
use reelposter_parser::{ForcedType, ParsedQuery, Parser};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{ArtworkConfig, Config};

use super::cache::ResolutionCache;
use super::provider::Catalog;
use super::ranker::Ranker;

/// States of the resolution state machine, as recorded in a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolveState {
    Start,
    ForcedMovie,
    ForcedSeries,
    AutoMovie,
    AutoSeries,
    SeasonLookup,
    Fallback,
    Done,
}

/// Where the returned URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkSource {
    Movie,
    SeasonPoster,
    ShowPoster,
    Placeholder,
}

/// Outcome of one resolution.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Absolute artwork URL, never empty.
    pub url: String,
    pub source: ArtworkSource,
    pub parsed: ParsedQuery,
    /// Every state visited, `Start` first and `Done` last.
    pub trace: Vec<ResolveState>,
}

impl Resolution {
    pub fn is_placeholder(&self) -> bool {
        self.source == ArtworkSource::Placeholder
    }
}

/// Internal step, carrying whatever the next state needs.
enum Step {
    Start,
    ForcedMovie,
    ForcedSeries,
    AutoMovie,
    AutoSeries,
    SeasonLookup { series: Candidate, season: u16 },
    Fallback,
    Done { url: String, source: ArtworkSource },
}

impl Step {
    fn state(&self) -> ResolveState {
        match self {
            Step::Start => ResolveState::Start,
            Step::ForcedMovie => ResolveState::ForcedMovie,
            Step::ForcedSeries => ResolveState::ForcedSeries,
            Step::AutoMovie => ResolveState::AutoMovie,
            Step::AutoSeries => ResolveState::AutoSeries,
            Step::SeasonLookup { .. } => ResolveState::SeasonLookup,
            Step::Fallback => ResolveState::Fallback,
            Step::Done { .. } => ResolveState::Done,
        }
    }
}

/// Resolves raw titles to poster URLs.
///
/// Built once with an explicit catalog and shared across tasks; it holds
/// no per-request state.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use reelposter::config::Config;
/// use reelposter::metadata::{PosterResolver, TmdbCatalog};
///
/// # async fn run() -> anyhow::Result<()> {
/// let config = Config::default();
/// let catalog = Arc::new(TmdbCatalog::new(&config.catalog)?);
/// let resolver = PosterResolver::from_config(catalog, &config);
///
/// let url = resolver.resolve_poster("Stranger Things S04 (2016) (Tv)").await;
/// assert!(url.starts_with("https://"));
/// # Ok(())
/// # }
/// ```
pub struct PosterResolver {
    catalog: Arc<dyn Catalog>,
    parser: Parser,
    ranker: Ranker,
    artwork: ArtworkConfig,
    cache: Option<ResolutionCache>,
}

impl PosterResolver {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        parser: Parser,
        ranker: Ranker,
        artwork: ArtworkConfig,
    ) -> Self {
        Self {
            catalog,
            parser,
            ranker,
            artwork,
            cache: None,
        }
    }

    /// Build a resolver with parser, ranker, artwork and cache settings
    /// taken from `config`.
    pub fn from_config(catalog: Arc<dyn Catalog>, config: &Config) -> Self {
        let resolver = Self::new(
            catalog,
            Parser::new(config.parser.clone()),
            Ranker::new(config.scoring.clone()),
            config.artwork.clone(),
        );
        if config.cache.enabled {
            resolver.with_cache(ResolutionCache::new(
                config.cache.max_entries,
                config.cache.ttl_secs,
            ))
        } else {
            resolver
        }
    }

    pub fn with_cache(mut self, cache: ResolutionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn cache(&self) -> Option<&ResolutionCache> {
        self.cache.as_ref()
    }

    /// Resolve `raw` to an artwork URL. Never fails; falls back to the
    /// placeholder.
    pub async fn resolve_poster(&self, raw: &str) -> String {
        self.resolve(raw).await.url
    }

    /// Resolve many titles concurrently, at most `concurrency` at a time.
    /// Results come back in input order. Expired cache entries are dropped
    /// before the batch starts.
    pub async fn resolve_many<I, S>(&self, titles: I, concurrency: usize) -> Vec<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(cache) = &self.cache {
            cache.cleanup_expired();
        }

        stream::iter(titles)
            .map(|title| async move { self.resolve(title.as_ref()).await })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    /// Resolve `raw`, returning the URL together with how it was found.
    pub async fn resolve(&self, raw: &str) -> Resolution {
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(raw) {
                debug!(raw, url = %hit.url, "Resolution cache hit");
                return hit;
            }
        }

        let parsed = self.parser.parse(raw);
        if parsed.degraded {
            let err = Error::parse_degraded(raw);
            debug!(kind = err.kind(), clean_title = %parsed.clean_title, "{}", err);
        }

        let mut trace = Vec::new();
        let mut step = Step::Start;

        let (url, source) = loop {
            trace.push(step.state());
            debug!(state = ?step.state(), title = %parsed.clean_title, "Resolver step");

            step = match step {
                Step::Start => self.start(&parsed),
                Step::ForcedMovie => self.movie_step(&parsed, Step::Fallback).await,
                Step::AutoMovie => self.movie_step(&parsed, Step::AutoSeries).await,
                Step::ForcedSeries | Step::AutoSeries => self.series_step(&parsed).await,
                Step::SeasonLookup { series, season } => self.season_step(&series, season).await,
                Step::Fallback => Step::Done {
                    url: self.artwork.fallback_url.clone(),
                    source: ArtworkSource::Placeholder,
                },
                Step::Done { url, source } => break (url, source),
            };
        };

        info!(raw, catalog = self.catalog.name(), url = %url, source = ?source, "Resolved poster");

        let resolution = Resolution {
            url,
            source,
            parsed,
            trace,
        };

        if let Some(cache) = &self.cache {
            cache.insert(raw, &resolution);
        }

        resolution
    }

    fn start(&self, parsed: &ParsedQuery) -> Step {
        if parsed.clean_title.is_empty() {
            return Step::Fallback;
        }
        match parsed.forced_type {
            ForcedType::Movie => Step::ForcedMovie,
            ForcedType::Series => Step::ForcedSeries,
            ForcedType::Unknown => Step::AutoMovie,
        }
    }

    /// Movie search. A chosen movie with a poster ends the chain; anything
    /// else moves on to `otherwise`.
    async fn movie_step(&self, parsed: &ParsedQuery, otherwise: Step) -> Step {
        let candidates = self
            .catalog
            .search_movies(&parsed.clean_title, parsed.search_year())
            .await;

        let Some(choice) = self
            .ranker
            .rank(&candidates, &parsed.clean_title, parsed.search_year())
        else {
            log_dead_end(&Error::no_candidates(&parsed.clean_title));
            return otherwise;
        };

        debug!(
            id = choice.candidate.id,
            title = choice.candidate.display_title().unwrap_or_default(),
            score = choice.score,
            "Best movie match"
        );

        match choice.candidate.poster() {
            Some(path) => Step::Done {
                url: self.artwork.poster_url(path),
                source: ArtworkSource::Movie,
            },
            None => {
                log_dead_end(&Error::NoArtwork(choice.candidate.id));
                otherwise
            }
        }
    }

    /// Series search, then the season poster when a season was parsed.
    async fn series_step(&self, parsed: &ParsedQuery) -> Step {
        let year_filter = if self.artwork.filter_series_by_year {
            parsed.search_year()
        } else {
            None
        };

        let candidates = self
            .catalog
            .search_series(&parsed.clean_title, year_filter)
            .await;

        let Some(choice) = self
            .ranker
            .rank(&candidates, &parsed.clean_title, parsed.search_year())
        else {
            log_dead_end(&Error::no_candidates(&parsed.clean_title));
            return Step::Fallback;
        };

        debug!(
            id = choice.candidate.id,
            title = choice.candidate.display_title().unwrap_or_default(),
            score = choice.score,
            "Best series match"
        );

        match parsed.season {
            Some(season) => Step::SeasonLookup {
                series: choice.candidate.clone(),
                season,
            },
            None => self.show_poster(choice.candidate),
        }
    }

    async fn season_step(&self, series: &Candidate, season: u16) -> Step {
        match self.catalog.season_artwork(series.id, season).await {
            Some(path) if !path.trim().is_empty() => Step::Done {
                url: self.artwork.poster_url(&path),
                source: ArtworkSource::SeasonPoster,
            },
            _ => {
                debug!(series_id = series.id, season, "No season poster, using show poster");
                self.show_poster(series)
            }
        }
    }

    fn show_poster(&self, series: &Candidate) -> Step {
        match series.poster() {
            Some(path) => Step::Done {
                url: self.artwork.poster_url(path),
                source: ArtworkSource::ShowPoster,
            },
            None => {
                log_dead_end(&Error::NoArtwork(series.id));
                Step::Fallback
            }
        }
    }
}

fn log_dead_end(err: &Error) {
    debug!(kind = err.kind(), "{}", err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reelposter_common::MediaKind;
    use std::sync::Mutex;

    const PLACEHOLDER: &str = "https://cdn-icons-png.flaticon.com/512/565/565547.png";

    #[derive(Default)]
    struct StubCatalog {
        movies: Vec<Candidate>,
        series: Vec<Candidate>,
        season_poster: Option<String>,
        calls: Mutex<Vec<String>>,
    }

    impl StubCatalog {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl Catalog for StubCatalog {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn search_movies(&self, query: &str, year: Option<u16>) -> Vec<Candidate> {
            self.record(format!("movies:{query}:{year:?}"));
            self.movies.clone()
        }

        async fn search_series(&self, query: &str, year: Option<u16>) -> Vec<Candidate> {
            self.record(format!("series:{query}:{year:?}"));
            self.series.clone()
        }

        async fn season_artwork(&self, series_id: u64, season: u16) -> Option<String> {
            self.record(format!("season:{series_id}:{season}"));
            self.season_poster.clone()
        }
    }

    fn resolver(catalog: Arc<StubCatalog>) -> PosterResolver {
        PosterResolver::new(
            catalog,
            Parser::default(),
            Ranker::default(),
            ArtworkConfig::default(),
        )
    }

    fn movie(id: u64, title: &str, date: &str, poster: Option<&str>) -> Candidate {
        let c = Candidate::new(id, MediaKind::Movie)
            .with_title(title)
            .with_release_date(date);
        match poster {
            Some(p) => c.with_poster(p),
            None => c,
        }
    }

    fn show(id: u64, name: &str, poster: Option<&str>) -> Candidate {
        let c = Candidate::new(id, MediaKind::Series).with_title(name);
        match poster {
            Some(p) => c.with_poster(p),
            None => c,
        }
    }

    #[tokio::test]
    async fn forced_movie_never_searches_series() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![movie(1, "Animal", "2023-12-01", Some("/animal.jpg"))],
            series: vec![show(2, "Animal", Some("/show.jpg"))],
            ..Default::default()
        });
        let res = resolver(catalog.clone()).resolve("Animal (2023) (Movie)").await;

        assert_eq!(res.url, "https://image.tmdb.org/t/p/w500/animal.jpg");
        assert_eq!(res.source, ArtworkSource::Movie);
        assert_eq!(res.parsed.forced_type, ForcedType::Movie);
        assert_eq!(
            res.trace,
            vec![ResolveState::Start, ResolveState::ForcedMovie, ResolveState::Done]
        );
        assert_eq!(catalog.calls(), vec!["movies:Animal:Some(2023)"]);
    }

    #[tokio::test]
    async fn forced_movie_without_match_falls_back() {
        let catalog = Arc::new(StubCatalog {
            series: vec![show(2, "Animal", Some("/show.jpg"))],
            ..Default::default()
        });
        let res = resolver(catalog.clone()).resolve("Animal (Movie)").await;

        assert_eq!(res.url, PLACEHOLDER);
        assert!(res.is_placeholder());
        assert!(!res.trace.contains(&ResolveState::AutoSeries));
        assert!(catalog.calls().iter().all(|c| !c.starts_with("series")));
    }

    #[tokio::test]
    async fn forced_movie_without_poster_falls_back() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![movie(1, "Animal", "2023-12-01", None)],
            ..Default::default()
        });
        let res = resolver(catalog.clone()).resolve("Animal (Movie)").await;

        assert_eq!(res.url, PLACEHOLDER);
        assert_eq!(
            res.trace,
            vec![
                ResolveState::Start,
                ResolveState::ForcedMovie,
                ResolveState::Fallback,
                ResolveState::Done
            ]
        );
    }

    #[tokio::test]
    async fn forced_series_uses_season_poster() {
        let catalog = Arc::new(StubCatalog {
            series: vec![show(66732, "Stranger Things", Some("/show.jpg"))],
            season_poster: Some("/s4.jpg".to_string()),
            ..Default::default()
        });
        let res = resolver(catalog.clone())
            .resolve("Stranger Things S04 (2016) (Tv)")
            .await;

        assert_eq!(res.url, "https://image.tmdb.org/t/p/w500/s4.jpg");
        assert_eq!(res.source, ArtworkSource::SeasonPoster);
        assert_eq!(res.parsed.season, Some(4));
        assert_eq!(
            res.trace,
            vec![
                ResolveState::Start,
                ResolveState::ForcedSeries,
                ResolveState::SeasonLookup,
                ResolveState::Done
            ]
        );
        assert_eq!(
            catalog.calls(),
            vec!["series:Stranger Things:None", "season:66732:4"]
        );
    }

    #[tokio::test]
    async fn season_lookup_falls_back_to_show_poster() {
        let catalog = Arc::new(StubCatalog {
            series: vec![show(10, "Dark", Some("/dark.jpg"))],
            season_poster: None,
            ..Default::default()
        });
        let res = resolver(catalog).resolve("Dark S02 (TV)").await;

        assert_eq!(res.url, "https://image.tmdb.org/t/p/w500/dark.jpg");
        assert_eq!(res.source, ArtworkSource::ShowPoster);
    }

    #[tokio::test]
    async fn season_lookup_without_any_poster_falls_back() {
        let catalog = Arc::new(StubCatalog {
            series: vec![show(10, "Dark", None)],
            ..Default::default()
        });
        let res = resolver(catalog).resolve("Dark S02 (TV)").await;

        assert_eq!(res.url, PLACEHOLDER);
        assert_eq!(
            res.trace,
            vec![
                ResolveState::Start,
                ResolveState::ForcedSeries,
                ResolveState::SeasonLookup,
                ResolveState::Fallback,
                ResolveState::Done
            ]
        );
    }

    #[tokio::test]
    async fn forced_series_without_season_uses_show_poster() {
        let catalog = Arc::new(StubCatalog {
            series: vec![show(10, "Dark", Some("/dark.jpg"))],
            ..Default::default()
        });
        let res = resolver(catalog.clone()).resolve("Dark (Series)").await;

        assert_eq!(res.source, ArtworkSource::ShowPoster);
        assert_eq!(catalog.calls(), vec!["series:Dark:None"]);
    }

    #[tokio::test]
    async fn empty_title_goes_straight_to_fallback() {
        let catalog = Arc::new(StubCatalog::default());
        let res = resolver(catalog.clone()).resolve("").await;

        assert_eq!(res.url, PLACEHOLDER);
        assert_eq!(res.parsed.clean_title, "");
        assert_eq!(
            res.trace,
            vec![ResolveState::Start, ResolveState::Fallback, ResolveState::Done]
        );
        assert!(catalog.calls().is_empty());
    }

    #[tokio::test]
    async fn nothing_found_walks_the_whole_chain() {
        let catalog = Arc::new(StubCatalog::default());
        let res = resolver(catalog.clone()).resolve("Some Obscure Thing 2019").await;

        assert_eq!(res.url, PLACEHOLDER);
        assert_eq!(
            res.trace,
            vec![
                ResolveState::Start,
                ResolveState::AutoMovie,
                ResolveState::AutoSeries,
                ResolveState::Fallback,
                ResolveState::Done
            ]
        );
        assert_eq!(
            catalog.calls(),
            vec![
                "movies:Some Obscure Thing:Some(2019)",
                "series:Some Obscure Thing:None"
            ]
        );
    }

    #[tokio::test]
    async fn auto_prefers_movie_with_poster() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![movie(1, "Fargo", "1996-03-08", Some("/fargo.jpg"))],
            series: vec![show(2, "Fargo", Some("/fargo-tv.jpg"))],
            ..Default::default()
        });
        let res = resolver(catalog.clone()).resolve("Fargo.1996.1080p").await;

        assert_eq!(res.source, ArtworkSource::Movie);
        assert_eq!(catalog.calls().len(), 1);
    }

    #[tokio::test]
    async fn auto_movie_without_poster_moves_to_series() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![movie(1, "Fargo", "", None)],
            series: vec![show(2, "Fargo", Some("/fargo-tv.jpg"))],
            season_poster: Some("/fargo-s3.jpg".to_string()),
            ..Default::default()
        });
        let res = resolver(catalog.clone()).resolve("Fargo S03E01 720p").await;

        assert_eq!(res.url, "https://image.tmdb.org/t/p/w500/fargo-s3.jpg");
        assert_eq!(
            res.trace,
            vec![
                ResolveState::Start,
                ResolveState::AutoMovie,
                ResolveState::AutoSeries,
                ResolveState::SeasonLookup,
                ResolveState::Done
            ]
        );
        assert_eq!(catalog.calls()[2], "season:2:3");
    }

    #[tokio::test]
    async fn series_year_filter_is_opt_in() {
        let catalog = Arc::new(StubCatalog::default());
        let artwork = ArtworkConfig {
            filter_series_by_year: true,
            ..ArtworkConfig::default()
        };
        let resolver = PosterResolver::new(
            catalog.clone(),
            Parser::default(),
            Ranker::default(),
            artwork,
        );
        resolver.resolve("Dark 2017 (TV)").await;

        assert_eq!(catalog.calls(), vec!["series:Dark:Some(2017)"]);
    }

    #[tokio::test]
    async fn untitled_candidates_are_ignored() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![Candidate::new(1, MediaKind::Movie).with_poster("/x.jpg")],
            ..Default::default()
        });
        let res = resolver(catalog).resolve("Heat (Movie)").await;
        assert!(res.is_placeholder());
    }

    #[tokio::test]
    async fn resolve_poster_always_returns_absolute_url() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![movie(1, "Heat", "1995-12-15", Some("heat.jpg"))],
            ..Default::default()
        });
        let resolver = resolver(catalog);
        for raw in ["", "   ", "!!!", "Heat 1995", "(2023)", "S01E01", "\u{1F3AC}"] {
            let url = resolver.resolve_poster(raw).await;
            assert!(url.starts_with("https://"), "{raw:?} -> {url}");
        }
    }

    #[tokio::test]
    async fn resolve_many_keeps_input_order() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![movie(1, "Heat", "1995-12-15", Some("/heat.jpg"))],
            ..Default::default()
        });
        let resolver = resolver(catalog);
        let titles = ["Heat 1995", "", "Heat (Movie)"];
        let results = resolver.resolve_many(titles, 2).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].source, ArtworkSource::Movie);
        assert_eq!(results[1].source, ArtworkSource::Placeholder);
        assert_eq!(results[2].parsed.forced_type, ForcedType::Movie);
    }

    #[tokio::test]
    async fn cache_skips_catalog_on_repeat() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![movie(1, "Heat", "1995-12-15", Some("/heat.jpg"))],
            ..Default::default()
        });
        let resolver = resolver(catalog.clone()).with_cache(ResolutionCache::new(16, 3600));

        let first = resolver.resolve("Heat 1995").await;
        let second = resolver.resolve("  heat   1995 ").await;

        assert_eq!(first.url, second.url);
        assert_eq!(catalog.calls().len(), 1);
    }

    #[tokio::test]
    async fn year_inside_title_is_not_a_filter() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![
                movie(297762, "Wonder Woman", "2017-05-30", Some("/ww.jpg"))
                    .with_popularity(60.0)
                    .with_vote_count(19000),
                movie(464052, "Wonder Woman 1984", "2020-12-16", Some("/ww84.jpg"))
                    .with_popularity(45.0)
                    .with_vote_count(7000),
            ],
            ..Default::default()
        });
        let res = resolver(catalog.clone())
            .resolve("Wonder Woman 1984 (2020) (Movie)")
            .await;

        assert_eq!(res.url, "https://image.tmdb.org/t/p/w500/ww84.jpg");
        assert_eq!(catalog.calls(), vec!["movies:Wonder Woman 1984:None"]);
    }

    #[tokio::test]
    async fn multi_episode_file_reaches_season_lookup() {
        let catalog = Arc::new(StubCatalog {
            series: vec![show(1668, "Friends", Some("/friends.jpg"))],
            season_poster: Some("/friends-s5.jpg".to_string()),
            ..Default::default()
        });
        let res = resolver(catalog.clone()).resolve("Friends.S05E01E02.720p").await;

        assert_eq!(res.source, ArtworkSource::SeasonPoster);
        assert_eq!(catalog.calls().last().unwrap(), "season:1668:5");
    }

    #[tokio::test]
    async fn batch_drops_expired_cache_entries() {
        let catalog = Arc::new(StubCatalog {
            movies: vec![movie(1, "Heat", "1995-12-15", Some("/heat.jpg"))],
            ..Default::default()
        });
        let resolver = resolver(catalog).with_cache(ResolutionCache::new(16, 0));

        resolver.resolve("Heat 1995").await;
        assert_eq!(resolver.cache().unwrap().len(), 1);

        resolver.resolve_many(Vec::<String>::new(), 1).await;
        assert!(resolver.cache().unwrap().is_empty());
    }

    #[tokio::test]
    async fn placeholder_is_not_cached() {
        let catalog = Arc::new(StubCatalog::default());
        let resolver = resolver(catalog.clone()).with_cache(ResolutionCache::new(16, 3600));

        resolver.resolve("Heat (Movie)").await;
        resolver.resolve("Heat (Movie)").await;

        assert_eq!(catalog.calls().len(), 2);
        assert!(resolver.cache().unwrap().is_empty());
    }
}
