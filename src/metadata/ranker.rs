//! Candidate scoring and selection.
//!
//! A candidate's score is the sum of four independent signals:
//!
//! ```text
//! score = title_weight * similarity(query, title)
//!       + year_bonus                       (exact year match only)
//!       + popularity_max * x / (1 + x),    x = ln(1 + popularity) / popularity_scale
//!       + vote_max       * x / (1 + x),    x = ln(1 + vote_count) / vote_scale
//! ```
//!
//! Title similarity dominates. The popularity and vote terms are
//! log-compressed and bounded, so they only separate candidates whose
//! titles are about equally close.

use reelposter_common::Candidate;
use serde::{Deserialize, Serialize};

/// Tunable constants of the scoring function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Multiplier of the 0..1 title similarity.
    pub title_weight: f64,
    /// Flat bonus when the candidate's year equals the query year.
    pub year_bonus: f64,
    /// Upper bound of the popularity bonus.
    pub popularity_max: f64,
    /// Log-popularity at which half of `popularity_max` is reached.
    pub popularity_scale: f64,
    /// Upper bound of the vote-count bonus.
    pub vote_max: f64,
    /// Log-vote-count at which half of `vote_max` is reached.
    pub vote_scale: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            title_weight: 0.6,
            year_bonus: 0.35,
            popularity_max: 0.2,
            popularity_scale: 3.0,
            vote_max: 0.1,
            vote_scale: 5.0,
        }
    }
}

impl ScoringWeights {
    /// Check that every weight is finite, non-negative, and that scales
    /// are strictly positive.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("title_weight", self.title_weight),
            ("year_bonus", self.year_bonus),
            ("popularity_max", self.popularity_max),
            ("popularity_scale", self.popularity_scale),
            ("vote_max", self.vote_max),
            ("vote_scale", self.vote_scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a finite, non-negative number"));
            }
        }
        if self.popularity_scale == 0.0 || self.vote_scale == 0.0 {
            return Err("popularity_scale and vote_scale must be greater than 0".into());
        }
        Ok(())
    }
}

/// The winning candidate and its score.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedChoice<'a> {
    pub candidate: &'a Candidate,
    pub score: f64,
}

/// Scores candidates against a query and picks the best one.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: ScoringWeights,
}

impl Ranker {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Pick the highest-scoring candidate.
    ///
    /// Candidates without a display title are skipped. Ties go to the
    /// candidate seen first, so the catalog's own order breaks them.
    /// Returns `None` when nothing is left to choose from.
    pub fn rank<'a>(
        &self,
        candidates: &'a [Candidate],
        query_title: &str,
        query_year: Option<u16>,
    ) -> Option<RankedChoice<'a>> {
        let mut best: Option<RankedChoice<'a>> = None;

        for candidate in candidates {
            let Some(score) = self.score(candidate, query_title, query_year) else {
                continue;
            };
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(RankedChoice { candidate, score });
            }
        }

        best
    }

    /// Score one candidate, or `None` if it has no usable title.
    pub fn score(
        &self,
        candidate: &Candidate,
        query_title: &str,
        query_year: Option<u16>,
    ) -> Option<f64> {
        let title = candidate.display_title()?;
        let w = &self.weights;

        let similarity = title_similarity(query_title, title);

        let year_bonus = match (query_year, candidate.release_year()) {
            (Some(q), Some(r)) if q == r => w.year_bonus,
            _ => 0.0,
        };

        let popularity = saturating_log(candidate.popularity, w.popularity_scale, w.popularity_max);
        let votes = saturating_log(candidate.vote_count as f64, w.vote_scale, w.vote_max);

        Some(w.title_weight * similarity + year_bonus + popularity + votes)
    }
}

/// Case-insensitive normalized edit-distance similarity in `0.0..=1.0`.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

/// `max * x / (1 + x)` with `x = ln(1 + value) / scale`: zero at zero,
/// strictly increasing, never reaching `max`.
fn saturating_log(value: f64, scale: f64, max: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 || scale <= 0.0 {
        return 0.0;
    }
    let x = value.ln_1p() / scale;
    max * x / (1.0 + x)
}
