//! Character n-gram F-score (ChrF), after Popović, WMT 2015.
//!
//! Scoring is corpus-level: window counts from every aligned pair are summed
//! before precision and recall are taken. Two behaviours are kept deliberately:
//!
//! * n-grams are built from filtered characters but searched for in the
//!   unfiltered joined string of the other side;
//! * the short-input check looks only at the last pair processed, and when it
//!   fires it overrides all accumulated counts.

pub mod ngrams;
pub mod stats;

use std::collections::BTreeSet;
use std::sync::LazyLock;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use ngrams::{MatchCounts, PreparedSentence, Sentence};
pub use stats::{ChrFStats, CorpusStatistics};

pub const DEFAULT_ORDER: usize = 6;
pub const DEFAULT_BETA: f64 = 1.0;

/// Ready-made ChrF3 scorer (beta = 3, otherwise default).
pub static CHRF3: LazyLock<ChrFEvaluator> = LazyLock::new(|| {
    ChrFEvaluator::from_valid(ChrFConfig {
        beta: 3.0,
        ..ChrFConfig::default()
    })
});

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChrFError {
    #[error("n-gram order must be at least 1")]
    ZeroOrder,
    #[error("beta must be a finite positive number, got {0}")]
    InvalidBeta(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChrFConfig {
    pub order: usize,
    pub beta: f64,
    pub ignored: BTreeSet<char>,
    pub display_name: Option<String>,
}

impl Default for ChrFConfig {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            beta: DEFAULT_BETA,
            ignored: BTreeSet::from([' ']),
            display_name: None,
        }
    }
}

/// Immutable scorer. Safe to share across threads; scoring never mutates it.
#[derive(Debug, Clone)]
pub struct ChrFEvaluator {
    order: usize,
    beta: f64,
    beta_2: f64,
    ignored: BTreeSet<char>,
    name: String,
}

impl Default for ChrFEvaluator {
    fn default() -> Self {
        Self::from_valid(ChrFConfig::default())
    }
}

impl ChrFEvaluator {
    pub fn new(config: ChrFConfig) -> Result<Self, ChrFError> {
        if config.order == 0 {
            return Err(ChrFError::ZeroOrder);
        }
        if !config.beta.is_finite() || config.beta <= 0.0 {
            return Err(ChrFError::InvalidBeta(config.beta));
        }
        Ok(Self::from_valid(config))
    }

    pub fn with_beta(beta: f64) -> Result<Self, ChrFError> {
        Self::new(ChrFConfig {
            beta,
            ..ChrFConfig::default()
        })
    }

    fn from_valid(config: ChrFConfig) -> Self {
        let name = config
            .display_name
            .unwrap_or_else(|| default_display_name(config.beta));
        Self {
            order: config.order,
            beta: config.beta,
            beta_2: config.beta * config.beta,
            ignored: config.ignored,
            name,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn ignored(&self) -> &BTreeSet<char> {
        &self.ignored
    }

    pub fn config(&self) -> ChrFConfig {
        ChrFConfig {
            order: self.order,
            beta: self.beta,
            ignored: self.ignored.clone(),
            display_name: Some(self.name.clone()),
        }
    }

    /// Accumulates window counts over the aligned pairs. Pairs beyond the
    /// shorter corpus are dropped.
    pub fn statistics<S: Sentence>(&self, hypotheses: &[S], references: &[S]) -> CorpusStatistics {
        let mut stats = CorpusStatistics::default();
        for (hyp, reference) in hypotheses.iter().zip(references) {
            let hyp = PreparedSentence::new(hyp, &self.ignored);
            let reference = PreparedSentence::new(reference, &self.ignored);
            stats.counts.accumulate(&hyp, &reference, self.order);
            stats.n_pairs += 1;
            stats.last_hypothesis = hyp;
            stats.last_reference = reference;
        }
        tracing::trace!(
            metric = %self.name,
            pairs = stats.n_pairs,
            precision_total = stats.counts.precision.total,
            precision_matched = stats.counts.precision.matched,
            recall_total = stats.counts.recall.total,
            recall_matched = stats.counts.recall.matched,
            "accumulated chrf statistics"
        );
        stats
    }

    /// Corpus-level ChrF in `[0, 1]`.
    pub fn score<S: Sentence>(&self, hypotheses: &[S], references: &[S]) -> f64 {
        self.statistics(hypotheses, references)
            .score(self.order, self.beta_2)
    }

    /// Scores every aligned pair as its own one-sentence corpus.
    pub fn sentence_scores<S: Sentence + Sync>(
        &self,
        hypotheses: &[S],
        references: &[S],
    ) -> Vec<f64> {
        hypotheses
            .par_iter()
            .zip(references.par_iter())
            .map(|(hyp, reference)| {
                self.score(std::slice::from_ref(hyp), std::slice::from_ref(reference))
            })
            .collect()
    }
}

fn default_display_name(beta: f64) -> String {
    format!("ChrF-{}", beta)
}

/// Corpus-level metric over tokenized sentences.
pub trait Metric: Send + Sync {
    fn name(&self) -> &str;

    fn evaluate(&self, hypotheses: &[Vec<String>], references: &[Vec<String>]) -> f64;
}

impl Metric for ChrFEvaluator {
    fn name(&self) -> &str {
        ChrFEvaluator::name(self)
    }

    fn evaluate(&self, hypotheses: &[Vec<String>], references: &[Vec<String>]) -> f64 {
        self.score(hypotheses, references)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/chrf/mod.rs"]
mod tests;
