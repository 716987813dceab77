use serde::Serialize;

use crate::chrf::ngrams::{MatchCounts, PreparedSentence, count_matches};

/// Precision and recall window counters accumulated over a corpus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChrFStats {
    pub precision: MatchCounts,
    pub recall: MatchCounts,
}

impl ChrFStats {
    pub fn accumulate(
        &mut self,
        hypothesis: &PreparedSentence,
        reference: &PreparedSentence,
        order: usize,
    ) {
        self.precision
            .add(count_matches(&hypothesis.chars, order, &reference.joined));
        self.recall
            .add(count_matches(&reference.chars, order, &hypothesis.joined));
    }

    /// ChrP. NaN when no hypothesis window was counted.
    pub fn precision(&self) -> f64 {
        self.precision.ratio()
    }

    /// ChrR. NaN when no reference window was counted.
    pub fn recall(&self) -> f64 {
        self.recall.ratio()
    }

    /// Weighted harmonic mean of ChrP and ChrR; `beta_2` is beta squared.
    pub fn f_score(&self, beta_2: f64) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        if precision == 0.0 && recall == 0.0 {
            return 0.0;
        }
        (1.0 + beta_2) * ((precision * recall) / (beta_2 * precision + recall))
    }
}

/// Everything `score` needs: the accumulated counters and the last pair processed.
#[derive(Debug, Clone, Default)]
pub struct CorpusStatistics {
    pub counts: ChrFStats,
    pub n_pairs: usize,
    pub last_hypothesis: PreparedSentence,
    pub last_reference: PreparedSentence,
}

impl CorpusStatistics {
    /// Score decided by the last pair alone when either side is shorter than
    /// `order`. Earlier pairs are not consulted. An empty corpus behaves as one
    /// empty pair.
    pub fn degenerate_score(&self, order: usize) -> Option<f64> {
        if self.last_hypothesis.is_shorter_than(order)
            || self.last_reference.is_shorter_than(order)
        {
            if self.last_hypothesis.joined == self.last_reference.joined {
                Some(1.0)
            } else {
                Some(0.0)
            }
        } else {
            None
        }
    }

    pub fn score(&self, order: usize, beta_2: f64) -> f64 {
        match self.degenerate_score(order) {
            Some(score) => score,
            None => self.counts.f_score(beta_2),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/chrf/stats.rs"]
mod tests;
