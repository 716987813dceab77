pub mod json;
pub mod text;

use serde::Serialize;

use crate::chrf::{ChrFEvaluator, CorpusStatistics};

pub const TOOL_NAME: &str = "kira-chrf";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    pub tool: String,
    pub version: String,
    pub metric: String,
    pub order: usize,
    pub beta: f64,
    pub ignored: Vec<String>,
    pub n_hypotheses: usize,
    pub n_references: usize,
    pub n_pairs: usize,
    /// `None` when the last pair was too short and decided the score.
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub degenerate: bool,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentences: Option<SentenceSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceSummary {
    pub mean: f64,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
    pub scores: Vec<f64>,
}

impl ScoreReport {
    pub fn new(
        evaluator: &ChrFEvaluator,
        stats: &CorpusStatistics,
        n_hypotheses: usize,
        n_references: usize,
    ) -> Self {
        let order = evaluator.order();
        let degenerate = stats.degenerate_score(order).is_some();
        let (precision, recall) = if degenerate {
            (None, None)
        } else {
            (Some(stats.counts.precision()), Some(stats.counts.recall()))
        };
        let beta = evaluator.beta();
        Self {
            tool: TOOL_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            metric: evaluator.name().to_string(),
            order,
            beta,
            ignored: evaluator.ignored().iter().map(|c| c.to_string()).collect(),
            n_hypotheses,
            n_references,
            n_pairs: stats.n_pairs,
            precision,
            recall,
            degenerate,
            score: stats.score(order, beta * beta),
            sentences: None,
        }
    }

    pub fn with_sentence_scores(mut self, scores: Vec<f64>) -> Self {
        self.sentences = Some(SentenceSummary {
            mean: mean(&scores),
            median: median(&scores),
            p10: p10(&scores),
            p90: p90(&scores),
            scores,
        });
        self
    }
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
