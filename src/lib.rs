//! ChrF: character n-gram F-score between hypothesis and reference corpora.
//!
//! ```
//! use kira_chrf::chrf::CHRF3;
//!
//! let hyp = vec![vec!["evaluation"]];
//! let reference = vec![vec!["evaluation"]];
//! assert_eq!(CHRF3.score(&hyp, &reference), 1.0);
//! ```

pub mod chrf;
pub mod corpus;
pub mod logging;
pub mod report;

pub use chrf::{CHRF3, ChrFConfig, ChrFError, ChrFEvaluator, Metric};
