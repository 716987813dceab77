use std::collections::BTreeSet;

use serde::Serialize;

/// A tokenized sentence that can be flattened into a single space-joined string.
pub trait Sentence {
    fn joined(&self) -> String;
}

impl<T: AsRef<str>> Sentence for [T] {
    fn joined(&self) -> String {
        let mut out = String::with_capacity(self.iter().map(|t| t.as_ref().len() + 1).sum());
        for (i, token) in self.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(token.as_ref());
        }
        out
    }
}

impl<T: AsRef<str>> Sentence for Vec<T> {
    fn joined(&self) -> String {
        self.as_slice().joined()
    }
}

impl<T: AsRef<str>, const N: usize> Sentence for [T; N] {
    fn joined(&self) -> String {
        self.as_slice().joined()
    }
}

impl<S: Sentence + ?Sized> Sentence for &S {
    fn joined(&self) -> String {
        (**self).joined()
    }
}

/// One side of an aligned pair after joining and filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreparedSentence {
    /// Tokens joined with single spaces; this is the haystack for the other side.
    pub joined: String,
    /// Characters of `joined` with ignored characters removed, order and duplicates kept.
    pub chars: Vec<char>,
}

impl PreparedSentence {
    pub fn new<S: Sentence + ?Sized>(sentence: &S, ignored: &BTreeSet<char>) -> Self {
        let joined = sentence.joined();
        let chars = joined.chars().filter(|c| !ignored.contains(c)).collect();
        Self { joined, chars }
    }

    pub fn is_shorter_than(&self, order: usize) -> bool {
        self.chars.len() < order
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    pub total: u64,
    pub matched: u64,
}

impl MatchCounts {
    pub fn add(&mut self, other: MatchCounts) {
        self.total += other.total;
        self.matched += other.matched;
    }

    pub fn ratio(&self) -> f64 {
        self.matched as f64 / self.total as f64
    }
}

/// Counts every `order`-wide window of `chars` and how many of them occur as a
/// contiguous substring of `haystack`. The haystack is not filtered, so a window
/// only matches across a space if the space itself is not ignored.
pub fn count_matches(chars: &[char], order: usize, haystack: &str) -> MatchCounts {
    let mut counts = MatchCounts::default();
    if order == 0 || chars.len() < order {
        return counts;
    }
    let mut ngram = String::with_capacity(order * 4);
    for window in chars.windows(order) {
        counts.total += 1;
        ngram.clear();
        ngram.extend(window.iter());
        if haystack.contains(ngram.as_str()) {
            counts.matched += 1;
        }
    }
    counts
}

#[cfg(test)]
#[path = "../../tests/src_inline/chrf/ngrams.rs"]
mod tests;
