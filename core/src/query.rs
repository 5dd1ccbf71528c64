//! Two-keyword "OR" search over a built [`KeywordIndex`].
//!
//! Both occurrence lists are already ranked, so the answer is the head of a
//! merge-sort style merge: take the higher frequency of the two heads, prefer
//! the first keyword on ties, skip documents already emitted, stop after
//! [`TOP_MATCHES`] documents.

use crate::tokenizer::{keyword, NoiseWords};
use crate::{KeywordIndex, Occurrence};

/// Maximum number of documents a query returns.
pub const TOP_MATCHES: usize = 5;

/// Merge two frequency-ranked lists into at most `limit` distinct documents.
///
/// A document seen a second time (it holds both keywords) is dropped; its
/// rank stays where the first sighting put it.
pub fn merge_top<'a>(first: &'a [Occurrence], second: &'a [Occurrence], limit: usize) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::with_capacity(limit.min(first.len() + second.len()));
    let (mut i, mut j) = (0, 0);
    while out.len() < limit && (i < first.len() || j < second.len()) {
        let take_first = match (first.get(i), second.get(j)) {
            (Some(a), Some(b)) => a.frequency >= b.frequency,
            (Some(_), None) => true,
            _ => false,
        };
        let next = if take_first {
            i += 1;
            &first[i - 1]
        } else {
            j += 1;
            &second[j - 1]
        };
        if !out.contains(&next.document.as_str()) {
            out.push(&next.document);
        }
    }
    out
}

impl KeywordIndex {
    /// Documents containing `kw1` or `kw2`, best first, at most five.
    ///
    /// Keywords are looked up as given. Unknown or malformed keywords simply
    /// contribute nothing; `None` means neither keyword matched anything.
    pub fn top_matches(&self, kw1: &str, kw2: &str) -> Option<Vec<String>> {
        let first = self.occurrences(kw1);
        let second = self.occurrences(kw2);
        if first.is_empty() && second.is_empty() {
            return None;
        }
        let hits = merge_top(first, second, TOP_MATCHES);
        Some(hits.into_iter().map(str::to_string).collect())
    }
}

/// Answers queries typed by a user, normalizing the raw words the same way
/// documents were scanned before hitting the index.
pub struct QueryEngine<'a> {
    index: &'a KeywordIndex,
    noise: &'a NoiseWords,
}

impl<'a> QueryEngine<'a> {
    pub fn new(index: &'a KeywordIndex, noise: &'a NoiseWords) -> Self { Self { index, noise } }

    pub fn search(&self, word1: &str, word2: &str) -> Option<Vec<String>> {
        let kw1 = keyword(word1, self.noise).unwrap_or_default();
        let kw2 = keyword(word2, self.noise).unwrap_or_default();
        tracing::debug!(%kw1, %kw2, "search");
        self.index.top_matches(&kw1, &kw2)
    }
}
