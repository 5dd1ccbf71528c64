use crate::error::{IndexError, Result};
use crate::DocumentKeywords;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref WORD_RE: Regex = Regex::new(r"\S+").expect("valid regex");
}

/// Words that are never indexed, stored lower-cased.
#[derive(Debug, Clone, Default)]
pub struct NoiseWords(HashSet<String>);

impl NoiseWords {
    pub fn new() -> Self { Self::default() }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(words.into_iter().map(|w| fold_case(w.as_ref())).collect())
    }

    /// Noise words separated by any whitespace.
    pub fn parse(text: &str) -> Self { Self::from_words(tokenize(text)) }

    pub fn contains(&self, word: &str) -> bool { self.0.contains(word) }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

pub fn load_noise_words(path: impl AsRef<Path>) -> Result<NoiseWords> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
    let noise = NoiseWords::parse(&text);
    tracing::debug!(path = %path.display(), count = noise.len(), "loaded noise words");
    Ok(noise)
}

/// Candidate words: maximal runs of non-whitespace, in order.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> + '_ {
    WORD_RE.find_iter(text).map(|m| m.as_str())
}

fn fold_case(word: &str) -> String { word.nfkc().collect::<String>().to_lowercase() }

/// Normalize a candidate word into a keyword.
///
/// The word is case-folded and stripped of trailing non-alphabetic
/// characters. What remains must be non-empty, purely alphabetic and not a
/// noise word. Leading or interior punctuation is not stripped, so `"cat's"`
/// or `"(cat"` are rejected.
pub fn keyword(word: &str, noise: &NoiseWords) -> Option<String> {
    let folded = fold_case(word);
    let trimmed = folded.trim_end_matches(|c: char| !c.is_alphabetic());
    if trimmed.is_empty() || !trimmed.chars().all(char::is_alphabetic) {
        return None;
    }
    if noise.contains(trimmed) {
        return None;
    }
    Some(trimmed.to_string())
}

/// Count every keyword of `text` for the document named `document`.
pub fn extract_keywords(document: impl Into<String>, text: &str, noise: &NoiseWords) -> DocumentKeywords {
    let mut doc = DocumentKeywords::new(document);
    for kw in tokenize(text).filter_map(|w| keyword(w, noise)) {
        doc.record(kw);
    }
    doc
}

/// Read the file at `path` and extract its keywords under `document`.
///
/// The file must be UTF-8. Anything else, Latin-1 text included, is reported
/// as `IndexError::Io` with `InvalidData` and fails the build like a missing
/// file would.
pub fn load_keywords(path: &Path, document: impl Into<String>, noise: &NoiseWords) -> Result<DocumentKeywords> {
    let text = std::fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
    Ok(extract_keywords(document, &text, noise))
}
