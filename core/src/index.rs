use crate::error::{IndexError, Result};
use crate::ranked::RankedList;
use crate::tokenizer::{load_keywords, load_noise_words, NoiseWords};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// How many times a keyword occurs in one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub document: String,
    pub frequency: u32,
}

impl Occurrence {
    pub fn new(document: impl Into<String>, frequency: u32) -> Self {
        Self { document: document.into(), frequency }
    }
}

impl std::fmt::Display for Occurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.document, self.frequency)
    }
}

/// Keywords of a single scanned document, one occurrence per keyword.
///
/// Occurrences are only created through [`record`](Self::record) and
/// [`record_times`](Self::record_times), so each one names this document and
/// has a frequency of at least one.
#[derive(Debug, Clone, Default)]
pub struct DocumentKeywords {
    document: String,
    keywords: HashMap<String, Occurrence>,
}

impl DocumentKeywords {
    pub fn new(document: impl Into<String>) -> Self {
        Self { document: document.into(), keywords: HashMap::new() }
    }

    /// Count one more sighting of `keyword` in this document.
    pub fn record(&mut self, keyword: String) { self.record_times(keyword, 1) }

    /// Count `times` sightings at once. Zero is a no-op.
    pub fn record_times(&mut self, keyword: String, times: u32) {
        if times == 0 {
            return;
        }
        match self.keywords.entry(keyword) {
            Entry::Occupied(mut e) => e.get_mut().frequency += times,
            Entry::Vacant(e) => {
                e.insert(Occurrence::new(self.document.clone(), times));
            }
        }
    }

    pub fn document(&self) -> &str { &self.document }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Occurrence)> + '_ {
        self.keywords.iter().map(|(k, o)| (k.as_str(), o))
    }

    pub fn frequency(&self, keyword: &str) -> Option<u32> {
        self.keywords.get(keyword).map(|o| o.frequency)
    }

    pub fn len(&self) -> usize { self.keywords.len() }

    pub fn is_empty(&self) -> bool { self.keywords.is_empty() }
}

/// Keyword -> ranked occurrences over the whole corpus.
#[derive(Debug, Default)]
pub struct KeywordIndex {
    keywords: HashMap<String, RankedList>,
    documents: HashSet<String>,
}

impl KeywordIndex {
    pub fn new() -> Self { Self::default() }

    /// Fold one document's keywords into the index.
    ///
    /// A document can only be merged once; a second merge under the same name
    /// is rejected and leaves the index as it was.
    pub fn merge(&mut self, doc: DocumentKeywords) -> Result<()> {
        if !self.documents.insert(doc.document.clone()) {
            return Err(IndexError::DuplicateDocument(doc.document));
        }
        let num_keywords = doc.keywords.len();
        for (keyword, occurrence) in doc.keywords {
            debug_assert_eq!(occurrence.document, doc.document);
            match self.keywords.entry(keyword) {
                Entry::Occupied(mut e) => {
                    e.get_mut().push_ranked(occurrence);
                }
                Entry::Vacant(e) => {
                    e.insert(RankedList::single(occurrence));
                }
            }
        }
        tracing::debug!(document = %doc.document, num_keywords, "merged document");
        Ok(())
    }

    /// Scan and merge every `(name, path)` pair in order. The first document
    /// that cannot be read aborts the build.
    pub fn build<I, N, P>(documents: I, noise: &NoiseWords) -> Result<Self>
    where
        I: IntoIterator<Item = (N, P)>,
        N: Into<String>,
        P: AsRef<Path>,
    {
        let mut index = Self::new();
        for (name, path) in documents {
            let doc = load_keywords(path.as_ref(), name, noise)?;
            index.merge(doc)?;
        }
        tracing::info!(
            num_docs = index.num_documents(),
            num_keywords = index.num_keywords(),
            "index build complete"
        );
        Ok(index)
    }

    /// Build from a manifest of document names and a noise-word file.
    pub fn make_index(manifest: impl AsRef<Path>, noise_file: impl AsRef<Path>) -> Result<Self> {
        let noise = load_noise_words(noise_file)?;
        let documents = load_manifest(manifest)?;
        Self::build(documents, &noise)
    }

    pub fn get(&self, keyword: &str) -> Option<&RankedList> { self.keywords.get(keyword) }

    /// Occurrences for `keyword`, empty when it was never indexed.
    pub fn occurrences(&self, keyword: &str) -> &[Occurrence] {
        self.keywords.get(keyword).map(RankedList::as_slice).unwrap_or(&[])
    }

    pub fn contains_document(&self, document: &str) -> bool { self.documents.contains(document) }

    pub fn num_keywords(&self) -> usize { self.keywords.len() }

    pub fn num_documents(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.keywords.is_empty() }

    pub fn keywords(&self) -> impl Iterator<Item = &str> + '_ { self.keywords.keys().map(String::as_str) }

    pub fn documents(&self) -> impl Iterator<Item = &str> + '_ { self.documents.iter().map(String::as_str) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RankedList)> + '_ {
        self.keywords.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Read a manifest of whitespace separated document names. Lines starting
/// with `#` are skipped. Relative names resolve against the manifest's
/// directory but keep their listed spelling as the document name.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Vec<(String, PathBuf)>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| IndexError::io(path, e))?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(parse_manifest(&text)
        .map(|name| {
            let p = Path::new(name);
            let resolved = if p.is_absolute() { p.to_path_buf() } else { base.join(p) };
            (name.to_string(), resolved)
        })
        .collect())
}

fn parse_manifest(text: &str) -> impl Iterator<Item = &str> + '_ {
    text.lines()
        .filter(|l| !l.trim_start().starts_with('#'))
        .flat_map(str::split_whitespace)
}
