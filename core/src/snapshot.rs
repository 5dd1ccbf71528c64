use crate::error::{IndexError, Result};
use crate::{KeywordIndex, Occurrence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::Path;

/// JSON view of a built index, keywords in lexical order.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub created_at: String,
    pub num_documents: usize,
    pub num_keywords: usize,
    pub keywords: BTreeMap<String, Vec<Occurrence>>,
}

impl IndexSnapshot {
    pub fn from_index(index: &KeywordIndex, created_at: impl Into<String>) -> Self {
        let keywords = index
            .iter()
            .map(|(kw, list)| (kw.to_string(), list.as_slice().to_vec()))
            .collect();
        Self {
            created_at: created_at.into(),
            num_documents: index.num_documents(),
            num_keywords: index.num_keywords(),
            keywords,
        }
    }
}

pub fn save_snapshot(path: impl AsRef<Path>, snapshot: &IndexSnapshot) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(snapshot)?;
    let write = || -> std::io::Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            create_dir_all(dir)?;
        }
        let mut f = File::create(path)?;
        f.write_all(json.as_bytes())
    };
    write().map_err(|source| IndexError::Snapshot { path: path.to_path_buf(), source })
}
