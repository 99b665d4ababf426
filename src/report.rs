use crate::{
    layout::LayoutDecision,
    page_key::{PageKey, PatternKind},
    sequencer::{OrderedSequence, Supersession},
    util::{ensure_dir, now_rfc3339, sequence_digest},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReport {
    pub generated_at: String,
    pub decision: LayoutDecision,
    pub entries: Vec<EntryReport>,
    pub fallback_count: usize,
    pub superseded: Vec<Supersession>,
    pub sequence_sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryReport {
    pub position: usize,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<PageKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternKind>,
}

impl OrderReport {
    pub fn new(decision: LayoutDecision, seq: OrderedSequence) -> Self {
        let sequence_sha256 = sequence_digest(&seq.paths());
        let entries = seq
            .entries
            .into_iter()
            .enumerate()
            .map(|(position, e)| EntryReport {
                position,
                path: e.file.path,
                key: e.key,
                pattern: e.pattern,
            })
            .collect();

        Self {
            generated_at: now_rfc3339(),
            decision,
            entries,
            fallback_count: seq.fallback_count,
            superseded: seq.superseded,
            sequence_sha256,
        }
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|e| e.path.clone()).collect()
    }

    /// One path per line, each line newline-terminated. Empty for no entries.
    pub fn to_list(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}\n", e.path.display()))
            .collect()
    }

    pub fn write_list(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent)?;
        }
        std::fs::write(path, self.to_list())
            .with_context(|| format!("writing list file: {}", path.display()))
    }
}

/// Per-file view of what the key extractor sees, in discovery order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyProbe {
    pub path: PathBuf,
    pub double_sided_indicator: bool,
    pub key: Option<PageKey>,
    pub pattern: Option<PatternKind>,
}
