use crate::{config::Scan, natural::natural_cmp};
use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// A scanned page image. Identified by its path only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanFile {
    pub path: PathBuf,
    pub basename: String,
}

impl ScanFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let basename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { path, basename }
    }

    pub fn path_str(&self) -> String {
        self.path.display().to_string()
    }
}

pub fn from_paths<I, P>(paths: I) -> Vec<ScanFile>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    paths.into_iter().map(ScanFile::new).collect()
}

/// Lists the page images under `dir` in natural path order.
pub fn discover(cfg: &Scan, dir: &Path) -> Result<Vec<ScanFile>> {
    if !dir.is_dir() {
        return Err(anyhow!("input is not a directory: {}", dir.display()));
    }

    let mut walker = WalkDir::new(dir)
        .follow_links(cfg.follow_links)
        .min_depth(1);
    if !cfg.recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    let mut skipped = 0usize;
    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable entry: {err}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if !has_supported_extension(entry.path(), &cfg.extensions) {
            debug!("not a page image: {}", entry.path().display());
            skipped += 1;
            continue;
        }
        files.push(ScanFile::new(entry.into_path()));
    }

    files.sort_by(|a, b| natural_cmp(&a.path_str(), &b.path_str()));
    info!(
        "discovered {} page images in {} (skipped {})",
        files.len(),
        dir.display(),
        skipped
    );
    Ok(files)
}

pub fn has_supported_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
        return false;
    };
    extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
}
