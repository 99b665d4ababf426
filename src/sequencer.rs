use crate::{
    layout::Layout,
    natural::natural_cmp,
    page_key::{KeyExtractor, KeyMatch, PageKey, PatternKind, Side},
    scan::ScanFile,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedEntry {
    pub file: ScanFile,
    pub key: Option<PageKey>,
    pub pattern: Option<PatternKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supersession {
    pub key: PageKey,
    pub dropped: ScanFile,
    pub replaced_by: ScanFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedSequence {
    pub layout: Layout,
    pub entries: Vec<OrderedEntry>,
    /// Number of trailing entries that had no page key.
    pub fallback_count: usize,
    pub superseded: Vec<Supersession>,
}

impl OrderedSequence {
    pub fn files(&self) -> impl Iterator<Item = &ScanFile> {
        self.entries.iter().map(|e| &e.file)
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files().map(|f| f.path.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Later files win duplicate `(page, side)` keys; the losers end up in
/// `superseded`.
pub fn order<E>(files: &[ScanFile], layout: Layout, extractor: &E) -> OrderedSequence
where
    E: KeyExtractor + ?Sized,
{
    match layout {
        Layout::SingleSided => order_single(files),
        Layout::DoubleSided => order_double(files, extractor),
    }
}

fn order_single(files: &[ScanFile]) -> OrderedSequence {
    let mut sorted: Vec<&ScanFile> = files.iter().collect();
    // sort_by is stable, so identical paths keep input order.
    sorted.sort_by(|a, b| natural_cmp(&a.path_str(), &b.path_str()));

    OrderedSequence {
        layout: Layout::SingleSided,
        entries: sorted
            .into_iter()
            .map(|f| OrderedEntry {
                file: f.clone(),
                key: None,
                pattern: None,
            })
            .collect(),
        fallback_count: 0,
        superseded: Vec::new(),
    }
}

fn order_double<E>(files: &[ScanFile], extractor: &E) -> OrderedSequence
where
    E: KeyExtractor + ?Sized,
{
    let mut store = KeyStore::default();
    let mut fallback = Vec::new();

    for file in files {
        match extractor.extract(&file.basename) {
            Some(m) => {
                debug!("{} -> page {} {:?}", file.basename, m.key.page, m.key.side);
                store.insert(file, m);
            }
            None => {
                debug!("{} -> no page key, fallback", file.basename);
                fallback.push(file);
            }
        }
    }

    let superseded = std::mem::take(&mut store.superseded);
    let mut entries: Vec<OrderedEntry> = store.into_ordered().collect();
    let fallback_count = fallback.len();
    entries.extend(fallback.into_iter().map(|f| OrderedEntry {
        file: f.clone(),
        key: None,
        pattern: None,
    }));

    OrderedSequence {
        layout: Layout::DoubleSided,
        entries,
        fallback_count,
        superseded,
    }
}

#[derive(Default)]
struct PageSlots<'a> {
    left: Option<(&'a ScanFile, KeyMatch)>,
    right: Option<(&'a ScanFile, KeyMatch)>,
}

/// Page number to Left/Right slots. Inserting an occupied slot replaces it
/// (last write wins) and records the replaced file.
#[derive(Default)]
struct KeyStore<'a> {
    pages: BTreeMap<u32, PageSlots<'a>>,
    superseded: Vec<Supersession>,
}

impl<'a> KeyStore<'a> {
    fn insert(&mut self, file: &'a ScanFile, m: KeyMatch) {
        let slots = self.pages.entry(m.key.page).or_default();
        let slot = match m.key.side {
            Side::Left => &mut slots.left,
            Side::Right => &mut slots.right,
        };
        if let Some((previous, _)) = slot.replace((file, m)) {
            debug!(
                "duplicate key page {} {:?}: {} replaces {}",
                m.key.page, m.key.side, file.basename, previous.basename
            );
            self.superseded.push(Supersession {
                key: m.key,
                dropped: previous.clone(),
                replaced_by: file.clone(),
            });
        }
    }

    fn into_ordered(self) -> impl Iterator<Item = OrderedEntry> + 'a {
        self.pages
            .into_values()
            .flat_map(|slots| [slots.left, slots.right])
            .flatten()
            .map(|(file, m)| OrderedEntry {
                file: file.clone(),
                key: Some(m.key),
                pattern: Some(m.pattern),
            })
    }
}
