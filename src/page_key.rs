use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Normalizes `L`, `1L`, `2L`, `left` (and the right-hand equivalents).
    pub fn from_token(token: &str) -> Option<Side> {
        match token {
            "L" | "1L" | "2L" | "left" => Some(Side::Left),
            "R" | "1R" | "2R" | "right" => Some(Side::Right),
            _ => None,
        }
    }
}

/// Orders by page number, then Left before Right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PageKey {
    pub page: u32,
    pub side: Side,
}

impl PageKey {
    pub fn new(page: u32, side: Side) -> Self {
        Self { page, side }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatternKind {
    /// `<prefix>_page<digits>_<1L|1R|2L|2R>`
    PageSuffix,
    /// `<prefix>_<digits>_<L|R>`
    Underscored,
    /// `<prefix><digits><L|R>`
    Compact,
    /// `<prefix><digits>...left` / `...right`
    SideWord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyMatch {
    pub key: PageKey,
    pub pattern: PatternKind,
}

/// Seam for swapping the filename heuristics.
pub trait KeyExtractor {
    fn extract(&self, basename: &str) -> Option<KeyMatch>;
}

/// The built-in filename patterns.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilenamePatterns;

impl KeyExtractor for FilenamePatterns {
    fn extract(&self, basename: &str) -> Option<KeyMatch> {
        match_key(basename)
    }
}

struct Matcher {
    kind: PatternKind,
    regex: Regex,
}

static MATCHERS: LazyLock<Vec<Matcher>> = LazyLock::new(|| {
    [
        (
            PatternKind::PageSuffix,
            r"^(?P<prefix>.*)_page(?P<page>\d+)_(?P<side>[12][LR])",
        ),
        (
            PatternKind::Underscored,
            r"^(?P<prefix>.*)_(?P<page>\d+)_(?P<side>[LR])",
        ),
        (
            PatternKind::Compact,
            r"^(?P<prefix>(?:.*\D)?)(?P<page>\d+)(?P<side>[LR])",
        ),
        (
            PatternKind::SideWord,
            r"^(?P<prefix>(?:.*\D)?)(?P<page>\d+).*?(?P<side>left|right)",
        ),
    ]
    .into_iter()
    .map(|(kind, pat)| Matcher {
        kind,
        regex: Regex::new(pat).expect("page key pattern is valid"),
    })
    .collect()
});

/// First matching pattern decides, even if its page number is unusable.
pub fn match_key(basename: &str) -> Option<KeyMatch> {
    let (kind, caps) = MATCHERS
        .iter()
        .find_map(|m| m.regex.captures(basename).map(|c| (m.kind, c)))?;
    let key = key_from_captures(&caps);
    if key.is_none() {
        debug!("{basename}: {kind:?} matched but page number is unusable");
    }
    key.map(|key| KeyMatch { key, pattern: kind })
}

pub fn extract_key(basename: &str) -> Option<PageKey> {
    match_key(basename).map(|m| m.key)
}

fn key_from_captures(caps: &Captures<'_>) -> Option<PageKey> {
    // str::parse is always base 10, so "010" is ten.
    let page = caps.name("page")?.as_str().parse::<u32>().ok()?;
    let side = Side::from_token(caps.name("side")?.as_str())?;
    Some(PageKey { page, side })
}
