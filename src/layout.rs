use crate::{
    config::Config,
    error::{OrderError, Result},
    scan::ScanFile,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

pub const DEFAULT_THRESHOLD_PERCENT: usize = 30;

// Digit/letter tokens are case-sensitive; the words are not.
static INDICATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"1L|1R|2L|2R|L1|R1|L2|R2|_L_|_R_|_1_|_2_|(?i:left|right|odd|even)")
        .expect("indicator pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    SingleSided,
    DoubleSided,
}

/// Caller's layout choice. Anything but `Auto` skips classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Auto,
    #[serde(rename = "single")]
    #[value(name = "single")]
    ForceSingle,
    #[serde(rename = "double")]
    #[value(name = "double")]
    ForceDouble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderOptions {
    pub mode: LayoutMode,
    pub threshold_percent: usize,
}

impl Default for OrderOptions {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Auto,
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}

impl OrderOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            mode: cfg.layout.mode,
            threshold_percent: cfg.layout.double_sided_threshold_percent,
        }
    }

    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = mode;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutDecision {
    pub layout: Layout,
    pub forced: bool,
    pub indicator_files: usize,
    pub total_files: usize,
    /// `indicator_files * 100 / total_files`, truncated.
    pub indicator_percent: usize,
}

pub fn is_double_sided_indicator(basename: &str) -> bool {
    INDICATOR.is_match(basename)
}

pub fn classify_layout(files: &[ScanFile]) -> Result<Layout> {
    classify_with_threshold(files, DEFAULT_THRESHOLD_PERCENT).map(|d| d.layout)
}

/// Double-sided iff strictly more than `threshold_percent` of the files carry
/// an indicator, using truncating integer division.
pub fn classify_with_threshold(
    files: &[ScanFile],
    threshold_percent: usize,
) -> Result<LayoutDecision> {
    if files.is_empty() {
        return Err(OrderError::EmptyInput);
    }

    let total = files.len();
    let matches = files
        .iter()
        .filter(|f| is_double_sided_indicator(&f.basename))
        .count();
    let percent = matches.saturating_mul(100) / total;

    let layout = if percent > threshold_percent {
        Layout::DoubleSided
    } else {
        Layout::SingleSided
    };
    debug!("layout indicators {matches}/{total} ({percent}%) -> {layout:?}");

    Ok(LayoutDecision {
        layout,
        forced: false,
        indicator_files: matches,
        total_files: total,
        indicator_percent: percent,
    })
}

pub fn decide(files: &[ScanFile], opts: &OrderOptions) -> Result<LayoutDecision> {
    let layout = match opts.mode {
        LayoutMode::Auto => return classify_with_threshold(files, opts.threshold_percent),
        LayoutMode::ForceSingle => Layout::SingleSided,
        LayoutMode::ForceDouble => Layout::DoubleSided,
    };

    Ok(LayoutDecision {
        layout,
        forced: true,
        indicator_files: 0,
        total_files: files.len(),
        indicator_percent: 0,
    })
}
