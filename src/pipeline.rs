use crate::{
    error::Result,
    layout::{self, LayoutDecision, OrderOptions},
    page_key::KeyExtractor,
    report::{KeyProbe, OrderReport},
    scan::ScanFile,
    sequencer,
};
use tracing::{info, warn};

pub struct Pipeline<E: KeyExtractor> {
    opts: OrderOptions,
    extractor: E,
}

impl<E: KeyExtractor> Pipeline<E> {
    pub fn new(opts: OrderOptions, extractor: E) -> Self {
        Self { opts, extractor }
    }

    pub fn decide(&self, files: &[ScanFile]) -> Result<LayoutDecision> {
        let decision = layout::decide(files, &self.opts)?;
        info!(
            "layout {:?} forced={} indicators={}/{} ({}%)",
            decision.layout,
            decision.forced,
            decision.indicator_files,
            decision.total_files,
            decision.indicator_percent
        );
        Ok(decision)
    }

    pub fn run(&self, files: &[ScanFile]) -> Result<OrderReport> {
        let decision = self.decide(files)?;
        let seq = sequencer::order(files, decision.layout, &self.extractor);

        info!(
            "ordered {} files ({} without page key)",
            seq.len(),
            seq.fallback_count
        );
        for s in &seq.superseded {
            warn!(
                "page {} {:?}: {} dropped in favour of {}",
                s.key.page,
                s.key.side,
                s.dropped.path.display(),
                s.replaced_by.path.display()
            );
        }

        Ok(OrderReport::new(decision, seq))
    }

    pub fn probe_keys(&self, files: &[ScanFile]) -> Vec<KeyProbe> {
        files
            .iter()
            .map(|f| {
                let m = self.extractor.extract(&f.basename);
                KeyProbe {
                    path: f.path.clone(),
                    double_sided_indicator: layout::is_double_sided_indicator(&f.basename),
                    key: m.map(|m| m.key),
                    pattern: m.map(|m| m.pattern),
                }
            })
            .collect()
    }
}
