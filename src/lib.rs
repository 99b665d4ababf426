pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod natural;
pub mod page_key;
pub mod pipeline;
pub mod report;
pub mod scan;
pub mod sequencer;
pub mod util;

pub use error::OrderError;
pub use layout::{Layout, LayoutMode, OrderOptions, classify_layout};
pub use page_key::{FilenamePatterns, KeyExtractor, PageKey, Side, extract_key};
pub use scan::ScanFile;
pub use sequencer::{OrderedSequence, order};
