#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cap_tier;
pub mod criteria;
pub mod engine;
pub mod export;
pub mod format;
pub mod winner;

pub use cap_tier::CapTier;
pub use criteria::{ScreeningCriteria, Selection};
pub use engine::{
    ScreeningResult, TOP_BUYS_PER_TIER, TopBuys, compare_rank, screen, sort_quotes,
};
pub use export::{ExportError, ExportFormat, Exporter, QuoteRow};
pub use format::format_indian_number;
pub use winner::is_potential_winner;
