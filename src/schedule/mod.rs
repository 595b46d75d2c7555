pub mod types;
pub mod slot_utils;
pub mod decoder;
pub mod summary;
pub mod filters;
pub mod interpretation;
pub mod distribution;
pub mod roster;

pub use types::{Assignment, AssignmentMatrix, Slot};
pub use slot_utils::SlotLayout;
pub use summary::SummaryStats;
pub use interpretation::{interpret, CoverageLevel, CoverageThresholds};
pub use distribution::Distribution;
pub use roster::{Roster, DEFAULT_NURSE_PREFIX};
