//! Spending analysis.
//!
//! Pure aggregation over drafted players: per-team totals, position and
//! price-tier statistics, target-versus-league comparisons and the
//! narrative insights built on top of them.

pub mod aggregator;
pub mod compare;
pub mod insights;
pub mod stats;
pub mod summary;

pub use aggregator::*;
pub use compare::{compare_overall, compare_positions, OverallComparison, PositionComparison};
pub use insights::{generate_insights, HistoricalMarkers};
pub use summary::SpendSummary;
