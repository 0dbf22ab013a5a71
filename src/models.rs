//! Data models for the draft analyzer.
//!
//! This module contains the input records read from the auction snapshot
//! and the historical inflation reference, plus the small value types
//! (insights, interpretations) shared by the analysis and report layers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Auction snapshot as fetched from the draft room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuctionSnapshot {
    /// Fetch metadata.
    pub metadata: SnapshotMetadata,
    /// Snapshot payload.
    pub data: SnapshotData,
}

/// Metadata block of an auction snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Timestamp string of when the snapshot was fetched.
    pub fetched_at: String,
}

/// Payload block of an auction snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotData {
    /// Every player in the auction room, drafted or not.
    pub players: Vec<PlayerRecord>,
}

/// A single player entry in the auction room.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Display name.
    #[serde(default)]
    pub full_name: String,
    /// Eligible position codes.
    #[serde(default)]
    pub positions: Vec<String>,
    /// Auction status ("drafted", "available", ...).
    #[serde(default)]
    pub status: Option<String>,
    /// Final price, present once the player is sold.
    #[serde(default)]
    pub winning_bid: Option<u32>,
    /// Fantasy team that won the player.
    #[serde(default)]
    pub winning_team: Option<String>,
    /// Real-world club code.
    #[serde(default)]
    pub mlb_team: Option<String>,
}

/// A player that was sold in the auction.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftedPlayer {
    pub name: String,
    pub positions: Vec<String>,
    pub bid: u32,
    pub team: Option<String>,
    pub mlb_team: Option<String>,
}

impl DraftedPlayer {
    /// Team name used for grouping; unassigned players land in "Unknown".
    pub fn team_name(&self) -> &str {
        self.team.as_deref().unwrap_or("Unknown")
    }
}

/// Historical inflation reference computed by a separate process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalReference {
    pub aggregate: InflationAggregate,
}

/// Aggregate inflation figures across past auctions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationAggregate {
    pub avg_overall_inflation_rate: f64,
    pub std_dev_inflation_rate: f64,
    pub min_inflation_rate: f64,
    pub max_inflation_rate: f64,
    /// Ordered by tier, index 0 is the elite tier.
    pub aggregate_tier_inflation: Vec<InflationBucket>,
    /// Ordered by price range, index 0 is the cheapest range.
    pub aggregate_price_range_inflation: Vec<InflationBucket>,
    pub aggregate_position_inflation: Value,
}

/// One bucket of a historical inflation series.
///
/// Only `avgInflationRate` is interpreted; every other field is carried
/// through to the report untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationBucket {
    pub avg_inflation_rate: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Named series in the historical reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InflationSeries {
    Tier,
    PriceRange,
}

impl fmt::Display for InflationSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InflationSeries::Tier => write!(f, "aggregateTierInflation"),
            InflationSeries::PriceRange => write!(f, "aggregatePriceRangeInflation"),
        }
    }
}

/// Errors raised when the historical reference lacks an expected bucket.
#[derive(Debug, Error, PartialEq)]
pub enum HistoricalError {
    #[error("historical series {series} has no bucket at index {index} (found {len})")]
    MissingBucket {
        series: InflationSeries,
        index: usize,
        len: usize,
    },
}

impl HistoricalReference {
    /// Average inflation rate of a bucket in the given series.
    pub fn avg_inflation(
        &self,
        series: InflationSeries,
        index: usize,
    ) -> Result<f64, HistoricalError> {
        let buckets = match series {
            InflationSeries::Tier => &self.aggregate.aggregate_tier_inflation,
            InflationSeries::PriceRange => &self.aggregate.aggregate_price_range_inflation,
        };

        buckets
            .get(index)
            .map(|b| b.avg_inflation_rate)
            .ok_or(HistoricalError::MissingBucket {
                series,
                index,
                len: buckets.len(),
            })
    }
}

/// How a target team's average price compares to the league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpretation {
    Overpaid,
    Value,
}

impl Interpretation {
    /// Overpaid only when strictly above the league; ties count as value.
    pub fn classify(target_avg: f64, league_avg: f64) -> Self {
        if target_avg > league_avg {
            Interpretation::Overpaid
        } else {
            Interpretation::Value
        }
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interpretation::Overpaid => write!(f, "overpaid"),
            Interpretation::Value => write!(f, "value"),
        }
    }
}

/// A narrative finding with its qualitative implication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: String,
    pub finding: String,
    pub implication: String,
}
