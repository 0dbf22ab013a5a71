//! Target team versus league comparisons.

use crate::analysis::aggregator::{PositionStats, TeamPositionStats};
use crate::analysis::stats;
use crate::models::{DraftedPlayer, Interpretation};
use serde::Serialize;
use std::collections::BTreeMap;

/// Target team's average price at one position against the league.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionComparison {
    #[serde(rename = "dukeAvg")]
    pub target_avg: f64,
    pub league_avg: f64,
    pub difference: f64,
    pub percent_diff: f64,
    pub interpretation: Interpretation,
}

/// Target team's average price across its whole roster against the league.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallComparison {
    #[serde(rename = "dukeAvgBid")]
    pub target_avg_bid: f64,
    pub league_avg_bid: f64,
    pub difference: f64,
    pub percent_diff: f64,
}

/// Difference as a percentage of the league figure, 0 unless the league
/// figure is positive.
fn percent_diff(target: f64, league: f64) -> f64 {
    if league > 0.0 {
        (target - league) / league * 100.0
    } else {
        0.0
    }
}

/// Compare each of the target team's positions with the league mean.
///
/// Positions the league has never seen are skipped.
pub fn compare_positions(
    target: &BTreeMap<String, TeamPositionStats>,
    league: &BTreeMap<String, PositionStats>,
) -> BTreeMap<String, PositionComparison> {
    target
        .iter()
        .filter_map(|(pos, target_stats)| {
            let league_avg = league.get(pos)?.avg_bid;
            let target_avg = target_stats.avg_bid;

            Some((
                pos.clone(),
                PositionComparison {
                    target_avg,
                    league_avg,
                    difference: target_avg - league_avg,
                    percent_diff: percent_diff(target_avg, league_avg),
                    interpretation: Interpretation::classify(target_avg, league_avg),
                },
            ))
        })
        .collect()
}

/// Compare average price per player across the whole roster.
pub fn compare_overall(target: &[DraftedPlayer], all: &[DraftedPlayer]) -> OverallComparison {
    let target_bids: Vec<u32> = target.iter().map(|p| p.bid).collect();
    let league_bids: Vec<u32> = all.iter().map(|p| p.bid).collect();

    let target_avg_bid = stats::mean(&target_bids);
    let league_avg_bid = stats::mean(&league_bids);

    OverallComparison {
        target_avg_bid,
        league_avg_bid,
        difference: target_avg_bid - league_avg_bid,
        percent_diff: percent_diff(target_avg_bid, league_avg_bid),
    }
}
