//! Spending aggregation by team, position and price tier.
//!
//! All functions here are pure: they take a slice of drafted players and
//! return keyed summaries. Positions fan out, so a player eligible at
//! several positions is counted once under each of them.

use crate::analysis::stats;
use crate::models::DraftedPlayer;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Drafted players and cumulative spend for one fantasy team.
#[derive(Debug, Clone, Default)]
pub struct TeamTotals {
    pub players: Vec<DraftedPlayer>,
    pub total: u64,
}

/// League-wide bid statistics for a single position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionStats {
    pub count: usize,
    pub total_spent: u64,
    pub avg_bid: f64,
    pub median_bid: f64,
    pub max_bid: u32,
    pub min_bid: u32,
    pub std_dev: f64,
}

/// A labeled, inclusive price band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceTier {
    pub label: &'static str,
    pub min: u32,
    /// `None` for the open-ended top tier.
    pub max: Option<u32>,
}

impl PriceTier {
    pub fn contains(&self, bid: u32) -> bool {
        bid >= self.min && self.max.map_or(true, |max| bid <= max)
    }
}

/// Fixed tier table, cheapest first.
pub const PRICE_TIERS: [PriceTier; 6] = [
    PriceTier { label: "Filler ($1-$5)", min: 1, max: Some(5) },
    PriceTier { label: "Value ($6-$10)", min: 6, max: Some(10) },
    PriceTier { label: "Mid-tier ($11-$15)", min: 11, max: Some(15) },
    PriceTier { label: "Quality ($16-$20)", min: 16, max: Some(20) },
    PriceTier { label: "Star ($21-$30)", min: 21, max: Some(30) },
    PriceTier { label: "Elite ($31+)", min: 31, max: None },
];

/// Spending summary for one price tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierStats {
    #[serde(skip)]
    pub label: &'static str,
    pub min_price: u32,
    pub max_price: Option<u32>,
    pub count: usize,
    pub total_spent: u64,
    pub percent_of_total: f64,
    pub avg_bid: f64,
}

/// Occupied price tiers in table order.
///
/// Serializes as a JSON object keyed by tier label. Tiers with no players
/// are never present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTierBreakdown(pub Vec<TierStats>);

impl PriceTierBreakdown {
    #[cfg(test)]
    pub fn get(&self, label: &str) -> Option<&TierStats> {
        self.0.iter().find(|t| t.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TierStats> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PriceTierBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for tier in &self.0 {
            map.serialize_entry(tier.label, tier)?;
        }
        map.end()
    }
}

/// Name and price of a player inside a position bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBid {
    pub name: String,
    pub bid: u32,
}

/// A single team's spending at one position, with the players involved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamPositionStats {
    pub count: usize,
    pub total_spent: u64,
    pub avg_bid: f64,
    pub players: Vec<PlayerBid>,
}

/// Group drafted players by winning team.
pub fn analyze_teams(players: &[DraftedPlayer]) -> BTreeMap<String, TeamTotals> {
    let mut teams: BTreeMap<String, TeamTotals> = BTreeMap::new();

    for player in players {
        let entry = teams.entry(player.team_name().to_string()).or_default();
        entry.players.push(player.clone());
        entry.total += u64::from(player.bid);
    }

    teams
}

/// Collect bids per eligible position.
fn bids_by_position(players: &[DraftedPlayer]) -> BTreeMap<String, Vec<u32>> {
    let mut grouped: BTreeMap<String, Vec<u32>> = BTreeMap::new();

    for player in players {
        for pos in &player.positions {
            grouped.entry(pos.clone()).or_default().push(player.bid);
        }
    }

    grouped
}

/// Bid statistics for every position that appears in `players`.
pub fn analyze_positions(players: &[DraftedPlayer]) -> BTreeMap<String, PositionStats> {
    bids_by_position(players)
        .into_iter()
        .map(|(pos, bids)| {
            let stats = PositionStats {
                count: bids.len(),
                total_spent: stats::total(&bids),
                avg_bid: stats::mean(&bids),
                median_bid: stats::median(&bids),
                max_bid: bids.iter().copied().max().unwrap_or(0),
                min_bid: bids.iter().copied().min().unwrap_or(0),
                std_dev: stats::sample_std_dev(&bids),
            };
            (pos, stats)
        })
        .collect()
}

/// Spending per occupied price tier.
pub fn analyze_price_tiers(players: &[DraftedPlayer]) -> PriceTierBreakdown {
    let bids: Vec<u32> = players.iter().map(|p| p.bid).collect();
    let set_total = stats::total(&bids) as f64;

    let tiers = PRICE_TIERS
        .iter()
        .filter_map(|tier| {
            let members: Vec<u32> = bids.iter().copied().filter(|&b| tier.contains(b)).collect();
            if members.is_empty() {
                return None;
            }

            let total_spent = stats::total(&members);
            Some(TierStats {
                label: tier.label,
                min_price: tier.min,
                max_price: tier.max,
                count: members.len(),
                total_spent,
                percent_of_total: stats::percent(total_spent as f64, set_total),
                avg_bid: stats::mean(&members),
            })
        })
        .collect();

    PriceTierBreakdown(tiers)
}

/// Per-position spending for a single team's roster.
pub fn team_position_breakdown(players: &[DraftedPlayer]) -> BTreeMap<String, TeamPositionStats> {
    let mut grouped: BTreeMap<String, Vec<&DraftedPlayer>> = BTreeMap::new();

    for player in players {
        for pos in &player.positions {
            grouped.entry(pos.clone()).or_default().push(player);
        }
    }

    grouped
        .into_iter()
        .map(|(pos, members)| {
            let bids: Vec<u32> = members.iter().map(|p| p.bid).collect();
            let stats = TeamPositionStats {
                count: members.len(),
                total_spent: stats::total(&bids),
                avg_bid: stats::mean(&bids),
                players: members
                    .iter()
                    .map(|p| PlayerBid {
                        name: p.name.clone(),
                        bid: p.bid,
                    })
                    .collect(),
            };
            (pos, stats)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player(name: &str, positions: &[&str], bid: u32, team: &str) -> DraftedPlayer {
        DraftedPlayer {
            name: name.to_string(),
            positions: positions.iter().map(|p| p.to_string()).collect(),
            bid,
            team: Some(team.to_string()),
            mlb_team: None,
        }
    }

    #[test]
    fn test_analyze_teams() {
        let players = vec![
            player("A", &["OF"], 10, "Alpha"),
            player("B", &["SP"], 20, "Alpha"),
            player("C", &["C"], 5, "Beta"),
        ];

        let teams = analyze_teams(&players);
        assert_eq!(teams.len(), 2);
        assert_eq!(teams["Alpha"].total, 30);
        assert_eq!(teams["Alpha"].players.len(), 2);
        assert_eq!(teams["Beta"].total, 5);
    }

    #[test]
    fn test_positions_fan_out() {
        let players = vec![
            player("A", &["1B", "OF"], 10, "Alpha"),
            player("B", &["OF"], 20, "Alpha"),
            player("C", &[], 99, "Beta"),
        ];

        let positions = analyze_positions(&players);
        assert_eq!(positions.len(), 2);

        let of = &positions["OF"];
        assert_eq!(of.count, 2);
        assert_eq!(of.total_spent, 30);
        assert_eq!(of.avg_bid, 15.0);
        assert_eq!(of.median_bid, 15.0);
        assert_eq!(of.max_bid, 20);
        assert_eq!(of.min_bid, 10);

        let first = &positions["1B"];
        assert_eq!(first.count, 1);
        assert_eq!(first.std_dev, 0.0);
    }

    #[test]
    fn test_price_tiers_omit_empty() {
        let players = vec![
            player("A", &["OF"], 3, "Alpha"),
            player("B", &["OF"], 5, "Alpha"),
            player("C", &["SP"], 12, "Beta"),
        ];

        let tiers = analyze_price_tiers(&players);
        assert_eq!(tiers.0.len(), 2);
        assert!(tiers.get("Elite ($31+)").is_none());

        let filler = tiers.get("Filler ($1-$5)").unwrap();
        assert_eq!(filler.count, 2);
        assert_eq!(filler.total_spent, 8);
        assert_eq!(filler.avg_bid, 4.0);
        assert_eq!(filler.percent_of_total, 40.0);
    }

    #[test]
    fn test_price_tiers_serialize_in_table_order() {
        let players = vec![
            player("A", &["OF"], 45, "Alpha"),
            player("B", &["OF"], 2, "Alpha"),
        ];

        let json = serde_json::to_string(&analyze_price_tiers(&players)).unwrap();
        let filler = json.find("Filler ($1-$5)").unwrap();
        let elite = json.find("Elite ($31+)").unwrap();
        assert!(filler < elite);
        assert!(json.contains("\"maxPrice\":null"));
        assert!(!json.contains("\"label\""));
    }

    #[test]
    fn test_zero_bid_falls_in_no_tier() {
        let players = vec![player("A", &["OF"], 0, "Alpha")];
        assert!(analyze_price_tiers(&players).is_empty());
    }

    #[test]
    fn test_team_position_breakdown_keeps_players() {
        let players = vec![
            player("A", &["SS", "2B"], 18, "Duke"),
            player("B", &["SS"], 6, "Duke"),
        ];

        let breakdown = team_position_breakdown(&players);
        let ss = &breakdown["SS"];
        assert_eq!(ss.count, 2);
        assert_eq!(ss.total_spent, 24);
        assert_eq!(ss.avg_bid, 12.0);
        assert_eq!(
            ss.players,
            vec![
                PlayerBid { name: "A".to_string(), bid: 18 },
                PlayerBid { name: "B".to_string(), bid: 6 },
            ]
        );
        assert_eq!(breakdown["2B"].count, 1);
    }

    fn arb_players() -> impl Strategy<Value = Vec<DraftedPlayer>> {
        prop::collection::vec(
            (1u32..120, prop::sample::subsequence(vec!["C", "1B", "OF", "SP"], 0..4)),
            1..60,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (bid, positions))| DraftedPlayer {
                    name: format!("P{}", i),
                    positions: positions.into_iter().map(String::from).collect(),
                    bid,
                    team: Some(format!("T{}", i % 3)),
                    mlb_team: None,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn tier_counts_partition_players(players in arb_players()) {
            let tiers = analyze_price_tiers(&players);
            let counted: usize = tiers.iter().map(|t| t.count).sum();
            prop_assert_eq!(counted, players.len());
        }

        #[test]
        fn tier_percentages_sum_to_hundred(players in arb_players()) {
            let tiers = analyze_price_tiers(&players);
            let pct: f64 = tiers.iter().map(|t| t.percent_of_total).sum();
            prop_assert!((pct - 100.0).abs() < 1e-9);
        }

        #[test]
        fn position_totals_match_eligible_bids(players in arb_players()) {
            let positions = analyze_positions(&players);
            for (pos, stats) in &positions {
                let expected: u64 = players
                    .iter()
                    .filter(|p| p.positions.contains(pos))
                    .map(|p| u64::from(p.bid))
                    .sum();
                prop_assert_eq!(stats.total_spent, expected);
                if stats.count < 2 {
                    prop_assert_eq!(stats.std_dev, 0.0);
                }
            }
        }
    }
}
