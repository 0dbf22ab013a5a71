//! Drafted player extraction.

use crate::models::{DraftedPlayer, PlayerRecord};
use tracing::debug;

/// Drafted players across the league and for the target team.
#[derive(Debug, Clone, Default)]
pub struct DraftPool {
    pub all: Vec<DraftedPlayer>,
    pub target: Vec<DraftedPlayer>,
}

/// Keep players that were drafted and carry a winning bid, then split out
/// the target team's roster.
pub fn extract_players(players: &[PlayerRecord], target_team: &str) -> DraftPool {
    let all: Vec<DraftedPlayer> = players
        .iter()
        .filter(|p| p.status.as_deref() == Some("drafted"))
        .filter_map(|p| {
            p.winning_bid.map(|bid| DraftedPlayer {
                name: p.full_name.clone(),
                positions: p.positions.clone(),
                bid,
                team: p.winning_team.clone(),
                mlb_team: p.mlb_team.clone(),
            })
        })
        .collect();

    let target: Vec<DraftedPlayer> = all
        .iter()
        .filter(|p| p.team.as_deref() == Some(target_team))
        .cloned()
        .collect();

    debug!(
        "Extracted {} drafted players, {} for {}",
        all.len(),
        target.len(),
        target_team
    );

    DraftPool { all, target }
}
