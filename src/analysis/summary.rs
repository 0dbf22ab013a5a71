//! Headline spending figures shared by insights, the report and the console.

use crate::analysis::stats;
use crate::data::DraftPool;

/// Roster and budget totals for the league and the target team.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpendSummary {
    pub team_count: usize,
    pub league_players: usize,
    pub league_total: u64,
    pub target_players: usize,
    pub target_total: u64,
    /// Expected auction budget per team.
    pub budget: u32,
}

impl SpendSummary {
    pub fn new(pool: &DraftPool, team_count: usize, budget: u32) -> Self {
        Self {
            team_count,
            league_players: pool.all.len(),
            league_total: pool.all.iter().map(|p| u64::from(p.bid)).sum(),
            target_players: pool.target.len(),
            target_total: pool.target.iter().map(|p| u64::from(p.bid)).sum(),
            budget,
        }
    }

    /// Budget left for a team that has spent `spent`; negative when over.
    pub fn remaining_for(&self, spent: u64) -> i64 {
        i64::from(self.budget) - spent as i64
    }

    /// `spent` as a percentage of the per-team budget.
    pub fn utilization_for(&self, spent: u64) -> f64 {
        stats::percent(spent as f64, f64::from(self.budget))
    }

    pub fn target_remaining(&self) -> i64 {
        self.remaining_for(self.target_total)
    }

    pub fn target_utilization(&self) -> f64 {
        self.utilization_for(self.target_total)
    }

    pub fn target_avg_cost(&self) -> f64 {
        stats::ratio(self.target_total as f64, self.target_players as f64)
    }

    pub fn league_avg_cost(&self) -> f64 {
        stats::ratio(self.league_total as f64, self.league_players as f64)
    }

    pub fn avg_roster_size(&self) -> f64 {
        stats::ratio(self.league_players as f64, self.team_count as f64)
    }

    pub fn avg_spend_per_team(&self) -> f64 {
        stats::ratio(self.league_total as f64, self.team_count as f64)
    }

    /// Combined budget of every team in the league.
    pub fn league_budget(&self) -> u64 {
        self.team_count as u64 * u64::from(self.budget)
    }

    pub fn league_utilization(&self) -> f64 {
        stats::percent(self.league_total as f64, self.league_budget() as f64)
    }

    /// Players the target team still needs to reach the league's average
    /// roster size, truncating the average toward zero.
    pub fn roster_gap(&self) -> i64 {
        self.avg_roster_size().trunc() as i64 - self.target_players as i64
    }
}
