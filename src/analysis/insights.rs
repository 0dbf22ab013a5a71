//! Narrative findings.
//!
//! Thresholds and the historical bucket positions read here are fixed
//! constants of the report format.

use crate::analysis::summary::SpendSummary;
use crate::models::{HistoricalError, HistoricalReference, InflationSeries, Insight};
use tracing::debug;

/// Tier bucket holding the elite players.
pub const ELITE_TIER_INDEX: usize = 0;
/// Price-range bucket holding $1-$5 players.
pub const BUDGET_RANGE_INDEX: usize = 0;
/// Price-range bucket holding $31+ players.
pub const PREMIUM_RANGE_INDEX: usize = 3;

/// How much spending room a team has left, from its budget utilization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetRoom {
    /// Under 80% spent.
    Moderate,
    /// 80% up to 90% spent.
    Low,
    /// 90% or more spent.
    VeryLow,
}

impl BudgetRoom {
    pub fn from_utilization(pct: f64) -> Self {
        if pct < 80.0 {
            BudgetRoom::Moderate
        } else if pct < 90.0 {
            BudgetRoom::Low
        } else {
            BudgetRoom::VeryLow
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetRoom::Moderate => "Moderate",
            BudgetRoom::Low => "Low",
            BudgetRoom::VeryLow => "Very Low",
        }
    }
}

/// Historical inflation figures quoted by the report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalMarkers {
    pub elite_tier: f64,
    pub budget_range: f64,
    pub premium_range: f64,
}

impl HistoricalMarkers {
    pub fn resolve(historical: &HistoricalReference) -> Result<Self, HistoricalError> {
        Ok(Self {
            elite_tier: historical.avg_inflation(InflationSeries::Tier, ELITE_TIER_INDEX)?,
            budget_range: historical
                .avg_inflation(InflationSeries::PriceRange, BUDGET_RANGE_INDEX)?,
            premium_range: historical
                .avg_inflation(InflationSeries::PriceRange, PREMIUM_RANGE_INDEX)?,
        })
    }
}

/// Build the five findings in report order.
pub fn generate_insights(
    summary: &SpendSummary,
    team: &str,
    markers: &HistoricalMarkers,
) -> Vec<Insight> {
    let mut insights = Vec::with_capacity(5);

    let budget_pct = summary.target_utilization();
    insights.push(Insight {
        category: "Budget Status".to_string(),
        finding: format!(
            "{} has spent ${} of ${} budget ({:.1}%), with ${} remaining",
            team,
            summary.target_total,
            summary.budget,
            budget_pct,
            summary.target_remaining()
        ),
        implication: BudgetRoom::from_utilization(budget_pct).label().to_string(),
    });

    let avg_roster = summary.avg_roster_size();
    insights.push(Insight {
        category: "Roster Size".to_string(),
        finding: format!(
            "{} has {} players vs league average of {:.1}",
            team, summary.target_players, avg_roster
        ),
        implication: if (summary.target_players as f64) < avg_roster {
            "Below average"
        } else {
            "Above average"
        }
        .to_string(),
    });

    let target_avg = summary.target_avg_cost();
    let league_avg = summary.league_avg_cost();
    insights.push(Insight {
        category: "Average Player Value".to_string(),
        finding: format!(
            "{}'s avg player cost: ${:.1} vs league avg: ${:.1}",
            team, target_avg, league_avg
        ),
        implication: if target_avg > league_avg {
            "Targeting premium players"
        } else {
            "Value-focused strategy"
        }
        .to_string(),
    });

    insights.push(Insight {
        category: "Historical Context - Elite Players".to_string(),
        finding: format!(
            "Historically, Tier 1 elite players show {:.1}% inflation (typically undervalued)",
            markers.elite_tier
        ),
        implication: "Elite players are historically the best value in auctions".to_string(),
    });

    insights.push(Insight {
        category: "Historical Context - Budget Players".to_string(),
        finding: format!(
            "$1-$5 players show {:.1}% avg inflation",
            markers.budget_range
        ),
        implication:
            "Budget players are consistently overvalued - avoid overpaying for replacement level"
                .to_string(),
    });

    debug!("Generated {} insights", insights.len());
    insights
}
