//! Report assembly.
//!
//! Runs the analysis over a loaded snapshot and collects every aggregate
//! into a single serializable [`AnalysisReport`]. Key names are part of the
//! output format; the target-team sections keep their `duke*` keys no
//! matter which team is configured.

use crate::analysis::{
    analyze_positions, analyze_price_tiers, analyze_teams, compare_overall, compare_positions,
    generate_insights, stats, team_position_breakdown, HistoricalMarkers, OverallComparison,
    PositionComparison, PositionStats, PriceTierBreakdown, SpendSummary, TeamPositionStats,
    TeamTotals,
};
use crate::config::LeagueConfig;
use crate::data::extract_players;
use crate::models::{
    AuctionSnapshot, DraftedPlayer, HistoricalError, HistoricalReference, InflationBucket,
    Insight,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

/// The complete draft analysis report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub league_overview: LeagueOverview,
    #[serde(rename = "dukeRoster")]
    pub target_roster: TargetRoster,
    pub league_market: LeagueMarket,
    #[serde(rename = "dukeVsLeague")]
    pub target_vs_league: TargetVsLeague,
    pub team_comparison: BTreeMap<String, TeamSummary>,
    pub historical_context: HistoricalContext,
    pub insights: Vec<Insight>,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,

    /// Headline figures reused by the console and Markdown renderers.
    #[serde(skip)]
    pub spend: SpendSummary,
    #[serde(skip)]
    pub target_team: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub room_id: String,
    pub league_name: String,
    pub league_type: String,
    pub projection_system: String,
    /// Fetch timestamp of the auction snapshot.
    pub analysis_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueOverview {
    pub total_teams: usize,
    pub total_players_drafted: usize,
    pub total_money_spent: u64,
    pub average_spend_per_team: f64,
    pub expected_budget_per_team: u32,
    pub average_roster_size: f64,
    pub budget_utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRoster {
    pub summary: RosterSummary,
    /// Most expensive first.
    pub players: Vec<RosterPlayer>,
    pub position_breakdown: BTreeMap<String, TeamPositionStats>,
    pub price_tier_breakdown: PriceTierBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSummary {
    pub player_count: usize,
    pub total_spent: u64,
    pub remaining_budget: i64,
    pub budget_utilization: f64,
    pub average_per_player: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterPlayer {
    pub name: String,
    pub positions: Vec<String>,
    pub winning_bid: u32,
    pub mlb_team: String,
}

impl From<&DraftedPlayer> for RosterPlayer {
    fn from(player: &DraftedPlayer) -> Self {
        Self {
            name: player.name.clone(),
            positions: player.positions.clone(),
            winning_bid: player.bid,
            mlb_team: player.mlb_team.clone().unwrap_or_else(|| "FA".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueMarket {
    pub position_stats: BTreeMap<String, PositionStats>,
    pub price_tier_stats: PriceTierBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetVsLeague {
    pub position_comparison: BTreeMap<String, PositionComparison>,
    pub overall_comparison: OverallComparison,
}

/// One row of the per-team comparison table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub player_count: usize,
    pub total_spent: u64,
    pub avg_per_player: f64,
    pub remaining_budget: i64,
    pub budget_utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalContext {
    pub summary: InflationSummary,
    pub tier_inflation_patterns: Vec<InflationBucket>,
    pub price_range_inflation: Vec<InflationBucket>,
    pub position_inflation: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InflationSummary {
    pub average_inflation_rate: f64,
    pub inflation_std_dev: f64,
    pub inflation_range: InflationRange,
}

#[derive(Debug, Clone, Serialize)]
pub struct InflationRange {
    pub min: f64,
    pub max: f64,
}

/// Format an integer with comma thousands separators.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Run the full analysis pipeline and assemble the report.
///
/// `progress` receives one line as each phase starts. Fails only when the
/// historical reference is missing a bucket the insights and key findings
/// quote.
pub fn build_report(
    auction: &AuctionSnapshot,
    historical: &HistoricalReference,
    league: &LeagueConfig,
    mut progress: impl FnMut(&str),
) -> Result<AnalysisReport, HistoricalError> {
    let team = league.target_team.as_str();

    progress("🔎 Extracting players...");
    let pool = extract_players(&auction.data.players, team);

    progress("👥 Analyzing teams...");
    let teams = analyze_teams(&pool.all);
    let spend = SpendSummary::new(&pool, teams.len(), league.budget_per_team);

    progress("🧢 Analyzing positions...");
    let league_positions = analyze_positions(&pool.all);
    let target_positions = team_position_breakdown(&pool.target);

    progress("💰 Analyzing price tiers...");
    let league_tiers = analyze_price_tiers(&pool.all);
    let target_tiers = analyze_price_tiers(&pool.target);

    progress(&format!("⚖️  Comparing {} to league...", team));
    let position_comparison = compare_positions(&target_positions, &league_positions);
    let overall_comparison = compare_overall(&pool.target, &pool.all);

    progress("💡 Generating insights...");
    let markers = HistoricalMarkers::resolve(historical)?;
    let insights = generate_insights(&spend, team, &markers);

    info!(
        "{} teams, {} drafted players, {} on {}",
        spend.team_count, spend.league_players, spend.target_players, team
    );

    let mut players: Vec<RosterPlayer> = pool.target.iter().map(RosterPlayer::from).collect();
    players.sort_by(|a, b| b.winning_bid.cmp(&a.winning_bid));

    let aggregate = &historical.aggregate;

    Ok(AnalysisReport {
        metadata: ReportMetadata {
            room_id: league.room_id.clone(),
            league_name: league.league_name.clone(),
            league_type: league.league_type.clone(),
            projection_system: league.projection_system.clone(),
            analysis_date: auction.metadata.fetched_at.clone(),
        },
        league_overview: LeagueOverview {
            total_teams: spend.team_count,
            total_players_drafted: spend.league_players,
            total_money_spent: spend.league_total,
            average_spend_per_team: spend.avg_spend_per_team(),
            expected_budget_per_team: spend.budget,
            average_roster_size: spend.avg_roster_size(),
            budget_utilization: spend.league_utilization(),
        },
        target_roster: TargetRoster {
            summary: RosterSummary {
                player_count: spend.target_players,
                total_spent: spend.target_total,
                remaining_budget: spend.target_remaining(),
                budget_utilization: spend.target_utilization(),
                average_per_player: spend.target_avg_cost(),
            },
            players,
            position_breakdown: target_positions,
            price_tier_breakdown: target_tiers,
        },
        league_market: LeagueMarket {
            position_stats: league_positions,
            price_tier_stats: league_tiers,
        },
        target_vs_league: TargetVsLeague {
            position_comparison,
            overall_comparison,
        },
        team_comparison: team_table(&teams, &spend),
        historical_context: HistoricalContext {
            summary: InflationSummary {
                average_inflation_rate: aggregate.avg_overall_inflation_rate,
                inflation_std_dev: aggregate.std_dev_inflation_rate,
                inflation_range: InflationRange {
                    min: aggregate.min_inflation_rate,
                    max: aggregate.max_inflation_rate,
                },
            },
            tier_inflation_patterns: aggregate.aggregate_tier_inflation.clone(),
            price_range_inflation: aggregate.aggregate_price_range_inflation.clone(),
            position_inflation: aggregate.aggregate_position_inflation.clone(),
        },
        insights,
        key_findings: key_findings(&spend, team, &markers),
        recommendations: recommendations(&spend, team),
        spend,
        target_team: team.to_string(),
    })
}

fn team_table(
    teams: &BTreeMap<String, TeamTotals>,
    spend: &SpendSummary,
) -> BTreeMap<String, TeamSummary> {
    teams
        .iter()
        .map(|(name, totals)| {
            let summary = TeamSummary {
                player_count: totals.players.len(),
                total_spent: totals.total,
                avg_per_player: stats::ratio(
                    totals.total as f64,
                    totals.players.len() as f64,
                ),
                remaining_budget: spend.remaining_for(totals.total),
                budget_utilization: spend.utilization_for(totals.total),
            };
            (name.clone(), summary)
        })
        .collect()
}

fn key_findings(spend: &SpendSummary, team: &str, markers: &HistoricalMarkers) -> Vec<String> {
    let remaining = spend.target_remaining();

    vec![
        format!(
            "{} has drafted {} players for ${}, leaving ${} remaining ({:.1}% of budget)",
            team,
            spend.target_players,
            spend.target_total,
            remaining,
            stats::percent(remaining as f64, f64::from(spend.budget))
        ),
        format!(
            "{}'s average player cost: ${:.1} vs league average: ${:.1}",
            team,
            spend.target_avg_cost(),
            spend.league_avg_cost()
        ),
        format!(
            "League-wide budget utilization: {:.1}% (${} of ${} total)",
            spend.league_utilization(),
            thousands(spend.league_total),
            thousands(spend.league_budget())
        ),
        format!(
            "Historical data shows elite players (Tier 1) average {:.1}% inflation - typically undervalued",
            markers.elite_tier
        ),
        format!(
            "Premium price range ($31+) shows {:.1}% historical inflation",
            markers.premium_range
        ),
        format!(
            "Budget tier ($1-$5) shows {:.1}% inflation - consistently overvalued",
            markers.budget_range
        ),
    ]
}

fn recommendations(spend: &SpendSummary, team: &str) -> Vec<String> {
    vec![
        "Focus remaining budget on value opportunities in mid-tier players ($16-$30 range)"
            .to_string(),
        "Historical data suggests elite players are typically undervalued - prioritize if available"
            .to_string(),
        "Avoid overpaying for replacement-level players in the $1-$5 range".to_string(),
        format!(
            "With ${} remaining and avg roster size of {:.1}, {} needs approximately {} more players",
            spend.target_remaining(),
            spend.avg_roster_size(),
            team,
            spend.roster_gap()
        ),
        format!(
            "Target positions where {} has paid below league average for potential value adds",
            team
        ),
    ]
}
