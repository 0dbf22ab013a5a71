//! Report rendering.
//!
//! Turns an [`AnalysisReport`] into pretty JSON, a Markdown document, or
//! the short console summary, and writes reports to disk.

use crate::report::builder::{AnalysisReport, ReportMetadata};
use anyhow::{Context, Result};
use chrono::DateTime;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Width of the `=` rules framing the console summary.
const RULE_WIDTH: usize = 100;

/// Generate a pretty-printed JSON report (2-space indent, UTF-8 as-is).
pub fn generate_json_report(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write report content to `path`.
///
/// Content goes to a temporary file next to the destination and is renamed
/// into place, so a failed run never leaves a partial report behind.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    file.write_all(content.as_bytes())?;
    file.persist(path)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Render the console summary printed after the report is saved.
pub fn console_summary(report: &AnalysisReport, max_insights: usize) -> String {
    let spend = &report.spend;
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{} (ROOM {}) - ANALYSIS SUMMARY\n",
        report.metadata.league_name.to_uppercase(),
        report.metadata.room_id
    ));
    out.push_str(&rule);
    out.push('\n');

    out.push_str(&format!(
        "\n{} Roster: {} players, ${} spent, ${} remaining\n",
        report.target_team,
        spend.target_players,
        spend.target_total,
        spend.target_remaining()
    ));
    out.push_str(&format!(
        "League Average: {:.1} players, ${:.0} spent per team\n",
        spend.avg_roster_size(),
        spend.avg_spend_per_team()
    ));

    out.push_str("\nKey Insights:\n");
    for (i, insight) in report.insights.iter().take(max_insights).enumerate() {
        out.push_str(&format!(
            "{}. [{}] {}\n",
            i + 1,
            insight.category,
            insight.finding
        ));
    }

    out
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "# {} Auction Analysis\n\n",
        report.metadata.league_name
    ));

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_overview_section(report));
    output.push_str(&generate_roster_section(report));
    output.push_str(&generate_market_section(report));
    output.push_str(&generate_comparison_section(report));
    output.push_str(&generate_teams_section(report));
    output.push_str(&generate_insights_section(report));
    output.push_str(&generate_list_section("Key Findings", &report.key_findings));
    output.push_str(&generate_list_section(
        "Recommendations",
        &report.recommendations,
    ));

    output
}

/// Render the snapshot timestamp, falling back to the raw string.
fn display_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(date) => date.format("%Y-%m-%d %H:%M:%S UTC%:z").to_string(),
        Err(_) => raw.to_string(),
    }
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Room:** {}\n", metadata.room_id));
    section.push_str(&format!("- **League Type:** {}\n", metadata.league_type));
    section.push_str(&format!(
        "- **Projection System:** {}\n",
        metadata.projection_system
    ));
    section.push_str(&format!(
        "- **Snapshot Date:** {}\n\n",
        display_date(&metadata.analysis_date)
    ));

    section
}

fn generate_overview_section(report: &AnalysisReport) -> String {
    let overview = &report.league_overview;
    let mut section = String::new();

    section.push_str("## League Overview\n\n");
    section.push_str("| Teams | Players Drafted | Money Spent | Avg Spend / Team | Avg Roster | Budget Used |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | ${} | ${:.1} | {:.1} | {:.1}% |\n\n",
        overview.total_teams,
        overview.total_players_drafted,
        overview.total_money_spent,
        overview.average_spend_per_team,
        overview.average_roster_size,
        overview.budget_utilization
    ));

    section
}

fn generate_roster_section(report: &AnalysisReport) -> String {
    let roster = &report.target_roster;
    let mut section = String::new();

    section.push_str(&format!("## {} Roster\n\n", report.target_team));
    section.push_str(&format!(
        "*{} players | ${} spent | ${} remaining | {:.1}% of budget*\n\n",
        roster.summary.player_count,
        roster.summary.total_spent,
        roster.summary.remaining_budget,
        roster.summary.budget_utilization
    ));

    if roster.players.is_empty() {
        section.push_str("No players drafted yet.\n\n");
        return section;
    }

    section.push_str("| Player | Positions | Bid | MLB Team |\n");
    section.push_str("|:---|:---|:---:|:---:|\n");
    for player in &roster.players {
        section.push_str(&format!(
            "| {} | {} | ${} | {} |\n",
            player.name,
            player.positions.join(", "),
            player.winning_bid,
            player.mlb_team
        ));
    }
    section.push('\n');

    section
}

fn generate_market_section(report: &AnalysisReport) -> String {
    let market = &report.league_market;
    let mut section = String::new();

    section.push_str("## League Market\n\n");

    section.push_str("### Positions\n\n");
    section.push_str("| Position | Count | Total | Avg | Median | Min | Max | Std Dev |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    for (pos, stats) in &market.position_stats {
        section.push_str(&format!(
            "| {} | {} | ${} | ${:.1} | ${:.1} | ${} | ${} | {:.1} |\n",
            pos,
            stats.count,
            stats.total_spent,
            stats.avg_bid,
            stats.median_bid,
            stats.min_bid,
            stats.max_bid,
            stats.std_dev
        ));
    }
    section.push('\n');

    if market.price_tier_stats.is_empty() {
        return section;
    }

    section.push_str("### Price Tiers\n\n");
    section.push_str("| Tier | Count | Total | Share | Avg |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|\n");
    for tier in market.price_tier_stats.iter() {
        section.push_str(&format!(
            "| {} | {} | ${} | {:.1}% | ${:.1} |\n",
            tier.label, tier.count, tier.total_spent, tier.percent_of_total, tier.avg_bid
        ));
    }
    section.push('\n');

    section
}

fn generate_comparison_section(report: &AnalysisReport) -> String {
    let comparison = &report.target_vs_league;
    let overall = &comparison.overall_comparison;
    let mut section = String::new();

    section.push_str(&format!("## {} vs League\n\n", report.target_team));
    section.push_str(&format!(
        "Average bid ${:.1} vs league ${:.1} ({:+.1}%)\n\n",
        overall.target_avg_bid, overall.league_avg_bid, overall.percent_diff
    ));

    if comparison.position_comparison.is_empty() {
        return section;
    }

    section.push_str(&format!(
        "| Position | {} Avg | League Avg | Diff | Verdict |\n",
        report.target_team
    ));
    section.push_str("|:---|:---:|:---:|:---:|:---:|\n");
    for (pos, row) in &comparison.position_comparison {
        section.push_str(&format!(
            "| {} | ${:.1} | ${:.1} | {:+.1}% | {} |\n",
            pos, row.target_avg, row.league_avg, row.percent_diff, row.interpretation
        ));
    }
    section.push('\n');

    section
}

fn generate_teams_section(report: &AnalysisReport) -> String {
    let mut section = String::new();

    section.push_str("## Teams\n\n");
    section.push_str("| Team | Players | Spent | Avg / Player | Remaining | Budget Used |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---:|:---:|\n");

    let mut teams: Vec<_> = report.team_comparison.iter().collect();
    teams.sort_by_key(|(_, row)| std::cmp::Reverse(row.total_spent));

    for (name, row) in teams {
        section.push_str(&format!(
            "| {} | {} | ${} | ${:.1} | ${} | {:.1}% |\n",
            name,
            row.player_count,
            row.total_spent,
            row.avg_per_player,
            row.remaining_budget,
            row.budget_utilization
        ));
    }
    section.push('\n');

    section
}

fn generate_insights_section(report: &AnalysisReport) -> String {
    let mut section = String::new();

    section.push_str("## Insights\n\n");
    for insight in &report.insights {
        section.push_str(&format!(
            "- **{}:** {}\n  > {}\n",
            insight.category, insight.finding, insight.implication
        ));
    }
    section.push('\n');

    section
}

fn generate_list_section(title: &str, items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str(&format!("## {}\n\n", title));
    for (i, item) in items.iter().enumerate() {
        section.push_str(&format!("{}. {}\n", i + 1, item));
    }
    section.push('\n');

    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeagueConfig;
    use crate::report::builder::{build_report, tests::fixture};
    use tempfile::TempDir;

    fn create_test_report() -> AnalysisReport {
        let (auction, historical) = fixture();
        build_report(&auction, &historical, &LeagueConfig::default(), |_| {}).unwrap()
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&create_test_report()).unwrap();

        assert!(json.starts_with("{\n  \"metadata\""));
        assert!(json.contains("\"leagueOverview\""));
        assert!(json.contains("\"dukeRoster\""));
        assert!(json.contains("\"dukeVsLeague\""));
        assert!(json.contains("\"keyFindings\""));
    }

    #[test]
    fn test_json_keeps_non_ascii_names() {
        let (auction, historical) = fixture();
        let league = LeagueConfig {
            target_team: "Alpha".to_string(),
            ..LeagueConfig::default()
        };
        let report = build_report(&auction, &historical, &league, |_| {}).unwrap();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"name\": \"Ángel Ortiz\""));
        assert!(!json.contains("\\u00c1"));
    }

    #[test]
    fn test_json_key_order() {
        let json = generate_json_report(&create_test_report()).unwrap();
        let keys = [
            "\"metadata\"",
            "\"leagueOverview\"",
            "\"dukeRoster\"",
            "\"leagueMarket\"",
            "\"dukeVsLeague\"",
            "\"teamComparison\"",
            "\"historicalContext\"",
            "\"insights\"",
            "\"keyFindings\"",
            "\"recommendations\"",
        ];

        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_console_summary() {
        let summary = console_summary(&create_test_report(), 5);

        assert!(summary.contains(&"=".repeat(100)));
        assert!(summary.contains("DUKE DRAFT (ROOM 1362) - ANALYSIS SUMMARY"));
        assert!(summary.contains("Duke Roster: 1 players, $5 spent, $255 remaining"));
        assert!(summary.contains("League Average: 1.5 players, $18 spent per team"));
        assert!(summary.contains("1. [Budget Status]"));
        assert!(summary.contains("5. [Historical Context - Budget Players]"));
    }

    #[test]
    fn test_console_summary_truncates_insights() {
        let summary = console_summary(&create_test_report(), 2);
        assert!(summary.contains("2. [Roster Size]"));
        assert!(!summary.contains("3. ["));
    }

    #[test]
    fn test_generate_markdown_report() {
        let markdown = generate_markdown_report(&create_test_report());

        assert!(markdown.contains("# Duke Draft Auction Analysis"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## League Overview"));
        assert!(markdown.contains("## Duke Roster"));
        assert!(markdown.contains("## League Market"));
        assert!(markdown.contains("## Duke vs League"));
        assert!(markdown.contains("## Teams"));
        assert!(markdown.contains("## Insights"));
        assert!(markdown.contains("## Key Findings"));
        assert!(markdown.contains("## Recommendations"));
        assert!(markdown.contains("| Cal Reyes | C | $5 | FA |"));
    }

    #[test]
    fn test_display_date() {
        assert_eq!(
            display_date("2025-03-01T18:30:00Z"),
            "2025-03-01 18:30:00 UTC+00:00"
        );
        assert_eq!(display_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_write_report_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("server/analysis/report.json");

        write_report("{}", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        write_report("{\"a\": 1}", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_failed_write_leaves_nothing_behind() {
        let temp_dir = TempDir::new().unwrap();
        // An existing directory cannot be replaced by the renamed temp file
        let path = temp_dir.path().join("report.json");
        std::fs::create_dir(&path).unwrap();

        assert!(write_report("{}", &path).is_err());
        assert!(path.is_dir());

        let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("report.json")]);
    }
}
