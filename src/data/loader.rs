//! JSON input loading.

use crate::models::{AuctionSnapshot, HistoricalReference};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while reading an input document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the auction room snapshot.
pub fn load_auction(path: &Path) -> Result<AuctionSnapshot, LoadError> {
    let snapshot: AuctionSnapshot = load_json(path)?;
    info!(
        "Loaded {} players from {}",
        snapshot.data.players.len(),
        path.display()
    );
    Ok(snapshot)
}

/// Load the historical inflation reference.
pub fn load_historical(path: &Path) -> Result<HistoricalReference, LoadError> {
    let reference: HistoricalReference = load_json(path)?;
    info!(
        "Loaded historical reference ({} tiers, {} price ranges) from {}",
        reference.aggregate.aggregate_tier_inflation.len(),
        reference.aggregate.aggregate_price_range_inflation.len(),
        path.display()
    );
    Ok(reference)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    debug!("Reading {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_auction() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("room.json");
        std::fs::write(
            &path,
            r#"{
                "metadata": {"fetchedAt": "2025-03-01T12:00:00Z"},
                "data": {"players": [
                    {"fullName": "A", "positions": ["OF"], "status": "drafted",
                     "winningBid": 12, "winningTeam": "Duke", "mlbTeam": "NYY"},
                    {"fullName": "B", "positions": ["SP"], "status": "available"}
                ]}
            }"#,
        )
        .unwrap();

        let snapshot = load_auction(&path).unwrap();
        assert_eq!(snapshot.metadata.fetched_at, "2025-03-01T12:00:00Z");
        assert_eq!(snapshot.data.players.len(), 2);
        assert_eq!(snapshot.data.players[0].winning_bid, Some(12));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_auction(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(&path, r#"{"aggregate": {"avgOverallInflationRate": 1.0"#).unwrap();

        let err = load_historical(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_load_historical() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"{"aggregate": {
                "avgOverallInflationRate": 4.2,
                "stdDevInflationRate": 11.0,
                "minInflationRate": -35.0,
                "maxInflationRate": 60.0,
                "aggregateTierInflation": [{"tier": 1, "avgInflationRate": -9.5}],
                "aggregatePriceRangeInflation": [{"range": "$1-$5", "avgInflationRate": 48.0}],
                "aggregatePositionInflation": {"C": {"avgInflationRate": 3.1}}
            }}"#,
        )
        .unwrap();

        let reference = load_historical(&path).unwrap();
        assert_eq!(reference.aggregate.avg_overall_inflation_rate, 4.2);
        assert_eq!(reference.aggregate.aggregate_tier_inflation.len(), 1);
        assert!(reference.aggregate.aggregate_position_inflation["C"].is_object());
    }
}
