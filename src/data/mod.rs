//! Input acquisition.
//!
//! Loads the auction snapshot and historical reference from disk and
//! narrows the player list down to drafted players.

pub mod extract;
pub mod loader;

pub use extract::{extract_players, DraftPool};
pub use loader::{load_auction, load_historical};
