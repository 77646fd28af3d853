//! Race-Card Catalog Adapter — File-backed Horse Catalog
//!
//! Implements the `RaceCatalog` port from a JSON race-card file: an
//! array of races, each carrying its horse list with scratch/void
//! cutoffs. Loaded once at startup; the catalog is owned by an external
//! system, so this adapter is strictly read-only.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;
use tracing::info;

use crate::domain::wager::{Horse, RaceId};
use crate::ports::catalog::RaceCatalog;

/// One race entry in the race-card file.
#[derive(Debug, Deserialize)]
struct RaceCard {
    race_id: RaceId,
    #[allow(dead_code)]
    name: Option<String>,
    horses: Vec<Horse>,
}

/// In-memory race catalog loaded from a JSON race-card file.
pub struct RaceCardFile {
    races: HashMap<RaceId, Vec<Horse>>,
}

impl RaceCardFile {
    /// Load and index a race-card file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read race card file: {path}"))?;
        let cards: Vec<RaceCard> =
            serde_json::from_str(&content).context("Failed to parse race card JSON")?;

        let races: HashMap<RaceId, Vec<Horse>> = cards
            .into_iter()
            .map(|card| (card.race_id, card.horses))
            .collect();

        info!(races = races.len(), path, "Race card loaded");
        Ok(Self { races })
    }

    /// Build a catalog directly from memory (tests, embedded cards).
    pub fn from_races(races: HashMap<RaceId, Vec<Horse>>) -> Self {
        Self { races }
    }
}

#[async_trait]
impl RaceCatalog for RaceCardFile {
    async fn horses(&self, race_id: RaceId) -> Result<Option<Vec<Horse>>> {
        Ok(self.races.get(&race_id).cloned())
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}
