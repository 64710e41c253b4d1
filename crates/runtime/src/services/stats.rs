use std::sync::Arc;

use battle_core::BattleRecord;

use crate::repository::{KeyValueStore, Result, load_json, save_json};

const BATTLE_STATS_KEY: &str = "battle_stats";

/// Win/loss and runner counters.
#[derive(Clone)]
pub struct BattleStatsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl BattleStatsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored counters, or all zeros for a new player.
    pub fn get_battle_stats(&self) -> Result<BattleRecord> {
        Ok(load_json(self.store.as_ref(), BATTLE_STATS_KEY)?.unwrap_or_default())
    }

    pub fn save_battle_stats(&self, record: &BattleRecord) -> Result<()> {
        save_json(self.store.as_ref(), BATTLE_STATS_KEY, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;
    use battle_core::{BattleOutcome, CombatMode, Difficulty};

    #[test]
    fn defaults_then_round_trips_counters() {
        let repo = BattleStatsRepository::new(Arc::new(InMemoryStore::new()));
        let mut record = repo.get_battle_stats().unwrap();
        assert_eq!(record, BattleRecord::default());

        record.record_combat(CombatMode::Bot(Difficulty::Hard), BattleOutcome::Victory);
        repo.save_battle_stats(&record).unwrap();

        let loaded = repo.get_battle_stats().unwrap();
        assert_eq!(loaded.bot.hard.wins, 1);
    }

    #[test]
    fn stored_document_uses_the_shared_shape() {
        let store = Arc::new(InMemoryStore::new());
        let repo = BattleStatsRepository::new(store.clone());
        let mut record = BattleRecord::default();
        record.runner.high_score = 320;
        repo.save_battle_stats(&record).unwrap();

        let raw = store.get(BATTLE_STATS_KEY).unwrap().expect("saved");
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["pvp"]["wins"], 0);
        assert_eq!(json["bot"]["medium"]["losses"], 0);
        assert_eq!(json["runner"]["highScore"], 320);
        assert_eq!(json["runner"]["todayGems"], 0);
    }
}
