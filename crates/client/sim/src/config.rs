//! Simulation settings read from the environment.
use std::env;
use std::path::PathBuf;

use battle_core::{BattleMode, Difficulty};

/// Configuration for one simulation run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub battles: u32,
    pub seed: Option<u64>,
    pub mode: BattleMode,
    pub pet: String,
    pub data_dir: Option<PathBuf>,
    pub save_dir: Option<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            battles: 10,
            seed: None,
            mode: BattleMode::Bot(Difficulty::Medium),
            pet: battle_content::DEFAULT_TEMPLATE.to_string(),
            data_dir: None,
            save_dir: None,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SIM_BATTLES` - Number of matches to play (default: 10)
    /// - `SIM_SEED` - RNG seed for reproducible runs (default: random)
    /// - `SIM_MODE` - `pvp`, `bot` or `runner` (default: bot)
    /// - `SIM_DIFFICULTY` - `easy`, `medium` or `hard` for bot matches (default: medium)
    /// - `SIM_PET` - Starter template id (default: vigor)
    /// - `SIM_DATA_DIR` - Directory holding `config.toml` / `pets.ron` (default: built-in content)
    /// - `SIM_SAVE_DIR` - Persist the profile as JSON files here (default: in memory)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(battles) = read_env::<u32>("SIM_BATTLES") {
            config.battles = battles;
        }
        config.seed = read_env::<u64>("SIM_SEED");

        let difficulty = read_env::<Difficulty>("SIM_DIFFICULTY").unwrap_or_default();
        config.mode = match env::var("SIM_MODE").ok().as_deref() {
            Some(mode) => parse_mode(mode, difficulty).unwrap_or_else(|| {
                tracing::warn!("Unknown SIM_MODE {:?}, using bot", mode);
                BattleMode::Bot(difficulty)
            }),
            None => BattleMode::Bot(difficulty),
        };

        if let Ok(pet) = env::var("SIM_PET") {
            config.pet = pet;
        }
        config.data_dir = env::var("SIM_DATA_DIR").ok().map(PathBuf::from);
        config.save_dir = env::var("SIM_SAVE_DIR").ok().map(PathBuf::from);

        config
    }
}

fn parse_mode(mode: &str, difficulty: Difficulty) -> Option<BattleMode> {
    match mode.trim().to_ascii_lowercase().as_str() {
        "pvp" => Some(BattleMode::Pvp),
        "bot" => Some(BattleMode::Bot(difficulty)),
        "runner" => Some(BattleMode::Runner),
        _ => None,
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modes() {
        assert_eq!(parse_mode("PvP", Difficulty::Easy), Some(BattleMode::Pvp));
        assert_eq!(
            parse_mode("bot", Difficulty::Hard),
            Some(BattleMode::Bot(Difficulty::Hard))
        );
        assert_eq!(parse_mode(" runner ", Difficulty::Easy), Some(BattleMode::Runner));
        assert_eq!(parse_mode("arena", Difficulty::Easy), None);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().ok(), Some(Difficulty::Hard));
    }
}
