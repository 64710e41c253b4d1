//! Battle balance loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BattleConfig`] from TOML files.
///
/// Missing sections and fields fall back to their defaults, so a file only
/// needs to name the values it overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        validate(&config)?;
        Ok(config)
    }
}

fn validate(config: &BattleConfig) -> LoadResult<()> {
    let combat = &config.combat;
    if combat.variance_min > combat.variance_max {
        anyhow::bail!(
            "combat variance range is inverted: {} > {}",
            combat.variance_min,
            combat.variance_max
        );
    }
    if combat.dodge_agility_divisor <= 0.0 {
        anyhow::bail!("combat.dodge_agility_divisor must be positive");
    }
    let generator = &config.generator;
    if generator.jitter_min > generator.jitter_max {
        anyhow::bail!(
            "generator jitter range is inverted: {} > {}",
            generator.jitter_min,
            generator.jitter_max
        );
    }
    if config.generator.opponent_names.is_empty() {
        anyhow::bail!("generator.opponent_names must not be empty");
    }
    if config.rewards.runner_xp_divisor == 0 {
        anyhow::bail!("rewards.runner_xp_divisor must be positive");
    }
    for band in [
        &config.rewards.bot_easy,
        &config.rewards.bot_medium,
        &config.rewards.bot_hard,
    ] {
        if band.win_gems_min > band.win_gems_max {
            anyhow::bail!(
                "bot reward band is inverted: {}..={}",
                band.win_gems_min,
                band.win_gems_max
            );
        }
    }
    if let Some(pair) = config
        .rewards
        .runner_tiers
        .windows(2)
        .find(|pair| pair[0].min_score >= pair[1].min_score)
    {
        anyhow::bail!(
            "rewards.runner_tiers must ascend by min_score: {} then {}",
            pair[0].min_score,
            pair[1].min_score
        );
    }

    let leveling = &config.leveling;
    if leveling.early_band_max_level > leveling.mid_band_max_level {
        anyhow::bail!(
            "leveling bands are out of order: early ends at {}, mid at {}",
            leveling.early_band_max_level,
            leveling.mid_band_max_level
        );
    }
    for (name, xp) in [
        ("early_band_xp", leveling.early_band_xp),
        ("mid_band_xp", leveling.mid_band_xp),
        ("late_band_xp", leveling.late_band_xp),
    ] {
        if xp == 0 {
            anyhow::bail!("leveling.{name} must be positive");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::LevelUpGems;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [energy]
            max = 120

            [leveling]
            gem_policy = "every_level"
            "#,
        )
        .expect("valid config");

        assert_eq!(config.energy.max, 120);
        assert_eq!(config.energy.pvp_cost, 20);
        assert_eq!(config.leveling.gem_policy, LevelUpGems::EveryLevel);
        assert_eq!(config.combat, BattleConfig::default().combat);
    }

    #[test]
    fn rejects_inverted_ranges() {
        let err = ConfigLoader::parse(
            r#"
            [combat]
            variance_min = 1.2
            variance_max = 0.8
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("variance"));
    }

    #[test]
    fn rejects_unsorted_runner_tiers() {
        let err = ConfigLoader::parse(
            r#"
            [rewards]
            runner_tiers = [
                { min_score = 0, gems = 5 },
                { min_score = 300, gems = 20 },
                { min_score = 100, gems = 12 },
            ]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("runner_tiers"));

        let config = ConfigLoader::parse(
            r#"
            [rewards]
            runner_tiers = [
                { min_score = 0, gems = 5 },
                { min_score = 100, gems = 12 },
                { min_score = 300, gems = 20 },
            ]
            "#,
        )
        .expect("ascending tiers");
        assert_eq!(config.rewards.runner_tier_gems(250), 12);
    }

    #[test]
    fn rejects_inverted_jitter() {
        let err = ConfigLoader::parse(
            r#"
            [generator]
            jitter_min = 1.1
            jitter_max = 0.9
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("jitter"));
    }

    #[test]
    fn rejects_unordered_or_empty_xp_bands() {
        let err = ConfigLoader::parse(
            r#"
            [leveling]
            early_band_max_level = 30
            mid_band_max_level = 20
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of order"));

        let err = ConfigLoader::parse(
            r#"
            [leveling]
            mid_band_xp = 0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("mid_band_xp"));
    }

    #[test]
    fn reports_missing_file() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read file"));
    }
}
