use crate::error::BattleError;

use super::StatBlock;

/// A pet (or generated opponent) as it stands in a battle.
///
/// `max_health` is fixed from `stats.health` at construction and
/// `current_health` always stays within `[0, max_health]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    /// Evolution stage, 1-3.
    pub tier: u8,
    pub stats: StatBlock,
    current_health: u32,
    max_health: u32,
}

impl Combatant {
    /// Creates a combatant at full health.
    ///
    /// Fails when the stat block cannot fight (zero health).
    pub fn new(
        name: impl Into<String>,
        level: u32,
        tier: u8,
        stats: StatBlock,
    ) -> Result<Self, BattleError> {
        let name = name.into();
        stats.validate(&name)?;
        Ok(Self {
            name,
            level: level.max(1),
            tier: tier.clamp(1, 3),
            stats,
            current_health: stats.health,
            max_health: stats.health,
        })
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Current health as a percentage of max, in `[0, 100]`.
    pub fn health_percent(&self) -> f64 {
        f64::from(self.current_health) * 100.0 / f64::from(self.max_health)
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health == 0
    }

    /// Restores up to `amount`, never past max. Returns the amount restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = self
            .current_health
            .saturating_add(amount)
            .min(self.max_health);
        self.current_health - before
    }

    /// Removes up to `amount`, flooring at zero. Returns the amount removed.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let before = self.current_health;
        self.current_health = self.current_health.saturating_sub(amount);
        before - self.current_health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet() -> Combatant {
        Combatant::new("Vigor", 3, 1, StatBlock::new(80, 70, 65, 60, 90, 55, 70))
            .expect("valid stats")
    }

    #[test]
    fn health_stays_in_bounds() {
        let mut vigor = pet();
        assert_eq!(vigor.heal(10), 0);
        assert_eq!(vigor.current_health(), 80);

        assert_eq!(vigor.take_damage(30), 30);
        assert_eq!(vigor.heal(50), 30);
        assert_eq!(vigor.current_health(), 80);

        assert_eq!(vigor.take_damage(500), 80);
        assert!(vigor.is_defeated());
        assert_eq!(vigor.health_percent(), 0.0);
    }

    #[test]
    fn rejects_zero_health() {
        let result = Combatant::new("Ghost", 1, 1, StatBlock::default());
        assert!(result.is_err());
    }
}
