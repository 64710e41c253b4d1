//! The seven pet attributes.

use strum::IntoEnumIterator;

use crate::error::BattleError;

/// Named attribute of a [`StatBlock`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    Health,
    Energy,
    Strength,
    Defense,
    Stamina,
    Agility,
    Attack,
}

/// A pet's attributes.
///
/// Values are typically 0-100 but are uncapped: level growth and evolution
/// push them past 100. Only `health` is required to be positive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub health: u32,
    pub energy: u32,
    pub strength: u32,
    pub defense: u32,
    pub stamina: u32,
    pub agility: u32,
    pub attack: u32,
}

impl StatBlock {
    pub const fn new(
        health: u32,
        energy: u32,
        strength: u32,
        defense: u32,
        stamina: u32,
        agility: u32,
        attack: u32,
    ) -> Self {
        Self {
            health,
            energy,
            strength,
            defense,
            stamina,
            agility,
            attack,
        }
    }

    pub const fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Health => self.health,
            StatKind::Energy => self.energy,
            StatKind::Strength => self.strength,
            StatKind::Defense => self.defense,
            StatKind::Stamina => self.stamina,
            StatKind::Agility => self.agility,
            StatKind::Attack => self.attack,
        }
    }

    pub fn set(&mut self, kind: StatKind, value: u32) {
        let slot = match kind {
            StatKind::Health => &mut self.health,
            StatKind::Energy => &mut self.energy,
            StatKind::Strength => &mut self.strength,
            StatKind::Defense => &mut self.defense,
            StatKind::Stamina => &mut self.stamina,
            StatKind::Agility => &mut self.agility,
            StatKind::Attack => &mut self.attack,
        };
        *slot = value;
    }

    /// Iterates `(kind, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKind, u32)> + '_ {
        StatKind::iter().map(move |kind| (kind, self.get(kind)))
    }

    /// Builds a block by computing each stat independently, in declaration order.
    pub fn from_fn(mut f: impl FnMut(StatKind) -> u32) -> Self {
        let mut block = Self::default();
        for kind in StatKind::iter() {
            block.set(kind, f(kind));
        }
        block
    }

    /// Multiplies every stat by `factor`, flooring each result.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_fn(|kind| (f64::from(self.get(kind)) * factor).floor() as u32)
    }

    /// Adds `amount` to every stat.
    pub fn grow(&mut self, amount: u32) {
        for kind in StatKind::iter() {
            self.set(kind, self.get(kind).saturating_add(amount));
        }
    }

    /// Checks the block can enter a battle.
    pub fn validate(&self, name: &str) -> Result<(), BattleError> {
        if self.health == 0 {
            return Err(BattleError::InvalidStatBlock {
                name: name.to_string(),
                reason: "health must be positive",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_floors_each_stat() {
        let stats = StatBlock::new(80, 70, 65, 60, 90, 55, 71);
        let evolved = stats.scaled(1.5);
        assert_eq!(evolved, StatBlock::new(120, 105, 97, 90, 135, 82, 106));
    }

    #[test]
    fn grow_touches_every_stat() {
        let mut stats = StatBlock::new(1, 2, 3, 4, 5, 6, 7);
        stats.grow(2);
        let values: Vec<u32> = stats.iter().map(|(_, value)| value).collect();
        assert_eq!(values, vec![3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn zero_health_is_rejected() {
        let stats = StatBlock::new(0, 50, 50, 50, 50, 50, 50);
        assert!(matches!(
            stats.validate("Ghost"),
            Err(BattleError::InvalidStatBlock { .. })
        ));
        assert!(StatBlock::new(1, 0, 0, 0, 0, 0, 0).validate("Pip").is_ok());
    }

    #[test]
    fn stat_kind_parses_snake_case() {
        assert_eq!("agility".parse::<StatKind>(), Ok(StatKind::Agility));
        assert_eq!(StatKind::Health.to_string(), "health");
    }
}
