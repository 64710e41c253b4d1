//! Battle actions and match modes.

/// What a combatant does on its turn.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleAction {
    /// Basic strike driven by attack and strength.
    Attack,
    /// Heavy strike driven by attack and energy.
    Special,
    /// No damage; halves the next hit taken before this side acts again.
    Defend,
}

impl BattleAction {
    /// Returns true for actions that go through damage resolution.
    pub const fn deals_damage(self) -> bool {
        !matches!(self, BattleAction::Defend)
    }
}

/// Practice-bot difficulty.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Capitalized label used for bot names and narration.
    pub const fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Turn-based modes, i.e. the ones that run through the battle engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CombatMode {
    /// Player against a generated opponent.
    Pvp,
    /// Practice match against a bot scaled from the player's own pet.
    Bot(Difficulty),
}

impl CombatMode {
    /// Dodge rolls only exist in practice matches.
    pub const fn allows_dodge(self) -> bool {
        matches!(self, CombatMode::Bot(_))
    }
}

/// Every mode that costs energy and pays out rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BattleMode {
    Pvp,
    Bot(Difficulty),
    /// Endless runner; only its reward tiers live in this crate.
    Runner,
}

impl From<CombatMode> for BattleMode {
    fn from(mode: CombatMode) -> Self {
        match mode {
            CombatMode::Pvp => BattleMode::Pvp,
            CombatMode::Bot(difficulty) => BattleMode::Bot(difficulty),
        }
    }
}

impl std::fmt::Display for BattleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BattleMode::Pvp => write!(f, "pvp"),
            BattleMode::Bot(difficulty) => write!(f, "bot:{difficulty}"),
            BattleMode::Runner => write!(f, "runner"),
        }
    }
}
