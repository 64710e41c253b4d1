//! One in-progress match and the result of settling it.

use battle_core::{
    BattleAction, BattleConfig, BattleEngine, BattleError, BattleEvent, BattleOutcome, BattleState,
    CombatMode, Combatant, LevelUp, Phase, RandomSource, RewardResult, Side, Strategy, TurnOutcome,
};

/// A turn-based match owned by exactly one caller.
///
/// Dropping a session without settling it is a forfeit: no reward, no record.
#[derive(Debug)]
pub struct BattleSession {
    state: BattleState,
    strategy: Strategy,
    log: Vec<BattleEvent>,
}

impl BattleSession {
    pub fn new(mode: CombatMode, player: Combatant, opponent: Combatant) -> Self {
        Self {
            state: BattleState::new(mode, player, opponent),
            strategy: Strategy::for_mode(mode),
            log: Vec::new(),
        }
    }

    pub fn mode(&self) -> CombatMode {
        self.state.mode
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    /// Every event so far, oldest first.
    pub fn events(&self) -> &[BattleEvent] {
        &self.log
    }

    /// Side expected to act, while the battle is running.
    pub fn next_actor(&self) -> Option<Side> {
        match self.state.phase {
            Phase::InProgress => Some(self.state.turn),
            Phase::Setup | Phase::Ended { .. } => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.state.outcome()
    }

    pub(crate) fn start(
        &mut self,
        config: &BattleConfig,
        rng: &mut impl RandomSource,
    ) -> Result<(), BattleError> {
        let event = BattleEngine::new(&mut self.state, config).start(rng)?;
        self.log.push(event);
        Ok(())
    }

    pub(crate) fn player_action(
        &mut self,
        action: BattleAction,
        config: &BattleConfig,
        rng: &mut impl RandomSource,
    ) -> Result<TurnOutcome, BattleError> {
        let outcome =
            BattleEngine::new(&mut self.state, config).execute(Side::Player, action, rng)?;
        Ok(self.record(outcome))
    }

    pub(crate) fn opponent_turn(
        &mut self,
        config: &BattleConfig,
        rng: &mut impl RandomSource,
    ) -> Result<TurnOutcome, BattleError> {
        let outcome =
            BattleEngine::new(&mut self.state, config).opponent_turn(&self.strategy, rng)?;
        Ok(self.record(outcome))
    }

    /// Resolves whichever side is due, letting the mode's strategy play the
    /// player's pet as well.
    pub(crate) fn autoplay_turn(
        &mut self,
        config: &BattleConfig,
        rng: &mut impl RandomSource,
    ) -> Result<TurnOutcome, BattleError> {
        let side = self.state.turn;
        let outcome =
            BattleEngine::new(&mut self.state, config).ai_turn(side, &self.strategy, rng)?;
        Ok(self.record(outcome))
    }

    fn record(&mut self, outcome: TurnOutcome) -> TurnOutcome {
        self.log.extend(outcome.events.iter().cloned());
        outcome
    }
}

/// What a finished battle or run paid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// `None` for runner results.
    pub outcome: Option<BattleOutcome>,
    pub reward: RewardResult,
    pub level_up: LevelUp,
    pub new_high_score: bool,
    /// False when a write failed after the reward was computed; the player
    /// should be told their results may not have saved.
    pub persisted: bool,
}
