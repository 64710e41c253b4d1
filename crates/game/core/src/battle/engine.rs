use tracing::{debug, info};

use crate::action::BattleAction;
use crate::ai::Strategy;
use crate::combat::{
    apply_defend_posture, compute_damage, counter_reflect, endurance_heal, roll_dodge,
};
use crate::config::BattleConfig;
use crate::env::RandomSource;
use crate::error::BattleError;
use crate::traits::{TraitKind, evaluate_traits};

use super::{BattleEvent, BattleState, Phase, Side};

/// Everything that resolved for one action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnOutcome {
    pub actor: Side,
    pub action: BattleAction,
    pub events: Vec<BattleEvent>,
    /// Set when this action ended the battle.
    pub winner: Option<Side>,
}

/// Drives a [`BattleState`] through its lifecycle.
///
/// The engine borrows the state for the duration of a call sequence; the
/// state itself stays with the match that owns it.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    config: &'a BattleConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState, config: &'a BattleConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    /// `Setup → InProgress`: evaluates both sides' traits and picks who acts first.
    ///
    /// First Strike wins outright, then higher agility, then a coin flip
    /// (the only draw this makes).
    pub fn start(&mut self, rng: &mut impl RandomSource) -> Result<BattleEvent, BattleError> {
        if self.state.phase != Phase::Setup {
            return Err(BattleError::AlreadyStarted);
        }

        let player_stats = self.state.player.combatant.stats;
        let opponent_stats = self.state.opponent.combatant.stats;
        let params = &self.config.traits;
        self.state.player.traits = evaluate_traits(&player_stats, Some(&opponent_stats), params);
        self.state.opponent.traits = evaluate_traits(&opponent_stats, Some(&player_stats), params);

        let player_first_strike = self.state.player.traits.has(TraitKind::FirstStrike);
        let opponent_first_strike = self.state.opponent.traits.has(TraitKind::FirstStrike);
        let first = if player_first_strike != opponent_first_strike {
            if player_first_strike { Side::Player } else { Side::Opponent }
        } else if player_stats.agility != opponent_stats.agility {
            if player_stats.agility > opponent_stats.agility {
                Side::Player
            } else {
                Side::Opponent
            }
        } else if rng.coin_flip() {
            Side::Player
        } else {
            Side::Opponent
        };

        self.state.turn = first;
        self.state.turn_count = 1;
        self.state.phase = Phase::InProgress;

        info!(
            mode = ?self.state.mode,
            player = %self.state.player.combatant.name,
            opponent = %self.state.opponent.combatant.name,
            %first,
            "battle started"
        );

        Ok(BattleEvent::Started {
            first,
            player_traits: self.state.player.traits,
            opponent_traits: self.state.opponent.traits,
        })
    }

    /// Resolves one action for `side`.
    ///
    /// Order: clear the actor's defend posture, Endurance heal, then either
    /// take up a defend posture or attack (bot-mode dodge, damage, the
    /// defender's posture, Counter). If the defender is at zero the actor
    /// wins; otherwise if a counter dropped the actor to zero the defender
    /// wins. The turn then passes to the other side.
    pub fn execute(
        &mut self,
        side: Side,
        action: BattleAction,
        rng: &mut impl RandomSource,
    ) -> Result<TurnOutcome, BattleError> {
        match self.state.phase {
            Phase::Setup => return Err(BattleError::NotStarted),
            Phase::Ended { .. } => return Err(BattleError::BattleEnded),
            Phase::InProgress => {}
        }
        if side != self.state.turn {
            return Err(BattleError::NotYourTurn { side });
        }

        let config = self.config;
        let mode = self.state.mode;
        let turn_count = self.state.turn_count;
        let mut events = Vec::new();

        let (actor, defender) = self.state.pair_mut(side);
        actor.defending = false;

        if actor.traits.has(TraitKind::Endurance) {
            let heal = endurance_heal(actor.combatant.max_health(), &config.traits);
            let healed = actor.combatant.heal(heal);
            if healed > 0 {
                events.push(BattleEvent::Healed {
                    side,
                    amount: healed,
                });
            }
        }

        match action {
            BattleAction::Defend => {
                actor.defending = true;
                events.push(BattleEvent::Defended { side });
            }
            BattleAction::Attack | BattleAction::Special => {
                let dodged = mode.allows_dodge()
                    && roll_dodge(defender.combatant.stats.agility, &config.combat, rng);
                if dodged {
                    events.push(BattleEvent::Dodged { side: side.other() });
                } else {
                    let roll = compute_damage(
                        &actor.combatant.stats,
                        &defender.combatant.stats,
                        action,
                        actor.traits,
                        config,
                        rng,
                    );
                    if roll.critical {
                        events.push(BattleEvent::CriticalHit { side });
                    }

                    let halved = defender.defending;
                    let amount = if halved {
                        apply_defend_posture(roll.amount, config)
                    } else {
                        roll.amount
                    };
                    let dealt = defender.combatant.take_damage(amount);
                    events.push(BattleEvent::Damaged {
                        attacker: side,
                        amount: dealt,
                        halved,
                    });

                    // Reflection is one level deep: no crit, no counter-counter.
                    if defender.traits.has(TraitKind::Counter)
                        && !defender.combatant.is_defeated()
                    {
                        let reflected = counter_reflect(dealt, &config.traits, rng);
                        if reflected > 0 {
                            let taken = actor.combatant.take_damage(reflected);
                            events.push(BattleEvent::Countered {
                                side: side.other(),
                                amount: taken,
                            });
                        }
                    }
                }
            }
        }

        actor.actions_taken += 1;

        let winner = if defender.combatant.is_defeated() {
            Some(side)
        } else if actor.combatant.is_defeated() {
            Some(side.other())
        } else {
            None
        };

        debug!(
            turn = turn_count,
            %side,
            %action,
            player_hp = self.state.player.combatant.current_health(),
            opponent_hp = self.state.opponent.combatant.current_health(),
            "action resolved"
        );

        match winner {
            Some(winner) => {
                self.state.phase = Phase::Ended { winner };
                events.push(BattleEvent::Ended { winner });
                info!(%winner, turns = turn_count, "battle ended");
            }
            None => {
                self.state.turn_count += 1;
                self.state.turn = side.other();
            }
        }

        Ok(TurnOutcome {
            actor: side,
            action,
            events,
            winner,
        })
    }

    /// Lets `strategy` pick and resolve the action for `side`.
    pub fn ai_turn(
        &mut self,
        side: Side,
        strategy: &Strategy,
        rng: &mut impl RandomSource,
    ) -> Result<TurnOutcome, BattleError> {
        let own = self.state.fighter(side);
        let other = self.state.fighter(side.other());
        let action = strategy.select(
            &own.combatant,
            &other.combatant,
            own.actions_taken + 1,
            own.traits,
            rng,
        );
        self.execute(side, action, rng)
    }

    /// The non-player side's move.
    pub fn opponent_turn(
        &mut self,
        strategy: &Strategy,
        rng: &mut impl RandomSource,
    ) -> Result<TurnOutcome, BattleError> {
        self.ai_turn(Side::Opponent, strategy, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CombatMode, Difficulty};
    use crate::env::SequenceRng;
    use crate::stats::{Combatant, StatBlock};

    fn combatant(name: &str, stats: StatBlock) -> Combatant {
        Combatant::new(name, 5, 1, stats).expect("valid stats")
    }

    // attack 60, strength 50 vs defense 50: 48 + 10 - 15 = 43 base, 36 at minimum variance
    fn plain(agility: u32) -> StatBlock {
        StatBlock::new(100, 50, 50, 50, 50, agility, 60)
    }

    fn battle(mode: CombatMode, player: StatBlock, opponent: StatBlock) -> BattleState {
        BattleState::new(mode, combatant("Pip", player), combatant("Rex", opponent))
    }

    #[test]
    fn faster_side_goes_first() {
        let config = BattleConfig::default();
        let mut state = battle(CombatMode::Pvp, plain(40), plain(60));
        let mut rng = SequenceRng::constant(0.0);
        let mut engine = BattleEngine::new(&mut state, &config);

        let started = engine.start(&mut rng).expect("starts");
        assert_eq!(
            started,
            BattleEvent::Started {
                first: Side::Opponent,
                player_traits: crate::traits::TraitSet::empty(),
                opponent_traits: crate::traits::TraitSet::FIRST_STRIKE,
            }
        );
        assert_eq!(rng.draws(), 0);
        assert_eq!(state.turn_count, 1);
        assert_eq!(state.phase, Phase::InProgress);
    }

    #[test]
    fn agility_tie_is_a_coin_flip() {
        let config = BattleConfig::default();
        for (draw, expected) in [(0.2, Side::Player), (0.7, Side::Opponent)] {
            let mut state = battle(CombatMode::Pvp, plain(50), plain(50));
            let mut rng = SequenceRng::constant(draw);
            BattleEngine::new(&mut state, &config)
                .start(&mut rng)
                .expect("starts");
            assert_eq!(state.turn, expected);
            assert_eq!(rng.draws(), 1);
        }
    }

    #[test]
    fn lifecycle_errors() {
        let config = BattleConfig::default();
        let mut state = battle(CombatMode::Pvp, plain(60), plain(40));
        let mut rng = SequenceRng::constant(0.0);
        let mut engine = BattleEngine::new(&mut state, &config);

        assert_eq!(
            engine.execute(Side::Player, BattleAction::Attack, &mut rng),
            Err(BattleError::NotStarted)
        );
        engine.start(&mut rng).expect("starts");
        assert_eq!(engine.start(&mut rng), Err(BattleError::AlreadyStarted));
        assert_eq!(
            engine.execute(Side::Opponent, BattleAction::Attack, &mut rng),
            Err(BattleError::NotYourTurn {
                side: Side::Opponent
            })
        );
    }

    #[test]
    fn defend_halves_the_next_hit_only() {
        let config = BattleConfig::default();
        let mut state = battle(CombatMode::Pvp, plain(60), plain(40));
        let mut rng = SequenceRng::constant(0.0);
        let mut engine = BattleEngine::new(&mut state, &config);
        engine.start(&mut rng).expect("starts");

        engine
            .execute(Side::Player, BattleAction::Attack, &mut rng)
            .expect("player attacks");
        let defend = engine
            .execute(Side::Opponent, BattleAction::Defend, &mut rng)
            .expect("opponent defends");
        assert_eq!(defend.events, vec![BattleEvent::Defended { side: Side::Opponent }]);

        let hit = engine
            .execute(Side::Player, BattleAction::Attack, &mut rng)
            .expect("player attacks");
        assert_eq!(
            hit.events,
            vec![BattleEvent::Damaged {
                attacker: Side::Player,
                amount: 18,
                halved: true,
            }]
        );

        engine
            .execute(Side::Opponent, BattleAction::Attack, &mut rng)
            .expect("opponent attacks");
        let hit = engine
            .execute(Side::Player, BattleAction::Attack, &mut rng)
            .expect("player attacks");
        assert_eq!(
            hit.events,
            vec![BattleEvent::Damaged {
                attacker: Side::Player,
                amount: 36,
                halved: false,
            }]
        );
        assert_eq!(state.opponent.combatant.current_health(), 100 - 36 - 18 - 36);
        assert_eq!(state.turn_count, 6);
    }

    #[test]
    fn endurance_heals_at_turn_start_up_to_max() {
        let config = BattleConfig::default();
        let mut player = plain(40);
        player.stamina = 80;
        let mut state = battle(CombatMode::Pvp, player, plain(60));
        let mut rng = SequenceRng::constant(0.0);
        let mut engine = BattleEngine::new(&mut state, &config);
        engine.start(&mut rng).expect("starts");

        engine
            .execute(Side::Opponent, BattleAction::Attack, &mut rng)
            .expect("opponent attacks");
        let turn = engine
            .execute(Side::Player, BattleAction::Defend, &mut rng)
            .expect("player defends");
        assert_eq!(turn.events[0], BattleEvent::Healed { side: Side::Player, amount: 10 });
        assert_eq!(state.player.combatant.current_health(), 74);

        // At full health the heal is a no-op and logs nothing.
        let mut state = battle(CombatMode::Pvp, player, plain(30));
        let mut engine = BattleEngine::new(&mut state, &config);
        engine.start(&mut rng).expect("starts");
        let turn = engine
            .execute(Side::Player, BattleAction::Defend, &mut rng)
            .expect("player defends");
        assert_eq!(turn.events, vec![BattleEvent::Defended { side: Side::Player }]);
        assert_eq!(state.player.combatant.current_health(), 100);
    }

    #[test]
    fn counter_can_finish_the_attacker() {
        let config = BattleConfig::default();
        let mut opponent = plain(40);
        opponent.defense = 61;
        let mut state = battle(CombatMode::Pvp, plain(60), opponent);
        state.player.combatant.take_damage(90);

        // variance draw, then counter draw
        let mut rng = SequenceRng::new(vec![0.0, 0.1]);
        let mut engine = BattleEngine::new(&mut state, &config);
        engine.start(&mut rng).expect("starts");

        let turn = engine
            .execute(Side::Player, BattleAction::Attack, &mut rng)
            .expect("player attacks");
        // 48 + 10 - 18.3 = 39.7 -> 39; * 0.85 -> 33; reflect 16, only 10 left to take
        assert_eq!(
            turn.events,
            vec![
                BattleEvent::Damaged {
                    attacker: Side::Player,
                    amount: 33,
                    halved: false,
                },
                BattleEvent::Countered {
                    side: Side::Opponent,
                    amount: 10,
                },
                BattleEvent::Ended {
                    winner: Side::Opponent
                },
            ]
        );
        assert_eq!(turn.winner, Some(Side::Opponent));
        assert_eq!(
            engine.execute(Side::Opponent, BattleAction::Attack, &mut rng),
            Err(BattleError::BattleEnded)
        );
        assert_eq!(state.outcome(), Some(crate::reward::BattleOutcome::Defeat));
    }

    #[test]
    fn dodge_only_in_bot_mode() {
        let config = BattleConfig::default();
        let mut nimble = plain(40);
        nimble.agility = 120;

        let mut state = battle(CombatMode::Bot(Difficulty::Easy), plain(130), nimble);
        let mut rng = SequenceRng::constant(0.1);
        let mut engine = BattleEngine::new(&mut state, &config);
        engine.start(&mut rng).expect("starts");
        let turn = engine
            .execute(Side::Player, BattleAction::Special, &mut rng)
            .expect("player attacks");
        assert_eq!(turn.events, vec![BattleEvent::Dodged { side: Side::Opponent }]);
        assert_eq!(rng.draws(), 1);
        assert_eq!(state.opponent.combatant.current_health(), 100);

        let mut state = battle(CombatMode::Pvp, plain(130), nimble);
        let mut engine = BattleEngine::new(&mut state, &config);
        let mut rng = SequenceRng::constant(0.1);
        engine.start(&mut rng).expect("starts");
        let turn = engine
            .execute(Side::Player, BattleAction::Special, &mut rng)
            .expect("player attacks");
        assert!(matches!(turn.events[0], BattleEvent::Damaged { .. }));
    }
}
