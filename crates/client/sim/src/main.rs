//! Headless battle simulator.
//!
//! Creates a pet from a starter template and plays a batch of matches end to
//! end with the AI controlling both sides, on a simulated clock that waits
//! for energy to regenerate whenever a match is unaffordable.
//!
//! ```bash
//! SIM_MODE=pvp SIM_BATTLES=25 SIM_SEED=7 cargo run -p battle-sim
//! RUST_LOG=battle_core=debug SIM_MODE=bot SIM_DIFFICULTY=hard cargo run -p battle-sim
//! ```
mod config;

use std::sync::Arc;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};

use battle_content::ContentFactory;
use battle_core::{BattleError, BattleMode, BattleOutcome};
use battle_runtime::{
    BattleSession, FileStore, InMemoryStore, KeyValueStore, Runtime, RuntimeError, Settlement,
};

use config::SimConfig;

/// Highest score the simulated runner can post.
const MAX_RUNNER_SCORE: u64 = 650;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!("Starting simulation: {:?}", config);

    let mut runtime = build_runtime(&config)?;
    let mut clock = Utc::now();
    let start = runtime.create_pet(&config.pet, clock)?;
    tracing::info!(
        "Playing as {} (level {}, tier {})",
        start.pet.name,
        start.pet.level,
        start.pet.tier
    );

    let mut tally = Tally::default();
    let mut scores = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
    for round in 1..=config.battles {
        let settlement = match config.mode {
            BattleMode::Runner => {
                wait_for_energy(&mut clock, |now| runtime.start_run(now).map(|_| ()))?;
                let score = scores.gen_range(0..=MAX_RUNNER_SCORE);
                runtime.finish_run(score, clock)?
            }
            mode => {
                let mut session = None;
                wait_for_energy(&mut clock, |now| {
                    session = Some(runtime.start_battle(mode, now)?);
                    Ok(())
                })?;
                let Some(mut session) = session else {
                    anyhow::bail!("battle session was not opened");
                };
                play(&mut runtime, &mut session)?;
                runtime.finish_battle(&session)?
            }
        };
        tally.record(round, &settlement);
        clock += Duration::minutes(1);
    }

    let progression = runtime.progression()?;
    let record = runtime.battle_stats()?;
    println!("== {} matches ({}) ==", config.battles, config.mode);
    println!("wins {} / losses {}", tally.wins, tally.losses);
    println!("gems {:+} / xp {}", tally.gems, tally.xp);
    println!(
        "{}: level {}, tier {}, {} gems",
        progression.pet.name, progression.pet.level, progression.pet.tier, progression.gems
    );
    println!(
        "pvp {}-{} | bot easy {}-{} medium {}-{} hard {}-{} | runner best {} over {} runs",
        record.pvp.wins,
        record.pvp.losses,
        record.bot.easy.wins,
        record.bot.easy.losses,
        record.bot.medium.wins,
        record.bot.medium.losses,
        record.bot.hard.wins,
        record.bot.hard.losses,
        record.runner.high_score,
        record.runner.total_runs
    );
    if tally.unsaved > 0 {
        println!("warning: {} results may not have saved", tally.unsaved);
    }

    Ok(())
}

fn build_runtime(config: &SimConfig) -> Result<Runtime> {
    let mut builder = Runtime::builder();

    if let Some(data_dir) = &config.data_dir {
        let factory = ContentFactory::new(data_dir);
        builder = builder
            .battle_config(factory.load_config()?)
            .catalog(factory.load_templates()?);
        tracing::info!("Loaded content from {}", data_dir.display());
    }
    if let Some(seed) = config.seed {
        builder = builder.seed(seed);
    }
    let store: Arc<dyn KeyValueStore> = match &config.save_dir {
        Some(dir) => Arc::new(FileStore::new(dir)?),
        None => Arc::new(InMemoryStore::new()),
    };

    Ok(builder.store(store).build())
}

/// Retries `attempt` after advancing the clock past an energy shortfall.
fn wait_for_energy(
    clock: &mut DateTime<Utc>,
    mut attempt: impl FnMut(DateTime<Utc>) -> battle_runtime::Result<()>,
) -> Result<()> {
    match attempt(*clock) {
        Err(RuntimeError::Battle(BattleError::InsufficientEnergy {
            required,
            available,
        })) => {
            let wait = i64::from(required.saturating_sub(available));
            tracing::debug!("Waiting {} minutes for energy", wait);
            *clock += Duration::minutes(wait);
            attempt(*clock)?;
            Ok(())
        }
        other => Ok(other?),
    }
}

fn play(runtime: &mut Runtime, session: &mut BattleSession) -> Result<()> {
    while !session.is_over() {
        let outcome = runtime.autoplay_turn(session)?;
        for event in &outcome.events {
            tracing::debug!("{}", event.describe(session.state()));
        }
    }
    Ok(())
}

#[derive(Default)]
struct Tally {
    wins: u32,
    losses: u32,
    gems: i64,
    xp: u64,
    unsaved: u32,
}

impl Tally {
    fn record(&mut self, round: u32, settlement: &Settlement) {
        match settlement.outcome {
            Some(BattleOutcome::Victory) => self.wins += 1,
            Some(BattleOutcome::Defeat) => self.losses += 1,
            None => {}
        }
        self.gems += settlement.reward.gems;
        self.xp += settlement.reward.xp;
        if !settlement.persisted {
            self.unsaved += 1;
        }

        tracing::info!(
            "#{round}: {:?} gems {:+} xp {}{}",
            settlement.outcome,
            settlement.reward.gems,
            settlement.reward.xp,
            if settlement.reward.daily_limit_reached {
                " (daily gem limit)"
            } else {
                ""
            }
        );
        if settlement.level_up.leveled_up {
            tracing::info!(
                "Level up! {} -> {} (+{} gems)",
                settlement.level_up.old_level,
                settlement.level_up.new_level,
                settlement.level_up.gems_earned
            );
        }
    }
}
