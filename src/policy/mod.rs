//! Public API for the turn policy.
//!
//! A `TurnPolicy` is built once from a validated `PolicyConfig` and then
//! asked to play each turn against an engine. It keeps no state of its own:
//! the caller threads `PolicyState` through every turn.

pub mod anticipate;
pub mod attack;
pub mod foundation;
pub mod opening;
pub mod reactive;
pub mod reinforce;
pub mod safety;
pub mod scoring;

pub use anticipate::{anticipated_exit, reinforce_anticipated};
pub use attack::{launch_attack, shield_location, transient_shield, AttackPlay};
pub use reinforce::{reinforce_defenses, ReinforceOutcome, ReinforceStop};
pub use safety::{least_damage_spawn, safest_spawn, SpawnEstimate};
pub use scoring::{block_defense_score, Lane, TurretPresenceTally};

use crate::action::*;
use crate::config::{PolicyConfig, ReinforceMode};
use crate::engine::*;
use crate::error::ConfigError;
use crate::state::PolicyState;
use log::*;
use serde::{Deserialize, Serialize};

/// Everything a turn did, in the order it happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub tally: TurretPresenceTally,
    pub play: AttackPlay,
    /// `None` when the play suppressed reinforcement.
    pub reinforce: Option<ReinforceOutcome>,
    pub actions: Vec<TurnAction>,
}

#[derive(Clone, Debug)]
pub struct TurnPolicy {
    config: PolicyConfig,
}

impl TurnPolicy {
    pub fn new(config: PolicyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(TurnPolicy { config })
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Decide and issue this turn's actions without submitting them.
    pub fn on_turn<E: ArenaEngine>(
        &self,
        engine: &mut E,
        mut state: PolicyState,
    ) -> (PolicyState, TurnReport) {
        let config = &self.config;
        let mut context = TurnContext::new(engine);
        let turn = context.turn_number();

        info!(
            "turn {}: {} SP, {} MP",
            turn,
            context.sp(),
            context.mp()
        );

        if turn == config.opening.turn {
            opening::place_opening(&mut context, &config.opening);
        }

        let tally = TurretPresenceTally::from_view(context.view());
        debug!("lane ranking: {:?}", tally.ranked_lanes());

        let play = launch_attack(&mut context, &config.attack, &tally);

        let reinforce = if play.suppresses_reinforcement() {
            None
        } else {
            if let Some(foundation) = &config.foundation {
                foundation::repair_foundation(&mut context, foundation);
            }
            let outcome = match config.reinforce.mode {
                ReinforceMode::WeakestBlock => reinforce_defenses(&mut context, &config.reinforce),
                ReinforceMode::AnticipatedAttack => {
                    reinforce_anticipated(&mut context, &config.reinforce, &config.attack.threat)
                }
            };
            if config.reactive_defense {
                reactive::build_reactive_defense(&mut context, &state.breaches.scored_on);
            }
            Some(outcome)
        };

        state.turns_played += 1;

        let report = TurnReport {
            turn,
            tally,
            play,
            reinforce,
            actions: context.into_actions(),
        };
        (state, report)
    }

    /// Run the turn and submit it.
    pub fn play_turn<E: ArenaEngine>(
        &self,
        engine: &mut E,
        state: PolicyState,
    ) -> (PolicyState, TurnReport) {
        let (state, report) = self.on_turn(engine, state);
        engine.submit_turn();
        info!(
            "turn {} submitted with {} actions",
            report.turn,
            report.actions.len()
        );
        (state, report)
    }
}
