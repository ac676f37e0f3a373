//! Spend leftover SP on the weakest defense block, one action per pass.

use super::scoring::*;
use crate::action::*;
use crate::config::*;
use crate::engine::*;
use crate::unit::*;
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReinforceStop {
    /// SP fell to the configured reserve.
    Reserve,
    /// A pass produced nothing, or there was nothing to build toward.
    Exhausted,
    IterationCap,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforceOutcome {
    /// Passes started.
    pub iterations: u32,
    /// Accepted actions.
    pub actions: u32,
    pub stop: ReinforceStop,
}

/// One step on a block: upgrade its first own unupgraded structure, or
/// failing that, place a turret on its first empty cell.
pub fn reinforce_block<E: ArenaEngine>(context: &mut TurnContext<E>, block: &DefenseBlock) -> bool {
    let view = context.view();
    let upgrade_target = block.locations.iter().copied().find(|&location| {
        view.stationary_unit(location)
            .map_or(false, |unit| unit.is_owned_by(Player::Me) && !unit.upgraded)
    });
    let place_target = block
        .locations
        .iter()
        .copied()
        .find(|&location| !view.contains_stationary_unit(location));

    if let Some(location) = upgrade_target {
        if context.upgrade(location) {
            return true;
        }
    }
    match place_target {
        Some(location) => context.spawn(UnitType::Turret, location),
        None => false,
    }
}

/// Repeatedly rank the blocks and reinforce the weakest one that accepts an
/// action, re-ranking after every success.
pub fn reinforce_defenses<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    config: &ReinforceConfig,
) -> ReinforceOutcome {
    let mut iterations = 0;
    let mut actions = 0;

    let stop = loop {
        if context.sp() <= config.reserve {
            break ReinforceStop::Reserve;
        }
        if iterations >= config.max_iterations {
            break ReinforceStop::IterationCap;
        }
        iterations += 1;

        let ranked = rank_blocks(context.view(), config);
        let reinforced = ranked
            .iter()
            .find(|&&(index, _)| reinforce_block(context, &config.blocks[index]));

        match reinforced {
            Some(&(index, score)) => {
                actions += 1;
                trace!(
                    "reinforced block {} (score {})",
                    config.blocks[index].name,
                    score
                );
            }
            None => break ReinforceStop::Exhausted,
        }
    };

    debug!(
        "reinforcement: {} actions over {} passes, stopped on {:?} with {} SP left",
        actions,
        iterations,
        stop,
        context.sp()
    );

    ReinforceOutcome {
        iterations,
        actions,
        stop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;
    use crate::shim::ArenaShim;

    fn loc(x: u32, y: u32) -> Location {
        Location::from_coords(x, y)
    }

    fn placed(actions: &[TurnAction]) -> Vec<Location> {
        actions
            .iter()
            .filter_map(|action| match action {
                TurnAction::Spawn { location, .. } => Some(*location),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn small_budget_spreads_across_empty_blocks() {
        let config = ReinforceConfig::default();
        let mut arena = ArenaShim::new(3).with_resources(Player::Me, 10.0, 0.0);
        let mut context = TurnContext::new(&mut arena);

        let outcome = reinforce_defenses(&mut context, &config);
        assert_eq!(
            outcome,
            ReinforceOutcome {
                iterations: 3,
                actions: 3,
                stop: ReinforceStop::Reserve
            }
        );
        assert_eq!(
            placed(context.actions()),
            vec![loc(4, 13), loc(13, 13), loc(14, 13)]
        );
    }

    #[test]
    fn upgrades_before_placing() {
        let config = ReinforceConfig {
            blocks: vec![DefenseBlock::new("left_corner", &[(4, 13), (3, 13)])],
            ..ReinforceConfig::default()
        };
        let mut arena = ArenaShim::new(3)
            .with_resources(Player::Me, 6.0, 0.0)
            .with_structure(Player::Me, UnitType::Turret, loc(4, 13));
        let mut context = TurnContext::new(&mut arena);
        reinforce_defenses(&mut context, &config);
        assert_eq!(
            context.into_actions(),
            vec![TurnAction::Upgrade {
                location: loc(4, 13)
            }]
        );
    }

    #[test]
    fn unaffordable_upgrade_falls_back_to_placement() {
        let config = ReinforceConfig {
            blocks: vec![DefenseBlock::new("left_corner", &[(4, 13), (3, 13)])],
            ..ReinforceConfig::default()
        };
        let mut arena = ArenaShim::new(3)
            .with_resources(Player::Me, 4.0, 0.0)
            .with_structure(Player::Me, UnitType::Turret, loc(4, 13));
        let mut context = TurnContext::new(&mut arena);
        let outcome = reinforce_defenses(&mut context, &config);
        assert_eq!(placed(context.actions()), vec![loc(3, 13)]);
        assert_eq!(outcome.stop, ReinforceStop::Reserve);
    }

    #[test]
    fn enemy_held_cells_are_neither_upgraded_nor_replaced() {
        let block = DefenseBlock::new("contested", &[(4, 13)]);
        let mut arena = ArenaShim::new(3)
            .with_resources(Player::Me, 30.0, 0.0)
            .with_structure(Player::Opponent, UnitType::Turret, loc(4, 13));
        let mut context = TurnContext::new(&mut arena);
        assert!(!reinforce_block(&mut context, &block));
    }

    #[test]
    fn fixed_point_is_idempotent() {
        let config = ReinforceConfig::default();
        let mut arena = ArenaShim::new(3).with_resources(Player::Me, 200.0, 0.0);

        let mut context = TurnContext::new(&mut arena);
        let first = reinforce_defenses(&mut context, &config);
        assert_eq!(first.actions, 32);
        assert_eq!(first.stop, ReinforceStop::Exhausted);

        let mut context = TurnContext::new(&mut arena);
        let second = reinforce_defenses(&mut context, &config);
        assert_eq!(second.actions, 0);
        assert_eq!(second.stop, ReinforceStop::Exhausted);
        assert!(context.actions().is_empty());
        assert_eq!(arena.resources(Player::Me).sp, 200.0 - 16.0 * 8.0);
    }

    #[test]
    fn iteration_cap_bounds_the_loop() {
        let config = ReinforceConfig {
            max_iterations: 2,
            ..ReinforceConfig::default()
        };
        let mut arena = ArenaShim::new(3).with_resources(Player::Me, 100.0, 0.0);
        let mut context = TurnContext::new(&mut arena);
        let outcome = reinforce_defenses(&mut context, &config);
        assert_eq!(outcome.actions, 2);
        assert_eq!(outcome.stop, ReinforceStop::IterationCap);
    }
}
