//! The attack decision: at most one play per turn.
//!
//! Checked in order: panic (the opponent can plausibly kill us this turn),
//! all-out (we can plausibly kill the opponent), then the normal threshold
//! play. Every play spawns its whole wave at one location.

use super::safety::safest_spawn;
use super::scoring::*;
use crate::action::*;
use crate::config::*;
use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use log::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttackPlay {
    Hold,
    Panic {
        lane: Lane,
        spawn: Location,
        units: u32,
    },
    AllOut {
        spawn: Location,
        units: u32,
        cleared: u32,
    },
    Normal {
        lane: Lane,
        spawn: Location,
        units: u32,
    },
}

impl AttackPlay {
    /// Panic and all-out plays leave no SP work for the rest of the turn.
    pub fn suppresses_reinforcement(&self) -> bool {
        matches!(self, AttackPlay::Panic { .. } | AttackPlay::AllOut { .. })
    }
}

/// Place a disposable `shield_unit` at `location`, run `under_shield`, then
/// remove the structure again. A mobile unit spawned while the structure
/// stands keeps its shield after the removal.
///
/// Returns `None` without running `under_shield` when the structure cannot
/// be placed.
pub fn transient_shield<E, R, F>(
    context: &mut TurnContext<E>,
    shield_unit: UnitType,
    location: Location,
    under_shield: F,
) -> Option<R>
where
    E: ArenaEngine,
    F: FnOnce(&mut TurnContext<E>) -> R,
{
    if !context.spawn(shield_unit, location) {
        return None;
    }
    let result = under_shield(context);
    context.remove(location);
    Some(result)
}

/// Where the shield for a wave spawned at `spawn` goes: one row up on the
/// bottom corner, one column inward on the side corners, otherwise two
/// columns inward if free and else one column inward and one row down.
pub fn shield_location<V: ArenaView + ?Sized>(view: &V, spawn: Location) -> Option<Location> {
    let inward: i8 = if (spawn.x() as u32 + spawn.y() as u32) < 14 {
        1
    } else {
        -1
    };

    match spawn.y() {
        0 => spawn.checked_offset(0, 1),
        13 => spawn.checked_offset(inward, 0),
        _ => match spawn.checked_offset(2 * inward, 0) {
            Some(wide) if !view.contains_stationary_unit(wide) => Some(wide),
            _ => spawn.checked_offset(inward, -1),
        },
    }
}

/// Remove every structure we own. Returns how many removals the engine
/// accepted.
pub fn clear_own_structures<E: ArenaEngine>(context: &mut TurnContext<E>) -> u32 {
    let own: Vec<Location> = context
        .view()
        .stationary_units()
        .into_iter()
        .filter(|(_, unit)| unit.is_owned_by(Player::Me))
        .map(|(location, _)| location)
        .collect();

    own.into_iter()
        .filter(|&location| context.remove(location))
        .count() as u32
}

/// Decide and execute this turn's attack.
pub fn launch_attack<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    config: &AttackConfig,
    tally: &TurretPresenceTally,
) -> AttackPlay {
    let view = context.view();
    let own_health = view.health(Player::Me);
    let enemy_health = view.health(Player::Opponent);
    let enemy_mp = view.resources(Player::Opponent).mp;
    let sp = context.sp();
    let mp = context.mp();
    let turn = context.turn_number();
    let lane = tally.least_defended();

    let panic = &config.panic;
    if panic.enabled && enemy_mp >= panic.multiplier * own_health && mp >= panic.min_mp.max(1.0) {
        info!(
            "panic: opponent MP {} against our health {}, launching {} MP at {:?}",
            enemy_mp, own_health, mp, lane
        );
        match panic_play(context, config, lane) {
            Some(play) => return play,
            None => warn!("panic launch at {:?} failed", lane),
        }
    }

    let all_out = &config.all_out;
    if all_out.enabled && enemy_health < all_out.mp_ratio * mp && own_health > enemy_mp {
        info!(
            "all-out: opponent health {} against our MP {}, clearing the board",
            enemy_health, mp
        );
        return all_out_play(context, config);
    }

    let min_mp = config.min_mp_for_turn(turn);
    if sp < config.shield_sp_floor || mp < min_mp {
        debug!(
            "holding: SP {} (need {}), MP {} (need {})",
            sp, config.shield_sp_floor, mp, min_mp
        );
        return AttackPlay::Hold;
    }

    let play = normal_play(context, config, lane);
    info!("turn {} play: {:?}", turn, play);
    play
}

fn lane_spawn<E: ArenaEngine>(
    context: &TurnContext<E>,
    config: &AttackConfig,
    lane: Lane,
) -> Option<Location> {
    let lane_config = config.lane(lane)?;
    safest_spawn(context.view(), &lane_config.spawn_candidates, &config.threat)
}

fn wave_size(mp: f32) -> u32 {
    mp.max(0.0).floor() as u32
}

fn panic_play<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    config: &AttackConfig,
    lane: Lane,
) -> Option<AttackPlay> {
    let spawn = lane_spawn(context, config, lane)?;
    let units = wave_size(context.mp());

    let shielded = shield_location(context.view(), spawn).and_then(|shield| {
        transient_shield(context, config.shield_unit, shield, |context| {
            context.spawn_many(config.unit, spawn, units)
        })
    });
    let launched = match shielded {
        Some(launched) => launched,
        None => context.spawn_many(config.unit, spawn, units),
    };

    if launched {
        Some(AttackPlay::Panic { lane, spawn, units })
    } else {
        None
    }
}

fn all_out_play<E: ArenaEngine>(context: &mut TurnContext<E>, config: &AttackConfig) -> AttackPlay {
    let all_out = &config.all_out;
    let cleared = clear_own_structures(context);

    let units = wave_size(context.mp());
    let units = if context.spawn_many(config.unit, all_out.spawn, units) {
        units
    } else {
        warn!("all-out wave at {} rejected", all_out.spawn);
        0
    };

    for cell in all_out.shield_line() {
        transient_shield(context, config.shield_unit, cell, |_| ());
    }

    AttackPlay::AllOut {
        spawn: all_out.spawn,
        units,
        cleared,
    }
}

fn normal_play<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    config: &AttackConfig,
    lane: Lane,
) -> AttackPlay {
    let spawn = match lane_spawn(context, config, lane) {
        Some(spawn) => spawn,
        None => return AttackPlay::Hold,
    };
    let shield = match shield_location(context.view(), spawn) {
        Some(shield) => shield,
        None => return AttackPlay::Hold,
    };
    let units = wave_size(context.mp());

    let launched = transient_shield(context, config.shield_unit, shield, |context| {
        context.spawn_many(config.unit, spawn, units)
    });

    match launched {
        Some(true) => AttackPlay::Normal { lane, spawn, units },
        _ => AttackPlay::Hold,
    }
}
