//! Spawn selection by static exposure.
//!
//! A candidate's threat is the damage enemy structures could deal along the
//! path a unit spawned there would walk: for every path cell, the per-hit
//! damage of each enemy structure that can attack that cell. Only stationary
//! defenses are considered.

use crate::arena::*;
use crate::config::ThreatConfig;
use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use itertools::*;
use log::*;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpawnEstimate {
    pub location: Location,
    pub threat: f32,
    /// Last cell of the path, where the unit would leave the arena.
    pub exit: Location,
}

const LEFT_REFINEMENT_OFFSETS: [(i8, i8); 5] = [(0, 0), (-2, 2), (2, -2), (-1, 1), (1, -1)];
const RIGHT_REFINEMENT_OFFSETS: [(i8, i8); 5] = [(0, 0), (-2, -2), (2, 2), (-1, -1), (1, 1)];

/// Damage `victim`'s mobile units would take walking `path`.
pub fn path_threat<V: ArenaView + ?Sized>(
    view: &V,
    path: &[Location],
    threat: &ThreatConfig,
    victim: Player,
) -> f32 {
    path.iter()
        .flat_map(|&cell| view.attackers(cell, victim))
        .map(|attacker| threat.damage_per_hit(attacker.unit_type))
        .sum()
}

/// Estimates for every candidate that has a non-empty path, in candidate
/// order, as seen by `victim`'s units.
pub fn estimate_candidates<V: ArenaView + ?Sized>(
    view: &V,
    candidates: &[Location],
    threat: &ThreatConfig,
    victim: Player,
) -> Vec<SpawnEstimate> {
    candidates
        .iter()
        .filter_map(|&location| {
            let path = view.path_to_edge(location)?;
            let exit = *path.last()?;
            Some(SpawnEstimate {
                location,
                threat: path_threat(view, &path, threat, victim),
                exit,
            })
        })
        .collect()
}

/// The least threatened candidate. The earliest candidate wins ties.
pub fn least_damage_spawn<V: ArenaView + ?Sized>(
    view: &V,
    candidates: &[Location],
    threat: &ThreatConfig,
) -> Option<SpawnEstimate> {
    estimate_candidates(view, candidates, threat, Player::Me)
        .into_iter()
        .min_by(|a, b| a.threat.total_cmp(&b.threat))
}

/// Small perturbations of `spawn` that stay on one of our spawn edges,
/// starting with `spawn` itself.
pub fn refinement_candidates(spawn: Location) -> Vec<Location> {
    let offsets = if spawn.is_left_half() {
        &LEFT_REFINEMENT_OFFSETS
    } else {
        &RIGHT_REFINEMENT_OFFSETS
    };

    offsets
        .iter()
        .filter_map(|&(dx, dy)| spawn.checked_offset(dx, dy))
        .filter(|&loc| ArenaEdge::BOTTOM.intersects(edges_of(loc)))
        .collect()
}

/// Pick a spawn from `candidates`, then refine it locally. `None` when no
/// candidate has a path.
pub fn safest_spawn<V: ArenaView + ?Sized>(
    view: &V,
    candidates: &[Location],
    threat: &ThreatConfig,
) -> Option<Location> {
    let estimates = estimate_candidates(view, candidates, threat, Player::Me);

    let enemy_sp = view.resources(Player::Opponent).sp;
    let skip_safest = threat
        .second_best_above_enemy_sp
        .map_or(false, |limit| enemy_sp > limit);

    let ranked = estimates
        .iter()
        .sorted_by(|a, b| a.threat.total_cmp(&b.threat))
        .collect_vec();

    let coarse = if skip_safest && ranked.len() > 1 {
        debug!("opponent holds {} SP, taking the second safest spawn", enemy_sp);
        ranked[1]
    } else {
        ranked.first().copied()?
    };

    let refined = least_damage_spawn(view, &refinement_candidates(coarse.location), threat)
        .map(|estimate| estimate.location)
        .unwrap_or(coarse.location);

    debug!(
        "spawn estimate: {} (threat {}), refined to {}",
        coarse.location, coarse.threat, refined
    );

    Some(refined)
}
