//! Reinforce where the opponent's next wave is expected to leave the arena.
//!
//! Every opponent spawn cell is traced to the edge and scored against our
//! turrets the same way our own spawns are scored against theirs. The
//! cheapest path's last cell picks a defense zone through the exit bands,
//! and each pass builds at most one turret and one wall there.

use super::reinforce::*;
use super::safety::estimate_candidates;
use crate::action::*;
use crate::config::*;
use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use log::*;

/// Where the opponent's least obstructed path ends. The earliest spawn cell
/// wins ties; `None` when no spawn cell has a path.
pub fn anticipated_exit<V: ArenaView + ?Sized>(
    view: &V,
    config: &AnticipatedAttackConfig,
    threat: &ThreatConfig,
) -> Option<Location> {
    estimate_candidates(view, &config.enemy_spawns, threat, Player::Opponent)
        .into_iter()
        .min_by(|a, b| a.threat.total_cmp(&b.threat))
        .map(|estimate| estimate.exit)
}

/// Upgrade each cell in order until a new `unit_type` can be placed; the
/// placed unit is upgraded straight away and ends the layer.
fn build_next<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    unit_type: UnitType,
    cells: &[Location],
) -> u32 {
    let mut accepted = 0;
    for &location in cells {
        if context.upgrade(location) {
            accepted += 1;
        }
        if context.spawn(unit_type, location) {
            accepted += 1;
            if context.upgrade(location) {
                accepted += 1;
            }
            break;
        }
    }
    accepted
}

/// One pass on a zone: its next turret, then its next wall.
pub fn build_next_defense<E: ArenaEngine>(context: &mut TurnContext<E>, zone: &DefenseZone) -> u32 {
    build_next(context, UnitType::Turret, &zone.turrets)
        + build_next(context, UnitType::Wall, &zone.walls)
}

/// Re-read the anticipated exit and build in its zone, pass after pass,
/// until SP reaches the reserve or the pass budget runs out.
pub fn reinforce_anticipated<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    config: &ReinforceConfig,
    threat: &ThreatConfig,
) -> ReinforceOutcome {
    let anticipated = &config.anticipated;
    let mut iterations = 0;
    let mut actions = 0;

    let stop = loop {
        if context.sp() <= config.reserve {
            break ReinforceStop::Reserve;
        }
        if iterations >= anticipated.passes {
            break ReinforceStop::IterationCap;
        }
        iterations += 1;

        let exit = match anticipated_exit(context.view(), anticipated, threat) {
            Some(exit) => exit,
            None => break ReinforceStop::Exhausted,
        };
        let zone = match anticipated.zone_for_exit(exit) {
            Some(zone) => zone,
            None => {
                debug!("no defense zone guards exit {}", exit);
                break ReinforceStop::Exhausted;
            }
        };

        let built = build_next_defense(context, zone);
        trace!("anticipated exit {}: {} actions in zone {}", exit, built, zone.name);
        if built == 0 {
            break ReinforceStop::Exhausted;
        }
        actions += built;
    };

    debug!(
        "anticipated reinforcement: {} actions over {} passes, stopped on {:?} with {} SP left",
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
