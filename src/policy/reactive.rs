use crate::action::*;
use crate::arena::in_own_half;
use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use itertools::*;

/// Put a turret one row above each distinct cell the opponent scored
/// through, leaving the edge cell itself free for our own spawns. Returns the
/// number of turrets placed.
pub fn build_reactive_defense<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    scored_on: &[Location],
) -> u32 {
    let targets = scored_on
        .iter()
        .unique()
        .filter_map(|location| location.checked_offset(0, 1))
        .filter(|&location| in_own_half(location))
        .collect_vec();

    targets
        .into_iter()
        .filter(|&location| context.spawn(UnitType::Turret, location))
        .count() as u32
}
