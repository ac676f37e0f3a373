use crate::action::*;
use crate::config::FoundationConfig;
use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use log::*;

/// Cells of a foundation list with nothing standing on them.
fn missing(view: &impl ArenaView, locations: &[Location]) -> Vec<Location> {
    locations
        .iter()
        .copied()
        .filter(|&location| !view.contains_stationary_unit(location))
        .collect()
}

/// Place `unit_type` on each broken cell until a placement is rejected, then
/// attempt an upgrade on every cell of the layout.
fn repair_layer<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    unit_type: UnitType,
    layout: &[Location],
) -> u32 {
    let mut accepted = 0;

    for location in missing(context.view(), layout) {
        if !context.spawn(unit_type, location) {
            break;
        }
        accepted += 1;
    }

    for &location in layout {
        if context.upgrade(location) {
            accepted += 1;
        }
    }

    accepted
}

/// Keep the foundation standing and upgraded, turrets first.
///
/// Broken pieces are rebuilt in listed order until a placement is rejected.
/// Every piece of the layer is then offered an upgrade; a rejected upgrade
/// does not stop the ones after it. Returns the number of accepted actions.
pub fn repair_foundation<E: ArenaEngine>(
    context: &mut TurnContext<E>,
    config: &FoundationConfig,
) -> u32 {
    let missing_turrets = missing(context.view(), &config.turrets).len();
    let missing_walls = missing(context.view(), &config.walls).len();
    if missing_turrets > 0 || missing_walls > 0 {
        info!(
            "foundation broken: {} turrets and {} walls missing",
            missing_turrets, missing_walls
        );
    }

    let accepted = repair_layer(context, UnitType::Turret, &config.turrets)
        + repair_layer(context, UnitType::Wall, &config.walls);

    debug!("foundation upkeep: {} actions", accepted);

    accepted
}
