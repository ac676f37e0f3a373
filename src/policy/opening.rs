use crate::action::*;
use crate::config::*;
use crate::engine::*;
use crate::unit::*;
use log::*;

/// Place and immediately upgrade each opening turret, then place the opening
/// walls. Every step is attempted once; a rejected placement or upgrade is
/// skipped.
pub fn place_opening<E: ArenaEngine>(context: &mut TurnContext<E>, config: &OpeningConfig) {
    let before = context.actions().len();

    for &location in &config.turrets {
        context.spawn(UnitType::Turret, location);
        context.upgrade(location);
    }

    for &location in &config.walls {
        context.spawn(UnitType::Wall, location);
    }

    info!(
        "opening layout: {} turrets and {} walls requested, {} actions accepted",
        config.turrets.len(),
        config.walls.len(),
        context.actions().len() - before
    );
}
