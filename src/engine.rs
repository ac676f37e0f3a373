//! The seam between the policies and the external game engine.
//!
//! The engine owns the simulation: occupancy, resources, pathing, combat and
//! the wire format. The policies only read a snapshot through [`ArenaView`]
//! and request best-effort mutations through [`ArenaEngine`]. Every mutation
//! returns `false` when its precondition is not met (insufficient budget,
//! occupied or empty cell, invalid unit or location) and never fails in any
//! other way, so it is always safe to call speculatively.

use crate::location::*;
use crate::unit::*;

/// Read-only access to the current turn's arena state.
pub trait ArenaView {
    fn turn_number(&self) -> u32;

    fn resources(&self, player: Player) -> Resources;

    fn health(&self, player: Player) -> f32;

    /// The stationary unit occupying `location`, if any.
    fn stationary_unit(&self, location: Location) -> Option<UnitSnapshot>;

    /// Every stationary unit on the board, both players.
    fn stationary_units(&self) -> Vec<(Location, UnitSnapshot)>;

    /// Path a mobile unit spawned at `location` would take to the far edge,
    /// starting with `location` itself. `None` when no path exists.
    fn path_to_edge(&self, location: Location) -> Option<Vec<Location>>;

    /// Stationary units of the other player that can attack a unit of
    /// `player` standing on `location`.
    fn attackers(&self, location: Location, player: Player) -> Vec<UnitSnapshot>;

    fn contains_stationary_unit(&self, location: Location) -> bool {
        self.stationary_unit(location).is_some()
    }
}

/// Mutating requests, queued into the turn the engine will submit.
pub trait ArenaEngine: ArenaView {
    /// Spawn up to `count` units of `unit_type` at `location`. Returns `true`
    /// if at least one unit was spawned.
    fn attempt_spawn(&mut self, unit_type: UnitType, location: Location, count: u32) -> bool;

    fn attempt_upgrade(&mut self, location: Location) -> bool;

    fn attempt_remove(&mut self, location: Location) -> bool;

    /// Finalize and transmit the accumulated actions for this turn.
    fn submit_turn(&mut self);
}
