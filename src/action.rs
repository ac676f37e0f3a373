use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use log::*;
use serde::{Deserialize, Serialize};

/// A request the policy issued and the engine accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAction {
    /// Spawn `count` units at `location`. For stationary units `count` is 1.
    Spawn {
        unit_type: UnitType,
        location: Location,
        count: u32,
    },
    /// Upgrade the structure at `location`.
    Upgrade { location: Location },
    /// Remove the structure at `location`.
    Remove { location: Location },
}

/// Wraps the engine for the duration of one turn and records every action
/// it accepted, in the order it was accepted.
pub struct TurnContext<'a, E: ArenaEngine> {
    engine: &'a mut E,
    actions: Vec<TurnAction>,
}

impl<'a, E: ArenaEngine> TurnContext<'a, E> {
    pub fn new(engine: &'a mut E) -> Self {
        TurnContext {
            engine,
            actions: Vec::new(),
        }
    }

    pub fn view(&self) -> &E {
        &*self.engine
    }

    pub fn turn_number(&self) -> u32 {
        self.engine.turn_number()
    }

    pub fn sp(&self) -> f32 {
        self.engine.resources(Player::Me).sp
    }

    pub fn mp(&self) -> f32 {
        self.engine.resources(Player::Me).mp
    }

    pub fn actions(&self) -> &[TurnAction] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<TurnAction> {
        self.actions
    }

    pub fn spawn(&mut self, unit_type: UnitType, location: Location) -> bool {
        self.spawn_many(unit_type, location, 1)
    }

    /// Spawn up to `count` units. The recorded count is the requested one;
    /// the engine may cap a mobile wave at what the MP balance affords.
    pub fn spawn_many(&mut self, unit_type: UnitType, location: Location, count: u32) -> bool {
        if count == 0 {
            return false;
        }
        if !self.engine.attempt_spawn(unit_type, location, count) {
            trace!("spawn {:?} x{} at {} rejected", unit_type, count, location);
            return false;
        }
        debug!("spawn {:?} x{} at {}", unit_type, count, location);
        self.actions.push(TurnAction::Spawn {
            unit_type,
            location,
            count,
        });
        true
    }

    pub fn upgrade(&mut self, location: Location) -> bool {
        if !self.engine.attempt_upgrade(location) {
            trace!("upgrade at {} rejected", location);
            return false;
        }
        debug!("upgrade at {}", location);
        self.actions.push(TurnAction::Upgrade { location });
        true
    }

    pub fn remove(&mut self, location: Location) -> bool {
        if !self.engine.attempt_remove(location) {
            trace!("remove at {} rejected", location);
            return false;
        }
        debug!("remove at {}", location);
        self.actions.push(TurnAction::Remove { location });
        true
    }
}
