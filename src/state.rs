//! Cross-turn state.
//!
//! The policy keeps nothing between turns on its own; the caller threads a
//! [`PolicyState`] through every turn and feeds it the engine's action
//! frames.

use crate::error::FrameError;
use crate::location::*;
use log::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where units got through, appended in the order the engine reported them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BreachHistory {
    /// Cells the opponent's units scored on us from.
    pub scored_on: Vec<Location>,
    /// Cells our units scored from.
    pub scored: Vec<Location>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyState {
    pub turns_played: u32,
    pub breaches: BreachHistory,
}

#[derive(Deserialize)]
struct ActionFrame {
    #[serde(default)]
    events: FrameEvents,
}

#[derive(Default, Deserialize)]
struct FrameEvents {
    #[serde(default)]
    breach: Vec<BreachEvent>,
}

/// `[location, damage, unit type, unit id, owner]`. Owner 1 is us, 2 the
/// opponent.
#[derive(Deserialize)]
struct BreachEvent(Location, f32, Value, Value, u8);

const FRAME_OWNER_SELF: u8 = 1;
const FRAME_OWNER_OPPONENT: u8 = 2;

impl PolicyState {
    /// Append the breaches of one action frame. Returns how many were
    /// recorded. A frame with an unknown owner is rejected as a whole.
    pub fn record_action_frame(&mut self, frame: &str) -> Result<usize, FrameError> {
        let result = self.record_action_frame_inner(frame);
        if let Err(err) = &result {
            warn!("ignoring action frame: {}", err);
        }
        result
    }

    fn record_action_frame_inner(&mut self, frame: &str) -> Result<usize, FrameError> {
        let frame: ActionFrame = serde_json::from_str(frame)?;
        let breaches = frame.events.breach;

        if let Some(event) = breaches
            .iter()
            .find(|event| event.4 != FRAME_OWNER_SELF && event.4 != FRAME_OWNER_OPPONENT)
        {
            return Err(FrameError::UnknownOwner(event.4));
        }

        for BreachEvent(location, damage, unit_type, unit_id, owner) in &breaches {
            if *owner == FRAME_OWNER_SELF {
                debug!(
                    "unit {} (type {}) scored at {} for {}",
                    unit_id, unit_type, location, damage
                );
                self.breaches.scored.push(*location);
            } else {
                debug!(
                    "opponent unit {} (type {}) scored on us at {} for {}",
                    unit_id, unit_type, location, damage
                );
                self.breaches.scored_on.push(*location);
            }
        }

        Ok(breaches.len())
    }
}
