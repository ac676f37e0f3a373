use serde::{Deserialize, Serialize};

/// Unit kinds known to the arena, serialized with the engine's shorthands.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum UnitType {
    #[serde(rename = "FF")]
    Wall,
    #[serde(rename = "EF")]
    Support,
    #[serde(rename = "DF")]
    Turret,
    #[serde(rename = "PI")]
    Scout,
    #[serde(rename = "EI")]
    Demolisher,
    #[serde(rename = "SI")]
    Interceptor,
}

impl UnitType {
    pub fn is_stationary(self) -> bool {
        matches!(self, UnitType::Wall | UnitType::Support | UnitType::Turret)
    }

    pub fn is_mobile(self) -> bool {
        !self.is_stationary()
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Player {
    Me,
    Opponent,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::Me => Player::Opponent,
            Player::Opponent => Player::Me,
        }
    }

    /// The engine's zero-based player index.
    pub fn index(self) -> usize {
        match self {
            Player::Me => 0,
            Player::Opponent => 1,
        }
    }
}

/// Per-player currencies: structure points and mobile points.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub sp: f32,
    pub mp: f32,
}

/// What the engine reports about a unit occupying a cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitSnapshot {
    pub unit_type: UnitType,
    pub owner: Player,
    pub health: f32,
    pub max_health: f32,
    pub upgraded: bool,
}

impl UnitSnapshot {
    pub fn new(unit_type: UnitType, owner: Player, max_health: f32) -> Self {
        UnitSnapshot {
            unit_type,
            owner,
            health: max_health,
            max_health,
            upgraded: false,
        }
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 {
            (self.health / self.max_health).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn is_owned_by(&self, player: Player) -> bool {
        self.owner == player
    }
}
