//! Per-turn metrics the policy ranks by: how well each of our defense blocks
//! is holding, and how much enemy turret weight covers each attack lane.
//! Both are recomputed from the arena snapshot every turn.

use crate::config::*;
use crate::constants::*;
use crate::engine::*;
use crate::unit::*;
use itertools::*;
use serde::{Deserialize, Serialize};

/// The four named spawn/defense zones, left to right.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Lane {
    LeftCorner,
    LeftMiddle,
    RightMiddle,
    RightCorner,
}

impl Lane {
    pub const ALL: [Lane; 4] = [
        Lane::LeftCorner,
        Lane::LeftMiddle,
        Lane::RightMiddle,
        Lane::RightCorner,
    ];

    /// Lane an enemy structure in column `x` counts toward.
    pub fn for_column(x: u8) -> Lane {
        match x {
            0..=6 => Lane::LeftCorner,
            7..=13 => Lane::LeftMiddle,
            14..=20 => Lane::RightMiddle,
            _ => Lane::RightCorner,
        }
    }

    fn index(self) -> usize {
        match self {
            Lane::LeftCorner => 0,
            Lane::LeftMiddle => 1,
            Lane::RightMiddle => 2,
            Lane::RightCorner => 3,
        }
    }
}

/// Enemy turret weight per lane.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurretPresenceTally {
    weights: [u32; 4],
}

impl TurretPresenceTally {
    /// Scan every occupied cell once. A turret weighs one, an upgraded
    /// turret one more.
    pub fn from_view<V: ArenaView + ?Sized>(view: &V) -> Self {
        let mut tally = TurretPresenceTally::default();
        for (location, unit) in view.stationary_units() {
            if unit.owner != Player::Opponent || unit.unit_type != UnitType::Turret {
                continue;
            }
            let weight = TURRET_PRESENCE_WEIGHT + u32::from(unit.upgraded);
            tally.weights[Lane::for_column(location.x()).index()] += weight;
        }
        tally
    }

    pub fn weight(&self, lane: Lane) -> u32 {
        self.weights[lane.index()]
    }

    /// The least defended lane; the leftmost one on ties.
    pub fn least_defended(&self) -> Lane {
        Lane::ALL.iter().copied().fold(Lane::LeftCorner, |best, lane| {
            if self.weight(lane) < self.weight(best) {
                lane
            } else {
                best
            }
        })
    }

    /// Lanes from least to most defended. Equal weights keep lane order.
    pub fn ranked_lanes(&self) -> Vec<Lane> {
        Lane::ALL
            .iter()
            .copied()
            .sorted_by_key(|&lane| self.weight(lane))
            .collect()
    }
}

/// Defensive value of a single structure.
pub fn unit_defense_value(unit: &UnitSnapshot, base_value: f32, upgraded_value: f32) -> f32 {
    let value = if unit.upgraded {
        upgraded_value
    } else {
        base_value
    };
    value * unit.health_fraction()
}

/// Sum of our structures' values over the block. Empty cells and enemy
/// structures add nothing, so an empty block and a destroyed one both score
/// zero.
pub fn block_defense_score<V: ArenaView + ?Sized>(
    view: &V,
    block: &DefenseBlock,
    config: &ReinforceConfig,
) -> f32 {
    block
        .locations
        .iter()
        .filter_map(|&loc| view.stationary_unit(loc))
        .filter(|unit| unit.is_owned_by(Player::Me))
        .map(|unit| unit_defense_value(&unit, config.base_value, config.upgraded_value))
        .sum()
}

/// Block indices from weakest to strongest, with their scores. Equal scores
/// keep configuration order.
pub fn rank_blocks<V: ArenaView + ?Sized>(view: &V, config: &ReinforceConfig) -> Vec<(usize, f32)> {
    config
        .blocks
        .iter()
        .map(|block| block_defense_score(view, block, config))
        .enumerate()
        .sorted_by(|a, b| a.1.total_cmp(&b.1))
        .collect()
}
