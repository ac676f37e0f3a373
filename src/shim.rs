//! Offline in-memory arena.
//!
//! `ArenaShim` implements [`ArenaEngine`] with simplified rules
//! so the policies can be exercised and benchmarked without the real engine:
//!
//!   - fixed unit costs and ranges (see [`unit_stats`]);
//!   - structures may only be placed on empty cells of our half;
//!   - mobile units may only be spawned on our two bottom edges, on cells
//!     without a structure, and a wave is capped at what the MP balance buys;
//!   - removal is immediate and refunds nothing;
//!   - paths are 4-neighbour BFS to the opposite edge, blocked by any
//!     structure, unless a path has been scripted for the start cell.
//!
//! Nothing here models combat, breaching or resource generation.

use crate::arena::*;
use crate::constants::*;
use crate::engine::*;
use crate::location::*;
use crate::unit::*;
use fnv::FnvHashMap;
use pathfinding::prelude::bfs;

/// Simplified per-unit rules used by the shim.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UnitStats {
    pub sp_cost: f32,
    pub mp_cost: f32,
    pub upgrade_sp_cost: f32,
    pub max_health: f32,
    /// Attack range; zero for units that never threaten a cell.
    pub range: f32,
    pub upgraded_range: f32,
}

pub fn unit_stats(unit_type: UnitType) -> UnitStats {
    let base = UnitStats {
        sp_cost: 0.0,
        mp_cost: 0.0,
        upgrade_sp_cost: 0.0,
        max_health: 0.0,
        range: 0.0,
        upgraded_range: 0.0,
    };
    match unit_type {
        UnitType::Wall => UnitStats {
            sp_cost: 1.0,
            upgrade_sp_cost: 1.0,
            max_health: 60.0,
            ..base
        },
        UnitType::Support => UnitStats {
            sp_cost: 4.0,
            upgrade_sp_cost: 4.0,
            max_health: 30.0,
            ..base
        },
        UnitType::Turret => UnitStats {
            sp_cost: 3.0,
            upgrade_sp_cost: 5.0,
            max_health: 75.0,
            range: 2.5,
            upgraded_range: 3.5,
            ..base
        },
        UnitType::Scout => UnitStats {
            mp_cost: 1.0,
            max_health: 15.0,
            ..base
        },
        UnitType::Demolisher => UnitStats {
            mp_cost: 3.0,
            max_health: 5.0,
            ..base
        },
        UnitType::Interceptor => UnitStats {
            mp_cost: 1.0,
            max_health: 40.0,
            ..base
        },
    }
}

/// A mobile wave the shim accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct DeployedWave {
    pub unit_type: UnitType,
    pub location: Location,
    pub count: u32,
}

#[derive(Clone, Debug)]
pub struct ArenaShim {
    turn: u32,
    resources: [Resources; 2],
    health: [f32; 2],
    grid: ArenaDataArray<Option<UnitSnapshot>>,
    scripted_paths: FnvHashMap<Location, Option<Vec<Location>>>,
    deployed: Vec<DeployedWave>,
    submitted_turns: u32,
}

impl ArenaShim {
    /// An empty arena on `turn` with no resources and 30 health each.
    pub fn new(turn: u32) -> Self {
        ArenaShim {
            turn,
            resources: [Resources::default(); 2],
            health: [30.0; 2],
            grid: ArenaDataArray::new(None),
            scripted_paths: FnvHashMap::default(),
            deployed: Vec::new(),
            submitted_turns: 0,
        }
    }

    pub fn with_resources(mut self, player: Player, sp: f32, mp: f32) -> Self {
        self.resources[player.index()] = Resources { sp, mp };
        self
    }

    pub fn with_health(mut self, player: Player, health: f32) -> Self {
        self.health[player.index()] = health;
        self
    }

    pub fn with_structure(mut self, owner: Player, unit_type: UnitType, location: Location) -> Self {
        self.place_structure(owner, unit_type, location, false);
        self
    }

    pub fn with_upgraded_structure(
        mut self,
        owner: Player,
        unit_type: UnitType,
        location: Location,
    ) -> Self {
        self.place_structure(owner, unit_type, location, true);
        self
    }

    /// Put a structure on the board for free, ignoring every placement rule.
    /// Returns `false` when the cell is outside the arena or non-stationary
    /// type was given.
    pub fn place_structure(
        &mut self,
        owner: Player,
        unit_type: UnitType,
        location: Location,
        upgraded: bool,
    ) -> bool {
        if !unit_type.is_stationary() || !location_in_bounds(location) {
            return false;
        }
        let mut unit = UnitSnapshot::new(unit_type, owner, unit_stats(unit_type).max_health);
        unit.upgraded = upgraded;
        self.grid.set(location, Some(unit));
        true
    }

    /// Damage a structure down to `fraction` of its max health.
    pub fn set_health_fraction(&mut self, location: Location, fraction: f32) {
        if !location_in_bounds(location) {
            return;
        }
        if let Some(unit) = self.grid.get_mut(location) {
            unit.health = unit.max_health * fraction.clamp(0.0, 1.0);
        }
    }

    /// Override the path reported for `from`. `None` scripts "no path".
    pub fn script_path(&mut self, from: Location, path: Option<Vec<Location>>) {
        self.scripted_paths.insert(from, path);
    }

    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    pub fn set_resources(&mut self, player: Player, resources: Resources) {
        self.resources[player.index()] = resources;
    }

    pub fn deployed(&self) -> &[DeployedWave] {
        &self.deployed
    }

    pub fn submitted_turns(&self) -> u32 {
        self.submitted_turns
    }

    pub fn structure_count(&self, owner: Player) -> usize {
        self.grid
            .iter()
            .filter(|(_, unit)| unit.map_or(false, |u| u.owner == owner))
            .count()
    }

    /// Far edge for a unit starting off the edges, by quadrant.
    fn target_edge(start: Location) -> ArenaEdge {
        match (start.x() < HALF_ARENA, start.y() < HALF_ARENA) {
            (true, true) => ArenaEdge::TOP_RIGHT,
            (false, true) => ArenaEdge::TOP_LEFT,
            (true, false) => ArenaEdge::BOTTOM_RIGHT,
            (false, false) => ArenaEdge::BOTTOM_LEFT,
        }
    }

    fn passable(&self, loc: Location) -> bool {
        location_in_bounds(loc) && self.grid.get(loc).is_none()
    }

    fn spend(&mut self, sp: f32, mp: f32) -> bool {
        let own = &mut self.resources[Player::Me.index()];
        if own.sp < sp || own.mp < mp {
            return false;
        }
        own.sp -= sp;
        own.mp -= mp;
        true
    }
}

const NEIGHBORS_4: [(i8, i8); 4] = [(0, 1), (1, 0), (-1, 0), (0, -1)];

impl ArenaView for ArenaShim {
    fn turn_number(&self) -> u32 {
        self.turn
    }

    fn resources(&self, player: Player) -> Resources {
        self.resources[player.index()]
    }

    fn health(&self, player: Player) -> f32 {
        self.health[player.index()]
    }

    fn stationary_unit(&self, location: Location) -> Option<UnitSnapshot> {
        if !location_in_bounds(location) {
            return None;
        }
        *self.grid.get(location)
    }

    fn stationary_units(&self) -> Vec<(Location, UnitSnapshot)> {
        self.grid
            .iter()
            .filter_map(|(loc, unit)| unit.map(|u| (loc, u)))
            .collect()
    }

    fn path_to_edge(&self, location: Location) -> Option<Vec<Location>> {
        if let Some(scripted) = self.scripted_paths.get(&location) {
            return scripted.clone();
        }
        if !self.passable(location) {
            return None;
        }
        let start_edges = edges_of(location);
        let target = if start_edges.is_empty() {
            Self::target_edge(location)
        } else {
            start_edges.opposite()
        };
        bfs(
            &location,
            |&loc| {
                NEIGHBORS_4
                    .iter()
                    .filter_map(move |&(dx, dy)| loc.checked_offset(dx, dy))
                    .filter(|&next| self.passable(next))
                    .collect::<Vec<_>>()
            },
            |&loc| edges_of(loc).intersects(target),
        )
    }

    fn attackers(&self, location: Location, player: Player) -> Vec<UnitSnapshot> {
        self.grid
            .iter()
            .filter_map(|(loc, unit)| unit.map(|u| (loc, u)))
            .filter(|(_, unit)| unit.owner == player.other())
            .filter(|(loc, unit)| {
                let stats = unit_stats(unit.unit_type);
                let range = if unit.upgraded {
                    stats.upgraded_range
                } else {
                    stats.range
                };
                range > 0.0 && loc.distance_to(location) <= range
            })
            .map(|(_, unit)| unit)
            .collect()
    }
}

impl ArenaEngine for ArenaShim {
    fn attempt_spawn(&mut self, unit_type: UnitType, location: Location, count: u32) -> bool {
        if count == 0 || !location_in_bounds(location) {
            return false;
        }
        let stats = unit_stats(unit_type);

        if unit_type.is_stationary() {
            if !in_own_half(location) || self.grid.get(location).is_some() {
                return false;
            }
            if !self.spend(stats.sp_cost, 0.0) {
                return false;
            }
            self.grid
                .set(location, Some(UnitSnapshot::new(unit_type, Player::Me, stats.max_health)));
            return true;
        }

        if !ArenaEdge::BOTTOM.intersects(edges_of(location)) || self.grid.get(location).is_some() {
            return false;
        }
        let affordable = (self.resources[Player::Me.index()].mp / stats.mp_cost).floor() as u32;
        let spawned = count.min(affordable);
        if spawned == 0 || !self.spend(0.0, stats.mp_cost * spawned as f32) {
            return false;
        }
        self.deployed.push(DeployedWave {
            unit_type,
            location,
            count: spawned,
        });
        true
    }

    fn attempt_upgrade(&mut self, location: Location) -> bool {
        let unit = match self.stationary_unit(location) {
            Some(unit) if unit.owner == Player::Me && !unit.upgraded => unit,
            _ => return false,
        };
        if !self.spend(unit_stats(unit.unit_type).upgrade_sp_cost, 0.0) {
            return false;
        }
        if let Some(unit) = self.grid.get_mut(location) {
            unit.upgraded = true;
        }
        true
    }

    fn attempt_remove(&mut self, location: Location) -> bool {
        match self.stationary_unit(location) {
            Some(unit) if unit.owner == Player::Me => {
                self.grid.set(location, None);
                true
            }
            _ => false,
        }
    }

    fn submit_turn(&mut self) {
        self.submitted_turns += 1;
    }
}
