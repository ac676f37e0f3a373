//! Policy configuration.
//!
//! Every hand-authored table the policies use (opening layouts, defense
//! blocks, spawn candidates, thresholds) lives here as data. The three
//! presets mirror the bot variants the policies were tuned from; they
//! disagree on thresholds and layouts on purpose and are not meant to be
//! merged.

use crate::arena::*;
use crate::constants::*;
use crate::error::ConfigError;
use crate::location::*;
use crate::policy::Lane;
use crate::unit::UnitType;
use fnv::FnvHashSet;
use log::*;
use serde::{Deserialize, Serialize};

fn locs(coords: &[(u32, u32)]) -> Vec<Location> {
    coords
        .iter()
        .map(|&(x, y)| Location::from_coords(x, y))
        .collect()
}

/// What to build on the first eligible turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpeningConfig {
    /// The only turn the opening layout is attempted on.
    pub turn: u32,
    /// Turrets placed and immediately upgraded, in order.
    pub turrets: Vec<Location>,
    /// Walls placed after the turrets, in order.
    pub walls: Vec<Location>,
}

impl Default for OpeningConfig {
    fn default() -> Self {
        OpeningConfig {
            turn: 0,
            turrets: locs(&[(4, 13), (5, 13), (13, 13), (22, 13), (23, 13)]),
            walls: Vec::new(),
        }
    }
}

/// MP needed to commit to a normal play before `before_turn`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MpTier {
    pub before_turn: u32,
    pub min_mp: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaneConfig {
    pub lane: Lane,
    /// Edge cells the wave may be spawned from when this lane is chosen.
    pub spawn_candidates: Vec<Location>,
}

/// Launch regardless of thresholds when the opponent can plausibly kill us.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanicConfig {
    pub enabled: bool,
    /// Fires when opponent MP >= `multiplier` x our health.
    pub multiplier: f32,
    pub min_mp: f32,
}

impl Default for PanicConfig {
    fn default() -> Self {
        PanicConfig {
            enabled: true,
            multiplier: 1.0,
            min_mp: 1.0,
        }
    }
}

/// Clear the board and throw everything at a nearly dead opponent.
///
/// There is no safeguard against a wrong lethal read: when this fires every
/// one of our structures is removed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllOutConfig {
    pub enabled: bool,
    /// Fires when opponent health < `mp_ratio` x our MP (and our health
    /// exceeds the opponent's MP).
    pub mp_ratio: f32,
    pub spawn: Location,
    pub shield_line_start: Location,
    pub shield_line_step: (i8, i8),
    pub shield_line_length: u32,
}

impl Default for AllOutConfig {
    fn default() -> Self {
        AllOutConfig {
            enabled: true,
            mp_ratio: 0.75,
            spawn: Location::from_coords(13, 0),
            shield_line_start: Location::from_coords(13, 1),
            shield_line_step: (1, 1),
            shield_line_length: 13,
        }
    }
}

impl AllOutConfig {
    /// Cells of the disposable support line, in placement order. Stops at the
    /// first cell that would leave the bounding box.
    pub fn shield_line(&self) -> Vec<Location> {
        let mut line = Vec::new();
        let mut current = Some(self.shield_line_start);
        for _ in 0..self.shield_line_length {
            match current {
                Some(loc) => {
                    line.push(loc);
                    current = loc.checked_offset(self.shield_line_step.0, self.shield_line_step.1);
                }
                None => break,
            }
        }
        line
    }
}

/// Path exposure estimation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThreatConfig {
    /// Damage per hit of a threatening turret.
    pub turret_damage: f32,
    /// When the opponent holds more SP than this, skip the safest candidate
    /// and take the runner-up: the safest path is the one a fresh turret
    /// would be placed on.
    pub second_best_above_enemy_sp: Option<f32>,
}

impl Default for ThreatConfig {
    fn default() -> Self {
        ThreatConfig {
            turret_damage: DEFAULT_TURRET_DAMAGE,
            second_best_above_enemy_sp: None,
        }
    }
}

impl ThreatConfig {
    pub fn damage_per_hit(&self, unit_type: UnitType) -> f32 {
        match unit_type {
            UnitType::Turret => self.turret_damage,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackConfig {
    /// Mobile unit used for every wave.
    pub unit: UnitType,
    /// Structure used as the transient shield.
    pub shield_unit: UnitType,
    pub shield_sp_floor: f32,
    pub mp_tiers: Vec<MpTier>,
    pub late_min_mp: f32,
    pub panic: PanicConfig,
    pub all_out: AllOutConfig,
    pub threat: ThreatConfig,
    pub lanes: Vec<LaneConfig>,
}

impl Default for AttackConfig {
    fn default() -> Self {
        AttackConfig {
            unit: UnitType::Scout,
            shield_unit: UnitType::Support,
            shield_sp_floor: DEFAULT_SHIELD_SP_FLOOR,
            mp_tiers: DEFAULT_MP_TIERS
                .iter()
                .map(|&(before_turn, min_mp)| MpTier {
                    before_turn,
                    min_mp,
                })
                .collect(),
            late_min_mp: DEFAULT_LATE_MIN_MP,
            panic: PanicConfig::default(),
            all_out: AllOutConfig::default(),
            threat: ThreatConfig::default(),
            lanes: vec![
                LaneConfig {
                    lane: Lane::LeftCorner,
                    spawn_candidates: locs(&[(0, 13), (4, 9)]),
                },
                LaneConfig {
                    lane: Lane::LeftMiddle,
                    spawn_candidates: locs(&[(7, 6), (10, 3), (13, 0)]),
                },
                LaneConfig {
                    lane: Lane::RightMiddle,
                    spawn_candidates: locs(&[(20, 6), (17, 3), (14, 0)]),
                },
                LaneConfig {
                    lane: Lane::RightCorner,
                    spawn_candidates: locs(&[(27, 13), (23, 9)]),
                },
            ],
        }
    }
}

impl AttackConfig {
    /// MP needed for a normal play on `turn`.
    pub fn min_mp_for_turn(&self, turn: u32) -> f32 {
        self.mp_tiers
            .iter()
            .find(|tier| turn < tier.before_turn)
            .map(|tier| tier.min_mp)
            .unwrap_or(self.late_min_mp)
    }

    pub fn lane(&self, lane: Lane) -> Option<&LaneConfig> {
        self.lanes.iter().find(|l| l.lane == lane)
    }
}

/// One defensive block: locations tried in listed order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenseBlock {
    pub name: String,
    pub locations: Vec<Location>,
}

impl DefenseBlock {
    pub fn new(name: impl Into<String>, coords: &[(u32, u32)]) -> Self {
        DefenseBlock {
            name: name.into(),
            locations: locs(coords),
        }
    }
}

/// How leftover SP is spent after the attack step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReinforceMode {
    /// Re-rank the blocks every pass and build on the weakest.
    WeakestBlock,
    /// Build in the zone the opponent's cheapest path leaves through.
    AnticipatedAttack,
}

impl Default for ReinforceMode {
    fn default() -> Self {
        ReinforceMode::WeakestBlock
    }
}

/// Turrets and walls guarding one stretch of the front, in build order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenseZone {
    pub name: String,
    pub turrets: Vec<Location>,
    pub walls: Vec<Location>,
}

impl DefenseZone {
    pub fn new(name: impl Into<String>, turrets: &[(u32, u32)], walls: &[(u32, u32)]) -> Self {
        DefenseZone {
            name: name.into(),
            turrets: locs(turrets),
            walls: locs(walls),
        }
    }
}

/// Exits on a row below `below_row` are guarded by `zone`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExitBand {
    pub below_row: u32,
    pub zone: String,
}

fn bands(table: &[(u32, &str)]) -> Vec<ExitBand> {
    table
        .iter()
        .map(|&(below_row, zone)| ExitBand {
            below_row,
            zone: zone.to_string(),
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnticipatedAttackConfig {
    /// Opponent spawn cells traced to guess where the next wave exits.
    pub enemy_spawns: Vec<Location>,
    pub passes: u32,
    pub zones: Vec<DefenseZone>,
    /// Bands for exits left of the center line, first match wins.
    pub left_bands: Vec<ExitBand>,
    pub right_bands: Vec<ExitBand>,
}

impl Default for AnticipatedAttackConfig {
    fn default() -> Self {
        AnticipatedAttackConfig {
            enemy_spawns: locs(&[
                (13, 27),
                (14, 27),
                (8, 22),
                (19, 22),
                (5, 19),
                (22, 19),
                (0, 14),
                (27, 14),
            ]),
            passes: DEFAULT_ANTICIPATED_PASSES,
            zones: vec![
                DefenseZone::new("first_left", &[(3, 12), (3, 13)], &[]),
                DefenseZone::new("first_right", &[(5, 12), (6, 12)], &[(5, 13), (6, 13)]),
                DefenseZone::new("second_left", &[(9, 11), (10, 11)], &[(9, 12)]),
                DefenseZone::new("second_right", &[(12, 9)], &[(11, 12), (13, 10)]),
                DefenseZone::new("third_left", &[(15, 9)], &[(16, 12), (14, 10)]),
                DefenseZone::new("third_right", &[(18, 11), (17, 11)], &[(18, 12)]),
                DefenseZone::new("fourth_left", &[(22, 12), (21, 12)], &[(22, 13), (21, 13)]),
                DefenseZone::new("fourth_right", &[(24, 12), (24, 13)], &[]),
            ],
            left_bands: bands(&[
                (2, "fourth_right"),
                (3, "fourth_left"),
                (5, "third_right"),
                (7, "third_left"),
                (9, "second_right"),
                (10, "second_left"),
                (11, "first_right"),
                (HALF_ARENA as u32, "first_left"),
            ]),
            right_bands: bands(&[
                (2, "first_left"),
                (3, "first_right"),
                (5, "second_left"),
                (7, "second_right"),
                (9, "third_left"),
                (10, "third_right"),
                (11, "fourth_left"),
                (HALF_ARENA as u32, "fourth_right"),
            ]),
        }
    }
}

impl AnticipatedAttackConfig {
    pub fn zone(&self, name: &str) -> Option<&DefenseZone> {
        self.zones.iter().find(|zone| zone.name == name)
    }

    /// The zone guarding `exit`. Cells with x + y below the half size count
    /// as left of center.
    pub fn zone_for_exit(&self, exit: Location) -> Option<&DefenseZone> {
        let left = (exit.x() as u32) + (exit.y() as u32) < HALF_ARENA as u32;
        let bands = if left {
            &self.left_bands
        } else {
            &self.right_bands
        };
        bands
            .iter()
            .find(|band| (exit.y() as u32) < band.below_row)
            .and_then(|band| self.zone(&band.zone))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReinforceConfig {
    pub mode: ReinforceMode,
    /// SP the loop will not spend below.
    pub reserve: f32,
    pub max_iterations: u32,
    pub base_value: f32,
    pub upgraded_value: f32,
    /// Blocks in tie-break order: among equally weak blocks the first listed
    /// is reinforced first.
    pub blocks: Vec<DefenseBlock>,
    pub anticipated: AnticipatedAttackConfig,
}

impl Default for ReinforceConfig {
    fn default() -> Self {
        ReinforceConfig {
            mode: ReinforceMode::default(),
            reserve: DEFAULT_SP_RESERVE,
            max_iterations: DEFAULT_REINFORCE_ITERATIONS,
            base_value: BASE_STRUCTURE_VALUE,
            upgraded_value: UPGRADED_STRUCTURE_VALUE,
            blocks: vec![
                DefenseBlock::new("left_corner", &[(4, 13), (3, 13), (2, 13), (5, 13)]),
                DefenseBlock::new("left_mid", &[(13, 13), (13, 12), (12, 12), (6, 13)]),
                DefenseBlock::new("right_mid", &[(14, 13), (14, 12), (15, 12), (21, 13)]),
                DefenseBlock::new("right_corner", &[(23, 13), (24, 13), (25, 13), (22, 13)]),
            ],
            anticipated: AnticipatedAttackConfig::default(),
        }
    }
}

/// A turret/wall layout kept standing and upgraded every turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FoundationConfig {
    pub turrets: Vec<Location>,
    pub walls: Vec<Location>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub opening: OpeningConfig,
    pub attack: AttackConfig,
    pub reinforce: ReinforceConfig,
    pub foundation: Option<FoundationConfig>,
    /// Put a turret one row above every cell the opponent scored through.
    pub reactive_defense: bool,
}

impl Default for PolicyConfig {
    /// Wide four-cell blocks, lane tally, panic and all-out overrides.
    fn default() -> Self {
        PolicyConfig {
            opening: OpeningConfig::default(),
            attack: AttackConfig::default(),
            reinforce: ReinforceConfig::default(),
            foundation: None,
            reactive_defense: false,
        }
    }
}

impl PolicyConfig {
    /// Three-cell corner blocks, no panic or all-out override.
    pub fn compact_corners() -> Self {
        let mut config = PolicyConfig::default();
        config.reinforce.blocks = vec![
            DefenseBlock::new("left_corner", &[(4, 13), (3, 13), (2, 13)]),
            DefenseBlock::new("left_mid", &[(13, 13), (13, 12), (6, 13), (5, 13)]),
            DefenseBlock::new("right_mid", &[(14, 13), (14, 12), (21, 13), (22, 13)]),
            DefenseBlock::new("right_corner", &[(23, 13), (24, 13), (25, 13)]),
        ];
        config.attack.panic.enabled = false;
        config.attack.all_out.enabled = false;
        config
    }

    /// Row 12 turrets behind row 13 walls, opened on turn 1 and repaired
    /// every turn. Leftover SP goes to the zone the opponent is expected to
    /// attack through.
    pub fn walled_foundation() -> Self {
        let turrets = locs(&[(4, 12), (23, 12), (10, 12), (17, 12)]);
        let walls = locs(&[(4, 13), (23, 13), (10, 13), (17, 13)]);

        let mut config = PolicyConfig::default();
        config.opening = OpeningConfig {
            turn: 1,
            turrets: turrets.clone(),
            walls: walls.clone(),
        };
        config.foundation = Some(FoundationConfig { turrets, walls });
        config.reinforce.blocks = vec![
            DefenseBlock::new("left_corner", &[(3, 12), (3, 13), (5, 12), (6, 12)]),
            DefenseBlock::new("left_mid", &[(9, 11), (10, 11), (12, 9)]),
            DefenseBlock::new("right_mid", &[(15, 9), (18, 11), (17, 11)]),
            DefenseBlock::new("right_corner", &[(22, 12), (21, 12), (24, 12), (24, 13)]),
        ];
        config.reinforce.reserve = 1.0;
        config.reinforce.mode = ReinforceMode::AnticipatedAttack;
        config.attack.panic.min_mp = 5.0;
        config.attack.all_out.enabled = false;
        config.attack.threat.second_best_above_enemy_sp = Some(3.0);
        config.attack.lanes = vec![
            LaneConfig {
                lane: Lane::LeftCorner,
                spawn_candidates: locs(&[(3, 10)]),
            },
            LaneConfig {
                lane: Lane::LeftMiddle,
                spawn_candidates: locs(&[(7, 6), (11, 2)]),
            },
            LaneConfig {
                lane: Lane::RightMiddle,
                spawn_candidates: locs(&[(20, 6), (16, 2)]),
            },
            LaneConfig {
                lane: Lane::RightCorner,
                spawn_candidates: locs(&[(24, 10)]),
            },
        ];
        config
    }

    /// Parse and validate a JSON config. Missing sections take the default
    /// preset's values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PolicyConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tables that would make a policy step address cells it can
    /// never use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self.validate_inner();
        if let Err(err) = &result {
            warn!("rejected policy config: {}", err);
        }
        result
    }

    fn validate_inner(&self) -> Result<(), ConfigError> {
        check_own_half("opening.turrets", &self.opening.turrets)?;
        check_own_half("opening.walls", &self.opening.walls)?;

        if let Some(foundation) = &self.foundation {
            check_own_half("foundation.turrets", &foundation.turrets)?;
            check_own_half("foundation.walls", &foundation.walls)?;
        }

        let reinforce = &self.reinforce;
        if reinforce.blocks.is_empty() {
            return Err(ConfigError::NoBlocks);
        }
        for block in &reinforce.blocks {
            if block.locations.is_empty() {
                return Err(ConfigError::EmptyBlock(block.name.clone()));
            }
            check_own_half(&format!("reinforce.blocks.{}", block.name), &block.locations)?;
        }
        check_non_negative("reinforce.reserve", reinforce.reserve)?;
        check_positive("reinforce.base_value", reinforce.base_value)?;
        if reinforce.upgraded_value <= reinforce.base_value {
            return Err(ConfigError::InvalidParameter {
                name: "reinforce.upgraded_value",
                reason: "must exceed reinforce.base_value".to_string(),
            });
        }
        if reinforce.max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "reinforce.max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if reinforce.mode == ReinforceMode::AnticipatedAttack {
            validate_anticipated(&reinforce.anticipated)?;
        }

        self.validate_attack()
    }

    fn validate_attack(&self) -> Result<(), ConfigError> {
        let attack = &self.attack;
        if !attack.unit.is_mobile() {
            return Err(ConfigError::WrongUnitKind {
                field: "attack.unit".to_string(),
                unit: attack.unit,
            });
        }
        if !attack.shield_unit.is_stationary() {
            return Err(ConfigError::WrongUnitKind {
                field: "attack.shield_unit".to_string(),
                unit: attack.shield_unit,
            });
        }

        check_non_negative("attack.shield_sp_floor", attack.shield_sp_floor)?;
        check_non_negative("attack.late_min_mp", attack.late_min_mp)?;
        let mut previous_turn = None;
        for tier in &attack.mp_tiers {
            check_non_negative("attack.mp_tiers.min_mp", tier.min_mp)?;
            if previous_turn.map_or(false, |turn| tier.before_turn <= turn) {
                return Err(ConfigError::InvalidParameter {
                    name: "attack.mp_tiers",
                    reason: "before_turn must be strictly increasing".to_string(),
                });
            }
            previous_turn = Some(tier.before_turn);
        }
        check_positive("attack.panic.multiplier", attack.panic.multiplier)?;
        check_non_negative("attack.panic.min_mp", attack.panic.min_mp)?;
        check_non_negative("attack.threat.turret_damage", attack.threat.turret_damage)?;

        let all_out = &attack.all_out;
        check_positive("attack.all_out.mp_ratio", all_out.mp_ratio)?;
        check_spawn_edge("attack.all_out.spawn", &[all_out.spawn])?;
        let line = all_out.shield_line();
        if line.len() as u32 != all_out.shield_line_length {
            return Err(ConfigError::InvalidParameter {
                name: "attack.all_out.shield_line_length",
                reason: "shield line leaves the arena".to_string(),
            });
        }
        check_own_half("attack.all_out.shield_line", &line)?;

        let mut seen = FnvHashSet::default();
        for lane_config in &attack.lanes {
            if !seen.insert(lane_config.lane) {
                return Err(ConfigError::DuplicateLane(lane_config.lane));
            }
            if lane_config.spawn_candidates.is_empty() {
                return Err(ConfigError::EmptyLane(lane_config.lane));
            }
            check_spawn_edge(
                &format!("attack.lanes.{:?}", lane_config.lane),
                &lane_config.spawn_candidates,
            )?;
        }
        if let Some(missing) = Lane::ALL.iter().find(|lane| !seen.contains(*lane)) {
            return Err(ConfigError::MissingLane(*missing));
        }

        Ok(())
    }
}

fn validate_anticipated(config: &AnticipatedAttackConfig) -> Result<(), ConfigError> {
    if config.enemy_spawns.is_empty() {
        return Err(ConfigError::InvalidParameter {
            name: "reinforce.anticipated.enemy_spawns",
            reason: "no spawn cells configured".to_string(),
        });
    }
    if let Some(&location) = config
        .enemy_spawns
        .iter()
        .find(|&&loc| !ArenaEdge::TOP.intersects(edges_of(loc)))
    {
        return Err(ConfigError::NotOnEnemyEdge {
            field: "reinforce.anticipated.enemy_spawns".to_string(),
            location,
        });
    }
    if config.passes == 0 {
        return Err(ConfigError::InvalidParameter {
            name: "reinforce.anticipated.passes",
            reason: "must be at least 1".to_string(),
        });
    }

    for zone in &config.zones {
        if zone.turrets.is_empty() && zone.walls.is_empty() {
            return Err(ConfigError::EmptyZone(zone.name.clone()));
        }
        let field = format!("reinforce.anticipated.zones.{}", zone.name);
        check_own_half(&field, &zone.turrets)?;
        check_own_half(&field, &zone.walls)?;
    }

    for bands in [&config.left_bands, &config.right_bands] {
        if bands.is_empty() {
            return Err(ConfigError::InvalidParameter {
                name: "reinforce.anticipated.bands",
                reason: "each side needs at least one band".to_string(),
            });
        }
        if let Some(band) = bands.iter().find(|band| config.zone(&band.zone).is_none()) {
            return Err(ConfigError::UnknownZone(band.zone.clone()));
        }
        if bands.windows(2).any(|pair| pair[1].below_row <= pair[0].below_row) {
            return Err(ConfigError::InvalidParameter {
                name: "reinforce.anticipated.bands",
                reason: "below_row must be strictly increasing".to_string(),
            });
        }
    }

    Ok(())
}

fn check_own_half(field: &str, locations: &[Location]) -> Result<(), ConfigError> {
    match locations.iter().find(|&&loc| !in_own_half(loc)) {
        Some(&location) => Err(ConfigError::OutOfOwnHalf {
            field: field.to_string(),
            location,
        }),
        None => Ok(()),
    }
}

fn check_spawn_edge(field: &str, locations: &[Location]) -> Result<(), ConfigError> {
    match locations
        .iter()
        .find(|&&loc| !ArenaEdge::BOTTOM.intersects(edges_of(loc)))
    {
        Some(&location) => Err(ConfigError::NotOnSpawnEdge {
            field: field.to_string(),
            location,
        }),
        None => Ok(()),
    }
}

fn check_positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be positive, got {}", value),
        })
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("must be non-negative, got {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        PolicyConfig::default().validate().unwrap();
        PolicyConfig::compact_corners().validate().unwrap();
        PolicyConfig::walled_foundation().validate().unwrap();
    }

    #[test]
    fn mp_threshold_scales_with_turn() {
        let attack = AttackConfig::default();
        assert_eq!(attack.min_mp_for_turn(0), 10.0);
        assert_eq!(attack.min_mp_for_turn(9), 10.0);
        assert_eq!(attack.min_mp_for_turn(10), 15.0);
        assert_eq!(attack.min_mp_for_turn(19), 15.0);
        assert_eq!(attack.min_mp_for_turn(20), 20.0);
        assert_eq!(attack.min_mp_for_turn(200), 20.0);
    }

    #[test]
    fn shield_line_walks_the_diagonal() {
        let line = AllOutConfig::default().shield_line();
        assert_eq!(line.len(), 13);
        assert_eq!(line[0], Location::from_coords(13, 1));
        assert_eq!(line[12], Location::from_coords(25, 13));
    }

    #[test]
    fn rejects_block_cell_in_enemy_half() {
        let mut config = PolicyConfig::default();
        config.reinforce.blocks[1].locations.push(Location::from_coords(13, 14));
        match config.validate() {
            Err(ConfigError::OutOfOwnHalf { field, location }) => {
                assert_eq!(field, "reinforce.blocks.left_mid");
                assert_eq!(location, Location::from_coords(13, 14));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_spawn_candidate_off_the_edge() {
        let mut config = PolicyConfig::default();
        config.attack.lanes[0]
            .spawn_candidates
            .push(Location::from_coords(5, 9));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotOnSpawnEdge { .. })
        ));
    }

    #[test]
    fn rejects_missing_and_duplicate_lanes() {
        let mut config = PolicyConfig::default();
        config.attack.lanes.pop();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingLane(Lane::RightCorner))
        ));

        let mut config = PolicyConfig::default();
        let first = config.attack.lanes[0].clone();
        config.attack.lanes.push(first);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateLane(Lane::LeftCorner))
        ));
    }

    #[test]
    fn rejects_unsorted_mp_tiers() {
        let mut config = PolicyConfig::default();
        config.attack.mp_tiers.reverse();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "attack.mp_tiers",
                ..
            })
        ));
    }

    #[test]
    fn compact_corners_never_overrides_the_thresholds() {
        let attack = PolicyConfig::compact_corners().attack;
        assert!(!attack.panic.enabled);
        assert!(!attack.all_out.enabled);
    }

    #[test]
    fn exits_map_to_zones_by_side_and_row() {
        let anticipated = AnticipatedAttackConfig::default();
        let zone_name = |x, y| {
            anticipated
                .zone_for_exit(Location::from_coords(x, y))
                .map(|zone| zone.name.as_str())
        };
        assert_eq!(zone_name(3, 10), Some("first_right"));
        assert_eq!(zone_name(0, 13), Some("first_left"));
        assert_eq!(zone_name(13, 0), Some("fourth_right"));
        assert_eq!(zone_name(14, 0), Some("first_left"));
        assert_eq!(zone_name(24, 10), Some("fourth_left"));
        assert_eq!(zone_name(27, 13), Some("fourth_right"));
    }

    #[test]
    fn rejects_broken_anticipation_tables() {
        let mut config = PolicyConfig::walled_foundation();
        config.reinforce.anticipated.left_bands[0].zone = "nowhere".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownZone(name)) if name == "nowhere"
        ));

        let mut config = PolicyConfig::walled_foundation();
        config.reinforce.anticipated.enemy_spawns.push(Location::from_coords(13, 0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotOnEnemyEdge { .. })
        ));

        let mut config = PolicyConfig::walled_foundation();
        config.reinforce.anticipated.zones[0].walls.push(Location::from_coords(3, 14));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfOwnHalf { .. })
        ));

        // Unused tables are not checked.
        config.reinforce.mode = ReinforceMode::WeakestBlock;
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = PolicyConfig::from_json(
            r#"{
                "attack": { "late_min_mp": 25.0, "panic": { "multiplier": 2.0 } },
                "reactive_defense": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.attack.late_min_mp, 25.0);
        assert_eq!(config.attack.panic.multiplier, 2.0);
        assert!(config.attack.panic.enabled);
        assert!(config.reactive_defense);
        assert_eq!(config.reinforce, ReinforceConfig::default());
    }

    #[test]
    fn json_round_trips_through_presets() {
        let config = PolicyConfig::walled_foundation();
        let json = config.to_json().unwrap();
        assert_eq!(PolicyConfig::from_json(&json).unwrap(), config);
    }
}
