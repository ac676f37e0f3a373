pub const ARENA_SIZE: u8 = 28;
pub const HALF_ARENA: u8 = 14;

/// Score contributed by a full-health unupgraded structure in a defense block.
pub const BASE_STRUCTURE_VALUE: f32 = 6.0;
/// Score contributed by a full-health upgraded structure in a defense block.
pub const UPGRADED_STRUCTURE_VALUE: f32 = 14.0;

/// Default SP kept in reserve by the reinforcement loop.
pub const DEFAULT_SP_RESERVE: f32 = 2.0;
/// Default hard cap on reinforcement passes per turn.
pub const DEFAULT_REINFORCE_ITERATIONS: u32 = 64;
/// Build passes per turn when reinforcing against the anticipated attack.
pub const DEFAULT_ANTICIPATED_PASSES: u32 = 4;

/// SP needed to afford the disposable shield support.
pub const DEFAULT_SHIELD_SP_FLOOR: f32 = 4.0;

/// Damage dealt per hit by an enemy turret when estimating path exposure.
pub const DEFAULT_TURRET_DAMAGE: f32 = 6.0;

/// Lane weight of an enemy turret; upgraded turrets count one extra.
pub const TURRET_PRESENCE_WEIGHT: u32 = 1;

/// Minimum MP required to launch, by elapsed turn.
/// Each entry is `(turns_before, min_mp)` and the first matching entry wins.
pub const DEFAULT_MP_TIERS: [(u32, f32); 2] = [(10, 10.0), (20, 15.0)];
/// MP required once every tier in [`DEFAULT_MP_TIERS`] has been passed.
pub const DEFAULT_LATE_MIN_MP: f32 = 20.0;
