use crate::constants::*;
use serde::*;

/// A cell of the arena.
///
/// Packed into a `u16` like the engine's own compact coordinates, but
/// serialized as an `[x, y]` pair so hand-authored layouts and frame data
/// read naturally.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Location {
    packed: u16,
}

impl Location {
    pub fn from_coords(x: u32, y: u32) -> Self {
        Location {
            packed: ((x << 8) | y) as u16,
        }
    }

    /// Offset this location by a signed delta. Returns `None` when the result
    /// would leave the 28x28 bounding box.
    pub fn checked_offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = self.x() as i16 + dx as i16;
        let y = self.y() as i16 + dy as i16;
        if (0..ARENA_SIZE as i16).contains(&x) && (0..ARENA_SIZE as i16).contains(&y) {
            Some(Location::from_coords(x as u32, y as u32))
        } else {
            None
        }
    }

    #[inline]
    pub fn x(self) -> u8 {
        ((self.packed >> 8) & 0xFF) as u8
    }

    #[inline]
    pub fn y(self) -> u8 {
        (self.packed & 0xFF) as u8
    }

    /// Euclidean distance, which is what unit ranges are measured in.
    pub fn distance_to(self, other: Self) -> f32 {
        let dx = self.x() as f32 - other.x() as f32;
        let dy = self.y() as f32 - other.y() as f32;

        (dx * dx + dy * dy).sqrt()
    }

    /// True for cells on the left half of the arena (used to pick which way
    /// offsets and shields lean).
    pub fn is_left_half(self) -> bool {
        self.x() < HALF_ARENA
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x(), self.y())
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [self.x(), self.y()].serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[u8; 2]>::deserialize(deserializer)?;
        Ok(Location::from_coords(x as u32, y as u32))
    }
}
