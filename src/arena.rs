use crate::constants::*;
use crate::location::*;
use bitflags::*;

bitflags! {
    /// The four diagonal edges of the diamond arena.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ArenaEdge: u8 {
        const TOP_LEFT = 1;
        const TOP_RIGHT = 2;
        const BOTTOM_LEFT = 4;
        const BOTTOM_RIGHT = 8;

        const TOP = Self::TOP_LEFT.bits() | Self::TOP_RIGHT.bits();
        const BOTTOM = Self::BOTTOM_LEFT.bits() | Self::BOTTOM_RIGHT.bits();
    }
}

impl ArenaEdge {
    /// The edge a mobile unit spawned on `self` walks toward.
    pub fn opposite(self) -> ArenaEdge {
        let mut opposite = ArenaEdge::empty();
        if self.contains(ArenaEdge::TOP_LEFT) {
            opposite |= ArenaEdge::BOTTOM_RIGHT;
        }
        if self.contains(ArenaEdge::TOP_RIGHT) {
            opposite |= ArenaEdge::BOTTOM_LEFT;
        }
        if self.contains(ArenaEdge::BOTTOM_LEFT) {
            opposite |= ArenaEdge::TOP_RIGHT;
        }
        if self.contains(ArenaEdge::BOTTOM_RIGHT) {
            opposite |= ArenaEdge::TOP_LEFT;
        }
        opposite
    }
}

/// Whether `(x, y)` lies inside the diamond.
pub fn in_arena_bounds(x: i16, y: i16) -> bool {
    let half = HALF_ARENA as i16;
    let size = ARENA_SIZE as i16;
    if !(0..size).contains(&x) || !(0..size).contains(&y) {
        return false;
    }
    if y < half {
        x >= half - 1 - y && x <= half + y
    } else {
        let row = y - half;
        x >= row && x < size - row
    }
}

pub fn location_in_bounds(loc: Location) -> bool {
    in_arena_bounds(loc.x() as i16, loc.y() as i16)
}

/// The half of the arena the policy owner builds in.
pub fn in_own_half(loc: Location) -> bool {
    location_in_bounds(loc) && loc.y() < HALF_ARENA
}

/// Edges a location sits on. Empty for interior cells.
pub fn edges_of(loc: Location) -> ArenaEdge {
    let x = loc.x() as i16;
    let y = loc.y() as i16;
    let half = HALF_ARENA as i16;
    let top = ARENA_SIZE as i16 - 1;

    let mut edges = ArenaEdge::empty();
    if !location_in_bounds(loc) {
        return edges;
    }
    if y < half && x + y == half - 1 {
        edges |= ArenaEdge::BOTTOM_LEFT;
    }
    if y < half && x - y == half {
        edges |= ArenaEdge::BOTTOM_RIGHT;
    }
    if y >= half && x + (top - y) == half - 1 {
        edges |= ArenaEdge::TOP_LEFT;
    }
    if y >= half && x - (top - y) == half {
        edges |= ArenaEdge::TOP_RIGHT;
    }
    edges
}

/// All cells of the requested edges, in edge order.
pub fn edge_locations(edges: ArenaEdge) -> Vec<Location> {
    let half = HALF_ARENA as u32;
    let top = ARENA_SIZE as u32 - 1;
    let mut locations = Vec::new();
    for i in 0..half {
        if edges.contains(ArenaEdge::TOP_LEFT) {
            locations.push(Location::from_coords(half - 1 - i, top - i));
        }
        if edges.contains(ArenaEdge::TOP_RIGHT) {
            locations.push(Location::from_coords(half + i, top - i));
        }
        if edges.contains(ArenaEdge::BOTTOM_LEFT) {
            locations.push(Location::from_coords(half - 1 - i, i));
        }
        if edges.contains(ArenaEdge::BOTTOM_RIGHT) {
            locations.push(Location::from_coords(half + i, i));
        }
    }
    locations
}

/// A 28x28 array for arena-sized data. Cells outside the diamond are
/// stored but never meaningful.
#[derive(Clone, Debug)]
pub struct ArenaDataArray<T: Copy> {
    data: Vec<T>,
}

impl<T: Copy> ArenaDataArray<T> {
    pub fn new(initial: T) -> Self {
        ArenaDataArray {
            data: vec![initial; (ARENA_SIZE as usize) * (ARENA_SIZE as usize)],
        }
    }

    #[inline]
    pub fn get(&self, loc: Location) -> &T {
        &self.data[Self::index(loc)]
    }

    #[inline]
    pub fn get_mut(&mut self, loc: Location) -> &mut T {
        &mut self.data[Self::index(loc)]
    }

    #[inline]
    pub fn set(&mut self, loc: Location, value: T) {
        *self.get_mut(loc) = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Location, &T)> {
        self.data.iter().enumerate().map(|(i, v)| {
            let x = i % (ARENA_SIZE as usize);
            let y = i / (ARENA_SIZE as usize);
            (Location::from_coords(x as u32, y as u32), v)
        })
    }

    #[inline]
    fn index(loc: Location) -> usize {
        (loc.y() as usize) * (ARENA_SIZE as usize) + (loc.x() as usize)
    }
}
