//! Cell coordinates and the hasher used to key the live set.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{BuildHasherDefault, Hash, Hasher};

/// An immutable grid coordinate. Equality, hashing and ordering are all
/// structural, so a `Coord` is safe to use as a set or map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coord {
    x: i32,
    y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn x(self) -> i32 {
        self.x
    }

    #[inline]
    pub const fn y(self) -> i32 {
        self.y
    }

    /// The one coordinate hash. Both the live set (through `CoordHasher`)
    /// and the per-step `CoordSet` key on this value.
    #[inline(always)]
    pub fn mix(self) -> u64 {
        let hx = (self.x as i64 as u64).wrapping_mul(MX);
        let hy = (self.y as i64 as u64).wrapping_mul(MY);
        // Fold the well-mixed high half down so masking by a small table
        // size still sees every input bit.
        let h = hx ^ hy.rotate_right(32);
        h ^ (h >> 29)
    }

    /// Shift by `(dx, dy)`, or `None` if either component leaves the `i32`
    /// range. Never wraps.
    #[inline]
    pub fn checked_offset(self, dx: i32, dy: i32) -> Option<Coord> {
        Some(Coord {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// The Moore neighbors of this cell, in `Direction::ALL` order.
    /// Neighbors past the edge of the `i32` plane do not exist and are skipped.
    #[inline]
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        Direction::ALL.into_iter().filter_map(move |dir| {
            let (dx, dy) = dir.offset();
            self.checked_offset(dx, dy)
        })
    }
}

impl Hash for Coord {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.mix());
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Row-major: `y` first, then `x`. Matches the diagnostic dump order.
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord> for (i32, i32) {
    #[inline]
    fn from(c: Coord) -> Self {
        (c.x, c.y)
    }
}

/// The 8 Moore-neighborhood directions. `y` grows downward (south).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Direction {
    North = 0, // (x, y-1)
    South = 1, // (x, y+1)
    West  = 2, // (x-1, y)
    East  = 3, // (x+1, y)
    NW    = 4, // (x-1, y-1)
    NE    = 5, // (x+1, y-1)
    SW    = 6, // (x-1, y+1)
    SE    = 7, // (x+1, y+1)
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North, Direction::South,
        Direction::West,  Direction::East,
        Direction::NW,    Direction::NE,
        Direction::SW,    Direction::SE,
    ];

    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West  => (-1, 0),
            Direction::East  => (1, 0),
            Direction::NW    => (-1, -1),
            Direction::NE    => (1, -1),
            Direction::SW    => (-1, 1),
            Direction::SE    => (1, 1),
        }
    }
}

const MX: u64 = 0x517c_c1b7_2722_0a95;
const MY: u64 = 0x6c62_272e_07bb_0142;

/// Hasher for the live set.
///
/// A `Coord` arrives as a single already-mixed `write_u64`, which passes
/// straight through. Anything else is folded in word by word with a
/// rotate, xor and multiply.
#[derive(Clone, Copy, Default)]
pub struct CoordHasher {
    hash: u64,
}

impl CoordHasher {
    #[inline(always)]
    fn add_word(&mut self, word: u64) {
        self.hash = (self.hash.rotate_left(5) ^ word).wrapping_mul(MX);
    }
}

impl Hasher for CoordHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.add_word(b as u64);
        }
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.add_word(i as u32 as u64);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = self.hash.rotate_left(5) ^ i;
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }
}

pub type CoordBuildHasher = BuildHasherDefault<CoordHasher>;

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::hash::BuildHasher;

    use super::{Coord, CoordBuildHasher, Direction};

    #[test]
    fn equal_coords_hash_equal() {
        let build = CoordBuildHasher::default();
        let a = Coord::new(-3, 17);
        let b = Coord::from((-3, 17));
        assert_eq!(a, b);
        assert_eq!(build.hash_one(a), build.hash_one(b));
        assert_ne!(build.hash_one(a), build.hash_one(Coord::new(17, -3)));
    }

    #[test]
    fn live_set_hash_is_the_coord_mix() {
        let build = CoordBuildHasher::default();
        for c in [Coord::new(0, 0), Coord::new(-3, 17), Coord::new(i32::MIN, i32::MAX)] {
            assert_eq!(build.hash_one(c), c.mix());
        }
    }

    #[test]
    fn mix_spreads_neighbors_across_low_bits() {
        let mut buckets = HashSet::new();
        for y in 0..4 {
            for x in 0..4 {
                buckets.insert(Coord::new(x, y).mix() & 0xff);
            }
        }
        assert!(buckets.len() >= 12, "only {} distinct buckets", buckets.len());
    }

    #[test]
    fn display_matches_diagnostic_form() {
        assert_eq!(Coord::new(4, -2).to_string(), "(4, -2)");
    }

    #[test]
    fn ordering_is_row_major() {
        let mut cells = vec![Coord::new(1, 0), Coord::new(0, 1), Coord::new(-1, 0)];
        cells.sort();
        assert_eq!(cells, vec![Coord::new(-1, 0), Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn offsets_cover_moore_neighborhood_once() {
        let offsets: HashSet<(i32, i32)> = Direction::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(offsets.len(), 8);
        assert!(!offsets.contains(&(0, 0)));
        for &(dx, dy) in &offsets {
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
        }
    }

    #[test]
    fn neighbors_stop_at_the_edge_of_the_plane() {
        assert_eq!(Coord::new(0, 0).neighbors().count(), 8);
        assert_eq!(Coord::new(i32::MAX, 0).neighbors().count(), 5);
        assert_eq!(Coord::new(i32::MIN, i32::MIN).neighbors().count(), 3);
        assert!(Coord::new(i32::MAX, 0).checked_offset(1, 0).is_none());
    }
}
