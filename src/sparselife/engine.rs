//! SparseLife engine core.
//!
//! The board is a hash set of live cells; nothing is stored for dead cells.
//! A generation step walks the live set once. Each live cell counts its live
//! neighbors, and each dead neighbor it touches is probed once (deduped per
//! step through `CoordSet`) for a birth. Births and deaths are collected
//! against the untouched current set and committed together afterwards, so
//! work is O(live * 8) regardless of how far apart the cells are.

use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

use super::config::SparseLifeConfig;
use super::coord::{Coord, CoordBuildHasher};
use super::coord_set::CoordSet;
use super::patterns::Pattern;
use super::rect::Rect;

type LiveSet = HashSet<Coord, CoordBuildHasher>;

/// A live cell with this many neighbors or fewer dies of loneliness.
const LONELINESS_MAX: u8 = 1;
/// A live cell with this many neighbors or more dies of overcrowding.
const OVERCROWDING_MIN: u8 = 4;
/// A dead cell with exactly this many neighbors is born.
const BIRTH_COUNT: u8 = 3;

#[inline]
fn live_neighbors(live: &LiveSet, cell: Coord) -> u8 {
    cell.neighbors().filter(|n| live.contains(n)).count() as u8
}

#[inline]
fn dies(neighbors: u8) -> bool {
    neighbors <= LONELINESS_MAX || neighbors >= OVERCROWDING_MIN
}

fn fill_random<R: Rng + ?Sized>(live: &mut LiveSet, rect: Rect, rng: &mut R) -> usize {
    let mut born = 0;
    for cell in rect.cells() {
        if rng.random_bool(0.5) {
            live.insert(cell);
            born += 1;
        } else {
            live.remove(&cell);
        }
    }
    born
}

pub struct SparseLife {
    live: LiveSet,
    generation: u64,
    rng: StdRng,
    /// Dead cells already probed for a birth during the current step.
    probed: CoordSet,
    births: Vec<Coord>,
    deaths: Vec<Coord>,
    /// Configured pre-size; `clear` shrinks back to it.
    capacity: usize,
}

impl Default for SparseLife {
    fn default() -> Self {
        Self::new()
    }
}

impl SparseLife {
    pub fn new() -> Self {
        Self::with_config(SparseLifeConfig::default())
    }

    pub fn with_config(config: SparseLifeConfig) -> Self {
        let capacity = config.capacity;
        Self {
            live: LiveSet::with_capacity_and_hasher(capacity, CoordBuildHasher::default()),
            generation: 0,
            rng: config.build_rng(),
            probed: CoordSet::with_capacity(capacity.saturating_mul(2)),
            births: Vec::with_capacity(capacity / 4),
            deaths: Vec::with_capacity(capacity / 4),
            capacity,
        }
    }

    #[inline]
    pub fn set_alive(&mut self, x: i32, y: i32) {
        self.live.insert(Coord::new(x, y));
    }

    #[inline]
    pub fn set_dead(&mut self, x: i32, y: i32) {
        self.live.remove(&Coord::new(x, y));
    }

    #[inline]
    pub fn set_cell(&mut self, x: i32, y: i32, alive: bool) {
        if alive {
            self.set_alive(x, y);
        } else {
            self.set_dead(x, y);
        }
    }

    pub fn set_cells_alive<I>(&mut self, cells: I)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        self.live
            .extend(cells.into_iter().map(|(x, y)| Coord::new(x, y)));
    }

    pub fn toggle(&mut self, x: i32, y: i32) {
        let cell = Coord::new(x, y);
        if !self.live.remove(&cell) {
            self.live.insert(cell);
        }
    }

    #[inline]
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.live.contains(&Coord::new(x, y))
    }

    /// Stamp `pattern` alive with its top-left corner at `(dx, dy)`.
    /// Cells that would land outside the `i32` plane are dropped.
    pub fn stamp(&mut self, pattern: &Pattern, dx: i32, dy: i32) {
        for &(x, y) in pattern.cells {
            if let Some(cell) = Coord::new(x, y).checked_offset(dx, dy) {
                self.live.insert(cell);
            }
        }
    }

    /// Empty the board and reset the generation counter. Memory grown by a
    /// busy board is released down to the configured capacity.
    pub fn clear(&mut self) {
        debug!(
            generation = self.generation,
            population = self.live.len(),
            probed_slots = self.probed.slot_count(),
            "clearing board"
        );
        self.live.clear();
        self.live.shrink_to(self.capacity);
        self.probed.shrink_to(self.capacity.saturating_mul(2));
        self.births.clear();
        self.births.shrink_to(self.capacity / 4);
        self.deaths.clear();
        self.deaths.shrink_to(self.capacity / 4);
        self.generation = 0;
    }

    /// Overwrite every cell in `rect` with a fair coin flip from the engine's
    /// own RNG. Cells outside `rect` keep their state. Resets the generation
    /// counter, since a randomized board is a fresh setup.
    pub fn randomize(&mut self, rect: Rect) {
        let born = fill_random(&mut self.live, rect, &mut self.rng);
        self.finish_randomize(rect, born);
    }

    /// `randomize` with a caller-supplied RNG, so outcomes can be replayed.
    pub fn randomize_with<R: Rng + ?Sized>(&mut self, rect: Rect, rng: &mut R) {
        let born = fill_random(&mut self.live, rect, rng);
        self.finish_randomize(rect, born);
    }

    fn finish_randomize(&mut self, rect: Rect, born: usize) {
        self.generation = 0;
        debug!(
            %rect,
            area = rect.area(),
            born,
            population = self.live.len(),
            "randomized region"
        );
    }

    /// Number of live cells among the 8 Moore neighbors of `(x, y)`.
    #[inline]
    pub fn count_live_neighbors(&self, x: i32, y: i32) -> u8 {
        live_neighbors(&self.live, Coord::new(x, y))
    }

    /// Smallest rectangle covering every live cell, widened on each axis to
    /// include the origin. An empty board gives `(0, 0, 0, 0)`.
    pub fn occupied_bounds(&self) -> Rect {
        let mut bounds = Rect::ORIGIN;
        for &cell in &self.live {
            bounds.include(cell);
        }
        bounds
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn population(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Live cells in unspecified order.
    pub fn live_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.live.iter().copied()
    }

    pub fn for_each_live<F: FnMut(i32, i32)>(&self, mut f: F) {
        for cell in &self.live {
            f(cell.x(), cell.y());
        }
    }

    /// Advance the board one generation under B3/S23.
    pub fn advance_generation(&mut self) {
        self.births.clear();
        self.deaths.clear();
        self.probed.begin_step();
        self.probed.reserve_for(self.live.len().saturating_mul(2));

        // Evaluation only reads `self.live`; all writes go to the scratch lists.
        for &cell in &self.live {
            let mut neighbors = 0u8;
            for neighbor in cell.neighbors() {
                if self.live.contains(&neighbor) {
                    neighbors += 1;
                } else if self.probed.insert(neighbor)
                    && live_neighbors(&self.live, neighbor) == BIRTH_COUNT
                {
                    self.births.push(neighbor);
                }
            }
            if dies(neighbors) {
                self.deaths.push(cell);
            }
        }

        for cell in &self.deaths {
            self.live.remove(cell);
        }
        self.live.extend(self.births.iter().copied());
        self.generation += 1;

        debug!(
            generation = self.generation,
            births = self.births.len(),
            deaths = self.deaths.len(),
            probed = self.probed.len(),
            population = self.live.len(),
            "advanced generation"
        );
    }

    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.advance_generation();
        }
    }
}

/// Diagnostic dump over `occupied_bounds()`: one row per `y` (most negative
/// first), `'1'` for live and `'0'` for dead, rows joined by `'\n'`.
impl fmt::Display for SparseLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bounds = self.occupied_bounds();
        for y in bounds.y_low..=bounds.y_high {
            if y != bounds.y_low {
                f.write_str("\n")?;
            }
            for x in bounds.x_low..=bounds.x_high {
                f.write_str(if self.is_alive(x, y) { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SparseLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseLife")
            .field("generation", &self.generation)
            .field("population", &self.live.len())
            .field("bounds", &self.occupied_bounds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{SparseLife, dies};
    use crate::sparselife::config::SparseLifeConfig;
    use crate::sparselife::patterns::Pattern;
    use crate::sparselife::rect::Rect;

    #[test]
    fn thresholds_match_survival_rule() {
        for n in 0u8..=8 {
            assert_eq!(dies(n), !(n == 2 || n == 3), "neighbors {n}");
        }
    }

    #[test]
    fn set_and_clear_are_idempotent() {
        let mut engine = SparseLife::new();
        engine.set_alive(1, 1);
        engine.set_alive(1, 1);
        assert_eq!(engine.population(), 1);
        engine.set_dead(1, 1);
        engine.set_dead(1, 1);
        assert!(engine.is_empty());
    }

    #[test]
    fn neighbor_count_covers_full_ring() {
        let mut engine = SparseLife::new();
        for y in -1..=1 {
            for x in -1..=1 {
                engine.set_alive(x, y);
            }
        }
        assert_eq!(engine.count_live_neighbors(0, 0), 8);
        assert_eq!(engine.count_live_neighbors(1, 1), 3);
        assert_eq!(engine.count_live_neighbors(2, 0), 3);
        assert_eq!(engine.count_live_neighbors(3, 0), 0);
    }

    #[test]
    fn birth_candidate_reached_from_three_sides_is_born_once() {
        // (1, 1) borders all three live cells and is probed from each of them.
        let mut engine = SparseLife::new();
        engine.set_cells_alive([(0, 0), (2, 0), (1, 2)]);

        engine.advance_generation();

        assert!(engine.is_alive(1, 1));
        assert_eq!(engine.population(), 1);
        assert_eq!(engine.births.len(), 1);
        assert_eq!(engine.deaths.len(), 3);
    }

    #[test]
    fn scratch_is_reset_between_generations() {
        let mut engine = SparseLife::new();
        engine.stamp(Pattern::find("blinker").unwrap(), 0, 0);
        engine.advance_generation();
        assert_eq!((engine.births.len(), engine.deaths.len()), (2, 2));
        engine.advance_generation();
        assert_eq!((engine.births.len(), engine.deaths.len()), (2, 2));
        assert_eq!(engine.population(), 3);
    }

    #[test]
    fn clear_releases_scratch_grown_by_a_busy_board() {
        let mut engine = SparseLife::with_config(SparseLifeConfig::default().seed(5));
        engine.randomize(Rect::new(0, 127, 0, 127));
        engine.advance_generation();
        let grown = engine.probed.slot_count();
        let grown_deaths = engine.deaths.capacity();
        assert!(grown > 1024);
        assert!(grown_deaths > 1024);

        engine.clear();
        assert!(engine.is_empty());
        assert_eq!(engine.generation(), 0);
        assert!(engine.probed.slot_count() < grown);
        assert_eq!(engine.probed.slot_count(), 16);
        assert!(engine.deaths.capacity() < grown_deaths);
        assert!(engine.births.is_empty() && engine.deaths.is_empty());

        // Cleared engine still steps normally.
        engine.stamp(Pattern::find("blinker").unwrap(), 0, 0);
        engine.advance_generation();
        assert_eq!(engine.population(), 3);
        assert!(engine.is_alive(1, -1));
    }

    #[test]
    fn engine_seed_makes_randomize_reproducible() {
        let rect = Rect::new(-8, 8, -8, 8);
        let mut a = SparseLife::with_config(SparseLifeConfig::default().seed(99));
        let mut b = SparseLife::with_config(SparseLifeConfig::default().seed(99));
        a.randomize(rect);
        b.randomize(rect);
        assert_eq!(a.to_string(), b.to_string());
        assert!(a.population() > 0);
    }

    #[test]
    fn randomize_with_resets_generation() {
        let mut engine = SparseLife::new();
        engine.set_alive(0, 0);
        engine.step_n(3);
        assert_eq!(engine.generation(), 3);

        let mut rng = StdRng::seed_from_u64(1);
        engine.randomize_with(Rect::new(0, 3, 0, 3), &mut rng);
        assert_eq!(engine.generation(), 0);
    }

    #[test]
    fn stamp_drops_cells_outside_the_plane() {
        let mut engine = SparseLife::new();
        engine.stamp(Pattern::find("block").unwrap(), i32::MAX, 0);
        assert_eq!(engine.population(), 2);
        assert!(engine.is_alive(i32::MAX, 0));
        assert!(engine.is_alive(i32::MAX, 1));
    }

    #[test]
    fn debug_reports_summary() {
        let mut engine = SparseLife::new();
        engine.set_alive(2, -1);
        let dbg = format!("{engine:?}");
        assert!(dbg.contains("population: 1"));
        assert!(dbg.contains("generation: 0"));
    }
}
