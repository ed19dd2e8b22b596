//! Sparse hash-set Conway's Game of Life engine (B3/S23) on an unbounded grid.

pub mod sparselife;
pub use sparselife::{Coord, Error, Pattern, Rect, SparseLife, SparseLifeConfig};
