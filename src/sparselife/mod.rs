//! SparseLife engine internals and public API.

mod config;
mod coord;
mod coord_set;
mod engine;
mod error;
mod patterns;
mod rect;

pub use config::{SEED_ENV, SparseLifeConfig, parse_seed, seed_from_env};
pub use coord::{Coord, CoordBuildHasher, CoordHasher, Direction};
pub use engine::SparseLife;
pub use error::{Error, Result};
pub use patterns::{PATTERNS, Pattern};
pub use rect::Rect;
