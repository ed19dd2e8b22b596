//! Named starter patterns. Coordinates are relative to the pattern's top-left
//! corner with `y` growing downward.

use super::error::Error;

pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
    /// Generations until the pattern repeats in place. `None` for
    /// spaceships and methuselahs.
    pub period: Option<u64>,
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1)],
        period: Some(1),
    },
    Pattern {
        name: "beehive",
        cells: &[(1, 0), (2, 0), (0, 1), (3, 1), (1, 2), (2, 2)],
        period: Some(1),
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (1, 0), (2, 0)],
        period: Some(2),
    },
    Pattern {
        name: "toad",
        cells: &[(1, 0), (2, 0), (3, 0), (0, 1), (1, 1), (2, 1)],
        period: Some(2),
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 2), (3, 2), (2, 3), (3, 3)],
        period: Some(2),
    },
    Pattern {
        name: "pulsar",
        cells: &[
            // Top half
            (2, 0), (3, 0), (4, 0), (8, 0), (9, 0), (10, 0),
            (0, 2), (5, 2), (7, 2), (12, 2),
            (0, 3), (5, 3), (7, 3), (12, 3),
            (0, 4), (5, 4), (7, 4), (12, 4),
            (2, 5), (3, 5), (4, 5), (8, 5), (9, 5), (10, 5),
            // Bottom half (mirrored)
            (2, 7), (3, 7), (4, 7), (8, 7), (9, 7), (10, 7),
            (0, 8), (5, 8), (7, 8), (12, 8),
            (0, 9), (5, 9), (7, 9), (12, 9),
            (0, 10), (5, 10), (7, 10), (12, 10),
            (2, 12), (3, 12), (4, 12), (8, 12), (9, 12), (10, 12),
        ],
        period: Some(3),
    },
    // Travels (+1, +1) every 4 generations.
    Pattern {
        name: "glider",
        cells: &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)],
        period: None,
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)],
        period: None,
    },
    Pattern {
        name: "acorn",
        cells: &[(1, 0), (3, 1), (0, 2), (1, 2), (4, 2), (5, 2), (6, 2)],
        period: None,
    },
];

impl Pattern {
    /// Look up a pattern by case-insensitive name.
    pub fn find(name: &str) -> Result<&'static Pattern, Error> {
        PATTERNS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::UnknownPattern {
                name: name.to_owned(),
                known: PATTERNS.iter().map(|p| p.name).collect::<Vec<_>>().join(", "),
            })
    }

    pub fn population(&self) -> usize {
        self.cells.len()
    }
}
