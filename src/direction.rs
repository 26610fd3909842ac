use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Absolute facing of the turmite on the grid.
///
/// Discriminants line up with [`Turn`], so `North` is the heading reached by turning
/// [`Turn::Forward`] from `North`, `East` by [`Turn::Right`], and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Heading {
    #[default]
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    const fn from_index(i: u8) -> Self {
        match i % 4 {
            0 => Heading::North,
            1 => Heading::East,
            2 => Heading::South,
            _ => Heading::West,
        }
    }

    /// The heading 90 degrees clockwise of `self`.
    pub const fn right(self) -> Self {
        Self::from_index(self as u8 + 1)
    }

    /// The heading 90 degrees counter-clockwise of `self`.
    pub const fn left(self) -> Self {
        Self::from_index(self as u8 + 3)
    }

    /// Apply a relative turn directive.
    pub const fn turn(self, turn: Turn) -> Self {
        match turn {
            Turn::Forward => self,
            Turn::Right => self.right(),
            Turn::Backward => self.right().right(),
            Turn::Left => self.left(),
        }
    }

    /// One-cell `(row, col)` displacement. Row 0 is the top of the grid, so north
    /// decreases the row.
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Heading::North => (-1, 0),
            Heading::East => (0, 1),
            Heading::South => (1, 0),
            Heading::West => (0, -1),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Heading::North => "north",
            Heading::East => "east",
            Heading::South => "south",
            Heading::West => "west",
        };

        f.write_str(s)
    }
}

/// A turn relative to the current heading, as written in a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Forward = 0,
    Right = 1,
    Backward = 2,
    Left = 3,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown direction type: {got}")]
pub struct TurnError {
    pub got: String,
}

impl FromStr for Turn {
    type Err = TurnError;

    /// Accepts `forward|f|backward|back|left|l|right|r`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "forward" | "f" => Ok(Turn::Forward),
            "backward" | "back" => Ok(Turn::Backward),
            "left" | "l" => Ok(Turn::Left),
            "right" | "r" => Ok(Turn::Right),
            _ => Err(TurnError { got: s.to_string() }),
        }
    }
}
