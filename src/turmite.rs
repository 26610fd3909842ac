use thiserror::Error;

use crate::ColorId;
use crate::StateId;
use crate::direction::Heading;
use crate::grid::Grid;
use crate::rules::RuleTable;
use crate::rules::Signal;

/// The agent walking the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Turmite {
    pub row: usize,
    pub col: usize,
    pub heading: Heading,
    pub state: StateId,
}

/// No rule matches what the turmite currently reads.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("No rule for current state: {state} and current color: {color} at ({row}, {col})")]
pub struct StuckError {
    pub state: StateId,
    pub color: ColorId,
    pub row: usize,
    pub col: usize,
    pub heading: Heading,
}

impl Turmite {
    /// A turmite at the center of `grid`, facing north, in state `a`.
    pub fn new(grid: &Grid) -> Self {
        let (row, col) = grid.center();

        Self {
            row,
            col,
            heading: Heading::North,
            state: 0,
        }
    }

    /// The signal the turmite would act on next.
    pub fn signal(&self, grid: &Grid) -> Signal {
        Signal {
            state: self.state,
            color: grid.get(self.row, self.col),
        }
    }

    /// Recolor the current cell, switch state, turn and move one cell.
    ///
    /// If no rule matches, neither the grid nor the turmite is touched.
    pub fn step(&mut self, grid: &mut Grid, rules: &RuleTable) -> Result<(), StuckError> {
        let signal = self.signal(grid);

        let Some(action) = rules.get(signal) else {
            return Err(StuckError {
                state: signal.state,
                color: signal.color,
                row: self.row,
                col: self.col,
                heading: self.heading,
            });
        };

        grid.set(self.row, self.col, action.color);
        self.state = action.state;
        self.heading = self.heading.turn(action.turn);
        (self.row, self.col) = grid.neighbor(self.row, self.col, self.heading);

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::StuckError;
    use super::Turmite;
    use crate::direction::Heading;
    use crate::grid::Grid;
    use crate::rules::RuleTable;

    const LANGTON: &str = "a 0 -> a 1 right\na 1 -> a 0 left\n";

    #[test]
    fn starts_at_center_facing_north() {
        let grid = Grid::new(4);
        let t = Turmite::new(&grid);

        assert_eq!((t.row, t.col), (2, 2));
        assert_eq!(t.heading, Heading::North);
        assert_eq!(t.state, 0);
    }

    #[test]
    fn first_step() {
        let rules: RuleTable = LANGTON.parse().unwrap();
        let mut grid = Grid::new(3);
        let mut t = Turmite::new(&grid);

        t.step(&mut grid, &rules).unwrap();

        assert_eq!(grid.get(1, 1), 1);
        assert_eq!(t.heading, Heading::East);
        assert_eq!((t.row, t.col), (1, 2));
    }

    #[test]
    fn stuck_without_mutation() {
        let rules: RuleTable = "a 1 -> a 0 left".parse().unwrap();
        let mut grid = Grid::new(5);
        let mut t = Turmite::new(&grid);
        let before = (grid.clone(), t);

        let err = t.step(&mut grid, &rules).unwrap_err();

        assert_eq!(
            err,
            StuckError {
                state: 0,
                color: 0,
                row: 2,
                col: 2,
                heading: Heading::North,
            }
        );
        assert_eq!((grid, t), before);
    }

    #[test]
    fn state_changes() {
        let rules: RuleTable = "a 0 -> b 2 backward\nb 0 -> a 0 forward".parse().unwrap();
        let mut grid = Grid::new(3);
        let mut t = Turmite::new(&grid);

        t.step(&mut grid, &rules).unwrap();
        assert_eq!(t.state, 1);
        assert_eq!(t.heading, Heading::South);
        assert_eq!((t.row, t.col), (2, 1));

        t.step(&mut grid, &rules).unwrap();
        assert_eq!(t.state, 0);
        assert_eq!(t.heading, Heading::South);
        assert_eq!((t.row, t.col), (0, 1));
        assert_eq!(grid.get(1, 1), 2);
        assert_eq!(grid.get(2, 1), 0);
    }

    #[test]
    fn walks_off_the_top_edge() {
        let rules: RuleTable = "a 0 -> a 0 f".parse().unwrap();
        let mut grid = Grid::new(3);
        let mut t = Turmite::new(&grid);

        t.step(&mut grid, &rules).unwrap();
        assert_eq!((t.row, t.col), (0, 1));

        t.step(&mut grid, &rules).unwrap();
        assert_eq!((t.row, t.col), (2, 1));
    }
}
