use std::fmt;

use thiserror::Error;
use tracing::debug;
use tracing::trace;

use crate::ColorId;
use crate::StateId;
use crate::direction::Heading;
use crate::grid::Grid;
use crate::rules::RuleTable;
use crate::turmite::StuckError;
use crate::turmite::Turmite;

pub const DEFAULT_SIZE: usize = 101;
pub const DEFAULT_STEPS: u64 = 6220;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Grid edge length
    pub size: usize,

    /// Number of steps to run
    pub steps: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            steps: DEFAULT_STEPS,
        }
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Turmite got stuck after {steps} steps: {source}")]
pub struct SimulationError {
    /// Steps completed before getting stuck
    pub steps: u64,

    #[source]
    pub source: StuckError,
}

/// Owns the grid, the turmite and its program for the length of a run.
pub struct Simulation {
    rules: RuleTable,
    grid: Grid,
    turmite: Turmite,

    /// Steps taken so far
    steps: u64,
}

impl Simulation {
    /// A blank grid of edge `size` with the turmite at its center.
    pub fn new(rules: RuleTable, size: usize) -> Self {
        let grid = Grid::new(size);
        let turmite = Turmite::new(&grid);

        Self {
            rules,
            grid,
            turmite,
            steps: 0,
        }
    }

    /// Advance the turmite by one step.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        self.turmite
            .step(&mut self.grid, &self.rules)
            .map_err(|source| SimulationError {
                steps: self.steps,
                source,
            })?;

        self.steps += 1;

        trace!(
            step = self.steps,
            row = self.turmite.row,
            col = self.turmite.col,
            state = self.turmite.state,
            "step"
        );

        Ok(())
    }

    /// Run `n` steps, stopping at the first one that has no matching rule.
    ///
    /// Every change made before getting stuck is kept.
    pub fn run(&mut self, n: u64) -> Result<(), SimulationError> {
        debug!(steps = n, size = self.grid.size(), "Running turmite");

        for _ in 0..n {
            self.step()?;
        }

        debug!(steps = self.steps, "Finished run");

        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn turmite(&self) -> &Turmite {
        &self.turmite
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Total number of successful steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn status(&self) -> Status {
        let Turmite {
            row,
            col,
            heading,
            state,
        } = self.turmite;

        Status {
            state,
            color: self.grid.get(row, col),
            heading,
            row,
            col,
        }
    }
}

/// Where the turmite is and what it sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub state: StateId,
    pub color: ColorId,
    pub heading: Heading,
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State: {}, Color: {}, Dir: {}, Pos: ({},{})",
            self.state, self.color, self.heading, self.row, self.col
        )
    }
}

#[cfg(test)]
mod test {
    use super::Simulation;
    use super::SimulationConfig;
    use crate::direction::Heading;
    use crate::rules::RuleTable;

    use proptest::prelude::*;

    const LANGTON: &str = "a 0 -> a 1 right\na 1 -> a 0 left\n";

    #[test]
    fn default_config() {
        let config = SimulationConfig::default();

        assert_eq!(config.size, 101);
        assert_eq!(config.steps, 6220);
    }

    #[test]
    fn two_steps_of_langton() {
        let mut sim = Simulation::new(LANGTON.parse().unwrap(), 3);

        sim.run(2).unwrap();

        insta::assert_snapshot!(sim.grid().to_string(), @r"
        000
        011
        000
        ");
        assert_eq!(sim.steps(), 2);

        let t = sim.turmite();
        assert_eq!((t.row, t.col), (2, 2));
        assert_eq!(t.heading, Heading::South);
    }

    #[test]
    fn stops_when_stuck() {
        let rules: RuleTable = "a 0 -> b 1 right\nb 0 -> c 2 right".parse().unwrap();
        let mut sim = Simulation::new(rules, 5);

        let err = sim.run(10).unwrap_err();

        assert_eq!(err.steps, 2);
        assert_eq!(sim.steps(), 2);
        assert_eq!(err.source.state, 2);
        assert_eq!(err.source.color, 0);
        assert_eq!((err.source.row, err.source.col), (3, 3));

        insta::assert_snapshot!(sim.grid().to_string(), @r"
        00000
        00000
        00120
        00000
        00000
        ");
    }

    #[test]
    fn stuck_on_first_step() {
        let rules: RuleTable = "b 0 -> a 1 right".parse().unwrap();
        let mut sim = Simulation::new(rules, 7);

        let err = sim.run(100).unwrap_err();

        assert_eq!(err.steps, 0);
        assert_eq!(sim.grid().max_color(), 0);
    }

    #[test]
    fn zero_steps() {
        let mut sim = Simulation::new(LANGTON.parse().unwrap(), 5);

        sim.run(0).unwrap();

        assert_eq!(sim.steps(), 0);
        assert_eq!(
            sim.status().to_string(),
            "State: 0, Color: 0, Dir: north, Pos: (2,2)"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn runs_are_deterministic(size in 1usize..40, steps in 0u64..2000) {
            let rules: RuleTable = "a 0 -> b 1 left\na 1 -> b 1 left\nb 0 -> b 1 right\nb 1 -> a 0 f"
                .parse()
                .unwrap();

            let mut a = Simulation::new(rules.clone(), size);
            let mut b = Simulation::new(rules, size);

            a.run(steps).unwrap();
            b.run(steps).unwrap();

            prop_assert_eq!(a.grid(), b.grid());
            prop_assert_eq!(a.turmite(), b.turmite());
        }
    }
}
