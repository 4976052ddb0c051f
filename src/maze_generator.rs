//! Map generation

use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{find_path, GoalSet, Grid, Maze, MazeError, Point};

/// Parameters of maze generation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Grid width and height, at least 2
    pub size: usize,
    /// Number of random obstacle placements per candidate
    pub obstacle_density: usize,
    /// Give up after this many unsolvable candidates. `None` retries
    /// until a solvable maze comes up.
    pub max_attempts: Option<usize>,
}

impl GeneratorConfig {
    /// Grid size of the reference game
    pub const REFERENCE_SIZE: usize = 20;
    /// Reference obstacle placements per grid row
    pub const OBSTACLES_PER_ROW: usize = 10;

    /// Configuration with the reference obstacle density of `size * 10`
    /// and no retry ceiling.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            obstacle_density: size * Self::OBSTACLES_PER_ROW,
            max_attempts: None,
        }
    }

    pub fn with_obstacle_density(mut self, obstacle_density: usize) -> Self {
        self.obstacle_density = obstacle_density;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    fn validate(&self) -> Result<(), MazeError> {
        if self.size < 2 {
            return Err(MazeError::InvalidArgument(format!(
                "maze size must be at least 2, got {}",
                self.size
            )));
        }
        if self.max_attempts == Some(0) {
            return Err(MazeError::InvalidArgument(
                "max_attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new(Self::REFERENCE_SIZE)
    }
}

/// Random maze generator
///
/// Owns its random source, so generating with the same seed and the same
/// configuration always yields the same maze.
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        Self::from_rng(if let Some(state) = seed {
            StdRng::seed_from_u64(state)
        } else {
            StdRng::from_entropy()
        })
    }
}

impl<R: Rng> MazeGenerator<R> {
    pub fn from_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a maze that is solvable from [Maze::START]
    ///
    /// Candidates with randomly scattered obstacles are drawn until the
    /// single exit in the opposite corner is reachable from the start.
    /// Unsolvable candidates are discarded silently.
    ///
    /// Returns error, if the configuration is invalid or if
    /// [GeneratorConfig::max_attempts] candidates were all unsolvable.
    pub fn generate(&mut self, config: &GeneratorConfig) -> Result<Maze, MazeError> {
        config.validate()?;
        let exit = Point::new(config.size - 1, config.size - 1);

        let mut attempts = 0;
        loop {
            if config.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(MazeError::GenerationExhausted { attempts });
            }
            attempts += 1;

            let grid = self.scatter_obstacles(config.size, config.obstacle_density, exit)?;
            if find_path(&grid, Maze::START, exit)?.is_some() {
                debug!("Accepted {0}x{0} maze on attempt {1}", config.size, attempts);
                return Maze::new(grid, GoalSet::new(vec![exit])?);
            }
            debug!("Discarded unsolvable candidate {}", attempts);
        }
    }

    /// Block `count` uniformly drawn cells, never the start or the exit.
    fn scatter_obstacles(
        &mut self,
        size: usize,
        count: usize,
        exit: Point,
    ) -> Result<Grid, MazeError> {
        let mut grid = Grid::open(size)?;
        for _ in 0..count {
            let row = self.random.gen_range(0..size);
            let col = self.random.gen_range(0..size);
            let cell = Point::new(row, col);
            if cell != Maze::START && cell != exit {
                grid.set_blocked(cell, true);
            }
        }
        grid.set_blocked(Maze::START, false);
        grid.set_blocked(exit, false);
        Ok(grid)
    }
}
