//! Solvable random grid mazes with shortest-path hints
//!
//! A [Maze] is a square grid of passable and blocked cells together with
//! a set of exit cells. Mazes are produced by
//! [maze_generator::MazeGenerator], which scatters obstacles at random and
//! throws away every candidate where the exit cannot be reached from
//! [Maze::START]. Hints are shortest paths computed by [find_path] towards
//! the exit picked by [nearest_goal].
//!
//! # Examples
//! ## Generate a maze and ask for a hint
//! ```
//! use maze_hint::maze_generator::{GeneratorConfig, MazeGenerator};
//! use maze_hint::Maze;
//!
//! let mut gen = MazeGenerator::new(Some(7));
//! let maze = gen.generate(&GeneratorConfig::new(10)).unwrap();
//! let hint = maze.hint(Maze::START).unwrap().unwrap();
//! assert_eq!(hint.first(), Some(&Maze::START));
//! assert!(maze.is_goal(*hint.last().unwrap()));
//! ```
//!
//! ## Hint in a hand-drawn maze (4 steps)
//! ```
//! use maze_hint::render::Scene;
//!
//! let maze_emojis = "
//! 🏃🟩🟫
//! 🟫🟩🟫
//! 🟫🟩❎";
//! let scene = Scene::parse_emojis(maze_emojis.trim()).unwrap();
//! let hint = scene.maze.hint(scene.player()).unwrap().unwrap();
//! assert_eq!(hint.len() - 1, 4);
//! ```

use std::fmt;

use log::debug;

mod error;
pub mod maze_generator;
mod path_finder;
pub mod render;

pub use error::MazeError;
pub use path_finder::{find_path, nearest_goal};

/// Location in the maze
///
/// Points are ordered by row first, then by column. Path search relies on
/// this order to break ties.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Adjacent point in direction `dir`, `None` past row or column 0.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.offset();
        Some(Self::new(
            self.row.checked_add_signed(dr)?,
            self.col.checked_add_signed(dc)?,
        ))
    }
}

/// One of the four grid moves
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Neighbor expansion order of path search
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// (row, col) delta
    fn offset(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = MazeError;

    /// Parse move letter `R`, `D`, `L` or `U` (any case).
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'R' => Ok(Direction::Right),
            'D' => Ok(Direction::Down),
            'L' => Ok(Direction::Left),
            'U' => Ok(Direction::Up),
            _ => Err(MazeError::InvalidArgument(format!(
                "unknown move `{}`, expected one of R, D, L, U",
                c
            ))),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan_distance(a: Point, b: Point) -> usize {
    a.row.abs_diff(b.row) + a.col.abs_diff(b.col)
}

/// Ordered cells from the search start to the search goal, both included.
pub type Path = Vec<Point>;

/// Square passability matrix
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// `blocked[row][col]`
    blocked: Vec<Vec<bool>>,
}

impl Grid {
    /// All-passable grid of `size` × `size` cells.
    pub fn open(size: usize) -> Result<Self, MazeError> {
        if size == 0 {
            return Err(MazeError::InvalidArgument(
                "grid size must be positive".to_string(),
            ));
        }
        Ok(Self {
            blocked: vec![vec![false; size]; size],
        })
    }

    /// Build grid from rows of `blocked` flags.
    ///
    /// Returns error, if the rows do not form a non-empty square.
    pub fn from_rows(blocked: Vec<Vec<bool>>) -> Result<Self, MazeError> {
        let size = blocked.len();
        if size == 0 {
            return Err(MazeError::InvalidArgument("grid has no rows".to_string()));
        }
        if let Some((row, cells)) = blocked.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(MazeError::InvalidArgument(format!(
                "grid is not square: row {} has {} cells, expected {}",
                row,
                cells.len(),
                size
            )));
        }
        Ok(Self { blocked })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.blocked.len()
    }

    pub fn contains(&self, p: Point) -> bool {
        p.row < self.size() && p.col < self.size()
    }

    /// In bounds and not blocked
    pub fn is_passable(&self, p: Point) -> bool {
        self.contains(p) && !self.blocked[p.row][p.col]
    }

    /// Rows of `blocked` flags, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.blocked.iter().map(Vec::as_slice)
    }

    /// Passable 4-connected neighbors of `p`, in the order right, down,
    /// left, up.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            let n = p.step(dir)?;
            self.is_passable(n).then_some(n)
        })
    }

    pub(crate) fn set_blocked(&mut self, p: Point, blocked: bool) {
        self.blocked[p.row][p.col] = blocked;
    }

    fn ensure_contains(&self, p: Point, what: &str) -> Result<(), MazeError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(MazeError::InvalidArgument(format!(
                "{} {} is outside the {}x{} grid",
                what,
                p,
                self.size(),
                self.size()
            )))
        }
    }
}

/// Non-empty ordered collection of exit cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoalSet(Vec<Point>);

impl GoalSet {
    pub fn new(goals: Vec<Point>) -> Result<Self, MazeError> {
        if goals.is_empty() {
            return Err(MazeError::InvalidArgument(
                "goal set must not be empty".to_string(),
            ));
        }
        Ok(Self(goals))
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.0.contains(&p)
    }
}

/// Grid with designated exits
///
/// Mazes are read-only once built. A maze coming out of
/// [maze_generator::MazeGenerator] always has a route from [Maze::START]
/// to an exit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    grid: Grid,
    goals: GoalSet,
}

impl Maze {
    /// Fixed start cell of every maze
    pub const START: Point = Point::new(0, 0);

    /// Attach exits to a grid.
    ///
    /// Returns error, if an exit lies outside the grid or on a blocked cell.
    pub fn new(grid: Grid, goals: GoalSet) -> Result<Self, MazeError> {
        for &goal in goals.iter() {
            grid.ensure_contains(goal, "goal")?;
            if !grid.is_passable(goal) {
                return Err(MazeError::InvalidArgument(format!(
                    "goal {} is a blocked cell",
                    goal
                )));
            }
        }
        Ok(Self { grid, goals })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn goals(&self) -> &GoalSet {
        &self.goals
    }

    pub fn is_goal(&self, p: Point) -> bool {
        self.goals.contains(p)
    }

    /// Shortest route from `position` to the nearest exit
    ///
    /// The exit is chosen by Manhattan distance with [nearest_goal], then
    /// the route is searched with [find_path]. `Ok(None)` means that the
    /// chosen exit is not reachable from `position`.
    pub fn hint(&self, position: Point) -> Result<Option<Path>, MazeError> {
        let target = nearest_goal(position, self.goals.as_slice())?;
        debug!("Hint from {} towards exit {}", position, target);
        find_path(&self.grid, position, target)
    }
}

/// Build a grid from ASCII art: `#` is blocked, anything else is passable.
#[cfg(test)]
pub(crate) fn grid_from_ascii(rows: &[&str]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect(),
    )
    .unwrap()
}

#[cfg(test)]
mod tests {
    use crate::{
        grid_from_ascii, manhattan_distance, Direction, GoalSet, Grid, Maze, MazeError, Point,
    };

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Point::new(1, 7);
        let b = Point::new(4, 2);
        assert_eq!(manhattan_distance(a, b), 8);
        assert_eq!(manhattan_distance(b, a), 8);
        assert_eq!(manhattan_distance(a, a), 0);
    }

    #[test]
    fn points_order_by_row_then_column() {
        assert!(Point::new(0, 5) < Point::new(1, 0));
        assert!(Point::new(2, 1) < Point::new(2, 3));
    }

    #[test]
    fn parse_move_letters() {
        let moves: Vec<_> = "RdLu".chars().map(Direction::try_from).collect();
        assert_eq!(
            moves,
            vec![
                Ok(Direction::Right),
                Ok(Direction::Down),
                Ok(Direction::Left),
                Ok(Direction::Up)
            ]
        );
        assert!(matches!(
            Direction::try_from('x'),
            Err(MazeError::InvalidArgument(_))
        ));
        assert_eq!(Point::new(0, 3).step(Direction::Up), None);
        assert_eq!(Point::new(0, 3).step(Direction::Left), Some(Point::new(0, 2)));
    }

    #[test]
    fn reject_non_square_grid() {
        let res = Grid::from_rows(vec![vec![false, false], vec![false]]);
        assert!(matches!(res, Err(MazeError::InvalidArgument(_))));
        assert!(Grid::open(0).is_err());
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let grid = grid_from_ascii(&[
            "..#", //
            "#..", //
            "...",
        ]);
        let from_corner: Vec<_> = grid.neighbors(Point::new(0, 0)).collect();
        assert_eq!(from_corner, vec![Point::new(0, 1)]);

        let from_center: Vec<_> = grid.neighbors(Point::new(1, 1)).collect();
        assert_eq!(
            from_center,
            vec![Point::new(1, 2), Point::new(2, 1), Point::new(0, 1)]
        );
    }

    #[test]
    fn maze_rejects_blocked_or_distant_goals() {
        let grid = grid_from_ascii(&[
            "..", //
            ".#",
        ]);
        let blocked = GoalSet::new(vec![Point::new(1, 1)]).unwrap();
        assert!(Maze::new(grid.clone(), blocked).is_err());

        let outside = GoalSet::new(vec![Point::new(5, 0)]).unwrap();
        assert!(Maze::new(grid, outside).is_err());

        assert!(GoalSet::new(vec![]).is_err());
    }

    #[test]
    fn hint_goes_to_the_nearest_exit() {
        let grid = grid_from_ascii(&[
            "....", //
            ".##.", //
            "....", //
            "....",
        ]);
        let goals = GoalSet::new(vec![Point::new(3, 3), Point::new(0, 3)]).unwrap();
        let maze = Maze::new(grid, goals).unwrap();

        let hint = maze.hint(Point::new(0, 1)).unwrap().unwrap();
        assert_eq!(
            hint,
            vec![Point::new(0, 1), Point::new(0, 2), Point::new(0, 3)]
        );
    }
}
