//! Emoji presentation of a maze and its hint trail
//!
//! Everything here only reads a [Maze]; the player position lives in the
//! [Scene] next to it and only changes through [Scene::step].

use std::fmt;
use std::thread;
use std::time::Duration;

use itertools::Itertools;

use crate::{Direction, GoalSet, Grid, Maze, MazeError, Point};

/// Maze together with the current player position
pub struct Scene {
    pub maze: Maze,
    player: Point,
}

/// Outcome of a hint request
pub enum HintReport {
    /// Route to the nearest exit, including the player cell
    Route(Vec<Point>),
    /// The nearest exit cannot be reached, other exits are not searched
    NoRoute,
}

impl Scene {
    const S_PLAYER: char = '🏃';
    const S_GOAL: char = '❎';
    const S_VALID: char = '🟩';
    const S_WALL: char = '🟫';
    const S_HINT: char = '🟨';

    /// Player standing at [Maze::START]
    pub fn from_maze(maze: Maze) -> Self {
        Self {
            maze,
            player: Maze::START,
        }
    }

    /// Parse scene from its emoji representation
    ///
    /// - `emojis`: one line per grid row. Walls are 🟫, free squares 🟩,
    ///   exits ❎ and the player 🏃. Without a player, the player starts at
    ///   [Maze::START].
    ///
    /// Returns error, if the maze contains unknown characters, is not
    /// square, has no exit or has several players.
    ///
    /// # Examples
    /// ```
    /// use maze_hint::render::Scene;
    /// let maze_emojis = "
    /// 🟩🟩🟫
    /// 🟫🏃🟫
    /// 🟫🟩❎";
    /// let scene = Scene::parse_emojis(maze_emojis.trim()).unwrap();
    /// assert_eq!(scene.player(), maze_hint::Point::new(1, 1));
    /// ```
    pub fn parse_emojis(emojis: &str) -> Result<Self, MazeError> {
        let mut player = None;
        let mut goals = Vec::new();

        let blocked = emojis
            .split('\n')
            .enumerate()
            .map(|(row, line)| {
                line.trim_end()
                    .chars()
                    .enumerate()
                    .map(|(col, c)| match c {
                        Self::S_WALL => Ok(true),
                        Self::S_VALID => Ok(false),
                        Self::S_GOAL => {
                            goals.push(Point::new(row, col));
                            Ok(false)
                        }
                        Self::S_PLAYER => match player.replace(Point::new(row, col)) {
                            None => Ok(false),
                            Some(first) => Err(MazeError::InvalidArgument(format!(
                                "second player at {}, first one at {}",
                                Point::new(row, col),
                                first
                            ))),
                        },
                        symbol => Err(MazeError::UnexpectedSymbol { symbol, row, col }),
                    })
                    .collect::<Result<Vec<bool>, MazeError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let maze = Maze::new(Grid::from_rows(blocked)?, GoalSet::new(goals)?)?;
        Ok(Self {
            maze,
            player: player.unwrap_or(Maze::START),
        })
    }

    pub fn player(&self) -> Point {
        self.player
    }

    /// Move the player one cell
    ///
    /// Returns `false` and stays put, if the target cell is a wall or
    /// outside the maze.
    pub fn step(&mut self, dir: Direction) -> bool {
        match self.player.step(dir) {
            Some(next) if self.maze.grid().is_passable(next) => {
                self.player = next;
                true
            }
            _ => false,
        }
    }

    /// Player has reached an exit
    pub fn is_victory(&self) -> bool {
        self.maze.is_goal(self.player)
    }

    /// Ask the maze for the route from the player to the nearest exit.
    pub fn hint(&self) -> Result<HintReport, MazeError> {
        Ok(match self.maze.hint(self.player)? {
            Some(path) => HintReport::Route(path),
            None => HintReport::NoRoute,
        })
    }

    /// Draw the scene, one emoji per cell
    ///
    /// Cells of `hint` after its first one are drawn as a trail, except
    /// where the player or an exit stands.
    pub fn render(&self, hint: Option<&[Point]>) -> String {
        let trail = hint.and_then(|path| path.get(1..)).unwrap_or(&[]);
        self.render_with(self.player, trail)
    }

    fn render_with(&self, player: Point, trail: &[Point]) -> String {
        self.maze
            .grid()
            .rows()
            .enumerate()
            .map(|(row, cells)| {
                cells
                    .iter()
                    .enumerate()
                    .map(|(col, &blocked)| {
                        let p = Point::new(row, col);
                        if p == player {
                            Self::S_PLAYER
                        } else if self.maze.is_goal(p) {
                            Self::S_GOAL
                        } else if blocked {
                            Self::S_WALL
                        } else if trail.contains(&p) {
                            Self::S_HINT
                        } else {
                            Self::S_VALID
                        }
                    })
                    .join("")
            })
            .join("\n")
    }

    /// Walk the player along `path` on the terminal
    ///
    /// ## Arguments
    /// - `path`: Route to follow, starting at the player cell.
    /// - `step_ms`: Time step for each frame, milliseconds.
    pub fn playback(&self, path: &[Point], step_ms: usize) {
        fn print_frame(frame: &str) {
            print!("\x1B[2J\x1B[1;1H");
            println!("{}", frame);
        }

        print_frame(&self.render(Some(path)));
        for (i, &position) in path.iter().enumerate().skip(1) {
            thread::sleep(Duration::from_millis(step_ms as u64));
            print_frame(&self.render_with(position, &path[i + 1..]));
        }
    }
}

impl HintReport {
    /// Print report
    pub fn print_report(&self) {
        println!("{}", self)
    }
}

impl fmt::Display for HintReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintReport::Route(path) => {
                write!(f, "The nearest exit is {} steps away.", path.len() - 1)
            }
            HintReport::NoRoute => write!(f, "No route to the nearest exit."),
        }
    }
}
