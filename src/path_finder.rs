//! Shortest paths on the maze grid

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use log::trace;

use crate::{manhattan_distance, Grid, MazeError, Path, Point};

/// Find the shortest 4-connected path from `start` to `goal` with A*.
///
/// Every step costs 1 and the heuristic is the Manhattan distance, so the
/// returned path is a true shortest path. Frontier entries with equal
/// estimate are expanded in [Point] order, which makes the result
/// depend on the grid and the endpoints only.
///
/// Returns `Ok(None)` when `goal` cannot be reached, and error if either
/// endpoint lies outside the grid. A blocked endpoint is never part of a
/// path, unless `start == goal`.
///
/// # Examples
/// ```
/// use maze_hint::{find_path, Grid, Point};
///
/// let grid = Grid::open(3).unwrap();
/// let path = find_path(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
/// assert_eq!(path.map(|p| p.len()), Some(5));
/// ```
pub fn find_path(grid: &Grid, start: Point, goal: Point) -> Result<Option<Path>, MazeError> {
    grid.ensure_contains(start, "start")?;
    grid.ensure_contains(goal, "goal")?;

    if start == goal {
        return Ok(Some(vec![start]));
    }
    if !grid.is_passable(start) || !grid.is_passable(goal) {
        return Ok(None);
    }

    let mut open = BinaryHeap::new();
    open.push(Reverse((manhattan_distance(start, goal), start)));
    let mut g_score: HashMap<Point, usize> = HashMap::from([(start, 0)]);
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut expanded = 0;

    while let Some(Reverse((f, current))) = open.pop() {
        let current_g = g_score[&current];
        // Skip stale entries, a cheaper route was recorded after the push
        if f > current_g + manhattan_distance(current, goal) {
            continue;
        }
        if current == goal {
            trace!("A* reached {} after {} expansions", goal, expanded);
            return Ok(Some(reconstruct(&came_from, goal)));
        }
        expanded += 1;

        for next in grid.neighbors(current) {
            let new_g = current_g + 1;
            if g_score.get(&next).map_or(true, |&g| new_g < g) {
                g_score.insert(next, new_g);
                came_from.insert(next, current);
                open.push(Reverse((new_g + manhattan_distance(next, goal), next)));
            }
        }
    }

    trace!("A* exhausted frontier after {} expansions", expanded);
    Ok(None)
}

/// Follow predecessor links back from `goal`, then reverse.
fn reconstruct(came_from: &HashMap<Point, Point>, goal: Point) -> Path {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Pick the goal closest to `position` by Manhattan distance.
///
/// On ties, the first goal in `goals` wins. Returns error if `goals` is
/// empty.
pub fn nearest_goal(position: Point, goals: &[Point]) -> Result<Point, MazeError> {
    goals
        .iter()
        .copied()
        .min_by_key(|&goal| manhattan_distance(position, goal))
        .ok_or_else(|| MazeError::InvalidArgument("no goals to choose from".to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::path_finder::{find_path, nearest_goal};
    use crate::{grid_from_ascii, Grid, MazeError, Point};

    /// Reference distance by breadth-first search
    fn bfs_distance(grid: &Grid, start: Point, goal: Point) -> Option<usize> {
        let mut dist = vec![vec![None; grid.size()]; grid.size()];
        dist[start.row][start.col] = Some(0);
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            let d = dist[p.row][p.col]?;
            if p == goal {
                return Some(d);
            }
            for n in grid.neighbors(p) {
                if dist[n.row][n.col].is_none() {
                    dist[n.row][n.col] = Some(d + 1);
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn assert_valid_path(grid: &Grid, path: &[Point], start: Point, goal: Point) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        for step in path.windows(2) {
            assert_eq!(crate::manhattan_distance(step[0], step[1]), 1);
            assert!(grid.is_passable(step[1]));
        }
    }

    #[test]
    fn open_grid_breaks_ties_by_point_order() {
        let grid = Grid::open(3).unwrap();
        let path = find_path(&grid, Point::new(0, 0), Point::new(2, 2))
            .unwrap()
            .unwrap();
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2)
            ]
        );
    }

    #[test]
    fn walled_off_start_has_no_path() {
        let grid = grid_from_ascii(&[
            ".##", //
            "###", //
            "###",
        ]);
        let res = find_path(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(res, None);
    }

    #[test]
    fn path_to_self_is_single_cell() {
        let grid = grid_from_ascii(&[
            ".#", //
            "#.",
        ]);
        for p in [Point::new(0, 0), Point::new(1, 1), Point::new(0, 1)] {
            assert_eq!(find_path(&grid, p, p).unwrap(), Some(vec![p]));
        }
    }

    #[test]
    fn blocked_endpoints_are_not_found() {
        let grid = grid_from_ascii(&[
            "#..", //
            "...", //
            "..#",
        ]);
        assert_eq!(
            find_path(&grid, Point::new(0, 0), Point::new(1, 1)).unwrap(),
            None
        );
        assert_eq!(
            find_path(&grid, Point::new(1, 1), Point::new(2, 2)).unwrap(),
            None
        );
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let grid = Grid::open(3).unwrap();
        let res = find_path(&grid, Point::new(0, 3), Point::new(0, 0));
        assert!(matches!(res, Err(MazeError::InvalidArgument(_))));
        let res = find_path(&grid, Point::new(0, 0), Point::new(7, 0));
        assert!(matches!(res, Err(MazeError::InvalidArgument(_))));
    }

    #[test]
    fn path_goes_around_walls() {
        let grid = grid_from_ascii(&[
            ".#...", //
            ".#.#.", //
            ".#.#.", //
            "...#.", //
            "####.",
        ]);
        let start = Point::new(0, 0);
        let goal = Point::new(4, 4);
        let path = find_path(&grid, start, goal).unwrap().unwrap();
        assert_valid_path(&grid, &path, start, goal);
        assert_eq!(path.len() - 1, 14);
    }

    #[test]
    fn length_matches_breadth_first_search() {
        let mut random = StdRng::seed_from_u64(13);
        for _ in 0..200 {
            let size = random.gen_range(2..12);
            let rows: Vec<Vec<bool>> = (0..size)
                .map(|_| (0..size).map(|_| random.gen_bool(0.3)).collect())
                .collect();
            let grid = Grid::from_rows(rows).unwrap();
            let start = Point::new(random.gen_range(0..size), random.gen_range(0..size));
            let goal = Point::new(random.gen_range(0..size), random.gen_range(0..size));
            if !grid.is_passable(start) {
                continue;
            }

            let path = find_path(&grid, start, goal).unwrap();
            let expected = bfs_distance(&grid, start, goal);
            assert_eq!(path.as_ref().map(|p| p.len() - 1), expected);
            if let Some(path) = path {
                assert_valid_path(&grid, &path, start, goal);
            }
        }
    }

    #[test]
    fn repeated_searches_are_identical() {
        let grid = grid_from_ascii(&[
            "......", //
            ".#..#.", //
            "......", //
            "..##..", //
            "......", //
            "......",
        ]);
        let start = Point::new(5, 0);
        let goal = Point::new(0, 5);
        let first = find_path(&grid, start, goal).unwrap();
        for _ in 0..10 {
            assert_eq!(find_path(&grid, start, goal).unwrap(), first);
        }
    }

    #[test]
    fn nearest_goal_prefers_first_on_tie() {
        let goals = [Point::new(0, 4), Point::new(4, 0), Point::new(1, 1)];
        assert_eq!(
            nearest_goal(Point::new(2, 2), &goals).unwrap(),
            Point::new(1, 1)
        );
        // (0,4) and (4,0) are both 4 away from the origin
        let goals = [Point::new(0, 4), Point::new(4, 0)];
        assert_eq!(
            nearest_goal(Point::new(0, 0), &goals).unwrap(),
            Point::new(0, 4)
        );
        let goals = [Point::new(4, 0), Point::new(0, 4)];
        assert_eq!(
            nearest_goal(Point::new(0, 0), &goals).unwrap(),
            Point::new(4, 0)
        );
    }

    #[test]
    fn nearest_goal_requires_goals() {
        let res = nearest_goal(Point::new(0, 0), &[]);
        assert!(matches!(res, Err(MazeError::InvalidArgument(_))));
    }
}
