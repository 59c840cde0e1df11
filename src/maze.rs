//! Procedural maze generation for every level after the first.
//!
//! The left half is carved with a recursive backtracker on a step-2 lattice,
//! mirrored onto the right half, and the ghost house is stamped into the
//! middle. Random extra openings add loops, then a fixed corridor and a
//! flood-fill repair make sure the seeker spawn reaches every open cell.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use crate::agent::{ROSTER, SEEKER_SPAWN};
use crate::grid::{
    is_ghost_house_wall, Dir, Grid, Pos, Tile, GHOST_DOOR, GHOST_HOUSE_X, GHOST_HOUSE_Y, MAZE_HEIGHT,
    MAZE_WIDTH,
};

/// Carving stays left of this column; the rest is mirrored.
const HALF_LIMIT: usize = 9;
const CENTER_LEFT: usize = 8;
const EXTRA_OPENINGS: usize = 20;
const MAX_ATTEMPTS: usize = 16;
const LATTICE_STEPS: [(isize, isize); 4] = [(2, 0), (0, 2), (-2, 0), (0, -2)];

/// Maze for `level`: the fixed layout on level 1, a generated one afterwards.
pub fn maze_for_level(level: u32, rng: &mut impl Rng) -> Grid {
    if level <= 1 {
        Grid::level_one()
    } else {
        generate_maze(rng)
    }
}

pub fn generate_maze(rng: &mut impl Rng) -> Grid {
    let mut last = None;
    for attempt in 1..=MAX_ATTEMPTS {
        let grid = generate_candidate(rng);
        if is_fully_connected(&grid) {
            debug!(attempt, collectibles = grid.remaining_collectibles(), "maze generated");
            return grid;
        }
        debug!(attempt, "generated maze failed the connectivity check");
        last = Some(grid);
    }
    warn!("no fully connected maze after {MAX_ATTEMPTS} attempts, using the last one");
    last.unwrap_or_else(Grid::level_one)
}

fn generate_candidate(rng: &mut impl Rng) -> Grid {
    let mut grid = carve_layout(rng);
    punch_openings(&mut grid, rng);
    open_spawn_corridor(&mut grid);
    ensure_connected(&mut grid);
    place_collectibles(&mut grid);
    grid
}

/// Backtracker carving, mirroring and the ghost house. The result is
/// left-right symmetric.
pub fn carve_layout(rng: &mut impl Rng) -> Grid {
    let mut grid = Grid::filled(Tile::Wall);
    carve_left_half(&mut grid, rng);
    mirror_left_half(&mut grid);
    carve_ghost_house(&mut grid);
    grid
}

fn carve_left_half(grid: &mut Grid, rng: &mut impl Rng) {
    let start = Pos::new(1, 1);
    grid.set(start, Tile::Open);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {
        let mut neighbors = Vec::new();
        for (dx, dy) in LATTICE_STEPS {
            let nx = current.x as isize + dx;
            let ny = current.y as isize + dy;
            if nx < 1 || nx >= HALF_LIMIT as isize || ny < 1 || ny >= (MAZE_HEIGHT - 1) as isize {
                continue;
            }
            let next = Pos::new(nx as usize, ny as usize);
            if grid.tile(next) == Tile::Wall {
                neighbors.push(next);
            }
        }

        match neighbors.choose(rng) {
            Some(&next) => {
                let between = Pos::new((current.x + next.x) / 2, (current.y + next.y) / 2);
                grid.set(between, Tile::Open);
                grid.set(next, Tile::Open);
                stack.push(next);
            }
            None => {
                stack.pop();
            }
        }
    }
}

fn mirror_left_half(grid: &mut Grid) {
    for y in 0..MAZE_HEIGHT {
        for x in 0..HALF_LIMIT {
            let pos = Pos::new(x, y);
            grid.set(pos.mirrored(), grid.tile(pos));
        }
        if grid.tile(Pos::new(CENTER_LEFT, y)) == Tile::Open {
            grid.set(Pos::new(CENTER_LEFT + 1, y), Tile::Open);
            grid.set(Pos::new(CENTER_LEFT + 2, y), Tile::Open);
        }
    }
}

fn carve_ghost_house(grid: &mut Grid) {
    for y in GHOST_HOUSE_Y.0..=GHOST_HOUSE_Y.1 {
        for x in GHOST_HOUSE_X.0..=GHOST_HOUSE_X.1 {
            let pos = Pos::new(x, y);
            let tile = if is_ghost_house_wall(pos) {
                Tile::Wall
            } else {
                Tile::GhostArea
            };
            grid.set(pos, tile);
        }
    }
    grid.set(GHOST_DOOR, Tile::GhostArea);
}

/// Knocks out random interior walls to add loops. The outer border is never touched.
fn punch_openings(grid: &mut Grid, rng: &mut impl Rng) {
    for _ in 0..EXTRA_OPENINGS {
        let pos = Pos::new(
            rng.gen_range(2..=MAZE_WIDTH - 3),
            rng.gen_range(2..=MAZE_HEIGHT - 3),
        );
        if grid.tile(pos) == Tile::Wall {
            grid.set(pos, Tile::Open);
        }
    }
}

/// Vertical corridor from the ghost house floor down past the seeker spawn.
fn open_spawn_corridor(grid: &mut Grid) {
    for y in GHOST_HOUSE_Y.1..=SEEKER_SPAWN.y + 1 {
        if y < MAZE_HEIGHT - 1 {
            grid.set(Pos::new(SEEKER_SPAWN.x, y), Tile::Open);
        }
    }
    grid.set(Pos::new(SEEKER_SPAWN.x - 1, SEEKER_SPAWN.y), Tile::Open);
    grid.set(Pos::new(SEEKER_SPAWN.x + 1, SEEKER_SPAWN.y), Tile::Open);
}

/// Opens bridging walls until every passable cell is reachable from the spawn,
/// then walls in any pocket that is still cut off.
fn ensure_connected(grid: &mut Grid) {
    let mut reachable = grid.reachable_from(SEEKER_SPAWN);
    let mut iterations = 0;
    while has_unreachable(grid, &reachable) && iterations < MAZE_WIDTH * MAZE_HEIGHT {
        let Some(bridge) = find_bridge(grid, &reachable) else {
            break;
        };
        grid.set(bridge, Tile::Open);
        reachable = grid.reachable_from(SEEKER_SPAWN);
        iterations += 1;
    }
    if iterations > 0 {
        debug!(bridges = iterations, "repaired maze connectivity");
    }
    seal_unreachable(grid, &reachable);
}

/// Walls off whatever a single-wall bridge could not join.
fn seal_unreachable(grid: &mut Grid, reachable: &[Vec<bool>]) {
    let stranded: Vec<Pos> = grid
        .positions()
        .filter(|pos| grid.tile(*pos).is_passable() && !reachable[pos.y][pos.x])
        .collect();
    if !stranded.is_empty() {
        debug!(cells = stranded.len(), "sealed stranded cells");
    }
    for pos in stranded {
        grid.set(pos, Tile::Wall);
    }
}

fn find_bridge(grid: &Grid, reachable: &[Vec<bool>]) -> Option<Pos> {
    for y in 1..MAZE_HEIGHT - 1 {
        for x in 1..MAZE_WIDTH - 1 {
            let pos = Pos::new(x, y);
            if grid.tile(pos) != Tile::Wall || is_ghost_house_wall(pos) {
                continue;
            }
            let mut has_reach = false;
            let mut has_unreach = false;
            for next in Dir::ALL.iter().filter_map(|&dir| grid.neighbor(pos, dir)) {
                if !grid.tile(next).is_passable() {
                    continue;
                }
                if reachable[next.y][next.x] {
                    has_reach = true;
                } else {
                    has_unreach = true;
                }
            }
            if has_reach && has_unreach {
                return Some(pos);
            }
        }
    }
    None
}

fn has_unreachable(grid: &Grid, reachable: &[Vec<bool>]) -> bool {
    grid.positions()
        .any(|pos| grid.tile(pos).is_passable() && !reachable[pos.y][pos.x])
}

fn place_collectibles(grid: &mut Grid) {
    for pos in grid.positions().collect::<Vec<_>>() {
        if grid.tile(pos) != Tile::Open {
            continue;
        }
        let corner_x = pos.x < 2 || pos.x > MAZE_WIDTH - 3;
        let corner_y = pos.y < 3 || pos.y > MAZE_HEIGHT - 4;
        let tile = if corner_x && corner_y {
            Tile::PowerPellet
        } else {
            Tile::Pellet
        };
        grid.set(pos, tile);
    }
}

/// Every passable cell, every chaser home and the spawn share one region.
pub fn is_fully_connected(grid: &Grid) -> bool {
    if !grid.tile(SEEKER_SPAWN).is_passable() {
        return false;
    }
    let reachable = grid.reachable_from(SEEKER_SPAWN);
    let homes_ok = ROSTER
        .iter()
        .all(|spec| reachable[spec.home.y][spec.home.x]);
    homes_ok && !has_unreachable(grid, &reachable)
}
