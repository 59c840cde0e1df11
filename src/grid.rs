use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};

pub const MAZE_WIDTH: usize = 19;
pub const MAZE_HEIGHT: usize = 21;

pub const PELLET_SCORE: u32 = 10;
pub const POWER_PELLET_SCORE: u32 = 50;

/// Ghost house rectangle, inclusive on both ends.
pub const GHOST_HOUSE_X: (usize, usize) = (7, 11);
pub const GHOST_HOUSE_Y: (usize, usize) = (8, 12);
pub const GHOST_DOOR: Pos = Pos { x: 9, y: 8 };

#[rustfmt::skip]
const LEVEL_ONE_LAYOUT: [[u8; MAZE_WIDTH]; MAZE_HEIGHT] = [
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
    [0,1,1,1,1,1,1,1,1,0,1,1,1,1,1,1,1,1,0],
    [0,3,0,0,1,0,0,0,1,0,1,0,0,0,1,0,0,3,0],
    [0,1,0,0,1,0,0,0,1,0,1,0,0,0,1,0,0,1,0],
    [0,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,0],
    [0,1,0,0,1,0,1,0,0,0,0,0,1,0,1,0,0,1,0],
    [0,1,1,1,1,0,1,1,1,0,1,1,1,0,1,1,1,1,0],
    [0,0,0,0,1,0,0,0,1,0,1,0,0,0,1,0,0,0,0],
    [2,2,2,0,1,0,1,1,1,1,1,1,1,0,1,0,2,2,2],
    [0,0,0,0,1,0,1,0,0,2,0,0,1,0,1,0,0,0,0],
    [2,2,2,2,1,1,1,0,2,2,2,0,1,1,1,2,2,2,2],
    [0,0,0,0,1,0,1,0,0,0,0,0,1,0,1,0,0,0,0],
    [2,2,2,0,1,0,1,1,1,1,1,1,1,0,1,0,2,2,2],
    [0,0,0,0,1,0,1,0,0,0,0,0,1,0,1,0,0,0,0],
    [0,1,1,1,1,1,1,1,1,0,1,1,1,1,1,1,1,1,0],
    [0,1,0,0,1,0,0,0,1,0,1,0,0,0,1,0,0,1,0],
    [0,3,1,0,1,1,1,1,1,1,1,1,1,1,1,0,1,3,0],
    [0,0,1,0,1,0,1,0,0,0,0,0,1,0,1,0,1,0,0],
    [0,1,1,1,1,0,1,1,1,0,1,1,1,0,1,1,1,1,0],
    [0,1,0,0,0,0,0,0,1,0,1,0,0,0,0,0,0,1,0],
    [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tile {
    Wall,
    Open,
    GhostArea,
    Pellet,
    PowerPellet,
}

impl Tile {
    pub fn is_passable(self) -> bool {
        self != Tile::Wall
    }

    pub fn is_collectible(self) -> bool {
        matches!(self, Tile::Pellet | Tile::PowerPellet)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The mirror image across the vertical centre line.
    pub fn mirrored(self) -> Self {
        Self {
            x: MAZE_WIDTH - 1 - self.x,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dir {
    Right,
    Down,
    Left,
    Up,
}

impl Dir {
    /// Fixed default order: +x, +y, -x, -y.
    pub const ALL: [Dir; 4] = [Dir::Right, Dir::Down, Dir::Left, Dir::Up];

    pub fn delta(self) -> (isize, isize) {
        match self {
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Up => (0, -1),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Right => Dir::Left,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Up => Dir::Down,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    tiles: [[Tile; MAZE_WIDTH]; MAZE_HEIGHT],
}

impl Grid {
    pub fn filled(tile: Tile) -> Self {
        Self {
            tiles: [[tile; MAZE_WIDTH]; MAZE_HEIGHT],
        }
    }

    /// The fixed first-level maze.
    pub fn level_one() -> Self {
        let mut grid = Self::filled(Tile::Wall);
        for (y, row) in LEVEL_ONE_LAYOUT.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let pos = Pos::new(x, y);
                grid.tiles[y][x] = match code {
                    0 => Tile::Wall,
                    1 => Tile::Pellet,
                    3 => Tile::PowerPellet,
                    _ if in_ghost_house(pos) => Tile::GhostArea,
                    _ => Tile::Open,
                };
            }
        }
        grid
    }

    /// Rebuilds a grid from row-major tiles, e.g. a saved maze.
    pub fn from_rows(rows: &[Vec<Tile>]) -> GameResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.len() != MAZE_HEIGHT || rows.iter().any(|row| row.len() != MAZE_WIDTH) {
            return Err(GameError::MazeShape {
                rows: rows.len(),
                cols,
            });
        }
        let mut grid = Self::filled(Tile::Wall);
        for (y, row) in rows.iter().enumerate() {
            grid.tiles[y].copy_from_slice(row);
        }
        Ok(grid)
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.tiles.iter().map(|row| row.to_vec()).collect()
    }

    pub fn width(&self) -> usize {
        MAZE_WIDTH
    }

    pub fn height(&self) -> usize {
        MAZE_HEIGHT
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < MAZE_WIDTH && (y as usize) < MAZE_HEIGHT
    }

    /// Tile at `(x, y)`; anything outside the maze reads as a wall.
    pub fn cell_at(&self, x: isize, y: isize) -> Tile {
        if self.in_bounds(x, y) {
            self.tiles[y as usize][x as usize]
        } else {
            Tile::Wall
        }
    }

    pub fn tile(&self, pos: Pos) -> Tile {
        self.tiles[pos.y][pos.x]
    }

    pub fn is_passable(&self, x: isize, y: isize) -> bool {
        self.cell_at(x, y).is_passable()
    }

    pub fn remaining_collectibles(&self) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| tile.is_collectible())
            .count()
    }

    pub(crate) fn set(&mut self, pos: Pos, tile: Tile) {
        self.tiles[pos.y][pos.x] = tile;
    }

    /// The in-bounds neighbour of `pos` in `dir`.
    pub fn neighbor(&self, pos: Pos, dir: Dir) -> Option<Pos> {
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if self.in_bounds(nx, ny) {
            Some(Pos::new(nx as usize, ny as usize))
        } else {
            None
        }
    }

    /// Like `neighbor`, but only when the destination is passable.
    pub fn step(&self, pos: Pos, dir: Dir) -> GameResult<Pos> {
        let (dx, dy) = dir.delta();
        let nx = pos.x as isize + dx;
        let ny = pos.y as isize + dy;
        if self.is_passable(nx, ny) {
            Ok(Pos::new(nx as usize, ny as usize))
        } else {
            Err(GameError::InvalidMove { x: nx, y: ny })
        }
    }

    /// Turns a pellet cell into plain open floor and reports what was there.
    pub fn consume(&mut self, pos: Pos) -> Option<Tile> {
        let tile = self.tile(pos);
        if tile.is_collectible() {
            self.set(pos, Tile::Open);
            Some(tile)
        } else {
            None
        }
    }

    /// Passable cells reachable from `start` through 4-neighbour moves.
    pub fn reachable_from(&self, start: Pos) -> Vec<Vec<bool>> {
        let mut seen = vec![vec![false; MAZE_WIDTH]; MAZE_HEIGHT];
        if !self.tile(start).is_passable() {
            return seen;
        }
        let mut q = VecDeque::new();
        seen[start.y][start.x] = true;
        q.push_back(start);
        while let Some(pos) = q.pop_front() {
            for dir in Dir::ALL {
                let Some(next) = self.neighbor(pos, dir) else {
                    continue;
                };
                if seen[next.y][next.x] || !self.tile(next).is_passable() {
                    continue;
                }
                seen[next.y][next.x] = true;
                q.push_back(next);
            }
        }
        seen
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        (0..MAZE_HEIGHT).flat_map(|y| (0..MAZE_WIDTH).map(move |x| Pos::new(x, y)))
    }
}

pub fn in_ghost_house(pos: Pos) -> bool {
    pos.x >= GHOST_HOUSE_X.0
        && pos.x <= GHOST_HOUSE_X.1
        && pos.y >= GHOST_HOUSE_Y.0
        && pos.y <= GHOST_HOUSE_Y.1
}

pub fn is_ghost_house_wall(pos: Pos) -> bool {
    in_ghost_house(pos)
        && pos != GHOST_DOOR
        && (pos.x == GHOST_HOUSE_X.0
            || pos.x == GHOST_HOUSE_X.1
            || pos.y == GHOST_HOUSE_Y.0
            || pos.y == GHOST_HOUSE_Y.1)
}
