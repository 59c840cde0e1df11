//! Greedy one-step direction choice for chasers. No path search: the chaser
//! ranks the four directions by a target vector and takes the first open one.

use rand::Rng;
use tracing::trace;

use crate::agent::{Chaser, Personality};
use crate::grid::{Dir, Grid, Pos};

/// Vector the chaser wants to travel along this decision.
pub fn target_vector(chaser: &Chaser, seeker: Pos, rng: &mut impl Rng) -> (isize, isize) {
    let (cx, cy) = (chaser.pos.x as isize, chaser.pos.y as isize);
    let (sx, sy) = (seeker.x as isize, seeker.y as isize);

    if chaser.scared {
        return (cx - sx, cy - sy);
    }
    if chaser.scatter {
        let corner = chaser.scatter_corner().pos();
        return (corner.x as isize - cx, corner.y as isize - cy);
    }
    match chaser.personality() {
        Personality::Chase => (sx - cx, sy - cy),
        Personality::Ambush => (
            sx - cx + rng.gen_range(-3..=3),
            sy - cy + rng.gen_range(-3..=3),
        ),
        Personality::Random => (rng.gen_range(-1..=1), rng.gen_range(-1..=1)),
        Personality::Patrol => (rng.gen_range(-2..=2), rng.gen_range(-2..=2)),
    }
}

/// Directions to try, dominant axis first and its reverse last.
pub fn priority(dx: isize, dy: isize) -> [Dir; 4] {
    if dx.abs() > dy.abs() {
        if dx > 0 {
            [Dir::Right, Dir::Down, Dir::Up, Dir::Left]
        } else {
            [Dir::Left, Dir::Down, Dir::Up, Dir::Right]
        }
    } else if dy > 0 {
        [Dir::Down, Dir::Right, Dir::Left, Dir::Up]
    } else {
        [Dir::Up, Dir::Right, Dir::Left, Dir::Down]
    }
}

/// First passable direction for `(dx, dy)`, falling back to the default order.
pub fn pick_direction(grid: &Grid, from: Pos, dx: isize, dy: isize) -> Option<Dir> {
    priority(dx, dy)
        .into_iter()
        .chain(Dir::ALL)
        .find(|&dir| grid.step(from, dir).is_ok())
}

/// Re-evaluates the chaser's heading and advances it one cell when possible.
pub fn advance(chaser: &mut Chaser, seeker: Pos, grid: &Grid, rng: &mut impl Rng) {
    let (dx, dy) = target_vector(chaser, seeker, rng);
    let Some(dir) = pick_direction(grid, chaser.pos, dx, dy) else {
        trace!(pos = ?chaser.pos, "chaser boxed in");
        return;
    };
    if let Ok(next) = grid.step(chaser.pos, dir) {
        trace!(personality = ?chaser.personality(), from = ?chaser.pos, ?dir, "chaser step");
        chaser.pos = next;
        chaser.facing = dir;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::ROSTER;
    use crate::grid::Tile;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn open_grid() -> Grid {
        let mut grid = Grid::filled(Tile::Open);
        for pos in grid.positions().collect::<Vec<_>>() {
            if pos.x == 0 || pos.y == 0 || pos.x == grid.width() - 1 || pos.y == grid.height() - 1 {
                grid.set(pos, Tile::Wall);
            }
        }
        grid
    }

    fn chaser_at(index: usize, pos: Pos) -> Chaser {
        let mut chaser = Chaser::new(ROSTER[index]);
        chaser.pos = pos;
        chaser
    }

    #[test]
    fn chase_moves_along_dominant_axis() {
        let grid = open_grid();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut chaser = chaser_at(0, Pos::new(5, 10));
        advance(&mut chaser, Pos::new(10, 10), &grid, &mut rng);
        assert_eq!(chaser.pos, Pos::new(6, 10));
        assert_eq!(chaser.facing, Dir::Right);
    }

    #[test]
    fn priority_lists_end_with_reverse() {
        assert_eq!(priority(5, 0), [Dir::Right, Dir::Down, Dir::Up, Dir::Left]);
        assert_eq!(priority(-5, 2), [Dir::Left, Dir::Down, Dir::Up, Dir::Right]);
        assert_eq!(priority(1, 3), [Dir::Down, Dir::Right, Dir::Left, Dir::Up]);
        assert_eq!(priority(2, -2), [Dir::Up, Dir::Right, Dir::Left, Dir::Down]);
        assert_eq!(priority(0, 0), [Dir::Up, Dir::Right, Dir::Left, Dir::Down]);
    }

    #[test]
    fn blocked_preferred_direction_falls_through_to_perpendicular() {
        let mut grid = open_grid();
        grid.set(Pos::new(6, 10), Tile::Wall);
        assert_eq!(pick_direction(&grid, Pos::new(5, 10), 5, 0), Some(Dir::Down));
        grid.set(Pos::new(5, 11), Tile::Wall);
        assert_eq!(pick_direction(&grid, Pos::new(5, 10), 5, 0), Some(Dir::Up));
        grid.set(Pos::new(5, 9), Tile::Wall);
        assert_eq!(pick_direction(&grid, Pos::new(5, 10), 5, 0), Some(Dir::Left));
    }

    #[test]
    fn boxed_in_chaser_stays_put() {
        let grid = Grid::filled(Tile::Wall);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut chaser = chaser_at(0, Pos::new(5, 5));
        assert_eq!(pick_direction(&grid, chaser.pos, 1, 0), None);
        advance(&mut chaser, Pos::new(9, 9), &grid, &mut rng);
        assert_eq!(chaser.pos, Pos::new(5, 5));
    }

    #[test]
    fn scared_flees_from_seeker() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let mut chaser = chaser_at(0, Pos::new(5, 10));
        chaser.scared = true;
        chaser.scatter = true;
        assert_eq!(target_vector(&chaser, Pos::new(10, 10), &mut rng), (-5, 0));
        let grid = open_grid();
        advance(&mut chaser, Pos::new(10, 10), &grid, &mut rng);
        assert_eq!(chaser.pos, Pos::new(4, 10));
    }

    #[test]
    fn scatter_targets_own_corner() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        for (index, spec) in ROSTER.iter().enumerate() {
            let mut chaser = chaser_at(index, Pos::new(9, 10));
            chaser.scatter = true;
            let corner = spec.scatter_corner.pos();
            let expected = (corner.x as isize - 9, corner.y as isize - 10);
            assert_eq!(target_vector(&chaser, Pos::new(3, 3), &mut rng), expected);
        }
    }

    #[test]
    fn random_personalities_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let ambush = chaser_at(1, Pos::new(5, 5));
        let patrol = chaser_at(2, Pos::new(5, 5));
        let wander = chaser_at(3, Pos::new(5, 5));
        for _ in 0..200 {
            let (dx, dy) = target_vector(&ambush, Pos::new(10, 8), &mut rng);
            assert!((2..=8).contains(&dx) && (0..=6).contains(&dy));
            let (dx, dy) = target_vector(&patrol, Pos::new(10, 8), &mut rng);
            assert!(dx.abs() <= 2 && dy.abs() <= 2);
            let (dx, dy) = target_vector(&wander, Pos::new(10, 8), &mut rng);
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
        }
    }
}
