use maze_chase::agent::{ROSTER, SEEKER_SPAWN};
use maze_chase::grid::{in_ghost_house, Grid, Pos, Tile, MAZE_HEIGHT, MAZE_WIDTH};
use maze_chase::maze::{carve_layout, generate_maze, is_fully_connected, maze_for_level};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SEEDS: u64 = 120;

fn generated(seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_maze(&mut rng)
}

#[test]
fn border_is_always_wall() {
    for seed in 0..SEEDS {
        let grid = generated(seed);
        for pos in grid.positions() {
            let edge = pos.x == 0 || pos.y == 0 || pos.x == MAZE_WIDTH - 1 || pos.y == MAZE_HEIGHT - 1;
            if edge {
                assert_eq!(grid.tile(pos), Tile::Wall, "seed {seed} at {pos:?}");
            }
        }
    }
}

#[test]
fn start_region_is_reachable_from_spawn() {
    for seed in 0..SEEDS {
        let grid = generated(seed);
        let from_start = grid.reachable_from(Pos::new(1, 1));
        let from_spawn = grid.reachable_from(SEEKER_SPAWN);
        for pos in grid.positions() {
            if from_start[pos.y][pos.x] {
                assert!(from_spawn[pos.y][pos.x], "seed {seed}: {pos:?} cut off from spawn");
            }
        }
    }
}

#[test]
fn spawns_and_every_open_cell_share_one_region() {
    for seed in 0..SEEDS {
        let grid = generated(seed);
        assert!(is_fully_connected(&grid), "seed {seed}");
        let reach = grid.reachable_from(SEEKER_SPAWN);
        for spec in ROSTER {
            assert!(reach[spec.home.y][spec.home.x], "seed {seed}: home {:?}", spec.home);
        }
    }
}

#[test]
fn carved_layout_is_mirror_symmetric() {
    for seed in 0..SEEDS {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = carve_layout(&mut rng);
        for pos in grid.positions() {
            assert_eq!(
                grid.tile(pos) == Tile::Wall,
                grid.tile(pos.mirrored()) == Tile::Wall,
                "seed {seed} at {pos:?}"
            );
        }
    }
}

#[test]
fn collectibles_only_on_open_floor() {
    for seed in 0..SEEDS {
        let grid = generated(seed);
        assert!(grid.remaining_collectibles() > 0);
        for pos in grid.positions() {
            match grid.tile(pos) {
                Tile::PowerPellet => {
                    assert!(pos.x < 2 || pos.x > MAZE_WIDTH - 3, "seed {seed} at {pos:?}");
                    assert!(pos.y < 3 || pos.y > MAZE_HEIGHT - 4, "seed {seed} at {pos:?}");
                }
                Tile::Open => panic!("seed {seed}: bare floor left at {pos:?}"),
                Tile::GhostArea => assert!(in_ghost_house(pos), "seed {seed} at {pos:?}"),
                Tile::Pellet | Tile::Wall => {}
            }
        }
    }
}

#[test]
fn ghost_house_interior_and_spawn_corridor() {
    for seed in 0..SEEDS {
        let grid = generated(seed);
        for y in 9..=11 {
            for x in 8..=10 {
                assert_eq!(grid.tile(Pos::new(x, y)), Tile::GhostArea, "seed {seed}");
            }
        }
        for y in 12..=16 {
            assert!(grid.tile(Pos::new(9, y)).is_passable(), "seed {seed} row {y}");
        }
        assert!(grid.tile(Pos::new(8, 15)).is_passable());
        assert!(grid.tile(Pos::new(10, 15)).is_passable());
    }
}

#[test]
fn same_seed_same_maze() {
    assert_eq!(generated(77), generated(77));
    assert_ne!(generated(77), generated(78));
}

#[test]
fn first_level_uses_fixed_layout() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(maze_for_level(1, &mut rng), Grid::level_one());
    assert_ne!(maze_for_level(2, &mut rng), Grid::level_one());
}
