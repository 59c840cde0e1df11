use maze_chase::agent::SEEKER_SPAWN;
use maze_chase::{Dir, Game, GameError, GameEvent, Phase, SaveSnapshot, SaveStore};

fn started(seed: u64) -> Game {
    let mut game = Game::new(Some(seed));
    let events = game.request_start();
    assert_eq!(
        events,
        vec![GameEvent::PhaseChanged {
            from: Phase::Idle,
            to: Phase::Playing
        }]
    );
    game
}

#[test]
fn new_game_waits_for_start() {
    let mut game = Game::new(Some(1));
    assert_eq!(game.phase(), Phase::Idle);
    assert_eq!(game.lives(), 3);
    assert_eq!(game.level(), 1);
    assert_eq!(game.seeker().pos, SEEKER_SPAWN);
    assert!(game.tick().is_empty());
}

#[test]
fn seeker_leaves_spawn_and_eats() {
    let mut game = started(4);
    let before = game.grid().remaining_collectibles();
    game.set_pending_direction(Dir::Down);
    let events = game.tick();
    assert_eq!(game.seeker().pos.y, SEEKER_SPAWN.y + 1);
    assert_eq!(game.score(), 10);
    assert_eq!(game.grid().remaining_collectibles(), before - 1);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Effect(_))));
}

#[test]
fn blocked_intent_leaves_seeker_alone() {
    let mut game = started(4);
    let facing = game.seeker().facing;
    // Above the spawn cell is a wall in the first maze.
    game.set_pending_direction(Dir::Up);
    game.tick();
    assert_eq!(game.seeker().pos, SEEKER_SPAWN);
    assert_eq!(game.seeker().facing, facing);
}

#[test]
fn double_pause_restores_phase() {
    let mut game = started(2);
    game.tick();
    let score = game.score();
    let pos = game.seeker().pos;
    game.toggle_pause();
    game.toggle_pause();
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.score(), score);
    assert_eq!(game.seeker().pos, pos);
}

#[test]
fn save_and_load_round_trip_through_json() {
    let mut game = started(8);
    for (i, dir) in [Dir::Down, Dir::Right, Dir::Up, Dir::Left].iter().cycle().take(40).enumerate() {
        if i % 10 == 0 {
            game.set_pending_direction(*dir);
        }
        game.tick();
        if game.phase() != Phase::Playing {
            game.request_start();
        }
    }

    let snapshot = game.snapshot().unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: SaveSnapshot = serde_json::from_str(&json).unwrap();

    let mut restored = Game::new(Some(99));
    let report = restored.restore(&parsed).unwrap();

    assert!(report.is_complete());
    assert_eq!(restored.phase(), Phase::Paused);
    assert_eq!(restored.score(), game.score());
    assert_eq!(restored.lives(), game.lives());
    assert_eq!(restored.level(), game.level());
    assert_eq!(restored.grid(), game.grid());
    assert_eq!(restored.seeker().pos, game.seeker().pos);
    let positions = |g: &Game| g.chasers().iter().map(|c| c.pos).collect::<Vec<_>>();
    assert_eq!(positions(&restored), positions(&game));
}

#[test]
fn save_store_round_trip() {
    let dir = std::env::temp_dir().join(format!("maze-chase-flow-{}", std::process::id()));
    let store = SaveStore::new(dir.join("nested").join("save.json"));
    let mut game = started(3);
    game.set_pending_direction(Dir::Down);
    game.tick();

    store.save(&game.snapshot().unwrap()).unwrap();
    let mut other = Game::new(None);
    other.restore(&store.load().unwrap()).unwrap();

    assert_eq!(other.score(), game.score());
    assert_eq!(other.grid(), game.grid());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn loaded_game_resumes_on_start_or_pause() {
    let game = started(3);
    let snapshot = game.snapshot().unwrap();

    let mut a = Game::new(Some(1));
    a.restore(&snapshot).unwrap();
    a.request_start();
    assert_eq!(a.phase(), Phase::Playing);

    let mut b = Game::new(Some(1));
    b.restore(&snapshot).unwrap();
    b.toggle_pause();
    assert_eq!(b.phase(), Phase::Playing);
}

#[test]
fn missing_save_is_user_visible() {
    let store = SaveStore::new(std::env::temp_dir().join("maze-chase-definitely-missing.json"));
    let err = store.load().unwrap_err();
    assert!(matches!(err, GameError::NoSnapshot { .. }));
    assert!(err.is_user_visible());
}

#[test]
fn long_run_keeps_invariants() {
    let mut game = started(21);
    let dirs = [Dir::Right, Dir::Down, Dir::Left, Dir::Up];
    let mut last_score = 0;
    for t in 0..6_000u32 {
        if t % 17 == 0 {
            game.set_pending_direction(dirs[(t / 17) as usize % 4]);
        }
        game.tick();
        assert!(game.score() >= last_score);
        assert!(game.lives() <= 3);
        last_score = game.score();
        match game.phase() {
            Phase::GameOver => {
                assert_eq!(game.lives(), 0);
                assert!(game.tick().is_empty());
                return;
            }
            Phase::Paused => {
                game.request_start();
            }
            Phase::Playing => {}
            Phase::Idle => panic!("tick never returns to idle"),
        }
    }
}
