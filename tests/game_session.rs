//! Full sessions driven through the public `Game` API, the way the browser
//! loop does it but without a display

use std::cell::RefCell;
use std::rc::Rc;

use skyflap::consts::REFERENCE_FRAME_MS;
use skyflap::persistence::MemoryStore;
use skyflap::sim::{CrashCause, GameEvent, GamePhase};
use skyflap::{Game, Settings, Tuning};

fn game_with_store(seed: u64, store: &Rc<RefCell<MemoryStore>>) -> Game {
    Game::new(
        seed,
        Tuning::default(),
        Settings::default(),
        Box::new(store.clone()),
    )
}

/// Step at the reference rate until the session ends, collecting events
fn run_until_ended(game: &mut Game, max_frames: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for i in 0..max_frames {
        events.extend_from_slice(game.update(REFERENCE_FRAME_MS, i as f64 * 16.67));
        if game.state.phase == GamePhase::Ended {
            break;
        }
    }
    events
}

#[test]
fn test_single_flap_falls_to_ground() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let mut game = game_with_store(3, &store);

    game.flap();
    let events = run_until_ended(&mut game, 600);

    assert_eq!(game.state.phase, GamePhase::Ended);
    assert_eq!(events.first(), Some(&GameEvent::SessionStarted));
    assert!(events.contains(&GameEvent::Crashed {
        cause: CrashCause::Ground
    }));
    assert!(events.contains(&GameEvent::SessionEnded {
        score: 0,
        best: 0,
        new_best: false
    }));
    assert_eq!(store.borrow().value(), Some(0));
}

#[test]
fn test_stored_best_survives_worse_session() {
    let store = Rc::new(RefCell::new(MemoryStore::with_value(12)));
    let mut game = game_with_store(3, &store);
    assert_eq!(game.state.best, 12);
    assert_eq!(game.hud().best, "Best: 12");

    game.flap();
    run_until_ended(&mut game, 600);

    assert_eq!(game.best_score(), 12);
    assert_eq!(store.borrow().value(), Some(12));
    assert_eq!(store.borrow().writes, 1);
}

#[test]
fn test_failing_store_keeps_playing() {
    let store = Rc::new(RefCell::new(MemoryStore::failing()));
    let mut game = game_with_store(3, &store);
    assert_eq!(game.best_score(), 0);

    game.flap();
    run_until_ended(&mut game, 600);
    assert_eq!(game.state.phase, GamePhase::Ended);
    assert_eq!(store.borrow().writes, 0);

    game.restart();
    game.update(REFERENCE_FRAME_MS, 0.0);
    assert_eq!(game.state.phase, GamePhase::Ready);
}

#[test]
fn test_restart_clears_session() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let mut game = game_with_store(5, &store);

    game.flap();
    run_until_ended(&mut game, 600);
    assert_eq!(game.state.phase, GamePhase::Ended);

    // Flap is ignored after the crash, restart is not
    game.flap();
    let events = game.update(REFERENCE_FRAME_MS, 0.0).to_vec();
    assert_eq!(game.state.phase, GamePhase::Ended);
    assert!(!events.contains(&GameEvent::Flapped));

    game.restart();
    let events = game.update(REFERENCE_FRAME_MS, 0.0).to_vec();
    assert!(events.contains(&GameEvent::Restarted));
    assert_eq!(game.state.phase, GamePhase::Ready);
    assert_eq!(game.state.score, 0);
    assert!(game.state.pipes.is_empty());
    assert_eq!(game.state.bird.vy, 0.0);
    assert!(game.hud().banner.is_some());
}

#[test]
fn test_autopilot_sets_new_best() {
    let store = Rc::new(RefCell::new(MemoryStore::new()));
    let mut game = game_with_store(7, &store);
    game.toggle_autopilot();
    assert!(game.autopilot());

    let mut events = Vec::new();
    for i in 0..3000 {
        events.extend_from_slice(game.update(REFERENCE_FRAME_MS, i as f64 * 16.67));
        if game.state.phase == GamePhase::Ended || game.state.score >= 1 {
            break;
        }
    }
    assert!(game.state.score >= 1);

    // Hand back control and let the bird drop
    game.toggle_autopilot();
    events.extend(run_until_ended(&mut game, 2000));
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::SessionEnded { new_best: true, .. }
    )));
    assert!(game.best_score() >= 1);
    assert_eq!(store.borrow().value(), Some(game.best_score()));
    assert_eq!(game.hud().banner.map(|b| b.title), Some("Game Over".to_string()));
}
