//! Session tests - full game flows through the driver-facing API

use blockfall::core::{Board, PieceQueue};
use blockfall::engine::{spawn_driver, DriverCommand, PersistError, Session, SessionConfig};
use blockfall::types::{GameAction, PieceKind, Toggles, BOARD_HEIGHT, BOARD_WIDTH};
use tokio_test::assert_ok;

fn session_with(kinds: &[PieceKind]) -> Session {
    let queue = PieceQueue::from_kinds(kinds.iter().copied(), 13);
    let board = Board::with_queue(BOARD_WIDTH, BOARD_HEIGHT, queue).unwrap();
    let mut session = Session::with_board(board, Toggles::default());
    assert!(!session.start());
    session
}

/// O in the middle, then an I flush left and an I flush right
fn play_single_clear(session: &mut Session) {
    assert!(session.apply_action(GameAction::HardDrop));
    for _ in 0..3 {
        assert!(session.apply_action(GameAction::MoveLeft));
    }
    assert!(session.apply_action(GameAction::HardDrop));
    for _ in 0..3 {
        assert!(session.apply_action(GameAction::MoveRight));
    }
    assert!(session.apply_action(GameAction::HardDrop));
}

#[test]
fn test_line_clear_through_commands() {
    let mut session = session_with(&[PieceKind::O, PieceKind::I, PieceKind::I]);
    play_single_clear(&mut session);

    let outcome = session.take_last_outcome().unwrap();
    assert_eq!(outcome.lines_cleared, 1);
    assert_eq!(outcome.cleared_rows, vec![21]);
    assert_eq!(outcome.line_points, 100);
    assert_eq!(outcome.drop_points, 40);
    assert!(!outcome.game_over);

    // 38 + 40 + 40 drop points plus 100 for the line.
    assert_eq!(session.score(), 218);
    assert_eq!(session.lines(), 1);
    assert_eq!(session.level(), 0);
}

#[test]
fn test_tenth_line_raises_level() {
    let mut session = session_with(&[PieceKind::O, PieceKind::I, PieceKind::I]);
    assert_eq!(session.drop_interval_ms(), 650);

    let mut snapshot = session.save();
    snapshot.session.lines = 9;
    session.resume(&snapshot).unwrap();
    assert_eq!(session.lines(), 9);

    play_single_clear(&mut session);
    assert_eq!(session.lines(), 10);
    assert_eq!(session.level(), 1);
    assert_eq!(session.drop_interval_ms(), 500);
}

#[test]
fn test_frame_tracks_the_session() {
    let mut session = session_with(&[PieceKind::T, PieceKind::O, PieceKind::S]);
    let frame = session.frame();
    assert_eq!(frame.rows.len(), BOARD_HEIGHT);
    assert_eq!(frame.offset, Some((3, 0)));
    assert_eq!(frame.ghost_y, Some(20));
    assert_eq!(frame.next_shapes[0], blockfall::core::get_spawn_shape(PieceKind::O));
    assert_eq!(frame.next_shapes[1], blockfall::core::get_spawn_shape(PieceKind::S));
    assert!(!frame.paused);
    assert!(!frame.game_over);

    session.apply_action(GameAction::Pause);
    assert!(session.frame().paused);
}

#[test]
fn test_game_over_stops_play_until_restart() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    session.start();
    while !session.game_over() {
        session.apply_action(GameAction::HardDrop);
    }

    let score = session.score();
    assert!(!session.apply_action(GameAction::MoveLeft));
    assert!(!session.apply_action(GameAction::Pause));
    assert!(!session.tick(60_000));
    assert_eq!(session.score(), score);
    assert!(session.frame().game_over);

    assert!(session.apply_action(GameAction::Restart));
    assert!(!session.game_over());
    assert_eq!(session.score(), 0);
}

#[test]
fn test_save_file_roundtrip() {
    let mut session = session_with(&[PieceKind::L, PieceKind::J]);
    session.apply_action(GameAction::Rotate);
    session.apply_action(GameAction::HardDrop);
    session.set_toggles(Toggles {
        ghost_enabled: false,
        ..Toggles::default()
    });

    let dir = std::env::temp_dir().join(format!("blockfall-session-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("save.json");
    session.save_to_path(&path).unwrap();

    let mut resumed = Session::new(SessionConfig::default()).unwrap();
    resumed.resume_from_path(&path).unwrap();
    assert_eq!(resumed.score(), session.score());
    assert_eq!(resumed.toggles(), session.toggles());
    assert_eq!(resumed.frame(), session.frame());

    std::fs::write(&path, "[]").unwrap();
    let err = resumed.resume_from_path(&path).unwrap_err();
    assert!(matches!(err, PersistError::Json(_)));
    assert_eq!(resumed.score(), session.score());

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_driver_publishes_frames() {
    let mut session = session_with(&[PieceKind::I, PieceKind::O]);
    session.set_tick_ms(3_600_000);
    let mut handle = spawn_driver(session, 8);

    assert_ok!(
        handle
            .commands
            .send(DriverCommand::Action(GameAction::HardDrop))
            .await
    );
    assert_ok!(handle.frames.changed().await);
    assert!(handle.frames.borrow_and_update().score > 0);

    assert_ok!(
        handle
            .commands
            .send(DriverCommand::Action(GameAction::Pause))
            .await
    );
    assert_ok!(handle.frames.changed().await);
    assert!(handle.frames.borrow().paused);

    assert_ok!(handle.commands.send(DriverCommand::Quit).await);
    let session = assert_ok!(handle.task.await);
    assert!(session.paused());
}

#[test]
fn test_save_format_uses_piece_identifiers() {
    let mut session = session_with(&[PieceKind::S, PieceKind::Z, PieceKind::T]);
    let value = serde_json::to_value(session.save()).unwrap();

    assert_eq!(value["active"]["kind"], "S");
    assert_eq!(value["next"][0], "Z");
    assert_eq!(value["next"][1], "T");
    assert_eq!(value["queue"][0], "Z");
    assert_eq!(value["session"]["toggles"]["drop_speed"], "normal");
    assert_eq!(value["grid"].as_array().unwrap().len(), BOARD_HEIGHT);
}
