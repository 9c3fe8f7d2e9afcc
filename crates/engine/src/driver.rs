//! Async driver - one consumer for ticks and commands.
//!
//! The board assumes a single writer. Ticks come from a periodic interval and commands
//! from an mpsc channel; both are handled inside one task that owns the [`Session`],
//! so no two mutations ever overlap. Every handled event publishes a fresh [`Frame`].

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

use crate::session::{Frame, Session};
use crate::types::GameAction;

/// Command delivered to the driver loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    Action(GameAction),
    Quit,
}

/// Running driver instance
pub struct DriverHandle {
    pub commands: mpsc::Sender<DriverCommand>,
    pub frames: watch::Receiver<Frame>,
    pub task: JoinHandle<Session>,
}

/// Spawn [`run_driver`] on the current runtime
pub fn spawn_driver(mut session: Session, max_pending: usize) -> DriverHandle {
    let (cmd_tx, cmd_rx) = mpsc::channel::<DriverCommand>(max_pending.max(1));
    let (frame_tx, frame_rx) = watch::channel(session.frame());
    let task = tokio::spawn(run_driver(session, cmd_rx, frame_tx));
    DriverHandle {
        commands: cmd_tx,
        frames: frame_rx,
        task,
    }
}

/// Drive `session` until `Quit` arrives or every command sender is dropped.
///
/// Ticks every [`Session::tick_ms`]. Returns the session so the caller can save it.
pub async fn run_driver(
    mut session: Session,
    mut commands: mpsc::Receiver<DriverCommand>,
    frames: watch::Sender<Frame>,
) -> Session {
    let tick_ms = session.tick_ms();
    let period = Duration::from_millis(tick_ms as u64);
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let changed = tokio::select! {
            cmd = commands.recv() => match cmd {
                Some(DriverCommand::Action(action)) => session.apply_action(action),
                Some(DriverCommand::Quit) | None => break,
            },
            _ = ticker.tick() => session.tick(tick_ms),
        };

        if changed {
            frames.send_replace(session.frame());
        }
    }

    eprintln!(
        "[Driver] stopped: score={} lines={} game_over={}",
        session.score(),
        session.lines(),
        session.game_over()
    );
    session
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use super::*;
    use crate::config::SessionConfig;
    use crate::types::{DropSpeed, Toggles};

    const NEVER_MS: u32 = 3_600_000;

    fn idle_config() -> SessionConfig {
        SessionConfig {
            tick_ms: NEVER_MS,
            ..SessionConfig::default()
        }
    }

    #[tokio::test]
    async fn commands_are_applied_in_order() {
        let mut session = Session::new(idle_config()).unwrap();
        session.start();
        let start_x = session.board().active().unwrap().x;

        let handle = spawn_driver(session, 16);
        for action in [GameAction::MoveLeft, GameAction::MoveLeft, GameAction::MoveRight] {
            assert_ok!(handle.commands.send(DriverCommand::Action(action)).await);
        }
        assert_ok!(handle.commands.send(DriverCommand::Quit).await);

        let session = assert_ok!(handle.task.await);
        assert_eq!(session.board().active().unwrap().x, start_x - 1);
        assert_eq!(handle.frames.borrow().offset.unwrap().0, start_x - 1);
    }

    #[tokio::test]
    async fn dropping_the_sender_stops_the_driver() {
        let mut session = Session::new(idle_config()).unwrap();
        session.start();

        let DriverHandle {
            commands, task, ..
        } = spawn_driver(session, 4);
        drop(commands);

        let session = assert_ok!(task.await);
        assert!(!session.game_over());
    }

    #[tokio::test]
    async fn ticks_apply_gravity() {
        let config = SessionConfig {
            toggles: Toggles {
                drop_speed: DropSpeed::Fast,
                ..Toggles::default()
            },
            tick_ms: 50,
            ..SessionConfig::default()
        };
        let mut session = Session::new(config).unwrap();
        session.start();
        assert_eq!(session.tick_ms(), 50);

        let handle = spawn_driver(session, 4);
        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_ok!(handle.commands.send(DriverCommand::Quit).await);

        let session = assert_ok!(handle.task.await);
        assert!(session.board().active().unwrap().y > 0);
    }
}
