use crate::config::SessionConfig;
use crate::controller::GameController;
use probability_shared::protocol::{Command, Event, WelcomeMsg};
use probability_shared::random::RandomSource;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Requests from front ends to the session loop
#[derive(Debug)]
pub enum SessionCommand {
    /// Ask for the protocol version, tuning and current snapshot
    Join {
        response: oneshot::Sender<WelcomeMsg>,
    },
    Play(Command),
}

/// Run the session loop. Owns the controller and all session state.
///
/// Returns once every command sender is dropped and the outcome of each
/// command already received has been broadcast.
pub async fn run_session_loop(
    mut cmd_rx: mpsc::Receiver<SessionCommand>,
    event_tx: broadcast::Sender<Event>,
    config: SessionConfig,
) {
    let mut controller = GameController::from_config(&config);

    let dt = config.tick_dt();
    let tick_duration = Duration::from_secs_f64(dt);
    let snapshot_every_n = (config.tick_rate_hz / config.snapshot_rate_hz).max(1);
    let mut tick_count: u64 = 0;
    // Set once every front end has dropped its sender
    let mut closing = false;

    let mut tick_interval = tokio::time::interval(tick_duration);
    tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!(
        "Session loop started ({} Hz, seed {:?})",
        config.tick_rate_hz,
        config.rng_seed
    );

    loop {
        tokio::select! {
            _ = tick_interval.tick() => {
                let events = controller.tick(dt);
                let published = !events.is_empty();
                publish(&event_tx, &controller, events);

                // Stream the wheel at a lower rate while it turns
                if controller.is_spinning() {
                    tick_count += 1;
                    if !published && tick_count % snapshot_every_n as u64 == 0 {
                        let _ = event_tx.send(Event::Snapshot(controller.snapshot()));
                    }
                } else {
                    tick_count = 0;
                }

                if closing && controller.is_idle() {
                    break;
                }
            }

            cmd = cmd_rx.recv(), if !closing => {
                let Some(cmd) = cmd else {
                    // Finish what was already asked for before shutting down
                    if controller.is_idle() {
                        break;
                    }
                    tracing::debug!("Front ends gone, finishing pending rounds");
                    closing = true;
                    continue;
                };
                match cmd {
                    SessionCommand::Join { response } => {
                        let _ = response.send(controller.welcome());
                        tracing::info!("Front end joined");
                    }
                    SessionCommand::Play(command) => {
                        let events = controller.handle(command);
                        publish(&event_tx, &controller, events);
                    }
                }
            }
        }
    }

    tracing::info!("Session loop ended");
}

/// Broadcast events followed by one snapshot of the state they left behind.
fn publish<R: RandomSource>(
    event_tx: &broadcast::Sender<Event>,
    controller: &GameController<R>,
    events: Vec<Event>,
) {
    if events.is_empty() {
        return;
    }
    for event in events {
        let _ = event_tx.send(event);
    }
    let _ = event_tx.send(Event::Snapshot(controller.snapshot()));
}
