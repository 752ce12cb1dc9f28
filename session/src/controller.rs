//! Session orchestration.
//!
//! [`GameController`] owns every piece of mutable session state and is
//! driven from outside by two inputs only: player [`Command`]s and elapsed
//! time. Both return the [`Event`]s a front end should present.

use probability_shared::config::SpinnerConfig;
use probability_shared::game::{MiniGame, SEGMENTS};
use probability_shared::games::coin_flip::{self, CoinFace};
use probability_shared::games::dice::{self, DiceRoll};
use probability_shared::games::marble::MarbleJar;
use probability_shared::games::plinko::{PlinkoBoard, Slot};
use probability_shared::games::{Round, SoundCue};
use probability_shared::protocol::{
    BoardView, CoinFlipStartedMsg, Command, Event, IgnoreReason, IgnoredMsg, JarView,
    MarbleDrawnMsg, ScreenMsg, SlotSelectedMsg, Snapshot, SpinStartedMsg, SpinnerLandedMsg,
    SpinnerView, WelcomeMsg, PROTOCOL_VERSION,
};
use probability_shared::random::{RandomSource, RngSource};
use probability_shared::spinner::{self, SpinnerState};
use probability_shared::stats::{SessionState, StatsStore};
use rand_chacha::ChaCha8Rng;

use crate::config::{Pacing, SessionConfig};

/// Timers this close to zero count as expired, so a delay that is a whole
/// number of ticks fires on its last tick despite float drift.
const DUE_EPSILON: f64 = 1e-9;

/// An outcome sampled up front and published once its delay runs out.
#[derive(Debug, Clone, Copy)]
enum Reveal {
    Coin(Round<CoinFace>),
    Dice(DiceRoll),
}

#[derive(Debug, Clone, Copy)]
struct PendingReveal {
    reveal: Reveal,
    /// Seconds left before publishing
    delay: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NavigationStage {
    /// Wheel stopped, screen not fading yet
    Landed,
    Fading,
}

#[derive(Debug, Clone, Copy)]
struct PendingNavigation {
    game: MiniGame,
    stage: NavigationStage,
    delay: f64,
}

/// Delays in seconds, converted once from [`Pacing`].
#[derive(Debug, Clone, Copy)]
struct Delays {
    coin_reveal: f64,
    dice_reveal: f64,
    landing_pause: f64,
    transition_fade: f64,
}

impl From<Pacing> for Delays {
    fn from(pacing: Pacing) -> Self {
        Self {
            coin_reveal: pacing.coin_reveal.as_secs_f64(),
            dice_reveal: pacing.dice_reveal.as_secs_f64(),
            landing_pause: pacing.landing_pause.as_secs_f64(),
            transition_fade: pacing.transition_fade.as_secs_f64(),
        }
    }
}

/// Central session state owned by the session loop task.
pub struct GameController<R = RngSource<ChaCha8Rng>> {
    store: StatsStore,
    spinner: SpinnerState,
    spinner_config: SpinnerConfig,
    jar: MarbleJar,
    board: PlinkoBoard,
    plinko_prediction: Option<Slot>,
    delays: Delays,
    reveals: Vec<PendingReveal>,
    navigation: Option<PendingNavigation>,
    rng: R,
}

impl GameController {
    /// Controller on a ChaCha8 stream, seeded from the config when it has a seed.
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config, RngSource::from_optional_seed(config.rng_seed))
    }
}

impl<R: RandomSource> GameController<R> {
    pub fn new(config: &SessionConfig, rng: R) -> Self {
        Self {
            store: StatsStore::new(),
            spinner: SpinnerState::default(),
            spinner_config: config.spinner,
            jar: MarbleJar::new(),
            board: PlinkoBoard::new(),
            plinko_prediction: None,
            delays: config.pacing.into(),
            reveals: Vec::new(),
            navigation: None,
            rng,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    pub fn current_game(&self) -> MiniGame {
        self.store.current_game()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.is_spinning()
    }

    pub fn jar(&self) -> &MarbleJar {
        &self.jar
    }

    pub fn board(&self) -> &PlinkoBoard {
        &self.board
    }

    pub fn plinko_prediction(&self) -> Option<Slot> {
        self.plinko_prediction
    }

    /// No spin, reveal or screen change left to publish.
    pub fn is_idle(&self) -> bool {
        !self.is_spinning() && self.reveals.is_empty() && self.navigation.is_none()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            session: self.store.snapshot(),
            spinner: SpinnerView::from_state(&self.spinner),
            jar: JarView::from_jar(&self.jar),
            board: BoardView::from_board(&self.board, self.plinko_prediction),
        }
    }

    pub fn welcome(&self) -> WelcomeMsg {
        WelcomeMsg {
            protocol_version: PROTOCOL_VERSION,
            version: env!("CARGO_PKG_VERSION").to_string(),
            spinner: self.spinner_config,
            snapshot: self.snapshot(),
        }
    }

    /// Apply one player command.
    pub fn handle(&mut self, command: Command) -> Vec<Event> {
        match self.apply(command) {
            Ok(events) => events,
            Err(reason) => {
                tracing::debug!("Ignored {}: {:?}", command.name(), reason);
                vec![Event::Ignored(IgnoredMsg {
                    command: command.name().to_string(),
                    reason,
                })]
            }
        }
    }

    fn apply(&mut self, command: Command) -> Result<Vec<Event>, IgnoreReason> {
        match command {
            Command::Spin => self.spin(),
            Command::FlipCoin { prediction } => {
                self.require_screen(MiniGame::CoinFlip)?;
                if self.reveal_pending(|r| matches!(r, Reveal::Coin(_))) {
                    return Err(IgnoreReason::InProgress);
                }
                let round = coin_flip::flip(&mut self.rng, prediction);
                let mut events = vec![Event::CoinFlipStarted(CoinFlipStartedMsg { prediction })];
                events.extend(self.schedule(Reveal::Coin(round), self.delays.coin_reveal));
                Ok(events)
            }
            Command::RollDice => {
                self.require_screen(MiniGame::DiceKingdom)?;
                if self.reveal_pending(|r| matches!(r, Reveal::Dice(_))) {
                    return Err(IgnoreReason::InProgress);
                }
                let roll = dice::roll_pair(&mut self.rng);
                let mut events = vec![Event::DiceRollStarted];
                events.extend(self.schedule(Reveal::Dice(roll), self.delays.dice_reveal));
                Ok(events)
            }
            Command::DrawMarble { prediction } => {
                self.require_screen(MiniGame::MarbleCollector)?;
                let round = self
                    .jar
                    .draw(&mut self.rng, prediction)
                    .ok_or(IgnoreReason::JarEmpty)?;
                self.store.record_marble_draw(round.correct);
                self.store.add_score(round.reward);
                Ok(vec![Event::MarbleDrawn(MarbleDrawnMsg::new(round, &self.jar))])
            }
            Command::ResetJar => {
                self.require_screen(MiniGame::MarbleCollector)?;
                self.jar.reset();
                Ok(vec![Event::JarReset])
            }
            Command::SelectSlot { slot } => {
                self.require_screen(MiniGame::Plinko)?;
                self.plinko_prediction = Some(slot);
                Ok(vec![Event::SlotSelected(SlotSelectedMsg { slot })])
            }
            Command::DropBall => {
                self.require_screen(MiniGame::Plinko)?;
                let prediction = self.plinko_prediction.ok_or(IgnoreReason::NoPrediction)?;
                let round = self.board.drop_round(&mut self.rng, prediction);
                self.store.record_plinko_drop(round.correct);
                self.store.add_score(round.reward);
                Ok(vec![Event::BallDropped(round.into())])
            }
            Command::ResetBoard => {
                self.require_screen(MiniGame::Plinko)?;
                self.board.reset();
                self.plinko_prediction = None;
                Ok(vec![Event::BoardReset])
            }
            Command::ResetStats => {
                self.store.reset_all();
                tracing::info!("Session stats reset");
                Ok(vec![Event::StatsReset])
            }
            Command::ReturnToSpinner => {
                // Abandons a landing that has not reached its screen yet
                self.navigation = None;
                self.store.return_to_spinner();
                Ok(vec![Event::ScreenChanged(ScreenMsg {
                    game: MiniGame::Spinner,
                })])
            }
        }
    }

    /// Advance the wheel and every scheduled reveal or transition by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Vec<Event> {
        let mut events = Vec::new();

        for pending in &mut self.reveals {
            pending.delay -= dt;
        }
        // Publish due reveals in the order they were scheduled
        while let Some(idx) = self.reveals.iter().position(|p| p.delay <= DUE_EPSILON) {
            let pending = self.reveals.remove(idx);
            events.push(self.publish(pending.reveal));
        }

        if let Some(nav) = &mut self.navigation {
            nav.delay -= dt;
        }
        events.extend(self.advance_navigation());

        let (next, selection) =
            spinner::step_spinner(self.spinner, dt, &self.spinner_config, SEGMENTS.len());
        self.spinner = next;
        if let Some(selection) = selection {
            if let Some(game) = selection.game() {
                tracing::info!(
                    "Spinner landed on segment {} ({})",
                    selection.index,
                    game.title()
                );
                events.push(Event::SpinnerLanded(SpinnerLandedMsg {
                    segment: selection.index as u32,
                    game,
                    cue: SoundCue::Success,
                }));
                self.navigation = Some(PendingNavigation {
                    game,
                    stage: NavigationStage::Landed,
                    delay: self.delays.landing_pause,
                });
                events.extend(self.advance_navigation());
            }
        }

        events
    }

    fn spin(&mut self) -> Result<Vec<Event>, IgnoreReason> {
        if self.store.current_game() != MiniGame::Spinner {
            return Err(IgnoreReason::WrongScreen);
        }
        if self.navigation.is_some() || self.store.is_transitioning() {
            return Err(IgnoreReason::InProgress);
        }
        let launched = spinner::launch(self.spinner, &self.spinner_config, &mut self.rng)
            .ok_or(IgnoreReason::InProgress)?;
        self.spinner = launched;
        Ok(vec![Event::SpinStarted(SpinStartedMsg {
            velocity: launched.velocity,
        })])
    }

    fn require_screen(&self, game: MiniGame) -> Result<(), IgnoreReason> {
        if self.store.is_transitioning() {
            return Err(IgnoreReason::InProgress);
        }
        if self.store.current_game() != game {
            return Err(IgnoreReason::WrongScreen);
        }
        Ok(())
    }

    fn reveal_pending(&self, kind: impl Fn(&Reveal) -> bool) -> bool {
        self.reveals.iter().any(|p| kind(&p.reveal))
    }

    /// Queue a reveal, or publish it right away when there is no delay.
    fn schedule(&mut self, reveal: Reveal, delay: f64) -> Option<Event> {
        if delay <= DUE_EPSILON {
            return Some(self.publish(reveal));
        }
        self.reveals.push(PendingReveal { reveal, delay });
        None
    }

    fn publish(&mut self, reveal: Reveal) -> Event {
        match reveal {
            Reveal::Coin(round) => {
                tracing::debug!("Coin revealed: {}", round.outcome.name());
                self.store.record_coin_flip(round.correct);
                self.store.add_score(round.reward);
                Event::CoinFlipped(round.into())
            }
            Reveal::Dice(roll) => {
                tracing::debug!("Dice revealed: {} + {}", roll.first, roll.second);
                self.store.record_dice_roll(roll.resources());
                self.store.add_score(roll.reward());
                Event::DiceRolled(roll.into())
            }
        }
    }

    /// Run every navigation stage whose delay has elapsed.
    fn advance_navigation(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while let Some(nav) = self.navigation {
            if nav.delay > DUE_EPSILON {
                break;
            }
            match nav.stage {
                NavigationStage::Landed => {
                    self.store.set_transitioning(true);
                    events.push(Event::TransitionStarted(ScreenMsg { game: nav.game }));
                    // Carry overshoot into the fade so long ticks keep total timing
                    self.navigation = Some(PendingNavigation {
                        game: nav.game,
                        stage: NavigationStage::Fading,
                        delay: self.delays.transition_fade + nav.delay,
                    });
                }
                NavigationStage::Fading => {
                    self.navigation = None;
                    self.enter(nav.game);
                    events.push(Event::ScreenChanged(ScreenMsg { game: nav.game }));
                }
            }
        }
        events
    }

    fn enter(&mut self, game: MiniGame) {
        match game {
            MiniGame::MarbleCollector => self.jar.reset(),
            MiniGame::Plinko => {
                self.board.reset();
                self.plinko_prediction = None;
            }
            _ => {}
        }
        self.store.set_current_game(game);
        self.store.set_transitioning(false);
        tracing::info!("Now playing {}", game.title());
    }
}
