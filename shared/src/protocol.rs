use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::SpinnerConfig;
use crate::game::MiniGame;
use crate::games::coin_flip::CoinFace;
use crate::games::dice::DiceRoll;
use crate::games::marble::{MarbleColor, MarbleJar};
use crate::games::plinko::{PlinkoBoard, Slot};
use crate::games::{Round, SoundCue};
use crate::spinner::SpinnerState;
use crate::stats::SessionState;

/// Protocol version - increment when making breaking changes.
pub const PROTOCOL_VERSION: u32 = 1;

// === Presentation -> Controller ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Spin,
    FlipCoin { prediction: CoinFace },
    RollDice,
    DrawMarble { prediction: MarbleColor },
    ResetJar,
    SelectSlot { slot: Slot },
    DropBall,
    ResetBoard,
    ResetStats,
    ReturnToSpinner,
}

impl Command {
    /// Wire tag of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Spin => "spin",
            Command::FlipCoin { .. } => "flip_coin",
            Command::RollDice => "roll_dice",
            Command::DrawMarble { .. } => "draw_marble",
            Command::ResetJar => "reset_jar",
            Command::SelectSlot { .. } => "select_slot",
            Command::DropBall => "drop_ball",
            Command::ResetBoard => "reset_board",
            Command::ResetStats => "reset_stats",
            Command::ReturnToSpinner => "return_to_spinner",
        }
    }
}

// === Controller -> Presentation ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Welcome(WelcomeMsg),
    Snapshot(Snapshot),
    SpinStarted(SpinStartedMsg),
    SpinnerLanded(SpinnerLandedMsg),
    TransitionStarted(ScreenMsg),
    ScreenChanged(ScreenMsg),
    CoinFlipStarted(CoinFlipStartedMsg),
    CoinFlipped(CoinFlippedMsg),
    DiceRollStarted,
    DiceRolled(DiceRolledMsg),
    MarbleDrawn(MarbleDrawnMsg),
    JarReset,
    SlotSelected(SlotSelectedMsg),
    BallDropped(BallDroppedMsg),
    BoardReset,
    StatsReset,
    Ignored(IgnoredMsg),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMsg {
    pub protocol_version: u32,
    pub version: String,
    pub spinner: SpinnerConfig,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SpinStartedMsg {
    pub velocity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SpinnerLandedMsg {
    pub segment: u32,
    pub game: MiniGame,
    pub cue: SoundCue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ScreenMsg {
    pub game: MiniGame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct CoinFlipStartedMsg {
    pub prediction: CoinFace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct CoinFlippedMsg {
    pub prediction: CoinFace,
    pub outcome: CoinFace,
    pub correct: bool,
    pub reward: u32,
    pub cue: SoundCue,
}

impl From<Round<CoinFace>> for CoinFlippedMsg {
    fn from(round: Round<CoinFace>) -> Self {
        Self {
            prediction: round.prediction,
            outcome: round.outcome,
            correct: round.correct,
            reward: round.reward,
            cue: round.cue(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct DiceRolledMsg {
    pub first: u8,
    pub second: u8,
    pub sum: u8,
    /// Theoretical chance of this sum, in percent
    pub sum_probability: f64,
    pub resources: u32,
    pub reward: u32,
    pub cue: SoundCue,
}

impl From<DiceRoll> for DiceRolledMsg {
    fn from(roll: DiceRoll) -> Self {
        Self {
            first: roll.first,
            second: roll.second,
            sum: roll.sum(),
            sum_probability: roll.sum_probability(),
            resources: roll.resources(),
            reward: roll.reward(),
            cue: SoundCue::Success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct MarbleDrawnMsg {
    pub prediction: MarbleColor,
    pub outcome: MarbleColor,
    pub correct: bool,
    pub reward: u32,
    pub cue: SoundCue,
    pub remaining: u32,
}

impl MarbleDrawnMsg {
    pub fn new(round: Round<MarbleColor>, jar: &MarbleJar) -> Self {
        Self {
            prediction: round.prediction,
            outcome: round.outcome,
            correct: round.correct,
            reward: round.reward,
            cue: round.cue(),
            remaining: jar.len() as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SlotSelectedMsg {
    pub slot: Slot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct BallDroppedMsg {
    pub prediction: Slot,
    pub slot: Slot,
    pub correct: bool,
    pub reward: u32,
    pub cue: SoundCue,
}

impl From<Round<Slot>> for BallDroppedMsg {
    fn from(round: Round<Slot>) -> Self {
        Self {
            prediction: round.prediction,
            slot: round.outcome,
            correct: round.correct,
            reward: round.reward,
            cue: round.cue(),
        }
    }
}

/// Why a command was refused. Refused commands change nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub enum IgnoreReason {
    /// A spin, flip, roll or screen transition is still running
    InProgress,
    /// The command belongs to another screen
    WrongScreen,
    JarEmpty,
    /// Plinko drop without a selected slot
    NoPrediction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct IgnoredMsg {
    pub command: String,
    pub reason: IgnoreReason,
}

// === Snapshots ===

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub session: SessionState,
    pub spinner: SpinnerView,
    pub jar: JarView,
    pub board: BoardView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SpinnerView {
    /// Wheel angle in [0, 2π)
    pub rotation: f64,
    pub velocity: f64,
    pub spinning: bool,
}

impl SpinnerView {
    pub fn from_state(state: &SpinnerState) -> Self {
        Self {
            rotation: crate::spinner::euclidean_modulo(state.rotation, std::f64::consts::TAU),
            velocity: state.velocity,
            spinning: state.is_spinning(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct ColorOdds {
    pub color: MarbleColor,
    pub count: u32,
    /// Chance of drawing this color next, in percent
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct JarView {
    pub marbles: Vec<MarbleColor>,
    pub colors: Vec<ColorOdds>,
    /// Best prediction for the next draw, `None` once the jar is empty
    pub most_likely: Option<MarbleColor>,
}

impl JarView {
    pub fn from_jar(jar: &MarbleJar) -> Self {
        Self {
            marbles: jar.marbles().to_vec(),
            colors: MarbleColor::ALL
                .iter()
                .map(|color| ColorOdds {
                    color: *color,
                    count: jar.count(*color) as u32,
                    probability: jar.probability_percent(*color),
                })
                .collect(),
            most_likely: jar.most_likely(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub slot_counts: Vec<u32>,
    pub max_count: u32,
    pub prediction: Option<Slot>,
    pub last_slot: Option<Slot>,
}

impl BoardView {
    pub fn from_board(board: &PlinkoBoard, prediction: Option<Slot>) -> Self {
        Self {
            slot_counts: board.slot_counts().to_vec(),
            max_count: board.max_count(),
            prediction,
            last_slot: board.last_slot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> Snapshot {
        Snapshot {
            session: SessionState::default(),
            spinner: SpinnerView::from_state(&SpinnerState::default()),
            jar: JarView::from_jar(&MarbleJar::new()),
            board: BoardView::from_board(&PlinkoBoard::new(), None),
        }
    }

    #[test]
    fn command_wire_format() {
        let json = serde_json::to_string(&Command::FlipCoin {
            prediction: CoinFace::Tails,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"flip_coin","prediction":"tails"}"#);

        let parsed: Command = serde_json::from_str(r#"{"type":"select_slot","slot":3}"#).unwrap();
        assert_eq!(
            parsed,
            Command::SelectSlot {
                slot: Slot::new(3).unwrap()
            }
        );

        let spin: Command = serde_json::from_str(r#"{"type":"spin"}"#).unwrap();
        assert_eq!(spin.name(), "spin");
    }

    #[test]
    fn command_rejects_out_of_range_slot() {
        assert!(serde_json::from_str::<Command>(r#"{"type":"select_slot","slot":9}"#).is_err());
    }

    #[test]
    fn command_names_match_wire_tags() {
        let commands = [
            Command::Spin,
            Command::FlipCoin {
                prediction: CoinFace::Heads,
            },
            Command::RollDice,
            Command::DrawMarble {
                prediction: MarbleColor::Blue,
            },
            Command::ResetJar,
            Command::SelectSlot {
                slot: Slot::CENTER,
            },
            Command::DropBall,
            Command::ResetBoard,
            Command::ResetStats,
            Command::ReturnToSpinner,
        ];
        for command in commands {
            let value = serde_json::to_value(command).unwrap();
            assert_eq!(value["type"], command.name());
        }
    }

    #[test]
    fn welcome_roundtrip() {
        let msg = Event::Welcome(WelcomeMsg {
            protocol_version: PROTOCOL_VERSION,
            version: "0.1.0".to_string(),
            spinner: SpinnerConfig::default(),
            snapshot: empty_snapshot(),
        });
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"welcome\""));
        assert!(json.contains("\"protocolVersion\":1"));
        assert!(json.contains("\"pointerAngle\""));
        let parsed: Event = serde_json::from_str(&json).unwrap();
        match parsed {
            Event::Welcome(w) => {
                assert_eq!(w.protocol_version, PROTOCOL_VERSION);
                assert_eq!(w.snapshot.jar.marbles.len(), 10);
            }
            _ => panic!("Expected Welcome"),
        }
    }

    #[test]
    fn unit_events_carry_only_the_tag() {
        let json = serde_json::to_string(&Event::JarReset).unwrap();
        assert_eq!(json, r#"{"type":"jar_reset"}"#);
    }

    #[test]
    fn dice_event_reports_theoretical_odds() {
        let msg = DiceRolledMsg::from(DiceRoll {
            first: 3,
            second: 4,
        });
        assert_eq!(msg.sum, 7);
        assert_eq!(msg.sum_probability, 16.7);
        assert_eq!(msg.resources, 3);
        assert_eq!(msg.reward, 15);

        let json = serde_json::to_string(&Event::DiceRolled(msg)).unwrap();
        assert!(json.contains("\"type\":\"dice_rolled\""));
        assert!(json.contains("\"sumProbability\":16.7"));
    }

    #[test]
    fn ignored_event_names_reason() {
        let json = serde_json::to_string(&Event::Ignored(IgnoredMsg {
            command: Command::DropBall.name().to_string(),
            reason: IgnoreReason::NoPrediction,
        }))
        .unwrap();
        assert_eq!(
            json,
            r#"{"type":"ignored","command":"drop_ball","reason":"noPrediction"}"#
        );
    }

    #[test]
    fn jar_view_lists_odds_per_color() {
        let view = JarView::from_jar(&MarbleJar::new());
        assert_eq!(view.colors.len(), 4);
        assert_eq!(view.colors[0].color, MarbleColor::Red);
        assert_eq!(view.colors[0].count, 3);
        assert!((view.colors[0].probability - 30.0).abs() < 1e-9);
        assert_eq!(view.most_likely, Some(MarbleColor::Red));
    }

    #[test]
    fn board_view_scales_from_one() {
        let view = BoardView::from_board(&PlinkoBoard::new(), Slot::new(2));
        assert_eq!(view.slot_counts, vec![0; 9]);
        assert_eq!(view.max_count, 1);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"prediction\":2"));
        assert!(json.contains("\"lastSlot\":null"));
    }

    #[test]
    fn spinner_view_normalizes_rotation() {
        let view = SpinnerView::from_state(&SpinnerState {
            rotation: -1.0,
            velocity: 0.0,
            phase: Default::default(),
        });
        assert!((0.0..std::f64::consts::TAU).contains(&view.rotation));
        assert!(!view.spinning);
    }
}
