//! Line-oriented player input for the terminal front end.

use probability_shared::games::coin_flip::CoinFace;
use probability_shared::games::marble::MarbleColor;
use probability_shared::games::plinko::Slot;
use probability_shared::protocol::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command {0:?}, type `help` for a list")]
    UnknownCommand(String),
    #[error("`{command}` needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("`{command}` does not accept {value:?}, expected {expected}")]
    InvalidArgument {
        command: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("invalid JSON command: {0}")]
    Json(#[from] serde_json::Error),
}

/// One line of player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Play(Command),
    Stats,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  spin                      spin the wheel (spinner screen)
  flip heads|tails          predict and flip the coin
  roll                      roll two dice
  draw red|blue|green|yellow  predict and draw a marble
  reset-jar                 refill the marble jar
  slot <0-8>                predict the Plinko landing slot
  drop                      drop a Plinko ball
  reset-board               clear the Plinko board
  reset                     reset all statistics
  back                      return to the spinner
  stats                     show session statistics
  help                      show this list
  quit                      leave the session";

const FACES: &str = "heads or tails";
const COLORS: &str = "red, blue, green or yellow";
const SLOTS: &str = "a slot from 0 to 8";

/// Parse a text command such as `flip heads` or `slot 4`.
pub fn parse_text(line: &str) -> Result<Input, ParseError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(ParseError::Empty);
    };
    let arg = words.next();

    let command = match verb.to_ascii_lowercase().as_str() {
        "spin" => Command::Spin,
        "flip" => {
            let raw = arg.ok_or(ParseError::MissingArgument {
                command: "flip",
                expected: FACES,
            })?;
            let prediction = CoinFace::from_name(raw).ok_or_else(|| ParseError::InvalidArgument {
                command: "flip",
                value: raw.to_string(),
                expected: FACES,
            })?;
            Command::FlipCoin { prediction }
        }
        "roll" => Command::RollDice,
        "draw" => {
            let raw = arg.ok_or(ParseError::MissingArgument {
                command: "draw",
                expected: COLORS,
            })?;
            let prediction =
                MarbleColor::from_name(raw).ok_or_else(|| ParseError::InvalidArgument {
                    command: "draw",
                    value: raw.to_string(),
                    expected: COLORS,
                })?;
            Command::DrawMarble { prediction }
        }
        "reset-jar" => Command::ResetJar,
        "slot" => {
            let raw = arg.ok_or(ParseError::MissingArgument {
                command: "slot",
                expected: SLOTS,
            })?;
            let slot = raw
                .parse::<u8>()
                .ok()
                .and_then(Slot::new)
                .ok_or_else(|| ParseError::InvalidArgument {
                    command: "slot",
                    value: raw.to_string(),
                    expected: SLOTS,
                })?;
            Command::SelectSlot { slot }
        }
        "drop" => Command::DropBall,
        "reset-board" => Command::ResetBoard,
        "reset" => Command::ResetStats,
        "back" => Command::ReturnToSpinner,
        "stats" => return Ok(Input::Stats),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        _ => return Err(ParseError::UnknownCommand(verb.to_string())),
    };
    Ok(Input::Play(command))
}

/// Parse one JSON command object, e.g. `{"type":"flip_coin","prediction":"heads"}`.
pub fn parse_json(line: &str) -> Result<Command, ParseError> {
    if line.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(serde_json::from_str(line)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_text_command() {
        let cases = [
            ("spin", Command::Spin),
            (
                "flip heads",
                Command::FlipCoin {
                    prediction: CoinFace::Heads,
                },
            ),
            (
                "FLIP t",
                Command::FlipCoin {
                    prediction: CoinFace::Tails,
                },
            ),
            ("roll", Command::RollDice),
            (
                "draw yellow",
                Command::DrawMarble {
                    prediction: MarbleColor::Yellow,
                },
            ),
            ("reset-jar", Command::ResetJar),
            (
                "  slot   8 ",
                Command::SelectSlot {
                    slot: Slot::new(8).unwrap(),
                },
            ),
            ("drop", Command::DropBall),
            ("reset-board", Command::ResetBoard),
            ("reset", Command::ResetStats),
            ("back", Command::ReturnToSpinner),
        ];
        for (line, expected) in cases {
            assert_eq!(parse_text(line).unwrap(), Input::Play(expected), "{}", line);
        }
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(parse_text("stats").unwrap(), Input::Stats);
        assert_eq!(parse_text("help").unwrap(), Input::Help);
        assert_eq!(parse_text("quit").unwrap(), Input::Quit);
    }

    #[test]
    fn reports_bad_text_input() {
        assert!(matches!(parse_text("   "), Err(ParseError::Empty)));
        assert!(matches!(parse_text("jump"), Err(ParseError::UnknownCommand(_))));
        assert!(matches!(
            parse_text("flip"),
            Err(ParseError::MissingArgument { command: "flip", .. })
        ));
        assert!(matches!(
            parse_text("draw purple"),
            Err(ParseError::InvalidArgument { command: "draw", .. })
        ));
        assert!(matches!(
            parse_text("slot 9"),
            Err(ParseError::InvalidArgument { command: "slot", .. })
        ));
        assert!(matches!(
            parse_text("slot -1"),
            Err(ParseError::InvalidArgument { command: "slot", .. })
        ));
    }

    #[test]
    fn error_messages_name_the_fix() {
        let err = parse_text("slot x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "`slot` does not accept \"x\", expected a slot from 0 to 8"
        );
    }

    #[test]
    fn parses_json_commands() {
        let command = parse_json(r#"{"type":"draw_marble","prediction":"green"}"#).unwrap();
        assert_eq!(
            command,
            Command::DrawMarble {
                prediction: MarbleColor::Green
            }
        );
        assert!(matches!(parse_json("{\"type\":\"dance\"}"), Err(ParseError::Json(_))));
        assert!(matches!(parse_json(""), Err(ParseError::Empty)));
    }
}
