//! Plain-text rendering of session events for the terminal front end.

use std::fmt::Write;

use probability_shared::game::{MiniGame, SEGMENTS};
use probability_shared::games::plinko::BOUNCES;
use probability_shared::games::SoundCue;
use probability_shared::protocol::{
    BoardView, Event, IgnoreReason, JarView, Snapshot, WelcomeMsg,
};
use probability_shared::stats::SessionState;

const BAR_WIDTH: u32 = 20;

/// Text for one event. `None` for events that only carry state.
pub fn render_event(event: &Event) -> Option<String> {
    let text = match event {
        Event::Welcome(msg) => render_welcome(msg),
        Event::Snapshot(_) => return None,
        Event::SpinStarted(_) => "The wheel is spinning...".to_string(),
        Event::SpinnerLanded(msg) => {
            let label = SEGMENTS
                .get(msg.segment as usize)
                .map(|s| s.label)
                .unwrap_or("?");
            format!("{} The wheel stopped on {}!", cue(msg.cue), label)
        }
        Event::TransitionStarted(msg) => format!("Off to {}...", msg.game.title()),
        Event::ScreenChanged(msg) => render_screen(msg.game),
        Event::CoinFlipStarted(msg) => {
            format!("You called {}. The coin is in the air...", msg.prediction.name())
        }
        Event::CoinFlipped(msg) => format!(
            "{} It landed {}. {}",
            cue(msg.cue),
            msg.outcome.name(),
            verdict(msg.correct, msg.reward)
        ),
        Event::DiceRollStarted => "Rolling the dice...".to_string(),
        Event::DiceRolled(msg) => format!(
            "{} Rolled {} + {} = {} (a sum with {:.1}% odds). Collected {} resources, +{} points.",
            cue(msg.cue),
            msg.first,
            msg.second,
            msg.sum,
            msg.sum_probability,
            msg.resources,
            msg.reward
        ),
        Event::MarbleDrawn(msg) => format!(
            "{} Drew a {} marble. {} {} marbles left.",
            cue(msg.cue),
            msg.outcome.name(),
            verdict(msg.correct, msg.reward),
            msg.remaining
        ),
        Event::JarReset => "The jar is full again.".to_string(),
        Event::SlotSelected(msg) => format!("Prediction set to slot {}.", msg.slot),
        Event::BallDropped(msg) => format!(
            "{} The ball landed in slot {}. {}",
            cue(msg.cue),
            msg.slot,
            verdict(msg.correct, msg.reward)
        ),
        Event::BoardReset => "The board is clear.".to_string(),
        Event::StatsReset => "All statistics reset.".to_string(),
        Event::Ignored(msg) => format!("Can't {} now: {}.", msg.command, reason(msg.reason)),
    };
    Some(text)
}

fn render_welcome(msg: &WelcomeMsg) -> String {
    format!(
        "Welcome to the {} (v{}, protocol {}). Type `help` for commands.\n{}",
        MiniGame::Spinner.title(),
        msg.version,
        msg.protocol_version,
        render_screen(msg.snapshot.session.current_game)
    )
}

fn render_screen(game: MiniGame) -> String {
    let hint = match game {
        MiniGame::Spinner => "Type `spin` to pick a game.",
        MiniGame::CoinFlip => "Predict with `flip heads` or `flip tails`.",
        MiniGame::DiceKingdom => "Type `roll`. Half the sum becomes resources.",
        MiniGame::MarbleCollector => "Predict a color with `draw <color>`.",
        MiniGame::Plinko => "Pick a slot with `slot <0-8>`, then `drop`.",
    };
    format!("== {} ==\n{}", game.title(), hint)
}

fn cue(cue: SoundCue) -> &'static str {
    match cue {
        SoundCue::Success => "*ding*",
        SoundCue::Hit => "*thud*",
    }
}

fn verdict(correct: bool, reward: u32) -> String {
    if correct {
        format!("Correct, +{} points!", reward)
    } else {
        "Not this time.".to_string()
    }
}

fn reason(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::InProgress => "wait for the current round to finish",
        IgnoreReason::WrongScreen => "that belongs to another screen",
        IgnoreReason::JarEmpty => "the jar is empty, try `reset-jar`",
        IgnoreReason::NoPrediction => "pick a slot first with `slot <0-8>`",
    }
}

/// Score and per-game statistics.
pub fn render_stats(state: &SessionState) -> String {
    let stats = &state.stats;
    let mut out = String::new();
    let _ = writeln!(out, "Total score: {}", state.total_score);
    let _ = writeln!(
        out,
        "Coin Flip:        {} flips, {} correct, {:.1}% accuracy",
        stats.coin_flip.total_flips, stats.coin_flip.correct_predictions, stats.coin_flip.accuracy
    );
    let _ = writeln!(
        out,
        "Dice Kingdom:     {} rolls, {} resources",
        stats.dice_kingdom.total_rolls, stats.dice_kingdom.resources_collected
    );
    let _ = writeln!(
        out,
        "Marble Collector: {} draws, {} correct, {:.1}% accuracy",
        stats.marble_collector.total_draws,
        stats.marble_collector.correct_predictions,
        stats.marble_collector.accuracy
    );
    let _ = write!(
        out,
        "Plinko:           {} drops, {} correct, {:.1}% accuracy",
        stats.plinko.total_drops, stats.plinko.correct_predictions, stats.plinko.accuracy
    );
    out
}

/// Screen-specific detail: jar odds or the Plinko histogram.
pub fn render_detail(snapshot: &Snapshot) -> Option<String> {
    match snapshot.session.current_game {
        MiniGame::MarbleCollector => Some(render_jar(&snapshot.jar)),
        MiniGame::Plinko => Some(render_board(&snapshot.board)),
        _ => None,
    }
}

fn render_jar(jar: &JarView) -> String {
    let mut out = format!("Jar ({} marbles):", jar.marbles.len());
    for odds in &jar.colors {
        let _ = write!(
            out,
            "\n  {:<7} {:>2}  {:>5.1}%",
            odds.color.name(),
            odds.count,
            odds.probability
        );
    }
    out
}

fn render_board(board: &BoardView) -> String {
    let mut out = format!("Board after {} bounces per ball:", BOUNCES);
    for (slot, count) in board.slot_counts.iter().enumerate() {
        let width = count * BAR_WIDTH / board.max_count.max(1);
        let marker = match board.prediction {
            Some(p) if p.index() == slot => "<",
            _ => "",
        };
        let _ = write!(
            out,
            "\n  {} |{:<w$}| {} {}",
            slot,
            "#".repeat(width as usize),
            count,
            marker,
            w = BAR_WIDTH as usize
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use probability_shared::games::coin_flip::CoinFace;
    use probability_shared::games::plinko::Slot;
    use probability_shared::protocol::{CoinFlippedMsg, IgnoredMsg, ScreenMsg};

    #[test]
    fn snapshots_are_silent() {
        let snapshot = crate::controller::GameController::from_config(&Default::default()).snapshot();
        assert!(render_event(&Event::Snapshot(snapshot)).is_none());
    }

    #[test]
    fn coin_result_mentions_outcome_and_points() {
        let text = render_event(&Event::CoinFlipped(CoinFlippedMsg {
            prediction: CoinFace::Tails,
            outcome: CoinFace::Tails,
            correct: true,
            reward: 50,
            cue: SoundCue::Success,
        }))
        .unwrap();
        assert!(text.contains("landed tails"));
        assert!(text.contains("+50 points"));
    }

    #[test]
    fn screen_change_shows_title() {
        let text = render_event(&Event::ScreenChanged(ScreenMsg {
            game: MiniGame::Plinko,
        }))
        .unwrap();
        assert!(text.starts_with("== Probability Plinko =="));
    }

    #[test]
    fn ignored_command_explains_why() {
        let text = render_event(&Event::Ignored(IgnoredMsg {
            command: "drop_ball".to_string(),
            reason: IgnoreReason::NoPrediction,
        }))
        .unwrap();
        assert!(text.contains("pick a slot first"));
    }

    #[test]
    fn stats_use_one_decimal_accuracy() {
        let mut store = probability_shared::stats::StatsStore::new();
        store.record_coin_flip(true);
        store.record_coin_flip(true);
        store.record_coin_flip(false);
        let text = render_stats(store.state());
        assert!(text.contains("3 flips, 2 correct, 66.7% accuracy"), "{}", text);
    }

    #[test]
    fn board_marks_prediction() {
        let board = BoardView {
            slot_counts: vec![0, 0, 0, 0, 4, 2, 0, 0, 0],
            max_count: 4,
            prediction: Slot::new(4),
            last_slot: Slot::new(5),
        };
        let text = render_board(&board);
        let line = text.lines().find(|l| l.trim_start().starts_with("4 |")).unwrap();
        assert!(line.contains(&"#".repeat(20)));
        assert!(line.ends_with('<'));
    }
}
