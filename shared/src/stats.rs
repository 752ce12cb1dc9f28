//! Per-game statistics and the session store that owns them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::game::MiniGame;

/// `correct / total * 100`, or 0 before the first round.
pub fn accuracy_percent(correct: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct CoinFlipStats {
    pub total_flips: u32,
    pub correct_predictions: u32,
    pub accuracy: f64,
}

impl CoinFlipStats {
    fn record(&mut self, correct: bool) {
        self.total_flips += 1;
        self.correct_predictions += u32::from(correct);
        self.accuracy = accuracy_percent(self.correct_predictions, self.total_flips);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct DiceKingdomStats {
    pub total_rolls: u32,
    pub resources_collected: u32,
}

impl DiceKingdomStats {
    fn record(&mut self, resources: u32) {
        self.total_rolls += 1;
        self.resources_collected = self.resources_collected.saturating_add(resources);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct MarbleCollectorStats {
    pub total_draws: u32,
    pub correct_predictions: u32,
    pub accuracy: f64,
}

impl MarbleCollectorStats {
    fn record(&mut self, correct: bool) {
        self.total_draws += 1;
        self.correct_predictions += u32::from(correct);
        self.accuracy = accuracy_percent(self.correct_predictions, self.total_draws);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct PlinkoStats {
    pub total_drops: u32,
    pub correct_predictions: u32,
    pub accuracy: f64,
}

impl PlinkoStats {
    fn record(&mut self, correct: bool) {
        self.total_drops += 1;
        self.correct_predictions += u32::from(correct);
        self.accuracy = accuracy_percent(self.correct_predictions, self.total_drops);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    pub coin_flip: CoinFlipStats,
    pub dice_kingdom: DiceKingdomStats,
    pub marble_collector: MarbleCollectorStats,
    pub plinko: PlinkoStats,
}

/// Everything the presentation layer renders from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../bindings/")]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub current_game: MiniGame,
    pub is_transitioning: bool,
    pub total_score: u32,
    pub stats: GameStats,
}

/// Owner of the [`SessionState`]. Its methods are the only way to mutate it.
#[derive(Debug, Clone, Default)]
pub struct StatsStore {
    state: SessionState,
}

impl StatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn current_game(&self) -> MiniGame {
        self.state.current_game
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning
    }

    pub fn record_coin_flip(&mut self, correct: bool) {
        self.state.stats.coin_flip.record(correct);
    }

    pub fn record_dice_roll(&mut self, resources: u32) {
        self.state.stats.dice_kingdom.record(resources);
    }

    pub fn record_marble_draw(&mut self, correct: bool) {
        self.state.stats.marble_collector.record(correct);
    }

    pub fn record_plinko_drop(&mut self, correct: bool) {
        self.state.stats.plinko.record(correct);
    }

    pub fn add_score(&mut self, points: u32) {
        self.state.total_score = self.state.total_score.saturating_add(points);
    }

    /// Zeroes stats and score. Navigation state is left alone.
    pub fn reset_all(&mut self) {
        self.state.stats = GameStats::default();
        self.state.total_score = 0;
    }

    pub fn set_current_game(&mut self, game: MiniGame) {
        self.state.current_game = game;
    }

    pub fn set_transitioning(&mut self, transitioning: bool) {
        self.state.is_transitioning = transitioning;
    }

    pub fn return_to_spinner(&mut self) {
        self.state.current_game = MiniGame::Spinner;
        self.state.is_transitioning = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_all_zero_on_spinner() {
        let store = StatsStore::new();
        let state = store.state();
        assert_eq!(state.current_game, MiniGame::Spinner);
        assert!(!state.is_transitioning);
        assert_eq!(state.total_score, 0);
        assert_eq!(state.stats, GameStats::default());
    }

    #[test]
    fn coin_flip_accuracy_follows_counts() {
        let mut store = StatsStore::new();
        store.record_coin_flip(true);
        store.record_coin_flip(false);
        store.record_coin_flip(true);

        let coin = store.state().stats.coin_flip;
        assert_eq!(coin.total_flips, 3);
        assert_eq!(coin.correct_predictions, 2);
        assert!((coin.accuracy - 66.666_666).abs() < 1e-3);
        assert_eq!(format!("{:.1}", coin.accuracy), "66.7");
    }

    #[test]
    fn accuracy_invariant_holds_for_any_sequence() {
        let mut store = StatsStore::new();
        let pattern = [true, false, false, true, true, false, true, false, false, false];
        for (i, correct) in pattern.iter().cycle().take(57).enumerate() {
            store.record_coin_flip(*correct);
            store.record_marble_draw(!*correct);
            store.record_plinko_drop(i % 3 == 0);

            let stats = store.state().stats;
            assert!(stats.coin_flip.correct_predictions <= stats.coin_flip.total_flips);
            assert_eq!(
                stats.coin_flip.accuracy,
                accuracy_percent(stats.coin_flip.correct_predictions, stats.coin_flip.total_flips)
            );
            assert_eq!(
                stats.marble_collector.accuracy,
                accuracy_percent(
                    stats.marble_collector.correct_predictions,
                    stats.marble_collector.total_draws
                )
            );
            assert_eq!(
                stats.plinko.accuracy,
                accuracy_percent(stats.plinko.correct_predictions, stats.plinko.total_drops)
            );
        }
    }

    #[test]
    fn accuracy_of_no_rounds_is_zero() {
        assert_eq!(accuracy_percent(0, 0), 0.0);
    }

    #[test]
    fn dice_resources_accumulate() {
        let mut store = StatsStore::new();
        store.record_dice_roll(3);
        store.record_dice_roll(6);

        let dice = store.state().stats.dice_kingdom;
        assert_eq!(dice.total_rolls, 2);
        assert_eq!(dice.resources_collected, 9);
    }

    #[test]
    fn score_saturates_instead_of_overflowing() {
        let mut store = StatsStore::new();
        store.add_score(u32::MAX - 10);
        store.add_score(50);
        assert_eq!(store.state().total_score, u32::MAX);
    }

    #[test]
    fn reset_all_keeps_navigation() {
        let mut store = StatsStore::new();
        store.set_current_game(MiniGame::Plinko);
        store.set_transitioning(true);
        store.record_coin_flip(true);
        store.record_dice_roll(4);
        store.record_marble_draw(true);
        store.record_plinko_drop(false);
        store.add_score(120);

        store.reset_all();

        let state = store.state();
        assert_eq!(state.stats, GameStats::default());
        assert_eq!(state.total_score, 0);
        assert_eq!(state.current_game, MiniGame::Plinko);
        assert!(state.is_transitioning);
    }

    #[test]
    fn return_to_spinner_clears_transition() {
        let mut store = StatsStore::new();
        store.set_current_game(MiniGame::DiceKingdom);
        store.set_transitioning(true);
        store.return_to_spinner();
        assert_eq!(store.current_game(), MiniGame::Spinner);
        assert!(!store.is_transitioning());
    }

    #[test]
    fn session_state_uses_store_field_names() {
        let mut store = StatsStore::new();
        store.record_coin_flip(true);
        let json = serde_json::to_string(&store.snapshot()).unwrap();
        assert!(json.contains("\"currentGame\":\"spinner\""));
        assert!(json.contains("\"isTransitioning\":false"));
        assert!(json.contains("\"totalFlips\":1"));
        assert!(json.contains("\"resourcesCollected\":0"));
        assert!(json.contains("\"marbleCollector\""));
    }
}
