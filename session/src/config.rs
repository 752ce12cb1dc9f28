use probability_shared::config::SpinnerConfig;
use std::time::Duration;

const SEED_ENV: &str = "PROBABILITY_SEED";
const TICK_HZ_ENV: &str = "PROBABILITY_TICK_HZ";

/// Delays between a player action and what the player gets to see.
/// They pace the presentation only; outcomes are sampled up front.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pacing {
    pub coin_reveal: Duration,
    pub dice_reveal: Duration,
    /// Pause after the wheel stops, before the screen starts fading
    pub landing_pause: Duration,
    /// Length of the fade into the selected mini-game
    pub transition_fade: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            coin_reveal: Duration::from_millis(1000),
            dice_reveal: Duration::from_millis(800),
            landing_pause: Duration::from_millis(500),
            transition_fade: Duration::from_millis(500),
        }
    }
}

impl Pacing {
    /// Everything reveals on the next controller call.
    pub fn instant() -> Self {
        Self {
            coin_reveal: Duration::ZERO,
            dice_reveal: Duration::ZERO,
            landing_pause: Duration::ZERO,
            transition_fade: Duration::ZERO,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub tick_rate_hz: u32,
    /// Snapshot rate while the wheel is turning
    pub snapshot_rate_hz: u32,
    /// Fixed seed for reproducible sessions, entropy when `None`
    pub rng_seed: Option<u64>,
    pub pacing: Pacing,
    pub spinner: SpinnerConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            snapshot_rate_hz: 15,
            rng_seed: None,
            pacing: Pacing::default(),
            spinner: SpinnerConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by `PROBABILITY_SEED` and `PROBABILITY_TICK_HZ`.
    pub fn from_env() -> Result<Self, String> {
        let mut config = Self::default();
        if let Ok(seed) = std::env::var(SEED_ENV) {
            config.rng_seed = Some(parse_value(SEED_ENV, &seed)?);
        }
        if let Ok(hz) = std::env::var(TICK_HZ_ENV) {
            config.tick_rate_hz = parse_value(TICK_HZ_ENV, &hz)?;
        }
        Ok(config)
    }

    /// Apply `--seed N` and `--tick-hz N`. Other arguments are left to the caller.
    pub fn apply_args(&mut self, args: &[String]) -> Result<(), String> {
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--seed" => {
                    i += 1;
                    self.rng_seed = Some(parse_value("--seed", flag_value(args, i, "--seed")?)?);
                }
                "--tick-hz" => {
                    i += 1;
                    self.tick_rate_hz = parse_value("--tick-hz", flag_value(args, i, "--tick-hz")?)?;
                }
                _ => {}
            }
            i += 1;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tick_rate_hz == 0 || self.tick_rate_hz > 1000 {
            return Err("tick_rate_hz must be in 1..=1000".to_string());
        }
        if self.snapshot_rate_hz == 0 || self.snapshot_rate_hz > self.tick_rate_hz {
            return Err("snapshot_rate_hz must be in 1..=tick_rate_hz".to_string());
        }
        let longest = Duration::from_secs(60);
        let pacing = &self.pacing;
        for (name, delay) in [
            ("coin_reveal", pacing.coin_reveal),
            ("dice_reveal", pacing.dice_reveal),
            ("landing_pause", pacing.landing_pause),
            ("transition_fade", pacing.transition_fade),
        ] {
            if delay > longest {
                return Err(format!("{} must be at most 60s", name));
            }
        }
        self.spinner.validate()
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn parse_value<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid value for {}: {:?}", name, raw))
}
