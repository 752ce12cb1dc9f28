//! Offline simulation of a long session.
//!
//! An autoplayer spins the wheel and plays a few rounds of whatever comes up,
//! with every delay set to zero. At the end the observed frequencies are
//! printed next to the theoretical ones.
//!
//! Usage: cargo run --bin simulate -- [OPTIONS]
//!
//! Options:
//!   --rounds N         Spins to play (default: 1000)
//!   --seed S           RNG seed (default: 42)
//!   --strategy NAME    stubborn, random or informed (default: informed)
//!   --visit N          Rounds per mini-game visit (default: 10)

use probability_session::autoplay::{AutoPlayer, Strategy};
use probability_session::config::{Pacing, SessionConfig};
use probability_session::controller::GameController;
use probability_session::render;
use probability_shared::game::SEGMENTS;
use probability_shared::games::coin_flip::CoinFace;
use probability_shared::games::dice::sum_probability_percent;
use probability_shared::games::marble::{MarbleColor, MarbleJar};
use probability_shared::games::plinko::{BOUNCES, SLOT_COUNT};
use probability_shared::protocol::Event;
use probability_shared::random::RngSource;

// === Observed frequencies ===

#[derive(Debug, Default)]
struct Tally {
    segments: [u64; SEGMENTS.len()],
    flips: u64,
    heads: u64,
    /// Indexed by dice sum, 2..=12 used
    dice_sums: [u64; 13],
    rolls: u64,
    /// Colors drawn from a full jar
    first_draws: [u64; MarbleColor::ALL.len()],
    slots: [u64; SLOT_COUNT],
    drops: u64,
    ignored: u64,
}

impl Tally {
    fn spins(&self) -> u64 {
        self.segments.iter().sum()
    }

    fn record(&mut self, event: &Event) {
        match event {
            Event::SpinnerLanded(msg) => {
                if let Some(count) = self.segments.get_mut(msg.segment as usize) {
                    *count += 1;
                }
            }
            Event::CoinFlipped(msg) => {
                self.flips += 1;
                self.heads += u64::from(msg.outcome == CoinFace::Heads);
            }
            Event::DiceRolled(msg) => {
                self.rolls += 1;
                self.dice_sums[msg.sum as usize] += 1;
            }
            Event::MarbleDrawn(msg) => {
                if msg.remaining as usize + 1 == MarbleJar::initial_size() {
                    let idx = MarbleColor::ALL
                        .iter()
                        .position(|c| *c == msg.outcome)
                        .unwrap_or(0);
                    self.first_draws[idx] += 1;
                }
            }
            Event::BallDropped(msg) => {
                self.drops += 1;
                self.slots[msg.slot.index()] += 1;
            }
            Event::Ignored(msg) => {
                self.ignored += 1;
                eprintln!("Unexpected refusal of {}: {:?}", msg.command, msg.reason);
            }
            _ => {}
        }
    }
}

fn percent(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn print_row(label: &str, count: u64, total: u64, theory: f64) {
    println!(
        "  {:<18} {:>7} {:>6.1}%   (theory {:>5.1}%)",
        label,
        count,
        percent(count, total),
        theory
    );
}

/// Chance that `k` of `n` fair bounces go right.
fn binomial_percent(n: usize, k: usize) -> f64 {
    let mut ways = 1.0;
    for i in 0..k {
        ways = ways * (n - i) as f64 / (i + 1) as f64;
    }
    ways * 100.0 / 2f64.powi(n as i32)
}

// === Options ===

#[derive(Debug, PartialEq)]
struct Options {
    rounds: u64,
    seed: u64,
    strategy: Strategy,
    visit: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            rounds: 1000,
            seed: 42,
            strategy: Strategy::Informed,
            visit: 10,
        }
    }
}

/// The value after a numeric flag.
fn flag_value<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> Result<T, String> {
    value
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| format!("{} needs a non-negative whole number", flag))
}

impl Options {
    /// Parse flags, skipping the program name. Unknown flags are ignored.
    fn parse(args: &[String]) -> Result<Self, String> {
        let mut options = Options::default();
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--rounds" => {
                    i += 1;
                    options.rounds = flag_value(args.get(i), "--rounds")?;
                }
                "--seed" => {
                    i += 1;
                    options.seed = flag_value(args.get(i), "--seed")?;
                }
                "--strategy" => {
                    i += 1;
                    options.strategy = args
                        .get(i)
                        .and_then(|s| Strategy::from_name(s))
                        .ok_or("--strategy must be stubborn, random or informed")?;
                }
                "--visit" => {
                    i += 1;
                    options.visit = flag_value(args.get(i), "--visit")?;
                }
                _ => {}
            }
            i += 1;
        }
        Ok(options)
    }
}

// === Main ===

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let Options {
        rounds,
        seed,
        strategy,
        visit,
    } = match Options::parse(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let config = SessionConfig {
        rng_seed: Some(seed),
        pacing: Pacing::instant(),
        ..Default::default()
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid session configuration: {}", e);
        std::process::exit(1);
    }

    println!("=== Probability Spinner Simulation ===");
    println!("Spins: {}", rounds);
    println!("Seed: {}", seed);
    println!("Strategy: {}", strategy.name());
    println!("Rounds per visit: {}", visit);
    println!();

    let mut controller = GameController::from_config(&config);
    let mut player_rng = RngSource::seeded(seed.wrapping_add(1));
    let mut player = AutoPlayer::new(strategy, visit);
    let dt = config.tick_dt();
    let mut tally = Tally::default();

    while tally.spins() < rounds {
        let snapshot = controller.snapshot();
        let events = match player.next_command(&snapshot, &mut player_rng) {
            Some(command) => controller.handle(command),
            None => controller.tick(dt),
        };
        for event in &events {
            tally.record(event);
        }
    }

    // === Report ===

    let spins = tally.spins();
    println!("Spinner segments ({} spins)", spins);
    for (segment, count) in SEGMENTS.iter().zip(tally.segments) {
        print_row(segment.label, count, spins, 100.0 / SEGMENTS.len() as f64);
    }

    println!();
    println!("Coin flips ({} flips)", tally.flips);
    print_row("heads", tally.heads, tally.flips, 50.0);
    print_row("tails", tally.flips - tally.heads, tally.flips, 50.0);

    println!();
    println!("Dice sums ({} rolls)", tally.rolls);
    for sum in 2..=12u8 {
        print_row(
            &format!("sum {}", sum),
            tally.dice_sums[sum as usize],
            tally.rolls,
            sum_probability_percent(sum),
        );
    }

    let first_total: u64 = tally.first_draws.iter().sum();
    let full_jar = MarbleJar::new();
    println!();
    println!("First marble from a full jar ({} draws)", first_total);
    for (color, count) in MarbleColor::ALL.iter().zip(tally.first_draws) {
        print_row(
            color.name(),
            count,
            first_total,
            full_jar.probability_percent(*color),
        );
    }

    println!();
    println!("Plinko slots ({} drops)", tally.drops);
    for (slot, count) in tally.slots.iter().enumerate() {
        print_row(
            &format!("slot {}", slot),
            *count,
            tally.drops,
            binomial_percent(BOUNCES, slot),
        );
    }

    println!();
    println!("=== Final Results ===");
    println!("{}", render::render_stats(controller.state()));
    if tally.ignored > 0 {
        println!("Refused commands: {}", tally.ignored);
    }
}
