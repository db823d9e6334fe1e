//! gold-rush — driver binary for the two-team cooperative gold-retrieval
//! simulation.
//!
//! Invoked as:
//!
//! ```text
//! gold-rush run [--gold N] [--steps N] [--seed N] [--deposit-red X,Y] [--deposit-blue X,Y]
//! ```
//!
//! Builds a board, runs the step pipeline to completion, and prints the
//! final red/blue deposit totals. Everything here — argument parsing,
//! progress printing, the final summary table — is driver-layer concern;
//! the library crates underneath know nothing about a command line.

use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use gr_core::{Position, Step};
use gr_sim::{NoopObserver, SimConfig, SimulationBuilder};

// ── Defaults ──────────────────────────────────────────────────────────────────

const BOARD_WIDTH: i32 = 30;
const BOARD_HEIGHT: i32 = 30;
const TEAM_SIZE: usize = 5;
const DEFAULT_GOLD: u32 = 40;
const DEFAULT_STEPS: u64 = 2_000;
const DEFAULT_SEED: u64 = 0;

struct Args {
    gold: u32,
    steps: u64,
    seed: u64,
    deposit_red: Option<Position>,
    deposit_blue: Option<Position>,
}

impl Default for Args {
    fn default() -> Self {
        Self { gold: DEFAULT_GOLD, steps: DEFAULT_STEPS, seed: DEFAULT_SEED, deposit_red: None, deposit_blue: None }
    }
}

fn parse_position(spec: &str, flag: &str) -> Result<Position> {
    let (x, y) = spec.split_once(',').with_context(|| format!("{flag} expects X,Y, got {spec:?}"))?;
    let x: i32 = x.trim().parse().with_context(|| format!("{flag}: bad x coordinate {x:?}"))?;
    let y: i32 = y.trim().parse().with_context(|| format!("{flag}: bad y coordinate {y:?}"))?;
    Ok(Position::new(x, y))
}

/// Hand-rolled flag parser — there is no arg-parsing crate in this
/// workspace, matching every other binary built on top of these crates.
fn parse_args(raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut raw = raw;
    let mut args = Args::default();

    match raw.next() {
        Some(cmd) if cmd == "run" => {}
        Some(other) => bail!("unknown subcommand {other:?} (expected \"run\")"),
        None => bail!("expected a subcommand (\"run\")"),
    }

    while let Some(flag) = raw.next() {
        let mut next_value = || raw.next().with_context(|| format!("{flag} expects a value"));
        match flag.as_str() {
            "--gold" => args.gold = next_value()?.parse().context("--gold expects an integer")?,
            "--steps" => args.steps = next_value()?.parse().context("--steps expects an integer")?,
            "--seed" => args.seed = next_value()?.parse().context("--seed expects an integer")?,
            "--deposit-red" => args.deposit_red = Some(parse_position(&next_value()?, "--deposit-red")?),
            "--deposit-blue" => args.deposit_blue = Some(parse_position(&next_value()?, "--deposit-blue")?),
            other => bail!("unknown flag {other:?}"),
        }
    }

    Ok(args)
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(raw_args: Vec<String>) -> Result<()> {
    let args = parse_args(raw_args.into_iter())?;

    println!("=== gold-rush ===");
    println!(
        "board: {BOARD_WIDTH}x{BOARD_HEIGHT}  gold: {}  steps: {}  seed: {}  team size: {TEAM_SIZE} per side",
        args.gold, args.steps, args.seed
    );

    let mut config = SimConfig::new(BOARD_WIDTH, BOARD_HEIGHT, args.gold, TEAM_SIZE, args.seed);
    if let (Some(red), Some(blue)) = (args.deposit_red, args.deposit_blue) {
        config = config.with_deposits(red, blue);
    } else if args.deposit_red.is_some() || args.deposit_blue.is_some() {
        bail!("--deposit-red and --deposit-blue must be given together");
    }

    let mut controller = SimulationBuilder::new(config).build().context("failed to build simulation")?;

    let t0 = std::time::Instant::now();
    controller.run(Step(args.steps), &mut NoopObserver).context("simulation aborted")?;
    let elapsed = t0.elapsed();

    let red_total = controller.sink_total(gr_core::Team::Red);
    let blue_total = controller.sink_total(gr_core::Team::Blue);

    println!();
    println!("ran {} steps in {:.3} s", controller.step_count().0, elapsed.as_secs_f64());
    println!();
    println!("{:<8} {:<8}", "team", "gold delivered");
    println!("{}", "-".repeat(18));
    println!("{:<8} {:<8}", "red", red_total);
    println!("{:<8} {:<8}", "blue", blue_total);

    Ok(())
}
