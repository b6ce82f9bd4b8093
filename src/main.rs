use std::thread;
use std::time::Duration;

use acc_sim::services::{resolve_weather, OfflineWeather};
use acc_sim::simulation::{
    AccSim, Command, DrivingMode, RoadCategory, ScheduledCommand, SimDriver, TICK_MILLIS,
};
use anyhow::Result;
use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "acc_sim")]
#[command(about = "Adaptive cruise control simulation (headless)")]
struct Cli {
    /// Number of 100ms simulation ticks to run
    #[arg(long, default_value = "600")]
    ticks: u32,

    /// Initial driving mode (acc or manual)
    #[arg(long)]
    mode: Option<DrivingMode>,

    /// Initial road category (highway or city)
    #[arg(long)]
    road: Option<RoadCategory>,

    /// Simulated clock value at startup, in milliseconds
    #[arg(long, default_value = "0")]
    start_ms: u64,

    /// Command to issue before a tick, e.g. 50:mode=acc (repeatable)
    #[arg(long = "command", value_name = "TICK:CMD")]
    commands: Vec<ScheduledCommand>,

    /// Press the pedals and flip modes at random
    #[arg(long)]
    random_driver: bool,

    /// Seed for the random driver
    #[arg(long)]
    seed: Option<u64>,

    /// Tick on a background thread at the real 100ms cadence
    #[arg(long)]
    realtime: bool,

    /// Print a summary every N ticks
    #[arg(long, default_value = "10")]
    report_every: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,acc_sim=info"),
    )
    .init();

    let cli = Cli::parse();

    let mut sim = AccSim::with_start_time(cli.start_ms);
    if let Some(road) = cli.road {
        sim.set_road_category(road);
    }
    if let Some(mode) = cli.mode {
        sim.set_mode(mode);
    }

    let weather = resolve_weather(&OfflineWeather, None);
    println!("Running ACC simulation...");
    println!("Ticks: {}, Tick: {}ms, Weather: {}", cli.ticks, TICK_MILLIS, weather);
    println!();

    let driver = RandomDriver::new(cli.random_driver, cli.seed);
    let sim = if cli.realtime {
        run_realtime(sim, &cli, driver)
    } else {
        run_headless(sim, &cli, driver)
    };

    println!("=== Final State ===");
    sim.print_summary();

    let state = sim.state();
    info!("=== SIMULATION COMPLETE ===");
    info!("Simulated time: {:.1}s", sim.time_ms() as f64 / 1000.0);
    info!("Final speed: {:.1} km/h", state.speed);
    info!("Final gap: {:.1} m", state.distance);
    info!("Fuel remaining: {:.2}%", state.fuel);
    info!("Samples recorded: {}", state.history.len());
    Ok(())
}

/// Issues random pedal and mode commands, seeded for reproducible runs
struct RandomDriver {
    enabled: bool,
    rng: Option<StdRng>,
}

impl RandomDriver {
    fn new(enabled: bool, seed: Option<u64>) -> Self {
        Self {
            enabled,
            rng: seed.map(StdRng::seed_from_u64),
        }
    }

    fn roll(&mut self) -> u32 {
        match &mut self.rng {
            Some(rng) => rng.random_range(0..100),
            None => rand::rng().random_range(0..100),
        }
    }

    fn next_command(&mut self) -> Option<Command> {
        if !self.enabled {
            return None;
        }
        match self.roll() {
            0 => Some(Command::SetMode(DrivingMode::Automatic)),
            1 => Some(Command::SetMode(DrivingMode::Manual)),
            2..=31 => Some(Command::Accelerate),
            32..=41 => Some(Command::Brake),
            _ => None,
        }
    }
}

fn commands_for(cli: &Cli, tick: u32) -> impl Iterator<Item = Command> + '_ {
    cli.commands
        .iter()
        .filter(move |c| c.tick == tick)
        .map(|c| c.command)
}

/// Run ticks back to back on this thread
fn run_headless(mut sim: AccSim, cli: &Cli, mut driver: RandomDriver) -> AccSim {
    for tick in 1..=cli.ticks {
        for command in commands_for(cli, tick).chain(driver.next_command()) {
            if !command.apply(&mut sim) {
                debug!("tick {}: '{}' rejected", tick, command);
            }
        }

        sim.tick();

        if cli.report_every > 0 && tick % cli.report_every == 0 {
            println!("--- After tick {} ---", tick);
            println!("{}", sim.summary());
        }
    }
    sim
}

/// Run on the periodic driver thread, feeding commands in between ticks
fn run_realtime(sim: AccSim, cli: &Cli, mut driver: RandomDriver) -> AccSim {
    let ticker = SimDriver::spawn(sim, Duration::from_millis(TICK_MILLIS));

    for tick in 1..=cli.ticks {
        for command in commands_for(cli, tick).chain(driver.next_command()) {
            if !ticker.send(command) {
                debug!("tick {}: '{}' rejected", tick, command);
            }
        }

        thread::sleep(Duration::from_millis(TICK_MILLIS));

        if cli.report_every > 0 && tick % cli.report_every == 0 {
            println!("--- After ~{} ticks ---", tick);
            println!("{}", ticker.summary());
        }
    }

    ticker.stop()
}
