//! Flappy Sim headless runner
//!
//! Loads an optional JSON config, lets the autopilot play one round at a
//! fixed frame rate and prints the final snapshot as JSON.
//!
//! Usage: flappy-sim [config.json] [--ticks N] [--seed S]

use flappy_sim::Config;
use flappy_sim::audio::ChannelAudio;
use flappy_sim::consts::SIM_DT;
use flappy_sim::runner::Runner;
use flappy_sim::sim::GamePhase;

/// Frames to run when `--ticks` isn't given (one minute at 60 Hz)
const DEFAULT_TICKS: u64 = 60 * 60;

struct Args {
    config_path: Option<String>,
    ticks: u64,
    seed: u64,
}

fn parse_args() -> Args {
    let mut args = Args {
        config_path: None,
        ticks: DEFAULT_TICKS,
        seed: 0x5EED,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ticks" => match iter.next().and_then(|v| v.parse().ok()) {
                Some(ticks) => args.ticks = ticks,
                None => log::warn!("--ticks needs a number, using {}", args.ticks),
            },
            "--seed" => match iter.next().and_then(|v| v.parse().ok()) {
                Some(seed) => args.seed = seed,
                None => log::warn!("--seed needs a number, using {}", args.seed),
            },
            _ => args.config_path = Some(arg),
        }
    }
    args
}

fn main() {
    env_logger::init();
    log::info!("Flappy Sim (headless) starting...");

    let args = parse_args();
    let config = match &args.config_path {
        Some(path) => Config::load(path),
        None => Config::default(),
    };

    let audio = ChannelAudio::spawn(|effect| log::info!("play sound: {}", effect.as_str()));
    let mut runner = Runner::new(config, args.seed, audio);
    runner.set_autopilot(true);

    for _ in 0..args.ticks {
        runner.frame(SIM_DT);
        if runner.state().phase == GamePhase::Dead {
            break;
        }
    }

    let state = runner.state();
    log::info!(
        "Finished: phase {:?}, score {}, {} ticks",
        state.phase,
        state.score,
        state.time_ticks
    );

    match serde_json::to_string_pretty(&runner.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}
