use std::process::ExitCode;
use std::time::Duration;

use skirmish_app::demo;
use skirmish_app::game_loop::spawn_game_loop;
use skirmish_app::state::{AppState, GameLoopCommand};
use skirmish_core::commands::SimCommand;
use skirmish_core::constants::TICK_RATE;
use skirmish_sim::engine::SimConfig;

/// Demo length cap: one minute of simulated time.
const DEMO_MAX_TICKS: u64 = 60 * TICK_RATE as u64;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = args.next();
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let config = SimConfig {
        seed,
        ..Default::default()
    };

    let result = match mode.as_deref() {
        None | Some("demo") => run_demo(config),
        Some("realtime") => run_realtime(config),
        Some(other) => {
            eprintln!("unknown mode `{other}`; expected `demo` or `realtime`");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Run the scripted encounter as fast as possible and print its summary.
fn run_demo(config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let summary = demo::run(config, DEMO_MAX_TICKS)?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Drive the threaded game loop for two seconds of wall time.
fn run_realtime(config: SimConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new();
    let (tx, handle) = spawn_game_loop(config, state.latest_snapshot.clone())?;
    if let Ok(mut command_tx) = state.command_tx.lock() {
        *command_tx = Some(tx);
    }
    if let Ok(mut running) = state.running.lock() {
        *running = true;
    }

    for _ in 0..3 {
        state.send(GameLoopCommand::Sim(SimCommand::SpawnNearPlayer));
    }
    std::thread::sleep(Duration::from_secs(2));
    state.send(GameLoopCommand::Shutdown);

    if handle.join().is_err() {
        return Err("game loop thread panicked".into());
    }
    if let Some(snapshot) = state.latest() {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
