//! Game loop thread: runs the simulation engine at its tick rate and
//! publishes each step.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Replication events go to the transport
//! and the latest report is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use flybot_core::state::FrameReport;
use flybot_sim::{SimConfig, SimulationEngine};

use crate::state::{AppState, GameLoopCommand};
use crate::transport::ReplicationTransport;

/// Wall-clock duration of one step at `tick_rate` Hz.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    config: SimConfig,
    transport: Box<dyn ReplicationTransport>,
) -> io::Result<AppState> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_report = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_report);

    let thread = std::thread::Builder::new()
        .name("flybot-game-loop".into())
        .spawn(move || {
            run_game_loop(config, transport, cmd_rx, &shared);
        })?;

    Ok(AppState::new(cmd_tx, latest_report, thread))
}

/// Forward queued commands to the engine. Returns false on shutdown.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Contact(contact)) => engine.push_contact(contact),
            Ok(GameLoopCommand::BeginTeardown) => engine.begin_teardown(),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// Run one step and hand its output to the transport and shared state.
fn step(
    engine: &mut SimulationEngine,
    transport: &mut dyn ReplicationTransport,
    latest_report: &Mutex<Option<FrameReport>>,
) {
    let report = engine.tick();
    transport.publish(report.time.tick, &report.replication);

    if let Ok(mut lock) = latest_report.lock() {
        *lock = Some(report);
    }
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    mut transport: Box<dyn ReplicationTransport>,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_report: &Mutex<Option<FrameReport>>,
) {
    let period = tick_duration(config.tick_rate);
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    tracing::info!(tick_rate = engine.config().tick_rate, role = ?engine.role(), "game loop started");

    while drain_commands(&mut engine, &cmd_rx) {
        step(&mut engine, transport.as_mut(), latest_report);

        next_tick_time += period;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > period * 2 {
            // Too far behind; reset to avoid catch-up spiral
            tracing::warn!(behind_ms = (now - next_tick_time).as_millis() as u64, "game loop overrun");
            next_tick_time = now;
        }
    }

    tracing::info!(ticks = engine.time().tick, "game loop stopped");
}
