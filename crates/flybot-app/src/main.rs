//! Headless duel: two pilots join, one opens fire, the other strafes.
//!
//! Environment:
//! - `FLYBOT_CONFIG`: optional TOML config path.
//! - `FLYBOT_SECONDS`: wall-clock run length (default 5).
//! - `RUST_LOG`, `LOG_FORMAT=json`: log filtering and format.

use std::time::Duration;

use flybot_app::game_loop::spawn_game_loop;
use flybot_app::transport::LogTransport;
use flybot_core::commands::PlayerCommand;
use flybot_core::types::PlayerId;
use flybot_sim::{ConfigError, SimConfig};
use glam::DVec3;

const DEFAULT_RUN_SECONDS: f64 = 5.0;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start game loop: {0}")]
    Thread(#[from] std::io::Error),

    #[error("FLYBOT_SECONDS must be a non-negative number, got {0:?}")]
    RunLength(String),
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn load_config() -> Result<SimConfig, ConfigError> {
    match std::env::var("FLYBOT_CONFIG") {
        Ok(path) => {
            tracing::info!(%path, "loading config");
            SimConfig::load(path)
        }
        Err(_) => Ok(SimConfig::default()),
    }
}

fn run_length() -> Result<Duration, AppError> {
    let Ok(raw) = std::env::var("FLYBOT_SECONDS") else {
        return Ok(Duration::from_secs_f64(DEFAULT_RUN_SECONDS));
    };
    raw.parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
        .ok_or(AppError::RunLength(raw))
}

fn main() -> Result<(), AppError> {
    init_tracing();

    let config = load_config()?;
    let run_for = run_length()?;
    let step = Duration::from_secs_f64(config.dt());

    let mut state = spawn_game_loop(config, Box::new(LogTransport::new()))?;

    let shooter = PlayerId(1);
    let target = PlayerId(2);
    state.send(PlayerCommand::Join { player: shooter });
    state.send(PlayerCommand::Join { player: target });
    state.send(PlayerCommand::SetShooting {
        player: shooter,
        shooting: true,
    });

    // The target weaves left and right once a second.
    let started = std::time::Instant::now();
    while started.elapsed() < run_for {
        let side = if started.elapsed().as_secs() % 2 == 0 { 1.0 } else { -1.0 };
        let sent = state.send(PlayerCommand::Move {
            player: target,
            input: DVec3::new(0.0, side * 0.2, 0.0),
        });
        if !sent {
            break;
        }
        std::thread::sleep(step);
    }

    state.shutdown();

    match state.latest() {
        Some(report) => {
            tracing::info!(
                ticks = report.time.tick,
                elapsed_secs = report.time.elapsed_secs,
                shots_in_flight = report.shots.len(),
                "duel finished"
            );
            for pawn in &report.pawns {
                tracing::info!(
                    player = pawn.player.0,
                    health = pawn.health,
                    power = pawn.power,
                    "final state"
                );
            }
        }
        None => tracing::warn!("game loop produced no report"),
    }

    Ok(())
}
