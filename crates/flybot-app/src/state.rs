//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use flybot_core::commands::PlayerCommand;
use flybot_core::state::FrameReport;
use flybot_sim::shot::ContactEvent;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// A contact from an external physics layer.
    Contact(ContactEvent),
    /// Refuse new shots ahead of shutdown.
    BeginTeardown,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handle to a running game loop.
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    /// Latest report, updated by the game loop thread after each step.
    pub latest_report: Arc<Mutex<Option<FrameReport>>>,
    thread: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(
        command_tx: mpsc::Sender<GameLoopCommand>,
        latest_report: Arc<Mutex<Option<FrameReport>>>,
        thread: JoinHandle<()>,
    ) -> Self {
        Self {
            command_tx,
            latest_report,
            thread: Some(thread),
        }
    }

    /// Forward a player command. Returns false once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Clone of the most recent report, if a step has run.
    pub fn latest(&self) -> Option<FrameReport> {
        self.latest_report.lock().ok().and_then(|lock| lock.clone())
    }

    /// Stop the loop and wait for it to exit.
    pub fn shutdown(&mut self) {
        let _ = self.command_tx.send(GameLoopCommand::BeginTeardown);
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("game loop thread panicked");
            }
        }
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        self.shutdown();
    }
}
