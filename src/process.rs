// RoutingLab: black-box test lab for a link-state routing engine
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Lifecycle management for a single externally spawned process.

use std::{fmt, process::Stdio, sync::Arc, time::Duration};

use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
    sync::{watch, Notify},
    time::timeout,
};

/// The lifecycle state of a [`ManagedProcess`]. Transitions are monotonic: `Init` to `Running` to
/// `Terminated`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ProcessState {
    /// The process was not yet spawned.
    Init,
    /// The process is running and its output is being drained.
    Running,
    /// The process has exited and its output is fully drained.
    Terminated,
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("INIT"),
            Self::Running => f.write_str("RUNNING"),
            Self::Terminated => f.write_str("TERMINATED"),
        }
    }
}

/// A single externally spawned command with its output drained in the background.
///
/// [`ManagedProcess::start`] spawns the command and hands the child to a drain task. The drain
/// task owns the child for its entire lifetime: it echoes every output line to the harness
/// streams, and it publishes [`ProcessState::Terminated`] only once the child has exited and both
/// output streams hit end-of-stream. [`ManagedProcess::terminate`] therefore waits on that state
/// transition, which guarantees that the caller never observes a half-killed process.
pub struct ManagedProcess {
    command: String,
    state: watch::Receiver<ProcessState>,
    state_tx: Option<watch::Sender<ProcessState>>,
    kill: Arc<Notify>,
}

impl ManagedProcess {
    /// Create a new process in state [`ProcessState::Init`]. The command is an argv line split on
    /// whitespace; nothing is spawned yet.
    pub fn new(command: impl Into<String>) -> Self {
        let (state_tx, state) = watch::channel(ProcessState::Init);
        Self {
            command: command.into(),
            state,
            state_tx: Some(state_tx),
            kill: Arc::new(Notify::new()),
        }
    }

    /// The argv line this process was created with.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The current lifecycle state. Never blocks and is safe to call from any context.
    pub fn status(&self) -> ProcessState {
        *self.state.borrow()
    }

    /// Spawn the command and transition to [`ProcessState::Running`]. The child's stdout and
    /// stderr are drained by a background task until end-of-stream, so this function returns as
    /// soon as the child is spawned.
    pub async fn start(&mut self) -> Result<(), ProcessError> {
        let state_tx = self
            .state_tx
            .take()
            .ok_or_else(|| ProcessError::AlreadyStarted(self.command.clone()))?;

        let mut args = self.command.split_whitespace();
        let program = args.next().ok_or(ProcessError::EmptyCommand)?;

        log::debug!("command: {}", self.command);

        let mut child = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProcessError::Spawn(self.command.clone(), e))?;

        log::debug!(
            "PID: {}",
            child.id().map(|p| p.to_string()).unwrap_or_default()
        );

        let _ = state_tx.send(ProcessState::Running);

        let command = self.command.clone();
        let kill = self.kill.clone();
        tokio::spawn(async move {
            let mut stdout = BufReader::new(child.stdout.take().unwrap()).lines();
            let mut stderr = BufReader::new(child.stderr.take().unwrap()).lines();
            let mut out_done = false;
            let mut err_done = false;

            // Drain until both streams hit EOF. The kill request arrives here so that the child
            // handle stays owned by a single task.
            while !(out_done && err_done) {
                tokio::select! {
                    line = stdout.next_line(), if !out_done => match line {
                        Ok(Some(line)) => println!("{line}"),
                        _ => out_done = true,
                    },
                    line = stderr.next_line(), if !err_done => match line {
                        Ok(Some(line)) => eprintln!("{line}"),
                        _ => err_done = true,
                    },
                    _ = kill.notified() => {
                        if let Err(e) = child.kill().await {
                            log::warn!("cannot kill `{command}`: {e}");
                        }
                    }
                }
            }

            match child.wait().await {
                Ok(status) => log::debug!("exiting: {command} ({status})"),
                Err(e) => log::warn!("cannot wait for `{command}`: {e}"),
            }
            let _ = state_tx.send(ProcessState::Terminated);
        });

        Ok(())
    }

    /// Forcefully terminate the process and wait until it has exited and its output is fully
    /// drained, bounded by `bound`. If the process is not running, this is a no-op.
    ///
    /// Exceeding the bound surfaces as [`ProcessError::TerminateTimeout`] rather than being
    /// masked as success; the process may still be alive in that case.
    pub async fn terminate(&mut self, bound: Duration) -> Result<(), ProcessError> {
        match self.status() {
            ProcessState::Running => {}
            state => {
                log::debug!("{} not running ({state})", self.command);
                return Ok(());
            }
        }

        log::debug!("sending kill to {}", self.command);
        self.kill.notify_one();

        let state = &mut self.state;
        let wait_terminated = async {
            while *state.borrow() != ProcessState::Terminated {
                if state.changed().await.is_err() {
                    break;
                }
            }
        };
        timeout(bound, wait_terminated)
            .await
            .map_err(|_| ProcessError::TerminateTimeout(self.command.clone()))
    }
}

/// Errors thrown when managing a single process.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The command could not be spawned.
    #[error("Cannot spawn `{0}`: {1}")]
    Spawn(String, std::io::Error),
    /// The command line was empty.
    #[error("Cannot spawn an empty command line")]
    EmptyCommand,
    /// `start` was called more than once.
    #[error("Process `{0}` was already started")]
    AlreadyStarted(String),
    /// The process did not die within the given bound.
    #[error("Timeout while terminating `{0}`")]
    TerminateTimeout(String),
}
