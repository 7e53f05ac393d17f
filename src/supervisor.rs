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

//! Supervision of the fixed process topology: router manager, coordinator, and test peers.

use crate::{
    config::{Config, CONFIG},
    process::{ManagedProcess, ProcessError, ProcessState},
};

/// Supervisor for the multi-process topology needed to exercise the routing suite.
///
/// [`Supervisor::start`] spawns the members in a fixed order: first the router manager, then
/// (after a settling delay) the coordinator, and finally one test peer per configured peer name.
/// The order matters, as the coordinator and the peers connect to the router manager's control
/// endpoint. The member list is append-only during `start` and read-only afterwards; do not call
/// [`Supervisor::check`] or [`Supervisor::terminate`] concurrently with an in-progress `start`.
pub struct Supervisor {
    config: Config,
    processes: Vec<ManagedProcess>,
}

impl Supervisor {
    /// Create a new supervisor using the global [`CONFIG`]. Nothing is spawned yet.
    pub fn new() -> Self {
        Self::with_config(CONFIG.clone())
    }

    /// Create a new supervisor with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            processes: Vec::new(),
        }
    }

    /// Start all members of the topology in order.
    pub async fn start(&mut self) -> Result<(), ProcessError> {
        let rtrmgr = self.config.in_builddir(&self.config.topology.router_manager);
        self.spawn(rtrmgr).await?;

        // give the router manager time to open its control endpoint
        tokio::time::sleep(self.config.topology.settle_delay()).await;

        let coord = self.config.in_builddir(&self.config.topology.coordinator);
        self.spawn(coord).await?;

        let peer = self.config.in_builddir(&self.config.topology.test_peer);
        for name in self.config.topology.peers.clone() {
            self.spawn(format!("{peer} -s {name}")).await?;
        }

        Ok(())
    }

    async fn spawn(&mut self, command: String) -> Result<(), ProcessError> {
        let mut process = ManagedProcess::new(command);
        process.start().await?;
        self.processes.push(process);
        Ok(())
    }

    /// Whether every member of the topology is still running. Vacuously `true` before `start`.
    pub fn check(&self) -> bool {
        self.processes
            .iter()
            .all(|p| p.status() == ProcessState::Running)
    }

    /// The command line and current state of every member, in start order.
    pub fn statuses(&self) -> impl Iterator<Item = (&str, ProcessState)> {
        self.processes.iter().map(|p| (p.command(), p.status()))
    }

    /// Terminate all members, best-effort. A member that fails to die (or times out) is logged
    /// and does not prevent the remaining members from being terminated; the first error is
    /// returned once every member has been attempted.
    pub async fn terminate(&mut self) -> Result<(), ProcessError> {
        let bound = self.config.topology.terminate_timeout();
        let mut first_error = None;
        for process in &mut self.processes {
            if let Err(e) = process.terminate(bound).await {
                log::warn!("{e}");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}
