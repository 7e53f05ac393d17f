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

//! This module contains the code for reading the configuration.
//!
//! The configuration tells the lab where the build tree of the routing suite under test is
//! located, how to invoke the external binaries (the interactive routing-computation engine, the
//! LSA builder, the router manager, the coordinator and the test peers), and the timing bounds
//! used when standing up and tearing down the process topology.
//!
//! When the environment variable `ROUTING_LAB_CONFIG` is set, the file
//! `$ROUTING_LAB_CONFIG/config.toml` is read. Otherwise, the default configuration is used, which
//! assumes that the harness runs from within the build tree (with the build directory being the
//! parent of the current working directory).

use std::{path::PathBuf, time::Duration};

use lazy_static::lazy_static;
use serde::Deserialize;

macro_rules! expect {
    ($result:expr, $($rest:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!("Error: {}: {}\n", format!($($rest)*), e);
            panic!()
        })
    };
}

lazy_static! {
    pub static ref CONFIG: Config = {
        match std::env::var("ROUTING_LAB_CONFIG") {
            Ok(dir) => {
                let config_str = expect!(
                    std::fs::read_to_string(format!("{dir}/config.toml")),
                    "Cannot read '{dir}/config.toml'"
                );
                expect!(
                    toml::from_str(&config_str),
                    "Cannot parse '{dir}/config.toml'"
                )
            }
            Err(_) => Config::default(),
        }
    };
}

/// The lab configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The build tree of the routing suite under test. All relative command and binary paths
    /// below are resolved against this directory.
    pub builddir: String,
    /// Invocation of the external binaries driven by the scenario runner.
    pub engine: EngineConfig,
    /// The process topology started by the supervisor.
    pub topology: TopologyConfig,
}

/// Binaries driven by the scenario runner.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// The interactive routing-computation program, relative to `builddir`. It reads the command
    /// script on its standard input and reports the verdict through its exit status.
    pub routing_interactive: String,
    /// The LSA-builder program, relative to `builddir`. It parses a single LSA given with `-l`
    /// and prints it back.
    pub build_lsa: String,
}

/// The fixed process topology: one router manager, one coordinator, and a set of test peers.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TopologyConfig {
    /// Command line of the router manager, relative to `builddir`. The manager is started first,
    /// as the coordinator and the peers connect to its control endpoint.
    pub router_manager: String,
    /// Command line of the coordinator, relative to `builddir`.
    pub coordinator: String,
    /// Command line of a test peer, relative to `builddir`. Each peer name from `peers` is
    /// appended with `-s <name>`.
    pub test_peer: String,
    /// The names of the test peers to start.
    pub peers: Vec<String>,
    /// Seconds to wait after starting the router manager before starting the coordinator, so
    /// that its control endpoint is listening.
    pub settle_delay_secs: u64,
    /// Bound (in seconds) on waiting for a single process to die during teardown.
    pub terminate_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            builddir: "..".to_string(),
            engine: Default::default(),
            topology: Default::default(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            routing_interactive: "ospf/test_routing_interactive".to_string(),
            build_lsa: "ospf/test_build_lsa".to_string(),
        }
    }
}

impl Default for TopologyConfig {
    fn default() -> Self {
        Self {
            router_manager: "rtrmgr/rtrmgr -t templates -b empty.boot".to_string(),
            coordinator: "harness/coord".to_string(),
            test_peer: "harness/test_peer -t -v".to_string(),
            peers: vec![
                "peer1".to_string(),
                "peer2".to_string(),
                "peer3".to_string(),
            ],
            settle_delay_secs: 5,
            terminate_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Resolve a command line or binary path relative to `builddir`.
    pub fn in_builddir(&self, rel: &str) -> String {
        format!("{}/{}", self.builddir.trim_end_matches('/'), rel)
    }

    /// Absolute or builddir-relative path of the interactive routing-computation engine.
    pub fn engine_path(&self) -> PathBuf {
        PathBuf::from(self.in_builddir(&self.engine.routing_interactive))
    }

    /// Absolute or builddir-relative path of the LSA-builder program.
    pub fn build_lsa_path(&self) -> PathBuf {
        PathBuf::from(self.in_builddir(&self.engine.build_lsa))
    }
}

impl TopologyConfig {
    /// The settling delay between starting the router manager and the coordinator.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    /// The bound on waiting for a single process to die during teardown.
    pub fn terminate_timeout(&self) -> Duration {
        Duration::from_secs(self.terminate_timeout_secs)
    }
}
