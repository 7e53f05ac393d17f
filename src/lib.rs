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

//! This library is a black-box test lab for a link-state routing engine. It does not compute any
//! routes itself; it treats the observable behavior of external processes as ground truth.
//!
//! # Scenario testing
//!
//! The main half of the lab is a catalog of named test scenarios ([`scenario`]). Each scenario
//! synthesizes a toy topology as a set of textual LSA descriptors ([`lsa`]), embeds them in a
//! command script together with the expected routing-table entries ([`script`]), and streams the
//! script to the interactive routing-computation engine ([`runner`]). The engine computes the
//! routes, checks the assertions itself, and reports the verdict through its exit status: zero
//! means the scenario passed.
//!
//! ```text
//!  catalog ──select──▶ scenario ──build──▶ script ──render──▶ engine stdin
//!                                                                 │
//!                          pass/fail ◀──exit status── engine ◀────┘
//! ```
//!
//! # Process supervision
//!
//! The other half ([`process`], [`supervisor`]) stands up the multi-process topology needed for
//! harness-level smoke testing: the router manager, a coordinator, and a set of test peers, each
//! a long-running external process whose lifecycle (start, liveness, forced termination) is
//! managed concurrently. The two halves share no state, only the same design: spawn an external
//! process and observe it.
//!
//! # Configuration
//!
//! All external binaries are resolved through [`config::CONFIG`]; see [`config`] for the
//! `ROUTING_LAB_CONFIG` environment variable and the defaults.

use thiserror::Error;

use lsa::EncodeError;
use process::ProcessError;

pub mod config;
pub mod lsa;
pub mod process;
pub mod runner;
pub mod scenario;
pub mod script;
pub mod supervisor;

#[cfg(test)]
mod test;

pub use lsa::{Lsa, LsaBody, LsaHeader, OspfVersion};
pub use process::{ManagedProcess, ProcessState};
pub use runner::ScenarioRunner;
pub use scenario::{catalog, select, Scenario, ScenarioKind};
pub use script::Script;
pub use supervisor::Supervisor;

/// Error type thrown while running the lab.
#[derive(Debug, Error)]
pub enum LabError {
    /// Error while managing an external process.
    #[error("{0}")]
    Process(#[from] ProcessError),
    /// Error while encoding an LSA or a command script.
    #[error("{0}")]
    Encode(#[from] EncodeError),
    /// I/O Error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// An explicitly selected scenario does not exist in the catalog.
    #[error("Unknown scenario `{0}`")]
    UnknownScenario(String),
    /// An interactive scenario was registered without a protocol version.
    #[error("Scenario `{0}` does not declare a protocol version")]
    ProtocolUnset(&'static str),
    /// The engine reported a nonzero exit status for the named scenario.
    #[error("Scenario `{0}` FAILED")]
    ScenarioFailed(String),
    /// The supervised process topology failed to start or died mid-run.
    #[error("The process topology is not running")]
    TopologyDown,
}
