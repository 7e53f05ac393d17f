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

//! The command script sent to the routing-computation engine.
//!
//! A script is an ordered list of newline-separated statements: router-id assignment, area
//! management, LSA injection, a compute trigger, and the routing-table assertions that make the
//! engine's exit status the correctness oracle.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use ipnet::IpNet;
use itertools::Itertools;

use crate::lsa::{EncodeError, Lsa, OspfVersion};

/// The kind of an area created on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaKind {
    Normal,
    Stub,
    Nssa,
}

impl AreaKind {
    pub fn token(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Stub => "stub",
            Self::Nssa => "nssa",
        }
    }
}

/// An expected routing-table entry, asserted verbatim by the engine after a compute trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingEntry {
    /// The destination prefix.
    pub net: IpNet,
    /// The expected next-hop address.
    pub next_hop: IpAddr,
    /// The expected metric.
    pub metric: u32,
    /// Whether the destination is expected to be a discard route.
    pub discard: bool,
    /// Whether the destination is expected to have multiple equal-cost next hops.
    pub multipath: bool,
}

impl fmt::Display for RoutingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.net, self.next_hop, self.metric, self.discard, self.multipath
        )
    }
}

/// A single statement of the command script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    SetRouterId(Ipv4Addr),
    Create(Ipv4Addr, AreaKind),
    Select(Ipv4Addr),
    Replace(Lsa),
    Add(Lsa),
    Destroy(Ipv4Addr),
    Compute(Ipv4Addr),
    VerifyTableSize(usize),
    VerifyEntry(RoutingEntry),
}

impl Statement {
    fn render(&self, version: OspfVersion) -> Result<String, EncodeError> {
        Ok(match self {
            Self::SetRouterId(id) => format!("set_router_id {id}"),
            Self::Create(area, kind) => format!("create {area} {}", kind.token()),
            Self::Select(area) => format!("select {area}"),
            Self::Replace(lsa) => format!("replace {}", lsa.encode(version)?),
            Self::Add(lsa) => format!("add {}", lsa.encode(version)?),
            Self::Destroy(area) => format!("destroy {area}"),
            Self::Compute(area) => format!("compute {area}"),
            Self::VerifyTableSize(n) => format!("verify_routing_table_size {n}"),
            Self::VerifyEntry(entry) => format!("verify_routing_entry {entry}"),
        })
    }
}

/// An ordered command script for a single scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    statements: Vec<Statement>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn set_router_id(&mut self, id: Ipv4Addr) -> &mut Self {
        self.statements.push(Statement::SetRouterId(id));
        self
    }

    pub fn create(&mut self, area: Ipv4Addr, kind: AreaKind) -> &mut Self {
        self.statements.push(Statement::Create(area, kind));
        self
    }

    pub fn select(&mut self, area: Ipv4Addr) -> &mut Self {
        self.statements.push(Statement::Select(area));
        self
    }

    pub fn replace(&mut self, lsa: Lsa) -> &mut Self {
        self.statements.push(Statement::Replace(lsa));
        self
    }

    pub fn add(&mut self, lsa: Lsa) -> &mut Self {
        self.statements.push(Statement::Add(lsa));
        self
    }

    pub fn destroy(&mut self, area: Ipv4Addr) -> &mut Self {
        self.statements.push(Statement::Destroy(area));
        self
    }

    pub fn compute(&mut self, area: Ipv4Addr) -> &mut Self {
        self.statements.push(Statement::Compute(area));
        self
    }

    pub fn verify_table_size(&mut self, n: usize) -> &mut Self {
        self.statements.push(Statement::VerifyTableSize(n));
        self
    }

    pub fn verify_entry(&mut self, entry: RoutingEntry) -> &mut Self {
        self.statements.push(Statement::VerifyEntry(entry));
        self
    }

    /// Render the script as the newline-terminated statement stream sent on the engine's input.
    pub fn render(&self, version: OspfVersion) -> Result<String, EncodeError> {
        let mut text: String = self
            .statements
            .iter()
            .map(|s| s.render(version))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .join("\n");
        text.push('\n');
        Ok(text)
    }
}
