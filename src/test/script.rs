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

use pretty_assertions::assert_eq;

use crate::lsa::OspfVersion;
use crate::scenario::{catalog, ScenarioKind};
use crate::script::{RoutingEntry, Script};

fn interactive(name: &str) -> Script {
    let catalog = catalog();
    let scenario = catalog.iter().find(|s| s.name == name).unwrap();
    match scenario.build() {
        ScenarioKind::Interactive(script) => script,
        ScenarioKind::PrintLsas(_) => panic!("{name} is not an interactive scenario"),
    }
}

#[test]
fn render_test1() {
    assert_eq!(
        interactive("test1").render(OspfVersion::V2).unwrap(),
        "create 0.0.0.0 normal\n\
         destroy 0.0.0.0\n\
         create 0.0.0.0 normal\n\
         destroy 0.0.0.0\n"
    );
}

#[test]
fn render_test2() {
    assert_eq!(
        interactive("test2").render(OspfVersion::V2).unwrap(),
        "create 0.0.0.0 normal\n\
         select 0.0.0.0\n\
         replace RouterLsa\n\
         add NetworkLsa\n\
         compute 0.0.0.0\n"
    );
}

#[test]
fn render_r1_v2() {
    assert_eq!(
        interactive("r1V2").render(OspfVersion::V2).unwrap(),
        "set_router_id 0.0.0.6\n\
         create 0.0.0.0 normal\n\
         select 0.0.0.0\n\
         replace RouterLsa E-bit lsid 0.0.0.6 adv 0.0.0.6 \
         p2p lsid 0.0.0.3 ldata 0.0.0.4 metric 6 \
         p2p lsid 0.0.0.5 ldata 0.0.0.6 metric 6 \
         p2p lsid 0.0.0.10 ldata 0.0.0.11 metric 7\n\
         add RouterLsa E-bit lsid 0.0.0.3 adv 0.0.0.3 \
         p2p lsid 0.0.0.6 ldata 0.0.0.7 metric 8 \
         stub lsid 0.4.0.0 ldata 255.255.0.0 metric 2\n\
         compute 0.0.0.0\n\
         verify_routing_table_size 1\n\
         verify_routing_entry 0.4.0.0/16 0.0.0.7 8 false false\n"
    );
}

#[test]
fn render_r2_v3_assertions() {
    let text = interactive("r2V3").render(OspfVersion::V3).unwrap();
    assert_eq!(text.lines().count(), 20);
    assert!(text.contains("verify_routing_table_size 2\n"));
    assert!(text.contains("verify_routing_entry 5f00:0:c001:300::/56 fe80:2::2 4 false false\n"));
    assert!(text.ends_with(
        "verify_routing_entry 5f00:0:c001:400::/56 fe80:1::3 3 false false\n"
    ));
}

#[test]
fn render_under_wrong_version_fails() {
    // r1V3 carries OSPFv3-only constructs, so rendering it for OSPFv2 must be rejected
    assert!(interactive("r1V3").render(OspfVersion::V2).is_err());
}

#[test]
fn routing_entry_token_order() {
    let entry = RoutingEntry {
        net: "0.4.0.0/16".parse().unwrap(),
        next_hop: "0.0.0.7".parse().unwrap(),
        metric: 8,
        discard: true,
        multipath: false,
    };
    assert_eq!(entry.to_string(), "0.4.0.0/16 0.0.0.7 8 true false");
}
