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

//! The catalog of named test scenarios.
//!
//! Each scenario either drives the interactive routing-computation engine with a command script
//! (topology plus routing-table assertions), or feeds every known LSA shape to the LSA builder
//! to check that the grammar is understood end to end. Scenarios are registered statically, in
//! declaration order, with a function pointer building their content; there is no runtime name
//! evaluation.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::lsa::{
    ExternalBit, ExternalBody, Ipv6PrefixBlock, Lsa, LsaBody, LsaHeader, LsOption, OspfVersion,
    PrefixOption, ReferencedLsType, RouterBit, RouterLink, Uint,
};
use crate::script::{AreaKind, RoutingEntry, Script};
use crate::LabError;

/// What a scenario does when run.
#[derive(Debug, Clone)]
pub enum ScenarioKind {
    /// Stream a command script to the interactive routing-computation engine; its exit status is
    /// the verdict.
    Interactive(Script),
    /// Feed each LSA to the LSA-builder program with `-l`; every invocation must exit 0.
    PrintLsas(Vec<Lsa>),
}

/// A named, self-contained test scenario.
#[derive(Debug)]
pub struct Scenario {
    /// Unique name, used for selection and error reporting.
    pub name: &'static str,
    /// Whether this scenario is known to work. Known-broken scenarios are tracked separately so
    /// they do not mask failures (see [`select`]).
    pub enabled: bool,
    /// The protocol version under test.
    pub protocol: Option<OspfVersion>,
    build: fn() -> ScenarioKind,
}

impl Scenario {
    /// Register a scenario. The content is built lazily by the given function when the scenario
    /// is run.
    pub fn new(
        name: &'static str,
        enabled: bool,
        protocol: Option<OspfVersion>,
        build: fn() -> ScenarioKind,
    ) -> Self {
        Self {
            name,
            enabled,
            protocol,
            build,
        }
    }

    /// Build the scenario content.
    pub fn build(&self) -> ScenarioKind {
        (self.build)()
    }
}

/// The builtin scenario catalog, in declaration order.
pub fn catalog() -> Vec<Scenario> {
    fn entry(
        name: &'static str,
        enabled: bool,
        protocol: OspfVersion,
        build: fn() -> ScenarioKind,
    ) -> Scenario {
        Scenario::new(name, enabled, Some(protocol), build)
    }

    vec![
        entry("print_lsasV2", true, OspfVersion::V2, print_lsas_v2),
        entry("print_lsasV3", true, OspfVersion::V3, print_lsas_v3),
        entry("test1", true, OspfVersion::V2, test1),
        entry("test2", true, OspfVersion::V2, test2),
        entry("r1V2", true, OspfVersion::V2, r1_v2),
        entry("r1V3", true, OspfVersion::V3, r1_v3),
        entry("r2V3", true, OspfVersion::V3, r2_v3),
        entry("r3V3", true, OspfVersion::V3, r3_v3),
        entry("r4V3", true, OspfVersion::V3, r4_v3),
        entry("r5V3", true, OspfVersion::V3, r5_v3),
        entry("r6V3", true, OspfVersion::V3, r6_v3),
    ]
}

/// Apply the selection rule to the catalog: explicit names are run exactly as given (regardless
/// of the enabled flag); otherwise all enabled scenarios run, or, with `bad`, all disabled ones.
pub fn select<'a>(
    catalog: &'a [Scenario],
    names: &[String],
    bad: bool,
) -> Result<Vec<&'a Scenario>, LabError> {
    if !names.is_empty() {
        names
            .iter()
            .map(|name| {
                catalog
                    .iter()
                    .find(|s| s.name == name)
                    .ok_or_else(|| LabError::UnknownScenario(name.clone()))
            })
            .collect()
    } else {
        Ok(catalog.iter().filter(|s| s.enabled != bad).collect())
    }
}

fn ip4(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

fn ip6(s: &str) -> Ipv6Addr {
    s.parse().unwrap()
}

fn pfx6(s: &str) -> Ipv6PrefixBlock {
    Ipv6PrefixBlock::new(s.parse().unwrap())
}

fn area() -> Ipv4Addr {
    Ipv4Addr::UNSPECIFIED
}

/// Feed every known OSPFv2 LSA shape to the LSA builder. Checks that the builder is present and
/// doubles as a living example of how LSAs are written.
fn print_lsas_v2() -> ScenarioKind {
    let common = || {
        LsaHeader::new()
            .age(1800)
            .option(LsOption::Dc)
            .option(LsOption::Ea)
            .option(LsOption::Np)
            .option(LsOption::Mc)
            .option(LsOption::E)
            .lsid(ip4("1.2.3.4"))
            .adv(ip4("5.6.7.8"))
            .seqno(1)
            .cksum(1)
    };

    let external = || ExternalBody {
        netmask: Some(Uint::hex(0xffff0000)),
        bits: vec![ExternalBit::E],
        metric: Some(Uint::dec(45)),
        forward4: Some(ip4("9.10.11.12")),
        tag: Some(Uint::hex(0x40)),
        ..Default::default()
    };

    ScenarioKind::PrintLsas(vec![
        Lsa::new(
            common(),
            LsaBody::Router {
                bits: vec![RouterBit::Nt, RouterBit::V, RouterBit::E, RouterBit::B],
                links: vec![RouterLink::p2p_v2(
                    ip4("10.10.10.10"),
                    ip4("11.11.11.11"),
                    42,
                )],
            },
        ),
        Lsa::new(
            common(),
            LsaBody::Network {
                netmask: Some(Uint::hex(0xffffff00)),
                routers: vec![ip4("1.2.3.4")],
            },
        ),
        Lsa::new(
            common(),
            LsaBody::SummaryNetwork {
                netmask: Some(Uint::hex(0xffffff00)),
                metric: Uint::dec(42),
                prefix: None,
            },
        ),
        Lsa::new(
            common(),
            LsaBody::SummaryRouter {
                netmask: Some(Uint::hex(0xffffff00)),
                metric: Uint::dec(42),
                drid: None,
            },
        ),
        Lsa::new(common(), LsaBody::AsExternal(external())),
        Lsa::new(common(), LsaBody::Type7(external())),
    ])
}

/// Feed every known OSPFv3 LSA shape to the LSA builder, including the referenced-LSA variants
/// of the intra-area-prefix LSA.
fn print_lsas_v3() -> ScenarioKind {
    let common = || {
        LsaHeader::new()
            .age(1800)
            .lsid(ip4("1.2.3.4"))
            .adv(ip4("5.6.7.8"))
            .seqno(1)
            .cksum(1)
    };
    let with_options = || {
        common()
            .option(LsOption::Dc)
            .option(LsOption::R)
            .option(LsOption::N)
            .option(LsOption::Mc)
            .option(LsOption::E)
            .option(LsOption::V6)
    };
    let prefix = || {
        pfx6("5f00:0000:c001::/48")
            .option(PrefixOption::Dn)
            .option(PrefixOption::P)
            .option(PrefixOption::Mc)
            .option(PrefixOption::La)
            .option(PrefixOption::Nu)
    };

    let external = || ExternalBody {
        bits: vec![ExternalBit::E, ExternalBit::F, ExternalBit::T],
        metric: Some(Uint::dec(45)),
        prefix: Some(prefix()),
        rlstype: Some(ReferencedLsType::Numeric(Uint::dec(2))),
        forward6: Some(ip6("5f00:0000:c001::")),
        tag: Some(Uint::hex(0x40)),
        rlsid: Some(ip4("1.2.3.4")),
        ..Default::default()
    };

    let intra = |rlstype| LsaBody::IntraAreaPrefix {
        rlstype,
        rlsid: ip4("1.2.3.4"),
        radv: ip4("9.8.7.6"),
        prefixes: vec![(prefix(), Uint::dec(1)), (prefix(), Uint::dec(2))],
    };

    ScenarioKind::PrintLsas(vec![
        Lsa::new(
            with_options(),
            LsaBody::Router {
                bits: vec![
                    RouterBit::Nt,
                    RouterBit::W,
                    RouterBit::B,
                    RouterBit::E,
                    RouterBit::V,
                ],
                links: vec![RouterLink::p2p_v3(1, 2, ip4("0.0.0.3"), 42)],
            },
        ),
        Lsa::new(
            with_options(),
            LsaBody::Network {
                netmask: None,
                routers: vec![ip4("1.2.3.4")],
            },
        ),
        Lsa::new(
            common(),
            LsaBody::SummaryNetwork {
                netmask: None,
                metric: Uint::dec(42),
                prefix: Some(prefix()),
            },
        ),
        Lsa::new(
            with_options(),
            LsaBody::SummaryRouter {
                netmask: None,
                metric: Uint::dec(42),
                drid: Some(ip4("1.2.3.4")),
            },
        ),
        Lsa::new(common(), LsaBody::AsExternal(external())),
        Lsa::new(common(), LsaBody::Type7(external())),
        Lsa::new(
            with_options(),
            LsaBody::Link {
                rtr_priority: Some(Uint::dec(42)),
                link_local: ip6("fe80:0001::"),
                prefixes: vec![prefix(), prefix()],
            },
        ),
        Lsa::new(
            common(),
            intra(ReferencedLsType::Numeric(Uint::hex(0x2001))),
        ),
        Lsa::new(common(), intra(ReferencedLsType::Router)),
        Lsa::new(common(), intra(ReferencedLsType::Network)),
        Lsa::new(common(), intra(ReferencedLsType::Numeric(Uint::dec(42)))),
    ])
}

/// Create an area and then destroy it, twice.
fn test1() -> ScenarioKind {
    let mut script = Script::new();
    script
        .create(area(), AreaKind::Normal)
        .destroy(area())
        .create(area(), AreaKind::Normal)
        .destroy(area());
    ScenarioKind::Interactive(script)
}

/// Introduce a router LSA and a network LSA.
fn test2() -> ScenarioKind {
    let mut script = Script::new();
    script
        .create(area(), AreaKind::Normal)
        .select(area())
        .replace(Lsa::new(
            LsaHeader::new(),
            LsaBody::Router {
                bits: vec![],
                links: vec![],
            },
        ))
        .add(Lsa::new(
            LsaHeader::new(),
            LsaBody::Network {
                netmask: None,
                routers: vec![],
            },
        ))
        .compute(area());
    ScenarioKind::Interactive(script)
}

/// Some of the routers from Figure 2 in RFC 2328, single area. This router is R6.
fn r1_v2() -> ScenarioKind {
    let rt6 = Lsa::new(
        LsaHeader::new()
            .option(LsOption::E)
            .lsid(ip4("0.0.0.6"))
            .adv(ip4("0.0.0.6")),
        LsaBody::Router {
            bits: vec![],
            links: vec![
                RouterLink::p2p_v2(ip4("0.0.0.3"), ip4("0.0.0.4"), 6),
                RouterLink::p2p_v2(ip4("0.0.0.5"), ip4("0.0.0.6"), 6),
                RouterLink::p2p_v2(ip4("0.0.0.10"), ip4("0.0.0.11"), 7),
            ],
        },
    );

    let rt3 = Lsa::new(
        LsaHeader::new()
            .option(LsOption::E)
            .lsid(ip4("0.0.0.3"))
            .adv(ip4("0.0.0.3")),
        LsaBody::Router {
            bits: vec![],
            links: vec![
                RouterLink::p2p_v2(ip4("0.0.0.6"), ip4("0.0.0.7"), 8),
                RouterLink::stub_v2(ip4("0.4.0.0"), ip4("255.255.0.0"), 2),
            ],
        },
    );

    let mut script = Script::new();
    script
        .set_router_id(ip4("0.0.0.6"))
        .create(area(), AreaKind::Normal)
        .select(area())
        .replace(rt6)
        .add(rt3)
        .compute(area())
        .verify_table_size(1)
        .verify_entry(RoutingEntry {
            net: "0.4.0.0/16".parse().unwrap(),
            next_hop: "0.0.0.7".parse().unwrap(),
            metric: 8,
            discard: false,
            multipath: false,
        });
    ScenarioKind::Interactive(script)
}

/// The OSPFv3 version of `r1V2`, with the point-to-point topology expressed through a link LSA
/// and an intra-area-prefix LSA.
fn r1_v3() -> ScenarioKind {
    let rt6 = Lsa::new(
        LsaHeader::new()
            .option(LsOption::E)
            .lsid(ip4("0.0.0.1"))
            .adv(ip4("0.0.0.6")),
        LsaBody::Router {
            bits: vec![],
            links: vec![RouterLink::p2p_v3(1, 1, ip4("0.0.0.3"), 6)],
        },
    );

    let rt3 = Lsa::new(
        LsaHeader::new()
            .option(LsOption::R)
            .option(LsOption::V6)
            .option(LsOption::E)
            .lsid(ip4("0.0.0.1"))
            .adv(ip4("0.0.0.3")),
        LsaBody::Router {
            bits: vec![],
            links: vec![RouterLink::p2p_v3(1, 1, ip4("0.0.0.6"), 8)],
        },
    );

    let rt3_link = Lsa::new(
        LsaHeader::new().lsid(ip4("0.0.0.1")).adv(ip4("0.0.0.3")),
        LsaBody::Link {
            rtr_priority: None,
            link_local: ip6("fe80:0001::3"),
            prefixes: vec![],
        },
    );

    let rt3_intra = Lsa::new(
        LsaHeader::new().lsid(ip4("0.0.0.1")).adv(ip4("0.0.0.3")),
        LsaBody::IntraAreaPrefix {
            rlstype: ReferencedLsType::Numeric(Uint::hex(0x2001)),
            rlsid: ip4("0.0.0.0"),
            radv: ip4("0.0.0.3"),
            prefixes: vec![(pfx6("5f00:0000:c001:0200::/56"), Uint::dec(3))],
        },
    );

    let mut script = Script::new();
    script
        .set_router_id(ip4("0.0.0.6"))
        .create(area(), AreaKind::Normal)
        .select(area())
        .replace(rt6)
        .add(rt3)
        .add(rt3_link)
        .add(rt3_intra)
        .compute(area())
        .verify_table_size(1)
        .verify_entry(RoutingEntry {
            net: "5f00:0000:c001:0200::/56".parse().unwrap(),
            next_hop: "fe80:0001::3".parse().unwrap(),
            metric: 9,
            discard: false,
            multipath: false,
        });
    ScenarioKind::Interactive(script)
}

fn v3_router(lsid: &str, adv: &str, links: Vec<RouterLink>) -> Lsa {
    Lsa::new(
        LsaHeader::new()
            .option(LsOption::V6)
            .option(LsOption::E)
            .option(LsOption::R)
            .lsid(ip4(lsid))
            .adv(ip4(adv)),
        LsaBody::Router { bits: vec![], links },
    )
}

fn v3_link(lsid: &str, adv: &str, link_local: &str) -> Lsa {
    Lsa::new(
        LsaHeader::new().lsid(ip4(lsid)).adv(ip4(adv)),
        LsaBody::Link {
            rtr_priority: None,
            link_local: ip6(link_local),
            prefixes: vec![],
        },
    )
}

fn v3_intra(
    lsid: &str,
    adv: &str,
    rlstype: ReferencedLsType,
    rlsid: &str,
    radv: &str,
    prefix: &str,
    metric: u32,
) -> Lsa {
    Lsa::new(
        LsaHeader::new().lsid(ip4(lsid)).adv(ip4(adv)),
        LsaBody::IntraAreaPrefix {
            rlstype,
            rlsid: ip4(rlsid),
            radv: ip4(radv),
            prefixes: vec![(pfx6(prefix), Uint::dec(metric))],
        },
    )
}

fn v6_entry(net: &str, next_hop: &str, metric: u32) -> RoutingEntry {
    RoutingEntry {
        net: net.parse().unwrap(),
        next_hop: next_hop.parse().unwrap(),
        metric,
        discard: false,
        multipath: false,
    }
}

/// Based on Figure 1 in RFC 2740. This router is RT1, and RT1 is also the designated router for
/// N3.
fn r2_v3() -> ScenarioKind {
    let rt1 = v3_router(
        "1.0.0.1",
        "0.0.0.1",
        vec![RouterLink::transit_v3(1, 1, ip4("0.0.0.1"), 1)],
    );
    let rt1_link = v3_link("0.0.0.1", "0.0.0.1", "fe80:0002::1");
    // N1 and N3 are not used, as RT1 is this router.
    let rt1_intra_r = v3_intra(
        "0.0.0.1",
        "0.0.0.1",
        ReferencedLsType::Router,
        "0.0.0.0",
        "0.0.0.1",
        "5f00:0000:c001:0200::/56",
        1,
    );
    let rt1_intra_n = v3_intra(
        "0.0.0.2",
        "0.0.0.1",
        ReferencedLsType::Network,
        "0.0.0.1",
        "0.0.0.1",
        "5f00:0000:c001:0100::/56",
        1,
    );
    let rt1_network = Lsa::new(
        LsaHeader::new().lsid(ip4("0.0.0.1")).adv(ip4("0.0.0.1")),
        LsaBody::Network {
            netmask: None,
            routers: vec![
                ip4("0.0.0.1"),
                ip4("0.0.0.2"),
                ip4("0.0.0.3"),
                ip4("0.0.0.4"),
            ],
        },
    );

    let rt2 = v3_router(
        "0.0.0.1",
        "0.0.0.2",
        vec![RouterLink::transit_v3(2, 1, ip4("0.0.0.1"), 1)],
    );
    let rt2_link = v3_link("0.0.0.2", "0.0.0.2", "fe80:0002::2");
    // N2
    let rt2_intra = v3_intra(
        "0.0.0.1",
        "0.0.0.2",
        ReferencedLsType::Router,
        "0.0.0.0",
        "0.0.0.2",
        "5f00:0000:c001:0300::/56",
        3,
    );

    let rt3 = v3_router(
        "0.0.0.1",
        "0.0.0.3",
        vec![RouterLink::transit_v3(1, 1, ip4("0.0.0.1"), 1)],
    );
    let rt3_link = v3_link("0.0.0.1", "0.0.0.3", "fe80:0001::3");
    // N4
    let rt3_intra = v3_intra(
        "0.0.0.1",
        "0.0.0.3",
        ReferencedLsType::Router,
        "0.0.0.0",
        "0.0.0.3",
        "5f00:0000:c001:0400::/56",
        2,
    );

    let rt4 = v3_router(
        "0.0.0.1",
        "0.0.0.4",
        vec![RouterLink::transit_v3(1, 1, ip4("0.0.0.1"), 1)],
    );
    let rt4_link = v3_link("0.0.0.1", "0.0.0.4", "fe80:0001::4");

    let mut script = Script::new();
    script
        .set_router_id(ip4("0.0.0.1"))
        .create(area(), AreaKind::Normal)
        .select(area())
        .replace(rt1)
        .add(rt1_link)
        .add(rt1_intra_r)
        .add(rt1_intra_n)
        .add(rt1_network)
        .add(rt2)
        .add(rt2_link)
        .add(rt2_intra)
        .add(rt3)
        .add(rt3_link)
        .add(rt3_intra)
        .add(rt4)
        .add(rt4_link)
        .compute(area())
        .verify_table_size(2)
        .verify_entry(v6_entry("5f00:0000:c001:0300::/56", "fe80:0002::2", 4))
        .verify_entry(v6_entry("5f00:0000:c001:0400::/56", "fe80:0001::3", 3));
    ScenarioKind::Interactive(script)
}

/// Verify the correct processing of network LSAs from a non-directly connected interface: RT2 is
/// reached over a point-to-point link and generates a network LSA for a network this router is
/// not attached to.
fn r3_v3() -> ScenarioKind {
    let rt1 = v3_router(
        "42.0.0.1",
        "0.0.0.1",
        vec![RouterLink::p2p_v3(1, 1, ip4("0.0.0.2"), 1)],
    );
    let rt1_link = v3_link("0.0.0.1", "0.0.0.1", "fe80:0001::1");

    let rt2 = v3_router(
        "42.0.0.1",
        "0.0.0.2",
        vec![
            RouterLink::p2p_v3(1, 1, ip4("0.0.0.1"), 1),
            RouterLink::transit_v3(20, 20, ip4("0.0.0.2"), 5),
        ],
    );
    let rt2_link = v3_link("0.0.0.1", "0.0.0.2", "fe80:0001::2");
    let rt2_intra = v3_intra(
        "42.0.0.2",
        "0.0.0.2",
        ReferencedLsType::Network,
        "0.0.0.20",
        "0.0.0.2",
        "5f00:0000:c001:0200::/56",
        1,
    );
    let rt2_network = Lsa::new(
        LsaHeader::new().lsid(ip4("0.0.0.20")).adv(ip4("0.0.0.2")),
        LsaBody::Network {
            netmask: None,
            routers: vec![ip4("0.0.0.2")],
        },
    );

    let mut script = Script::new();
    script
        .set_router_id(ip4("0.0.0.1"))
        .create(area(), AreaKind::Normal)
        .select(area())
        .replace(rt1)
        .add(rt1_link)
        .add(rt2)
        .add(rt2_link)
        .add(rt2_intra)
        .add(rt2_network)
        .compute(area())
        .verify_table_size(1)
        .verify_entry(v6_entry("5f00:0000:c001:0200::/56", "fe80:0001::2", 7));
    ScenarioKind::Interactive(script)
}

/// Based on Figure 1 in RFC 2740. This router is RT1, but RT2 is the designated router for N3.
fn r4_v3() -> ScenarioKind {
    let rt1 = v3_router(
        "1.0.0.1",
        "0.0.0.1",
        vec![RouterLink::transit_v3(1, 2, ip4("0.0.0.2"), 1)],
    );
    let rt1_link = v3_link("0.0.0.1", "0.0.0.1", "fe80:0002::1");
    // N1
    let rt1_intra = v3_intra(
        "0.0.0.1",
        "0.0.0.1",
        ReferencedLsType::Router,
        "0.0.0.0",
        "0.0.0.1",
        "5f00:0000:c001:0200::/56",
        1,
    );

    let rt2 = v3_router(
        "0.0.0.1",
        "0.0.0.2",
        vec![RouterLink::transit_v3(2, 2, ip4("0.0.0.2"), 1)],
    );
    let rt2_link = v3_link("0.0.0.2", "0.0.0.2", "fe80:0002::2");
    // N2
    let rt2_intra_r = v3_intra(
        "0.0.0.1",
        "0.0.0.2",
        ReferencedLsType::Router,
        "0.0.0.0",
        "0.0.0.2",
        "5f00:0000:c001:0300::/56",
        3,
    );
    // N3
    let rt2_intra_n = v3_intra(
        "0.0.0.2",
        "0.0.0.2",
        ReferencedLsType::Network,
        "0.0.0.2",
        "0.0.0.2",
        "5f00:0000:c001:0100::/56",
        1,
    );
    let rt2_network = Lsa::new(
        LsaHeader::new().lsid(ip4("0.0.0.2")).adv(ip4("0.0.0.2")),
        LsaBody::Network {
            netmask: None,
            routers: vec![
                ip4("0.0.0.1"),
                ip4("0.0.0.2"),
                ip4("0.0.0.3"),
                ip4("0.0.0.4"),
            ],
        },
    );

    let rt3 = v3_router(
        "0.0.0.1",
        "0.0.0.3",
        vec![RouterLink::transit_v3(1, 2, ip4("0.0.0.2"), 1)],
    );
    let rt3_link = v3_link("0.0.0.1", "0.0.0.3", "fe80:0001::3");
    // N4
    let rt3_intra = v3_intra(
        "0.0.0.1",
        "0.0.0.3",
        ReferencedLsType::Router,
        "0.0.0.0",
        "0.0.0.3",
        "5f00:0000:c001:0400::/56",
        2,
    );

    let rt4 = v3_router(
        "0.0.0.1",
        "0.0.0.4",
        vec![RouterLink::transit_v3(1, 2, ip4("0.0.0.2"), 1)],
    );
    let rt4_link = v3_link("0.0.0.1", "0.0.0.4", "fe80:0001::4");

    let mut script = Script::new();
    script
        .set_router_id(ip4("0.0.0.1"))
        .create(area(), AreaKind::Normal)
        .select(area())
        .replace(rt1)
        .add(rt1_link)
        .add(rt1_intra)
        .add(rt2)
        .add(rt2_link)
        .add(rt2_intra_r)
        .add(rt2_intra_n)
        .add(rt2_network)
        .add(rt3)
        .add(rt3_link)
        .add(rt3_intra)
        .add(rt4)
        .add(rt4_link)
        .compute(area())
        .verify_table_size(2)
        .verify_entry(v6_entry("5f00:0000:c001:0300::/56", "fe80:0002::2", 4))
        .verify_entry(v6_entry("5f00:0000:c001:0400::/56", "fe80:0001::3", 3));
    ScenarioKind::Interactive(script)
}

/// Verify the correct processing of inter-area-prefix LSAs: RT2 is an area border router that
/// summarizes a prefix from another area.
fn r5_v3() -> ScenarioKind {
    let rt1 = v3_router(
        "42.0.0.1",
        "0.0.0.1",
        vec![RouterLink::p2p_v3(1, 1, ip4("0.0.0.2"), 1)],
    );
    let rt1_link = v3_link("0.0.0.1", "0.0.0.1", "fe80:0001::1");

    let mut rt2 = v3_router(
        "42.0.0.1",
        "0.0.0.2",
        vec![
            RouterLink::p2p_v3(1, 1, ip4("0.0.0.1"), 1),
            RouterLink::transit_v3(20, 20, ip4("0.0.0.2"), 5),
        ],
    );
    if let LsaBody::Router { bits, .. } = &mut rt2.body {
        bits.push(RouterBit::B);
    }
    let rt2_link = v3_link("0.0.0.1", "0.0.0.2", "fe80:0001::2");

    let rt2_inter = Lsa::new(
        LsaHeader::new().lsid(ip4("42.0.0.2")).adv(ip4("0.0.0.2")),
        LsaBody::SummaryNetwork {
            netmask: None,
            metric: Uint::dec(6),
            prefix: Some(pfx6("5f00:0000:c001:0200::/56")),
        },
    );

    let mut script = Script::new();
    script
        .set_router_id(ip4("0.0.0.1"))
        .create(area(), AreaKind::Normal)
        .select(area())
        .replace(rt1)
        .add(rt1_link)
        .add(rt2)
        .add(rt2_link)
        .add(rt2_inter)
        .compute(area())
        .verify_table_size(1)
        .verify_entry(v6_entry("5f00:0000:c001:0200::/56", "fe80:0001::2", 7));
    ScenarioKind::Interactive(script)
}

/// Verify the correct processing of AS-external LSAs: RT2 is an AS boundary router that
/// originates an external prefix.
fn r6_v3() -> ScenarioKind {
    let rt1 = v3_router(
        "42.0.0.1",
        "0.0.0.1",
        vec![RouterLink::p2p_v3(1, 1, ip4("0.0.0.2"), 1)],
    );
    let rt1_link = v3_link("0.0.0.1", "0.0.0.1", "fe80:0001::1");

    let mut rt2 = v3_router(
        "42.0.0.1",
        "0.0.0.2",
        vec![RouterLink::p2p_v3(1, 1, ip4("0.0.0.1"), 1)],
    );
    if let LsaBody::Router { bits, .. } = &mut rt2.body {
        bits.push(RouterBit::E);
    }
    let rt2_link = v3_link("0.0.0.1", "0.0.0.2", "fe80:0001::2");

    let rt2_external = Lsa::new(
        LsaHeader::new().lsid(ip4("42.0.0.2")).adv(ip4("0.0.0.2")),
        LsaBody::AsExternal(ExternalBody {
            metric: Some(Uint::dec(6)),
            prefix: Some(pfx6("5f00:0000:c001:0200::/56")),
            ..Default::default()
        }),
    );

    let mut script = Script::new();
    script
        .set_router_id(ip4("0.0.0.1"))
        .create(area(), AreaKind::Normal)
        .select(area())
        .replace(rt1)
        .add(rt1_link)
        .add(rt2)
        .add(rt2_link)
        .add(rt2_external)
        .compute(area())
        .verify_table_size(1)
        .verify_entry(v6_entry("5f00:0000:c001:0200::/56", "fe80:0001::2", 7));
    ScenarioKind::Interactive(script)
}
