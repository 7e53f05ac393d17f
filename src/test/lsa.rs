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

use std::net::Ipv4Addr;

use pretty_assertions::assert_eq;

use crate::lsa::{
    EncodeError, ExternalBit, ExternalBody, Ipv6PrefixBlock, LinkKind, Lsa, LsaBody, LsaHeader,
    LsOption, OspfVersion, ReferencedLsType, RouterBit, RouterLink, Uint,
};

fn ip4(s: &str) -> Ipv4Addr {
    s.parse().unwrap()
}

#[test]
fn router_lsa_field_order() {
    let lsa = Lsa::new(
        LsaHeader::new()
            .age(1800)
            .lsid(ip4("1.2.3.4"))
            .adv(ip4("5.6.7.8"))
            .seqno(1)
            .cksum(1),
        LsaBody::Router {
            bits: vec![],
            links: vec![RouterLink::p2p_v2(
                ip4("10.10.10.10"),
                ip4("11.11.11.11"),
                42,
            )],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V2).unwrap(),
        "RouterLsa age 1800 lsid 1.2.3.4 adv 5.6.7.8 seqno 1 cksum 1 \
         p2p lsid 10.10.10.10 ldata 11.11.11.11 metric 42"
    );
}

#[test]
fn router_lsa_v2_options_and_bits() {
    let lsa = Lsa::new(
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
            .cksum(1),
        LsaBody::Router {
            bits: vec![RouterBit::Nt, RouterBit::V, RouterBit::E, RouterBit::B],
            links: vec![RouterLink::p2p_v2(
                ip4("10.10.10.10"),
                ip4("11.11.11.11"),
                42,
            )],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V2).unwrap(),
        "RouterLsa age 1800 DC-bit EA-bit N/P-bit MC-bit E-bit \
         lsid 1.2.3.4 adv 5.6.7.8 seqno 1 cksum 1 bit-NT bit-V bit-E bit-B \
         p2p lsid 10.10.10.10 ldata 11.11.11.11 metric 42"
    );
}

#[test]
fn external_lsa_preserves_numeric_base() {
    let lsa = Lsa::new(
        LsaHeader::new().lsid(ip4("1.2.3.4")).adv(ip4("5.6.7.8")),
        LsaBody::AsExternal(ExternalBody {
            netmask: Some(Uint::hex(0xffff0000)),
            bits: vec![ExternalBit::E],
            metric: Some(Uint::dec(45)),
            forward4: Some(ip4("9.10.11.12")),
            tag: Some(Uint::hex(0x40)),
            ..Default::default()
        }),
    );
    assert_eq!(
        lsa.encode(OspfVersion::V2).unwrap(),
        "ASExternalLsa lsid 1.2.3.4 adv 5.6.7.8 \
         netmask 0xffff0000 bit-E metric 45 forward4 9.10.11.12 tag 0x40"
    );
}

#[test]
fn v3_router_links() {
    let lsa = Lsa::new(
        LsaHeader::new()
            .option(LsOption::V6)
            .option(LsOption::E)
            .option(LsOption::R)
            .lsid(ip4("42.0.0.1"))
            .adv(ip4("0.0.0.2")),
        LsaBody::Router {
            bits: vec![],
            links: vec![
                RouterLink::p2p_v3(1, 1, ip4("0.0.0.1"), 1),
                RouterLink::transit_v3(20, 20, ip4("0.0.0.2"), 5),
            ],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V3).unwrap(),
        "RouterLsa V6-bit E-bit R-bit lsid 42.0.0.1 adv 0.0.0.2 \
         p2p iid 1 nid 1 nrid 0.0.0.1 metric 1 \
         transit iid 20 nid 20 nrid 0.0.0.2 metric 5"
    );
}

#[test]
fn link_lsa() {
    let lsa = Lsa::new(
        LsaHeader::new().lsid(ip4("0.0.0.1")).adv(ip4("0.0.0.3")),
        LsaBody::Link {
            rtr_priority: None,
            link_local: "fe80:0001::3".parse().unwrap(),
            prefixes: vec![],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V3).unwrap(),
        "LinkLsa lsid 0.0.0.1 adv 0.0.0.3 link-local-address fe80:1::3"
    );
}

#[test]
fn intra_area_prefix_repetition_order() {
    let prefix = || Ipv6PrefixBlock::new("5f00:0000:c001::/48".parse().unwrap());
    let lsa = Lsa::new(
        LsaHeader::new().lsid(ip4("1.2.3.4")).adv(ip4("5.6.7.8")),
        LsaBody::IntraAreaPrefix {
            rlstype: ReferencedLsType::Numeric(Uint::hex(0x2001)),
            rlsid: ip4("1.2.3.4"),
            radv: ip4("9.8.7.6"),
            prefixes: vec![(prefix(), Uint::dec(1)), (prefix(), Uint::dec(2))],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V3).unwrap(),
        "IntraAreaPrefixLsa lsid 1.2.3.4 adv 5.6.7.8 \
         rlstype 0x2001 rlsid 1.2.3.4 radv 9.8.7.6 \
         IPv6Prefix 5f00:0:c001::/48 metric 1 IPv6Prefix 5f00:0:c001::/48 metric 2"
    );
}

#[test]
fn referenced_lstype_by_name() {
    let lsa = Lsa::new(
        LsaHeader::new().lsid(ip4("0.0.0.1")).adv(ip4("0.0.0.2")),
        LsaBody::IntraAreaPrefix {
            rlstype: ReferencedLsType::Network,
            rlsid: ip4("0.0.0.20"),
            radv: ip4("0.0.0.2"),
            prefixes: vec![],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V3).unwrap(),
        "IntraAreaPrefixLsa lsid 0.0.0.1 adv 0.0.0.2 rlstype NetworkLsa rlsid 0.0.0.20 radv 0.0.0.2"
    );
}

#[test]
fn reject_foreign_option_flags() {
    let v3_option_under_v2 = Lsa::new(
        LsaHeader::new().option(LsOption::V6),
        LsaBody::Router {
            bits: vec![],
            links: vec![],
        },
    );
    assert_eq!(
        v3_option_under_v2.encode(OspfVersion::V2),
        Err(EncodeError::InvalidOption("V6-bit", OspfVersion::V2))
    );

    let v2_option_under_v3 = Lsa::new(
        LsaHeader::new().option(LsOption::Ea),
        LsaBody::Router {
            bits: vec![],
            links: vec![],
        },
    );
    assert_eq!(
        v2_option_under_v3.encode(OspfVersion::V3),
        Err(EncodeError::InvalidOption("EA-bit", OspfVersion::V3))
    );
}

#[test]
fn reject_foreign_router_bit() {
    let lsa = Lsa::new(
        LsaHeader::new(),
        LsaBody::Router {
            bits: vec![RouterBit::W],
            links: vec![],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V2),
        Err(EncodeError::InvalidRouterBit("bit-W", OspfVersion::V2))
    );
}

#[test]
fn reject_foreign_link_encoding() {
    let v2_link_under_v3 = Lsa::new(
        LsaHeader::new(),
        LsaBody::Router {
            bits: vec![],
            links: vec![RouterLink::p2p_v2(ip4("0.0.0.1"), ip4("0.0.0.2"), 1)],
        },
    );
    assert_eq!(
        v2_link_under_v3.encode(OspfVersion::V3),
        Err(EncodeError::InvalidLink("p2p", OspfVersion::V3))
    );

    let v3_stub = Lsa::new(
        LsaHeader::new(),
        LsaBody::Router {
            bits: vec![],
            links: vec![RouterLink::V3 {
                kind: LinkKind::Stub,
                iid: Uint::dec(1),
                nid: Uint::dec(1),
                nrid: ip4("0.0.0.1"),
                metric: Uint::dec(1),
            }],
        },
    );
    assert_eq!(
        v3_stub.encode(OspfVersion::V3),
        Err(EncodeError::InvalidLink("stub", OspfVersion::V3))
    );
}

#[test]
fn reject_netmask_under_v3() {
    let lsa = Lsa::new(
        LsaHeader::new(),
        LsaBody::Network {
            netmask: Some(Uint::hex(0xffffff00)),
            routers: vec![],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V3),
        Err(EncodeError::InvalidField("netmask", OspfVersion::V3))
    );
}

#[test]
fn reject_link_lsa_under_v2() {
    let lsa = Lsa::new(
        LsaHeader::new(),
        LsaBody::Link {
            rtr_priority: None,
            link_local: "fe80::1".parse().unwrap(),
            prefixes: vec![],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V2),
        Err(EncodeError::InvalidField("LinkLsa", OspfVersion::V2))
    );
}

#[test]
fn network_lsa_attached_router_order() {
    let lsa = Lsa::new(
        LsaHeader::new().lsid(ip4("0.0.0.1")).adv(ip4("0.0.0.1")),
        LsaBody::Network {
            netmask: None,
            routers: vec![ip4("0.0.0.2"), ip4("0.0.0.1"), ip4("0.0.0.4")],
        },
    );
    assert_eq!(
        lsa.encode(OspfVersion::V3).unwrap(),
        "NetworkLsa lsid 0.0.0.1 adv 0.0.0.1 \
         add-router 0.0.0.2 add-router 0.0.0.1 add-router 0.0.0.4"
    );
}
