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

//! Link-state advertisement descriptors and their textual encoding.
//!
//! The routing-computation engine and the LSA builder accept LSAs as a flat run of
//! space-separated tokens with a fixed field order per LSA type: the type name, then `age`, the
//! option flags, `lsid`, `adv`, `seqno`, `cksum`, and finally the type-specific payload.
//! Repeated payload elements (router links, attached routers, IPv6 prefix blocks) are rendered
//! in insertion order. [`Lsa::encode`] reproduces that grammar exactly; any flag or field that is
//! not valid under the selected protocol version is rejected instead of being silently renamed.

use std::fmt::{self, Write};
use std::net::{Ipv4Addr, Ipv6Addr};

use ipnet::Ipv6Net;
use thiserror::Error;

/// The protocol version the engine is driven with. The two versions use disjoint flag
/// vocabularies and different link/prefix encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OspfVersion {
    V2,
    V3,
}

impl OspfVersion {
    /// The command-line flag selecting this version on the engine and the LSA builder.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::V2 => "--OSPFv2",
            Self::V3 => "--OSPFv3",
        }
    }
}

impl fmt::Display for OspfVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => f.write_str("OSPFv2"),
            Self::V3 => f.write_str("OSPFv3"),
        }
    }
}

/// An unsigned literal that remembers whether it was written in decimal or hexadecimal, so the
/// encoder reproduces the base the scenario author used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uint {
    value: u32,
    hex: bool,
}

impl Uint {
    /// A decimal literal.
    pub fn dec(value: u32) -> Self {
        Self { value, hex: false }
    }

    /// A hexadecimal (`0x`-prefixed) literal.
    pub fn hex(value: u32) -> Self {
        Self { value, hex: true }
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

impl From<u32> for Uint {
    fn from(value: u32) -> Self {
        Self::dec(value)
    }
}

impl fmt::Display for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hex {
            write!(f, "{:#x}", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// An option bit of the LSA header. The two protocol versions use disjoint vocabularies, except
/// for `DC-bit`, `MC-bit` and `E-bit` which exist in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOption {
    Dc,
    Ea,
    Np,
    Mc,
    E,
    R,
    N,
    V6,
}

impl LsOption {
    pub fn token(self) -> &'static str {
        match self {
            Self::Dc => "DC-bit",
            Self::Ea => "EA-bit",
            Self::Np => "N/P-bit",
            Self::Mc => "MC-bit",
            Self::E => "E-bit",
            Self::R => "R-bit",
            Self::N => "N-bit",
            Self::V6 => "V6-bit",
        }
    }

    fn valid_for(self, version: OspfVersion) -> bool {
        match self {
            Self::Dc | Self::Mc | Self::E => true,
            Self::Ea | Self::Np => version == OspfVersion::V2,
            Self::R | Self::N | Self::V6 => version == OspfVersion::V3,
        }
    }
}

/// A router-LSA flag. `bit-W` only exists in version 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterBit {
    Nt,
    V,
    E,
    B,
    W,
}

impl RouterBit {
    pub fn token(self) -> &'static str {
        match self {
            Self::Nt => "bit-NT",
            Self::V => "bit-V",
            Self::E => "bit-E",
            Self::B => "bit-B",
            Self::W => "bit-W",
        }
    }

    fn valid_for(self, version: OspfVersion) -> bool {
        match self {
            Self::W => version == OspfVersion::V3,
            _ => true,
        }
    }
}

/// A flag of an AS-external (or type-7) LSA. `bit-F` and `bit-T` only exist in version 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalBit {
    E,
    F,
    T,
}

impl ExternalBit {
    pub fn token(self) -> &'static str {
        match self {
            Self::E => "bit-E",
            Self::F => "bit-F",
            Self::T => "bit-T",
        }
    }

    fn valid_for(self, version: OspfVersion) -> bool {
        match self {
            Self::E => true,
            Self::F | Self::T => version == OspfVersion::V3,
        }
    }
}

/// An option flag attached to an IPv6 prefix block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOption {
    Dn,
    P,
    Mc,
    La,
    Nu,
}

impl PrefixOption {
    pub fn token(self) -> &'static str {
        match self {
            Self::Dn => "DN-bit",
            Self::P => "P-bit",
            Self::Mc => "MC-bit",
            Self::La => "LA-bit",
            Self::Nu => "NU-bit",
        }
    }
}

/// An IPv6 prefix block (`IPv6Prefix <net> [<flags>...]`), used by the version 3 summary,
/// external, link and intra-area-prefix LSAs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ipv6PrefixBlock {
    pub net: Ipv6Net,
    pub options: Vec<PrefixOption>,
}

impl Ipv6PrefixBlock {
    pub fn new(net: Ipv6Net) -> Self {
        Self {
            net,
            options: Vec::new(),
        }
    }

    pub fn option(mut self, option: PrefixOption) -> Self {
        self.options.push(option);
        self
    }

    fn encode(&self, out: &mut String) {
        push_tok(out, "IPv6Prefix");
        push_tok(out, self.net);
        for option in &self.options {
            push_tok(out, option.token());
        }
    }
}

/// The LSA type referenced by an intra-area-prefix LSA (and by the version 3 externals), given
/// either by name or as a raw number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferencedLsType {
    Router,
    Network,
    Numeric(Uint),
}

impl fmt::Display for ReferencedLsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Router => f.write_str("RouterLsa"),
            Self::Network => f.write_str("NetworkLsa"),
            Self::Numeric(n) => n.fmt(f),
        }
    }
}

/// The kind of a router-LSA link entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    P2p,
    Transit,
    Stub,
}

impl LinkKind {
    pub fn token(self) -> &'static str {
        match self {
            Self::P2p => "p2p",
            Self::Transit => "transit",
            Self::Stub => "stub",
        }
    }
}

/// A single link entry of a router LSA. Version 2 links carry a link id, link data and a metric;
/// version 3 links carry an interface id, a neighbor interface id, a neighbor router id and a
/// metric. Stub links only exist in version 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterLink {
    V2 {
        kind: LinkKind,
        lsid: Ipv4Addr,
        ldata: Ipv4Addr,
        metric: Uint,
    },
    V3 {
        kind: LinkKind,
        iid: Uint,
        nid: Uint,
        nrid: Ipv4Addr,
        metric: Uint,
    },
}

impl RouterLink {
    pub fn p2p_v2(lsid: Ipv4Addr, ldata: Ipv4Addr, metric: impl Into<Uint>) -> Self {
        Self::V2 {
            kind: LinkKind::P2p,
            lsid,
            ldata,
            metric: metric.into(),
        }
    }

    pub fn transit_v2(lsid: Ipv4Addr, ldata: Ipv4Addr, metric: impl Into<Uint>) -> Self {
        Self::V2 {
            kind: LinkKind::Transit,
            lsid,
            ldata,
            metric: metric.into(),
        }
    }

    pub fn stub_v2(lsid: Ipv4Addr, ldata: Ipv4Addr, metric: impl Into<Uint>) -> Self {
        Self::V2 {
            kind: LinkKind::Stub,
            lsid,
            ldata,
            metric: metric.into(),
        }
    }

    pub fn p2p_v3(
        iid: impl Into<Uint>,
        nid: impl Into<Uint>,
        nrid: Ipv4Addr,
        metric: impl Into<Uint>,
    ) -> Self {
        Self::V3 {
            kind: LinkKind::P2p,
            iid: iid.into(),
            nid: nid.into(),
            nrid,
            metric: metric.into(),
        }
    }

    pub fn transit_v3(
        iid: impl Into<Uint>,
        nid: impl Into<Uint>,
        nrid: Ipv4Addr,
        metric: impl Into<Uint>,
    ) -> Self {
        Self::V3 {
            kind: LinkKind::Transit,
            iid: iid.into(),
            nid: nid.into(),
            nrid,
            metric: metric.into(),
        }
    }

    fn encode(&self, out: &mut String, version: OspfVersion) -> Result<(), EncodeError> {
        match self {
            Self::V2 {
                kind,
                lsid,
                ldata,
                metric,
            } => {
                if version != OspfVersion::V2 {
                    return Err(EncodeError::InvalidLink(kind.token(), version));
                }
                push_tok(out, kind.token());
                push_field(out, "lsid", lsid);
                push_field(out, "ldata", ldata);
                push_field(out, "metric", metric);
            }
            Self::V3 {
                kind,
                iid,
                nid,
                nrid,
                metric,
            } => {
                if version != OspfVersion::V3 || *kind == LinkKind::Stub {
                    return Err(EncodeError::InvalidLink(kind.token(), version));
                }
                push_tok(out, kind.token());
                push_field(out, "iid", iid);
                push_field(out, "nid", nid);
                push_field(out, "nrid", nrid);
                push_field(out, "metric", metric);
            }
        }
        Ok(())
    }
}

/// The common LSA header. All fields except the option flags are optional: the engine fills in
/// defaults for fields that are not given, and most scenarios only set `lsid` and `adv`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LsaHeader {
    pub age: Option<Uint>,
    pub options: Vec<LsOption>,
    pub lsid: Option<Ipv4Addr>,
    pub adv: Option<Ipv4Addr>,
    pub seqno: Option<Uint>,
    pub cksum: Option<Uint>,
}

impl LsaHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age(mut self, age: impl Into<Uint>) -> Self {
        self.age = Some(age.into());
        self
    }

    pub fn option(mut self, option: LsOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn lsid(mut self, lsid: Ipv4Addr) -> Self {
        self.lsid = Some(lsid);
        self
    }

    pub fn adv(mut self, adv: Ipv4Addr) -> Self {
        self.adv = Some(adv);
        self
    }

    pub fn seqno(mut self, seqno: impl Into<Uint>) -> Self {
        self.seqno = Some(seqno.into());
        self
    }

    pub fn cksum(mut self, cksum: impl Into<Uint>) -> Self {
        self.cksum = Some(cksum.into());
        self
    }

    fn encode(&self, out: &mut String, version: OspfVersion) -> Result<(), EncodeError> {
        if let Some(age) = &self.age {
            push_field(out, "age", age);
        }
        for option in &self.options {
            if !option.valid_for(version) {
                return Err(EncodeError::InvalidOption(option.token(), version));
            }
            push_tok(out, option.token());
        }
        if let Some(lsid) = &self.lsid {
            push_field(out, "lsid", lsid);
        }
        if let Some(adv) = &self.adv {
            push_field(out, "adv", adv);
        }
        if let Some(seqno) = &self.seqno {
            push_field(out, "seqno", seqno);
        }
        if let Some(cksum) = &self.cksum {
            push_field(out, "cksum", cksum);
        }
        Ok(())
    }
}

/// The payload of an AS-external or type-7 LSA. The version 2 form uses `netmask`/`forward4`;
/// the version 3 form uses an IPv6 prefix block, `forward6`, and the referenced-LSA fields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExternalBody {
    pub netmask: Option<Uint>,
    pub bits: Vec<ExternalBit>,
    pub metric: Option<Uint>,
    pub prefix: Option<Ipv6PrefixBlock>,
    pub rlstype: Option<ReferencedLsType>,
    pub forward4: Option<Ipv4Addr>,
    pub forward6: Option<Ipv6Addr>,
    pub tag: Option<Uint>,
    pub rlsid: Option<Ipv4Addr>,
}

impl ExternalBody {
    fn encode(&self, out: &mut String, version: OspfVersion) -> Result<(), EncodeError> {
        if let Some(netmask) = &self.netmask {
            if version != OspfVersion::V2 {
                return Err(EncodeError::InvalidField("netmask", version));
            }
            push_field(out, "netmask", netmask);
        }
        for bit in &self.bits {
            if !bit.valid_for(version) {
                return Err(EncodeError::InvalidExternalBit(bit.token(), version));
            }
            push_tok(out, bit.token());
        }
        if let Some(metric) = &self.metric {
            push_field(out, "metric", metric);
        }
        if let Some(prefix) = &self.prefix {
            if version != OspfVersion::V3 {
                return Err(EncodeError::InvalidField("IPv6Prefix", version));
            }
            prefix.encode(out);
        }
        if let Some(rlstype) = &self.rlstype {
            if version != OspfVersion::V3 {
                return Err(EncodeError::InvalidField("rlstype", version));
            }
            push_field(out, "rlstype", rlstype);
        }
        if let Some(forward4) = &self.forward4 {
            if version != OspfVersion::V2 {
                return Err(EncodeError::InvalidField("forward4", version));
            }
            push_field(out, "forward4", forward4);
        }
        if let Some(forward6) = &self.forward6 {
            if version != OspfVersion::V3 {
                return Err(EncodeError::InvalidField("forward6", version));
            }
            push_field(out, "forward6", forward6);
        }
        if let Some(tag) = &self.tag {
            push_field(out, "tag", tag);
        }
        if let Some(rlsid) = &self.rlsid {
            if version != OspfVersion::V3 {
                return Err(EncodeError::InvalidField("rlsid", version));
            }
            push_field(out, "rlsid", rlsid);
        }
        Ok(())
    }
}

/// The type-specific payload of an LSA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LsaBody {
    /// A router LSA: router flags plus an ordered list of link entries.
    Router {
        bits: Vec<RouterBit>,
        links: Vec<RouterLink>,
    },
    /// A network LSA: the netmask (version 2 only) plus the attached routers.
    Network {
        netmask: Option<Uint>,
        routers: Vec<Ipv4Addr>,
    },
    /// A summarized network prefix (inter-area-prefix LSA in version 3).
    SummaryNetwork {
        netmask: Option<Uint>,
        metric: Uint,
        prefix: Option<Ipv6PrefixBlock>,
    },
    /// A summarized router (inter-area-router LSA in version 3).
    SummaryRouter {
        netmask: Option<Uint>,
        metric: Uint,
        drid: Option<Ipv4Addr>,
    },
    /// An externally learned prefix.
    AsExternal(ExternalBody),
    /// An externally learned prefix flooded within an NSSA.
    Type7(ExternalBody),
    /// A link LSA (version 3 only): the link-local address plus the prefixes on the link.
    Link {
        rtr_priority: Option<Uint>,
        link_local: Ipv6Addr,
        prefixes: Vec<Ipv6PrefixBlock>,
    },
    /// An intra-area-prefix LSA (version 3 only): prefixes with metrics, attributed to a
    /// referenced router or network LSA.
    IntraAreaPrefix {
        rlstype: ReferencedLsType,
        rlsid: Ipv4Addr,
        radv: Ipv4Addr,
        prefixes: Vec<(Ipv6PrefixBlock, Uint)>,
    },
}

/// A complete LSA descriptor: common header plus type-specific payload. Purely transient; it is
/// built by a scenario, rendered to text, and discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lsa {
    pub header: LsaHeader,
    pub body: LsaBody,
}

impl Lsa {
    pub fn new(header: LsaHeader, body: LsaBody) -> Self {
        Self { header, body }
    }

    /// The type name token that starts the rendered LSA.
    pub fn type_name(&self) -> &'static str {
        match &self.body {
            LsaBody::Router { .. } => "RouterLsa",
            LsaBody::Network { .. } => "NetworkLsa",
            LsaBody::SummaryNetwork { .. } => "SummaryNetworkLsa",
            LsaBody::SummaryRouter { .. } => "SummaryRouterLsa",
            LsaBody::AsExternal(_) => "ASExternalLsa",
            LsaBody::Type7(_) => "Type7Lsa",
            LsaBody::Link { .. } => "LinkLsa",
            LsaBody::IntraAreaPrefix { .. } => "IntraAreaPrefixLsa",
        }
    }

    /// Render this LSA into the engine's token grammar under the given protocol version.
    pub fn encode(&self, version: OspfVersion) -> Result<String, EncodeError> {
        let mut out = String::from(self.type_name());
        self.header.encode(&mut out, version)?;

        match &self.body {
            LsaBody::Router { bits, links } => {
                for bit in bits {
                    if !bit.valid_for(version) {
                        return Err(EncodeError::InvalidRouterBit(bit.token(), version));
                    }
                    push_tok(&mut out, bit.token());
                }
                for link in links {
                    link.encode(&mut out, version)?;
                }
            }
            LsaBody::Network { netmask, routers } => {
                if let Some(netmask) = netmask {
                    if version != OspfVersion::V2 {
                        return Err(EncodeError::InvalidField("netmask", version));
                    }
                    push_field(&mut out, "netmask", netmask);
                }
                for router in routers {
                    push_field(&mut out, "add-router", router);
                }
            }
            LsaBody::SummaryNetwork {
                netmask,
                metric,
                prefix,
            } => {
                if let Some(netmask) = netmask {
                    if version != OspfVersion::V2 {
                        return Err(EncodeError::InvalidField("netmask", version));
                    }
                    push_field(&mut out, "netmask", netmask);
                }
                push_field(&mut out, "metric", metric);
                if let Some(prefix) = prefix {
                    if version != OspfVersion::V3 {
                        return Err(EncodeError::InvalidField("IPv6Prefix", version));
                    }
                    prefix.encode(&mut out);
                }
            }
            LsaBody::SummaryRouter {
                netmask,
                metric,
                drid,
            } => {
                if let Some(netmask) = netmask {
                    if version != OspfVersion::V2 {
                        return Err(EncodeError::InvalidField("netmask", version));
                    }
                    push_field(&mut out, "netmask", netmask);
                }
                push_field(&mut out, "metric", metric);
                if let Some(drid) = drid {
                    if version != OspfVersion::V3 {
                        return Err(EncodeError::InvalidField("drid", version));
                    }
                    push_field(&mut out, "drid", drid);
                }
            }
            LsaBody::AsExternal(body) | LsaBody::Type7(body) => {
                body.encode(&mut out, version)?;
            }
            LsaBody::Link {
                rtr_priority,
                link_local,
                prefixes,
            } => {
                if version != OspfVersion::V3 {
                    return Err(EncodeError::InvalidField("LinkLsa", version));
                }
                if let Some(rtr_priority) = rtr_priority {
                    push_field(&mut out, "rtr-priority", rtr_priority);
                }
                push_field(&mut out, "link-local-address", link_local);
                for prefix in prefixes {
                    prefix.encode(&mut out);
                }
            }
            LsaBody::IntraAreaPrefix {
                rlstype,
                rlsid,
                radv,
                prefixes,
            } => {
                if version != OspfVersion::V3 {
                    return Err(EncodeError::InvalidField("IntraAreaPrefixLsa", version));
                }
                push_field(&mut out, "rlstype", rlstype);
                push_field(&mut out, "rlsid", rlsid);
                push_field(&mut out, "radv", radv);
                for (prefix, metric) in prefixes {
                    prefix.encode(&mut out);
                    push_field(&mut out, "metric", metric);
                }
            }
        }

        Ok(out)
    }
}

fn push_tok(out: &mut String, tok: impl fmt::Display) {
    // the whitespace-separated grammar has no escaping, so a token is always appended verbatim
    let _ = write!(out, " {tok}");
}

fn push_field(out: &mut String, key: &str, value: impl fmt::Display) {
    let _ = write!(out, " {key} {value}");
}

/// Errors thrown when rendering an LSA under an incompatible protocol version.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// A header option flag does not exist in the selected version.
    #[error("Option `{0}` is not valid for {1}")]
    InvalidOption(&'static str, OspfVersion),
    /// A router-LSA flag does not exist in the selected version.
    #[error("Router bit `{0}` is not valid for {1}")]
    InvalidRouterBit(&'static str, OspfVersion),
    /// An external-LSA flag does not exist in the selected version.
    #[error("External bit `{0}` is not valid for {1}")]
    InvalidExternalBit(&'static str, OspfVersion),
    /// A link entry uses the encoding of the other version.
    #[error("`{0}` link entry is not valid for {1}")]
    InvalidLink(&'static str, OspfVersion),
    /// A payload field does not exist in the selected version.
    #[error("Field `{0}` is not valid for {1}")]
    InvalidField(&'static str, OspfVersion),
}
