// IntentC: Intent-to-configuration compiler for BGP networks
// Copyright (C) 2024-2026 The IntentC developers
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

//! The declarative intent document: the sole source of truth for a compilation run.
//!
//! The document is read once (usually from `intent.json`), held immutable for the duration of
//! the run, and never written back. Everything the compiler produces is derived from it.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::types::{AsId, PropagationTarget, Role, Tag};

/// The root of the intent document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntentDocument {
    /// All routing domains, each with its routers and protocol parameters.
    #[serde(default)]
    pub autonomous_systems: Vec<AutonomousSystem>,
    /// All inter-router links.
    #[serde(default)]
    pub links: Vec<Link>,
    /// BGP peerings and propagation policy.
    #[serde(default)]
    pub bgp: BgpSection,
    /// Settings of the surrounding project.
    #[serde(default)]
    pub project_settings: ProjectSettings,
}

impl IntentDocument {
    /// Parse an intent document from its JSON representation.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Iterate over all router names in document order.
    pub fn router_names(&self) -> impl Iterator<Item = &str> {
        self.autonomous_systems
            .iter()
            .flat_map(|a| a.routers.iter())
            .map(|r| r.name.as_str())
    }
}

/// A routing domain: an ASN, its member routers, and the protocols spoken inside it.
#[derive(Debug, Clone, Deserialize)]
pub struct AutonomousSystem {
    /// The AS number.
    pub asn: AsId,
    /// The member routers. Membership is a partition: every router belongs to exactly one AS.
    #[serde(default)]
    pub routers: Vec<RouterDecl>,
    /// The interior gateway protocol, if any. A single-router AS that only speaks BGP may
    /// leave this out.
    #[serde(default)]
    pub igp: Option<IgpConfig>,
    /// The iBGP peering mode, if any.
    #[serde(default)]
    pub ibgp: Option<IbgpConfig>,
}

/// A router declaration inside an AS.
#[derive(Debug, Clone, Deserialize)]
pub struct RouterDecl {
    /// The router name, unique across the whole document.
    pub name: String,
    /// The loopback address in `A.B.C.D/len` notation.
    #[serde(default)]
    pub loopback: Option<String>,
}

/// Parameters of the interior gateway protocol of an AS.
#[derive(Debug, Clone, Deserialize)]
pub struct IgpConfig {
    /// Which protocol to run.
    pub protocol: IgpProtocol,
    /// The OSPF process id. Defaults to 1.
    #[serde(default)]
    pub process_id: Option<u32>,
    /// The OSPF area. Defaults to 0.
    #[serde(default)]
    pub area: Option<u32>,
}

/// The supported interior gateway protocols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum IgpProtocol {
    /// RIP version 2.
    #[serde(rename = "RIP", alias = "rip")]
    Rip,
    /// OSPF version 2.
    #[serde(rename = "OSPF", alias = "ospf")]
    Ospf,
}

/// The iBGP peering mode of an AS.
#[derive(Debug, Clone, Deserialize)]
pub struct IbgpConfig {
    /// The peering mode.
    #[serde(rename = "type")]
    pub mode: IbgpMode,
}

/// Supported iBGP peering modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum IbgpMode {
    /// Every router in the AS peers with every other, addressed by loopback.
    #[serde(rename = "full-mesh")]
    FullMesh,
}

/// A link between two routers.
#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    /// The two ends of the link.
    pub endpoints: Vec<Endpoint>,
    /// An optional IGP metric, applied to both attached interfaces.
    #[serde(default)]
    pub ospf_metric: Option<u32>,
}

/// One end of a link.
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    /// The router owning this end.
    pub device: String,
    /// The interface name on that router.
    pub interface: String,
    /// The interface address in `A.B.C.D/len` notation.
    pub ip: String,
}

/// The BGP part of the intent: eBGP peerings and the community-based propagation policy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BgpSection {
    /// Declared eBGP peerings, each declared from one side only.
    #[serde(default)]
    pub ebgp_peers: Vec<EbgpPeer>,
    /// The community value tagged on routes for each role, plus the optional `export` /
    /// `internal` origination tags.
    #[serde(default)]
    pub communities: BTreeMap<Tag, String>,
    /// The local-preference assigned to routes learned from each role.
    #[serde(default)]
    pub local_preference: BTreeMap<Role, u32>,
    /// For each `to_*` direction, the roles whose tagged routes may be re-advertised there.
    #[serde(default)]
    pub propagation_policy: BTreeMap<PropagationTarget, Vec<Role>>,
    /// Extra prefixes (besides the loopback) each router originates in BGP.
    #[serde(default)]
    pub origins: BTreeMap<String, Vec<String>>,
}

/// A declared eBGP peering. Only one direction needs to be declared; the compiler infers the
/// reverse session with the structurally inverted relationship.
#[derive(Debug, Clone, Deserialize)]
pub struct EbgpPeer {
    /// The declaring side.
    pub local_router: String,
    /// The remote side.
    pub remote_router: String,
    /// The ASN of the remote side.
    pub remote_as: AsId,
    /// How the local side sees the remote side.
    pub relationship: Role,
}

/// Settings of the surrounding project.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSettings {
    /// Where the generated per-router configuration files go.
    pub output_folder: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            output_folder: "output".to_string(),
        }
    }
}
