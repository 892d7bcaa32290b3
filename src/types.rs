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

//! Module containing all type definitions

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// AS Number
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AsId(pub u32);

impl std::fmt::Display for AsId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // configuration statements need the bare number
        write!(f, "{}", self.0)
    }
}

impl From<u32> for AsId {
    fn from(x: u32) -> Self {
        Self(x)
    }
}

/// The directed business relationship of an eBGP peering, as seen from the local router. The
/// remote side of the same session sees the structural inverse, given by [`Role::reverse`].
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The neighbor buys transit from us.
    Customer,
    /// Settlement-free peering.
    Peer,
    /// The neighbor sells transit to us.
    Provider,
}

impl Role {
    /// All roles, in the order used for deterministic iteration.
    pub const ALL: [Role; 3] = [Role::Customer, Role::Peer, Role::Provider];

    /// The relationship the remote side of the session sees. This mapping is total:
    /// `customer <-> provider`, while `peer` is its own inverse.
    pub fn reverse(self) -> Self {
        match self {
            Role::Customer => Role::Provider,
            Role::Peer => Role::Peer,
            Role::Provider => Role::Customer,
        }
    }

    /// Upper-case name as it appears in community-list and route-map names.
    pub fn upper(self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Peer => "PEER",
            Role::Provider => "PROVIDER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Customer => write!(f, "customer"),
            Role::Peer => write!(f, "peer"),
            Role::Provider => write!(f, "provider"),
        }
    }
}

/// Key into the community table of the BGP policy: either a peering role (communities tagged on
/// learned routes), or one of the two origination tags for locally originated prefixes.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Routes learned from a customer.
    Customer,
    /// Routes learned from a peer.
    Peer,
    /// Routes learned from a provider.
    Provider,
    /// Prefixes originated by a border router.
    Export,
    /// Prefixes originated by a purely internal router.
    Internal,
}

impl From<Role> for Tag {
    fn from(role: Role) -> Self {
        match role {
            Role::Customer => Tag::Customer,
            Role::Peer => Tag::Peer,
            Role::Provider => Tag::Provider,
        }
    }
}

/// The direction of an outbound propagation policy (the `to_*` keys of the intent document).
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PropagationTarget {
    /// Routes re-advertised toward customers.
    #[serde(rename = "to_customer")]
    Customer,
    /// Routes re-advertised toward peers.
    #[serde(rename = "to_peer")]
    Peer,
    /// Routes re-advertised toward providers.
    #[serde(rename = "to_provider")]
    Provider,
}

impl PropagationTarget {
    /// All targets, in the order used for deterministic iteration.
    pub const ALL: [PropagationTarget; 3] = [
        PropagationTarget::Customer,
        PropagationTarget::Peer,
        PropagationTarget::Provider,
    ];

    /// The neighbor role this target faces.
    pub fn role(self) -> Role {
        match self {
            PropagationTarget::Customer => Role::Customer,
            PropagationTarget::Peer => Role::Peer,
            PropagationTarget::Provider => Role::Provider,
        }
    }

    /// Upper-case name as it appears in community-list and route-map names.
    pub fn upper(self) -> &'static str {
        self.role().upper()
    }
}

/// Error thrown by the compiler. All variants are fatal to the compilation of the affected
/// router, or, for the topology-wide checks, to the entire run.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The router does not appear in any `autonomous_systems` entry.
    #[error("Router {0} does not appear in any autonomous system")]
    RouterNotFound(String),
    /// The router appears in more than one `autonomous_systems` entry.
    #[error("Router {0} appears in more than one autonomous system")]
    DuplicateRouter(String),
    /// At least one router owns no link endpoint at all.
    #[error("Incomplete topology: router(s) without any link endpoint: {}", .0.join(", "))]
    IsolatedRouter(Vec<String>),
    /// A declared eBGP peering has no matching link in the document.
    #[error("Declared eBGP peering {local} -> {remote} has no matching link")]
    MissingPeerLink {
        /// The declared local router.
        local: String,
        /// The declared remote router.
        remote: String,
    },
    /// The link between the two routers cannot be found while resolving a neighbor address.
    #[error("Cannot find the link between {local} and {remote}")]
    UnresolvableLink {
        /// The router being compiled.
        local: String,
        /// The neighbor whose address is needed.
        remote: String,
    },
    /// The ASN of the given router cannot be inferred.
    #[error("Cannot infer the ASN of router {0}")]
    UnresolvableAsn(String),
    /// Both directions of an eBGP peering are declared, and they contradict each other.
    #[error("eBGP relationship between {a} and {b} contradicts its declared reverse")]
    RelationshipConflict {
        /// One side of the peering.
        a: String,
        /// The other side of the peering.
        b: String,
    },
    /// The propagation policy references a role without a configured community.
    #[error("Propagation policy toward {target} references role {role} without a community")]
    UnknownPolicyRole {
        /// The `to_*` direction of the offending entry.
        target: Role,
        /// The role that has no community.
        role: Role,
    },
    /// The dotted mask is not a contiguous bitmask.
    #[error("Invalid netmask: {0}")]
    InvalidMask(Ipv4Addr),
    /// The router has no loopback address.
    #[error("Router {0} has no loopback address")]
    MissingLoopback(String),
    /// An address field of the document cannot be parsed as `A.B.C.D/len`.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
