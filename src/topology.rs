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

//! The topology resolver: extracts a router's AS membership, loopback, interfaces and peer
//! addresses from the intent document, and validates topology completeness.
//!
//! All lookups go through a [`Topology`] index built once per compilation run, instead of
//! scanning the whole document on every call.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use itertools::Itertools;

use crate::addressing;
use crate::intent::{AutonomousSystem, IntentDocument, Link, RouterDecl};
use crate::types::{AsId, CompileError};

/// An interface of the router being compiled, derived from a link endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// The interface name, e.g. `GigabitEthernet0/0`.
    pub name: String,
    /// The interface address, including the prefix length of the link network.
    pub addr: Ipv4Net,
    /// The IGP metric of the link, if one is declared.
    pub cost: Option<u32>,
}

impl Interface {
    /// The dotted netmask of the link network.
    pub fn mask(&self) -> Ipv4Addr {
        addressing::netmask(self.addr.prefix_len())
    }

    /// The containing network of the interface address.
    pub fn network(&self) -> Ipv4Addr {
        self.addr.network()
    }
}

/// Normalized key for a link: the two router names in lexicographic order, so that lookups are
/// direction independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct LinkKey<'a>(&'a str, &'a str);

impl<'a> LinkKey<'a> {
    fn new(a: &'a str, b: &'a str) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }
}

/// One-time index over the intent document. Maps every router name to its owning AS, and every
/// unordered router pair to its link.
#[derive(Debug)]
pub struct Topology<'a> {
    intent: &'a IntentDocument,
    routers: HashMap<&'a str, (&'a AutonomousSystem, &'a RouterDecl)>,
    links: HashMap<LinkKey<'a>, &'a Link>,
}

impl<'a> Topology<'a> {
    /// Build the index. Fails with [`CompileError::DuplicateRouter`] if a router appears in
    /// more than one AS (membership must be a partition).
    pub fn new(intent: &'a IntentDocument) -> Result<Self, CompileError> {
        let mut routers = HashMap::new();
        for as_data in &intent.autonomous_systems {
            for router in &as_data.routers {
                if routers
                    .insert(router.name.as_str(), (as_data, router))
                    .is_some()
                {
                    return Err(CompileError::DuplicateRouter(router.name.clone()));
                }
            }
        }

        let mut links = HashMap::new();
        for link in &intent.links {
            if let Some((a, b)) = link
                .endpoints
                .iter()
                .map(|ep| ep.device.as_str())
                .collect_tuple()
            {
                links.entry(LinkKey::new(a, b)).or_insert(link);
            }
        }

        Ok(Self {
            intent,
            routers,
            links,
        })
    }

    /// The underlying intent document.
    pub fn intent(&self) -> &'a IntentDocument {
        self.intent
    }

    /// The AS record owning the given router.
    pub fn router_as(&self, name: &str) -> Result<&'a AutonomousSystem, CompileError> {
        self.routers
            .get(name)
            .map(|(as_data, _)| *as_data)
            .ok_or_else(|| CompileError::RouterNotFound(name.to_string()))
    }

    /// The ASN of the given router.
    pub fn router_asn(&self, name: &str) -> Result<AsId, CompileError> {
        Ok(self.router_as(name)?.asn)
    }

    /// The loopback address of the given router, with the prefix length stripped.
    pub fn loopback(&self, name: &str) -> Result<Ipv4Addr, CompileError> {
        let (_, decl) = self
            .routers
            .get(name)
            .ok_or_else(|| CompileError::RouterNotFound(name.to_string()))?;
        let loopback = decl
            .loopback
            .as_deref()
            .ok_or_else(|| CompileError::MissingLoopback(name.to_string()))?;
        addressing::parse_host(loopback)
    }

    /// All interfaces of the given router, one per link endpoint it owns, in document order.
    /// The per-interface cost is copied from the link if one is declared.
    pub fn interfaces(&self, name: &str) -> Result<Vec<Interface>, CompileError> {
        let mut interfaces = Vec::new();
        for link in &self.intent.links {
            for ep in &link.endpoints {
                if ep.device == name {
                    interfaces.push(Interface {
                        name: ep.interface.clone(),
                        addr: addressing::parse_prefixed(&ep.ip)?,
                        cost: link.ospf_metric,
                    });
                }
            }
        }
        Ok(interfaces)
    }

    /// The address of `remote` on the link connecting `local` and `remote`, with the prefix
    /// length stripped.
    pub fn peer_ip(&self, local: &str, remote: &str) -> Result<Ipv4Addr, CompileError> {
        let link = self
            .links
            .get(&LinkKey::new(local, remote))
            .ok_or_else(|| CompileError::UnresolvableLink {
                local: local.to_string(),
                remote: remote.to_string(),
            })?;
        let ep = link
            .endpoints
            .iter()
            .find(|ep| ep.device == remote)
            .ok_or_else(|| CompileError::UnresolvableLink {
                local: local.to_string(),
                remote: remote.to_string(),
            })?;
        addressing::parse_host(&ep.ip)
    }

    /// Validate the whole document before any per-router compilation:
    ///
    /// - every link endpoint must reference a known router,
    /// - every router must own at least one link endpoint,
    /// - every declared eBGP peering must have a matching link,
    /// - an explicitly declared reverse peering must agree with the structural inverse.
    pub fn validate(&self) -> Result<(), CompileError> {
        let mut endpoint_count: HashMap<&str, usize> =
            self.routers.keys().map(|name| (*name, 0)).collect();
        for link in &self.intent.links {
            for ep in &link.endpoints {
                match endpoint_count.get_mut(ep.device.as_str()) {
                    Some(n) => *n += 1,
                    None => return Err(CompileError::RouterNotFound(ep.device.clone())),
                }
            }
        }

        let isolated = endpoint_count
            .iter()
            .filter(|(_, n)| **n == 0)
            .map(|(name, _)| name.to_string())
            .sorted()
            .collect_vec();
        if !isolated.is_empty() {
            return Err(CompileError::IsolatedRouter(isolated));
        }

        let peers = &self.intent.bgp.ebgp_peers;
        for peer in peers {
            self.router_asn(&peer.local_router)?;
            self.router_asn(&peer.remote_router)?;
            if !self
                .links
                .contains_key(&LinkKey::new(&peer.local_router, &peer.remote_router))
            {
                return Err(CompileError::MissingPeerLink {
                    local: peer.local_router.clone(),
                    remote: peer.remote_router.clone(),
                });
            }
            // an explicitly declared reverse entry must match the structural inverse
            if let Some(reverse) = peers.iter().find(|p| {
                p.local_router == peer.remote_router && p.remote_router == peer.local_router
            }) {
                if reverse.relationship != peer.relationship.reverse() {
                    return Err(CompileError::RelationshipConflict {
                        a: peer.local_router.clone(),
                        b: peer.remote_router.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
