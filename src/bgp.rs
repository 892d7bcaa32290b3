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

//! The BGP neighbor resolver: derives the iBGP full-mesh peers and the eBGP peers of a router,
//! including the symmetry inference for peerings declared from one side only.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use crate::topology::Topology;
use crate::types::{AsId, CompileError, Role};

/// An eBGP neighbor of the router being compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighbor {
    /// The neighbor's address on the shared link.
    pub addr: Ipv4Addr,
    /// The neighbor's ASN.
    pub remote_as: AsId,
    /// How this router sees the neighbor.
    pub relationship: Role,
}

/// The loopback addresses of all iBGP peers of the given router. With full-mesh iBGP, every
/// other router of the same AS is a peer; without an iBGP declaration there are none.
pub fn ibgp_neighbors(topo: &Topology, router: &str) -> Result<Vec<Ipv4Addr>, CompileError> {
    let as_data = topo.router_as(router)?;
    if as_data.ibgp.is_none() {
        return Ok(Vec::new());
    }
    as_data
        .routers
        .iter()
        .filter(|r| r.name != router)
        .map(|r| topo.loopback(&r.name))
        .collect()
}

/// All eBGP neighbors of the given router, in declaration order.
///
/// A peering declared with this router as the local side is taken as stated. A peering declared
/// with this router as the remote side, and without an explicit reverse entry, yields an
/// auto-generated neighbor: address looked up from the other direction of the same link, ASN
/// inferred from the declaring router's AS membership, relationship structurally inverted.
pub fn ebgp_neighbors(topo: &Topology, router: &str) -> Result<Vec<Neighbor>, CompileError> {
    let peers = &topo.intent().bgp.ebgp_peers;
    let declared: HashSet<(&str, &str)> = peers
        .iter()
        .map(|p| (p.local_router.as_str(), p.remote_router.as_str()))
        .collect();

    let mut neighbors = Vec::new();
    for peer in peers {
        if peer.local_router == router {
            neighbors.push(Neighbor {
                addr: topo.peer_ip(router, &peer.remote_router)?,
                remote_as: peer.remote_as,
                relationship: peer.relationship,
            });
        }

        if peer.remote_router == router
            && !declared.contains(&(peer.remote_router.as_str(), peer.local_router.as_str()))
        {
            let remote_as = topo
                .router_asn(&peer.local_router)
                .map_err(|_| CompileError::UnresolvableAsn(peer.local_router.clone()))?;
            neighbors.push(Neighbor {
                addr: topo.peer_ip(router, &peer.local_router)?,
                remote_as,
                relationship: peer.relationship.reverse(),
            });
        }
    }

    Ok(neighbors)
}
