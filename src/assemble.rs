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

//! The config assembler: orders and concatenates the output of all components into one
//! per-router configuration text.
//!
//! The section order is a fixed contract: header, loopback interface, physical interfaces,
//! IGP block, BGP policy and BGP block, terminating marker. The assembler performs no
//! computation of its own, so compiling the same document twice produces byte-identical text.

use std::collections::BTreeMap;
use std::net::Ipv4Addr;

use crate::generators::{BgpNeighbor, Header, Interface as InterfaceGen, RouterBgp};
use crate::intent::{IgpProtocol, IntentDocument};
use crate::topology::Topology;
use crate::types::{CompileError, Role};
use crate::{bgp, igp, policy};

/// Compile the configuration of a single router. Either fully succeeds or fails; a router that
/// cannot be fully resolved produces no partial text.
pub fn compile_router(topo: &Topology, name: &str) -> Result<String, CompileError> {
    let intent = topo.intent();
    let as_data = topo.router_as(name)?;
    let loopback = topo.loopback(name)?;
    let interfaces = topo.interfaces(name)?;
    let protocol = as_data.igp.as_ref().map(|igp| igp.protocol);

    let ibgp_peers = bgp::ibgp_neighbors(topo, name)?;
    let ebgp_peers = bgp::ebgp_neighbors(topo, name)?;

    let mut cfg = String::new();

    // header and loopback
    cfg.push_str(&Header::new(name).build());
    cfg.push_str(
        InterfaceGen::new("Loopback0")
            .ip_address(loopback, Ipv4Addr::new(255, 255, 255, 255))
            .build()
            .as_str(),
    );

    // physical interfaces; the OSPF cost lives on the interface, not in the process block
    for iface in &interfaces {
        let mut gen = InterfaceGen::new(&iface.name);
        gen.ip_address(iface.addr.addr(), iface.mask());
        if protocol == Some(IgpProtocol::Ospf) {
            if let Some(cost) = iface.cost {
                gen.ospf_cost(cost);
            }
        }
        gen.no_shutdown();
        cfg.push_str(&gen.build());
    }

    // IGP block
    cfg.push_str(&igp::igp_config(as_data, &interfaces, loopback));

    // BGP policy and BGP block, omitted entirely without any neighbor
    if !ibgp_peers.is_empty() || !ebgp_peers.is_empty() {
        let border = ebgp_peers.iter().any(|n| n.relationship == Role::Provider);
        cfg.push_str(&policy::policy_config(&intent.bgp)?);

        let originate = policy::originate_community(&intent.bgp, border);
        if let Some(community) = originate {
            cfg.push_str(&policy::origination_route_map(community));
        }

        let mut router_bgp = RouterBgp::new(as_data.asn, loopback);
        for peer in &ibgp_peers {
            let mut neighbor = BgpNeighbor::new(*peer, as_data.asn);
            neighbor
                .update_source("Loopback0")
                .next_hop_self()
                .send_community();
            router_bgp.neighbor(neighbor);
        }
        for peer in &ebgp_peers {
            let mut neighbor = BgpNeighbor::new(peer.addr, peer.remote_as);
            neighbor.send_community();
            if policy::has_inbound_policy(&intent.bgp, peer.relationship) {
                neighbor.route_map_in(policy::rm_in_name(peer.relationship));
            }
            if policy::has_outbound_policy(&intent.bgp, peer.relationship) {
                neighbor.route_map_out(policy::rm_out_name(peer.relationship));
            }
            router_bgp.neighbor(neighbor);
        }
        for net in policy::origins(&intent.bgp, name, loopback)? {
            router_bgp.network(net, originate.map(|_| policy::RM_ORIGINATE));
        }
        cfg.push_str(&router_bgp.build());
    }

    cfg.push_str("end\n");
    Ok(cfg)
}

/// Compile every router of the document, after validating the topology once. Fails on the
/// first router that cannot be compiled; the run-level driver that recovers per router lives
/// in the binary.
pub fn compile(intent: &IntentDocument) -> Result<BTreeMap<String, String>, CompileError> {
    let topo = Topology::new(intent)?;
    topo.validate()?;
    let mut configs = BTreeMap::new();
    for name in intent.router_names() {
        log::debug!("compiling configuration for {name}");
        configs.insert(name.to_string(), compile_router(&topo, name)?);
    }
    Ok(configs)
}
