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

use std::net::Ipv4Addr;

use super::{backbone_intent, two_as_intent};
use crate::bgp::{ebgp_neighbors, ibgp_neighbors, Neighbor};
use crate::topology::Topology;
use crate::types::{AsId, Role};

#[test]
fn one_sided_declaration_yields_both_sessions() {
    let intent = two_as_intent();
    let topo = Topology::new(&intent).unwrap();

    // the declaring side, as stated
    assert_eq!(
        ebgp_neighbors(&topo, "R1").unwrap(),
        vec![Neighbor {
            addr: Ipv4Addr::new(10, 0, 0, 2),
            remote_as: AsId(200),
            relationship: Role::Customer,
        }]
    );

    // the remote side, inferred: address from the other link direction, ASN from the
    // declaring router's AS membership, relationship inverted
    assert_eq!(
        ebgp_neighbors(&topo, "R2").unwrap(),
        vec![Neighbor {
            addr: Ipv4Addr::new(10, 0, 0, 1),
            remote_as: AsId(100),
            relationship: Role::Provider,
        }]
    );
}

#[test]
fn explicit_reverse_declaration_is_not_duplicated() {
    let mut intent = two_as_intent();
    let mut reverse = intent.bgp.ebgp_peers[0].clone();
    reverse.local_router = "R2".to_string();
    reverse.remote_router = "R1".to_string();
    reverse.remote_as = AsId(100);
    reverse.relationship = Role::Provider;
    intent.bgp.ebgp_peers.push(reverse);

    let topo = Topology::new(&intent).unwrap();
    assert_eq!(ebgp_neighbors(&topo, "R1").unwrap().len(), 1);
    assert_eq!(ebgp_neighbors(&topo, "R2").unwrap().len(), 1);
}

#[test]
fn full_mesh_ibgp_peers_by_loopback() {
    let intent = backbone_intent();
    let topo = Topology::new(&intent).unwrap();

    assert_eq!(
        ibgp_neighbors(&topo, "R1").unwrap(),
        vec![Ipv4Addr::new(2, 2, 2, 2)]
    );
    assert_eq!(
        ibgp_neighbors(&topo, "R2").unwrap(),
        vec![Ipv4Addr::new(1, 1, 1, 1)]
    );
    // AS 300 declares no iBGP
    assert_eq!(ibgp_neighbors(&topo, "R3").unwrap(), Vec::<Ipv4Addr>::new());
}

#[test]
fn peering_only_affects_its_endpoints() {
    let intent = backbone_intent();
    let topo = Topology::new(&intent).unwrap();

    assert_eq!(ebgp_neighbors(&topo, "R1").unwrap(), vec![]);
    assert_eq!(
        ebgp_neighbors(&topo, "R2").unwrap(),
        vec![Neighbor {
            addr: Ipv4Addr::new(10, 0, 23, 2),
            remote_as: AsId(300),
            relationship: Role::Provider,
        }]
    );
}
