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

use pretty_assertions::assert_str_eq;

use super::{backbone_intent, two_as_intent};
use crate::assemble::{compile, compile_router};
use crate::topology::Topology;
use crate::types::CompileError;

#[test]
fn two_as_configs() {
    let intent = two_as_intent();
    let configs = compile(&intent).unwrap();
    assert_eq!(configs.len(), 2);
    assert_str_eq!(configs["R1"], include_str!("configs/two_as_r1"));
    assert_str_eq!(configs["R2"], include_str!("configs/two_as_r2"));
}

#[test]
fn backbone_configs() {
    let intent = backbone_intent();
    let configs = compile(&intent).unwrap();
    assert_eq!(configs.len(), 3);
    assert_str_eq!(configs["R1"], include_str!("configs/backbone_r1"));
    assert_str_eq!(configs["R2"], include_str!("configs/backbone_r2"));
    assert_str_eq!(configs["R3"], include_str!("configs/backbone_r3"));
}

#[test]
fn compilation_is_deterministic() {
    let intent = two_as_intent();
    assert_eq!(compile(&intent).unwrap(), compile(&intent).unwrap());
    let intent = backbone_intent();
    assert_eq!(compile(&intent).unwrap(), compile(&intent).unwrap());
}

#[test]
fn bgp_block_omitted_without_neighbors() {
    let mut intent = backbone_intent();
    // cut R3 out of BGP entirely: it keeps its link but has no session left
    intent.bgp.ebgp_peers.clear();
    intent.autonomous_systems[1].ibgp = None;

    let topo = Topology::new(&intent).unwrap();
    let cfg = compile_router(&topo, "R3").unwrap();
    assert!(!cfg.contains("router bgp"));
    assert!(!cfg.contains("community-list"));
    assert!(cfg.ends_with("!\nend\n"));
}

#[test]
fn failed_router_produces_no_partial_text() {
    let mut intent = two_as_intent();
    intent.autonomous_systems[0].routers[0].loopback = None;
    let topo = Topology::new(&intent).unwrap();
    assert!(matches!(
        compile_router(&topo, "R1").unwrap_err(),
        CompileError::MissingLoopback(name) if name == "R1"
    ));
    // the other router is unaffected
    compile_router(&topo, "R2").unwrap();
}

#[test]
fn compile_validates_first() {
    let mut intent = two_as_intent();
    intent.links[0].endpoints[0].device = "R9".to_string();
    assert!(matches!(
        compile(&intent).unwrap_err(),
        CompileError::RouterNotFound(name) if name == "R9"
    ));
}
