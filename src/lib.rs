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

//! # IntentC
//!
//! IntentC compiles a declarative network-intent document (autonomous systems, routers,
//! links, and BGP peering policy) into per-router Cisco IOS configuration text: interface
//! addressing, an interior gateway protocol (RIP or OSPF), and BGP with community-based
//! valley-free route propagation.
//!
//! The intent document is the sole source of truth. It is read once, validated globally
//! ([`topology::Topology::validate`]), and then every router is compiled independently in one
//! pass over the immutable document. A router either compiles fully or produces no artifact
//! at all.
//!
//! ```
//! use intentc::{assemble, intent::IntentDocument, topology::Topology};
//!
//! let document = IntentDocument::from_json(
//!     r#"{
//!         "autonomous_systems": [
//!             {
//!                 "asn": 100,
//!                 "igp": {"protocol": "OSPF", "process_id": 1, "area": 0},
//!                 "routers": [
//!                     {"name": "R1", "loopback": "1.1.1.1/32"},
//!                     {"name": "R2", "loopback": "2.2.2.2/32"}
//!                 ]
//!             }
//!         ],
//!         "links": [
//!             {
//!                 "endpoints": [
//!                     {"device": "R1", "interface": "GigabitEthernet0/0", "ip": "10.0.0.1/30"},
//!                     {"device": "R2", "interface": "GigabitEthernet0/0", "ip": "10.0.0.2/30"}
//!                 ]
//!             }
//!         ]
//!     }"#,
//! )?;
//!
//! let topo = Topology::new(&document)?;
//! topo.validate()?;
//! let cfg = assemble::compile_router(&topo, "R1")?;
//! assert!(cfg.starts_with("!\nversion 15.2\n"));
//! assert!(cfg.contains("hostname R1"));
//! assert!(cfg.contains(" network 10.0.0.0 0.0.0.3 area 0"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod addressing;
pub mod assemble;
pub mod bgp;
pub mod deploy;
pub mod generators;
pub mod igp;
pub mod intent;
pub mod policy;
pub mod topology;
pub mod types;

#[cfg(test)]
mod test;
