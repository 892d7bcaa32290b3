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

use serde_json::json;

use crate::intent::IntentDocument;

mod test_assemble;
mod test_bgp;
mod test_policy;

/// Two single-router ASes connected by one link, with a single eBGP peering declared from R1
/// only (R1 sees R2 as its customer), and no propagation policy.
fn two_as_intent() -> IntentDocument {
    serde_json::from_value(json!({
        "autonomous_systems": [
            {
                "asn": 100,
                "routers": [{"name": "R1", "loopback": "1.1.1.1/32"}]
            },
            {
                "asn": 200,
                "routers": [{"name": "R2", "loopback": "2.2.2.2/32"}]
            }
        ],
        "links": [
            {
                "endpoints": [
                    {"device": "R1", "interface": "Gi0/0", "ip": "10.0.0.1/30"},
                    {"device": "R2", "interface": "Gi0/0", "ip": "10.0.0.2/30"}
                ]
            }
        ],
        "bgp": {
            "ebgp_peers": [
                {
                    "local_router": "R1",
                    "remote_router": "R2",
                    "remote_as": 200,
                    "relationship": "customer"
                }
            ],
            "communities": {
                "customer": "100:10",
                "peer": "100:20",
                "provider": "100:30"
            },
            "local_preference": {
                "customer": 200,
                "peer": 150,
                "provider": 100
            }
        },
        "project_settings": {"output_folder": "output"}
    }))
    .expect("valid intent document")
}

/// A two-router OSPF backbone (AS 100, full-mesh iBGP) buying transit from a single-router AS
/// 300, with the full valley-free policy, origination tags, and one extra originated prefix.
fn backbone_intent() -> IntentDocument {
    serde_json::from_value(json!({
        "autonomous_systems": [
            {
                "asn": 100,
                "igp": {"protocol": "OSPF", "process_id": 1, "area": 0},
                "ibgp": {"type": "full-mesh"},
                "routers": [
                    {"name": "R1", "loopback": "1.1.1.1/32"},
                    {"name": "R2", "loopback": "2.2.2.2/32"}
                ]
            },
            {
                "asn": 300,
                "routers": [{"name": "R3", "loopback": "3.3.3.3/32"}]
            }
        ],
        "links": [
            {
                "endpoints": [
                    {"device": "R1", "interface": "Gi0/0", "ip": "10.0.12.1/30"},
                    {"device": "R2", "interface": "Gi0/0", "ip": "10.0.12.2/30"}
                ],
                "ospf_metric": 15
            },
            {
                "endpoints": [
                    {"device": "R2", "interface": "Gi0/1", "ip": "10.0.23.1/30"},
                    {"device": "R3", "interface": "Gi0/0", "ip": "10.0.23.2/30"}
                ]
            }
        ],
        "bgp": {
            "ebgp_peers": [
                {
                    "local_router": "R3",
                    "remote_router": "R2",
                    "remote_as": 100,
                    "relationship": "customer"
                }
            ],
            "communities": {
                "customer": "100:10",
                "peer": "100:20",
                "provider": "100:30",
                "export": "100:99",
                "internal": "100:98"
            },
            "local_preference": {
                "customer": 200,
                "peer": 150,
                "provider": 100
            },
            "propagation_policy": {
                "to_customer": ["customer", "peer", "provider"],
                "to_peer": ["customer"],
                "to_provider": ["customer"]
            },
            "origins": {
                "R2": ["192.168.10.0/24"]
            }
        },
        "project_settings": {"output_folder": "output"}
    }))
    .expect("valid intent document")
}
