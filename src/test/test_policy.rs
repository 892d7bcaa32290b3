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

use maplit::btreemap;
use pretty_assertions::assert_str_eq;

use super::backbone_intent;
use crate::intent::BgpSection;
use crate::policy::{
    has_inbound_policy, has_outbound_policy, originate_community, origination_route_map, origins,
    policy_config, rm_in_name, rm_out_name,
};
use crate::types::{CompileError, PropagationTarget, Role, Tag};

fn valley_free_section() -> BgpSection {
    BgpSection {
        communities: btreemap! {
            Tag::Customer => "100:10".to_string(),
            Tag::Peer => "100:20".to_string(),
            Tag::Provider => "100:30".to_string(),
        },
        local_preference: btreemap! {
            Role::Customer => 200,
            Role::Peer => 150,
            Role::Provider => 100,
        },
        propagation_policy: btreemap! {
            PropagationTarget::Customer => vec![Role::Customer, Role::Peer, Role::Provider],
            PropagationTarget::Peer => vec![Role::Customer],
            PropagationTarget::Provider => vec![Role::Customer],
        },
        ..Default::default()
    }
}

#[test]
fn route_map_names() {
    assert_eq!(rm_in_name(Role::Customer), "RM-IN-CUSTOMER");
    assert_eq!(rm_out_name(Role::Provider), "RM-OUT-TO-PROVIDER");
}

#[test]
fn valley_free_lists() {
    let cfg = policy_config(&valley_free_section()).unwrap();

    // customer routes go everywhere
    assert!(cfg.contains("ip community-list standard TO_CUSTOMER permit 100:10\n"));
    assert!(cfg.contains("ip community-list standard TO_PEER permit 100:10\n"));
    assert!(cfg.contains("ip community-list standard TO_PROVIDER permit 100:10\n"));
    // peer and provider routes only go down to customers
    assert!(cfg.contains("ip community-list standard TO_CUSTOMER permit 100:20\n"));
    assert!(cfg.contains("ip community-list standard TO_CUSTOMER permit 100:30\n"));
    assert!(!cfg.contains("ip community-list standard TO_PEER permit 100:20"));
    assert!(!cfg.contains("ip community-list standard TO_PEER permit 100:30"));
    assert!(!cfg.contains("ip community-list standard TO_PROVIDER permit 100:20"));
    assert!(!cfg.contains("ip community-list standard TO_PROVIDER permit 100:30"));
    // every outbound map ends in an explicit deny
    for role in Role::ALL {
        assert!(cfg.contains(&format!("route-map RM-OUT-TO-{} deny 20\n", role.upper())));
    }
}

#[test]
fn undeclared_direction_yields_no_outbound_map() {
    let mut section = valley_free_section();
    section.propagation_policy.remove(&PropagationTarget::Peer);

    assert!(has_outbound_policy(&section, Role::Customer));
    assert!(!has_outbound_policy(&section, Role::Peer));
    assert!(has_inbound_policy(&section, Role::Peer));

    let cfg = policy_config(&section).unwrap();
    assert!(!cfg.contains("TO_PEER"));
    assert!(cfg.contains("route-map RM-IN-PEER permit 10\n"));
}

#[test]
fn role_without_community_in_policy_fails() {
    let mut section = valley_free_section();
    section.communities.remove(&Tag::Peer);
    assert!(matches!(
        policy_config(&section).unwrap_err(),
        CompileError::UnknownPolicyRole {
            target: Role::Customer,
            role: Role::Peer,
        }
    ));
}

#[test]
fn default_local_preference() {
    let mut section = valley_free_section();
    section.local_preference.remove(&Role::Peer);
    let cfg = policy_config(&section).unwrap();
    assert!(cfg.contains(
        "route-map RM-IN-PEER permit 10\n set community 100:20 additive\n set local-preference 100\n"
    ));
}

#[test]
fn origination_tags_in_to_lists() {
    let bgp = &backbone_intent().bgp;
    let cfg = policy_config(bgp).unwrap();
    // the export tag passes every filter, the internal tag only the customer one
    assert!(cfg.contains("ip community-list standard TO_CUSTOMER permit 100:99\n"));
    assert!(cfg.contains("ip community-list standard TO_PEER permit 100:99\n"));
    assert!(cfg.contains("ip community-list standard TO_PROVIDER permit 100:99\n"));
    assert!(cfg.contains("ip community-list standard TO_CUSTOMER permit 100:98\n"));
    assert!(!cfg.contains("ip community-list standard TO_PEER permit 100:98"));
    assert!(!cfg.contains("ip community-list standard TO_PROVIDER permit 100:98"));
}

#[test]
fn originate_community_by_border_status() {
    let intent = backbone_intent();
    assert_eq!(originate_community(&intent.bgp, true), Some("100:99"));
    assert_eq!(originate_community(&intent.bgp, false), Some("100:98"));
    // without origination tags, origination falls back to plain network statements
    let section = valley_free_section();
    assert_eq!(originate_community(&section, true), None);
    assert_eq!(originate_community(&section, false), None);
}

#[test]
fn origination_route_map_text() {
    assert_str_eq!(
        origination_route_map("100:99"),
        "\
route-map RM-ORIGINATE permit 10
 set community 100:99 additive
!
"
    );
}

#[test]
fn origins_include_loopback_sorted_deduplicated() {
    let intent = backbone_intent();
    let lo = Ipv4Addr::new(2, 2, 2, 2);
    let nets = origins(&intent.bgp, "R2", lo).unwrap();
    assert_eq!(
        nets,
        vec![
            "2.2.2.2/32".parse().unwrap(),
            "192.168.10.0/24".parse().unwrap(),
        ]
    );

    // a router without extra prefixes only originates its loopback
    let nets = origins(&intent.bgp, "R1", Ipv4Addr::new(1, 1, 1, 1)).unwrap();
    assert_eq!(nets, vec!["1.1.1.1/32".parse().unwrap()]);

    // host bits are truncated, duplicates collapse
    let mut intent = intent;
    intent
        .bgp
        .origins
        .insert("R1".to_string(), vec!["1.1.1.1/32".to_string()]);
    let nets = origins(&intent.bgp, "R1", Ipv4Addr::new(1, 1, 1, 1)).unwrap();
    assert_eq!(nets, vec!["1.1.1.1/32".parse().unwrap()]);
}
