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

//! The BGP policy compiler: community-lists and route-maps implementing tagging,
//! local-preference, and valley-free propagation.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use itertools::Itertools;

use crate::addressing;
use crate::generators::{CommunityList, RouteMapEntry};
use crate::intent::BgpSection;
use crate::types::{CompileError, PropagationTarget, Role, Tag};

/// Name of the origination route-map.
pub const RM_ORIGINATE: &str = "RM-ORIGINATE";

/// Default local-preference when a role has a community but no configured preference.
const DEFAULT_LOCAL_PREF: u32 = 100;

/// Name of the inbound route-map for a role.
pub fn rm_in_name(role: Role) -> String {
    format!("RM-IN-{}", role.upper())
}

/// Name of the outbound route-map toward neighbors of a role.
pub fn rm_out_name(role: Role) -> String {
    format!("RM-OUT-TO-{}", role.upper())
}

/// Whether the inbound route-map for the given role exists (the role has a community).
pub fn has_inbound_policy(bgp: &BgpSection, role: Role) -> bool {
    bgp.communities.contains_key(&Tag::from(role))
}

/// Whether an outbound route-map exists toward the given role (the propagation policy declares
/// that direction). An undeclared direction means the neighbor gets no outbound filter.
pub fn has_outbound_policy(bgp: &BgpSection, role: Role) -> bool {
    PropagationTarget::ALL
        .into_iter()
        .any(|t| t.role() == role && bgp.propagation_policy.contains_key(&t))
}

/// Compile the policy preamble of the BGP section: per-role community-lists, inbound tagging
/// route-maps, and per-target outbound filters with an explicit final deny.
pub fn policy_config(bgp: &BgpSection) -> Result<String, CompileError> {
    let mut cfg = String::new();

    // one community-list per role with a configured community
    let mut role_lists = String::new();
    for role in Role::ALL {
        if let Some(community) = bgp.communities.get(&Tag::from(role)) {
            role_lists.push_str(&CommunityList::new(role.upper()).permit(community).build());
        }
    }
    cfg.push_str(&role_lists);
    cfg.push('\n');

    // inbound tagging: set the community (additive) and the role's local-preference
    for role in Role::ALL {
        if let Some(community) = bgp.communities.get(&Tag::from(role)) {
            let pref = bgp
                .local_preference
                .get(&role)
                .copied()
                .unwrap_or(DEFAULT_LOCAL_PREF);
            cfg.push_str(
                &RouteMapEntry::new(rm_in_name(role), 10, true)
                    .set_community_additive(community)
                    .set_local_preference(pref)
                    .build(),
            );
            cfg.push_str("!\n");
        }
    }

    // outbound filters, one per declared propagation target
    for target in PropagationTarget::ALL {
        let Some(allowed) = bgp.propagation_policy.get(&target) else {
            continue;
        };
        let list_name = format!("TO_{}", target.upper());
        let mut list = CommunityList::new(&list_name);
        for role in allowed {
            let community = bgp.communities.get(&Tag::from(*role)).ok_or(
                CompileError::UnknownPolicyRole {
                    target: target.role(),
                    role: *role,
                },
            )?;
            list.permit(community);
        }
        // locally originated prefixes carry the export tag toward every target; the internal
        // tag never leaves the customer cone
        if let Some(export) = bgp.communities.get(&Tag::Export) {
            list.permit(export);
        }
        if target == PropagationTarget::Customer {
            if let Some(internal) = bgp.communities.get(&Tag::Internal) {
                list.permit(internal);
            }
        }
        cfg.push_str(&list.build());
        cfg.push('\n');

        cfg.push_str(
            &RouteMapEntry::new(rm_out_name(target.role()), 10, true)
                .match_community(&list_name)
                .build(),
        );
        cfg.push_str(&RouteMapEntry::new(rm_out_name(target.role()), 20, false).build());
        cfg.push_str("!\n");
    }

    Ok(cfg)
}

/// The community used to tag prefixes originated by this router: the `export` tag on border
/// routers (at least one provider-facing eBGP neighbor), the `internal` tag otherwise. Returns
/// `None` when the respective tag has no configured community, in which case origination falls
/// back to plain `network` statements.
pub fn originate_community(bgp: &BgpSection, border: bool) -> Option<&str> {
    let tag = if border { Tag::Export } else { Tag::Internal };
    bgp.communities.get(&tag).map(String::as_str)
}

/// The origination route-map tagging locally originated prefixes with the given community.
pub fn origination_route_map(community: &str) -> String {
    let mut cfg = RouteMapEntry::new(RM_ORIGINATE, 10, true)
        .set_community_additive(community)
        .build();
    cfg.push_str("!\n");
    cfg
}

/// The prefixes this router originates: its loopback as a host route, plus any extra prefixes
/// declared for it, deduplicated and sorted.
pub fn origins(
    bgp: &BgpSection,
    router: &str,
    loopback: Ipv4Addr,
) -> Result<Vec<Ipv4Net>, CompileError> {
    let loopback = Ipv4Net::new(loopback, 32)
        .map_err(|_| CompileError::InvalidAddress(loopback.to_string()))?;
    let extra = bgp
        .origins
        .get(router)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let mut nets = vec![loopback];
    for prefix in extra {
        nets.push(addressing::parse_prefixed(prefix)?);
    }
    Ok(nets.into_iter().map(|n| n.trunc()).sorted().dedup().collect())
}
