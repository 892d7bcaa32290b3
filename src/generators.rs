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

//! Builders for the individual Cisco IOS configuration statements.
//!
//! The emitted text is the bit-exact compatibility surface toward the emulated devices: one
//! leading space per sub-statement, `!` as the block separator. Do not change the literal
//! syntax without checking the downstream deployment.

use std::fmt::Write;
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::addressing::netmask;
use crate::types::AsId;

/// The fixed configuration header of a router.
///
/// ```
/// # use intentc::generators::Header;
/// assert_eq!(
///     Header::new("R1").build(),
///     "\
/// !
/// version 15.2
/// service timestamps debug datetime msec
/// service timestamps log datetime msec
/// hostname R1
/// !
/// "
/// );
/// ```
#[derive(Debug)]
pub struct Header {
    hostname: String,
}

impl Header {
    /// Create the header for a given hostname.
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
        }
    }

    /// Build the configuration text.
    pub fn build(&self) -> String {
        format!(
            "!\nversion 15.2\nservice timestamps debug datetime msec\nservice timestamps log datetime msec\nhostname {}\n!\n",
            self.hostname
        )
    }
}

/// Interface configuration builder.
///
/// ```
/// # use intentc::generators::Interface;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(
///     Interface::new("Loopback0")
///         .ip_address(Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(255, 255, 255, 255))
///         .build(),
///     "\
/// interface Loopback0
///  ip address 1.1.1.1 255.255.255.255
/// !
/// "
/// );
/// ```
///
/// Physical interfaces additionally get `no shutdown`, and an OSPF cost if the link carries a
/// metric:
///
/// ```
/// # use intentc::generators::Interface;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(
///     Interface::new("GigabitEthernet0/0")
///         .ip_address(Ipv4Addr::new(10, 0, 0, 1), Ipv4Addr::new(255, 255, 255, 252))
///         .ospf_cost(15)
///         .no_shutdown()
///         .build(),
///     "\
/// interface GigabitEthernet0/0
///  ip address 10.0.0.1 255.255.255.252
///  ip ospf cost 15
///  no shutdown
/// !
/// "
/// );
/// ```
#[derive(Debug)]
pub struct Interface {
    name: String,
    address: Option<(Ipv4Addr, Ipv4Addr)>,
    ospf_cost: Option<u32>,
    no_shutdown: bool,
}

impl Interface {
    /// Create a new interface builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            ospf_cost: None,
            no_shutdown: false,
        }
    }

    /// Set the interface address and dotted mask.
    pub fn ip_address(&mut self, addr: Ipv4Addr, mask: Ipv4Addr) -> &mut Self {
        self.address = Some((addr, mask));
        self
    }

    /// Set the OSPF cost of the interface.
    pub fn ospf_cost(&mut self, cost: u32) -> &mut Self {
        self.ospf_cost = Some(cost);
        self
    }

    /// Enable the interface with `no shutdown`.
    pub fn no_shutdown(&mut self) -> &mut Self {
        self.no_shutdown = true;
        self
    }

    /// Build the configuration text.
    pub fn build(&self) -> String {
        let mut s = format!("interface {}\n", self.name);
        if let Some((addr, mask)) = self.address {
            writeln!(s, " ip address {addr} {mask}").expect("write to string");
        }
        if let Some(cost) = self.ospf_cost {
            writeln!(s, " ip ospf cost {cost}").expect("write to string");
        }
        if self.no_shutdown {
            s.push_str(" no shutdown\n");
        }
        s.push_str("!\n");
        s
    }
}

/// Builder for the `router rip` block. Networks must already be classful major networks.
///
/// ```
/// # use intentc::generators::RouterRip;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(
///     RouterRip::new()
///         .network(Ipv4Addr::new(10, 0, 0, 0))
///         .redistribute_connected()
///         .build(),
///     "\
/// router rip
///  version 2
///  no auto-summary
///  network 10.0.0.0
///  redistribute connected
/// !
/// "
/// );
/// ```
#[derive(Debug, Default)]
pub struct RouterRip {
    networks: Vec<Ipv4Addr>,
    redistribute_connected: bool,
}

impl RouterRip {
    /// Create a new RIP builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a classful network statement.
    pub fn network(&mut self, net: Ipv4Addr) -> &mut Self {
        self.networks.push(net);
        self
    }

    /// Redistribute connected routes (used to advertise the loopback, which no classful
    /// network statement matches).
    pub fn redistribute_connected(&mut self) -> &mut Self {
        self.redistribute_connected = true;
        self
    }

    /// Build the configuration text.
    pub fn build(&self) -> String {
        let mut s = String::from("router rip\n version 2\n no auto-summary\n");
        for net in &self.networks {
            writeln!(s, " network {net}").expect("write to string");
        }
        if self.redistribute_connected {
            s.push_str(" redistribute connected\n");
        }
        s.push_str("!\n");
        s
    }
}

/// Builder for the `router ospf` block.
///
/// ```
/// # use intentc::generators::RouterOspf;
/// use std::net::Ipv4Addr;
///
/// assert_eq!(
///     RouterOspf::new(1, Ipv4Addr::new(1, 1, 1, 1))
///         .network(Ipv4Addr::new(10, 0, 0, 0), Ipv4Addr::new(0, 0, 0, 3), 0)
///         .network(Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(0, 0, 0, 0), 0)
///         .build(),
///     "\
/// router ospf 1
///  router-id 1.1.1.1
///  network 10.0.0.0 0.0.0.3 area 0
///  network 1.1.1.1 0.0.0.0 area 0
/// !
/// "
/// );
/// ```
#[derive(Debug)]
pub struct RouterOspf {
    process_id: u32,
    router_id: Ipv4Addr,
    networks: Vec<(Ipv4Addr, Ipv4Addr, u32)>,
}

impl RouterOspf {
    /// Create a new OSPF builder for the given process id and router-id.
    pub fn new(process_id: u32, router_id: Ipv4Addr) -> Self {
        Self {
            process_id,
            router_id,
            networks: Vec::new(),
        }
    }

    /// Add a `network <addr> <wildcard> area <area>` statement.
    pub fn network(&mut self, addr: Ipv4Addr, wildcard: Ipv4Addr, area: u32) -> &mut Self {
        self.networks.push((addr, wildcard, area));
        self
    }

    /// Build the configuration text.
    pub fn build(&self) -> String {
        let mut s = format!(
            "router ospf {}\n router-id {}\n",
            self.process_id, self.router_id
        );
        for (addr, wildcard, area) in &self.networks {
            writeln!(s, " network {addr} {wildcard} area {area}").expect("write to string");
        }
        s.push_str("!\n");
        s
    }
}

/// Builder for a standard community-list. Each entry becomes one `permit` line.
///
/// ```
/// # use intentc::generators::CommunityList;
/// assert_eq!(
///     CommunityList::new("TO_PROVIDER").permit("100:10").build(),
///     "ip community-list standard TO_PROVIDER permit 100:10\n"
/// );
/// ```
#[derive(Debug)]
pub struct CommunityList {
    name: String,
    entries: Vec<String>,
}

impl CommunityList {
    /// Create a new community-list builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Permit a community value.
    pub fn permit(&mut self, community: impl Into<String>) -> &mut Self {
        self.entries.push(community.into());
        self
    }

    /// Build the configuration text.
    pub fn build(&self) -> String {
        let mut s = String::new();
        for community in &self.entries {
            writeln!(s, "ip community-list standard {} permit {}", self.name, community)
                .expect("write to string");
        }
        s
    }
}

/// Builder for a single route-map entry. The caller closes the block with `!` once all entries
/// of the same map are emitted.
///
/// ```
/// # use intentc::generators::RouteMapEntry;
/// assert_eq!(
///     RouteMapEntry::new("RM-IN-CUSTOMER", 10, true)
///         .set_community_additive("100:10")
///         .set_local_preference(200)
///         .build(),
///     "\
/// route-map RM-IN-CUSTOMER permit 10
///  set community 100:10 additive
///  set local-preference 200
/// "
/// );
/// assert_eq!(
///     RouteMapEntry::new("RM-OUT-TO-PROVIDER", 20, false).build(),
///     "route-map RM-OUT-TO-PROVIDER deny 20\n"
/// );
/// ```
#[derive(Debug)]
pub struct RouteMapEntry {
    name: String,
    seq: u32,
    permit: bool,
    match_community: Option<String>,
    set_community: Option<String>,
    set_local_preference: Option<u32>,
}

impl RouteMapEntry {
    /// Create a new route-map entry builder.
    pub fn new(name: impl Into<String>, seq: u32, permit: bool) -> Self {
        Self {
            name: name.into(),
            seq,
            permit,
            match_community: None,
            set_community: None,
            set_local_preference: None,
        }
    }

    /// Match routes carrying a community of the given community-list.
    pub fn match_community(&mut self, list: impl Into<String>) -> &mut Self {
        self.match_community = Some(list.into());
        self
    }

    /// Tag the route with a community, additively, so multiple tags may coexist.
    pub fn set_community_additive(&mut self, community: impl Into<String>) -> &mut Self {
        self.set_community = Some(community.into());
        self
    }

    /// Set the local-preference of matching routes.
    pub fn set_local_preference(&mut self, pref: u32) -> &mut Self {
        self.set_local_preference = Some(pref);
        self
    }

    /// Build the configuration text.
    pub fn build(&self) -> String {
        let mut s = format!(
            "route-map {} {} {}\n",
            self.name,
            if self.permit { "permit" } else { "deny" },
            self.seq
        );
        if let Some(list) = &self.match_community {
            writeln!(s, " match community {list}").expect("write to string");
        }
        if let Some(community) = &self.set_community {
            writeln!(s, " set community {community} additive").expect("write to string");
        }
        if let Some(pref) = self.set_local_preference {
            writeln!(s, " set local-preference {pref}").expect("write to string");
        }
        s
    }
}

/// Builder for one `neighbor` inside a `router bgp` block. The statement order is fixed:
/// `remote-as`, `update-source`, `next-hop-self`, `send-community`, inbound route-map,
/// outbound route-map.
#[derive(Debug)]
pub struct BgpNeighbor {
    addr: Ipv4Addr,
    remote_as: AsId,
    update_source: Option<String>,
    next_hop_self: bool,
    send_community: bool,
    route_map_in: Option<String>,
    route_map_out: Option<String>,
}

impl BgpNeighbor {
    /// Create a new neighbor builder.
    pub fn new(addr: Ipv4Addr, remote_as: AsId) -> Self {
        Self {
            addr,
            remote_as,
            update_source: None,
            next_hop_self: false,
            send_community: false,
            route_map_in: None,
            route_map_out: None,
        }
    }

    /// Source the session from the given interface (iBGP sessions ride on the loopback).
    pub fn update_source(&mut self, iface: impl Into<String>) -> &mut Self {
        self.update_source = Some(iface.into());
        self
    }

    /// Rewrite the next-hop to ourselves toward this neighbor.
    pub fn next_hop_self(&mut self) -> &mut Self {
        self.next_hop_self = true;
        self
    }

    /// Propagate community attributes to this neighbor.
    pub fn send_community(&mut self) -> &mut Self {
        self.send_community = true;
        self
    }

    /// Apply an inbound route-map.
    pub fn route_map_in(&mut self, name: impl Into<String>) -> &mut Self {
        self.route_map_in = Some(name.into());
        self
    }

    /// Apply an outbound route-map.
    pub fn route_map_out(&mut self, name: impl Into<String>) -> &mut Self {
        self.route_map_out = Some(name.into());
        self
    }

    fn build(&self) -> String {
        let mut s = String::new();
        let n = self.addr;
        writeln!(s, " neighbor {n} remote-as {}", self.remote_as).expect("write to string");
        if let Some(source) = &self.update_source {
            writeln!(s, " neighbor {n} update-source {source}").expect("write to string");
        }
        if self.next_hop_self {
            writeln!(s, " neighbor {n} next-hop-self").expect("write to string");
        }
        if self.send_community {
            writeln!(s, " neighbor {n} send-community").expect("write to string");
        }
        if let Some(rm) = &self.route_map_in {
            writeln!(s, " neighbor {n} route-map {rm} in").expect("write to string");
        }
        if let Some(rm) = &self.route_map_out {
            writeln!(s, " neighbor {n} route-map {rm} out").expect("write to string");
        }
        s
    }
}

/// Builder for the `router bgp` block: router-id and logging first, then all neighbors in
/// the order they were added, then the origination `network` statements.
///
/// ```
/// # use intentc::generators::{BgpNeighbor, RouterBgp};
/// use std::net::Ipv4Addr;
///
/// let mut bgp = RouterBgp::new(100.into(), Ipv4Addr::new(1, 1, 1, 1));
/// let mut neighbor = BgpNeighbor::new(Ipv4Addr::new(10, 0, 0, 2), 200.into());
/// neighbor.send_community().route_map_in("RM-IN-CUSTOMER");
/// bgp.neighbor(neighbor);
/// bgp.network("1.1.1.1/32".parse().unwrap(), None);
/// assert_eq!(
///     bgp.build(),
///     "\
/// router bgp 100
///  bgp router-id 1.1.1.1
///  bgp log-neighbor-changes
///  neighbor 10.0.0.2 remote-as 200
///  neighbor 10.0.0.2 send-community
///  neighbor 10.0.0.2 route-map RM-IN-CUSTOMER in
///  network 1.1.1.1 mask 255.255.255.255
/// !
/// "
/// );
/// ```
#[derive(Debug)]
pub struct RouterBgp {
    asn: AsId,
    router_id: Ipv4Addr,
    neighbors: Vec<BgpNeighbor>,
    networks: Vec<(Ipv4Net, Option<String>)>,
}

impl RouterBgp {
    /// Create a new BGP builder for the given ASN and router-id.
    pub fn new(asn: AsId, router_id: Ipv4Addr) -> Self {
        Self {
            asn,
            router_id,
            neighbors: Vec::new(),
            networks: Vec::new(),
        }
    }

    /// Add a neighbor.
    pub fn neighbor(&mut self, neighbor: BgpNeighbor) -> &mut Self {
        self.neighbors.push(neighbor);
        self
    }

    /// Originate a prefix, optionally through an origination route-map.
    pub fn network(&mut self, net: Ipv4Net, route_map: Option<&str>) -> &mut Self {
        self.networks.push((net, route_map.map(String::from)));
        self
    }

    /// Build the configuration text.
    pub fn build(&self) -> String {
        let mut s = format!(
            "router bgp {}\n bgp router-id {}\n bgp log-neighbor-changes\n",
            self.asn, self.router_id
        );
        for neighbor in &self.neighbors {
            s.push_str(&neighbor.build());
        }
        for (net, route_map) in &self.networks {
            write!(s, " network {} mask {}", net.network(), netmask(net.prefix_len()))
                .expect("write to string");
            match route_map {
                Some(rm) => writeln!(s, " route-map {rm}").expect("write to string"),
                None => s.push('\n'),
            }
        }
        s.push_str("!\n");
        s
    }
}
