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

//! The IGP compiler: emits the interior-routing block (RIP or OSPF) of a router.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use crate::addressing::{classful_major_network, wildcard};
use crate::generators::{RouterOspf, RouterRip};
use crate::intent::{AutonomousSystem, IgpProtocol};
use crate::topology::Interface;

/// Default OSPF process id when the AS does not declare one.
const DEFAULT_PROCESS_ID: u32 = 1;
/// Default OSPF area when the AS does not declare one.
const DEFAULT_AREA: u32 = 0;

/// Compile the IGP block of a router. Returns empty text if the AS declares no IGP, which is
/// valid for a single-router AS that only speaks BGP.
pub fn igp_config(
    as_data: &AutonomousSystem,
    interfaces: &[Interface],
    loopback: Ipv4Addr,
) -> String {
    let Some(igp) = &as_data.igp else {
        return String::new();
    };

    match igp.protocol {
        IgpProtocol::Rip => {
            let mut rip = RouterRip::new();
            // RIP network statements are classful: one statement per distinct major network
            let majors: BTreeSet<Ipv4Addr> = interfaces
                .iter()
                .map(|iface| classful_major_network(iface.addr.addr()))
                .collect();
            for major in majors {
                rip.network(major);
            }
            // the loopback is not matched by any classful network statement
            rip.redistribute_connected();
            rip.build()
        }
        IgpProtocol::Ospf => {
            let process_id = igp.process_id.unwrap_or(DEFAULT_PROCESS_ID);
            let area = igp.area.unwrap_or(DEFAULT_AREA);
            let mut ospf = RouterOspf::new(process_id, loopback);
            for iface in interfaces {
                ospf.network(iface.network(), wildcard(iface.addr.prefix_len()), area);
            }
            // the loopback host route must come after the interface statements, so that OSPF
            // first-match semantics are independent of declaration order
            ospf.network(loopback, Ipv4Addr::new(0, 0, 0, 0), area);
            ospf.build()
        }
    }
}
