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

//! Address math: mask, prefix-length and wildcard conversions used by all other components.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;

use crate::types::CompileError;

/// The dotted decimal representation of a left-justified bitmask of the given length.
/// Prefix lengths above 32 are clamped to 32.
///
/// ```
/// # use std::net::Ipv4Addr;
/// assert_eq!(intentc::addressing::netmask(24), Ipv4Addr::new(255, 255, 255, 0));
/// assert_eq!(intentc::addressing::netmask(0), Ipv4Addr::new(0, 0, 0, 0));
/// assert_eq!(intentc::addressing::netmask(32), Ipv4Addr::new(255, 255, 255, 255));
/// ```
pub fn netmask(prefix_len: u8) -> Ipv4Addr {
    let p = prefix_len.min(32) as u32;
    Ipv4Addr::from(((u64::from(u32::MAX) << (32 - p)) & 0xffff_ffff) as u32)
}

/// The bitwise complement of [`netmask`], as used by the OSPF `network` statement syntax.
///
/// ```
/// # use std::net::Ipv4Addr;
/// assert_eq!(intentc::addressing::wildcard(30), Ipv4Addr::new(0, 0, 0, 3));
/// ```
pub fn wildcard(prefix_len: u8) -> Ipv4Addr {
    Ipv4Addr::from(!u32::from(netmask(prefix_len)))
}

/// The prefix length of a dotted mask; the inverse of [`netmask`]. Fails with
/// [`CompileError::InvalidMask`] if the mask is not a contiguous bitmask.
///
/// ```
/// # use std::net::Ipv4Addr;
/// assert_eq!(intentc::addressing::prefix_len(Ipv4Addr::new(255, 255, 255, 252)).unwrap(), 30);
/// assert!(intentc::addressing::prefix_len(Ipv4Addr::new(255, 0, 255, 0)).is_err());
/// ```
pub fn prefix_len(mask: Ipv4Addr) -> Result<u8, CompileError> {
    let ones = u32::from(mask).count_ones() as u8;
    if mask != netmask(ones) {
        return Err(CompileError::InvalidMask(mask));
    }
    Ok(ones)
}

/// The legacy class-A/B/C major network containing the given address. RIP `network` statements
/// only accept classful network declarations, hence the computation. First octets outside the
/// three class ranges default to a /8 boundary.
///
/// ```
/// # use std::net::Ipv4Addr;
/// use intentc::addressing::classful_major_network;
/// assert_eq!(classful_major_network(Ipv4Addr::new(10, 1, 2, 3)), Ipv4Addr::new(10, 0, 0, 0));
/// assert_eq!(classful_major_network(Ipv4Addr::new(172, 16, 5, 5)), Ipv4Addr::new(172, 16, 0, 0));
/// assert_eq!(classful_major_network(Ipv4Addr::new(200, 5, 5, 5)), Ipv4Addr::new(200, 5, 5, 0));
/// ```
pub fn classful_major_network(ip: Ipv4Addr) -> Ipv4Addr {
    let [a, b, c, _] = ip.octets();
    match a {
        1..=126 => Ipv4Addr::new(a, 0, 0, 0),
        128..=191 => Ipv4Addr::new(a, b, 0, 0),
        192..=223 => Ipv4Addr::new(a, b, c, 0),
        _ => Ipv4Addr::new(a, 0, 0, 0),
    }
}

/// Parse an `A.B.C.D/len` field of the intent document into an [`Ipv4Net`] keeping the host
/// address.
pub fn parse_prefixed(s: &str) -> Result<Ipv4Net, CompileError> {
    let invalid = || CompileError::InvalidAddress(s.to_string());
    let (addr, len) = s.split_once('/').ok_or_else(invalid)?;
    let addr: Ipv4Addr = addr.trim().parse().map_err(|_| invalid())?;
    let len: u8 = len.trim().parse().map_err(|_| invalid())?;
    Ipv4Net::new(addr, len).map_err(|_| invalid())
}

/// Parse a host address field, with or without a prefix length suffix.
pub fn parse_host(s: &str) -> Result<Ipv4Addr, CompileError> {
    match s.split_once('/') {
        Some((addr, _)) => addr
            .trim()
            .parse()
            .map_err(|_| CompileError::InvalidAddress(s.to_string())),
        None => s
            .trim()
            .parse()
            .map_err(|_| CompileError::InvalidAddress(s.to_string())),
    }
}
