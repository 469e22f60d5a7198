// src/core/addressing.rs

//! Deterministic fallback addressing and load-balancer address reconciliation.

use std::collections::HashSet;
use tracing::{info, warn};

/// The /24 block used when an address is too short to carry one.
pub const DEFAULT_BLOCK: &str = "172.25.0";

/// Returns the /24 block (first three octets) of an IPv4 address or subnet
/// string, falling back to [`DEFAULT_BLOCK`] when fewer than three octets
/// are present.
pub fn block_prefix(addr: &str) -> String {
    let parts: Vec<&str> = addr.split('.').collect();
    if parts.len() >= 3 {
        parts[..3].join(".")
    } else {
        DEFAULT_BLOCK.to_string()
    }
}

/// The default address for a node: `<block>.<start_octet + index - 1>`.
/// Indices are 1-based, so the first node of a kind lands on its starting
/// octet.
pub fn default_node_ip(block: &str, start_octet: usize, index: usize) -> String {
    format!("{block}.{}", start_octet + index - 1)
}

/// Ensures the load-balancer address does not collide with any node address.
///
/// On collision, last octets 2..=255 in the load balancer's own /24 are
/// scanned in ascending order (0 and 1 are left to the network itself) and
/// the first free candidate wins. When the whole block is taken the
/// configured address is kept, collision and all, and the run continues.
pub fn reconcile_haproxy_ip(configured: &str, used: &HashSet<String>) -> String {
    if !used.contains(configured) {
        return configured.to_string();
    }
    let block = block_prefix(configured);
    for octet in 2..=255u16 {
        let candidate = format!("{block}.{octet}");
        if !used.contains(&candidate) {
            info!("HAPROXY_IP {configured} collides with node IPs; choosing {candidate} instead");
            return candidate;
        }
    }
    warn!("Could not find a free address for HAPROXY_IP; continuing with configured value");
    configured.to_string()
}
