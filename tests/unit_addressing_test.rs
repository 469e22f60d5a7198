use clustergen::core::addressing::{
    DEFAULT_BLOCK, block_prefix, default_node_ip, reconcile_haproxy_ip,
};
use std::collections::HashSet;

fn used(ips: &[&str]) -> HashSet<String> {
    ips.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_block_prefix_of_address() {
    assert_eq!(block_prefix("172.25.0.100"), "172.25.0");
    assert_eq!(block_prefix("10.0.1.7"), "10.0.1");
}

#[test]
fn test_block_prefix_of_subnet() {
    assert_eq!(block_prefix("172.25.0.0/16"), "172.25.0");
}

#[test]
fn test_block_prefix_falls_back_for_short_input() {
    assert_eq!(block_prefix("not-an-address"), DEFAULT_BLOCK);
    assert_eq!(block_prefix("10.0"), DEFAULT_BLOCK);
}

#[test]
fn test_default_node_ip_formula() {
    assert_eq!(default_node_ip("172.25.0", 10, 1), "172.25.0.10");
    assert_eq!(default_node_ip("172.25.0", 100, 3), "172.25.0.102");
    assert_eq!(default_node_ip("10.42.7", 50, 2), "10.42.7.51");
}

#[test]
fn test_reconcile_keeps_free_address() {
    let chosen = reconcile_haproxy_ip("172.25.0.5", &used(&["172.25.0.10", "172.25.0.100"]));
    assert_eq!(chosen, "172.25.0.5");
}

#[test]
fn test_reconcile_picks_lowest_free_octet() {
    let chosen = reconcile_haproxy_ip(
        "172.25.0.100",
        &used(&[
            "172.25.0.10",
            "172.25.0.11",
            "172.25.0.12",
            "172.25.0.100",
            "172.25.0.101",
        ]),
    );
    assert_eq!(chosen, "172.25.0.2");
}

#[test]
fn test_reconcile_skips_taken_low_octets() {
    let chosen = reconcile_haproxy_ip(
        "172.25.0.100",
        &used(&["172.25.0.100", "172.25.0.2", "172.25.0.3"]),
    );
    assert_eq!(chosen, "172.25.0.4");
}

#[test]
fn test_reconcile_scans_the_load_balancers_own_block() {
    let chosen = reconcile_haproxy_ip("10.0.0.50", &used(&["10.0.0.50"]));
    assert_eq!(chosen, "10.0.0.2");
}

#[test]
fn test_reconcile_keeps_configured_address_when_block_exhausted() {
    let everything: HashSet<String> = (2u16..=255).map(|o| format!("172.25.0.{o}")).collect();
    let chosen = reconcile_haproxy_ip("172.25.0.100", &everything);
    assert_eq!(chosen, "172.25.0.100");
}
