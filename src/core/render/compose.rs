// src/core/render/compose.rs

//! Renders the Docker Compose manifest from the topology.
//!
//! The manifest is accumulated as an ordered line list with explicit
//! two-space indent units and joined once at the end, so the YAML
//! indentation never depends on interpolated values.

use crate::config::Config;
use crate::core::topology::{Node, Topology};

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

/// Renders the full `docker-compose.yml` text: the network definition, one
/// named volume per node, the etcd services, the postgres services, and the
/// haproxy service, in that fixed order.
pub fn render(topology: &Topology, config: &Config) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("version: \"3.8\"".to_string());
    lines.push(String::new());
    lines.push("networks:".to_string());
    lines.push(format!("{}patroni_network:", indent(1)));
    lines.push(format!("{}driver: bridge", indent(2)));
    lines.push(format!("{}ipam:", indent(2)));
    lines.push(format!("{}config:", indent(3)));
    lines.push(format!("{}- subnet: {}", indent(4), config.subnet));
    lines.push(String::new());
    lines.push("volumes:".to_string());
    for node in &topology.pg_nodes {
        lines.push(format!(
            "{}postgres_data_{}:",
            indent(1),
            node.zero_padded_index()
        ));
    }
    for node in &topology.etcd_nodes {
        lines.push(format!(
            "{}etcd_data_{}:",
            indent(1),
            node.zero_padded_index()
        ));
    }
    lines.push(String::new());
    lines.push("services:".to_string());

    // etcd services come first so the coordination layer is declared before
    // the database nodes that point at it.
    let etcd_initial_cluster = topology.etcd_initial_cluster();
    for node in &topology.etcd_nodes {
        push_service_head(&mut lines, node);
        lines.push(format!("{}environment:", indent(2)));
        lines.push(format!("{}- NODE_NAME={}", indent(3), node.name));
        lines.push(format!("{}- NODE_IP={}", indent(3), node.ip));
        lines.push(format!(
            "{}- ETCD_CLUSTER_SIZE={}",
            indent(3),
            topology.etcd_nodes.len()
        ));
        lines.push(format!(
            "{}- ETCD_INITIAL_CLUSTER={etcd_initial_cluster}",
            indent(3)
        ));
        // etcd-only services must not start Patroni/Postgres.
        lines.push(format!("{}- SKIP_POSTGRES=1", indent(3)));
        lines.push(format!(
            "{}- POSTGRES_PASSWORD={}",
            indent(3),
            config.postgres_password
        ));
        lines.push(format!("{}volumes:", indent(2)));
        lines.push(format!(
            "{}- etcd_data_{}:/var/lib/etcd",
            indent(3),
            node.zero_padded_index()
        ));
        lines.push(format!("{}restart: unless-stopped", indent(2)));
        lines.push(String::new());
    }

    let cluster_nodes = topology.cluster_nodes();
    let etcd_hosts = topology.etcd_hosts();
    for node in &topology.pg_nodes {
        push_service_head(&mut lines, node);
        lines.push(format!("{}environment:", indent(2)));
        lines.push(format!("{}- NODE_NAME={}", indent(3), node.name));
        lines.push(format!("{}- NODE_IP={}", indent(3), node.ip));
        lines.push(format!("{}- CLUSTER_NODES={cluster_nodes}", indent(3)));
        lines.push(format!("{}- ETCD_HOSTS={etcd_hosts}", indent(3)));
        // postgres-only services must not start etcd.
        lines.push(format!("{}- SKIP_ETCD=1", indent(3)));
        lines.push(format!(
            "{}- POSTGRES_PASSWORD={}",
            indent(3),
            config.postgres_password
        ));
        lines.push(format!(
            "{}- REPLICATOR_PASSWORD={}",
            indent(3),
            config.replicator_password
        ));
        lines.push(format!("{}volumes:", indent(2)));
        lines.push(format!(
            "{}- postgres_data_{}:/var/lib/postgresql/data",
            indent(3),
            node.zero_padded_index()
        ));
        lines.push(format!("{}restart: unless-stopped", indent(2)));
        lines.push(format!("{}healthcheck:", indent(2)));
        // ${PATRONI_PORT} is expanded inside the container, not here.
        lines.push(format!(
            "{}test: [\"CMD-SHELL\", \"curl -f http://localhost:${{PATRONI_PORT}}/health || exit 1\"]",
            indent(3)
        ));
        lines.push(format!("{}interval: 30s", indent(3)));
        lines.push(format!("{}timeout: 10s", indent(3)));
        lines.push(format!("{}retries: 3", indent(3)));
        lines.push(format!("{}start_period: 60s", indent(3)));
        lines.push(String::new());
    }

    lines.push(format!("{}haproxy:", indent(1)));
    lines.push(format!("{}build:", indent(2)));
    lines.push(format!("{}context: ./docker-haproxy", indent(3)));
    lines.push(format!(
        "{}container_name: {}",
        indent(2),
        config.haproxy_name
    ));
    lines.push(format!("{}hostname: {}", indent(2), config.haproxy_name));
    lines.push(format!("{}networks:", indent(2)));
    lines.push(format!("{}patroni_network:", indent(3)));
    lines.push(format!("{}ipv4_address: {}", indent(4), topology.haproxy_ip));
    lines.push(format!("{}ports:", indent(2)));
    lines.push(format!(
        "{}- \"{}:{}\"",
        indent(3),
        config.frontend_readwrite,
        config.frontend_readwrite
    ));
    lines.push(format!(
        "{}- \"{}:{}\"",
        indent(3),
        config.frontend_readonly,
        config.frontend_readonly
    ));
    lines.push(format!(
        "{}- \"{}:{}\"",
        indent(3),
        config.stats_port,
        config.stats_port
    ));
    lines.push(format!("{}volumes:", indent(2)));
    lines.push(format!(
        "{}- ./haproxy.cfg:/usr/local/etc/haproxy/haproxy.cfg.template:ro",
        indent(3)
    ));
    lines.push(format!("{}depends_on:", indent(2)));
    for node in &topology.pg_nodes {
        lines.push(format!("{}- {}", indent(3), node.name));
    }
    lines.push(format!("{}restart: unless-stopped", indent(2)));

    lines.join("\n") + "\n"
}

/// Common head of a node service block: service key, build reference,
/// container identity, static network address, and the optional published
/// ports.
fn push_service_head(lines: &mut Vec<String>, node: &Node) {
    lines.push(format!("{}{}:", indent(1), node.name));
    lines.push(format!("{}build: .", indent(2)));
    lines.push(format!("{}container_name: {}", indent(2), node.name));
    lines.push(format!("{}hostname: {}", indent(2), node.name));
    lines.push(format!("{}networks:", indent(2)));
    lines.push(format!("{}patroni_network:", indent(3)));
    lines.push(format!("{}ipv4_address: {}", indent(4), node.ip));
    if !node.published_ports.is_empty() {
        lines.push(format!("{}ports:", indent(2)));
        for mapping in &node.published_ports {
            lines.push(format!(
                "{}- \"{}:{}\"",
                indent(3),
                mapping.host,
                mapping.container
            ));
        }
    }
}
