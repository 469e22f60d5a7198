// src/core/topology.rs

//! Builds the cluster topology: the ordered etcd and postgres node lists,
//! with per-index overrides or deterministic fallback addressing, plus the
//! derived connection strings the emitters consume.

use crate::config::{Config, Settings};
use crate::core::addressing;
use std::collections::HashSet;

/// A single published host-to-container port mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub host: String,
    pub container: String,
}

/// One node of either kind. Indices are 1-based and contiguous within a
/// kind.
#[derive(Debug, Clone)]
pub struct Node {
    pub index: usize,
    pub name: String,
    pub ip: String,
    /// Host ports to publish for this node, resolved from the per-index
    /// settings. Empty means no `ports:` block is emitted.
    pub published_ports: Vec<PortMapping>,
}

impl Node {
    /// The index zero-padded to two digits, as used in default names and
    /// volume names.
    pub fn zero_padded_index(&self) -> String {
        format!("{:02}", self.index)
    }
}

/// A host-port publication rule for one node kind: the per-index settings
/// key is `<key_prefix><index><key_suffix>`, and the container side is the
/// kind's configured service port.
struct Publication<'a> {
    key_prefix: &'a str,
    key_suffix: &'a str,
    container_port: &'a str,
}

/// The full cluster topology plus the reconciled load-balancer address.
/// Immutable once built; consumed only for rendering.
#[derive(Debug, Clone)]
pub struct Topology {
    pub etcd_nodes: Vec<Node>,
    pub pg_nodes: Vec<Node>,
    pub haproxy_ip: String,
}

impl Topology {
    /// Builds both node lists and reconciles the load-balancer address
    /// against the union of their addresses.
    pub fn build(config: &Config, settings: &Settings) -> Self {
        let etcd_nodes = build_nodes(
            settings,
            config.etcd_count,
            "ETCD",
            "etcd",
            &config.block_prefix,
            config.etcd_ip_start,
            &[
                Publication {
                    key_prefix: "ETCD",
                    key_suffix: "_CLIENT_PORT",
                    container_port: &config.etcd_client_port,
                },
                Publication {
                    key_prefix: "ETCD",
                    key_suffix: "_PEER_PORT",
                    container_port: &config.etcd_peer_port,
                },
            ],
        );
        let pg_nodes = build_nodes(
            settings,
            config.pg_count,
            "NODE",
            "postgresql",
            &config.block_prefix,
            config.pg_ip_start,
            &[
                Publication {
                    key_prefix: "POSTGRES",
                    key_suffix: "_PORT",
                    container_port: &config.postgres_port,
                },
                Publication {
                    key_prefix: "PATRONI",
                    key_suffix: "_PORT",
                    container_port: &config.patroni_port,
                },
            ],
        );

        let used: HashSet<String> = etcd_nodes
            .iter()
            .chain(pg_nodes.iter())
            .map(|n| n.ip.clone())
            .collect();
        let haproxy_ip = addressing::reconcile_haproxy_ip(&config.haproxy_ip, &used);

        Self {
            etcd_nodes,
            pg_nodes,
            haproxy_ip,
        }
    }

    /// Comma-joined `name=https://ip:2380` pairs over the postgres nodes,
    /// the cluster-membership string handed to each Patroni node.
    pub fn cluster_nodes(&self) -> String {
        self.pg_nodes
            .iter()
            .map(|n| format!("{}=https://{}:2380", n.name, n.ip))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Comma-joined `ip:2379` client endpoints over the etcd nodes.
    pub fn etcd_hosts(&self) -> String {
        self.etcd_nodes
            .iter()
            .map(|n| format!("{}:2379", n.ip))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Comma-joined `name=http://ip:2380` pairs over the etcd nodes, in the
    /// http scheme etcd expects for its own initial-cluster bootstrap.
    pub fn etcd_initial_cluster(&self) -> String {
        self.etcd_nodes
            .iter()
            .map(|n| format!("{}=http://{}:2380", n.name, n.ip))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Builds exactly `count` nodes of one kind, 1-indexed. Explicit
/// `<key_prefix><i>_NAME` / `<key_prefix><i>_IP` overrides win; otherwise
/// the name is `<name_prefix>-<index zero-padded to 2>` and the address
/// follows the deterministic octet formula. An empty IP override falls back
/// to the formula.
fn build_nodes(
    settings: &Settings,
    count: usize,
    key_prefix: &str,
    name_prefix: &str,
    block: &str,
    start_octet: usize,
    publications: &[Publication<'_>],
) -> Vec<Node> {
    (1..=count)
        .map(|index| {
            let name = settings
                .get(&format!("{key_prefix}{index}_NAME"))
                .map(str::to_string)
                .unwrap_or_else(|| format!("{name_prefix}-{index:02}"));
            let ip = settings
                .get(&format!("{key_prefix}{index}_IP"))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| addressing::default_node_ip(block, start_octet, index));
            let published_ports = publications
                .iter()
                .filter_map(|p| {
                    settings
                        .get(&format!("{}{index}{}", p.key_prefix, p.key_suffix))
                        .filter(|v| !v.is_empty())
                        .map(|host| PortMapping {
                            host: host.to_string(),
                            container: p.container_port.to_string(),
                        })
                })
                .collect();
            Node {
                index,
                name,
                ip,
                published_ports,
            }
        })
        .collect()
}
