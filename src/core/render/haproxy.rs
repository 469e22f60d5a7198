// src/core/render/haproxy.rs

//! Renders the HAProxy configuration from the topology.
//!
//! The config has a fixed structure; only the listener ports and the
//! backend server lists vary, so it is produced by literal named-placeholder
//! substitution into a template.

use crate::config::Config;
use crate::core::topology::Topology;

const TEMPLATE: &str = r#"global
    daemon
    maxconn 4096
    log stdout local0

defaults
    mode tcp
    timeout client 30s
    timeout connect 5s
    timeout server 30s
    timeout check 5s
    retries 3
    log global

# HAProxy Stats
listen stats
    bind *:${HAPROXY_STATS_PORT}
    mode http
    stats enable
    stats uri /stats
    stats refresh 30s

# PostgreSQL Read/Write and Read-Only
frontend postgres_rw_frontend
    bind *:${HAPROXY_FRONTEND_READWRITE}
    mode tcp
    default_backend postgres_rw

frontend postgres_ro_frontend
    bind *:${HAPROXY_FRONTEND_READONLY}
    mode tcp
    default_backend postgres_ro

backend postgres_rw
    mode tcp
    balance roundrobin
    option httpchk GET /role
    http-check expect string primary
${RW_SERVERS}

backend postgres_ro
    mode tcp
    balance roundrobin
    option httpchk GET /role
    http-check expect string replica
${RO_SERVERS}
"#;

/// Renders the full `haproxy.cfg` text.
///
/// Both backend pools enumerate every postgres node; the `/role` health
/// check decides at request time which servers are eligible for each pool.
pub fn render(topology: &Topology, config: &Config) -> String {
    let rw_servers = topology
        .pg_nodes
        .iter()
        .map(|n| {
            format!(
                "    server {} {}:{} check port {} inter 2s",
                n.name, n.ip, config.postgres_port, config.patroni_port
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let ro_servers = rw_servers.clone();

    substitute(
        TEMPLATE,
        &[
            ("HAPROXY_STATS_PORT", config.stats_port.as_str()),
            (
                "HAPROXY_FRONTEND_READWRITE",
                config.frontend_readwrite.as_str(),
            ),
            (
                "HAPROXY_FRONTEND_READONLY",
                config.frontend_readonly.as_str(),
            ),
            ("RW_SERVERS", rw_servers.as_str()),
            ("RO_SERVERS", ro_servers.as_str()),
        ],
    )
}

/// Replaces each `${NAME}` placeholder with its value. Plain find-and-replace,
/// no escaping or nesting semantics.
fn substitute(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in values {
        out = out.replace(&format!("${{{name}}}"), value);
    }
    out
}
