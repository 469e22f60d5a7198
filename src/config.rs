// src/config.rs

//! Manages generator configuration: loading the flat `.env` settings source
//! and resolving it into typed values with defaults applied.

use crate::core::addressing;
use crate::core::errors::ClusterGenError;
use indexmap::IndexMap;
use std::fs;
use std::path::Path;

/// Name of the settings file expected in the root directory.
pub const ENV_FILE: &str = ".env";

const DEFAULT_CLUSTER_SIZE: &str = "3";
const DEFAULT_SUBNET: &str = "172.25.0.0/16";
const DEFAULT_HAPROXY_IP: &str = "172.25.0.100";

/// The raw, ordered key/value settings parsed from the `.env` file.
///
/// Values stay untyped strings here; counts and octets are parsed to
/// integers only where [`Config::resolve`] consumes them.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    vars: IndexMap<String, String>,
}

impl Settings {
    /// Reads settings from the given file. A missing or unreadable file
    /// yields an empty map, so every downstream lookup falls back to its
    /// default.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(_) => Self::default(),
        }
    }

    /// Parses `key=value` lines. Empty lines and `#` comments are skipped,
    /// as are lines without a separator; the first `=` splits key from
    /// value, both trimmed. Malformed lines never raise an error.
    pub fn parse(contents: &str) -> Self {
        let mut vars = IndexMap::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            vars.insert(key.trim().to_string(), value.trim().to_string());
        }
        Self { vars }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Returns the value for `key`, or `default` when the key is absent.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// The resolved generator configuration: node counts, network parameters,
/// port numbers, and pass-through credentials.
///
/// Port values are kept as strings since they are substituted into the
/// output verbatim; only counts and starting octets are numeric.
#[derive(Debug, Clone)]
pub struct Config {
    pub pg_count: usize,
    pub etcd_count: usize,
    pub subnet: String,
    /// The /24 block (first three octets of the subnet) default node
    /// addresses are allocated in.
    pub block_prefix: String,
    pub haproxy_ip: String,
    pub haproxy_name: String,
    pub frontend_readwrite: String,
    pub frontend_readonly: String,
    pub stats_port: String,
    pub etcd_ip_start: usize,
    pub pg_ip_start: usize,
    pub etcd_client_port: String,
    pub etcd_peer_port: String,
    pub postgres_port: String,
    pub patroni_port: String,
    pub postgres_password: String,
    pub replicator_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pg_count: 3,
            etcd_count: 3,
            subnet: DEFAULT_SUBNET.to_string(),
            block_prefix: addressing::DEFAULT_BLOCK.to_string(),
            haproxy_ip: DEFAULT_HAPROXY_IP.to_string(),
            haproxy_name: "haproxy".to_string(),
            frontend_readwrite: "5000".to_string(),
            frontend_readonly: "5001".to_string(),
            stats_port: "8404".to_string(),
            etcd_ip_start: 10,
            pg_ip_start: 100,
            etcd_client_port: "2379".to_string(),
            etcd_peer_port: "2380".to_string(),
            postgres_port: "5432".to_string(),
            patroni_port: "8008".to_string(),
            postgres_password: "postgres".to_string(),
            replicator_password: "replicator".to_string(),
        }
    }
}

impl Config {
    /// Resolves the raw settings into a typed configuration.
    ///
    /// The two cluster counts each fall back to the shared
    /// `NUMBER_OF_CLUSTER` setting before the hard default of 3. An
    /// unparsable count or octet is a fatal error.
    pub fn resolve(settings: &Settings) -> Result<Self, ClusterGenError> {
        let subnet = settings.get_or("PROJECT_NETWORK_SUBNET", DEFAULT_SUBNET);
        Ok(Self {
            pg_count: resolve_count(settings, "NUMBER_OF_POSTGRES_CLUSTER")?,
            etcd_count: resolve_count(settings, "NUMBER_OF_ETCD_CLUSTER")?,
            block_prefix: addressing::block_prefix(&subnet),
            subnet,
            haproxy_ip: settings.get_or("HAPROXY_IP", DEFAULT_HAPROXY_IP),
            haproxy_name: settings.get_or("HAPROXY_NAME", "haproxy"),
            frontend_readwrite: settings.get_or("HAPROXY_FRONTEND_READWRITE", "5000"),
            frontend_readonly: settings.get_or("HAPROXY_FRONTEND_READONLY", "5001"),
            stats_port: settings.get_or("HAPROXY_STATS_PORT", "8404"),
            etcd_ip_start: parse_octet(settings, "ETCD_IP_START_OCTET", 10)?,
            pg_ip_start: parse_octet(settings, "PG_IP_START_OCTET", 100)?,
            etcd_client_port: settings.get_or("ETCD_CLIENT_PORT", "2379"),
            etcd_peer_port: settings.get_or("ETCD_PEER_PORT", "2380"),
            postgres_port: settings.get_or("POSTGRES_PORT", "5432"),
            patroni_port: settings.get_or("PATRONI_PORT", "8008"),
            postgres_password: settings.get_or("POSTGRES_PASSWORD", "postgres"),
            replicator_password: settings.get_or("REPLICATOR_PASSWORD", "replicator"),
        })
    }
}

fn resolve_count(settings: &Settings, key: &str) -> Result<usize, ClusterGenError> {
    let raw = settings
        .get(key)
        .or_else(|| settings.get("NUMBER_OF_CLUSTER"))
        .unwrap_or(DEFAULT_CLUSTER_SIZE);
    raw.parse().map_err(|_| ClusterGenError::InvalidSetting {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

fn parse_octet(settings: &Settings, key: &str, default: usize) -> Result<usize, ClusterGenError> {
    match settings.get(key) {
        Some(raw) => raw.parse().map_err(|_| ClusterGenError::InvalidSetting {
            key: key.to_string(),
            value: raw.to_string(),
        }),
        None => Ok(default),
    }
}
