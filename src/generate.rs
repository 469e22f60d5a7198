// src/generate.rs

//! Drives a single generation run: load settings, build the topology,
//! render both artifacts, and write them into the root directory.

use crate::config::{Config, ENV_FILE, Settings};
use crate::core::errors::ClusterGenError;
use crate::core::render;
use crate::core::topology::Topology;
use std::fs;
use std::path::Path;
use tracing::info;

/// Output filename for the orchestration manifest.
pub const COMPOSE_FILE: &str = "docker-compose.yml";
/// Output filename for the load-balancer configuration.
pub const HAPROXY_FILE: &str = "haproxy.cfg";

/// Runs one generation pass against `root`. Each output file is written
/// whole, exactly once; a failure between the two writes leaves the first
/// one in place.
pub fn run(root: &Path) -> Result<(), ClusterGenError> {
    let settings = Settings::from_file(&root.join(ENV_FILE));
    let config = Config::resolve(&settings)?;
    let topology = Topology::build(&config, &settings);

    let compose_path = root.join(COMPOSE_FILE);
    write_file(&compose_path, &render::compose::render(&topology, &config))?;
    info!(
        "Wrote {} with {} postgres and {} etcd nodes",
        compose_path.display(),
        topology.pg_nodes.len(),
        topology.etcd_nodes.len()
    );

    let haproxy_path = root.join(HAPROXY_FILE);
    write_file(&haproxy_path, &render::haproxy::render(&topology, &config))?;
    info!("Wrote {}", haproxy_path.display());

    Ok(())
}

fn write_file(path: &Path, contents: &str) -> Result<(), ClusterGenError> {
    fs::write(path, contents).map_err(|source| ClusterGenError::WriteFile {
        path: path.display().to_string(),
        source,
    })
}
