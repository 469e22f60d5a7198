use clustergen::config::{Config, Settings};
use clustergen::core::render::haproxy;
use clustergen::core::topology::Topology;

fn render_for(env: &str) -> String {
    let settings = Settings::parse(env);
    let config = Config::resolve(&settings).unwrap();
    let topology = Topology::build(&config, &settings);
    haproxy::render(&topology, &config)
}

#[test]
fn test_fixed_sections_present() {
    let out = render_for("");
    assert!(out.starts_with("global\n    daemon\n    maxconn 4096\n"));
    assert!(out.contains("defaults\n    mode tcp\n"));
    assert!(out.contains("timeout client 30s"));
    assert!(out.contains("timeout connect 5s"));
    assert!(out.contains("timeout server 30s"));
    assert!(out.contains("timeout check 5s"));
    assert!(out.contains("retries 3"));
    assert!(out.contains("listen stats\n    bind *:8404\n"));
    assert!(out.contains("stats uri /stats"));
    assert!(out.contains("frontend postgres_rw_frontend\n    bind *:5000\n"));
    assert!(out.contains("frontend postgres_ro_frontend\n    bind *:5001\n"));
    assert!(out.contains("backend postgres_rw\n"));
    assert!(out.contains("backend postgres_ro\n"));
}

#[test]
fn test_role_checks() {
    let out = render_for("");
    assert_eq!(out.matches("option httpchk GET /role").count(), 2);
    assert!(out.contains("http-check expect string primary"));
    assert!(out.contains("http-check expect string replica"));
}

#[test]
fn test_server_lines_per_database_node() {
    let out = render_for("NUMBER_OF_POSTGRES_CLUSTER=2\n");
    assert!(out.contains("    server postgresql-01 172.25.0.100:5432 check port 8008 inter 2s\n"));
    assert!(out.contains("    server postgresql-02 172.25.0.101:5432 check port 8008 inter 2s\n"));
    // Two pools, two lines each.
    assert_eq!(out.matches("    server ").count(), 4);
}

#[test]
fn test_both_pools_enumerate_all_database_nodes() {
    let out = render_for("NUMBER_OF_POSTGRES_CLUSTER=3\n");
    for name in ["postgresql-01", "postgresql-02", "postgresql-03"] {
        assert_eq!(out.matches(&format!("    server {name} ")).count(), 2);
    }
}

#[test]
fn test_configured_ports_flow_through() {
    let out = render_for(
        "HAPROXY_STATS_PORT=9404\nHAPROXY_FRONTEND_READWRITE=6000\nHAPROXY_FRONTEND_READONLY=6001\nPOSTGRES_PORT=6432\nPATRONI_PORT=9008\n",
    );
    assert!(out.contains("bind *:9404"));
    assert!(out.contains("bind *:6000"));
    assert!(out.contains("bind *:6001"));
    assert!(out.contains("server postgresql-01 172.25.0.100:6432 check port 9008 inter 2s"));
}

#[test]
fn test_zero_database_nodes_render_empty_pools() {
    let out = render_for("NUMBER_OF_POSTGRES_CLUSTER=0\n");
    assert!(!out.contains("    server "));
    assert!(out.contains("backend postgres_rw\n"));
    assert!(out.contains("backend postgres_ro\n"));
}

#[test]
fn test_no_placeholders_remain() {
    assert!(!render_for("").contains("${"));
    assert!(!render_for("NUMBER_OF_POSTGRES_CLUSTER=0\n").contains("${"));
}
