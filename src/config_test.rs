#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use super::*;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_vars_defaults() {
    let cfg = ServerConfig::from_vars(vars(&[])).unwrap();
    assert_eq!(cfg.bind, SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)));
    assert_eq!(cfg.points_file, PathBuf::from("points.json"));
    assert!(cfg.engine_url.is_none());
    assert_eq!(cfg.diagram, DiagramSettings::default());
    assert_eq!(cfg.diagram.min_points, 4);
    assert_eq!(cfg.diagram.clip_padding_deg, 2.0);
    assert_eq!(
        cfg.engine_timeouts,
        EngineTimeouts {
            request_secs: DEFAULT_ENGINE_REQUEST_TIMEOUT_SECS,
            connect_secs: DEFAULT_ENGINE_CONNECT_TIMEOUT_SECS
        }
    );
    assert!(cfg.static_dir.is_none());
}

#[test]
fn from_vars_parses_overrides() {
    let cfg = ServerConfig::from_vars(vars(&[
        ("PORT", "8080"),
        ("BIND_ADDR", "127.0.0.1"),
        ("POINTS_FILE", "/var/lib/mapcells/points.json"),
        ("DIAGRAM_ENGINE_URL", "http://engine:9000/cells"),
        ("DIAGRAM_MIN_POINTS", "3"),
        ("DIAGRAM_CLIP_PADDING_DEG", "0.5"),
        ("ENGINE_REQUEST_TIMEOUT_SECS", "60"),
        ("ENGINE_CONNECT_TIMEOUT_SECS", "2"),
        ("STATIC_DIR", "static"),
    ]))
    .unwrap();

    assert_eq!(cfg.bind, SocketAddr::from(([127, 0, 0, 1], 8080)));
    assert_eq!(cfg.points_file, PathBuf::from("/var/lib/mapcells/points.json"));
    assert_eq!(cfg.engine_url.as_deref(), Some("http://engine:9000/cells"));
    assert_eq!(cfg.diagram, DiagramSettings { min_points: 3, clip_padding_deg: 0.5 });
    assert_eq!(cfg.engine_timeouts, EngineTimeouts { request_secs: 60, connect_secs: 2 });
    assert_eq!(cfg.static_dir, Some(PathBuf::from("static")));
}

#[test]
fn invalid_numbers_fall_back_to_defaults() {
    let cfg = ServerConfig::from_vars(vars(&[("PORT", "http"), ("DIAGRAM_MIN_POINTS", "-1")])).unwrap();
    assert_eq!(cfg.bind.port(), DEFAULT_PORT);
    assert_eq!(cfg.diagram.min_points, DEFAULT_DIAGRAM_MIN_POINTS);
}

#[test]
fn empty_engine_url_disables_engine() {
    let cfg = ServerConfig::from_vars(vars(&[("DIAGRAM_ENGINE_URL", "  ")])).unwrap();
    assert!(cfg.engine_url.is_none());
}

#[test]
fn rejects_bad_bind_addr_and_engine_url() {
    let err = ServerConfig::from_vars(vars(&[("BIND_ADDR", "localhost")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidBindAddr("localhost".to_owned()));

    let err = ServerConfig::from_vars(vars(&[("DIAGRAM_ENGINE_URL", "engine:9000")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEngineUrl(_)));
}

#[test]
fn read_var_treats_unset_as_none() {
    assert_eq!(read_var("MAPCELLS_VARIABLE_THAT_IS_NEVER_SET"), None);
}
