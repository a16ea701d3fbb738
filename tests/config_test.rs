use leap_markers::io::{object_from_json, object_to_json};
use leap_markers::MarkerConfig;
use tempfile::TempDir;

#[test]
fn test_defaults_match_consumer_contract() {
    let config = MarkerConfig::default();
    assert_eq!(config.frame_id, "leap_frame");
    assert_eq!(config.topic, "/leap_markers");
    assert_eq!(config.max_rate_hz, 20.0);
    assert_eq!(config.mm_per_meter, 1000.0);
    assert_eq!(config.axis_divisor, 100.0);
    assert_eq!(config.finger_count, 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_keeps_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"topic": "/hands", "max_rate_hz": 30.0}"#).unwrap();

    let config: MarkerConfig = object_from_json(&path).unwrap();
    assert_eq!(config.topic, "/hands");
    assert_eq!(config.max_rate_hz, 30.0);
    assert_eq!(config.frame_id, "leap_frame");
    assert_eq!(config.finger_arrow_scale, [0.005, 0.01, 0.02]);
}

#[test]
fn test_config_file_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    let config = MarkerConfig {
        frame_id: "world".to_string(),
        ..Default::default()
    };
    object_to_json(&path, &config).unwrap();
    let back: MarkerConfig = object_from_json(&path).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_invalid_config_is_rejected() {
    let bad_rate = MarkerConfig {
        max_rate_hz: 0.0,
        ..Default::default()
    };
    assert!(bad_rate.validate().is_err());

    let bad_divisor = MarkerConfig {
        axis_divisor: -1.0,
        ..Default::default()
    };
    assert!(bad_divisor.validate().is_err());

    let too_many_fingers = MarkerConfig {
        finger_count: 6,
        ..Default::default()
    };
    assert!(too_many_fingers.validate().is_err());
}

#[test]
fn test_missing_config_file() {
    let result: anyhow::Result<MarkerConfig> = object_from_json("non_existent_config.json");
    assert!(result.is_err());
}

#[test]
fn test_tiny_rate_is_rejected() {
    let config = MarkerConfig {
        max_rate_hz: 1e-300,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}
