use pipe_wall_toolbox::config::{load_or_default, Config};
use pipe_wall_toolbox::units::Units;
use std::path::PathBuf;
use uuid::Uuid;

fn temp_path() -> PathBuf {
    std::env::temp_dir().join(format!("pipe_wall_toolbox-{}.toml", Uuid::new_v4()))
}

#[test]
fn missing_file_is_created_with_defaults() {
    let path = temp_path();
    let cfg = load_or_default(&path).expect("load");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    let reloaded = load_or_default(&path).expect("reload");
    assert_eq!(reloaded, cfg);
    std::fs::remove_file(&path).ok();
}

#[test]
fn saved_settings_round_trip() {
    let path = temp_path();
    let mut cfg = Config::default();
    cfg.units = Units::Metric;
    cfg.language = Some("ko".into());
    cfg.design.corrosion_allowance = 0.0625;
    cfg.design.mill_tolerance = 0.1;
    cfg.save(&path).expect("save");
    assert_eq!(load_or_default(&path).expect("load"), cfg);
    std::fs::remove_file(&path).ok();
}

#[test]
fn partial_file_fills_in_defaults() {
    let path = temp_path();
    std::fs::write(&path, "units = \"Metric\"\n\n[design]\nweld_joint_efficiency = 0.85\n").expect("write");
    let cfg = load_or_default(&path).expect("load");
    assert_eq!(cfg.units, Units::Metric);
    assert_eq!(cfg.design.e, 0.85);
    assert_eq!(cfg.design.gamma, 0.4);
    assert_eq!(cfg.default_material, "A106B");
    std::fs::remove_file(&path).ok();
}

#[test]
fn malformed_file_is_an_error() {
    let path = temp_path();
    std::fs::write(&path, "units = [").expect("write");
    assert!(load_or_default(&path).is_err());
    std::fs::remove_file(&path).ok();
}
