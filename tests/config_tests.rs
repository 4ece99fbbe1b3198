#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod model {
    include!("../src/core/model.rs");
}
mod config {
    include!("../src/core/config.rs");
}

use config::*;
use model::LoadPolicy;

#[test]
fn defaults_match_the_deployed_page() {
    let c = ViewerConfig::default();
    assert_eq!(c.asset_base, "/static/");
    assert_eq!(c.initial_asset, "hoodie1.gltf");
    assert_eq!(c.manual_assets, vec!["hoodie1.gltf", "hoodie2.gltf"]);
    assert!(c.state_driven);
    assert!(c.freeze_framing_after_first_load);
    assert_eq!(c.load_policy, LoadPolicy::LastCompletedWins);
    assert!(c.orbit_enabled);
}

#[test]
fn attributes_override_defaults() {
    let mut c = ViewerConfig::default();
    c.apply_attribute("data-asset-base", " /assets ").unwrap();
    c.apply_attribute("data-manual-assets", "a.glb, b.glb,,c.glb").unwrap();
    c.apply_attribute("data-state-driven", "off").unwrap();
    c.apply_attribute("data-freeze-framing", "FALSE").unwrap();
    c.apply_attribute("data-load-policy", "latest-request").unwrap();
    c.apply_attribute("data-orbit", "").unwrap();
    c.apply_attribute("data-spin", "0.01").unwrap();
    c.apply_attribute("data-unknown", "whatever").unwrap();

    assert_eq!(c.asset_base, "/assets");
    assert_eq!(c.manual_assets, vec!["a.glb", "b.glb", "c.glb"]);
    assert!(!c.state_driven);
    assert!(!c.freeze_framing_after_first_load);
    assert_eq!(c.load_policy, LoadPolicy::LatestRequestWins);
    assert!(c.orbit_enabled);
    assert!((c.spin_per_frame - 0.01).abs() < 1e-7);
}

#[test]
fn bad_values_are_rejected_and_leave_config_untouched() {
    let mut c = ViewerConfig::default();
    let before = c.clone();
    assert!(matches!(
        c.apply_attribute("data-orbit", "maybe"),
        Err(ConfigError::Bool { .. })
    ));
    assert!(matches!(
        c.apply_attribute("data-spin", "fast"),
        Err(ConfigError::Number { .. })
    ));
    assert!(matches!(
        c.apply_attribute("data-load-policy", "first"),
        Err(ConfigError::Policy { .. })
    ));
    assert!(matches!(
        c.apply_attribute("data-manual-assets", " , "),
        Err(ConfigError::EmptyList { .. })
    ));
    assert_eq!(c, before);
}

#[test]
fn every_listed_attribute_is_understood() {
    for name in ViewerConfig::ATTRIBUTES {
        assert!(name.starts_with("data-"));
    }
    assert_eq!(ViewerConfig::ATTRIBUTES.len(), 8);
}

#[test]
fn asset_url_joins_relative_names_only() {
    let mut c = ViewerConfig::default();
    assert_eq!(c.asset_url("hoodie1.gltf"), "/static/hoodie1.gltf");
    assert_eq!(c.asset_url("/other/x.gltf"), "/other/x.gltf");
    assert_eq!(c.asset_url("https://cdn/x.glb"), "https://cdn/x.glb");
    c.asset_base = "/models".into();
    assert_eq!(c.asset_url("x.glb"), "/models/x.glb");
    c.asset_base.clear();
    assert_eq!(c.asset_url("x.glb"), "x.glb");
}
