use tempfile::tempdir;
use trip_config::{Config, ConfigError, ConfigManager};
use trip_domain::{ContributionBasis, ReconciliationPolicy};

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.contribution_basis, ContributionBasis::Paid);
    assert_eq!(cfg.reconciliation, ReconciliationPolicy::LinkedOrName);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.set("currency", "eur").expect("currency");
    cfg.set("contribution_basis", "assigned").expect("basis");
    cfg.last_opened_trip = Some("goa".into());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.currency, "EUR");
    assert_eq!(loaded.contribution_basis, ContributionBasis::Assigned);
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert!(manager.config_path().ends_with("config/config.json"));
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn older_files_without_policy_fields_still_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "locale": "en-GB", "currency": "GBP" }"#).expect("write");

    let loaded = ConfigManager::new(path).load().expect("load");
    assert_eq!(loaded.currency, "GBP");
    assert_eq!(loaded.reconciliation, ReconciliationPolicy::LinkedOrName);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn set_rejects_unknown_keys_and_bad_values() {
    let mut cfg = Config::default();
    assert!(matches!(
        cfg.set("theme", "dark"),
        Err(ConfigError::UnknownKey(_))
    ));
    assert!(matches!(
        cfg.set("currency", "rupees"),
        Err(ConfigError::InvalidValue { .. })
    ));
    assert!(matches!(
        cfg.set("reconciliation", "fuzzy"),
        Err(ConfigError::InvalidValue { .. })
    ));
    cfg.set("reconciliation", "linked-only").expect("valid policy");
    assert_eq!(cfg.get("reconciliation").as_deref(), Some("linked-only"));
}
