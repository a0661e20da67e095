use plugdep::config::{InstallOrderConvention, ResolverConfig};
use plugdep::constants::DEFAULT_CONFIG_FILE;
use plugdep::core::{PlugdepError, user_friendly_error};
use plugdep::test_utils::{PoolFixture, deps};
use std::fs;
use tempfile::TempDir;

fn chain_fixture() -> PoolFixture {
    PoolFixture::new().installed("a", "1.0.0", &[("b", "^1.0.0")]).registry("b", "1.1.0", &[])
}

#[test]
fn test_config_file_drives_resolution() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, "install-order = \"dependents-first\"\nreport-conflicts = false\n").unwrap();

    let config = ResolverConfig::load(&path).unwrap();
    assert_eq!(config.install_order, InstallOrderConvention::DependentsFirst);
    assert!(config.prefer_installed);
    assert!(!config.report_conflicts);

    let fixture = chain_fixture();
    let result = fixture.resolver_with(config).resolve_dependencies("root", &deps(&[("a", "*")]));

    assert_eq!(result.install_order, vec!["root", "a", "b"]);
}

#[test]
fn test_missing_config_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();

    let config = ResolverConfig::load_or_default(&temp_dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();

    assert_eq!(config, ResolverConfig::default());
    let result = chain_fixture().resolver_with(config).resolve_dependencies("root", &deps(&[("a", "*")]));
    assert_eq!(result.install_order, vec!["b", "a", "root"]);
}

#[test]
fn test_unknown_key_is_reported_with_file_name() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, "prefer-instaled = false\n").unwrap();

    let err = ResolverConfig::load(&path).unwrap_err();

    match err.downcast_ref::<PlugdepError>() {
        Some(PlugdepError::ConfigParseError {
            file,
            ..
        }) => assert!(file.ends_with(DEFAULT_CONFIG_FILE)),
        other => panic!("Expected ConfigParseError, got {other:?}"),
    }

    let ctx = user_friendly_error(err);
    assert!(ctx.suggestion.is_some());
}

#[test]
fn test_config_round_trips_through_disk() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
    let config = ResolverConfig {
        install_order: InstallOrderConvention::DependentsFirst,
        prefer_installed: false,
        report_conflicts: true,
    };

    fs::write(&path, config.to_toml_string().unwrap()).unwrap();

    assert_eq!(ResolverConfig::load(&path).unwrap(), config);
}
