use plugdep::core::PlugdepError;
use plugdep::models::{CandidatePool, CandidateSource};
use plugdep::resolver::{IssueKind, Resolver};
use plugdep::test_utils::deps;
use std::fs;
use tempfile::TempDir;

const INSTALLED_INDEX: &str = r#"[
    { "name": "logger", "version": "1.5.0", "dependencies": { "fmt": "^2.0.0" } },
    { "name": "fmt", "version": "2.0.1" },
    { "name": "old-ui", "version": "0.4.0", "dependencies": { "fmt": "~2.0.0" } }
]"#;

const REGISTRY_INDEX: &str = r#"{
    "fmt": { "version": "2.3.0" },
    "http": { "version": "4.1.0", "dependencies": { "logger": "^1.0.0" } }
}"#;

fn load_pools(temp_dir: &TempDir) -> (CandidatePool, CandidatePool) {
    let installed_path = temp_dir.path().join("installed.json");
    let registry_path = temp_dir.path().join("registry.json");
    fs::write(&installed_path, INSTALLED_INDEX).unwrap();
    fs::write(&registry_path, REGISTRY_INDEX).unwrap();

    let installed = CandidatePool::from_json_str(
        CandidateSource::Installed,
        &fs::read_to_string(&installed_path).unwrap(),
    )
    .unwrap();
    let registry = CandidatePool::from_json_str(
        CandidateSource::Registry,
        &fs::read_to_string(&registry_path).unwrap(),
    )
    .unwrap();
    (installed, registry)
}

#[test]
fn test_resolve_from_index_files() {
    let temp_dir = TempDir::new().unwrap();
    let (installed, registry) = load_pools(&temp_dir);
    assert_eq!(installed.len(), 3);
    assert_eq!(registry.get("fmt").map(|c| c.source()), Some(CandidateSource::Registry));

    let result = Resolver::new(&installed, &registry)
        .resolve_dependencies("app", &deps(&[("http", "^4.0.0"), ("fmt", "^2.2.0")]));

    assert!(result.success);
    assert_eq!(result.resolved["http"], "4.1.0");
    // The installed 2.0.1 is too old, so the registry copy is chosen.
    assert_eq!(result.resolved["fmt"], "2.3.0");

    let conflicted: Vec<&str> = result
        .issues_of_kind(IssueKind::VersionConflict)
        .map(|issue| issue.plugin.as_str())
        .collect();
    assert_eq!(conflicted, vec!["old-ui"]);

    assert_eq!(result.install_order, vec!["fmt", "logger", "http", "app"]);
}

#[test]
fn test_pool_round_trips_through_json() {
    let temp_dir = TempDir::new().unwrap();
    let (installed, _) = load_pools(&temp_dir);

    let json = installed.to_json_string().unwrap();
    let reloaded = CandidatePool::from_json_str(CandidateSource::Installed, &json).unwrap();

    assert_eq!(reloaded, installed);
}

#[test]
fn test_malformed_index_is_a_json_error() {
    let err = CandidatePool::from_json_str(CandidateSource::Registry, "{ not json").unwrap_err();

    assert!(matches!(err, PlugdepError::JsonError(_)));
}

#[test]
fn test_nameless_list_entry_is_rejected() {
    let err =
        CandidatePool::from_json_str(CandidateSource::Installed, r#"[{ "version": "1.0.0" }]"#)
            .unwrap_err();

    assert!(err.to_string().contains("no name"));
}

#[derive(serde::Serialize, serde::Deserialize)]
struct Snapshot {
    installed: CandidatePool,
    registry: CandidatePool,
}

#[test]
fn test_pools_embed_in_a_snapshot_document() {
    let temp_dir = TempDir::new().unwrap();
    let (installed, registry) = load_pools(&temp_dir);
    let path = temp_dir.path().join("snapshot.json");

    let snapshot = Snapshot {
        installed,
        registry,
    };
    fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();
    let reloaded: Snapshot = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(reloaded.installed, snapshot.installed);
    assert_eq!(reloaded.registry, snapshot.registry);
    assert_eq!(reloaded.registry.source(), CandidateSource::Registry);
}
