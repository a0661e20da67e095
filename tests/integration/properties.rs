use plugdep::models::DependencyMap;
use plugdep::test_utils::PoolFixture;
use plugdep::version::{ParsedVersion, parse_version, satisfies};
use proptest::prelude::*;

fn version_triple() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..50, 0u64..50, 0u64..50)
}

fn render((major, minor, patch): (u64, u64, u64)) -> String {
    format!("{major}.{minor}.{patch}")
}

proptest! {
    #[test]
    fn wildcards_accept_any_string(version in ".*") {
        prop_assert!(satisfies(&version, "*"));
        prop_assert!(satisfies(&version, "latest"));
    }

    #[test]
    fn versions_satisfy_their_own_ranges(triple in version_triple()) {
        let version = render(triple);
        let caret = format!("^{version}");
        let tilde = format!("~{version}");
        prop_assert!(satisfies(&version, &version));
        prop_assert!(satisfies(&version, &caret));
        prop_assert!(satisfies(&version, &tilde));
    }

    #[test]
    fn tilde_is_narrower_than_caret(version in version_triple(), floor in version_triple()) {
        let version = render(version);
        let floor = render(floor);
        let tilde = format!("~{floor}");
        let caret = format!("^{floor}");
        if satisfies(&version, &tilde) {
            prop_assert!(satisfies(&version, &caret));
        }
    }

    #[test]
    fn caret_never_crosses_major(triple in version_triple(), bump in 1u64..5) {
        let (major, minor, patch) = triple;
        let next_major = render((major + bump, minor, patch));
        let caret = format!("^{}", render(triple));
        prop_assert!(!satisfies(&next_major, &caret));
    }

    #[test]
    fn parse_round_trips_numeric_triples(triple in version_triple(), suffix in "(-[a-z0-9]{1,6})?") {
        let (major, minor, patch) = triple;
        let parsed = parse_version(&format!("{}{suffix}", render(triple)));
        prop_assert_eq!(parsed, Some(ParsedVersion { major, minor, patch }));
    }

    #[test]
    fn chains_install_dependencies_first(length in 1usize..40) {
        let mut fixture = PoolFixture::new();
        for i in 0..length {
            let name = format!("p{i:02}");
            let next = format!("p{:02}", i + 1);
            let dependencies: Vec<(&str, &str)> =
                if i + 1 < length { vec![(next.as_str(), "*")] } else { Vec::new() };
            fixture = fixture.installed(&name, "1.0.0", &dependencies);
        }

        let mut declared = DependencyMap::new();
        declared.insert("p00".to_string(), "^1.0.0".to_string());
        let result = fixture.resolve("root", &declared);

        prop_assert!(result.success);
        prop_assert_eq!(result.install_order.len(), length + 1);
        let mut expected: Vec<String> = (0..length).rev().map(|i| format!("p{i:02}")).collect();
        expected.push("root".to_string());
        prop_assert_eq!(result.install_order, expected);
    }
}
