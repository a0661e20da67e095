use plugdep::core::PlugdepError;
use plugdep::resolver::{IssueKind, Resolver, resolve_dependencies};
use plugdep::test_utils::{PoolFixture, deps, init_test_logging};

/// A small plugin ecosystem: an editor theme stack plus a linting stack.
fn ecosystem() -> PoolFixture {
    PoolFixture::new()
        .installed("theme-core", "2.1.0", &[("color-utils", "^1.2.0")])
        .installed("color-utils", "1.4.0", &[])
        .installed("statusline", "0.3.0", &[("color-utils", "~1.3.0")])
        .registry("color-utils", "1.9.0", &[])
        .registry("lint-engine", "3.0.2", &[("ast-tools", "^5.0.0"), ("color-utils", "*")])
        .registry("ast-tools", "5.2.0", &[])
}

#[test]
fn test_full_resolution_with_conflict_warning() {
    init_test_logging(None);
    let fixture = ecosystem();

    let result = fixture.resolve(
        "my-plugin",
        &deps(&[("theme-core", "^2.0.0"), ("lint-engine", "^3.0.0"), ("color-utils", "^1.0.0")]),
    );

    assert!(result.success, "unexpected errors: {:?}", result.errors);
    assert_eq!(result.resolved["theme-core"], "2.1.0");
    assert_eq!(result.resolved["lint-engine"], "3.0.2");
    assert_eq!(result.resolved["color-utils"], "1.4.0");

    // statusline wants ~1.3.0 but 1.4.0 was chosen.
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].plugin, "statusline");
    assert_eq!(result.warnings[0].kind, IssueKind::VersionConflict);

    let position = |name: &str| result.install_order.iter().position(|n| n == name).unwrap();
    assert_eq!(result.install_order.len(), 5);
    assert!(position("color-utils") < position("theme-core"));
    assert!(position("color-utils") < position("lint-engine"));
    assert!(position("ast-tools") < position("lint-engine"));
    assert_eq!(result.install_order.last().map(String::as_str), Some("my-plugin"));
}

#[test]
fn test_failed_result_converts_to_error() {
    let fixture = ecosystem();

    let result = fixture.resolve("my-plugin", &deps(&[("theme-core", "^3.0.0")]));
    assert!(!result.success);

    let err = result.into_result().unwrap_err();
    let ctx = err.downcast_ref::<plugdep::core::ErrorContext>().unwrap();
    assert!(matches!(
        &ctx.error,
        PlugdepError::DependencyNotFound { name, constraint } if name == "theme-core" && constraint == "^3.0.0"
    ));
}

#[test]
fn test_cycle_through_registry() {
    let fixture = PoolFixture::new()
        .installed("a", "1.0.0", &[("b", "*")])
        .registry("b", "1.0.0", &[("c", "*")])
        .registry("c", "1.0.0", &[("a", "*")]);

    let result = fixture.resolve("root", &deps(&[("a", "*")]));

    assert!(!result.success);
    assert_eq!(result.errors.len(), 1);
    let cycle = &result.errors[0].cycle;
    assert_eq!(cycle, &vec!["a", "b", "c", "a"]);
    assert!(result.errors[0].message.contains("a → b → c → a"));
    assert!(result.resolved.is_empty());
    assert!(result.install_order.is_empty());
}

#[test]
fn test_issues_serialize_with_wire_names() {
    let fixture = PoolFixture::new();

    let result = fixture.resolve("root", &deps(&[("ghost", "^1.0.0")]));
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["errors"][0]["kind"], "DEPENDENCY_NOT_FOUND");
    assert_eq!(json["install_order"][0], "root");
}

#[test]
fn test_shared_resolver_across_threads() {
    let fixture = ecosystem();
    let resolver = Resolver::new(&fixture.installed, &fixture.registry);
    let declared = deps(&[("lint-engine", "^3.0.0")]);
    let expected = resolver.resolve_dependencies("root", &declared);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| resolver.resolve_dependencies("root", &declared)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn test_graph_tree_rendering() {
    let fixture = ecosystem();
    let resolver = fixture.resolver();

    let graph = resolver.build_graph("my-plugin", &deps(&[("lint-engine", "*")]));
    let tree = graph.to_tree_string("my-plugin");

    assert!(tree.contains("lint-engine@3.0.2"));
    assert!(tree.contains("ast-tools@5.2.0"));
    assert_eq!(
        graph.transitive_dependencies("my-plugin").len(),
        3,
        "lint-engine, ast-tools and color-utils"
    );
}

#[test]
fn test_free_function_with_empty_pools() {
    let fixture = PoolFixture::new();

    let result = resolve_dependencies(&fixture.installed, &fixture.registry, "solo", &deps(&[]));

    assert!(result.success);
    assert_eq!(result.install_order, vec!["solo"]);
}
