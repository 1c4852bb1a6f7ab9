//! End-to-end resolution over real settings trees
//!
//! These tests exercise the complete flow: validation -> file discovery ->
//! layered merge -> per-output cascades, against temp-dir settings trees.

use integration_tests::FixtureTree;
use pretty_assertions::assert_eq;
use restore_config::{FileDiscovery, MachineWideSettings};
use restore_core::{
    Error, InvocationContext, OverrideInputs, ProjectInputs, RestoreSettingsResolver,
};
use restore_fs::PortablePath;

fn strings(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

/// Build a context for a project at `tree/<rel>/app.proj` invoked from
/// `tree/home/user`.
fn context_for(tree: &FixtureTree, rel: &str) -> InvocationContext {
    tree.mkdir(rel);
    tree.mkdir("home/user");
    InvocationContext::new(
        tree.canonical(rel).join("app.proj"),
        tree.canonical("home/user"),
    )
}

#[test]
fn settings_tier_feeds_all_outputs_when_nothing_is_declared() {
    let tree = FixtureTree::new();
    tree.write(
        "machine/restore.toml",
        r#"
[sources]
list = ["https://central.example.org/v1/index"]
"#,
    );
    tree.write(
        "repo/restore.toml",
        r#"
[packages]
path = "cache"

[fallback]
list = ["shared"]
"#,
    );
    let context = context_for(&tree, "repo/proj");

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let resolved = resolver
        .resolve(&context, &OverrideInputs::default(), &ProjectInputs::default())
        .unwrap();

    assert_eq!(resolved.packages_path, tree.canonical("repo").join("cache"));
    assert_eq!(resolved.sources, vec!["https://central.example.org/v1/index"]);
    assert_eq!(
        resolved.fallback_folders,
        vec![tree.canonical("repo").join("shared")]
    );
    assert_eq!(
        resolved.config_file_paths,
        vec![
            tree.canonical("repo/restore.toml"),
            tree.canonical("machine/restore.toml"),
        ]
    );
}

#[test]
fn declared_fallback_resolves_next_to_the_project() {
    let tree = FixtureTree::new();
    let context = context_for(&tree, "repo/proj");
    let declared = ProjectInputs {
        fallback_folders: Some(strings(&["../libs"])),
        ..Default::default()
    };

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let resolved = resolver
        .resolve(&context, &OverrideInputs::default(), &declared)
        .unwrap();

    // Project-relative, even though the tool ran from an unrelated dir.
    assert_eq!(
        resolved.fallback_folders,
        vec![tree.canonical("repo").join("libs")]
    );
}

#[test]
fn override_fallback_resolves_next_to_the_startup_dir() {
    let tree = FixtureTree::new();
    let context = context_for(&tree, "repo/proj");
    let overrides = OverrideInputs {
        fallback_folders: Some(strings(&["../libs"])),
        ..Default::default()
    };

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let resolved = resolver
        .resolve(&context, &overrides, &ProjectInputs::default())
        .unwrap();

    // Same raw string as the declared-origin case, different base.
    assert_eq!(
        resolved.fallback_folders,
        vec![tree.canonical("home").join("libs")]
    );
}

#[test]
fn lone_clear_hides_discovered_sources() {
    let tree = FixtureTree::new();
    tree.write(
        "repo/restore.toml",
        r#"
[sources]
list = ["https://hidden.example.org/v1/index"]
"#,
    );
    let context = context_for(&tree, "repo/proj");
    let declared = ProjectInputs {
        sources: Some(strings(&["clear"])),
        ..Default::default()
    };

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let resolved = resolver
        .resolve(&context, &OverrideInputs::default(), &declared)
        .unwrap();

    assert!(resolved.sources.is_empty());
    // The hidden file still contributed to the consulted-files list.
    assert_eq!(
        resolved.config_file_paths,
        vec![tree.canonical("repo/restore.toml")]
    );
}

#[test]
fn mixed_clear_aborts_with_no_outputs() {
    let tree = FixtureTree::new();
    let context = context_for(&tree, "repo/proj");
    let declared = ProjectInputs {
        sources: Some(strings(&["clear", "https://pkgs.example.org/v1/index"])),
        ..Default::default()
    };

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let err = resolver
        .resolve(&context, &OverrideInputs::default(), &declared)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidClearCombination { .. }));
}

#[test]
fn missing_pinned_settings_file_is_fatal() {
    let tree = FixtureTree::new();
    let context = context_for(&tree, "repo/proj")
        .with_config_file(PortablePath::new(tree.root().join("absent/restore.toml")));

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let err = resolver
        .resolve(&context, &OverrideInputs::default(), &ProjectInputs::default())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Config(restore_config::Error::SettingsNotFound { .. })
    ));
}

#[test]
fn pinned_settings_file_replaces_the_walk() {
    let tree = FixtureTree::new();
    tree.write(
        "repo/restore.toml",
        r#"
[sources]
list = ["https://walked.example.org/v1/index"]
"#,
    );
    tree.write(
        "pinned/restore.toml",
        r#"
[sources]
list = ["https://pinned.example.org/v1/index"]
"#,
    );
    let context =
        context_for(&tree, "repo/proj").with_config_file(tree.canonical("pinned/restore.toml"));

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let resolved = resolver
        .resolve(&context, &OverrideInputs::default(), &ProjectInputs::default())
        .unwrap();

    assert_eq!(resolved.sources, vec!["https://pinned.example.org/v1/index"]);
    assert_eq!(
        resolved.config_file_paths,
        vec![tree.canonical("pinned/restore.toml")]
    );
}

#[test]
fn solution_settings_join_the_merge() {
    let tree = FixtureTree::new();
    tree.write(
        "solution/restore.toml",
        r#"
[fallback]
list = ["team-cache"]
"#,
    );
    let context = context_for(&tree, "repo/proj").with_solution_dir(tree.canonical("solution"));

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let resolved = resolver
        .resolve(&context, &OverrideInputs::default(), &ProjectInputs::default())
        .unwrap();

    assert_eq!(
        resolved.fallback_folders,
        vec![tree.canonical("solution").join("team-cache")]
    );
}

#[test]
fn overrides_beat_everything_on_disk() {
    let tree = FixtureTree::new();
    tree.write(
        "repo/restore.toml",
        r#"
[packages]
path = "/disk/cache"

[sources]
list = ["https://disk.example.org/v1/index"]
"#,
    );
    let context = context_for(&tree, "repo/proj");
    let overrides = OverrideInputs {
        packages_path: Some("override-cache".into()),
        sources: Some(strings(&["override-feed"])),
        fallback_folders: Some(strings(&["override-shared"])),
    };

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let resolved = resolver
        .resolve(&context, &overrides, &ProjectInputs::default())
        .unwrap();

    let startup = tree.canonical("home/user");
    assert_eq!(resolved.packages_path, startup.join("override-cache"));
    assert_eq!(resolved.sources, vec![startup.join("override-feed").as_str()]);
    assert_eq!(resolved.fallback_folders, vec![startup.join("override-shared")]);
}

#[test]
fn repeated_resolution_is_identical() {
    let tree = FixtureTree::new();
    tree.write(
        "repo/restore.toml",
        r#"
[sources]
list = ["https://central.example.org/v1/index", "local-feed"]
"#,
    );
    let context = context_for(&tree, "repo/proj");
    let declared = ProjectInputs {
        fallback_folders: Some(strings(&["../libs"])),
        ..Default::default()
    };

    let machine = MachineWideSettings::with_dir(tree.machine_dir());
    let resolver = RestoreSettingsResolver::new(FileDiscovery::new(&machine));
    let first = resolver
        .resolve(&context, &OverrideInputs::default(), &declared)
        .unwrap();
    let second = resolver
        .resolve(&context, &OverrideInputs::default(), &declared)
        .unwrap();

    assert_eq!(first, second);
}
