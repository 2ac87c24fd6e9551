//! Integration tests for cascading configuration.
//!
//! Loads several scripts from disk into one configuration and checks that
//! later scripts override earlier ones key by key, that failed loads change
//! nothing, and that errors identify the script and key involved.

mod common;

use common::{Foo, foo_config, write_script};
use configr::LoadError;
use configr::config::{ConfigPaths, ConfigTier};
use configr::config::paths::DEFAULT_FILE_NAME;
use tempfile::TempDir;

#[test]
fn retrieving_an_object_defined_in_two_files() {
    let temp = TempDir::new().unwrap();
    let foo1 = write_script(
        temp.path(),
        "foo1.yaml",
        "- add: { name: foo, type: Foo, value: { bar: baz } }\n",
    );
    let foo2 = write_script(
        temp.path(),
        "foo2.yaml",
        "- add: { name: foo, type: Foo, value: { bar: bazzzzz } }\n",
    );

    let mut config = foo_config();
    config.load_script_file(&foo1).unwrap();
    let report = config.load_script_file(&foo2).unwrap();

    assert_eq!(config.get_named::<Foo>("foo").unwrap().bar, "bazzzzz");
    assert_eq!(report.replaced, 1);
    assert_eq!(config.registry().len(), 1);
}

#[test]
fn retrieving_an_object_defined_in_the_second_of_two_files() {
    let temp = TempDir::new().unwrap();
    let foo1 = write_script(
        temp.path(),
        "foo1.yaml",
        "- add: { name: notfoo, type: Foo, value: { bar: baz } }\n",
    );
    let foo2 = write_script(
        temp.path(),
        "foo2.yaml",
        "- add: { name: foo, type: Foo, value: { bar: bazzzzz } }\n",
    );

    let mut config = foo_config();
    config.load_script_files([&foo1, &foo2]).unwrap();

    assert_eq!(config.get_named::<Foo>("foo").unwrap().bar, "bazzzzz");
    assert_eq!(config.get_named::<Foo>("notfoo").unwrap().bar, "baz");
}

#[test]
fn retrieving_an_object_defined_in_a_file_whose_name_is_defined_in_another_file() {
    let temp = TempDir::new().unwrap();
    let foo2 = write_script(
        temp.path(),
        "foo2.yaml",
        "- add: { name: foo, type: Foo, value: { bar: bazzzzz } }\n",
    );
    let foo1 = write_script(
        temp.path(),
        "foo1.yaml",
        &format!("- add: {{ name: otherFileName, value: '{}' }}\n", foo2.display()),
    );

    let mut config = foo_config();
    config.load_script_file(&foo1).unwrap();
    let other_file_name = config.get_named::<String>("otherFileName").unwrap().clone();
    config.load_script_file(&other_file_name).unwrap();

    assert_eq!(config.get_named::<Foo>("foo").unwrap().bar, "bazzzzz");
}

#[test]
fn trying_to_retrieve_a_nonexistent_object() {
    let temp = TempDir::new().unwrap();
    let foo1 = write_script(temp.path(), "foo1.yaml", "");

    let mut config = foo_config();
    let report = config.load_script_file(&foo1).unwrap();
    assert_eq!(report.registrations, 0);

    let err = config.get_named::<Foo>("foo").unwrap_err();
    assert!(err.to_string().contains("foo"));
}

#[test]
fn repeated_key_within_one_script_last_wins() {
    let mut config = foo_config();
    let report = config
        .load(
            "inline",
            r#"
- add: { name: foo, type: Foo, value: { bar: first } }
- add: { name: foo, type: Foo, value: { bar: second } }
"#,
        )
        .unwrap();

    assert_eq!(report.registrations, 2);
    assert_eq!(report.replaced, 1);
    assert_eq!(config.get_named::<Foo>("foo").unwrap().bar, "second");
}

#[test]
fn anonymous_value_defined_in_two_files() {
    let temp = TempDir::new().unwrap();
    let first = write_script(
        temp.path(),
        "first.yaml",
        "- add: { value: 1 }\n- add: { value: 2 }\n- add: { type: Foo, value: { bar: baz } }\n",
    );
    let second = write_script(temp.path(), "second.yaml", "- add: { value: 3 }\n");

    let mut config = foo_config();
    config.load_script_file(&first).unwrap();
    assert_eq!(config.get::<i32>().unwrap(), &2);

    let report = config.load_script_file(&second).unwrap();
    assert_eq!(report.replaced, 1);
    assert_eq!(config.get::<i32>().unwrap(), &3);
    assert_eq!(config.get::<Foo>().unwrap().bar, "baz");
    assert_eq!(config.registry().len(), 2);
}

#[test]
fn failed_load_leaves_registry_unchanged() {
    let temp = TempDir::new().unwrap();
    let base = write_script(
        temp.path(),
        "base.yaml",
        "- add: { name: foo, type: Foo, value: { bar: baz } }\n",
    );
    let broken = write_script(
        temp.path(),
        "broken.yaml",
        "- add: { name: foo, type: Foo, value: { bar: changed } }\n- add: { name: x, type: Nope, value: 1 }\n",
    );

    let mut config = foo_config();
    config.load_script_file(&base).unwrap();
    let err = config.load_script_file(&broken).unwrap_err();

    assert!(matches!(err, LoadError::Script { .. }));
    assert!(err.to_string().contains("broken.yaml"));
    assert!(err.to_string().contains("Nope"));
    assert_eq!(config.get_named::<Foo>("foo").unwrap().bar, "baz");
    assert_eq!(config.registry().len(), 1);
}

#[test]
fn load_fault_is_distinct_from_lookup_failure() {
    let mut config = foo_config();
    let err = config.load("foo", "- add: { name: foo, value: [1, 2").unwrap_err();

    let err: configr::Error = err.into();
    assert!(matches!(err, configr::Error::Load(_)));
    assert!(err.to_string().contains("'foo'"));
}

#[test]
fn missing_file_is_reported_with_path() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.yaml");

    let mut config = foo_config();
    let err = config.load_script_file(&missing).unwrap_err();

    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("missing.yaml"));
}

#[test]
fn reset_clears_every_loaded_entry() {
    let temp = TempDir::new().unwrap();
    let foo1 = write_script(
        temp.path(),
        "foo1.yaml",
        "- add: { name: foo, type: Foo, value: { bar: baz } }\n- add: { value: 12 }\n",
    );

    let mut config = foo_config();
    config.load_script_file(&foo1).unwrap();
    config.reset();

    assert!(config.get_named::<Foo>("foo").unwrap_err().is_not_found());
    assert!(config.get::<i32>().unwrap_err().is_not_found());
    assert!(config.registry().is_empty());
}

#[test]
fn default_tiers_cascade_project_then_user_then_explicit() {
    let temp = TempDir::new().unwrap();
    let project_dir = temp.path().join("project");
    let user_dir = temp.path().join("user");
    std::fs::create_dir_all(&project_dir).unwrap();
    std::fs::create_dir_all(&user_dir).unwrap();

    write_script(
        &project_dir,
        DEFAULT_FILE_NAME,
        "- add: { name: env, value: project }\n- add: { name: port, value: 8080 }\n- add: { name: debug, value: false }\n",
    );
    write_script(
        &user_dir,
        DEFAULT_FILE_NAME,
        "- add: { name: env, value: user }\n- add: { name: debug, value: true }\n",
    );
    let explicit = write_script(
        temp.path(),
        "production.yaml",
        "- add: { name: env, value: production }\n",
    );

    let paths = ConfigPaths::with_dirs(Some(project_dir), Some(user_dir))
        .with_explicit_file(&explicit);
    assert_eq!(
        paths
            .scripts()
            .iter()
            .map(|(tier, _)| *tier)
            .collect::<Vec<_>>(),
        vec![ConfigTier::Project, ConfigTier::User, ConfigTier::Explicit]
    );

    let mut config = foo_config();
    let reports = config.load_defaults(&paths).unwrap();

    assert_eq!(reports.len(), 3);
    assert_eq!(config.get_named::<String>("env").unwrap(), "production");
    assert_eq!(config.get_named::<bool>("debug").unwrap(), &true);
    assert_eq!(config.get_named::<i32>("port").unwrap(), &8080);
}

#[test]
fn default_tiers_with_missing_explicit_file_fail() {
    let temp = TempDir::new().unwrap();
    let paths = ConfigPaths::with_dirs(None, None).with_explicit_file(temp.path().join("nope.yaml"));

    let mut config = foo_config();
    let err = config.load_defaults(&paths).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
