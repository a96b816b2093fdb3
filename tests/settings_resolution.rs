/// Settings resolution scenarios exercised through the public API
///
/// Uses the pure resolution core with an in-memory variable map so tests
/// never mutate the process environment.

use std::collections::HashMap;
use vetclinic::config::{Environment, Settings};
use vetclinic::error::ConfigError;

fn resolve(selector: Option<&str>, vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::resolve_from(selector, |key| map.get(key).cloned())
}

#[test]
fn testing_selector_builds_test_database_url() {
    let settings = resolve(Some("testing"), &[("DB_NAME", "vet_clinic")]).unwrap();

    assert_eq!(settings.env, Environment::Testing);
    assert!(settings.database_url.contains("test_vet_clinic"));
    assert!(!settings.debug);
    assert!(!settings.db_echo);
}

#[test]
fn development_and_production_keep_the_database_name() {
    for selector in ["development", "production"] {
        let settings = resolve(Some(selector), &[("DB_NAME", "vet_clinic")]).unwrap();
        assert!(settings.database_url.ends_with("/vet_clinic"));
    }
}

#[test]
fn selector_aliases_and_unknown_values() {
    assert_eq!(resolve(Some("PROD"), &[]).unwrap().env, Environment::Production);
    assert_eq!(resolve(Some("test"), &[]).unwrap().env, Environment::Testing);
    assert_eq!(
        resolve(Some("anything-else"), &[]).unwrap().env,
        Environment::Development
    );
}

#[test]
fn explicit_debug_overrides_the_production_default() {
    let settings = resolve(Some("prod"), &[("DEBUG", "true")]).unwrap();
    assert!(settings.debug);
    // DB_ECHO was absent, so the production default still applies
    assert!(!settings.db_echo);
}

#[test]
fn resolving_twice_with_identical_inputs_is_identical() {
    let vars = [
        ("ENV", "testing"),
        ("DB_HOST", "db.internal"),
        ("DB_NAME", "vet_clinic"),
        ("SECRET_KEY", "k"),
    ];
    assert_eq!(resolve(None, &vars).unwrap(), resolve(None, &vars).unwrap());
}
