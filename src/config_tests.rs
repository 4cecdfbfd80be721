#![allow(clippy::unwrap_used)]

use super::*;
use std::collections::HashMap;

fn resolve_with(vars: &[(&str, &str)]) -> Result<Config> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::resolve(Path::new("/data"), |key| vars.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = resolve_with(&[]).unwrap();
    assert_eq!(config.db_path, PathBuf::from("/data/spendtrail.db"));
    assert_eq!(config.gazetteer_path, PathBuf::from("/data/suburbs.csv"));
    assert_eq!(config.window, DEFAULT_WINDOW);
}

#[test]
fn test_overrides() {
    let config = resolve_with(&[
        (DB_VAR, "/tmp/other.db"),
        (GAZETTEER_VAR, "/srv/localities.csv"),
        (WINDOW_VAR, " 3 "),
    ])
    .unwrap();
    assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
    assert_eq!(config.gazetteer_path, PathBuf::from("/srv/localities.csv"));
    assert_eq!(config.window, 3);
}

#[test]
fn test_blank_values_use_defaults() {
    let config = resolve_with(&[(DB_VAR, ""), (WINDOW_VAR, "  ")]).unwrap();
    assert_eq!(config.db_path, PathBuf::from("/data/spendtrail.db"));
    assert_eq!(config.window, DEFAULT_WINDOW);
}

#[test]
fn test_zero_window_allowed() {
    assert_eq!(resolve_with(&[(WINDOW_VAR, "0")]).unwrap().window, 0);
}

#[test]
fn test_bad_window() {
    let err = resolve_with(&[(WINDOW_VAR, "week")]).err().unwrap();
    assert!(err.to_string().contains(WINDOW_VAR));
    assert!(resolve_with(&[(WINDOW_VAR, "-2")]).is_err());
}

#[test]
fn test_window_upper_limit() {
    assert_eq!(resolve_with(&[(WINDOW_VAR, "90")]).unwrap().window, MAX_WINDOW);
    let err = resolve_with(&[(WINDOW_VAR, "91")]).err().unwrap();
    assert!(err.to_string().contains("at most 90"));
    assert!(resolve_with(&[(WINDOW_VAR, "1000000000")]).is_err());
}
