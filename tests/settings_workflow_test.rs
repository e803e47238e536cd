//! Store Workflow Integration Tests
//!
//! Tests for the complete store lifecycle including:
//! - Populating the cache from defaults, env vars and files
//! - Typed reads and strict writes per coercion kind
//! - Reset and self-healing behavior
//! - Legacy ID migration
//! - Remote refresh, readiness and update

mod common;

use common::{TestFixture, count_changes, dir_with, record_changes};
use modmail_config::{
    ConfigValue, DmDisabled, EnumValue, Error, IsoDuration, KeyRegistry, MapEnvSource,
    filter_default, filter_valid,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

// =============================================================================
// Defaults
// =============================================================================

#[test]
fn test_every_default_reads_cleanly() {
    let fixture = TestFixture::populated();
    let events = record_changes(&fixture.manager);

    for key in KeyRegistry::builtin().all_keys() {
        assert!(fixture.manager.get(key).is_ok(), "default for {key} failed");
    }

    // Defaults are valid, so nothing was reset
    assert!(events.lock().unwrap().is_empty());
}

#[test]
fn test_get_without_populate_uses_defaults() {
    let fixture = TestFixture::new();

    assert_eq!(fixture.manager.get_raw("prefix").unwrap(), json!("?"));
    assert_eq!(fixture.manager.get_color("main_color").unwrap(), 0x5865F2);
    assert!(fixture.manager.get_duration("account_age").unwrap().is_zero());
}

#[test]
fn test_remove_restores_default() {
    let fixture = TestFixture::populated();

    for key in KeyRegistry::builtin().all_keys() {
        let default = KeyRegistry::builtin().get(key).unwrap().default_value();
        fixture.manager.set_raw(key, json!("scribble")).unwrap();

        assert_eq!(fixture.manager.remove(key).unwrap(), default);
        assert_eq!(fixture.manager.get_raw(key).unwrap(), default);
        assert!(fixture.manager.items().contains_key(key));
    }
}

#[test]
fn test_defaults_are_not_shared() {
    let fixture = TestFixture::populated();

    fixture
        .manager
        .set_raw("command_permissions", json!({"close": ["1"]}))
        .unwrap();
    fixture.manager.remove("command_permissions").unwrap();

    assert_eq!(
        KeyRegistry::builtin()
            .get("command_permissions")
            .unwrap()
            .default_value(),
        json!({})
    );
    assert_eq!(
        fixture.manager.get_raw("command_permissions").unwrap(),
        json!({})
    );
}

#[test]
fn test_round_trip_is_idempotent() {
    let fixture = TestFixture::populated();
    fixture.manager.set("main_color", "#ABC").unwrap();
    fixture.manager.set("thread_auto_close", "PT2H30M").unwrap();
    fixture.manager.set("user_typing", "no").unwrap();
    fixture.manager.set("dm_disabled", 1).unwrap();

    for key in KeyRegistry::builtin().all_keys() {
        let before = fixture.manager.get(key).unwrap();
        let raw = fixture.manager.get_raw(key).unwrap();

        fixture.manager.set(key, raw).unwrap();
        assert_eq!(fixture.manager.get(key).unwrap(), before, "{key} drifted");
    }
}

// =============================================================================
// Colors
// =============================================================================

#[test]
fn test_color_short_hex() {
    let fixture = TestFixture::populated();

    fixture.manager.set("main_color", "#ABC").unwrap();

    assert_eq!(fixture.manager.get_raw("main_color").unwrap(), json!("#aabbcc"));
    assert_eq!(fixture.manager.get_color("main_color").unwrap(), 0xAABBCC);
}

#[test]
fn test_color_by_name() {
    let fixture = TestFixture::populated();

    fixture.manager.set("mod_color", "Blurple").unwrap();
    assert_eq!(fixture.manager.get_raw("mod_color").unwrap(), json!("#5865f2"));

    let err = fixture.manager.set("mod_color", "not a color").unwrap_err();
    assert!(matches!(err, Error::InvalidValue { .. }));
    assert!(err.to_string().contains("Invalid color name or hex."));
    assert_eq!(fixture.manager.get_raw("mod_color").unwrap(), json!("#5865f2"));
}

#[test]
fn test_corrupt_color_heals() {
    let fixture = TestFixture::populated();
    let changes = count_changes(&fixture.manager, "error_color");

    fixture.manager.set_raw("error_color", "purple-ish").unwrap();
    assert_eq!(fixture.manager.get_color("error_color").unwrap(), 0xE74C3C);
    assert_eq!(
        fixture.manager.get_raw("error_color").unwrap(),
        json!("#e74c3c")
    );

    // One for the raw write, one for the reset
    assert_eq!(changes.load(Ordering::SeqCst), 2);
}

// =============================================================================
// Durations
// =============================================================================

#[test]
fn test_iso_duration() {
    let fixture = TestFixture::populated();

    fixture.manager.set("thread_auto_close", "PT1H").unwrap();

    let duration = fixture.manager.get_duration("thread_auto_close").unwrap();
    assert_eq!(duration, IsoDuration::from_time(time::Duration::hours(1)));
    assert_eq!(
        fixture.manager.get_raw("thread_auto_close").unwrap(),
        json!("PT1H")
    );
}

#[test]
fn test_human_duration() {
    let fixture = TestFixture::populated();

    fixture.manager.set("thread_cooldown", "2 hours").unwrap();

    let duration = fixture.manager.get_duration("thread_cooldown").unwrap();
    assert_eq!(duration, IsoDuration::from_time(time::Duration::hours(2)));
}

#[test]
fn test_invalid_duration() {
    let fixture = TestFixture::populated();

    let err = fixture
        .manager
        .set("thread_auto_close", "not-a-time")
        .unwrap_err();

    assert!(err.is_invalid_config());
    assert!(fixture.manager.get_duration("thread_auto_close").unwrap().is_zero());
}

#[test]
fn test_out_of_range_duration() {
    let fixture = TestFixture::populated();
    let huge = format!("{} hours", "9".repeat(400));

    for input in ["1000000000000 years", huge.as_str()] {
        let err = fixture.manager.set("thread_auto_close", input).unwrap_err();
        assert!(matches!(err, Error::InvalidValue { .. }));
    }
    assert!(fixture.manager.get_duration("thread_auto_close").unwrap().is_zero());
}

// =============================================================================
// Booleans and Enums
// =============================================================================

#[test]
fn test_boolean_words() {
    let fixture = TestFixture::populated();

    fixture.manager.set("user_typing", "no").unwrap();
    assert_eq!(fixture.manager.get_raw("user_typing").unwrap(), json!(false));
    assert!(!fixture.manager.get_bool("user_typing").unwrap());

    let err = fixture.manager.set("user_typing", "maybe").unwrap_err();
    assert!(err.to_string().contains("Must be a yes/no value."));
    assert_eq!(fixture.manager.get_raw("user_typing").unwrap(), json!(false));
}

#[test]
fn test_enum_round_trip() {
    let fixture = TestFixture::populated();

    fixture
        .manager
        .set("dm_disabled", EnumValue::DmDisabled(DmDisabled::AllThreads).to_value())
        .unwrap();

    assert_eq!(fixture.manager.get_raw("dm_disabled").unwrap(), json!(2));
    assert_eq!(
        fixture.manager.get_enum("dm_disabled").unwrap(),
        Some(EnumValue::DmDisabled(DmDisabled::AllThreads))
    );
    assert_eq!(fixture.manager.get_enum("status").unwrap(), None);
    assert!(fixture.manager.set("dm_disabled", 9).is_err());
}

#[test]
fn test_typed_getter_mismatch() {
    let fixture = TestFixture::populated();

    let err = fixture.manager.get_color("user_typing").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

// =============================================================================
// Legacy ID Migration
// =============================================================================

#[tokio::test]
async fn test_legacy_ids_migrate_once() {
    let fixture = TestFixture::populated();
    fixture
        .manager
        .set_raw("command_permissions", json!({"close": [12345, -1]}))
        .unwrap();
    let changes = count_changes(&fixture.manager, "command_permissions");

    let value = fixture.manager.get("command_permissions").unwrap();
    let expected = json!({"close": ["12345", -1]});
    assert_eq!(value, ConfigValue::Mapping(object(expected.clone())));

    // Reading again finds nothing left to migrate
    fixture.manager.get("command_permissions").unwrap();
    assert_eq!(changes.load(Ordering::SeqCst), 1);

    fixture.manager.update().await.unwrap();
    assert_eq!(fixture.backend.write_count(), 1);
    assert_eq!(fixture.backend.snapshot()["command_permissions"], expected);
}

#[test]
fn test_try_get_does_not_migrate() {
    let fixture = TestFixture::populated();
    fixture
        .manager
        .set_raw("level_permissions", json!({"REGULAR": [7]}))
        .unwrap();

    let value = fixture.manager.try_get("level_permissions").unwrap();

    assert_eq!(value, ConfigValue::Mapping(object(json!({"REGULAR": ["7"]}))));
    assert_eq!(
        fixture.manager.get_raw("level_permissions").unwrap(),
        json!({"REGULAR": [7]})
    );
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn test_filter_default() {
    let registry = KeyRegistry::builtin();
    let account_age = registry.get("account_age").unwrap().default_value();

    let unchanged = object(json!({"prefix": "?", "account_age": account_age.clone()}));
    assert!(filter_default(registry, &unchanged).is_empty());

    let changed = object(json!({"prefix": "!", "account_age": account_age}));
    assert_eq!(Value::Object(filter_default(registry, &changed)), json!({"prefix": "!"}));
}

#[test]
fn test_filter_valid_drops_protected() {
    let data = object(json!({"token": "abc", "MENTION": "@here", "unknown": 1}));

    let valid = filter_valid(KeyRegistry::builtin(), &data);

    assert_eq!(Value::Object(valid), json!({"mention": "@here"}));
}

// =============================================================================
// Population Precedence
// =============================================================================

#[test]
fn test_env_then_file_precedence() {
    let dir = dir_with(&[
        (".env", "PREFIX=dotenv\nMENTION=dotenv\nLOG_URL=dotenv\n"),
        ("config.json", r#"{"Prefix": "file"}"#),
    ]);
    let env = MapEnvSource::new()
        .with("prefix", "process")
        .with("mention", "process");
    let fixture = TestFixture::in_dir(dir, env);

    let cache = fixture.manager.populate_cache().unwrap();

    assert_eq!(cache["prefix"], json!("file"));
    assert_eq!(cache["mention"], json!("process"));
    assert_eq!(cache["log_url"], json!("dotenv"));
}

#[test]
fn test_malformed_override_file_is_skipped() {
    let dir = dir_with(&[("config.json", "{ not json")]);
    let fixture = TestFixture::in_dir(dir, MapEnvSource::new().with("PREFIX", "!"));

    let cache = fixture.manager.populate_cache().unwrap();

    assert_eq!(cache["prefix"], json!("!"));
    assert_eq!(cache.len(), KeyRegistry::builtin().len());
}

// =============================================================================
// Remote Sync
// =============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_readiness_fires_once() {
    let fixture = Arc::new(TestFixture::populated());
    fixture.backend.insert("prefix", json!("!"));

    let waiter = {
        let fixture = fixture.clone();
        tokio::spawn(async move { fixture.manager.wait_until_ready().await })
    };
    assert!(!fixture.manager.is_ready());

    let cache = fixture.manager.refresh().await.unwrap();
    assert_eq!(cache["prefix"], json!("!"));

    tokio::time::timeout(Duration::from_secs(5), waiter)
        .await
        .expect("waiter never woke")
        .unwrap();

    fixture.backend.insert("prefix", json!("$"));
    fixture.manager.refresh().await.unwrap();
    assert!(fixture.manager.is_ready());
    assert_eq!(fixture.manager.get_raw("prefix").unwrap(), json!("$"));
}

#[tokio::test]
async fn test_update_pushes_changed_values() {
    let fixture = TestFixture::populated();
    fixture.manager.set("prefix", "!").unwrap();
    fixture.manager.set("main_color", "#ffffff").unwrap();

    fixture.manager.update().await.unwrap();

    assert_eq!(
        Value::Object(fixture.backend.snapshot()),
        json!({"prefix": "!", "main_color": "#ffffff"})
    );
}

#[tokio::test]
async fn test_backend_errors_propagate() {
    let fixture = TestFixture::populated();
    fixture.manager.set("prefix", "!").unwrap();
    fixture.backend.set_failing(true);

    assert!(matches!(
        fixture.manager.refresh().await,
        Err(Error::Backend(_))
    ));
    assert!(matches!(
        fixture.manager.update().await,
        Err(Error::Backend(_))
    ));
    assert!(!fixture.manager.is_ready());
    assert_eq!(fixture.manager.get_raw("prefix").unwrap(), json!("!"));
}
