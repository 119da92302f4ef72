use std::collections::HashMap;
use std::path::PathBuf;

use alibi_cli::config::{
    AlibiConfig, CredentialSource, DEFAULT_MODEL_ID, DEFAULT_REGION, ENV_DATA_DIR, ENV_MODEL_ID,
    ENV_REGION, Overrides, config_info, load_config_from, load_config_lenient, resolve_settings, save_config_to,
};
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_apply_without_config() {
    let settings = resolve_settings(None, no_env, &Overrides::default(), PathBuf::from("/data"));

    assert_eq!(settings.region, DEFAULT_REGION);
    assert_eq!(settings.model_id, DEFAULT_MODEL_ID);
    assert_eq!(settings.credentials, CredentialSource::DefaultChain);
    assert_eq!(settings.data_dir, PathBuf::from("/data"));
}

#[test]
fn env_beats_file_and_flags_beat_env() {
    let mut file = AlibiConfig::new(
        "eu-west-1",
        CredentialSource::Profile {
            profile_name: "work".to_string(),
        },
    );
    file.data_dir = Some(PathBuf::from("/from-file"));

    let env: HashMap<&str, &str> = HashMap::from([
        (ENV_REGION, "ap-southeast-2"),
        (ENV_MODEL_ID, "env-model"),
        (ENV_DATA_DIR, "/from-env"),
    ]);
    let lookup = |key: &str| env.get(key).map(|v| v.to_string());

    let overrides = Overrides {
        model_id: Some("flag-model".to_string()),
        ..Overrides::default()
    };
    let settings = resolve_settings(Some(&file), lookup, &overrides, PathBuf::from("/default"));

    assert_eq!(settings.region, "ap-southeast-2");
    assert_eq!(settings.model_id, "flag-model");
    assert_eq!(settings.data_dir, PathBuf::from("/from-env"));
    assert_eq!(
        settings.credentials,
        CredentialSource::Profile {
            profile_name: "work".to_string()
        }
    );
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/config.json");
    let config = AlibiConfig::new("us-west-2", CredentialSource::DefaultChain);

    save_config_to(&path, &config).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded, config);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn config_without_version_loads_as_current() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "region": "us-east-2",
            "credentials": { "type": "default_chain" },
            "created_at": "2024-01-01T00:00:00Z"
        }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();

    assert_eq!(config.config_version, 1);
    assert_eq!(config.model_id, DEFAULT_MODEL_ID);
    assert_eq!(config.region, "us-east-2");
}

#[test]
fn newer_config_version_is_refused() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{
            "config_version": 99,
            "region": "us-east-1",
            "model_id": "m",
            "credentials": { "type": "default_chain" },
            "created_at": "2024-01-01T00:00:00Z"
        }"#,
    )
    .unwrap();

    assert!(load_config_from(&path).is_err());
}

#[test]
fn config_info_redacts_inline_keys() {
    let config = AlibiConfig::new(
        "us-east-1",
        CredentialSource::Inline {
            access_key_id: "AKIAABCDEFGHIJKL1234".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: None,
        },
    );
    let settings = resolve_settings(
        Some(&config),
        no_env,
        &Overrides::default(),
        PathBuf::from("/data"),
    );

    let info = config_info(&config, &settings);
    assert_eq!(info.credential_type, "inline");
    assert_eq!(info.access_key_hint.as_deref(), Some("AKIA...1234"));
    assert!(!serde_json::to_string(&info).unwrap().contains("secret"));
}

#[test]
fn unusable_config_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("absent.json");
    assert!(load_config_lenient(&missing).is_none());

    let corrupt = dir.path().join("corrupt.json");
    std::fs::write(&corrupt, "{bad").unwrap();
    assert!(load_config_from(&corrupt).is_err());
    assert!(load_config_lenient(&corrupt).is_none());

    let newer = dir.path().join("newer.json");
    std::fs::write(
        &newer,
        r#"{"config_version": 99, "region": "us-east-1", "credentials": {"type": "default_chain"}, "created_at": "2024-01-01T00:00:00Z"}"#,
    )
    .unwrap();
    assert!(load_config_lenient(&newer).is_none());

    let settings = resolve_settings(
        load_config_lenient(&corrupt).as_ref(),
        no_env,
        &Overrides::default(),
        PathBuf::from("/data"),
    );
    assert_eq!(settings.region, DEFAULT_REGION);
    assert_eq!(settings.model_id, DEFAULT_MODEL_ID);
}

#[test]
fn good_config_loads_leniently() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    let config = AlibiConfig::new("eu-west-1", CredentialSource::DefaultChain);
    save_config_to(&path, &config).unwrap();

    assert_eq!(load_config_lenient(&path), Some(config));
}
