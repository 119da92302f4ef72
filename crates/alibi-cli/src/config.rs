use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-haiku-4-5-20251001-v1:0";

pub const ENV_REGION: &str = "ALIBI_REGION";
pub const ENV_MODEL_ID: &str = "ALIBI_MODEL_ID";
pub const ENV_DATA_DIR: &str = "ALIBI_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlibiConfig {
    /// Schema version. A hand-written config may leave it out.
    #[serde(default = "current_version")]
    pub config_version: u32,
    pub region: String,
    /// Bedrock inference profile ID.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    pub credentials: CredentialSource,
    /// Overrides the profile storage directory.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data_dir: Option<PathBuf>,
    pub created_at: jiff::Timestamp,
}

impl AlibiConfig {
    pub fn new(region: impl Into<String>, credentials: CredentialSource) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            region: region.into(),
            model_id: default_model_id(),
            credentials,
            data_dir: None,
            created_at: jiff::Timestamp::now(),
        }
    }
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CredentialSource {
    Inline {
        access_key_id: String,
        secret_access_key: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        session_token: Option<String>,
    },
    Profile {
        profile_name: String,
    },
    DefaultChain,
}

/// Redacted config info safe to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub region: String,
    pub model_id: String,
    pub data_dir: String,
    pub created_at: String,
    pub credential_type: String,
    pub profile_name: Option<String>,
    pub access_key_hint: Option<String>,
}

/// Effective settings after layering file, environment and flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub region: String,
    pub model_id: String,
    pub credentials: CredentialSource,
    pub data_dir: PathBuf,
}

/// Per-invocation overrides, highest precedence.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub region: Option<String>,
    pub model_id: Option<String>,
    pub data_dir: Option<PathBuf>,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.alibi.cli"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Default location of the profile's key-value storage.
pub fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("com.alibi.cli").join("storage"))
}

/// Load the config at `path` if there is a usable one.
///
/// A missing file is `None`. So is a file that cannot be read, parsed or
/// migrated: that is logged and the caller runs on defaults, which keeps
/// `config reset` and the storage-only commands reachable.
pub fn load_config_lenient(path: &Path) -> Option<AlibiConfig> {
    if !path.exists() {
        return None;
    }
    match load_config_from(path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "config unusable, falling back to defaults"
            );
            None
        }
    }
}

pub fn load_config_from(path: &Path) -> eyre::Result<AlibiConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(CURRENT_VERSION, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    let config: AlibiConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value. Version 1 is
/// the first shape, so the ladder is empty for now.
fn migrate(json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Alibi."
        ));
    }
    if from_version == 0 {
        return Err(eyre::eyre!("config_version 0 is not a known version"));
    }

    Ok(json)
}

pub fn save_config(config: &AlibiConfig) -> eyre::Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &AlibiConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // Set restrictive permissions on Unix before renaming
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config() -> eyre::Result<()> {
    let path = config_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}

/// Layer settings: built-in defaults, then the config file, then the
/// environment (read through `env`), then `overrides`.
pub fn resolve_settings(
    file: Option<&AlibiConfig>,
    env: impl Fn(&str) -> Option<String>,
    overrides: &Overrides,
    default_data_dir: PathBuf,
) -> Settings {
    let mut settings = Settings {
        region: DEFAULT_REGION.to_string(),
        model_id: DEFAULT_MODEL_ID.to_string(),
        credentials: CredentialSource::DefaultChain,
        data_dir: default_data_dir,
    };

    if let Some(config) = file {
        settings.region = config.region.clone();
        settings.model_id = config.model_id.clone();
        settings.credentials = config.credentials.clone();
        if let Some(dir) = &config.data_dir {
            settings.data_dir = dir.clone();
        }
    }

    if let Some(region) = env(ENV_REGION).filter(|v| !v.is_empty()) {
        settings.region = region;
    }
    if let Some(model_id) = env(ENV_MODEL_ID).filter(|v| !v.is_empty()) {
        settings.model_id = model_id;
    }
    if let Some(dir) = env(ENV_DATA_DIR).filter(|v| !v.is_empty()) {
        settings.data_dir = PathBuf::from(dir);
    }

    if let Some(region) = &overrides.region {
        settings.region = region.clone();
    }
    if let Some(model_id) = &overrides.model_id {
        settings.model_id = model_id.clone();
    }
    if let Some(dir) = &overrides.data_dir {
        settings.data_dir = dir.clone();
    }

    settings
}

pub fn config_info(config: &AlibiConfig, settings: &Settings) -> ConfigInfo {
    let (credential_type, profile_name, access_key_hint) = match &config.credentials {
        CredentialSource::Inline {
            access_key_id,
            session_token,
            ..
        } => {
            let cred_type = if session_token.is_some() {
                "temporary".to_string()
            } else {
                "inline".to_string()
            };
            let hint = redact_access_key(access_key_id);
            (cred_type, None, Some(hint))
        }
        CredentialSource::Profile { profile_name } => {
            ("profile".to_string(), Some(profile_name.clone()), None)
        }
        CredentialSource::DefaultChain => ("default_chain".to_string(), None, None),
    };

    ConfigInfo {
        region: settings.region.clone(),
        model_id: settings.model_id.clone(),
        data_dir: settings.data_dir.display().to_string(),
        created_at: config.created_at.to_string(),
        credential_type,
        profile_name,
        access_key_hint,
    }
}

fn redact_access_key(key: &str) -> String {
    if key.len() <= 8 {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}
