use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use kiosque_questionnaire::Coordinates;
use kiosque_triage::DEFAULT_API_URL;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 2;

/// Overrides `api_url` when set, for staging backends.
pub const API_URL_ENV: &str = "KIOSQUE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KiosqueConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub robot_id: String,
    /// Pre-filled on the login screen.
    #[serde(default)]
    pub health_center: String,
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub auto_advance_ms: u64,
    pub location_timeout_secs: u64,
    /// Position reported for location questions. Added in v2; kiosks
    /// without a configured position skip the capture.
    #[serde(default)]
    pub fixed_location: Option<Coordinates>,
    pub created_at: jiff::Timestamp,
}

impl Default for KiosqueConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            robot_id: "KIOSK-CI-001".to_string(),
            health_center: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 30,
            auto_advance_ms: 300,
            location_timeout_secs: 15,
            fixed_location: None,
            created_at: jiff::Timestamp::now(),
        }
    }
}

impl KiosqueConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn auto_advance_delay(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_secs(self.location_timeout_secs)
    }

    /// Apply an API URL override, ignoring blank values.
    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            tracing::info!(api_url = %url, "using API URL from environment");
            self.api_url = url.trim().to_string();
        }
        self
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("kiosque"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Where HTML reports are archived.
pub fn reports_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("kiosque").join("reports"))
}

/// Load the config, writing defaults on first start, then apply the
/// environment override.
pub fn load_or_init() -> eyre::Result<KiosqueConfig> {
    let path = config_path()?;
    let config = if path.exists() {
        load_config_from(&path)?
    } else {
        let config = KiosqueConfig::default();
        save_config_to(&config, &path)?;
        config
    };
    Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
}

pub fn load_config_from(path: &Path) -> eyre::Result<KiosqueConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: KiosqueConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to the current version.
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update the kiosk."
        ));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

    // v0 → v1: timings became configurable; `backend_url` renamed to `api_url`
    if from_version < 1 {
        if let Some(url) = obj.remove("backend_url") {
            obj.entry("api_url").or_insert(url);
        }
        obj.entry("api_url")
            .or_insert(serde_json::Value::String(DEFAULT_API_URL.to_string()));
        obj.entry("request_timeout_secs").or_insert(30.into());
        obj.entry("auto_advance_ms").or_insert(300.into());
        obj.entry("location_timeout_secs").or_insert(15.into());
        obj.entry("created_at")
            .or_insert(serde_json::Value::String(jiff::Timestamp::now().to_string()));
        tracing::info!("migrated config v0 → v1 (added timings)");
    }

    // v1 → v2: optional fixed kiosk position
    if from_version < 2 {
        obj.entry("fixed_location").or_insert(serde_json::Value::Null);
        tracing::info!("migrated config v1 → v2 (added fixed_location)");
    }

    obj.insert(
        "config_version".to_string(),
        serde_json::Value::Number(CURRENT_VERSION.into()),
    );
    Ok(json)
}

pub fn save_config_to(config: &KiosqueConfig, path: &Path) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path has no parent: {}", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
