// Client configuration: where the backend lives and how long to wait for it.
// Values come from built-in defaults, an optional JSON file in the user's
// home directory, and environment variables, in increasing precedence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const URL_VAR: &str = "KISAN_API_URL";
const TIMEOUT_VAR: &str = "KISAN_TIMEOUT_SECS";

/// Settings the `ApiClient` is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` means requests may wait forever.
    pub timeout: Option<Duration>,
}

/// On-disk shape of `~/.kisan/config.json`. Every field is optional.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: timeout_from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            ..ClientConfig::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load configuration the way the binary does at startup: the config
    /// file (if present) then `KISAN_API_URL` / `KISAN_TIMEOUT_SECS`.
    pub fn load() -> Result<Self> {
        let file = match default_config_path() {
            Some(path) => load_file(&path)?,
            None => FileConfig::default(),
        };
        resolve(
            file,
            std::env::var(URL_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
        )
    }
}

/// `~/.kisan/config.json`, if a home directory can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kisan").join("config.json"))
}

/// Read a config file. A missing file yields the empty config; anything
/// unreadable or malformed is an error.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(FileConfig::default()),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file {}", path.display()))
        }
    };
    serde_json::from_str(&data)
        .with_context(|| format!("Parsing config file {}", path.display()))
}

/// Merge file values with environment overrides on top of the defaults.
pub fn resolve(
    file: FileConfig,
    env_url: Option<String>,
    env_timeout: Option<String>,
) -> Result<ClientConfig> {
    let mut cfg = ClientConfig::default();

    if let Some(url) = non_blank(file.base_url) {
        cfg.base_url = url;
    }
    if let Some(secs) = file.timeout_secs {
        cfg.timeout = timeout_from_secs(secs);
    }

    if let Some(url) = non_blank(env_url) {
        cfg.base_url = url;
    }
    if let Some(raw) = env_timeout {
        let secs: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("{} must be a whole number of seconds, got {:?}", TIMEOUT_VAR, raw))?;
        cfg.timeout = timeout_from_secs(secs);
    }

    Ok(cfg)
}

fn non_blank(url: Option<String>) -> Option<String> {
    url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty())
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    if secs == 0 {
        None
    } else {
        Some(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = resolve(FileConfig::default(), None, None).unwrap();
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));
    }

    #[test]
    fn env_overrides_file() {
        let file = FileConfig {
            base_url: Some("http://10.0.0.5:8000".into()),
            timeout_secs: Some(5),
        };
        let cfg = resolve(file, Some("http://172.20.10.9:8000".into()), Some("12".into())).unwrap();
        assert_eq!(cfg.base_url, "http://172.20.10.9:8000");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(12)));
    }

    #[test]
    fn file_values_apply_without_env() {
        let file = FileConfig {
            base_url: Some("http://10.0.0.5:8000".into()),
            timeout_secs: None,
        };
        let cfg = resolve(file, None, None).unwrap();
        assert_eq!(cfg.base_url, "http://10.0.0.5:8000");
        assert_eq!(cfg.timeout, Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)));
    }

    #[test]
    fn zero_timeout_disables_it() {
        let cfg = resolve(FileConfig::default(), None, Some("0".into())).unwrap();
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn blank_env_url_is_ignored() {
        let cfg = resolve(FileConfig::default(), Some("  ".into()), None).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let err = resolve(FileConfig::default(), None, Some("soon".into())).unwrap_err();
        assert!(err.to_string().contains(TIMEOUT_VAR));
    }

    #[test]
    fn file_url_is_trimmed() {
        let file = FileConfig {
            base_url: Some("  http://127.0.0.1:8000  ".into()),
            timeout_secs: None,
        };
        let cfg = resolve(file, None, None).unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn blank_file_url_falls_back_to_default() {
        let file = FileConfig {
            base_url: Some("   ".into()),
            timeout_secs: None,
        };
        let cfg = resolve(file, None, None).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        assert_eq!(load_file(&path).unwrap(), FileConfig::default());
    }

    #[test]
    fn unreadable_path_is_an_error() {
        // A directory where the file should be: exists, but can't be read as text.
        let dir = tempfile::tempdir().unwrap();
        assert!(load_file(dir.path()).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("Parsing config file"));
    }

    #[test]
    fn well_formed_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"base_url":"http://192.168.1.4:8000","timeout_secs":3}"#).unwrap();
        let file = load_file(&path).unwrap();
        assert_eq!(file.base_url.as_deref(), Some("http://192.168.1.4:8000"));
        assert_eq!(file.timeout_secs, Some(3));
    }
}
