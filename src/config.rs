//! Optional user settings loaded from a JSON config file.
//!
//! CLI flags always win over settings, settings win over built-in
//! defaults. A missing or unreadable config file is not an error; callers
//! fall back with `Settings::load().unwrap_or_default()`.
use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User defaults for the downloader.
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Default number of concurrent range requests.
    pub threads: Option<u8>,
    /// Default directory to save downloads in.
    pub default_dir: Option<String>,
}

impl Settings {
    /// Loads settings from `$SGET_CONFIG`, or from
    /// `~/.config/sget/config.json` when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if no config path can be determined, the file
    /// cannot be read, or the JSON does not parse.
    pub fn load() -> Result<Self> {
        let path = config_path().ok_or_else(|| anyhow!("no config path available"))?;
        let json = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("SGET_CONFIG") {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME")
        .map(|home| Path::new(&home).join(".config").join("sget").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_parse_full() {
        let settings: Settings =
            serde_json::from_str(r#"{"threads": 8, "default_dir": "/tmp/downloads"}"#).unwrap();
        assert_eq!(settings.threads, Some(8));
        assert_eq!(settings.default_dir.as_deref(), Some("/tmp/downloads"));
    }

    #[test]
    fn test_settings_parse_partial_and_empty() {
        let settings: Settings = serde_json::from_str(r#"{"threads": 2}"#).unwrap();
        assert_eq!(settings.threads, Some(2));
        assert!(settings.default_dir.is_none());

        let empty: Settings = serde_json::from_str("{}").unwrap();
        assert!(empty.threads.is_none());
    }
}
