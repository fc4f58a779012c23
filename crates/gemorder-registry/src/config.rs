use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use gemorder_util::errors::{GemorderError, GemorderResult};

/// User configuration loaded from `~/.gemorder/config.toml`.
///
/// Every field has a default, so a missing file or any subset of keys is
/// fine. CLI flags override whatever is loaded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Program name or path of the `gem` executable.
    #[serde(default = "default_gem_bin", rename = "gem-bin")]
    pub gem_bin: String,

    /// Directory holding `gem-fetch-<name>` probe artifacts.
    #[serde(default = "default_probe_cache_dir", rename = "probe-cache-dir")]
    pub probe_cache_dir: PathBuf,

    /// Skip dependencies declared for development only.
    #[serde(default = "default_runtime_deps_only", rename = "runtime-deps-only")]
    pub runtime_deps_only: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            gem_bin: default_gem_bin(),
            probe_cache_dir: default_probe_cache_dir(),
            runtime_deps_only: default_runtime_deps_only(),
        }
    }
}

fn default_gem_bin() -> String {
    "gem".to_string()
}

fn default_probe_cache_dir() -> PathBuf {
    std::env::temp_dir().join("gemorder-probe")
}

fn default_runtime_deps_only() -> bool {
    true
}

impl RegistryConfig {
    /// Load the user configuration, falling back to defaults when no
    /// config file exists.
    pub fn load() -> GemorderResult<Self> {
        match config_path() {
            Some(path) if path.is_file() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_path(path: &Path) -> GemorderResult<Self> {
        let text = std::fs::read_to_string(path).map_err(GemorderError::Io)?;
        Self::parse_toml(&text)
    }

    pub fn parse_toml(text: &str) -> GemorderResult<Self> {
        toml::from_str(text).map_err(|e| {
            GemorderError::Config {
                message: e.to_string(),
            }
            .into()
        })
    }
}

fn config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".gemorder").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.gem_bin, "gem");
        assert!(config.runtime_deps_only);
        assert!(config.probe_cache_dir.ends_with("gemorder-probe"));
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = RegistryConfig::parse_toml(r#"gem-bin = "/opt/ruby/bin/gem""#).unwrap();
        assert_eq!(config.gem_bin, "/opt/ruby/bin/gem");
        assert!(config.runtime_deps_only);
    }

    #[test]
    fn full_config_parses() {
        let config = RegistryConfig::parse_toml(
            r#"
gem-bin = "gem3.1"
probe-cache-dir = "/var/cache/gemorder"
runtime-deps-only = false
"#,
        )
        .unwrap();
        assert_eq!(config.gem_bin, "gem3.1");
        assert_eq!(config.probe_cache_dir, PathBuf::from("/var/cache/gemorder"));
        assert!(!config.runtime_deps_only);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = RegistryConfig::parse_toml("gem-bin = [").unwrap_err();
        assert!(err.to_string().contains("Config error"));
    }
}
