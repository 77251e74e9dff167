use baumkataster_core::remote::{RemoteEndpoint, DEFAULT_IMAGE_BUCKET};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Cloud backend connection. Leave `url` or `anon_key` unset for local-only mode.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteConfig {
    /// Project URL, e.g. "https://abcd.supabase.co"
    pub url: Option<String>,
    /// Public (anon) API key
    #[serde(skip_serializing)]
    pub anon_key: Option<String>,
    /// Storage bucket for tree photos (default: tree-images)
    pub image_bucket: Option<String>,
    /// Allow plain http:// URLs, for local development backends
    #[serde(default)]
    pub allow_insecure: bool,
}

impl RemoteConfig {
    pub fn endpoint(&self) -> RemoteEndpoint {
        RemoteEndpoint::new(
            self.url.clone().unwrap_or_default(),
            self.anon_key.clone().unwrap_or_default(),
        )
        .with_image_bucket(
            self.image_bucket
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_BUCKET.to_string()),
        )
        .allow_insecure(self.allow_insecure)
    }

    /// Returns true if the URL and key look usable.
    pub fn is_configured(&self) -> bool {
        self.endpoint().is_configured()
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory for snapshots and the saved login session
    pub data_dir: ConfigValue<PathBuf>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub remote: RemoteConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    remote: Option<RemoteConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut config_file = None;
        let mut remote = RemoteConfig::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(remote_config) = file_config.remote {
                remote = remote_config;
            }
        }

        if let Ok(dir) = std::env::var("BK_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("BK_REMOTE_URL") {
            remote.url = Some(url);
        }
        if let Ok(key) = std::env::var("BK_REMOTE_ANON_KEY") {
            remote.anon_key = Some(key);
        }

        Ok(Self {
            data_dir,
            config_file,
            remote,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/baumkataster/
    /// - macOS: ~/Library/Application Support/baumkataster/
    /// - Windows: %APPDATA%/baumkataster/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("baumkataster")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/baumkataster/
    /// - macOS: ~/Library/Application Support/baumkataster/
    /// - Windows: %APPDATA%/baumkataster/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("baumkataster")
    }

    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError(_, e) => Some(e),
            ConfigError::ParseError(_, e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert!(config
            .data_dir
            .value
            .to_string_lossy()
            .contains("baumkataster"));
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: /srv/baumkataster").unwrap();
        writeln!(file, "remote:").unwrap();
        writeln!(file, "  url: https://abcd.supabase.co").unwrap();
        writeln!(file, "  anon_key: {}", "k".repeat(60)).unwrap();
        writeln!(file, "  image_bucket: fotos").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/srv/baumkataster"));
        assert_eq!(config.data_dir.source, ConfigSource::File);
        assert_eq!(config.config_file, Some(config_path));
        assert!(config.remote.is_configured());
        assert_eq!(config.remote.endpoint().image_bucket, "fotos");
    }

    #[test]
    fn test_relative_data_dir_resolved_against_config_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "data_dir: data\n").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("data"));
    }

    #[test]
    fn test_short_key_is_not_configured() {
        let remote = RemoteConfig {
            url: Some("https://abcd.supabase.co".to_string()),
            anon_key: Some("placeholder".to_string()),
            ..Default::default()
        };
        assert!(!remote.is_configured());
        assert_eq!(remote.endpoint().image_bucket, DEFAULT_IMAGE_BUCKET);
    }

    #[test]
    fn test_http_url_needs_allow_insecure() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        let yaml = format!(
            "remote:\n  url: http://localhost:54321\n  anon_key: {}\n",
            "k".repeat(64)
        );
        std::fs::write(&config_path, &yaml).unwrap();
        assert!(!Config::load(Some(config_path.clone())).unwrap().remote.is_configured());

        std::fs::write(&config_path, format!("{}  allow_insecure: true\n", yaml)).unwrap();
        let config = Config::load(Some(config_path)).unwrap();
        assert!(config.remote.allow_insecure);
        assert!(config.remote.is_configured());
    }

    #[test]
    fn test_anon_key_not_serialized() {
        let remote = RemoteConfig {
            anon_key: Some("secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&remote).unwrap();
        assert!(!json.contains("secret"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "data_dir: /from/file\n").unwrap();

        std::env::set_var("BK_DATA_DIR", "/from/env");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, PathBuf::from("/from/env"));
        assert_eq!(config.data_dir.source, ConfigSource::Environment);

        std::env::remove_var("BK_DATA_DIR");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
