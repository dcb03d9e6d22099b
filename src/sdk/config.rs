use std::collections::HashMap;
use std::env;
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const API_KEY_ENV: &str = "CARELAND_AK";
pub const DEFAULT_BASE_URL: &str = "https://api.careland.com.cn";
pub const DEFAULT_PORT: u16 = 9999;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Missing required key \"{0}\" (set it in the config file or via CARELAND_AK)")]
    MissingKey(&'static str),

    #[error("Invalid value \"{value}\" for key \"{key}\"")]
    InvalidValue { key: &'static str, value: String },
}

/// Process configuration, built once at start-up and passed to whatever
/// needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    pub api_key: String,
    pub host: String,
    pub port: u16,
    pub base_url: String,
    /// Route preference flag sent with every route plan request.
    pub plan: u32,
    pub timeout: Option<Duration>,
    pub requests_per_minute: Option<NonZeroU32>,
    pub log_file: PathBuf,
    pub workers: Option<usize>,
}

impl BridgeConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_entries(&parse_key_values(&data), env::var(API_KEY_ENV).ok())
    }

    /// Builds a config from parsed `key=value` entries. `env_api_key` is used
    /// only when the entries carry no `ak`.
    pub fn from_entries(
        entries: &HashMap<String, String>,
        env_api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = entries
            .get("ak")
            .cloned()
            .or(env_api_key.filter(|k| !k.trim().is_empty()))
            .ok_or(ConfigError::MissingKey("ak"))?;

        Ok(Self {
            api_key,
            host: entries
                .get("host")
                .cloned()
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_value(entries, "port")?.unwrap_or(DEFAULT_PORT),
            base_url: entries
                .get("base_url")
                .cloned()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            plan: parse_value(entries, "plan")?.unwrap_or(1),
            timeout: parse_value::<u64>(entries, "timeout_secs")?.map(Duration::from_secs),
            requests_per_minute: parse_value(entries, "requests_per_minute")?,
            log_file: entries
                .get("log_file")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("maplog.txt")),
            workers: parse_value(entries, "workers")?,
        })
    }
}

/// Reads flat `key=value` lines. Lines without `=`, or with an empty key or
/// value after trimming, are ignored; a later duplicate replaces an earlier one.
pub fn parse_key_values(data: &str) -> HashMap<String, String> {
    data.lines()
        .filter_map(|line| {
            let (key, value) = line.trim().split_once('=')?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

fn parse_value<T: FromStr>(
    entries: &HashMap<String, String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    entries
        .get(key)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn malformed_lines_are_ignored() {
        let entries = parse_key_values("ak = abc123\n# comment\nport=\n=8080\n  plan=2  \nnot a pair\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["ak"], "abc123");
        assert_eq!(entries["plan"], "2");
    }

    #[test]
    fn value_may_contain_equals() {
        let entries = parse_key_values("base_url=http://localhost:8080/?a=b");
        assert_eq!(entries["base_url"], "http://localhost:8080/?a=b");
    }

    #[test]
    fn later_duplicates_win() {
        let entries = parse_key_values("port=1\nport=2");
        assert_eq!(entries["port"], "2");
    }

    #[test]
    fn defaults_fill_optional_keys() {
        let entries = parse_key_values("ak=secret");
        let config = BridgeConfig::from_entries(&entries, None).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.plan, 1);
        assert_eq!(config.timeout, None);
        assert_eq!(config.requests_per_minute, None);
        assert_eq!(config.log_file, PathBuf::from("maplog.txt"));
    }

    #[test]
    fn api_key_falls_back_to_environment_value() {
        let config = BridgeConfig::from_entries(&HashMap::new(), Some("from-env".to_string())).unwrap();
        assert_eq!(config.api_key, "from-env");

        let entries = parse_key_values("ak=from-file");
        let config = BridgeConfig::from_entries(&entries, Some("from-env".to_string())).unwrap();
        assert_eq!(config.api_key, "from-file");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = BridgeConfig::from_entries(&HashMap::new(), None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey("ak")));
    }

    #[test]
    fn unparseable_number_names_the_key() {
        let entries = parse_key_values("ak=x\nport=ninety");
        let err = BridgeConfig::from_entries(&entries, None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "port", .. }));

        let entries = parse_key_values("ak=x\nrequests_per_minute=0");
        assert!(BridgeConfig::from_entries(&entries, None).is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ak=filekey").unwrap();
        writeln!(file, "port=8081").unwrap();
        writeln!(file, "timeout_secs=20").unwrap();
        writeln!(file, "requests_per_minute=120").unwrap();

        let config = BridgeConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "filekey");
        assert_eq!(config.port, 8081);
        assert_eq!(config.timeout, Some(Duration::from_secs(20)));
        assert_eq!(config.requests_per_minute, NonZeroU32::new(120));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BridgeConfig::load_from_file(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
