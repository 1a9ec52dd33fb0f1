use crate::error::StoreError;
use crate::persistence::default_data_file;
use crate::ticker::tick_duration;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// Runtime settings, read from `LIF_*` environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Explicit data file (`LIF_DATA`); discovered when unset
    pub data_path: Option<PathBuf>,
    /// Tick cadence (`LIF_TICK_MS`)
    pub tick: Duration,
    /// Log verbosity (`LIF_LOG`)
    pub log_level: Level,
    /// Values that were ignored, reported once logging is up
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            tick: tick_duration(),
            log_level: Level::WARN,
            warnings: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; invalid values keep their default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("LIF_DATA").filter(|p| !p.trim().is_empty()) {
            config.data_path = Some(PathBuf::from(path.trim()));
        }

        if let Some(raw) = lookup("LIF_TICK_MS") {
            match raw.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => config.tick = Duration::from_millis(ms),
                _ => config
                    .warnings
                    .push(format!("ignoring LIF_TICK_MS={:?}, expected a positive integer", raw)),
            }
        }

        if let Some(raw) = lookup("LIF_LOG") {
            match raw.trim().parse::<Level>() {
                Ok(level) => config.log_level = level,
                Err(_) => config
                    .warnings
                    .push(format!("ignoring LIF_LOG={:?}, expected trace|debug|info|warn|error", raw)),
            }
        }

        config
    }

    /// Data file to use: `LIF_DATA` if set, otherwise the discovered default
    pub fn data_file(&self) -> Result<PathBuf, StoreError> {
        match &self.data_path {
            Some(path) => Ok(path.clone()),
            None => default_data_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticker::DEFAULT_TICK_MS;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, Config::default());
        assert_eq!(config.tick, Duration::from_secs(1));
        assert_eq!(config.log_level, Level::WARN);
    }

    #[test]
    fn test_values_are_read() {
        let config = config_from(&[
            ("LIF_DATA", "/tmp/lif.json"),
            ("LIF_TICK_MS", "250"),
            ("LIF_LOG", "debug"),
        ]);
        assert_eq!(config.data_path, Some(PathBuf::from("/tmp/lif.json")));
        assert_eq!(config.tick, Duration::from_millis(250));
        assert_eq!(config.log_level, Level::DEBUG);
        assert!(config.warnings.is_empty());
        assert_eq!(config.data_file().unwrap(), PathBuf::from("/tmp/lif.json"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("LIF_TICK_MS", "0"), ("LIF_LOG", "loud")]);
        assert_eq!(config.tick, Duration::from_millis(DEFAULT_TICK_MS));
        assert_eq!(config.log_level, Level::WARN);
        assert_eq!(config.warnings.len(), 2);
    }
}
