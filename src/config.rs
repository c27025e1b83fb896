use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    database: String,
    #[serde(default)]
    log_level: Option<String>,
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: path.clone(),
            source,
        })?;
        Ok(config)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|path| path.join("showbill").join("config.toml"))
    }

    /// Load config from the platform config directory
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path().ok_or(Error::ConfigLocation)?;

        Self::from_file(&config_path)
    }

    /// Expand ~ to home directory
    fn expand_path(&self, path: &str) -> PathBuf {
        if path.starts_with("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(&path[2..]);
            }
        }
        PathBuf::from(path)
    }

    /// Get expanded database path
    pub fn database_path(&self) -> PathBuf {
        self.expand_path(&self.database)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database = \"~/showbill/showbill.db\"").unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();

        let config = Config::from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert!(config.database_path().ends_with("showbill/showbill.db"));
    }

    #[test]
    fn log_level_defaults_to_info() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database = \"/tmp/showbill.db\"").unwrap();

        let config = Config::from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Config::from_file(&PathBuf::from("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }
}
