use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Neither a config file nor exactly three positional arguments were given.
    #[error("expected 3 positional arguments, got {0}")]
    WrongArgumentCount(usize),
    #[error("failed to read config file `{0}`: `{1}`")]
    Read(PathBuf, io::Error),
    #[error("failed to parse config file `{0}`: `{1}`")]
    Parse(PathBuf, serde_yaml::Error),
    #[error("`{0}` must not be empty")]
    EmptyField(&'static str),
    #[error("invalid verify endpoint `{0}`: `{1}`")]
    InvalidEndpoint(String, String),
}

/// The three values a run needs. Field names in the YAML file are `apiKey`, `userId` and
/// `googleCreds`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// Firebase web API key, sent as the `key` query parameter of the verify call.
    #[serde(rename = "apiKey")]
    pub web_api_key: String,
    /// Firebase user the custom token is minted for.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Path to the service account JSON key.
    #[serde(rename = "googleCreds")]
    pub credential_path: PathBuf,
}

impl Config {
    pub fn new(
        web_api_key: String,
        user_id: String,
        credential_path: PathBuf,
    ) -> Result<Self, ConfigError> {
        Self {
            web_api_key,
            user_id,
            credential_path,
        }
        .validated()
    }

    /// Reads and parses a YAML config file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.web_api_key.is_empty() {
            return Err(ConfigError::EmptyField("apiKey"));
        }
        if self.user_id.is_empty() {
            return Err(ConfigError::EmptyField("userId"));
        }
        if self.credential_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyField("googleCreds"));
        }
        Ok(self)
    }
}
