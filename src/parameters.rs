use clap::{Parser, ValueEnum};
use http::Uri;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigError};
use crate::exchanger::DEFAULT_VERIFY_ENDPOINT;

pub const USAGE: &str = "\
Usage: getjwt -f <PATH_TO_CONFIG_YAML>
Alternate Usage: getjwt <FIREBASE_WEB_API_KEY> <FIREBASE_USER_ID> <PATH_TO_GOOGLE_JSON>
Prerequisites:
 - Firebase Auth enabled
 - IAM API enabled
 - Sufficient permission for service account";

#[derive(Parser, Debug)]
#[command(
    name = "getjwt",
    version,
    about = "Mints a Firebase custom token for a user and prints the ID token it exchanges for",
    after_help = USAGE
)]
pub struct Cli {
    /// Path to YAML config file with `apiKey`, `userId` and `googleCreds`
    #[arg(short = 'f', long = "config-file", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// <FIREBASE_WEB_API_KEY> <FIREBASE_USER_ID> <PATH_TO_GOOGLE_JSON>, used when no config file
    /// is given
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,

    /// Select format how the token should be printed
    #[arg(long, value_enum, default_value_t = OutPutTokenFormat::Plain)]
    pub output_token_format: OutPutTokenFormat,

    /// Custom verifyCustomToken endpoint, e.g. for the auth emulator
    #[arg(long, value_name = "URL")]
    pub verify_endpoint: Option<String>,

    /// Log every stage to stderr
    #[arg(long)]
    pub debug: bool,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutPutTokenFormat {
    /// Returns only the ID token
    #[value(name = "Plain")]
    Plain,
    /// Returns the whole verify response (ID token, refresh token, expiration) in json format
    #[value(name = "Json")]
    Json,
}

impl Cli {
    pub fn config(&self) -> Result<Config, ConfigError> {
        resolve_config(self.config_file.as_deref(), &self.args)
    }

    pub fn verify_endpoint(&self) -> Result<Uri, ConfigError> {
        let endpoint = self
            .verify_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_VERIFY_ENDPOINT);
        endpoint
            .parse::<Uri>()
            .map_err(|e| ConfigError::InvalidEndpoint(endpoint.to_string(), e.to_string()))
    }
}

/// Builds the configuration from a YAML file when one is given, otherwise from exactly three
/// positional arguments. An empty file path counts as no file.
pub fn resolve_config(
    config_file: Option<&Path>,
    positional: &[String],
) -> Result<Config, ConfigError> {
    if let Some(path) = config_file.filter(|p| !p.as_os_str().is_empty()) {
        return Config::from_yaml_file(path);
    }

    match positional {
        [web_api_key, user_id, credential_path] => Config::new(
            web_api_key.to_owned(),
            user_id.to_owned(),
            PathBuf::from(credential_path),
        ),
        other => Err(ConfigError::WrongArgumentCount(other.len())),
    }
}
