use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub(crate) const SERVICE_ACCOUNT_TYPE: &str = "service_account";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("failed to read credential file `{0}`: `{1}`")]
    Read(PathBuf, io::Error),
    #[error("failed to parse credential file `{0}`: `{1}`")]
    Parse(PathBuf, serde_json::Error),
}

/// A Google service account key as downloaded from the cloud console.
///
/// Everything is optional at parse time; the auth client decides what it needs.
#[derive(Clone, Default, PartialEq, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    /// PEM-encoded RSA private key.
    pub private_key: Option<String>,
    pub client_email: Option<String>,
    pub client_id: Option<String>,
    pub token_uri: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, CredentialError> {
        let contents = fs::read(path).map_err(|e| CredentialError::Read(path.to_path_buf(), e))?;
        serde_json::from_slice(&contents).map_err(|e| CredentialError::Parse(path.to_path_buf(), e))
    }

    pub fn is_service_account(&self) -> bool {
        self.key_type.as_deref() == Some(SERVICE_ACCOUNT_TYPE)
    }
}

// Keep the private key out of logs.
impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("key_type", &self.key_type)
            .field("project_id", &self.project_id)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("client_email", &self.client_email)
            .field("client_id", &self.client_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}
