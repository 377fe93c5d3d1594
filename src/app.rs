use std::path::Path;

use tracing::debug;

use crate::auth_client::{AuthClient, MintError};
use crate::credential::{CredentialError, ServiceAccountKey};
use crate::jwt::signer::local::LocalPrivateKeySigner;

/// Handle to a Firebase project, authenticated with a service account key.
#[derive(Debug, Clone)]
pub struct FirebaseApp {
    key: ServiceAccountKey,
}

impl FirebaseApp {
    pub fn new(key: ServiceAccountKey) -> Self {
        Self { key }
    }

    /// Initializes the app from a service account JSON file.
    pub fn from_credential_file(path: &Path) -> Result<Self, CredentialError> {
        let key = ServiceAccountKey::from_file(path)?;
        debug!(
            project_id = key.project_id.as_deref().unwrap_or_default(),
            "firebase app initialized"
        );
        Ok(Self::new(key))
    }

    pub fn project_id(&self) -> Option<&str> {
        self.key.project_id.as_deref()
    }

    /// Returns the auth client, which signs custom tokens with the service account private key.
    pub fn auth(&self) -> Result<AuthClient<LocalPrivateKeySigner>, MintError> {
        if !self.key.is_service_account() {
            return Err(MintError::NotServiceAccount(
                self.key.key_type.clone().unwrap_or_default(),
            ));
        }
        let client_email = self
            .key
            .client_email
            .as_ref()
            .filter(|email| !email.is_empty())
            .ok_or(MintError::MissingField("client_email"))?;
        let private_key = self
            .key
            .private_key
            .as_ref()
            .ok_or(MintError::MissingField("private_key"))?;

        let signer = LocalPrivateKeySigner::try_from(private_key.as_str())?;

        Ok(AuthClient::new(client_email.to_owned(), signer))
    }
}
