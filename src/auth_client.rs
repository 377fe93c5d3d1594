use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;
use tracing::debug;

use crate::jwt::claims::Claims;
use crate::jwt::error::JwtEncoderError;
use crate::jwt::signer::JwtSigner;
use crate::jwt::signer::local::LocalPrivateKeySignerError;
use crate::token::CustomToken;

/// Firebase rejects custom tokens living longer than one hour.
pub(crate) const CUSTOM_TOKEN_LIFETIME: TimeDelta = TimeDelta::hours(1);
const MAX_UID_LENGTH: usize = 128;

#[derive(Error, Debug)]
pub enum MintError {
    #[error("credential type `{0}` cannot sign custom tokens, a service account is required")]
    NotServiceAccount(String),
    #[error("service account key has no `{0}`")]
    MissingField(&'static str),
    #[error("building token signer: `{0}`")]
    Signer(#[from] LocalPrivateKeySignerError),
    #[error("uid must be non-empty, and not longer than 128 characters")]
    InvalidUid,
    #[error("converting token timestamps")]
    Timestamp,
    #[error("signing custom token: `{0}`")]
    Signing(#[from] JwtEncoderError),
}

/// Mints custom tokens for Firebase users.
#[cfg_attr(test, mockall::automock)]
pub trait TokenMinter {
    fn custom_token(&self, uid: &str) -> Result<CustomToken, MintError>;
}

/// The auth sub-client of a [`crate::app::FirebaseApp`].
pub struct AuthClient<J>
where
    J: JwtSigner,
{
    service_account_email: String,
    signer: J,
}

impl<J> AuthClient<J>
where
    J: JwtSigner,
{
    pub fn new(service_account_email: String, signer: J) -> Self {
        Self {
            service_account_email,
            signer,
        }
    }

    pub fn service_account_email(&self) -> &str {
        &self.service_account_email
    }
}

impl<J> TokenMinter for AuthClient<J>
where
    J: JwtSigner,
{
    fn custom_token(&self, uid: &str) -> Result<CustomToken, MintError> {
        if uid.is_empty() || uid.len() > MAX_UID_LENGTH {
            return Err(MintError::InvalidUid);
        }

        let issued_at = Utc::now();
        let expires_at = issued_at + CUSTOM_TOKEN_LIFETIME;

        let claims = Claims::new(
            self.service_account_email.to_owned(),
            uid.to_owned(),
            timestamp(issued_at)?,
            timestamp(expires_at)?,
        );

        let signed_jwt = self.signer.sign(claims)?;
        debug!(uid, "custom token minted");

        Ok(signed_jwt.into())
    }
}

fn timestamp(at: DateTime<Utc>) -> Result<u64, MintError> {
    at.timestamp().try_into().map_err(|_| MintError::Timestamp)
}
