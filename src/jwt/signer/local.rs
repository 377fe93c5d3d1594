use jsonwebtoken::{Algorithm, EncodingKey, Header};
use thiserror::Error;

use crate::jwt::{claims::Claims, error::JwtEncoderError, signed::SignedJwt};

use super::JwtSigner;

/// Errors that can occur when creating a LocalPrivateKeySigner.
#[derive(Debug, Error)]
pub enum LocalPrivateKeySignerError {
    #[error("unable to load private key: `{0}`")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// Signs JWTs with the private key embedded in a service account credential.
pub struct LocalPrivateKeySigner {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
}

/// Attempt to create a LocalPrivateKeySigner from PEM contents (PKCS#1 or PKCS#8).
impl TryFrom<&[u8]> for LocalPrivateKeySigner {
    type Error = LocalPrivateKeySignerError;

    fn try_from(pem: &[u8]) -> Result<Self, Self::Error> {
        // Firebase only accepts RS256 custom tokens.
        Ok(Self {
            encoding_key: EncodingKey::from_rsa_pem(pem)?,
            algorithm: Algorithm::RS256,
        })
    }
}

impl TryFrom<&str> for LocalPrivateKeySigner {
    type Error = LocalPrivateKeySignerError;

    fn try_from(pem: &str) -> Result<Self, Self::Error> {
        Self::try_from(pem.as_bytes())
    }
}

impl JwtSigner for LocalPrivateKeySigner {
    fn sign(&self, claims: Claims) -> Result<SignedJwt, JwtEncoderError> {
        let value = jsonwebtoken::encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| JwtEncoderError::TokenEncoding(e.to_string()))?;
        Ok(SignedJwt { value })
    }
}
