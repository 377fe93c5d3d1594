use std::fmt;

use serde::{Deserialize, Serialize};

use crate::jwt::signed::SignedJwt;

pub type IdToken = String;
pub type RefreshToken = String;

/// A signed Firebase custom token. Consumed once by the verify call.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomToken(String);

impl CustomToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<SignedJwt> for CustomToken {
    fn from(signed: SignedJwt) -> Self {
        Self(signed.value)
    }
}

impl From<&str> for CustomToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CustomToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body returned by `verifyCustomToken`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    id_token: IdToken,
    #[serde(default)]
    refresh_token: RefreshToken,
    /// Lifetime of the ID token in seconds, as a decimal string.
    #[serde(default)]
    expires_in: String,
}

impl VerifyResponse {
    pub fn new(id_token: IdToken, refresh_token: RefreshToken, expires_in: String) -> Self {
        Self {
            id_token,
            refresh_token,
            expires_in,
        }
    }

    pub fn id_token(&self) -> &IdToken {
        &self.id_token
    }

    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    pub fn expires_in(&self) -> &str {
        &self.expires_in
    }
}
