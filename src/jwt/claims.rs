use serde::{Deserialize, Serialize};

/// Audience every Firebase custom token must carry.
pub const FIREBASE_AUDIENCE: &str =
    "https://identitytoolkit.googleapis.com/google.identity.identitytoolkit.v1.IdentityToolkit";

/// Claims of a Firebase custom token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Issuer. The service account email.
    pub(crate) iss: String,
    /// Subject. The service account email as well.
    pub(crate) sub: String,
    /// Audience. Always [`FIREBASE_AUDIENCE`].
    pub(crate) aud: String,
    /// Issued at (as UTC timestamp).
    pub(crate) iat: u64,
    /// Expiration time (as UTC timestamp). At most one hour after `iat`.
    pub(crate) exp: u64,
    /// The Firebase user the token signs in as.
    pub(crate) uid: String,
}

impl Claims {
    pub fn new(service_account_email: String, uid: String, iat: u64, exp: u64) -> Self {
        Self {
            iss: service_account_email.clone(),
            sub: service_account_email,
            aud: FIREBASE_AUDIENCE.to_string(),
            iat,
            exp,
            uid,
        }
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }
}
