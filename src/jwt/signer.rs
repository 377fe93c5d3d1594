use super::{claims::Claims, error::JwtEncoderError, signed::SignedJwt};

pub mod local;

/// A JWT signer.
#[cfg_attr(test, mockall::automock)]
pub trait JwtSigner {
    fn sign(&self, claims: Claims) -> Result<SignedJwt, JwtEncoderError>;
}
