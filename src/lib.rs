pub mod app;
pub mod auth_client;
pub mod commands;
pub mod config;
pub mod credential;
pub mod exchanger;
pub mod http;
pub mod http_client;
pub mod jwt;
pub mod parameters;
pub mod token;

use thiserror::Error;

/// Every way a `getjwt` run can fail. Each stage of the pipeline contributes one variant and
/// none of them is recovered: the binary logs the error and exits.
#[derive(Error, Debug)]
pub enum GetJwtError {
    #[error("resolving configuration: `{0}`")]
    Config(#[from] config::ConfigError),
    #[error("initializing firebase app: `{0}`")]
    Credential(#[from] credential::CredentialError),
    #[error("minting custom token: `{0}`")]
    Mint(#[from] auth_client::MintError),
    #[error("verifying custom token: `{0}`")]
    Exchange(#[from] exchanger::ExchangeError),
    #[error("writing token: `{0}`")]
    Output(#[from] std::io::Error),
}
