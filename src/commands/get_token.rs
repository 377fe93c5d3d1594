use std::io::{self, Write};

use tracing::debug;

use crate::GetJwtError;
use crate::app::FirebaseApp;
use crate::auth_client::TokenMinter;
use crate::config::Config;
use crate::exchanger::{ExchangeError, Exchanger, HttpExchanger};
use crate::http::client::HttpClient;
use crate::parameters::{Cli, OutPutTokenFormat};
use crate::token::VerifyResponse;

/// Mints a custom token for the configured user and exchanges it for an ID token.
pub struct GetTokenCommand<M, E>
where
    M: TokenMinter,
    E: Exchanger,
{
    minter: M,
    exchanger: E,
}

impl<M, E> GetTokenCommand<M, E>
where
    M: TokenMinter,
    E: Exchanger,
{
    pub fn new(minter: M, exchanger: E) -> Self {
        Self { minter, exchanger }
    }

    pub fn get_token(&self, config: &Config) -> Result<VerifyResponse, GetJwtError> {
        let custom_token = self.minter.custom_token(&config.user_id)?;
        debug!("exchanging custom token for an ID token");
        let response = self.exchanger.exchange(&config.web_api_key, &custom_token)?;
        Ok(response)
    }
}

/// Runs the whole pipeline for a parsed command line and writes the result to `out`.
///
/// Nothing is written unless every stage succeeds.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<(), GetJwtError> {
    let config = cli.config()?;
    let endpoint = cli.verify_endpoint()?;
    debug!(user_id = %config.user_id, "configuration resolved");

    let app = FirebaseApp::from_credential_file(&config.credential_path)?;
    let auth_client = app.auth()?;

    let http_client = HttpClient::new().map_err(ExchangeError::from)?;
    let exchanger = HttpExchanger::new(http_client, endpoint);

    let response = GetTokenCommand::new(auth_client, exchanger).get_token(&config)?;

    match cli.output_token_format {
        OutPutTokenFormat::Plain => out.write_all(response.id_token().as_bytes())?,
        OutPutTokenFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &response).map_err(io::Error::from)?
        }
    }
    out.flush()?;

    Ok(())
}
