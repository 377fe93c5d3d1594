use http::header::CONTENT_TYPE;
use http::{Method, Request, Uri};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::http::client::HttpBuildError;
use crate::http_client::{HttpClient, HttpClientError};
use crate::token::{CustomToken, VerifyResponse};

pub const DEFAULT_VERIFY_ENDPOINT: &str =
    "https://www.googleapis.com/identitytoolkit/v3/relyingparty/verifyCustomToken";

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("building http client: `{0}`")]
    Client(#[from] HttpBuildError),
    #[error("building request: `{0}`")]
    Request(String),
    #[error("sending request: `{0}`")]
    Transport(String),
    #[error("reading response: `{0}`")]
    ReadBody(String),
    #[error("identity toolkit error: Status code: `{0}`, Body: `{1}`")]
    Response(u16, String),
    #[error("decoding response: `{0}`")]
    Decode(String),
}

impl From<HttpClientError> for ExchangeError {
    fn from(err: HttpClientError) -> Self {
        match err {
            HttpClientError::TransportError(msg) => ExchangeError::Transport(msg),
            HttpClientError::InvalidResponse(msg) => ExchangeError::ReadBody(msg),
        }
    }
}

/// Trades a custom token for an ID token.
#[cfg_attr(test, mockall::automock)]
pub trait Exchanger {
    fn exchange(
        &self,
        web_api_key: &str,
        custom_token: &CustomToken,
    ) -> Result<VerifyResponse, ExchangeError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyCustomTokenRequest<'a> {
    token: &'a str,
    return_secure_token: bool,
}

/// Calls the identity toolkit `verifyCustomToken` endpoint.
pub struct HttpExchanger<C> {
    http_client: C,
    endpoint: Uri,
}

impl<C> HttpExchanger<C> {
    pub fn new(http_client: C, endpoint: Uri) -> Self {
        Self {
            http_client,
            endpoint,
        }
    }

    fn build_request(
        &self,
        web_api_key: &str,
        custom_token: &CustomToken,
    ) -> Result<Request<Vec<u8>>, ExchangeError> {
        let body = serde_json::to_vec(&VerifyCustomTokenRequest {
            token: custom_token.as_str(),
            return_secure_token: true,
        })
        .map_err(|e| ExchangeError::Request(format!("encoding body: {e}")))?;

        let separator = if self.endpoint.query().is_some() { '&' } else { '?' };
        let uri = Uri::try_from(format!("{}{separator}key={web_api_key}", self.endpoint))
            .map_err(|e| ExchangeError::Request(format!("invalid url: {e}")))?;

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ExchangeError::Request(e.to_string()))
    }
}

impl<C> Exchanger for HttpExchanger<C>
where
    C: HttpClient,
{
    fn exchange(
        &self,
        web_api_key: &str,
        custom_token: &CustomToken,
    ) -> Result<VerifyResponse, ExchangeError> {
        let request = self.build_request(web_api_key, custom_token)?;

        let response = self.http_client.send(request)?;
        let status = response.status();
        let body = response.into_body();

        if !status.is_success() {
            return Err(ExchangeError::Response(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            ));
        }

        let verify_response: VerifyResponse = serde_json::from_slice(&body).map_err(|e| {
            ExchangeError::Decode(format!(
                "{e}. Response body: {}",
                String::from_utf8_lossy(&body)
            ))
        })?;
        debug!(expires_in = verify_response.expires_in(), "custom token verified");

        Ok(verify_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::tests::MockHttpClient;
    use assert_matches::assert_matches;
    use http::Response;
    use httpmock::{Method::POST, MockServer};
    use serde_json::json;

    fn endpoint() -> Uri {
        Uri::from_static(DEFAULT_VERIFY_ENDPOINT)
    }

    fn ok_response(body: &str) -> Response<Vec<u8>> {
        Response::builder()
            .status(200)
            .body(body.as_bytes().to_vec())
            .unwrap()
    }

    #[test]
    fn posts_token_with_api_key() {
        let mut http_client = MockHttpClient::new();
        http_client
            .expect_send()
            .withf(|req| {
                let body: serde_json::Value = serde_json::from_slice(req.body()).unwrap();
                req.method() == Method::POST
                    && req.uri().to_string() == format!("{DEFAULT_VERIFY_ENDPOINT}?key=AIzaKey")
                    && req.headers()[CONTENT_TYPE] == "application/json"
                    && body == json!({"token": "custom", "returnSecureToken": true})
            })
            .times(1)
            .returning(|_| {
                Ok(ok_response(
                    r#"{"idToken":"abc","refreshToken":"r","expiresIn":"3600"}"#,
                ))
            });
        let exchanger = HttpExchanger::new(http_client, endpoint());

        let response = exchanger
            .exchange("AIzaKey", &CustomToken::from("custom"))
            .unwrap();

        assert_eq!(response.id_token(), "abc");
        assert_eq!(response.refresh_token(), "r");
        assert_eq!(response.expires_in(), "3600");
    }

    #[test]
    fn appends_key_to_existing_query() {
        let exchanger = HttpExchanger::new(
            MockHttpClient::new(),
            Uri::from_static("http://localhost:9099/verify?alt=json"),
        );
        let request = exchanger
            .build_request("k", &CustomToken::from("t"))
            .unwrap();
        assert_eq!(
            request.uri().to_string(),
            "http://localhost:9099/verify?alt=json&key=k"
        );
    }

    #[test]
    fn invalid_api_key_characters() {
        let exchanger = HttpExchanger::new(MockHttpClient::new(), endpoint());
        let error = exchanger
            .exchange("bad key", &CustomToken::from("t"))
            .unwrap_err();
        assert_matches!(error, ExchangeError::Request(_));
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let mut http_client = MockHttpClient::new();
        http_client
            .expect_send()
            .times(1)
            .returning(|_| Ok(ok_response("<html>not json</html>")));
        let exchanger = HttpExchanger::new(http_client, endpoint());

        let error = exchanger
            .exchange("k", &CustomToken::from("t"))
            .unwrap_err();

        assert_matches!(error, ExchangeError::Decode(msg) => {
            assert!(msg.contains("<html>not json</html>"));
        });
    }

    #[test]
    fn unsuccessful_status() {
        let mut http_client = MockHttpClient::new();
        http_client.expect_send().times(1).returning(|_| {
            Ok(Response::builder()
                .status(400)
                .body(br#"{"error":{"code":400,"message":"INVALID_CUSTOM_TOKEN"}}"#.to_vec())
                .unwrap())
        });
        let exchanger = HttpExchanger::new(http_client, endpoint());

        let error = exchanger
            .exchange("k", &CustomToken::from("t"))
            .unwrap_err();

        assert_matches!(error, ExchangeError::Response(400, body) => {
            assert!(body.contains("INVALID_CUSTOM_TOKEN"));
        });
    }

    #[test]
    fn transport_failure() {
        let mut http_client = MockHttpClient::new();
        http_client.expect_send().times(1).returning(|_| {
            Err(HttpClientError::TransportError(
                "Connection refused".to_string(),
            ))
        });
        let exchanger = HttpExchanger::new(http_client, endpoint());

        let error = exchanger
            .exchange("k", &CustomToken::from("t"))
            .unwrap_err();

        assert_matches!(error, ExchangeError::Transport(msg) => {
            assert!(msg.contains("Connection refused"));
        });
    }

    #[test]
    fn unreadable_body() {
        let mut http_client = MockHttpClient::new();
        http_client.expect_send().times(1).returning(|_| {
            Err(HttpClientError::InvalidResponse(
                "connection reset".to_string(),
            ))
        });
        let exchanger = HttpExchanger::new(http_client, endpoint());

        let error = exchanger
            .exchange("k", &CustomToken::from("t"))
            .unwrap_err();

        assert_matches!(error, ExchangeError::ReadBody(_));
    }

    #[test]
    fn exchanges_against_stub_server() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/verifyCustomToken")
                .query_param("key", "AIzaKey")
                .json_body(json!({"token": "custom", "returnSecureToken": true}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"idToken":"abc","refreshToken":"r","expiresIn":"3600"}"#);
        });

        let exchanger = HttpExchanger::new(
            crate::http::client::HttpClient::new().unwrap(),
            Uri::try_from(server.url("/verifyCustomToken")).unwrap(),
        );

        let response = exchanger
            .exchange("AIzaKey", &CustomToken::from("custom"))
            .unwrap();

        assert_eq!(response.id_token(), "abc");
        mock.assert();
    }
}
