use http::{Request, Response};

#[derive(thiserror::Error, Debug)]
pub enum HttpClientError {
    /// Represents an http transport crate error.
    #[error("HTTP Transport error: `{0}`")]
    TransportError(String),
    /// The response body could not be read or the response could not be rebuilt.
    #[error("invalid http response: `{0}`")]
    InvalidResponse(String),
}

/// A synchronous trait that defines the internal methods for HTTP clients.
pub trait HttpClient {
    /// A synchronous function sends a request. The method and url are defined inside the Request.
    ///
    /// Implementations return the fully read body, so the underlying response is released by the
    /// time this returns.
    fn send(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, HttpClientError>;
}

#[cfg(test)]
pub(super) mod tests {

    use super::*;

    use mockall::mock;

    // Create a mock for the HttpClient trait using the mock! macro
    mock! {
        pub HttpClient {}

        impl HttpClient for HttpClient {
            fn send(&self, req: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, HttpClientError>;
        }
    }
}
