//! Traced HTTP client
//!
//! Thin wrapper around `reqwest::Client` that opens an `outgoing_http` span
//! per request and records the response status on it.

use tracing::{field::Empty, Instrument, Level};

#[derive(Clone)]
pub struct TracedClient {
    inner: reqwest::Client,
}

impl TracedClient {
    pub fn new(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Execute a built request inside an `outgoing_http` span.
    pub async fn execute(&self, req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        let span = tracing::span!(
            Level::INFO,
            "outgoing_http",
            http.method = %req.method(),
            http.host = req.url().host_str().unwrap_or(""),
            http.path = req.url().path(),
            http.status_code = Empty,
            error = Empty,
        );

        let result = self.inner.execute(req).instrument(span.clone()).await;
        match &result {
            Ok(response) => {
                span.record("http.status_code", response.status().as_u16());
                if response.status().is_client_error() || response.status().is_server_error() {
                    span.record("error", true);
                }
            }
            Err(_) => {
                span.record("error", true);
            }
        }
        result
    }

    pub async fn get(&self, url: &str) -> reqwest::Result<reqwest::Response> {
        let req = self.inner.get(url).build()?;
        self.execute(req).await
    }

    /// Start a request builder; finish with `.build()` and pass to [`execute`](Self::execute).
    pub fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }
}

impl From<reqwest::Client> for TracedClient {
    fn from(c: reqwest::Client) -> Self {
        Self::new(c)
    }
}

impl Default for TracedClient {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn get_returns_response_from_server() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(GET).path("/ping");
            then.status(200).body("ok");
        });

        let client = TracedClient::from(reqwest::Client::new());
        let resp = client.get(&format!("{}/ping", server.base_url())).await.unwrap();

        assert!(resp.status().is_success());
        assert_eq!(resp.text().await.unwrap(), "ok");
        m.assert();
    }

    #[tokio::test]
    async fn execute_passes_error_statuses_through() {
        let server = MockServer::start();
        let m = server.mock(|when, then| {
            when.method(POST).path("/fail").json_body(serde_json::json!({"a": 1}));
            then.status(503);
        });

        let client = TracedClient::default();
        let req = client
            .request(reqwest::Method::POST, &format!("{}/fail", server.base_url()))
            .json(&serde_json::json!({"a": 1}))
            .build()
            .unwrap();
        let resp = client.execute(req).await.unwrap();

        assert_eq!(resp.status().as_u16(), 503);
        m.assert();
    }
}
