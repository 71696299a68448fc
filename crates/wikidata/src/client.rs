use crate::bindings::{ResultRow, SparqlResponse};
use crate::error::FetchError;
use reqwest::header;
use std::time::Duration;

const WIKIDATA_ENDPOINT: &str = "https://query.wikidata.org/sparql";
const USER_AGENT: &str = "konzernatlas/0.1 (corporate ownership graph explorer)";

/// Client for a SPARQL query endpoint. One request per call, bounded
/// timeout, no retries, no caching.
#[derive(Clone)]
pub struct WikidataClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl WikidataClient {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            timeout,
        }
    }

    pub fn default() -> Self {
        Self::new(WIKIDATA_ENDPOINT.to_string(), Duration::from_secs(8))
    }

    /// Run a SELECT query and return its raw result rows.
    pub async fn select(&self, query: &str) -> Result<Vec<ResultRow>, FetchError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query), ("format", "json")])
            .header(header::ACCEPT, "application/sparql-results+json")
            .header(header::USER_AGENT, USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(FetchError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "query service request failed");
            return Err(FetchError::Upstream(status.as_u16()));
        }

        let body = response.text().await.map_err(FetchError::from_request)?;
        let envelope: SparqlResponse = serde_json::from_str(&body)
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        let rows = envelope
            .results
            .bindings
            .into_iter()
            .map(ResultRow::new)
            .collect::<Vec<_>>();

        tracing::debug!(rows = rows.len(), "query service responded");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port, return the endpoint.
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn ok_response(body: &str) -> String {
        format!(
            "HTTP/1.1 200 OK\r\ncontent-type: application/sparql-results+json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn test_select_parses_result_rows() {
        let body = r#"{
            "head": { "vars": ["ancestor"] },
            "results": { "bindings": [
                { "ancestor": { "type": "uri", "value": "http://www.wikidata.org/entity/Q156578" } }
            ] }
        }"#;
        let endpoint = serve_once(ok_response(body)).await;
        let client = WikidataClient::new(endpoint, Duration::from_secs(2));

        let rows = client.select("SELECT ?ancestor WHERE {}").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity_id("ancestor").as_deref(), Some("Q156578"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_upstream_error() {
        let endpoint = serve_once(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                .to_string(),
        )
        .await;
        let client = WikidataClient::new(endpoint, Duration::from_secs(2));

        let err = client.select("SELECT 1").await.unwrap_err();
        assert!(matches!(err, FetchError::Upstream(500)), "{err}");
    }

    #[tokio::test]
    async fn test_non_envelope_body_is_malformed() {
        let endpoint = serve_once(ok_response(r#"{"error": "no results here"}"#)).await;
        let client = WikidataClient::new(endpoint, Duration::from_secs(2));

        let err = client.select("SELECT 1").await.unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)), "{err}");
    }

    #[tokio::test]
    async fn test_slow_upstream_is_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            tokio::time::sleep(Duration::from_secs(5)).await;
            let _ = socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n")
                .await;
        });
        let client = WikidataClient::new(format!("http://{addr}"), Duration::from_millis(100));

        let err = client.select("SELECT 1").await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout), "{err}");
    }
}
