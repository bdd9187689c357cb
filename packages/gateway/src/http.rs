//! Page-builder REST API backend.
//!
//! ```text
//! POST {endpoint}/pages           body: document JSON
//! POST {endpoint}/pages/publish   body: { "pageId": ..., "config": document }
//!                                 response: { "url": ... }
//! ```

use pagecraft_editor::{PersistenceError, PersistenceGateway, PublishReceipt, SaveReceipt, Snapshot};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct HttpGateway {
    endpoint: String,
    token: Option<String>,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    url: Option<String>,
}

impl HttpGateway {
    /// `endpoint` is the API root, e.g. `http://localhost:3000/api/page-builder`
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Result<Self, PersistenceError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(network)?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token,
            client,
        })
    }

    pub fn save_url(&self) -> String {
        format!("{}/pages", self.endpoint)
    }

    pub fn publish_url(&self) -> String {
        format!("{}/pages/publish", self.endpoint)
    }

    fn post(&self, url: &str, body: &Value) -> Result<Response, PersistenceError> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!(url = %url, "POST");
        let response = request.send().map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(url = %url, status = status.as_u16(), "request rejected");
            return Err(PersistenceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}

impl PersistenceGateway for HttpGateway {
    fn save(&self, snapshot: &Snapshot) -> Result<SaveReceipt, PersistenceError> {
        let url = self.save_url();
        self.post(&url, &snapshot.document)?;

        tracing::info!(url = %url, page = %snapshot.document_id, version = snapshot.version, "page saved");
        Ok(SaveReceipt { location: Some(url) })
    }

    fn publish(&self, snapshot: &Snapshot) -> Result<PublishReceipt, PersistenceError> {
        let url = self.publish_url();
        let response = self.post(&url, &snapshot.publish_body())?;

        let text = response.text().map_err(network)?;
        let published: PublishResponse = serde_json::from_str(&text)?;

        tracing::info!(url = %url, page = %snapshot.document_id, published = ?published.url, "page published");
        Ok(PublishReceipt { url: published.url })
    }
}

fn network(err: reqwest::Error) -> PersistenceError {
    PersistenceError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let gateway = HttpGateway::new("http://localhost:3000/api/page-builder/", None).unwrap();
        assert_eq!(gateway.save_url(), "http://localhost:3000/api/page-builder/pages");
        assert_eq!(gateway.publish_url(), "http://localhost:3000/api/page-builder/pages/publish");
    }
}
