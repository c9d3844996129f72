use std::time::Duration;

use mixwatch_protocol::Snapshot;

use crate::error::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the bulletin board's status endpoints.
pub struct StatusClient {
    base_url: String,
    http: reqwest::Client,
}

impl StatusClient {
    /// Create a client for the given base URL (trailing slash tolerated).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and parse one status snapshot. Single attempt, no retry.
    pub async fn fetch_snapshot(&self, path: &str) -> Result<Snapshot, FetchError> {
        let url = self.url_for(path);
        let response = self.get(&url).await?;
        response
            .json::<Snapshot>()
            .await
            .map_err(|e| FetchError::Parse {
                url,
                reason: e.to_string(),
            })
    }

    /// Fetch the banner text injected above the tables. Invoked once at
    /// startup; the body is returned verbatim.
    pub async fn fetch_header(&self, path: &str) -> Result<String, FetchError> {
        let url = self.url_for(path);
        let response = self.get(&url).await?;
        response.text().await.map_err(|e| FetchError::Parse {
            url,
            reason: e.to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        tracing::debug!(url = %url, "fetching");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Transport {
                url: url.to_string(),
                reason: format!("status {status}"),
            });
        }
        Ok(response)
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = StatusClient::new("http://127.0.0.1:8200/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8200");
        assert_eq!(client.url_for("/data"), "http://127.0.0.1:8200/data");
        assert_eq!(client.url_for("data"), "http://127.0.0.1:8200/data");
    }
}
