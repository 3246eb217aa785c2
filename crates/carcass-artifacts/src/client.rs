use std::time::Duration;

use crate::error::Result;

const DEFAULT_BASE_URL: &str = "https://api.papermc.io/v2";

/// Connection settings for [`PaperClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeouts(mut self, connect: Duration, request: Duration) -> Self {
        self.connect_timeout = connect;
        self.request_timeout = request;
        self
    }
}

/// Client for the PaperMC v2 downloads API.
#[derive(Clone)]
pub struct PaperClient {
    pub(crate) base_url: String,
    pub(crate) http: reqwest::Client,
}

impl PaperClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(concat!("carcass/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub(crate) fn builds_url(&self, project: &str, version: &str) -> String {
        format!(
            "{}/projects/{project}/versions/{version}/builds",
            self.base_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = PaperClient::new(ClientConfig::new("http://localhost:1/v2/")).unwrap();
        assert_eq!(client.base_url, "http://localhost:1/v2");
        assert_eq!(
            client.builds_url("paper", "1.19.2"),
            "http://localhost:1/v2/projects/paper/versions/1.19.2/builds"
        );
    }
}
