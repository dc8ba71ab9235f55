use crate::config::StatsConfig;
use crate::stats::{RepoId, RepoMetadata, StatsError};

/// Client for the public repository endpoint. One request per call, no
/// retry and no caching.
#[derive(Clone)]
pub struct GithubClient {
    api_base: String,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

#[cfg(not(target_arch = "wasm32"))]
impl GithubClient {
    pub fn new(config: &StatsConfig) -> Result<Self, StatsError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| StatsError::Transport(err.to_string()))?;

        Ok(Self {
            api_base: config.api_base.clone(),
            http,
        })
    }

    pub async fn repo(&self, repo: &RepoId) -> Result<RepoMetadata, StatsError> {
        let url = repo.api_url(&self.api_base);
        tracing::debug!(%repo, %url, "fetching repository stats");

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|err| StatsError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|err| StatsError::Transport(err.to_string()))?;
        serde_json::from_str(&body).map_err(|err| StatsError::Decode(err.to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl GithubClient {
    pub fn new(config: &StatsConfig) -> Result<Self, StatsError> {
        Ok(Self {
            api_base: config.api_base.clone(),
        })
    }

    pub async fn repo(&self, repo: &RepoId) -> Result<RepoMetadata, StatsError> {
        use gloo_net::http::Request;

        let url = repo.api_url(&self.api_base);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| StatsError::Transport(err.to_string()))?;

        if !response.ok() {
            return Err(StatsError::Status(response.status()));
        }

        response
            .json::<RepoMetadata>()
            .await
            .map_err(|err| StatsError::Decode(err.to_string()))
    }
}
