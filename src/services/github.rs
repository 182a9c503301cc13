//! GitHub REST/GraphQL client

use super::http::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{CloneTraffic, PortfolioError, RepoEvent, Repository, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// GitHub REST API root
pub const GITHUB_REST_ROOT: &str = "https://api.github.com";

/// GitHub GraphQL endpoint
pub const GITHUB_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Default media type for REST calls
pub const ACCEPT_JSON: &str = "application/vnd.github+json";

const USER_AGENT: &str = concat!("ghportfolio/", env!("CARGO_PKG_VERSION"));

/// Decode a JSON body, mapping failures to `MalformedResponse`
pub(crate) fn decode<T: DeserializeOwned>(body: &mut [u8]) -> Result<T> {
    simd_json::from_slice(body).map_err(|e| PortfolioError::MalformedResponse(e.to_string()))
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Authenticated GitHub client over an [`HttpTransport`]
#[derive(Clone)]
pub struct GithubClient {
    transport: Arc<dyn HttpTransport>,
    token: Option<String>,
    rest_root: String,
    graphql_url: String,
}

impl GithubClient {
    /// Client over the real network
    pub fn new(token: Option<String>) -> Result<Self> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::with_transport(Arc::new(transport), token))
    }

    pub fn with_transport(transport: Arc<dyn HttpTransport>, token: Option<String>) -> Self {
        Self {
            transport,
            token: token.filter(|t| !t.is_empty()),
            rest_root: GITHUB_REST_ROOT.to_string(),
            graphql_url: GITHUB_GRAPHQL_URL.to_string(),
        }
    }

    /// Point REST calls somewhere else (e.g. GitHub Enterprise)
    pub fn with_rest_root(mut self, root: impl Into<String>) -> Self {
        self.rest_root = root.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_graphql_url(mut self, url: impl Into<String>) -> Self {
        self.graphql_url = url.into();
        self
    }

    fn headers(&self, accept: &str) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("Accept", accept.to_string()),
            ("User-Agent", USER_AGENT.to_string()),
        ];
        if let Some(token) = &self.token {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }
        headers
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/{}", self.rest_root, path.trim_start_matches('/'))
    }

    /// Raw GET; the status is left for the caller to interpret
    pub fn get(&self, path: &str, accept: &str) -> Result<HttpResponse> {
        self.transport
            .get(&self.rest_url(path), &self.headers(accept))
    }

    /// GET a JSON document, failing on any non-success status
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let mut response = self.get(path, ACCEPT_JSON)?;
        if !response.is_success() {
            return Err(PortfolioError::RemoteApi {
                status: response.status,
                body: response.text(),
            });
        }
        decode(&mut response.body)
    }

    /// Run a GraphQL query and return its `data` member
    pub fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        let payload = serde_json::to_vec(&GraphQlRequest { query, variables })
            .map_err(|e| PortfolioError::MalformedResponse(format!("encode query: {}", e)))?;

        let mut response =
            self.transport
                .post(&self.graphql_url, &self.headers("application/json"), payload)?;
        if !response.is_success() {
            return Err(PortfolioError::RemoteApi {
                status: response.status,
                body: response.text(),
            });
        }

        let envelope: GraphQlResponse<T> = decode(&mut response.body)?;
        if !envelope.errors.is_empty() {
            let messages: Vec<String> = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(PortfolioError::RemoteApi {
                status: response.status,
                body: messages.join("; "),
            });
        }
        envelope
            .data
            .ok_or_else(|| PortfolioError::MalformedResponse("graphql response without data".into()))
    }

    /// Repository metadata (star count drives stargazer pagination)
    pub fn repository(&self, full_name: &str) -> Result<Repository> {
        self.get_json(&format!("repos/{}", full_name))
    }

    /// Recent public events of a repository
    pub fn repo_events(&self, full_name: &str) -> Result<Vec<RepoEvent>> {
        self.get_json(&format!("repos/{}/events", full_name))
    }

    /// Clone traffic for the last 14 days (push access required)
    pub fn clone_traffic(&self, full_name: &str) -> Result<CloneTraffic> {
        self.get_json(&format!("repos/{}/traffic/clones", full_name))
    }
}
