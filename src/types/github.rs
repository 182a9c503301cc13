//! GitHub API payload types

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A repository whose stargazer history can be paginated.
///
/// `stargazers_count` decides how many pages are requested, so callers should
/// build this from `GET /repos/{owner}/{name}` rather than by hand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Repository {
    pub full_name: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
}

impl Repository {
    pub fn new(full_name: impl Into<String>, stargazers_count: u64) -> Self {
        Self {
            full_name: full_name.into(),
            stargazers_count,
            created_at: None,
        }
    }
}

/// A single star, as returned by the dated-star media type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stargazer {
    pub starred_at: DateTime<FixedOffset>,
}

/// One page of the stargazer listing
#[derive(Debug, Clone, PartialEq)]
pub enum PageResult {
    Page(Vec<Stargazer>),
    /// The page held zero records
    End,
}

/// Repository event kinds we care about; everything else is ignored
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(from = "String")]
pub enum EventKind {
    /// Despite the name, GitHub emits this when someone stars a repo
    WatchEvent,
    ForkEvent,
    Other,
}

impl From<String> for EventKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "WatchEvent" => Self::WatchEvent,
            "ForkEvent" => Self::ForkEvent,
            _ => Self::Other,
        }
    }
}

/// Entry of `GET /repos/{owner}/{repo}/events`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RepoEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub created_at: DateTime<FixedOffset>,
}

/// Body of `GET /repos/{owner}/{repo}/traffic/clones`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CloneTraffic {
    #[serde(default)]
    pub clones: Vec<CloneRecord>,
}

/// Daily clone totals, already aggregated by GitHub
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloneRecord {
    pub timestamp: DateTime<FixedOffset>,
    pub uniques: u64,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct TotalCount {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct NumberedNodes {
    #[serde(default)]
    pub nodes: Vec<NumberedNode>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NumberedNode {
    pub number: u64,
}

/// Repository node from the portfolio GraphQL query
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRepo {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub fork_count: u64,
    #[serde(default)]
    pub stargazers: TotalCount,
    #[serde(default)]
    pub issues: NumberedNodes,
    #[serde(default)]
    pub pull_requests: NumberedNodes,
}

impl PortfolioRepo {
    pub fn has_open_issues(&self) -> bool {
        !self.issues.nodes.is_empty()
    }

    pub fn has_open_prs(&self) -> bool {
        !self.pull_requests.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stargazer_keeps_offset() {
        let json = r#"[{"starred_at":"2024-03-01T23:30:00-05:00","user":{"login":"octocat"}}]"#;
        let stars: Vec<Stargazer> = serde_json::from_str(json).unwrap();
        assert_eq!(stars.len(), 1);
        assert_eq!(stars[0].starred_at.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_event_kind_unknown_maps_to_other() {
        let json = r#"[
            {"type":"WatchEvent","created_at":"2024-03-01T10:00:00Z"},
            {"type":"PushEvent","created_at":"2024-03-01T11:00:00Z"},
            {"type":"ForkEvent","created_at":"2024-03-02T11:00:00Z"}
        ]"#;
        let events: Vec<RepoEvent> = serde_json::from_str(json).unwrap();
        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EventKind::WatchEvent, EventKind::Other, EventKind::ForkEvent]
        );
    }

    #[test]
    fn test_clone_traffic_decodes() {
        let json = r#"{"count":12,"uniques":7,"clones":[
            {"timestamp":"2024-03-01T00:00:00Z","count":4,"uniques":3}
        ]}"#;
        let traffic: CloneTraffic = serde_json::from_str(json).unwrap();
        assert_eq!(traffic.clones.len(), 1);
        assert_eq!(traffic.clones[0].uniques, 3);
    }

    #[test]
    fn test_portfolio_repo_open_flags() {
        let json = r#"{
            "name":"interview-with-python",
            "url":"https://github.com/thundergolfer/interview-with-python",
            "forkCount":2,
            "stargazers":{"totalCount":40},
            "issues":{"nodes":[{"number":3}]},
            "pullRequests":{"nodes":[]}
        }"#;
        let repo: PortfolioRepo = serde_json::from_str(json).unwrap();
        assert_eq!(repo.stargazers.total_count, 40);
        assert!(repo.has_open_issues());
        assert!(!repo.has_open_prs());
    }
}
