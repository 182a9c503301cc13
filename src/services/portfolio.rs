//! Portfolio-wide views built from one GraphQL query

use super::github::GithubClient;
use crate::types::{PortfolioRepo, Result};
use serde::Deserialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// First 50 public repositories with their open issue/PR markers
const PORTFOLIO_QUERY: &str = r#"
query($login: String!) {
  user(login: $login) {
    repositories(first: 50, privacy: PUBLIC) {
      edges {
        node {
          name
          url
          forkCount
          stargazers {
            totalCount
          }
          issues(states: [OPEN], first: 10) {
            nodes {
              number
            }
          }
          pullRequests(states: [OPEN], first: 10) {
            nodes {
              number
            }
          }
        }
      }
    }
  }
}
"#;

/// Marker shown in a table cell when something is open
const OPEN_MARKER: &str = " ! ";

#[derive(Deserialize)]
struct PortfolioData {
    user: Option<UserNode>,
}

#[derive(Deserialize)]
struct UserNode {
    repositories: RepositoryConnection,
}

#[derive(Deserialize)]
struct RepositoryConnection {
    #[serde(default)]
    edges: Vec<RepositoryEdge>,
}

#[derive(Deserialize)]
struct RepositoryEdge {
    node: PortfolioRepo,
}

/// Star and fork totals across the portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortfolioTotals {
    pub stars: u64,
    pub forks: u64,
}

impl PortfolioTotals {
    pub fn from_repos(repos: &[PortfolioRepo]) -> Self {
        repos.iter().fold(Self::default(), |acc, r| Self {
            stars: acc.stars.saturating_add(r.stargazers.total_count),
            forks: acc.forks.saturating_add(r.fork_count),
        })
    }
}

impl std::fmt::Display for PortfolioTotals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Portfolio Stars: {}  Portfolio Forks: {}",
            self.stars, self.forks
        )
    }
}

/// One row of the `list` table
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct RepoRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Open Issues")]
    pub open_issues: String,
    #[tabled(rename = "Open PRs")]
    pub open_prs: String,
}

impl RepoRow {
    fn from_repo(repo: &PortfolioRepo) -> Self {
        let marker = |open: bool| (if open { OPEN_MARKER } else { "" }).to_string();
        Self {
            name: repo.name.clone(),
            open_issues: marker(repo.has_open_issues()),
            open_prs: marker(repo.has_open_prs()),
        }
    }
}

/// Rows for the repository table; `only_open` keeps repos with something open
pub fn repo_rows(repos: &[PortfolioRepo], only_open: bool) -> Vec<RepoRow> {
    repos
        .iter()
        .filter(|r| !only_open || r.has_open_issues() || r.has_open_prs())
        .map(RepoRow::from_repo)
        .collect()
}

pub fn render_table(rows: Vec<RepoRow>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::ascii());
    table.to_string()
}

/// Portfolio queries for one GitHub user
pub struct PortfolioService {
    client: GithubClient,
    username: String,
}

impl PortfolioService {
    pub fn new(client: GithubClient, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
        }
    }

    /// Public repositories of the user (first 50)
    pub fn repositories(&self) -> Result<Vec<PortfolioRepo>> {
        let data: PortfolioData = self.client.graphql(
            PORTFOLIO_QUERY,
            serde_json::json!({ "login": self.username }),
        )?;
        Ok(data
            .user
            .map(|u| u.repositories.edges.into_iter().map(|e| e.node).collect())
            .unwrap_or_default())
    }

    pub fn totals(&self) -> Result<PortfolioTotals> {
        Ok(PortfolioTotals::from_repos(&self.repositories()?))
    }

    pub fn list(&self, only_open: bool) -> Result<String> {
        let repos = self.repositories()?;
        Ok(render_table(repo_rows(&repos, only_open)))
    }
}
