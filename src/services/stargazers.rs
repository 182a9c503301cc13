//! Stargazer history fetching
//!
//! The dated-star listing is the only place GitHub exposes when each star was
//! given. Pages are fetched in parallel on a small dedicated pool and merged
//! into one list ordered by `starred_at`.

use super::github::{decode, GithubClient};
use crate::types::{PageResult, PortfolioError, Repository, Result, Stargazer};
use rayon::prelude::*;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Media type that makes GitHub include `starred_at`
pub const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";

/// Largest page size GitHub accepts
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Page fetches allowed in flight at once
pub const DEFAULT_CONCURRENCY: usize = 10;

/// HTTP status GitHub uses for (primary and secondary) rate limiting
const STATUS_RATE_LIMITED: u16 = 403;

/// Retry schedule for rate-limited page requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Sleep before the first retry; doubles on each further retry
    pub initial_delay: Duration,
    /// Total attempts per page, including the first request
    pub max_attempts: u32,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(10),
            max_attempts: 5,
        }
    }
}

impl BackoffPolicy {
    /// Delay before retry number `retry` (0-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_delay.saturating_mul(factor)
    }
}

/// Fetches the full, time-ordered stargazer history of a repository
pub struct StargazerService {
    client: GithubClient,
    page_size: u32,
    concurrency: usize,
    backoff: BackoffPolicy,
}

impl StargazerService {
    pub fn new(client: GithubClient) -> Self {
        Self {
            client,
            page_size: DEFAULT_PAGE_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            backoff: BackoffPolicy::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.backoff = backoff;
        self
    }

    /// Number of pages to request, derived from the known star count.
    /// Always at least one, and one past the last full page.
    pub fn last_page(&self, repo: &Repository) -> u32 {
        let pages = repo.stargazers_count / u64::from(self.page_size) + 1;
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Fetch one page, sleeping and retrying while GitHub rate limits us
    pub fn fetch_page(&self, repo: &Repository, page: u32) -> Result<PageResult> {
        let path = format!(
            "repos/{}/stargazers?page={}&per_page={}",
            repo.full_name, page, self.page_size
        );
        let max_attempts = self.backoff.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let mut response = self.client.get(&path, STAR_MEDIA_TYPE)?;

            if response.status == STATUS_RATE_LIMITED {
                if attempt >= max_attempts {
                    warn!(repo = %repo.full_name, page, attempt, "rate limit retries exhausted");
                    return Err(PortfolioError::RateLimitExceeded { attempts: attempt });
                }
                let delay = self.backoff.delay_for(attempt - 1);
                warn!(repo = %repo.full_name, page, attempt, ?delay, "rate limited, backing off");
                thread::sleep(delay);
                attempt += 1;
                continue;
            }

            if !response.is_success() {
                return Err(PortfolioError::RemoteApi {
                    status: response.status,
                    body: response.text(),
                });
            }

            let stars: Vec<Stargazer> = decode(&mut response.body)?;
            debug!(repo = %repo.full_name, page, count = stars.len(), "fetched stargazer page");

            return Ok(if stars.is_empty() {
                PageResult::End
            } else {
                PageResult::Page(stars)
            });
        }
    }

    /// Fetch every page concurrently and merge into one list sorted by
    /// `starred_at`. Any page failure fails the whole call; no partial list
    /// is returned.
    pub fn fetch_all(&self, repo: &Repository) -> Result<Vec<Stargazer>> {
        let last_page = self.last_page(repo);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.concurrency)
            .thread_name(|i| format!("stargazers-{}", i))
            .build()
            .map_err(|e| PortfolioError::Runtime(e.to_string()))?;

        let pages: Vec<Vec<Stargazer>> = pool.install(|| {
            (1..=last_page)
                .into_par_iter()
                .map(|page| -> Result<Vec<Stargazer>> {
                    match self.fetch_page(repo, page)? {
                        PageResult::Page(stars) => Ok(stars),
                        PageResult::End => {
                            debug!(repo = %repo.full_name, page, "no more pages");
                            Ok(Vec::new())
                        }
                    }
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut stars: Vec<Stargazer> = pages.into_iter().flatten().collect();
        stars.sort_by_key(|s| s.starred_at);

        info!(
            repo = %repo.full_name,
            pages = last_page,
            stars = stars.len(),
            "fetched stargazer history"
        );
        Ok(stars)
    }
}
