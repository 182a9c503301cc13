//! Services for fetching, bucketing and rendering GitHub activity

pub mod bucketer;
pub mod cumulative;
pub mod github;
pub mod http;
pub mod interest;
pub mod portfolio;
pub mod stargazers;
pub mod timeline;

pub use bucketer::TimeBucketer;
pub use cumulative::LineChart;
pub use github::GithubClient;
pub use http::{HttpResponse, HttpTransport, ReqwestTransport};
pub use interest::{InterestService, InterestStats};
pub use portfolio::{PortfolioService, PortfolioTotals};
pub use stargazers::{BackoffPolicy, StargazerService};
pub use timeline::{TimelineRenderer, TimelineStyle, TIMELINE_DAYS};
