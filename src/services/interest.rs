//! Per-project interest reports (stars, forks, clones)

use super::bucketer::TimeBucketer;
use super::cumulative::LineChart;
use super::github::GithubClient;
use super::stargazers::StargazerService;
use super::timeline::{TimelineRenderer, TimelineStyle};
use crate::types::{CloneTraffic, CountSeries, CumulativeSeries, EventKind, RepoEvent, Result};
use chrono::NaiveDate;
use tracing::debug;

/// Day-bucketed activity of one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterestStats {
    pub stars: CountSeries,
    pub forks: CountSeries,
    pub clones: CountSeries,
}

impl InterestStats {
    pub fn from_activity(events: &[RepoEvent], traffic: &CloneTraffic) -> Self {
        Self {
            stars: TimeBucketer::events(events, EventKind::WatchEvent),
            forks: TimeBucketer::events(events, EventKind::ForkEvent),
            clones: TimeBucketer::clones(&traffic.clones),
        }
    }

    /// Weekday header plus one labelled row per metric
    pub fn render(
        &self,
        renderer: &TimelineRenderer,
        today: NaiveDate,
        style: TimelineStyle,
    ) -> String {
        let header = renderer.header(today);
        let rows = [
            ("Stars:", &self.stars),
            ("Forks:", &self.forks),
            ("Clones:", &self.clones),
        ];

        let mut out = match style {
            TimelineStyle::Counts => format!("        {}|\n", header),
            // sparkline rows start one column earlier
            TimelineStyle::Sparkline => format!("       {}|\n", header),
        };
        for (label, series) in rows {
            let row = renderer.render(series, today, style);
            match style {
                TimelineStyle::Counts => out.push_str(&format!("{:<8}{}|\n", label, row)),
                TimelineStyle::Sparkline => out.push_str(&format!("{:<8}{}\n", label, row)),
            }
        }
        out
    }
}

/// Builds the `interest` command output for a project
pub struct InterestService {
    client: GithubClient,
    stargazers: StargazerService,
    renderer: TimelineRenderer,
    chart: LineChart,
}

impl InterestService {
    pub fn new(client: GithubClient, stargazers: StargazerService) -> Self {
        Self {
            client,
            stargazers,
            renderer: TimelineRenderer::default(),
            chart: LineChart::default(),
        }
    }

    /// Recent stars and forks (from the event feed) plus clone traffic
    pub fn stats(&self, full_name: &str) -> Result<InterestStats> {
        let events = self.client.repo_events(full_name)?;
        let traffic = self.client.clone_traffic(full_name)?;
        debug!(
            repo = full_name,
            events = events.len(),
            clone_days = traffic.clones.len(),
            "fetched interest activity"
        );
        Ok(InterestStats::from_activity(&events, &traffic))
    }

    /// 30-day timeline of stars, forks and clones
    pub fn timeline(
        &self,
        full_name: &str,
        today: NaiveDate,
        style: TimelineStyle,
    ) -> Result<String> {
        let stats = self.stats(full_name)?;
        Ok(stats.render(&self.renderer, today, style))
    }

    /// Running star total since the first star
    pub fn star_history(&self, full_name: &str, today: NaiveDate) -> Result<CumulativeSeries> {
        let repo = self.client.repository(full_name)?;
        let stars = self.stargazers.fetch_all(&repo)?;
        let per_day = TimeBucketer::stargazers(&stars);
        Ok(CumulativeSeries::build(&per_day, today))
    }

    /// Trend chart of the running star total, ending with the current count
    pub fn totals(&self, full_name: &str, today: NaiveDate) -> Result<String> {
        let history = self.star_history(full_name, today)?;
        if history.is_empty() {
            return Ok(" current: 0".to_string());
        }
        Ok(format!(
            "{}\n current: {}",
            self.chart.draw(&history.values),
            history.total()
        ))
    }
}
