//! Day bucketing for stars, forks and clones

use crate::types::{CloneRecord, CountSeries, DayKey, EventKind, RepoEvent, Stargazer};

/// Groups timestamped events into calendar-day buckets
pub struct TimeBucketer;

impl TimeBucketer {
    /// Bucket arbitrary events. `extract` returns the event's day and how
    /// much it contributes, or `None` to skip it.
    pub fn bucket<T, F>(events: &[T], extract: F) -> CountSeries
    where
        F: Fn(&T) -> Option<(DayKey, u64)>,
    {
        let mut series = CountSeries::new();
        for (day, amount) in events.iter().filter_map(extract) {
            series.add(day, amount);
        }
        series
    }

    /// One per star
    pub fn stargazers(stars: &[Stargazer]) -> CountSeries {
        Self::bucket(stars, |s| Some((DayKey::from_timestamp(&s.starred_at), 1)))
    }

    /// One per event of the given kind
    pub fn events(events: &[RepoEvent], kind: EventKind) -> CountSeries {
        Self::bucket(events, |e| {
            (e.kind == kind).then(|| (DayKey::from_timestamp(&e.created_at), 1))
        })
    }

    /// Unique cloners per day; records falling on the same day are summed
    pub fn clones(records: &[CloneRecord]) -> CountSeries {
        Self::bucket(records, |c| {
            Some((DayKey::from_timestamp(&c.timestamp), c.uniques))
        })
    }
}
