//! Day-bucketed series types

use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::BTreeMap;
use std::fmt;

/// Calendar-day bucket key (`YYYY-MM-DD`), ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Calendar date of the timestamp in its own offset, as GitHub sent it.
    pub fn from_timestamp<Tz: TimeZone>(ts: &DateTime<Tz>) -> Self {
        Self(ts.date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Per-day event counts. Absent days count as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountSeries {
    buckets: BTreeMap<DayKey, u64>,
}

impl CountSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the bucket for `day`, creating it on first use
    pub fn add(&mut self, day: DayKey, amount: u64) {
        let bucket = self.buckets.entry(day).or_insert(0);
        *bucket = bucket.saturating_add(amount);
    }

    pub fn get(&self, day: DayKey) -> Option<u64> {
        self.buckets.get(&day).copied()
    }

    /// Count for `date`, treating absent buckets as zero
    pub fn count_on(&self, date: NaiveDate) -> u64 {
        self.get(DayKey::new(date)).unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.buckets
            .values()
            .fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    pub fn first_day(&self) -> Option<DayKey> {
        self.buckets.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<DayKey> {
        self.buckets.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in chronological order
    pub fn iter(&self) -> impl Iterator<Item = (DayKey, u64)> + '_ {
        self.buckets.iter().map(|(k, v)| (*k, *v))
    }
}

/// Running totals, one per calendar day, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CumulativeSeries {
    pub start: Option<NaiveDate>,
    pub values: Vec<u64>,
}

impl CumulativeSeries {
    /// All-time total (last running value)
    pub fn total(&self) -> u64 {
        self.values.last().copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_key_display() {
        assert_eq!(DayKey::new(date(2024, 3, 7)).to_string(), "2024-03-07");
    }

    #[test]
    fn test_day_key_uses_timestamp_offset() {
        // 23:30 at -05:00 is already the next day in UTC
        let ts = DateTime::parse_from_rfc3339("2024-03-01T23:30:00-05:00").unwrap();
        assert_eq!(DayKey::from_timestamp(&ts).date(), date(2024, 3, 1));

        let utc = ts.with_timezone(&FixedOffset::east_opt(0).unwrap());
        assert_eq!(DayKey::from_timestamp(&utc).date(), date(2024, 3, 2));
    }

    #[test]
    fn test_day_key_string_order_matches_date_order() {
        let a = DayKey::new(date(2023, 12, 31));
        let b = DayKey::new(date(2024, 1, 2));
        assert!(a < b);
        assert!(a.to_string() < b.to_string());
    }

    #[test]
    fn test_count_series_add_accumulates() {
        let mut series = CountSeries::new();
        let day = DayKey::new(date(2024, 1, 15));
        series.add(day, 3);
        series.add(day, 5);
        assert_eq!(series.get(day), Some(8));
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_count_series_absent_is_zero() {
        let series = CountSeries::new();
        assert_eq!(series.get(DayKey::new(date(2024, 1, 15))), None);
        assert_eq!(series.count_on(date(2024, 1, 15)), 0);
        assert!(series.is_empty());
        assert_eq!(series.first_day(), None);
    }

    #[test]
    fn test_count_series_first_last_total() {
        let mut series = CountSeries::new();
        series.add(DayKey::new(date(2024, 1, 20)), 1);
        series.add(DayKey::new(date(2024, 1, 10)), 2);
        series.add(DayKey::new(date(2024, 1, 15)), 4);

        assert_eq!(series.first_day(), Some(DayKey::new(date(2024, 1, 10))));
        assert_eq!(series.last_day(), Some(DayKey::new(date(2024, 1, 20))));
        assert_eq!(series.total(), 7);
    }

    #[test]
    fn test_cumulative_total_empty() {
        assert_eq!(CumulativeSeries::default().total(), 0);
    }
}
