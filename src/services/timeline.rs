//! Fixed-window timeline rendering
//!
//! Walks the trailing window from `today` backwards (most recent day first)
//! and renders one cell per day. Header and count rows share the walk, so
//! they line up column for column.

use crate::types::CountSeries;
use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Trailing days shown on a timeline
pub const TIMELINE_DAYS: usize = 30;

/// Glyphs used by the sparkline, lowest to highest
const SPARK_GLYPHS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Zero samples emitted for a day without a bucket
const EMPTY_DAY_SAMPLES: usize = 3;

/// How a count row is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineStyle {
    /// `|12|  | 3` cells
    #[default]
    Counts,
    /// Compact glyph line annotated with min/max
    Sparkline,
}

/// Two-letter weekday label
pub fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mo",
        Weekday::Tue => "Tu",
        Weekday::Wed => "We",
        Weekday::Thu => "Th",
        Weekday::Fri => "Fr",
        Weekday::Sat => "Sa",
        Weekday::Sun => "Su",
    }
}

/// Render a series of samples as sparkline glyphs.
/// A flat series (including all zeros) renders at the lowest glyph.
pub fn spark_line(samples: &[u64]) -> String {
    let (Some(&min), Some(&max)) = (samples.iter().min(), samples.iter().max()) else {
        return String::new();
    };
    if min == max {
        return SPARK_GLYPHS[0].to_string().repeat(samples.len());
    }

    let top = (SPARK_GLYPHS.len() - 1) as f64;
    let span = (max - min) as f64;
    samples
        .iter()
        .map(|&v| {
            let idx = ((v - min) as f64 / span * top) as usize;
            SPARK_GLYPHS[idx.min(SPARK_GLYPHS.len() - 1)]
        })
        .collect()
}

/// Renders day-bucketed counts over a trailing window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineRenderer {
    window_days: usize,
}

impl Default for TimelineRenderer {
    fn default() -> Self {
        Self::new(TIMELINE_DAYS)
    }
}

impl TimelineRenderer {
    pub fn new(window_days: usize) -> Self {
        Self { window_days }
    }

    pub fn window_days(&self) -> usize {
        self.window_days
    }

    /// Days of the window, `today` first
    pub fn window(&self, today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        (0..self.window_days as u64).filter_map(move |back| today.checked_sub_days(Days::new(back)))
    }

    /// `|Mo|Su|Sa...` for each day of the window
    pub fn header(&self, today: NaiveDate) -> String {
        self.window(today)
            .map(|d| format!("|{}", weekday_abbrev(d.weekday())))
            .collect()
    }

    /// One `|nn` cell per day; blank cells for days without a bucket
    pub fn counts(&self, series: &CountSeries, today: NaiveDate) -> String {
        self.window(today)
            .map(|d| match series.get(d.into()) {
                Some(count) => format!("|{:>2}", count),
                None => "|  ".to_string(),
            })
            .collect()
    }

    /// Sparkline over the window followed by `  min: x max: y`.
    ///
    /// Days without a bucket contribute three zero samples instead of one
    /// and force the reported minimum to zero.
    pub fn sparkline(&self, series: &CountSeries, today: NaiveDate) -> String {
        let mut samples = Vec::with_capacity(self.window_days * EMPTY_DAY_SAMPLES);
        let mut min: Option<u64> = None;
        let mut max = 0u64;

        for d in self.window(today) {
            match series.get(d.into()) {
                Some(value) => {
                    max = max.max(value);
                    min = Some(min.map_or(value, |m| m.min(value)));
                    samples.push(value);
                }
                None => {
                    min = Some(0);
                    samples.extend(std::iter::repeat(0).take(EMPTY_DAY_SAMPLES));
                }
            }
        }

        format!(
            "{}  min: {} max: {}",
            spark_line(&samples),
            min.unwrap_or(0),
            max
        )
    }

    pub fn render(&self, series: &CountSeries, today: NaiveDate, style: TimelineStyle) -> String {
        match style {
            TimelineStyle::Counts => self.counts(series, today),
            TimelineStyle::Sparkline => self.sparkline(series, today),
        }
    }
}
