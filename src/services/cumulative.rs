//! Running-total series and the trend chart drawn from it

use crate::types::{CountSeries, CumulativeSeries};
use chrono::{Days, NaiveDate};

impl CumulativeSeries {
    /// One running total per calendar day, from the first bucketed day
    /// through `today` (or the last bucketed day, if that is later).
    pub fn build(series: &CountSeries, today: NaiveDate) -> Self {
        let (Some(first), Some(last)) = (series.first_day(), series.last_day()) else {
            return Self::default();
        };
        let start = first.date();
        let end = last.date().max(today);

        let mut values = Vec::new();
        let mut running = 0u64;
        let mut day = start;
        while day <= end {
            running = running.saturating_add(series.count_on(day));
            values.push(running);
            match day.checked_add_days(Days::new(1)) {
                Some(next) => day = next,
                None => break,
            }
        }

        Self {
            start: Some(start),
            values,
        }
    }
}

/// Plain-text line chart for a cumulative series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineChart {
    width: usize,
    height: usize,
}

impl Default for LineChart {
    fn default() -> Self {
        Self::new(100, 20)
    }
}

impl LineChart {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(2),
            height: height.max(2),
        }
    }

    /// Pick `width` evenly spaced samples (all of them if there are fewer)
    fn resample(&self, values: &[u64]) -> Vec<u64> {
        if values.len() <= self.width {
            return values.to_vec();
        }
        let last = values.len() - 1;
        (0..self.width)
            .map(|col| values[col * last / (self.width - 1)])
            .collect()
    }

    /// Draw the values left (oldest) to right, with a y-axis labelled from 0
    /// to the maximum. Empty input draws nothing.
    pub fn draw(&self, values: &[u64]) -> String {
        let points = self.resample(values);
        let Some(&max) = points.iter().max() else {
            return String::new();
        };

        let rows: Vec<usize> = points
            .iter()
            .map(|&v| {
                if max == 0 {
                    0
                } else {
                    ((v as f64 / max as f64) * (self.height - 1) as f64).round() as usize
                }
            })
            .collect();

        let label_width = max.to_string().len();
        let mut out = String::new();
        for row in (0..self.height).rev() {
            let label = if row == self.height - 1 {
                max.to_string()
            } else if row == 0 {
                "0".to_string()
            } else {
                String::new()
            };
            out.push_str(&format!("{:>width$} │", label, width = label_width));
            for (col, &r) in rows.iter().enumerate() {
                let prev = if col == 0 { r } else { rows[col - 1] };
                let glyph = if r == row {
                    '•'
                } else if (prev.min(r)..prev.max(r)).contains(&row) {
                    '│'
                } else {
                    ' '
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out.push_str(&format!(
            "{:>width$} └{}",
            "",
            "─".repeat(rows.len()),
            width = label_width
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DayKey;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(days: &[(NaiveDate, u64)]) -> CountSeries {
        let mut s = CountSeries::new();
        for (d, v) in days {
            s.add(DayKey::new(*d), *v);
        }
        s
    }

    // ========== CumulativeSeries::build tests ==========

    #[test]
    fn test_build_empty() {
        let result = CumulativeSeries::build(&CountSeries::new(), date(2024, 1, 1));
        assert!(result.is_empty());
        assert_eq!(result.start, None);
        assert_eq!(result.total(), 0);
    }

    #[test]
    fn test_build_runs_through_today() {
        let s = series(&[(date(2024, 1, 1), 2), (date(2024, 1, 3), 5)]);

        let result = CumulativeSeries::build(&s, date(2024, 1, 5));

        assert_eq!(result.start, Some(date(2024, 1, 1)));
        assert_eq!(result.values, vec![2, 2, 7, 7, 7]);
    }

    #[test]
    fn test_build_includes_first_day() {
        let s = series(&[(date(2024, 1, 1), 4)]);
        let result = CumulativeSeries::build(&s, date(2024, 1, 1));
        assert_eq!(result.values, vec![4]);
    }

    #[test]
    fn test_build_future_buckets_extend_past_today() {
        let s = series(&[(date(2024, 1, 1), 1), (date(2024, 1, 4), 1)]);
        let result = CumulativeSeries::build(&s, date(2024, 1, 2));
        assert_eq!(result.values, vec![1, 1, 1, 2]);
    }

    #[test]
    fn test_build_monotonic_and_total_matches() {
        let s = series(&[
            (date(2023, 12, 30), 3),
            (date(2024, 1, 2), 1),
            (date(2024, 2, 10), 8),
        ]);

        let result = CumulativeSeries::build(&s, date(2024, 3, 1));

        assert!(result.values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result.total(), s.total());
        // Dec 30 .. Mar 1 inclusive, across a leap February
        assert_eq!(result.len(), 2 + 31 + 29 + 1);
    }

    // ========== LineChart tests ==========

    #[test]
    fn test_chart_empty() {
        assert_eq!(LineChart::default().draw(&[]), "");
    }

    #[test]
    fn test_chart_dimensions() {
        let chart = LineChart::new(10, 5);
        let values: Vec<u64> = (0..40).collect();

        let drawn = chart.draw(&values);
        let lines: Vec<&str> = drawn.lines().collect();

        // 5 plot rows + axis
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("39 │"));
        assert!(lines[4].starts_with(" 0 │"));
        assert_eq!(lines[5].chars().filter(|c| *c == '─').count(), 10);
    }

    #[test]
    fn test_chart_plots_endpoints() {
        let chart = LineChart::new(10, 3);
        let drawn = chart.draw(&[0, 10]);
        let lines: Vec<&str> = drawn.lines().collect();

        assert!(lines[0].ends_with(" •"));
        assert!(lines[2].ends_with("•│"));
    }

    #[test]
    fn test_resample_keeps_first_and_last() {
        let chart = LineChart::new(4, 3);
        let values: Vec<u64> = (0..100).collect();
        assert_eq!(chart.resample(&values), vec![0, 33, 66, 99]);
    }
}
