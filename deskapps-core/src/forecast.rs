//! Reshaping of 3-hour forecast samples into per-day summaries.

use std::collections::BTreeMap;

use chrono::{Local, TimeZone};

use crate::model::{DailyForecast, ForecastEntry};

/// Number of calendar days kept from a forecast response.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Group samples by calendar day in the process's local timezone.
pub fn aggregate_daily(samples: &[ForecastEntry]) -> Vec<DailyForecast> {
    aggregate_daily_in(samples, &Local)
}

/// Group samples by the calendar day they fall on in `tz`.
///
/// Days come back in ascending order and only the first
/// [`MAX_FORECAST_DAYS`] are kept. Samples inside a day keep their input
/// order, which is what the tie rule of [`DailyForecast::condition`] relies on.
pub fn aggregate_daily_in<Tz: TimeZone>(samples: &[ForecastEntry], tz: &Tz) -> Vec<DailyForecast> {
    let mut days: BTreeMap<_, DailyForecast> = BTreeMap::new();

    for sample in samples {
        let date = sample.timestamp.with_timezone(tz).date_naive();
        let day = days.entry(date).or_insert_with(|| DailyForecast {
            date,
            temperatures: Vec::new(),
            conditions: Vec::new(),
            icons: Vec::new(),
        });

        day.temperatures.push(sample.temperature_c);
        day.conditions.push(sample.condition.clone());
        day.icons.push(sample.icon.clone());
    }

    days.into_values().take(MAX_FORECAST_DAYS).collect()
}

impl DailyForecast {
    /// Highest sample temperature of the day.
    pub fn high(&self) -> f64 {
        self.temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Lowest sample temperature of the day.
    pub fn low(&self) -> f64 {
        self.temperatures.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Most frequent condition text.
    pub fn condition(&self) -> &str {
        most_frequent(&self.conditions).unwrap_or_default()
    }

    /// Most frequent icon code.
    pub fn icon(&self) -> &str {
        most_frequent(&self.icons).unwrap_or_default()
    }
}

/// Modal value of `values`; on a count tie the value seen first wins.
pub fn most_frequent(values: &[String]) -> Option<&str> {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((value.as_str(), 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        // strict comparison keeps the earlier value on ties
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }

    best.map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

    const DAY: i64 = 86_400;
    // 2024-03-01T00:00:00Z
    const MARCH_1: i64 = 1_709_251_200;

    fn sample(ts: i64, temp: f64, condition: &str, icon: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: DateTime::<Utc>::from_timestamp(ts, 0).unwrap(),
            temperature_c: temp,
            condition: condition.to_string(),
            icon: icon.to_string(),
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate_daily_in(&[], &Utc).is_empty());
        assert!(aggregate_daily(&[]).is_empty());
    }

    #[test]
    fn groups_by_utc_date_with_high_and_low() {
        let samples = vec![
            sample(MARCH_1, 4.0, "clear sky", "01d"),
            sample(MARCH_1 + 3 * 3600, 9.5, "clear sky", "01d"),
            sample(MARCH_1 + 6 * 3600, 7.25, "light rain", "10d"),
            sample(MARCH_1 + DAY, -1.0, "snow", "13d"),
        ];

        let days = aggregate_daily_in(&samples, &Utc);

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(days[0].high(), 9.5);
        assert_eq!(days[0].low(), 4.0);
        assert_eq!(days[0].condition(), "clear sky");
        assert_eq!(days[0].icon(), "01d");
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        assert_eq!(days[1].high(), -1.0);
        assert_eq!(days[1].low(), -1.0);
    }

    #[test]
    fn grouping_follows_the_given_timezone() {
        // 23:00 UTC on March 1 is already March 2 at UTC+2.
        let samples = vec![
            sample(MARCH_1 + 20 * 3600, 3.0, "mist", "50n"),
            sample(MARCH_1 + 23 * 3600, 2.0, "mist", "50n"),
        ];

        let utc_days = aggregate_daily_in(&samples, &Utc);
        assert_eq!(utc_days.len(), 1);

        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_days = aggregate_daily_in(&samples, &plus_two);
        assert_eq!(local_days.len(), 2);
        assert_eq!(local_days[1].date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
    }

    #[test]
    fn keeps_only_first_five_days_in_ascending_order() {
        // Out-of-order input spanning seven days.
        let mut samples: Vec<ForecastEntry> = (0..7)
            .rev()
            .map(|d| sample(MARCH_1 + d * DAY + 3600, d as f64, "clouds", "03d"))
            .collect();
        samples.push(sample(MARCH_1 + 2 * 3600, 11.0, "clouds", "03d"));

        let days = aggregate_daily_in(&samples, &Utc);

        assert_eq!(days.len(), MAX_FORECAST_DAYS);
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(days[4].date, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(days[0].high(), 11.0);
    }

    #[test]
    fn high_and_low_bound_every_sample() {
        let samples: Vec<ForecastEntry> = (0..40)
            .map(|i| {
                let temp = ((i * 37) % 23) as f64 - 8.5;
                sample(MARCH_1 + i * 3 * 3600, temp, "clouds", "04d")
            })
            .collect();

        let days = aggregate_daily_in(&samples, &Utc);
        assert!(days.len() <= MAX_FORECAST_DAYS);

        for day in &days {
            for t in &day.temperatures {
                assert!(day.high() >= *t);
                assert!(day.low() <= *t);
            }
        }
    }

    #[test]
    fn representative_condition_is_the_most_common() {
        let samples = vec![
            sample(MARCH_1, 5.0, "Clear", "01d"),
            sample(MARCH_1 + 3600, 6.0, "Clear", "01d"),
            sample(MARCH_1 + 7200, 7.0, "Rain", "10d"),
        ];

        let days = aggregate_daily_in(&samples, &Utc);
        assert_eq!(days[0].condition(), "Clear");
        assert_eq!(days[0].icon(), "01d");
    }

    #[test]
    fn most_frequent_tie_prefers_first_seen() {
        let values = strings(&["Rain", "Clear", "Clear", "Rain", "Snow"]);
        assert_eq!(most_frequent(&values), Some("Rain"));

        let values = strings(&["10n", "01d"]);
        assert_eq!(most_frequent(&values), Some("10n"));
    }

    #[test]
    fn most_frequent_of_nothing_is_none() {
        assert_eq!(most_frequent(&[]), None);
    }
}
