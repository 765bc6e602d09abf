use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal position of a data point.
///
/// The server emits UNIX timestamps (seconds), `YYYY-MM-DD` business days,
/// or `YYYY-MM-DD HH:MM:SS` datetimes (corporate bonds), depending on the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Time {
    Timestamp(i64),
    BusinessDay(String),
}

impl Time {
    /// Seconds since the epoch, used to compare the two encodings.
    pub fn as_unix(&self) -> Option<i64> {
        match self {
            Time::Timestamp(ts) => Some(*ts),
            Time::BusinessDay(day) => parse_day(day).map(|dt| dt.and_utc().timestamp()),
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Time::Timestamp(ts) => DateTime::from_timestamp(*ts, 0).map(|dt| dt.date_naive()),
            Time::BusinessDay(day) => parse_day(day).map(|dt| dt.date()),
        }
    }

    /// US style date as shown in legends, e.g. `3/7/2024`.
    pub fn us_date(&self) -> Option<String> {
        self.date().map(|d| d.format("%-m/%-d/%Y").to_string())
    }
}

fn parse_day(day: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(day, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(day, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Time::Timestamp(ts) => write!(f, "{ts}"),
            Time::BusinessDay(day) => f.write_str(day),
        }
    }
}

/// A single (time, value) sample of a line or histogram series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    pub time: Time,
    pub value: f64,
}

/// OHLC bar of the price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: Time,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

pub trait Timed {
    fn time(&self) -> &Time;
}

impl Timed for LinePoint {
    fn time(&self) -> &Time {
        &self.time
    }
}

impl Timed for Candle {
    fn time(&self) -> &Time {
        &self.time
    }
}

/// Charts need strictly ascending times; anything else cannot be drawn.
pub fn is_ascending<T: Timed>(points: &[T]) -> bool {
    let mut last: Option<i64> = None;
    for point in points {
        let Some(current) = point.time().as_unix() else {
            return false;
        };
        if let Some(prev) = last {
            if current <= prev {
                return false;
            }
        }
        last = Some(current);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: Time, value: f64) -> LinePoint {
        LinePoint { time, value }
    }

    #[test]
    fn test_time_deserializes_both_encodings() {
        let ts: Time = serde_json::from_str("1709769600").unwrap();
        let day: Time = serde_json::from_str("\"2024-03-07\"").unwrap();

        assert_eq!(ts, Time::Timestamp(1709769600));
        assert_eq!(day, Time::BusinessDay("2024-03-07".to_string()));
        assert_eq!(ts.as_unix(), day.as_unix());
    }

    #[test]
    fn test_us_date_format() {
        let day = Time::BusinessDay("2024-03-07".to_string());
        assert_eq!(day.us_date().as_deref(), Some("3/7/2024"));

        let ts = Time::Timestamp(1704067200);
        assert_eq!(ts.us_date().as_deref(), Some("1/1/2024"));
    }

    #[test]
    fn test_ascending_check() {
        let sorted = vec![
            point(Time::BusinessDay("2024-01-01".into()), 1.0),
            point(Time::BusinessDay("2024-01-02".into()), 2.0),
        ];
        let reversed: Vec<_> = sorted.iter().cloned().rev().collect();
        let duplicated = vec![sorted[0].clone(), sorted[0].clone()];

        assert!(is_ascending(&sorted));
        assert!(!is_ascending(&reversed));
        assert!(!is_ascending(&duplicated));
        assert!(is_ascending::<LinePoint>(&[]));
    }

    #[test]
    fn test_datetime_strings_are_ordered() {
        let first = Time::BusinessDay("2024-01-02 00:00:00".to_string());
        let points = vec![
            point(first.clone(), 1.0),
            point(Time::BusinessDay("2024-01-03 00:00:00".into()), 2.0),
        ];

        assert_eq!(first.as_unix(), Time::BusinessDay("2024-01-02".into()).as_unix());
        assert_eq!(first.us_date().as_deref(), Some("1/2/2024"));
        assert!(is_ascending(&points));
    }

    #[test]
    fn test_unparseable_day_is_not_ascending() {
        let points = vec![point(Time::BusinessDay("yesterday".into()), 1.0)];
        assert!(!is_ascending(&points));
    }
}
