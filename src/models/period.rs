//! Reporting periods
//!
//! Granularity of the accounting report and the date range used by the
//! dashboard.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar bucket size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    /// Parse granularity from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Some(Self::Daily),
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "yearly" | "year" | "y" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Zero-padded sortable key of the bucket containing `date`
    ///
    /// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; lexicographic order on keys of one
    /// granularity is chronological order.
    pub fn key(&self, date: NaiveDate) -> String {
        match self {
            Self::Daily => date.format("%Y-%m-%d").to_string(),
            Self::Monthly => format!("{:04}-{:02}", date.year(), date.month()),
            Self::Yearly => format!("{:04}", date.year()),
        }
    }

    /// Human label for a key produced by [`Granularity::key`]
    ///
    /// Months in keys are 1-based, as are chrono's. Returns `None` for a key
    /// that does not parse at this granularity.
    pub fn display_label(&self, key: &str) -> Option<String> {
        match self {
            Self::Daily => NaiveDate::parse_from_str(key, "%Y-%m-%d")
                .ok()
                .map(|d| d.format("%-d %b %Y").to_string()),
            Self::Monthly => {
                let (year, month) = key.split_once('-')?;
                let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
                Some(date.format("%B %Y").to_string())
            }
            Self::Yearly => key.parse::<i32>().ok().map(|y| y.to_string()),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "daily"),
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// Inclusive range of instants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Range covering whole UTC days `start..=end`
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: start.and_time(NaiveTime::MIN).and_utc(),
            end: end.and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
                - Duration::nanoseconds(1),
        }
    }

    /// The calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let next_first = if first.month() == 12 {
            NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
        }
        .unwrap_or(first);
        Self::from_dates(first, next_first.pred_opt().unwrap_or(first))
    }

    /// The current calendar month (UTC)
    pub fn current_month() -> Self {
        Self::month_of(Utc::now().date_naive())
    }

    /// Check if an instant falls inside the range
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_keys_are_zero_padded() {
        let d = date(2024, 3, 5);
        assert_eq!(Granularity::Daily.key(d), "2024-03-05");
        assert_eq!(Granularity::Monthly.key(d), "2024-03");
        assert_eq!(Granularity::Yearly.key(d), "2024");
    }

    #[test]
    fn test_month_labels_keep_one_based_months() {
        assert_eq!(
            Granularity::Monthly.display_label("2024-01").as_deref(),
            Some("January 2024")
        );
        assert_eq!(
            Granularity::Monthly.display_label("2023-12").as_deref(),
            Some("December 2023")
        );
        assert_eq!(Granularity::Monthly.display_label("2023-13"), None);
    }

    #[test]
    fn test_day_and_year_labels() {
        assert_eq!(
            Granularity::Daily.display_label("2024-03-05").as_deref(),
            Some("5 Mar 2024")
        );
        assert_eq!(Granularity::Yearly.display_label("2024").as_deref(), Some("2024"));
        assert_eq!(Granularity::Daily.display_label("2024-02-30"), None);
    }

    #[test]
    fn test_key_order_is_chronological_across_year_boundary() {
        for granularity in [Granularity::Daily, Granularity::Monthly, Granularity::Yearly] {
            let earlier = granularity.key(date(2023, 12, 31));
            let later = granularity.key(date(2024, 1, 1));
            assert!(earlier < later, "{granularity}: {earlier} !< {later}");
        }
    }

    #[test]
    fn test_month_of_covers_whole_month() {
        let range = DateRange::month_of(date(2024, 2, 14));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap()));
        assert!(!range.contains(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()));

        let december = DateRange::month_of(date(2023, 12, 3));
        assert!(december.contains(Utc.with_ymd_and_hms(2023, 12, 31, 12, 0, 0).unwrap()));
        assert!(!december.contains(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn test_granularity_parse() {
        assert_eq!(Granularity::parse("Daily"), Some(Granularity::Daily));
        assert_eq!(Granularity::parse("y"), Some(Granularity::Yearly));
        assert_eq!(Granularity::parse("weekly"), None);
    }
}
