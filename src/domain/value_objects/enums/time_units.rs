use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let unit = match self {
            TimeUnit::Days => "DAYS",
            TimeUnit::Weeks => "WEEKS",
            TimeUnit::Months => "MONTHS",
            TimeUnit::Years => "YEARS",
        };
        write!(f, "{}", unit)
    }
}

impl TimeUnit {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "DAYS" => Some(TimeUnit::Days),
            "WEEKS" => Some(TimeUnit::Weeks),
            "MONTHS" => Some(TimeUnit::Months),
            "YEARS" => Some(TimeUnit::Years),
            _ => None,
        }
    }

    /// Calendar arithmetic for one paid period. Months and years follow
    /// calendar boundaries, so Jan 31 + 1 month clamps to Feb 28/29.
    pub fn add_to(&self, start: DateTime<Utc>, duration: i32) -> Option<DateTime<Utc>> {
        match self {
            TimeUnit::Days => start.checked_add_signed(Duration::days(duration.into())),
            TimeUnit::Weeks => start.checked_add_signed(Duration::weeks(duration.into())),
            TimeUnit::Months => start.checked_add_months(Months::new(duration.try_into().ok()?)),
            TimeUnit::Years => {
                let months = duration.checked_mul(12)?;
                start.checked_add_months(Months::new(months.try_into().ok()?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_known_units_case_insensitively() {
        assert_eq!(TimeUnit::from_str("DAYS"), Some(TimeUnit::Days));
        assert_eq!(TimeUnit::from_str("months"), Some(TimeUnit::Months));
        assert_eq!(TimeUnit::from_str("fortnights"), None);
    }

    #[test]
    fn month_addition_clamps_to_calendar_boundaries() {
        let start = Utc.with_ymd_and_hms(2025, 1, 31, 12, 0, 0).unwrap();
        let end = TimeUnit::Months.add_to(start, 1).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2025, 2, 28, 12, 0, 0).unwrap());
    }

    #[test]
    fn year_addition_is_twelve_months() {
        let start = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let end = TimeUnit::Years.add_to(start, 2).unwrap();
        assert_eq!(end, Utc.with_ymd_and_hms(2027, 3, 10, 0, 0, 0).unwrap());
    }
}
