//! Date formatting in the journal's US-English display style.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// `Jan 5, 2024`
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%b %-d, %Y").to_string()
}

/// `Jan 5, 2024, 3:07 PM`
pub fn format_date_time<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%b %-d, %Y, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_date() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 15, 7, 0).unwrap();
        assert_eq!(format_date(&dt), "Jan 5, 2024");
    }

    #[test]
    fn test_format_date_time() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 5, 15, 7, 0).unwrap();
        assert_eq!(format_date_time(&dt), "Jan 5, 2024, 3:07 PM");

        let midnight = Utc.with_ymd_and_hms(2023, 12, 31, 0, 30, 0).unwrap();
        assert_eq!(format_date_time(&midnight), "Dec 31, 2023, 12:30 AM");
    }

    #[test]
    fn test_uses_the_value_offset() {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let dt = est.with_ymd_and_hms(2024, 3, 9, 21, 0, 0).unwrap();
        assert_eq!(format_date(&dt), "Mar 9, 2024");
    }
}
