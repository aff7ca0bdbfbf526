use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};

/// Named relative window over `expiry_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFrame {
    #[default]
    Today,
    Tomorrow,
    CurrentWeek,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid timeframe '{0}'. Use 'Today', 'Tommorow', or 'CurrentWeek'.")]
pub struct InvalidTimeFrame(pub String);

impl FromStr for TimeFrame {
    type Err = InvalidTimeFrame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "today" => Ok(TimeFrame::Today),
            // "Tommorow" is the spelling existing clients send
            "tommorow" | "tomorrow" => Ok(TimeFrame::Tomorrow),
            "currentweek" => Ok(TimeFrame::CurrentWeek),
            _ => Err(InvalidTimeFrame(s.to_string())),
        }
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeFrame::Today => "Today",
            TimeFrame::Tomorrow => "Tommorow",
            TimeFrame::CurrentWeek => "CurrentWeek",
        };
        f.write_str(name)
    }
}

/// Half-open `[start, end)` bounds for `frame`, anchored at midnight UTC of
/// `today`.
///
/// `CurrentWeek` ends `(7 - weekday) % 7` days after today with Sunday as 0,
/// so on a Sunday the window is empty.
pub fn bounds(frame: TimeFrame, today: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let (start, end) = match frame {
        TimeFrame::Today => (today, today + Days::new(1)),
        TimeFrame::Tomorrow => (today + Days::new(1), today + Days::new(2)),
        TimeFrame::CurrentWeek => {
            let diff = (7 - today.weekday().num_days_from_sunday()) % 7;
            (today, today + Days::new(u64::from(diff)))
        }
    };

    (midnight(start), midnight(end))
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_today_and_tomorrow() {
        // 2025-06-04 is a Wednesday
        let today = date(2025, 6, 4);
        assert_eq!(bounds(TimeFrame::Today, today), (at(2025, 6, 4), at(2025, 6, 5)));
        assert_eq!(bounds(TimeFrame::Tomorrow, today), (at(2025, 6, 5), at(2025, 6, 6)));
    }

    #[test]
    fn test_tomorrow_crosses_month_end() {
        let today = date(2025, 1, 31);
        assert_eq!(bounds(TimeFrame::Tomorrow, today), (at(2025, 2, 1), at(2025, 2, 2)));
    }

    #[test]
    fn test_current_week_runs_until_sunday() {
        // Monday -> 6 days, Wednesday -> 4 days, Saturday -> 1 day
        assert_eq!(bounds(TimeFrame::CurrentWeek, date(2025, 6, 2)), (at(2025, 6, 2), at(2025, 6, 8)));
        assert_eq!(bounds(TimeFrame::CurrentWeek, date(2025, 6, 4)), (at(2025, 6, 4), at(2025, 6, 8)));
        assert_eq!(bounds(TimeFrame::CurrentWeek, date(2025, 6, 7)), (at(2025, 6, 7), at(2025, 6, 8)));
    }

    #[test]
    fn test_current_week_is_empty_on_sunday() {
        let (start, end) = bounds(TimeFrame::CurrentWeek, date(2025, 6, 8));
        assert_eq!(start, end);
        assert_eq!(start, at(2025, 6, 8));
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Today".parse::<TimeFrame>(), Ok(TimeFrame::Today));
        assert_eq!("today".parse::<TimeFrame>(), Ok(TimeFrame::Today));
        assert_eq!("Tommorow".parse::<TimeFrame>(), Ok(TimeFrame::Tomorrow));
        assert_eq!("Tomorrow".parse::<TimeFrame>(), Ok(TimeFrame::Tomorrow));
        assert_eq!("CurrentWeek".parse::<TimeFrame>(), Ok(TimeFrame::CurrentWeek));
        assert_eq!(
            "Yesterday".parse::<TimeFrame>(),
            Err(InvalidTimeFrame("Yesterday".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for frame in [TimeFrame::Today, TimeFrame::Tomorrow, TimeFrame::CurrentWeek] {
            assert_eq!(frame.to_string().parse::<TimeFrame>(), Ok(frame));
        }
    }
}
