use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};

/// `"YYYY WW"` using the ISO week-numbering year, so keys sort chronologically.
pub fn week_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String {
    let week = timestamp.iso_week();
    format!("{} {:02}", week.year(), week.week())
}

/// Calendar day in the timestamp's own offset.
pub fn day_key<Tz: TimeZone>(timestamp: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%Y-%m-%d").to_string()
}

/// Monday 00:00 UTC of the ISO week containing `now - weeks`.
pub fn weeks_back_start(now: DateTime<Utc>, weeks: u32) -> Option<DateTime<Utc>> {
    let target = now.checked_sub_signed(Duration::weeks(i64::from(weeks)))?;
    let iso = target.iso_week();
    let monday = NaiveDate::from_isoywd_opt(iso.year(), iso.week(), Weekday::Mon)?;
    Some(Utc.from_utc_datetime(&monday.and_hms_opt(0, 0, 0)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn week_key_pads_and_uses_iso_year() {
        assert_eq!(week_key(&utc("2024-02-01T10:00:00Z")), "2024 05");
        assert_eq!(week_key(&utc("2024-12-30T10:00:00Z")), "2025 01");
        assert_eq!(week_key(&utc("2021-01-03T10:00:00Z")), "2020 53");
    }

    #[test]
    fn week_keys_sort_chronologically() {
        let stamps = [
            "2019-12-31T00:00:00Z",
            "2020-01-08T00:00:00Z",
            "2020-03-02T00:00:00Z",
            "2020-12-31T00:00:00Z",
            "2021-06-01T00:00:00Z",
            "2023-10-10T00:00:00Z",
        ];
        let keys: Vec<String> = stamps.iter().map(|s| week_key(&utc(s))).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn day_key_uses_the_timestamps_offset() {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T23:30:00-05:00").unwrap();
        assert_eq!(day_key(&ts), "2024-03-01");
        let as_utc: DateTime<FixedOffset> = ts.with_timezone(&FixedOffset::east_opt(0).unwrap());
        assert_eq!(day_key(&as_utc), "2024-03-02");
    }

    #[test]
    fn weeks_back_start_lands_on_monday_midnight() {
        // Thursday
        let now = utc("2024-02-15T13:45:00Z");
        let start = weeks_back_start(now, 2).unwrap();
        assert_eq!(start, utc("2024-01-29T00:00:00Z"));
        assert_eq!(start.weekday(), Weekday::Mon);

        let this_week = weeks_back_start(now, 0).unwrap();
        assert_eq!(this_week, utc("2024-02-12T00:00:00Z"));
    }
}
