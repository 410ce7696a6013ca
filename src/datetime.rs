use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMERIC_DATE_REGEX: Regex = Regex::new(
        r"^(\d{1,4})[-/.](\d{1,2})[-/.](\d{1,4})(?:(?:T|\s+|,\s*)(\d{1,2})[:.](\d{1,2})(?:[:.](\d{1,2}))?(?:[.,]\d+)?(?:(?:\s|\u{202F})?([AaPp]\.?\s?[Mm]\.?))?)?\s*(Z|[+-]\d{2}:?\d{2})?$"
    )
    .unwrap();
    static ref OFFSET_REGEX: Regex = Regex::new(r"^([+-])(\d{2}):?(\d{2})$").unwrap();
}

/// Formats DiscordChatExporter used before switching to ISO dates.
const TEXTUAL_FORMATS: &[&str] = &[
    "%d-%b-%y %I:%M %p",
    "%d-%b-%Y %I:%M %p",
    "%d-%b-%y %H:%M",
    "%d-%b-%Y %H:%M",
];

/// Parses the date column of a chat export.
///
/// Accepts RFC 3339, numeric dates (`2021-01-01`, `1/13/2021 5:06 PM`,
/// `13.01.21 17:06:00`, ...) and the older `03-Jan-19 05:25 PM` form. Values
/// without an explicit offset are read as UTC.
///
/// `days_first` decides how ambiguous numeric dates such as `03/06/2021` are
/// read. It is ignored when the date starts with a 4-digit year.
pub fn parse_timestamp(value: &str, days_first: bool) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }

    if let Some(date) = parse_numeric(value, days_first) {
        return Some(date);
    }

    TEXTUAL_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}

fn parse_numeric(value: &str, days_first: bool) -> Option<DateTime<Utc>> {
    let caps = NUMERIC_DATE_REGEX.captures(value)?;
    let a = caps.get(1)?.as_str();
    let b = caps.get(2)?.as_str();
    let c = caps.get(3)?.as_str();

    let (year, month, day) = if a.len() == 4 {
        normalize_date(a, b, c)
    } else if days_first {
        normalize_date(c, b, a)
    } else {
        normalize_date(c, a, b)
    };
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let time = match caps.get(4) {
        Some(hours) => {
            let mut hours: u32 = hours.as_str().parse().ok()?;
            let minutes: u32 = caps.get(5)?.as_str().parse().ok()?;
            let seconds: u32 = caps.get(6).map_or(Some(0), |s| s.as_str().parse().ok())?;
            if let Some(ampm) = caps.get(7) {
                hours = convert_hour_12_to_24(hours, &normalize_ampm(ampm.as_str()))?;
            }
            NaiveTime::from_hms_opt(hours, minutes, seconds)?
        }
        None => NaiveTime::from_hms_opt(0, 0, 0)?,
    };
    let naive = date.and_time(time);

    match caps.get(8) {
        Some(offset) => {
            let offset = parse_offset(offset.as_str())?;
            let local = offset.from_local_datetime(&naive).single()?;
            Some(local.with_timezone(&Utc))
        }
        None => Some(Utc.from_utc_datetime(&naive)),
    }
}

fn parse_offset(offset: &str) -> Option<FixedOffset> {
    if offset == "Z" {
        return FixedOffset::east_opt(0);
    }
    let caps = OFFSET_REGEX.captures(offset)?;
    let hours: i32 = caps.get(2)?.as_str().parse().ok()?;
    let minutes: i32 = caps.get(3)?.as_str().parse().ok()?;
    let seconds = hours * 3600 + minutes * 60;
    if caps.get(1)?.as_str() == "-" {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}

/// Takes `year`, `month` and `day` as strings and turns them into numbers.
/// 2 digit years are assumed to be in the 2000-2099 range.
pub fn normalize_date(year: &str, month: &str, day: &str) -> (i32, u32, u32) {
    let year: i32 = year.parse().unwrap_or(0);
    let year = if year < 100 { 2000 + year } else { year };
    (year, month.parse().unwrap_or(0), day.parse().unwrap_or(0))
}

/// Converts an hour from 12 hour format to 24 hour format. Returns `None` for
/// hours that cannot appear on a 12 hour clock.
pub fn convert_hour_12_to_24(hours: u32, ampm: &str) -> Option<u32> {
    if !(1..=12).contains(&hours) {
        return None;
    }
    let hours = if hours == 12 { 0 } else { hours };
    Some(if ampm == "PM" { hours + 12 } else { hours })
}

/// Normalizes `am` / `a.m.` / etc. to `AM` (uppercase, no other characters).
pub fn normalize_ampm(ampm: &str) -> String {
    ampm.replace(|c: char| !c.is_alphabetic(), "").to_uppercase()
}

/// Drops the time of day.
pub fn truncate_to_day(date: &DateTime<Utc>) -> NaiveDate {
    date.date_naive()
}

/// Start of the bucket a timestamp falls into: the day itself minus
/// `day_of_month % bucket_days` days.
///
/// Buckets are anchored to the day of the month rather than to a fixed
/// epoch, so their boundaries shift at every month change.
pub fn period_start(date: &DateTime<Utc>, bucket_days: u32) -> NaiveDate {
    let day = truncate_to_day(date);
    day - Days::new(u64::from(day.day() % bucket_days.max(1)))
}
