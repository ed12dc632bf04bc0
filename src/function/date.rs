use super::Arguments;
use crate::log::{error_argument, Error, INVALID_DATE};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeDelta, TimeZone, Timelike, Utc, Weekday,
};
use serde_json::Value;
use std::fmt::{self, Display, Formatter, Write};

/// Format used by `strtodate` when none is given.
const DEFAULT_FORMAT: &str = "Y-m-d H:i:s";

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Dates that carry their own offset.
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d.%m.%Y",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// `time()`, the current Unix timestamp in seconds.
pub fn time(_: &Arguments) -> Result<Value, Error> {
    Ok(Value::from(Utc::now().timestamp()))
}

/// `date(format, timestamp = now)` in local time.
pub fn date(arguments: &Arguments) -> Result<Value, Error> {
    let format = arguments.text(0)?;
    let moment = timestamp_or_now(arguments, 1)?
        .with_timezone(&Local)
        .fixed_offset();

    Ok(Value::from(Formatted::local(&moment, &format).to_string()))
}

/// `gmdate(format, timestamp = now)` in UTC.
pub fn gmdate(arguments: &Arguments) -> Result<Value, Error> {
    let format = arguments.text(0)?;
    let moment = timestamp_or_now(arguments, 1)?.fixed_offset();

    Ok(Value::from(Formatted::utc(&moment, &format).to_string()))
}

/// `strtotime(text, base = now)`, the Unix timestamp `text` describes.
pub fn strtotime(arguments: &Arguments) -> Result<Value, Error> {
    let text = arguments.text(0)?;
    let base = timestamp_or_now(arguments, 1)?.with_timezone(&Local);

    parse_date(&text, &base)
        .map(|moment| Value::from(moment.timestamp()))
        .ok_or_else(|| error_date(arguments.name(), &text))
}

/// `strtodate(text, format = "Y-m-d H:i:s")`, `strtotime` followed by `date`.
pub fn strtodate(arguments: &Arguments) -> Result<Value, Error> {
    let text = arguments.text(0)?;
    let format = arguments
        .text_or_none(1)?
        .filter(|format| !format.is_empty())
        .unwrap_or_else(|| DEFAULT_FORMAT.to_owned());

    let moment = parse_date(&text, &Local::now())
        .ok_or_else(|| error_date(arguments.name(), &text))?
        .fixed_offset();

    Ok(Value::from(Formatted::local(&moment, &format).to_string()))
}

fn error_date(name: &str, text: &str) -> Error {
    Error::build(INVALID_DATE).with_help(format!("`{name}` could not understand `{text}`"))
}

fn timestamp_or_now(arguments: &Arguments, index: usize) -> Result<DateTime<Utc>, Error> {
    match arguments.integer_or_none(index)? {
        Some(seconds) => DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| error_argument(arguments.name(), index, "a representable timestamp")),
        None => Ok(Utc::now()),
    }
}

/// A moment written out with a format made of PHP `date` letters.
///
/// Letters without a meaning are copied, and `\` copies the character after
/// it whatever it is.
#[derive(Clone, Copy)]
struct Formatted<'a> {
    moment: &'a DateTime<FixedOffset>,
    format: &'a str,
    /// Name the zone `UTC` rather than by its offset.
    utc: bool,
}

impl<'a> Formatted<'a> {
    fn local(moment: &'a DateTime<FixedOffset>, format: &'a str) -> Self {
        Formatted {
            moment,
            format,
            utc: false,
        }
    }

    fn utc(moment: &'a DateTime<FixedOffset>, format: &'a str) -> Self {
        Formatted {
            moment,
            format,
            utc: true,
        }
    }

    fn with_format(self, format: &'a str) -> Self {
        Formatted { format, ..self }
    }
}

impl Display for Formatted<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let m = self.moment;
        let weekday = WEEKDAYS[m.weekday().num_days_from_monday() as usize];
        let month = MONTHS[m.month0() as usize];
        let offset = m.offset().local_minus_utc();

        let mut chars = self.format.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        f.write_char(escaped)?;
                    }
                }
                // Day
                'd' => write!(f, "{:02}", m.day())?,
                'D' => f.write_str(&weekday[..3])?,
                'j' => write!(f, "{}", m.day())?,
                'l' => f.write_str(weekday)?,
                'N' => write!(f, "{}", m.weekday().number_from_monday())?,
                'S' => f.write_str(ordinal_suffix(m.day()))?,
                'w' => write!(f, "{}", m.weekday().num_days_from_sunday())?,
                'z' => write!(f, "{}", m.ordinal0())?,
                // Week
                'W' => write!(f, "{:02}", m.iso_week().week())?,
                // Month
                'F' => f.write_str(month)?,
                'm' => write!(f, "{:02}", m.month())?,
                'M' => f.write_str(&month[..3])?,
                'n' => write!(f, "{}", m.month())?,
                't' => write!(f, "{}", days_in_month(m.year(), m.month()))?,
                // Year
                'L' => write!(f, "{}", is_leap(m.year()) as u8)?,
                'o' => write!(f, "{}", m.iso_week().year())?,
                'Y' => write!(f, "{:04}", m.year())?,
                'y' => write!(f, "{:02}", m.year().rem_euclid(100))?,
                // Time
                'a' => f.write_str(if m.hour12().0 { "pm" } else { "am" })?,
                'A' => f.write_str(if m.hour12().0 { "PM" } else { "AM" })?,
                'g' => write!(f, "{}", m.hour12().1)?,
                'G' => write!(f, "{}", m.hour())?,
                'h' => write!(f, "{:02}", m.hour12().1)?,
                'H' => write!(f, "{:02}", m.hour())?,
                'i' => write!(f, "{:02}", m.minute())?,
                's' => write!(f, "{:02}", m.second())?,
                'u' => write!(f, "{:06}", m.timestamp_subsec_micros())?,
                'v' => write!(f, "{:03}", m.timestamp_subsec_millis())?,
                // Zone
                'e' | 'T' if self.utc => f.write_str("UTC")?,
                'e' | 'T' | 'P' => write_offset(f, offset, true)?,
                'p' if offset == 0 => f.write_char('Z')?,
                'p' => write_offset(f, offset, true)?,
                'O' => write_offset(f, offset, false)?,
                'Z' => write!(f, "{offset}")?,
                // Full date and time
                'c' => self.with_format("Y-m-d\\TH:i:sP").fmt(f)?,
                'r' => self.with_format("D, d M Y H:i:s O").fmt(f)?,
                'U' => write!(f, "{}", m.timestamp())?,
                other => f.write_char(other)?,
            }
        }

        Ok(())
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

fn is_leap(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn write_offset(f: &mut Formatter<'_>, seconds: i32, colon: bool) -> fmt::Result {
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.unsigned_abs() / 60;
    let separator = if colon { ":" } else { "" };

    write!(f, "{sign}{:02}{separator}{:02}", minutes / 60, minutes % 60)
}

/// Parse a free-form date, such as `2024-01-10 15:30`, `tomorrow noon`, or
/// `2 weeks ago`, relative to `now`.
///
/// An absolute date may open the text and be followed by relative words,
/// which are applied in order. Returns `None` if any part of the text is not
/// understood.
pub(crate) fn parse_date<Tz>(text: &str, now: &DateTime<Tz>) -> Option<DateTime<Tz>>
where
    Tz: TimeZone,
{
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let zone = now.timezone();
    if let Some(seconds) = text.strip_prefix('@') {
        let seconds = seconds.trim().parse::<i64>().ok()?;
        return DateTime::from_timestamp(seconds, 0).map(|moment| moment.with_timezone(&zone));
    }
    if let Some(moment) = parse_zoned(text) {
        return Some(moment.with_timezone(&zone));
    }

    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    let (start, rest) = match parse_absolute(&words) {
        Some((start, used)) => (start, &words[used..]),
        None => (now.naive_local(), &words[..]),
    };

    let local = apply_relative(start, rest)?;
    zone.from_local_datetime(&local).earliest()
}

fn parse_zoned(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .ok()
        .or_else(|| {
            ZONED_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(text, format).ok())
        })
}

/// Parse the longest absolute date that opens `words`, returning it with the
/// number of words it spans.
fn parse_absolute(words: &[String]) -> Option<(NaiveDateTime, usize)> {
    (1..=words.len().min(3)).rev().find_map(|count| {
        let candidate = words[..count].join(" ");
        let datetime = DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&candidate, format).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(&candidate, format).ok())
                    .map(|date| date.and_time(NaiveTime::MIN))
            });

        datetime.map(|datetime| (datetime, count))
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Fortnight,
    Month,
    Year,
}

impl Unit {
    fn parse(word: &str) -> Option<Self> {
        let unit = match word {
            "sec" | "secs" | "second" | "seconds" => Unit::Second,
            "min" | "mins" | "minute" | "minutes" => Unit::Minute,
            "hour" | "hours" => Unit::Hour,
            "day" | "days" => Unit::Day,
            "week" | "weeks" => Unit::Week,
            "fortnight" | "fortnights" => Unit::Fortnight,
            "month" | "months" => Unit::Month,
            "year" | "years" => Unit::Year,
            _ => return None,
        };

        Some(unit)
    }

    fn seconds(self) -> Option<i64> {
        match self {
            Unit::Second => Some(1),
            Unit::Minute => Some(60),
            Unit::Hour => Some(3_600),
            Unit::Day => Some(86_400),
            Unit::Week => Some(604_800),
            Unit::Fortnight => Some(1_209_600),
            Unit::Month | Unit::Year => None,
        }
    }
}

/// Move `moment` by `amount` of `unit`.
///
/// Months and years keep the day of the month where it exists, and clamp to
/// the last day of the month where it does not.
fn shift(moment: NaiveDateTime, amount: i64, unit: Unit) -> Option<NaiveDateTime> {
    if let Some(seconds) = unit.seconds() {
        let delta = TimeDelta::try_seconds(amount.checked_mul(seconds)?)?;
        return moment.checked_add_signed(delta);
    }

    let months = match unit {
        Unit::Year => amount.checked_mul(12)?,
        _ => amount,
    };
    let count = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months < 0 {
        moment.checked_sub_months(count)
    } else {
        moment.checked_add_months(count)
    }
}

/// Move to the given weekday at midnight.
///
/// `step` is `1` for the next one after today, `-1` for the last one before
/// today, and `0` for today or the next one.
fn to_weekday(moment: NaiveDateTime, weekday: Weekday, step: i8) -> Option<NaiveDateTime> {
    let today = moment.weekday().num_days_from_monday() as i64;
    let target = weekday.num_days_from_monday() as i64;
    let days = match step {
        0 => (target - today).rem_euclid(7),
        1 => (target - today - 1).rem_euclid(7) + 1,
        _ => -((today - target - 1).rem_euclid(7) + 1),
    };

    midnight(moment).checked_add_signed(TimeDelta::try_days(days)?)
}

fn midnight(moment: NaiveDateTime) -> NaiveDateTime {
    moment.date().and_time(NaiveTime::MIN)
}

fn parse_time(word: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(word, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(word, "%H:%M"))
        .ok()
}

/// Apply relative words, which are already lowercase, to `moment`.
fn apply_relative(mut moment: NaiveDateTime, words: &[String]) -> Option<NaiveDateTime> {
    let mut index = 0;

    while let Some(word) = words.get(index) {
        index += 1;
        moment = match word.as_str() {
            "now" => moment,
            "today" | "midnight" => midnight(moment),
            "noon" => moment.date().and_hms_opt(12, 0, 0)?,
            "tomorrow" => midnight(moment).checked_add_signed(TimeDelta::try_days(1)?)?,
            "yesterday" => midnight(moment).checked_sub_signed(TimeDelta::try_days(1)?)?,
            "next" | "last" | "previous" | "this" => {
                let step = match word.as_str() {
                    "next" => 1,
                    "this" => 0,
                    _ => -1,
                };
                let target = words.get(index)?;
                index += 1;

                match target.parse::<Weekday>() {
                    Ok(weekday) => to_weekday(moment, weekday, step)?,
                    Err(_) => shift(moment, i64::from(step), Unit::parse(target)?)?,
                }
            }
            word => {
                if let Ok(weekday) = word.parse::<Weekday>() {
                    to_weekday(moment, weekday, 0)?
                } else if let Some(time) = parse_time(word) {
                    moment.date().and_time(time)
                } else {
                    let mut amount = word.parse::<i64>().ok()?;
                    let unit = Unit::parse(words.get(index)?)?;
                    index += 1;
                    if words.get(index).is_some_and(|next| next == "ago") {
                        amount = amount.checked_neg()?;
                        index += 1;
                    }

                    shift(moment, amount, unit)?
                }
            }
        };
    }

    Some(moment)
}
