// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logbook-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logbook and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Date/time format specifiers.
//!
//! Formats use the custom-pattern language common in work-log tools (`yyyy-MM-dd HH:mm`), with
//! invariant English month/day names. A format that is a single standard letter (`d`, `G`, `s`,
//! ...) expands to a fixed custom pattern first. Formatting is total: unknown letters are copied
//! through and an unterminated quote runs to the end of the format.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

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

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const DATETIME_INPUTS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_INPUTS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Maps a single-letter standard format onto its custom pattern.
fn standard_pattern(format: &str) -> Option<&'static str> {
    let pattern = match format {
        "d" => "MM/dd/yyyy",
        "D" => "dddd, dd MMMM yyyy",
        "f" => "dddd, dd MMMM yyyy HH:mm",
        "F" => "dddd, dd MMMM yyyy HH:mm:ss",
        "g" => "MM/dd/yyyy HH:mm",
        "G" => "MM/dd/yyyy HH:mm:ss",
        "M" | "m" => "MMMM dd",
        "o" | "O" => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffff",
        "s" => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        "t" => "HH:mm",
        "T" => "HH:mm:ss",
        "u" => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        "Y" | "y" => "yyyy MMMM",
        _ => return None,
    };
    Some(pattern)
}

/// Formats `value` with a custom or single-letter standard format.
pub fn format_datetime(value: &NaiveDateTime, format: &str) -> String {
    let pattern = standard_pattern(format).unwrap_or(format);
    let chars = pattern.chars().collect::<Vec<_>>();
    let mut out = String::with_capacity(pattern.len() + 8);

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        match ch {
            '\'' | '"' => {
                let mut j = i + 1;
                while j < chars.len() && chars[j] != ch {
                    out.push(chars[j]);
                    j += 1;
                }
                i = j + 1;
            }
            '\\' => {
                match chars.get(i + 1) {
                    Some(next) => out.push(*next),
                    None => out.push('\\'),
                }
                i += 2;
            }
            // `%d` selects the one-letter custom specifier instead of a standard format.
            '%' => i += 1,
            'y' | 'M' | 'd' | 'h' | 'H' | 'm' | 's' | 'f' | 'F' | 't' => {
                let run = chars[i..].iter().take_while(|c| **c == ch).count();
                push_field(&mut out, value, ch, run);
                i += run;
            }
            _ => {
                out.push(ch);
                i += 1;
            }
        }
    }

    out
}

fn push_field(out: &mut String, value: &NaiveDateTime, letter: char, run: usize) {
    use std::fmt::Write as _;

    // Writing into a String cannot fail.
    let _ = match letter {
        'y' => {
            let year = value.year();
            match run {
                1 => write!(out, "{}", year.rem_euclid(100)),
                2 => write!(out, "{:02}", year.rem_euclid(100)),
                width => write!(out, "{year:0width$}"),
            }
        }
        'M' => {
            let month = value.month();
            match run {
                1 => write!(out, "{month}"),
                2 => write!(out, "{month:02}"),
                3 => write!(out, "{}", &MONTHS[month0(value)][..3]),
                _ => write!(out, "{}", MONTHS[month0(value)]),
            }
        }
        'd' => {
            let day = value.day();
            match run {
                1 => write!(out, "{day}"),
                2 => write!(out, "{day:02}"),
                3 => write!(out, "{}", &weekday(value)[..3]),
                _ => write!(out, "{}", weekday(value)),
            }
        }
        'h' => two_digit(out, value.hour12().1, run),
        'H' => two_digit(out, value.hour(), run),
        'm' => two_digit(out, value.minute(), run),
        's' => two_digit(out, value.second(), run),
        'f' | 'F' => {
            let digits = run.min(9);
            let nanos = format!("{:09}", value.nanosecond() % 1_000_000_000);
            let fraction = &nanos[..digits];
            if letter == 'F' {
                let trimmed = fraction.trim_end_matches('0');
                if trimmed.is_empty() && out.ends_with('.') {
                    out.pop();
                }
                out.push_str(trimmed);
            } else {
                out.push_str(fraction);
            }
            Ok(())
        }
        't' => {
            let marker = if value.hour() < 12 { "AM" } else { "PM" };
            if run == 1 {
                out.push_str(&marker[..1]);
            } else {
                out.push_str(marker);
            }
            Ok(())
        }
        other => {
            for _ in 0..run {
                out.push(other);
            }
            Ok(())
        }
    };
}

fn two_digit(out: &mut String, value: u32, run: usize) -> std::fmt::Result {
    use std::fmt::Write as _;
    if run == 1 {
        write!(out, "{value}")
    } else {
        write!(out, "{value:02}")
    }
}

fn month0(value: &NaiveDateTime) -> usize {
    value.month0() as usize
}

fn weekday(value: &NaiveDateTime) -> &'static str {
    WEEKDAYS[value.weekday().num_days_from_monday() as usize]
}

/// Parses the textual date/time forms accepted for field values.
///
/// RFC 3339 input keeps its wall-clock time; the offset is dropped. A bare date means midnight.
pub fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.naive_local());
    }

    DATETIME_INPUTS
        .iter()
        .find_map(|input| NaiveDateTime::parse_from_str(text, input).ok())
        .or_else(|| {
            DATE_INPUTS
                .iter()
                .find_map(|input| NaiveDate::parse_from_str(text, input).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;

    use super::{format_datetime, parse_datetime};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .and_then(|date| date.and_hms_opt(h, mi, s))
            .expect("valid timestamp")
    }

    #[rstest]
    #[case("yyyy-MM-dd", "2024-05-01")]
    #[case("yyyy-MM-dd HH:mm", "2024-05-01 14:30")]
    #[case("dd.MM.yy", "01.05.24")]
    #[case("d/M/yyyy", "1/5/2024")]
    #[case("h:mm tt", "2:30 PM")]
    #[case("hh:mm t", "02:30 P")]
    #[case("dddd, MMMM d", "Wednesday, May 1")]
    #[case("ddd MMM", "Wed May")]
    #[case("HH:mm:ss", "14:30:09")]
    #[case("'Week of' yyyy", "Week of 2024")]
    #[case("\"at\" HH\\h", "at 14h")]
    #[case("yyyy 'unterminated", "2024 unterminated")]
    #[case("%d", "1")]
    #[case("d", "05/01/2024")]
    #[case("G", "05/01/2024 14:30:09")]
    #[case("s", "2024-05-01T14:30:09")]
    #[case("u", "2024-05-01 14:30:09Z")]
    #[case("t", "14:30")]
    #[case("Q: yyyy", "Q: 2024")]
    #[case("", "")]
    fn formats_custom_and_standard_patterns(#[case] format: &str, #[case] expected: &str) {
        assert_eq!(format_datetime(&at(2024, 5, 1, 14, 30, 9), format), expected);
    }

    #[rstest]
    fn fractional_seconds_pad_or_trim() {
        let value = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_milli_opt(8, 0, 0, 120))
            .expect("valid timestamp");
        assert_eq!(format_datetime(&value, "ss.fff"), "00.120");
        assert_eq!(format_datetime(&value, "ss.FFF"), "00.12");
        assert_eq!(format_datetime(&at(2024, 5, 1, 8, 0, 0), "ss.FFF"), "00");
        assert_eq!(format_datetime(&value, "h tt"), "8 AM");
    }

    #[rstest]
    #[case("2024-05-01T14:30:00Z", at(2024, 5, 1, 14, 30, 0))]
    #[case("2024-05-01T14:30:00+02:00", at(2024, 5, 1, 14, 30, 0))]
    #[case("2024-05-01 14:30", at(2024, 5, 1, 14, 30, 0))]
    #[case("2024-05-01T14:30:15", at(2024, 5, 1, 14, 30, 15))]
    #[case("2024/05/01 09:05", at(2024, 5, 1, 9, 5, 0))]
    #[case(" 2024-05-01 ", at(2024, 5, 1, 0, 0, 0))]
    #[case("2024/05/01", at(2024, 5, 1, 0, 0, 0))]
    fn parses_accepted_inputs(#[case] text: &str, #[case] expected: NaiveDateTime) {
        assert_eq!(parse_datetime(text), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("tomorrow")]
    #[case("2024-13-01")]
    #[case("01.05.2024")]
    fn rejects_other_text(#[case] text: &str) {
        assert_eq!(parse_datetime(text), None);
    }
}
