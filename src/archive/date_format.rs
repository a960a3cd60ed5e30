//! Moment-style date patterns (`YYYY-MM-DD HH:mm`, `[Archived] Do MMM`)
//! rendered through chrono.

use crate::error::{KanbanError, Result};
use chrono::{Datelike, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    YearShort,
    MonthName,
    MonthAbbrev,
    Month,
    MonthPadded,
    DayOrdinal,
    Day,
    DayPadded,
    WeekdayName,
    WeekdayAbbrev,
    WeekdayMin,
    Hour24,
    Hour24Padded,
    Hour12,
    Hour12Padded,
    Minute,
    MinutePadded,
    Second,
    SecondPadded,
    MeridiemUpper,
    MeridiemLower,
    UnixSeconds,
}

// Longest tokens first so `YYYY` wins over `YY`.
const TOKENS: &[(&str, Field)] = &[
    ("YYYY", Field::Year),
    ("MMMM", Field::MonthName),
    ("dddd", Field::WeekdayName),
    ("MMM", Field::MonthAbbrev),
    ("ddd", Field::WeekdayAbbrev),
    ("YY", Field::YearShort),
    ("MM", Field::MonthPadded),
    ("Do", Field::DayOrdinal),
    ("DD", Field::DayPadded),
    ("dd", Field::WeekdayMin),
    ("HH", Field::Hour24Padded),
    ("hh", Field::Hour12Padded),
    ("mm", Field::MinutePadded),
    ("ss", Field::SecondPadded),
    ("M", Field::Month),
    ("D", Field::Day),
    ("H", Field::Hour24),
    ("h", Field::Hour12),
    ("m", Field::Minute),
    ("s", Field::Second),
    ("A", Field::MeridiemUpper),
    ("a", Field::MeridiemLower),
    ("X", Field::UnixSeconds),
];

/// Used in place of an empty pattern: ISO 8601 local time.
pub const DEFAULT_PATTERN: &str = "YYYY-MM-DDTHH:mm:ss";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// A parsed date pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    segments: Vec<Segment>,
}

impl DateFormat {
    /// Parses `pattern`, rejecting unterminated `[` literals with
    /// [`KanbanError::ConfigError`]. An empty pattern means
    /// [`DEFAULT_PATTERN`].
    pub fn parse(pattern: &str) -> Result<Self> {
        Self::tokenize(or_default(pattern), true)
    }

    /// Parses `pattern` without failing: an unterminated `[` makes the rest
    /// of the pattern literal text.
    pub fn parse_lossy(pattern: &str) -> Self {
        let pattern = or_default(pattern);
        match Self::tokenize(pattern, false) {
            Ok(format) => format,
            // tokenize only fails in strict mode
            Err(_) => Self {
                segments: vec![Segment::Literal(pattern.to_string())],
            },
        }
    }

    fn tokenize(pattern: &str, strict: bool) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = pattern;

        'outer: while let Some(c) = rest.chars().next() {
            if c == '[' {
                match rest[1..].find(']') {
                    Some(end) => {
                        literal.push_str(&rest[1..=end]);
                        rest = &rest[end + 2..];
                    }
                    None if strict => {
                        return Err(KanbanError::ConfigError(format!(
                            "Unterminated literal in archive date format '{}'",
                            pattern
                        )));
                    }
                    None => {
                        literal.push_str(&rest[1..]);
                        rest = "";
                    }
                }
                continue;
            }

            for (token, field) in TOKENS {
                if let Some(after) = rest.strip_prefix(*token) {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(*field));
                    rest = after;
                    continue 'outer;
                }
            }

            literal.push(c);
            rest = &rest[c.len_utf8()..];
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Renders `at` with this pattern
    pub fn render(&self, at: &NaiveDateTime) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(&render_field(*field, at)),
            }
        }
        out
    }
}

fn or_default(pattern: &str) -> &str {
    if pattern.is_empty() {
        DEFAULT_PATTERN
    } else {
        pattern
    }
}

fn render_field(field: Field, at: &NaiveDateTime) -> String {
    let spec = match field {
        Field::DayOrdinal => return ordinal(at.day()),
        Field::WeekdayMin => {
            let name = at.format("%a").to_string();
            return name.chars().take(2).collect();
        }
        Field::MeridiemLower => return at.format("%p").to_string().to_lowercase(),
        Field::UnixSeconds => return at.and_utc().timestamp().to_string(),
        Field::Year => "%Y",
        Field::YearShort => "%y",
        Field::MonthName => "%B",
        Field::MonthAbbrev => "%b",
        Field::Month => "%-m",
        Field::MonthPadded => "%m",
        Field::Day => "%-d",
        Field::DayPadded => "%d",
        Field::WeekdayName => "%A",
        Field::WeekdayAbbrev => "%a",
        Field::Hour24 => "%-H",
        Field::Hour24Padded => "%H",
        Field::Hour12 => "%-I",
        Field::Hour12Padded => "%I",
        Field::Minute => "%-M",
        Field::MinutePadded => "%M",
        Field::Second => "%-S",
        Field::SecondPadded => "%S",
        Field::MeridiemUpper => "%p",
    };
    at.format(spec).to_string()
}

fn ordinal(day: u32) -> String {
    let suffix = match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", day, suffix)
}
