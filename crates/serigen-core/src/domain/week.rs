//! Week-of-year numbering for the `{WW}` token.
//!
//! The rule is always an explicit value handed to the renderer. Nothing here
//! reads the process locale, so the same date renders the same week on every
//! machine.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// How the first week of a year is determined.
///
/// Serialized as its kebab-case name; parsing also accepts `_` separators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CalendarWeekRule {
    /// Week 1 starts on January 1st; later weeks start on the first day.
    FirstDay,
    /// Week 1 is the first week made entirely of days of the new year.
    FirstFullWeek,
    /// Week 1 is the first week with at least four days in the new year.
    FirstFourDayWeek,
}

impl CalendarWeekRule {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstDay => "first-day",
            Self::FirstFullWeek => "first-full-week",
            Self::FirstFourDayWeek => "first-four-day-week",
        }
    }
}

impl fmt::Display for CalendarWeekRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarWeekRule {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "first-day" => Ok(Self::FirstDay),
            "first-full-week" => Ok(Self::FirstFullWeek),
            "first-four-day-week" => Ok(Self::FirstFourDayWeek),
            other => Err(DomainError::UnknownWeekRule(other.to_string())),
        }
    }
}

impl TryFrom<String> for CalendarWeekRule {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarWeekRule> for String {
    fn from(rule: CalendarWeekRule) -> Self {
        rule.as_str().to_string()
    }
}

/// Week numbering convention used to render `{WW}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekNumbering {
    /// ISO 8601: weeks start on Monday, week 1 holds the first Thursday.
    #[default]
    Iso,
    /// Calendar week counted within the date's own year.
    ///
    /// `FirstFourDayWeek` with Monday differs from ISO around new year: the
    /// last days of December never roll into week 1 of the next year.
    Calendar {
        rule: CalendarWeekRule,
        first_day: Weekday,
    },
}

impl WeekNumbering {
    pub const fn calendar(rule: CalendarWeekRule, first_day: Weekday) -> Self {
        Self::Calendar { rule, first_day }
    }

    /// Week number of `date`, 1-based.
    pub fn week_of_year(&self, date: NaiveDate) -> u32 {
        match *self {
            Self::Iso => date.iso_week().week(),
            Self::Calendar { rule, first_day } => match rule {
                CalendarWeekRule::FirstDay => first_day_week(date, first_day),
                CalendarWeekRule::FirstFullWeek => full_days_week(date, first_day, 7),
                CalendarWeekRule::FirstFourDayWeek => full_days_week(date, first_day, 4),
            },
        }
    }
}

/// Day of week of January 1st of `date`'s year, Sunday = 0.
///
/// May be negative; callers normalise with `+ 14` before `% 7`.
fn jan1_weekday(date: NaiveDate) -> i64 {
    i64::from(date.weekday().num_days_from_sunday()) - i64::from(date.ordinal0()) % 7
}

fn first_day_week(date: NaiveDate, first_day: Weekday) -> u32 {
    let day_of_year = i64::from(date.ordinal0());
    let first = i64::from(first_day.num_days_from_sunday());
    let offset = (jan1_weekday(date) - first + 14) % 7;
    ((day_of_year + offset) / 7 + 1) as u32
}

fn full_days_week(date: NaiveDate, first_day: Weekday, full_days: i64) -> u32 {
    let day_of_year = i64::from(date.ordinal0());
    let first = i64::from(first_day.num_days_from_sunday());

    let mut offset = (first - jan1_weekday(date) + 14) % 7;
    if offset != 0 && offset >= full_days {
        offset -= 7;
    }

    let day = day_of_year - offset;
    if day >= 0 {
        return (day / 7 + 1) as u32;
    }

    // Leading days belong to the last week of the previous year.
    match date.with_ordinal(1).and_then(|jan1| jan1.pred_opt()) {
        Some(dec31) => full_days_week(dec31, first_day, full_days),
        None => 1,
    }
}
