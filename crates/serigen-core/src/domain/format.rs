//! Format templates: date tokens and the counter placeholder.
//!
//! | Token    | Rendered as                        |
//! |----------|------------------------------------|
//! | `{YYYY}` | year, 4 digits                     |
//! | `{YY}`   | year modulo 100, 2 digits          |
//! | `{MM}`   | month, 2 digits                    |
//! | `{DD}`   | day of month, 2 digits             |
//! | `{WW}`   | week of year, 2 digits             |
//! | `{###}`  | counter, zero-padded to 5 digits   |
//! | `###`    | counter, zero-padded to 3 digits   |
//!
//! Templates are upper-cased before token matching, so `{yyyy}` works too.
//! Anything else, including unknown `{...}` sequences, passes through.
//!
//! A braced placeholder is replaced together with its braces and pads to the
//! full width of the braced text, so `{####}` yields six digits.

use chrono::{Datelike, NaiveDate};

use crate::domain::week::WeekNumbering;

const COUNTER_CHAR: u8 = b'#';

/// Location of the counter placeholder inside a rendered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    /// Byte offset of the first replaced character.
    pub start: usize,
    /// Number of bytes replaced.
    pub len: usize,
    /// Minimum number of digits the counter is padded to.
    pub width: usize,
}

impl Placeholder {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Find the counter placeholder: the first braced run `{#…#}`, otherwise the
/// first bare run of `#`.
pub fn find_placeholder(text: &str) -> Option<Placeholder> {
    let bytes = text.as_bytes();
    let mut first_bare = None;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != COUNTER_CHAR {
            i += 1;
            continue;
        }

        let start = i;
        while i < bytes.len() && bytes[i] == COUNTER_CHAR {
            i += 1;
        }

        let braced = start > 0 && bytes[start - 1] == b'{' && bytes.get(i) == Some(&b'}');
        if braced {
            let len = i + 1 - (start - 1);
            return Some(Placeholder {
                start: start - 1,
                len,
                width: len,
            });
        }

        first_bare.get_or_insert(Placeholder {
            start,
            len: i - start,
            width: i - start,
        });
    }

    first_bare
}

/// Number of separate `#` runs in `text`.
pub fn placeholder_runs(text: &str) -> usize {
    let mut runs = 0;
    let mut in_run = false;
    for b in text.bytes() {
        let hash = b == COUNTER_CHAR;
        if hash && !in_run {
            runs += 1;
        }
        in_run = hash;
    }
    runs
}

/// Pure renderer for series formats.
///
/// Holds only the week rule used by `{WW}`; every method is a function of its
/// arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatRenderer {
    week_numbering: WeekNumbering,
}

impl FormatRenderer {
    pub const fn new(week_numbering: WeekNumbering) -> Self {
        Self { week_numbering }
    }

    pub const fn week_numbering(&self) -> WeekNumbering {
        self.week_numbering
    }

    /// Upper-case the template and substitute the date tokens.
    pub fn render_prefix(&self, format: &str, as_of: NaiveDate) -> String {
        if format.is_empty() {
            return String::new();
        }

        let mut value = format
            .to_uppercase()
            .replace("{YYYY}", &format!("{:04}", as_of.year()))
            .replace("{YY}", &format!("{:02}", as_of.year().rem_euclid(100)))
            .replace("{MM}", &format!("{:02}", as_of.month()));

        if value.contains("{WW}") {
            let week = self.week_numbering.week_of_year(as_of);
            value = value.replace("{WW}", &format!("{week:02}"));
        }

        value.replace("{DD}", &format!("{:02}", as_of.day()))
    }

    /// The date-derived part of a value, comparable across generations.
    ///
    /// Every `#`, `{` and `}` is dropped after token substitution.
    pub fn render_prefix_without_counter(&self, format: &str, as_of: NaiveDate) -> String {
        self.render_prefix(format, as_of)
            .replace(['#', '{', '}'], "")
    }

    /// Render the full value for `counter`.
    ///
    /// Counters wider than the placeholder are written in full. Without a
    /// placeholder the counter does not appear in the output.
    pub fn render_next(&self, format: &str, counter: u64, as_of: NaiveDate) -> String {
        let mut value = self.render_prefix(format, as_of);

        if let Some(placeholder) = find_placeholder(&value) {
            let padded = format!("{counter:0width$}", width = placeholder.width);
            value.replace_range(placeholder.start..placeholder.end(), &padded);
        }

        value
    }
}
