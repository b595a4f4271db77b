//! Strict token-format parsing and printing of date/time values.
//!
//! Formats are written with the tokens below; any other character is a
//! literal that must match exactly.
//!
//! | Token  | Meaning                 | Width |
//! |--------|-------------------------|-------|
//! | `YYYY` | year                    | 4     |
//! | `MM`   | month (01-12)           | 2     |
//! | `DD`   | day of month (01-31)    | 2     |
//! | `HH`   | hour (00-23)            | 2     |
//! | `mm`   | minute (00-59)          | 2     |
//! | `ss`   | second (00-59)          | 2     |
//! | `SSS`  | millisecond (000-999)   | 3     |
//!
//! Parsing never coerces: a value must have exactly the digits each token
//! asks for, every literal must be present, and nothing may trail. Fields a
//! format omits default to the start of their range (month 1, day 1,
//! midnight), so `YYYY-MM` values land on the first of the month.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Literal(char),
}

impl Token {
    fn width(self) -> usize {
        match self {
            Self::Year => 4,
            Self::Millisecond => 3,
            Self::Literal(_) => 1,
            _ => 2,
        }
    }
}

/// Longest patterns first so `YYYY` is never read as two shorter tokens.
const PATTERNS: &[(&str, Token)] = &[
    ("YYYY", Token::Year),
    ("SSS", Token::Millisecond),
    ("MM", Token::Month),
    ("DD", Token::Day),
    ("HH", Token::Hour),
    ("mm", Token::Minute),
    ("ss", Token::Second),
];

/// A compiled token format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MomentFormat {
    tokens: Vec<Token>,
}

impl MomentFormat {
    /// Compiles a format string.
    ///
    /// Returns `None` for an empty format, or one containing letters that are
    /// not part of a token (a lone `T` separator is allowed).
    pub fn compile(format: &str) -> Option<Self> {
        let mut tokens = Vec::new();
        let mut rest = format;
        while !rest.is_empty() {
            if let Some((pattern, token)) = PATTERNS.iter().find(|(p, _)| rest.starts_with(p)) {
                tokens.push(*token);
                rest = &rest[pattern.len()..];
                continue;
            }
            let mut chars = rest.chars();
            let c = chars.next()?;
            if c.is_ascii_alphanumeric() && c != 'T' {
                return None;
            }
            tokens.push(Token::Literal(c));
            rest = chars.as_str();
        }
        if tokens.iter().all(|t| matches!(t, Token::Literal(_))) {
            return None;
        }
        Some(Self { tokens })
    }

    /// Parses `value` strictly under this format.
    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        let mut year = 1970;
        let mut month = 1;
        let mut day = 1;
        let (mut hour, mut minute, mut second, mut milli) = (0, 0, 0, 0);

        let mut rest = value;
        for token in &self.tokens {
            if let Token::Literal(expected) = token {
                rest = rest.strip_prefix(*expected)?;
                continue;
            }
            let width = token.width();
            let digits = rest.get(..width)?;
            if !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let number: u32 = digits.parse().ok()?;
            match token {
                Token::Year => year = i32::try_from(number).ok()?,
                Token::Month => month = number,
                Token::Day => day = number,
                Token::Hour => hour = number,
                Token::Minute => minute = number,
                Token::Second => second = number,
                Token::Millisecond => milli = number,
                Token::Literal(_) => {}
            }
            rest = &rest[width..];
        }
        if !rest.is_empty() {
            return None;
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_milli_opt(hour, minute, second, milli)?;
        Some(NaiveDateTime::new(date, time))
    }

    /// Prints `moment` using this format.
    pub fn print(&self, moment: &NaiveDateTime) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Year => out.push_str(&format!("{:04}", moment.year())),
                Token::Month => out.push_str(&format!("{:02}", moment.month())),
                Token::Day => out.push_str(&format!("{:02}", moment.day())),
                Token::Hour => out.push_str(&format!("{:02}", moment.hour())),
                Token::Minute => out.push_str(&format!("{:02}", moment.minute())),
                Token::Second => out.push_str(&format!("{:02}", moment.second())),
                Token::Millisecond => {
                    out.push_str(&format!("{:03}", moment.nanosecond() / 1_000_000));
                }
                Token::Literal(c) => out.push(*c),
            }
        }
        out
    }
}

/// Parses `value` under `format`, compiling the format on the fly.
pub fn parse_moment(value: &str, format: &str) -> Option<NaiveDateTime> {
    MomentFormat::compile(format)?.parse(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn parse_year_month() {
        assert_eq!(parse_moment("2020-03", "YYYY-MM"), Some(ymd(2020, 3, 1)));
        assert_eq!(parse_moment("03-2020", "MM-YYYY"), Some(ymd(2020, 3, 1)));
        assert_eq!(parse_moment("202003", "YYYYMM"), Some(ymd(2020, 3, 1)));
    }

    #[test]
    fn parse_full_timestamp() {
        let moment = parse_moment("2021-07-04T13:05:09.250", "YYYY-MM-DDTHH:mm:ss.SSS")
            .expect("timestamp parses");
        assert_eq!(moment.hour(), 13);
        assert_eq!(moment.minute(), 5);
        assert_eq!(moment.second(), 9);
        assert_eq!(moment.nanosecond(), 250_000_000);
    }

    #[test]
    fn parse_is_strict() {
        assert_eq!(parse_moment("2020-3", "YYYY-MM"), None);
        assert_eq!(parse_moment("2020-03-01", "YYYY-MM"), None);
        assert_eq!(parse_moment("2020/03", "YYYY-MM"), None);
        assert_eq!(parse_moment("2020-13", "YYYY-MM"), None);
        assert_eq!(parse_moment("2021-02-29", "YYYY-MM-DD"), None);
        assert_eq!(parse_moment("", "YYYY-MM"), None);
        assert_eq!(parse_moment("2020-+3", "YYYY-MM"), None);
    }

    #[test]
    fn unsupported_formats_do_not_compile() {
        assert!(MomentFormat::compile("").is_none());
        assert!(MomentFormat::compile("YY-MM").is_none());
        assert!(MomentFormat::compile("Q YYYY").is_none());
        assert!(MomentFormat::compile("--").is_none());
    }

    #[test]
    fn print_uses_token_widths() {
        let format = MomentFormat::compile("YYYY-MM-DD HH:mm").expect("compiles");
        let moment = ymd(987, 1, 2).with_hour(7).unwrap();
        assert_eq!(format.print(&moment), "0987-01-02 07:00");
    }
}
