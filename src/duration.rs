use std::time::Duration;
use anyhow::{bail, Result};

const MINUTE: u64 = 60;
const HOUR: u64 = 60 * MINUTE;
const DAY: u64 = 24 * HOUR;

pub(crate) enum TimeUnit {
    MilliSecond,
    Second,
    Minute,
    Hour,
    Day,
}

impl TimeUnit {
    /// `None` when `n` of this unit does not fit in a `Duration`.
    pub fn to_duration(&self, n: u64) -> Option<Duration> {
        match self {
            TimeUnit::MilliSecond => Some(Duration::from_millis(n)),
            TimeUnit::Second => Some(Duration::from_secs(n)),
            TimeUnit::Minute => MINUTE.checked_mul(n).map(Duration::from_secs),
            TimeUnit::Hour => HOUR.checked_mul(n).map(Duration::from_secs),
            TimeUnit::Day => DAY.checked_mul(n).map(Duration::from_secs)
        }
    }

    pub fn from(s: &str) -> Result<Self> {
        match s {
            "d" | "D" => Ok(Self::Day),
            "h" | "H" => Ok(Self::Hour),
            "m" | "M" => Ok(Self::Minute),
            "s" | "S" => Ok(Self::Second),
            "ms" => Ok(Self::MilliSecond),
            _ => bail!("{:?} is an invalid time unit", s)
        }
    }
}

/// Parses durations such as `5s`, `1m30s` or `250ms`.
pub fn parse(s: &str) -> Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        bail!("empty duration");
    }

    let mut res = Duration::ZERO;
    let mut rest = s;

    while !rest.is_empty() {
        let digits = rest.find(|ch: char| !ch.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            bail!("{} is an invalid duration", s);
        }
        let n: u64 = rest[..digits].parse()?;
        rest = &rest[digits..];

        let letters = rest.find(|ch: char| ch.is_ascii_digit()).unwrap_or(rest.len());
        if letters == 0 {
            bail!("{} is missing a time unit", s);
        }
        res = match TimeUnit::from(&rest[..letters])?
            .to_duration(n)
            .and_then(|d| res.checked_add(d)) {
            Some(res) => res,
            None => bail!("{} is too long a duration", s)
        };
        rest = &rest[letters..];
    }

    Ok(res)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn time_units() {
        assert_eq!(parse("12s").ok(), Some(Duration::from_secs(12)));
        assert_eq!(parse("1m10s").ok(), Some(Duration::from_secs(70)));
        assert_eq!(parse("1h15m10s").ok(), Some(Duration::from_secs(HOUR + (15 * MINUTE) + 10)));
        assert_eq!(parse("250ms").ok(), Some(Duration::from_millis(250)));

        assert_eq!(parse("1G").ok(), None);
        assert_eq!(parse("1h34m23g").ok(), None);
        assert_eq!(parse("10").ok(), None);
        assert_eq!(parse("s").ok(), None);
        assert_eq!(parse("").ok(), None);
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(parse("999999999999999999d").is_err());
        assert!(parse("18446744073709551615s1s").is_err());
        assert!(parse("99999999999999999999s").is_err());

        assert_eq!(TimeUnit::Day.to_duration(u64::MAX / DAY + 1), None);
        assert_eq!(TimeUnit::Day.to_duration(2), Some(Duration::from_secs(2 * DAY)));
    }
}
