//! Recurrence periods: `<count><unit>` such as `1m`, `2w` or `10d`

use chrono::{Days, Months, NaiveDate};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Unit a recurrence advances by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    /// The letter used for this unit in a `period` value
    pub fn letter(self) -> char {
        match self {
            Unit::Day => 'd',
            Unit::Week => 'w',
            Unit::Month => 'm',
            Unit::Year => 'y',
        }
    }

    fn from_letter(letter: &str) -> Option<Self> {
        match letter {
            "d" => Some(Unit::Day),
            "w" => Some(Unit::Week),
            "m" => Some(Unit::Month),
            "y" => Some(Unit::Year),
            _ => None,
        }
    }
}

/// How far a recurring note's date moves once it is completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recurrence {
    count: u32,
    unit: Unit,
}

/// A `period` value that is not `<positive integer><y|m|w|d>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRecurrence(pub String);

impl fmt::Display for InvalidRecurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid period: {:?}", self.0)
    }
}

impl std::error::Error for InvalidRecurrence {}

impl Recurrence {
    /// Build a recurrence; `None` when `count` is zero
    pub fn new(count: u32, unit: Unit) -> Option<Self> {
        (count > 0).then_some(Self { count, unit })
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Next occurrence after `base`.
    ///
    /// Month and year steps clamp to the last day of the target month, so
    /// Jan 31 + 1m is the last day of February and Feb 29 + 1y is Feb 28.
    /// Returns `None` only if the result falls outside the representable
    /// calendar range.
    pub fn apply(&self, base: NaiveDate) -> Option<NaiveDate> {
        match self.unit {
            Unit::Year => base.checked_add_months(Months::new(self.count.checked_mul(12)?)),
            Unit::Month => base.checked_add_months(Months::new(self.count)),
            Unit::Week => base.checked_add_days(Days::new(7 * u64::from(self.count))),
            Unit::Day => base.checked_add_days(Days::new(u64::from(self.count))),
        }
    }
}

impl FromStr for Recurrence {
    type Err = InvalidRecurrence;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidRecurrence(s.to_string());

        let re = Regex::new(r"^(\d+)([a-zA-Z])$").map_err(|_| invalid())?;
        let caps = re.captures(s.trim()).ok_or_else(invalid)?;

        let count: u32 = caps[1].parse().map_err(|_| invalid())?;
        let unit = Unit::from_letter(&caps[2]).ok_or_else(invalid)?;

        Recurrence::new(count, unit).ok_or_else(invalid)
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_units() {
        assert_eq!("1m".parse(), Ok(Recurrence::new(1, Unit::Month).unwrap()));
        assert_eq!("2w".parse(), Ok(Recurrence::new(2, Unit::Week).unwrap()));
        assert_eq!("10d".parse(), Ok(Recurrence::new(10, Unit::Day).unwrap()));
        assert_eq!("3y".parse(), Ok(Recurrence::new(3, Unit::Year).unwrap()));
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        let err = "3x".parse::<Recurrence>().unwrap_err();
        assert_eq!(err, InvalidRecurrence("3x".to_string()));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["", "m", "0d", "-1d", "1.5w", "1 w", "1dd", "w1", "1M"] {
            assert!(raw.parse::<Recurrence>().is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_parse_rejects_overflowing_count() {
        assert!("99999999999d".parse::<Recurrence>().is_err());
    }

    #[test]
    fn test_display_matches_input() {
        let r: Recurrence = "14d".parse().unwrap();
        assert_eq!(r.to_string(), "14d");
    }

    #[test]
    fn test_apply_days_and_weeks() {
        let r = Recurrence::new(2, Unit::Week).unwrap();
        assert_eq!(r.apply(date(2024, 3, 1)), Some(date(2024, 3, 15)));

        let r = Recurrence::new(1, Unit::Day).unwrap();
        assert_eq!(r.apply(date(2023, 12, 31)), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_apply_month() {
        let r = Recurrence::new(1, Unit::Month).unwrap();
        assert_eq!(r.apply(date(2024, 3, 1)), Some(date(2024, 4, 1)));
        assert_eq!(r.apply(date(2024, 12, 15)), Some(date(2025, 1, 15)));
    }

    #[test]
    fn test_apply_month_clamps_to_month_end() {
        let r = Recurrence::new(1, Unit::Month).unwrap();
        assert_eq!(r.apply(date(2024, 1, 31)), Some(date(2024, 2, 29)));
        assert_eq!(r.apply(date(2023, 1, 31)), Some(date(2023, 2, 28)));
        assert_eq!(r.apply(date(2024, 3, 31)), Some(date(2024, 4, 30)));
    }

    #[test]
    fn test_apply_year_clamps_leap_day() {
        let r = Recurrence::new(1, Unit::Year).unwrap();
        assert_eq!(r.apply(date(2024, 2, 29)), Some(date(2025, 2, 28)));

        let r = Recurrence::new(4, Unit::Year).unwrap();
        assert_eq!(r.apply(date(2024, 2, 29)), Some(date(2028, 2, 29)));
    }

    #[test]
    fn test_apply_out_of_range() {
        let r = Recurrence::new(u32::MAX, Unit::Year).unwrap();
        assert_eq!(r.apply(date(2024, 1, 1)), None);
    }

    #[test]
    fn test_zero_count_is_not_a_recurrence() {
        assert!(Recurrence::new(0, Unit::Day).is_none());
    }

    fn unit_strategy() -> impl Strategy<Value = Unit> {
        prop_oneof![
            Just(Unit::Day),
            Just(Unit::Week),
            Just(Unit::Month),
            Just(Unit::Year),
        ]
    }

    proptest! {
        #[test]
        fn prop_apply_is_strictly_later(
            days in 0u64..200_000,
            count in 1u32..500,
            unit in unit_strategy(),
        ) {
            let base = date(1900, 1, 1).checked_add_days(Days::new(days)).unwrap();
            let r = Recurrence::new(count, unit).unwrap();
            let next = r.apply(base).unwrap();
            prop_assert!(next > base);
        }
    }
}
