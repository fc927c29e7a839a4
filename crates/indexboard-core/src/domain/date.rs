use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::{Date, OffsetDateTime, Weekday};

use crate::ValidationError;

const SECONDS_PER_DAY: i64 = 86_400;

fn date_format() -> &'static [BorrowedFormatItem<'static>] {
    static FORMAT: OnceLock<Vec<BorrowedFormatItem<'static>>> = OnceLock::new();
    FORMAT.get_or_init(|| {
        time::format_description::parse("[year]-[month]-[day]")
            .expect("date format description must be valid")
    })
}

/// Calendar date in strict `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        Date::parse(input.trim(), date_format())
            .map(Self)
            .map_err(|_| ValidationError::InvalidDate {
                value: input.to_owned(),
            })
    }

    /// Today's date on the UTC clock.
    pub fn today_utc() -> Self {
        Self(OffsetDateTime::now_utc().date())
    }

    pub fn from_date(date: Date) -> Self {
        Self(date)
    }

    /// The UTC calendar date containing the given unix second.
    pub fn from_unix_timestamp(timestamp: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(timestamp)
            .ok()
            .map(|dt| Self(dt.date()))
    }

    pub fn as_date(self) -> Date {
        self.0
    }

    /// The following calendar day, `None` past `Date::MAX`.
    pub fn next_day(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// True on Saturday and Sunday.
    pub fn is_weekend(self) -> bool {
        matches!(self.0.weekday(), Weekday::Saturday | Weekday::Sunday)
    }

    /// Unix seconds at midnight UTC on this date.
    pub fn unix_midnight(self) -> i64 {
        self.0.midnight().assume_utc().unix_timestamp()
    }

    /// Unix seconds at midnight UTC on the day after this date.
    ///
    /// Used to turn an inclusive end date into an exclusive upstream bound.
    pub fn unix_next_midnight(self) -> i64 {
        self.unix_midnight() + SECONDS_PER_DAY
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(date_format())
            .expect("TradingDate must be formattable")
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}

/// Requested history window with an inclusive end date.
///
/// The range is passed to the provider as given. An inverted range is not
/// rejected here; the provider answers it with an empty series, which the
/// dashboard reports through its warning outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: TradingDate,
    pub end: TradingDate,
}

impl DateRange {
    pub fn new(start: TradingDate, end: TradingDate) -> Self {
        Self { start, end }
    }
}
