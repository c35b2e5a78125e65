//! Calendar date and instant utilities.

use std::{cmp::Ordering, fmt, marker::PhantomData, str::FromStr};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    UtcOffset,
};

/// Format of a [`Date`] in its string representation.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Calendar day without a time zone, written as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] out of its components.
    ///
    /// [`None`] is returned if the components don't form a valid day.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Parses a [`Date`] from its `YYYY-MM-DD` representation.
    ///
    /// # Errors
    ///
    /// Errors if the `input` is not a valid `YYYY-MM-DD` calendar day.
    pub fn parse(input: &str) -> Result<Self, time::error::Parse> {
        time::Date::parse(input.trim(), DATE_FORMAT).map(Self)
    }

    /// Returns the day following this [`Date`], if representable.
    #[must_use]
    pub fn next_day(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(d) = self;
        write!(f, "{:04}-{:02}-{:02}", d.year(), u8::from(d.month()), d.day())
    }
}

impl FromStr for Date {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<time::Date> for Date {
    fn from(d: time::Date) -> Self {
        Self(d)
    }
}

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        let inner = time::OffsetDateTime::parse(input, &Rfc3339)
            .map_err(ParseError)?
            .to_offset(UtcOffset::UTC);
        Ok(Self {
            inner,
            _of: PhantomData,
        })
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        // UTC instants within the year 0..=9999 always format.
        self.inner
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.inner.to_string())
    }

    /// Returns the calendar [`Date`] of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        Date(self.inner.date())
    }
}

/// Error of parsing [`DateTime`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid RFC 3339 date and time: {_0}")]
pub struct ParseError(time::error::Parse);

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<Of: ?Sized> Ord for DateTimeOf<Of> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<Of: ?Sized> PartialOrd for DateTimeOf<Of> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{
        de::Error as _, Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::{Date, DateTimeOf};

    impl Serialize for Date {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::parse(&raw).map_err(|e| {
                D::Error::custom(format!("invalid `Date` `{raw}`: {e}"))
            })
        }
    }

    impl<Of: ?Sized> Serialize for DateTimeOf<Of> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_rfc3339())
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateTimeOf<Of> {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_rfc3339(&raw).map_err(D::Error::custom)
        }
    }
}
