use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// The latest instant a cookie timestamp compares as: `2038-01-19T03:14:07Z`,
/// in milliseconds since the Unix epoch.
pub const MAX_TIME: i64 = 2_147_483_647_000;

/// A point in time attached to a cookie, or the `Infinity` sentinel.
///
/// Cookies carry three timestamps: `expires`, `creation` and
/// `last_accessed`. Each may be a concrete instant or `Infinity`. For
/// `expires`, `Infinity` denotes a session cookie, one whose lifetime is not
/// bounded by an `Expires` attribute.
///
/// A `Timestamp` serializes as an RFC 3339 string or the literal string
/// `"Infinity"`.
///
/// # Example
///
/// ```rust
/// use cookiejar::Timestamp;
/// use time::macros::datetime;
///
/// let at = Timestamp::from(datetime!(2015-10-21 07:28:00 UTC));
/// assert_eq!(at.unix_millis(), 1_445_412_480_000.0);
/// assert!(Timestamp::Infinity.datetime().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timestamp {
    /// A concrete, UTC-normalized instant.
    DateTime(OffsetDateTime),
    /// No bound.
    Infinity,
}

impl Timestamp {
    /// The current instant.
    #[inline]
    pub fn now() -> Timestamp {
        Timestamp::DateTime(OffsetDateTime::now_utc())
    }

    /// Returns the wrapped datetime, if `self` is not `Infinity`.
    #[inline]
    pub fn datetime(self) -> Option<OffsetDateTime> {
        match self {
            Timestamp::DateTime(dt) => Some(dt),
            Timestamp::Infinity => None,
        }
    }

    /// Returns `true` if `self` is the `Infinity` sentinel.
    #[inline]
    pub fn is_infinity(self) -> bool {
        self == Timestamp::Infinity
    }

    /// Milliseconds since the Unix epoch. `Infinity` maps to `f64::INFINITY`.
    pub fn unix_millis(self) -> f64 {
        match self {
            Timestamp::DateTime(dt) => unix_millis(dt) as f64,
            Timestamp::Infinity => f64::INFINITY,
        }
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(dt: OffsetDateTime) -> Self {
        Timestamp::DateTime(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::DateTime(dt) => match dt.format(&Rfc3339) {
                Ok(s) => f.write_str(&s),
                Err(_) => Err(fmt::Error),
            },
            Timestamp::Infinity => f.write_str("Infinity"),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Timestamp::DateTime(dt) => {
                let s = dt.format(&Rfc3339).map_err(serde::ser::Error::custom)?;
                serializer.serialize_str(&s)
            }
            Timestamp::Infinity => serializer.serialize_str("Infinity"),
        }
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl<'de> Visitor<'de> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an RFC 3339 datetime or \"Infinity\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Timestamp, E> {
                if v == "Infinity" {
                    return Ok(Timestamp::Infinity);
                }

                OffsetDateTime::parse(v, &Rfc3339)
                    .map(Timestamp::DateTime)
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_str(TimestampVisitor)
    }
}

/// Milliseconds since the Unix epoch, truncated toward zero.
pub(crate) fn unix_millis(dt: OffsetDateTime) -> i64 {
    (dt.unix_timestamp_nanos() / 1_000_000) as i64
}

/// The instant `millis` milliseconds after the Unix epoch, clamped to the
/// range `time` can represent.
pub(crate) fn from_unix_millis(millis: i64) -> OffsetDateTime {
    let nanos = i128::from(millis) * 1_000_000;
    OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(if millis < 0 {
        time::PrimitiveDateTime::MIN.assume_utc()
    } else {
        time::PrimitiveDateTime::MAX.assume_utc()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_tokens, Token};
    use time::macros::datetime;

    #[test]
    fn tokens() {
        assert_tokens(&Timestamp::Infinity, &[Token::Str("Infinity")]);
        assert_tokens(
            &Timestamp::from(datetime!(2015-10-21 07:28:00 UTC)),
            &[Token::Str("2015-10-21T07:28:00Z")],
        );
    }

    #[test]
    fn millis() {
        let dt = datetime!(1970-01-01 00:00:01.5 UTC);
        assert_eq!(unix_millis(dt), 1_500);
        assert_eq!(from_unix_millis(1_500), dt);
        assert_eq!(from_unix_millis(MAX_TIME), datetime!(2038-01-19 03:14:07 UTC));
    }

    #[test]
    fn rejects_garbage() {
        assert!(serde_json::from_str::<Timestamp>("\"yesterday\"").is_err());
        assert!(serde_json::from_str::<Timestamp>("12").is_err());
    }
}
