//! This module contains the [`MaxAge`] type which is used for the
//! [`Cookie::max_age`][cma] attribute.
//!
//! [cma]: method@crate::Cookie::max_age

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};

/// The value of a cookie's `Max-Age` attribute.
///
/// A parsed `Max-Age` is [`MaxAge::Seconds`] unless its digits overflow an
/// `i64`, in which case it is [`MaxAge::Infinity`] or
/// [`MaxAge::NegInfinity`] by sign. The infinite variants serialize as the
/// strings `"Infinity"` and `"-Infinity"`, while `Seconds` serializes as a
/// plain integer.
///
/// Zero and negative ages denote a cookie that is already expired.
///
/// # Example
///
/// ```rust
/// use cookiejar::{Cookie, MaxAge};
///
/// let c = Cookie::parse("name=value; Max-Age=3600").unwrap();
/// assert_eq!(c.max_age(), Some(MaxAge::Seconds(3600)));
/// assert_eq!(c.max_age().and_then(|age| age.millis()), Some(3_600_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxAge {
    /// A finite number of seconds.
    Seconds(i64),
    /// An unbounded age.
    Infinity,
    /// An unbounded negative age: always expired.
    NegInfinity,
}

impl MaxAge {
    /// Returns the number of seconds if `self` is finite.
    #[inline]
    pub fn seconds(self) -> Option<i64> {
        match self {
            MaxAge::Seconds(s) => Some(s),
            MaxAge::Infinity | MaxAge::NegInfinity => None,
        }
    }

    /// Returns the age in milliseconds if `self` is finite.
    #[inline]
    pub fn millis(self) -> Option<i64> {
        self.seconds().map(|s| s.saturating_mul(1000))
    }

    /// Returns `true` if the age is positive. `Max-Age=` must be a non-zero
    /// digit sequence in a well-formed `Set-Cookie` header.
    #[inline]
    pub fn is_valid(self) -> bool {
        match self {
            MaxAge::Seconds(s) => s > 0,
            MaxAge::Infinity => true,
            MaxAge::NegInfinity => false,
        }
    }
}

impl From<i64> for MaxAge {
    fn from(seconds: i64) -> Self {
        MaxAge::Seconds(seconds)
    }
}

impl From<time::Duration> for MaxAge {
    fn from(value: time::Duration) -> Self {
        MaxAge::Seconds(value.whole_seconds())
    }
}

impl From<std::time::Duration> for MaxAge {
    fn from(value: std::time::Duration) -> Self {
        let secs = value.as_secs();
        if secs > i64::MAX as u64 {
            MaxAge::Infinity
        } else {
            MaxAge::Seconds(secs as i64)
        }
    }
}

impl fmt::Display for MaxAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaxAge::Seconds(s) => write!(f, "{}", s),
            MaxAge::Infinity => f.write_str("Infinity"),
            MaxAge::NegInfinity => f.write_str("-Infinity"),
        }
    }
}

impl Serialize for MaxAge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            MaxAge::Seconds(s) => serializer.serialize_i64(s),
            MaxAge::Infinity => serializer.serialize_str("Infinity"),
            MaxAge::NegInfinity => serializer.serialize_str("-Infinity"),
        }
    }
}

impl<'de> Deserialize<'de> for MaxAge {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MaxAgeVisitor;

        impl<'de> Visitor<'de> for MaxAgeVisitor {
            type Value = MaxAge;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer, \"Infinity\" or \"-Infinity\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<MaxAge, E> {
                Ok(MaxAge::Seconds(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<MaxAge, E> {
                if v > i64::MAX as u64 {
                    return Ok(MaxAge::Infinity);
                }

                Ok(MaxAge::Seconds(v as i64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<MaxAge, E> {
                if v.is_nan() {
                    Err(E::invalid_value(de::Unexpected::Float(v), &self))
                } else if v >= i64::MAX as f64 {
                    Ok(MaxAge::Infinity)
                } else if v <= i64::MIN as f64 {
                    Ok(MaxAge::NegInfinity)
                } else {
                    Ok(MaxAge::Seconds(v.trunc() as i64))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<MaxAge, E> {
                match v {
                    "Infinity" => Ok(MaxAge::Infinity),
                    "-Infinity" => Ok(MaxAge::NegInfinity),
                    _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(MaxAgeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::MaxAge;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn tokens() {
        assert_tokens(&MaxAge::Seconds(-5), &[Token::I64(-5)]);
        assert_tokens(&MaxAge::Infinity, &[Token::Str("Infinity")]);
        assert_tokens(&MaxAge::NegInfinity, &[Token::Str("-Infinity")]);
        assert_de_tokens(&MaxAge::Seconds(10), &[Token::U8(10)]);
    }

    #[test]
    fn validity() {
        assert!(MaxAge::Seconds(1).is_valid());
        assert!(!MaxAge::Seconds(0).is_valid());
        assert!(!MaxAge::Seconds(-1).is_valid());
        assert!(!MaxAge::NegInfinity.is_valid());
        assert!(MaxAge::Infinity.is_valid());
    }

    #[test]
    fn conversions() {
        assert_eq!(MaxAge::from(time::Duration::minutes(2)), MaxAge::Seconds(120));
        assert_eq!(MaxAge::from(std::time::Duration::from_secs(7)), MaxAge::Seconds(7));
        assert_eq!(MaxAge::Seconds(2).millis(), Some(2000));
        assert_eq!(MaxAge::Infinity.millis(), None);
    }
}
