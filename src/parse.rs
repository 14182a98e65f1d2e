use time::format_description::FormatItem;
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime, Time};

use crate::{Cookie, MaxAge, SameSite};

/// `Wed, 21 Oct 2015 07:28:00 GMT`, the RFC 1123 form cookies are
/// serialized with.
pub(crate) static FMT1: &[FormatItem<'_>] = format_description!("[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT");

/// Enum corresponding to a parsing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The cookie string was empty or only whitespace.
    #[error("the cookie string is empty")]
    Empty,
    /// The cookie did not contain a name/value pair.
    #[error("the cookie is missing a name/value pair")]
    MissingPair,
    /// The cookie's name or value contains a control character.
    #[error("the cookie's name or value contains a control character")]
    ControlCharacter,
}

impl ParseError {
    /// Returns a description of this error as a string.
    pub fn as_str(&self) -> &'static str {
        match *self {
            ParseError::Empty => "the cookie string is empty",
            ParseError::MissingPair => "the cookie is missing a name/value pair",
            ParseError::ControlCharacter => "the cookie's name or value contains a control character",
        }
    }
}

/// `%x09 / %x20-2F / %x3B-40 / %x5B-60 / %x7B-7E`
#[inline]
fn is_date_delimiter(c: char) -> bool {
    matches!(c, '\x09' | '\x20'..='\x2F' | '\x3B'..='\x40' | '\x5B'..='\x60' | '\x7B'..='\x7E')
}

/// Parses the leading run of ASCII digits in `token` if it is between `min`
/// and `max` digits long. Anything after the digits is only accepted when
/// `trailing_ok` is set.
fn parse_digits(token: &str, min: usize, max: usize, trailing_ok: bool) -> Option<u32> {
    let count = token.bytes().take_while(u8::is_ascii_digit).count();
    if count < min || count > max {
        return None;
    }

    if !trailing_ok && count != token.len() {
        return None;
    }

    token[..count].parse().ok()
}

/// `hms-time = time-field ":" time-field ":" time-field`, with trailing
/// garbage permitted only after the seconds.
fn parse_time(token: &str) -> Option<(u32, u32, u32)> {
    let mut parts = token.split(':');
    let (h, m, s) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    Some((
        parse_digits(h, 1, 2, false)?,
        parse_digits(m, 1, 2, false)?,
        parse_digits(s, 1, 2, true)?,
    ))
}

fn parse_month(token: &str) -> Option<Month> {
    let prefix = token.get(..3)?;
    let month = match prefix.to_ascii_lowercase().as_str() {
        "jan" => Month::January,
        "feb" => Month::February,
        "mar" => Month::March,
        "apr" => Month::April,
        "may" => Month::May,
        "jun" => Month::June,
        "jul" => Month::July,
        "aug" => Month::August,
        "sep" => Month::September,
        "oct" => Month::October,
        "nov" => Month::November,
        "dec" => Month::December,
        _ => return None,
    };

    Some(month)
}

/// Parses a cookie date per [RFC 6265 §5.1.1].
///
/// The input is split into tokens on the RFC's delimiter class. Each token
/// fills, in order of preference, the first still-empty slot among time,
/// day-of-month, month and year; a slot, once filled, is never overwritten.
/// Two-digit years are mapped into 1970-2069. The date is rejected if any
/// slot is empty or any component is out of range.
///
/// A day-of-month past the end of its month rolls over into the following
/// month, so `31 Feb` is `3 Mar` (or `2 Mar` in a leap year).
///
/// [RFC 6265 §5.1.1]: https://tools.ietf.org/html/rfc6265#section-5.1.1
///
/// # Example
///
/// ```rust
/// use cookiejar::parse_date;
/// use time::macros::datetime;
///
/// let date = parse_date("Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
/// assert_eq!(date, datetime!(2015-10-21 07:28:00 UTC));
///
/// let date = parse_date("Thu, 01-Jan-70 00:00:01 GMT").unwrap();
/// assert_eq!(date.unix_timestamp(), 1);
///
/// assert!(parse_date("Wed, 21 Oct 1500 07:28:00 GMT").is_none());
/// ```
pub fn parse_date(input: &str) -> Option<OffsetDateTime> {
    let mut time: Option<(u32, u32, u32)> = None;
    let mut day_of_month: Option<u32> = None;
    let mut month: Option<Month> = None;
    let mut year: Option<u32> = None;

    for token in input.split(is_date_delimiter) {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        if time.is_none() {
            if let Some(hms) = parse_time(token) {
                time = Some(hms);
                continue;
            }
        }

        if day_of_month.is_none() {
            if let Some(day) = parse_digits(token, 1, 2, true) {
                day_of_month = Some(day);
                continue;
            }
        }

        if month.is_none() {
            if let Some(m) = parse_month(token) {
                month = Some(m);
                continue;
            }
        }

        if year.is_none() {
            if let Some(mut y) = parse_digits(token, 2, 4, true) {
                if (70..=99).contains(&y) {
                    y += 1900;
                } else if y <= 69 {
                    y += 2000;
                }

                year = Some(y);
            }
        }
    }

    let (hour, minute, second) = time?;
    let (day, month, year) = (day_of_month?, month?, year?);
    if !(1..=31).contains(&day) || year < 1601 || hour > 23 || minute > 59 || second > 59 {
        return None;
    }

    let first = Date::from_calendar_date(year as i32, month, 1).ok()?;
    let date = first.checked_add(Duration::days(i64::from(day) - 1))?;
    let time = Time::from_hms(hour as u8, minute as u8, second as u8).ok()?;
    Some(date.with_time(time).assume_utc())
}

/// Cuts the string at the first `\n`, `\r` or `\0`.
fn trim_terminator(s: &str) -> &str {
    match s.find(|c| c == '\n' || c == '\r' || c == '\0') {
        Some(i) => &s[..i],
        None => s,
    }
}

#[inline]
fn has_control_char(s: &str) -> bool {
    s.chars().any(|c| c <= '\x1F')
}

fn parse_pair(pair: &str, loose: bool) -> Result<Cookie, ParseError> {
    let mut pair = trim_terminator(pair);
    let mut first_eq = pair.find('=');

    if loose {
        if first_eq == Some(0) {
            pair = &pair[1..];
            first_eq = pair.find('=');
        }
    } else if first_eq.map_or(true, |i| i == 0) {
        return Err(ParseError::MissingPair);
    }

    let (name, value) = match first_eq {
        Some(i) if i > 0 => (pair[..i].trim(), pair[(i + 1)..].trim()),
        _ => ("", pair.trim()),
    };

    if has_control_char(name) || has_control_char(value) {
        return Err(ParseError::ControlCharacter);
    }

    Ok(Cookie::new(name, value))
}

/// Applies one `name[=value]` attribute to `cookie`. Repeated attributes
/// overwrite earlier ones.
fn apply_attribute(cookie: &mut Cookie, av: &str) {
    let (key, value) = match av.find('=') {
        Some(i) => (av[..i].trim(), Some(av[(i + 1)..].trim())),
        None => (av.trim(), None),
    };

    let value = value.filter(|v| !v.is_empty());
    match (&*key.to_ascii_lowercase(), value) {
        ("expires", Some(v)) => {
            if let Some(date) = parse_date(v) {
                cookie.set_expires(date);
            }
        }
        ("max-age", Some(v)) => {
            let digits = v.strip_prefix('-').unwrap_or(v);
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                let age = v.parse::<i64>().map(MaxAge::Seconds).unwrap_or_else(|_| {
                    if v.starts_with('-') { MaxAge::NegInfinity } else { MaxAge::Infinity }
                });

                cookie.set_max_age(age);
            }
        }
        ("domain", Some(v)) => {
            let domain = v.strip_prefix('.').unwrap_or(v).trim();
            if !domain.is_empty() {
                cookie.set_domain(domain.to_ascii_lowercase());
            }
        }
        ("path", v) => match v {
            Some(path) if path.starts_with('/') => cookie.set_path(path),
            _ => cookie.unset_path(),
        },
        ("secure", _) => cookie.set_secure(true),
        ("httponly", _) => cookie.set_http_only(true),
        ("samesite", v) => {
            let same_site = v.and_then(SameSite::from_attribute);
            cookie.same_site = same_site;
        }
        ("expires", None) | ("max-age", None) | ("domain", None) => {}
        _ => cookie.extensions.get_or_insert_with(Vec::new).push(av.to_string()),
    }
}

/// Parses a `Set-Cookie` header value into a `Cookie`.
///
/// The name/value pair is everything before the first `;`. In strict mode
/// it must contain an `=` preceded by a non-empty name; in `loose` mode a
/// missing name is allowed, and a single leading `=` is dropped. The
/// remaining `;`-separated attributes are processed left to right.
pub(crate) fn parse_cookie(s: &str, loose: bool) -> Result<Cookie, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let (pair, attributes) = match s.find(';') {
        Some(i) => (&s[..i], Some(&s[(i + 1)..])),
        None => (s, None),
    };

    let mut cookie = parse_pair(pair, loose)?;
    let attributes = match attributes.map(str::trim) {
        Some(attrs) if !attrs.is_empty() => attrs,
        _ => return Ok(cookie),
    };

    for av in attributes.split(';') {
        let av = av.trim();
        if !av.is_empty() {
            apply_attribute(&mut cookie, av);
        }
    }

    Ok(cookie)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cookie, MaxAge, SameSite, Timestamp};
    use time::macros::datetime;

    macro_rules! assert_eq_parse {
        ($string:expr, $expected:expr) => (
            let cookie = match Cookie::parse($string) {
                Ok(cookie) => cookie,
                Err(e) => panic!("Failed to parse {:?}: {:?}", $string, e)
            };

            assert_eq!(cookie, $expected);
        )
    }

    macro_rules! assert_ne_parse {
        ($string:expr, $expected:expr) => (
            let cookie = match Cookie::parse($string) {
                Ok(cookie) => cookie,
                Err(e) => panic!("Failed to parse {:?}: {:?}", $string, e)
            };

            assert_ne!(cookie, $expected);
        )
    }

    #[test]
    fn parse_same_site() {
        let expected = Cookie::build("foo", "bar").same_site(SameSite::Lax).build();
        assert_eq_parse!("foo=bar; SameSite=Lax", expected);
        assert_eq_parse!("foo=bar; SameSite=lax", expected);
        assert_eq_parse!("foo=bar; SameSite=LAX", expected);

        let expected = Cookie::build("foo", "bar").same_site(SameSite::Strict).build();
        assert_eq_parse!("foo=bar; SameSite=Strict", expected);
        assert_eq_parse!("foo=bar; SameSite=sTrIcT", expected);

        let expected = Cookie::build("foo", "bar").same_site(SameSite::None).build();
        assert_eq_parse!("foo=bar; SameSite=None", expected);

        let cookie = Cookie::parse("foo=bar; SameSite=Strict; SameSite=bogus").unwrap();
        assert_eq!(cookie.same_site(), None);
    }

    #[test]
    fn parse() {
        assert_eq!(Cookie::parse(""), Err(ParseError::Empty));
        assert_eq!(Cookie::parse("  "), Err(ParseError::Empty));
        assert_eq!(Cookie::parse("bar"), Err(ParseError::MissingPair));
        assert_eq!(Cookie::parse("=bar"), Err(ParseError::MissingPair));
        assert_eq!(Cookie::parse(" =bar"), Err(ParseError::MissingPair));

        let mut expected = Cookie::new("foo", "bar=baz");
        assert_eq_parse!("foo=bar=baz", expected);

        expected.set_value("");
        assert_eq_parse!("foo=", expected);
        assert_eq_parse!(" foo = ", expected);
        assert_eq_parse!("foo=;", expected);

        let mut expected = Cookie::new("foo", "bar");
        assert_eq_parse!("foo=bar", expected);
        assert_eq_parse!(" foo = bar ", expected);
        assert_eq_parse!("foo=bar;;", expected);
        assert_eq_parse!("foo=bar; ", expected);

        expected.set_http_only(true);
        assert_eq_parse!("foo=bar; HttpOnly", expected);
        assert_eq_parse!("foo=bar; httponly", expected);
        assert_eq_parse!("foo=bar;httponly", expected);
        assert_eq_parse!("foo=bar ; HTTPONLY=whatever", expected);

        expected.set_secure(true);
        assert_eq_parse!("foo=bar; HttpOnly; Secure", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly", expected);

        expected.set_max_age(MaxAge::Seconds(10));
        assert_eq_parse!("foo=bar; Max-Age=4; Secure; HttpOnly; max-age=10", expected);
        assert_ne_parse!("foo=bar; Max-Age=4; Secure; HttpOnly", expected);

        expected.set_max_age(MaxAge::Seconds(-1));
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=-1", expected);

        expected.set_max_age(MaxAge::Seconds(0));
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Max-Age=1.5", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Max-Age=", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Max-Age=+3", expected);

        expected.set_path("/");
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Path=/", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; path=/", expected);

        expected.set_path("/foo");
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Path=/foo", expected);
        assert_ne_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Path=/bar", expected);

        // A path that doesn't start with `/` falls back to the default.
        expected.unset_path();
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Path=/foo; Path=foo", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Path=", expected);

        expected.set_domain("www.foo.com");
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Domain=www.foo.com", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Domain=.www.foo.com", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Domain=WWW.FOO.COM", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Domain=www.foo.com; Domain=.", expected);

        let expires = datetime!(2015-10-21 07:28:00 UTC);
        expected.set_expires(expires);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Domain=www.foo.com; \
                          Expires=Wed, 21 Oct 2015 07:28:00 GMT", expected);
        assert_eq_parse!("foo=bar; Secure; HttpOnly; Max-Age=0; Domain=www.foo.com; \
                          Expires=Wed, 21 Oct 2015 07:28:00 GMT; Expires=garbage", expected);
    }

    #[test]
    fn parse_extensions() {
        let cookie = Cookie::parse("a=b; Priority=High; Partitioned; Foo=Bar=Baz").unwrap();
        assert_eq!(
            cookie.extensions().unwrap(),
            &["Priority=High".to_string(), "Partitioned".to_string(), "Foo=Bar=Baz".to_string()]
        );
    }

    #[test]
    fn parse_loose() {
        assert_eq!(Cookie::parse_loose("=bar").unwrap().name_value(), ("", "bar"));
        assert_eq!(Cookie::parse_loose("bar").unwrap().name_value(), ("", "bar"));
        assert_eq!(Cookie::parse_loose("==bar").unwrap().name_value(), ("", "=bar"));
        assert_eq!(Cookie::parse_loose("=a=b").unwrap().name_value(), ("a", "b"));
        assert_eq!(Cookie::parse_loose("a=b").unwrap().name_value(), ("a", "b"));
    }

    #[test]
    fn parse_terminators_and_controls() {
        assert_eq!(Cookie::parse("a=b\nc; Secure").unwrap().value(), "b");
        assert_eq!(Cookie::parse("a=b\rc").unwrap().value(), "b");
        assert_eq!(Cookie::parse("a=b\0c").unwrap().value(), "b");
        assert_eq!(Cookie::parse("a=b\x07c"), Err(ParseError::ControlCharacter));
        assert_eq!(Cookie::parse("a\x1f=b"), Err(ParseError::ControlCharacter));
    }

    #[test]
    fn parse_very_large_max_ages() {
        let mut expected = Cookie::new("foo", "bar");
        expected.set_max_age(MaxAge::Infinity);
        let string = format!("foo=bar; Max-Age={}", 1u128 << 100);
        assert_eq_parse!(&string, expected);

        expected.set_max_age(MaxAge::NegInfinity);
        let string = format!("foo=bar; Max-Age=-{}", 1u128 << 100);
        assert_eq_parse!(&string, expected);
    }

    #[test]
    fn odd_characters() {
        let expected = Cookie::new("foo", "b%2Fr");
        assert_eq_parse!("foo=b%2Fr", expected);
    }

    #[test]
    fn parse_dates() {
        let expected = datetime!(1994-11-06 08:49:37 UTC);
        assert_eq!(parse_date("Sun, 06 Nov 1994 08:49:37 GMT"), Some(expected));
        assert_eq!(parse_date("Sunday, 06-Nov-94 08:49:37 GMT"), Some(expected));
        assert_eq!(parse_date("Sun Nov  6 08:49:37 1994"), Some(expected));
        assert_eq!(parse_date("6 november 1994 8:49:37"), Some(expected));
        assert_eq!(parse_date("08:49:37 1994 6 Nov"), Some(expected));

        // Trailing garbage is allowed after digits and month names.
        assert_eq!(parse_date("06th Nov 1994 08:49:37xyz"), Some(expected));

        // Two-digit years.
        assert_eq!(parse_date("1 Jan 69 00:00:00").unwrap().year(), 2069);
        assert_eq!(parse_date("1 Jan 70 00:00:00").unwrap().year(), 1970);

        // Each slot is only filled once: with the time taken, a second time
        // token falls through to the day of month, and `6` is then noise.
        assert_eq!(
            parse_date("08:49:37 09:00:00 6 Nov 1994"),
            Some(datetime!(1994-11-09 08:49:37 UTC))
        );
    }

    #[test]
    fn parse_invalid_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("Sun, 06 Nov 1994"), None);
        assert_eq!(parse_date("Sun, 32 Nov 1994 08:49:37"), None);
        assert_eq!(parse_date("Sun, 00 Nov 1994 08:49:37"), None);
        assert_eq!(parse_date("Sun, 06 Nov 1600 08:49:37"), None);
        assert_eq!(parse_date("Sun, 06 Nov 1994 24:49:37"), None);
        assert_eq!(parse_date("Sun, 06 Nov 1994 08:60:37"), None);
        assert_eq!(parse_date("Sun, 06 Nov 1994 08:49:60"), None);
        assert_eq!(parse_date("Sun, 06 Nox 1994 08:49:37"), None);
        assert_eq!(parse_date("Sun, 06 Nov 1994 108:49:37"), None);
    }

    #[test]
    fn day_of_month_rolls_over() {
        assert_eq!(
            parse_date("31 Feb 2015 00:00:00"),
            Some(datetime!(2015-03-03 00:00:00 UTC))
        );
        assert_eq!(
            parse_date("31 Feb 2016 00:00:00"),
            Some(datetime!(2016-03-02 00:00:00 UTC))
        );
    }

    #[test]
    fn expires_format() {
        let date = datetime!(2015-10-21 07:28:00 UTC);
        assert_eq!(date.format(&FMT1).unwrap(), "Wed, 21 Oct 2015 07:28:00 GMT");

        let cookie = Cookie::parse("a=b; Expires=Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
        assert_eq!(cookie.expires(), Some(Timestamp::DateTime(date)));
    }
}
