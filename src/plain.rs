use std::fmt;

use crate::Cookie;

/// Wrapper around `Cookie` whose `Display` implementation only prints the
/// name and value. Useful for `Cookie` headers.
///
/// A cookie with an empty name, which only loose parsing produces, prints
/// as its bare value.
///
/// A value of this type can be obtained via [`Cookie::plain()`]. This type
/// should only be used for its `Display` implementation.
///
/// # Example
///
/// ```rust
/// use cookiejar::Cookie;
///
/// let mut c = Cookie::new("name", "value");
/// c.set_domain("example.com");
/// assert_eq!(&c.plain().to_string(), "name=value");
///
/// let c = Cookie::parse_loose("lonely").unwrap();
/// assert_eq!(&c.plain().to_string(), "lonely");
/// ```
pub struct PlainCookie<'a>(pub(crate) &'a Cookie);

impl fmt::Display for PlainCookie<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Write out the name/value pair without parameters.
        match self.0.name() {
            "" => write!(f, "{}", self.0.value()),
            name => write!(f, "{}={}", name, self.0.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cookie, MaxAge, SameSite};

    #[test]
    fn format_plain() {
        let cookie = Cookie::build("foo", "bar").build();
        assert_eq!(cookie.plain().to_string(), "foo=bar");

        let cookie = Cookie::build("foo", "bar")
            .domain("example.com")
            .path("/")
            .max_age(MaxAge::Seconds(10))
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        assert_eq!(cookie.plain().to_string(), "foo=bar");
    }

    #[test]
    fn format_plain_nameless() {
        let cookie = Cookie::build("", "bar").secure(true).build();
        assert_eq!(cookie.plain().to_string(), "bar");

        let cookie = Cookie::build("", "").build();
        assert_eq!(cookie.plain().to_string(), "");
    }
}
