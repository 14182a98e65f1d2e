//! This module contains types that represent cookie properties that are not yet
//! standardized. That is, _draft_ features.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The `SameSite` cookie attribute.
///
/// A cookie with a `SameSite` attribute is imposed restrictions on when it is
/// sent to the origin server in a cross-site request. If the `SameSite`
/// attribute is "Strict", then the cookie is never sent in cross-site requests.
/// If the `SameSite` attribute is "Lax", the cookie is only sent in cross-site
/// requests with "safe" HTTP methods, i.e, `GET`, `HEAD`, `OPTIONS`, `TRACE`.
/// If the `SameSite` attribute is "None", the cookie is sent in all cross-site
/// requests.
///
/// A cookie without a `SameSite` attribute carries `None` in its
/// `Option<SameSite>` and is treated like `SameSite::None` when filtering.
///
/// **Note:** This cookie attribute is an HTTP draft! Its meaning and definition
/// are subject to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    /// The "Strict" `SameSite` attribute.
    Strict,
    /// The "Lax" `SameSite` attribute.
    Lax,
    /// The "None" `SameSite` attribute.
    None,
}

impl SameSite {
    /// Parses an attribute value case-insensitively. Unknown values yield
    /// `None`, which clears the attribute.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::SameSite;
    ///
    /// assert_eq!(SameSite::from_attribute("STRICT"), Some(SameSite::Strict));
    /// assert_eq!(SameSite::from_attribute("lax"), Some(SameSite::Lax));
    /// assert_eq!(SameSite::from_attribute("sometimes"), None);
    /// ```
    pub fn from_attribute(value: &str) -> Option<SameSite> {
        if value.eq_ignore_ascii_case("strict") {
            Some(SameSite::Strict)
        } else if value.eq_ignore_ascii_case("lax") {
            Some(SameSite::Lax)
        } else if value.eq_ignore_ascii_case("none") {
            Some(SameSite::None)
        } else {
            None
        }
    }

    /// The enforcement level of this attribute: `None` = 1, `Lax` = 2,
    /// `Strict` = 3. A cookie is only returned to a context whose level is
    /// at least the cookie's.
    #[inline]
    pub fn level(self) -> u8 {
        match self {
            SameSite::None => 1,
            SameSite::Lax => 2,
            SameSite::Strict => 3,
        }
    }

    /// Returns `true` if `self` is `SameSite::Strict` and `false` otherwise.
    #[inline]
    pub fn is_strict(&self) -> bool {
        matches!(self, SameSite::Strict)
    }

    /// Returns `true` if `self` is `SameSite::Lax` and `false` otherwise.
    #[inline]
    pub fn is_lax(&self) -> bool {
        matches!(self, SameSite::Lax)
    }

    /// Returns `true` if `self` is `SameSite::None` and `false` otherwise.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, SameSite::None)
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SameSite::Strict => write!(f, "Strict"),
            SameSite::Lax => write!(f, "Lax"),
            SameSite::None => write!(f, "None"),
        }
    }
}

/// The same-site context a request is made in.
///
/// `Strict` is a same-site request, `Lax` a top-level cross-site navigation
/// and `None` any other cross-site request. Passing a context to
/// [`CookieJar::get_cookies()`](crate::CookieJar::get_cookies()) filters out
/// cookies whose [`SameSite::level()`] exceeds the context's level; passing
/// one to [`CookieJar::set_cookie()`](crate::CookieJar::set_cookie()) rejects
/// same-site cookies set from a cross-site context.
///
/// # Example
///
/// ```rust
/// use cookiejar::SameSiteContext;
///
/// let ctx: SameSiteContext = "Lax".parse().unwrap();
/// assert_eq!(ctx, SameSiteContext::Lax);
/// assert!("cross-site".parse::<SameSiteContext>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SameSiteContext {
    /// A same-site request.
    Strict,
    /// A top-level, "safe" cross-site navigation.
    Lax,
    /// A cross-site request.
    None,
}

impl SameSiteContext {
    /// The context's level: `Strict` = 3, `Lax` = 2, `None` = 1.
    #[inline]
    pub fn level(self) -> u8 {
        match self {
            SameSiteContext::None => 1,
            SameSiteContext::Lax => 2,
            SameSiteContext::Strict => 3,
        }
    }
}

impl FromStr for SameSiteContext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match SameSite::from_attribute(s) {
            Some(SameSite::Strict) => Ok(SameSiteContext::Strict),
            Some(SameSite::Lax) => Ok(SameSiteContext::Lax),
            Some(SameSite::None) => Ok(SameSiteContext::None),
            None => Err(Error::InvalidSameSiteContext(s.to_string())),
        }
    }
}

impl fmt::Display for SameSiteContext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SameSiteContext::Strict => write!(f, "strict"),
            SameSiteContext::Lax => write!(f, "lax"),
            SameSiteContext::None => write!(f, "none"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_line_up() {
        for (site, ctx) in [
            (SameSite::Strict, SameSiteContext::Strict),
            (SameSite::Lax, SameSiteContext::Lax),
            (SameSite::None, SameSiteContext::None),
        ].iter() {
            assert_eq!(site.level(), ctx.level());
        }

        assert!(SameSite::Strict.level() > SameSiteContext::Lax.level());
    }

    #[test]
    fn context_from_str() {
        assert_eq!("none".parse::<SameSiteContext>().unwrap(), SameSiteContext::None);
        assert_eq!("STRICT".parse::<SameSiteContext>().unwrap(), SameSiteContext::Strict);

        match "".parse::<SameSiteContext>() {
            Err(Error::InvalidSameSiteContext(v)) => assert_eq!(v, ""),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn display() {
        assert_eq!(SameSite::Strict.to_string(), "Strict");
        assert_eq!(SameSite::Lax.to_string(), "Lax");
        assert_eq!(SameSiteContext::Lax.to_string(), "lax");
    }
}
