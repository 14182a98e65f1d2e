//! Cookie name prefixes and the policy a jar applies to them.
//!
//! This module implements the [HTTP RFC6265 draft] "cookie prefixes"
//! extension. A cookie whose name starts with a [`Prefix`] is only accepted
//! by a jar if its attributes satisfy the prefix's requirements; what
//! happens otherwise is governed by the jar's [`PrefixSecurity`].
//!
//! **Note:** Cookie prefixes are specified in an HTTP draft! Their meaning and
//! definition are subject to change.
//!
//! [HTTP RFC6265 draft]:
//! https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-cookie-name-prefixes

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Cookie, Error, Rejection};

/// The [`"__Host-"`] cookie [`Prefix`].
///
/// [`"__Host-"`]:
/// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-the-__host-prefix
pub struct Host;

/// The [`"__Secure-"`] cookie [`Prefix`].
///
/// [`"__Secure-"`]:
/// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-the-__secure-prefix
pub struct Secure;

/// Trait identifying [HTTP RFC6265 draft] cookie prefixes.
///
/// [HTTP RFC6265 draft]:
/// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-cookie-name-prefixes
pub trait Prefix: private::Sealed {
    /// The prefix string. Matching is case-sensitive.
    ///
    /// See [`Host::PREFIX`] and [`Secure::PREFIX`] for specifics.
    const PREFIX: &'static str;

    /// The rejection reported for a cookie that carries the prefix but
    /// doesn't satisfy it.
    const REJECTION: Rejection;

    /// Returns `true` if `cookie` meets the requirements of `Self`,
    /// regardless of its name.
    ///
    /// See [`Host::is_satisfied_by()`] and [`Secure::is_satisfied_by()`] for
    /// specifics.
    //
    // This is the only required method.
    fn is_satisfied_by(cookie: &Cookie) -> bool;

    /// Returns `true` if `cookie`'s name carries `Self`.
    #[inline(always)]
    fn is_prefixed(cookie: &Cookie) -> bool {
        cookie.name().starts_with(Self::PREFIX)
    }

    /// Checks a prefixed `cookie` against `Self`. Cookies without the prefix
    /// always pass.
    #[doc(hidden)]
    fn check(cookie: &Cookie) -> Result<(), Rejection> {
        if Self::is_prefixed(cookie) && !Self::is_satisfied_by(cookie) {
            return Err(Self::REJECTION);
        }

        Ok(())
    }
}

impl Prefix for Host {
    /// The [`"__Host-"` prefix] string.
    ///
    /// [`"__Host-"` prefix]:
    /// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-the-__host-prefix
    const PREFIX: &'static str = "__Host-";

    const REJECTION: Rejection = Rejection::HostPrefix;

    /// According to [RFC 6265bis-12 §4.1.3.2]:
    ///
    /// ```text
    /// If a cookie's name begins with a case-sensitive match for the string
    /// __Host-, then the cookie will have been set with a Secure attribute,
    /// a Path attribute with a value of /, and no Domain attribute.
    /// ```
    ///
    /// A cookie stored without a `Domain` attribute is host-only, so this
    /// checks that `cookie` is secure, host-only and scoped to `/`.
    ///
    /// [RFC 6265bis-12 §4.1.3.2]:
    /// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-the-__host-prefix
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    /// use cookiejar::prefix::{Host, Prefix};
    ///
    /// let mut cookie = Cookie::build("__Host-id", "1").secure(true).path("/").build();
    /// cookie.set_host_only(true);
    /// assert!(Host::is_satisfied_by(&cookie));
    ///
    /// cookie.set_host_only(false);
    /// assert!(!Host::is_satisfied_by(&cookie));
    /// ```
    fn is_satisfied_by(cookie: &Cookie) -> bool {
        cookie.secure() && cookie.host_only() == Some(true) && cookie.path() == Some("/")
    }
}

impl Prefix for Secure {
    /// The [`"__Secure-"` prefix] string.
    ///
    /// [`"__Secure-"` prefix]:
    /// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-the-__secure-prefix
    const PREFIX: &'static str = "__Secure-";

    const REJECTION: Rejection = Rejection::SecurePrefix;

    /// According to [RFC 6265bis-12 §4.1.3.1]:
    ///
    /// ```text
    /// If a cookie's name begins with a case-sensitive match for the string
    /// __Secure-, then the cookie will have been set with a Secure
    /// attribute.
    /// ```
    ///
    /// [RFC 6265bis-12 §4.1.3.1]:
    /// https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#name-the-__secure-prefix
    fn is_satisfied_by(cookie: &Cookie) -> bool {
        cookie.secure()
    }
}

/// Checks `cookie` against every known prefix.
pub(crate) fn check_prefixes(cookie: &Cookie) -> Result<(), Rejection> {
    Secure::check(cookie)?;
    Host::check(cookie)
}

/// How a jar treats cookies that violate their name prefix.
///
/// # Example
///
/// ```rust
/// use cookiejar::PrefixSecurity;
///
/// let policy: PrefixSecurity = "Unsafe-Disabled".parse().unwrap();
/// assert_eq!(policy, PrefixSecurity::UnsafeDisabled);
/// assert_eq!(policy.to_string(), "unsafe-disabled");
/// assert_eq!(PrefixSecurity::default(), PrefixSecurity::Silent);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum PrefixSecurity {
    /// Reject the cookie with an error.
    Strict,
    /// Drop the cookie without reporting an error.
    Silent,
    /// Don't check prefixes at all.
    UnsafeDisabled,
}

impl PrefixSecurity {
    /// Returns the policy's string form.
    pub fn as_str(self) -> &'static str {
        match self {
            PrefixSecurity::Strict => "strict",
            PrefixSecurity::Silent => "silent",
            PrefixSecurity::UnsafeDisabled => "unsafe-disabled",
        }
    }
}

impl Default for PrefixSecurity {
    fn default() -> Self {
        PrefixSecurity::Silent
    }
}

impl FromStr for PrefixSecurity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        if s.eq_ignore_ascii_case("strict") {
            Ok(PrefixSecurity::Strict)
        } else if s.eq_ignore_ascii_case("silent") {
            Ok(PrefixSecurity::Silent)
        } else if s.eq_ignore_ascii_case("unsafe-disabled") {
            Ok(PrefixSecurity::UnsafeDisabled)
        } else {
            Err(Error::InvalidPrefixSecurity(s.to_string()))
        }
    }
}

impl TryFrom<String> for PrefixSecurity {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        s.parse()
    }
}

impl fmt::Display for PrefixSecurity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

mod private {
    pub trait Sealed {}

    impl Sealed for super::Host {}
    impl Sealed for super::Secure {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_only(mut cookie: Cookie) -> Cookie {
        cookie.set_host_only(true);
        cookie
    }

    #[test]
    fn secure_prefix() {
        let cookie = Cookie::build("__Secure-id", "1").build();
        assert_eq!(check_prefixes(&cookie), Err(Rejection::SecurePrefix));

        let cookie = Cookie::build("__Secure-id", "1").secure(true).build();
        assert_eq!(check_prefixes(&cookie), Ok(()));
    }

    #[test]
    fn host_prefix() {
        let cookie = host_only(Cookie::build("__Host-id", "1").secure(true).path("/").build());
        assert_eq!(check_prefixes(&cookie), Ok(()));

        let cookie = host_only(Cookie::build("__Host-id", "1").path("/").build());
        assert_eq!(check_prefixes(&cookie), Err(Rejection::HostPrefix));

        let cookie = host_only(Cookie::build("__Host-id", "1").secure(true).path("/a").build());
        assert_eq!(check_prefixes(&cookie), Err(Rejection::HostPrefix));

        let mut cookie = Cookie::build("__Host-id", "1").secure(true).path("/").build();
        cookie.set_host_only(false);
        assert_eq!(check_prefixes(&cookie), Err(Rejection::HostPrefix));
    }

    #[test]
    fn prefixes_are_case_sensitive() {
        let cookie = Cookie::build("__host-id", "1").build();
        assert_eq!(check_prefixes(&cookie), Ok(()));

        let cookie = Cookie::build("__SECURE-id", "1").build();
        assert_eq!(check_prefixes(&cookie), Ok(()));
    }

    #[test]
    fn prefix_security_strings() {
        assert_eq!("strict".parse::<PrefixSecurity>().unwrap(), PrefixSecurity::Strict);
        assert_eq!("SILENT".parse::<PrefixSecurity>().unwrap(), PrefixSecurity::Silent);
        assert!(matches!(
            "loud".parse::<PrefixSecurity>(),
            Err(Error::InvalidPrefixSecurity(ref s)) if s == "loud"
        ));

        let json = serde_json::to_string(&PrefixSecurity::UnsafeDisabled).unwrap();
        assert_eq!(json, "\"unsafe-disabled\"");
    }

    #[test]
    fn prefix_security_deserializes_any_case() {
        let policy: PrefixSecurity = serde_json::from_str("\"Strict\"").unwrap();
        assert_eq!(policy, PrefixSecurity::Strict);

        let policy: PrefixSecurity = serde_json::from_str("\"UNSAFE-DISABLED\"").unwrap();
        assert_eq!(policy, PrefixSecurity::UnsafeDisabled);

        assert!(serde_json::from_str::<PrefixSecurity>("\"loud\"").is_err());
        assert!(serde_json::from_str::<PrefixSecurity>("1").is_err());
    }
}
