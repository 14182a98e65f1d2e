//! RFC 6265 cookie parsing and a policy-enforcing cookie jar.
//!
//! This crate provides the [`Cookie`] type, which maps directly to an HTTP
//! cookie as a user agent stores it, and the [`CookieJar`] type, which
//! decides which cookies a response may set and which cookies a request
//! should carry. The jar enforces domain and path scoping, public suffix
//! rejection, `HttpOnly` gating, `SameSite` restrictions and the
//! `__Secure-`/`__Host-` name prefixes on top of a pluggable [`Store`].
//!
//! # Usage
//!
//! ```rust
//! use cookiejar::CookieJar;
//!
//! let jar = CookieJar::new();
//! jar.set_cookie_sync("a=1; Domain=example.com; Path=/foo", "https://example.com/foo/bar")
//!     .unwrap();
//!
//! let header = jar.get_cookie_string_sync("https://example.com/foo/bar/baz").unwrap();
//! assert_eq!(header, "a=1");
//!
//! let header = jar.get_cookie_string_sync("https://other.com/foo").unwrap();
//! assert_eq!(header, "");
//! ```
//!
//! # Stores
//!
//! The jar persists cookies through the [`Store`] trait. Every jar operation
//! is `async` so that stores may perform I/O; each also has a `_sync` twin
//! for stores that report themselves [synchronous](Store::synchronous()),
//! such as the default [`MemoryCookieStore`].
//!
//! # Building blocks
//!
//! The matching algorithms the jar is built from are public: see the
//! [`domain`], [`path`] and [`pubsuffix`] modules, [`parse_date()`] and
//! [`cookie_compare()`].

#![warn(missing_docs)]

mod builder;
mod compare;
mod draft;
mod error;
mod jar;
mod json;
mod max_age;
mod parse;
mod plain;
mod timestamp;

pub mod domain;
pub mod path;
pub mod prefix;
pub mod pubsuffix;
pub mod store;

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use time::{OffsetDateTime, UtcOffset};

pub use crate::builder::CookieBuilder;
pub use crate::compare::cookie_compare;
pub use crate::draft::{SameSite, SameSiteContext};
pub use crate::error::{Error, Rejection};
pub use crate::jar::{CookieInput, CookieJar, GetCookiesOptions, JarOptions};
pub use crate::jar::{SerializedJar, SetCookieOptions};
pub use crate::max_age::MaxAge;
pub use crate::parse::{parse_date, ParseError};
pub use crate::plain::PlainCookie;
pub use crate::prefix::PrefixSecurity;
pub use crate::store::{MemoryCookieStore, Store};
pub use crate::timestamp::{Timestamp, MAX_TIME};

#[doc(no_inline)]
pub use time;

/// Number of cookies constructed so far in this process.
static COOKIES_CREATED: AtomicU64 = AtomicU64::new(0);

#[inline]
fn next_creation_index() -> u64 {
    COOKIES_CREATED.fetch_add(1, Ordering::Relaxed) + 1
}

/// Representation of an HTTP cookie.
///
/// # Constructing a `Cookie`
///
/// To construct a cookie with only a name/value, use [`Cookie::new()`]:
///
/// ```rust
/// use cookiejar::Cookie;
///
/// let cookie = Cookie::new("name", "value");
/// assert_eq!(&cookie.to_string(), "name=value");
/// ```
///
/// To construct more elaborate cookies, use [`Cookie::build()`] and
/// [`CookieBuilder`] methods:
///
/// ```rust
/// use cookiejar::Cookie;
///
/// let cookie = Cookie::build("name", "value")
///     .domain("www.rust-lang.org")
///     .path("/")
///     .secure(true)
///     .http_only(true)
///     .build();
/// ```
///
/// # Jar state
///
/// Besides the attributes of `Set-Cookie`, a cookie carries the state a jar
/// keeps about it: whether it is [host-only](Cookie::host_only()), whether
/// its path was [defaulted](Cookie::path_is_default()), when it was
/// [created](Cookie::creation()) and [last accessed](Cookie::last_accessed()),
/// and a process-wide [creation index](Cookie::creation_index()) that breaks
/// ties between cookies created in the same millisecond.
///
/// # Equality
///
/// Two cookies compare equal when their attributes and host-only/default-path
/// flags agree. The creation and access timestamps and the creation index
/// are bookkeeping and do not take part.
#[derive(Debug, Clone)]
pub struct Cookie {
    name: String,
    value: String,
    expires: Option<Timestamp>,
    max_age: Option<MaxAge>,
    domain: Option<String>,
    path: Option<String>,
    secure: bool,
    http_only: bool,
    extensions: Option<Vec<String>>,
    same_site: Option<SameSite>,
    host_only: Option<bool>,
    path_is_default: Option<bool>,
    creation: Option<Timestamp>,
    last_accessed: Option<Timestamp>,
    creation_index: u64,
}

impl Cookie {
    /// Creates a new `Cookie` with the given name and value.
    ///
    /// The cookie never expires, is stamped with the current time as its
    /// creation time and receives the next creation index.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, Timestamp};
    ///
    /// let cookie = Cookie::new("name", "value");
    /// assert_eq!(cookie.name_value(), ("name", "value"));
    /// assert_eq!(cookie.expires(), Some(Timestamp::Infinity));
    /// assert!(cookie.creation().is_some());
    /// ```
    pub fn new<N, V>(name: N, value: V) -> Cookie
        where N: Into<String>,
              V: Into<String>
    {
        Cookie {
            name: name.into(),
            value: value.into(),
            expires: Some(Timestamp::Infinity),
            max_age: None,
            domain: None,
            path: None,
            secure: false,
            http_only: false,
            extensions: None,
            same_site: None,
            host_only: None,
            path_is_default: None,
            creation: Some(Timestamp::now()),
            last_accessed: None,
            creation_index: next_creation_index(),
        }
    }

    /// Creates a new `CookieBuilder` instance from the given name and value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let c = Cookie::build("foo", "bar")
    ///     .path("/")
    ///     .secure(true)
    ///     .build();
    ///
    /// assert_eq!(c.path(), Some("/"));
    /// assert!(c.secure());
    /// ```
    pub fn build<N, V>(name: N, value: V) -> CookieBuilder
        where N: Into<String>,
              V: Into<String>
    {
        CookieBuilder::new(name, value)
    }

    /// Parses a `Cookie` from the given `Set-Cookie` header value.
    ///
    /// The name must be non-empty. Attributes are processed left to right
    /// and a repeated attribute overwrites the earlier occurrence.
    /// Unrecognized attributes are kept as [extensions](Cookie::extensions()).
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, MaxAge};
    ///
    /// let c = Cookie::parse("foo=bar; HttpOnly; Max-Age=10; Max-Age=20").unwrap();
    /// assert_eq!(c.name_value(), ("foo", "bar"));
    /// assert!(c.http_only());
    /// assert_eq!(c.max_age(), Some(MaxAge::Seconds(20)));
    ///
    /// assert!(Cookie::parse("=bar").is_err());
    /// ```
    pub fn parse<S: AsRef<str>>(s: S) -> Result<Cookie, ParseError> {
        parse::parse_cookie(s.as_ref(), false)
    }

    /// Parses a `Cookie` like [`Cookie::parse()`], but accepts a cookie
    /// without a name. Such a cookie is sent as its bare value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let c = Cookie::parse_loose("=bar").unwrap();
    /// assert_eq!(c.name_value(), ("", "bar"));
    /// assert_eq!(c.to_string(), "bar");
    /// ```
    pub fn parse_loose<S: AsRef<str>>(s: S) -> Result<Cookie, ParseError> {
        parse::parse_cookie(s.as_ref(), true)
    }

    /// Returns the name of `self`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of `self`.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the name and value of `self` as a tuple of `(name, value)`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let c = Cookie::new("name", "value");
    /// assert_eq!(c.name_value(), ("name", "value"));
    /// ```
    #[inline]
    pub fn name_value(&self) -> (&str, &str) {
        (self.name(), self.value())
    }

    /// Returns the absolute expiry of `self`: `Some(Timestamp::Infinity)` for
    /// a cookie without an `Expires` attribute, and `None` when the expiry
    /// has been [cleared](Cookie::unset_expires()).
    #[inline]
    pub fn expires(&self) -> Option<Timestamp> {
        self.expires
    }

    /// Returns the `Max-Age` attribute of `self`, if any.
    #[inline]
    pub fn max_age(&self) -> Option<MaxAge> {
        self.max_age
    }

    /// Returns the `Domain` of `self` as it was set, if any. See
    /// [`Cookie::canonicalized_domain()`] for the form used in matching.
    #[inline]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Returns the `Path` of `self`, if any.
    #[inline]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns whether `self` carries the `Secure` attribute.
    #[inline]
    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Returns whether `self` carries the `HttpOnly` attribute.
    #[inline]
    pub fn http_only(&self) -> bool {
        self.http_only
    }

    /// Returns the `SameSite` attribute of `self`, if any.
    #[inline]
    pub fn same_site(&self) -> Option<SameSite> {
        self.same_site
    }

    /// Returns the unrecognized attributes of `self`, verbatim and in the
    /// order they were parsed.
    #[inline]
    pub fn extensions(&self) -> Option<&[String]> {
        self.extensions.as_deref()
    }

    /// Returns whether `self` only matches its exact domain. `None` until a
    /// jar has stored the cookie.
    #[inline]
    pub fn host_only(&self) -> Option<bool> {
        self.host_only
    }

    /// Returns whether the path of `self` was derived from the request URL
    /// rather than a `Path` attribute.
    #[inline]
    pub fn path_is_default(&self) -> Option<bool> {
        self.path_is_default
    }

    /// Returns when `self` was created.
    #[inline]
    pub fn creation(&self) -> Option<Timestamp> {
        self.creation
    }

    /// Returns when `self` was last returned by a jar.
    #[inline]
    pub fn last_accessed(&self) -> Option<Timestamp> {
        self.last_accessed
    }

    /// Returns the process-wide creation index of `self`. Indices strictly
    /// increase with each constructed cookie and are never reused.
    #[inline]
    pub fn creation_index(&self) -> u64 {
        self.creation_index
    }

    /// Sets the name of `self` to `name`.
    pub fn set_name<N: Into<String>>(&mut self, name: N) {
        self.name = name.into();
    }

    /// Sets the value of `self` to `value`.
    pub fn set_value<V: Into<String>>(&mut self, value: V) {
        self.value = value.into();
    }

    /// Sets the expiry of `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, Timestamp};
    /// use cookiejar::time::macros::datetime;
    ///
    /// let mut c = Cookie::new("name", "value");
    /// c.set_expires(datetime!(2015-10-21 07:28:00 UTC));
    /// assert!(c.is_persistent());
    ///
    /// c.set_expires(Timestamp::Infinity);
    /// assert!(!c.is_persistent());
    /// ```
    #[inline]
    pub fn set_expires<T: Into<Timestamp>>(&mut self, expires: T) {
        self.expires = Some(expires.into());
    }

    /// Sets the expiry of `self` from a cookie date string. A date that
    /// doesn't parse makes the cookie a session cookie.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, Timestamp};
    ///
    /// let mut c = Cookie::new("name", "value");
    /// c.set_expires_str("Wed, 21 Oct 2015 07:28:00 GMT");
    /// assert!(c.expires().unwrap().datetime().is_some());
    ///
    /// c.set_expires_str("tomorrow-ish");
    /// assert_eq!(c.expires(), Some(Timestamp::Infinity));
    /// ```
    pub fn set_expires_str(&mut self, expires: &str) {
        self.expires = Some(parse_date(expires).map_or(Timestamp::Infinity, Timestamp::from));
    }

    /// Clears the expiry of `self` entirely. Unlike `Timestamp::Infinity`,
    /// a cleared expiry has no expiry time at all.
    #[inline]
    pub fn unset_expires(&mut self) {
        self.expires = None;
    }

    /// Sets or clears the `Max-Age` of `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, MaxAge};
    ///
    /// let mut c = Cookie::new("name", "value");
    /// c.set_max_age(MaxAge::Seconds(60));
    /// assert_eq!(c.max_age(), Some(MaxAge::Seconds(60)));
    ///
    /// c.set_max_age(None);
    /// assert_eq!(c.max_age(), None);
    /// ```
    #[inline]
    pub fn set_max_age<T: Into<Option<MaxAge>>>(&mut self, max_age: T) {
        self.max_age = max_age.into();
    }

    /// Sets the `Domain` of `self` to `domain`.
    pub fn set_domain<D: Into<String>>(&mut self, domain: D) {
        self.domain = Some(domain.into());
    }

    /// Removes the `Domain` of `self`.
    #[inline]
    pub fn unset_domain(&mut self) {
        self.domain = None;
    }

    /// Sets the `Path` of `self` to `path`.
    pub fn set_path<P: Into<String>>(&mut self, path: P) {
        self.path = Some(path.into());
    }

    /// Removes the `Path` of `self`.
    #[inline]
    pub fn unset_path(&mut self) {
        self.path = None;
    }

    /// Sets the `Secure` flag of `self`.
    #[inline]
    pub fn set_secure(&mut self, value: bool) {
        self.secure = value;
    }

    /// Sets the `HttpOnly` flag of `self`.
    #[inline]
    pub fn set_http_only(&mut self, value: bool) {
        self.http_only = value;
    }

    /// Sets or clears the `SameSite` attribute of `self`.
    #[inline]
    pub fn set_same_site<T: Into<Option<SameSite>>>(&mut self, value: T) {
        self.same_site = value.into();
    }

    /// Appends an unrecognized attribute, rendered verbatim after the known
    /// ones.
    pub fn add_extension<E: Into<String>>(&mut self, extension: E) {
        self.extensions.get_or_insert_with(Vec::new).push(extension.into());
    }

    /// Sets whether `self` is host-only.
    #[inline]
    pub fn set_host_only<T: Into<Option<bool>>>(&mut self, value: T) {
        self.host_only = value.into();
    }

    /// Sets whether the path of `self` was defaulted.
    #[inline]
    pub fn set_path_is_default<T: Into<Option<bool>>>(&mut self, value: T) {
        self.path_is_default = value.into();
    }

    /// Sets the creation time of `self`.
    #[inline]
    pub fn set_creation<T: Into<Option<Timestamp>>>(&mut self, value: T) {
        self.creation = value.into();
    }

    /// Sets the last access time of `self`.
    #[inline]
    pub fn set_last_accessed<T: Into<Option<Timestamp>>>(&mut self, value: T) {
        self.last_accessed = value.into();
    }

    /// Overrides the creation index of `self`. Jars use this to carry the
    /// index of a cookie over to its replacement; tests use it to pin
    /// orderings.
    #[inline]
    pub fn set_creation_index(&mut self, index: u64) {
        self.creation_index = index;
    }

    /// Returns the number of milliseconds `self` has left to live as of
    /// `now`.
    ///
    /// A finite `Max-Age` wins: it yields `Max-Age` in milliseconds, or `0`
    /// when it isn't positive. Otherwise an infinite `Expires` yields
    /// `f64::INFINITY`, and an absolute `Expires` yields its distance from
    /// `now`. A cookie whose expiry has been cleared is treated as expiring
    /// `now`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, MaxAge};
    /// use cookiejar::time::OffsetDateTime;
    ///
    /// let now = OffsetDateTime::now_utc();
    /// let mut c = Cookie::new("name", "value");
    /// assert_eq!(c.ttl(now), f64::INFINITY);
    ///
    /// c.set_max_age(MaxAge::Seconds(5));
    /// assert_eq!(c.ttl(now), 5000.0);
    ///
    /// c.set_max_age(MaxAge::Seconds(-5));
    /// assert_eq!(c.ttl(now), 0.0);
    /// ```
    pub fn ttl(&self, now: OffsetDateTime) -> f64 {
        match self.max_age {
            Some(MaxAge::Seconds(n)) => return n.max(0) as f64 * 1000.0,
            Some(MaxAge::Infinity) => return f64::INFINITY,
            Some(MaxAge::NegInfinity) => return 0.0,
            None => {}
        }

        let now_ms = timestamp::unix_millis(now) as f64;
        match self.expires {
            Some(Timestamp::Infinity) => f64::INFINITY,
            Some(Timestamp::DateTime(dt)) => timestamp::unix_millis(dt) as f64 - now_ms,
            None => 0.0,
        }
    }

    /// Returns the absolute expiry time of `self` in Unix milliseconds.
    ///
    /// `Max-Age` takes precedence and counts from `now`, falling back to the
    /// last access time and then to the current time. A `Max-Age` that isn't
    /// positive yields `f64::NEG_INFINITY` and an infinite one
    /// `f64::INFINITY`. Without `Max-Age`, the `Expires`
    /// attribute decides: `f64::INFINITY` for a session cookie, `None` when
    /// the expiry has been cleared.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, MaxAge};
    /// use cookiejar::time::macros::datetime;
    ///
    /// let now = datetime!(1970-01-01 00:00:10 UTC);
    /// let mut c = Cookie::new("name", "value");
    /// assert_eq!(c.expiry_time(Some(now)), Some(f64::INFINITY));
    ///
    /// c.set_max_age(MaxAge::Seconds(5));
    /// assert_eq!(c.expiry_time(Some(now)), Some(15_000.0));
    ///
    /// c.set_max_age(MaxAge::Seconds(0));
    /// assert_eq!(c.expiry_time(Some(now)), Some(f64::NEG_INFINITY));
    /// ```
    pub fn expiry_time(&self, now: Option<OffsetDateTime>) -> Option<f64> {
        if let Some(max_age) = self.max_age {
            let relative_to = match now {
                Some(now) => Timestamp::DateTime(now),
                None => self.last_accessed.unwrap_or_else(Timestamp::now),
            };

            let relative_ms = match relative_to {
                Timestamp::DateTime(dt) => timestamp::unix_millis(dt) as f64,
                Timestamp::Infinity => return Some(f64::INFINITY),
            };

            let age = match max_age {
                MaxAge::Seconds(n) if n > 0 => n as f64 * 1000.0,
                MaxAge::Infinity => return Some(f64::INFINITY),
                MaxAge::Seconds(_) | MaxAge::NegInfinity => f64::NEG_INFINITY,
            };

            return Some(relative_ms + age);
        }

        self.expires.map(Timestamp::unix_millis)
    }

    /// Returns [`Cookie::expiry_time()`] as a date. An infinite expiry maps
    /// to [`MAX_TIME`] and an already-elapsed one to the Unix epoch.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, MaxAge, MAX_TIME};
    /// use cookiejar::time::OffsetDateTime;
    ///
    /// let mut c = Cookie::new("name", "value");
    /// let date = c.expiry_date(None).unwrap();
    /// assert_eq!(date.unix_timestamp() * 1000, MAX_TIME);
    ///
    /// c.set_max_age(MaxAge::Seconds(-1));
    /// assert_eq!(c.expiry_date(None), Some(OffsetDateTime::UNIX_EPOCH));
    /// ```
    pub fn expiry_date(&self, now: Option<OffsetDateTime>) -> Option<OffsetDateTime> {
        let millis = self.expiry_time(now)?;
        let date = if millis == f64::INFINITY {
            timestamp::from_unix_millis(MAX_TIME)
        } else if millis == f64::NEG_INFINITY {
            OffsetDateTime::UNIX_EPOCH
        } else {
            timestamp::from_unix_millis(millis as i64)
        };

        Some(date)
    }

    /// Returns `true` if `self` outlives the browsing session, i.e. it has
    /// a `Max-Age` or an absolute `Expires`.
    #[inline]
    pub fn is_persistent(&self) -> bool {
        self.max_age.is_some() || self.expires != Some(Timestamp::Infinity)
    }

    /// Returns the canonical form of `self`'s domain, the form used for
    /// matching and storage.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let mut c = Cookie::new("name", "value");
    /// assert_eq!(c.canonicalized_domain(), None);
    ///
    /// c.set_domain(".Example.COM");
    /// assert_eq!(c.canonicalized_domain().as_deref(), Some("example.com"));
    /// ```
    pub fn canonicalized_domain(&self) -> Option<String> {
        self.domain.as_deref().map(domain::canonical_domain)
    }

    /// Checks `self` against the grammar of RFC 6265 §4.1.1.
    ///
    /// The value must be a non-empty run of cookie-octets, a `Max-Age` must
    /// be positive, a `Path` must be a non-empty run of path characters and
    /// a `Domain` must not end in `.` and must have a registrable part.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// assert!(Cookie::parse("a=b; Domain=example.com; Path=/").unwrap().validate());
    /// assert!(!Cookie::new("a", "b c").validate());
    /// assert!(!Cookie::parse("a=b; Domain=com").unwrap().validate());
    /// ```
    pub fn validate(&self) -> bool {
        let is_cookie_octet = |c: char| matches!(c,
            '\x21' | '\x23'..='\x2B' | '\x2D'..='\x3A' | '\x3C'..='\x5B' | '\x5D'..='\x7E');

        if self.value.is_empty() || !self.value.chars().all(is_cookie_octet) {
            return false;
        }

        if let Some(max_age) = self.max_age {
            if !max_age.is_valid() {
                return false;
            }
        }

        if let Some(ref path) = self.path {
            let is_path_char = |c: char| matches!(c, '\x20'..='\x3A' | '\x3C'..='\x7E');
            if path.is_empty() || !path.chars().all(is_path_char) {
                return false;
            }
        }

        if let Some(domain) = self.canonicalized_domain() {
            if domain.ends_with('.') {
                return false;
            }

            let options = pubsuffix::SuffixOptions::default();
            match pubsuffix::get_public_suffix(&domain, options) {
                Ok(Some(_)) => {}
                _ => return false,
            }
        }

        true
    }

    /// Wraps `self` in a [`PlainCookie`] whose `Display` renders the
    /// `Cookie` header form: `name=value`, or the bare value when the name
    /// is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let mut c = Cookie::new("name", "value");
    /// c.set_domain("example.com");
    /// assert_eq!(c.plain().to_string(), "name=value");
    /// ```
    #[inline]
    pub fn plain(&self) -> PlainCookie<'_> {
        PlainCookie(self)
    }

    /// Serializes `self` to its sparse JSON form. Attributes at their
    /// default are left out and the creation index is never written.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let mut c = Cookie::parse("a=b; Path=/; Secure").unwrap();
    /// c.set_creation(None);
    /// assert_eq!(c.to_json().unwrap(), r#"{"key":"a","value":"b","path":"/","secure":true}"#);
    /// ```
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a cookie from the form written by [`Cookie::to_json()`].
    /// The cookie receives a fresh creation index.
    pub fn from_json(json: &str) -> Result<Cookie, Error> {
        Ok(serde_json::from_str(json)?)
    }

    fn expires_datetime(&self) -> Option<OffsetDateTime> {
        self.expires.and_then(Timestamp::datetime)
    }
}

impl PartialEq for Cookie {
    fn eq(&self, other: &Cookie) -> bool {
        self.name == other.name
            && self.value == other.value
            && self.expires == other.expires
            && self.max_age == other.max_age
            && self.domain == other.domain
            && self.path == other.path
            && self.secure == other.secure
            && self.http_only == other.http_only
            && self.extensions == other.extensions
            && self.same_site == other.same_site
            && self.host_only == other.host_only
            && self.path_is_default == other.path_is_default
    }
}

impl fmt::Display for Cookie {
    /// Formats the cookie `self` as a `Set-Cookie` header value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let mut cookie = Cookie::build("foo", "bar").path("/").build();
    /// assert_eq!(&cookie.to_string(), "foo=bar; Path=/");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.plain())?;

        if let Some(time) = self.expires_datetime() {
            let time = time.to_offset(UtcOffset::UTC);
            let formatted = time.format(&parse::FMT1).map_err(|_| fmt::Error)?;
            write!(f, "; Expires={}", formatted)?;
        }

        if let Some(MaxAge::Seconds(n)) = self.max_age {
            write!(f, "; Max-Age={}", n)?;
        }

        if let Some(domain) = self.domain() {
            if !domain.is_empty() && self.host_only != Some(true) {
                write!(f, "; Domain={}", domain)?;
            }
        }

        if let Some(path) = self.path().filter(|p| !p.is_empty()) {
            write!(f, "; Path={}", path)?;
        }

        if self.secure {
            write!(f, "; Secure")?;
        }

        if self.http_only {
            write!(f, "; HttpOnly")?;
        }

        match self.same_site {
            Some(SameSite::None) | None => {}
            Some(same_site) => write!(f, "; SameSite={}", same_site)?,
        }

        for extension in self.extensions().unwrap_or_default() {
            write!(f, "; {}", extension)?;
        }

        Ok(())
    }
}

impl FromStr for Cookie {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Cookie, ParseError> {
        Cookie::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::{Cookie, MaxAge, SameSite, Timestamp, MAX_TIME};
    use time::macros::datetime;
    use time::{Duration, OffsetDateTime};

    #[test]
    fn format_skips_empty_domain_and_path() {
        let mut cookie = Cookie::build("foo", "bar").secure(true).build();
        cookie.set_domain("");
        cookie.set_path("");
        assert_eq!(&cookie.to_string(), "foo=bar; Secure");
    }

    #[test]
    fn format() {
        let cookie = Cookie::new("foo", "bar");
        assert_eq!(&cookie.to_string(), "foo=bar");

        let cookie = Cookie::build("foo", "bar").http_only(true).build();
        assert_eq!(&cookie.to_string(), "foo=bar; HttpOnly");

        let cookie = Cookie::build("foo", "bar").max_age(MaxAge::Seconds(10)).build();
        assert_eq!(&cookie.to_string(), "foo=bar; Max-Age=10");

        let cookie = Cookie::build("foo", "bar").max_age(MaxAge::Infinity).build();
        assert_eq!(&cookie.to_string(), "foo=bar");

        let cookie = Cookie::build("foo", "bar").secure(true).build();
        assert_eq!(&cookie.to_string(), "foo=bar; Secure");

        let cookie = Cookie::build("foo", "bar").path("/").build();
        assert_eq!(&cookie.to_string(), "foo=bar; Path=/");

        let cookie = Cookie::build("foo", "bar").domain("www.rust-lang.org").build();
        assert_eq!(&cookie.to_string(), "foo=bar; Domain=www.rust-lang.org");

        let expires = datetime!(2015-10-21 07:28:00 UTC);
        let cookie = Cookie::build("foo", "bar").expires(expires).build();
        assert_eq!(&cookie.to_string(), "foo=bar; Expires=Wed, 21 Oct 2015 07:28:00 GMT");

        let cookie = Cookie::build("foo", "bar").same_site(SameSite::Strict).build();
        assert_eq!(&cookie.to_string(), "foo=bar; SameSite=Strict");

        let cookie = Cookie::build("foo", "bar").same_site(SameSite::Lax).build();
        assert_eq!(&cookie.to_string(), "foo=bar; SameSite=Lax");

        let cookie = Cookie::build("foo", "bar").same_site(SameSite::None).build();
        assert_eq!(&cookie.to_string(), "foo=bar");

        let cookie = Cookie::build("", "bar").extension("Priority=High").build();
        assert_eq!(&cookie.to_string(), "bar; Priority=High");
    }

    #[test]
    fn format_attribute_order() {
        let cookie = Cookie::parse("a=b; Partitioned; samesite=lax; HttpOnly; Secure; \
                                    path=/x; domain=Example.com; max-age=5; \
                                    expires=Wed, 21 Oct 2015 07:28:00 GMT").unwrap();

        assert_eq!(
            cookie.to_string(),
            "a=b; Expires=Wed, 21 Oct 2015 07:28:00 GMT; Max-Age=5; Domain=example.com; \
             Path=/x; Secure; HttpOnly; SameSite=Lax; Partitioned"
        );
    }

    #[test]
    fn host_only_cookies_omit_domain() {
        let mut cookie = Cookie::build("a", "b").domain("example.com").build();
        cookie.set_host_only(true);
        assert_eq!(cookie.to_string(), "a=b");

        cookie.set_host_only(false);
        assert_eq!(cookie.to_string(), "a=b; Domain=example.com");
    }

    #[test]
    fn creation_index_increases() {
        let first = Cookie::new("a", "b");
        let second = Cookie::new("a", "b");
        assert!(second.creation_index() > first.creation_index());

        // Clones keep their identity.
        assert_eq!(first.clone().creation_index(), first.creation_index());
    }

    #[test]
    fn creation_index_is_unique_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| {
                (0..100).map(|_| Cookie::new("a", "b").creation_index()).collect::<Vec<_>>()
            }))
            .collect();

        let mut indices: Vec<u64> = handles.into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        let total = indices.len();
        indices.sort_unstable();
        indices.dedup();
        assert_eq!(indices.len(), total);
    }

    #[test]
    fn ttl() {
        let now = OffsetDateTime::now_utc();
        let mut cookie = Cookie::new("a", "b");
        assert_eq!(cookie.ttl(now), f64::INFINITY);

        cookie.set_max_age(MaxAge::Seconds(0));
        assert_eq!(cookie.ttl(now), 0.0);

        cookie.set_max_age(MaxAge::Seconds(-5));
        assert_eq!(cookie.ttl(now), 0.0);

        cookie.set_max_age(MaxAge::Seconds(60));
        assert_eq!(cookie.ttl(now), 60_000.0);

        cookie.set_max_age(None);
        cookie.set_expires(now + Duration::seconds(30));
        assert_eq!(cookie.ttl(now), 30_000.0);

        cookie.set_expires(now - Duration::seconds(30));
        assert_eq!(cookie.ttl(now), -30_000.0);
    }

    #[test]
    fn ttl_of_cleared_expiry_is_zero() {
        // A cleared expiry reads as "expires now", not as a session cookie.
        let mut cookie = Cookie::new("a", "b");
        cookie.unset_expires();
        assert_eq!(cookie.ttl(OffsetDateTime::now_utc()), 0.0);
    }

    #[test]
    fn expiry_time() {
        let now = datetime!(2020-01-01 00:00:00 UTC);
        let now_ms = now.unix_timestamp() as f64 * 1000.0;

        let mut cookie = Cookie::new("a", "b");
        cookie.set_max_age(MaxAge::Seconds(10));
        assert_eq!(cookie.expiry_time(Some(now)), Some(now_ms + 10_000.0));

        // Without an explicit `now`, Max-Age counts from the last access.
        cookie.set_last_accessed(Timestamp::DateTime(now));
        assert_eq!(cookie.expiry_time(None), Some(now_ms + 10_000.0));

        cookie.set_last_accessed(Timestamp::Infinity);
        assert_eq!(cookie.expiry_time(None), Some(f64::INFINITY));

        cookie.set_max_age(MaxAge::NegInfinity);
        assert_eq!(cookie.expiry_time(Some(now)), Some(f64::NEG_INFINITY));

        cookie.set_max_age(MaxAge::Infinity);
        assert_eq!(cookie.expiry_time(Some(now)), Some(f64::INFINITY));
        assert_eq!(cookie.ttl(now), f64::INFINITY);

        cookie.set_max_age(None);
        assert_eq!(cookie.expiry_time(Some(now)), Some(f64::INFINITY));

        cookie.set_expires(now);
        assert_eq!(cookie.expiry_time(None), Some(now_ms));

        cookie.unset_expires();
        assert_eq!(cookie.expiry_time(None), None);
        assert_eq!(cookie.expiry_date(None), None);
    }

    #[test]
    fn expiry_date() {
        let now = datetime!(2020-01-01 00:00:00 UTC);
        let mut cookie = Cookie::new("a", "b");
        assert_eq!(cookie.expiry_date(Some(now)).unwrap().unix_timestamp() * 1000, MAX_TIME);

        cookie.set_max_age(MaxAge::Seconds(90));
        assert_eq!(cookie.expiry_date(Some(now)), Some(now + Duration::seconds(90)));

        cookie.set_max_age(MaxAge::Seconds(0));
        assert_eq!(cookie.expiry_date(Some(now)), Some(OffsetDateTime::UNIX_EPOCH));
    }

    #[test]
    fn persistence() {
        let mut cookie = Cookie::new("a", "b");
        assert!(!cookie.is_persistent());

        cookie.set_max_age(MaxAge::Seconds(1));
        assert!(cookie.is_persistent());

        let cookie = Cookie::parse("a=b; Expires=Wed, 21 Oct 2015 07:28:00 GMT").unwrap();
        assert!(cookie.is_persistent());
    }

    #[test]
    fn validate() {
        assert!(Cookie::new("a", "b").validate());
        assert!(Cookie::parse("a=b; Path=/foo bar").unwrap().validate());

        assert!(!Cookie::new("a", "").validate());
        assert!(!Cookie::new("a", "b;c").validate());
        assert!(!Cookie::new("a", "b\"c").validate());
        assert!(!Cookie::new("a", "b,c").validate());
        assert!(!Cookie::new("a", "b\\c").validate());

        let mut cookie = Cookie::new("a", "b");
        cookie.set_max_age(MaxAge::Seconds(0));
        assert!(!cookie.validate());
        cookie.set_max_age(MaxAge::NegInfinity);
        assert!(!cookie.validate());
        cookie.set_max_age(MaxAge::Infinity);
        assert!(cookie.validate());

        let mut cookie = Cookie::new("a", "b");
        cookie.set_path("");
        assert!(!cookie.validate());
        cookie.set_path("/a;b");
        assert!(!cookie.validate());

        let mut cookie = Cookie::new("a", "b");
        cookie.set_domain("example.com..");
        assert!(!cookie.validate());
        cookie.set_domain("co.uk");
        assert!(!cookie.validate());
        cookie.set_domain("foo.local");
        assert!(!cookie.validate());
        cookie.set_domain("www.example.co.uk");
        assert!(cookie.validate());
    }

    #[test]
    fn equality_ignores_bookkeeping() {
        let mut a = Cookie::new("a", "b");
        let b = Cookie::new("a", "b");
        assert_eq!(a, b);

        a.set_last_accessed(Timestamp::now());
        a.set_creation(None);
        assert_eq!(a, b);

        a.set_host_only(true);
        assert_ne!(a, b);
    }

    #[test]
    fn from_str() {
        let cookie: Cookie = "a=b; Secure".parse().unwrap();
        assert!(cookie.secure());
        assert!("".parse::<Cookie>().is_err());
    }
}
