use std::borrow::{Borrow, BorrowMut};

use crate::{Cookie, MaxAge, SameSite, Timestamp};

/// Structure that follows the builder pattern for building `Cookie` structs.
///
/// To construct a cookie:
///
///   1. Call [`Cookie::build()`] to start building.
///   2. Use any of the builder methods to set fields in the cookie.
///   3. Call [`CookieBuilder::build()`] to retrieve the built cookie.
///
/// # Example
///
/// ```rust
/// use cookiejar::{Cookie, MaxAge};
///
/// let cookie: Cookie = Cookie::build("name", "value")
///     .domain("www.rust-lang.org")
///     .path("/")
///     .secure(true)
///     .http_only(true)
///     .max_age(MaxAge::Seconds(86400))
///     .build();
/// ```
///
/// A builder can be handed straight to
/// [`CookieJar::set_cookie()`](crate::CookieJar::set_cookie()):
///
/// ```rust
/// use cookiejar::{Cookie, CookieJar};
///
/// let jar = CookieJar::new();
/// jar.set_cookie_sync(Cookie::build("key", "value").path("/"), "http://example.com/").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CookieBuilder {
    /// The cookie being built.
    cookie: Cookie,
}

impl CookieBuilder {
    /// Creates a new `CookieBuilder` instance from the given name and value.
    ///
    /// This method is typically called indirectly via [`Cookie::build()`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, CookieBuilder};
    ///
    /// // These two snippets are equivalent:
    ///
    /// let c = CookieBuilder::new("foo", "bar");
    /// assert_eq!(c.inner().name_value(), ("foo", "bar"));
    ///
    /// let c = Cookie::new("foo", "bar");
    /// assert_eq!(c.name_value(), ("foo", "bar"));
    /// ```
    pub fn new<N, V>(name: N, value: V) -> Self
        where N: Into<String>,
              V: Into<String>
    {
        CookieBuilder { cookie: Cookie::new(name, value) }
    }

    /// Sets the `expires` field in the cookie being built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, Timestamp};
    /// use cookiejar::time::OffsetDateTime;
    ///
    /// let c = Cookie::build("foo", "bar").expires(OffsetDateTime::now_utc());
    /// assert!(c.inner().expires().and_then(Timestamp::datetime).is_some());
    /// ```
    #[inline]
    pub fn expires<E: Into<Timestamp>>(mut self, when: E) -> Self {
        self.cookie.set_expires(when);
        self
    }

    /// Sets the `max_age` field in the cookie being built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, MaxAge};
    /// use cookiejar::time::Duration;
    ///
    /// let c = Cookie::build("foo", "bar").max_age(Duration::minutes(30));
    /// assert_eq!(c.inner().max_age(), Some(MaxAge::Seconds(30 * 60)));
    /// ```
    #[inline]
    pub fn max_age<A: Into<MaxAge>>(mut self, value: A) -> Self {
        self.cookie.set_max_age(value.into());
        self
    }

    /// Sets the `domain` field in the cookie being built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let c = Cookie::build("foo", "bar").domain("www.rust-lang.org");
    /// assert_eq!(c.inner().domain(), Some("www.rust-lang.org"));
    /// ```
    pub fn domain<D: Into<String>>(mut self, value: D) -> Self {
        self.cookie.set_domain(value);
        self
    }

    /// Sets the `path` field in the cookie being built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let c = Cookie::build("foo", "bar").path("/");
    /// assert_eq!(c.inner().path(), Some("/"));
    /// ```
    pub fn path<P: Into<String>>(mut self, path: P) -> Self {
        self.cookie.set_path(path);
        self
    }

    /// Sets the `secure` field in the cookie being built.
    #[inline]
    pub fn secure(mut self, value: bool) -> Self {
        self.cookie.set_secure(value);
        self
    }

    /// Sets the `http_only` field in the cookie being built.
    #[inline]
    pub fn http_only(mut self, value: bool) -> Self {
        self.cookie.set_http_only(value);
        self
    }

    /// Sets the `same_site` field in the cookie being built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{Cookie, SameSite};
    ///
    /// let c = Cookie::build("foo", "bar").same_site(SameSite::Strict);
    /// assert_eq!(c.inner().same_site(), Some(SameSite::Strict));
    /// ```
    #[inline]
    pub fn same_site(mut self, value: SameSite) -> Self {
        self.cookie.set_same_site(value);
        self
    }

    /// Appends an extension attribute, written verbatim after the known
    /// attributes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let c = Cookie::build("foo", "bar").extension("Priority=High").build();
    /// assert_eq!(c.to_string(), "foo=bar; Priority=High");
    /// ```
    pub fn extension<E: Into<String>>(mut self, value: E) -> Self {
        self.cookie.add_extension(value);
        self
    }

    /// Returns a borrow to the cookie currently being built.
    #[inline]
    pub fn inner(&self) -> &Cookie {
        &self.cookie
    }

    /// Returns a mutable borrow to the cookie currently being built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::Cookie;
    ///
    /// let mut builder = Cookie::build("name", "value").http_only(true);
    /// assert!(builder.inner().http_only());
    ///
    /// builder.inner_mut().set_http_only(false);
    /// assert!(!builder.inner().http_only());
    /// ```
    #[inline]
    pub fn inner_mut(&mut self) -> &mut Cookie {
        &mut self.cookie
    }

    /// Finishes building and returns the built `Cookie`.
    #[inline]
    pub fn build(self) -> Cookie {
        self.cookie
    }
}

impl std::fmt::Display for CookieBuilder {
    #[inline(always)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.cookie.fmt(f)
    }
}

impl From<CookieBuilder> for Cookie {
    #[inline]
    fn from(builder: CookieBuilder) -> Cookie {
        builder.cookie
    }
}

// NOTE: We don't implement `Deref` or `DerefMut` because there are tons of name
// collisions with builder methods.
impl Borrow<Cookie> for CookieBuilder {
    fn borrow(&self) -> &Cookie {
        &self.cookie
    }
}

impl BorrowMut<Cookie> for CookieBuilder {
    fn borrow_mut(&mut self) -> &mut Cookie {
        &mut self.cookie
    }
}

impl AsRef<Cookie> for CookieBuilder {
    fn as_ref(&self) -> &Cookie {
        &self.cookie
    }
}

impl AsMut<Cookie> for CookieBuilder {
    fn as_mut(&mut self) -> &mut Cookie {
        &mut self.cookie
    }
}

impl PartialEq<Cookie> for CookieBuilder {
    fn eq(&self, other: &Cookie) -> bool {
        &self.cookie == other
    }
}
