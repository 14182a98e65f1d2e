//! A policy-enforcing cookie jar over a pluggable [`Store`].
//!
//! The jar implements the storage model of RFC 6265 §5.3 and the retrieval
//! algorithm of §5.4. Setting a cookie scopes it to the request URL and
//! applies the jar's security policy; getting cookies filters a store's
//! candidates down to those a request may carry.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::FutureExt;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

use crate::domain::{canonical_domain, domain_match, is_ip_literal};
use crate::path::{default_path, path_match};
use crate::prefix::check_prefixes;
use crate::pubsuffix::{get_public_suffix, SuffixOptions};
use crate::{cookie_compare, Cookie, CookieBuilder, Error, MemoryCookieStore, PrefixSecurity};
use crate::{Rejection, SameSite, SameSiteContext, Store, Timestamp};

/// Jar-wide configuration.
///
/// # Example
///
/// ```rust
/// use cookiejar::{CookieJar, JarOptions, PrefixSecurity};
///
/// let jar = CookieJar::with_options(JarOptions {
///     prefix_security: PrefixSecurity::Strict,
///     ..JarOptions::default()
/// });
///
/// assert!(jar.options().reject_public_suffixes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JarOptions {
    /// Reject cookies whose `Domain` is a public suffix. Defaults to `true`.
    pub reject_public_suffixes: bool,
    /// Parse `Set-Cookie` strings loosely, allowing cookies without a name.
    /// Defaults to `false`.
    #[serde(rename = "enableLooseMode")]
    pub loose_mode: bool,
    /// Treat `x.localhost`, `x.test` and the like as registrable domains.
    /// Defaults to `true`.
    pub allow_special_use_domain: bool,
    /// What to do with cookies violating their `__Secure-` or `__Host-`
    /// name prefix. Defaults to [`PrefixSecurity::Silent`].
    pub prefix_security: PrefixSecurity,
}

impl Default for JarOptions {
    fn default() -> Self {
        JarOptions {
            reject_public_suffixes: true,
            loose_mode: false,
            allow_special_use_domain: true,
            prefix_security: PrefixSecurity::Silent,
        }
    }
}

/// Options for [`CookieJar::set_cookie_with()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCookieOptions {
    /// Whether the cookie arrives over HTTP rather than a script API. Only
    /// HTTP may set or overwrite `HttpOnly` cookies. Defaults to `true`.
    pub http: bool,
    /// Parse this cookie loosely even if the jar doesn't.
    pub loose: bool,
    /// Resolve policy rejections to `Ok(None)` instead of an error.
    pub ignore_error: bool,
    /// The request's same-site context. `Some(SameSiteContext::None)`
    /// refuses same-site cookies.
    pub same_site_context: Option<SameSiteContext>,
    /// The current time. Defaults to the system clock.
    pub now: Option<OffsetDateTime>,
}

impl Default for SetCookieOptions {
    fn default() -> Self {
        SetCookieOptions {
            http: true,
            loose: false,
            ignore_error: false,
            same_site_context: None,
            now: None,
        }
    }
}

/// Options for [`CookieJar::get_cookies_with()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetCookiesOptions {
    /// Whether the request is made over HTTP rather than a script API.
    /// `HttpOnly` cookies are withheld otherwise. Defaults to `true`.
    pub http: bool,
    /// Whether the request travels over a secure channel. Defaults to
    /// `https:` and `wss:` URLs being secure.
    pub secure: Option<bool>,
    /// Return cookies for every path under the host.
    pub all_paths: bool,
    /// Leave out, and remove from the store, cookies that have expired.
    /// Defaults to `true`.
    pub expire: bool,
    /// Order the cookies with [`cookie_compare()`]. Defaults to `true`.
    pub sort: bool,
    /// The request's same-site context. When set, cookies with a stricter
    /// `SameSite` are withheld; when unset, `SameSite` is not enforced.
    pub same_site_context: Option<SameSiteContext>,
    /// The current time. Defaults to the system clock.
    pub now: Option<OffsetDateTime>,
}

impl Default for GetCookiesOptions {
    fn default() -> Self {
        GetCookiesOptions {
            http: true,
            secure: None,
            all_paths: false,
            expire: true,
            sort: true,
            same_site_context: None,
            now: None,
        }
    }
}

/// The persisted form of a jar: its configuration and every stored cookie.
///
/// # Example
///
/// ```rust
/// use cookiejar::CookieJar;
///
/// let jar = CookieJar::new();
/// jar.set_cookie_sync("a=1", "https://example.com/").unwrap();
///
/// let serialized = jar.serialize_sync().unwrap();
/// assert_eq!(serialized.store_type.as_deref(), Some("MemoryCookieStore"));
/// assert_eq!(serialized.cookies.unwrap().len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedJar {
    /// The library and version that wrote this jar.
    #[serde(default)]
    pub version: String,
    /// The [store type](Store::store_type()) the cookies came from.
    #[serde(default)]
    pub store_type: Option<String>,
    /// The jar's configuration.
    #[serde(flatten)]
    pub options: JarOptions,
    /// The stored cookies, in creation order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookies: Option<Vec<Cookie>>,
}

/// A cookie as handed to [`CookieJar::set_cookie()`]: either a `Set-Cookie`
/// string still to be parsed, or a ready-made [`Cookie`].
#[derive(Debug, Clone)]
pub enum CookieInput {
    /// A `Set-Cookie` header value.
    Header(String),
    /// A parsed or built cookie.
    Cookie(Cookie),
}

impl From<&str> for CookieInput {
    fn from(header: &str) -> Self {
        CookieInput::Header(header.to_string())
    }
}

impl From<String> for CookieInput {
    fn from(header: String) -> Self {
        CookieInput::Header(header)
    }
}

impl From<&String> for CookieInput {
    fn from(header: &String) -> Self {
        CookieInput::Header(header.clone())
    }
}

impl From<Cookie> for CookieInput {
    fn from(cookie: Cookie) -> Self {
        CookieInput::Cookie(cookie)
    }
}

impl From<CookieBuilder> for CookieInput {
    fn from(builder: CookieBuilder) -> Self {
        CookieInput::Cookie(builder.build())
    }
}

/// Runs `fut` to completion without blocking, or fails if `store` isn't
/// synchronous.
fn run_sync<T, F>(store: &dyn Store, op: &'static str, fut: F) -> Result<T, Error>
    where F: Future<Output = Result<T, Error>>
{
    if !store.synchronous() {
        return Err(Error::NotSynchronous(op));
    }

    fut.now_or_never().unwrap_or(Err(Error::NotSynchronous(op)))
}

/// A cookie jar: the policy half of an HTTP user agent's cookie handling.
///
/// The jar owns its configuration and shares its [`Store`]. It holds no
/// cookie state of its own and performs no locking; concurrent use is as
/// consistent as the store makes it.
///
/// Every operation is `async`. Jars over a [synchronous](Store::synchronous())
/// store, such as the default [`MemoryCookieStore`], may also use the
/// `_sync` twin of each operation.
///
/// # Example
///
/// ```rust
/// use cookiejar::{CookieJar, GetCookiesOptions};
/// use futures::executor::block_on;
///
/// let jar = CookieJar::new();
/// let login = "https://example.com/account/login";
/// block_on(jar.set_cookie("session=abc; Secure; HttpOnly", login)).unwrap();
/// block_on(jar.set_cookie("theme=dark; Path=/", "https://example.com/")).unwrap();
///
/// let header = block_on(jar.get_cookie_string("https://example.com/index.html")).unwrap();
/// assert_eq!(header, "theme=dark");
///
/// let profile = "https://example.com/account/profile";
/// let header = block_on(jar.get_cookie_string(profile)).unwrap();
/// assert_eq!(header, "session=abc; theme=dark");
///
/// // Scripts don't see `HttpOnly` cookies.
/// let options = GetCookiesOptions { http: false, ..GetCookiesOptions::default() };
/// let cookies = block_on(jar.get_cookies_with(profile, options)).unwrap();
/// assert_eq!(cookies.len(), 1);
/// ```
pub struct CookieJar {
    store: Arc<dyn Store>,
    options: JarOptions,
}

impl CookieJar {
    /// Creates an empty jar with default options over a new
    /// [`MemoryCookieStore`].
    pub fn new() -> CookieJar {
        CookieJar::with_options(JarOptions::default())
    }

    /// Creates an empty jar with `options` over a new [`MemoryCookieStore`].
    pub fn with_options(options: JarOptions) -> CookieJar {
        CookieJar::with_store_and_options(Arc::new(MemoryCookieStore::new()), options)
    }

    /// Creates a jar with default options over `store`.
    pub fn with_store<S: Store + 'static>(store: S) -> CookieJar {
        CookieJar::with_store_and_options(Arc::new(store), JarOptions::default())
    }

    /// Creates a jar with `options` over a shared `store`.
    pub fn with_store_and_options(store: Arc<dyn Store>, options: JarOptions) -> CookieJar {
        CookieJar { store, options }
    }

    /// Returns the jar's store.
    #[inline]
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Returns the jar's configuration.
    #[inline]
    pub fn options(&self) -> &JarOptions {
        &self.options
    }

    /// Stores `cookie` as if received in a response to `url`, with default
    /// options. See [`CookieJar::set_cookie_with()`].
    pub async fn set_cookie<C>(&self, cookie: C, url: &str) -> Result<Option<Cookie>, Error>
        where C: Into<CookieInput>
    {
        self.set_cookie_with(cookie, url, SetCookieOptions::default()).await
    }

    /// Stores `cookie` as if received in a response to `url`.
    ///
    /// A `Set-Cookie` string is parsed first. The cookie is then scoped to
    /// `url`: without a `Domain` it becomes host-only for the URL's host,
    /// and without a valid `Path` it takes the URL's default path. The
    /// cookie is refused if
    ///
    ///   * its `Domain` is a public suffix and the jar rejects those,
    ///   * its `Domain` does not domain-match the URL's host,
    ///   * it is `HttpOnly` and `options.http` is `false`,
    ///   * it is same-site and the same-site context is cross-site, or
    ///   * it violates its name prefix and the jar enforces prefixes.
    ///
    /// A cookie replacing one with the same domain, path and name keeps the
    /// creation time and index of the original. Non-HTTP callers may not
    /// replace an `HttpOnly` cookie.
    ///
    /// Returns the stored cookie, or `None` if the cookie was dropped: a
    /// prefix violation under [`PrefixSecurity::Silent`], or any refusal
    /// when `options.ignore_error` is set.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidUrl`] if `url` doesn't parse, [`Error::Rejected`] for
    /// a refused cookie, and whatever the store reports.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{CookieJar, Error, Rejection, SetCookieOptions};
    /// use futures::executor::block_on;
    ///
    /// let jar = CookieJar::new();
    ///
    /// let cookie = block_on(jar.set_cookie("a=1", "https://www.example.com/docs/intro"))
    ///     .unwrap()
    ///     .unwrap();
    ///
    /// assert_eq!(cookie.domain(), Some("www.example.com"));
    /// assert_eq!(cookie.host_only(), Some(true));
    /// assert_eq!(cookie.path(), Some("/docs"));
    ///
    /// let err = block_on(jar.set_cookie("a=1; Domain=other.com", "https://example.com/"));
    /// assert!(matches!(err, Err(Error::Rejected(Rejection::DomainMismatch { .. }))));
    ///
    /// let options = SetCookieOptions { ignore_error: true, ..SetCookieOptions::default() };
    /// let dropped = block_on(jar.set_cookie_with("a=1; Domain=other.com", "https://example.com/", options));
    /// assert!(dropped.unwrap().is_none());
    /// ```
    pub async fn set_cookie_with<C>(&self, cookie: C, url: &str, options: SetCookieOptions)
        -> Result<Option<Cookie>, Error>
        where C: Into<CookieInput>
    {
        let url = Url::parse(url)?;
        match self.store_cookie(cookie.into(), &url, &options).await {
            Err(Error::Rejected(reason)) => {
                debug!("rejected cookie from {}: {}", url, reason);
                if options.ignore_error {
                    Ok(None)
                } else {
                    Err(Error::Rejected(reason))
                }
            }
            result => result,
        }
    }

    async fn store_cookie(&self, input: CookieInput, url: &Url, options: &SetCookieOptions)
        -> Result<Option<Cookie>, Error>
    {
        let loose = options.loose || self.options.loose_mode;
        let mut cookie = match input {
            CookieInput::Header(ref header) if loose => Cookie::parse_loose(header)?,
            CookieInput::Header(ref header) => Cookie::parse(header)?,
            CookieInput::Cookie(cookie) => cookie,
        };

        let host = canonical_domain(url.host_str().unwrap_or_default());
        let now = Timestamp::DateTime(options.now.unwrap_or_else(OffsetDateTime::now_utc));
        let cdomain = cookie.canonicalized_domain().filter(|d| !d.is_empty());

        if let Some(ref cdomain) = cdomain {
            if self.options.reject_public_suffixes && !is_ip_literal(cdomain) {
                let suffix_options = SuffixOptions {
                    allow_special_use_domain: self.options.allow_special_use_domain,
                    ignore_error: options.ignore_error,
                };

                if get_public_suffix(cdomain, suffix_options)?.is_none() {
                    return Err(Rejection::PublicSuffix.into());
                }
            }
        }

        match cdomain {
            Some(cdomain) => {
                if !domain_match(&host, &cdomain, false) {
                    return Err(Rejection::DomainMismatch { cookie: cdomain, request: host }.into());
                }

                if cookie.host_only().is_none() {
                    cookie.set_host_only(false);
                }

                cookie.set_domain(cdomain);
            }
            None => {
                cookie.set_host_only(true);
                cookie.set_domain(host);
            }
        }

        if !cookie.path().map_or(false, |path| path.starts_with('/')) {
            cookie.set_path(default_path(url.path()));
            cookie.set_path_is_default(true);
        }

        if !options.http && cookie.http_only() {
            return Err(Rejection::HttpOnly.into());
        }

        let same_site = cookie.same_site().filter(|s| *s != SameSite::None);
        if same_site.is_some() && options.same_site_context == Some(SameSiteContext::None) {
            return Err(Rejection::CrossSiteSameSite.into());
        }

        if self.options.prefix_security != PrefixSecurity::UnsafeDisabled {
            if let Err(reason) = check_prefixes(&cookie) {
                if self.options.prefix_security == PrefixSecurity::Strict {
                    return Err(reason.into());
                }

                debug!("dropping cookie {} from {}: {}", cookie.name(), url, reason);
                return Ok(None);
            }
        }

        let domain = cookie.domain().unwrap_or_default().to_string();
        let path = cookie.path().unwrap_or_default().to_string();
        match self.store.find_cookie(&domain, &path, cookie.name()).await? {
            Some(old) => {
                if !options.http && old.http_only() {
                    return Err(Rejection::OldHttpOnly.into());
                }

                cookie.set_creation(old.creation());
                cookie.set_creation_index(old.creation_index());
                cookie.set_last_accessed(now);
                self.store.update_cookie(&old, cookie.clone()).await?;
            }
            None => {
                cookie.set_creation(now);
                cookie.set_last_accessed(now);
                self.store.put_cookie(cookie.clone()).await?;
            }
        }

        Ok(Some(cookie))
    }

    /// Returns the cookies a request to `url` carries, with default options.
    /// See [`CookieJar::get_cookies_with()`].
    pub async fn get_cookies(&self, url: &str) -> Result<Vec<Cookie>, Error> {
        self.get_cookies_with(url, GetCookiesOptions::default()).await
    }

    /// Returns the cookies a request to `url` carries.
    ///
    /// Host-only cookies must match the URL's host exactly; other cookies
    /// must domain-match it. Unless `options.all_paths` is set, the cookie's
    /// path must path-match the URL's. `Secure` cookies need a secure
    /// request, `HttpOnly` cookies an HTTP one, and with a same-site context
    /// set, a cookie's `SameSite` may be no stricter than the context.
    ///
    /// Expired cookies are left out and removed from the store. A failure
    /// to remove one is logged and otherwise ignored.
    ///
    /// Every returned cookie has its last access time set to now.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::{CookieJar, GetCookiesOptions, SameSiteContext, SetCookieOptions};
    /// use futures::executor::block_on;
    ///
    /// let jar = CookieJar::new();
    /// let options = SetCookieOptions {
    ///     same_site_context: Some(SameSiteContext::Strict),
    ///     ..SetCookieOptions::default()
    /// };
    ///
    /// block_on(jar.set_cookie_with("a=1; SameSite=Strict", "https://example.com/", options)).unwrap();
    ///
    /// let cross_site = GetCookiesOptions {
    ///     same_site_context: Some(SameSiteContext::None),
    ///     ..GetCookiesOptions::default()
    /// };
    ///
    /// let cookies = block_on(jar.get_cookies_with("https://example.com/", cross_site)).unwrap();
    /// assert!(cookies.is_empty());
    ///
    /// let cookies = block_on(jar.get_cookies("https://example.com/")).unwrap();
    /// assert_eq!(cookies.len(), 1);
    /// ```
    pub async fn get_cookies_with(&self, url: &str, options: GetCookiesOptions)
        -> Result<Vec<Cookie>, Error>
    {
        let url = Url::parse(url)?;
        let host = canonical_domain(url.host_str().unwrap_or_default());
        let path = match url.path() {
            "" => "/",
            path => path,
        };

        let secure = options.secure.unwrap_or_else(|| matches!(url.scheme(), "https" | "wss"));
        let same_site_level = options.same_site_context.map_or(0, SameSiteContext::level);
        let now = options.now.unwrap_or_else(OffsetDateTime::now_utc);
        let now_millis = Timestamp::DateTime(now).unix_millis();

        let search_path = if options.all_paths { None } else { Some(path) };
        let candidates = self.store
            .find_cookies(&host, search_path, self.options.allow_special_use_domain)
            .await?;

        let mut cookies = Vec::with_capacity(candidates.len());
        for cookie in candidates {
            if cookie.host_only() == Some(true) {
                if cookie.domain() != Some(host.as_str()) {
                    continue;
                }
            } else if !domain_match(&host, cookie.domain().unwrap_or_default(), false) {
                continue;
            }

            if !options.all_paths && !path_match(path, cookie.path().unwrap_or_default()) {
                continue;
            }

            if cookie.secure() && !secure {
                continue;
            }

            if cookie.http_only() && !options.http {
                continue;
            }

            if same_site_level > 0 {
                let level = cookie.same_site().unwrap_or(SameSite::None).level();
                if level > same_site_level {
                    continue;
                }
            }

            if options.expire {
                if let Some(expiry) = cookie.expiry_time(None) {
                    if expiry <= now_millis {
                        self.remove_expired(&cookie).await;
                        continue;
                    }
                }
            }

            cookies.push(cookie);
        }

        if options.sort {
            cookies.sort_by(cookie_compare);
        }

        for cookie in &mut cookies {
            cookie.set_last_accessed(Timestamp::DateTime(now));
        }

        Ok(cookies)
    }

    async fn remove_expired(&self, cookie: &Cookie) {
        let domain = cookie.domain().unwrap_or_default();
        let path = cookie.path().unwrap_or_default();
        if let Err(e) = self.store.remove_cookie(domain, path, cookie.name()).await {
            warn!("failed to remove expired cookie {} from {} {}: {}", cookie.name(), domain, path, e);
        }
    }

    /// Returns the `Cookie` header value for a request to `url`, with
    /// default options.
    pub async fn get_cookie_string(&self, url: &str) -> Result<String, Error> {
        self.get_cookie_string_with(url, GetCookiesOptions::default()).await
    }

    /// Returns the `Cookie` header value for a request to `url`: the
    /// cookies' `name=value` pairs joined by `"; "`, always in
    /// [`cookie_compare()`] order.
    pub async fn get_cookie_string_with(&self, url: &str, options: GetCookiesOptions)
        -> Result<String, Error>
    {
        let options = GetCookiesOptions { sort: true, ..options };
        let cookies = self.get_cookies_with(url, options).await?;
        let pairs: Vec<String> = cookies.iter().map(|c| c.plain().to_string()).collect();
        Ok(pairs.join("; "))
    }

    /// Returns the cookies for a request to `url` as `Set-Cookie` strings,
    /// with default options.
    pub async fn get_set_cookie_strings(&self, url: &str) -> Result<Vec<String>, Error> {
        self.get_set_cookie_strings_with(url, GetCookiesOptions::default()).await
    }

    /// Returns the cookies for a request to `url` as `Set-Cookie` strings.
    pub async fn get_set_cookie_strings_with(&self, url: &str, options: GetCookiesOptions)
        -> Result<Vec<String>, Error>
    {
        let cookies = self.get_cookies_with(url, options).await?;
        Ok(cookies.iter().map(Cookie::to_string).collect())
    }

    /// Removes every cookie from the store.
    ///
    /// Stores without a bulk removal have their cookies removed one by one.
    /// Every removal is attempted; the first failure is reported.
    pub async fn remove_all_cookies(&self) -> Result<(), Error> {
        match self.store.remove_all_cookies().await {
            Err(Error::Unsupported(_)) => {}
            result => return result,
        }

        let mut first_error = None;
        for cookie in self.store.get_all_cookies().await? {
            let domain = cookie.domain().unwrap_or_default();
            let path = cookie.path().unwrap_or_default();
            if let Err(e) = self.store.remove_cookie(domain, path, cookie.name()).await {
                warn!("failed to remove cookie {} from {} {}: {}", cookie.name(), domain, path, e);
                first_error.get_or_insert(e);
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Captures the jar's configuration and every stored cookie.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] if the store can't enumerate its cookies.
    pub async fn serialize(&self) -> Result<SerializedJar, Error> {
        let cookies = self.store.get_all_cookies().await?;
        Ok(SerializedJar {
            version: concat!("cookiejar@", env!("CARGO_PKG_VERSION")).to_string(),
            store_type: self.store.store_type().map(str::to_string),
            options: self.options,
            cookies: Some(cookies),
        })
    }

    /// Serializes the jar to a JSON string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cookiejar::CookieJar;
    ///
    /// let jar = CookieJar::new();
    /// jar.set_cookie_sync("a=1; Max-Age=3600", "https://example.com/").unwrap();
    ///
    /// let json = jar.to_json().unwrap();
    /// let copy = CookieJar::from_json(&json, None).unwrap();
    /// assert_eq!(copy.get_cookie_string_sync("https://example.com/").unwrap(), "a=1");
    /// ```
    pub fn to_json(&self) -> Result<String, Error> {
        let serialized = self.serialize_sync()?;
        Ok(serde_json::to_string(&serialized)?)
    }

    /// Recreates a jar from its serialized form, over `store` or a new
    /// [`MemoryCookieStore`].
    ///
    /// Cookies are put into the store in order, so they receive fresh
    /// creation indices in that order; their creation times are kept.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCookies`] if `serialized` has no cookie list, and
    /// whatever the store reports.
    pub async fn deserialize(serialized: SerializedJar, store: Option<Arc<dyn Store>>)
        -> Result<CookieJar, Error>
    {
        let store = store.unwrap_or_else(|| Arc::new(MemoryCookieStore::new()));
        let cookies = serialized.cookies.ok_or(Error::MissingCookies)?;
        let jar = CookieJar::with_store_and_options(store, serialized.options);
        for cookie in cookies {
            jar.store.put_cookie(cookie).await?;
        }

        Ok(jar)
    }

    /// Recreates a jar from a JSON string written by
    /// [`CookieJar::to_json()`]. See [`CookieJar::deserialize()`].
    pub async fn deserialize_str(json: &str, store: Option<Arc<dyn Store>>)
        -> Result<CookieJar, Error>
    {
        let serialized: SerializedJar = serde_json::from_str(json)?;
        CookieJar::deserialize(serialized, store).await
    }

    /// Copies this jar's configuration and cookies into a new jar over
    /// `store` or a new [`MemoryCookieStore`].
    pub async fn clone_jar(&self, store: Option<Arc<dyn Store>>) -> Result<CookieJar, Error> {
        let serialized = self.serialize().await?;
        CookieJar::deserialize(serialized, store).await
    }

    /// Synchronous [`CookieJar::set_cookie()`].
    ///
    /// # Errors
    ///
    /// [`Error::NotSynchronous`] if the store isn't synchronous.
    pub fn set_cookie_sync<C>(&self, cookie: C, url: &str) -> Result<Option<Cookie>, Error>
        where C: Into<CookieInput>
    {
        run_sync(&*self.store, "set_cookie_sync", self.set_cookie(cookie, url))
    }

    /// Synchronous [`CookieJar::set_cookie_with()`].
    pub fn set_cookie_with_sync<C>(&self, cookie: C, url: &str, options: SetCookieOptions)
        -> Result<Option<Cookie>, Error>
        where C: Into<CookieInput>
    {
        run_sync(&*self.store, "set_cookie_with_sync", self.set_cookie_with(cookie, url, options))
    }

    /// Synchronous [`CookieJar::get_cookies()`].
    pub fn get_cookies_sync(&self, url: &str) -> Result<Vec<Cookie>, Error> {
        run_sync(&*self.store, "get_cookies_sync", self.get_cookies(url))
    }

    /// Synchronous [`CookieJar::get_cookies_with()`].
    pub fn get_cookies_with_sync(&self, url: &str, options: GetCookiesOptions)
        -> Result<Vec<Cookie>, Error>
    {
        run_sync(&*self.store, "get_cookies_with_sync", self.get_cookies_with(url, options))
    }

    /// Synchronous [`CookieJar::get_cookie_string()`].
    pub fn get_cookie_string_sync(&self, url: &str) -> Result<String, Error> {
        run_sync(&*self.store, "get_cookie_string_sync", self.get_cookie_string(url))
    }

    /// Synchronous [`CookieJar::get_cookie_string_with()`].
    pub fn get_cookie_string_with_sync(&self, url: &str, options: GetCookiesOptions)
        -> Result<String, Error>
    {
        let fut = self.get_cookie_string_with(url, options);
        run_sync(&*self.store, "get_cookie_string_with_sync", fut)
    }

    /// Synchronous [`CookieJar::get_set_cookie_strings()`].
    pub fn get_set_cookie_strings_sync(&self, url: &str) -> Result<Vec<String>, Error> {
        run_sync(&*self.store, "get_set_cookie_strings_sync", self.get_set_cookie_strings(url))
    }

    /// Synchronous [`CookieJar::get_set_cookie_strings_with()`].
    pub fn get_set_cookie_strings_with_sync(&self, url: &str, options: GetCookiesOptions)
        -> Result<Vec<String>, Error>
    {
        let fut = self.get_set_cookie_strings_with(url, options);
        run_sync(&*self.store, "get_set_cookie_strings_with_sync", fut)
    }

    /// Synchronous [`CookieJar::remove_all_cookies()`].
    pub fn remove_all_cookies_sync(&self) -> Result<(), Error> {
        run_sync(&*self.store, "remove_all_cookies_sync", self.remove_all_cookies())
    }

    /// Synchronous [`CookieJar::serialize()`].
    pub fn serialize_sync(&self) -> Result<SerializedJar, Error> {
        run_sync(&*self.store, "serialize_sync", self.serialize())
    }

    /// Synchronous [`CookieJar::deserialize()`]. The target store must be
    /// synchronous.
    pub fn deserialize_sync(serialized: SerializedJar, store: Option<Arc<dyn Store>>)
        -> Result<CookieJar, Error>
    {
        let store = store.unwrap_or_else(|| Arc::new(MemoryCookieStore::new()));
        let target = store.clone();
        run_sync(&*target, "deserialize_sync", CookieJar::deserialize(serialized, Some(store)))
    }

    /// Synchronous [`CookieJar::deserialize_str()`].
    pub fn from_json(json: &str, store: Option<Arc<dyn Store>>) -> Result<CookieJar, Error> {
        let serialized: SerializedJar = serde_json::from_str(json)?;
        CookieJar::deserialize_sync(serialized, store)
    }

    /// Synchronous [`CookieJar::clone_jar()`]. Both stores must be
    /// synchronous.
    pub fn clone_jar_sync(&self, store: Option<Arc<dyn Store>>) -> Result<CookieJar, Error> {
        let serialized = self.serialize_sync()?;
        CookieJar::deserialize_sync(serialized, store)
    }
}

impl Default for CookieJar {
    fn default() -> Self {
        CookieJar::new()
    }
}

impl fmt::Debug for CookieJar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieJar")
            .field("store_type", &self.store.store_type())
            .field("options", &self.options)
            .finish()
    }
}
