//! Cookie persistence.
//!
//! A [`CookieJar`](crate::CookieJar) decides *which* cookies to keep; a
//! [`Store`] decides *how* they are kept. Stores index cookies by
//! `(domain, path, name)`, where `domain` is the cookie's canonical domain
//! and `path` its final path. The jar never mutates cookies inside a store;
//! every write hands over a complete cookie.
//!
//! [`MemoryCookieStore`] is the default store and keeps cookies in process
//! memory.

use async_trait::async_trait;

use crate::{Cookie, Error};

mod memory;

pub use self::memory::MemoryCookieStore;

/// Abstraction for cookie storage backends.
///
/// Every operation is `async` so that stores may perform I/O. A store whose
/// futures always complete on their first poll should report itself
/// [synchronous](Store::synchronous()); only such stores can back the
/// jar's `_sync` methods.
///
/// Failures a store reports are passed through the jar untouched. Wrap
/// backend errors with [`Error::store()`].
///
/// # Example
///
/// A store that forwards to [`MemoryCookieStore`] but counts writes:
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use async_trait::async_trait;
/// use cookiejar::{Cookie, CookieJar, Error, MemoryCookieStore, Store};
///
/// #[derive(Default)]
/// struct CountingStore {
///     inner: MemoryCookieStore,
///     writes: AtomicUsize,
/// }
///
/// #[async_trait]
/// impl Store for CountingStore {
///     fn synchronous(&self) -> bool {
///         true
///     }
///
///     async fn find_cookie(&self, domain: &str, path: &str, key: &str)
///         -> Result<Option<Cookie>, Error>
///     {
///         self.inner.find_cookie(domain, path, key).await
///     }
///
///     async fn find_cookies(&self, domain: &str, path: Option<&str>, allow_special_use_domain: bool)
///         -> Result<Vec<Cookie>, Error>
///     {
///         self.inner.find_cookies(domain, path, allow_special_use_domain).await
///     }
///
///     async fn put_cookie(&self, cookie: Cookie) -> Result<(), Error> {
///         self.writes.fetch_add(1, Ordering::SeqCst);
///         self.inner.put_cookie(cookie).await
///     }
///
///     async fn remove_cookie(&self, domain: &str, path: &str, key: &str) -> Result<(), Error> {
///         self.inner.remove_cookie(domain, path, key).await
///     }
///
///     async fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), Error> {
///         self.inner.remove_cookies(domain, path).await
///     }
/// }
///
/// let jar = CookieJar::with_store(CountingStore::default());
/// jar.set_cookie_sync("a=1", "http://example.com/").unwrap();
/// jar.set_cookie_sync("a=2", "http://example.com/").unwrap();
/// assert_eq!(jar.get_cookie_string_sync("http://example.com/").unwrap(), "a=2");
/// ```
#[async_trait]
pub trait Store: Send + Sync {
    /// Returns `true` if every future this store returns completes on its
    /// first poll. Defaults to `false`.
    fn synchronous(&self) -> bool {
        false
    }

    /// A name for this kind of store, recorded in serialized jars.
    fn store_type(&self) -> Option<&str> {
        None
    }

    /// Finds the cookie stored under exactly `(domain, path, key)`.
    async fn find_cookie(&self, domain: &str, path: &str, key: &str)
        -> Result<Option<Cookie>, Error>;

    /// Finds every cookie that may be visible to a request to `domain` at
    /// `path`: cookies stored under `domain` or any of its parent domains
    /// down to the registrable domain, whose path path-matches `path`. A
    /// `path` of `None` matches every path.
    ///
    /// The jar filters the results again, so a store may return more than
    /// needed but never less.
    async fn find_cookies(&self, domain: &str, path: Option<&str>, allow_special_use_domain: bool)
        -> Result<Vec<Cookie>, Error>;

    /// Stores `cookie`, replacing any cookie with the same domain, path and
    /// name.
    async fn put_cookie(&self, cookie: Cookie) -> Result<(), Error>;

    /// Replaces `old_cookie` with `new_cookie`. Both share domain, path and
    /// name. Defaults to [`Store::put_cookie()`].
    async fn update_cookie(&self, old_cookie: &Cookie, new_cookie: Cookie) -> Result<(), Error> {
        let _ = old_cookie;
        self.put_cookie(new_cookie).await
    }

    /// Removes the cookie stored under `(domain, path, key)`, if any.
    async fn remove_cookie(&self, domain: &str, path: &str, key: &str) -> Result<(), Error>;

    /// Removes every cookie stored under `domain`, or only those stored
    /// under `domain` and `path` if `path` is given.
    async fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), Error>;

    /// Removes every cookie.
    ///
    /// Optional. The default reports [`Error::Unsupported`], in which case
    /// the jar removes cookies one by one via [`Store::get_all_cookies()`].
    async fn remove_all_cookies(&self) -> Result<(), Error> {
        Err(Error::Unsupported("remove_all_cookies"))
    }

    /// Returns every stored cookie, ordered by creation index.
    ///
    /// Optional, but required to serialize or clone a jar. The default
    /// reports [`Error::Unsupported`].
    async fn get_all_cookies(&self) -> Result<Vec<Cookie>, Error> {
        Err(Error::Unsupported("get_all_cookies"))
    }
}
