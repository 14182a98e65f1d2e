use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use log::trace;
use parking_lot::RwLock;

use crate::domain::permute_domain;
use crate::path::path_match;
use crate::store::Store;
use crate::{Cookie, Error};

type KeyIndex = HashMap<String, Cookie>;
type PathIndex = HashMap<String, KeyIndex>;

/// The default [`Store`]: cookies held in process memory, indexed by domain,
/// then path, then name.
///
/// All operations complete immediately, so the store is
/// [synchronous](Store::synchronous()) and backs the jar's `_sync` methods.
/// Reads and writes go through a single reader-writer lock.
///
/// # Example
///
/// ```rust
/// use cookiejar::{Cookie, MemoryCookieStore, Store};
/// use futures::executor::block_on;
///
/// let store = MemoryCookieStore::new();
/// let cookie = Cookie::build("a", "b").domain("example.com").path("/").build();
/// block_on(store.put_cookie(cookie)).unwrap();
///
/// let found = block_on(store.find_cookies("www.example.com", Some("/docs"), false)).unwrap();
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Default)]
pub struct MemoryCookieStore {
    idx: RwLock<HashMap<String, PathIndex>>,
}

impl MemoryCookieStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryCookieStore::default()
    }

    /// Returns the number of stored cookies.
    pub fn len(&self) -> usize {
        self.idx.read()
            .values()
            .flat_map(|paths| paths.values())
            .map(|keys| keys.len())
            .sum()
    }

    /// Returns `true` if the store holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn all_cookies(&self) -> Vec<Cookie> {
        let mut cookies: Vec<Cookie> = self.idx.read()
            .values()
            .flat_map(|paths| paths.values())
            .flat_map(|keys| keys.values())
            .cloned()
            .collect();

        cookies.sort_by_key(Cookie::creation_index);
        cookies
    }
}

impl fmt::Debug for MemoryCookieStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.all_cookies().iter().map(|c| c.to_string())).finish()
    }
}

#[async_trait]
impl Store for MemoryCookieStore {
    fn synchronous(&self) -> bool {
        true
    }

    fn store_type(&self) -> Option<&str> {
        Some("MemoryCookieStore")
    }

    async fn find_cookie(&self, domain: &str, path: &str, key: &str)
        -> Result<Option<Cookie>, Error>
    {
        let idx = self.idx.read();
        let cookie = idx.get(domain)
            .and_then(|paths| paths.get(path))
            .and_then(|keys| keys.get(key))
            .cloned();

        Ok(cookie)
    }

    async fn find_cookies(&self, domain: &str, path: Option<&str>, allow_special_use_domain: bool)
        -> Result<Vec<Cookie>, Error>
    {
        if domain.is_empty() {
            return Ok(vec![]);
        }

        let domains = permute_domain(domain, allow_special_use_domain)
            .unwrap_or_else(|| vec![domain.to_string()]);

        let idx = self.idx.read();
        let mut results = vec![];
        for current in &domains {
            let paths = match idx.get(current) {
                Some(paths) => paths,
                None => continue,
            };

            for (cookie_path, keys) in paths {
                if path.map_or(true, |path| path_match(path, cookie_path)) {
                    results.extend(keys.values().cloned());
                }
            }
        }

        trace!("found {} cookies for {} at {:?}", results.len(), domain, path);
        Ok(results)
    }

    async fn put_cookie(&self, cookie: Cookie) -> Result<(), Error> {
        let domain = cookie.domain().unwrap_or_default().to_string();
        let path = cookie.path().unwrap_or_default().to_string();
        trace!("storing {} under {} {}", cookie.name(), domain, path);

        self.idx.write()
            .entry(domain)
            .or_default()
            .entry(path)
            .or_default()
            .insert(cookie.name().to_string(), cookie);

        Ok(())
    }

    async fn remove_cookie(&self, domain: &str, path: &str, key: &str) -> Result<(), Error> {
        trace!("removing {} under {} {}", key, domain, path);

        let mut idx = self.idx.write();
        if let Some(paths) = idx.get_mut(domain) {
            if let Some(keys) = paths.get_mut(path) {
                keys.remove(key);
                if keys.is_empty() {
                    paths.remove(path);
                }
            }

            if paths.is_empty() {
                idx.remove(domain);
            }
        }

        Ok(())
    }

    async fn remove_cookies(&self, domain: &str, path: Option<&str>) -> Result<(), Error> {
        trace!("removing cookies under {} {:?}", domain, path);

        let mut idx = self.idx.write();
        match path {
            Some(path) => {
                if let Some(paths) = idx.get_mut(domain) {
                    paths.remove(path);
                    if paths.is_empty() {
                        idx.remove(domain);
                    }
                }
            }
            None => {
                idx.remove(domain);
            }
        }

        Ok(())
    }

    async fn remove_all_cookies(&self) -> Result<(), Error> {
        trace!("removing all cookies");
        self.idx.write().clear();
        Ok(())
    }

    async fn get_all_cookies(&self) -> Result<Vec<Cookie>, Error> {
        Ok(self.all_cookies())
    }
}
