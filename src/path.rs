//! Cookie path defaulting and matching per [RFC 6265 §5.1.4].
//!
//! [RFC 6265 §5.1.4]: https://tools.ietf.org/html/rfc6265#section-5.1.4

/// Computes the default cookie path for a request URI path: the "directory"
/// of `uri_path`.
///
/// # Example
///
/// ```rust
/// use cookiejar::path::default_path;
///
/// assert_eq!(default_path(""), "/");
/// assert_eq!(default_path("/a"), "/");
/// assert_eq!(default_path("/a/b"), "/a");
/// ```
pub fn default_path(uri_path: &str) -> &str {
    if !uri_path.starts_with('/') {
        return "/";
    }

    match uri_path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &uri_path[..idx],
    }
}

/// Returns `true` if `request_path` path-matches `cookie_path`.
///
/// They match if they are identical, or if `cookie_path` is a prefix of
/// `request_path` and either `cookie_path` ends in `/` or the first character
/// of `request_path` after the prefix is `/`.
///
/// # Example
///
/// ```rust
/// use cookiejar::path::path_match;
///
/// assert!(path_match("/w/index.html", "/w"));
/// assert!(!path_match("/windex.html", "/w"));
/// ```
pub fn path_match(request_path: &str, cookie_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    match request_path.strip_prefix(cookie_path) {
        Some(rest) => cookie_path.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

/// Lists `path` followed by each of its ancestors, longest first, ending
/// with `/`. Stores indexing cookies by exact path use this to find every
/// path a request may match.
///
/// # Example
///
/// ```rust
/// use cookiejar::path::permute_path;
///
/// assert_eq!(permute_path("/foo/bar"), vec!["/foo/bar", "/foo", "/"]);
/// assert_eq!(permute_path("/"), vec!["/"]);
/// ```
pub fn permute_path(path: &str) -> Vec<String> {
    if path == "/" {
        return vec!["/".to_string()];
    }

    let mut permutations = vec![path.to_string()];
    let mut current = path;
    while current.len() > 1 {
        match current.rfind('/') {
            Some(idx) if idx > 0 => {
                current = &current[..idx];
                permutations.push(current.to_string());
            }
            _ => break,
        }
    }

    permutations.push("/".to_string());
    permutations
}
