//! Domain canonicalization and matching per [RFC 6265 §5.1.2-§5.1.3].
//!
//! [RFC 6265 §5.1.2-§5.1.3]: https://tools.ietf.org/html/rfc6265#section-5.1.2

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::pubsuffix::{get_public_suffix, SuffixOptions};

/// Canonicalizes a host or `Domain` attribute value.
///
/// Surrounding whitespace and a single leading dot are removed, IPv6
/// brackets are dropped, non-ASCII labels are converted to punycode, the
/// result is lowercased, and a single trailing dot is removed.
///
/// # Example
///
/// ```rust
/// use cookiejar::domain::canonical_domain;
///
/// assert_eq!(canonical_domain("Example.COM."), "example.com");
/// assert_eq!(canonical_domain(".example.com"), "example.com");
/// assert_eq!(canonical_domain("[::1]"), "::1");
/// ```
pub fn canonical_domain(domain: &str) -> String {
    let mut s = domain.trim();
    s = s.strip_prefix('.').unwrap_or(s);

    if s.starts_with('[') && s.ends_with(']') && s.len() > 2 {
        s = &s[1..s.len() - 1];
    }

    let mut canonical = if s.is_ascii() {
        s.to_ascii_lowercase()
    } else {
        to_ascii(s)
    };

    if canonical.ends_with('.') {
        canonical.pop();
    }

    canonical
}

/// IDNA conversion for non-ASCII hosts. Falls back to plain lowercasing when
/// the host is not a valid internationalized domain name.
fn to_ascii(domain: &str) -> String {
    match url::Host::parse(domain) {
        Ok(url::Host::Domain(ascii)) => ascii,
        _ => domain.to_lowercase(),
    }
}

/// Returns `true` if `s` is a bare IPv4 or IPv6 literal, with or without
/// IPv6 brackets.
pub fn is_ip_literal(s: &str) -> bool {
    let unbracketed = s
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(s);

    s.parse::<Ipv4Addr>().is_ok() || unbracketed.parse::<Ipv6Addr>().is_ok()
}

/// Returns `true` if `domain` domain-matches `cookie_domain`.
///
/// Both strings are passed through [`canonical_domain()`] first unless
/// `canonicalize` is `false`. They match if they are identical, or if
/// `cookie_domain` is a proper suffix of `domain` that begins at a label
/// boundary and `domain` is not an IP literal.
///
/// # Example
///
/// ```rust
/// use cookiejar::domain::domain_match;
///
/// assert!(domain_match("www.example.com", "example.com", true));
/// assert!(!domain_match("notexample.com", "example.com", true));
/// assert!(!domain_match("192.168.1.1", "168.1.1", true));
/// ```
pub fn domain_match(domain: &str, cookie_domain: &str, canonicalize: bool) -> bool {
    let (domain, cookie_domain) = if canonicalize {
        (canonical_domain(domain), canonical_domain(cookie_domain))
    } else {
        (domain.to_string(), cookie_domain.to_string())
    };

    if domain == cookie_domain {
        return true;
    }

    if cookie_domain.is_empty() || !domain.ends_with(&cookie_domain) {
        return false;
    }

    let idx = domain.len() - cookie_domain.len();
    if idx == 0 || domain.as_bytes()[idx - 1] != b'.' {
        return false;
    }

    !is_ip_literal(&domain)
}

/// Lists the domains a cookie visible to `domain` may have been stored
/// under: the registrable domain first, then each longer suffix down to
/// `domain` itself.
///
/// Returns `None` when `domain` has no registrable part, i.e. it is itself a
/// public suffix (or a special-use domain that is not allowed). IP literals
/// permute only to themselves.
///
/// # Example
///
/// ```rust
/// use cookiejar::domain::permute_domain;
///
/// assert_eq!(
///     permute_domain("foo.bar.example.com", false).unwrap(),
///     vec!["example.com", "bar.example.com", "foo.bar.example.com"],
/// );
///
/// assert!(permute_domain("com", false).is_none());
/// ```
pub fn permute_domain(domain: &str, allow_special_use_domain: bool) -> Option<Vec<String>> {
    if is_ip_literal(domain) {
        return Some(vec![domain.to_string()]);
    }

    let options = SuffixOptions { allow_special_use_domain, ignore_error: false };
    let suffix = get_public_suffix(domain, options).ok()??;
    if suffix == domain {
        return Some(vec![domain.to_string()]);
    }

    let domain = domain.strip_suffix('.').unwrap_or(domain);
    let prefix = domain.strip_suffix(suffix.as_str())?.strip_suffix('.')?;

    let mut current = suffix.clone();
    let mut permutations = vec![suffix];
    for label in prefix.rsplit('.') {
        current = format!("{}.{}", label, current);
        permutations.push(current.clone());
    }

    Some(permutations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_domain() {
        assert_eq!(canonical_domain("EXAMPLE.com"), "example.com");
        assert_eq!(canonical_domain("  example.com  "), "example.com");
        assert_eq!(canonical_domain("example.com."), "example.com");
        assert_eq!(canonical_domain("[2001:db8::1]"), "2001:db8::1");
        assert_eq!(canonical_domain("münchen.de"), "xn--mnchen-3ya.de");
        assert_eq!(canonical_domain(""), "");
    }

    #[test]
    fn test_domain_match() {
        assert!(domain_match("foo.com", "foo.com", true));
        assert!(domain_match("bar.foo.com", "foo.com", true));
        assert!(domain_match("baz.bar.foo.com", "foo.com", true));
        assert!(domain_match("Bar.Foo.com", "foo.COM.", true));

        assert!(!domain_match("bar.foo.com", "bar.com", true));
        assert!(!domain_match("bar.com", "baz.bar.com", true));
        assert!(!domain_match("foo.com", "bar.com", true));
        assert!(!domain_match("bar.com", "bbar.com", true));
        assert!(!domain_match("notexample.com", "example.com", true));
    }

    #[test]
    fn ip_literals_only_match_exactly() {
        assert!(domain_match("235.132.2.3", "235.132.2.3", true));
        assert!(!domain_match("235.132.2.3", "1.1.1.1", true));
        assert!(!domain_match("235.132.2.3", ".2.3", true));
        assert!(!domain_match("192.168.1.1", "168.1.1", true));
        assert!(domain_match("[::1]", "::1", true));
        assert!(!domain_match("::ffff:1.1.1.1", "1.1.1", false));
    }

    #[test]
    fn without_canonicalization() {
        assert!(!domain_match("WWW.example.com", "EXAMPLE.com", false));
        assert!(domain_match("www.example.com", "example.com", false));
    }

    #[test]
    fn ip_detection() {
        assert!(is_ip_literal("127.0.0.1"));
        assert!(is_ip_literal("::1"));
        assert!(is_ip_literal("[::1]"));
        assert!(!is_ip_literal("example.com"));
        assert!(!is_ip_literal("1.2.3"));
    }

    #[test]
    fn test_permute_domain() {
        assert_eq!(permute_domain("example.com", false).unwrap(), vec!["example.com"]);
        assert_eq!(
            permute_domain("www.example.co.uk", false).unwrap(),
            vec!["example.co.uk", "www.example.co.uk"]
        );
        assert_eq!(permute_domain("10.0.0.1", false).unwrap(), vec!["10.0.0.1"]);
        assert_eq!(
            permute_domain("a.foo.localhost", true).unwrap(),
            vec!["foo.localhost", "a.foo.localhost"]
        );
        assert!(permute_domain("a.foo.localhost", false).is_none());
    }
}
