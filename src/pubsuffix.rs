//! Public suffix lookups backed by Mozilla's Public Suffix List.
//!
//! Cookies may not be scoped to a public suffix such as `com` or `co.uk`;
//! otherwise any site could set a cookie visible to every other site under
//! that suffix. The jar consults [`get_public_suffix()`] while validating a
//! cookie's `Domain` attribute.

use crate::error::Rejection;

/// Top-level domains reserved by [RFC 6761] for special use.
///
/// [RFC 6761]: https://tools.ietf.org/html/rfc6761
pub const SPECIAL_USE_DOMAINS: &[&str] = &["local", "example", "invalid", "localhost", "test"];

/// Special-use domains which are themselves valid single-label hosts.
const SPECIAL_TREATMENT_DOMAINS: &[&str] = &["localhost", "invalid"];

/// Knobs for [`get_public_suffix()`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuffixOptions {
    /// Treat `x.<special-use tld>` as registrable.
    pub allow_special_use_domain: bool,
    /// Resolve special-use domains through the list instead of failing.
    pub ignore_error: bool,
}

/// Returns the registrable portion of `domain` (its public suffix plus one
/// label), or `None` if `domain` is itself a public suffix.
///
/// `domain` is expected in canonical form (see
/// [`canonical_domain()`](crate::domain::canonical_domain)).
///
/// # Errors
///
/// Returns [`Rejection::SpecialUseDomain`] when `domain` ends in a
/// special-use TLD that `options` does not allow and `ignore_error` is unset.
///
/// # Example
///
/// ```rust
/// use cookiejar::pubsuffix::{get_public_suffix, SuffixOptions};
///
/// let opts = SuffixOptions::default();
/// assert_eq!(get_public_suffix("www.example.com", opts).unwrap().as_deref(), Some("example.com"));
/// assert_eq!(get_public_suffix("com", opts).unwrap(), None);
///
/// let opts = SuffixOptions { allow_special_use_domain: true, ..opts };
/// assert_eq!(get_public_suffix("my.localhost", opts).unwrap().as_deref(), Some("my.localhost"));
/// ```
pub fn get_public_suffix(domain: &str, options: SuffixOptions) -> Result<Option<String>, Rejection> {
    let labels: Vec<&str> = domain.split('.').collect();
    let tld = labels.last().copied().unwrap_or_default();

    if SPECIAL_USE_DOMAINS.contains(&tld) {
        if options.allow_special_use_domain {
            if labels.len() > 1 {
                let second = labels[labels.len() - 2];
                return Ok(Some(format!("{}.{}", second, tld)));
            } else if SPECIAL_TREATMENT_DOMAINS.contains(&tld) {
                return Ok(Some(tld.to_string()));
            }
        }

        if !options.ignore_error {
            return Err(Rejection::SpecialUseDomain(tld.to_string()));
        }
    }

    Ok(psl::domain_str(domain).map(str::to_string))
}
