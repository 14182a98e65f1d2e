use crate::parse::ParseError;

/// The reasons a jar refuses to store a cookie.
///
/// Rejections are policy decisions rather than failures: callers that
/// prefer to drop offending cookies silently can set
/// [`SetCookieOptions::ignore_error`](crate::SetCookieOptions::ignore_error).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// The `Set-Cookie` string could not be parsed.
    #[error("cookie failed to parse: {0}")]
    Unparseable(#[from] ParseError),
    /// The `Domain` attribute names a public suffix, such as `com`.
    #[error("cookie has domain set to a public suffix")]
    PublicSuffix,
    /// The `Domain` attribute names a special-use domain the jar does not
    /// allow.
    #[error(
        "cookie has domain set to the public suffix {0:?} which is a special use domain; \
         to allow this, configure the jar with allow_special_use_domain and \
         without reject_public_suffixes"
    )]
    SpecialUseDomain(String),
    /// The request host does not domain-match the `Domain` attribute.
    #[error("cookie not in this host's domain. cookie: {cookie}, request: {request}")]
    DomainMismatch {
        /// The cookie's canonical domain.
        cookie: String,
        /// The canonical request host.
        request: String,
    },
    /// A non-HTTP API tried to set an `HttpOnly` cookie.
    #[error("cookie is HttpOnly and this isn't an HTTP API")]
    HttpOnly,
    /// A non-HTTP API tried to overwrite an `HttpOnly` cookie.
    #[error("old cookie is HttpOnly and this isn't an HTTP API")]
    OldHttpOnly,
    /// A cross-site context tried to set a same-site cookie.
    #[error("cookie is SameSite but this is a cross-origin request")]
    CrossSiteSameSite,
    /// A `__Secure-` cookie without the `Secure` attribute.
    #[error("cookie has __Secure prefix but Secure attribute is not set")]
    SecurePrefix,
    /// A `__Host-` cookie that is not secure, host-only and scoped to `/`.
    #[error(
        "cookie has __Host prefix but either Secure or HostOnly attribute is not set \
         or Path is not '/'"
    )]
    HostPrefix,
}

/// Errors surfaced by [`CookieJar`](crate::CookieJar) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The URL passed to the jar could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// A same-site context string was not `strict`, `lax` or `none`.
    #[error("invalid sameSiteContext {0:?}: must be \"strict\", \"lax\" or \"none\"")]
    InvalidSameSiteContext(String),
    /// A prefix security string was not `strict`, `silent` or
    /// `unsafe-disabled`.
    #[error("invalid prefixSecurity {0:?}: must be \"strict\", \"silent\" or \"unsafe-disabled\"")]
    InvalidPrefixSecurity(String),
    /// The jar refused the cookie.
    #[error(transparent)]
    Rejected(#[from] Rejection),
    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The store does not implement an optional operation.
    #[error("store does not support {0}")]
    Unsupported(&'static str),
    /// A serialized jar or cookie is not valid JSON of the expected shape.
    #[error("malformed serialized jar: {0}")]
    Json(#[from] serde_json::Error),
    /// A serialized jar has no `cookies` array.
    #[error("serialized jar has no cookies array")]
    MissingCookies,
    /// A synchronous jar method was called on an asynchronous store.
    #[error("{0} can only be called on a synchronous store")]
    NotSynchronous(&'static str),
}

impl Error {
    /// Wraps an arbitrary store failure.
    pub fn store<E>(err: E) -> Error
        where E: Into<Box<dyn std::error::Error + Send + Sync>>
    {
        Error::Store(err.into())
    }

    /// Returns `true` if this error is a policy rejection, the only kind
    /// `ignore_error` suppresses.
    #[inline]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected(_))
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Rejected(Rejection::Unparseable(err))
    }
}
