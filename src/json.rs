//! Sparse JSON encoding for `Cookie`.
//!
//! Every serializable field has an entry in the `defaults` table: the serializer
//! leaves out a field equal to its default and the deserializer fills an
//! absent field from the same table. `expires` is the one field whose
//! default isn't its "empty" value: absent means `"Infinity"`, while an
//! explicit `null` means the expiry was cleared.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Cookie, MaxAge, SameSite, Timestamp};

mod defaults {
    use crate::{MaxAge, SameSite, Timestamp};

    pub fn key() -> String { String::new() }
    pub fn value() -> String { String::new() }
    pub fn expires() -> Option<Timestamp> { Some(Timestamp::Infinity) }
    pub fn max_age() -> Option<MaxAge> { None }
    pub fn domain() -> Option<String> { None }
    pub fn path() -> Option<String> { None }
    pub fn secure() -> bool { false }
    pub fn http_only() -> bool { false }
    pub fn extensions() -> Option<Vec<String>> { None }
    pub fn host_only() -> Option<bool> { None }
    pub fn path_is_default() -> Option<bool> { None }
    pub fn creation() -> Option<Timestamp> { None }
    pub fn last_accessed() -> Option<Timestamp> { None }
    pub fn same_site() -> Option<SameSite> { None }

    pub fn is_key(v: &String) -> bool { *v == key() }
    pub fn is_value(v: &String) -> bool { *v == value() }
    pub fn is_expires(v: &Option<Timestamp>) -> bool { *v == expires() }
    pub fn is_max_age(v: &Option<MaxAge>) -> bool { *v == max_age() }
    pub fn is_domain(v: &Option<String>) -> bool { *v == domain() }
    pub fn is_path(v: &Option<String>) -> bool { *v == path() }
    pub fn is_secure(v: &bool) -> bool { *v == secure() }
    pub fn is_http_only(v: &bool) -> bool { *v == http_only() }
    pub fn is_extensions(v: &Option<Vec<String>>) -> bool { *v == extensions() }
    pub fn is_host_only(v: &Option<bool>) -> bool { *v == host_only() }
    pub fn is_path_is_default(v: &Option<bool>) -> bool { *v == path_is_default() }
    pub fn is_creation(v: &Option<Timestamp>) -> bool { *v == creation() }
    pub fn is_last_accessed(v: &Option<Timestamp>) -> bool { *v == last_accessed() }
    pub fn is_same_site(v: &Option<SameSite>) -> bool { *v == same_site() }
}

/// The serialized shape of a cookie. The creation index is deliberately
/// absent: a deserialized cookie is a new cookie.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CookieJson {
    #[serde(default = "defaults::key", skip_serializing_if = "defaults::is_key")]
    key: String,
    #[serde(default = "defaults::value", skip_serializing_if = "defaults::is_value")]
    value: String,
    #[serde(default = "defaults::expires", skip_serializing_if = "defaults::is_expires")]
    expires: Option<Timestamp>,
    #[serde(default = "defaults::max_age", skip_serializing_if = "defaults::is_max_age")]
    max_age: Option<MaxAge>,
    #[serde(default = "defaults::domain", skip_serializing_if = "defaults::is_domain")]
    domain: Option<String>,
    #[serde(default = "defaults::path", skip_serializing_if = "defaults::is_path")]
    path: Option<String>,
    #[serde(default = "defaults::secure", skip_serializing_if = "defaults::is_secure")]
    secure: bool,
    #[serde(default = "defaults::http_only", skip_serializing_if = "defaults::is_http_only")]
    http_only: bool,
    #[serde(default = "defaults::extensions", skip_serializing_if = "defaults::is_extensions")]
    extensions: Option<Vec<String>>,
    #[serde(default = "defaults::host_only", skip_serializing_if = "defaults::is_host_only")]
    host_only: Option<bool>,
    #[serde(default = "defaults::path_is_default", skip_serializing_if = "defaults::is_path_is_default")]
    path_is_default: Option<bool>,
    #[serde(default = "defaults::creation", skip_serializing_if = "defaults::is_creation")]
    creation: Option<Timestamp>,
    #[serde(default = "defaults::last_accessed", skip_serializing_if = "defaults::is_last_accessed")]
    last_accessed: Option<Timestamp>,
    #[serde(default = "defaults::same_site", skip_serializing_if = "defaults::is_same_site")]
    same_site: Option<SameSite>,
}

impl From<&Cookie> for CookieJson {
    fn from(cookie: &Cookie) -> Self {
        CookieJson {
            key: cookie.name().to_string(),
            value: cookie.value().to_string(),
            expires: cookie.expires(),
            max_age: cookie.max_age(),
            domain: cookie.domain().map(str::to_string),
            path: cookie.path().map(str::to_string),
            secure: cookie.secure(),
            http_only: cookie.http_only(),
            extensions: cookie.extensions().map(<[String]>::to_vec),
            host_only: cookie.host_only(),
            path_is_default: cookie.path_is_default(),
            creation: cookie.creation(),
            last_accessed: cookie.last_accessed(),
            same_site: cookie.same_site(),
        }
    }
}

impl From<CookieJson> for Cookie {
    fn from(json: CookieJson) -> Self {
        let mut cookie = Cookie::new(json.key, json.value);
        cookie.expires = json.expires;
        cookie.max_age = json.max_age;
        cookie.domain = json.domain;
        cookie.path = json.path;
        cookie.secure = json.secure;
        cookie.http_only = json.http_only;
        cookie.extensions = json.extensions;
        cookie.host_only = json.host_only;
        cookie.path_is_default = json.path_is_default;
        cookie.last_accessed = json.last_accessed;
        cookie.same_site = json.same_site;

        // An absent creation time keeps the one stamped by `Cookie::new`.
        if json.creation.is_some() {
            cookie.creation = json.creation;
        }

        cookie
    }
}

impl Serialize for Cookie {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        CookieJson::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cookie {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        CookieJson::deserialize(deserializer).map(Cookie::from)
    }
}
