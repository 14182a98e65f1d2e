use std::cmp::Ordering;

use crate::{Cookie, Timestamp, MAX_TIME};

fn creation_millis(cookie: &Cookie) -> i64 {
    match cookie.creation() {
        Some(Timestamp::DateTime(dt)) => crate::timestamp::unix_millis(dt),
        _ => MAX_TIME,
    }
}

/// Orders cookies the way RFC 6265 §5.4 lists them in a `Cookie` header.
///
/// Cookies with longer paths come first. Among equal path lengths, the
/// cookie created earlier comes first, with cookies lacking a creation date
/// treated as created at [`MAX_TIME`]. Remaining ties are broken by
/// creation index, which makes the order total.
///
/// # Example
///
/// ```rust
/// use cookiejar::{cookie_compare, Cookie};
///
/// let mut cookies = vec![
///     Cookie::build("short", "1").path("/a").build(),
///     Cookie::build("long", "2").path("/a/b").build(),
/// ];
///
/// cookies.sort_by(cookie_compare);
/// assert_eq!(cookies[0].name(), "long");
/// ```
pub fn cookie_compare(a: &Cookie, b: &Cookie) -> Ordering {
    let a_path_len = a.path().map_or(0, str::len);
    let b_path_len = b.path().map_or(0, str::len);

    b_path_len.cmp(&a_path_len)
        .then_with(|| creation_millis(a).cmp(&creation_millis(b)))
        .then_with(|| a.creation_index().cmp(&b.creation_index()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn cookie(path: &str, created: Option<Timestamp>, index: u64) -> Cookie {
        let mut cookie = Cookie::build("a", "b").path(path).build();
        cookie.set_creation(created);
        cookie.set_creation_index(index);
        cookie
    }

    #[test]
    fn longer_paths_first() {
        let at = Some(Timestamp::DateTime(datetime!(2020-01-01 00:00 UTC)));
        let long = cookie("/a/b", at, 1);
        let short = cookie("/a", at, 2);

        assert_eq!(cookie_compare(&long, &short), Ordering::Less);
        assert_eq!(cookie_compare(&short, &long), Ordering::Greater);
    }

    #[test]
    fn older_first() {
        let older = cookie("/", Some(Timestamp::DateTime(datetime!(2020-01-01 00:00 UTC))), 9);
        let newer = cookie("/", Some(Timestamp::DateTime(datetime!(2020-01-02 00:00 UTC))), 1);
        assert_eq!(cookie_compare(&older, &newer), Ordering::Less);

        // Missing or infinite creation dates sort as the far future.
        let undated = cookie("/", None, 0);
        let infinite = cookie("/", Some(Timestamp::Infinity), 0);
        assert_eq!(cookie_compare(&newer, &undated), Ordering::Less);
        assert_eq!(cookie_compare(&undated, &infinite), Ordering::Equal);
    }

    #[test]
    fn creation_index_breaks_ties() {
        let at = Some(Timestamp::DateTime(datetime!(2020-01-01 00:00 UTC)));
        let mut cookies = vec![cookie("/x", at, 5), cookie("/x", at, 2)];
        cookies.sort_by(cookie_compare);

        assert_eq!(cookies[0].creation_index(), 2);
        assert_eq!(cookies[1].creation_index(), 5);
    }
}
