#![no_main]

extern crate cookiejar;

use cookiejar::{CookieJar, SetCookieOptions};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let jar = CookieJar::new();
    let options = SetCookieOptions { ignore_error: true, loose: true, ..SetCookieOptions::default() };
    for line in data.lines() {
        let _ = jar.set_cookie_with_sync(line, "https://www.example.com/a/b", options);
    }

    let _ = jar.get_cookie_string_sync("https://www.example.com/a/b/c");
    let _ = jar.to_json();
});
