#![no_main]

extern crate cookiejar;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    if let Ok(cookie) = cookiejar::Cookie::parse(data) {
        let _ = cookie.to_string();
    }

    let _ = cookiejar::Cookie::parse_loose(data);
});
