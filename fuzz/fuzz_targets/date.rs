#![no_main]

extern crate cookiejar;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let _ = cookiejar::parse_date(data);
});
