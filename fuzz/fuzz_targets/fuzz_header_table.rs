#![no_main]

use http11_request_decoder::HeaderTable;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut headers = HeaderTable::new();
    let mut rest = data;

    loop {
        match headers.parse(rest) {
            Ok((0, _)) => break,
            Ok((n, done)) => {
                assert!(n <= rest.len());
                rest = &rest[n..];
                if done {
                    break;
                }
            }
            Err(_) => break,
        }
    }

    // 名前は常に小文字で、大文字でも引ける
    for (name, value) in headers.entries() {
        assert_eq!(name, name.to_ascii_lowercase());
        assert_eq!(headers.get_bytes(&name.to_ascii_uppercase()), value);
    }
});
