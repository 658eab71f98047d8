#![no_main]

use libfuzzer_sys::fuzz_target;
use logharvest_core::types::Severity;

fuzz_target!(|data: &[u8]| {
    if let Ok(message) = std::str::from_utf8(data) {
        let _ = Severity::scan_message(message);
    }
});
