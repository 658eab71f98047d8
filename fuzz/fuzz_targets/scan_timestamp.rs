#![no_main]

use libfuzzer_sys::fuzz_target;
use logharvest_aggregator::scan_timestamp;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = scan_timestamp(line);
    }
});
