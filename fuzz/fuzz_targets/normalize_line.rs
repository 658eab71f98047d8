#![no_main]

use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use logharvest_aggregator::Normalizer;
use logharvest_core::config::parse_fixed_offset;
use logharvest_core::pipeline::FixedClock;
use logharvest_core::types::TargetMode;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let normalizer = Normalizer::new(
            parse_fixed_offset("+09:00").expect("static offset"),
            TargetMode::Utc,
            FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()),
        );
        let _ = normalizer.normalize_line(line);
    }
});
