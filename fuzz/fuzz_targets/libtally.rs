#![no_main]

use libfuzzer_sys::fuzz_target;
use libtally::{prepare_reports, render, Ledger};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let mut ledger = Ledger::new();
        if ledger.read_str("fuzz", input).is_ok() {
            for report in prepare_reports(&ledger).iter() {
                let _ = render::render(&report);
            }
        }
    }
});
