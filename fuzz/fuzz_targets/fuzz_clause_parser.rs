#![no_main]

use contentquery_core::engine::Parser;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to string (ignore invalid UTF-8)
    if let Ok(text) = std::str::from_utf8(data) {
        // Limit fragment length to prevent timeout
        if text.len() > 10_000 {
            return;
        }

        // Neither fragment kind may panic
        if let Ok(mut parser) = Parser::new(text) {
            let _ = parser.parse_selection();
        }
        if let Ok(mut parser) = Parser::new(text) {
            let _ = parser.parse_sort_order();
        }
    }
});
