#![no_main]

use aimtp::MovementInput;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must reject bad documents without panicking
        let _ = MovementInput::from_json_str(input);
    }
});
