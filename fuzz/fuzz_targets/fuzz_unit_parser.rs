//! Einheiten-Parser darf auf beliebigem Text nie paniken.

#![no_main]

use keyboard_grinner_engine::shared::units::{parse_unit_pair, parse_unit_value, quantize_dim_mm};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Some((width, height)) = parse_unit_pair(text) {
            // Erfolgreiche Parses liefern immer positive Abmessungen
            assert!(width > 0.0);
            assert!(height > 0.0);
            let _ = quantize_dim_mm(width);
        }
        if let Some(value) = parse_unit_value(text, Some("u")) {
            assert!(value > 0.0);
        }
    }
});
