//! Der Solver ist total: beliebige Eingaben liefern entweder einen Fehler
//! oder genau ein Ergebnis pro Slot, nie eine Panik.

#![no_main]

use glam::DVec2;
use keyboard_grinner_engine::{solve_row, AngleProfile, RowConfig, Slot};
use libfuzzer_sys::fuzz_target;

fn read_f64(bytes: &[u8]) -> f64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len().min(8)].copy_from_slice(&bytes[..bytes.len().min(8)]);
    f64::from_le_bytes(buf)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let profile = match data[0] % 4 {
        0 => AngleProfile::Cosine,
        1 => AngleProfile::Quadratic,
        _ => AngleProfile::Bezier,
    };
    let config = RowConfig {
        sag_mm: f64::from(data[1]),
        end_flat: data[0] % 3,
        angle_profile: profile,
        use_asymmetric_curve: data[0] & 0x80 != 0,
    };

    let slots: Vec<Slot> = data[2..]
        .chunks(16)
        .take(16)
        .map(|chunk| {
            let (w, h) = chunk.split_at(chunk.len().min(8));
            Slot {
                width_mm: read_f64(w),
                height_mm: read_f64(h),
                original_anchor: DVec2::ZERO,
            }
        })
        .collect();

    match solve_row(&slots, &config) {
        Ok(solved) => assert_eq!(solved.len(), slots.len()),
        Err(_) => {}
    }
});
