//! Abschluss-Pässe nach dem Kontakt-Solver.
//!
//! Alle Pässe verändern nur Koordinaten, nie Anzahl oder Reihenfolge der
//! Slots. Reihenfolge im Aufrufer: End-Breiten-Korrektur, Grundlinie,
//! Ursprungs-Verankerung.

use glam::DVec2;

use crate::core::category::Category;
use crate::shared::units::UNIT_MM;

/// Toleranz, ab der eine End-Breite als nicht-kanonisch gilt.
const WIDTH_EPSILON: f64 = 1e-6;

/// Translations-Schwelle der Ursprungs-Verankerung.
const ANCHOR_EPSILON: f64 = 1e-9;

/// Korrigiert die Zentren der End-Slots, wenn deren echte Breite von der
/// kanonischen 1u-Breite der Kurvenmathematik abweicht.
///
/// Die äußere Ecke bleibt dort, wo die idealisierte Kurve sie platziert hat;
/// das Zentrum wandert um die Differenz der beiden Halbbreiten-Offsets am
/// bereits gelösten Winkel.
pub fn apply_end_width_corrections(
    centers: &mut [DVec2],
    angles: &[f64],
    heights: &[f64],
    left_actual_width: f64,
    right_actual_width: f64,
) {
    if centers.is_empty() {
        return;
    }

    if (left_actual_width - UNIT_MM).abs() > WIDTH_EPSILON {
        let rot = DVec2::from_angle(angles[0]);
        let virtual_offset = rot.rotate(DVec2::new(UNIT_MM / 2.0, -heights[0] / 2.0));
        let actual_offset = rot.rotate(DVec2::new(left_actual_width / 2.0, -heights[0] / 2.0));
        centers[0] += virtual_offset - actual_offset;
    }

    let last = centers.len() - 1;
    if (right_actual_width - UNIT_MM).abs() > WIDTH_EPSILON {
        let rot = DVec2::from_angle(angles[last]);
        let virtual_offset = rot.rotate(DVec2::new(-UNIT_MM / 2.0, -heights[last] / 2.0));
        let actual_offset = rot.rotate(DVec2::new(-right_actual_width / 2.0, -heights[last] / 2.0));
        centers[last] += virtual_offset - actual_offset;
    }
}

/// Zieht alle Flat-Slots (außer Slot 0) und den letzten Slot auf die
/// Y-Grundlinie von Slot 0. X bleibt unverändert.
///
/// Der letzte Slot wird unabhängig von seiner Rolle ausgerichtet, damit das
/// rechte Zeilenende trotz kleiner Kurven-/Solver-Drift optisch flach liegt.
pub fn apply_flat_baseline(centers: &mut [DVec2], categories: &[Category]) {
    let Some(&first) = centers.first() else {
        return;
    };
    let base_y = first.y;
    for idx in 1..centers.len() {
        if categories[idx] == Category::Flat {
            centers[idx].y = base_y;
        }
    }
    if centers.len() > 1 {
        let last = centers.len() - 1;
        centers[last].y = base_y;
    }
}

/// Verschiebt die gesamte Zeile so, dass Slot 0 exakt auf seinem
/// ursprünglichen Anker liegt (Math-Frame). Entkoppelt die relative
/// Kurvenmathematik von der realen Platzierung der Zeile.
pub fn apply_origin_anchor(centers: &mut [DVec2], original_anchor: DVec2) {
    let Some(&first) = centers.first() else {
        return;
    };
    let delta = first - original_anchor;
    if delta.x.abs() > ANCHOR_EPSILON || delta.y.abs() > ANCHOR_EPSILON {
        for center in centers.iter_mut() {
            *center -= delta;
        }
    }
}
