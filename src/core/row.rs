//! Zeilen-Datenmodell und Lösungs-Pipeline.
//!
//! [`solve_row`] ist der einzige Einstiegspunkt der Engine: rein,
//! zustandslos, deterministisch. Identische Eingaben liefern bitidentische
//! Ergebnisse — es gibt keine Caches, keine Zufallsquellen und keine
//! versteckten Vorgabewerte.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::angles::{angles_from_tangents, AngleProfile};
use crate::core::category::{assign_categories, Category};
use crate::core::contact::apply_corner_contact;
use crate::core::error::LayoutError;
use crate::core::finishing::{
    apply_end_width_corrections, apply_flat_baseline, apply_origin_anchor,
};
use crate::shared::bezier::CubicBezier;
use crate::shared::frame::{board_to_math, math_to_board};
use crate::shared::units::UNIT_MM;

/// Maximale Anzahl flacher Keys pro Zeilenende.
pub const MAX_END_FLAT: u8 = 2;

/// Standard-Durchhang am Scheitel [mm].
pub const DEFAULT_SAG_MM: f64 = 20.0;
/// Standard-Anzahl flacher Keys pro Zeilenende.
pub const DEFAULT_END_FLAT: u8 = 1;

/// Toleranz, ab der eine End-Breite als nicht-kanonisch gilt.
const WIDTH_EPSILON: f64 = 1e-6;

/// Ein zu platzierender Rechteck-Slot (unveränderliche Eingabe).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// Breite in Millimetern (> 0, endlich).
    pub width_mm: f64,
    /// Höhe in Millimetern (> 0, endlich).
    pub height_mm: f64,
    /// Ursprüngliche Position im Board-Frame (Y nach unten).
    pub original_anchor: DVec2,
}

impl Slot {
    /// Slot mit kanonischen 1u-Abmessungen am gegebenen Anker.
    pub fn unit(original_anchor: DVec2) -> Self {
        Self {
            width_mm: UNIT_MM,
            height_mm: UNIT_MM,
            original_anchor,
        }
    }
}

/// Parameter eines Zeilen-Layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowConfig {
    /// Durchhang am Scheitel [mm], ≥ 0.
    pub sag_mm: f64,
    /// Anzahl flacher Keys pro Zeilenende (0..=[`MAX_END_FLAT`]).
    pub end_flat: u8,
    /// Winkelprofil für das Ausklingen der Tangente.
    pub angle_profile: AngleProfile,
    /// Kontrollpunkte zum breiteren Ende verschieben.
    pub use_asymmetric_curve: bool,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            sag_mm: DEFAULT_SAG_MM,
            end_flat: DEFAULT_END_FLAT,
            angle_profile: AngleProfile::Cosine,
            use_asymmetric_curve: false,
        }
    }
}

impl RowConfig {
    /// Klemmt die Parameter auf gültige Bereiche (sag ≥ 0, end_flat 0..=2).
    pub fn sanitized(self) -> Self {
        Self {
            sag_mm: self.sag_mm.max(0.0),
            end_flat: self.end_flat.min(MAX_END_FLAT),
            ..self
        }
    }
}

/// Ergebnis pro Slot, in Eingabe-Reihenfolge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolvedSlot {
    /// Zentrum im Board-Frame [mm].
    pub center: DVec2,
    /// Orientierung in Grad (Host-Konvention).
    pub angle_deg: f64,
}

/// Berechnet das Zeilen-Layout für `slots` mit `config`.
///
/// Bei `end_flat == 0` wird die Zeile mit virtuellen 1u-Endkappen gelöst,
/// sonst direkt mit virtuellen End-Breiten. Das Ergebnis ist 1:1 und in
/// Reihenfolge zu den Eingabe-Slots; Slot 0 liegt exakt auf seinem Anker.
pub fn solve_row(slots: &[Slot], config: &RowConfig) -> Result<Vec<SolvedSlot>, LayoutError> {
    if slots.len() < 2 {
        return Err(LayoutError::InsufficientSlots(slots.len()));
    }
    for (index, slot) in slots.iter().enumerate() {
        let valid = slot.width_mm.is_finite()
            && slot.width_mm > 0.0
            && slot.height_mm.is_finite()
            && slot.height_mm > 0.0;
        if !valid {
            return Err(LayoutError::InvalidDimension {
                index,
                width_mm: slot.width_mm,
                height_mm: slot.height_mm,
            });
        }
    }

    log::debug!(
        "Zeilen-Layout: {} Slots, sag={}mm, end_flat={}, Profil={}, asymmetrisch={}",
        slots.len(),
        config.sag_mm,
        config.end_flat,
        config.angle_profile.key(),
        config.use_asymmetric_curve
    );

    let solved = if config.end_flat == 0 {
        solve_with_virtual_endcaps(slots, config)
    } else {
        solve_direct(slots, config)
    };
    Ok(solved)
}

/// Direkter Pfad (end_flat ≥ 1): nicht-kanonische End-Breiten rechnen in der
/// Kurvenmathematik als virtuelle 1u-Slots, die End-Breiten-Korrektur holt
/// die echten Abmessungen anschließend zurück.
fn solve_direct(slots: &[Slot], config: &RowConfig) -> Vec<SolvedSlot> {
    let n = slots.len();
    let widths: Vec<f64> = slots.iter().map(|s| s.width_mm).collect();
    let heights: Vec<f64> = slots.iter().map(|s| s.height_mm).collect();
    let left_actual = widths[0];
    let right_actual = widths[n - 1];

    let mut virtual_widths = widths.clone();
    if (left_actual - UNIT_MM).abs() > WIDTH_EPSILON {
        virtual_widths[0] = UNIT_MM;
    }
    if (right_actual - UNIT_MM).abs() > WIDTH_EPSILON {
        virtual_widths[n - 1] = UNIT_MM;
    }

    let anchor_math = board_to_math(slots[0].original_anchor);
    // Basis so verschieben, dass die echte linke Außenkante erhalten bleibt.
    let base = if (virtual_widths[0] - left_actual).abs() > WIDTH_EPSILON {
        DVec2::new(
            anchor_math.x + (left_actual - virtual_widths[0]) / 2.0,
            anchor_math.y,
        )
    } else {
        anchor_math
    };

    let distances = cumulative_spacing(&virtual_widths);
    let row_length = distances.last().copied().unwrap_or(0.0);
    let p0 = base;
    let p3 = DVec2::new(base.x + row_length, base.y);
    let curve = CubicBezier::row(
        p0,
        p3,
        config.sag_mm,
        left_actual,
        right_actual,
        config.use_asymmetric_curve,
    );

    let ts = curve.divide_by_distances(n, Some(&distances));
    let mut centers: Vec<DVec2> = ts.iter().map(|&t| curve.point(t)).collect();

    let categories = assign_categories(n, config.end_flat);
    let (base_tangent, angles) =
        angles_from_tangents(&ts, &curve, config.angle_profile, &categories);

    apply_corner_contact(&mut centers, &angles, &virtual_widths, &categories, &base_tangent);
    apply_end_width_corrections(&mut centers, &angles, &heights, left_actual, right_actual);
    apply_flat_baseline(&mut centers, &categories);
    apply_origin_anchor(&mut centers, anchor_math);

    collect_solved(&centers, &angles)
}

/// Endkappen-Pfad (end_flat == 0): kanonische Phantom-Slots vor und hinter
/// der Zeile absorbieren die Randeffekte, die sonst die End-Breiten-Korrektur
/// übernehmen würde. Gelöst wird die erweiterte Zeile, ausgegeben nur die
/// echten Slots.
fn solve_with_virtual_endcaps(slots: &[Slot], config: &RowConfig) -> Vec<SolvedSlot> {
    let n = slots.len();
    let mut layout_widths = Vec::with_capacity(n + 2);
    layout_widths.push(UNIT_MM);
    layout_widths.extend(slots.iter().map(|s| s.width_mm));
    layout_widths.push(UNIT_MM);
    let layout_n = layout_widths.len();

    let anchor_math = board_to_math(slots[0].original_anchor);
    let distances = cumulative_spacing(&layout_widths);
    let row_length = distances.last().copied().unwrap_or(0.0);
    let p0 = anchor_math;
    let p3 = DVec2::new(p0.x + row_length, p0.y);
    let curve = CubicBezier::row(
        p0,
        p3,
        config.sag_mm,
        slots[0].width_mm,
        slots[n - 1].width_mm,
        config.use_asymmetric_curve,
    );

    let ts = curve.divide_by_distances(layout_n, Some(&distances));
    let mut centers: Vec<DVec2> = ts.iter().map(|&t| curve.point(t)).collect();

    let mut categories = assign_categories(layout_n, 0);
    categories[0] = Category::Flat;
    categories[layout_n - 1] = Category::Flat;

    let (base_tangent, angles) =
        angles_from_tangents(&ts, &curve, config.angle_profile, &categories);
    apply_corner_contact(&mut centers, &angles, &layout_widths, &categories, &base_tangent);

    // Phantom-Slots verwerfen, weiter nur mit den echten.
    let mut real_centers: Vec<DVec2> = centers[1..layout_n - 1].to_vec();
    let real_angles: Vec<f64> = angles[1..layout_n - 1].to_vec();

    let real_categories = assign_categories(n, 0);
    apply_flat_baseline(&mut real_centers, &real_categories);
    apply_origin_anchor(&mut real_centers, anchor_math);

    collect_solved(&real_centers, &real_angles)
}

/// Kumulierte Soll-Abstände: Nachbarn stehen im Mittel ihrer Breiten
/// auseinander.
fn cumulative_spacing(widths: &[f64]) -> Vec<f64> {
    let mut distances = Vec::with_capacity(widths.len());
    distances.push(0.0);
    for i in 1..widths.len() {
        let spacing = (widths[i - 1] + widths[i]) / 2.0;
        distances.push(distances[i - 1] + spacing);
    }
    distances
}

/// Math-Frame-Zentren und Radiant-Winkel in das Ausgabeformat übersetzen.
fn collect_solved(centers: &[DVec2], angles: &[f64]) -> Vec<SolvedSlot> {
    centers
        .iter()
        .zip(angles)
        .map(|(&center, &angle)| SolvedSlot {
            center: math_to_board(center),
            angle_deg: angle.to_degrees(),
        })
        .collect()
}
