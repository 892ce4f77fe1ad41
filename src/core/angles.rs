//! Winkelprofil und Tangenten-Orientierung der Slots.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::core::category::Category;
use crate::shared::bezier::CubicBezier;

/// Globaler Rotations-Offset, gleichmäßig auf alle Slots addiert [Grad].
pub const ROT_OFFSET_DEG: f64 = 0.0;

/// Winkelprofil: wie stark der Tangentenwinkel zum Zeilenrand hin ausklingt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleProfile {
    /// Sanft: `cos(π/2 · norm)`.
    Cosine,
    /// Glatt: `1 − norm²`.
    Quadratic,
    /// Volle Bézier-Tangente ohne Ausklingen.
    Bezier,
}

impl AngleProfile {
    /// Profil aus einem Schlüsselwort. Unbekannte Schlüssel sind kein Fehler:
    /// sie fallen auf die volle Tangente zurück (Faktor 1.0).
    pub fn from_key(key: &str) -> Self {
        match key {
            "cosine" => AngleProfile::Cosine,
            "quadratic" => AngleProfile::Quadratic,
            _ => AngleProfile::Bezier,
        }
    }

    /// Schlüsselwort des Profils (persistiertes Format).
    pub fn key(self) -> &'static str {
        match self {
            AngleProfile::Cosine => "cosine",
            AngleProfile::Quadratic => "quadratic",
            AngleProfile::Bezier => "bezier",
        }
    }

    /// Dämpfungsfaktor bei normierter Mittenentfernung `norm`,
    /// geklemmt auf [0, 1].
    pub fn factor(self, norm: f64) -> f64 {
        let norm = norm.clamp(0.0, 1.0);
        match self {
            AngleProfile::Cosine => (std::f64::consts::FRAC_PI_2 * norm).cos(),
            AngleProfile::Quadratic => (1.0 - norm * norm).max(0.0),
            AngleProfile::Bezier => 1.0,
        }
    }
}

/// Dämpfungsfaktor über den Profil-Schlüssel; unbekannte Schlüssel liefern 1.0.
pub fn angle_profile_factor(profile_key: &str, norm_distance: f64) -> f64 {
    AngleProfile::from_key(profile_key).factor(norm_distance)
}

/// Rohe Tangenten- und gedämpfte Slot-Winkel entlang der Kurve (Radiant).
///
/// Liefert `(base_tangent, angles)`. Flat-Slots werden auf 0 geklemmt;
/// `base_tangent` bleibt ungeklemmt, damit der Kontakt-Solver der
/// Kurvenrichtung auch dann folgt, wenn der gezeichnete Winkel 0 ist.
/// [`ROT_OFFSET_DEG`] wird nach der Klemmung gleichmäßig addiert.
pub fn angles_from_tangents(
    ts: &[f64],
    curve: &CubicBezier,
    profile: AngleProfile,
    categories: &[Category],
) -> (Vec<f64>, Vec<f64>) {
    let n = ts.len();
    let center = if n > 1 { (n - 1) as f64 / 2.0 } else { 0.0 };
    let max_dist = if center > 0.0 { center } else { 1.0 };

    let mut base_tangent = Vec::with_capacity(n);
    let mut angles = Vec::with_capacity(n);
    for (idx, &t) in ts.iter().enumerate() {
        let d: DVec2 = curve.tangent(t);
        let raw = d.y.atan2(d.x);
        base_tangent.push(raw);

        let norm = (idx as f64 - center).abs() / max_dist;
        let adjusted = if categories[idx].is_flat() {
            0.0
        } else {
            raw * profile.factor(norm)
        };
        angles.push(adjusted + ROT_OFFSET_DEG.to_radians());
    }
    (base_tangent, angles)
}
