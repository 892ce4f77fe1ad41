//! Ecken-Kontakt-Solver: platziert jeden Slot relativ zu seinem Vorgänger.
//!
//! Zwei gedrehte Rechtecke ungleicher Breite haben keine geschlossene Formel
//! für "berühren sich an der richtigen Ecke" — welches Eckenpaar zählt, hängt
//! von den Strukturrollen ab, und der geometrisch nächste Berührpunkt kann
//! die Zeile rückwärts laufen lassen. Der Solver zählt deshalb die wenigen
//! Label-Kombinationen auf und nimmt das Maximum eines Scores.

use glam::DVec2;

use crate::core::category::{contact_mode, Category, ContactMode};
use crate::shared::frame::{corner_point, lower_upper_corners, Corner};
use crate::shared::units::UNIT_MM;

/// Gewicht der Vorwärts-Komponente im Kandidaten-Score.
pub const FORWARD_BIAS_WEIGHT: f64 = 1000.0;
/// Disqualifikation: Kandidat liegt hinter dem Vorgänger (größte Strafe).
pub const BACKWARD_PENALTY: f64 = 1e6;
/// Disqualifikation: Kandidat liegt zu dicht am Vorgänger.
pub const TOO_CLOSE_PENALTY: f64 = 1e5;
/// Mindestabstand als Anteil des Idealabstands.
pub const MIN_SEPARATION_RATIO: f64 = 0.6;

/// Berechnet das Zentrum des aktuellen Slots so, dass er den Vorgänger am
/// Eckenpaar des Kontaktmodus berührt.
///
/// Für jede der ≤ 2×2 Label-Kombinationen wird ein Kandidat gebildet
/// (Vorgänger-Ecke minus gleichlabelige Ecken-Offset des aktuellen Slots)
/// und bewertet: Vorwärtskomponente dominiert, Abweichung vom Idealabstand
/// `(w_prev + w_curr)/2` zieht ab, Rückwärts-Kandidaten und zu dichte
/// Kandidaten werden disqualifiziert. Die Höhe ist für den Kontakt immer die
/// kanonische 1u-Höhe.
///
/// Ohne Kandidaten (bei nicht-leeren Label-Mengen unerreichbar) geht es
/// geradeaus im Idealabstand weiter, damit der Solver total bleibt.
pub fn place_with_corner_contact(
    prev_center: DVec2,
    prev_angle: f64,
    curr_angle: f64,
    prev_width: f64,
    curr_width: f64,
    mode: ContactMode,
    forward: DVec2,
) -> DVec2 {
    let height = UNIT_MM;
    let (lower_prev, upper_prev) = lower_upper_corners(prev_angle, prev_width, height);
    let (lower_curr, upper_curr) = lower_upper_corners(curr_angle, curr_width, height);
    let prev_labels: [Corner; 2] = match mode {
        ContactMode::Lower => lower_prev,
        ContactMode::Upper => upper_prev,
    };
    let curr_labels: [Corner; 2] = match mode {
        ContactMode::Lower => lower_curr,
        ContactMode::Upper => upper_curr,
    };

    let target = (prev_width + curr_width) / 2.0;
    let mut best: Option<(f64, DVec2)> = None;
    for &prev_label in &prev_labels {
        let prev_corner = corner_point(prev_center, prev_width, height, prev_angle, prev_label);
        for &curr_label in &curr_labels {
            let rel_corner = corner_point(DVec2::ZERO, curr_width, height, curr_angle, curr_label);
            let candidate = prev_corner - rel_corner;

            let delta = candidate - prev_center;
            let dist = delta.length();
            let forward_dist = delta.dot(forward);
            let mut score = FORWARD_BIAS_WEIGHT * forward_dist - (dist - target).abs();
            if forward_dist < 0.0 {
                score -= BACKWARD_PENALTY;
            }
            if dist < MIN_SEPARATION_RATIO * target {
                score -= TOO_CLOSE_PENALTY;
            }

            let replace = match best {
                Some((best_score, _)) => score > best_score,
                None => true,
            };
            if replace {
                best = Some((score, candidate));
            }
        }
    }

    match best {
        Some((_, candidate)) => candidate,
        None => prev_center + forward * target,
    }
}

/// Wendet den Kontakt-Solver sequentiell von links nach rechts an.
///
/// `base_tangent` sind die rohen, ungeklemmten Tangentenwinkel; die
/// Vorwärtsrichtung jedes Schritts ist der zirkuläre Mittelwert der beiden
/// beteiligten Tangenten. Einmal platzierte Slots werden nicht erneut
/// angefasst (kein Backtracking).
pub fn apply_corner_contact(
    centers: &mut [DVec2],
    angles: &[f64],
    widths: &[f64],
    categories: &[Category],
    base_tangent: &[f64],
) {
    for idx in 1..centers.len() {
        let mode = contact_mode(categories[idx - 1], categories[idx]);
        let avg = (base_tangent[idx - 1].sin() + base_tangent[idx].sin())
            .atan2(base_tangent[idx - 1].cos() + base_tangent[idx].cos());
        let forward = DVec2::from_angle(avg);
        centers[idx] = place_with_corner_contact(
            centers[idx - 1],
            angles[idx - 1],
            angles[idx],
            widths[idx - 1],
            widths[idx],
            mode,
            forward,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FORWARD_X: DVec2 = DVec2::new(1.0, 0.0);

    #[test]
    fn test_ungedrehte_einheitsquadrate_unten() {
        // Zwei achsparallele 1u-Quadrate: Kontakt LR↔LL, Zentren exakt 1u auseinander
        let center = place_with_corner_contact(
            DVec2::ZERO,
            0.0,
            0.0,
            UNIT_MM,
            UNIT_MM,
            ContactMode::Lower,
            FORWARD_X,
        );
        assert_relative_eq!(center.x, UNIT_MM, epsilon = 1e-12);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ungedrehte_quadrate_oben_gleiche_position() {
        // Ohne Rotation liefert der obere Kontakt dieselbe Position
        let center = place_with_corner_contact(
            DVec2::ZERO,
            0.0,
            0.0,
            UNIT_MM,
            UNIT_MM,
            ContactMode::Upper,
            FORWARD_X,
        );
        assert_relative_eq!(center.x, UNIT_MM, epsilon = 1e-12);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ungleiche_breiten() {
        let wide = 1.5 * UNIT_MM;
        let center = place_with_corner_contact(
            DVec2::ZERO,
            0.0,
            0.0,
            wide,
            UNIT_MM,
            ContactMode::Lower,
            FORWARD_X,
        );
        assert_relative_eq!(center.x, (wide + UNIT_MM) / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotierter_nachfolger_bleibt_vorwaerts() {
        let angle = -0.3;
        let center = place_with_corner_contact(
            DVec2::ZERO,
            0.0,
            angle,
            UNIT_MM,
            UNIT_MM,
            ContactMode::Lower,
            FORWARD_X,
        );
        // Vorwärts, nie rückwärts, und nicht dichter als 0.6×Ideal
        assert!(center.x > 0.0);
        assert!(center.length() >= MIN_SEPARATION_RATIO * UNIT_MM);
        // Berührpunkt-Abstand wächst mit der Relativdrehung, bleibt aber begrenzt
        assert!(center.length() <= 1.5 * UNIT_MM);
    }

    #[test]
    fn test_strafen_ordnung() {
        // Rückwärts disqualifiziert härter als "zu dicht"; beide dominieren
        // den Abstands-Term. Die Ordnung ist Teil des Vertrags.
        assert!(BACKWARD_PENALTY > TOO_CLOSE_PENALTY);
        assert!(TOO_CLOSE_PENALTY > FORWARD_BIAS_WEIGHT * 2.0 * UNIT_MM);
    }

    #[test]
    fn test_kette_laeuft_nach_rechts() {
        let n = 4;
        let mut centers = vec![DVec2::ZERO; n];
        let angles = [0.0, -0.2, 0.2, 0.0];
        let widths = [UNIT_MM; 4];
        let categories = [
            Category::Flat,
            Category::ValleyUpper,
            Category::ValleyUpper,
            Category::Flat,
        ];
        let base_tangent = [-0.4, -0.2, 0.2, 0.4];
        apply_corner_contact(&mut centers, &angles, &widths, &categories, &base_tangent);
        for pair in centers.windows(2) {
            assert!(pair[1].x > pair[0].x, "Zentren müssen nach rechts wandern");
        }
    }
}
