//! Kubische Bézier-Geometrie für die Zeilenkurve.
//!
//! Layer-neutral: reine Funktionen über Kontrollpunkte im Math-Frame, ohne
//! Abhängigkeit auf Engine-Typen. Die Zeilenkurve hängt zwischen zwei
//! gleich hohen Endpunkten nach unten durch ("Sag").

use glam::DVec2;

/// Anzahl der Abtastpunkte für die Bogenlängen-Tabelle.
pub const ARC_LENGTH_SAMPLES: usize = 800;

/// Maximaler Kontrollpunkt-Versatz bei asymmetrischer Kurve
/// (Anteil der Zeilenlänge).
pub const ASYMMETRY_SHIFT_FACTOR: f64 = 0.15;

/// Schwelle, unter der die Summe der End-Breiten als Null gilt.
const WIDTH_SUM_EPSILON: f64 = 1e-6;

/// Schwelle, unter der die abgetastete Kurvenlänge als Null gilt.
const DEGENERATE_LENGTH_EPSILON: f64 = 1e-9;

/// Kubische Bézier-Kurve über vier Kontrollpunkte im Math-Frame.
///
/// Die Endpunkte `p0`/`p3` stehen nach der Konstruktion fest; alle
/// Operationen sind rein und verändern die Kurve nicht.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: DVec2,
    pub p1: DVec2,
    pub p2: DVec2,
    pub p3: DVec2,
}

impl CubicBezier {
    /// Symmetrische Zeilenkurve: Kontrollpunkte bei 1/3 und 2/3 der
    /// Zeilenlänge, vertikal um `beta = (4/3)·(−sag)` versetzt, so dass die
    /// Kurve am Scheitel genau `sag_mm` durchhängt.
    pub fn row_symmetric(p0: DVec2, p3: DVec2, sag_mm: f64) -> Self {
        let row_length = p3.x - p0.x;
        let beta = (4.0 / 3.0) * (-sag_mm);
        Self {
            p0,
            p1: DVec2::new(p0.x + row_length / 3.0, p0.y + beta),
            p2: DVec2::new(p3.x - row_length / 3.0, p3.y + beta),
            p3,
        }
    }

    /// Breiten-asymmetrische Zeilenkurve.
    ///
    /// Das Asymmetrie-Verhältnis `(links − rechts) / (links + rechts)` in
    /// [−1, 1] verschiebt beide Kontrollpunkte horizontal zum breiteren Ende,
    /// gedeckelt auf [`ASYMMETRY_SHIFT_FACTOR`] der Zeilenlänge. Der
    /// vertikale Versatz bleibt unverändert. Summe der Breiten ≈ 0 wird als
    /// symmetrisch behandelt.
    pub fn row_asymmetric(
        p0: DVec2,
        p3: DVec2,
        sag_mm: f64,
        left_width_mm: f64,
        right_width_mm: f64,
    ) -> Self {
        let row_length = p3.x - p0.x;
        let beta = (4.0 / 3.0) * (-sag_mm);

        let total_width = left_width_mm + right_width_mm;
        let asymmetry = if total_width > WIDTH_SUM_EPSILON {
            (left_width_mm - right_width_mm) / total_width
        } else {
            0.0
        };
        let shift = asymmetry * ASYMMETRY_SHIFT_FACTOR;

        // Breiteres linkes Ende (shift > 0) zieht beide Punkte nach links.
        Self {
            p0,
            p1: DVec2::new(p0.x + row_length * (1.0 / 3.0 - shift), p0.y + beta),
            p2: DVec2::new(p3.x - row_length * (1.0 / 3.0 + shift), p3.y + beta),
            p3,
        }
    }

    /// Wählt je nach Flag die symmetrische oder asymmetrische Konstruktion.
    pub fn row(
        p0: DVec2,
        p3: DVec2,
        sag_mm: f64,
        left_width_mm: f64,
        right_width_mm: f64,
        use_asymmetric: bool,
    ) -> Self {
        if use_asymmetric {
            Self::row_asymmetric(p0, p3, sag_mm, left_width_mm, right_width_mm)
        } else {
            Self::row_symmetric(p0, p3, sag_mm)
        }
    }

    /// B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3
    pub fn point(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        let u2 = u * u;
        let t2 = t * t;
        u2 * u * self.p0 + 3.0 * u2 * t * self.p1 + 3.0 * u * t2 * self.p2 + t2 * t * self.p3
    }

    /// Erste Ableitung (Tangentenvektor) bei `t`.
    pub fn tangent(&self, t: f64) -> DVec2 {
        let u = 1.0 - t;
        3.0 * u * u * (self.p1 - self.p0)
            + 6.0 * u * t * (self.p2 - self.p1)
            + 3.0 * t * t * (self.p3 - self.p2)
    }

    /// Bogenlängen-Parametrisierung: bildet kumulierte Zieldistanzen auf
    /// Parameterwerte `t ∈ [0, 1]` ab.
    ///
    /// Die Kurve wird mit [`ARC_LENGTH_SAMPLES`] Punkten abgetastet und eine
    /// monotone Bogenlängen-Tabelle aufgebaut. Übergebene Distanzen werden
    /// proportional skaliert, so dass der letzte Eintrag der Gesamtlänge
    /// entspricht; `None` bedeutet gleichmäßige Verteilung. Pro Ziel liefert
    /// die Suche den ersten Abtastpunkt mit Bogenlänge ≥ Ziel.
    ///
    /// `count <= 1` liefert `[0.0]`; eine degenerierte Kurve (Länge ≈ 0)
    /// liefert lauter Nullen.
    pub fn divide_by_distances(&self, count: usize, cumulative_distances: Option<&[f64]>) -> Vec<f64> {
        if count <= 1 {
            return vec![0.0];
        }

        let samples = ARC_LENGTH_SAMPLES;
        let mut lengths = Vec::with_capacity(samples);
        lengths.push(0.0);
        let mut prev = self.point(0.0);
        let mut total = 0.0;
        for i in 1..samples {
            let p = self.point(i as f64 / (samples - 1) as f64);
            total += prev.distance(p);
            lengths.push(total);
            prev = p;
        }

        if total < DEGENERATE_LENGTH_EPSILON {
            return vec![0.0; count];
        }

        let targets: Vec<f64> = match cumulative_distances {
            None => (0..count)
                .map(|k| total * k as f64 / (count - 1) as f64)
                .collect(),
            Some(distances) => {
                let max_dist = match distances.last() {
                    Some(&last) if last > 0.0 => last,
                    _ => 1.0,
                };
                distances.iter().map(|d| d / max_dist * total).collect()
            }
        };

        targets
            .iter()
            .map(|&target| {
                let idx = lengths.partition_point(|&len| len < target).min(samples - 1);
                idx as f64 / (samples - 1) as f64
            })
            .collect()
    }
}
