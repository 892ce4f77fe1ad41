//! Koordinatenrahmen und Rechteck-Ecken.
//!
//! KiCad zählt Y nach unten ("Board-Frame"), die Kurvenmathematik nach oben
//! ("Math-Frame"). Die Umrechnung ist ein reiner Y-Flip und damit selbstinvers.

use glam::DVec2;

/// Konvertiert einen Punkt vom Board-Frame (Y nach unten) in den Math-Frame
/// (Y nach oben).
pub fn board_to_math(p: DVec2) -> DVec2 {
    DVec2::new(p.x, -p.y)
}

/// Konvertiert einen Punkt vom Math-Frame zurück in den Board-Frame.
/// Gleiche Abbildung wie [`board_to_math`] — der Flip ist selbstinvers.
pub fn math_to_board(p: DVec2) -> DVec2 {
    DVec2::new(p.x, -p.y)
}

/// Ecken-Label eines Rechtecks im lokalen, ungedrehten Frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Corner {
    /// Alle Labels in fester Reihenfolge. Die Reihenfolge ist der Tie-Break
    /// der Unter-/Ober-Klassifikation und darf sich nicht ändern.
    pub const ALL: [Corner; 4] = [
        Corner::UpperLeft,
        Corner::UpperRight,
        Corner::LowerLeft,
        Corner::LowerRight,
    ];

    /// Lokaler Offset der Ecke relativ zum Rechteck-Zentrum (Math-Frame).
    pub fn offset(self, width: f64, height: f64) -> DVec2 {
        let hw = width / 2.0;
        let hh = height / 2.0;
        match self {
            Corner::UpperLeft => DVec2::new(-hw, hh),
            Corner::UpperRight => DVec2::new(hw, hh),
            Corner::LowerLeft => DVec2::new(-hw, -hh),
            Corner::LowerRight => DVec2::new(hw, -hh),
        }
    }
}

/// Position einer Ecke eines gedrehten Rechtecks im Math-Frame.
pub fn corner_point(center: DVec2, width: f64, height: f64, angle_rad: f64, corner: Corner) -> DVec2 {
    center + DVec2::from_angle(angle_rad).rotate(corner.offset(width, height))
}

/// Klassifiziert die vier Ecken rotationsbewusst in unteres und oberes Paar.
///
/// Sortiert die Eckpositionen (Rechteck im Ursprung, eigener Winkel) stabil
/// nach Math-Y: die zwei kleinsten sind das untere Paar, die zwei größten das
/// obere. Ein um 180° gedrehtes Rechteck tauscht damit die physischen Rollen.
pub fn lower_upper_corners(angle_rad: f64, width: f64, height: f64) -> ([Corner; 2], [Corner; 2]) {
    let mut by_y: [(Corner, f64); 4] = Corner::ALL.map(|corner| {
        let p = corner_point(DVec2::ZERO, width, height, angle_rad, corner);
        (corner, p.y)
    });
    by_y.sort_by(|a, b| a.1.total_cmp(&b.1));
    ([by_y[0].0, by_y[1].0], [by_y[2].0, by_y[3].0])
}
