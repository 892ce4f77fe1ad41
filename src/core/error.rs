//! Fehler der Zeilen-Layout-Berechnung.

use thiserror::Error;

/// Fehler, die [`solve_row`](crate::core::row::solve_row) melden kann.
///
/// Die Engine rechnet bei Fehlern nichts an und liefert keine Teilergebnisse;
/// Wiederholen ohne geänderte Eingaben ändert das Ergebnis nicht.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Eine Zeile braucht mindestens zwei Slots.
    #[error("Zeile benötigt mindestens 2 Slots, übergeben: {0}")]
    InsufficientSlots(usize),
    /// Slot-Abmessungen müssen endlich und positiv sein. Die Engine ersetzt
    /// nie stillschweigend Defaults — Normalisierung ist Sache des Hosts.
    #[error("Slot {index}: ungültige Abmessung {width_mm}×{height_mm} mm")]
    InvalidDimension {
        index: usize,
        width_mm: f64,
        height_mm: f64,
    },
}
