//! Persistierter Parameter-Datensatz einer Zeile.

use serde::{Deserialize, Serialize};

use crate::core::{AngleProfile, RowConfig};

/// Versionskennung, die neu gespeicherte Datensätze erhalten.
pub const RECORD_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON-Datensatz mit allen Parametern einer gespeicherten Zeile.
///
/// Die [`RowConfig`] ist aus den Feldern `sag`, `end_flat`, `profile` und
/// `use_asymmetric_curve` verlustfrei ableitbar und dorthin serialisierbar;
/// `footprints`/`row_name`/`version` gehören allein dem Host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    /// Durchhang am Scheitel [mm].
    pub sag: f64,
    /// Anzahl flacher Keys pro Zeilenende.
    pub end_flat: u8,
    /// Profil-Schlüssel ("cosine", "quadratic", "bezier").
    pub profile: String,
    /// Kontrollpunkte zum breiteren Ende verschieben.
    #[serde(default)]
    pub use_asymmetric_curve: bool,
    /// Referenzen der zugehörigen Footprints in Zeilenreihenfolge.
    pub footprints: Vec<String>,
    /// Anzeigename, z.B. "SW1〜SW12".
    pub row_name: String,
    /// Version des Werkzeugs, das den Datensatz geschrieben hat.
    pub version: String,
}

impl RowRecord {
    /// Baut den Datensatz aus einer Engine-Konfiguration und den Referenzen
    /// der Zeilenmitglieder.
    pub fn from_config(config: &RowConfig, footprints: Vec<String>) -> Self {
        let row_name = match (footprints.first(), footprints.last()) {
            (Some(first), Some(last)) => format!("{first}〜{last}"),
            _ => String::new(),
        };
        Self {
            sag: config.sag_mm,
            end_flat: config.end_flat,
            profile: config.angle_profile.key().to_string(),
            use_asymmetric_curve: config.use_asymmetric_curve,
            footprints,
            row_name,
            version: RECORD_VERSION.to_string(),
        }
    }

    /// Engine-Konfiguration aus den persistierten Feldern. Unbekannte
    /// Profil-Schlüssel fallen auf die volle Tangente zurück, Wertebereiche
    /// werden geklemmt.
    pub fn to_config(&self) -> RowConfig {
        RowConfig {
            sag_mm: self.sag,
            end_flat: self.end_flat,
            angle_profile: AngleProfile::from_key(&self.profile),
            use_asymmetric_curve: self.use_asymmetric_curve,
        }
        .sanitized()
    }
}
