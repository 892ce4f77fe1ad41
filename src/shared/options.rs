//! Zuletzt verwendete Layout-Parameter als explizite Host-Konfiguration.
//!
//! Der Parameter-Dialog des Hosts lädt diese Vorgaben, zeigt sie an und
//! leitet daraus pro Aufruf eine [`RowConfig`] ab. Die Engine liest die
//! Optionen nie selbst — sie bekommt ihre Konfiguration bei jedem Aufruf
//! explizit übergeben.

use serde::{Deserialize, Serialize};

use crate::core::{AngleProfile, RowConfig};

/// Host-seitig persistierte Vorgabewerte für den Parameter-Dialog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrinnerOptions {
    /// Durchhang der Zeile am Scheitel [mm].
    pub sag_mm: f64,
    /// Anzahl flacher Keys pro Zeilenende (0, 1 oder 2).
    pub end_flat: u8,
    /// Winkelprofil für das Ausklingen der Tangente.
    pub angle_profile: AngleProfile,
    /// Kontrollpunkte zum breiteren Ende verschieben.
    pub use_asymmetric_curve: bool,
}

impl Default for GrinnerOptions {
    fn default() -> Self {
        RowConfig::default().into()
    }
}

impl From<RowConfig> for GrinnerOptions {
    fn from(config: RowConfig) -> Self {
        Self {
            sag_mm: config.sag_mm,
            end_flat: config.end_flat,
            angle_profile: config.angle_profile,
            use_asymmetric_curve: config.use_asymmetric_curve,
        }
    }
}

impl GrinnerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Engine-Konfiguration für den nächsten Aufruf, geklemmt auf gültige
    /// Bereiche.
    pub fn to_row_config(&self) -> RowConfig {
        RowConfig {
            sag_mm: self.sag_mm,
            end_flat: self.end_flat,
            angle_profile: self.angle_profile,
            use_asymmetric_curve: self.use_asymmetric_curve,
        }
        .sanitized()
    }

    /// Übernimmt die Parameter eines erfolgreichen Laufs als neue Vorgaben.
    pub fn remember(&mut self, config: &RowConfig) {
        *self = (*config).into();
    }
}
