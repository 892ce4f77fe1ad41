//! Einheiten-Parsing für Key-Abmessungen.
//!
//! Host-Metadaten geben Abmessungen als Text an ("1.5u", "19.05mm",
//! "2u x 1u"); hier wird daraus ein Millimeter-Wert. Die Engine selbst
//! verlangt bereits validierte Werte — dieses Modul ist der Parser, den der
//! Host-Kollaborateur dafür benutzt.

use regex::Regex;
use std::sync::LazyLock;

/// Key-Pitch 1u in Millimetern.
pub const UNIT_MM: f64 = 19.05;

/// Untergrenze der Quantisierung in Key-Einheiten.
pub const QUANTIZE_MIN_UNITS: f64 = 1.0;
/// Rasterweite der Quantisierung in Key-Einheiten.
pub const QUANTIZE_STEP_UNITS: f64 = 0.25;

/// Zahl mit optionaler Einheit, z.B. "1.5u" oder "19.05 mm".
static UNIT_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(mm|MM|u|U)?").expect("statisches Muster")
});

/// Konvertiert ein Zahl-Token mit Einheit nach Millimetern.
///
/// Ohne Einheit greift `default_unit`; unbekannte Einheiten und unlesbare
/// Zahlen liefern `None`.
pub fn convert_unit_token(num: &str, unit: Option<&str>, default_unit: Option<&str>) -> Option<f64> {
    let value: f64 = num.parse().ok()?;
    let unit = unit
        .filter(|u| !u.is_empty())
        .or(default_unit)?
        .to_lowercase();
    match unit.as_str() {
        "mm" => Some(value),
        "u" => Some(value * UNIT_MM),
        _ => None,
    }
}

/// Parst ein Abmessungs-Paar wie "1.5u x 1u", "1.75u × 1u" oder "30mm 20mm".
///
/// Ein einzelner Wert gilt als Breite, die Höhe fällt auf 1u zurück.
/// Trägt keines der Tokens eine Einheit, schlägt das Parsen fehl statt zu
/// raten. Nicht-positive Breiten liefern `None`.
pub fn parse_unit_pair(text: &str) -> Option<(f64, f64)> {
    let normalized = text.replace('×', "x");
    let tokens: Vec<(&str, Option<&str>)> = UNIT_TOKEN_RE
        .captures_iter(&normalized)
        .map(|caps| {
            let num = caps.get(1).map_or("", |m| m.as_str());
            let unit = caps.get(2).map(|m| m.as_str());
            (num, unit)
        })
        .collect();
    if tokens.is_empty() {
        return None;
    }

    let has_unit = tokens.iter().any(|(_, unit)| unit.is_some());
    let default_unit = if has_unit { Some("u") } else { None };

    let width = convert_unit_token(tokens[0].0, tokens[0].1, default_unit)?;
    if width <= 0.0 {
        return None;
    }

    let height = if tokens.len() > 1 {
        match convert_unit_token(tokens[1].0, tokens[1].1, default_unit) {
            Some(h) if h > 0.0 => h,
            _ => UNIT_MM,
        }
    } else {
        UNIT_MM
    };
    Some((width, height))
}

/// Parst einen einzelnen Abmessungswert wie "1.5u" oder "19.05mm".
/// Nicht-positive Werte liefern `None`.
pub fn parse_unit_value(text: &str, default_unit: Option<&str>) -> Option<f64> {
    let caps = UNIT_TOKEN_RE.captures(text.trim())?;
    let num = caps.get(1).map_or("", |m| m.as_str());
    let unit = caps.get(2).map(|m| m.as_str());
    let value = convert_unit_token(num, unit, default_unit)?;
    if value <= 0.0 {
        return None;
    }
    Some(value)
}

/// Quantisiert eine Abmessung auf das übliche Key-Raster (0.25u-Schritte,
/// mindestens 1u). Ungültige Werte (NaN, ≤ 0) fallen auf 1u zurück.
pub fn quantize_dim_mm(value_mm: f64) -> f64 {
    if !value_mm.is_finite() || value_mm <= 0.0 {
        return QUANTIZE_MIN_UNITS * UNIT_MM;
    }
    let units = (value_mm / UNIT_MM).max(QUANTIZE_MIN_UNITS);
    let snapped = (units / QUANTIZE_STEP_UNITS).round() * QUANTIZE_STEP_UNITS;
    snapped.max(QUANTIZE_MIN_UNITS) * UNIT_MM
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_token_mm_und_u() {
        assert_eq!(convert_unit_token("10.5", Some("mm"), None), Some(10.5));
        assert_eq!(convert_unit_token("0", Some("MM"), None), Some(0.0));
        assert_eq!(convert_unit_token("1", Some("u"), None), Some(UNIT_MM));
        assert_eq!(convert_unit_token("2", Some("U"), None), Some(2.0 * UNIT_MM));
    }

    #[test]
    fn test_token_default_einheit() {
        assert_eq!(convert_unit_token("1", None, Some("u")), Some(UNIT_MM));
        assert_eq!(convert_unit_token("10", None, Some("mm")), Some(10.0));
    }

    #[test]
    fn test_token_ungueltig() {
        assert_eq!(convert_unit_token("abc", Some("mm"), None), None);
        assert_eq!(convert_unit_token("1", Some("zoll"), None), None);
        assert_eq!(convert_unit_token("1", None, None), None);
    }

    #[test]
    fn test_paar_einzelwert_mit_default_hoehe() {
        let (w, h) = parse_unit_pair("1.5u").unwrap();
        assert_relative_eq!(w, 1.5 * UNIT_MM);
        assert_relative_eq!(h, UNIT_MM);
    }

    #[test]
    fn test_paar_trennzeichen_varianten() {
        for text in ["1.5u 1u", "1.5u x 1u", "1.5u × 1u"] {
            let (w, h) = parse_unit_pair(text).unwrap();
            assert_relative_eq!(w, 1.5 * UNIT_MM);
            assert_relative_eq!(h, UNIT_MM);
        }
    }

    #[test]
    fn test_paar_millimeter() {
        let (w, h) = parse_unit_pair("30mm 20mm").unwrap();
        assert_relative_eq!(w, 30.0);
        assert_relative_eq!(h, 20.0);
    }

    #[test]
    fn test_paar_ungueltig() {
        assert_eq!(parse_unit_pair(""), None);
        assert_eq!(parse_unit_pair("abc"), None);
        assert_eq!(parse_unit_pair("0u"), None);
    }

    #[test]
    fn test_einzelwert() {
        assert_relative_eq!(parse_unit_value("1u", Some("u")).unwrap(), UNIT_MM);
        assert_relative_eq!(parse_unit_value("19.05mm", Some("u")).unwrap(), 19.05);
        // Explizite Einheit schlägt die Default-Einheit
        assert_relative_eq!(parse_unit_value("10mm", Some("u")).unwrap(), 10.0);
        assert_eq!(parse_unit_value("", Some("u")), None);
        assert_eq!(parse_unit_value("0u", Some("u")), None);
    }

    #[test]
    fn test_quantisierung() {
        assert_relative_eq!(quantize_dim_mm(1.2 * UNIT_MM), 1.25 * UNIT_MM);
        assert_relative_eq!(quantize_dim_mm(1.6 * UNIT_MM), 1.5 * UNIT_MM);
        assert_relative_eq!(quantize_dim_mm(2.1 * UNIT_MM), 2.0 * UNIT_MM);
        assert_relative_eq!(quantize_dim_mm(1.5 * UNIT_MM), 1.5 * UNIT_MM);
    }

    #[test]
    fn test_quantisierung_klemmt_auf_minimum() {
        assert_relative_eq!(quantize_dim_mm(0.5 * UNIT_MM), UNIT_MM);
        assert_relative_eq!(quantize_dim_mm(0.0), UNIT_MM);
        assert_relative_eq!(quantize_dim_mm(-10.0), UNIT_MM);
        assert_relative_eq!(quantize_dim_mm(f64::NAN), UNIT_MM);
    }
}
