//! Integrationstests für die Zeilen-Layout-Pipeline:
//! - Endlagen, Grundlinie und Anker-Garantien
//! - beide Lösungspfade (direkt und virtuelle Endkappen)
//! - Determinismus und Fehlerpfade

use glam::DVec2;
use keyboard_grinner_engine::{
    solve_row, AngleProfile, LayoutError, RowConfig, Slot, SolvedSlot, UNIT_MM,
};

/// Schaltet Engine-Logs für Testläufe frei (RUST_LOG=debug).
fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Zeile aus `n` kanonischen 1u-Slots; Slot 0 liegt am Ursprung, die
/// restlichen Anker sind Platzhalter (nur Slot 0 verankert die Zeile).
fn unit_row(n: usize) -> Vec<Slot> {
    (0..n)
        .map(|i| Slot::unit(DVec2::new(i as f64 * UNIT_MM, 0.0)))
        .collect()
}

fn cosine_config(sag_mm: f64, end_flat: u8) -> RowConfig {
    RowConfig {
        sag_mm,
        end_flat,
        angle_profile: AngleProfile::Cosine,
        use_asymmetric_curve: false,
    }
}

fn spacings(solved: &[SolvedSlot]) -> Vec<f64> {
    solved
        .windows(2)
        .map(|pair| (pair[1].center - pair[0].center).length())
        .collect()
}

// ─── Direkter Pfad (end_flat ≥ 1) ────────────────────────────────────────────

#[test]
fn test_fuenf_1u_slots_standardszenario() {
    init_test_logging();
    let slots = unit_row(5);
    let solved = solve_row(&slots, &cosine_config(20.0, 1)).expect("Layout muss lösbar sein");
    assert_eq!(solved.len(), 5);

    // Flat-Enden und ValleyFlat-Scheitel liegen horizontal
    assert!(solved[0].angle_deg.abs() < 1e-9);
    assert!(solved[2].angle_deg.abs() < 1e-9);
    assert!(solved[4].angle_deg.abs() < 1e-9);
    // Flanken sind gedreht: links fallend, rechts steigend (Board-Winkel)
    assert!(solved[1].angle_deg != 0.0);
    assert!(solved[3].angle_deg != 0.0);

    // Grundlinie: beide Enden auf gleichem Y
    assert!((solved[0].center.y - solved[4].center.y).abs() < 1e-9);

    // Slot 0 exakt auf seinem Anker
    assert!((solved[0].center - DVec2::ZERO).length() < 1e-9);

    // Zentren wandern monoton nach rechts
    for pair in solved.windows(2) {
        assert!(pair[1].center.x > pair[0].center.x);
    }
}

#[test]
fn test_slots_haengen_im_board_frame_nach_unten() {
    let slots = unit_row(5);
    let solved = solve_row(&slots, &cosine_config(20.0, 1)).unwrap();
    // Board-Frame zählt Y nach unten: der Scheitel hat das größte Y
    assert!(solved[2].center.y > solved[0].center.y);
    assert!(solved[2].center.y > solved[4].center.y);
}

#[test]
fn test_flacher_durchhang_haelt_sollabstand() {
    // Bei kleinem Sag sind die Drehwinkel klein und der Zentrenabstand
    // bleibt nahe am Soll von 1u.
    let slots = unit_row(5);
    let solved = solve_row(&slots, &cosine_config(5.0, 1)).unwrap();
    for (i, dist) in spacings(&solved).iter().enumerate() {
        assert!(
            (dist - UNIT_MM).abs() <= 0.06 * UNIT_MM,
            "Abstand {} weicht zu stark ab: {:.3}mm",
            i,
            dist
        );
    }
}

#[test]
fn test_tiefer_durchhang_abstaende_begrenzt() {
    // Auch bei tiefem Sag: vorwärts, nie zu dicht, nie grotesk weit.
    let slots = unit_row(5);
    let solved = solve_row(&slots, &cosine_config(20.0, 1)).unwrap();
    for dist in spacings(&solved) {
        assert!(dist >= 0.6 * UNIT_MM);
        assert!(dist <= 1.5 * UNIT_MM);
    }
}

#[test]
fn test_gerade_anzahl_mit_tal_paar() {
    let slots = unit_row(6);
    let solved = solve_row(&slots, &cosine_config(15.0, 1)).unwrap();
    assert_eq!(solved.len(), 6);
    // ValleyUpper-Paar um die Mitte ist gedreht, die Flat-Enden nicht
    assert!(solved[0].angle_deg.abs() < 1e-9);
    assert!(solved[5].angle_deg.abs() < 1e-9);
    assert!(solved[2].angle_deg != 0.0);
    assert!(solved[3].angle_deg != 0.0);
    // Tal-Paar spiegelt sich ungefähr (Kurve ist symmetrisch)
    assert!((solved[2].angle_deg + solved[3].angle_deg).abs() < 1.0);
}

#[test]
fn test_breiter_linker_endslot_asymmetrie_aendert_layout() {
    let mut slots = unit_row(5);
    slots[0].width_mm = 1.75 * UNIT_MM;

    let symmetric = solve_row(&slots, &cosine_config(20.0, 1)).unwrap();
    let mut config = cosine_config(20.0, 1);
    config.use_asymmetric_curve = true;
    let asymmetric = solve_row(&slots, &config).unwrap();

    // Beide Varianten verankern Slot 0 exakt
    assert!((symmetric[0].center - DVec2::ZERO).length() < 1e-9);
    assert!((asymmetric[0].center - DVec2::ZERO).length() < 1e-9);

    // Die asymmetrische Kurve verschiebt die inneren Slots messbar
    let moved = symmetric
        .iter()
        .zip(&asymmetric)
        .skip(1)
        .any(|(s, a)| (s.center - a.center).length() > 1e-3);
    assert!(moved, "Asymmetrie-Flag muss das Ergebnis ändern");
}

#[test]
fn test_anker_verschiebt_die_ganze_zeile() {
    let base = solve_row(&unit_row(4), &cosine_config(12.0, 1)).unwrap();

    let anchor = DVec2::new(250.0, 80.0);
    let mut moved_slots = unit_row(4);
    moved_slots[0].original_anchor = anchor;
    let moved = solve_row(&moved_slots, &cosine_config(12.0, 1)).unwrap();

    assert!((moved[0].center - anchor).length() < 1e-9);
    for (b, m) in base.iter().zip(&moved) {
        // Reine Translation bis auf Abtast-Quantisierung der Bogenlängen-Tabelle
        assert!(((m.center - anchor) - (b.center - DVec2::ZERO)).length() < 0.1);
        assert!((b.angle_deg - m.angle_deg).abs() < 0.5);
    }
}

// ─── Endkappen-Pfad (end_flat == 0) ──────────────────────────────────────────

#[test]
fn test_endkappen_pfad_grundgeruest() {
    let slots = unit_row(4);
    let solved = solve_row(&slots, &cosine_config(15.0, 0)).unwrap();
    assert_eq!(solved.len(), 4);

    // Slot 0 exakt auf dem Anker, letzter Slot auf der Grundlinie
    assert!((solved[0].center - DVec2::ZERO).length() < 1e-9);
    assert!((solved[3].center.y - solved[0].center.y).abs() < 1e-9);

    for pair in solved.windows(2) {
        assert!(pair[1].center.x > pair[0].center.x);
    }
}

#[test]
fn test_endkappen_pfad_enden_gedreht() {
    // Ohne flache Enden tragen die Randslots die (gedämpfte) Tangente
    let slots = unit_row(5);
    let solved = solve_row(&slots, &cosine_config(20.0, 0)).unwrap();
    assert!(solved[0].angle_deg != 0.0);
    assert!(solved[4].angle_deg != 0.0);
    // Scheitel bleibt flach (ValleyFlat)
    assert!(solved[2].angle_deg.abs() < 1e-9);
}

// ─── Determinismus und Fehler ────────────────────────────────────────────────

#[test]
fn test_determinismus_bitidentisch() {
    let slots = unit_row(7);
    let config = RowConfig {
        sag_mm: 18.0,
        end_flat: 2,
        angle_profile: AngleProfile::Quadratic,
        use_asymmetric_curve: true,
    };
    let first = solve_row(&slots, &config).unwrap();
    let second = solve_row(&slots, &config).unwrap();
    // Exakte Float-Gleichheit: keine Caches, kein Zufall
    assert_eq!(first, second);
}

#[test]
fn test_einzelner_slot_wird_abgelehnt() {
    let result = solve_row(&unit_row(1), &cosine_config(20.0, 1));
    assert_eq!(result, Err(LayoutError::InsufficientSlots(1)));
}

#[test]
fn test_ungueltige_hoehe_wird_abgelehnt() {
    let mut slots = unit_row(3);
    slots[2].height_mm = -1.0;
    assert!(matches!(
        solve_row(&slots, &cosine_config(20.0, 1)),
        Err(LayoutError::InvalidDimension { index: 2, .. })
    ));
}

#[test]
fn test_sag_null_bleibt_gerade() {
    let slots = unit_row(5);
    let solved = solve_row(&slots, &cosine_config(0.0, 1)).unwrap();
    for slot in &solved {
        assert!(slot.angle_deg.abs() < 1e-9, "Winkel muss 0 sein: {:?}", slot);
        assert!(slot.center.y.abs() < 1e-9);
    }
    for dist in spacings(&solved) {
        assert!((dist - UNIT_MM).abs() < 1e-6);
    }
}
