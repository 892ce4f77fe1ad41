//! Strukturrollen der Slots einer Zeile.
//!
//! Die Rolle eines Slots bestimmt, ob er horizontal geklemmt wird
//! (Flat/ValleyFlat) und über welches Eckenpaar er seinen Nachbarn berührt.

use serde::{Deserialize, Serialize};

/// Strukturrolle eines Slots in der Zeile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Regulärer Slot auf der Kurvenflanke, Kontakt über untere Ecken.
    Lower,
    /// Innerster Nicht-Flat-Slot einer Seite, Kontakt über obere Ecken.
    Upper,
    /// Erzwungen horizontaler Slot am Zeilenende.
    Flat,
    /// Einzelner Scheitel-Slot bei ungerader Slot-Anzahl, horizontal.
    ValleyFlat,
    /// Scheitel-Paar bei gerader Slot-Anzahl.
    ValleyUpper,
}

impl Category {
    /// Flache Slots liegen horizontal (Winkel 0).
    pub fn is_flat(self) -> bool {
        matches!(self, Category::Flat | Category::ValleyFlat)
    }
}

/// Über welches Eckenpaar sich zwei benachbarte Slots berühren.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMode {
    Upper,
    Lower,
}

/// Weist jedem Slot-Index seine Strukturrolle zu.
///
/// Der Scheitel bekommt bei ungerader Anzahl einen ValleyFlat-Slot, bei
/// gerader ein ValleyUpper-Paar. Auf jeder Seite werden, vom Zeilenende nach
/// innen, bis zu `end_flat` Slots als Flat markiert; der danach innerste noch
/// reguläre Slot jeder Seite wird Upper, der Rest bleibt Lower.
///
/// `count == 0` liefert eine leere Liste, `count == 1` nur den
/// ValleyFlat-Scheitel.
pub fn assign_categories(count: usize, end_flat: u8) -> Vec<Category> {
    if count == 0 {
        return Vec::new();
    }
    let mut categories = vec![Category::Lower; count];

    let (left_end, right_start) = if count % 2 == 1 {
        let center = count / 2;
        categories[center] = Category::ValleyFlat;
        (center, center + 1)
    } else {
        let center_left = count / 2 - 1;
        let center_right = count / 2;
        categories[center_left] = Category::ValleyUpper;
        categories[center_right] = Category::ValleyUpper;
        (center_left, center_right + 1)
    };

    mark_flats(&mut categories, 0..left_end, end_flat);
    mark_flats(&mut categories, (right_start..count).rev(), end_flat);

    // Innerster regulärer Slot jeder Seite wird Upper.
    let left_innermost = (0..left_end)
        .filter(|&i| categories[i] == Category::Lower)
        .next_back();
    if let Some(innermost) = left_innermost {
        categories[innermost] = Category::Upper;
    }
    let right_innermost = (right_start..count).find(|&i| categories[i] == Category::Lower);
    if let Some(innermost) = right_innermost {
        categories[innermost] = Category::Upper;
    }

    categories
}

/// Markiert entlang `indices` (Zeilenende zuerst) bis zu `end_flat` noch
/// reguläre Slots als Flat.
fn mark_flats(categories: &mut [Category], indices: impl Iterator<Item = usize>, end_flat: u8) {
    let mut remaining = end_flat;
    if remaining == 0 {
        return;
    }
    for idx in indices {
        if categories[idx] != Category::Lower {
            continue;
        }
        categories[idx] = Category::Flat;
        remaining -= 1;
        if remaining == 0 {
            break;
        }
    }
}

/// Kontaktmodus zweier benachbarter Slots aus ihren Rollen.
///
/// ValleyFlat erzwingt oberen Kontakt, danach erzwingt Flat unteren Kontakt,
/// danach erzwingen Upper/ValleyUpper oberen; übrig bleibt unterer Kontakt.
pub fn contact_mode(prev: Category, curr: Category) -> ContactMode {
    use Category::*;
    if prev == ValleyFlat || curr == ValleyFlat {
        return ContactMode::Upper;
    }
    if prev == Flat || curr == Flat {
        return ContactMode::Lower;
    }
    if matches!(prev, Upper | ValleyUpper) || matches!(curr, Upper | ValleyUpper) {
        return ContactMode::Upper;
    }
    ContactMode::Lower
}
