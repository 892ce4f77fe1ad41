//! Benannter Attribut-Store des Hosts und Zeilen-Registry darüber.
//!
//! Der CAD-Host hält pro Footprint benannte Textfelder. Statt die Host-API
//! direkt anzusprechen, arbeitet der Persistenz-Kollaborateur gegen die
//! schmale [`AttributeStore`]-Schnittstelle — die Engine berührt sie nie.

use anyhow::Context;
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use crate::persist::record::RowRecord;

/// Name des Host-Textfelds, in dem der Zeilen-Datensatz liegt.
pub const ROW_FIELD_NAME: &str = "grinner_params";

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("statisches Muster"));

/// Abstraktion über die benannten Textfelder des CAD-Hosts.
pub trait AttributeStore {
    /// Liest ein benanntes Textfeld eines Eigentümers (Footprint-Referenz).
    fn get(&self, owner: &str, name: &str) -> Option<String>;
    /// Schreibt ein benanntes Textfeld.
    fn set(&mut self, owner: &str, name: &str, value: &str);
    /// Alle bekannten Eigentümer in deterministischer Reihenfolge.
    fn owners(&self) -> Vec<String>;
}

/// In-Memory-Store für Tests und Hosts ohne eigenes Feldmodell.
/// `IndexMap` hält die Eigentümer-Reihenfolge deterministisch.
#[derive(Debug, Default, Clone)]
pub struct MemoryAttributeStore {
    fields: IndexMap<String, IndexMap<String, String>>,
}

impl MemoryAttributeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legt einen Eigentümer ohne Felder an (entspricht einem Footprint ohne
    /// gespeicherte Parameter).
    pub fn register_owner(&mut self, owner: &str) {
        self.fields.entry(owner.to_string()).or_default();
    }
}

impl AttributeStore for MemoryAttributeStore {
    fn get(&self, owner: &str, name: &str) -> Option<String> {
        self.fields.get(owner)?.get(name).cloned()
    }

    fn set(&mut self, owner: &str, name: &str, value: &str) {
        self.fields
            .entry(owner.to_string())
            .or_default()
            .insert(name.to_string(), value.to_string());
    }

    fn owners(&self) -> Vec<String> {
        self.fields.keys().cloned().collect()
    }
}

/// Speichert den Datensatz einer Zeile im Textfeld ihres ersten Footprints.
pub fn save_row_record(store: &mut dyn AttributeStore, record: &RowRecord) -> anyhow::Result<()> {
    let first = record
        .footprints
        .first()
        .context("Zeilen-Datensatz ohne Footprints")?;
    let json = serde_json::to_string(record)?;
    store.set(first, ROW_FIELD_NAME, &json);
    log::info!(
        "Zeilen-Parameter gespeichert an {} ({} Footprints)",
        first,
        record.footprints.len()
    );
    Ok(())
}

/// Sucht alle gespeicherten Zeilen-Datensätze im Store.
///
/// Unlesbare Felder werden mit Warnung übersprungen statt den Aufrufer
/// scheitern zu lassen — eine kaputte Zeile darf die übrigen nicht blockieren.
pub fn find_saved_rows(store: &dyn AttributeStore) -> Vec<RowRecord> {
    let mut rows = Vec::new();
    for owner in store.owners() {
        let Some(text) = store.get(&owner, ROW_FIELD_NAME) else {
            continue;
        };
        match serde_json::from_str::<RowRecord>(&text) {
            Ok(record) => rows.push(record),
            Err(e) => log::warn!("Zeilen-Datensatz an {} unlesbar: {}", owner, e),
        }
    }
    rows
}

/// Referenzen eines Datensatzes, die der Store tatsächlich kennt, in
/// Datensatz-Reihenfolge.
pub fn known_members(store: &dyn AttributeStore, record: &RowRecord) -> Vec<String> {
    let owners = store.owners();
    record
        .footprints
        .iter()
        .filter(|reference| owners.iter().any(|o| o == *reference))
        .cloned()
        .collect()
}

/// Bestandteil eines natürlichen Sortierschlüssels.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum NaturalPart {
    /// Ziffernläufe vergleichen als Zahl.
    Number(u64),
    /// Alles andere vergleicht als Text.
    Text(String),
}

/// Natürlicher Sortierschlüssel für Referenzen: "SW2" < "SW10".
pub fn natural_key(reference: &str) -> Vec<NaturalPart> {
    let mut parts = Vec::new();
    let mut last = 0;
    for m in NUMBER_RE.find_iter(reference) {
        if m.start() > last {
            parts.push(NaturalPart::Text(reference[last..m.start()].to_string()));
        }
        match m.as_str().parse::<u64>() {
            Ok(n) => parts.push(NaturalPart::Number(n)),
            // Ziffernlauf jenseits von u64: als Text vergleichen
            Err(_) => parts.push(NaturalPart::Text(m.as_str().to_string())),
        }
        last = m.end();
    }
    if last < reference.len() {
        parts.push(NaturalPart::Text(reference[last..].to_string()));
    }
    parts
}

/// Sortiert Referenzen natürlich (numerische Teile als Zahlen, stabil).
pub fn sort_references_naturally(references: &mut [String]) {
    references.sort_by_key(|reference| natural_key(reference));
}
