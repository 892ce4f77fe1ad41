//! Persistenz-Kollaborateur: Parameter-Datensatz und Attribut-Store.
//!
//! Die Engine selbst persistiert nichts. Dieses Modul bildet die
//! Host-Seite ab: ein JSON-Datensatz pro Zeile, abgelegt in einem benannten
//! Textfeld des ersten Footprints.

pub mod record;
pub mod store;

pub use record::{RowRecord, RECORD_VERSION};
pub use store::{
    find_saved_rows, known_members, natural_key, save_row_record, sort_references_naturally,
    AttributeStore, MemoryAttributeStore, NaturalPart, ROW_FIELD_NAME,
};
