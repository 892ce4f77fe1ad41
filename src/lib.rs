//! Keyboard-Grinner Layout-Engine.
//!
//! Platziert eine geordnete Zeile rechteckiger Key-Slots entlang einer
//! durchhängenden kubischen Bézier-Kurve, so dass benachbarte Rechtecke sich
//! am korrekten Eckenpaar berühren ("Grin"-Layout). Reine Rechen-Library ohne
//! Host-Anbindung: der CAD-Host liefert Slot-Abmessungen und Anker, die
//! Engine liefert Zentren und Winkel zurück.

pub mod core;
pub mod persist;
pub mod shared;

pub use core::{
    angle_profile_factor, assign_categories, contact_mode, solve_row, AngleProfile, Category,
    ContactMode, LayoutError, RowConfig, Slot, SolvedSlot,
};
pub use persist::{
    find_saved_rows, known_members, natural_key, save_row_record, sort_references_naturally,
    AttributeStore, MemoryAttributeStore, RowRecord, ROW_FIELD_NAME,
};
pub use shared::{board_to_math, math_to_board, CubicBezier, GrinnerOptions, UNIT_MM};
