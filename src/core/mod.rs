//! Kern der Layout-Engine: Kategorien, Winkel, Kontakt-Solver und Pipeline.

pub mod angles;
pub mod category;
pub mod contact;
pub mod error;
pub mod finishing;
pub mod row;

pub use angles::{angle_profile_factor, angles_from_tangents, AngleProfile, ROT_OFFSET_DEG};
pub use category::{assign_categories, contact_mode, Category, ContactMode};
pub use contact::{apply_corner_contact, place_with_corner_contact};
pub use error::LayoutError;
pub use finishing::{apply_end_width_corrections, apply_flat_baseline, apply_origin_anchor};
pub use row::{solve_row, RowConfig, Slot, SolvedSlot, MAX_END_FLAT};
