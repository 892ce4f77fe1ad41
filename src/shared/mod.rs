//! Layer-neutrale Geometrie, Einheiten und Host-Optionen.
//!
//! Enthält reine Funktionen und Typen ohne Abhängigkeit auf die
//! Engine-Pipeline, damit `core`, `persist` und Host-Code sie gemeinsam
//! nutzen können.

pub mod bezier;
pub mod frame;
pub mod options;
pub mod units;

pub use bezier::{CubicBezier, ARC_LENGTH_SAMPLES, ASYMMETRY_SHIFT_FACTOR};
pub use frame::{board_to_math, corner_point, lower_upper_corners, math_to_board, Corner};
pub use options::GrinnerOptions;
pub use units::{convert_unit_token, parse_unit_pair, parse_unit_value, quantize_dim_mm, UNIT_MM};
