//! Logic shared by more than one format bridge.

pub mod flat_to_nested;
pub mod text;
