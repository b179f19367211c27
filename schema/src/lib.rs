// FRLG Dex Schema - Shared type definitions
// This crate contains the core enums and table shapes that are shared between
// the frlg-dex crate and its build script, so the RON data files can be
// validated and compiled into postcard blobs at build time.

// Re-export the main types
pub use chart_data::*;
pub use move_types::*;
pub use pokemon_types::*;

pub mod chart_data;
pub mod move_types;
pub mod pokemon_types;
