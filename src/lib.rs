//! FRLG Dex
//!
//! A Pokemon Fire Red / Leaf Green reference library: Generation 3 type matchups,
//! weakness summaries, move categories, team coverage analysis and upstream lookups
//! against PokeAPI, filtered to what the Generation 3 games actually contain.

// --- MODULE DECLARATIONS ---
pub mod category;
pub mod config;
pub mod defense;
pub mod dex;
pub mod errors;
pub mod frlg_data;
pub mod logging;
pub mod mcp_interface;
pub mod team;
pub mod transform;
pub mod type_chart;
pub mod upstream;

#[cfg(test)]
mod tests;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{MachineEntry, MachineKind, MoveCategory, PokemonType, TutorEntry};

// --- From this crate's modules (`src/`) ---

// Pure chart and category functions.
pub use category::{category_for, category_for_label};
pub use defense::{classify, compute_chart, compute_chart_from_labels, DefensiveChart, WeaknessSummary};
pub use team::{analyse_team, TeamAnalysis, TeamMember, TeamVulnerabilityRow};

// Service layer and upstream access.
pub use config::DexConfig;
pub use dex::Dex;
pub use upstream::{DexSource, PokeApiClient};

// Crate-specific error and result types.
pub use errors::{ConfigError, DexError, DexResult, ValidationError};
