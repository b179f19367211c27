use crate::PokemonType;
use serde::{Deserialize, Serialize};

/// The non-neutral multipliers of one attacking type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRow {
    pub attacking: PokemonType,
    pub against: Vec<(PokemonType, f32)>, // defending type -> multiplier
}

/// Attacking -> defending -> multiplier table as authored in `data/type_chart.ron`.
/// Pairs that are not listed are neutral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeChartData {
    pub rows: Vec<AttackRow>,
}

/// Generation 3 decides a move's category from its type alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySplit {
    pub physical_types: Vec<PokemonType>,
    pub special_types: Vec<PokemonType>,
}

/// Egg group API name with its in-game display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggGroupName {
    pub name: String,
    pub display_name: String,
}

/// Multipliers a single type matchup may take in the source table.
pub const ALLOWED_MULTIPLIERS: [f32; 4] = [0.0, 0.5, 1.0, 2.0];

impl TypeChartData {
    /// Checks the invariants the lookup table relies on: each attacking type has at
    /// most one row, each row at most one entry per defending type, and every
    /// multiplier is one of [`ALLOWED_MULTIPLIERS`].
    pub fn validate(&self) -> Result<(), String> {
        let mut seen_rows = [false; PokemonType::COUNT];
        for row in &self.rows {
            if std::mem::replace(&mut seen_rows[row.attacking.index()], true) {
                return Err(format!("duplicate row for attacking type {}", row.attacking));
            }
            let mut seen = [false; PokemonType::COUNT];
            for (defending, multiplier) in &row.against {
                if std::mem::replace(&mut seen[defending.index()], true) {
                    return Err(format!(
                        "duplicate entry {} -> {}",
                        row.attacking, defending
                    ));
                }
                if !ALLOWED_MULTIPLIERS.contains(multiplier) {
                    return Err(format!(
                        "multiplier {} for {} -> {} is not one of {:?}",
                        multiplier, row.attacking, defending, ALLOWED_MULTIPLIERS
                    ));
                }
            }
        }
        Ok(())
    }
}

impl CategorySplit {
    /// Every type must sit in exactly one of the two partitions.
    pub fn validate(&self) -> Result<(), String> {
        for t in PokemonType::ALL {
            let physical = self.physical_types.contains(&t);
            let special = self.special_types.contains(&t);
            match (physical, special) {
                (true, true) => return Err(format!("{} is both physical and special", t)),
                (false, false) => return Err(format!("{} has no category", t)),
                _ => {}
            }
        }
        Ok(())
    }
}
