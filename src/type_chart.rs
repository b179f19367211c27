//! The Generation 3 type chart and physical/special partition.
//!
//! Both tables are authored in `data/`, validated and serialized by `build.rs`, and
//! decoded once on first use. They are never mutated afterwards.

use schema::{CategorySplit, MoveCategory, PokemonType, TypeChartData};
use std::sync::LazyLock;

const N: usize = PokemonType::COUNT;

static TYPE_CHART: LazyLock<TypeChart> = LazyLock::new(|| {
    let data: TypeChartData =
        postcard::from_bytes(include_bytes!(concat!(env!("OUT_DIR"), "/type_chart.bin")))
            .expect("type chart blob is produced and validated by build.rs");
    TypeChart::from_data(&data)
});

static CATEGORY_SPLIT: LazyLock<CategorySplit> = LazyLock::new(|| {
    postcard::from_bytes(include_bytes!(concat!(env!("OUT_DIR"), "/gen3_categories.bin")))
        .expect("category blob is produced and validated by build.rs")
});

/// Dense attacking x defending lookup. `None` marks a pair the source table leaves
/// undefined, which callers treat as neutral.
#[derive(Debug, Clone)]
pub struct TypeChart {
    cells: [[Option<f32>; N]; N],
}

impl TypeChart {
    pub fn from_data(data: &TypeChartData) -> Self {
        let mut cells = [[None; N]; N];
        for row in &data.rows {
            for &(defending, multiplier) in &row.against {
                cells[row.attacking.index()][defending.index()] = Some(multiplier);
            }
        }
        Self { cells }
    }

    /// The table entry for a single matchup, if the table defines one.
    pub fn lookup(&self, attacking: PokemonType, defending: PokemonType) -> Option<f32> {
        self.cells[attacking.index()][defending.index()]
    }

    /// Multiplier for a single matchup, neutral when undefined.
    pub fn effectiveness(&self, attacking: PokemonType, defending: PokemonType) -> f32 {
        self.lookup(attacking, defending).unwrap_or(1.0)
    }
}

/// The process-wide Generation 3 type chart.
pub fn type_chart() -> &'static TypeChart {
    &TYPE_CHART
}

/// The process-wide physical/special partition.
pub fn category_split() -> &'static CategorySplit {
    &CATEGORY_SPLIT
}

/// Physical or Special for a damaging move of `move_type`, `Unknown` when the type is
/// in neither partition.
pub fn damage_category(move_type: PokemonType) -> MoveCategory {
    let split = category_split();
    if split.physical_types.contains(&move_type) {
        MoveCategory::Physical
    } else if split.special_types.contains(&move_type) {
        MoveCategory::Special
    } else {
        MoveCategory::Unknown
    }
}
