//! Defensive type charts and the exact-match weakness classifier.

use crate::errors::ValidationError;
use crate::type_chart::type_chart;
use schema::PokemonType;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use tracing::warn;

/// Combined multiplier of every attacking type against one defending type set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefensiveChart {
    multipliers: [f32; PokemonType::COUNT],
}

impl DefensiveChart {
    /// A chart where every attacking type is neutral.
    pub fn neutral() -> Self {
        Self {
            multipliers: [1.0; PokemonType::COUNT],
        }
    }

    pub fn multiplier(&self, attacking: PokemonType) -> f32 {
        self.multipliers[attacking.index()]
    }

    /// `(attacking type, multiplier)` pairs in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (PokemonType, f32)> + '_ {
        PokemonType::ALL
            .iter()
            .map(move |&t| (t, self.multipliers[t.index()]))
    }
}

impl Serialize for DefensiveChart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PokemonType::COUNT))?;
        for (attacking, multiplier) in self.iter() {
            map.serialize_entry(attacking.name(), &multiplier)?;
        }
        map.end()
    }
}

/// Computes the defensive chart for a creature with the given types.
///
/// Each attacking type starts at 1 and is multiplied by the table entry against every
/// defending type; undefined entries leave it unchanged. Type order does not matter.
pub fn compute_chart(defending: &[PokemonType]) -> DefensiveChart {
    let chart = type_chart();
    let mut result = DefensiveChart::neutral();
    for attacking in PokemonType::ALL {
        result.multipliers[attacking.index()] = defending
            .iter()
            .map(|&d| chart.effectiveness(attacking, d))
            .product();
    }
    result
}

/// Computes a chart from type labels as the upstream source spells them.
///
/// An unrecognised label contributes nothing (every attacking type stays neutral for
/// that slot). Upstream data from later generations can carry types such as "fairy"
/// that did not exist in Generation 3; those are skipped rather than failing the
/// lookup. Use [`parse_types`] where labels come from a user instead.
pub fn compute_chart_from_labels<S: AsRef<str>>(labels: &[S]) -> DefensiveChart {
    let types: Vec<PokemonType> = labels
        .iter()
        .filter_map(|label| {
            let label = label.as_ref();
            let parsed = PokemonType::from_label(label);
            if parsed.is_none() {
                warn!(label, "unrecognised type label treated as neutral");
            }
            parsed
        })
        .collect();
    compute_chart(&types)
}

/// Strictly parses a user-supplied list of one or two type labels.
pub fn parse_types<S: AsRef<str>>(labels: &[S]) -> Result<Vec<PokemonType>, ValidationError> {
    if labels.is_empty() || labels.len() > 2 {
        return Err(ValidationError::TypeCount(labels.len()));
    }
    labels
        .iter()
        .map(|label| {
            PokemonType::from_label(label.as_ref())
                .ok_or_else(|| ValidationError::UnknownType(label.as_ref().to_string()))
        })
        .collect()
}

/// A defensive chart partitioned into qualitative buckets.
///
/// Each bucket lists types in enumeration order; neutral types appear in none.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaknessSummary {
    pub immune: Vec<PokemonType>,
    pub quad_weak: Vec<PokemonType>,
    pub weak: Vec<PokemonType>,
    pub resistant: Vec<PokemonType>,
    pub quad_resistant: Vec<PokemonType>,
}

impl WeaknessSummary {
    /// All bucketed types with the multiplier their bucket stands for.
    pub fn buckets(&self) -> [(&'static str, f32, &[PokemonType]); 5] {
        [
            ("Immune", 0.0, &self.immune),
            ("4x weak", 4.0, &self.quad_weak),
            ("2x weak", 2.0, &self.weak),
            ("Resists", 0.5, &self.resistant),
            ("4x resists", 0.25, &self.quad_resistant),
        ]
    }
}

/// Buckets a chart by exact multiplier: 0 immune, 4 quad-weak, 2 weak, 0.5 resistant,
/// 0.25 quad-resistant. Any other value lands in no bucket.
///
/// Single-creature display only. Team aggregation uses the coarser ranges in
/// [`crate::team::tally_vulnerabilities`].
pub fn classify(chart: &DefensiveChart) -> WeaknessSummary {
    let mut summary = WeaknessSummary::default();
    for (attacking, multiplier) in chart.iter() {
        let bucket = if multiplier == 0.0 {
            &mut summary.immune
        } else if multiplier == 4.0 {
            &mut summary.quad_weak
        } else if multiplier == 2.0 {
            &mut summary.weak
        } else if multiplier == 0.5 {
            &mut summary.resistant
        } else if multiplier == 0.25 {
            &mut summary.quad_resistant
        } else {
            continue;
        };
        bucket.push(attacking);
    }
    summary
}

impl fmt::Display for WeaknessSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 11;
        let mut any = false;
        for (label, _, types) in self.buckets() {
            if types.is_empty() {
                continue;
            }
            let names: Vec<&str> = types.iter().map(|t| t.name()).collect();
            writeln!(f, "{:<LABEL_WIDTH$} : {}", label, names.join(", "))?;
            any = true;
        }
        if !any {
            writeln!(f, "Neutral to every type")?;
        }
        Ok(())
    }
}
