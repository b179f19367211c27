//! Team coverage analysis: resolves up to six party members concurrently and counts,
//! per attacking type, how many of them are weak to it, resist it or are immune.

use crate::defense::{classify, compute_chart_from_labels, DefensiveChart, WeaknessSummary};
use crate::errors::{DexResult, ValidationError};
use crate::transform::extract_types;
use crate::upstream::DexSource;
use futures::future::join_all;
use schema::PokemonType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

pub const MAX_TEAM_SIZE: usize = 6;

/// A weak count at or above this, with nobody immune, marks a coverage gap.
pub const GAP_THRESHOLD: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMember {
    /// 1-based position in the submitted team
    pub slot: usize,
    pub name: String,
    pub types: Vec<String>,
    pub sprite: Option<String>,
    pub chart: DefensiveChart,
    pub summary: WeaknessSummary,
}

/// A team slot whose identifier could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotError {
    pub slot: usize,
    pub identifier: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamVulnerabilityRow {
    pub weak_count: u8,
    pub resist_count: u8,
    pub immune_count: u8,
}

impl TeamVulnerabilityRow {
    pub fn is_gap(&self) -> bool {
        self.weak_count >= GAP_THRESHOLD && self.immune_count == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAnalysis {
    pub members: Vec<TeamMember>,
    pub errors: Vec<SlotError>,
    pub team_vulnerabilities: BTreeMap<PokemonType, TeamVulnerabilityRow>,
    pub coverage_gaps: Vec<PokemonType>,
}

/// Checks the team size. Runs before any upstream call.
pub fn validate_team<S: AsRef<str>>(identifiers: &[S]) -> Result<(), ValidationError> {
    if identifiers.is_empty() {
        return Err(ValidationError::EmptyTeam { max: MAX_TEAM_SIZE });
    }
    if identifiers.len() > MAX_TEAM_SIZE {
        return Err(ValidationError::TeamTooLarge {
            max: MAX_TEAM_SIZE,
            got: identifiers.len(),
        });
    }
    Ok(())
}

/// Range-based tally over member charts: exactly 0 counts as immune, 2 or more as
/// weak, 0.5 or less as resisted, 1 as nothing.
///
/// Coarser than [`classify`]: a 4x weakness is a single weak count here.
pub fn tally_vulnerabilities(charts: &[DefensiveChart]) -> BTreeMap<PokemonType, TeamVulnerabilityRow> {
    PokemonType::ALL
        .iter()
        .map(|&attacking| {
            let mut row = TeamVulnerabilityRow::default();
            for chart in charts {
                let multiplier = chart.multiplier(attacking);
                if multiplier == 0.0 {
                    row.immune_count += 1;
                } else if multiplier >= 2.0 {
                    row.weak_count += 1;
                } else if multiplier <= 0.5 {
                    row.resist_count += 1;
                }
            }
            (attacking, row)
        })
        .collect()
}

/// Attacking types, in enumeration order, that three or more members are weak to and
/// none is immune to.
pub fn coverage_gaps(rows: &BTreeMap<PokemonType, TeamVulnerabilityRow>) -> Vec<PokemonType> {
    rows.iter()
        .filter(|(_, row)| row.is_gap())
        .map(|(&attacking, _)| attacking)
        .collect()
}

/// Resolves every non-blank identifier concurrently and aggregates the team's
/// defensive coverage.
///
/// Fails only on an invalid team size. A slot that cannot be resolved (unknown name,
/// upstream outage, malformed identifier) becomes a [`SlotError`] and the remaining
/// members are still analysed. Blank entries are empty slots and are skipped, but the
/// other entries keep their 1-based slot numbers.
pub async fn analyse_team<S, I>(source: &S, identifiers: &[I]) -> DexResult<TeamAnalysis>
where
    S: DexSource + ?Sized,
    I: AsRef<str>,
{
    validate_team(identifiers)?;

    let slots: Vec<(usize, &str)> = identifiers
        .iter()
        .enumerate()
        .map(|(i, id)| (i + 1, id.as_ref().trim()))
        .filter(|(_, id)| !id.is_empty())
        .collect();
    if slots.is_empty() {
        return Err(ValidationError::EmptyTeam { max: MAX_TEAM_SIZE }.into());
    }
    debug!(size = slots.len(), "analysing team");

    let lookups = slots.iter().map(|&(slot, id)| async move {
        (slot, id, source.pokemon(id).await)
    });
    let results = join_all(lookups).await;

    let mut members = Vec::new();
    let mut errors = Vec::new();
    for (slot, identifier, result) in results {
        match result {
            Ok(raw) => {
                let types = extract_types(&raw);
                let chart = compute_chart_from_labels(&types);
                members.push(TeamMember {
                    slot,
                    name: raw.name,
                    types,
                    sprite: raw.sprites.front_default,
                    summary: classify(&chart),
                    chart,
                });
            }
            Err(err) => {
                warn!(slot, identifier, error = %err, "team slot could not be resolved");
                errors.push(SlotError {
                    slot,
                    identifier: identifier.to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    let charts: Vec<DefensiveChart> = members.iter().map(|m| m.chart).collect();
    let team_vulnerabilities = tally_vulnerabilities(&charts);
    let coverage_gaps = coverage_gaps(&team_vulnerabilities);

    Ok(TeamAnalysis {
        members,
        errors,
        team_vulnerabilities,
        coverage_gaps,
    })
}

impl fmt::Display for TeamAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const TYPE_WIDTH: usize = 9;

        writeln!(f, "Team ({} resolved):", self.members.len())?;
        for member in &self.members {
            writeln!(
                f,
                "  {}. {} [{}]",
                member.slot,
                member.name,
                member.types.join("/")
            )?;
        }
        for error in &self.errors {
            writeln!(f, "  {}. {} - {}", error.slot, error.identifier, error.error)?;
        }

        writeln!(f, "\n{:<TYPE_WIDTH$} Weak Resist Immune", "Attacking")?;
        for (attacking, row) in &self.team_vulnerabilities {
            writeln!(
                f,
                "{:<TYPE_WIDTH$} {:>4} {:>6} {:>6}{}",
                attacking.name(),
                row.weak_count,
                row.resist_count,
                row.immune_count,
                if row.is_gap() { "  <- gap" } else { "" }
            )?;
        }

        if self.coverage_gaps.is_empty() {
            write!(f, "\nNo coverage gaps")
        } else {
            let gaps: Vec<&str> = self.coverage_gaps.iter().map(|t| t.name()).collect();
            write!(f, "\nCoverage gaps: {}", gaps.join(", "))
        }
    }
}
