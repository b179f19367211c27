//! The dex service: upstream lookups passed through the transformers and the chart
//! calculator, plus the fixed Fire Red / Leaf Green tables.

use crate::config::DexConfig;
use crate::defense::{classify, compute_chart, parse_types, DefensiveChart, WeaknessSummary};
use crate::errors::{DexError, DexResult};
use crate::frlg_data::{self, TeachableMove};
use crate::team::{self, TeamAnalysis};
use crate::transform::{
    self, EggGroupDetail, EncounterTable, EvolutionStep, MoveDetail, PokemonDetail,
    PokemonListing, PokemonWeaknesses,
};
use crate::type_chart::category_split;
use crate::upstream::records::id_from_url;
use crate::upstream::{DexSource, PokeApiClient};
use schema::PokemonType;
use serde::Serialize;
use tracing::{debug, warn};

/// An egg group name as the games display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EggGroupSummary {
    pub name: String,
    pub display_name: String,
}

/// Chart and buckets for a bare type combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeWeaknesses {
    pub types: Vec<PokemonType>,
    pub chart: DefensiveChart,
    pub summary: WeaknessSummary,
}

/// The Generation 3 physical/special partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    pub physical: Vec<PokemonType>,
    pub special: Vec<PokemonType>,
}

#[derive(Debug)]
pub struct Dex<S: DexSource> {
    source: S,
    config: DexConfig,
}

impl Dex<PokeApiClient> {
    /// A dex backed by PokeAPI as configured.
    pub fn from_config(config: DexConfig) -> DexResult<Self> {
        let client = PokeApiClient::new(&config)?;
        Ok(Self::new(client, config))
    }
}

impl<S: DexSource> Dex<S> {
    pub fn new(source: S, config: DexConfig) -> Self {
        Self { source, config }
    }

    /// Full detail for one creature. The species record is fetched alongside it; if
    /// that lookup fails the detail is still returned without species fields.
    pub async fn pokemon_detail(&self, id: &str) -> DexResult<PokemonDetail> {
        let (raw, species) = tokio::join!(self.source.pokemon(id), self.source.species(id));
        let raw = raw?;
        let species = match species {
            Ok(species) => Some(species),
            Err(err) => {
                warn!(id, error = %err, "species lookup failed, omitting species fields");
                None
            }
        };
        Ok(transform::transform_pokemon(
            &raw,
            species.as_ref(),
            &self.config,
        ))
    }

    pub async fn pokemon_weaknesses(&self, id: &str) -> DexResult<PokemonWeaknesses> {
        let raw = self.source.pokemon(id).await?;
        Ok(transform::transform_weaknesses(&raw))
    }

    /// One page of the national dex. `limit` defaults to the configured page size and
    /// is capped at `max_list_limit`.
    pub async fn list_pokemon(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> DexResult<PokemonListing> {
        let limit = match limit {
            Some(0) | None => self.config.default_list_limit,
            Some(limit) => limit,
        }
        .min(self.config.max_list_limit);
        let offset = offset.unwrap_or(0);
        let page = self.source.pokemon_list(limit, offset).await?;
        Ok(transform::transform_pokemon_list(&page))
    }

    pub async fn move_detail(&self, id: &str) -> DexResult<MoveDetail> {
        let raw = self.source.move_record(id).await?;
        Ok(transform::transform_move(&raw, &self.config))
    }

    pub fn egg_groups(&self) -> Vec<EggGroupSummary> {
        frlg_data::egg_groups()
            .map(|(name, display_name)| EggGroupSummary {
                name: name.to_string(),
                display_name: display_name.to_string(),
            })
            .collect()
    }

    pub async fn egg_group_detail(&self, name: &str) -> DexResult<EggGroupDetail> {
        let raw = self.source.egg_group(name).await?;
        Ok(transform::transform_egg_group(&raw, self.config.max_dex_id))
    }

    /// Evolution steps of the chain the species belongs to. A species without a chain,
    /// or one the source does not know, has no steps.
    pub async fn evolution_chain(&self, id: &str) -> DexResult<Vec<EvolutionStep>> {
        let species = match self.source.species(id).await {
            Ok(species) => species,
            Err(DexError::NotFound { .. }) => return Ok(Vec::new()),
            Err(err) => return Err(err),
        };
        let Some(chain_id) = species
            .evolution_chain
            .as_ref()
            .and_then(|chain| id_from_url(&chain.url))
        else {
            debug!(id, "species has no evolution chain");
            return Ok(Vec::new());
        };
        match self.source.evolution_chain(chain_id).await {
            Ok(chain) => Ok(transform::flatten_evolution_chain(&chain.chain)),
            Err(DexError::NotFound { .. }) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    /// Wild encounter locations per configured game version. Unknown creatures have
    /// none.
    pub async fn encounters(&self, id: &str) -> DexResult<EncounterTable> {
        let raw = match self.source.encounters(id).await {
            Ok(raw) => raw,
            Err(DexError::NotFound { .. }) => Vec::new(),
            Err(err) => return Err(err),
        };
        Ok(transform::transform_encounters(&raw, &self.config.versions))
    }

    pub fn tms_hms(&self) -> Vec<TeachableMove> {
        frlg_data::tms_hms()
    }

    pub fn move_tutors(&self) -> Vec<TeachableMove> {
        frlg_data::move_tutors()
    }

    /// Types by Generation 3 category, each list in enumeration order.
    pub fn categories(&self) -> CategoryTable {
        let split = category_split();
        let sorted = |types: &[PokemonType]| {
            let mut types = types.to_vec();
            types.sort();
            types
        };
        CategoryTable {
            physical: sorted(&split.physical_types),
            special: sorted(&split.special_types),
        }
    }

    /// Chart and summary for a user-supplied combination of one or two type labels.
    pub fn type_weaknesses<L: AsRef<str>>(&self, labels: &[L]) -> DexResult<TypeWeaknesses> {
        let types = parse_types(labels)?;
        let chart = compute_chart(&types);
        Ok(TypeWeaknesses {
            summary: classify(&chart),
            types,
            chart,
        })
    }

    pub async fn analyse_team<I: AsRef<str>>(&self, identifiers: &[I]) -> DexResult<TeamAnalysis> {
        team::analyse_team(&self.source, identifiers).await
    }
}
