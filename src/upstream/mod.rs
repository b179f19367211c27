//! The read-only contract with the external game-data source, plus a cached PokeAPI
//! client implementing it.

pub mod cache;
pub mod client;
pub mod records;

use crate::errors::{DexResult, ValidationError};
use async_trait::async_trait;
use records::{
    EggGroupRecord, EvolutionChainRecord, LocationAreaEncounter, MoveRecord, PokemonListPage,
    PokemonRecord, SpeciesRecord,
};

pub use cache::ResponseCache;
pub use client::PokeApiClient;

/// Read operations the dex needs from its data source.
///
/// Identifiers are a name or a numeric id. Every call is idempotent and safe to cache.
/// A missing record is `DexError::NotFound`; transport trouble is
/// `DexError::UpstreamUnavailable`.
#[async_trait]
pub trait DexSource: Send + Sync {
    async fn pokemon(&self, id: &str) -> DexResult<PokemonRecord>;

    async fn species(&self, id: &str) -> DexResult<SpeciesRecord>;

    async fn move_record(&self, id: &str) -> DexResult<MoveRecord>;

    async fn egg_group(&self, name: &str) -> DexResult<EggGroupRecord>;

    async fn pokemon_list(&self, limit: u32, offset: u32) -> DexResult<PokemonListPage>;

    async fn evolution_chain(&self, chain_id: u32) -> DexResult<EvolutionChainRecord>;

    async fn encounters(&self, id: &str) -> DexResult<Vec<LocationAreaEncounter>>;
}

/// Normalises a user-supplied name or id into a path segment ("Mr Mime" -> "mr-mime").
pub fn normalize_identifier(raw: &str) -> Result<String, ValidationError> {
    let id = raw.trim().to_lowercase().replace(' ', "-");
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(id)
    } else {
        Err(ValidationError::InvalidIdentifier(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Pikachu", "pikachu")]
    #[case(" 25 ", "25")]
    #[case("Mr Mime", "mr-mime")]
    #[case("nidoran-f", "nidoran-f")]
    fn identifiers_are_normalised(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_identifier(raw), Ok(expected.to_string()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("../type")]
    #[case("..")]
    #[case("pikachu?limit=1")]
    #[case("farfetch’d")]
    fn bad_identifiers_are_rejected(#[case] raw: &str) {
        assert_eq!(
            normalize_identifier(raw),
            Err(ValidationError::InvalidIdentifier(raw.to_string()))
        );
    }
}
