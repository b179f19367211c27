// Raw PokeAPI response shapes.
// Only the fields the dex reads are modelled; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Numeric id from the trailing path segment of the resource url
    /// (`https://pokeapi.co/api/v2/pokemon-species/25/` -> 25).
    pub fn id(&self) -> Option<u32> {
        id_from_url(&self.url)
    }
}

pub fn id_from_url(url: &str) -> Option<u32> {
    url.split('/').filter(|s| !s.is_empty()).next_back()?.parse().ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

// --- /pokemon/{id} ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub past_types: Vec<PastTypes>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilityEntry>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

/// The typing a creature had up to and including `generation`, before a later
/// generation retyped it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastTypes {
    pub generation: NamedResource,
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub move_: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionGroupDetail {
    #[serde(default)]
    pub level_learned_at: u8,
    pub move_learn_method: NamedResource,
    pub version_group: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilityEntry {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

// --- /pokemon-species/{id} ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub egg_groups: Vec<NamedResource>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
    #[serde(default)]
    pub genera: Vec<Genus>,
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
}

/// Shared by species (keyed by `version`) and moves (keyed by `version_group`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
    #[serde(default)]
    pub version: Option<NamedResource>,
    #[serde(default)]
    pub version_group: Option<NamedResource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genus {
    pub genus: String,
    pub language: NamedResource,
}

// --- /move/{id} ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub type_: NamedResource,
    #[serde(default)]
    pub damage_class: Option<NamedResource>,
    #[serde(default)]
    pub power: Option<u16>,
    #[serde(default)]
    pub accuracy: Option<u8>,
    #[serde(default)]
    pub pp: Option<u8>,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub target: Option<NamedResource>,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
    #[serde(default)]
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectEntry {
    pub short_effect: String,
    pub language: NamedResource,
}

// --- /egg-group/{name} ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EggGroupRecord {
    pub name: String,
    #[serde(default)]
    pub pokemon_species: Vec<NamedResource>,
}

// --- /pokemon?limit&offset ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PokemonListPage {
    pub count: u32,
    #[serde(default)]
    pub results: Vec<NamedResource>,
}

// --- /evolution-chain/{id} ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolutionChainRecord {
    pub id: u32,
    pub chain: ChainLink,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionDetail {
    #[serde(default)]
    pub trigger: Option<NamedResource>,
    #[serde(default)]
    pub min_level: Option<u8>,
    #[serde(default)]
    pub min_happiness: Option<u8>,
    #[serde(default)]
    pub known_move: Option<NamedResource>,
    #[serde(default)]
    pub item: Option<NamedResource>,
    #[serde(default)]
    pub held_item: Option<NamedResource>,
    #[serde(default)]
    pub trade_species: Option<NamedResource>,
}

// --- /pokemon/{id}/encounters ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAreaEncounter {
    pub location_area: NamedResource,
    #[serde(default)]
    pub version_details: Vec<VersionEncounterDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionEncounterDetail {
    pub version: NamedResource,
    #[serde(default)]
    pub encounter_details: Vec<Encounter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub min_level: u8,
    pub max_level: u8,
    pub method: NamedResource,
}
