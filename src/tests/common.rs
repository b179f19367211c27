use crate::errors::{DexError, DexResult};
use crate::upstream::records::{
    ApiResource, ChainLink, EggGroupRecord, EvolutionChainRecord, EvolutionDetail,
    LocationAreaEncounter, MoveRecord, NamedResource, PastTypes, PokemonListPage,
    PokemonRecord, SpeciesRecord, Sprites, TypeSlot,
};
use crate::upstream::DexSource;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn named(name: &str) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: String::new(),
    }
}

pub fn species_ref(name: &str, id: u32) -> NamedResource {
    NamedResource {
        name: name.to_string(),
        url: format!("https://pokeapi.co/api/v2/pokemon-species/{}/", id),
    }
}

/// A builder for upstream creature records with empty defaults.
///
/// # Example
/// ```
/// let record = PokemonRecordBuilder::new(6, "charizard")
///     .with_types(&["fire", "flying"])
///     .build();
/// ```
pub struct PokemonRecordBuilder {
    id: u32,
    name: String,
    types: Vec<String>,
    past_types: Vec<(String, Vec<String>)>,
}

fn type_slots(types: &[String]) -> Vec<TypeSlot> {
    types
        .iter()
        .enumerate()
        .map(|(i, t)| TypeSlot {
            slot: i as u8 + 1,
            type_: named(t),
        })
        .collect()
}

impl PokemonRecordBuilder {
    pub fn new(id: u32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            types: Vec::new(),
            past_types: Vec::new(),
        }
    }

    /// Type labels in slot order, as the upstream source spells them.
    pub fn with_types(mut self, types: &[&str]) -> Self {
        self.types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    /// The typing the record had up to and including `generation` ("generation-v").
    pub fn with_past_types(mut self, generation: &str, types: &[&str]) -> Self {
        let types = types.iter().map(|t| t.to_string()).collect();
        self.past_types.push((generation.to_string(), types));
        self
    }

    pub fn build(self) -> PokemonRecord {
        PokemonRecord {
            id: self.id,
            name: self.name.clone(),
            height: 10,
            weight: 100,
            base_experience: None,
            types: type_slots(&self.types),
            past_types: self
                .past_types
                .iter()
                .map(|(generation, types)| PastTypes {
                    generation: named(generation),
                    types: type_slots(types),
                })
                .collect(),
            stats: Vec::new(),
            moves: Vec::new(),
            abilities: Vec::new(),
            sprites: Sprites {
                front_default: Some(format!("https://img/{}.png", self.id)),
                front_shiny: None,
            },
        }
    }
}

/// In-memory `DexSource`. Records are found by name or by id; identifiers marked
/// unavailable fail as an upstream outage would.
///
/// Creature lookups can be given a delay, and the source records how many of them
/// were pending at the same time.
#[derive(Default)]
pub struct FakeSource {
    pokemon: HashMap<String, PokemonRecord>,
    species: HashMap<String, SpeciesRecord>,
    moves: HashMap<String, MoveRecord>,
    egg_groups: HashMap<String, EggGroupRecord>,
    chains: HashMap<u32, EvolutionChainRecord>,
    encounters: HashMap<String, Vec<LocationAreaEncounter>>,
    unavailable: HashSet<String>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    list_requests: Arc<Mutex<Vec<(u32, u32)>>>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pokemon(mut self, record: PokemonRecord) -> Self {
        self.pokemon.insert(record.id.to_string(), record.clone());
        self.pokemon.insert(record.name.clone(), record);
        self
    }

    pub fn with_species(mut self, record: SpeciesRecord) -> Self {
        self.species.insert(record.id.to_string(), record.clone());
        self.species.insert(record.name.clone(), record);
        self
    }

    pub fn with_move(mut self, record: MoveRecord) -> Self {
        self.moves.insert(record.name.clone(), record);
        self
    }

    pub fn with_egg_group(mut self, record: EggGroupRecord) -> Self {
        self.egg_groups.insert(record.name.clone(), record);
        self
    }

    pub fn with_chain(mut self, record: EvolutionChainRecord) -> Self {
        self.chains.insert(record.id, record);
        self
    }

    pub fn with_encounters(mut self, id: &str, encounters: Vec<LocationAreaEncounter>) -> Self {
        self.encounters.insert(id.to_string(), encounters);
        self
    }

    /// Every lookup of `id` fails with `UpstreamUnavailable`.
    pub fn with_unavailable(mut self, id: &str) -> Self {
        self.unavailable.insert(id.to_string());
        self
    }

    /// Every creature lookup waits `delay` before answering.
    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    /// Creature lookups of `id` wait `delay` instead of the default.
    pub fn with_delay(mut self, id: &str, delay: Duration) -> Self {
        self.delays.insert(id.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most creature lookups that were pending at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Shared log of `(limit, offset)` list requests, readable after the source has
    /// been moved into a service.
    pub fn list_requests(&self) -> Arc<Mutex<Vec<(u32, u32)>>> {
        Arc::clone(&self.list_requests)
    }

    async fn pause(&self, id: &str) {
        let id = id.trim().to_lowercase();
        let delay = self.delays.get(&id).copied().unwrap_or(self.default_delay);
        let pending = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(pending, Ordering::SeqCst);
        tokio::time::sleep(delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    fn lookup<T: Clone>(
        &self,
        records: &HashMap<String, T>,
        resource: &'static str,
        id: &str,
    ) -> DexResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let id = id.trim().to_lowercase();
        if self.unavailable.contains(&id) {
            return Err(DexError::UpstreamUnavailable(format!(
                "request timed out for {}",
                id
            )));
        }
        records
            .get(&id)
            .cloned()
            .ok_or_else(|| DexError::not_found(resource, id))
    }
}

#[async_trait]
impl DexSource for FakeSource {
    async fn pokemon(&self, id: &str) -> DexResult<PokemonRecord> {
        self.pause(id).await;
        self.lookup(&self.pokemon, "Pokemon", id)
    }

    async fn species(&self, id: &str) -> DexResult<SpeciesRecord> {
        self.lookup(&self.species, "Species", id)
    }

    async fn move_record(&self, id: &str) -> DexResult<MoveRecord> {
        self.lookup(&self.moves, "Move", id)
    }

    async fn egg_group(&self, name: &str) -> DexResult<EggGroupRecord> {
        self.lookup(&self.egg_groups, "Egg group", name)
    }

    async fn pokemon_list(&self, limit: u32, offset: u32) -> DexResult<PokemonListPage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.list_requests.lock().unwrap().push((limit, offset));
        Ok(PokemonListPage {
            count: 386,
            results: (offset + 1..=offset + limit.min(3))
                .map(|id| NamedResource {
                    name: format!("pokemon-{}", id),
                    url: format!("https://pokeapi.co/api/v2/pokemon/{}/", id),
                })
                .collect(),
        })
    }

    async fn evolution_chain(&self, chain_id: u32) -> DexResult<EvolutionChainRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.chains
            .get(&chain_id)
            .cloned()
            .ok_or_else(|| DexError::not_found("Evolution chain", chain_id.to_string()))
    }

    async fn encounters(&self, id: &str) -> DexResult<Vec<LocationAreaEncounter>> {
        self.lookup(&self.encounters, "Encounters", id)
    }
}

pub fn species_record(id: u32, name: &str, chain_id: Option<u32>) -> SpeciesRecord {
    SpeciesRecord {
        id,
        name: name.to_string(),
        egg_groups: vec![named("monster"), named("dragon")],
        flavor_text_entries: Vec::new(),
        genera: Vec::new(),
        evolution_chain: chain_id.map(|id| ApiResource {
            url: format!("https://pokeapi.co/api/v2/evolution-chain/{}/", id),
        }),
    }
}

/// Bulbasaur -> Ivysaur (Lv. 16) -> Venusaur (Lv. 32) as chain 1.
pub fn bulbasaur_chain() -> EvolutionChainRecord {
    let level = |min_level: u8| EvolutionDetail {
        trigger: Some(named("level-up")),
        min_level: Some(min_level),
        ..EvolutionDetail::default()
    };
    EvolutionChainRecord {
        id: 1,
        chain: ChainLink {
            species: species_ref("bulbasaur", 1),
            evolution_details: Vec::new(),
            evolves_to: vec![ChainLink {
                species: species_ref("ivysaur", 2),
                evolution_details: vec![level(16)],
                evolves_to: vec![ChainLink {
                    species: species_ref("venusaur", 3),
                    evolution_details: vec![level(32)],
                    evolves_to: Vec::new(),
                }],
            }],
        },
    }
}
