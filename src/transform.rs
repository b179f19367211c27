//! Maps raw upstream records into the dex's Fire Red / Leaf Green view of them.
//!
//! Everything here is synchronous and infallible: missing optional fields become
//! `None` or empty lists, and records from later generations are filtered down to
//! what the configured version group exposes.

use crate::category::{category_for_label, is_status_class};
use crate::config::DexConfig;
use crate::defense::{classify, compute_chart_from_labels, DefensiveChart, WeaknessSummary};
use crate::frlg_data::egg_group_display_name;
use crate::upstream::records::{
    ChainLink, EggGroupRecord, EvolutionDetail, FlavorTextEntry, LocationAreaEncounter,
    MoveRecord, NamedResource, PokemonListPage, PokemonRecord, SpeciesRecord, TypeSlot,
};
use schema::MoveCategory;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

const LEVEL_UP: &str = "level-up";
const FRLG_GENERATION: u8 = 3;

/// Upper-cases the first character ("water1" -> "Water1").
pub fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title-cases a hyphenated API name ("thunder-punch" -> "Thunder Punch").
pub fn display_name(s: &str) -> String {
    s.split('-')
        .filter(|part| !part.is_empty())
        .map(capitalise)
        .collect::<Vec<_>>()
        .join(" ")
}

// --- Pokemon ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearnableMove {
    pub name: String,
    pub learn_method: String,
    pub level_learned_at: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseStat {
    pub name: String,
    pub value: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ability {
    pub name: String,
    pub is_hidden: bool,
}

/// A creature as the dex presents it, including its defensive profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub types: Vec<String>,
    pub stats: Vec<BaseStat>,
    pub height: u32,
    pub weight: u32,
    pub sprite: Option<String>,
    pub sprite_shiny: Option<String>,
    pub moves: Vec<LearnableMove>,
    pub egg_groups: Vec<String>,
    pub flavor_text: Option<String>,
    pub genus: Option<String>,
    pub base_experience: Option<u32>,
    pub abilities: Vec<Ability>,
    pub type_chart: DefensiveChart,
    pub weaknesses: WeaknessSummary,
}

/// Generation number from an API generation name ("generation-iii" -> 3).
fn generation_number(name: &str) -> Option<u8> {
    let numeral = name.strip_prefix("generation-")?;
    let number = match numeral {
        "i" => 1,
        "ii" => 2,
        "iii" => 3,
        "iv" => 4,
        "v" => 5,
        "vi" => 6,
        "vii" => 7,
        "viii" => 8,
        "ix" => 9,
        _ => return None,
    };
    Some(number)
}

/// The type slots a creature had in Generation 3.
///
/// `past_types` entries hold the typing that applied up to and including their
/// generation. The earliest entry at or after Generation 3 is the one in force;
/// without one, the current typing already applied.
fn generation_three_types(raw: &PokemonRecord) -> &[TypeSlot] {
    raw.past_types
        .iter()
        .filter_map(|past| {
            let generation = generation_number(&past.generation.name)?;
            (generation >= FRLG_GENERATION).then_some((generation, &past.types))
        })
        .min_by_key(|(generation, _)| *generation)
        .map_or(&raw.types, |(_, types)| types)
}

/// Generation 3 type labels in slot order, capitalised ("fire" -> "Fire").
pub fn extract_types(raw: &PokemonRecord) -> Vec<String> {
    let mut slots: Vec<_> = generation_three_types(raw).iter().collect();
    slots.sort_by_key(|t| t.slot);
    slots.iter().map(|t| capitalise(&t.type_.name)).collect()
}

/// Moves learnable in `version_group`: level-up moves first by level, then the rest
/// alphabetically.
pub fn filter_moveset(raw: &PokemonRecord, version_group: &str) -> Vec<LearnableMove> {
    let mut moves: Vec<LearnableMove> = raw
        .moves
        .iter()
        .filter_map(|entry| {
            let detail = entry
                .version_group_details
                .iter()
                .find(|d| d.version_group.name == version_group)?;
            Some(LearnableMove {
                name: entry.move_.name.clone(),
                learn_method: detail.move_learn_method.name.clone(),
                level_learned_at: detail.level_learned_at,
            })
        })
        .collect();

    moves.sort_by(|a, b| {
        let a_level_up = a.learn_method == LEVEL_UP;
        let b_level_up = b.learn_method == LEVEL_UP;
        b_level_up.cmp(&a_level_up).then_with(|| {
            if a_level_up {
                a.level_learned_at.cmp(&b.level_learned_at)
            } else {
                a.name.cmp(&b.name)
            }
        })
    });
    moves
}

fn clean_flavor_text(text: &str) -> String {
    text.replace(['\u{c}', '\n'], " ")
}

/// Species flavor text in `language`, preferring the configured game versions.
pub fn species_flavor_text(species: &SpeciesRecord, config: &DexConfig) -> Option<String> {
    let in_language = |e: &&FlavorTextEntry| e.language.name == config.language;
    let from_versions = |e: &&FlavorTextEntry| {
        e.version
            .as_ref()
            .is_some_and(|v| config.versions.contains(&v.name))
    };
    species
        .flavor_text_entries
        .iter()
        .filter(in_language)
        .find(from_versions)
        .or_else(|| species.flavor_text_entries.iter().find(in_language))
        .map(|e| clean_flavor_text(&e.flavor_text))
}

pub fn species_genus(species: &SpeciesRecord, language: &str) -> Option<String> {
    species
        .genera
        .iter()
        .find(|g| g.language.name == language)
        .map(|g| g.genus.clone())
}

/// Builds the detail view. A missing species record leaves egg groups empty and
/// flavor text and genus absent.
pub fn transform_pokemon(
    raw: &PokemonRecord,
    species: Option<&SpeciesRecord>,
    config: &DexConfig,
) -> PokemonDetail {
    let types = extract_types(raw);
    let type_chart = compute_chart_from_labels(&types);
    let weaknesses = classify(&type_chart);

    PokemonDetail {
        id: raw.id,
        name: raw.name.clone(),
        display_name: capitalise(&raw.name),
        types,
        stats: raw
            .stats
            .iter()
            .map(|s| BaseStat {
                name: s.stat.name.clone(),
                value: s.base_stat,
            })
            .collect(),
        height: raw.height,
        weight: raw.weight,
        sprite: raw.sprites.front_default.clone(),
        sprite_shiny: raw.sprites.front_shiny.clone(),
        moves: filter_moveset(raw, &config.version_group),
        egg_groups: species
            .map(|s| {
                s.egg_groups
                    .iter()
                    .map(|g| egg_group_display_name(&g.name))
                    .collect()
            })
            .unwrap_or_default(),
        flavor_text: species.and_then(|s| species_flavor_text(s, config)),
        genus: species.and_then(|s| species_genus(s, &config.language)),
        base_experience: raw.base_experience,
        abilities: raw
            .abilities
            .iter()
            .map(|a| Ability {
                name: a.ability.name.clone(),
                is_hidden: a.is_hidden,
            })
            .collect(),
        type_chart,
        weaknesses,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonWeaknesses {
    pub name: String,
    pub types: Vec<String>,
    pub chart: DefensiveChart,
    pub summary: WeaknessSummary,
}

pub fn transform_weaknesses(raw: &PokemonRecord) -> PokemonWeaknesses {
    let types = extract_types(raw);
    let chart = compute_chart_from_labels(&types);
    PokemonWeaknesses {
        name: raw.name.clone(),
        summary: classify(&chart),
        types,
        chart,
    }
}

// --- Listing ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedPokemon {
    pub name: String,
    pub url: String,
    pub id: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokemonListing {
    pub count: u32,
    pub results: Vec<ListedPokemon>,
}

pub fn transform_pokemon_list(page: &PokemonListPage) -> PokemonListing {
    PokemonListing {
        count: page.count,
        results: page
            .results
            .iter()
            .map(|r| ListedPokemon {
                name: r.name.clone(),
                url: r.url.clone(),
                id: r.id(),
            })
            .collect(),
    }
}

// --- Moves ---

/// A move annotated with the category it has in Generation 3.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveDetail {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub gen3_category: MoveCategory,
    /// The per-move split introduced in Generation 4, for reference
    pub gen4_category: Option<String>,
    pub power: Option<u16>,
    pub accuracy: Option<u8>,
    pub pp: Option<u8>,
    pub priority: i8,
    pub target: Option<String>,
    pub effect: Option<String>,
    pub flavor_text: Option<String>,
}

pub fn transform_move(raw: &MoveRecord, config: &DexConfig) -> MoveDetail {
    let damage_class = raw.damage_class.as_ref().map(|c| c.name.as_str());
    let is_status = damage_class.is_some_and(is_status_class);
    let in_language = |e: &&FlavorTextEntry| e.language.name == config.language;
    let preferred = |e: &&FlavorTextEntry| {
        e.version_group
            .as_ref()
            .is_some_and(|vg| config.flavor_version_groups.contains(&vg.name))
    };

    MoveDetail {
        id: raw.id,
        name: raw.name.clone(),
        display_name: display_name(&raw.name),
        move_type: capitalise(&raw.type_.name),
        gen3_category: category_for_label(&raw.type_.name, is_status),
        gen4_category: damage_class.map(capitalise),
        power: raw.power,
        accuracy: raw.accuracy,
        pp: raw.pp,
        priority: raw.priority,
        target: raw.target.as_ref().map(|t| t.name.clone()),
        effect: raw
            .effect_entries
            .iter()
            .find(|e| e.language.name == config.language)
            .map(|e| e.short_effect.clone()),
        flavor_text: raw
            .flavor_text_entries
            .iter()
            .filter(in_language)
            .find(preferred)
            .or_else(|| raw.flavor_text_entries.iter().find(in_language))
            .map(|e| clean_flavor_text(&e.flavor_text)),
    }
}

// --- Egg groups ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EggGroupMember {
    pub name: String,
    pub id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EggGroupDetail {
    pub name: String,
    pub display_name: String,
    pub pokemon: Vec<EggGroupMember>,
}

/// Members available in the target games (id up to `max_dex_id`), by dex number.
pub fn transform_egg_group(raw: &EggGroupRecord, max_dex_id: u32) -> EggGroupDetail {
    let mut pokemon: Vec<EggGroupMember> = raw
        .pokemon_species
        .iter()
        .filter_map(|s| {
            let id = s.id()?;
            (id <= max_dex_id).then(|| EggGroupMember {
                name: s.name.clone(),
                id,
            })
        })
        .collect();
    pokemon.sort_by_key(|p| p.id);
    EggGroupDetail {
        name: raw.name.clone(),
        display_name: egg_group_display_name(&raw.name),
        pokemon,
    }
}

// --- Evolution ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionStep {
    pub from: String,
    pub from_id: Option<u32>,
    pub to: String,
    pub to_id: Option<u32>,
    pub condition: String,
}

/// Short description of what triggers an evolution ("Lv. 16", "Thunder Stone").
pub fn format_evolution_condition(detail: Option<&EvolutionDetail>) -> String {
    let Some(detail) = detail else {
        return String::new();
    };
    let Some(trigger) = &detail.trigger else {
        return String::new();
    };
    let named = |r: &Option<NamedResource>| r.as_ref().map(|r| display_name(&r.name));

    match trigger.name.as_str() {
        "level-up" => {
            if let Some(level) = detail.min_level {
                format!("Lv. {}", level)
            } else if detail.min_happiness.is_some() {
                "Friendship".to_string()
            } else if let Some(known) = named(&detail.known_move) {
                format!("Learn {}", known)
            } else {
                "Level Up".to_string()
            }
        }
        "use-item" => named(&detail.item).unwrap_or_else(|| "Item".to_string()),
        "trade" => {
            if let Some(held) = named(&detail.held_item) {
                format!("Trade w/ {}", held)
            } else if let Some(species) = named(&detail.trade_species) {
                format!("Trade for {}", species)
            } else {
                "Trade".to_string()
            }
        }
        other => display_name(other),
    }
}

/// Flattens the nested chain depth-first into parent -> child steps. Only the first
/// evolution detail of each link is described.
pub fn flatten_evolution_chain(root: &ChainLink) -> Vec<EvolutionStep> {
    fn walk(link: &ChainLink, steps: &mut Vec<EvolutionStep>) {
        for next in &link.evolves_to {
            steps.push(EvolutionStep {
                from: capitalise(&link.species.name),
                from_id: link.species.id(),
                to: capitalise(&next.species.name),
                to_id: next.species.id(),
                condition: format_evolution_condition(next.evolution_details.first()),
            });
            walk(next, steps);
        }
    }

    let mut steps = Vec::new();
    walk(root, &mut steps);
    steps
}

// --- Encounters ---

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncounterSlot {
    pub location: String,
    pub method: String,
    pub min_level: u8,
    pub max_level: u8,
}

/// Wild encounters keyed by game version.
pub type EncounterTable = BTreeMap<String, Vec<EncounterSlot>>;

/// "pallet-town-area" -> "Pallet Town".
pub fn format_location(name: &str) -> String {
    display_name(name.strip_suffix("-area").unwrap_or(name))
}

pub fn format_encounter_method(name: &str) -> String {
    match name {
        "walk" => "Walking".to_string(),
        "surf" => "Surfing".to_string(),
        "old-rod" => "Old Rod".to_string(),
        "good-rod" => "Good Rod".to_string(),
        "super-rod" => "Super Rod".to_string(),
        "rock-smash" => "Rock Smash".to_string(),
        "headbutt" => "Headbutt".to_string(),
        "gift" => "Gift".to_string(),
        "gift-egg" => "Egg Gift".to_string(),
        other => capitalise(other),
    }
}

/// Groups encounters by configured version, dropping duplicate
/// (location, method, level range) rows and sorting by location.
pub fn transform_encounters(raw: &[LocationAreaEncounter], versions: &[String]) -> EncounterTable {
    let mut table: EncounterTable = versions.iter().map(|v| (v.clone(), Vec::new())).collect();
    let mut seen: HashSet<(String, EncounterSlot)> = HashSet::new();

    for area in raw {
        let location = format_location(&area.location_area.name);
        for version in &area.version_details {
            let Some(slots) = table.get_mut(&version.version.name) else {
                continue;
            };
            for encounter in &version.encounter_details {
                let slot = EncounterSlot {
                    location: location.clone(),
                    method: format_encounter_method(&encounter.method.name),
                    min_level: encounter.min_level,
                    max_level: encounter.max_level,
                };
                if seen.insert((version.version.name.clone(), slot.clone())) {
                    slots.push(slot);
                }
            }
        }
    }

    for slots in table.values_mut() {
        slots.sort_by(|a, b| a.location.cmp(&b.location));
    }
    table
}
