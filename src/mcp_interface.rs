//! Plain-text rendering of dex results, shared by the CLI and the MCP server.
//!
//! Every function returns a ready-to-print `String`; the callers decide whether to
//! show it or hand it to a model as tool output.

use crate::dex::{CategoryTable, EggGroupSummary, TypeWeaknesses};
use crate::errors::DexError;
use crate::frlg_data::TeachableMove;
use crate::transform::{
    display_name, EggGroupDetail, EncounterTable, EvolutionStep, MoveDetail, PokemonDetail,
    PokemonListing, PokemonWeaknesses,
};
use schema::PokemonType;
use std::fmt::Write;

const LABEL_WIDTH: usize = 12;

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn type_names(types: &[PokemonType]) -> String {
    let names: Vec<&str> = types.iter().map(|t| t.name()).collect();
    names.join(", ")
}

/// One line per error, prefixed the same way for every tool.
pub fn format_error(err: &DexError) -> String {
    format!("Error: {}", err)
}

pub fn format_pokemon_detail(detail: &PokemonDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{:03} {}", detail.id, detail.display_name);
    if let Some(genus) = &detail.genus {
        let _ = writeln!(out, "{}", genus);
    }
    let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "Type", detail.types.join(" / "));
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$} : {:.1} m",
        "Height",
        detail.height as f32 / 10.0
    );
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$} : {:.1} kg",
        "Weight",
        detail.weight as f32 / 10.0
    );
    if !detail.egg_groups.is_empty() {
        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$} : {}",
            "Egg groups",
            detail.egg_groups.join(", ")
        );
    }
    let abilities: Vec<String> = detail
        .abilities
        .iter()
        .map(|a| {
            if a.is_hidden {
                format!("{} (hidden)", display_name(&a.name))
            } else {
                display_name(&a.name)
            }
        })
        .collect();
    if !abilities.is_empty() {
        let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "Abilities", abilities.join(", "));
    }

    if !detail.stats.is_empty() {
        out.push_str("\nBase stats:\n");
        for stat in &detail.stats {
            let _ = writeln!(out, "  {:<LABEL_WIDTH$} : {}", display_name(&stat.name), stat.value);
        }
    }

    if let Some(text) = &detail.flavor_text {
        let _ = writeln!(out, "\n{}", text);
    }

    out.push_str("\nDefenses:\n");
    out.push_str(&detail.weaknesses.to_string());

    if !detail.moves.is_empty() {
        out.push_str("\nLearnset (FireRed/LeafGreen):\n");
        for learned in &detail.moves {
            let how = if learned.learn_method == "level-up" {
                format!("Lv. {}", learned.level_learned_at)
            } else {
                display_name(&learned.learn_method)
            };
            let _ = writeln!(out, "  {:<10} {}", how, display_name(&learned.name));
        }
    }
    out
}

pub fn format_pokemon_weaknesses(weaknesses: &PokemonWeaknesses) -> String {
    format!(
        "{} ({})\n{}",
        display_name(&weaknesses.name),
        weaknesses.types.join(" / "),
        weaknesses.summary
    )
}

pub fn format_type_weaknesses(weaknesses: &TypeWeaknesses) -> String {
    let mut out = format!("{}\n{}", type_names(&weaknesses.types), weaknesses.summary);
    out.push_str("\nFull chart:\n");
    for (attacking, multiplier) in weaknesses.chart.iter() {
        let _ = writeln!(out, "  {:<9} x{}", attacking.name(), multiplier);
    }
    out
}

pub fn format_pokemon_list(listing: &PokemonListing) -> String {
    let mut out = format!("{} Pokemon upstream\n", listing.count);
    for entry in &listing.results {
        let _ = writeln!(
            out,
            "  #{:>3} {}",
            or_dash(entry.id),
            display_name(&entry.name)
        );
    }
    out
}

pub fn format_move_detail(detail: &MoveDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.display_name);
    let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "Type", detail.move_type);
    let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "Category", detail.gen3_category);
    if let Some(later) = &detail.gen4_category {
        if detail.gen3_category.to_string() != *later {
            let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "Gen 4+ split", later);
        }
    }
    let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "Power", or_dash(detail.power));
    let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "Accuracy", or_dash(detail.accuracy));
    let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "PP", or_dash(detail.pp));
    if detail.priority != 0 {
        let _ = writeln!(out, "{:<LABEL_WIDTH$} : {:+}", "Priority", detail.priority);
    }
    if let Some(target) = &detail.target {
        let _ = writeln!(out, "{:<LABEL_WIDTH$} : {}", "Target", display_name(target));
    }
    if let Some(effect) = &detail.effect {
        let _ = writeln!(out, "\n{}", effect);
    }
    if let Some(text) = &detail.flavor_text {
        let _ = writeln!(out, "\n{}", text);
    }
    out
}

pub fn format_egg_groups(groups: &[EggGroupSummary]) -> String {
    let mut out = String::from("Egg groups:\n");
    for group in groups {
        let _ = writeln!(out, "  {:<14} ({})", group.display_name, group.name);
    }
    out
}

pub fn format_egg_group_detail(detail: &EggGroupDetail) -> String {
    let mut out = format!(
        "{} egg group ({} Pokemon)\n",
        detail.display_name,
        detail.pokemon.len()
    );
    for member in &detail.pokemon {
        let _ = writeln!(out, "  #{:03} {}", member.id, display_name(&member.name));
    }
    out
}

pub fn format_evolution_chain(steps: &[EvolutionStep]) -> String {
    if steps.is_empty() {
        return "Does not evolve.".to_string();
    }
    let mut out = String::from("Evolution:\n");
    for step in steps {
        let condition = if step.condition.is_empty() {
            String::new()
        } else {
            format!(" ({})", step.condition)
        };
        let _ = writeln!(out, "  {} -> {}{}", step.from, step.to, condition);
    }
    out
}

pub fn format_encounters(table: &EncounterTable) -> String {
    let mut out = String::new();
    for (version, slots) in table {
        let _ = writeln!(out, "{}:", display_name(version));
        if slots.is_empty() {
            out.push_str("  Not found in the wild\n");
            continue;
        }
        for slot in slots {
            let levels = if slot.min_level == slot.max_level {
                format!("Lv. {}", slot.min_level)
            } else {
                format!("Lv. {}-{}", slot.min_level, slot.max_level)
            };
            let _ = writeln!(out, "  {:<24} {:<10} {}", slot.location, slot.method, levels);
        }
    }
    out
}

/// TM/HM or tutor listing. Machine labels are shown when present.
pub fn format_teachable_moves(title: &str, moves: &[TeachableMove]) -> String {
    let mut out = format!("{}:\n", title);
    for entry in moves {
        let label = entry.machine.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "  {:<5} {:<16} {:<9} {}",
            label,
            entry.display_name,
            entry.move_type.name(),
            entry.gen3_category
        );
    }
    out
}

pub fn format_categories(table: &CategoryTable) -> String {
    format!(
        "Physical : {}\nSpecial  : {}\nStatus moves are Status regardless of type.\n",
        type_names(&table.physical),
        type_names(&table.special)
    )
}
