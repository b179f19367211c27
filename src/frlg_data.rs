//! Fixed Fire Red / Leaf Green reference tables: TMs and HMs, move tutors and egg
//! group names. Compiled from `data/` by the build script and decoded once.

use crate::category::category_for;
use crate::transform::display_name;
use schema::{MachineEntry, MoveCategory, PokemonType, TutorEntry};
use serde::Serialize;
use std::sync::LazyLock;

include!(concat!(env!("OUT_DIR"), "/egg_groups.rs"));

static MACHINES: LazyLock<Vec<MachineEntry>> = LazyLock::new(|| {
    postcard::from_bytes(include_bytes!(concat!(env!("OUT_DIR"), "/tms_hms.bin")))
        .expect("TM/HM blob is produced by build.rs")
});

static TUTORS: LazyLock<Vec<TutorEntry>> = LazyLock::new(|| {
    postcard::from_bytes(include_bytes!(concat!(env!("OUT_DIR"), "/move_tutors.bin")))
        .expect("tutor blob is produced by build.rs")
});

/// A teachable move annotated with its Generation 3 category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeachableMove {
    /// "TM06" / "HM03"; absent for tutor moves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<String>,
    pub name: String,
    pub display_name: String,
    #[serde(rename = "type")]
    pub move_type: PokemonType,
    pub gen3_category: MoveCategory,
}

pub fn machines() -> &'static [MachineEntry] {
    &MACHINES
}

pub fn tutors() -> &'static [TutorEntry] {
    &TUTORS
}

/// All TMs then all HMs, in number order.
pub fn tms_hms() -> Vec<TeachableMove> {
    machines()
        .iter()
        .map(|m| TeachableMove {
            machine: Some(m.label()),
            name: m.move_name.clone(),
            display_name: display_name(&m.move_name),
            move_type: m.move_type,
            gen3_category: category_for(m.move_type, m.status),
        })
        .collect()
}

pub fn move_tutors() -> Vec<TeachableMove> {
    tutors()
        .iter()
        .map(|t| TeachableMove {
            machine: None,
            name: t.move_name.clone(),
            display_name: display_name(&t.move_name),
            move_type: t.move_type,
            gen3_category: category_for(t.move_type, t.status),
        })
        .collect()
}

/// In-game name of an egg group ("humanshape" -> "Human-Like"). Unknown groups fall
/// back to the capitalised API name.
pub fn egg_group_display_name(name: &str) -> String {
    match EGG_GROUP_DISPLAY_NAMES.get(name) {
        Some(display) => display.to_string(),
        None => crate::transform::capitalise(name),
    }
}

/// `(api name, display name)` for every egg group, in listing order.
pub fn egg_groups() -> impl Iterator<Item = (&'static str, &'static str)> {
    EGG_GROUP_ORDER.iter().map(|&name| {
        let display = EGG_GROUP_DISPLAY_NAMES.get(name).copied().unwrap_or(name);
        (name, display)
    })
}
