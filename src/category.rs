//! Generation 3 move categories.
//!
//! In Fire Red / Leaf Green a damaging move is Physical or Special purely because of
//! its type. The upstream source records the later per-move split, so its damage class
//! is only consulted for the status flag and never for Physical vs Special.

use crate::type_chart::damage_category;
use schema::{MoveCategory, PokemonType};

/// Category of a move of `move_type`. Status moves are Status whatever their type.
pub fn category_for(move_type: PokemonType, is_status: bool) -> MoveCategory {
    if is_status {
        return MoveCategory::Status;
    }
    damage_category(move_type)
}

/// Category for a move whose type is only known as a label.
///
/// Never fails: an unrecognised label is `Unknown` unless the move is a status move.
pub fn category_for_label(move_type: &str, is_status: bool) -> MoveCategory {
    if is_status {
        return MoveCategory::Status;
    }
    match PokemonType::from_label(move_type) {
        Some(t) => damage_category(t),
        None => MoveCategory::Unknown,
    }
}

/// Whether an upstream damage class marks a status move.
pub fn is_status_class(damage_class: &str) -> bool {
    damage_class.eq_ignore_ascii_case("status")
}
