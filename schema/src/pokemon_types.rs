use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The seventeen elemental types of the Generation 3 games.
///
/// Declaration order is the fixed enumeration order used for every chart, bucket and
/// team row, so deriving `Ord` sorts types the way they are displayed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
}

impl PokemonType {
    /// Number of recognised types.
    pub const COUNT: usize = 17;

    /// Every type, in enumeration order.
    pub const ALL: [PokemonType; PokemonType::COUNT] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Grass,
        PokemonType::Electric,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
        PokemonType::Dark,
        PokemonType::Steel,
    ];

    /// Position of this type in [`PokemonType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Parses an upstream or user label ("fire", "Fire", " FIRE ").
    pub fn from_label(label: &str) -> Option<PokemonType> {
        label.trim().parse().ok()
    }

    pub fn name(self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
