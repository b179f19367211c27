use crate::PokemonType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Damage category of a move under the Generation 3 rules.
///
/// `Unknown` only arises for a move whose type sits in neither half of the
/// physical/special partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
    Unknown,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveCategory::Physical => write!(f, "Physical"),
            MoveCategory::Special => write!(f, "Special"),
            MoveCategory::Status => write!(f, "Status"),
            MoveCategory::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Whether a technical machine is a TM or an HM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineKind {
    Tm,
    Hm,
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineKind::Tm => write!(f, "TM"),
            MachineKind::Hm => write!(f, "HM"),
        }
    }
}

/// One TM or HM available in Fire Red / Leaf Green.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineEntry {
    pub kind: MachineKind,
    pub number: u8,
    pub move_name: String,
    pub move_type: PokemonType,
    pub status: bool,
}

impl MachineEntry {
    /// "TM06", "HM03"
    pub fn label(&self) -> String {
        format!("{}{:02}", self.kind, self.number)
    }
}

/// One move taught by a move tutor in Fire Red / Leaf Green.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorEntry {
    pub move_name: String,
    pub move_type: PokemonType,
    pub status: bool,
}
