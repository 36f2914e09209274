//! Major (Ptolemaic) aspects between two bodies.

use serde::{Deserialize, Serialize};

/// The five major aspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunct,
    Sextile,
    Square,
    Trine,
    Opposition,
}

/// All aspect kinds in ascending angle order.
pub const ALL_ASPECTS: [AspectKind; 5] = [
    AspectKind::Conjunct,
    AspectKind::Sextile,
    AspectKind::Square,
    AspectKind::Trine,
    AspectKind::Opposition,
];

impl AspectKind {
    /// Exact target separation in degrees.
    pub const fn angle(self) -> f64 {
        match self {
            Self::Conjunct => 0.0,
            Self::Sextile => 60.0,
            Self::Square => 90.0,
            Self::Trine => 120.0,
            Self::Opposition => 180.0,
        }
    }

    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conjunct => "Conjunct",
            Self::Sextile => "Sextile",
            Self::Square => "Square",
            Self::Trine => "Trine",
            Self::Opposition => "Opposition",
        }
    }

    /// All aspect kinds in order.
    pub const fn all() -> &'static [AspectKind; 5] {
        &ALL_ASPECTS
    }
}
