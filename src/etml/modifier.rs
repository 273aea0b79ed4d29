//! Mood modifiers and the tag code table
//!
//! Every tag code resolves to exactly one [`Modifier`]. The table is closed:
//! codes that are not listed resolve to [`Modifier::None`], the same value an
//! untagged span would carry. Callers that need to tell the two apart use the
//! diagnostics returned by
//! [`parse_with_diagnostics`](crate::etml::parser::parse_with_diagnostics).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mood classification attached to a segment of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    #[default]
    None,

    // Moods
    Angry,
    Ecstatic,
    Confused,
    Depressed,
    Scared,
    Tired,
    Relieved,
    Bored,
}

/// Tag codes, in declaration order of the moods they map to
const CODE_TABLE: [(&str, Modifier); 8] = [
    ("ANG", Modifier::Angry),
    ("ECT", Modifier::Ecstatic),
    ("CON", Modifier::Confused),
    ("DEP", Modifier::Depressed),
    ("SCD", Modifier::Scared),
    ("TRD", Modifier::Tired),
    ("REL", Modifier::Relieved),
    ("BRD", Modifier::Bored),
];

impl Modifier {
    /// Every modifier, `None` first.
    pub const ALL: [Modifier; 9] = [
        Modifier::None,
        Modifier::Angry,
        Modifier::Ecstatic,
        Modifier::Confused,
        Modifier::Depressed,
        Modifier::Scared,
        Modifier::Tired,
        Modifier::Relieved,
        Modifier::Bored,
    ];

    /// Resolve a tag code. Unknown codes resolve to `Modifier::None`.
    ///
    /// Matching is exact: codes are uppercase in the markup and `ang` is not `ANG`.
    pub fn from_code(code: &str) -> Modifier {
        Self::lookup_code(code).unwrap_or(Modifier::None)
    }

    /// Resolve a tag code, returning `None` when the code is not in the table.
    pub fn lookup_code(code: &str) -> Option<Modifier> {
        CODE_TABLE
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, modifier)| *modifier)
    }

    /// The canonical tag code for this modifier. `Modifier::None` has none.
    pub fn code(self) -> Option<&'static str> {
        CODE_TABLE
            .iter()
            .find(|(_, modifier)| *modifier == self)
            .map(|(code, _)| *code)
    }

    /// Returns `true` for the neutral `None` modifier
    pub fn is_neutral(self) -> bool {
        self == Modifier::None
    }

    /// Lowercase name, as used in serialized output
    pub fn name(self) -> &'static str {
        match self {
            Modifier::None => "none",
            Modifier::Angry => "angry",
            Modifier::Ecstatic => "ecstatic",
            Modifier::Confused => "confused",
            Modifier::Depressed => "depressed",
            Modifier::Scared => "scared",
            Modifier::Tired => "tired",
            Modifier::Relieved => "relieved",
            Modifier::Bored => "bored",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a modifier name is not recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModifierError(pub String);

impl fmt::Display for ParseModifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown modifier name: {}", self.0)
    }
}

impl std::error::Error for ParseModifierError {}

impl FromStr for Modifier {
    type Err = ParseModifierError;

    /// Parse a modifier by name (`"angry"`), case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modifier::ALL
            .iter()
            .copied()
            .find(|modifier| modifier.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseModifierError(s.to_string()))
    }
}
