use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One map declared in a (Z)MAPINFO lump, after post-processing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MapInfo {
    /// 1-based position in the map table.
    pub ordinal: u32,
    pub map: String,
    pub levelpic: Option<String>,
    /// Intermission script shown when entering this map (`enterpic = "$NAME"`).
    pub enteranim: Option<String>,
    /// Intermission script shown when leaving this map (`exitpic = "$NAME"`).
    pub exitanim: Option<String>,
    /// Literal enter picture, drawn full-screen instead of the splat.
    pub enterpic: Option<String>,
    /// Literal exit picture, drawn full-screen instead of the pointer.
    pub exitpic: Option<String>,
    /// End-of-game picture (`next = endpic, "NAME"`).
    pub endpic: Option<String>,
    /// Explicit next map; unset when the transition is sequential.
    pub next: Option<String>,
    pub secretnext: Option<String>,
    pub music: Option<String>,
}

/// The map table in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct MapTable {
    pub maps: Vec<MapInfo>,
}

impl MapTable {
    pub fn new(maps: Vec<MapInfo>) -> Self {
        Self { maps }
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Case-insensitive lookup by map token. A token declared twice
    /// resolves to its last declaration.
    pub fn find(&self, token: &str) -> Option<&MapInfo> {
        self.maps
            .iter()
            .rev()
            .find(|m| m.map.eq_ignore_ascii_case(token))
    }

    pub fn ordinal(&self, token: &str) -> Option<u32> {
        self.find(token).map(|m| m.ordinal)
    }

    /// The end picture of the last map that names one.
    pub fn end_picture(&self) -> Option<&str> {
        self.maps.iter().rev().find_map(|m| m.endpic.as_deref())
    }

    /// Distinct intermission script names, sorted.
    pub fn scripts(&self) -> Vec<&str> {
        self.maps
            .iter()
            .flat_map(|m| [m.enteranim.as_deref(), m.exitanim.as_deref()])
            .flatten()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// How map ordinals are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdinalOrder {
    /// Order of declaration in the source text.
    #[default]
    Declaration,
    /// Sorted by map token.
    SortedByToken,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown ordinal order '{0}', expected 'declaration' or 'sorted_by_token'")]
pub struct ParseOrdinalOrderError(String);

impl FromStr for OrdinalOrder {
    type Err = ParseOrdinalOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "declaration" => Ok(Self::Declaration),
            "sorted_by_token" | "sorted" => Ok(Self::SortedByToken),
            _ => Err(ParseOrdinalOrderError(s.to_string())),
        }
    }
}
