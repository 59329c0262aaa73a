//! Place records used for search and as itinerary anchors.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coord::Coordinate;

/// Opaque place identifier assigned by the geodata import.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaceId({})", self.0)
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Settlement classification, mirroring the OSM `place=*` values we import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceKind {
    City,
    Town,
    Village,
    Hamlet,
}

impl PlaceKind {
    /// All kinds loaded into the place list.
    pub const SETTLEMENTS: [PlaceKind; 4] = [
        PlaceKind::City,
        PlaceKind::Town,
        PlaceKind::Village,
        PlaceKind::Hamlet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlaceKind::City => "city",
            PlaceKind::Town => "town",
            PlaceKind::Village => "village",
            PlaceKind::Hamlet => "hamlet",
        }
    }
}

/// A geocoded, named location.
///
/// `name` keeps its proper diacritics (e.g. "Whakatāne"); matching is done
/// against the folded form, see [`crate::places::fold_name`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,

    /// Canonical name, e.g. "Wellington".
    pub name: String,

    /// Qualified name with region, e.g. "Wellington, Wellington Region".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(flatten)]
    pub coord: Coordinate,

    /// Popularity score (population where known). Higher ranks first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PlaceKind>,
}

impl Place {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coord: Coordinate) -> Self {
        Self {
            id: PlaceId::new(id),
            name: name.into(),
            display_name: None,
            coord,
            rank: None,
            kind: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_rank(mut self, rank: u64) -> Self {
        self.rank = Some(rank);
        self
    }

    pub fn with_kind(mut self, kind: PlaceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// The name to show users: the qualified form when present.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}
