use crate::core::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The eight planning collections, in sidebar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    Guests,
    Venues,
    Florals,
    Catering,
    Photography,
    Music,
    Styling,
    Timeline,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 8] = [
        Self::Guests,
        Self::Venues,
        Self::Florals,
        Self::Catering,
        Self::Photography,
        Self::Music,
        Self::Styling,
        Self::Timeline,
    ];

    /// Key of the collection's slot in the medium. These strings are the
    /// on-disk contract and must never change.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Self::Guests => "wedding-invitados",
            Self::Venues => "wedding-lugar",
            Self::Florals => "wedding-flores",
            Self::Catering => "wedding-comida",
            Self::Photography => "wedding-fotografia",
            Self::Music => "wedding-musica",
            Self::Styling => "wedding-estilistas",
            Self::Timeline => "wedding-cronograma",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Guests => "guests",
            Self::Venues => "venues",
            Self::Florals => "florals",
            Self::Catering => "catering",
            Self::Photography => "photography",
            Self::Music => "music",
            Self::Styling => "styling",
            Self::Timeline => "timeline",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Guests => "Invitados",
            Self::Venues => "Lugar",
            Self::Florals => "Flores",
            Self::Catering => "Comida",
            Self::Photography => "Fotografía",
            Self::Music => "Música",
            Self::Styling => "Estilistas",
            Self::Timeline => "Cronograma",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Guests => "users",
            Self::Venues => "map-pin",
            Self::Florals => "palette",
            Self::Catering => "utensils",
            Self::Photography => "image",
            Self::Music => "music",
            Self::Styling => "user",
            Self::Timeline => "calendar",
        }
    }

    fn route(&self) -> &'static str {
        match self {
            Self::Guests => "invitados",
            Self::Venues => "lugar",
            Self::Florals => "flores",
            Self::Catering => "comida",
            Self::Photography => "fotografia",
            Self::Music => "musica",
            Self::Styling => "estilistas",
            Self::Timeline => "cronograma",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for CollectionKind {
    type Err = StoreError;

    /// Accepts the English slug, the Spanish route name or the storage key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.slug() == needle || kind.route() == needle || kind.storage_key() == needle
            })
            .ok_or_else(|| StoreError::UnknownCollection(s.to_string()))
    }
}
