use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use cinefacet_base::CatalogError;

/// A categorical dimension of a record used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Genre,
    Language,
    Country,
}

impl Facet {
    /// All facets, in display order.
    pub const ALL: [Facet; 3] = [Facet::Genre, Facet::Language, Facet::Country];

    pub fn name(self) -> &'static str {
        match self {
            Facet::Genre => "genre",
            Facet::Language => "language",
            Facet::Country => "country",
        }
    }

    /// Position of this facet in per-facet arrays.
    pub(crate) fn index(self) -> usize {
        match self {
            Facet::Genre => 0,
            Facet::Language => 1,
            Facet::Country => 2,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facet {
    type Err = Box<CatalogError>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "genre" | "genres" => Ok(Facet::Genre),
            "language" | "languages" => Ok(Facet::Language),
            "country" | "countries" => Ok(Facet::Country),
            _ => Err(cinefacet_base::err!(
                "Unknown facet '{}' (expected genre, language or country)",
                s
            )),
        }
    }
}
