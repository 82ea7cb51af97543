/* 📖 # Record model

A Record is one catalog entry: a title, three tag sets (genre, language, country)
and an ordered list of image references the engine never looks at.

Tag sets are `BTreeSet`s: membership is all that matters, duplicates collapse and
iteration order is deterministic. A facet that was absent in the input is an empty
set, never an `Option`.

Records are immutable once built. Ranking borrows them and keeps the score beside
the reference, so a catalog can be ranked any number of times, from any number of
threads, without one pass seeing another pass's scores.
*/

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::facet::Facet;

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    id: RecordId,
    title: String,
    genres: BTreeSet<String>,
    languages: BTreeSet<String>,
    countries: BTreeSet<String>,
    images: Vec<String>,
}

impl Record {
    /// Create a record with no tags and no images.
    pub fn new(id: RecordId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            genres: BTreeSet::new(),
            languages: BTreeSet::new(),
            countries: BTreeSet::new(),
            images: Vec::new(),
        }
    }

    /// Add tags to one facet. Duplicates collapse.
    pub fn with_tags<I, S>(mut self, facet: Facet, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = match facet {
            Facet::Genre => &mut self.genres,
            Facet::Language => &mut self.languages,
            Facet::Country => &mut self.countries,
        };
        set.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images.extend(images.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The tag set of one facet.
    pub fn tags(&self, facet: Facet) -> &BTreeSet<String> {
        match facet {
            Facet::Genre => &self.genres,
            Facet::Language => &self.languages,
            Facet::Country => &self.countries,
        }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }
}

/// Stable identity of a record within a catalog.
///
/// Either the explicit key from the input or a slug of the title. Collisions get a
/// `-N` suffix: "title", "title-1", "title-2".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create an id from a title, unique with respect to `existing_ids`.
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use cinefacet_engine::RecordId;
    ///
    /// let existing = HashSet::new();
    /// let id = RecordId::from_title("Ace Ventura: Pet Detective", &existing);
    /// assert_eq!(id.as_str(), "ace-ventura-pet-detective");
    /// ```
    pub fn from_title(title: &str, existing_ids: &HashSet<String>) -> Self {
        let slug = slugify(title);
        let base = if slug.is_empty() { "record".to_string() } else { slug };
        Self::unique(base, existing_ids)
    }

    /// Use an explicit key, suffixed if it is already taken.
    pub fn from_key(key: &str, existing_ids: &HashSet<String>) -> Self {
        Self::unique(key.to_string(), existing_ids)
    }

    fn unique(base: String, existing_ids: &HashSet<String>) -> Self {
        let mut candidate = base.clone();
        let mut counter = 1;
        while existing_ids.contains(&candidate) {
            candidate = format!("{}-{}", base, counter);
            counter += 1;
        }
        RecordId(candidate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lowercase, alphanumerics kept, whitespace/`-`/`_` collapse into single hyphens,
/// everything else dropped. "Ace Ventura: Pet Detective" becomes "ace-ventura-pet-detective".
fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
