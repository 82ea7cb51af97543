use std::collections::BTreeSet;

use crate::facet::Facet;
use crate::record::Record;

/// The distinct values one facet takes across a catalog, kept sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    values: BTreeSet<String>,
}

impl Vocabulary {
    /// Union of the facet's tag sets across `records`.
    pub fn collect<'a>(facet: Facet, records: impl IntoIterator<Item = &'a Record>) -> Self {
        let values = records
            .into_iter()
            .flat_map(|record| record.tags(facet).iter().cloned())
            .collect();
        Self { values }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.contains(value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Values containing `fragment`, ignoring case. An empty fragment matches everything.
    ///
    /// ```
    /// use std::collections::HashSet;
    /// use cinefacet_engine::{Facet, Record, RecordId, Vocabulary};
    ///
    /// let record = Record::new(RecordId::from_title("Solaris", &HashSet::new()), "Solaris")
    ///     .with_tags(Facet::Country, ["Soviet Union", "United States"]);
    /// let countries = Vocabulary::collect(Facet::Country, [&record]);
    /// assert_eq!(countries.matching("uni"), vec!["Soviet Union", "United States"]);
    /// ```
    pub fn matching(&self, fragment: &str) -> Vec<&str> {
        let needle = fragment.to_lowercase();
        self.iter()
            .filter(|value| value.to_lowercase().contains(&needle))
            .collect()
    }
}
