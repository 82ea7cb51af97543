/* 📖 # How are records filtered and ranked?

`rank` is a pure function of (catalog, query). It never writes to the catalog:
every pass borrows the records and builds fresh `ScoredRecord`s next to them.

1. **Fast path**: with no selection and no search text, the catalog is returned
   as-is, in load order, with a match count of 0.
2. **Score**: every record gets `match_count` = number of selected genres it has
   + number of selected languages it has + number of selected countries it has
   + 1 if the search text matches its title.
3. **Filter**: a record survives only if, for every facet with a selection, it has
   *all* selected values (AND within and across facets), and, if there is search
   text, its title matched. Facet overlap alone never satisfies the search text.
4. **Sort**: match count descending, then title by `compare_titles`. The sort is
   stable, so fully tied records stay in load order.

The scoring of one record never looks at another record.
*/

use serde::Serialize;
use tracing::{debug, instrument};

use crate::catalog::CatalogStore;
use crate::collate::compare_titles;
use crate::facet::Facet;
use crate::matcher::{MatcherOptions, TitleMatcher};
use crate::query::QueryState;
use crate::record::{Record, RecordId};

/// A record paired with its score for one ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredRecord<'a> {
    pub record: &'a Record,
    pub match_count: u32,
}

/// Ordered result of one ranking pass.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    entries: Vec<ScoredRecord<'a>>,
    fast_path: bool,
}

/// Owned, serializable view of a ranked record for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub id: RecordId,
    pub title: String,
    pub match_count: u32,
    pub genres: Vec<String>,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub images: Vec<String>,
}

impl<'a> Ranking<'a> {
    pub fn entries(&self) -> &[ScoredRecord<'a>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when the query was empty and the catalog order was returned unscored.
    pub fn is_fast_path(&self) -> bool {
        self.fast_path
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.entries.iter().map(|entry| entry.record)
    }

    pub fn to_summary(&self) -> Vec<RankedEntry> {
        self.entries.iter().map(RankedEntry::from).collect()
    }
}

impl From<&ScoredRecord<'_>> for RankedEntry {
    fn from(scored: &ScoredRecord<'_>) -> Self {
        let tags = |facet: Facet| -> Vec<String> {
            scored.record.tags(facet).iter().cloned().collect()
        };
        Self {
            id: scored.record.id().clone(),
            title: scored.record.title().to_string(),
            match_count: scored.match_count,
            genres: tags(Facet::Genre),
            languages: tags(Facet::Language),
            countries: tags(Facet::Country),
            images: scored.record.images().to_vec(),
        }
    }
}

/// Rank with literal search text matching.
pub fn rank<'a>(catalog: &'a CatalogStore, query: &QueryState) -> Ranking<'a> {
    rank_with(catalog, query, &MatcherOptions::default())
}

/// Rank with explicit matcher options.
#[instrument(skip_all, fields(records = catalog.len()))]
pub fn rank_with<'a>(
    catalog: &'a CatalogStore,
    query: &QueryState,
    options: &MatcherOptions,
) -> Ranking<'a> {
    if query.is_empty() {
        debug!("empty query, returning catalog order");
        return Ranking {
            entries: catalog
                .all_records()
                .iter()
                .map(|record| ScoredRecord {
                    record,
                    match_count: 0,
                })
                .collect(),
            fast_path: true,
        };
    }

    let matcher = TitleMatcher::new(query.search_text(), options);

    let mut entries: Vec<ScoredRecord<'a>> = catalog
        .all_records()
        .iter()
        .filter_map(|record| {
            let title_matched = matcher
                .as_ref()
                .is_some_and(|matcher| matcher.is_match(record.title()));
            if !passes_filters(record, query, matcher.is_some(), title_matched) {
                return None;
            }
            Some(ScoredRecord {
                record,
                match_count: match_count(record, query, title_matched),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.match_count
            .cmp(&a.match_count)
            .then_with(|| compare_titles(a.record.title(), b.record.title()))
    });

    debug!(results = entries.len(), "ranked");
    Ranking {
        entries,
        fast_path: false,
    }
}

/// Selected values of `facet` that the record carries.
fn facet_overlap(record: &Record, query: &QueryState, facet: Facet) -> u32 {
    let tags = record.tags(facet);
    query
        .selected(facet)
        .iter()
        .filter(|value| tags.contains(value.as_str()))
        .count() as u32
}

fn match_count(record: &Record, query: &QueryState, title_matched: bool) -> u32 {
    let facets: u32 = Facet::ALL
        .iter()
        .map(|&facet| facet_overlap(record, query, facet))
        .sum();
    facets + u32::from(title_matched)
}

fn passes_filters(
    record: &Record,
    query: &QueryState,
    has_search_text: bool,
    title_matched: bool,
) -> bool {
    let facets_ok = Facet::ALL
        .iter()
        .all(|&facet| query.selected(facet).is_subset(record.tags(facet)));
    facets_ok && (!has_search_text || title_matched)
}
