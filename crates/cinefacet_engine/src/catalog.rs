/* 📖 # How is a catalog loaded?

The input is a JSON array of objects. Each element is decoded on its own, so one
bad entry (no title, `"genres": "Drama"` instead of a list) is skipped and reported
while the rest of the catalog still loads. Only a document that is not a JSON array
at all fails the whole load.

Both the plain field names (`title`, `genres`, ...) and the original data file's
names (`movietitle`, `moviegenres`, ...) are accepted. Missing or null facets become
empty sets.

Only the title and the facets decide whether an entry is usable. A numeric `id` is
used as its decimal string, and an `id` of any other non-string type is ignored in
favour of the title slug. Images are opaque to ranking, so image entries that are
not strings are dropped with a warning and the record is kept.

After loading, the store is read-only: records keep their input order, and the
per-facet vocabularies are computed once.
*/

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use cinefacet_base::{CatalogError, CatalogResult, ErrorKind, FilePath, PalHandle, ResultExt};

use crate::facet::Facet;
use crate::record::{Record, RecordId};
use crate::vocabulary::Vocabulary;

/// Immutable set of records plus the vocabulary of each facet.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    records: Vec<Record>,
    vocabularies: [Vocabulary; 3],
}

/// Outcome of a tolerant load: the catalog built from the good entries plus one
/// `MalformedRecord` error per skipped entry.
#[derive(Debug)]
pub struct LoadReport {
    pub catalog: CatalogStore,
    pub skipped: Vec<CatalogError>,
}

impl LoadReport {
    /// Fail if any entry was skipped, otherwise return the catalog.
    pub fn into_strict(self) -> CatalogResult<CatalogStore> {
        if self.skipped.is_empty() {
            return Ok(self.catalog);
        }
        let count = self.skipped.len();
        Err(Box::new(CatalogError::new(ErrorKind::Multiple {
            errors: self.skipped,
            count,
        })))
    }
}

/// Wire shape of one input entry.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    id: Option<serde_json::Value>,
    #[serde(alias = "movietitle")]
    title: String,
    #[serde(default, alias = "moviegenres")]
    genres: Option<Vec<String>>,
    #[serde(default, alias = "movielanguages")]
    languages: Option<Vec<String>>,
    #[serde(default, alias = "moviecountries")]
    countries: Option<Vec<String>>,
    #[serde(default, alias = "moviemainphotos")]
    images: Option<serde_json::Value>,
}

impl CatalogStore {
    /// Build a store from already-typed records, in the given order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let vocabularies = Facet::ALL.map(|facet| Vocabulary::collect(facet, &records));
        Self {
            records,
            vocabularies,
        }
    }

    /// Decode each JSON value into a record, skipping malformed ones.
    #[instrument(skip_all, fields(entries = values.len()))]
    pub fn load(values: Vec<serde_json::Value>) -> LoadReport {
        let mut records = Vec::with_capacity(values.len());
        let mut skipped = Vec::new();
        let mut existing_ids = HashSet::with_capacity(values.len());

        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<RawRecord>(value) {
                Ok(raw) => {
                    let record = raw.into_record(index, &existing_ids);
                    existing_ids.insert(record.id().as_str().to_string());
                    records.push(record);
                }
                Err(e) => {
                    let error = CatalogError::new(ErrorKind::MalformedRecord {
                        index,
                        reason: e.to_string(),
                    });
                    warn!(index, error = %error, "skipping malformed record");
                    skipped.push(error);
                }
            }
        }

        let catalog = Self::from_records(records);
        info!(
            records = catalog.len(),
            skipped = skipped.len(),
            genres = catalog.vocabulary(Facet::Genre).len(),
            languages = catalog.vocabulary(Facet::Language).len(),
            countries = catalog.vocabulary(Facet::Country).len(),
            "catalog loaded"
        );
        LoadReport { catalog, skipped }
    }

    /// Parse a JSON array document and load it.
    pub fn from_json_str(text: &str) -> CatalogResult<LoadReport> {
        let values: Vec<serde_json::Value> = serde_json::from_str(text).map_err(|e| {
            Box::new(CatalogError::new(ErrorKind::Parse {
                what: "catalog".to_string(),
                reason: e.to_string(),
            }))
        })?;
        Ok(Self::load(values))
    }

    /// All records in load order.
    pub fn all_records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&Record> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn vocabulary(&self, facet: Facet) -> &Vocabulary {
        &self.vocabularies[facet.index()]
    }
}

impl RawRecord {
    fn into_record(self, index: usize, existing_ids: &HashSet<String>) -> Record {
        let id = match self.id.as_ref().and_then(|id| explicit_key(index, id)) {
            Some(key) => RecordId::from_key(&key, existing_ids),
            None => RecordId::from_title(&self.title, existing_ids),
        };
        let images = image_list(index, self.images);
        Record::new(id, self.title)
            .with_tags(Facet::Genre, self.genres.unwrap_or_default())
            .with_tags(Facet::Language, self.languages.unwrap_or_default())
            .with_tags(Facet::Country, self.countries.unwrap_or_default())
            .with_images(images)
    }
}

fn explicit_key(index: usize, id: &serde_json::Value) -> Option<String> {
    match id {
        serde_json::Value::String(key) => Some(key.clone()),
        serde_json::Value::Number(number) => Some(number.to_string()),
        serde_json::Value::Null => None,
        other => {
            warn!(index, id = %other, "ignoring id that is not a string or number");
            None
        }
    }
}

fn image_list(index: usize, images: Option<serde_json::Value>) -> Vec<String> {
    let entries = match images {
        None | Some(serde_json::Value::Null) => return Vec::new(),
        Some(serde_json::Value::String(image)) => return vec![image],
        Some(serde_json::Value::Array(entries)) => entries,
        Some(other) => {
            warn!(index, images = %other, "ignoring images that are not a list");
            return Vec::new();
        }
    };
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            serde_json::Value::String(image) => Some(image),
            other => {
                warn!(index, image = %other, "dropping image entry that is not a string");
                None
            }
        })
        .collect()
}

/// Read and load a catalog file through the PAL.
pub fn load_catalog(pal: &PalHandle, path: &FilePath) -> CatalogResult<LoadReport> {
    debug!(path = %path, "reading catalog");
    let text = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read catalog from {}", path))?;
    CatalogStore::from_json_str(&text).with_context(|| format!("Failed to load catalog from {}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinefacet_base::MockPal;
    use expect_test::expect;
    use serde_json::json;

    #[test]
    fn test_load_preserves_order_and_builds_vocabulary() {
        let report = CatalogStore::load(vec![
            json!({"title": "Zed", "genres": ["Action"], "languages": ["English"]}),
            json!({"title": "Ace", "genres": ["Action", "Comedy"], "countries": ["USA"]}),
            json!({"title": "Ivy", "genres": ["Drama"], "images": ["ivy.jpg"]}),
        ]);

        assert!(report.skipped.is_empty());
        let catalog = report.catalog;
        let titles: Vec<&str> = catalog.all_records().iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["Zed", "Ace", "Ivy"]);
        assert_eq!(
            catalog.vocabulary(Facet::Genre).iter().collect::<Vec<_>>(),
            vec!["Action", "Comedy", "Drama"]
        );
        assert_eq!(catalog.vocabulary(Facet::Language).len(), 1);
        assert_eq!(catalog.vocabulary(Facet::Country).len(), 1);
        assert_eq!(catalog.all_records()[2].images(), ["ivy.jpg"]);
    }

    #[test]
    fn test_load_accepts_original_field_names() {
        let report = CatalogStore::load(vec![json!({
            "movietitle": "Amélie",
            "moviegenres": ["Comedy", "Romance"],
            "movielanguages": ["French"],
            "moviecountries": ["France", "Germany"],
            "moviemainphotos": ["a.jpg", "b.jpg"]
        })]);

        assert!(report.skipped.is_empty());
        let record = &report.catalog.all_records()[0];
        assert_eq!(record.title(), "Amélie");
        assert_eq!(record.id().as_str(), "amélie");
        assert_eq!(record.tags(Facet::Country).len(), 2);
        assert_eq!(record.images(), ["a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_missing_and_null_facets_are_empty() {
        let report = CatalogStore::load(vec![json!({"title": "Bare", "genres": null})]);
        let record = &report.catalog.all_records()[0];
        for facet in Facet::ALL {
            assert!(record.tags(facet).is_empty());
        }
        assert!(record.images().is_empty());
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let report = CatalogStore::load(vec![
            json!({"genres": ["Action"]}),
            json!({"title": "Good"}),
            json!({"title": "Bad", "genres": "Drama"}),
            json!({"title": 42}),
            json!("not an object"),
        ]);

        assert_eq!(report.catalog.len(), 1);
        assert_eq!(report.catalog.all_records()[0].title(), "Good");
        let indices: Vec<usize> = report
            .skipped
            .iter()
            .map(|e| match e.kind() {
                ErrorKind::MalformedRecord { index, .. } => *index,
                other => panic!("Expected MalformedRecord, got {:?}", other),
            })
            .collect();
        assert_eq!(indices, vec![0, 2, 3, 4]);
        expect![[r#"Malformed record at index 0: missing field `title`"#]]
            .assert_eq(&report.skipped[0].to_string());
    }

    #[test]
    fn test_into_strict() {
        let ok = CatalogStore::load(vec![json!({"title": "Good"})]).into_strict();
        assert_eq!(ok.unwrap().len(), 1);

        let err = CatalogStore::load(vec![json!({"title": "Good"}), json!({})])
            .into_strict()
            .unwrap_err();
        match err.kind() {
            ErrorKind::Multiple { count, .. } => assert_eq!(*count, 1),
            other => panic!("Expected Multiple, got {:?}", other),
        }
    }

    #[test]
    fn test_ids_are_unique_and_explicit_keys_win() {
        let report = CatalogStore::load(vec![
            json!({"title": "Solaris"}),
            json!({"title": "Solaris"}),
            json!({"id": "tt0069293", "title": "Solaris"}),
            json!({"id": "solaris", "title": "Remake"}),
        ]);
        let ids: Vec<&str> = report
            .catalog
            .all_records()
            .iter()
            .map(|r| r.id().as_str())
            .collect();
        assert_eq!(ids, vec!["solaris", "solaris-1", "tt0069293", "solaris-2"]);

        let id = report.catalog.all_records()[2].id().clone();
        assert_eq!(report.catalog.get(&id).unwrap().title(), "Solaris");
    }

    #[test]
    fn test_numeric_and_odd_ids_keep_the_record() {
        let report = CatalogStore::load(vec![
            json!({"id": 42, "title": "Heat"}),
            json!({"id": 4.5, "title": "Ran"}),
            json!({"id": true, "title": "Ivy"}),
            json!({"id": null, "title": "Zed"}),
        ]);
        assert!(report.skipped.is_empty());
        let ids: Vec<&str> = report
            .catalog
            .all_records()
            .iter()
            .map(|r| r.id().as_str())
            .collect();
        assert_eq!(ids, vec!["42", "4.5", "ivy", "zed"]);
    }

    #[test]
    fn test_bad_images_keep_the_record() {
        let report = CatalogStore::load(vec![
            json!({"title": "Heat", "genres": ["Crime"], "images": [null]}),
            json!({"title": "Ran", "images": ["ran.jpg", 7, {"src": "x"}, "ran2.jpg"]}),
            json!({"title": "Ivy", "moviemainphotos": "ivy.jpg"}),
            json!({"title": "Zed", "images": {"src": "zed.jpg"}}),
        ]);
        assert!(report.skipped.is_empty());
        let catalog = report.catalog;
        assert_eq!(catalog.len(), 4);
        assert!(catalog.all_records()[0].images().is_empty());
        assert!(catalog.vocabulary(Facet::Genre).contains("Crime"));
        assert_eq!(catalog.all_records()[1].images(), ["ran.jpg", "ran2.jpg"]);
        assert_eq!(catalog.all_records()[2].images(), ["ivy.jpg"]);
        assert!(catalog.all_records()[3].images().is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_non_array() {
        let err = CatalogStore::from_json_str(r#"{"title": "Ace"}"#).unwrap_err();
        match err.kind() {
            ErrorKind::Parse { what, .. } => assert_eq!(what, "catalog"),
            other => panic!("Expected Parse, got {:?}", other),
        }
    }

    #[test]
    fn test_load_catalog_through_pal() {
        let mock = MockPal::new();
        mock.add_text_file(
            "data/movies.json",
            r#"[{"title": "Ace", "genres": ["Action"]}, {"title": "Ivy"}]"#,
        );
        let pal = PalHandle::new(mock);

        let report = load_catalog(&pal, &FilePath::from("data/movies.json")).unwrap();
        assert_eq!(report.catalog.len(), 2);
    }

    #[test]
    fn test_load_catalog_missing_file_has_context() {
        let pal = PalHandle::new(MockPal::new());
        let err = load_catalog(&pal, &FilePath::from("movies.json")).unwrap_err();
        expect![[r#"Failed to read catalog from movies.json: File not found in MockPal: movies.json"#]]
            .assert_eq(&err.to_string());
    }

    #[test]
    fn test_load_catalog_bad_json_has_context() {
        let mock = MockPal::new();
        mock.add_text_file("movies.json", "[{");
        let pal = PalHandle::new(mock);
        let err = load_catalog(&pal, &FilePath::from("movies.json")).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Failed to load catalog from movies.json: Failed to parse catalog:")
        );
    }
}
