//! Terminal rendering of rankings and vocabularies.

use cinefacet_engine::{RankedEntry, Ranking};

/// Titles longer than this are cut and suffixed with `...`.
pub const TITLE_WIDTH: usize = 17;

pub fn truncate_title(title: &str) -> String {
    if title.chars().count() > TITLE_WIDTH {
        let head: String = title.chars().take(TITLE_WIDTH).collect();
        format!("{}...", head)
    } else {
        title.to_string()
    }
}

fn render_entry(entry: &RankedEntry, fast_path: bool) -> String {
    let score = if fast_path {
        "-".to_string()
    } else {
        entry.match_count.to_string()
    };
    format!(
        "{:>3}  {:<20}  {}",
        score,
        truncate_title(&entry.title),
        entry.genres.join(", ")
    )
}

/// One line per entry, followed by a count line.
pub fn render_ranking(ranking: &Ranking<'_>, catalog_len: usize) -> String {
    let mut out = String::new();
    for entry in ranking.to_summary() {
        out.push_str(render_entry(&entry, ranking.is_fast_path()).trim_end());
        out.push('\n');
    }
    out.push_str(&format!("{} of {} records\n", ranking.len(), catalog_len));
    out
}

pub fn render_values<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for value in values {
        out.push_str(value);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinefacet_engine::{CatalogStore, Facet, QueryState, rank};
    use expect_test::expect;
    use serde_json::json;

    fn catalog() -> CatalogStore {
        CatalogStore::load(vec![
            json!({"title": "Dr. Strangelove or: How I Learned to Stop Worrying", "genres": ["Comedy", "War"]}),
            json!({"title": "Heat", "genres": ["Crime", "Action"]}),
            json!({"title": "Ran", "genres": ["Drama", "War"]}),
        ])
        .catalog
    }

    #[test]
    fn test_truncate_title() {
        assert_eq!(truncate_title("Heat"), "Heat");
        assert_eq!(truncate_title("Cinema Paradiso!!"), "Cinema Paradiso!!");
        assert_eq!(truncate_title("The Good, the Bad and the Ugly"), "The Good, the Bad...");
        assert_eq!(truncate_title("Ôkami to kôshi no jikan"), "Ôkami to kôshi no...");
    }

    #[test]
    fn test_render_fast_path() {
        let catalog = catalog();
        let ranking = rank(&catalog, &QueryState::new());
        expect![[r#"
              -  Dr. Strangelove o...  Comedy, War
              -  Heat                  Action, Crime
              -  Ran                   Drama, War
            3 of 3 records
        "#]]
        .assert_eq(&render_ranking(&ranking, catalog.len()));
    }

    #[test]
    fn test_render_scored() {
        let catalog = catalog();
        let mut query = QueryState::new();
        query.toggle_facet_value(Facet::Genre, "War");
        let ranking = rank(&catalog, &query);
        expect![[r#"
              1  Dr. Strangelove o...  Comedy, War
              1  Ran                   Drama, War
            2 of 3 records
        "#]]
        .assert_eq(&render_ranking(&ranking, catalog.len()));
    }

    #[test]
    fn test_render_values() {
        assert_eq!(render_values(["France", "Italy"]), "France\nItaly\n");
        assert_eq!(render_values(Vec::<&str>::new()), "");
    }
}
