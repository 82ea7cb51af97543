pub mod catalog;
pub mod collate;
pub mod config;
pub mod facet;
pub mod matcher;
pub mod query;
pub mod rank;
pub mod record;
pub mod session;
pub mod vocabulary;

pub use catalog::{CatalogStore, LoadReport, load_catalog};
pub use collate::compare_titles;
pub use config::{Config, load_config};
pub use facet::Facet;
pub use matcher::{MatcherOptions, SearchMode, TitleMatcher};
pub use query::{QueryAction, QueryState};
pub use rank::{RankedEntry, Ranking, ScoredRecord, rank, rank_with};
pub use record::{Record, RecordId};
pub use session::{RankSession, RankedView};
pub use vocabulary::Vocabulary;
