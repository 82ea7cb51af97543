/* 📖 # How does a session guarantee the caller sees the newest result?

Every query mutation bumps a generation counter while the query's write lock is
held, so a `(generation, query)` snapshot taken under the read lock is always
consistent. `refresh` ranks that snapshot without holding any lock, then publishes
the result only if nothing newer has been published in the meantime. A slow pass
for an old query can finish last and still never replace a newer result.
*/

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::CatalogStore;
use crate::matcher::MatcherOptions;
use crate::query::{QueryAction, QueryState};
use crate::rank::{RankedEntry, rank_with};

/// A published ranking together with the query generation it was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedView {
    pub generation: u64,
    pub fast_path: bool,
    pub entries: Vec<RankedEntry>,
}

/// Shared catalog plus a mutable query, safe to drive from several threads.
pub struct RankSession {
    catalog: Arc<CatalogStore>,
    options: MatcherOptions,
    query: RwLock<QueryState>,
    generation: AtomicU64,
    published: Mutex<Arc<RankedView>>,
}

impl RankSession {
    /// Start a session with an empty query; the initial view is the catalog order.
    pub fn new(catalog: Arc<CatalogStore>, options: MatcherOptions) -> Self {
        let initial = Self::compute(&catalog, &QueryState::new(), &options, 0);
        Self {
            catalog,
            options,
            query: RwLock::new(QueryState::new()),
            generation: AtomicU64::new(0),
            published: Mutex::new(Arc::new(initial)),
        }
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// Snapshot of the current query.
    pub fn query(&self) -> QueryState {
        self.query.read().clone()
    }

    /// Current query generation. Starts at 0, bumped by every action.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Apply a user action and return the new generation.
    /// The published view is stale until the next `refresh`.
    pub fn apply(&self, action: QueryAction) -> u64 {
        let mut query = self.query.write();
        query.apply(action);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        trace!(generation, "query changed");
        generation
    }

    /// Rank the current query and publish the result unless a newer one already is.
    /// Returns whichever view is published afterwards.
    pub fn refresh(&self) -> Arc<RankedView> {
        let (generation, query) = {
            let query = self.query.read();
            (self.generation.load(Ordering::Acquire), query.clone())
        };

        let view = Arc::new(Self::compute(&self.catalog, &query, &self.options, generation));

        let mut published = self.published.lock();
        if published.generation <= generation {
            *published = view;
        } else {
            debug!(
                stale = generation,
                current = published.generation,
                "discarding stale ranking"
            );
        }
        published.clone()
    }

    /// The most recently published view.
    pub fn latest(&self) -> Arc<RankedView> {
        self.published.lock().clone()
    }

    fn compute(
        catalog: &CatalogStore,
        query: &QueryState,
        options: &MatcherOptions,
        generation: u64,
    ) -> RankedView {
        let ranking = rank_with(catalog, query, options);
        RankedView {
            generation,
            fast_path: ranking.is_fast_path(),
            entries: ranking.to_summary(),
        }
    }
}
