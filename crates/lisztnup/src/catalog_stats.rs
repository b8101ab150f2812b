//! Summary statistics over a catalog.

use lisztnup_timeline::{Catalog, CatalogFilter};
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts for one work type.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KindStats {
    /// Root works of this type.
    pub works: usize,
    /// Playable cards of this type.
    pub cards: usize,
}

/// What a catalog yields under a filter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    /// Composers listed.
    pub composers: usize,
    /// Root works, before filtering.
    pub works: usize,
    /// Playable cards after filtering.
    pub cards: usize,
    /// Earliest card year.
    pub earliest: Option<i32>,
    /// Latest card year.
    pub latest: Option<i32>,
    /// Breakdown by work type.
    pub kinds: BTreeMap<String, KindStats>,
}

impl CatalogStats {
    /// Gathers statistics for `catalog` under `filter`.
    pub fn gather(catalog: &Catalog, filter: &CatalogFilter) -> Self {
        let cards = catalog.cards(filter);
        let kinds = catalog
            .works
            .iter()
            .map(|(kind, works)| {
                let single = Catalog {
                    composers: catalog.composers.clone(),
                    works: BTreeMap::from([(kind.clone(), works.clone())]),
                };
                let stats = KindStats {
                    works: works.len(),
                    cards: single.cards(filter).len(),
                };
                (kind.clone(), stats)
            })
            .collect();
        Self {
            composers: catalog.composers.len(),
            works: catalog.work_count(),
            cards: cards.len(),
            earliest: cards.iter().map(|c| c.key()).min(),
            latest: cards.iter().map(|c| c.key()).max(),
            kinds,
        }
    }
}

impl std::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} composers, {} works, {} playable cards", self.composers, self.works, self.cards)?;
        if let (Some(earliest), Some(latest)) = (self.earliest, self.latest) {
            writeln!(f, "Years {}–{}", earliest, latest)?;
        }
        for (kind, stats) in &self.kinds {
            writeln!(f, "  {:<20} {:>5} works {:>6} cards", kind, stats.works, stats.cards)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog() {
        let stats = CatalogStats::gather(&Catalog::default(), &CatalogFilter::default());
        assert_eq!(stats.cards, 0);
        assert_eq!(stats.earliest, None);
        assert!(stats.kinds.is_empty());
    }
}
