//! Curated work catalog, flattened into playable cards.
//!
//! The catalog is the JSON dataset produced by the offline data pipeline:
//! a list of composers and, per work type, a list of root works with their
//! scored parts and streaming track ids.

use crate::card::{Card, YearSpan};
use crate::ids::CardId;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Composer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogComposer {
    /// Stable composer id.
    pub gid: String,
    /// Display name.
    pub name: String,
    /// Birth year, when known.
    #[serde(default)]
    pub birth_year: Option<i32>,
    /// Death year, when known.
    #[serde(default)]
    pub death_year: Option<i32>,
}

/// A curated part of a work with its track references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPart {
    /// Part name (movement, aria, ...).
    pub name: String,
    /// Streaming track ids, best first.
    #[serde(default)]
    pub deezer: Vec<u64>,
    /// Popularity relative to the work's best part (0-100).
    #[serde(default)]
    pub score: f64,
}

/// A curated root work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogWork {
    /// Stable work id.
    pub gid: String,
    /// Gid of the composer.
    pub composer: String,
    /// Work title.
    pub name: String,
    /// Work type (symphony, opera, ...).
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Year composition began.
    #[serde(default)]
    pub begin_year: Option<i32>,
    /// Year composition finished.
    #[serde(default)]
    pub end_year: Option<i32>,
    /// Work significance score.
    #[serde(default)]
    pub score: f64,
    /// Curated parts.
    #[serde(default)]
    pub parts: Vec<CatalogPart>,
}

/// The full dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// All composers referenced by works.
    #[serde(default)]
    pub composers: Vec<CatalogComposer>,
    /// Works grouped by type.
    #[serde(default)]
    pub works: BTreeMap<String, Vec<CatalogWork>>,
}

/// Restricts which works become cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Work types to keep; empty keeps every type.
    pub kinds: Vec<String>,
    /// Minimum work score.
    pub min_score: f64,
}

impl Catalog {
    /// Parses a catalog from JSON text.
    #[instrument(skip(json), fields(bytes = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)
            .map_err(|e| CatalogError::new(format!("Failed to parse catalog: {}", e)))?;
        debug!(
            composers = catalog.composers.len(),
            types = catalog.works.len(),
            "Catalog parsed"
        );
        Ok(catalog)
    }

    /// Loads a catalog from a JSON file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CatalogError::new(format!("Failed to read catalog file: {}", e)))?;
        let catalog = Self::from_json(&content)?;
        info!(works = catalog.work_count(), "Catalog loaded");
        Ok(catalog)
    }

    /// Total number of root works across all types.
    pub fn work_count(&self) -> usize {
        self.works.values().map(Vec::len).sum()
    }

    /// Flattens the catalog into cards: one per part that has a track.
    ///
    /// Card ids are assigned sequentially in catalog order, so a given file
    /// always yields the same ids.
    #[instrument(skip(self))]
    pub fn cards(&self, filter: &CatalogFilter) -> Vec<Card> {
        let composers: HashMap<&str, &str> = self
            .composers
            .iter()
            .map(|c| (c.gid.as_str(), c.name.as_str()))
            .collect();

        let mut cards = Vec::new();
        let mut next_id = 1;
        for (kind, works) in &self.works {
            if !filter.kinds.is_empty() && !filter.kinds.iter().any(|k| k == kind) {
                continue;
            }
            for work in works.iter().filter(|w| w.score >= filter.min_score) {
                let years = YearSpan::new(work.begin_year, work.end_year);
                let composer = composers.get(work.composer.as_str()).copied().unwrap_or("");
                for part in &work.parts {
                    let Some(track) = part.deezer.first() else {
                        continue;
                    };
                    let title = if part.name == work.name {
                        work.name.clone()
                    } else {
                        format!("{}: {}", work.name, part.name)
                    };
                    if let Some(card) =
                        Card::new(CardId(next_id), title, composer, track.to_string(), years)
                    {
                        cards.push(card);
                        next_id += 1;
                    }
                }
            }
        }
        debug!(count = cards.len(), "Catalog flattened into cards");
        cards
    }
}

/// Catalog loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Catalog error: {} at {}:{}", message, file, line)]
pub struct CatalogError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CatalogError {
    /// Creates a new catalog error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "composers": [
            {"gid": "c1", "name": "Ludwig van Beethoven", "birth_year": 1770, "death_year": 1827},
            {"gid": "c2", "name": "Claude Debussy", "birth_year": 1862, "death_year": 1918}
        ],
        "works": {
            "symphony": [
                {"gid": "w1", "composer": "c1", "name": "Symphony No. 5", "type": "symphony",
                 "begin_year": 1804, "end_year": 1808, "score": 90.0,
                 "parts": [
                    {"name": "I. Allegro con brio", "deezer": [11, 12], "score": 100.0},
                    {"name": "II. Andante con moto", "deezer": [], "score": 40.0}
                 ]}
            ],
            "orchestral": [
                {"gid": "w2", "composer": "c2", "name": "La mer", "type": "orchestral",
                 "begin_year": null, "end_year": 1905, "score": 60.0,
                 "parts": [{"name": "La mer", "deezer": [21], "score": 100.0}]},
                {"gid": "w3", "composer": "c2", "name": "Undated", "type": "orchestral",
                 "begin_year": null, "end_year": null, "score": 10.0,
                 "parts": [{"name": "Undated", "deezer": [31], "score": 100.0}]}
            ]
        }
    }"#;

    #[test]
    fn test_parts_without_tracks_are_skipped() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let cards = catalog.cards(&CatalogFilter::default());
        let titles: Vec<_> = cards.iter().map(|c| c.title().to_string()).collect();
        assert_eq!(titles, vec!["La mer", "Symphony No. 5: I. Allegro con brio"]);
    }

    #[test]
    fn test_composer_and_year_resolved() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let cards = catalog.cards(&CatalogFilter::default());
        let la_mer = &cards[0];
        assert_eq!(la_mer.composer(), "Claude Debussy");
        assert_eq!(la_mer.key(), 1905);
        assert_eq!(la_mer.content(), "21");
    }

    #[test]
    fn test_filter_by_kind_and_score() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let filter = CatalogFilter {
            kinds: vec!["symphony".to_string()],
            min_score: 50.0,
        };
        let cards = catalog.cards(&filter);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].key(), 1804);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = Catalog::from_json("{ not json").unwrap_err();
        assert!(err.message.contains("Failed to parse catalog"));
    }
}
