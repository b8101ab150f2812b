//! Core domain types: cards, their composition years, and players.

use crate::ids::CardId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Composition year or year range of a work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_new::new)]
pub struct YearSpan {
    /// Year the composition was begun, when known.
    pub begin: Option<i32>,
    /// Year the composition was finished, when known.
    pub end: Option<i32>,
}

impl YearSpan {
    /// A single known year.
    pub fn year(year: i32) -> Self {
        Self {
            begin: Some(year),
            end: None,
        }
    }

    /// Reduces the span to one chronological key.
    ///
    /// The begin year wins when present, otherwise the end year. A span with
    /// neither has no key.
    pub fn representative(&self) -> Option<i32> {
        self.begin.or(self.end)
    }
}

impl std::fmt::Display for YearSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.begin, self.end) {
            (Some(begin), Some(end)) if begin != end => write!(f, "{begin}–{end}"),
            (Some(year), _) | (None, Some(year)) => write!(f, "{year}"),
            (None, None) => write!(f, "undated"),
        }
    }
}

/// A playable audio card.
///
/// Immutable once drawn. `content` is an opaque track reference handed to the
/// audio collaborator; the engine only ever compares [`Card::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    title: String,
    composer: String,
    content: String,
    years: YearSpan,
    key: i32,
}

impl Card {
    /// Creates a card, or `None` when the span carries no usable year.
    #[instrument(skip(title, composer, content))]
    pub fn new(
        id: CardId,
        title: impl Into<String>,
        composer: impl Into<String>,
        content: impl Into<String>,
        years: YearSpan,
    ) -> Option<Self> {
        let key = years.representative()?;
        Some(Self {
            id,
            title: title.into(),
            composer: composer.into(),
            content: content.into(),
            years,
            key,
        })
    }

    /// Creates a card with a single known year and no track reference.
    pub fn dated(id: u64, title: impl Into<String>, year: i32) -> Self {
        Self {
            id: CardId(id),
            title: title.into(),
            composer: String::new(),
            content: String::new(),
            years: YearSpan::year(year),
            key: year,
        }
    }

    /// Returns the card id.
    pub fn id(&self) -> CardId {
        self.id
    }

    /// Returns the work title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the composer name.
    pub fn composer(&self) -> &str {
        &self.composer
    }

    /// Returns the opaque track reference.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the composition span as published.
    pub fn years(&self) -> YearSpan {
        self.years
    }

    /// Returns the chronological key compared during resolution.
    pub fn key(&self) -> i32 {
        self.key
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.composer.is_empty() {
            write!(f, "{} ({})", self.title, self.years)
        } else {
            write!(f, "{}: {} ({})", self.composer, self.title, self.years)
        }
    }
}

/// Index of a player in turn order.
pub type PlayerIndex = usize;

/// A participant in the game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Display name.
    pub name: String,
}

impl Player {
    /// Creates a player with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_year_is_representative() {
        let span = YearSpan::new(Some(1805), Some(1808));
        assert_eq!(span.representative(), Some(1805));
        assert_eq!(span.to_string(), "1805–1808");
    }

    #[test]
    fn test_end_year_used_when_begin_missing() {
        let span = YearSpan::new(None, Some(1911));
        assert_eq!(span.representative(), Some(1911));
        assert_eq!(span.to_string(), "1911");
    }

    #[test]
    fn test_undated_span_yields_no_card() {
        let card = Card::new(CardId(1), "Lost", "Anon", "", YearSpan::default());
        assert!(card.is_none());
    }

    #[test]
    fn test_card_display_includes_composer() {
        let card = Card::new(
            CardId(7),
            "Symphony No. 5",
            "Beethoven",
            "3135556",
            YearSpan::new(Some(1804), Some(1808)),
        )
        .unwrap();
        assert_eq!(card.key(), 1804);
        assert_eq!(card.to_string(), "Beethoven: Symphony No. 5 (1804–1808)");
    }
}
