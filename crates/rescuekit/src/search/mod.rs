//! Search index and ranker.
//!
//! Scores free-text queries against a static catalog of navigable items.
//! Matching is accent-insensitive: both query and candidate text are
//! lower-cased and stripped of diacritics before comparison, so "mien trung"
//! finds "Miền Trung".

pub mod catalog;
pub mod debounce;

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub use catalog::catalog;
pub use debounce::{DebouncedResults, SearchDebouncer};

/// Category of a navigable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A top-level page.
    Page,
    /// A section within a page.
    Section,
    /// A frequently asked question.
    Faq,
    /// A news article.
    News,
    /// A product feature.
    Feature,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Page => write!(f, "page"),
            Self::Section => write!(f, "section"),
            Self::Faq => write!(f, "faq"),
            Self::News => write!(f, "news"),
            Self::Feature => write!(f, "feature"),
        }
    }
}

/// A navigable item in the search catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description shown under the title.
    pub description: String,
    /// Extra match terms not shown in the UI.
    pub keywords: Vec<String>,
    /// Item category, used for grouping and type bonuses.
    pub kind: ItemKind,
    /// Target route.
    pub path: String,
    /// Optional section anchor within the target page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
}

/// An item together with its query score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredItem {
    /// The matched item.
    pub item: SearchItem,
    /// The additive relevance score (always > 0 in results).
    pub score: u32,
}

/// Ranked results grouped by item kind for presentation.
///
/// Within each bucket the descending-score order is preserved; ties keep
/// catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedResults {
    /// Matching pages.
    pub pages: Vec<ScoredItem>,
    /// Matching page sections.
    pub sections: Vec<ScoredItem>,
    /// Matching FAQs.
    pub faqs: Vec<ScoredItem>,
    /// Matching features.
    pub features: Vec<ScoredItem>,
    /// Matching news entries.
    pub news: Vec<ScoredItem>,
}

impl GroupedResults {
    /// Total number of results across all buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
            + self.sections.len()
            + self.faqs.len()
            + self.features.len()
            + self.news.len()
    }

    /// Whether no bucket holds any result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Normalize text for accent-insensitive matching.
///
/// Lower-cases, decomposes to NFD and drops combining marks. The Vietnamese
/// letter "đ"/"Đ" does not decompose under NFD, so it is substituted
/// explicitly.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if c == 'đ' { 'd' } else { c })
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Score a single candidate against a normalized query.
///
/// Each candidate is scored independently; the contributions are additive:
/// title contains +100 (starts-with a further +50), description contains
/// +50, each keyword contains +30 (equal a further +20), plus a flat type
/// bonus of +10 for pages and +5 for features.
#[must_use]
pub fn score_item(item: &SearchItem, normalized_query: &str) -> u32 {
    let mut score = 0;

    let title = normalize(&item.title);
    if title.contains(normalized_query) {
        score += 100;
        if title.starts_with(normalized_query) {
            score += 50;
        }
    }

    if normalize(&item.description).contains(normalized_query) {
        score += 50;
    }

    for keyword in &item.keywords {
        let keyword = normalize(keyword);
        if keyword.contains(normalized_query) {
            score += 30;
            if keyword == normalized_query {
                score += 20;
            }
        }
    }

    score += match item.kind {
        ItemKind::Page => 10,
        ItemKind::Feature => 5,
        _ => 0,
    };

    score
}

/// Search index over a fixed catalog.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    items: Vec<SearchItem>,
}

impl SearchIndex {
    /// Build an index over the given items. Catalog order is the tie-break
    /// order for equal scores.
    #[must_use]
    pub fn new(items: Vec<SearchItem>) -> Self {
        Self { items }
    }

    /// Build an index over the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(catalog())
    }

    /// The indexed items, in catalog order.
    #[must_use]
    pub fn items(&self) -> &[SearchItem] {
        &self.items
    }

    /// Rank all catalog items against the query, descending by score.
    ///
    /// An empty or whitespace-only query yields no results. Zero-scoring
    /// candidates are dropped; the sort is stable so ties retain catalog
    /// order. Scores are recomputed from scratch on every call.
    #[must_use]
    pub fn ranked(&self, query: &str) -> Vec<ScoredItem> {
        let query = normalize(query.trim());
        if query.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredItem> = self
            .items
            .iter()
            .map(|item| ScoredItem {
                item: item.clone(),
                score: score_item(item, &query),
            })
            .filter(|scored| scored.score > 0)
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored
    }

    /// Rank the query and group the results into the five presentation
    /// buckets, preserving within-bucket rank order.
    #[must_use]
    pub fn search(&self, query: &str) -> GroupedResults {
        let mut grouped = GroupedResults::default();
        for scored in self.ranked(query) {
            match scored.item.kind {
                ItemKind::Page => grouped.pages.push(scored),
                ItemKind::Section => grouped.sections.push(scored),
                ItemKind::Faq => grouped.faqs.push(scored),
                ItemKind::Feature => grouped.features.push(scored),
                ItemKind::News => grouped.news.push(scored),
            }
        }
        grouped
    }
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self::builtin()
    }
}
