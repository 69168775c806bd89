//! Priced and classified inventory entries

use crate::category::{classify, shelf_rank, PriceCategory};
use crate::pricing::{PriceSource, ResolvedPrice};
use mtg_common::CardEntry;
use serde::Serialize;

/// An inventory entry together with everything derived from its price
///
/// The wrapped entry is the untouched snapshot; all other fields are computed
/// once in [`AnnotatedEntry::new`].
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedEntry {
    pub entry: CardEntry,
    pub price: Option<f64>,
    pub price_source: PriceSource,
    /// Price came from the first-choice vendor rather than a fallback
    pub primary_quote: bool,
    pub current_category: String,
    pub should_be: PriceCategory,
    pub colors: Vec<String>,
    pub is_mismatch: bool,
    pub needs_move_up: bool,
}

impl AnnotatedEntry {
    pub fn new(entry: CardEntry, resolved: ResolvedPrice) -> Self {
        let current_category = entry.current_category().to_string();
        let should_be = classify(resolved.price);
        let colors = entry.card.oracle_card.normalized_colors();
        let is_mismatch = PriceCategory::from_label(&current_category) != Some(should_be);
        let needs_move_up = should_be.rank() > shelf_rank(&current_category);

        Self {
            entry,
            price: resolved.price,
            price_source: resolved.source,
            primary_quote: resolved.price.is_some() && resolved.source.is_primary(),
            current_category,
            should_be,
            colors,
            is_mismatch,
            needs_move_up,
        }
    }

    pub fn name(&self) -> &str {
        self.entry.name()
    }
}
