//! Filtering, sorting and selector options over the annotated collection
//!
//! Everything here is a pure projection: `evaluate` borrows the collection
//! and returns a fresh ordering each call, and `ViewState` is replaced rather
//! than mutated when the selection changes.

use crate::annotate::AnnotatedEntry;
use crate::category::PriceCategory;
use crate::error::{Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Selector value meaning "no restriction"
pub const ALL: &str = "All";

fn is_all(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL)
}

/// Case-insensitive text ordering used for names and every text column
///
/// Accents and ligatures fold to their ASCII spelling first, so "Æther Vial"
/// sorts with "Aether Hub" rather than after "Z".
pub fn compare_text(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

fn collation_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Lowercased, sorted, deduplicated color names for set comparison
fn color_set(colors: &[String]) -> Vec<String> {
    let mut set: Vec<String> = colors.iter().map(|c| c.trim().to_lowercase()).collect();
    set.sort();
    set.dedup();
    set
}

// ── Filters ──────────────────────────────────────────────────────────

/// Color selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColorFilter {
    #[default]
    All,
    /// Entry's colors contain this one
    Single(String),
    /// Entry's colors are exactly this set
    Combination(Vec<String>),
}

impl ColorFilter {
    /// Parse a selector such as "All", "Red" or "Blue, White"
    pub fn parse(selector: &str) -> Self {
        if is_all(selector) {
            return ColorFilter::All;
        }

        let mut colors: Vec<String> = selector
            .split([',', '/'])
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();

        match colors.len() {
            0 => ColorFilter::All,
            1 => ColorFilter::Single(colors.remove(0)),
            _ => ColorFilter::Combination(colors),
        }
    }

    pub fn matches(&self, colors: &[String]) -> bool {
        match self {
            ColorFilter::All => true,
            ColorFilter::Single(color) => colors.iter().any(|c| c.eq_ignore_ascii_case(color)),
            ColorFilter::Combination(combo) => color_set(colors) == color_set(combo),
        }
    }
}

/// All filters of a view; every enabled filter must pass
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewFilters {
    pub mismatch_only: bool,
    pub move_up_only: bool,
    /// Exact current shelf category, None for all
    pub category: Option<String>,
    pub color: ColorFilter,
    /// Exact classified category, None for all
    pub should_be: Option<PriceCategory>,
}

impl ViewFilters {
    pub fn matches(&self, entry: &AnnotatedEntry) -> bool {
        (!self.mismatch_only || entry.is_mismatch)
            && (!self.move_up_only || entry.needs_move_up)
            && self
                .category
                .as_deref()
                .map_or(true, |c| entry.current_category == c)
            && self.color.matches(&entry.colors)
            && self.should_be.map_or(true, |s| entry.should_be == s)
    }
}

// ── Sorting ──────────────────────────────────────────────────────────

/// Sortable columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Price,
    CurrentCategory,
    ShouldBeCategory,
    Colors,
    Edition,
    Rarity,
    Modifier,
    Quantity,
    CollectorNumber,
}

/// Extracted value a row is sorted by
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Text(String),
    Number(f64),
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => compare_text(a, b),
            // A key always extracts the same variant
            (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        }
    }
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::CurrentCategory => "current_category",
            SortKey::ShouldBeCategory => "should_be_category",
            SortKey::Colors => "colors",
            SortKey::Edition => "edition",
            SortKey::Rarity => "rarity",
            SortKey::Modifier => "modifier",
            SortKey::Quantity => "quantity",
            SortKey::CollectorNumber => "collector_number",
        }
    }

    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Name,
            SortKey::Price,
            SortKey::CurrentCategory,
            SortKey::ShouldBeCategory,
            SortKey::Colors,
            SortKey::Edition,
            SortKey::Rarity,
            SortKey::Modifier,
            SortKey::Quantity,
            SortKey::CollectorNumber,
        ]
    }

    /// Value of this column for a row; absent fields read as "" or 0
    pub fn extract(&self, row: &AnnotatedEntry) -> SortValue {
        let card = &row.entry.card;
        match self {
            SortKey::Name => SortValue::Text(row.name().to_string()),
            SortKey::Price => SortValue::Number(row.price.unwrap_or(0.0)),
            SortKey::CurrentCategory => SortValue::Text(row.current_category.clone()),
            SortKey::ShouldBeCategory => SortValue::Text(row.should_be.as_str().to_string()),
            SortKey::Colors => SortValue::Text(row.colors.join(", ")),
            SortKey::Edition => SortValue::Text(card.edition.editionname.clone()),
            SortKey::Rarity => SortValue::Text(card.rarity.clone()),
            SortKey::Modifier => SortValue::Text(row.entry.modifier.clone()),
            SortKey::Quantity => SortValue::Number(f64::from(row.entry.quantity)),
            SortKey::CollectorNumber => SortValue::Text(card.collector_number.clone()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = TrackerError;

    /// Accepts snake_case, camelCase or kebab-case column names
    fn from_str(s: &str) -> Result<Self> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        SortKey::all()
            .iter()
            .copied()
            .find(|key| key.as_str().replace('_', "") == wanted)
            .ok_or_else(|| TrackerError::InvalidSelection(format!("unknown sort key: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(TrackerError::InvalidSelection(format!(
                "unknown sort direction: {}",
                s
            ))),
        }
    }
}

/// An explicit column sort
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Clicking the same column flips direction, a new column starts ascending
    pub fn toggle(current: Option<SortState>, key: SortKey) -> SortState {
        match current {
            Some(sort) if sort.key == key => SortState::new(key, sort.direction.flipped()),
            _ => SortState::new(key, SortDirection::Asc),
        }
    }

    fn compare(&self, a: &AnnotatedEntry, b: &AnnotatedEntry) -> Ordering {
        let ordering = self.key.extract(a).compare(&self.key.extract(b));
        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

// ── View state ───────────────────────────────────────────────────────

/// The full user selection: filters plus optional explicit sort
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub filters: ViewFilters,
    pub sort: Option<SortState>,
}

impl ViewState {
    pub fn with_filters(self, filters: ViewFilters) -> Self {
        Self { filters, ..self }
    }

    /// Apply a column click
    pub fn with_sort_key(self, key: SortKey) -> Self {
        Self {
            sort: Some(SortState::toggle(self.sort, key)),
            ..self
        }
    }

    pub fn with_sort(self, sort: Option<SortState>) -> Self {
        Self { sort, ..self }
    }
}

/// Raw selector values as they arrive from a query string or the command line
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub mismatch_only: bool,
    pub move_up_only: bool,
    pub category: Option<String>,
    pub color: Option<String>,
    pub should_be: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl Selection {
    /// Validate the selection into a view state
    pub fn into_view_state(self) -> Result<ViewState> {
        let should_be = match self.should_be.as_deref() {
            Some(label) if !is_all(label) => Some(PriceCategory::from_label(label).ok_or_else(
                || TrackerError::InvalidSelection(format!("unknown price category: {}", label)),
            )?),
            _ => None,
        };

        let sort = match self.sort.as_deref() {
            Some(key) if !key.trim().is_empty() => {
                let direction = match self.direction.as_deref() {
                    Some(d) => d.parse()?,
                    None => SortDirection::Asc,
                };
                Some(SortState::new(key.parse()?, direction))
            }
            _ => None,
        };

        let filters = ViewFilters {
            mismatch_only: self.mismatch_only,
            move_up_only: self.move_up_only,
            category: self.category.filter(|c| !is_all(c)),
            color: self.color.as_deref().map(ColorFilter::parse).unwrap_or_default(),
            should_be,
        };

        Ok(ViewState { filters, sort })
    }
}

// ── Evaluation ───────────────────────────────────────────────────────

/// Filter and order the collection for display
///
/// Rows are first ordered by name (case-insensitive); an explicit sort is then
/// applied with a stable sort so equal keys keep name order.
pub fn evaluate<'a>(entries: &'a [AnnotatedEntry], state: &ViewState) -> Vec<&'a AnnotatedEntry> {
    let mut rows: Vec<&AnnotatedEntry> = entries
        .iter()
        .filter(|entry| state.filters.matches(entry))
        .collect();

    rows.sort_by(|a, b| compare_text(a.name(), b.name()));

    if let Some(sort) = state.sort {
        rows.sort_by(|a, b| sort.compare(a, b));
    }

    rows
}

/// Option lists for the selector dropdowns, each starting with "All"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectorOptions {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub should_be: Vec<String>,
}

pub fn selector_options(entries: &[AnnotatedEntry]) -> SelectorOptions {
    SelectorOptions {
        categories: category_options(entries),
        colors: color_options(entries),
        should_be: should_be_options(entries),
    }
}

/// Distinct values keyed case-insensitively, first spelling wins
fn distinct_sorted(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for value in values {
        seen.entry(value.to_lowercase()).or_insert(value);
    }
    std::iter::once(ALL.to_string())
        .chain(seen.into_values())
        .collect()
}

pub fn category_options(entries: &[AnnotatedEntry]) -> Vec<String> {
    distinct_sorted(entries.iter().map(|e| e.current_category.clone()))
}

/// Single colors first, then the multi-color combinations present
pub fn color_options(entries: &[AnnotatedEntry]) -> Vec<String> {
    let singles = distinct_sorted(entries.iter().flat_map(|e| e.colors.iter().cloned()));

    let combos = distinct_sorted(entries.iter().filter(|e| e.colors.len() > 1).map(|e| {
        let mut combo = e.colors.clone();
        combo.sort_by(|a, b| compare_text(a, b));
        combo.dedup();
        combo.join(", ")
    }));

    // Both lists start with "All"; keep only the first
    singles
        .into_iter()
        .chain(combos.into_iter().skip(1))
        .collect()
}

/// Classified categories present, in rank order
pub fn should_be_options(entries: &[AnnotatedEntry]) -> Vec<String> {
    std::iter::once(ALL.to_string())
        .chain(
            PriceCategory::all()
                .iter()
                .filter(|c| entries.iter().any(|e| e.should_be == **c))
                .map(|c| c.as_str().to_string()),
        )
        .collect()
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
