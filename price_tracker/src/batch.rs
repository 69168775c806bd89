//! Resolving a whole inventory snapshot
//!
//! Each entry is resolved on its own: one failed lookup only degrades that
//! entry. Results are handed back only once the full batch is done, so a
//! caller never sees a half-priced collection.

use crate::annotate::AnnotatedEntry;
use crate::api::ScryfallClient;
use crate::pricing::{resolve_embedded, resolve_scryfall, PriceSource, ResolvedPrice};
use mtg_common::CardEntry;
use std::time::Duration;

/// Pause between sequential Scryfall requests
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(150);

/// How remote lookups are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// One request at a time with a fixed pause in between
    Sequential { delay: Duration },
    /// All requests in flight at once
    Parallel,
}

impl Default for FetchMode {
    fn default() -> Self {
        FetchMode::Sequential {
            delay: DEFAULT_REQUEST_DELAY,
        }
    }
}

/// Where prices come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceStrategy {
    /// Vendor quotes already embedded in the inventory entries
    #[default]
    Embedded,
    /// Scryfall lookups by Scryfall id
    Scryfall(FetchMode),
}

/// Resolve and annotate every entry, preserving input order
pub async fn resolve_all(
    entries: Vec<CardEntry>,
    strategy: PriceStrategy,
    scryfall: &ScryfallClient,
) -> Vec<AnnotatedEntry> {
    log::info!(
        "Resolving prices for {} entries ({:?})",
        entries.len(),
        strategy
    );

    let annotated = match strategy {
        PriceStrategy::Embedded => resolve_all_embedded(entries),
        PriceStrategy::Scryfall(FetchMode::Sequential { delay }) => {
            resolve_sequential(entries, scryfall, delay).await
        }
        PriceStrategy::Scryfall(FetchMode::Parallel) => resolve_parallel(entries, scryfall).await,
    };

    let priced = annotated.iter().filter(|e| e.price.is_some()).count();
    log::info!(
        "Resolved {} entries ({} priced, {} without price)",
        annotated.len(),
        priced,
        annotated.len() - priced
    );

    annotated
}

/// Resolve from embedded quotes only (no network)
pub fn resolve_all_embedded(entries: Vec<CardEntry>) -> Vec<AnnotatedEntry> {
    entries
        .into_iter()
        .map(|entry| {
            let resolved = resolve_embedded(&entry.card, &entry.modifier);
            AnnotatedEntry::new(entry, resolved)
        })
        .collect()
}

async fn resolve_sequential(
    entries: Vec<CardEntry>,
    scryfall: &ScryfallClient,
    delay: Duration,
) -> Vec<AnnotatedEntry> {
    let total = entries.len();
    let mut annotated = Vec::with_capacity(total);

    for (index, entry) in entries.into_iter().enumerate() {
        let resolved = resolve_scryfall(&entry, scryfall).await;
        annotated.push(AnnotatedEntry::new(entry, resolved));

        if index + 1 < total && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    annotated
}

async fn resolve_parallel(entries: Vec<CardEntry>, scryfall: &ScryfallClient) -> Vec<AnnotatedEntry> {
    let handles: Vec<_> = entries
        .iter()
        .map(|entry| {
            let entry = entry.clone();
            let client = scryfall.clone();
            tokio::spawn(async move { resolve_scryfall(&entry, &client).await })
        })
        .collect();

    let mut annotated = Vec::with_capacity(entries.len());
    for (entry, handle) in entries.into_iter().zip(handles) {
        let resolved = match handle.await {
            Ok(resolved) => resolved,
            Err(e) => {
                log::error!("Price lookup task for {} failed: {}", entry.name(), e);
                ResolvedPrice {
                    price: None,
                    source: PriceSource::Error,
                }
            }
        };
        annotated.push(AnnotatedEntry::new(entry, resolved));
    }

    annotated
}
