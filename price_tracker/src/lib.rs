//! Price Tracker - MTG inventory pricing and shelf checks
//!
//! Prices every card of a deck-hosted inventory, sorts it into the physical
//! price buckets ($1 .. $5, $5+) and flags cards shelved in the wrong bucket.

pub mod annotate;
pub mod api;
pub mod batch;
pub mod category;
pub mod config;
pub mod error;
pub mod formatters;
pub mod pricing;
pub mod view;
pub mod web;

pub use annotate::AnnotatedEntry;
pub use batch::{resolve_all, FetchMode, PriceStrategy};
pub use category::{classify, PriceCategory};
pub use config::{PricingSource, TrackerConfig};
pub use error::{Result, TrackerError};
pub use pricing::{PriceSource, ResolvedPrice};
pub use view::{evaluate, Selection, SortDirection, SortKey, ViewState};
