//! Shared types for MTG price tracking
//!
//! Wire models for the Archidekt inventory (deck cards with embedded vendor
//! quotes) and the Scryfall card endpoint, plus the error type shared by every
//! HTTP client in the workspace.

pub mod archidekt;
pub mod error;
pub mod scryfall;

pub use archidekt::{CardEntry, CardPrinting, Edition, EntryId, OracleCard, VendorPrices};
pub use error::{MtgError, Result};
pub use scryfall::{ScryfallCard, ScryfallError, ScryfallPrices};
