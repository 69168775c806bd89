//! Price bucket classification
//!
//! Buckets are whole-dollar shelves with a 0.40 buffer above each boundary, so
//! a $1.39 card still lives on the $1 shelf and a $1.40 card moves to $2.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bounds (exclusive) for each priced bucket, checked in order
const THRESHOLDS: [(f64, PriceCategory); 5] = [
    (1.4, PriceCategory::One),
    (2.4, PriceCategory::Two),
    (3.4, PriceCategory::Three),
    (4.4, PriceCategory::Four),
    (5.4, PriceCategory::Five),
];

/// One of the seven price buckets
///
/// Variant order is the rank order used for move-up comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceCategory {
    #[serde(rename = "No price")]
    NoPrice,
    #[serde(rename = "$1")]
    One,
    #[serde(rename = "$2")]
    Two,
    #[serde(rename = "$3")]
    Three,
    #[serde(rename = "$4")]
    Four,
    #[serde(rename = "$5")]
    Five,
    #[serde(rename = "+$5")]
    OverFive,
}

impl PriceCategory {
    /// Returns the shelf label (e.g., "$3", "+$5")
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceCategory::NoPrice => "No price",
            PriceCategory::One => "$1",
            PriceCategory::Two => "$2",
            PriceCategory::Three => "$3",
            PriceCategory::Four => "$4",
            PriceCategory::Five => "$5",
            PriceCategory::OverFive => "+$5",
        }
    }

    /// Rank from 0 ("No price") to 6 ("+$5")
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Parse a shelf label; anything that is not a price bucket yields None
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(label.trim()))
    }

    /// All buckets in rank order
    pub fn all() -> &'static [PriceCategory] {
        &[
            PriceCategory::NoPrice,
            PriceCategory::One,
            PriceCategory::Two,
            PriceCategory::Three,
            PriceCategory::Four,
            PriceCategory::Five,
            PriceCategory::OverFive,
        ]
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a resolved price to its bucket
pub fn classify(price: Option<f64>) -> PriceCategory {
    let price = match price {
        Some(p) if !p.is_nan() => p,
        _ => return PriceCategory::NoPrice,
    };

    THRESHOLDS
        .iter()
        .find(|(upper, _)| price < *upper)
        .map(|(_, category)| *category)
        .unwrap_or(PriceCategory::OverFive)
}

/// Rank of a current shelf label; non-price shelves rank like "No price"
pub fn shelf_rank(label: &str) -> u8 {
    PriceCategory::from_label(label)
        .map(|c| c.rank())
        .unwrap_or(0)
}
