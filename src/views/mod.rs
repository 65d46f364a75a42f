//! Text views over already-fetched admin records.
//!
//! Views never talk to the API. They filter, count and render what the
//! commands hand them.

mod dashboard;
mod orders;
mod products;
mod vendors;

pub use dashboard::DashboardView;
pub use orders::{OrderSummary, OrdersView, order_tone};
pub use products::{ProductSummary, ProductsView, product_tone};
pub use vendors::{VendorSummary, VendorsView, vendor_tone};

use std::fmt;

/// Visual weight of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    Warning,
    Info,
    Accent,
    Success,
    Danger,
    Neutral,
}

impl Tone {
    /// Marker printed next to the status label.
    pub fn marker(self) -> &'static str {
        match self {
            Tone::Warning => "!",
            Tone::Info => "~",
            Tone::Accent => ">",
            Tone::Success => "+",
            Tone::Danger => "x",
            Tone::Neutral => "-",
        }
    }
}

/// A search query, matched case-insensitively as a substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Search {
    needle: String,
}

impl Search {
    pub fn new(query: Option<&str>) -> Self {
        Self {
            needle: query.unwrap_or_default().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// True if any of `fields` contains the query. An empty query matches
    /// everything; missing fields never match.
    pub fn matches_any(&self, fields: &[Option<&str>]) -> bool {
        self.is_empty()
            || fields
                .iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

impl fmt::Display for Search {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.needle)
    }
}

pub(crate) fn money(amount: Option<f64>) -> String {
    format!("${:.2}", amount.unwrap_or(0.0))
}

pub(crate) fn badge(tone: Tone, label: &str) -> String {
    format!("[{} {}]", tone.marker(), label)
}

/// Writes the line shown when a filtered list has nothing to show.
pub(crate) fn write_empty(f: &mut fmt::Formatter<'_>, entities: &str, search: &Search) -> fmt::Result {
    if search.is_empty() {
        writeln!(f, "No {} found.", entities)
    } else {
        writeln!(f, "No {} found matching \"{}\".", entities, search)
    }
}
