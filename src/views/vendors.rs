use std::fmt;

use super::{Search, Tone, badge, write_empty};
use crate::api::Vendor;

pub fn vendor_tone(status: Option<&str>) -> Tone {
    match status.map(str::to_lowercase).as_deref() {
        Some("approved" | "active") => Tone::Success,
        Some("pending") => Tone::Warning,
        Some("rejected" | "suspended") => Tone::Danger,
        _ => Tone::Neutral,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendorSummary {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub suspended: usize,
}

#[derive(Debug, Clone)]
pub struct VendorsView {
    vendors: Vec<Vendor>,
    search: Search,
}

impl VendorsView {
    pub fn new(vendors: Vec<Vendor>, search: Search) -> Self {
        Self { vendors, search }
    }

    /// Vendors whose store name, email or status contains the search text.
    pub fn filtered(&self) -> Vec<&Vendor> {
        self.vendors
            .iter()
            .filter(|v| {
                self.search.matches_any(&[
                    v.store_name.as_deref(),
                    v.email.as_deref(),
                    v.status.as_deref(),
                ])
            })
            .collect()
    }

    pub fn summary(&self) -> VendorSummary {
        let count = |statuses: &[&str]| {
            self.vendors
                .iter()
                .filter(|v| v.status.as_deref().is_some_and(|s| statuses.contains(&s)))
                .count()
        };
        VendorSummary {
            total: self.vendors.len(),
            active: count(&["active", "approved"]),
            pending: count(&["pending"]),
            suspended: count(&["suspended"]),
        }
    }
}

impl fmt::Display for VendorsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary();
        writeln!(f, "Vendors")?;
        writeln!(
            f,
            "Total: {}  Active: {}  Pending: {}  Suspended: {}",
            s.total, s.active, s.pending, s.suspended
        )?;
        writeln!(f)?;

        let cards = self.filtered();
        if cards.is_empty() {
            return write_empty(f, "vendors", &self.search);
        }

        for vendor in cards {
            let status = vendor.status.as_deref().unwrap_or("pending");
            writeln!(
                f,
                "{}  {}",
                vendor.store_name.as_deref().unwrap_or("(unnamed store)"),
                badge(vendor_tone(vendor.status.as_deref()), status)
            )?;
            if let Some(email) = vendor.email.as_deref() {
                writeln!(f, "  {}", email)?;
            }
            if let Some(description) = vendor.description.as_deref().filter(|d| !d.is_empty()) {
                writeln!(f, "  {}", description)?;
            }
            write!(f, "  Products: {}", vendor.product_count.unwrap_or(0))?;
            if let Some(commission) = vendor.commission.filter(|c| *c != 0.0) {
                write!(f, "  {}% Fee", commission)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
