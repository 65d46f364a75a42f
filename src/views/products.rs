use std::fmt;

use super::{Search, Tone, badge, money, write_empty};
use crate::api::Product;

const LOW_STOCK_THRESHOLD: i64 = 10;

pub fn product_tone(status: Option<&str>) -> Tone {
    match status {
        Some(s) if s.eq_ignore_ascii_case("active") => Tone::Success,
        _ => Tone::Neutral,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductSummary {
    pub total: usize,
    pub active: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
}

#[derive(Debug, Clone)]
pub struct ProductsView {
    products: Vec<Product>,
    search: Search,
}

impl ProductsView {
    pub fn new(products: Vec<Product>, search: Search) -> Self {
        Self { products, search }
    }

    /// Products whose name, description or category contains the search text.
    pub fn filtered(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| {
                self.search.matches_any(&[
                    p.name.as_deref(),
                    p.description.as_deref(),
                    p.category_name(),
                ])
            })
            .collect()
    }

    pub fn summary(&self) -> ProductSummary {
        let stocked = |pred: fn(i64) -> bool| {
            self.products
                .iter()
                .filter(|p| p.stock.is_some_and(pred))
                .count()
        };
        ProductSummary {
            total: self.products.len(),
            active: self
                .products
                .iter()
                .filter(|p| p.status.as_deref() == Some("active"))
                .count(),
            out_of_stock: stocked(|n| n == 0),
            low_stock: stocked(|n| n > 0 && n < LOW_STOCK_THRESHOLD),
        }
    }
}

impl fmt::Display for ProductsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary();
        writeln!(f, "Products")?;
        writeln!(
            f,
            "Total: {}  Active: {}  Out of stock: {}  Low stock: {}",
            s.total, s.active, s.out_of_stock, s.low_stock
        )?;
        writeln!(f)?;

        let cards = self.filtered();
        if cards.is_empty() {
            return write_empty(f, "products", &self.search);
        }

        for product in cards {
            let status = product.status.as_deref().unwrap_or("active");
            let stock = product.stock.unwrap_or(0);
            writeln!(
                f,
                "{}  {}",
                product.name.as_deref().unwrap_or("(unnamed)"),
                badge(product_tone(product.status.as_deref()), status)
            )?;
            if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
                writeln!(f, "  {}", description)?;
            }
            write!(f, "  {}  Stock: {}", money(product.price), stock)?;
            if product.stock == Some(0) {
                write!(f, " (out of stock)")?;
            }
            if let Some(category) = product.category_name() {
                write!(f, "  Category: {}", category)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
