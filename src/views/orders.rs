use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

use super::{Search, Tone, badge, money, write_empty};
use crate::api::Order;

pub fn order_tone(status: Option<&str>) -> Tone {
    match status.map(str::to_lowercase).as_deref() {
        Some("pending") => Tone::Warning,
        Some("processing") => Tone::Info,
        Some("shipped") => Tone::Accent,
        Some("delivered") => Tone::Success,
        Some("cancelled") => Tone::Danger,
        _ => Tone::Neutral,
    }
}

fn short_id(id: Option<&str>) -> String {
    match id {
        Some(id) => format!("#{}", id.chars().take(8).collect::<String>()),
        None => "#".to_string(),
    }
}

fn parse_date(ts: &str) -> Option<NaiveDate> {
    let ts = ts.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.date_naive());
    }
    // Timestamps without an offset, then bare dates
    if let Ok(dt) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(ts, "%Y-%m-%d").ok()
}

/// Calendar date of an ISO-8601 timestamp or date, or `N/A`.
fn order_date(created_at: Option<&str>) -> String {
    created_at
        .and_then(parse_date)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

/// Counts shown above the orders table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderSummary {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub delivered: usize,
}

#[derive(Debug, Clone)]
pub struct OrdersView {
    orders: Vec<Order>,
    search: Search,
}

impl OrdersView {
    pub fn new(orders: Vec<Order>, search: Search) -> Self {
        Self { orders, search }
    }

    /// Orders whose id, customer name or status contains the search text.
    pub fn filtered(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| {
                self.search.matches_any(&[
                    o.id.as_deref(),
                    o.customer_name.as_deref(),
                    o.status.as_deref(),
                ])
            })
            .collect()
    }

    /// Status counts over every loaded order, regardless of the search.
    pub fn summary(&self) -> OrderSummary {
        let count = |status: &str| {
            self.orders
                .iter()
                .filter(|o| o.status.as_deref() == Some(status))
                .count()
        };
        OrderSummary {
            total: self.orders.len(),
            pending: count("pending"),
            processing: count("processing"),
            delivered: count("delivered"),
        }
    }
}

impl fmt::Display for OrdersView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary();
        writeln!(f, "Orders")?;
        writeln!(
            f,
            "Total: {}  Pending: {}  Processing: {}  Delivered: {}",
            s.total, s.pending, s.processing, s.delivered
        )?;
        writeln!(f)?;

        let rows = self.filtered();
        if rows.is_empty() {
            return write_empty(f, "orders", &self.search);
        }

        writeln!(
            f,
            "{:<10} {:<24} {:<10} {:>12}  {}",
            "ORDER", "CUSTOMER", "DATE", "TOTAL", "STATUS"
        )?;
        for order in rows {
            let status = order.status.as_deref().unwrap_or("pending");
            writeln!(
                f,
                "{:<10} {:<24} {:<10} {:>12}  {}",
                short_id(order.id.as_deref()),
                order.customer_display_name().unwrap_or("N/A"),
                order_date(order.created_at.as_deref()),
                money(order.total),
                badge(order_tone(order.status.as_deref()), status),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CustomerRef;

    fn order(id: &str, customer: &str, status: &str) -> Order {
        Order {
            id: Some(id.to_string()),
            customer_name: Some(customer.to_string()),
            status: Some(status.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Order> {
        vec![
            order("ord-0001-aaaa", "Ada Lovelace", "pending"),
            order("ord-0002-bbbb", "Grace Hopper", "delivered"),
            order("ord-0003-cccc", "Alan Turing", "Processing"),
            order("ord-0004-dddd", "Edsger Dijkstra", "pending"),
        ]
    }

    #[test]
    fn test_order_tone() {
        assert_eq!(order_tone(Some("PENDING")), Tone::Warning);
        assert_eq!(order_tone(Some("processing")), Tone::Info);
        assert_eq!(order_tone(Some("shipped")), Tone::Accent);
        assert_eq!(order_tone(Some("delivered")), Tone::Success);
        assert_eq!(order_tone(Some("cancelled")), Tone::Danger);
        assert_eq!(order_tone(Some("refunded")), Tone::Neutral);
        assert_eq!(order_tone(None), Tone::Neutral);
    }

    #[test]
    fn test_filter_by_id_customer_or_status() {
        let view = OrdersView::new(sample(), Search::new(Some("0002")));
        assert_eq!(view.filtered().len(), 1);

        let view = OrdersView::new(sample(), Search::new(Some("grace")));
        assert_eq!(view.filtered()[0].id.as_deref(), Some("ord-0002-bbbb"));

        let view = OrdersView::new(sample(), Search::new(Some("PENDING")));
        assert_eq!(view.filtered().len(), 2);

        let view = OrdersView::new(sample(), Search::default());
        assert_eq!(view.filtered().len(), 4);
    }

    #[test]
    fn test_summary_ignores_search_and_is_exact() {
        let view = OrdersView::new(sample(), Search::new(Some("nothing matches")));
        let s = view.summary();
        assert_eq!(s.total, 4);
        assert_eq!(s.pending, 2);
        // "Processing" differs in case from the counted label
        assert_eq!(s.processing, 0);
        assert_eq!(s.delivered, 1);
        assert!(view.filtered().is_empty());
    }

    #[test]
    fn test_render_row_fallbacks() {
        let orders = vec![
            Order {
                id: Some("1234567890abcdef".to_string()),
                customer: Some(CustomerRef {
                    name: Some("Nested Name".to_string()),
                }),
                created_at: Some("2024-03-05T10:20:30.000Z".to_string()),
                total: Some(42.0),
                status: None,
                ..Default::default()
            },
            Order::default(),
        ];
        let out = OrdersView::new(orders, Search::default()).to_string();

        assert!(out.contains("#12345678 "));
        assert!(out.contains("Nested Name"));
        assert!(out.contains("2024-03-05"));
        assert!(out.contains("$42.00"));
        assert!(out.contains("[- pending]"));
        assert!(out.contains("N/A"));
        assert!(out.contains("$0.00"));
    }

    #[test]
    fn test_render_empty_state() {
        let out = OrdersView::new(vec![], Search::default()).to_string();
        assert!(out.contains("Total: 0"));
        assert!(out.contains("No orders found."));

        let out = OrdersView::new(sample(), Search::new(Some("zzz"))).to_string();
        assert!(out.contains("No orders found matching \"zzz\"."));
    }

    #[test]
    fn test_order_date_accepts_local_timestamps_and_dates() {
        assert_eq!(order_date(Some("2024-03-05T10:20:30+02:00")), "2024-03-05");
        assert_eq!(order_date(Some("2024-06-01T12:00:00")), "2024-06-01");
        assert_eq!(order_date(Some("2024-06-01T12:00:00.250")), "2024-06-01");
        assert_eq!(order_date(Some("2024-06-01")), "2024-06-01");
    }

    #[test]
    fn test_order_date_rejects_garbage() {
        assert_eq!(order_date(Some("yesterday")), "N/A");
        assert_eq!(order_date(None), "N/A");
    }
}
