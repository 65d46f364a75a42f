use std::fmt;

use crate::api::{DashboardMetrics, MetricValue};

/// Metric cards for the dashboard landing page.
#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    metrics: DashboardMetrics,
}

struct Card {
    title: &'static str,
    value: String,
    description: &'static str,
}

/// Missing, zero and empty values all show as `0`.
fn display(value: Option<&MetricValue>) -> String {
    match value {
        Some(MetricValue::Integer(0)) | None => "0".to_string(),
        Some(MetricValue::Float(n)) if *n == 0.0 => "0".to_string(),
        Some(MetricValue::Text(s)) if s.is_empty() => "0".to_string(),
        Some(v) => v.to_string(),
    }
}

impl DashboardView {
    pub fn new(metrics: DashboardMetrics) -> Self {
        Self { metrics }
    }

    fn cards(&self) -> [Card; 4] {
        let m = &self.metrics;
        [
            Card {
                title: "Total Products",
                value: display(m.total_products.as_ref()),
                description: "Active products in store",
            },
            Card {
                title: "Total Orders",
                value: display(m.total_orders.as_ref()),
                description: "Orders this month",
            },
            Card {
                title: "Total Customers",
                value: display(m.total_customers.as_ref()),
                description: "Registered customers",
            },
            Card {
                title: "Revenue",
                value: format!("${}", display(m.total_revenue.as_ref())),
                description: "Total revenue",
            },
        ]
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dashboard")?;
        writeln!(f)?;
        for card in self.cards() {
            writeln!(f, "{:<16} {:>12}  {}", card.title, card.value, card.description)?;
        }
        Ok(())
    }
}
