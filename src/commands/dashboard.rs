use anyhow::{Context, Result};
use log::error;
use std::io::Write;

use crate::{api::AdminApi, views::DashboardView};

#[tracing::instrument(skip(api, token, out))]
pub async fn dashboard<A: AdminApi, W: Write>(api: &A, token: &str, out: &mut W) -> Result<()> {
    let metrics = api
        .fetch_metrics(token)
        .await
        .inspect_err(|e| error!("Failed to load metrics: {}", e))
        .context("Failed to load metrics")?;

    write!(out, "{}", DashboardView::new(metrics))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, DashboardMetrics, MetricValue, MockAdminApi};
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_dashboard_renders_metrics() {
        let mut api = MockAdminApi::new();
        api.expect_fetch_metrics()
            .with(eq("tok"))
            .times(1)
            .returning(|_| {
                Ok(DashboardMetrics {
                    total_products: Some(MetricValue::Integer(12)),
                    total_revenue: Some(MetricValue::Text("99.90".to_string())),
                    ..Default::default()
                })
            });

        let mut out = Vec::new();
        dashboard(&api, "tok", &mut out).await.unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Dashboard"));
        assert!(out.contains("12"));
        assert!(out.contains("$99.90"));
    }

    #[tokio::test]
    async fn test_dashboard_failure_writes_nothing() {
        let mut api = MockAdminApi::new();
        api.expect_fetch_metrics()
            .returning(|_| Err(ApiError::new("Forbidden resource")));

        let mut out = Vec::new();
        let err = dashboard(&api, "tok", &mut out).await.unwrap_err();

        assert_eq!(err.root_cause().to_string(), "Forbidden resource");
        assert!(out.is_empty());
    }
}
