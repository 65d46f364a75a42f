use anyhow::{Context, Result, ensure};
use log::{debug, error, info, warn};
use std::io::Write;

use super::{ListArgs, print_json};
use crate::{
    api::AdminApi,
    views::{Search, VendorsView},
};

#[tracing::instrument(skip(api, token, out))]
pub async fn vendors<A: AdminApi, W: Write>(
    api: &A,
    token: &str,
    args: &ListArgs,
    out: &mut W,
) -> Result<()> {
    let page = api
        .fetch_vendors(token, &args.params())
        .await
        .inspect_err(|e| error!("Failed to load vendors: {}", e))
        .context("Failed to load vendors")?;

    if page.is_missing_data() {
        warn!("Vendors response has no `data` field; showing an empty list");
    }
    let vendors = page.into_items();
    debug!("Loaded {} vendor(s)", vendors.len());

    write!(
        out,
        "{}",
        VendorsView::new(vendors, Search::new(args.search.as_deref()))
    )?;
    Ok(())
}

#[tracing::instrument(skip(api, token, out))]
pub async fn vendor_status<A: AdminApi, W: Write>(
    api: &A,
    token: &str,
    id: &str,
    status: &str,
    out: &mut W,
) -> Result<()> {
    let updated = api
        .set_vendor_status(token, id, status)
        .await
        .with_context(|| format!("Failed to update status of vendor {}", id))?;

    info!("Vendor {} is now {}", id, status);
    print_json(out, &updated)
}

#[tracing::instrument(skip(api, token, out))]
pub async fn vendor_commission<A: AdminApi, W: Write>(
    api: &A,
    token: &str,
    id: &str,
    commission: f64,
    out: &mut W,
) -> Result<()> {
    ensure!(
        commission.is_finite() && (0.0..=100.0).contains(&commission),
        "Commission must be a percentage between 0 and 100, got {}",
        commission
    );

    let updated = api
        .set_vendor_commission(token, id, commission)
        .await
        .with_context(|| format!("Failed to update commission of vendor {}", id))?;

    info!("Vendor {} commission set to {}%", id, commission);
    print_json(out, &updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, MockAdminApi};
    use mockall::predicate::eq;
    use serde_json::json;

    fn args(search: Option<&str>) -> ListArgs {
        ListArgs {
            search: search.map(str::to_string),
            page: 1,
            limit: 100,
        }
    }

    #[tokio::test]
    async fn test_vendors_lists_cards() {
        let mut api = MockAdminApi::new();
        api.expect_fetch_vendors().times(1).returning(|_, _| {
            Ok(serde_json::from_value(json!({
                "data": [
                    {"id": "v1", "storeName": "Acme", "email": "a@acme.test", "status": "approved", "commission": 10, "productCount": 3},
                    {"id": "v2", "storeName": "Bolt", "email": "b@bolt.test", "status": "suspended"}
                ]
            }))
            .unwrap())
        });

        let mut out = Vec::new();
        vendors(&api, "tok", &args(Some("acme")), &mut out)
            .await
            .unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Total: 2  Active: 1  Pending: 0  Suspended: 1"));
        assert!(out.contains("Acme  [+ approved]"));
        assert!(out.contains("Products: 3  10% Fee"));
        assert!(!out.contains("Bolt  "));
    }

    #[tokio::test]
    async fn test_vendor_status_update() {
        let mut api = MockAdminApi::new();
        api.expect_set_vendor_status()
            .with(eq("tok"), eq("v1"), eq("approved"))
            .times(1)
            .returning(|_, _, _| Ok(json!({"id": "v1", "status": "approved"})));

        let mut out = Vec::new();
        vendor_status(&api, "tok", "v1", "approved", &mut out)
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\"approved\""));
    }

    #[tokio::test]
    async fn test_vendor_status_failure_names_vendor() {
        let mut api = MockAdminApi::new();
        api.expect_set_vendor_status()
            .returning(|_, _, _| Err(ApiError::new("Vendor not found")));

        let mut out = Vec::new();
        let err = vendor_status(&api, "tok", "v9", "approved", &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to update status of vendor v9");
        assert_eq!(err.root_cause().to_string(), "Vendor not found");
    }

    #[tokio::test]
    async fn test_vendor_commission_update() {
        let mut api = MockAdminApi::new();
        api.expect_set_vendor_commission()
            .with(eq("tok"), eq("v1"), eq(12.5))
            .times(1)
            .returning(|_, _, c| Ok(json!({"id": "v1", "commission": c})));

        let mut out = Vec::new();
        vendor_commission(&api, "tok", "v1", 12.5, &mut out)
            .await
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("12.5"));
    }

    #[tokio::test]
    async fn test_vendor_commission_rejects_out_of_range() {
        let mut api = MockAdminApi::new();
        api.expect_set_vendor_commission().never();

        let mut out = Vec::new();
        assert!(
            vendor_commission(&api, "tok", "v1", 150.0, &mut out)
                .await
                .is_err()
        );
        assert!(
            vendor_commission(&api, "tok", "v1", -1.0, &mut out)
                .await
                .is_err()
        );
    }
}
