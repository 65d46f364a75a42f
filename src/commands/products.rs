use anyhow::{Context, Result};
use log::{debug, error, warn};
use std::io::Write;

use super::ListArgs;
use crate::{
    api::AdminApi,
    views::{ProductsView, Search},
};

#[tracing::instrument(skip(api, token, out))]
pub async fn products<A: AdminApi, W: Write>(
    api: &A,
    token: &str,
    args: &ListArgs,
    out: &mut W,
) -> Result<()> {
    let page = api
        .fetch_products(token, &args.params())
        .await
        .inspect_err(|e| error!("Failed to load products: {}", e))
        .context("Failed to load products")?;

    if page.is_missing_data() {
        warn!("Products response has no `data` field; showing an empty list");
    }
    let products = page.into_items();
    debug!("Loaded {} product(s)", products.len());

    write!(
        out,
        "{}",
        ProductsView::new(products, Search::new(args.search.as_deref()))
    )?;
    Ok(())
}
