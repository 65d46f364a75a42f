use anyhow::{Context, Result};
use log::{debug, error, warn};
use std::io::Write;

use super::{ListArgs, print_json};
use crate::{
    api::AdminApi,
    views::{OrdersView, Search},
};

/// List one page of orders, optionally narrowed by a search.
#[tracing::instrument(skip(api, token, out))]
pub async fn orders<A: AdminApi, W: Write>(
    api: &A,
    token: &str,
    args: &ListArgs,
    out: &mut W,
) -> Result<()> {
    let page = api
        .fetch_orders(token, &args.params())
        .await
        .inspect_err(|e| error!("Failed to load orders: {}", e))
        .context("Failed to load orders")?;

    if page.is_missing_data() {
        warn!("Orders response has no `data` field; showing an empty list");
    }
    let orders = page.into_items();
    debug!("Loaded {} order(s)", orders.len());

    let view = OrdersView::new(orders, Search::new(args.search.as_deref()));
    write!(out, "{}", view)?;
    Ok(())
}

/// Set an order's status and print the updated order.
#[tracing::instrument(skip(api, token, out))]
pub async fn order_status<A: AdminApi, W: Write>(
    api: &A,
    token: &str,
    id: &str,
    status: &str,
    out: &mut W,
) -> Result<()> {
    let updated = api
        .set_order_status(token, id, status)
        .await
        .with_context(|| format!("Failed to update order {}", id))?;

    print_json(out, &updated)
}
