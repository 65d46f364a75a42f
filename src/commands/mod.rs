//! CLI commands. Each command fetches through [`AdminApi`](crate::api::AdminApi)
//! and writes a rendered view to the given output.

use anyhow::{Result, anyhow};
use serde_json::Value;
use std::io::Write;

mod auth;
mod dashboard;
mod orders;
mod products;
mod vendors;

pub use auth::login;
pub use dashboard::dashboard;
pub use orders::{order_status, orders};
pub use products::products;
pub use vendors::{vendor_commission, vendor_status, vendors};

use crate::api::ListParams;

/// Search and paging options shared by the list commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListArgs {
    pub search: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl ListArgs {
    pub fn params(&self) -> ListParams {
        ListParams::paged(self.page, self.limit)
    }
}

/// Returns the configured token or explains how to provide one.
pub fn require_token(token: Option<&str>) -> Result<&str> {
    token.filter(|t| !t.is_empty()).ok_or_else(|| {
        anyhow!("No API token configured. Pass --token or set SHOPADMIN_TOKEN (see `shopadmin login`).")
    })
}

pub(crate) fn print_json<W: Write>(out: &mut W, value: &Value) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
    Ok(())
}
