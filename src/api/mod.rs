//! REST client for the shop admin API.

mod client;
mod error;
mod serde_util;
mod types;

use async_trait::async_trait;
use serde_json::{Value, json};

pub use client::{ApiClient, Endpoint, RequestOptions};
pub use error::{ApiError, ApiResult};
pub use types::{
    CategoryRef, CommissionUpdate, CustomerRef, DashboardMetrics, ListParams, LoginRequest,
    LoginResponse, MetricValue, Order, Page, Product, RegisterRequest, StatusUpdate, Vendor,
};

/// Default API endpoint, used by the CLI when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://ecommerce.shansarfraz.com";

/// The subset of the API the admin commands work against.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse>;
    async fn fetch_metrics(&self, token: &str) -> ApiResult<DashboardMetrics>;
    async fn fetch_orders(&self, token: &str, params: &ListParams) -> ApiResult<Page<Order>>;
    async fn fetch_products(&self, token: &str, params: &ListParams) -> ApiResult<Page<Product>>;
    async fn fetch_vendors(&self, token: &str, params: &ListParams) -> ApiResult<Page<Vendor>>;
    async fn set_vendor_status(&self, token: &str, id: &str, status: &str) -> ApiResult<Value>;
    async fn set_vendor_commission(
        &self,
        token: &str,
        id: &str,
        commission: f64,
    ) -> ApiResult<Value>;
    async fn set_order_status(&self, token: &str, id: &str, status: &str) -> ApiResult<Value>;
}

#[async_trait]
impl AdminApi for ApiClient {
    #[tracing::instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        ApiClient::login(self, email, password).await
    }

    #[tracing::instrument(skip(self, token))]
    async fn fetch_metrics(&self, token: &str) -> ApiResult<DashboardMetrics> {
        self.get_dashboard_metrics(token).await
    }

    #[tracing::instrument(skip(self, token))]
    async fn fetch_orders(&self, token: &str, params: &ListParams) -> ApiResult<Page<Order>> {
        self.get_admin_orders(token, Some(params)).await
    }

    #[tracing::instrument(skip(self, token))]
    async fn fetch_products(&self, token: &str, params: &ListParams) -> ApiResult<Page<Product>> {
        self.get_admin_products(token, Some(params)).await
    }

    #[tracing::instrument(skip(self, token))]
    async fn fetch_vendors(&self, token: &str, params: &ListParams) -> ApiResult<Page<Vendor>> {
        self.get_vendors(token, Some(params)).await
    }

    #[tracing::instrument(skip(self, token))]
    async fn set_vendor_status(&self, token: &str, id: &str, status: &str) -> ApiResult<Value> {
        self.update_vendor_status(token, id, status).await
    }

    #[tracing::instrument(skip(self, token))]
    async fn set_vendor_commission(
        &self,
        token: &str,
        id: &str,
        commission: f64,
    ) -> ApiResult<Value> {
        self.update_vendor_commission(token, id, commission).await
    }

    #[tracing::instrument(skip(self, token))]
    async fn set_order_status(&self, token: &str, id: &str, status: &str) -> ApiResult<Value> {
        self.update_admin_order(token, id, &json!({ "status": status }))
            .await
    }
}
