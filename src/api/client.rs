//! HTTP client for the shop REST API.
//!
//! Every public method is a thin mapping onto an [`Endpoint`], which
//! [`ApiClient::send`] turns into an authenticated JSON request.

use log::debug;
use reqwest::{
    Client, Method, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::error::{ApiError, ApiResult};
use super::types::{
    CommissionUpdate, DashboardMetrics, ListParams, LoginRequest, LoginResponse, Order, Page,
    Product, RegisterRequest, StatusUpdate, Vendor,
};

const USER_AGENT: &str = "shopadmin-cli";

/// Per-request options layered on top of the client defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    /// Extra headers; these replace the defaults when names collide.
    pub headers: Vec<(String, String)>,
    pub query: ListParams,
}

/// A single API route: method, path, query and JSON body.
#[derive(Debug, Clone)]
pub struct Endpoint {
    method: Method,
    path: String,
    query: ListParams,
    body: Option<Value>,
}

impl Endpoint {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: ListParams::default(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, params: Option<&ListParams>) -> Self {
        if let Some(params) = params {
            self.query = params.clone();
        }
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::new(format!("Failed to serialize request body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Percent-encodes an identifier for use as a path segment.
fn seg(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Shows only the edges of a token in logs.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

fn build_headers(token: Option<&str>, extra: &[(String, String)]) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let header_name = HeaderName::try_from(name.as_str())
            .map_err(|e| ApiError::new(format!("Invalid header name '{}': {}", name, e)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::new(format!("Invalid header value for '{}': {}", name, e)))?;
        headers.insert(header_name, header_value);
    }

    if let Some(token) = token {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| ApiError::new(format!("Invalid bearer token: {}", e)))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
    }

    Ok(headers)
}

/// Parses a success body; an empty body reads as JSON `null`.
fn parse_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| {
        ApiError::with_status(format!("Failed to parse JSON response: {}", e), status)
    })
}

/// Client for the shop REST API.
///
/// Holds only the base URL and a connection pool, so it is cheap to clone
/// and safe to share between concurrent calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for `base_url` with a fresh connection pool.
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a client around an existing reqwest `Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, endpoint: &str, query: &ListParams) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, query.to_query_string())
        }
    }

    /// Issues one request and decodes the JSON reply.
    ///
    /// Non-success responses become an [`ApiError`] carrying the server's
    /// `message`, or `HTTP error! status: <code>` when there is none.
    #[tracing::instrument(skip(self, token, options))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        token: Option<&str>,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let url = self.url_for(endpoint, &options.query);
        let headers = build_headers(token, &options.headers)?;

        match token {
            Some(t) => debug!("{} {} (token {})", options.method, url, mask_token(t)),
            None => debug!("{} {}", options.method, url),
        }

        let mut builder = self.client.request(options.method, &url).headers(headers);
        if let Some(body) = &options.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ApiError::new(format!("Failed to serialize request body: {}", e)))?;
            builder = builder.body(bytes);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_response_body(status, &body);
            debug!("{} failed with {}: {}", url, status, err);
            return Err(err);
        }

        let body = response.text().await?;
        parse_body(status, &body)
    }

    /// Sends a prepared [`Endpoint`].
    pub async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        token: Option<&str>,
    ) -> ApiResult<T> {
        let Endpoint {
            method,
            path,
            query,
            body,
        } = endpoint;
        let options = RequestOptions {
            method,
            body,
            headers: Vec::new(),
            query,
        };
        self.request(&path, token, options).await
    }

    // Auth

    /// `POST /auth/login`; exchanges credentials for an access token.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let endpoint = Endpoint::post("/auth/login").json(&LoginRequest { email, password })?;
        self.send(endpoint, None).await
    }

    /// `POST /auth/register`; creates an account.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> ApiResult<Value> {
        let endpoint = Endpoint::post("/auth/register").json(&RegisterRequest {
            email,
            password,
            name,
        })?;
        self.send(endpoint, None).await
    }

    /// `GET /auth/me`; the account the token belongs to.
    pub async fn get_profile(&self, token: &str) -> ApiResult<Value> {
        self.send(Endpoint::get("/auth/me"), Some(token)).await
    }

    // Products

    /// `GET /products`; the public catalog.
    pub async fn get_products(&self, token: &str, params: Option<&ListParams>) -> ApiResult<Value> {
        self.send(Endpoint::get("/products").query(params), Some(token))
            .await
    }

    /// `GET /products/:id`.
    pub async fn get_product(&self, token: &str, id: &str) -> ApiResult<Value> {
        self.send(Endpoint::get(format!("/products/{}", seg(id))), Some(token))
            .await
    }

    /// `POST /vendors/me/products`; adds a product to the caller's store.
    pub async fn create_product<B: Serialize + ?Sized>(
        &self,
        token: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::post("/vendors/me/products").json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `PATCH /vendors/me/products/:id`.
    pub async fn update_product<B: Serialize + ?Sized>(
        &self,
        token: &str,
        id: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/vendors/me/products/{}", seg(id))).json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `DELETE /vendors/me/products/:id`.
    pub async fn delete_product(&self, token: &str, id: &str) -> ApiResult<Value> {
        let endpoint = Endpoint::delete(format!("/vendors/me/products/{}", seg(id)));
        self.send(endpoint, Some(token)).await
    }

    // Orders

    /// `GET /orders`; the caller's own orders.
    pub async fn get_orders(&self, token: &str, params: Option<&ListParams>) -> ApiResult<Value> {
        self.send(Endpoint::get("/orders").query(params), Some(token))
            .await
    }

    /// `GET /orders/:id`.
    pub async fn get_order(&self, token: &str, id: &str) -> ApiResult<Value> {
        self.send(Endpoint::get(format!("/orders/{}", seg(id))), Some(token))
            .await
    }

    // Users

    /// `GET /admin/users`.
    pub async fn get_users(&self, token: &str, params: Option<&ListParams>) -> ApiResult<Value> {
        self.send(Endpoint::get("/admin/users").query(params), Some(token))
            .await
    }

    /// `GET /admin/users/:id`.
    pub async fn get_user(&self, token: &str, id: &str) -> ApiResult<Value> {
        self.send(Endpoint::get(format!("/admin/users/{}", seg(id))), Some(token))
            .await
    }

    /// `PATCH /admin/users/:id`.
    pub async fn update_user<B: Serialize + ?Sized>(
        &self,
        token: &str,
        id: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/admin/users/{}", seg(id))).json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `DELETE /admin/users/:id`.
    pub async fn delete_user(&self, token: &str, id: &str) -> ApiResult<Value> {
        let endpoint = Endpoint::delete(format!("/admin/users/{}", seg(id)));
        self.send(endpoint, Some(token)).await
    }

    // Vendors

    /// `GET /admin/vendors`; one page of vendors.
    pub async fn get_vendors(
        &self,
        token: &str,
        params: Option<&ListParams>,
    ) -> ApiResult<Page<Vendor>> {
        self.send(Endpoint::get("/admin/vendors").query(params), Some(token))
            .await
    }

    /// `GET /admin/vendors/:id`.
    pub async fn get_vendor(&self, token: &str, id: &str) -> ApiResult<Value> {
        self.send(Endpoint::get(format!("/admin/vendors/{}", seg(id))), Some(token))
            .await
    }

    /// `PATCH /admin/vendors/:id/status` with `{ status }`.
    pub async fn update_vendor_status(
        &self,
        token: &str,
        id: &str,
        status: &str,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/admin/vendors/{}/status", seg(id)))
            .json(&StatusUpdate { status })?;
        self.send(endpoint, Some(token)).await
    }

    /// `PATCH /admin/vendors/:id/commission` with `{ commission }`.
    pub async fn update_vendor_commission(
        &self,
        token: &str,
        id: &str,
        commission: f64,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/admin/vendors/{}/commission", seg(id)))
            .json(&CommissionUpdate { commission })?;
        self.send(endpoint, Some(token)).await
    }

    // Dashboard and reports

    /// `GET /admin/dashboard/metrics`; store-wide counters.
    pub async fn get_dashboard_metrics(&self, token: &str) -> ApiResult<DashboardMetrics> {
        self.send(Endpoint::get("/admin/dashboard/metrics"), Some(token))
            .await
    }

    /// `GET /admin/reports/sales`.
    pub async fn get_sales_report(
        &self,
        token: &str,
        params: Option<&ListParams>,
    ) -> ApiResult<Value> {
        self.send(Endpoint::get("/admin/reports/sales").query(params), Some(token))
            .await
    }

    /// `GET /admin/reports/products`.
    pub async fn get_products_report(
        &self,
        token: &str,
        params: Option<&ListParams>,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::get("/admin/reports/products").query(params);
        self.send(endpoint, Some(token)).await
    }

    // Categories

    /// Categories are public; the token is forwarded when the caller has one.
    pub async fn get_categories(&self, token: Option<&str>) -> ApiResult<Value> {
        self.send(Endpoint::get("/categories"), token).await
    }

    /// `GET /categories/:id`.
    pub async fn get_category(&self, token: &str, id: &str) -> ApiResult<Value> {
        self.send(Endpoint::get(format!("/categories/{}", seg(id))), Some(token))
            .await
    }

    /// `POST /admin/categories`.
    pub async fn create_category<B: Serialize + ?Sized>(
        &self,
        token: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::post("/admin/categories").json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `PATCH /admin/categories/:id`.
    pub async fn update_category<B: Serialize + ?Sized>(
        &self,
        token: &str,
        id: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/admin/categories/{}", seg(id))).json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `DELETE /admin/categories/:id`.
    pub async fn delete_category(&self, token: &str, id: &str) -> ApiResult<Value> {
        let endpoint = Endpoint::delete(format!("/admin/categories/{}", seg(id)));
        self.send(endpoint, Some(token)).await
    }

    // Admin products

    /// `GET /admin/products`; one page of products across all stores.
    pub async fn get_admin_products(
        &self,
        token: &str,
        params: Option<&ListParams>,
    ) -> ApiResult<Page<Product>> {
        self.send(Endpoint::get("/admin/products").query(params), Some(token))
            .await
    }

    /// `PATCH /admin/products/:id`.
    pub async fn update_admin_product<B: Serialize + ?Sized>(
        &self,
        token: &str,
        id: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/admin/products/{}", seg(id))).json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `DELETE /admin/products/:id`.
    pub async fn delete_admin_product(&self, token: &str, id: &str) -> ApiResult<Value> {
        let endpoint = Endpoint::delete(format!("/admin/products/{}", seg(id)));
        self.send(endpoint, Some(token)).await
    }

    // Admin orders

    /// `GET /admin/orders`; one page of orders across all stores.
    pub async fn get_admin_orders(
        &self,
        token: &str,
        params: Option<&ListParams>,
    ) -> ApiResult<Page<Order>> {
        self.send(Endpoint::get("/admin/orders").query(params), Some(token))
            .await
    }

    /// `GET /admin/orders/:id`.
    pub async fn get_admin_order(&self, token: &str, id: &str) -> ApiResult<Value> {
        self.send(Endpoint::get(format!("/admin/orders/{}", seg(id))), Some(token))
            .await
    }

    /// `PATCH /admin/orders/:id`, e.g. `{ "status": "shipped" }`.
    pub async fn update_admin_order<B: Serialize + ?Sized>(
        &self,
        token: &str,
        id: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/admin/orders/{}", seg(id))).json(data)?;
        self.send(endpoint, Some(token)).await
    }

    // Payouts

    /// `GET /admin/payouts`.
    pub async fn get_payouts(&self, token: &str, params: Option<&ListParams>) -> ApiResult<Value> {
        self.send(Endpoint::get("/admin/payouts").query(params), Some(token))
            .await
    }

    // Content pages

    /// `GET /admin/pages`; CMS pages.
    pub async fn get_pages(&self, token: &str) -> ApiResult<Value> {
        self.send(Endpoint::get("/admin/pages"), Some(token)).await
    }

    /// `POST /admin/pages`.
    pub async fn create_page<B: Serialize + ?Sized>(
        &self,
        token: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::post("/admin/pages").json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `PATCH /admin/pages/:id`.
    pub async fn update_page<B: Serialize + ?Sized>(
        &self,
        token: &str,
        id: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/admin/pages/{}", seg(id))).json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `DELETE /admin/pages/:id`.
    pub async fn delete_page(&self, token: &str, id: &str) -> ApiResult<Value> {
        let endpoint = Endpoint::delete(format!("/admin/pages/{}", seg(id)));
        self.send(endpoint, Some(token)).await
    }

    // Blog posts

    /// `GET /blog/posts`.
    pub async fn get_blog_posts(&self, token: &str) -> ApiResult<Value> {
        self.send(Endpoint::get("/blog/posts"), Some(token)).await
    }

    /// `POST /admin/blog/posts`.
    pub async fn create_blog_post<B: Serialize + ?Sized>(
        &self,
        token: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::post("/admin/blog/posts").json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `PATCH /admin/blog/posts/:id`.
    pub async fn update_blog_post<B: Serialize + ?Sized>(
        &self,
        token: &str,
        id: &str,
        data: &B,
    ) -> ApiResult<Value> {
        let endpoint = Endpoint::patch(format!("/admin/blog/posts/{}", seg(id))).json(data)?;
        self.send(endpoint, Some(token)).await
    }

    /// `DELETE /admin/blog/posts/:id`.
    pub async fn delete_blog_post(&self, token: &str, id: &str) -> ApiResult<Value> {
        let endpoint = Endpoint::delete(format!("/admin/blog/posts/{}", seg(id)));
        self.send(endpoint, Some(token)).await
    }
}
