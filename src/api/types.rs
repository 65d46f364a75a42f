//! Request and response records for the shop REST API.
//!
//! The server's shapes are loose: every field is optional and a few numeric
//! fields arrive as strings. Records keep the object they were read from, so
//! nothing the server sent is lost, and only reject payloads whose structure
//! is wrong (e.g. `data` that is not a list of objects).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::serde_util::{f64_field, i64_field, string_field};

/// Ordered query parameters for list endpoints, serialized in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pairs: Vec<(String, String)>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for the common `page` then `limit` pair.
    pub fn paged(page: u32, limit: u32) -> Self {
        Self::new().page(page).limit(limit)
    }

    pub fn page(self, page: u32) -> Self {
        self.param("page", page.to_string())
    }

    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit.to_string())
    }

    /// Appends an arbitrary parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// URL-encoded form, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        // Serializing a sequence of string pairs cannot fail
        serde_urlencoded::to_string(&self.pairs).unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ListParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// List envelope: `{ "data": [...], ...rest }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub data: Option<Vec<T>>,
    /// Everything else the server sent alongside `data` (pagination meta etc.).
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl<T> Page<T> {
    /// Whether the server omitted the `data` field entirely.
    pub fn is_missing_data(&self) -> bool {
        self.data.is_none()
    }

    /// The listed records; a missing `data` field reads as an empty list.
    pub fn into_items(self) -> Vec<T> {
        self.data.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate<'a> {
    pub status: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommissionUpdate {
    pub commission: f64,
}

/// A counter on the dashboard; the server sends these as numbers or strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Integer(n) => write!(f, "{}", n),
            MetricValue::Float(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

fn metric_field(raw: &Map<String, Value>, key: &str) -> Option<MetricValue> {
    MetricValue::deserialize(raw.get(key)?.clone()).ok()
}

/// Dashboard counters, plus the full payload in `raw`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct DashboardMetrics {
    pub total_products: Option<MetricValue>,
    pub total_orders: Option<MetricValue>,
    pub total_customers: Option<MetricValue>,
    pub total_revenue: Option<MetricValue>,
    /// The object exactly as the server sent it.
    pub raw: Map<String, Value>,
}

impl From<Map<String, Value>> for DashboardMetrics {
    fn from(raw: Map<String, Value>) -> Self {
        Self {
            total_products: metric_field(&raw, "totalProducts"),
            total_orders: metric_field(&raw, "totalOrders"),
            total_customers: metric_field(&raw, "totalCustomers"),
            total_revenue: metric_field(&raw, "totalRevenue"),
            raw,
        }
    }
}

impl From<DashboardMetrics> for Map<String, Value> {
    fn from(metrics: DashboardMetrics) -> Self {
        metrics.raw
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRef {
    pub name: Option<String>,
}

/// An order as listed by the admin endpoints.
///
/// Fields the views need are read leniently: a value of an unexpected type
/// reads as absent instead of failing the page. `raw` keeps the record
/// verbatim and is what the order serializes back to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Order {
    pub id: Option<String>,
    pub customer_name: Option<String>,
    pub customer: Option<CustomerRef>,
    pub created_at: Option<String>,
    pub total: Option<f64>,
    pub status: Option<String>,
    pub raw: Map<String, Value>,
}

impl Order {
    /// The flat `customerName`, falling back to the nested customer's name.
    pub fn customer_display_name(&self) -> Option<&str> {
        self.customer_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.customer.as_ref()?.name.as_deref())
    }
}

impl From<Map<String, Value>> for Order {
    fn from(raw: Map<String, Value>) -> Self {
        let customer = raw
            .get("customer")
            .and_then(Value::as_object)
            .map(|c| CustomerRef {
                name: string_field(c, "name"),
            });
        Self {
            id: string_field(&raw, "id"),
            customer_name: string_field(&raw, "customerName"),
            customer,
            created_at: string_field(&raw, "createdAt"),
            total: f64_field(&raw, "total"),
            status: string_field(&raw, "status"),
            raw,
        }
    }
}

impl From<Order> for Map<String, Value> {
    fn from(order: Order) -> Self {
        order.raw
    }
}

/// A product's category, sent either as a plain name or an embedded record.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryRef {
    Name(String),
    Record { name: Option<String> },
}

impl CategoryRef {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(CategoryRef::Name(name.clone())),
            Value::Object(record) => Some(CategoryRef::Record {
                name: string_field(record, "name"),
            }),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryRef::Name(name) => Some(name),
            CategoryRef::Record { name } => name.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Product {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<CategoryRef>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub status: Option<String>,
    pub raw: Map<String, Value>,
}

impl Product {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref()?.name()
    }
}

impl From<Map<String, Value>> for Product {
    fn from(raw: Map<String, Value>) -> Self {
        Self {
            id: string_field(&raw, "id"),
            name: string_field(&raw, "name"),
            description: string_field(&raw, "description"),
            category: raw.get("category").and_then(CategoryRef::from_value),
            price: f64_field(&raw, "price"),
            stock: i64_field(&raw, "stock"),
            status: string_field(&raw, "status"),
            raw,
        }
    }
}

impl From<Product> for Map<String, Value> {
    fn from(product: Product) -> Self {
        product.raw
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Vendor {
    pub id: Option<String>,
    pub store_name: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub product_count: Option<i64>,
    pub commission: Option<f64>,
    pub raw: Map<String, Value>,
}

impl From<Map<String, Value>> for Vendor {
    fn from(raw: Map<String, Value>) -> Self {
        Self {
            id: string_field(&raw, "id"),
            store_name: string_field(&raw, "storeName"),
            email: string_field(&raw, "email"),
            description: string_field(&raw, "description"),
            status: string_field(&raw, "status"),
            product_count: i64_field(&raw, "productCount"),
            commission: f64_field(&raw, "commission"),
            raw,
        }
    }
}

impl From<Vendor> for Map<String, Value> {
    fn from(vendor: Vendor) -> Self {
        vendor.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_params_keep_insertion_order() {
        assert_eq!(ListParams::paged(1, 50).to_query_string(), "page=1&limit=50");
        assert_eq!(
            ListParams::new().limit(50).page(1).to_query_string(),
            "limit=50&page=1"
        );
    }

    #[test]
    fn test_list_params_are_url_encoded() {
        let params: ListParams = [("q", "red shoes"), ("sort", "a&b")].into_iter().collect();
        assert_eq!(params.to_query_string(), "q=red+shoes&sort=a%26b");
        assert!(ListParams::new().is_empty());
        assert_eq!(ListParams::new().to_query_string(), "");
    }

    #[test]
    fn test_page_keeps_extra_fields() {
        let page: Page<Order> = serde_json::from_value(json!({
            "data": [{"id": "o1"}],
            "meta": {"page": 1, "total": 1}
        }))
        .unwrap();
        assert!(!page.is_missing_data());
        assert_eq!(page.rest["meta"]["total"], 1);
        assert_eq!(page.into_items()[0].id.as_deref(), Some("o1"));
    }

    #[test]
    fn test_page_without_data_is_empty() {
        let page: Page<Vendor> = serde_json::from_value(json!({"items": []})).unwrap();
        assert!(page.is_missing_data());
        assert!(page.into_items().is_empty());
    }

    #[test]
    fn test_page_with_malformed_data_is_rejected() {
        let result = serde_json::from_value::<Page<Product>>(json!({"data": "nope"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_order_customer_fallback() {
        let order: Order = serde_json::from_value(json!({
            "id": "abc",
            "customer": {"name": "Ada"},
            "total": "19.99"
        }))
        .unwrap();
        assert_eq!(order.customer_display_name(), Some("Ada"));
        assert_eq!(order.total, Some(19.99));

        let order: Order =
            serde_json::from_value(json!({"customerName": "Grace", "customer": {"name": "Ada"}}))
                .unwrap();
        assert_eq!(order.customer_display_name(), Some("Grace"));
    }

    #[test]
    fn test_product_category_shapes() {
        let p: Product = serde_json::from_value(json!({"category": "Shoes", "stock": "0"})).unwrap();
        assert_eq!(p.category_name(), Some("Shoes"));
        assert_eq!(p.stock, Some(0));

        let p: Product =
            serde_json::from_value(json!({"category": {"id": "c1", "name": "Hats"}})).unwrap();
        assert_eq!(p.category_name(), Some("Hats"));
    }

    #[test]
    fn test_metrics_accept_numbers_and_strings() {
        let m: DashboardMetrics = serde_json::from_value(json!({
            "totalProducts": 12,
            "totalRevenue": "1520.50"
        }))
        .unwrap();
        assert_eq!(m.total_products, Some(MetricValue::Integer(12)));
        assert_eq!(m.total_revenue.unwrap().to_string(), "1520.50");
        assert_eq!(m.total_orders, None);
    }

    #[test]
    fn test_login_response() {
        let r: LoginResponse = serde_json::from_value(json!({
            "accessToken": "a",
            "refreshToken": "r",
            "user": {"id": 1}
        }))
        .unwrap();
        assert_eq!(r.access_token, "a");
        assert_eq!(r.refresh_token.as_deref(), Some("r"));
        assert_eq!(r.user["id"], 1);
    }

    #[test]
    fn test_records_serialize_back_verbatim() {
        let data = json!([
            {"id": "o1", "status": "pending", "items": [{"sku": "A"}], "paymentStatus": "paid"},
            {"id": 42, "total": "15", "customer": {"name": "Ada", "tier": "gold"}}
        ]);
        let page: Page<Order> = serde_json::from_value(json!({"data": data.clone()})).unwrap();
        let orders = page.into_items();

        assert_eq!(orders[1].id.as_deref(), Some("42"));
        assert_eq!(orders[1].total, Some(15.0));
        assert_eq!(orders[0].raw["paymentStatus"], "paid");
        assert_eq!(serde_json::to_value(&orders).unwrap(), data);
    }

    #[test]
    fn test_unexpected_field_types_do_not_fail_the_page() {
        let page: Page<Product> = serde_json::from_value(json!({
            "data": [
                {"id": "p1", "name": 7, "stock": "lots", "category": 3, "price": null},
                {"id": "p2", "name": "Mug", "stock": 2}
            ]
        }))
        .unwrap();
        let products = page.into_items();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name.as_deref(), Some("7"));
        assert_eq!(products[0].stock, None);
        assert_eq!(products[0].category_name(), None);
        assert_eq!(products[0].price, None);
        assert_eq!(products[1].stock, Some(2));
    }

    #[test]
    fn test_vendor_fields_and_extras() {
        let raw = json!({
            "id": "v1",
            "storeName": "Acme",
            "productCount": "3",
            "commission": 8,
            "payoutAccount": {"iban": "X"}
        });
        let vendor: Vendor = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(vendor.store_name.as_deref(), Some("Acme"));
        assert_eq!(vendor.product_count, Some(3));
        assert_eq!(vendor.commission, Some(8.0));
        assert_eq!(serde_json::to_value(&vendor).unwrap(), raw);
    }

    #[test]
    fn test_metrics_keep_unlisted_fields() {
        let raw = json!({"totalOrders": 5, "recentOrders": [{"id": "o1"}]});
        let m: DashboardMetrics = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(m.total_orders, Some(MetricValue::Integer(5)));
        assert_eq!(m.raw["recentOrders"][0]["id"], "o1");
        assert_eq!(serde_json::to_value(&m).unwrap(), raw);
    }

    #[test]
    fn test_non_object_record_is_rejected() {
        assert!(serde_json::from_value::<Page<Order>>(json!({"data": [1, 2]})).is_err());
    }
}
