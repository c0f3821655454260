//! # Backend API Wrapper
//!
//! `CafeClient` - one method per backend operation, one HTTP call per
//! method. No caching, no retries: every caller sees exactly one
//! request/response, and failure surfaces immediately.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Backend Contract                                     │
//! │                                                                         │
//! │  GET  /api/gangbung/ingredients        full stock snapshot             │
//! │  POST /api/gangbung/ingredients        create ingredient               │
//! │  PUT  /api/gangbung/ingredients/{id}   full-record overwrite           │
//! │  GET  /api/gangbung/menu               all menus with recipes          │
//! │  POST /api/gangbung/menu               create menu + recipe variants   │
//! │  GET  /api/gangbung/orders             order history                   │
//! │  POST /api/gangbung/order              place order                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Some deployed backend versions wrap list responses (`{"items": [...]}`)
//! or answer a create with a one-element array; the decoders here tolerate
//! both shapes.

use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use cafe_core::types::{
    CreateIngredientRequest, CreateMenuRequest, CreateOrderRequest, Ingredient, Menu, Order,
};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Path prefix the backend mounts its API under.
const API_PREFIX: &str = "/api/gangbung";

/// Longest response body excerpt carried inside an error.
const MAX_ERROR_BODY: usize = 512;

/// Typed client for the external cafe backend.
pub struct CafeClient {
    http: reqwest::Client,
    base_url: String,
}

impl CafeClient {
    /// Creates a client from connection settings.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(CafeClient {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    // =========================================================================
    // Ingredients
    // =========================================================================

    /// Fetches the full ingredient stock snapshot.
    ///
    /// This is the read half of every sufficiency decision: one full list,
    /// no caching, so the staleness window is bounded by the time between
    /// this read and the deduction writes that follow it.
    pub async fn list_ingredients(&self) -> ClientResult<Vec<Ingredient>> {
        let path = "/ingredients";
        debug!(path, "GET ingredient snapshot");
        let resp = self.http.get(self.endpoint(path)).send().await?;
        decode_json(resp, path).await
    }

    /// Creates a new ingredient.
    pub async fn create_ingredient(
        &self,
        request: &CreateIngredientRequest,
    ) -> ClientResult<Ingredient> {
        let path = "/ingredients";
        debug!(path, name = %request.name, "POST ingredient");
        let resp = self
            .http
            .post(self.endpoint(path))
            .json(request)
            .send()
            .await?;
        decode_json(resp, path).await
    }

    /// Overwrites an ingredient record.
    ///
    /// The backend contract is a full-record overwrite, not a delta, so
    /// re-sending the same record is idempotent.
    pub async fn update_ingredient(&self, id: i64, record: &Ingredient) -> ClientResult<Ingredient> {
        let path = format!("/ingredients/{}", id);
        debug!(path = %path, stock_qty = record.stock_qty, "PUT ingredient");
        let resp = self
            .http
            .put(self.endpoint(&path))
            .json(record)
            .send()
            .await?;
        decode_json(resp, &path).await
    }

    // =========================================================================
    // Menus
    // =========================================================================

    /// Fetches all menus with their recipe variants.
    pub async fn list_menus(&self) -> ClientResult<Vec<Menu>> {
        let path = "/menu";
        debug!(path, "GET menus");
        let resp = self.http.get(self.endpoint(path)).send().await?;
        decode_json(resp, path).await
    }

    /// Creates a menu together with its recipe variants.
    pub async fn create_menu(&self, request: &CreateMenuRequest) -> ClientResult<Menu> {
        let path = "/menu";
        debug!(path, name = %request.name, recipes = request.recipe.len(), "POST menu");
        let resp = self
            .http
            .post(self.endpoint(path))
            .json(request)
            .send()
            .await?;
        let value: Value = decode_json(resp, path).await?;
        first_or_only(value)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetches the order history.
    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let path = "/orders";
        debug!(path, "GET orders");
        let resp = self.http.get(self.endpoint(path)).send().await?;
        let value: Value = decode_json(resp, path).await?;
        unwrap_list(value)
    }

    /// Places an order.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        let path = "/order";
        debug!(path, lines = request.order_items.len(), "POST order");
        let resp = self
            .http
            .post(self.endpoint(path))
            .json(request)
            .send()
            .await?;
        decode_json(resp, path).await
    }
}

// =============================================================================
// Response Handling
// =============================================================================

/// Checks the status and decodes the JSON body.
async fn decode_json<T: DeserializeOwned>(resp: Response, path: &str) -> ClientResult<T> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            path: format!("{}{}", API_PREFIX, path),
            body: truncate(&body),
        });
    }

    serde_json::from_str(&body)
        .map_err(|e| ClientError::DecodeFailed(format!("{}{}: {}", API_PREFIX, path, e)))
}

/// Create responses are sometimes a one-element array.
fn first_or_only<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    let value = match value {
        Value::Array(mut items) if !items.is_empty() => items.remove(0),
        Value::Array(_) => {
            return Err(ClientError::DecodeFailed(
                "create response was an empty array".to_string(),
            ))
        }
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// List responses are sometimes wrapped in `{"items": [...]}` or
/// `{"data": [...]}`.
fn unwrap_list<T: DeserializeOwned>(value: Value) -> ClientResult<Vec<T>> {
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map
            .remove("items")
            .or_else(|| map.remove("data"))
            .unwrap_or(Value::Array(Vec::new())),
        _ => {
            return Err(ClientError::DecodeFailed(
                "expected a list response".to_string(),
            ))
        }
    };
    Ok(serde_json::from_value(list)?)
}

fn truncate(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        body.to_string()
    } else {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_or_only_accepts_both_shapes() {
        let single = json!({"id": 1, "name": "Latte", "price": 55.0, "recipe": []});
        let menu: Menu = first_or_only(single).unwrap();
        assert_eq!(menu.id, 1);

        let array = json!([{"id": 2, "name": "Mocha", "price": 60.0, "recipe": []}]);
        let menu: Menu = first_or_only(array).unwrap();
        assert_eq!(menu.id, 2);

        let empty = json!([]);
        assert!(first_or_only::<Menu>(empty).is_err());
    }

    #[test]
    fn test_unwrap_list_accepts_wrappers() {
        let plain = json!([{"id": 1, "createdAt": "2025-11-02T09:30:00Z", "orderItems": []}]);
        let orders: Vec<Order> = unwrap_list(plain).unwrap();
        assert_eq!(orders.len(), 1);

        let wrapped = json!({"items": [{"id": 2, "createdAt": "2025-11-02T09:31:00Z", "orderItems": []}]});
        let orders: Vec<Order> = unwrap_list(wrapped).unwrap();
        assert_eq!(orders[0].id, 2);

        let empty_object = json!({"count": 0});
        let orders: Vec<Order> = unwrap_list(empty_object).unwrap();
        assert!(orders.is_empty());

        assert!(unwrap_list::<Order>(json!("nope")).is_err());
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let short = "ok";
        assert_eq!(truncate(short), "ok");

        let long = "ก".repeat(400); // 3 bytes each, 1200 bytes total
        let cut = truncate(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.len() <= MAX_ERROR_BODY + 3);
    }

    #[test]
    fn test_endpoint_building() {
        let config = ClientConfig {
            base_url: "http://cafe.local:8080/".to_string(),
            ..ClientConfig::default()
        };
        let client = CafeClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("/ingredients"),
            "http://cafe.local:8080/api/gangbung/ingredients"
        );
    }
}
