//! Storefront API
//!
//! [`StorefrontApi`] is the client's view of the JSON API. [`HttpApi`] talks
//! to a running server with `reqwest`; tests substitute [`MockStorefrontApi`].

use async_trait::async_trait;
use greengrocer::status::OrderStatus;
#[cfg(test)]
use mockall::automock;
use reqwest::{Client, RequestBuilder, Response, header::ACCEPT};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::ClientError,
    models::{
        AuthSession, Credentials, Order, OrderList, PlaceOrder, Product, ProductFilter,
        ProductsPage, User, VerifiedUser,
    },
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// Create an account and sign in.
    async fn register(&self, email: &str, password: &str) -> Result<AuthSession, ClientError>;

    /// Exchange credentials for a token.
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError>;

    /// Resolve a token to its user.
    async fn verify(&self, token: &str) -> Result<User, ClientError>;

    /// One page of the catalog.
    async fn list_products(&self, filter: ProductFilter) -> Result<ProductsPage, ClientError>;

    async fn get_product(&self, product: Uuid) -> Result<Product, ClientError>;

    async fn place_order(&self, token: &str, order: &PlaceOrder) -> Result<Order, ClientError>;

    /// The signed-in user's orders, newest first.
    async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ClientError>;

    async fn get_order(&self, token: &str, order: Uuid) -> Result<Order, ClientError>;

    /// Advance an order's status. Admin only.
    async fn update_order_status(
        &self,
        token: &str,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, ClientError>;

    /// Every order in the store. Admin only.
    async fn list_all_orders(&self, token: &str) -> Result<Vec<Order>, ClientError>;
}

/// [`StorefrontApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.header(ACCEPT, "application/json").send().await?;

        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();

    debug!(status = status.as_u16(), body = %body, "api request rejected");

    Err(ClientError::Api {
        status: status.as_u16(),
        message: error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
    })
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    brief: String,
}

/// Pull the human-readable message out of an API error body.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.error.brief)
        .filter(|brief| !brief.is_empty())
}

#[async_trait]
impl StorefrontApi for HttpApi {
    async fn register(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        self.send(
            self.client
                .post(self.url("auth/register"))
                .json(&Credentials { email, password }),
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ClientError> {
        self.send(
            self.client
                .post(self.url("auth/login"))
                .json(&Credentials { email, password }),
        )
        .await
    }

    async fn verify(&self, token: &str) -> Result<User, ClientError> {
        let verified: VerifiedUser = self
            .send(self.client.get(self.url("auth/verify")).bearer_auth(token))
            .await?;

        Ok(verified.user)
    }

    async fn list_products(&self, filter: ProductFilter) -> Result<ProductsPage, ClientError> {
        let mut query: Vec<(&str, String)> = Vec::new();

        if let Some(page) = filter.page {
            query.push(("page", page.to_string()));
        }

        if let Some(limit) = filter.limit {
            query.push(("limit", limit.to_string()));
        }

        if let Some(category) = filter.category {
            query.push(("category", category.to_string()));
        }

        self.send(self.client.get(self.url("products")).query(&query))
            .await
    }

    async fn get_product(&self, product: Uuid) -> Result<Product, ClientError> {
        self.send(self.client.get(self.url(&format!("products/{product}"))))
            .await
    }

    async fn place_order(&self, token: &str, order: &PlaceOrder) -> Result<Order, ClientError> {
        self.send(
            self.client
                .post(self.url("orders"))
                .bearer_auth(token)
                .json(order),
        )
        .await
    }

    async fn list_orders(&self, token: &str) -> Result<Vec<Order>, ClientError> {
        let list: OrderList = self
            .send(self.client.get(self.url("orders")).bearer_auth(token))
            .await?;

        Ok(list.orders)
    }

    async fn get_order(&self, token: &str, order: Uuid) -> Result<Order, ClientError> {
        self.send(
            self.client
                .get(self.url(&format!("orders/{order}")))
                .bearer_auth(token),
        )
        .await
    }

    async fn update_order_status(
        &self,
        token: &str,
        order: Uuid,
        status: OrderStatus,
    ) -> Result<Order, ClientError> {
        self.send(
            self.client
                .put(self.url(&format!("orders/{order}/status")))
                .bearer_auth(token)
                .json(&json!({ "status": status.as_str() })),
        )
        .await
    }

    async fn list_all_orders(&self, token: &str) -> Result<Vec<Order>, ClientError> {
        let list: OrderList = self
            .send(self.client.get(self.url("admin/orders")).bearer_auth(token))
            .await?;

        Ok(list.orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_reads_the_brief() {
        let body = r#"{"error":{"code":409,"name":"Conflict","brief":"Insufficient stock for Fresh Apples. Available: 5","detail":""}}"#;

        assert_eq!(
            error_message(body).as_deref(),
            Some("Insufficient stock for Fresh Apples. Available: 5")
        );
    }

    #[test]
    fn error_message_ignores_unstructured_bodies() {
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(error_message(r#"{"error":{"brief":""}}"#), None);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = HttpApi::new("http://shop.test/");

        assert_eq!(api.url("products"), "http://shop.test/products");
    }
}
