//! HTTP binding for the commerce API traits.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use async_trait::async_trait;

use crate::model::OrderDraft;

use super::error::ApiError;
use super::types::{
    CreateOrderResponse, GatewayOrderResponse, OrderDetailResponse, ProfileResponse,
    ProfileUpdate, SignedCallback, UserOrdersResponse, VerifyPaymentResponse,
};
use super::{OrderApi, PaymentApi, ProfileApi};

/// Configuration for reaching the remote commerce API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API origin, e.g. `"https://api.example.com"`.
    pub base_url: String,

    /// Bearer token of the logged-in user, when there is one.
    pub token: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Reads `STOREFRONT_API_URL` (required) and `STOREFRONT_API_TOKEN`
    /// (optional).
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            base_url: std::env::var("STOREFRONT_API_URL")?,
            token: std::env::var("STOREFRONT_API_TOKEN").ok(),
        })
    }
}

/// Error body shape the API uses for non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// reqwest-backed client implementing all three API seams.
#[derive(Debug, Clone)]
pub struct HttpCommerceApi {
    config: ApiConfig,
    http: Client,
}

impl HttpCommerceApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("request failed with status {status}: {text}"));

            return Err(ApiError::Api { message });
        }

        Ok(response.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.authorize(self.http.get(self.url(path))).send().await?;
        Self::handle(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        Self::handle(response).await
    }

    async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.http.put(self.url(path)).json(body))
            .send()
            .await?;
        Self::handle(response).await
    }
}

#[async_trait]
impl ProfileApi for HttpCommerceApi {
    async fn get_profile(&self) -> Result<ProfileResponse, ApiError> {
        self.get_json("/api/profile").await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileResponse, ApiError> {
        self.put_json("/api/profile", update).await
    }
}

#[async_trait]
impl OrderApi for HttpCommerceApi {
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreateOrderResponse, ApiError> {
        self.post_json("/api/orders", draft).await
    }

    async fn user_orders(&self) -> Result<UserOrdersResponse, ApiError> {
        self.get_json("/api/orders/user").await
    }

    async fn get_order(&self, id: &str) -> Result<OrderDetailResponse, ApiError> {
        self.get_json(&format!("/api/orders/{id}")).await
    }
}

#[async_trait]
impl PaymentApi for HttpCommerceApi {
    async fn create_gateway_order(&self, order_id: &str) -> Result<GatewayOrderResponse, ApiError> {
        let body = serde_json::json!({ "orderId": order_id });
        self.post_json("/api/payments/create-order", &body).await
    }

    async fn verify_payment(
        &self,
        callback: &SignedCallback,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        self.post_json("/api/payments/verify", callback).await
    }
}
