//! Trait seams for the remote commerce API.
//!
//! The backend owns all real validation and state; this module only pins
//! down the contracts the checkout path depends on. [`HttpCommerceApi`] is
//! the production binding; [`mock`] has in-memory doubles for tests.

pub mod error;
pub mod http;
pub mod mock;
pub mod types;

pub use error::ApiError;
pub use http::{ApiConfig, HttpCommerceApi};
pub use types::*;

use async_trait::async_trait;

use crate::model::OrderDraft;

/// Profile endpoint: the user record and its saved addresses.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn get_profile(&self) -> Result<ProfileResponse, ApiError>;
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileResponse, ApiError>;
}

/// Order endpoints: creation plus the reads backing the orders view.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreateOrderResponse, ApiError>;
    async fn user_orders(&self) -> Result<UserOrdersResponse, ApiError>;
    async fn get_order(&self, id: &str) -> Result<OrderDetailResponse, ApiError>;
}

/// Payment endpoints: gateway order creation and callback verification.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    async fn create_gateway_order(&self, order_id: &str) -> Result<GatewayOrderResponse, ApiError>;
    async fn verify_payment(
        &self,
        callback: &SignedCallback,
    ) -> Result<VerifyPaymentResponse, ApiError>;
}
