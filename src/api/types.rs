//! Wire envelopes for the remote commerce API.
//!
//! Field names follow the server's JSON exactly, including the gateway's
//! fixed `razorpay_*` callback fields; do not rename them.

use serde::{Deserialize, Serialize};

use crate::model::{Address, AddressSnapshot, Order, User};

/// `{ error, message, user }` from the profile endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub user: User,
}

/// The polymorphic `address` field of a profile update. The server keys on
/// the payload shape: a bare object adds, an object with `addressId` edits
/// or flips the default flag, an array replaces the whole list.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AddressPayload {
    New(AddressSnapshot),
    Edit(AddressEdit),
    Replace(Vec<Address>),
    SetDefault {
        #[serde(rename = "addressId")]
        address_id: String,
        #[serde(rename = "isDefault")]
        is_default: bool,
    },
}

/// Edited fields plus the id of the address being edited.
#[derive(Debug, Clone, Serialize)]
pub struct AddressEdit {
    #[serde(flatten)]
    pub address: AddressSnapshot,
    #[serde(rename = "addressId")]
    pub address_id: String,
}

/// `PUT /api/profile` body.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    pub address: AddressPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedOrder {
    #[serde(rename = "_id")]
    pub id: String,
}

/// `{ error, message, order: { _id } }` from order creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub order: Option<CreatedOrder>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserOrdersResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderDetailResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub order: Option<Order>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrderHandle {
    #[serde(rename = "orderId")]
    pub order_id: String,
}

/// `{ error, message, data: { orderId } }` from gateway order creation.
/// `data` is absent on failure, and its absence on success is itself a
/// fatal condition for the payment attempt.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrderResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<GatewayOrderHandle>,
}

/// The three signed fields the gateway's completion callback must carry,
/// forwarded verbatim to the verification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedCallback {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentResponse {
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
}
