//! Order drafts sent to the order API, and placed orders read back from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::address::{Address, AddressType};
use super::catalog::CaseSize;

/// How the order is paid. Wire names are fixed by the order API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "cod")]
    Cod,
    #[serde(rename = "onlineTransfer")]
    OnlineTransfer,
}

/// One draft entry per cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDraft {
    #[serde(rename = "_product")]
    pub product: String,
    pub quantity: u32,
    /// Offered price in effect at purchase time.
    pub price: Decimal,
    pub case_size: CaseSize,
    pub total_units: u32,
}

/// Frozen copy of an [`Address`] minus its id, embedded in an order so that
/// later address edits do not retroactively alter past orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressSnapshot {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub address_type: AddressType,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    #[serde(default)]
    pub is_default: bool,
}

impl From<&Address> for AddressSnapshot {
    fn from(address: &Address) -> Self {
        Self {
            full_name: address.full_name.clone(),
            phone: address.phone.clone(),
            address_type: address.address_type,
            street: address.street.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            country: address.country.clone(),
            postal_code: address.postal_code.clone(),
            is_default: address.is_default,
        }
    }
}

/// Shipping destination carried on a draft: the chosen address id plus a
/// snapshot taken at submission time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<AddressSnapshot>,
}

/// The payload sent once to the order-creation endpoint. Not retained
/// client-side after submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<OrderItemDraft>,
    /// Equals the pricing snapshot's `to_pay` at submission time.
    pub total_amount: Decimal,
    pub total_units: u32,
    pub total_cases: u32,
    pub payment_method: PaymentMethod,
    pub shipping_address: ShippingAddressDraft,
}

/// Fulfilment status reported by the order API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// A placed order, as returned by the order list and detail endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: String,
    pub items: Vec<OrderItemDraft>,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub total_units: u32,
    pub total_cases: u32,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    pub shipping_address: ShippingAddressDraft,
}
