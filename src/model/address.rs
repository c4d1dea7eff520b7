//! Saved delivery addresses.

use serde::{Deserialize, Serialize};

/// Kind of address, as labelled in the profile UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Work,
    Billing,
    Shipping,
    Other,
}

impl Default for AddressType {
    fn default() -> Self {
        AddressType::Home
    }
}

/// A saved address on the user's profile.
///
/// `id` is server-assigned and absent until the address has been persisted.
/// At most one address per user carries `is_default`; the server enforces
/// this and the client treats it as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
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
