//! Address management over the profile endpoint.
//!
//! Every mutation is "fire the request, then re-fetch the full profile"
//! rather than patching local state. The server enforces default-address
//! exclusivity, so reloading is the only way to see the list it actually
//! settled on.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::api::{AddressEdit, AddressPayload, ApiError, ProfileApi, ProfileUpdate};
use crate::model::{Address, AddressSnapshot};

/// CRUD over the user's saved addresses, plus the resolution rule the
/// checkout flow uses to pick a delivery address.
#[derive(Clone)]
pub struct AddressBook {
    profile: Arc<dyn ProfileApi>,
}

impl AddressBook {
    pub fn new(profile: Arc<dyn ProfileApi>) -> Self {
        Self { profile }
    }

    /// The saved addresses, freshly fetched.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Address>, ApiError> {
        debug!("Fetching profile");
        Ok(self.profile.get_profile().await?.user.address)
    }

    /// Save a new address and reload the list.
    #[instrument(skip(self, address))]
    pub async fn add(&self, address: AddressSnapshot) -> Result<Vec<Address>, ApiError> {
        self.profile
            .update_profile(&ProfileUpdate {
                address: AddressPayload::New(address),
            })
            .await?;
        self.list().await
    }

    /// Edit an existing address and reload the list.
    #[instrument(skip(self, address))]
    pub async fn update(&self, id: &str, address: AddressSnapshot) -> Result<Vec<Address>, ApiError> {
        self.profile
            .update_profile(&ProfileUpdate {
                address: AddressPayload::Edit(AddressEdit {
                    address,
                    address_id: id.to_string(),
                }),
            })
            .await?;
        self.list().await
    }

    /// Delete an address by sending back the filtered list, then reload.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: &str) -> Result<Vec<Address>, ApiError> {
        let remaining: Vec<Address> = self
            .list()
            .await?
            .into_iter()
            .filter(|address| address.id.as_deref() != Some(id))
            .collect();

        self.profile
            .update_profile(&ProfileUpdate {
                address: AddressPayload::Replace(remaining),
            })
            .await?;
        self.list().await
    }

    /// Mark an address as the default and reload the list.
    #[instrument(skip(self))]
    pub async fn set_default(&self, id: &str) -> Result<Vec<Address>, ApiError> {
        self.profile
            .update_profile(&ProfileUpdate {
                address: AddressPayload::SetDefault {
                    address_id: id.to_string(),
                    is_default: true,
                },
            })
            .await?;
        self.list().await
    }

    /// The address checkout should ship to: the explicitly chosen one,
    /// falling back to the default, then to the first on file.
    #[instrument(skip(self))]
    pub async fn resolve(&self, preferred: Option<&str>) -> Result<Option<Address>, ApiError> {
        let addresses = self.list().await?;
        Ok(resolve_address(&addresses, preferred).cloned())
    }
}

/// Pure resolution rule: chosen id, else default, else first.
pub fn resolve_address<'a>(
    addresses: &'a [Address],
    preferred: Option<&str>,
) -> Option<&'a Address> {
    preferred
        .and_then(|id| addresses.iter().find(|a| a.id.as_deref() == Some(id)))
        .or_else(|| addresses.iter().find(|a| a.is_default))
        .or_else(|| addresses.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AddressType;

    fn address(id: &str, is_default: bool) -> Address {
        Address {
            id: Some(id.to_string()),
            full_name: format!("User {id}"),
            phone: "9999999999".to_string(),
            address_type: AddressType::Home,
            street: "1 Main St".to_string(),
            city: "Pune".to_string(),
            state: "MH".to_string(),
            country: "India".to_string(),
            postal_code: "411001".to_string(),
            is_default,
        }
    }

    #[test]
    fn resolve_prefers_explicit_choice() {
        let addresses = [address("a", false), address("b", true), address("c", false)];
        let resolved = resolve_address(&addresses, Some("c")).unwrap();
        assert_eq!(resolved.id.as_deref(), Some("c"));
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let addresses = [address("a", false), address("b", true)];
        let resolved = resolve_address(&addresses, None).unwrap();
        assert_eq!(resolved.id.as_deref(), Some("b"));

        // An unknown explicit id falls through to the default too.
        let resolved = resolve_address(&addresses, Some("missing")).unwrap();
        assert_eq!(resolved.id.as_deref(), Some("b"));
    }

    #[test]
    fn resolve_falls_back_to_first() {
        let addresses = [address("a", false), address("b", false)];
        let resolved = resolve_address(&addresses, None).unwrap();
        assert_eq!(resolved.id.as_deref(), Some("a"));
    }

    #[test]
    fn resolve_empty_list_is_none() {
        assert!(resolve_address(&[], None).is_none());
        assert!(resolve_address(&[], Some("a")).is_none());
    }
}
