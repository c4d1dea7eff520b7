use std::sync::Arc;

use tracing::{error, info};

use crate::address::AddressBook;
use crate::api::{OrderApi, PaymentApi, ProfileApi};
use crate::cart::CartClient;
use crate::checkout::CheckoutFlow;
use crate::payment::{GatewaySettings, PaymentGateway, PaymentWidget};

/// The runtime orchestrator for the storefront core.
///
/// `StorefrontSystem` is responsible for:
/// - **Lifecycle management**: starting and stopping the cart actor
/// - **Dependency wiring**: connecting the checkout flow to the cart, the
///   address book, and the payment gateway
///
/// The remote API handles and the payment widget are injected, so tests
/// run the whole system against in-memory doubles and production runs it
/// against [`crate::api::HttpCommerceApi`] and a real widget binding.
pub struct StorefrontSystem {
    /// Client for the cart actor.
    pub cart_client: CartClient,

    /// CRUD over the user's saved addresses.
    pub address_book: AddressBook,

    /// The three-step checkout flow.
    pub checkout: CheckoutFlow,

    /// Task handle for the cart actor (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Creates the system with the cart actor running.
    pub fn new(
        profile: Arc<dyn ProfileApi>,
        orders: Arc<dyn OrderApi>,
        payments: Arc<dyn PaymentApi>,
        widget: Arc<dyn PaymentWidget>,
        settings: GatewaySettings,
    ) -> Self {
        let (cart_actor, cart_client) = crate::cart::new();
        let cart_handle = tokio::spawn(cart_actor.run());

        let address_book = AddressBook::new(profile);
        let gateway = PaymentGateway::new(payments, widget, settings);
        let checkout = CheckoutFlow::new(
            cart_client.clone(),
            address_book.clone(),
            orders,
            gateway,
        );

        Self {
            cart_client,
            address_book,
            checkout,
            handles: vec![cart_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the cart actor's channel; the actor
    /// drains its queue and exits, and we wait for the task to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront core...");

        drop(self.cart_client);
        drop(self.checkout);
        drop(self.address_book);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Cart actor task failed: {:?}", e);
                return Err(format!("Cart actor task failed: {:?}", e));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
