//! A cloneable handle for talking to the cart actor.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::model::{CartLine, CaseSize, Product};
use crate::pricing::PricingSnapshot;

use super::actor::CartRequest;
use super::error::CartError;

/// Client for interacting with the cart actor.
///
/// Cheap to clone; every consumer (pricing reads, checkout, session
/// restore) goes through one of these rather than reaching into the line
/// collection directly.
#[derive(Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub(crate) fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T, CartError>>) -> CartRequest,
    ) -> Result<T, CartError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(make(respond_to))
            .await
            .map_err(|_| CartError::ActorClosed)?;
        response.await.map_err(|_| CartError::ActorDropped)?
    }

    /// Add one case of the given variant to the cart.
    ///
    /// Rejected with [`CartError::InsufficientStock`] when the product's
    /// aggregate usage would exceed its stock snapshot.
    #[instrument(skip(self, product, case_size), fields(product_id = %product.id, size = case_size.size))]
    pub async fn add(&self, product: &Product, case_size: &CaseSize) -> Result<(), CartError> {
        debug!("Sending request");
        let product = product.clone();
        let case_size = case_size.clone();
        self.request(|respond_to| CartRequest::Add {
            product,
            case_size,
            respond_to,
        })
        .await
    }

    /// Set a line's quantity directly. Zero is rejected; use
    /// [`CartClient::change_quantity`] for stepper semantics.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        product_id: &str,
        size: u32,
        quantity: u32,
    ) -> Result<(), CartError> {
        debug!("Sending request");
        let product_id = product_id.to_string();
        self.request(|respond_to| CartRequest::SetQuantity {
            product_id,
            size,
            quantity,
            respond_to,
        })
        .await
    }

    /// Quantity-stepper semantics: a step down to zero removes the line.
    pub async fn change_quantity(
        &self,
        product_id: &str,
        size: u32,
        quantity: u32,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            self.remove(product_id, size).await
        } else {
            self.set_quantity(product_id, size, quantity).await
        }
    }

    /// Remove a line. Safe to call twice; the second call is a no-op.
    #[instrument(skip(self))]
    pub async fn remove(&self, product_id: &str, size: u32) -> Result<(), CartError> {
        debug!("Sending request");
        let product_id = product_id.to_string();
        self.request(|respond_to| CartRequest::Remove {
            product_id,
            size,
            respond_to,
        })
        .await
    }

    /// Empty the cart. Called once, after an order is successfully created.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), CartError> {
        debug!("Sending request");
        self.request(|respond_to| CartRequest::Clear { respond_to })
            .await
    }

    pub async fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        self.request(|respond_to| CartRequest::Lines { respond_to })
            .await
    }

    /// Derived totals, recomputed from the current lines on every call.
    pub async fn pricing(&self) -> Result<PricingSnapshot, CartError> {
        self.request(|respond_to| CartRequest::Pricing { respond_to })
            .await
    }

    /// Whether one more case of the variant fits under the stock ceiling.
    pub async fn can_add_more(&self, product_id: &str, size: u32) -> Result<bool, CartError> {
        let product_id = product_id.to_string();
        self.request(|respond_to| CartRequest::CanAddMore {
            product_id,
            size,
            respond_to,
        })
        .await
    }

    /// Replace the cart contents from a persisted session snapshot.
    #[instrument(skip(self, lines))]
    pub async fn restore(&self, lines: Vec<CartLine>) -> Result<(), CartError> {
        debug!(lines = lines.len(), "Sending request");
        self.request(|respond_to| CartRequest::Restore { lines, respond_to })
            .await
    }
}
