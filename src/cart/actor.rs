//! The cart actor: single owner of the cart's mutable state.
//!
//! All mutation paths funnel through [`CartRequest`] messages, so the
//! per-product stock invariant is enforced in exactly one place and no lock
//! is needed: the actor processes requests sequentially in its own task.
//!
//! The invariant: for any product, the sum of `quantity × case_size.size`
//! across all of that product's lines never exceeds the product's stock
//! snapshot.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::model::{CartLine, CaseSize, LineKey, Product};
use crate::pricing::{self, PricingSnapshot};

use super::client::CartClient;
use super::error::CartError;

/// One-shot response channel for cart requests.
pub type Response<T> = oneshot::Sender<Result<T, CartError>>;

/// Messages accepted by the cart actor.
#[derive(Debug)]
pub enum CartRequest {
    /// Add one case of the given variant, creating the line if absent.
    Add {
        product: Product,
        case_size: CaseSize,
        respond_to: Response<()>,
    },
    /// Set a line's quantity directly. Zero is rejected; use `Remove`.
    SetQuantity {
        product_id: String,
        size: u32,
        quantity: u32,
        respond_to: Response<()>,
    },
    /// Delete a line. A no-op when the line is absent.
    Remove {
        product_id: String,
        size: u32,
        respond_to: Response<()>,
    },
    /// Empty the cart. Issued once, after an order is created.
    Clear { respond_to: Response<()> },
    /// Read the current lines.
    Lines { respond_to: Response<Vec<CartLine>> },
    /// Derive the pricing snapshot from the current lines.
    Pricing { respond_to: Response<PricingSnapshot> },
    /// Whether one more case of the variant would fit under the stock
    /// ceiling. Used to disable the "+" control before an add is attempted.
    CanAddMore {
        product_id: String,
        size: u32,
        respond_to: Response<bool>,
    },
    /// Replace the contents from a persisted session snapshot.
    Restore {
        lines: Vec<CartLine>,
        respond_to: Response<()>,
    },
}

/// The actor that owns the cart lines.
///
/// Lines keep insertion order (a `Vec`, as the cart is small and order
/// matters for display and for the order draft), with at most one line per
/// `(product_id, case_size.size)` pair.
pub struct CartActor {
    receiver: mpsc::Receiver<CartRequest>,
    lines: Vec<CartLine>,
}

impl CartActor {
    pub fn new(buffer_size: usize) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            lines: Vec::new(),
        };
        (actor, CartClient::new(sender))
    }

    /// Runs the actor's event loop, processing requests until every client
    /// handle has been dropped.
    pub async fn run(mut self) {
        info!("Cart actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::Add {
                    product,
                    case_size,
                    respond_to,
                } => {
                    debug!(product_id = %product.id, size = case_size.size, "Add");
                    let result = self.add(&product, &case_size);
                    if let Err(e) = &result {
                        warn!(product_id = %product.id, error = %e, "Add rejected");
                    }
                    let _ = respond_to.send(result);
                }
                CartRequest::SetQuantity {
                    product_id,
                    size,
                    quantity,
                    respond_to,
                } => {
                    debug!(%product_id, size, quantity, "SetQuantity");
                    let result = self.set_quantity(&product_id, size, quantity);
                    if let Err(e) = &result {
                        warn!(%product_id, error = %e, "SetQuantity rejected");
                    }
                    let _ = respond_to.send(result);
                }
                CartRequest::Remove {
                    product_id,
                    size,
                    respond_to,
                } => {
                    let key = LineKey { product_id, size };
                    let before = self.lines.len();
                    self.lines.retain(|line| line.key() != key);
                    debug!(product_id = %key.product_id, size, removed = before != self.lines.len(), "Remove");
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Clear { respond_to } => {
                    info!(lines = self.lines.len(), "Clear");
                    self.lines.clear();
                    let _ = respond_to.send(Ok(()));
                }
                CartRequest::Lines { respond_to } => {
                    let _ = respond_to.send(Ok(self.lines.clone()));
                }
                CartRequest::Pricing { respond_to } => {
                    let _ = respond_to.send(Ok(pricing::price_lines(&self.lines)));
                }
                CartRequest::CanAddMore {
                    product_id,
                    size,
                    respond_to,
                } => {
                    let _ = respond_to.send(Ok(self.can_add_more(&product_id, size)));
                }
                CartRequest::Restore { lines, respond_to } => {
                    info!(lines = lines.len(), "Restore");
                    self.lines = lines;
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(lines = self.lines.len(), "Cart actor shutdown");
    }

    /// Units of the product already committed across all its lines.
    fn product_usage(&self, product_id: &str) -> u32 {
        self.lines
            .iter()
            .filter(|line| line.product_id == product_id)
            .map(CartLine::units)
            .sum()
    }

    fn find_line(&mut self, key: &LineKey) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == key.product_id && line.case_size.size == key.size)
    }

    fn add(&mut self, product: &Product, case_size: &CaseSize) -> Result<(), CartError> {
        let usage = self.product_usage(&product.id);
        let requested_units = usage + case_size.size;
        let key = LineKey {
            product_id: product.id.clone(),
            size: case_size.size,
        };

        if let Some(line) = self.find_line(&key) {
            if requested_units > line.stock {
                return Err(CartError::InsufficientStock {
                    requested_units,
                    available: line.stock,
                });
            }
            line.quantity += 1;
        } else {
            if requested_units > product.stock {
                return Err(CartError::InsufficientStock {
                    requested_units,
                    available: product.stock,
                });
            }
            self.lines.push(CartLine::first(product, case_size));
        }
        Ok(())
    }

    fn set_quantity(&mut self, product_id: &str, size: u32, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity(0));
        }

        let usage = self.product_usage(product_id);
        let key = LineKey {
            product_id: product_id.to_string(),
            size,
        };
        let Some(line) = self.find_line(&key) else {
            // Setting a quantity on a line that no longer exists is not an
            // error; the line may have been removed from another view.
            return Ok(());
        };

        let other_usage = usage - line.units();
        let requested_units = other_usage + quantity * line.case_size.size;
        if requested_units > line.stock {
            return Err(CartError::InsufficientStock {
                requested_units,
                available: line.stock,
            });
        }

        line.quantity = quantity;
        Ok(())
    }

    fn can_add_more(&self, product_id: &str, size: u32) -> bool {
        match self
            .lines
            .iter()
            .find(|line| line.product_id == product_id && line.case_size.size == size)
        {
            Some(line) => self.product_usage(product_id) + size <= line.stock,
            // No line yet: nothing known to forbid it. Add validates against
            // the fresh catalog record anyway.
            None => true,
        }
    }
}
