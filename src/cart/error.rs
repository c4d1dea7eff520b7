//! Error types for the cart actor.

use thiserror::Error;

/// Errors that can occur during cart operations.
///
/// `InsufficientStock` is the user-visible rejection signal for mutations
/// that would breach a product's stock ceiling; the previous quantity is
/// retained whenever it is returned.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The mutation would push the product's aggregate usage past its
    /// stock snapshot.
    #[error("Insufficient stock: requested {requested_units} units, available {available}")]
    InsufficientStock { requested_units: u32, available: u32 },

    /// The provided quantity is invalid; zero means "remove", which callers
    /// express through removal, not a quantity set.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// The cart actor's channel is closed.
    #[error("Cart actor closed")]
    ActorClosed,

    /// The cart actor dropped the response channel.
    #[error("Cart actor dropped response channel")]
    ActorDropped,
}
