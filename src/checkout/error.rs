//! Error types for the checkout flow.

use thiserror::Error;

use crate::api::ApiError;
use crate::cart::CartError;
use crate::payment::PaymentError;

/// Errors that can occur while moving through checkout.
///
/// Every failure converts to one of these at the flow boundary, so a bad
/// step leaves sibling state untouched and the user retries from the same
/// step.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Leaving the cart step requires authentication; the caller opens the
    /// login interstitial instead of navigating.
    #[error("Login required to continue")]
    LoginRequired,

    /// No delivery address was selected on the address step.
    #[error("Please select a delivery address")]
    NoAddressSelected,

    /// Submission with an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The user has no saved address to fall back on.
    #[error("No delivery address on file")]
    NoAddressAvailable,

    /// The order API answered with its error envelope; the cart is left
    /// untouched.
    #[error("Failed to place order: {0}")]
    OrderRejected(String),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Payment(#[from] PaymentError),
}
