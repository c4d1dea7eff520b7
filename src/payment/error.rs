//! Error types for the payment gateway adapter.

use thiserror::Error;

use crate::api::ApiError;

/// Errors that can occur while collecting an online payment.
///
/// A dismissed widget is *not* represented here: cancellation is a
/// neutral outcome, carried by
/// [`PaymentOutcome::Cancelled`](super::PaymentOutcome).
#[derive(Debug, Error)]
pub enum PaymentError {
    /// The gateway order could not be created.
    #[error("Failed to create gateway order: {0}")]
    GatewayOrder(String),

    /// The gateway order response carried no order handle.
    #[error("Gateway order id not received from server")]
    MissingGatewayHandle,

    /// The completion callback arrived without all three signature fields;
    /// the server is not contacted in this case.
    #[error("Payment verification failed: missing payment details")]
    MissingSignature,

    /// The server rejected the signed callback.
    #[error("Payment verification failed: {0}")]
    VerificationFailed(String),

    /// The order amount does not fit the gateway's minor unit.
    #[error("Order amount out of range for the payment gateway")]
    AmountOverflow,

    /// Transport-level failure talking to the payment endpoints.
    #[error(transparent)]
    Api(#[from] ApiError),
}
