//! Payment gateway adapter: bridges a freshly created order to the
//! third-party hosted-checkout widget and verifies its signed callback.
//!
//! The widget itself is an opaque UI takeover. It is modelled as a single
//! async operation ([`PaymentWidget::open`]) whose two outcomes,
//! completion and dismissal, are variants of one awaited value, so
//! cancellation never travels through the error path.

pub mod error;

pub use error::PaymentError;

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{info, instrument, warn};

use crate::api::{PaymentApi, SignedCallback};
use crate::model::AuthState;
use crate::pricing;

/// Customer details prefilled into the widget's form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerPrefill {
    pub name: String,
    pub email: Option<String>,
    pub contact: Option<String>,
}

impl CustomerPrefill {
    fn from_auth(auth: &AuthState) -> Self {
        match &auth.user {
            Some(user) => Self {
                name: user.full_name(),
                email: user.email.clone(),
                contact: Some(user.phone.clone()),
            },
            None => Self::default(),
        }
    }
}

/// Configuration handed to the hosted checkout widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Publishable gateway key.
    pub key_id: String,
    /// Amount in the gateway's minor unit (e.g. paise).
    pub amount_minor: i64,
    pub currency: String,
    /// The gateway-side order handle the charge is made against.
    pub gateway_order_id: String,
    pub description: String,
    pub prefill: CustomerPrefill,
}

/// The completion callback as it arrives from the widget. The widget is an
/// external surface, so each signature field is unchecked and may be
/// absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompletedPayment {
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
}

impl CompletedPayment {
    /// All three signature fields, or `None` if any is missing.
    pub fn signed(&self) -> Option<SignedCallback> {
        Some(SignedCallback {
            razorpay_order_id: self.razorpay_order_id.clone()?,
            razorpay_payment_id: self.razorpay_payment_id.clone()?,
            razorpay_signature: self.razorpay_signature.clone()?,
        })
    }
}

/// How a widget session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOutcome {
    /// The user completed the charge; the callback fires at most once.
    Completed(CompletedPayment),
    /// The user closed the widget without paying.
    Dismissed,
}

/// The hosted checkout surface.
#[async_trait]
pub trait PaymentWidget: Send + Sync {
    /// Hands control to the widget and resolves when the user completes or
    /// dismisses it. There is no timeout: the span is bounded only by user
    /// action.
    async fn open(&self, config: WidgetConfig) -> WidgetOutcome;
}

/// How a payment attempt concluded, distinguishing success from neutral
/// cancellation.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Nothing to collect online; the order is payable on delivery.
    CashOnDelivery,
    /// The gateway callback was verified server-side.
    Verified,
    /// Payment was cancelled. Neutral, not an error.
    Cancelled,
}

/// Static gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub key_id: String,
    pub currency: String,
    pub description: String,
}

impl GatewaySettings {
    pub fn new(key_id: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            currency: "INR".to_string(),
            description: "Order Payment".to_string(),
        }
    }
}

/// Adapter from a created order to a settled (or cancelled) charge.
pub struct PaymentGateway {
    api: Arc<dyn PaymentApi>,
    widget: Arc<dyn PaymentWidget>,
    settings: GatewaySettings,
}

impl PaymentGateway {
    pub fn new(
        api: Arc<dyn PaymentApi>,
        widget: Arc<dyn PaymentWidget>,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            api,
            widget,
            settings,
        }
    }

    /// Collect payment for an already-created order.
    ///
    /// One widget session per checkout attempt: callers keep the submit
    /// control disabled while a session is pending rather than invoking
    /// this concurrently for the same order.
    #[instrument(skip(self, auth))]
    pub async fn collect(
        &self,
        order_id: &str,
        amount: Decimal,
        auth: &AuthState,
    ) -> Result<PaymentOutcome, PaymentError> {
        let response = self.api.create_gateway_order(order_id).await?;
        if response.error {
            return Err(PaymentError::GatewayOrder(response.message));
        }
        let handle = response
            .data
            .map(|data| data.order_id)
            .ok_or(PaymentError::MissingGatewayHandle)?;

        let amount_minor =
            pricing::to_minor_units(amount).ok_or(PaymentError::AmountOverflow)?;

        let config = WidgetConfig {
            key_id: self.settings.key_id.clone(),
            amount_minor,
            currency: self.settings.currency.clone(),
            gateway_order_id: handle,
            description: self.settings.description.clone(),
            prefill: CustomerPrefill::from_auth(auth),
        };

        info!(amount_minor, "Opening payment widget");
        match self.widget.open(config).await {
            WidgetOutcome::Dismissed => {
                info!("Payment was cancelled");
                Ok(PaymentOutcome::Cancelled)
            }
            WidgetOutcome::Completed(completed) => {
                let Some(signed) = completed.signed() else {
                    warn!("Completion callback missing signature fields");
                    return Err(PaymentError::MissingSignature);
                };

                let verdict = self.api.verify_payment(&signed).await?;
                if verdict.error {
                    warn!(message = %verdict.message, "Verification rejected");
                    return Err(PaymentError::VerificationFailed(verdict.message));
                }

                info!("Payment verified");
                Ok(PaymentOutcome::Verified)
            }
        }
    }
}
