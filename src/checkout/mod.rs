//! The three-step checkout flow: Cart → SelectAddress → Payment.
//!
//! Step indices are a stepper-display concern; the real gating is in the
//! transition methods. Network calls are awaited strictly in sequence,
//! one in flight per checkout attempt.

pub mod error;

pub use error::CheckoutError;

use std::sync::Arc;

use tracing::{info, instrument};

use crate::address::AddressBook;
use crate::api::OrderApi;
use crate::cart::CartClient;
use crate::model::{
    Address, AddressSnapshot, AuthState, CartLine, OrderDraft, OrderItemDraft, PaymentMethod,
    ShippingAddressDraft,
};
use crate::payment::{PaymentGateway, PaymentOutcome};
use crate::pricing::{self, PricingSnapshot};

/// The checkout steps, in stepper order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckoutStep {
    Cart = 0,
    SelectAddress = 1,
    Payment = 2,
}

impl CheckoutStep {
    /// Zero-based position for the stepper display.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Result of the terminal submit.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: String,
    pub payment: PaymentOutcome,
}

/// Drives the checkout sequence over the cart, the address book, the order
/// API, and the payment gateway.
pub struct CheckoutFlow {
    cart: CartClient,
    addresses: AddressBook,
    orders: Arc<dyn OrderApi>,
    gateway: PaymentGateway,
}

impl CheckoutFlow {
    pub fn new(
        cart: CartClient,
        addresses: AddressBook,
        orders: Arc<dyn OrderApi>,
        gateway: PaymentGateway,
    ) -> Self {
        Self {
            cart,
            addresses,
            orders,
            gateway,
        }
    }

    /// Cart → SelectAddress.
    ///
    /// Requires authentication; an unauthenticated continue returns
    /// [`CheckoutError::LoginRequired`] and does not navigate. Whether the
    /// user already has saved addresses does not matter, since address
    /// creation is offered inline on the next step.
    pub fn advance_from_cart(&self, auth: &AuthState) -> Result<CheckoutStep, CheckoutError> {
        if !auth.is_authenticated() {
            return Err(CheckoutError::LoginRequired);
        }
        Ok(CheckoutStep::SelectAddress)
    }

    /// SelectAddress → Payment.
    ///
    /// Requires a selected address id, which the caller carries forward to
    /// the payment step as a navigation argument.
    pub fn advance_from_select(&self, selected: Option<&str>) -> Result<CheckoutStep, CheckoutError> {
        match selected {
            Some(id) if !id.is_empty() => Ok(CheckoutStep::Payment),
            _ => Err(CheckoutError::NoAddressSelected),
        }
    }

    /// The terminal transition: build the draft, submit it, and collect
    /// payment when the method requires it.
    ///
    /// The cart is cleared exactly once, immediately after the order is
    /// created; an order-creation failure leaves it untouched so the
    /// submit can be retried from the same step.
    #[instrument(skip(self, auth))]
    pub async fn place_order(
        &self,
        auth: &AuthState,
        method: PaymentMethod,
        address_id: Option<&str>,
    ) -> Result<PlacedOrder, CheckoutError> {
        let lines = self.cart.lines().await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let address = self
            .addresses
            .resolve(address_id)
            .await?
            .ok_or(CheckoutError::NoAddressAvailable)?;

        let snapshot = pricing::price_lines(&lines);
        let draft = build_order_draft(&lines, &snapshot, method, &address);

        let created = self.orders.create_order(&draft).await?;
        if created.error {
            return Err(CheckoutError::OrderRejected(created.message));
        }
        let order_id = created
            .order
            .map(|order| order.id)
            .ok_or_else(|| CheckoutError::OrderRejected("Order id not received".to_string()))?;

        self.cart.clear().await?;
        info!(%order_id, "Order created");

        let payment = match method {
            PaymentMethod::Cod => PaymentOutcome::CashOnDelivery,
            PaymentMethod::OnlineTransfer => {
                self.gateway.collect(&order_id, snapshot.to_pay, auth).await?
            }
        };

        Ok(PlacedOrder { order_id, payment })
    }
}

/// Build the one-shot order payload from the current cart lines and the
/// resolved delivery address. The address snapshot is frozen here so later
/// edits cannot alter the order.
pub fn build_order_draft(
    lines: &[CartLine],
    snapshot: &PricingSnapshot,
    method: PaymentMethod,
    address: &Address,
) -> OrderDraft {
    let items: Vec<OrderItemDraft> = lines
        .iter()
        .map(|line| OrderItemDraft {
            product: line.product_id.clone(),
            quantity: line.quantity,
            price: line.case_size.offered_price,
            case_size: line.case_size.clone(),
            total_units: line.units(),
        })
        .collect();

    OrderDraft {
        total_units: lines.iter().map(CartLine::units).sum(),
        total_cases: snapshot.total_items,
        total_amount: snapshot.to_pay,
        payment_method: method,
        shipping_address: ShippingAddressDraft {
            address_id: address.id.clone(),
            snapshot: Some(AddressSnapshot::from(address)),
        },
        items,
    }
}
