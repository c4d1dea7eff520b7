//! In-memory doubles for the external surfaces.
//!
//! # Testing Strategy
//! Checkout tests should not need a real HTTP server to exercise the flow
//! logic. These doubles answer the way the remote API does (same
//! envelopes, same failure shapes) while recording every call so tests
//! can assert exactly what was sent.
//!
//! [`MockProfileApi`] is behavioral: profile updates are applied to its
//! in-memory user (including the server's default-address exclusivity), so
//! the re-fetch-after-write pattern in [`crate::address::AddressBook`] sees
//! realistic state. The order and payment doubles are scripted instead.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{Address, AddressSnapshot, OrderDraft, User};
use crate::payment::{PaymentWidget, WidgetConfig, WidgetOutcome};

use super::error::ApiError;
use super::types::{
    AddressPayload, CreateOrderResponse, CreatedOrder, GatewayOrderHandle, GatewayOrderResponse,
    OrderDetailResponse, ProfileResponse, ProfileUpdate, SignedCallback, UserOrdersResponse,
    VerifyPaymentResponse,
};
use super::{OrderApi, PaymentApi, ProfileApi};

fn address_from_snapshot(id: String, snapshot: &AddressSnapshot) -> Address {
    Address {
        id: Some(id),
        full_name: snapshot.full_name.clone(),
        phone: snapshot.phone.clone(),
        address_type: snapshot.address_type,
        street: snapshot.street.clone(),
        city: snapshot.city.clone(),
        state: snapshot.state.clone(),
        country: snapshot.country.clone(),
        postal_code: snapshot.postal_code.clone(),
        is_default: snapshot.is_default,
    }
}

/// Profile double that applies address updates to an in-memory user.
pub struct MockProfileApi {
    user: Mutex<User>,
    next_id: AtomicU64,
    failure: Option<String>,
}

impl MockProfileApi {
    pub fn new(user: User) -> Self {
        Self {
            user: Mutex::new(user),
            next_id: AtomicU64::new(1),
            failure: None,
        }
    }

    /// A double whose every call fails with the given API error message.
    pub fn failing(user: User, message: impl Into<String>) -> Self {
        Self {
            user: Mutex::new(user),
            next_id: AtomicU64::new(1),
            failure: Some(message.into()),
        }
    }

    fn response(&self) -> ProfileResponse {
        ProfileResponse {
            error: false,
            message: "ok".to_string(),
            user: self.user.lock().unwrap().clone(),
        }
    }

    fn apply(&self, update: &ProfileUpdate) {
        let mut user = self.user.lock().unwrap();
        match &update.address {
            AddressPayload::New(snapshot) => {
                let id = format!("addr_{}", self.next_id.fetch_add(1, Ordering::SeqCst));
                if snapshot.is_default {
                    for existing in &mut user.address {
                        existing.is_default = false;
                    }
                }
                user.address.push(address_from_snapshot(id, snapshot));
            }
            AddressPayload::Edit(edit) => {
                if edit.address.is_default {
                    for existing in &mut user.address {
                        existing.is_default = false;
                    }
                }
                if let Some(existing) = user
                    .address
                    .iter_mut()
                    .find(|a| a.id.as_deref() == Some(edit.address_id.as_str()))
                {
                    *existing = address_from_snapshot(edit.address_id.clone(), &edit.address);
                }
            }
            AddressPayload::Replace(addresses) => {
                user.address = addresses.clone();
            }
            AddressPayload::SetDefault {
                address_id,
                is_default,
            } => {
                for existing in &mut user.address {
                    existing.is_default =
                        *is_default && existing.id.as_deref() == Some(address_id.as_str());
                }
            }
        }
    }
}

#[async_trait]
impl ProfileApi for MockProfileApi {
    async fn get_profile(&self) -> Result<ProfileResponse, ApiError> {
        if let Some(message) = &self.failure {
            return Err(ApiError::Api {
                message: message.clone(),
            });
        }
        Ok(self.response())
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileResponse, ApiError> {
        if let Some(message) = &self.failure {
            return Err(ApiError::Api {
                message: message.clone(),
            });
        }
        self.apply(update);
        Ok(self.response())
    }
}

/// Order double that records every draft it is given.
pub struct MockOrderApi {
    drafts: Mutex<Vec<OrderDraft>>,
    next_id: AtomicU64,
    rejection: Option<String>,
}

impl MockOrderApi {
    /// Accepts every order, handing out `order_1`, `order_2`, ...
    pub fn succeeding() -> Self {
        Self {
            drafts: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            rejection: None,
        }
    }

    /// Answers every creation with the API's error envelope.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            drafts: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            rejection: Some(message.into()),
        }
    }

    /// Drafts received so far, in call order.
    pub fn drafts(&self) -> Vec<OrderDraft> {
        self.drafts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.drafts.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderApi for MockOrderApi {
    async fn create_order(&self, draft: &OrderDraft) -> Result<CreateOrderResponse, ApiError> {
        self.drafts.lock().unwrap().push(draft.clone());

        if let Some(message) = &self.rejection {
            return Ok(CreateOrderResponse {
                error: true,
                message: message.clone(),
                order: None,
            });
        }

        let id = format!("order_{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        Ok(CreateOrderResponse {
            error: false,
            message: "Order created".to_string(),
            order: Some(CreatedOrder { id }),
        })
    }

    async fn user_orders(&self) -> Result<UserOrdersResponse, ApiError> {
        Ok(UserOrdersResponse {
            error: false,
            message: "ok".to_string(),
            orders: Vec::new(),
        })
    }

    async fn get_order(&self, _id: &str) -> Result<OrderDetailResponse, ApiError> {
        Ok(OrderDetailResponse {
            error: true,
            message: "Order not found".to_string(),
            order: None,
        })
    }
}

/// Payment double with a configurable gateway handle and verification
/// verdict.
pub struct MockPaymentApi {
    gateway_handle: Option<String>,
    verify_rejection: Option<String>,
    gateway_calls: Mutex<Vec<String>>,
    verified: Mutex<Vec<SignedCallback>>,
}

impl MockPaymentApi {
    /// Hands out `rzp_order_1` and verifies every callback.
    pub fn succeeding() -> Self {
        Self {
            gateway_handle: Some("rzp_order_1".to_string()),
            verify_rejection: None,
            gateway_calls: Mutex::new(Vec::new()),
            verified: Mutex::new(Vec::new()),
        }
    }

    /// Answers gateway order creation without the handle the widget needs.
    pub fn without_handle() -> Self {
        Self {
            gateway_handle: None,
            verify_rejection: None,
            gateway_calls: Mutex::new(Vec::new()),
            verified: Mutex::new(Vec::new()),
        }
    }

    /// Verification answers with the API's error envelope.
    pub fn failing_verification(message: impl Into<String>) -> Self {
        Self {
            gateway_handle: Some("rzp_order_1".to_string()),
            verify_rejection: Some(message.into()),
            gateway_calls: Mutex::new(Vec::new()),
            verified: Mutex::new(Vec::new()),
        }
    }

    /// Internal order ids passed to gateway order creation, in call order.
    pub fn gateway_calls(&self) -> Vec<String> {
        self.gateway_calls.lock().unwrap().clone()
    }

    /// Callbacks forwarded to verification, in call order.
    pub fn verified(&self) -> Vec<SignedCallback> {
        self.verified.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentApi for MockPaymentApi {
    async fn create_gateway_order(&self, order_id: &str) -> Result<GatewayOrderResponse, ApiError> {
        self.gateway_calls.lock().unwrap().push(order_id.to_string());
        Ok(GatewayOrderResponse {
            error: false,
            message: "ok".to_string(),
            data: self
                .gateway_handle
                .clone()
                .map(|order_id| GatewayOrderHandle { order_id }),
        })
    }

    async fn verify_payment(
        &self,
        callback: &SignedCallback,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        self.verified.lock().unwrap().push(callback.clone());

        if let Some(message) = &self.verify_rejection {
            return Ok(VerifyPaymentResponse {
                error: true,
                message: message.clone(),
            });
        }
        Ok(VerifyPaymentResponse {
            error: false,
            message: "Payment verified".to_string(),
        })
    }
}

/// Widget double that plays back queued outcomes and records the configs
/// it was opened with.
pub struct ScriptedWidget {
    outcomes: Mutex<VecDeque<WidgetOutcome>>,
    configs: Mutex<Vec<WidgetConfig>>,
}

impl ScriptedWidget {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            configs: Mutex::new(Vec::new()),
        }
    }

    /// A widget whose next session resolves with the given outcome.
    pub fn resolving(outcome: WidgetOutcome) -> Self {
        let widget = Self::new();
        widget.push(outcome);
        widget
    }

    pub fn push(&self, outcome: WidgetOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    /// Configs the widget was opened with, in call order.
    pub fn configs(&self) -> Vec<WidgetConfig> {
        self.configs.lock().unwrap().clone()
    }
}

impl Default for ScriptedWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentWidget for ScriptedWidget {
    async fn open(&self, config: WidgetConfig) -> WidgetOutcome {
        self.configs.lock().unwrap().push(config);
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("No scripted outcome left for payment widget")
    }
}
