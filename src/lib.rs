#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Storefront Core
//!
//! > **The cart and checkout engine of a direct-to-consumer storefront.**
//!
//! This crate implements the client-side core of an e-commerce storefront:
//! a stock-aware shopping cart, pure pricing derivation, a three-step
//! checkout flow, an address book, and an adapter for a hosted-checkout
//! payment widget. The remote commerce API (catalog, profile, orders,
//! payments) stays behind trait seams with an HTTP binding and in-memory
//! test doubles.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One owner for the cart
//! The cart is the only piece of shared mutable state here, and it has
//! exactly one owner: the cart actor. Every mutation travels as a message
//! and is processed sequentially in the actor's task, so the per-product
//! stock invariant is enforced in a single place with no locks, and no
//! UI leaf can reach around the check.
//!
//! ### Traits at the seams
//! Everything remote ([`api::ProfileApi`], [`api::OrderApi`],
//! [`api::PaymentApi`]) and everything interactive
//! ([`payment::PaymentWidget`]) is a trait. Tests inject doubles from
//! [`api::mock`] and drive full checkout journeys deterministically;
//! production injects [`api::HttpCommerceApi`] and a real widget binding.
//!
//! ### Money is exact
//! Prices and totals are [`rust_decimal::Decimal`] end to end. Rounding
//! happens only at the display edge and at the gateway's minor-unit
//! conversion, where it must be exact to avoid off-by-one-cent charges.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: plain serde data types, from catalog records and cart
//!   lines to addresses, order drafts, and the user profile.
//! - [`pricing`]: pure totals/shipping derivation, recomputed on read.
//! - [`cart`]: the cart actor, its request enum, and the client handle.
//! - [`api`]: remote API contracts, wire envelopes, the reqwest binding,
//!   and test doubles.
//! - [`address`]: address CRUD with re-fetch-after-write and the
//!   chosen/default/first resolution rule.
//! - [`payment`]: the gateway adapter covering the gateway order handle,
//!   the widget session, and signed-callback verification.
//! - [`checkout`]: the step machine and the terminal order submission.
//! - [`session`]: cart/auth persistence under one namespaced key.
//! - [`runtime`]: [`runtime::StorefrontSystem`] wiring and tracing setup.
//!
//! ## 🚀 Quick Start
//!
//! ```ignore
//! let system = StorefrontSystem::new(profile, orders, payments, widget,
//!     GatewaySettings::new(key_id));
//!
//! system.cart_client.add(&product, &case_size).await?;
//! let placed = system.checkout
//!     .place_order(&auth, PaymentMethod::Cod, Some("addr_1"))
//!     .await?;
//!
//! system.shutdown().await?;
//! ```

pub mod address;
pub mod api;
pub mod cart;
pub mod checkout;
pub mod model;
pub mod payment;
pub mod pricing;
pub mod runtime;
pub mod session;
