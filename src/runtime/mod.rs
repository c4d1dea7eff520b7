//! System wiring and process-level concerns.

pub mod storefront;
pub mod tracing;

pub use self::storefront::StorefrontSystem;
pub use self::tracing::setup_tracing;
