//! Cart state management: the actor owning the lines and its client handle.

pub mod actor;
pub mod client;
pub mod error;

pub use actor::{CartActor, CartRequest};
pub use client::CartClient;
pub use error::CartError;

/// Creates a new cart actor and its client.
pub fn new() -> (CartActor, CartClient) {
    CartActor::new(32)
}
