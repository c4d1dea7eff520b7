//! Pure data structures shared across the cart, checkout, and API layers.

pub mod address;
pub mod cart;
pub mod catalog;
pub mod order;
pub mod user;

pub use address::*;
pub use cart::*;
pub use catalog::*;
pub use order::*;
pub use user::*;
