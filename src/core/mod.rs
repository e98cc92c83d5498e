//! Core swap logic: prices, validation and conversion

pub mod config;
pub mod error;
pub mod loader;
pub mod log;
pub mod price_store;
pub mod swap;
pub mod token;
pub mod validation;

// Re-export main types for cleaner imports
pub use error::SwapError;
pub use loader::PriceLoader;
pub use price_store::{PriceSnapshot, PriceStore};
pub use swap::{SwapResult, convert};
pub use token::{IconFeed, PriceFeed, PriceRecord, TokenIcon};
pub use validation::{Field, SwapRequest, ValidationErrors, validate};
