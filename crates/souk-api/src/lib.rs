#![allow(missing_docs)]

pub mod error;
pub mod source;

#[cfg(feature = "http")]
pub mod client;

pub use error::ApiError;
pub use source::MarketSource;

#[cfg(feature = "fs")]
pub use source::FileSource;

#[cfg(feature = "http")]
pub use client::{ApiClient, DEFAULT_ORIGIN, ORIGIN_ENV_VAR};
