pub mod concern;
pub mod config;
pub mod error;
pub mod filter;
pub mod geo;
pub mod map_sdk;
pub mod markers;
pub mod models;
pub mod query;
pub mod search;
pub mod selection;
pub mod viewport;

#[cfg(feature = "http")]
pub mod api;

#[cfg(test)]
pub(crate) mod testing;

pub use error::LocatorError;
