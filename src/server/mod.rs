//! Server module for the configuration API
//!
//! This module provides a `ServerBuilder` that wires a store and a mailer
//! into a `ServerHost` and exposes it over REST.

pub mod builder;
pub mod exposure;
pub mod handlers;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::{LISTING_TITLE, ServerHost};
