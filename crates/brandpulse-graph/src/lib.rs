//! Instagram Graph API access: credentials, business discovery requests, error normalisation.

pub mod config;
pub use config::{ConfigError, GraphConfig};

#[cfg(feature = "http")]
pub mod client;

#[cfg(feature = "http")]
pub use client::{GraphClient, GraphError, discovery_fields};
