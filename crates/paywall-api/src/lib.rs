//! # paywall-api
//!
//! `reqwest` implementation of [`VerificationApi`] for the hosted
//! verification worker.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paywall_api::HttpVerificationApi;
//! use paywall_core::{PaywallConfig, PaywallController};
//!
//! let config = PaywallConfig::from_env()?;
//! let api = HttpVerificationApi::from_config(&config)?;
//! let controller = PaywallController::new(config, store, page).with_backend(api);
//! ```

pub mod http;

pub use http::HttpVerificationApi;

// Re-export core types for convenience
pub use paywall_core::{PaywallError, Result, VerificationApi};
