//! # paywall-core
//!
//! Client-side "unlock paid content" logic for a static page.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   PaywallController                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐  │
//! │  │ UnlockState  │  │ LaunchParams │  │ VerificationApi  │  │
//! │  │  (machine)   │──│  (priority)  │──│   (Strategy)     │  │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘  │
//! │           TokenStore              Page                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! On load the controller tries, in order, a checkout session id, a
//! magic-link token and a stored access token, and reveals content when the
//! verification API accepts it. Without a backend it runs the demo flow.
//!
//! Content returned by the API is injected as-is; no sanitization happens
//! here.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod launch;
pub mod machine;
pub mod page;
pub mod token;

#[cfg(test)]
mod testing;

pub use api::{
    ApiErrorBody, CheckoutRequest, CheckoutSession, UnlockedContent, VerificationApi,
    VerifiedContent,
};
pub use config::{Labels, PaywallConfig};
pub use controller::{CheckoutOutcome, PaywallController, RecoveryOutcome};
pub use error::{PaywallError, Result};
pub use launch::{Credential, LaunchParams};
pub use machine::{Transition, UnlockSource, UnlockState};
pub use page::{ButtonState, Page, RecoveryStatus};
pub use token::{AccessToken, MagicToken, MemoryTokenStore, SessionId, TokenStore};
