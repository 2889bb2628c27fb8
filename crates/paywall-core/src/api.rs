//! Verification API Abstraction
//!
//! The external service that creates checkout sessions and exchanges
//! payment or token evidence for unlocked content. The controller only
//! talks to it through [`VerificationApi`].
//!
//! | Call | Purpose |
//! |---|---|
//! | `POST /create-checkout-session` | hosted-checkout redirect URL |
//! | `GET /verify?session_id=...` | session → content + token |
//! | `GET /verify-token?token=...` | token → content |
//! | `POST /resend-magic-link` | email an access link |

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::token::{AccessToken, SessionId};

/// Body of `POST /create-checkout-session`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Where the provider sends the visitor after payment
    pub success_url: String,

    /// Where the provider sends the visitor on cancel
    pub cancel_url: String,
}

/// Response of `POST /create-checkout-session`
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Hosted checkout page; absent means the session was not created
    #[serde(default)]
    pub url: Option<String>,
}

/// Response of `GET /verify`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VerifiedContent {
    /// Unlocked markup, injected verbatim
    pub content: String,

    /// Access token to persist for later visits
    #[serde(default)]
    pub token: Option<AccessToken>,
}

/// Response of `GET /verify-token`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnlockedContent {
    /// Unlocked markup, injected verbatim
    pub content: String,
}

/// Error body the API may attach to a non-success response
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Strategy trait for the verification backend.
///
/// Futures are not required to be `Send`: the controller runs on a single
/// event-loop thread (browser or current-thread runtime).
#[async_trait(?Send)]
pub trait VerificationApi {
    /// Request a hosted checkout session
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession>;

    /// Exchange a checkout session id for content and a token
    async fn verify_session(&self, session_id: &SessionId) -> Result<VerifiedContent>;

    /// Exchange a stored or magic-link token for content
    async fn verify_token(&self, token: &str) -> Result<UnlockedContent>;

    /// Ask the backend to email an access link.
    ///
    /// Implementations must not reveal whether the address is known.
    async fn resend_magic_link(&self, email: &str) -> Result<()>;
}
