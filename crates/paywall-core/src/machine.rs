//! Unlock State Machine
//!
//! ```text
//! LOCKED ──Begin(src)──▶ VERIFYING(src) ──Succeeded──▶ UNLOCKED(src)
//!   ▲                        │
//!   └────────Failed──────────┘
//! LOCKED ──Reveal(src)─────────────────────────────▶ UNLOCKED(src)
//! ```
//!
//! `Unlocked` is terminal for the lifetime of the page.

use crate::error::{PaywallError, Result};

/// What drove an unlock
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnlockSource {
    /// Return from the hosted checkout with a session id
    CheckoutReturn,
    /// Magic link from an access-recovery email
    MagicLink,
    /// Silent restore from a persisted access token
    StoredToken,
    /// Demo checkout return (`paid=true`) with no backend
    PaidReturn,
    /// Demo unlock button with no backend
    Demo,
}

impl UnlockSource {
    /// The success banner is reserved for fresh payment or magic-link returns
    pub const fn shows_success_banner(self) -> bool {
        matches!(self, Self::CheckoutReturn | Self::MagicLink | Self::PaidReturn)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CheckoutReturn => "checkout_return",
            Self::MagicLink => "magic_link",
            Self::StoredToken => "stored_token",
            Self::PaidReturn => "paid_return",
            Self::Demo => "demo",
        }
    }
}

/// Unlock state of a single page load
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnlockState {
    #[default]
    Locked,
    Verifying(UnlockSource),
    Unlocked(UnlockSource),
}

/// Input to the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// A verification request is about to be sent
    Begin(UnlockSource),
    /// The outstanding verification succeeded
    Succeeded,
    /// The outstanding verification failed
    Failed,
    /// Content is revealed without verification (demo paths)
    Reveal(UnlockSource),
}

impl UnlockState {
    pub const fn is_unlocked(self) -> bool {
        matches!(self, Self::Unlocked(_))
    }

    pub const fn is_verifying(self) -> bool {
        matches!(self, Self::Verifying(_))
    }

    /// Apply a transition, rejecting pairs the model does not allow
    pub fn apply(self, transition: Transition) -> Result<Self> {
        match (self, transition) {
            (Self::Unlocked(_), _) => Ok(self),
            (Self::Locked, Transition::Begin(source)) => Ok(Self::Verifying(source)),
            (Self::Locked, Transition::Reveal(source)) => Ok(Self::Unlocked(source)),
            (Self::Verifying(source), Transition::Succeeded) => Ok(Self::Unlocked(source)),
            (Self::Verifying(_), Transition::Failed) => Ok(Self::Locked),
            (state, transition) => Err(PaywallError::InvalidTransition(format!(
                "{transition:?} from {state:?}"
            ))),
        }
    }
}
