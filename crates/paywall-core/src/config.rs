//! Paywall Configuration
//!
//! Injected at initialization. An absent API base means there is no
//! verification backend and the controller runs its demo flow.

use std::time::Duration;

use url::Url;

use crate::error::{PaywallError, Result};

pub const ENV_API_BASE: &str = "PAYWALL_API_BASE";
pub const ENV_STORAGE_KEY: &str = "PAYWALL_STORAGE_KEY";
pub const ENV_FADE_MS: &str = "PAYWALL_FADE_MS";
pub const ENV_DEMO_DELAY_MS: &str = "PAYWALL_DEMO_DELAY_MS";

/// User-visible strings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    pub unlock: String,
    pub unlock_pending: String,
    pub recovery: String,
    pub recovery_pending: String,
    pub recovery_done: String,
    pub recovery_sent: String,
    pub recovery_unavailable: String,
    pub demo_notice: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            unlock: "Unlock Full Article".into(),
            unlock_pending: "Redirecting to checkout...".into(),
            recovery: "Send Access Link".into(),
            recovery_pending: "Sending...".into(),
            recovery_done: "Sent".into(),
            recovery_sent: "Check your inbox for your access link.".into(),
            recovery_unavailable: "Access links are not available in demo mode.".into(),
            demo_notice: "DEMO MODE: Payments are not configured yet. Showing content preview."
                .into(),
        }
    }
}

/// Paywall configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaywallConfig {
    /// Verification API base URL (`None` = demo mode)
    pub api_base: Option<String>,

    /// Local storage key holding the access token
    pub storage_key: String,

    /// Content fade-in duration
    pub fade: Duration,

    /// Delay before the demo unlock reveals content
    pub demo_delay: Duration,

    pub labels: Labels,
}

impl Default for PaywallConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            storage_key: "paywall_access_token".into(),
            fade: Duration::from_millis(800),
            demo_delay: Duration::from_millis(500),
            labels: Labels::default(),
        }
    }
}

impl PaywallConfig {
    /// Demo configuration with no backend
    pub fn demo() -> Self {
        Self::default()
    }

    /// Configuration talking to the given verification API
    pub fn with_backend(api_base: impl Into<String>) -> Self {
        Self {
            api_base: Some(api_base.into()),
            ..Default::default()
        }
    }

    /// Whether an API base is configured.
    ///
    /// The controller decides on the API actually attached to it, not on this.
    pub const fn has_backend(&self) -> bool {
        self.api_base.is_some()
    }

    /// Build from a variable lookup (process env, compile-time env, tests)
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let api_base = match lookup(ENV_API_BASE).map(|v| v.trim().to_string()) {
            Some(base) if !base.is_empty() => {
                Url::parse(&base)
                    .map_err(|e| PaywallError::Config(format!("{ENV_API_BASE}: {e}")))?;
                Some(base.trim_end_matches('/').to_string())
            }
            _ => None,
        };

        let storage_key = lookup(ENV_STORAGE_KEY)
            .filter(|k| !k.is_empty())
            .unwrap_or(defaults.storage_key);

        Ok(Self {
            api_base,
            storage_key,
            fade: parse_millis(&lookup, ENV_FADE_MS)?.unwrap_or(defaults.fade),
            demo_delay: parse_millis(&lookup, ENV_DEMO_DELAY_MS)?.unwrap_or(defaults.demo_delay),
            labels: defaults.labels,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }
}

fn parse_millis(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| PaywallError::Config(format!("{key}: {e}")))
        })
        .transpose()
}
