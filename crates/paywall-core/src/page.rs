//! Page Abstraction
//!
//! Everything the controller does to the hosting page: location and
//! history, the paywall and content elements, banners, controls, timers.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

/// Label and enabled flag of a clickable control
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
}

impl ButtonState {
    pub fn enabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }

    pub fn disabled(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: false,
        }
    }
}

/// Inline status line of the access-recovery form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryStatus {
    Sent(String),
    Error(String),
}

#[async_trait(?Send)]
pub trait Page {
    /// URL the page was loaded with
    fn current_url(&self) -> Result<Url>;

    /// Rewrite the visible URL without navigating
    fn replace_url(&self, url: &Url) -> Result<()>;

    /// Full page transition
    fn navigate(&self, url: &str) -> Result<()>;

    fn hide_paywall(&self);

    /// Show the content container, fading in over `fade`.
    ///
    /// `Some(markup)` replaces the container's contents verbatim (no
    /// sanitization); `None` reveals whatever the page already holds.
    fn reveal_content(&self, markup: Option<&str>, fade: Duration);

    fn show_success_banner(&self);

    /// Insert a notice ahead of the paywall
    fn show_demo_banner(&self, message: &str);

    fn set_unlock_button(&self, state: ButtonState);

    fn set_recovery_button(&self, state: ButtonState);

    fn set_recovery_status(&self, status: RecoveryStatus);

    /// Blocking notice
    fn alert(&self, message: &str);

    async fn sleep(&self, duration: Duration);
}
