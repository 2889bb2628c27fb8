//! Browser Collaborators
//!
//! `localStorage` token persistence and the signal-backed page the
//! controller drives.

use std::time::Duration;

use async_trait::async_trait;
use leptos::prelude::*;
use paywall_core::{
    AccessToken, ButtonState, Labels, Page, PaywallError, RecoveryStatus, Result, TokenStore,
};
use url::Url;
use wasm_bindgen::JsValue;

fn js_error(context: &str, err: &JsValue) -> String {
    format!("{context}: {err:?}")
}

fn browser_window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| PaywallError::Page("no window".into()))
}

/// Access token kept under a fixed `localStorage` key
#[derive(Clone, Debug)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage> {
        browser_window()
            .map_err(|e| PaywallError::Storage(e.to_string()))?
            .local_storage()
            .map_err(|e| PaywallError::Storage(js_error("localStorage", &e)))?
            .ok_or_else(|| PaywallError::Storage("localStorage unavailable".into()))
    }
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Result<Option<AccessToken>> {
        let value = Self::storage()?
            .get_item(&self.key)
            .map_err(|e| PaywallError::Storage(js_error("getItem", &e)))?;
        Ok(value.filter(|v| !v.is_empty()).map(AccessToken::new))
    }

    fn save(&self, token: &AccessToken) -> Result<()> {
        Self::storage()?
            .set_item(&self.key, token.as_str())
            .map_err(|e| PaywallError::Storage(js_error("setItem", &e)))
    }

    fn clear(&self) -> Result<()> {
        Self::storage()?
            .remove_item(&self.key)
            .map_err(|e| PaywallError::Storage(js_error("removeItem", &e)))
    }
}

/// Reactive state the post page renders from
#[derive(Clone, Copy)]
pub struct PaywallSignals {
    pub paywall_visible: RwSignal<bool>,
    /// Markup from the API; `None` keeps the page's inline content
    pub content: RwSignal<Option<String>>,
    pub content_visible: RwSignal<bool>,
    pub content_opaque: RwSignal<bool>,
    pub fade: RwSignal<Duration>,
    pub success_banner: RwSignal<bool>,
    pub demo_notice: RwSignal<Option<String>>,
    pub unlock_button: RwSignal<ButtonState>,
    pub recovery_button: RwSignal<ButtonState>,
    pub recovery_status: RwSignal<Option<RecoveryStatus>>,
}

impl PaywallSignals {
    pub fn new(labels: &Labels) -> Self {
        Self {
            paywall_visible: RwSignal::new(true),
            content: RwSignal::new(None),
            content_visible: RwSignal::new(false),
            content_opaque: RwSignal::new(false),
            fade: RwSignal::new(Duration::ZERO),
            success_banner: RwSignal::new(false),
            demo_notice: RwSignal::new(None),
            unlock_button: RwSignal::new(ButtonState::enabled(&labels.unlock)),
            recovery_button: RwSignal::new(ButtonState::enabled(&labels.recovery)),
            recovery_status: RwSignal::new(None),
        }
    }
}

/// The live page: location/history through `web-sys`, DOM through signals
pub struct BrowserPage {
    signals: PaywallSignals,
}

impl BrowserPage {
    pub const fn new(signals: PaywallSignals) -> Self {
        Self { signals }
    }
}

#[async_trait(?Send)]
impl Page for BrowserPage {
    fn current_url(&self) -> Result<Url> {
        let href = browser_window()?
            .location()
            .href()
            .map_err(|e| PaywallError::Page(js_error("location.href", &e)))?;
        Ok(Url::parse(&href)?)
    }

    fn replace_url(&self, url: &Url) -> Result<()> {
        browser_window()?
            .history()
            .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(url.as_str())))
            .map_err(|e| PaywallError::Page(js_error("history.replaceState", &e)))
    }

    fn navigate(&self, url: &str) -> Result<()> {
        browser_window()?
            .location()
            .set_href(url)
            .map_err(|e| PaywallError::Page(js_error("location.href", &e)))
    }

    fn hide_paywall(&self) {
        self.signals.paywall_visible.set(false);
    }

    fn reveal_content(&self, markup: Option<&str>, fade: Duration) {
        let signals = self.signals;
        if let Some(markup) = markup {
            signals.content.set(Some(markup.to_string()));
        }
        signals.fade.set(fade);
        signals.content_opaque.set(false);
        signals.content_visible.set(true);
        // Opacity flips on the next frame so the transition actually runs.
        request_animation_frame(move || signals.content_opaque.set(true));
    }

    fn show_success_banner(&self) {
        self.signals.success_banner.set(true);
    }

    fn show_demo_banner(&self, message: &str) {
        self.signals.demo_notice.set(Some(message.to_string()));
    }

    fn set_unlock_button(&self, state: ButtonState) {
        self.signals.unlock_button.set(state);
    }

    fn set_recovery_button(&self, state: ButtonState) {
        self.signals.recovery_button.set(state);
    }

    fn set_recovery_status(&self, status: RecoveryStatus) {
        self.signals.recovery_status.set(Some(status));
    }

    fn alert(&self, message: &str) {
        if let Err(e) = browser_window().and_then(|w| {
            w.alert_with_message(message)
                .map_err(|e| PaywallError::Page(js_error("alert", &e)))
        }) {
            tracing::warn!(error = %e, "Could not show alert");
        }
    }

    async fn sleep(&self, duration: Duration) {
        let (tx, rx) = futures::channel::oneshot::channel::<()>();
        set_timeout(
            move || {
                let _ = tx.send(());
            },
            duration,
        );
        let _ = rx.await;
    }
}
