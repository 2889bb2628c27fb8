//! Paywall Controller
//!
//! Drives one page load: decides on load whether the visitor already has
//! access, starts the hosted checkout, reveals content, and handles the
//! "already purchased?" access-link request.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let controller = PaywallController::new(config, store, page).with_backend(api);
//!
//! controller.on_load().await;          // page ready
//! controller.start_checkout().await;   // unlock button
//! controller.request_access_link(email).await;
//! ```

use std::cell::Cell;

use url::Url;

use crate::api::VerificationApi;
use crate::config::PaywallConfig;
use crate::error::{PaywallError, Result};
use crate::launch::{checkout_return_urls, strip_launch_params, Credential, LaunchParams};
use crate::machine::{Transition, UnlockSource, UnlockState};
use crate::page::{ButtonState, Page, RecoveryStatus};
use crate::token::{AccessToken, TokenStore};

/// Result of a checkout click
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Browser sent to the hosted checkout page
    Redirected(String),
    /// No backend: content revealed in demo mode
    DemoUnlocked,
    /// Trigger restored and the user notified
    Failed(String),
    /// Content is already visible
    AlreadyUnlocked,
}

/// Result of an access-link request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecoveryOutcome {
    Sent,
    Failed(String),
    InvalidEmail,
    Unavailable,
}

/// Single-page paywall controller
pub struct PaywallController<A, S, P> {
    config: PaywallConfig,
    backend: Option<A>,
    store: S,
    page: P,
    state: Cell<UnlockState>,
}

impl<A, S, P> PaywallController<A, S, P>
where
    A: VerificationApi,
    S: TokenStore,
    P: Page,
{
    /// Create a controller without a verification backend (demo flow).
    ///
    /// `config.api_base` alone does not enable the live flow; only an API
    /// attached with [`Self::with_backend`] does.
    pub fn new(config: PaywallConfig, store: S, page: P) -> Self {
        Self {
            config,
            backend: None,
            store,
            page,
            state: Cell::new(UnlockState::Locked),
        }
    }

    /// Attach the verification backend
    #[must_use]
    pub fn with_backend(mut self, api: A) -> Self {
        if !self.config.has_backend() {
            tracing::debug!("Verification backend attached without an API base in config");
        }
        self.backend = Some(api);
        self
    }

    /// Whether an API is attached. This, not [`PaywallConfig::has_backend`],
    /// selects between the live and demo flows.
    pub const fn has_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn state(&self) -> UnlockState {
        self.state.get()
    }

    pub const fn config(&self) -> &PaywallConfig {
        &self.config
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn page(&self) -> &P {
        &self.page
    }

    /// Evaluate the page URL and stored token, taking the first match
    pub async fn on_load(&self) -> UnlockState {
        if self.state() != UnlockState::Locked {
            return self.state();
        }

        if self.config.has_backend() && !self.has_backend() {
            tracing::warn!("API base configured but no backend attached; running demo flow");
        }

        let url = match self.page.current_url() {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot read page URL; paywall stays up");
                return self.state();
            }
        };

        let stored = self.load_token();
        let Some(credential) = LaunchParams::from_url(&url).credential(stored, self.has_backend())
        else {
            tracing::debug!("No unlock credential present");
            return self.state();
        };

        let source = credential.source();
        let result = match (&credential, self.backend.as_ref()) {
            (Credential::PaidReturn, _) => {
                self.advance(Transition::Reveal(source));
                self.reveal(None, source);
                self.strip_url(&url);
                return self.state();
            }
            (_, None) => return self.state(),
            (Credential::Session(session_id), Some(api)) => {
                self.begin(source);
                api.verify_session(session_id).await.map(|verified| {
                    match verified.token.as_ref() {
                        Some(token) => self.save_token(token),
                        None => tracing::debug!("Session verified without a token"),
                    }
                    verified.content
                })
            }
            (Credential::MagicLink(token), Some(api)) => {
                self.begin(source);
                api.verify_token(token.as_str()).await.map(|unlocked| {
                    self.save_token(&token.clone().into_access_token());
                    unlocked.content
                })
            }
            (Credential::Stored(token), Some(api)) => {
                self.begin(source);
                api.verify_token(token.as_str()).await.map(|unlocked| unlocked.content)
            }
        };

        match result {
            Ok(content) => {
                self.advance(Transition::Succeeded);
                self.reveal(Some(&content), source);
                if source != UnlockSource::StoredToken {
                    self.strip_url(&url);
                }
            }
            Err(e) => {
                tracing::warn!(source = source.as_str(), error = %e, "Verification failed; paywall stays up");
                if source == UnlockSource::StoredToken && e.is_rejection() {
                    self.clear_token();
                }
                self.advance(Transition::Failed);
            }
        }

        self.state()
    }

    /// Handle a click on the unlock button
    pub async fn start_checkout(&self) -> CheckoutOutcome {
        if self.state().is_unlocked() {
            return CheckoutOutcome::AlreadyUnlocked;
        }

        let Some(api) = self.backend.as_ref() else {
            return self.demo_unlock().await;
        };

        self.page
            .set_unlock_button(ButtonState::disabled(&self.config.labels.unlock_pending));

        let redirect = match self.request_checkout(api).await {
            Ok(url) => self.page.navigate(&url).map(|()| url),
            Err(e) => Err(e),
        };

        match redirect {
            Ok(url) => {
                tracing::info!("Redirecting to hosted checkout");
                CheckoutOutcome::Redirected(url)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Checkout could not be started");
                self.page
                    .set_unlock_button(ButtonState::enabled(&self.config.labels.unlock));
                let message = e.user_message();
                self.page.alert(&message);
                CheckoutOutcome::Failed(message)
            }
        }
    }

    /// Handle the "already purchased?" form
    pub async fn request_access_link(&self, email: &str) -> RecoveryOutcome {
        let labels = &self.config.labels;
        let email = email.trim();

        if !is_plausible_email(email) {
            let message = PaywallError::InvalidEmail(email.to_string()).user_message();
            self.page.set_recovery_status(RecoveryStatus::Error(message));
            return RecoveryOutcome::InvalidEmail;
        }

        let Some(api) = self.backend.as_ref() else {
            self.page
                .set_recovery_status(RecoveryStatus::Error(labels.recovery_unavailable.clone()));
            return RecoveryOutcome::Unavailable;
        };

        self.page
            .set_recovery_button(ButtonState::disabled(&labels.recovery_pending));

        match api.resend_magic_link(email).await {
            Ok(()) => {
                tracing::info!("Access link requested");
                self.page
                    .set_recovery_button(ButtonState::disabled(&labels.recovery_done));
                self.page
                    .set_recovery_status(RecoveryStatus::Sent(labels.recovery_sent.clone()));
                RecoveryOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error = %e, "Access link request failed");
                self.page
                    .set_recovery_button(ButtonState::enabled(&labels.recovery));
                let message = e.user_message();
                self.page
                    .set_recovery_status(RecoveryStatus::Error(message.clone()));
                RecoveryOutcome::Failed(message)
            }
        }
    }

    async fn request_checkout(&self, api: &A) -> Result<String> {
        let request = checkout_return_urls(&self.page.current_url()?);
        api.create_checkout_session(&request)
            .await?
            .url
            .filter(|url| !url.is_empty())
            .ok_or(PaywallError::MissingField("url"))
    }

    async fn demo_unlock(&self) -> CheckoutOutcome {
        tracing::info!("Demo mode: no verification backend, unlocking content for preview");
        self.page.show_demo_banner(&self.config.labels.demo_notice);
        self.page.sleep(self.config.demo_delay).await;

        if self.state().is_unlocked() {
            return CheckoutOutcome::AlreadyUnlocked;
        }
        self.advance(Transition::Reveal(UnlockSource::Demo));
        self.reveal(None, UnlockSource::Demo);
        CheckoutOutcome::DemoUnlocked
    }

    fn reveal(&self, markup: Option<&str>, source: UnlockSource) {
        self.page.hide_paywall();
        self.page.reveal_content(markup, self.config.fade);
        if source.shows_success_banner() {
            self.page.show_success_banner();
        }
        tracing::info!(source = source.as_str(), "Content unlocked");
    }

    fn begin(&self, source: UnlockSource) {
        tracing::debug!(source = source.as_str(), "Verifying access");
        self.advance(Transition::Begin(source));
    }

    fn advance(&self, transition: Transition) {
        match self.state().apply(transition) {
            Ok(next) => self.state.set(next),
            Err(e) => tracing::error!(error = %e, "Ignoring unlock transition"),
        }
    }

    fn strip_url(&self, url: &Url) {
        let stripped = strip_launch_params(url);
        if stripped != *url {
            if let Err(e) = self.page.replace_url(&stripped) {
                tracing::warn!(error = %e, "Could not rewrite page URL");
            }
        }
    }

    fn load_token(&self) -> Option<AccessToken> {
        self.store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Token storage unreadable");
            None
        })
    }

    fn save_token(&self, token: &AccessToken) {
        if let Err(e) = self.store.save(token) {
            tracing::warn!(error = %e, "Could not persist access token");
        }
    }

    fn clear_token(&self) {
        tracing::info!("Discarding rejected access token");
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Could not discard access token");
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}
