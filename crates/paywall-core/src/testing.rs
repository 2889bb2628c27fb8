//! Recording test doubles for the controller's collaborators

use std::cell::RefCell;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::api::{CheckoutRequest, CheckoutSession, UnlockedContent, VerificationApi, VerifiedContent};
use crate::error::{PaywallError, Result};
use crate::page::{ButtonState, Page, RecoveryStatus};
use crate::token::SessionId;

/// Canned reply for one API call
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    Rejected(u16),
    RejectedWith(u16, &'static str),
    Down,
}

impl<T> Default for Reply<T> {
    fn default() -> Self {
        Self::Down
    }
}

impl<T: Clone> Reply<T> {
    fn get(&self) -> Result<T> {
        match self {
            Self::Ok(value) => Ok(value.clone()),
            Self::Rejected(status) => Err(PaywallError::Rejected { status: *status, message: None }),
            Self::RejectedWith(status, message) => Err(PaywallError::Rejected {
                status: *status,
                message: Some((*message).to_string()),
            }),
            Self::Down => Err(PaywallError::Transport("connection refused".into())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Checkout(CheckoutRequest),
    VerifySession(String),
    VerifyToken(String),
    Resend(String),
}

#[derive(Default)]
pub struct MockApi {
    pub checkout: Reply<CheckoutSession>,
    pub session: Reply<VerifiedContent>,
    pub token: Reply<UnlockedContent>,
    pub resend: Reply<()>,
    pub calls: RefCell<Vec<Call>>,
}

impl MockApi {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl VerificationApi for MockApi {
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession> {
        self.calls.borrow_mut().push(Call::Checkout(request.clone()));
        self.checkout.get()
    }

    async fn verify_session(&self, session_id: &SessionId) -> Result<VerifiedContent> {
        self.calls
            .borrow_mut()
            .push(Call::VerifySession(session_id.as_str().to_string()));
        self.session.get()
    }

    async fn verify_token(&self, token: &str) -> Result<UnlockedContent> {
        self.calls.borrow_mut().push(Call::VerifyToken(token.to_string()));
        self.token.get()
    }

    async fn resend_magic_link(&self, email: &str) -> Result<()> {
        self.calls.borrow_mut().push(Call::Resend(email.to_string()));
        self.resend.get()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEvent {
    ReplaceUrl(String),
    Navigate(String),
    HidePaywall,
    Reveal(Option<String>),
    SuccessBanner,
    DemoBanner(String),
    UnlockButton(ButtonState),
    RecoveryButton(ButtonState),
    RecoveryStatus(RecoveryStatus),
    Alert(String),
    Sleep(Duration),
}

pub struct MockPage {
    url: RefCell<Url>,
    events: RefCell<Vec<PageEvent>>,
}

impl MockPage {
    pub fn at(url: &str) -> Self {
        Self {
            url: RefCell::new(Url::parse(url).expect("test url")),
            events: RefCell::new(Vec::new()),
        }
    }

    pub fn url(&self) -> Url {
        self.url.borrow().clone()
    }

    pub fn events(&self) -> Vec<PageEvent> {
        self.events.borrow().clone()
    }

    pub fn saw(&self, event: &PageEvent) -> bool {
        self.events.borrow().contains(event)
    }

    fn record(&self, event: PageEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[async_trait(?Send)]
impl Page for MockPage {
    fn current_url(&self) -> Result<Url> {
        Ok(self.url())
    }

    fn replace_url(&self, url: &Url) -> Result<()> {
        self.record(PageEvent::ReplaceUrl(url.to_string()));
        *self.url.borrow_mut() = url.clone();
        Ok(())
    }

    fn navigate(&self, url: &str) -> Result<()> {
        self.record(PageEvent::Navigate(url.to_string()));
        Ok(())
    }

    fn hide_paywall(&self) {
        self.record(PageEvent::HidePaywall);
    }

    fn reveal_content(&self, markup: Option<&str>, _fade: Duration) {
        self.record(PageEvent::Reveal(markup.map(str::to_string)));
    }

    fn show_success_banner(&self) {
        self.record(PageEvent::SuccessBanner);
    }

    fn show_demo_banner(&self, message: &str) {
        self.record(PageEvent::DemoBanner(message.to_string()));
    }

    fn set_unlock_button(&self, state: ButtonState) {
        self.record(PageEvent::UnlockButton(state));
    }

    fn set_recovery_button(&self, state: ButtonState) {
        self.record(PageEvent::RecoveryButton(state));
    }

    fn set_recovery_status(&self, status: RecoveryStatus) {
        self.record(PageEvent::RecoveryStatus(status));
    }

    fn alert(&self, message: &str) {
        self.record(PageEvent::Alert(message.to_string()));
    }

    async fn sleep(&self, duration: Duration) {
        self.record(PageEvent::Sleep(duration));
    }
}
