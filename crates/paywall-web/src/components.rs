//! UI Components

use leptos::prelude::*;
use paywall_core::RecoveryStatus;

use crate::browser::PaywallSignals;

/// Shown after a confirmed checkout return or magic link
#[component]
pub fn SuccessBanner(visible: RwSignal<bool>) -> impl IntoView {
    view! {
        <div
            id="success-banner"
            class="success-banner"
            style:display=move || if visible.get() { "block" } else { "none" }
        >
            <p>"Payment confirmed. Enjoy the full article!"</p>
        </div>
    }
}

/// Notice inserted ahead of the paywall when no backend is configured
#[component]
pub fn DemoBanner(notice: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        {move || {
            notice
                .get()
                .map(|text| view! { <div class="demo-banner"><p>{text}</p></div> })
        }}
    }
}

/// Gated content container.
///
/// API markup is injected without sanitization.
#[component]
pub fn FullContent(signals: PaywallSignals, inline: &'static str) -> impl IntoView {
    let markup = move || signals.content.get().unwrap_or_else(|| inline.to_string());

    view! {
        <div
            id="full-content"
            class="full-content"
            style:display=move || if signals.content_visible.get() { "block" } else { "none" }
            style:opacity=move || if signals.content_opaque.get() { "1" } else { "0" }
            style:transition=move || format!("opacity {}ms ease", signals.fade.get().as_millis())
            inner_html=markup
        />
    }
}

#[component]
pub fn RecoveryStatusLine(status: RwSignal<Option<RecoveryStatus>>) -> impl IntoView {
    view! {
        {move || {
            status.get().map(|status| {
                let (class, text) = match status {
                    RecoveryStatus::Sent(text) => ("status status-ok", text),
                    RecoveryStatus::Error(text) => ("status status-error", text),
                };
                view! { <p class=class>{text}</p> }
            })
        }}
    }
}
