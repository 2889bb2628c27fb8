//! Post Page

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use paywall_api::HttpVerificationApi;
use paywall_core::{PaywallConfig, PaywallController};

use crate::browser::{BrowserPage, LocalTokenStore, PaywallSignals};
use crate::components::{DemoBanner, FullContent, RecoveryStatusLine, SuccessBanner};
use crate::config::build_config;

type WebController = PaywallController<HttpVerificationApi, LocalTokenStore, BrowserPage>;

const PREVIEW: &str = "<p>Our CI pipeline used to take forty minutes. Every pull request \
sat in the queue while the same crates were compiled again and again.</p>\
<p>Over one quarter we cut that to four. Here is what actually mattered.</p>";

// Revealed in demo mode only; with a backend the API supplies the content.
const DEMO_ARTICLE: &str = "<h2>1. Cache what you compile</h2>\
<p>A shared build cache removed most of the repeated work.</p>\
<h2>2. Split the slow tests</h2>\
<p>Integration suites moved to a parallel job that runs after merge.</p>";

fn build_controller(config: PaywallConfig, signals: PaywallSignals) -> WebController {
    let store = LocalTokenStore::new(config.storage_key.clone());
    let api = HttpVerificationApi::from_config(&config).ok();
    let controller = PaywallController::new(config, store, BrowserPage::new(signals));
    match api {
        Some(api) => controller.with_backend(api),
        None => controller,
    }
}

#[component]
pub fn PostPage() -> impl IntoView {
    let config = build_config();
    let signals = PaywallSignals::new(&config.labels);
    let controller = build_controller(config, signals);
    let inline = if controller.has_backend() { "" } else { DEMO_ARTICLE };
    let controller = StoredValue::new_local(Rc::new(controller));
    let (email, set_email) = signal(String::new());

    let loading = controller.get_value();
    spawn_local(async move {
        loading.on_load().await;
    });

    let unlock = move |_| {
        let controller = controller.get_value();
        spawn_local(async move {
            controller.start_checkout().await;
        });
    };

    let request_link = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let controller = controller.get_value();
        let email = email.get_untracked();
        spawn_local(async move {
            controller.request_access_link(&email).await;
        });
    };

    view! {
        <article class="post">
            <header class="post-header">
                <h1>"How We Made Our Builds 10x Faster"</h1>
                <p class="byline">"8 min read"</p>
            </header>

            <SuccessBanner visible=signals.success_banner />

            <section class="preview" inner_html=PREVIEW />

            <DemoBanner notice=signals.demo_notice />

            <div
                id="paywall"
                class="paywall"
                style:display=move || if signals.paywall_visible.get() { "block" } else { "none" }
            >
                <h2>"Keep reading"</h2>
                <p>"Unlock the full article with a one-time payment of $1."</p>
                <button
                    id="unlock-btn"
                    class="btn btn-primary"
                    disabled=move || !signals.unlock_button.get().enabled
                    on:click=unlock
                >
                    {move || signals.unlock_button.get().label}
                </button>

                <form class="recovery" on:submit=request_link>
                    <label for="recovery-email">"Already purchased?"</label>
                    <input
                        id="recovery-email"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                    <button
                        type="submit"
                        class="btn"
                        disabled=move || !signals.recovery_button.get().enabled
                    >
                        {move || signals.recovery_button.get().label}
                    </button>
                    <RecoveryStatusLine status=signals.recovery_status />
                </form>
            </div>

            <FullContent signals=signals inline=inline />
        </article>
    }
}
