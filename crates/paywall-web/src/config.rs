//! Build-time configuration
//!
//! A static site has no process environment, so the paywall settings are
//! baked in when the WASM bundle is compiled.

use paywall_core::config::{ENV_API_BASE, ENV_DEMO_DELAY_MS, ENV_FADE_MS, ENV_STORAGE_KEY};
use paywall_core::PaywallConfig;

pub fn build_config() -> PaywallConfig {
    let config = PaywallConfig::from_vars(|key| {
        match key {
            ENV_API_BASE => option_env!("PAYWALL_API_BASE"),
            ENV_STORAGE_KEY => option_env!("PAYWALL_STORAGE_KEY"),
            ENV_FADE_MS => option_env!("PAYWALL_FADE_MS"),
            ENV_DEMO_DELAY_MS => option_env!("PAYWALL_DEMO_DELAY_MS"),
            _ => None,
        }
        .map(str::to_string)
    });

    match config {
        Ok(config) => {
            if config.has_backend() {
                tracing::info!("✓ Verification API configured");
            } else {
                tracing::warn!("⚠ No verification API configured - demo mode");
            }
            config
        }
        Err(e) => {
            tracing::error!(error = %e, "Invalid paywall configuration - demo mode");
            PaywallConfig::demo()
        }
    }
}
