//! HTTP Verification API
//!
//! Implementation of `VerificationApi` over the worker's JSON endpoints.
//! No timeout and no retries: a hung request stays pending.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use paywall_core::{
    ApiErrorBody, CheckoutRequest, CheckoutSession, PaywallConfig, PaywallError, Result,
    SessionId, UnlockedContent, VerificationApi, VerifiedContent,
};

/// Verification API client
#[derive(Clone, Debug)]
pub struct HttpVerificationApi {
    client: Client,
    base_url: String,
}

impl HttpVerificationApi {
    /// Create a client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create from configuration; fails when no backend is configured
    pub fn from_config(config: &PaywallConfig) -> Result<Self> {
        config
            .api_base
            .as_deref()
            .map(Self::new)
            .ok_or_else(|| PaywallError::Config("no verification API base configured".into()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Decode a success body, or turn a non-success status into `Rejected`
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body: ApiErrorBody = response.json().await.unwrap_or_default();
            return Err(PaywallError::Rejected {
                status: status.as_u16(),
                message: body.error,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PaywallError::Decode(e.to_string()))
    }
}

fn transport(err: reqwest::Error) -> PaywallError {
    PaywallError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl VerificationApi for HttpVerificationApi {
    async fn create_checkout_session(&self, request: &CheckoutRequest) -> Result<CheckoutSession> {
        let response = self
            .client
            .post(self.endpoint("create-checkout-session"))
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        Self::read_json(response).await
    }

    async fn verify_session(&self, session_id: &SessionId) -> Result<VerifiedContent> {
        let response = self
            .client
            .get(self.endpoint("verify"))
            .query(&[("session_id", session_id.as_str())])
            .send()
            .await
            .map_err(transport)?;

        Self::read_json(response).await
    }

    async fn verify_token(&self, token: &str) -> Result<UnlockedContent> {
        let response = self
            .client
            .get(self.endpoint("verify-token"))
            .query(&[("token", token)])
            .send()
            .await
            .map_err(transport)?;

        Self::read_json(response).await
    }

    async fn resend_magic_link(&self, email: &str) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint("resend-magic-link"))
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await
            .map_err(transport)?;

        // Any answer counts as sent so the response never reveals whether
        // the address has a purchase on file.
        tracing::debug!(status = response.status().as_u16(), "Access link endpoint answered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let api = HttpVerificationApi::new("https://paywall.example/");
        assert_eq!(api.endpoint("verify"), "https://paywall.example/verify");
    }

    #[test]
    fn test_from_config_requires_backend() {
        assert!(matches!(
            HttpVerificationApi::from_config(&PaywallConfig::demo()),
            Err(PaywallError::Config(_))
        ));
        let api = HttpVerificationApi::from_config(&PaywallConfig::with_backend("https://w.example"))
            .unwrap();
        assert_eq!(api.base_url(), "https://w.example");
    }
}
