//! Launch Parameters
//!
//! Reads the query parameters a page load can arrive with (checkout return,
//! magic link, demo return) and decides which credential drives the unlock
//! attempt.

use url::{form_urlencoded, Url};

use crate::api::CheckoutRequest;
use crate::machine::UnlockSource;
use crate::token::{AccessToken, MagicToken, SessionId};

/// Query parameter carrying the checkout session identifier
pub const SESSION_PARAM: &str = "session_id";

/// Query parameter carrying a magic-link token
pub const TOKEN_PARAM: &str = "token";

/// Query parameter set by the demo checkout return
pub const PAID_PARAM: &str = "paid";

/// Placeholder the checkout provider substitutes with the real session id
pub const SESSION_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

const LAUNCH_PARAMS: [&str; 3] = [SESSION_PARAM, TOKEN_PARAM, PAID_PARAM];

/// Parameters found in the page URL at load time
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub session_id: Option<SessionId>,
    pub magic_token: Option<MagicToken>,
    pub paid: bool,
}

/// The single credential chosen to drive an unlock attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Credential {
    Session(SessionId),
    MagicLink(MagicToken),
    Stored(AccessToken),
    PaidReturn,
}

impl Credential {
    pub const fn source(&self) -> UnlockSource {
        match self {
            Self::Session(_) => UnlockSource::CheckoutReturn,
            Self::MagicLink(_) => UnlockSource::MagicLink,
            Self::Stored(_) => UnlockSource::StoredToken,
            Self::PaidReturn => UnlockSource::PaidReturn,
        }
    }
}

impl LaunchParams {
    pub fn from_url(url: &Url) -> Self {
        let mut params = Self::default();
        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                SESSION_PARAM if params.session_id.is_none() => {
                    params.session_id = Some(SessionId::new(value.into_owned()));
                }
                TOKEN_PARAM if params.magic_token.is_none() => {
                    params.magic_token = Some(MagicToken::new(value.into_owned()));
                }
                PAID_PARAM => params.paid |= value == "true",
                _ => {}
            }
        }
        params
    }

    /// Pick at most one credential, in priority order.
    ///
    /// With a backend: session id, then magic token, then stored token.
    /// Without one only the demo `paid=true` return counts.
    pub fn credential(self, stored: Option<AccessToken>, has_backend: bool) -> Option<Credential> {
        if !has_backend {
            return self.paid.then_some(Credential::PaidReturn);
        }
        self.session_id
            .map(Credential::Session)
            .or_else(|| self.magic_token.map(Credential::MagicLink))
            .or_else(|| stored.map(Credential::Stored))
    }
}

/// Copy of `url` with every launch parameter removed.
///
/// Other query segments are kept byte-for-byte, in order.
pub fn strip_launch_params(url: &Url) -> Url {
    let Some(query) = url.query() else {
        return url.clone();
    };

    let segments: Vec<&str> = query.split('&').collect();
    let kept: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|segment| !is_launch_segment(segment))
        .collect();
    if kept.len() == segments.len() {
        return url.clone();
    }

    let mut stripped = url.clone();
    if kept.iter().all(|segment| segment.is_empty()) {
        stripped.set_query(None);
    } else {
        stripped.set_query(Some(&kept.join("&")));
    }
    stripped
}

fn is_launch_segment(segment: &str) -> bool {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .is_some_and(|(key, _)| LAUNCH_PARAMS.contains(&key.as_ref()))
}

/// Success and cancel URLs handed to the checkout provider
pub fn checkout_return_urls(page: &Url) -> CheckoutRequest {
    let mut base = strip_launch_params(page);
    base.set_fragment(None);
    let cancel_url = base.to_string();
    let separator = if base.query().is_some() { '&' } else { '?' };
    CheckoutRequest {
        success_url: format!("{cancel_url}{separator}{SESSION_PARAM}={SESSION_PLACEHOLDER}"),
        cancel_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_session_id_wins_over_everything() {
        let params = LaunchParams::from_url(&url("https://blog.example/post?token=ml_1&session_id=cs_1"));
        let credential = params.credential(Some(AccessToken::new("stored")), true);
        assert_eq!(credential, Some(Credential::Session(SessionId::new("cs_1"))));
    }

    #[test]
    fn test_magic_token_before_stored_token() {
        let params = LaunchParams::from_url(&url("https://blog.example/post?token=ml_1"));
        let credential = params.credential(Some(AccessToken::new("stored")), true);
        assert_eq!(credential, Some(Credential::MagicLink(MagicToken::new("ml_1"))));
    }

    #[test]
    fn test_stored_token_when_url_is_clean() {
        let params = LaunchParams::from_url(&url("https://blog.example/post"));
        let credential = params.credential(Some(AccessToken::new("stored")), true);
        assert_eq!(credential.map(|c| c.source()), Some(UnlockSource::StoredToken));
        assert_eq!(LaunchParams::default().credential(None, true), None);
    }

    #[test]
    fn test_blank_values_are_absent() {
        let params = LaunchParams::from_url(&url("https://blog.example/post?session_id=&token="));
        assert_eq!(params, LaunchParams::default());
    }

    #[test]
    fn test_demo_mode_only_honours_paid() {
        let params = LaunchParams::from_url(&url("https://blog.example/post?session_id=cs_1&paid=true"));
        assert_eq!(params.clone().credential(None, false), Some(Credential::PaidReturn));
        assert!(matches!(params.credential(None, true), Some(Credential::Session(_))));

        let unpaid = LaunchParams::from_url(&url("https://blog.example/post?paid=yes"));
        assert_eq!(unpaid.credential(Some(AccessToken::new("t")), false), None);
    }

    #[test]
    fn test_strip_keeps_unrelated_params_and_fragment() {
        let stripped = strip_launch_params(&url("https://blog.example/post?ref=x&session_id=cs_1#intro"));
        assert_eq!(stripped.as_str(), "https://blog.example/post?ref=x#intro");

        let bare = strip_launch_params(&url("https://blog.example/post?token=ml_1&paid=true"));
        assert_eq!(bare.as_str(), "https://blog.example/post");
    }

    #[test]
    fn test_strip_preserves_kept_segments_verbatim() {
        let stripped = strip_launch_params(&url("https://blog.example/post?q=a%20b&flag&session_id=cs_1#x"));
        assert_eq!(stripped.as_str(), "https://blog.example/post?q=a%20b&flag#x");

        let clean = url("https://blog.example/post?flag");
        assert_eq!(strip_launch_params(&clean), clean);

        let encoded_key = strip_launch_params(&url("https://blog.example/post?a=1&session%5Fid=cs_1"));
        assert_eq!(encoded_key.as_str(), "https://blog.example/post?a=1");
    }

    #[test]
    fn test_checkout_return_urls() {
        let req = checkout_return_urls(&url("https://blog.example/post.html?paid=true#top"));
        assert_eq!(req.cancel_url, "https://blog.example/post.html");
        assert_eq!(
            req.success_url,
            "https://blog.example/post.html?session_id={CHECKOUT_SESSION_ID}"
        );

        let with_query = checkout_return_urls(&url("https://blog.example/post?id=7"));
        assert_eq!(
            with_query.success_url,
            "https://blog.example/post?id=7&session_id={CHECKOUT_SESSION_ID}"
        );
    }
}
