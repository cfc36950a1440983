//! Pending flash notices carried by the request

use crate::flash;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::COOKIE, request::Parts},
};
use std::convert::Infallible;

/// Notices left by a previous redirect. Empty when there are none or the
/// cookie cannot be decoded; `has_cookie` still reports a cookie that was
/// sent but undecodable, so the page can expire it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    messages: Vec<String>,
    has_cookie: bool,
}

impl Notices {
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn has_cookie(&self) -> bool {
        self.has_cookie
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Notices
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let cookie = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|h| h.to_str().ok())
            .flat_map(|h| h.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == flash::FLASH_COOKIE)
            .map(|(_, value)| value);

        Ok(Notices {
            messages: cookie.and_then(flash::decode).unwrap_or_default(),
            has_cookie: cookie.is_some(),
        })
    }
}
