//! One-shot notices carried across a redirect
//!
//! A redirect that wants to show a message on the next page sets the
//! `blog_flash` cookie; the page that renders it clears the cookie again.
//! The cookie value is base64url-encoded JSON (`["notice", ...]`).

use axum::{
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Redirect, Response},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

pub const FLASH_COOKIE: &str = "blog_flash";

const CLEAR_FLASH: &str = "blog_flash=; Path=/; Max-Age=0";

pub fn encode(notices: &[String]) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(notices).unwrap_or_default())
}

pub fn decode(value: &str) -> Option<Vec<String>> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// 303 redirect to `to`, leaving `notices` for the next rendered page.
pub fn redirect(to: &str, notices: &[String]) -> Response {
    let mut response = Redirect::to(to).into_response();
    if notices.is_empty() {
        return response;
    }

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        encode(notices)
    );
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!("Dropping flash notice: {}", e),
    }
    response
}

/// Expire the flash cookie on a response that displayed its notices.
pub fn clear(mut response: Response) -> Response {
    response
        .headers_mut()
        .append(SET_COOKIE, HeaderValue::from_static(CLEAR_FLASH));
    response
}
