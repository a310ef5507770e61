//! Cookie-backed sessions.
//!
//! The whole session lives client-side in one signed cookie: a base64url
//! encoded JSON object. The signature stops tampering; the content is not
//! secret, so nothing sensitive belongs in it.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD as B64;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use warbler_db::models::UserRow;
use warbler_types::flash::Flash;

use crate::error::AppError;
use crate::state::AppState;
use crate::views;

pub const SESSION_COOKIE: &str = "session";

/// Session key holding the logged-in user's id.
pub const CURR_USER_KEY: &str = "curr_user";

pub const ACCESS_UNAUTHORIZED: &str = "Access unauthorized.";

/// Most flashes a session carries; the cookie has to stay under 4 KiB.
pub const MAX_FLASHES: usize = 5;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    // Must match CURR_USER_KEY
    #[serde(rename = "curr_user", default, skip_serializing_if = "Option::is_none")]
    curr_user: Option<i64>,

    #[serde(rename = "_flashes", default, skip_serializing_if = "Vec::is_empty")]
    flashes: Vec<Flash>,
}

impl Session {
    pub fn user_id(&self) -> Option<i64> {
        self.curr_user
    }

    pub fn set_user(&mut self, user_id: i64) {
        self.curr_user = Some(user_id);
    }

    pub fn clear_user(&mut self) {
        self.curr_user = None;
    }

    /// Queue `flash` unless the same one is already pending. Past
    /// [`MAX_FLASHES`] the oldest is dropped.
    pub fn push_flash(&mut self, flash: Flash) {
        if self.flashes.contains(&flash) {
            return;
        }
        if self.flashes.len() >= MAX_FLASHES {
            self.flashes.remove(0);
        }
        self.flashes.push(flash);
    }

    pub fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flashes)
    }

    pub fn is_empty(&self) -> bool {
        self.curr_user.is_none() && self.flashes.is_empty()
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        Ok(B64.encode(serde_json::to_vec(self)?))
    }

    /// `None` for anything that is not a session we wrote.
    pub fn decode(raw: &str) -> Option<Self> {
        let bytes = B64.decode(raw).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Write the session into the jar, or expire the cookie once it is empty.
    pub fn store(&self, jar: SignedCookieJar) -> SignedCookieJar {
        if self.is_empty() {
            return if jar.get(SESSION_COOKIE).is_some() {
                jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
            } else {
                jar
            };
        }

        match self.encode() {
            Ok(value) => jar.add(
                Cookie::build((SESSION_COOKIE, value))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax),
            ),
            Err(e) => {
                error!("Failed to encode session: {}", e);
                jar
            }
        }
    }
}

/// Per-request session plus the user it resolves to.
///
/// An id in the cookie that no longer names a user resolves to no user; the
/// request is then treated exactly like an anonymous one.
pub struct WebSession {
    jar: SignedCookieJar,
    data: Session,
    pub user: Option<UserRow>,
}

impl FromRequestParts<AppState> for WebSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar: SignedCookieJar = SignedCookieJar::from_headers(&parts.headers, state.key.clone());

        let data = match jar.get(SESSION_COOKIE) {
            Some(cookie) => Session::decode(cookie.value()).unwrap_or_else(|| {
                debug!("Discarding undecodable session cookie");
                Session::default()
            }),
            None => Session::default(),
        };

        let user = match data.user_id() {
            Some(id) => state.db.get_user(id)?,
            None => None,
        };

        Ok(Self { jar, data, user })
    }
}

impl WebSession {
    pub fn login(&mut self, user: &UserRow) {
        self.data.set_user(user.id);
        self.user = Some(user.clone());
    }

    pub fn logout(&mut self) {
        self.data.clear_user();
        self.user = None;
    }

    pub fn flash(&mut self, flash: Flash) {
        self.data.push_flash(flash);
    }

    /// Refuse the request: flash `message` and send the browser home.
    pub fn deny(mut self, message: &str) -> Response {
        warn!(user_id = ?self.data.user_id(), "{}", message);
        self.flash(Flash::danger(message));
        self.redirect("/")
    }

    pub fn redirect(self, to: &str) -> Response {
        (self.into_jar(), found(to)).into_response()
    }

    /// Render `body` inside the site layout, consuming pending flashes.
    pub fn render(self, title: &str, body: String) -> Response {
        self.render_with_status(StatusCode::OK, title, body)
    }

    pub fn render_with_status(mut self, status: StatusCode, title: &str, body: String) -> Response {
        let flashes = self.data.take_flashes();
        let page = views::layout(title, self.user.as_ref(), &flashes, &body);
        (status, self.into_jar(), Html(page)).into_response()
    }

    pub fn into_jar(self) -> SignedCookieJar {
        self.data.store(self.jar)
    }
}

/// `302 Found`, the status browsers and form posts expect for a redirect.
pub fn found(to: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, to.to_string())]).into_response()
}

/// `name=value` cookie pair for a session logged in as `user_id`, signed
/// with `key`. Lets callers act as a user without going through login.
pub fn signed_session_cookie(key: &Key, user_id: i64) -> Option<String> {
    let mut session = Session::default();
    session.set_user(user_id);

    let jar = session.store(SignedCookieJar::new(key.clone()));
    let response = (jar, ()).into_response();

    let pair = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(SESSION_COOKIE))
        .and_then(|v| v.split(';').next())
        .map(str::to_string);
    pair
}
