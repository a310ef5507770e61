//! In-process test harness: the real router over an in-memory database.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use warbler_db::Database;
use warbler_db::models::UserRow;
use warbler_web::session::signed_session_cookie;
use warbler_web::state::AppState;

const TEST_SECRET: &str = "secret for integration tests";
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../static");

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub location: Option<String>,
    pub html: String,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Whether user-supplied `text` appears on the page, encoded the way the
    /// views encode it.
    pub fn shows(&self, text: &str) -> bool {
        self.html.contains(&ammonia::clean_text(text))
    }
}

/// A browser stand-in: keeps the session cookie between requests and can
/// follow redirects.
pub struct TestApp {
    pub db: Arc<Database>,
    state: AppState,
    router: Router,
    cookie: Option<String>,
}

impl TestApp {
    pub fn new() -> Self {
        let db = Database::open_in_memory().unwrap();
        let state = AppState::new(db, TEST_SECRET, STATIC_DIR);
        let router = warbler_web::router(state.clone());

        Self {
            db: state.db.clone(),
            state,
            router,
            cookie: None,
        }
    }

    pub fn signup(&self, username: &str, email: &str, password: &str) -> UserRow {
        self.db.signup(username, email, password, None).unwrap()
    }

    /// Act as `user_id` without going through the login form. The id does
    /// not have to name an existing user.
    pub fn login_as(&mut self, user_id: i64) {
        self.cookie = Some(signed_session_cookie(&self.state.key, user_id).unwrap());
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(form)
            .finish();
        self.send(Method::POST, path, Some(body)).await
    }

    /// POST with no body and no content type.
    pub async fn post_bare(&mut self, path: &str) -> TestResponse {
        self.send(Method::POST, path, None).await
    }

    pub async fn post_bare_follow(&mut self, path: &str) -> TestResponse {
        let resp = self.post_bare(path).await;
        self.follow(resp).await
    }

    pub async fn get_follow(&mut self, path: &str) -> TestResponse {
        let resp = self.get(path).await;
        self.follow(resp).await
    }

    pub async fn post_follow(&mut self, path: &str, form: &[(&str, &str)]) -> TestResponse {
        let resp = self.post(path, form).await;
        self.follow(resp).await
    }

    async fn follow(&mut self, mut resp: TestResponse) -> TestResponse {
        for _ in 0..5 {
            if resp.status != StatusCode::FOUND {
                break;
            }
            let to = resp.location.clone().unwrap();
            resp = self.get(&to).await;
        }
        resp
    }

    async fn send(&mut self, method: Method, path: &str, form: Option<String>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match form {
            Some(form) => builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            if let Some(value) = pair.strip_prefix("session=") {
                self.cookie = if value.is_empty() {
                    None
                } else {
                    Some(pair.to_string())
                };
            }
        }

        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        TestResponse {
            status,
            headers,
            location,
            html: String::from_utf8_lossy(&bytes).into_owned(),
            body: bytes.to_vec(),
        }
    }
}
