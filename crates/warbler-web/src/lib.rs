pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod session;
pub mod state;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{auth, home, likes, messages, users};
use crate::state::AppState;

pub use crate::error::AppError;
pub use crate::session::{CURR_USER_KEY, WebSession};

/// Every Warbler route, static assets under `/static`, and the 404 fallback.
pub fn router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(home::homepage))
        .route("/signup", get(auth::signup_form).post(auth::signup))
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/users", get(users::list_users))
        .route("/users/profile", get(users::edit_profile_form).post(users::edit_profile))
        .route("/users/delete", post(users::delete_user))
        .route("/users/follow/{id}", post(users::add_follow))
        .route("/users/stop-following/{id}", post(users::stop_following))
        .route("/users/add_like/{id}", post(likes::add_like))
        .route("/users/unlike/{id}", post(likes::remove_like))
        .route("/users/{id}", get(users::show_user))
        .route("/users/{id}/following", get(users::show_following))
        .route("/users/{id}/followers", get(users::show_followers))
        .route("/users/{id}/likes", get(users::show_likes))
        .route("/messages/new", get(messages::new_message_form).post(messages::create_message))
        .route("/messages/{id}", get(messages::show_message))
        .route("/messages/{id}/delete", post(messages::delete_message))
        .nest_service("/static", static_files)
        .fallback(home::not_found)
        .layer(axum::middleware::from_fn(middleware::no_cache))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
