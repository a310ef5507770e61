use axum::{extract::State, http::StatusCode, response::Response};

use crate::error::AppError;
use crate::session::WebSession;
use crate::state::AppState;
use crate::views;

/// How many messages the home timeline shows.
const TIMELINE_LIMIT: u32 = 100;

/// GET /: Timeline for a logged-in user, landing page otherwise.
pub async fn homepage(
    State(state): State<AppState>,
    session: WebSession,
) -> Result<Response, AppError> {
    let Some(user) = session.user.clone() else {
        return Ok(session.render("Warbler", views::home::anon()));
    };

    let timeline = state.db.timeline(user.id, TIMELINE_LIMIT)?;
    let liked = state.db.liked_message_ids(user.id)?;
    let stats = state.db.user_stats(user.id)?;

    let body = views::home::home(&user, &stats, &timeline, &liked);
    Ok(session.render("Warbler", body))
}

pub async fn not_found(session: WebSession) -> Response {
    session.render_with_status(
        StatusCode::NOT_FOUND,
        "Not Found",
        views::errors::error_page(StatusCode::NOT_FOUND),
    )
}
