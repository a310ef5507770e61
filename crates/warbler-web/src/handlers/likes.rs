use axum::{extract::State, response::Response};
use tracing::debug;

use warbler_types::flash::Flash;

use crate::error::AppError;
use crate::extract::Id;
use crate::session::WebSession;
use crate::state::AppState;

/// POST /users/add_like/<id>
pub async fn add_like(
    State(state): State<AppState>,
    mut session: WebSession,
    Id(message_id): Id,
) -> Result<Response, AppError> {
    let Some(user) = session.user.clone() else {
        return Ok(session.deny("Unauthorized, can not add like."));
    };

    let msg = state.db.get_message(message_id)?.ok_or(AppError::NotFound)?;
    if msg.user_id == user.id {
        session.flash(Flash::danger("You cannot like your own warble."));
        return Ok(session.redirect("/"));
    }

    let added = state.db.add_like(user.id, message_id)?;
    debug!(message_id, user_id = user.id, added, "Like added");

    Ok(session.redirect("/"))
}

/// POST /users/unlike/<id>
pub async fn remove_like(
    State(state): State<AppState>,
    session: WebSession,
    Id(message_id): Id,
) -> Result<Response, AppError> {
    let Some(user) = session.user.clone() else {
        return Ok(session.deny("Unauthorized, can not delete like."));
    };

    state.db.get_message(message_id)?.ok_or(AppError::NotFound)?;

    let removed = state.db.remove_like(user.id, message_id)?;
    debug!(message_id, user_id = user.id, removed, "Like removed");

    Ok(session.redirect("/"))
}
